//! Multilevel community detection by greedy local moving and cluster contraction
#![deny(missing_docs)]

/// Set of currently non-empty cluster ids
pub mod active_set;

/// Output of a multilevel run
pub mod communities;

/// Settings of a multilevel run
pub mod config;

/// Reading edge lists into a network
pub mod edgelist;

/// Error type for building networks and configuring runs
pub mod error;

/// One level of the hierarchy: graph, aggregates, partition and active clusters
pub mod level;

/// Greedy vertex reassignment
pub mod local_moving;

/// Multilevel driver
pub mod louvain;

/// Data structure for storing a weighted, undirected graph (aka network)
pub mod network;

/// Clustering objective functions
pub mod objective;

/// Vertex to cluster assignment with enumerable member lists
pub mod partition;

/// Normalized per-vertex and per-cluster mass aggregates
pub mod stats;

/// Contraction of clusters into supernodes
pub mod coarsen;

mod graph;
mod stamp;


pub use active_set::ActiveSet;
pub use communities::Communities;
pub use config::{Config, InitialPartition};
pub use edgelist::{read_edge_list, InputFormat};
pub use error::{Error, Result};
pub use level::Level;
pub use local_moving::{LocalMoving, Sweep, VisitOrder};
pub use louvain::Louvain;
pub use network::{Graph, Network, MAX_NODES};
pub use objective::Objective;
pub use partition::Partition;
pub use stats::Statistics;
