use crate::{ActiveSet, Network, Partition, Statistics};

/// Everything the engines read and mutate for one level of the hierarchy.
/// A level is replaced wholesale by `coarsen`; nothing is shared between levels.
pub struct Level {
    pub(crate) network: Network,
    pub(crate) stats: Statistics,
    pub(crate) partition: Partition,
    pub(crate) active: ActiveSet,
}

impl Level {
    /// Level clustered by `partition`, with aggregates computed from scratch.
    pub fn new(network: Network, partition: Partition) -> Level {
        let stats = Statistics::new(&network, &partition);
        let mut active = ActiveSet::new(partition.nodes());
        for v in 0..partition.nodes() {
            active.insert(partition.which_cluster(v));
        }
        Level {
            network,
            stats,
            partition,
            active,
        }
    }

    /// Level where every vertex is its own cluster
    pub fn singletons(network: Network) -> Level {
        let partition = Partition::singletons(network.nodes());
        Level::new(network, partition)
    }

    pub(crate) fn from_parts(network: Network, stats: Statistics, partition: Partition, active: ActiveSet) -> Level {
        Level {
            network,
            stats,
            partition,
            active,
        }
    }

    /// Number of vertices at this level
    pub fn nodes(&self) -> usize {
        self.network.nodes()
    }

    /// The level's graph
    pub fn network(&self) -> &Network {
        &self.network
    }

    /// The level's running aggregates
    pub fn stats(&self) -> &Statistics {
        &self.stats
    }

    /// The level's clustering
    pub fn partition(&self) -> &Partition {
        &self.partition
    }

    /// Currently non-empty clusters
    pub fn active(&self) -> &ActiveSet {
        &self.active
    }

    /// Modularity of the current clustering according to the running aggregates
    pub fn modularity(&self) -> f64 {
        self.stats.modularity(&self.active)
    }
}
