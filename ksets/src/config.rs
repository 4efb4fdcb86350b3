use crate::error::{Error, Result};
use crate::{Objective, Partition, VisitOrder};
use fxhash::FxHashMap;

/// Clustering of the input graph that the first level starts from
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum InitialPartition {
    /// Every vertex in its own cluster
    #[default]
    Singletons,
    /// Vertex `v` starts in cluster `v % k`; requires `1 <= k <= vcount`
    RoundRobin(usize),
    /// Explicit label per vertex. Arbitrary values are compacted to dense ids in first-seen order.
    Labels(Vec<usize>),
}

impl InitialPartition {
    /// Build the partition of `vcount` vertices this describes
    pub fn build(&self, vcount: usize) -> Result<Partition> {
        match self {
            InitialPartition::Singletons => Ok(Partition::singletons(vcount)),
            InitialPartition::RoundRobin(k) => {
                if *k == 0 || *k > vcount.max(1) {
                    return Err(Error::InvalidParameter {
                        name: "initial_clusters",
                        message: format!("{k} clusters requested for {vcount} vertices"),
                    });
                }
                let assignment: Vec<usize> = (0..vcount).map(|v| v % k).collect();
                Ok(Partition::from_assignment(&assignment))
            }
            InitialPartition::Labels(labels) => {
                if labels.len() != vcount {
                    return Err(Error::LabelCount {
                        expected: vcount,
                        found: labels.len(),
                    });
                }
                let mut dense = FxHashMap::default();
                let assignment: Vec<usize> = labels
                    .iter()
                    .map(|label| {
                        let next = dense.len();
                        *dense.entry(*label).or_insert(next)
                    })
                    .collect();
                Ok(Partition::from_assignment(&assignment))
            }
        }
    }
}

/// Settings of a multilevel run
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Config {
    /// Scoring rule for local moving
    pub objective: Objective,
    /// Vertex visiting order for local moving
    pub visit_order: VisitOrder,
    /// Clustering the first level starts from
    pub initial: InitialPartition,
}
