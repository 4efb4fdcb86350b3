use crate::{ActiveSet, Network, Partition};

/// Normalized mass aggregates of one level.
///
/// All values are fractions of `2 * total_weight`, i.e. probabilities that a uniformly drawn
/// edge endpoint lands in the vertex or cluster.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Statistics {
    /// Weighted degree of each vertex
    pub pv: Vec<f64>,
    /// Residual self mass each vertex carries from the cluster it replaced
    pub pvv: Vec<f64>,
    /// Summed `pv` of each cluster's members
    pub pc: Vec<f64>,
    /// Mass of edge endpoints with both ends inside each cluster, members' `pvv` included
    pub pcc: Vec<f64>,
}

impl Statistics {
    /// Compute every aggregate from scratch for `network` clustered by `partition`.
    /// A network without weight yields all zeros.
    pub fn new(network: &Network, partition: &Partition) -> Statistics {
        let n = network.nodes();
        assert_eq!(partition.nodes(), n, "partition size does not match the network");

        let mut s = Statistics {
            pv: vec![0.0; n],
            pvv: vec![0.0; n],
            pc: vec![0.0; n],
            pcc: vec![0.0; n],
        };

        let two_m = 2.0 * network.total_weight();
        if two_m <= 0.0 {
            return s;
        }

        for v in 0..n {
            let c = partition.which_cluster(v);
            s.pv[v] = network.degree(v) / two_m;
            s.pvv[v] = 2.0 * network.self_weight(v) / two_m;
            s.pc[c] += s.pv[v];
            s.pcc[c] += s.pvv[v];

            for (target, weight) in network.neighbors(v) {
                if partition.which_cluster(target) == c {
                    s.pcc[c] += weight / two_m;
                }
            }
        }
        s
    }

    /// Modularity of the clustering these aggregates describe
    pub fn modularity(&self, active: &ActiveSet) -> f64 {
        active.iter().map(|c| self.pcc[c] - self.pc[c] * self.pc[c]).sum()
    }
}
