use crate::Network;
use std::fmt;
use std::str::FromStr;

/// Scoring rule used by local moving to pick a vertex's next cluster
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum Objective {
    /// Modularity gain: `cross - pc * pv`, with the vertex's own mass removed from its current cluster
    #[default]
    Modularity,
    /// K-sets+ correlation rule. Singleton clusters are never moved and no scoring step is
    /// defined for it yet, so local moving under this objective proposes no moves.
    KSetsPlus,
}

impl Objective {
    /// Whether a vertex that is alone in its cluster is skipped without scoring
    pub fn skips_singletons(self) -> bool {
        matches!(self, Objective::KSetsPlus)
    }
}

impl FromStr for Objective {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "modularity" => Ok(Objective::Modularity),
            "ksets+" | "ksets-plus" => Ok(Objective::KSetsPlus),
            _ => Err(format!("unknown objective '{s}'")),
        }
    }
}

impl fmt::Display for Objective {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Objective::Modularity => f.write_str("modularity"),
            Objective::KSetsPlus => f.write_str("ksets+"),
        }
    }
}

/// Modularity of `labels` on `network`, computed directly from the edges.
/// Used to check the per-level aggregates against the input graph.
pub fn modularity(network: &Network, labels: &[usize]) -> f64 {
    assert_eq!(labels.len(), network.nodes());
    let two_m = 2.0 * network.total_weight();
    if two_m <= 0.0 {
        return 0.0;
    }

    let num_clusters = labels.iter().max().map_or(0, |&l| l + 1);
    let mut internal = vec![0.0; num_clusters];
    let mut cluster_degree = vec![0.0; num_clusters];

    for e in network.graph.edge_references() {
        let c1 = labels[e.source().index() as usize];
        let c2 = labels[e.target().index() as usize];
        if c1 == c2 {
            internal[c1] += 2.0 * *e.weight();
        }
    }

    for (v, &c) in labels.iter().enumerate() {
        internal[c] += 2.0 * network.self_weight(v);
        cluster_degree[c] += network.degree(v);
    }

    internal
        .iter()
        .zip(cluster_degree.iter())
        .map(|(&inner, &degree)| inner / two_m - (degree / two_m) * (degree / two_m))
        .sum()
}

#[cfg(test)]
mod test {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_two_components() {
        let n = Network::from_edges(4, vec![(0, 1, 1.0), (2, 3, 1.0)]);
        assert_abs_diff_eq!(modularity(&n, &[0, 0, 1, 1]), 0.5, epsilon = 1e-12);
        assert_abs_diff_eq!(modularity(&n, &[0, 0, 0, 0]), 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(modularity(&n, &[0, 1, 2, 3]), -0.25, epsilon = 1e-12);
    }

    #[test]
    fn test_no_edges() {
        let n = Network::new(3);
        assert_eq!(modularity(&n, &[0, 1, 2]), 0.0);
    }

    #[test]
    fn test_parse() {
        assert_eq!("modularity".parse::<Objective>(), Ok(Objective::Modularity));
        assert_eq!("ksets+".parse::<Objective>(), Ok(Objective::KSetsPlus));
        assert!("cpm".parse::<Objective>().is_err());
        assert!(Objective::KSetsPlus.skips_singletons());
        assert!(!Objective::default().skips_singletons());
    }
}
