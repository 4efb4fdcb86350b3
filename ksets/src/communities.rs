/// Final clustering of the original vertices plus per-level diagnostics.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Communities {
    /// Community label of each original vertex, indexed by vertex id
    pub labels: Vec<usize>,
    /// Number of non-empty clusters after each coarsening
    pub level_sizes: Vec<usize>,
    /// Local moving rounds needed to reach a fixpoint, one entry per local moving pass
    pub level_rounds: Vec<usize>,
    /// Modularity of the final clustering
    pub modularity: f64,
}

impl Communities {
    /// Every vertex in its own community, with no levels run
    pub fn singletons(vcount: usize) -> Communities {
        Communities {
            labels: (0..vcount).collect(),
            ..Communities::default()
        }
    }

    /// Number of distinct labels
    pub fn num_communities(&self) -> usize {
        self.groups().len()
    }

    /// Original vertex ids grouped by label. Groups are ordered by label and ids within a group ascend.
    pub fn groups(&self) -> Vec<Vec<usize>> {
        let num_labels = self.labels.iter().max().map_or(0, |&l| l + 1);
        let mut groups = vec![Vec::new(); num_labels];
        for (v, &label) in self.labels.iter().enumerate() {
            groups[label].push(v);
        }
        groups.retain(|g| !g.is_empty());
        groups
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_groups() {
        let c = Communities {
            labels: vec![2, 0, 2, 5, 0],
            ..Communities::default()
        };
        assert_eq!(c.groups(), vec![vec![1, 4], vec![0, 2], vec![3]]);
        assert_eq!(c.num_communities(), 3);
    }

    #[test]
    fn test_singletons() {
        let c = Communities::singletons(3);
        assert_eq!(c.groups(), vec![vec![0], vec![1], vec![2]]);
        assert!(Communities::singletons(0).groups().is_empty());
    }
}
