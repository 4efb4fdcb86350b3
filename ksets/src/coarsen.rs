use crate::graph::EdgeHandle;
use crate::stamp::StampTable;
use crate::{ActiveSet, Level, Network, Partition, Statistics};

/// Old cluster id to new supernode id, assigned on first access.
struct Mapping {
    ids: Vec<Option<usize>>,
    next: usize,
}

impl Mapping {
    fn new(len: usize) -> Self {
        Mapping {
            ids: vec![None; len],
            next: 0,
        }
    }

    fn id(&mut self, old: usize) -> usize {
        match self.ids[old] {
            Some(id) => id,
            None => {
                let id = self.next;
                self.ids[old] = Some(id);
                self.next += 1;
                id
            }
        }
    }

    fn len(&self) -> usize {
        self.next
    }
}

/// Contract every active cluster of `level` into one supernode.
///
/// The returned level starts from the singleton partition. Each supernode carries the degree mass
/// of its members as `pv` and the cluster's intra mass as `pvv`, so aggregates stay exact across
/// levels. `lineage[v]` is rewritten to the supernode that now represents original vertex `v`.
pub fn coarsen(level: &Level, lineage: &mut [usize]) -> Level {
    let new_n = level.active.len();
    assert!(new_n > 0, "coarsening a level without active clusters");

    let mut mapping = Mapping::new(level.nodes());
    let mut network = Network::reduced(new_n, level.network.total_weight());
    let mut pv = vec![0.0; new_n];
    let mut pcc = vec![0.0; new_n];
    let mut cross_edges: StampTable<EdgeHandle> = StampTable::new();
    cross_edges.reset(new_n);

    for c1 in level.active.iter() {
        let n1 = mapping.id(c1);
        pcc[n1] = level.stats.pcc[c1];

        for v1 in level.partition.members(c1) {
            pv[n1] += level.stats.pv[v1];

            for (v2, weight) in level.network.neighbors(v1) {
                let n2 = mapping.id(level.partition.which_cluster(v2));

                // Each cluster pair is handled once, from its lower supernode; same-cluster edges
                // are already part of pcc.
                if n1 >= n2 {
                    continue;
                }

                let handle = match cross_edges.get(n2, n1) {
                    Some(handle) => handle,
                    None => {
                        let handle = network.add_cross_edge(n1, n2);
                        cross_edges.record(n2, n1, handle);
                        handle
                    }
                };
                network.add_to_edge(handle, weight);
            }
        }
    }
    assert_eq!(mapping.len(), new_n, "active clusters did not map onto contiguous supernodes");

    for (n1, &mass) in pcc.iter().enumerate() {
        network.set_self_weight(n1, mass * network.total_weight());
    }

    for rep in lineage.iter_mut() {
        *rep = mapping.id(level.partition.which_cluster(*rep));
    }

    let stats = Statistics {
        pc: pv.clone(),
        pvv: pcc.clone(),
        pv,
        pcc,
    };
    Level::from_parts(network, stats, Partition::singletons(new_n), ActiveSet::full(new_n))
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{LocalMoving, Objective};
    use approx::assert_abs_diff_eq;
    use rand::SeedableRng;
    use rand_chacha::ChaCha20Rng;

    #[test]
    fn test_mapping_is_lazy() {
        let mut m = Mapping::new(5);
        assert_eq!(m.id(3), 0);
        assert_eq!(m.id(1), 1);
        assert_eq!(m.id(3), 0);
        assert_eq!(m.id(4), 2);
        assert_eq!(m.len(), 3);
    }

    #[test]
    fn test_coarsen_clustered_path() {
        // path 0-1-2-3-4 clustered as {0,1} {2} {3,4}
        let n = Network::from_edges(5, vec![(0, 1, 1.0), (1, 2, 2.0), (2, 3, 3.0), (3, 4, 4.0), (1, 2, 0.5)]);
        let level = Level::new(n, Partition::from_assignment(&[1, 1, 2, 4, 4]));
        let mut lineage: Vec<usize> = (0..5).collect();

        let next = coarsen(&level, &mut lineage);

        assert_eq!(next.nodes(), 3);
        assert_eq!(next.network().total_weight(), level.network().total_weight());
        assert_eq!(lineage[0], lineage[1]);
        assert_eq!(lineage[3], lineage[4]);
        assert_eq!(
            {
                let mut l = lineage.clone();
                l.sort_unstable();
                l.dedup();
                l
            },
            vec![0, 1, 2]
        );
        assert_eq!(next.partition().labels(), &[0, 1, 2]);
        assert_eq!(next.active().len(), 3);

        let (a, b, c) = (lineage[0], lineage[2], lineage[3]);
        let weights = |x: usize| next.network().neighbors(x).collect::<Vec<_>>();
        assert_eq!(weights(a), vec![(b, 2.5)]);
        let mut around_b = weights(b);
        around_b.sort_by(|x, y| x.0.cmp(&y.0));
        let mut expected = vec![(a, 2.5), (c, 3.0)];
        expected.sort_by(|x, y| x.0.cmp(&y.0));
        assert_eq!(around_b, expected);
        assert_eq!(next.network().edges(), 2);

        // 2W = 21
        let s = next.stats();
        assert_abs_diff_eq!(s.pv.iter().sum::<f64>(), 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(s.pv[a], 4.5 / 21.0, epsilon = 1e-12);
        assert_abs_diff_eq!(s.pvv[a], 2.0 / 21.0, epsilon = 1e-12);
        assert_abs_diff_eq!(s.pvv[c], 8.0 / 21.0, epsilon = 1e-12);
        assert_eq!(s.pvv[b], 0.0);
        assert_eq!(s.pc, s.pv);
        assert_eq!(s.pcc, s.pvv);

        // modularity is unchanged by contraction, and the supernode graph reproduces it
        assert_abs_diff_eq!(next.modularity(), level.modularity(), epsilon = 1e-12);
        let fresh = Statistics::new(next.network(), next.partition());
        for x in 0..3 {
            assert_abs_diff_eq!(fresh.pv[x], s.pv[x], epsilon = 1e-12);
            assert_abs_diff_eq!(fresh.pvv[x], s.pvv[x], epsilon = 1e-12);
        }
    }

    #[test]
    fn test_coarsen_after_local_moving() {
        let n = Network::from_edges(4, vec![(0, 1, 1.0), (2, 3, 1.0)]);
        let mut level = Level::singletons(n);
        LocalMoving::new(Objective::Modularity).iterate(&mut level, &mut ChaCha20Rng::seed_from_u64(0));
        let mut lineage: Vec<usize> = (0..4).collect();

        let next = coarsen(&level, &mut lineage);

        assert_eq!(next.nodes(), 2);
        assert_eq!(lineage, vec![1, 1, 0, 0]);
        assert_eq!(next.network().edges(), 0);
        assert_eq!(next.stats().pv, vec![0.5, 0.5]);
        assert_eq!(next.stats().pvv, vec![0.5, 0.5]);
    }
}
