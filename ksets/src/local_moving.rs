use crate::stamp::StampTable;
use crate::{Level, Objective};
use log::debug;
use rand::seq::SliceRandom;
use rand::Rng;

/// Order in which local moving visits the vertices of a level
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum VisitOrder {
    /// Ascending vertex id
    #[default]
    Sequential,
    /// One seeded random permutation per level
    Shuffled {
        /// Seed of the permutation generator
        seed: u64,
    },
}

/// Outcome of running local moving to a fixpoint on one level
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Sweep {
    /// Whether any vertex changed cluster
    pub moved: bool,
    /// Rounds over all vertices, the final move-free round included
    pub rounds: usize,
    /// Total number of accepted moves
    pub moves: usize,
}

#[derive(Copy, Clone, Debug)]
struct Candidate {
    cluster: usize,
    cross: f64,
}

/// Greedy vertex reassignment. Buffers are kept between levels to reuse heap space.
#[derive(Default)]
pub struct LocalMoving {
    objective: Objective,
    shuffle: bool,
    node_order: Vec<usize>,
    candidates: Vec<Candidate>,
    candidate_slots: StampTable<usize>,
}

impl LocalMoving {
    /// Local moving under `objective`, visiting vertices in id order
    pub fn new(objective: Objective) -> Self {
        LocalMoving {
            objective,
            ..LocalMoving::default()
        }
    }

    /// Local moving under `objective`; with `shuffle` each call draws a fresh vertex permutation
    pub fn with_shuffle(objective: Objective, shuffle: bool) -> Self {
        LocalMoving {
            objective,
            shuffle,
            ..LocalMoving::default()
        }
    }

    /// Move vertices of `level` between clusters until a full round makes no move.
    ///
    /// Updates are applied in place one vertex at a time, so later vertices in a round see the
    /// aggregates left behind by earlier moves.
    pub fn iterate(&mut self, level: &mut Level, rng: &mut impl Rng) -> Sweep {
        let n = level.nodes();
        let two_m = 2.0 * level.network.total_weight();
        let mut sweep = Sweep::default();
        if two_m <= 0.0 {
            return sweep;
        }

        self.node_order.clear();
        self.node_order.extend(0..n);
        if self.shuffle {
            self.node_order.shuffle(rng);
        }

        let mut changed = true;
        while changed {
            changed = false;
            sweep.rounds += 1;
            let mut round_moves = 0;
            self.candidate_slots.reset(n);

            for &v in &self.node_order {
                let old = level.partition.which_cluster(v);
                if self.objective.skips_singletons() && level.partition.size(old) <= 1 {
                    continue;
                }

                /*
                 * Collect the candidate clusters: the current cluster first, then every
                 * cluster reached by an incident edge, each with the summed edge weight
                 * from v into it.
                 */
                self.candidates.clear();
                self.candidates.push(Candidate { cluster: old, cross: 0.0 });
                self.candidate_slots.record(old, v, 0);
                for (target, weight) in level.network.neighbors(v) {
                    let c = level.partition.which_cluster(target);
                    let slot = match self.candidate_slots.get(c, v) {
                        Some(slot) => slot,
                        None => {
                            self.candidates.push(Candidate { cluster: c, cross: 0.0 });
                            self.candidate_slots.record(c, v, self.candidates.len() - 1);
                            self.candidates.len() - 1
                        }
                    };
                    self.candidates[slot].cross += weight;
                }
                for candidate in self.candidates.iter_mut() {
                    candidate.cross /= two_m;
                }

                let best = match self.objective {
                    Objective::Modularity => self.best_modularity_candidate(level, v),
                    // no K-sets+ scoring rule yet; the current cluster always stands
                    Objective::KSetsPlus => 0,
                };
                if self.candidates[best].cluster == old {
                    continue;
                }

                let stats = &mut level.stats;
                let new = self.candidates[best].cluster;
                let old_cross = self.candidates[0].cross;
                let new_cross = self.candidates[best].cross;

                if level.partition.size(old) == 1 {
                    level.active.erase(old);
                }
                level.partition.move_to(v, new);
                level.active.insert(new);

                stats.pc[old] -= stats.pv[v];
                stats.pc[new] += stats.pv[v];
                stats.pcc[old] -= 2.0 * old_cross + stats.pvv[v];
                stats.pcc[new] += 2.0 * new_cross + stats.pvv[v];

                changed = true;
                round_moves += 1;
            }

            debug!(
                "local moving round {}: {} moves, {} active clusters",
                sweep.rounds,
                round_moves,
                level.active.len()
            );
            sweep.moves += round_moves;
        }

        sweep.moved = sweep.moves > 0;
        sweep
    }

    /// Index into `candidates` of the highest scoring cluster. Ties keep the earlier candidate,
    /// so the current cluster (candidate 0) wins every tie.
    fn best_modularity_candidate(&self, level: &Level, v: usize) -> usize {
        let stats = &level.stats;
        let old = self.candidates[0].cluster;
        let pv = stats.pv[v];

        let mut best = 0;
        let mut best_score = f64::NEG_INFINITY;
        for (i, candidate) in self.candidates.iter().enumerate() {
            let c = candidate.cluster;
            let score = if c == old {
                if level.partition.size(old) == 1 {
                    0.0
                } else {
                    candidate.cross - (stats.pc[c] - pv) * pv
                }
            } else {
                candidate.cross - stats.pc[c] * pv
            };
            if score > best_score {
                best_score = score;
                best = i;
            }
        }
        best
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{Network, Partition, Statistics};
    use approx::assert_abs_diff_eq;
    use rand::SeedableRng;
    use rand_chacha::ChaCha20Rng;

    fn rng() -> ChaCha20Rng {
        ChaCha20Rng::seed_from_u64(0)
    }

    fn two_triangles() -> Network {
        Network::from_edges(
            6,
            vec![
                (0, 1, 10.0),
                (0, 2, 10.0),
                (1, 2, 10.0),
                (3, 4, 10.0),
                (3, 5, 10.0),
                (4, 5, 10.0),
                (2, 3, 1.0),
            ],
        )
    }

    fn assert_stats_match_recomputed(level: &Level) {
        let fresh = Statistics::new(level.network(), level.partition());
        for c in 0..level.nodes() {
            assert_abs_diff_eq!(level.stats().pc[c], fresh.pc[c], epsilon = 1e-12);
            assert_abs_diff_eq!(level.stats().pcc[c], fresh.pcc[c], epsilon = 1e-12);
        }
    }

    #[test]
    fn test_single_edge() {
        let mut level = Level::singletons(Network::from_edges(2, vec![(0, 1, 1.0)]));
        let sweep = LocalMoving::new(Objective::Modularity).iterate(&mut level, &mut rng());

        assert_eq!(
            sweep,
            Sweep {
                moved: true,
                rounds: 2,
                moves: 1
            }
        );
        assert_eq!(level.partition().labels(), &[1, 1]);
        assert_eq!(level.active().iter().collect::<Vec<_>>(), vec![1]);
        assert_abs_diff_eq!(level.stats().pc[1], 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(level.stats().pcc[1], 1.0, epsilon = 1e-12);
        assert_stats_match_recomputed(&level);
    }

    #[test]
    fn test_two_triangles() {
        let mut level = Level::singletons(two_triangles());
        let sweep = LocalMoving::new(Objective::Modularity).iterate(&mut level, &mut rng());

        assert!(sweep.moved);
        assert_eq!(sweep.rounds, 3);
        assert_eq!(level.partition().labels(), &[1, 1, 1, 5, 5, 5]);
        assert_eq!(level.active().iter().collect::<Vec<_>>(), vec![5, 1]);
        level.partition().assert_consistent();
        assert_stats_match_recomputed(&level);

        let total: usize = level.active().iter().map(|c| level.partition().size(c)).sum();
        assert_eq!(total, level.nodes());
        let mass: f64 = level.active().iter().map(|c| level.stats().pc[c]).sum();
        assert_abs_diff_eq!(mass, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_converged_level_stays_put() {
        let mut level = Level::singletons(two_triangles());
        let mut lm = LocalMoving::new(Objective::Modularity);
        lm.iterate(&mut level, &mut rng());
        let labels = level.partition().labels().to_vec();

        let again = lm.iterate(&mut level, &mut rng());
        assert_eq!(
            again,
            Sweep {
                moved: false,
                rounds: 1,
                moves: 0
            }
        );
        assert_eq!(level.partition().labels(), labels.as_slice());
    }

    #[test]
    fn test_moves_never_lower_modularity() {
        let mut level = Level::singletons(two_triangles());
        let before = level.modularity();
        LocalMoving::new(Objective::Modularity).iterate(&mut level, &mut rng());
        assert!(level.modularity() > before);
        assert_abs_diff_eq!(
            level.modularity(),
            crate::objective::modularity(level.network(), level.partition().labels()),
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_ksets_plus_skips_singletons() {
        let mut level = Level::singletons(two_triangles());
        let sweep = LocalMoving::new(Objective::KSetsPlus).iterate(&mut level, &mut rng());
        assert_eq!(sweep.moves, 0);
        assert_eq!(sweep.rounds, 1);
        assert_eq!(level.partition().labels(), &[0, 1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_ksets_plus_keeps_grouped_vertices() {
        // 0 and 1 share a cluster but 1 is heavily tied to the singleton 2
        let n = Network::from_edges(3, vec![(0, 1, 1.0), (1, 2, 5.0)]);
        let mut level = Level::new(n, Partition::from_assignment(&[0, 0, 2]));
        let sweep = LocalMoving::new(Objective::KSetsPlus).iterate(&mut level, &mut rng());
        assert!(!sweep.moved);
        assert_eq!(level.partition().labels(), &[0, 0, 2]);
    }

    #[test]
    fn test_shuffled_order_is_reproducible() {
        let run = || {
            let mut level = Level::singletons(two_triangles());
            let mut rng = ChaCha20Rng::seed_from_u64(42);
            LocalMoving::with_shuffle(Objective::Modularity, true).iterate(&mut level, &mut rng);
            level.partition().labels().to_vec()
        };
        let first = run();
        assert_eq!(first, run());
        assert_eq!(first[0], first[1]);
        assert_eq!(first[1], first[2]);
        assert_eq!(first[3], first[4]);
        assert_eq!(first[4], first[5]);
        assert_ne!(first[0], first[3]);
    }
}
