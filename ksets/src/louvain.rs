use crate::coarsen::coarsen;
use crate::error::Result;
use crate::{Communities, Config, Level, LocalMoving, Network, VisitOrder};
use log::{debug, info};
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use std::time::Instant;

/// Multilevel local moving: alternate greedy vertex moves and cluster contraction until a level
/// makes no move.
pub struct Louvain {
    config: Config,
    rng: ChaCha20Rng,
    local_moving: LocalMoving,
}

impl Louvain {
    /// Initialize a run with the given settings.
    pub fn new(config: Config) -> Louvain {
        let (seed, shuffle) = match config.visit_order {
            VisitOrder::Sequential => (0, false),
            VisitOrder::Shuffled { seed } => (seed, true),
        };

        Louvain {
            rng: ChaCha20Rng::seed_from_u64(seed),
            local_moving: LocalMoving::with_shuffle(config.objective, shuffle),
            config,
        }
    }

    /// Cluster `network`, returning a label per original vertex plus per-level diagnostics.
    pub fn run(&mut self, network: Network) -> Result<Communities> {
        let vcount = network.nodes();
        let partition = self.config.initial.build(vcount)?;

        if vcount == 0 || network.total_weight() <= 0.0 {
            info!("graph with {} vertices has no edge weight, every vertex is its own community", vcount);
            return Ok(Communities::singletons(vcount));
        }

        info!(
            "clustering {} vertices, {} edges, total weight {} ({})",
            vcount,
            network.edges(),
            network.total_weight(),
            self.config.objective
        );
        let now = Instant::now();

        let mut level = Level::new(network, partition);
        let mut lineage: Vec<usize> = (0..vcount).collect();
        let mut result = Communities::default();

        loop {
            let sweep = self.local_moving.iterate(&mut level, &mut self.rng);
            result.level_rounds.push(sweep.rounds);
            info!(
                "level {}: {} vertices, {} moves in {} rounds, {} clusters, modularity {:.6}",
                result.level_rounds.len(),
                level.nodes(),
                sweep.moves,
                sweep.rounds,
                level.active().len(),
                level.modularity()
            );

            if !sweep.moved {
                break;
            }

            level = coarsen(&level, &mut lineage);
            result.level_sizes.push(level.nodes());
            debug!("contracted to {} supernodes, {} cross edges", level.nodes(), level.network().edges());
        }

        result.labels = lineage.iter().map(|&rep| level.partition().which_cluster(rep)).collect();
        result.modularity = level.modularity();
        info!(
            "found {} communities in {} levels, modularity {:.6}, {:.2?}",
            level.active().len(),
            result.level_rounds.len(),
            result.modularity,
            now.elapsed()
        );

        Ok(result)
    }
}
