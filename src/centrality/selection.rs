//! Source-node selection strategies for the centrality engine.
//!
//! A strategy produces the set of source nodes to run full traversals
//! from, plus the inverse-probability scale that keeps sampled runs
//! unbiased (the defining correctness property of RA-Brandes: omitting
//! the scale silently biases every score toward the sample fraction).

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::error::{Error, Result};
use crate::graph::{Graph, IdMap};

/// Draw cap for [`SelectionStrategy::RandomLimited`], as a multiple of
/// the target sample count.
const MAX_DRAW_MULTIPLIER: u64 = 10;

/// Closed set of source selection strategies.
#[derive(Debug, Clone)]
pub enum SelectionStrategy {
    /// Every node is a source (exact Brandes).
    All,
    /// Each node is independently selected with the given probability.
    ///
    /// Probability `0.0` is a defined degenerate case: no traversal runs
    /// and every centrality score is exactly zero.
    RandomFraction {
        /// Per-node selection probability in `[0.0, 1.0]`.
        probability: f64,
    },
    /// Samples random nodes until `ceil(probability * node_count)`
    /// distinct sources are collected, bounded by a fixed draw cap.
    RandomLimited {
        /// Fraction of the node count to target, in `[0.0, 1.0]`.
        probability: f64,
    },
    /// Explicit source list in original ids; every id is validated before
    /// any traversal starts.
    Custom(Vec<u64>),
}

/// A resolved source set in mapped-id space.
pub(crate) struct SelectedSources {
    pub(crate) sources: Vec<u64>,
    pub(crate) scale: f64,
}

impl SelectionStrategy {
    pub(crate) fn validate(&self) -> Result<()> {
        match *self {
            Self::RandomFraction { probability } | Self::RandomLimited { probability }
                if !(0.0..=1.0).contains(&probability) =>
            {
                Err(Error::InvalidSamplingProbability(probability))
            }
            _ => Ok(()),
        }
    }

    pub(crate) fn select<G: Graph>(&self, graph: &G, seed: Option<u64>) -> Result<SelectedSources> {
        let node_count = graph.node_count();
        let mut rng = seed.map_or_else(StdRng::from_entropy, StdRng::seed_from_u64);
        match self {
            Self::All => Ok(SelectedSources {
                sources: (0..node_count).collect(),
                scale: 1.0,
            }),
            &Self::RandomFraction { probability } => {
                let sources: Vec<u64> = (0..node_count)
                    .filter(|_| rng.gen::<f64>() < probability)
                    .collect();
                // Independent Bernoulli draws: the unbiased estimator
                // scales each contribution by 1/p.
                let scale = if sources.is_empty() { 1.0 } else { probability.recip() };
                Ok(SelectedSources { sources, scale })
            }
            &Self::RandomLimited { probability } => {
                #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_precision_loss)]
                let target = (probability * node_count as f64).ceil() as u64;
                let mut selected = vec![false; usize::try_from(node_count).unwrap_or(usize::MAX)];
                let mut sources = Vec::with_capacity(usize::try_from(target).unwrap_or(0));
                let mut draws = 0u64;
                while (sources.len() as u64) < target && draws < target.saturating_mul(MAX_DRAW_MULTIPLIER)
                {
                    draws += 1;
                    let candidate = rng.gen_range(0..node_count);
                    #[allow(clippy::cast_possible_truncation)]
                    let slot = candidate as usize;
                    if !selected[slot] {
                        selected[slot] = true;
                        sources.push(candidate);
                    }
                }
                // Scale by the realized fraction, not the requested one,
                // so a capped draw loop stays unbiased.
                #[allow(clippy::cast_precision_loss)]
                let scale = if sources.is_empty() {
                    1.0
                } else {
                    node_count as f64 / sources.len() as f64
                };
                Ok(SelectedSources { sources, scale })
            }
            Self::Custom(original_ids) => {
                let mut sources = Vec::with_capacity(original_ids.len());
                for &original in original_ids {
                    let mapped = graph
                        .to_mapped_node_id(original)
                        .ok_or(Error::UnknownNodeId(original))?;
                    sources.push(mapped);
                }
                Ok(SelectedSources {
                    sources,
                    scale: 1.0,
                })
            }
        }
    }
}
