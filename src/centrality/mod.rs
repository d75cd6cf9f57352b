//! Betweenness centrality: exact Brandes and sampling RA-Brandes.
//!
//! The engine composes three pieces:
//! - a [`SelectionStrategy`] producing the source set (exact = all nodes,
//!   or seeded random sampling with inverse-probability scaling),
//! - the per-source Brandes unit (forward BFS + backward dependency
//!   accumulation) running on thread-private scratch,
//! - an explicit, run-scoped worker pool that partitions sources into
//!   batches and merges contributions into a shared atomic accumulator.
//!
//! Determinism: a fixed seed fixes the source set, but floating-point
//! summation order across threads is not fixed; results are equal across
//! thread counts only within floating-point tolerance.

mod brandes;
mod selection;

pub use selection::SelectionStrategy;

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, PoisonError};

use crossbeam_utils::CachePadded;
use serde::{Deserialize, Serialize};

use crate::collections::AtomicDoubleArray;
use crate::concurrency::CancellationToken;
use crate::error::{Error, Result};
use crate::graph::{Graph, IdMap};

/// Number of source nodes a worker claims per cursor fetch.
const SOURCE_BATCH_SIZE: usize = 64;

/// Recognized configuration surface of the centrality engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BetweennessConfig {
    /// Fraction of nodes to sample as sources, in `[0.0, 1.0]`.
    ///
    /// `1.0` runs exact Brandes; `0.0` is the defined degenerate case
    /// where every score is exactly zero.
    pub sampling_probability: f64,
    /// Worker thread count; must be positive.
    pub concurrency: usize,
    /// Seed for reproducible sampling. `None` seeds from entropy.
    pub random_seed: Option<u64>,
}

impl Default for BetweennessConfig {
    fn default() -> Self {
        Self {
            sampling_probability: 1.0,
            concurrency: std::thread::available_parallelism().map_or(1, std::num::NonZeroUsize::get),
            random_seed: None,
        }
    }
}

impl BetweennessConfig {
    fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.sampling_probability) {
            return Err(Error::InvalidSamplingProbability(self.sampling_probability));
        }
        if self.concurrency == 0 {
            return Err(Error::InvalidConcurrency);
        }
        Ok(())
    }
}

/// One entry of the per-node result stream.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CentralityRecord {
    /// Original node id.
    pub node_id: u64,
    /// Betweenness score (estimate under sampling).
    pub score: f64,
}

/// Dense per-node scores, streamable in original-id space.
pub struct CentralityResult<'g, G: Graph> {
    graph: &'g G,
    scores: Vec<f64>,
}

impl<G: Graph> CentralityResult<'_, G> {
    /// Score of a mapped node id.
    pub fn score(&self, mapped_node_id: u64) -> f64 {
        #[allow(clippy::cast_possible_truncation)]
        let slot = mapped_node_id as usize;
        self.scores[slot]
    }

    /// Lazily streams one [`CentralityRecord`] per node, ordering
    /// unspecified. Each call restarts the stream from scratch.
    pub fn stream(&self) -> impl Iterator<Item = CentralityRecord> + '_ {
        self.scores.iter().enumerate().map(|(mapped, &score)| {
            CentralityRecord {
                node_id: self.graph.to_original_node_id(mapped as u64),
                score,
            }
        })
    }
}

/// The betweenness centrality engine.
pub struct BetweennessCentrality<'g, G: Graph + Sync> {
    graph: &'g G,
    config: BetweennessConfig,
    strategy: SelectionStrategy,
}

impl<'g, G: Graph + Sync> BetweennessCentrality<'g, G> {
    /// Creates an engine whose strategy is derived from the config:
    /// exact for `sampling_probability == 1.0`, random-fraction sampling
    /// otherwise.
    pub fn new(graph: &'g G, config: BetweennessConfig) -> Result<Self> {
        config.validate()?;
        let strategy = if (config.sampling_probability - 1.0).abs() < f64::EPSILON {
            SelectionStrategy::All
        } else {
            SelectionStrategy::RandomFraction {
                probability: config.sampling_probability,
            }
        };
        Self::with_strategy(graph, config, strategy)
    }

    /// Creates an engine with an explicit selection strategy.
    ///
    /// Custom source lists are validated when [`Self::compute`] resolves
    /// the source set — before any worker thread is spawned — and an
    /// unknown id fails the whole run.
    pub fn with_strategy(
        graph: &'g G,
        config: BetweennessConfig,
        strategy: SelectionStrategy,
    ) -> Result<Self> {
        config.validate()?;
        strategy.validate()?;
        Ok(Self {
            graph,
            config,
            strategy,
        })
    }

    /// Runs the computation, checking `cancellation` between source
    /// nodes.
    ///
    /// A cancelled run discards its partial accumulator and returns
    /// [`Error::Cancelled`]; a partial result is never advertised as
    /// complete.
    pub fn compute(&self, cancellation: &CancellationToken) -> Result<CentralityResult<'g, G>> {
        #[allow(clippy::cast_possible_truncation)]
        let node_count = self.graph.node_count() as usize;
        let selected = self
            .strategy
            .select(self.graph, self.config.random_seed)?;

        #[cfg(feature = "tracing")]
        tracing::debug!(
            sources = selected.sources.len(),
            node_count,
            concurrency = self.config.concurrency,
            "betweenness run starting"
        );

        let result = AtomicDoubleArray::new(node_count);
        if !selected.sources.is_empty() {
            self.run_workers(&selected.sources, selected.scale, &result, cancellation)?;
        }

        Ok(CentralityResult {
            graph: self.graph,
            scores: result.into_vec(),
        })
    }

    /// Partitions `sources` into batches claimed from a shared cursor and
    /// joins all workers before reporting the first failure, if any.
    fn run_workers(
        &self,
        sources: &[u64],
        scale: f64,
        result: &AtomicDoubleArray,
        cancellation: &CancellationToken,
    ) -> Result<()> {
        #[allow(clippy::cast_possible_truncation)]
        let node_count = self.graph.node_count() as usize;
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.config.concurrency)
            .build()
            .map_err(|e| Error::Executor(e.to_string()))?;

        let cursor = CachePadded::new(AtomicUsize::new(0));
        let failure: Mutex<Option<Error>> = Mutex::new(None);

        pool.scope(|scope| {
            for _ in 0..self.config.concurrency {
                scope.spawn(|_| {
                    let mut scratch = brandes::Scratch::new(node_count);
                    loop {
                        let start = cursor.fetch_add(SOURCE_BATCH_SIZE, Ordering::Relaxed);
                        if start >= sources.len() || poisoned(&failure) {
                            return;
                        }
                        let end = (start + SOURCE_BATCH_SIZE).min(sources.len());
                        for &source in &sources[start..end] {
                            if cancellation.is_cancelled() {
                                record_failure(&failure, Error::Cancelled);
                                return;
                            }
                            #[allow(clippy::cast_possible_truncation)]
                            brandes::accumulate_source(
                                self.graph,
                                source as usize,
                                &mut scratch,
                                result,
                                scale,
                            );
                        }
                    }
                });
            }
        });

        match failure
            .into_inner()
            .unwrap_or_else(PoisonError::into_inner)
        {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }
}

fn record_failure(failure: &Mutex<Option<Error>>, error: Error) {
    let mut slot = failure.lock().unwrap_or_else(PoisonError::into_inner);
    if slot.is_none() {
        *slot = Some(error);
    }
}

fn poisoned(failure: &Mutex<Option<Error>>) -> bool {
    failure
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .is_some()
}
