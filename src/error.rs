//! Error taxonomy for the analytics core.
//!
//! Configuration mistakes (bad sampling probability, zero concurrency,
//! unknown node ids) are surfaced synchronously, before any worker thread
//! is spawned. Failures observed inside a run (cancellation, a failed
//! worker) are reported once all workers have been joined; partial results
//! are discarded rather than returned as complete.

use thiserror::Error;

/// Errors produced by graph construction and algorithm invocations.
#[derive(Debug, Error)]
pub enum Error {
    /// A caller-supplied node id is not present in the graph's id mapping.
    ///
    /// This is an input-contract violation: traversal never starts against
    /// a partially invalid source set.
    #[error("node id {0} is not present in the graph")]
    UnknownNodeId(u64),

    /// Sampling probability outside `[0.0, 1.0]`.
    #[error("sampling probability must be in [0.0, 1.0], got {0}")]
    InvalidSamplingProbability(f64),

    /// Concurrency of zero requested.
    #[error("concurrency must be a positive integer")]
    InvalidConcurrency,

    /// The worker pool could not be constructed.
    #[error("worker pool construction failed: {0}")]
    Executor(String),

    /// The run was cancelled cooperatively; partial results are discarded.
    #[error("computation cancelled before completion")]
    Cancelled,
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;
