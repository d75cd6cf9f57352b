//! Memory-compact collections backing per-node state at huge scale.
//!
//! Organized by structure:
//! - `sparse`: paged, page-lazy arrays keyed by `u64` indices
//! - `atomic_double`: shared `f64` accumulator for parallel reductions

pub mod atomic_double;
pub mod sparse;

// Re-export commonly used types from submodules
pub use atomic_double::AtomicDoubleArray;
pub use sparse::{HugeSparseArray, HugeSparseArrayBuilder, SparseValue, MAX_INDEX, PAGE_SIZE};
