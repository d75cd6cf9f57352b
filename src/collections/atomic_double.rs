//! Fixed-size `f64` accumulator safe for concurrent additive merges.
//!
//! This is the only cross-thread shared mutable structure in a centrality
//! run: worker threads fold their per-source dependency contributions into
//! it, and contributions are additive and independent per source, so the
//! final value is invariant under merge order (within floating-point
//! tolerance; summation order across threads is not fixed).

use std::sync::atomic::{AtomicU64, Ordering};

/// A dense array of `f64` cells supporting atomic `add`.
pub struct AtomicDoubleArray {
    cells: Vec<AtomicU64>,
}

impl AtomicDoubleArray {
    /// Creates an array of `len` cells, all zero.
    pub fn new(len: usize) -> Self {
        let cells = (0..len).map(|_| AtomicU64::new(0f64.to_bits())).collect();
        Self { cells }
    }

    /// Number of cells.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Returns `true` if the array has no cells.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Atomically adds `delta` to the cell at `index`.
    pub fn add(&self, index: usize, delta: f64) {
        let cell = &self.cells[index];
        let mut current = cell.load(Ordering::Acquire);
        loop {
            let next = (f64::from_bits(current) + delta).to_bits();
            match cell.compare_exchange_weak(
                current,
                next,
                Ordering::AcqRel,
                Ordering::Acquire,
            ) {
                Ok(_) => return,
                Err(observed) => current = observed,
            }
        }
    }

    /// Reads the cell at `index`.
    pub fn get(&self, index: usize) -> f64 {
        f64::from_bits(self.cells[index].load(Ordering::Acquire))
    }

    /// Unwraps into a plain vector once all writers have been joined.
    pub fn into_vec(self) -> Vec<f64> {
        self.cells
            .into_iter()
            .map(|cell| f64::from_bits(cell.into_inner()))
            .collect()
    }
}
