//! Derived inverse (incoming) relationship indices.
//!
//! Builds the transpose adjacency of a CSR graph in parallel and hands it
//! back as a mutation descriptor. Merging the descriptor into the graph's
//! relationship store is the collaborator's job; the core never mutates a
//! graph it traverses.

use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};

use rayon::prelude::*;

use crate::error::{Error, Result};
use crate::graph::csr::CsrGraph;
use crate::graph::{Graph, IdMap};

/// Descriptor for a derived inverse relationship index.
///
/// `offsets`/`targets` form a CSR transpose in the source graph's mapped
/// id space, targets sorted per node.
pub struct InverseIndexDescriptor {
    /// Identifier of the relationship type the index inverts.
    pub relationship_type: String,
    /// CSR offsets of the inverse adjacency, length `node_count + 1`.
    pub offsets: Vec<usize>,
    /// Incoming-neighbor ids, sorted within each node's segment.
    pub targets: Vec<u64>,
}

/// Builds the inverse index of `graph` using `concurrency` workers.
pub fn build_inverse_index(
    graph: &CsrGraph,
    relationship_type: &str,
    concurrency: usize,
) -> Result<InverseIndexDescriptor> {
    if concurrency == 0 {
        return Err(Error::InvalidConcurrency);
    }
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(concurrency)
        .build()
        .map_err(|e| Error::Executor(e.to_string()))?;

    #[allow(clippy::cast_possible_truncation)]
    let node_count = graph.node_count() as usize;
    #[allow(clippy::cast_possible_truncation)]
    let relationship_count = graph.relationship_count() as usize;

    let in_degrees: Vec<AtomicUsize> = (0..node_count).map(|_| AtomicUsize::new(0)).collect();
    pool.install(|| {
        (0..node_count as u64).into_par_iter().for_each(|source| {
            for &target in graph.neighbors(source) {
                #[allow(clippy::cast_possible_truncation)]
                in_degrees[target as usize].fetch_add(1, Ordering::Relaxed);
            }
        });
    });

    let mut offsets = Vec::with_capacity(node_count + 1);
    offsets.push(0usize);
    let mut total = 0usize;
    for in_degree in &in_degrees {
        total += in_degree.load(Ordering::Relaxed);
        offsets.push(total);
    }
    debug_assert_eq!(total, relationship_count);

    // Scatter incoming neighbors behind per-node atomic cursors.
    let cursors: Vec<AtomicUsize> = offsets[..node_count]
        .iter()
        .map(|&offset| AtomicUsize::new(offset))
        .collect();
    let slots: Vec<AtomicU64> = (0..relationship_count)
        .map(|_| AtomicU64::new(0))
        .collect();
    pool.install(|| {
        (0..node_count as u64).into_par_iter().for_each(|source| {
            for &target in graph.neighbors(source) {
                #[allow(clippy::cast_possible_truncation)]
                let slot = cursors[target as usize].fetch_add(1, Ordering::Relaxed);
                slots[slot].store(source, Ordering::Relaxed);
            }
        });
    });

    let mut targets: Vec<u64> = slots
        .into_iter()
        .map(AtomicU64::into_inner)
        .collect();
    pool.install(|| {
        let mut segments: Vec<&mut [u64]> = Vec::with_capacity(node_count);
        let mut rest = targets.as_mut_slice();
        for node in 0..node_count {
            let len = offsets[node + 1] - offsets[node];
            let (segment, tail) = rest.split_at_mut(len);
            segments.push(segment);
            rest = tail;
        }
        segments
            .par_iter_mut()
            .for_each(|segment| segment.sort_unstable());
    });

    #[cfg(feature = "tracing")]
    tracing::debug!(
        relationship_type,
        node_count,
        relationship_count,
        "inverse index built"
    );

    Ok(InverseIndexDescriptor {
        relationship_type: relationship_type.to_owned(),
        offsets,
        targets,
    })
}
