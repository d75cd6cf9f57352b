//! Single-source weighted shortest paths.
//!
//! Binary-heap Dijkstra over the weighted adjacency; weights must be
//! non-negative (a precondition, not checked). Graphs without stored
//! weights fall back to unit weights, making this a BFS-equivalent
//! distance computation on unweighted graphs.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use crate::error::{Error, Result};
use crate::graph::{Graph, IdMap};

/// Min-heap entry ordered by distance (reversed for `BinaryHeap`).
#[derive(Copy, Clone)]
struct HeapEntry {
    distance: f64,
    node: u64,
}

impl PartialEq for HeapEntry {
    fn eq(&self, other: &Self) -> bool {
        self.distance.total_cmp(&other.distance) == Ordering::Equal
    }
}

impl Eq for HeapEntry {}

impl PartialOrd for HeapEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for HeapEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed: BinaryHeap is a max-heap, we pop smallest distance.
        other.distance.total_cmp(&self.distance)
    }
}

/// Distances from a single source, streamable as original-id pairs.
pub struct ShortestPaths<'g, G: Graph> {
    graph: &'g G,
    distances: Vec<f64>,
}

impl<G: Graph> ShortestPaths<'_, G> {
    /// Distance to `original_node_id`, or `None` if the id is unknown.
    ///
    /// Unreached nodes report `f64::INFINITY`.
    pub fn distance(&self, original_node_id: u64) -> Option<f64> {
        let mapped = self.graph.to_mapped_node_id(original_node_id)?;
        #[allow(clippy::cast_possible_truncation)]
        let slot = mapped as usize;
        Some(self.distances[slot])
    }

    /// Lazily streams `(original_node_id, distance)` pairs, one per node,
    /// ordering unspecified. Each call restarts the stream.
    pub fn stream(&self) -> impl Iterator<Item = (u64, f64)> + '_ {
        self.distances
            .iter()
            .enumerate()
            .map(|(mapped, &distance)| (self.graph.to_original_node_id(mapped as u64), distance))
    }
}

/// Runs Dijkstra from `source` (original id).
///
/// Fails with [`Error::UnknownNodeId`] before any traversal work if the
/// source is not present in the graph's mapping.
pub fn dijkstra<G: Graph>(graph: &G, source: u64) -> Result<ShortestPaths<'_, G>> {
    let start = graph
        .to_mapped_node_id(source)
        .ok_or(Error::UnknownNodeId(source))?;

    #[allow(clippy::cast_possible_truncation)]
    let node_count = graph.node_count() as usize;
    let mut distances = vec![f64::INFINITY; node_count];
    #[allow(clippy::cast_possible_truncation)]
    {
        distances[start as usize] = 0.0;
    }

    let mut heap = BinaryHeap::new();
    heap.push(HeapEntry {
        distance: 0.0,
        node: start,
    });

    while let Some(HeapEntry { distance, node }) = heap.pop() {
        #[allow(clippy::cast_possible_truncation)]
        let slot = node as usize;
        if distance > distances[slot] {
            continue; // stale entry
        }
        graph.for_each_relationship_weighted(node, 1.0, &mut |_, target, weight| {
            #[allow(clippy::cast_possible_truncation)]
            let target_slot = target as usize;
            let candidate = distance + weight;
            if candidate < distances[target_slot] {
                distances[target_slot] = candidate;
                heap.push(HeapEntry {
                    distance: candidate,
                    node: target,
                });
            }
            true
        });
    }

    Ok(ShortestPaths { graph, distances })
}
