//! The per-source Brandes unit: forward BFS plus backward dependency
//! accumulation.
//!
//! Each unit runs to completion on one thread using only thread-private
//! scratch arrays; the shared betweenness accumulator is the single
//! cross-thread structure, written once per (source, node) pair during
//! the backward pass.

use std::collections::VecDeque;

use crate::collections::AtomicDoubleArray;
use crate::graph::Graph;

/// Thread-private traversal state, reused across source nodes.
pub(crate) struct Scratch {
    distance: Vec<i64>,
    sigma: Vec<f64>,
    delta: Vec<f64>,
    predecessors: Vec<Vec<usize>>,
    stack: Vec<usize>,
    queue: VecDeque<usize>,
}

impl Scratch {
    pub(crate) fn new(node_count: usize) -> Self {
        Self {
            distance: vec![-1; node_count],
            sigma: vec![0.0; node_count],
            delta: vec![0.0; node_count],
            predecessors: vec![Vec::new(); node_count],
            stack: Vec::new(),
            queue: VecDeque::new(),
        }
    }

    fn reset(&mut self) {
        self.distance.fill(-1);
        self.sigma.fill(0.0);
        self.delta.fill(0.0);
        for predecessors in &mut self.predecessors {
            predecessors.clear();
        }
        self.stack.clear();
        self.queue.clear();
    }
}

/// Runs one Brandes unit from `source` (mapped id), folding dependency
/// contributions into `result` scaled by `scale` (1/p under sampling).
pub(crate) fn accumulate_source<G: Graph>(
    graph: &G,
    source: usize,
    scratch: &mut Scratch,
    result: &AtomicDoubleArray,
    scale: f64,
) {
    scratch.reset();
    scratch.distance[source] = 0;
    scratch.sigma[source] = 1.0;
    scratch.queue.push_back(source);

    // Forward pass: unweighted BFS counting shortest paths.
    while let Some(node) = scratch.queue.pop_front() {
        scratch.stack.push(node);
        let node_distance = scratch.distance[node];
        let node_sigma = scratch.sigma[node];
        let distance = &mut scratch.distance;
        let sigma = &mut scratch.sigma;
        let predecessors = &mut scratch.predecessors;
        let queue = &mut scratch.queue;
        graph.for_each_relationship(node as u64, &mut |_, target| {
            #[allow(clippy::cast_possible_truncation)]
            let target = target as usize;
            if distance[target] < 0 {
                distance[target] = node_distance + 1;
                queue.push_back(target);
            }
            if distance[target] == node_distance + 1 {
                sigma[target] += node_sigma;
                predecessors[target].push(node);
            }
            true
        });
    }

    // Backward pass: the stack guarantees every successor is processed
    // before its predecessors.
    while let Some(node) = scratch.stack.pop() {
        let node_delta = scratch.delta[node];
        let factor = (1.0 + node_delta) / scratch.sigma[node];
        for &predecessor in &scratch.predecessors[node] {
            scratch.delta[predecessor] += scratch.sigma[predecessor] * factor;
        }
        if node != source && node_delta != 0.0 {
            result.add(node, node_delta * scale);
        }
    }
}
