//! CSR (compressed sparse row) graph storage.
//!
//! The primary in-memory layout consumed by the algorithm suite:
//! - `offsets`: `Vec<usize>` of length `n + 1`
//! - `targets`: mapped-space neighbor ids, sorted per source node
//! - `weights`: optional parallel array aligned with `targets`
//!
//! Sorted adjacency is what makes two-pointer intersection
//! ([`crate::graph::CsrIntersect`]) and binary-search edge probes cheap.

use crate::graph::id_map::{DirectIdMap, IdMap};
use crate::graph::Graph;

/// An immutable CSR graph owning its id mapping.
///
/// Relationships are directed as added; undirected graphs are modeled by
/// adding both directions. Parallel edges are collapsed during the build
/// (first weight wins).
pub struct CsrGraph {
    id_map: DirectIdMap,
    offsets: Vec<usize>,
    targets: Vec<u64>,
    weights: Option<Vec<f64>>,
}

impl CsrGraph {
    /// Starts building a graph.
    pub fn builder() -> CsrGraphBuilder {
        CsrGraphBuilder {
            id_map: DirectIdMap::builder(),
            edges: Vec::new(),
            has_weights: false,
        }
    }

    /// The sorted mapped-space neighbors of `node`.
    pub fn neighbors(&self, node: u64) -> &[u64] {
        #[allow(clippy::cast_possible_truncation)]
        let node = node as usize;
        &self.targets[self.offsets[node]..self.offsets[node + 1]]
    }

    /// Whether a relationship `source -> target` exists (mapped ids).
    pub fn has_relationship(&self, source: u64, target: u64) -> bool {
        self.neighbors(source).binary_search(&target).is_ok()
    }

    /// Whether the graph carries relationship weights.
    pub fn has_weights(&self) -> bool {
        self.weights.is_some()
    }
}

impl IdMap for CsrGraph {
    fn node_count(&self) -> u64 {
        self.id_map.node_count()
    }

    fn to_mapped_node_id(&self, original_node_id: u64) -> Option<u64> {
        self.id_map.to_mapped_node_id(original_node_id)
    }

    fn to_original_node_id(&self, mapped_node_id: u64) -> u64 {
        self.id_map.to_original_node_id(mapped_node_id)
    }
}

impl Graph for CsrGraph {
    fn relationship_count(&self) -> u64 {
        self.targets.len() as u64
    }

    fn degree(&self, node: u64) -> u64 {
        self.neighbors(node).len() as u64
    }

    fn for_each_relationship(&self, node: u64, visitor: &mut dyn FnMut(u64, u64) -> bool) {
        for &target in self.neighbors(node) {
            if !visitor(node, target) {
                return;
            }
        }
    }

    fn for_each_relationship_weighted(
        &self,
        node: u64,
        fallback_weight: f64,
        visitor: &mut dyn FnMut(u64, u64, f64) -> bool,
    ) {
        #[allow(clippy::cast_possible_truncation)]
        let start = self.offsets[node as usize];
        for (i, &target) in self.neighbors(node).iter().enumerate() {
            let weight = self
                .weights
                .as_ref()
                .map_or(fallback_weight, |weights| weights[start + i]);
            if !visitor(node, target, weight) {
                return;
            }
        }
    }
}

/// Builder for [`CsrGraph`].
///
/// Nodes referenced by relationships are registered implicitly; explicit
/// [`CsrGraphBuilder::add_node`] calls pin isolated nodes and control the
/// mapped-id assignment order.
pub struct CsrGraphBuilder {
    id_map: super::id_map::DirectIdMapBuilder,
    edges: Vec<(u64, u64, f64)>,
    has_weights: bool,
}

impl CsrGraphBuilder {
    /// Registers a node by original id, returning its mapped id.
    pub fn add_node(&mut self, original_node_id: u64) -> u64 {
        self.id_map.add_node(original_node_id)
    }

    /// Adds a directed, unit-weight relationship between original ids.
    pub fn add_relationship(&mut self, source: u64, target: u64) -> &mut Self {
        self.push_edge(source, target, 1.0);
        self
    }

    /// Adds a directed, weighted relationship between original ids.
    pub fn add_relationship_weighted(&mut self, source: u64, target: u64, weight: f64) -> &mut Self {
        self.has_weights = true;
        self.push_edge(source, target, weight);
        self
    }

    /// Adds both directions of an undirected, unit-weight relationship.
    pub fn add_undirected_relationship(&mut self, a: u64, b: u64) -> &mut Self {
        self.add_relationship(a, b);
        self.add_relationship(b, a)
    }

    fn push_edge(&mut self, source: u64, target: u64, weight: f64) {
        let source = self.id_map.add_node(source);
        let target = self.id_map.add_node(target);
        self.edges.push((source, target, weight));
    }

    /// Finalizes into an immutable CSR graph.
    pub fn build(self) -> CsrGraph {
        #[allow(clippy::cast_possible_truncation)]
        let node_count = self.id_map.node_count() as usize;
        let id_map = self.id_map.build();

        let mut degrees = vec![0usize; node_count];
        for &(source, _, _) in &self.edges {
            #[allow(clippy::cast_possible_truncation)]
            {
                degrees[source as usize] += 1;
            }
        }

        let mut offsets = Vec::with_capacity(node_count + 1);
        offsets.push(0);
        let mut total = 0usize;
        for &degree in &degrees {
            total += degree;
            offsets.push(total);
        }

        // Scatter, then sort each adjacency list by target id.
        let mut cursor = offsets.clone();
        let mut adjacency: Vec<(u64, f64)> = vec![(0, 0.0); total];
        for &(source, target, weight) in &self.edges {
            #[allow(clippy::cast_possible_truncation)]
            let source = source as usize;
            adjacency[cursor[source]] = (target, weight);
            cursor[source] += 1;
        }
        for node in 0..node_count {
            // Stable sort: ties keep insertion order, so the first added
            // weight survives deduplication below.
            adjacency[offsets[node]..offsets[node + 1]].sort_by_key(|&(target, _)| target);
        }

        // Collapse parallel edges; the first weight per (source, target)
        // pair survives.
        let mut targets = Vec::with_capacity(total);
        let mut weights = self.has_weights.then(|| Vec::with_capacity(total));
        let mut deduped_offsets = Vec::with_capacity(node_count + 1);
        deduped_offsets.push(0);
        for node in 0..node_count {
            let mut previous = None;
            for &(target, weight) in &adjacency[offsets[node]..offsets[node + 1]] {
                if previous == Some(target) {
                    continue;
                }
                previous = Some(target);
                targets.push(target);
                if let Some(weights) = weights.as_mut() {
                    weights.push(weight);
                }
            }
            deduped_offsets.push(targets.len());
        }

        CsrGraph {
            id_map,
            offsets: deduped_offsets,
            targets,
            weights,
        }
    }
}
