//! Zero-copy filtered graph views.
//!
//! A [`FilteredGraph`] restricts an inner graph to the nodes selected by a
//! [`NodeFilter`], renumbered into the filter's dense `0..M-1` space.
//! Adjacency is translated and membership-checked on the fly; nothing is
//! materialized. The wrapper borrows the inner graph — its lifetime is
//! managed by whoever built the base graph.

use crate::graph::id_map::{IdMap, NodeFilter};
use crate::graph::Graph;

/// A filtered, renumbered view over an inner graph.
pub struct FilteredGraph<'g, G: Graph> {
    inner: &'g G,
    filter: NodeFilter,
    relationship_count: u64,
}

impl<'g, G: Graph> FilteredGraph<'g, G> {
    /// Wraps `inner`, restricting it to the members of `filter`.
    ///
    /// Counts surviving relationships in one pass so that
    /// [`Graph::relationship_count`] is O(1) afterwards.
    pub fn new(inner: &'g G, filter: NodeFilter) -> Self {
        let mut relationship_count = 0u64;
        for filtered in 0..filter.node_count() {
            let source = filter.to_inner(filtered);
            inner.for_each_relationship(source, &mut |_, target| {
                if filter.contains_inner(target) {
                    relationship_count += 1;
                }
                true
            });
        }
        Self {
            inner,
            filter,
            relationship_count,
        }
    }

    /// Builds the view directly from a predicate over original ids.
    pub fn from_predicate(inner: &'g G, predicate: impl FnMut(u64) -> bool) -> Self {
        let filter = NodeFilter::new(inner, predicate);
        Self::new(inner, filter)
    }

    /// The wrapped graph.
    pub fn inner(&self) -> &'g G {
        self.inner
    }

    /// The node filter defining this view.
    pub fn filter(&self) -> &NodeFilter {
        &self.filter
    }
}

impl<G: Graph> IdMap for FilteredGraph<'_, G> {
    fn node_count(&self) -> u64 {
        self.filter.node_count()
    }

    fn to_mapped_node_id(&self, original_node_id: u64) -> Option<u64> {
        self.inner
            .to_mapped_node_id(original_node_id)
            .and_then(|inner| self.filter.to_filtered(inner))
    }

    fn to_original_node_id(&self, mapped_node_id: u64) -> u64 {
        self.inner
            .to_original_node_id(self.filter.to_inner(mapped_node_id))
    }
}

impl<G: Graph> Graph for FilteredGraph<'_, G> {
    fn relationship_count(&self) -> u64 {
        self.relationship_count
    }

    fn degree(&self, node: u64) -> u64 {
        let mut degree = 0u64;
        self.inner
            .for_each_relationship(self.filter.to_inner(node), &mut |_, target| {
                if self.filter.contains_inner(target) {
                    degree += 1;
                }
                true
            });
        degree
    }

    fn for_each_relationship(&self, node: u64, visitor: &mut dyn FnMut(u64, u64) -> bool) {
        self.inner
            .for_each_relationship(self.filter.to_inner(node), &mut |_, target| {
                match self.filter.to_filtered(target) {
                    Some(filtered_target) => visitor(node, filtered_target),
                    None => true,
                }
            });
    }

    fn for_each_relationship_weighted(
        &self,
        node: u64,
        fallback_weight: f64,
        visitor: &mut dyn FnMut(u64, u64, f64) -> bool,
    ) {
        self.inner.for_each_relationship_weighted(
            self.filter.to_inner(node),
            fallback_weight,
            &mut |_, target, weight| match self.filter.to_filtered(target) {
                Some(filtered_target) => visitor(node, filtered_target, weight),
                None => true,
            },
        );
    }
}
