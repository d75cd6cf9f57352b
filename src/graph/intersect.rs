//! Triangle enumeration by adjacency-list intersection.
//!
//! [`RelationshipIntersect::intersect_all`] enumerates, for a node `a`,
//! every pair `(b, c)` such that `a-b`, `a-c`, and `b-c` are all
//! relationships, invoking the consumer once per closed triangle found
//! from `a`'s perspective with `b < c` in the enumerating instance's id
//! space. Enumeration order is otherwise unspecified; callers may rely on
//! completeness and the no-duplicate-per-direction guarantee only.
//!
//! An instance is not safe for concurrent `intersect_all` calls; obtain
//! one instance per thread via [`GraphIntersect::of`] /
//! [`GraphIntersect::of_filtered`].

use crate::graph::csr::CsrGraph;
use crate::graph::filtered::FilteredGraph;
use crate::graph::id_map::NodeFilter;

/// Callback-based triangle enumeration for a single node.
pub trait RelationshipIntersect {
    /// Enumerates closed triangles anchored at `node_a`, invoking
    /// `consumer(a, b, c)` once per triangle. Re-invoking restarts from
    /// scratch; the enumeration is finite and not restartable mid-way.
    fn intersect_all(&mut self, node_a: u64, consumer: &mut dyn FnMut(u64, u64, u64));
}

/// Two-pointer intersection over sorted CSR adjacency lists.
pub struct CsrIntersect<'g> {
    graph: &'g CsrGraph,
}

impl<'g> CsrIntersect<'g> {
    /// Creates an intersect over `graph`.
    pub fn new(graph: &'g CsrGraph) -> Self {
        Self { graph }
    }
}

impl RelationshipIntersect for CsrIntersect<'_> {
    fn intersect_all(&mut self, node_a: u64, consumer: &mut dyn FnMut(u64, u64, u64)) {
        let neighbors = self.graph.neighbors(node_a);
        for (i, &b) in neighbors.iter().enumerate() {
            if b == node_a {
                continue;
            }
            // neighbors is sorted, so everything after position i is > b;
            // intersecting that tail with N(b) yields each pair once.
            let tail = &neighbors[i + 1..];
            let b_neighbors = self.graph.neighbors(b);
            let mut t = 0;
            let mut n = 0;
            while t < tail.len() && n < b_neighbors.len() {
                match tail[t].cmp(&b_neighbors[n]) {
                    std::cmp::Ordering::Less => t += 1,
                    std::cmp::Ordering::Greater => n += 1,
                    std::cmp::Ordering::Equal => {
                        let c = tail[t];
                        if c != node_a {
                            consumer(node_a, b, c);
                        }
                        t += 1;
                        n += 1;
                    }
                }
            }
        }
    }
}

/// Filtering decorator over an inner intersect.
///
/// Translates the filtered-space node id into the inner space before
/// delegating; inside the inner callback, drops any triangle whose three
/// corners are not all filter members, and translates survivors back into
/// filtered-space ids. The inner implementation needs no awareness of
/// filtering.
pub struct FilteredIntersect<'g, I> {
    filter: &'g NodeFilter,
    inner: I,
}

impl<'g, I: RelationshipIntersect> FilteredIntersect<'g, I> {
    /// Wraps `inner` with the membership rules of `filter`.
    pub fn new(filter: &'g NodeFilter, inner: I) -> Self {
        Self { filter, inner }
    }
}

impl<I: RelationshipIntersect> RelationshipIntersect for FilteredIntersect<'_, I> {
    fn intersect_all(&mut self, node_a: u64, consumer: &mut dyn FnMut(u64, u64, u64)) {
        let filter = self.filter;
        self.inner
            .intersect_all(filter.to_inner(node_a), &mut |a, b, c| {
                if let (Some(a), Some(b), Some(c)) = (
                    filter.to_filtered(a),
                    filter.to_filtered(b),
                    filter.to_filtered(c),
                ) {
                    consumer(a, b, c);
                }
            });
    }
}

/// Closed dispatch over the graph storage kinds and their intersect
/// strategies, resolved once when the view is built rather than looked up
/// per call.
pub enum GraphIntersect<'g> {
    /// Intersection over plain CSR storage.
    Csr(CsrIntersect<'g>),
    /// Intersection over a filtered CSR view.
    Filtered(FilteredIntersect<'g, CsrIntersect<'g>>),
}

impl<'g> GraphIntersect<'g> {
    /// Intersect strategy for a plain CSR graph.
    pub fn of(graph: &'g CsrGraph) -> Self {
        Self::Csr(CsrIntersect::new(graph))
    }

    /// Intersect strategy for a filtered CSR view.
    pub fn of_filtered(graph: &'g FilteredGraph<'g, CsrGraph>) -> Self {
        Self::Filtered(FilteredIntersect::new(
            graph.filter(),
            CsrIntersect::new(graph.inner()),
        ))
    }
}

impl RelationshipIntersect for GraphIntersect<'_> {
    fn intersect_all(&mut self, node_a: u64, consumer: &mut dyn FnMut(u64, u64, u64)) {
        match self {
            Self::Csr(intersect) => intersect.intersect_all(node_a, consumer),
            Self::Filtered(intersect) => intersect.intersect_all(node_a, consumer),
        }
    }
}
