//! In-memory graph storage: id mapping, CSR layout, filtered views,
//! triangle intersection, and derived inverse indices.
//!
//! Organized by concern:
//! - `id_map`: original ↔ mapped node-id virtualization and filters
//! - `csr`: compressed sparse row storage with optional weights
//! - `filtered`: zero-copy filtered/renumbered graph views
//! - `intersect`: triangle enumeration strategies
//! - `inverse`: parallel inverse-index construction
//!
//! The [`Graph`] trait is the read-only capability every algorithm in the
//! crate consumes. Graphs and id maps are built once per analysis run and
//! are immutable for its duration; mutating a graph while any reader
//! thread is active is a documented precondition violation the core does
//! not detect.

pub mod csr;
pub mod filtered;
pub mod id_map;
pub mod intersect;
pub mod inverse;

// Re-export commonly used types from submodules
pub use csr::{CsrGraph, CsrGraphBuilder};
pub use filtered::FilteredGraph;
pub use id_map::{DirectIdMap, DirectIdMapBuilder, IdMap, NodeFilter};
pub use intersect::{CsrIntersect, FilteredIntersect, GraphIntersect, RelationshipIntersect};
pub use inverse::{build_inverse_index, InverseIndexDescriptor};

/// The read-only graph capability consumed by all algorithms.
///
/// Node ids passed to and produced by these methods are always in the
/// graph's dense mapped space; translation to original ids goes through
/// the [`IdMap`] supertrait.
pub trait Graph: IdMap {
    /// Total number of relationships visible through this graph.
    fn relationship_count(&self) -> u64;

    /// Out-degree of `node` (mapped id).
    fn degree(&self, node: u64) -> u64;

    /// Visits each outgoing relationship of `node` as
    /// `visitor(source, target)`; the visitor returns `false` to stop
    /// early.
    fn for_each_relationship(&self, node: u64, visitor: &mut dyn FnMut(u64, u64) -> bool);

    /// Weighted variant of [`Graph::for_each_relationship`]; graphs
    /// without stored weights report `fallback_weight` on every
    /// relationship.
    fn for_each_relationship_weighted(
        &self,
        node: u64,
        fallback_weight: f64,
        visitor: &mut dyn FnMut(u64, u64, f64) -> bool,
    );
}
