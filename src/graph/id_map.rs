//! Node-identifier virtualization.
//!
//! Algorithms run over a dense `0..N-1` "mapped" id space; data sources
//! produce arbitrary "original" ids. [`IdMap`] is the bidirectional
//! translation between the two, and [`NodeFilter`] renumbers a subset of
//! an existing mapped space into its own dense `0..M-1` space so that
//! filtered views compose with graphs and intersections without copying
//! adjacency data.

use std::collections::HashMap;

use crate::collections::sparse::{HugeSparseArray, HugeSparseArrayBuilder};

/// Bidirectional mapping between original and mapped node ids.
///
/// The mapping is a bijection on its domain:
/// `to_original_node_id(to_mapped_node_id(x)) == x` for every registered
/// original id `x`. Unknown originals yield `None`; algorithm entry points
/// treat that as a fatal input-contract violation
/// ([`crate::Error::UnknownNodeId`]), not a recoverable condition.
pub trait IdMap {
    /// Number of nodes in the mapped `0..N-1` space.
    fn node_count(&self) -> u64;

    /// Translates an original id into the dense mapped space.
    fn to_mapped_node_id(&self, original_node_id: u64) -> Option<u64>;

    /// Translates a mapped id back to its original id.
    ///
    /// # Panics
    ///
    /// Panics if `mapped_node_id >= node_count()`; mapped ids are produced
    /// by this map and are always in range for well-behaved callers.
    fn to_original_node_id(&self, mapped_node_id: u64) -> u64;

    /// Membership test over original ids.
    fn contains(&self, original_node_id: u64) -> bool {
        self.to_mapped_node_id(original_node_id).is_some()
    }
}

const UNMAPPED: i64 = -1;

/// The base id mapping, built once per analysis run and immutable after.
///
/// `mapped -> original` is a dense vector; `original -> mapped` is a
/// paged sparse array (default [`UNMAPPED`]) so that sparse original id
/// spaces do not pay for unused index ranges.
pub struct DirectIdMap {
    mapped_to_original: Vec<u64>,
    original_to_mapped: HugeSparseArray<i64>,
}

impl DirectIdMap {
    /// Starts building a mapping.
    pub fn builder() -> DirectIdMapBuilder {
        DirectIdMapBuilder {
            mapped_to_original: Vec::new(),
            seen: HashMap::new(),
        }
    }
}

impl IdMap for DirectIdMap {
    fn node_count(&self) -> u64 {
        self.mapped_to_original.len() as u64
    }

    #[allow(clippy::cast_sign_loss)]
    fn to_mapped_node_id(&self, original_node_id: u64) -> Option<u64> {
        let mapped = self.original_to_mapped.get(original_node_id);
        (mapped != UNMAPPED).then(|| mapped as u64)
    }

    fn to_original_node_id(&self, mapped_node_id: u64) -> u64 {
        #[allow(clippy::cast_possible_truncation)]
        let index = mapped_node_id as usize;
        assert!(
            index < self.mapped_to_original.len(),
            "mapped node id {mapped_node_id} out of range"
        );
        self.mapped_to_original[index]
    }
}

/// Builder for [`DirectIdMap`]; assigns mapped ids in registration order.
pub struct DirectIdMapBuilder {
    mapped_to_original: Vec<u64>,
    seen: HashMap<u64, u64>,
}

impl DirectIdMapBuilder {
    /// Registers an original id, returning its mapped id.
    ///
    /// Registering the same original id twice returns the id assigned the
    /// first time.
    pub fn add_node(&mut self, original_node_id: u64) -> u64 {
        if let Some(&mapped) = self.seen.get(&original_node_id) {
            return mapped;
        }
        let mapped = self.mapped_to_original.len() as u64;
        self.mapped_to_original.push(original_node_id);
        self.seen.insert(original_node_id, mapped);
        mapped
    }

    /// Number of nodes registered so far.
    pub fn node_count(&self) -> u64 {
        self.mapped_to_original.len() as u64
    }

    /// Finalizes into an immutable mapping.
    pub fn build(self) -> DirectIdMap {
        let lookup = HugeSparseArrayBuilder::<i64>::new(UNMAPPED);
        for (mapped, &original) in self.mapped_to_original.iter().enumerate() {
            #[allow(clippy::cast_possible_wrap)]
            lookup.set(original, mapped as i64);
        }
        DirectIdMap {
            mapped_to_original: self.mapped_to_original,
            original_to_mapped: lookup.build(),
        }
    }
}

/// A dense renumbering of a subset of an inner mapped id space.
///
/// Built by a single O(n) pass over the inner ids; qualifying ids are
/// assigned filtered ids `0..M-1` in encounter order. The filter itself
/// holds no reference to the inner graph — composing wrappers
/// ([`crate::graph::FilteredGraph`], [`crate::graph::FilteredIntersect`])
/// borrow both and translate at the boundary.
pub struct NodeFilter {
    filtered_to_inner: Vec<u64>,
    inner_to_filtered: HugeSparseArray<i64>,
}

impl NodeFilter {
    /// Builds a filter over `id_map` from a predicate over original ids.
    pub fn new<M: IdMap + ?Sized>(id_map: &M, mut predicate: impl FnMut(u64) -> bool) -> Self {
        let mut filtered_to_inner = Vec::new();
        let lookup = HugeSparseArrayBuilder::<i64>::new(UNMAPPED);
        for inner in 0..id_map.node_count() {
            if predicate(id_map.to_original_node_id(inner)) {
                #[allow(clippy::cast_possible_wrap)]
                lookup.set(inner, filtered_to_inner.len() as i64);
                filtered_to_inner.push(inner);
            }
        }
        Self {
            filtered_to_inner,
            inner_to_filtered: lookup.build(),
        }
    }

    /// Builds a filter from an explicit set of original ids.
    pub fn from_original_ids<M: IdMap + ?Sized>(
        id_map: &M,
        original_ids: &[u64],
    ) -> Self {
        let members: std::collections::HashSet<u64> = original_ids.iter().copied().collect();
        Self::new(id_map, |original| members.contains(&original))
    }

    /// Number of nodes visible through the filter.
    pub fn node_count(&self) -> u64 {
        self.filtered_to_inner.len() as u64
    }

    /// Translates an inner mapped id into the filtered space.
    #[allow(clippy::cast_sign_loss)]
    pub fn to_filtered(&self, inner_node_id: u64) -> Option<u64> {
        let filtered = self.inner_to_filtered.get(inner_node_id);
        (filtered != UNMAPPED).then(|| filtered as u64)
    }

    /// Translates a filtered id back into the inner mapped space.
    ///
    /// # Panics
    ///
    /// Panics if `filtered_node_id >= node_count()`.
    pub fn to_inner(&self, filtered_node_id: u64) -> u64 {
        #[allow(clippy::cast_possible_truncation)]
        let index = filtered_node_id as usize;
        assert!(
            index < self.filtered_to_inner.len(),
            "filtered node id {filtered_node_id} out of range"
        );
        self.filtered_to_inner[index]
    }

    /// Membership test over inner mapped ids.
    pub fn contains_inner(&self, inner_node_id: u64) -> bool {
        self.inner_to_filtered.get(inner_node_id) != UNMAPPED
    }
}
