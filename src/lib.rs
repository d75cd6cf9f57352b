//! # `trellis` - In-Memory Graph Analytics Core
//!
//! A compact toolkit for large-scale, in-memory graph analytics: paged
//! sparse arrays backing per-node state at huge scale, a node-identifier
//! virtualization layer with zero-copy filtered views, triangle
//! intersection, and a parallel Brandes / RA-Brandes betweenness
//! centrality engine.
//!
//! ## Design
//!
//! - **Paged sparse storage** (`collections::sparse`): per-node values
//!   live in lazily allocated power-of-two pages with a configurable
//!   default, so sparse or incrementally growing id spaces never pay for
//!   unused index ranges.
//! - **Id virtualization** (`graph::id_map`): algorithms run over a dense
//!   `0..N-1` mapped space; filtered views remap a subset of nodes into
//!   their own dense space without materializing a new graph.
//! - **Capability traits at the seams** (`graph::Graph`,
//!   `graph::RelationshipIntersect`): algorithms consume a small
//!   read-only surface — counts, adjacency iteration, id translation —
//!   and wrappers compose by borrowing, never owning, what they wrap.
//! - **Run-scoped parallelism** (`centrality`): every algorithm
//!   invocation gets an explicit worker pool sized by its configuration;
//!   per-source traversal state is thread-private and the shared score
//!   accumulator is the only synchronized structure.
//!
//! ## Concurrency contract
//!
//! Graphs and id maps are immutable for the duration of a run; mutating
//! one while readers are active is a documented precondition violation
//! the core does not detect. Cancellation is cooperative and observed
//! between per-source units, never mid-traversal. Floating-point merge
//! order across threads is unspecified: parallel results equal
//! single-threaded results only within floating-point tolerance.
//!
//! ## Example
//!
//! ```rust
//! use trellis::{BetweennessCentrality, BetweennessConfig, CancellationToken, CsrGraph};
//!
//! let mut builder = CsrGraph::builder();
//! builder.add_relationship(10, 20);
//! builder.add_relationship(20, 30);
//! let graph = builder.build();
//!
//! let config = BetweennessConfig {
//!     sampling_probability: 1.0,
//!     concurrency: 2,
//!     random_seed: None,
//! };
//! let engine = BetweennessCentrality::new(&graph, config).unwrap();
//! let result = engine.compute(&CancellationToken::new()).unwrap();
//! for record in result.stream() {
//!     println!("{} -> {}", record.node_id, record.score);
//! }
//! ```

#![warn(missing_docs, clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

pub mod centrality;
pub mod collections;
pub mod concurrency;
pub mod error;
pub mod graph;
pub mod traverse;

pub use centrality::{
    BetweennessCentrality, BetweennessConfig, CentralityRecord, CentralityResult,
    SelectionStrategy,
};
pub use collections::{AtomicDoubleArray, HugeSparseArray, HugeSparseArrayBuilder, SparseValue};
pub use concurrency::CancellationToken;
pub use error::{Error, Result};
pub use graph::{
    build_inverse_index, CsrGraph, CsrGraphBuilder, CsrIntersect, DirectIdMap, FilteredGraph,
    FilteredIntersect, Graph, GraphIntersect, IdMap, InverseIndexDescriptor, NodeFilter,
    RelationshipIntersect,
};
pub use traverse::{dijkstra, Bfs, Dfs, ExitCondition, ShortestPaths};
