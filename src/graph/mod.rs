//! Graph bridge
//!
//! An [`RdfGraph`] is the triple-level view of a single context. Stores
//! are partitioned into graphs by [`MemoryStore::extract_graphs`] and fed
//! back with [`MemoryStore::merge_graph`].
//!
//! [`MemoryStore::extract_graphs`]: crate::store::MemoryStore::extract_graphs
//! [`MemoryStore::merge_graph`]: crate::store::MemoryStore::merge_graph

pub mod rdf_graph;

pub use rdf_graph::RdfGraph;
