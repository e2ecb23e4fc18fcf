//! Quadstore
//!
//! An embedded, in-memory RDF quadruple store: named-graph triples indexed
//! by context, subject, predicate, object and literal, with pattern
//! selection, set algebra between stores, reification, and import/export
//! through N-Quads, TriX, TriG and a four-column table.
//!
//! # Layout
//!
//! - [`model`]: terms, triples and quadruples with content-hash identity
//! - [`index`]: the five-dimension bucket index and quad patterns
//! - [`store`]: [`MemoryStore`] and its operations (sync and async)
//! - [`graph`]: the per-context triple view
//! - [`registry`]: namespace prefixes and datatypes
//! - [`persistence`]: wire formats and the tabular form
//! - [`config`]: YAML-loadable configuration
//!
//! ## Example Usage
//!
//! ```rust
//! use quadstore::{Literal, MemoryStore, NamedNode, Quadruple, Resource};
//!
//! let context = NamedNode::new("http://example.org/people").unwrap();
//! let alice = NamedNode::new("http://example.org/alice").unwrap();
//! let name = NamedNode::new("http://xmlns.com/foaf/0.1/name").unwrap();
//!
//! let mut store = MemoryStore::new();
//! store.add_quadruple(Quadruple::new(
//!     context.clone(),
//!     alice.clone(),
//!     name.clone(),
//!     Literal::new_simple_literal("Alice"),
//! ));
//!
//! let subject = Resource::from(alice);
//! let selected = store.select(None, Some(&subject), Some(&name), None, None).unwrap();
//! assert_eq!(selected.quadruples_count(), 1);
//! ```

#![allow(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod graph;
pub mod index;
pub mod model;
pub mod persistence;
pub mod registry;
pub mod store;

// Re-export main types for convenience
pub use config::{ConfigError, ConfigResult, StoreConfig};

pub use graph::RdfGraph;

pub use index::{IndexDimension, QuadPattern, StoreIndex};

pub use model::{
    BlankNode, ContentHash, Literal, NamedNode, Quadruple, QuadrupleFlavor, Resource, Term,
    TermError, TermResult, Triple,
};

pub use persistence::{QuadParser, QuadRow, QuadSerializer, QuadTable, RdfFormat};

pub use registry::{DatatypeRegistry, NamespaceRegistry, Registry};

pub use store::{MemoryStore, StoreError, StoreResult};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Get version string
pub fn version() -> &'static str {
    VERSION
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        let ver = version();
        assert!(!ver.is_empty());
        assert_eq!(ver, "1.0.0");
    }
}
