//! Namespace and datatype registries
//!
//! A [`Registry`] is an explicit value owned by whoever parses data (see
//! [`QuadParser`](crate::persistence::QuadParser)). `Registry::default()`
//! carries the common RDF prefixes and the XSD built-in datatypes.

pub mod datatype;
pub mod namespace;

pub use datatype::{DatatypeDefinition, DatatypeFacet, DatatypeRegistry, LexicalSpace};
pub use namespace::{Namespace, NamespaceRegistry, PrefixError, PrefixResult};

/// Namespaces and datatypes used while importing data
#[derive(Debug, Clone, Default)]
pub struct Registry {
    pub namespaces: NamespaceRegistry,
    pub datatypes: DatatypeRegistry,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry without any prefix or datatype
    pub fn empty() -> Self {
        Self {
            namespaces: NamespaceRegistry::empty(),
            datatypes: DatatypeRegistry::empty(),
        }
    }
}
