//! Namespace prefixes for compact IRI notation

use std::collections::HashMap;
use thiserror::Error;

/// Prefix errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PrefixError {
    /// Unknown prefix
    #[error("Unknown prefix: {0}")]
    UnknownPrefix(String),

    /// Not of the form `prefix:local`
    #[error("Not a compact IRI: {0}")]
    NotCompact(String),
}

pub type PrefixResult<T> = Result<T, PrefixError>;

/// Namespace (prefix → IRI mapping)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Namespace {
    pub prefix: String,
    pub iri: String,
}

impl Namespace {
    pub fn new(prefix: impl Into<String>, iri: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            iri: iri.into(),
        }
    }
}

/// Registered prefixes
#[derive(Debug, Clone)]
pub struct NamespaceRegistry {
    prefixes: HashMap<String, String>,
}

impl NamespaceRegistry {
    /// Create a registry without any prefix
    pub fn empty() -> Self {
        Self {
            prefixes: HashMap::new(),
        }
    }

    /// Create a registry with the common RDF prefixes
    pub fn new() -> Self {
        let mut registry = Self::empty();

        registry.add_prefix("rdf", "http://www.w3.org/1999/02/22-rdf-syntax-ns#");
        registry.add_prefix("rdfs", "http://www.w3.org/2000/01/rdf-schema#");
        registry.add_prefix("xsd", "http://www.w3.org/2001/XMLSchema#");
        registry.add_prefix("owl", "http://www.w3.org/2002/07/owl#");
        registry.add_prefix("foaf", "http://xmlns.com/foaf/0.1/");
        registry.add_prefix("dc", "http://purl.org/dc/elements/1.1/");
        registry.add_prefix("dcterms", "http://purl.org/dc/terms/");

        registry
    }

    /// Add (or replace) a prefix
    pub fn add_prefix(&mut self, prefix: impl Into<String>, iri: impl Into<String>) -> &mut Self {
        self.prefixes.insert(prefix.into(), iri.into());
        self
    }

    /// Get IRI for a prefix
    pub fn get_iri(&self, prefix: &str) -> PrefixResult<&str> {
        self.prefixes
            .get(prefix)
            .map(|s| s.as_str())
            .ok_or_else(|| PrefixError::UnknownPrefix(prefix.to_string()))
    }

    /// Expand a compact IRI (`prefix:local`) to a full IRI
    pub fn expand(&self, compact_iri: &str) -> PrefixResult<String> {
        let (prefix, local) = compact_iri
            .split_once(':')
            .ok_or_else(|| PrefixError::NotCompact(compact_iri.to_string()))?;
        let iri = self.get_iri(prefix)?;
        Ok(format!("{}{}", iri, local))
    }

    /// Expand when the value starts with a registered prefix, otherwise `None`
    ///
    /// Hierarchical IRIs (`scheme://...`) and blank node labels are never
    /// treated as compact.
    pub fn try_expand(&self, value: &str) -> Option<String> {
        let (prefix, local) = value.split_once(':')?;
        if prefix == "_" || local.starts_with("//") {
            return None;
        }
        self.prefixes
            .get(prefix)
            .map(|iri| format!("{}{}", iri, local))
    }

    /// Compact an IRI with the longest matching namespace
    pub fn compact(&self, iri: &str) -> Option<String> {
        self.prefixes
            .iter()
            .filter(|(_, namespace_iri)| iri.starts_with(namespace_iri.as_str()))
            .max_by_key(|(_, namespace_iri)| namespace_iri.len())
            .map(|(prefix, namespace_iri)| format!("{}:{}", prefix, &iri[namespace_iri.len()..]))
    }

    /// Get all registered prefixes, sorted by prefix
    pub fn prefixes(&self) -> Vec<Namespace> {
        let mut namespaces: Vec<Namespace> = self
            .prefixes
            .iter()
            .map(|(prefix, iri)| Namespace::new(prefix.clone(), iri.clone()))
            .collect();
        namespaces.sort_by(|a, b| a.prefix.cmp(&b.prefix));
        namespaces
    }

    pub fn len(&self) -> usize {
        self.prefixes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prefixes.is_empty()
    }
}

impl Default for NamespaceRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_common_prefixes() {
        let registry = NamespaceRegistry::new();

        assert_eq!(
            registry.get_iri("rdf").unwrap(),
            "http://www.w3.org/1999/02/22-rdf-syntax-ns#"
        );
        assert_eq!(registry.get_iri("xsd").unwrap(), "http://www.w3.org/2001/XMLSchema#");
        assert!(matches!(
            registry.get_iri("nope"),
            Err(PrefixError::UnknownPrefix(_))
        ));
    }

    #[test]
    fn test_expand() {
        let registry = NamespaceRegistry::new();

        assert_eq!(
            registry.expand("foaf:name").unwrap(),
            "http://xmlns.com/foaf/0.1/name"
        );
        assert!(matches!(
            registry.expand("plain"),
            Err(PrefixError::NotCompact(_))
        ));
    }

    #[test]
    fn test_try_expand_skips_absolute_iris() {
        let mut registry = NamespaceRegistry::new();
        registry.add_prefix("http", "urn:never:");

        assert_eq!(registry.try_expand("http://example.org/a"), None);
        assert_eq!(registry.try_expand("_:b0"), None);
        assert_eq!(registry.try_expand("unknown:thing"), None);
        assert_eq!(
            registry.try_expand("rdf:type").as_deref(),
            Some("http://www.w3.org/1999/02/22-rdf-syntax-ns#type")
        );
    }

    #[test]
    fn test_compact_prefers_longest_namespace() {
        let mut registry = NamespaceRegistry::empty();
        registry
            .add_prefix("ex", "http://example.org/")
            .add_prefix("people", "http://example.org/people/");

        assert_eq!(
            registry.compact("http://example.org/people/alice").as_deref(),
            Some("people:alice")
        );
        assert_eq!(registry.compact("http://other.org/x"), None);
    }
}
