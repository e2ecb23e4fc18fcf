//! RDF term definitions
//!
//! Wrapper types around the oxrdf primitives. A [`Term`] is either a
//! [`Resource`] (IRI or blank node) or a [`Literal`]. Equality follows the
//! canonical N-Triples form, and [`ContentHash`] is computed from that same
//! form.

use super::hash::ContentHash;
use super::vocab::xsd;
use oxrdf::{BlankNode as OxBlankNode, Literal as OxLiteral, NamedNode as OxNamedNode};
use std::fmt;
use thiserror::Error;

/// Errors raised while building terms
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TermError {
    /// Invalid IRI
    #[error("Invalid IRI: {0}")]
    InvalidIri(String),

    /// Invalid blank node identifier
    #[error("Invalid blank node: {0}")]
    InvalidBlankNode(String),

    /// Invalid language tag
    #[error("Invalid language tag: {0}")]
    InvalidLanguageTag(String),

    /// Lexical value rejected by its datatype
    #[error("Invalid literal {value:?} for datatype <{datatype}>: {reason}")]
    InvalidLiteral {
        value: String,
        datatype: String,
        reason: String,
    },
}

pub type TermResult<T> = Result<T, TermError>;

/// Named node (IRI)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NamedNode(OxNamedNode);

impl NamedNode {
    /// Create a new named node from an absolute IRI
    pub fn new(iri: &str) -> TermResult<Self> {
        OxNamedNode::new(iri)
            .map(Self)
            .map_err(|e| TermError::InvalidIri(format!("{}: {}", iri, e)))
    }

    /// Build a named node from an IRI known to be valid (vocabulary constants)
    pub(crate) fn from_static(iri: &'static str) -> Self {
        Self(OxNamedNode::new_unchecked(iri))
    }

    /// Get the IRI string
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// Get the inner oxrdf NamedNode
    pub fn inner(&self) -> &OxNamedNode {
        &self.0
    }

    pub fn content_hash(&self) -> ContentHash {
        ContentHash::of_display(self)
    }
}

impl fmt::Display for NamedNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<OxNamedNode> for NamedNode {
    fn from(node: OxNamedNode) -> Self {
        Self(node)
    }
}

impl From<NamedNode> for OxNamedNode {
    fn from(node: NamedNode) -> Self {
        node.0
    }
}

/// Blank node (anonymous node scoped to its dataset)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BlankNode(OxBlankNode);

impl BlankNode {
    /// Create a fresh blank node with a random unique identifier
    pub fn new() -> Self {
        Self(OxBlankNode::default())
    }

    /// Create a blank node from an identifier (without the `_:` marker)
    pub fn from_id(id: &str) -> TermResult<Self> {
        OxBlankNode::new(id)
            .map(Self)
            .map_err(|e| TermError::InvalidBlankNode(format!("{}: {}", id, e)))
    }

    /// Get the blank node identifier
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    pub fn content_hash(&self) -> ContentHash {
        ContentHash::of_display(self)
    }
}

impl Default for BlankNode {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for BlankNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<OxBlankNode> for BlankNode {
    fn from(node: OxBlankNode) -> Self {
        Self(node)
    }
}

/// RDF literal: plain (optionally language-tagged) or typed
///
/// Language tags are normalized to lowercase on construction, so they
/// compare case-insensitively.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Literal(OxLiteral);

impl Literal {
    /// Create a plain literal without language
    pub fn new_simple_literal(value: impl Into<String>) -> Self {
        Self(OxLiteral::new_simple_literal(value))
    }

    /// Create a plain literal with a language tag
    pub fn new_language_tagged_literal(
        value: impl Into<String>,
        language: impl Into<String>,
    ) -> TermResult<Self> {
        let language = language.into();
        OxLiteral::new_language_tagged_literal(value, language.as_str())
            .map(Self)
            .map_err(|e| TermError::InvalidLanguageTag(format!("{}: {}", language, e)))
    }

    /// Create a typed literal
    pub fn new_typed_literal(value: impl Into<String>, datatype: NamedNode) -> Self {
        Self(OxLiteral::new_typed_literal(value, datatype.0))
    }

    /// Get the lexical value
    pub fn value(&self) -> &str {
        self.0.value()
    }

    /// Get the language tag if present
    pub fn language(&self) -> Option<&str> {
        self.0.language()
    }

    /// Get the datatype (xsd:string for simple literals)
    pub fn datatype(&self) -> NamedNode {
        NamedNode(self.0.datatype().into_owned())
    }

    /// Plain literals are simple strings and language-tagged strings
    pub fn is_plain(&self) -> bool {
        self.language().is_some() || self.0.datatype().as_str() == xsd::STRING
    }

    pub fn is_typed(&self) -> bool {
        !self.is_plain()
    }

    /// Get the inner oxrdf Literal
    pub fn inner(&self) -> &OxLiteral {
        &self.0
    }

    pub fn content_hash(&self) -> ContentHash {
        ContentHash::of_display(self)
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<OxLiteral> for Literal {
    fn from(lit: OxLiteral) -> Self {
        Self(lit)
    }
}

/// Subject/object-capable term: a named node or a blank node
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Resource {
    /// Named node (IRI)
    NamedNode(NamedNode),
    /// Blank node, written with the reserved `_:` marker
    BlankNode(BlankNode),
}

impl Resource {
    /// Parse a resource from `_:id`, `<iri>` or a bare absolute IRI
    pub fn parse(value: &str) -> TermResult<Self> {
        let value = value.trim();
        if let Some(id) = value.strip_prefix("_:") {
            return Ok(Resource::BlankNode(BlankNode::from_id(id)?));
        }
        let iri = value
            .strip_prefix('<')
            .and_then(|v| v.strip_suffix('>'))
            .unwrap_or(value);
        Ok(Resource::NamedNode(NamedNode::new(iri)?))
    }

    /// Check if this is a named node
    pub fn is_named_node(&self) -> bool {
        matches!(self, Resource::NamedNode(_))
    }

    /// Check if this is a blank node
    pub fn is_blank_node(&self) -> bool {
        matches!(self, Resource::BlankNode(_))
    }

    pub fn as_named_node(&self) -> Option<&NamedNode> {
        match self {
            Resource::NamedNode(n) => Some(n),
            Resource::BlankNode(_) => None,
        }
    }

    pub fn content_hash(&self) -> ContentHash {
        ContentHash::of_display(self)
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Resource::NamedNode(n) => write!(f, "{}", n),
            Resource::BlankNode(b) => write!(f, "{}", b),
        }
    }
}

impl From<NamedNode> for Resource {
    fn from(node: NamedNode) -> Self {
        Resource::NamedNode(node)
    }
}

impl From<BlankNode> for Resource {
    fn from(node: BlankNode) -> Self {
        Resource::BlankNode(node)
    }
}

/// Any RDF term that can occupy the object position
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Term {
    Resource(Resource),
    Literal(Literal),
}

impl Term {
    pub fn is_literal(&self) -> bool {
        matches!(self, Term::Literal(_))
    }

    pub fn is_resource(&self) -> bool {
        matches!(self, Term::Resource(_))
    }

    pub fn as_resource(&self) -> Option<&Resource> {
        match self {
            Term::Resource(r) => Some(r),
            Term::Literal(_) => None,
        }
    }

    pub fn as_literal(&self) -> Option<&Literal> {
        match self {
            Term::Literal(l) => Some(l),
            Term::Resource(_) => None,
        }
    }

    pub fn content_hash(&self) -> ContentHash {
        ContentHash::of_display(self)
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Term::Resource(r) => write!(f, "{}", r),
            Term::Literal(l) => write!(f, "{}", l),
        }
    }
}

impl From<Resource> for Term {
    fn from(resource: Resource) -> Self {
        Term::Resource(resource)
    }
}

impl From<NamedNode> for Term {
    fn from(node: NamedNode) -> Self {
        Term::Resource(node.into())
    }
}

impl From<BlankNode> for Term {
    fn from(node: BlankNode) -> Self {
        Term::Resource(node.into())
    }
}

impl From<Literal> for Term {
    fn from(lit: Literal) -> Self {
        Term::Literal(lit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_named_node() {
        let node = NamedNode::new("http://example.org/alice").unwrap();
        assert_eq!(node.as_str(), "http://example.org/alice");
        assert_eq!(node.to_string(), "<http://example.org/alice>");
        assert!(NamedNode::new("not an iri").is_err());
    }

    #[test]
    fn test_blank_node() {
        let node1 = BlankNode::new();
        let node2 = BlankNode::new();
        assert_ne!(node1, node2);

        let named = BlankNode::from_id("b0").unwrap();
        assert_eq!(named.to_string(), "_:b0");
    }

    #[test]
    fn test_literal_kinds() {
        let lit = Literal::new_simple_literal("Alice");
        assert!(lit.is_plain());
        assert_eq!(lit.to_string(), "\"Alice\"");

        let lit = Literal::new_language_tagged_literal("Alice", "EN").unwrap();
        assert!(lit.is_plain());
        assert_eq!(lit.language(), Some("en"));

        let int = NamedNode::new(xsd::INTEGER).unwrap();
        let lit = Literal::new_typed_literal("42", int);
        assert!(lit.is_typed());
        assert_eq!(lit.datatype().as_str(), xsd::INTEGER);
    }

    #[test]
    fn test_language_tag_case_insensitive() {
        let upper = Literal::new_language_tagged_literal("chat", "FR").unwrap();
        let lower = Literal::new_language_tagged_literal("chat", "fr").unwrap();
        assert_eq!(upper, lower);
        assert_eq!(upper.content_hash(), lower.content_hash());
    }

    #[test]
    fn test_resource_parse() {
        let blank = Resource::parse("_:node1").unwrap();
        assert!(blank.is_blank_node());

        let named = Resource::parse("<http://example.org/a>").unwrap();
        assert_eq!(named, Resource::parse("http://example.org/a").unwrap());
        assert!(named.as_named_node().is_some());

        assert!(Resource::parse("hello world").is_err());
    }

    #[test]
    fn test_hash_uniform_across_wrappers() {
        let node = NamedNode::new("http://example.org/a").unwrap();
        let resource = Resource::from(node.clone());
        let term = Term::from(node.clone());
        assert_eq!(node.content_hash(), resource.content_hash());
        assert_eq!(resource.content_hash(), term.content_hash());
    }
}
