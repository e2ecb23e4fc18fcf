//! Triples and quadruples
//!
//! A [`Quadruple`] is immutable once built. Its identity is the content hash
//! of its canonical string, computed at construction.

use super::hash::ContentHash;
use super::term::{Literal, NamedNode, Resource, Term};
use std::fmt;
use std::hash::{Hash, Hasher};

/// Statement flavor, derived from the object position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QuadrupleFlavor {
    /// Subject-Predicate-Object: the object is a resource
    Spo,
    /// Subject-Predicate-Literal: the object is a literal
    Spl,
}

impl QuadrupleFlavor {
    fn of(object: &Term) -> Self {
        match object {
            Term::Resource(_) => QuadrupleFlavor::Spo,
            Term::Literal(_) => QuadrupleFlavor::Spl,
        }
    }
}

/// RDF triple (subject-predicate-object)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Triple {
    /// Subject
    pub subject: Resource,
    /// Predicate
    pub predicate: NamedNode,
    /// Object
    pub object: Term,
}

impl Triple {
    /// Create a new triple
    pub fn new(subject: impl Into<Resource>, predicate: NamedNode, object: impl Into<Term>) -> Self {
        Self {
            subject: subject.into(),
            predicate,
            object: object.into(),
        }
    }

    pub fn flavor(&self) -> QuadrupleFlavor {
        QuadrupleFlavor::of(&self.object)
    }
}

impl fmt::Display for Triple {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {} .", self.subject, self.predicate, self.object)
    }
}

/// RDF quadruple: a triple placed in a named-graph context
#[derive(Debug, Clone)]
pub struct Quadruple {
    context: Resource,
    subject: Resource,
    predicate: NamedNode,
    object: Term,
    id: ContentHash,
}

impl Quadruple {
    /// Create a new quadruple
    pub fn new(
        context: impl Into<Resource>,
        subject: impl Into<Resource>,
        predicate: NamedNode,
        object: impl Into<Term>,
    ) -> Self {
        let context = context.into();
        let subject = subject.into();
        let object = object.into();
        let id = ContentHash::of(&format!("{} {} {} {}", context, subject, predicate, object));
        Self {
            context,
            subject,
            predicate,
            object,
            id,
        }
    }

    /// Place a triple in a context
    pub fn from_triple(context: impl Into<Resource>, triple: Triple) -> Self {
        Self::new(context, triple.subject, triple.predicate, triple.object)
    }

    /// Identity hash over the canonical `context subject predicate object` form
    pub fn id(&self) -> ContentHash {
        self.id
    }

    pub fn context(&self) -> &Resource {
        &self.context
    }

    pub fn subject(&self) -> &Resource {
        &self.subject
    }

    pub fn predicate(&self) -> &NamedNode {
        &self.predicate
    }

    pub fn object(&self) -> &Term {
        &self.object
    }

    /// The object when it is a resource (SPO flavor)
    pub fn object_resource(&self) -> Option<&Resource> {
        self.object.as_resource()
    }

    /// The object when it is a literal (SPL flavor)
    pub fn literal(&self) -> Option<&Literal> {
        self.object.as_literal()
    }

    pub fn flavor(&self) -> QuadrupleFlavor {
        QuadrupleFlavor::of(&self.object)
    }

    /// Get the triple part (without context)
    pub fn as_triple(&self) -> Triple {
        Triple {
            subject: self.subject.clone(),
            predicate: self.predicate.clone(),
            object: self.object.clone(),
        }
    }
}

impl PartialEq for Quadruple {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Quadruple {}

impl Hash for Quadruple {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

/// N-Quads line form
impl fmt::Display for Quadruple {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} {} .",
            self.subject, self.predicate, self.object, self.context
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::BlankNode;

    fn node(iri: &str) -> NamedNode {
        NamedNode::new(iri).unwrap()
    }

    #[test]
    fn test_identity_is_content_based() {
        let q1 = Quadruple::new(
            node("http://example.org/ctx"),
            node("http://example.org/alice"),
            node("http://xmlns.com/foaf/0.1/name"),
            Literal::new_simple_literal("Alice"),
        );
        let q2 = Quadruple::new(
            node("http://example.org/ctx"),
            node("http://example.org/alice"),
            node("http://xmlns.com/foaf/0.1/name"),
            Literal::new_simple_literal("Alice"),
        );
        assert_eq!(q1.id(), q2.id());
        assert_eq!(q1, q2);
    }

    #[test]
    fn test_context_changes_identity() {
        let q1 = Quadruple::new(
            node("http://example.org/ctx1"),
            node("http://example.org/s"),
            node("http://example.org/p"),
            node("http://example.org/o"),
        );
        let q2 = Quadruple::new(
            node("http://example.org/ctx2"),
            node("http://example.org/s"),
            node("http://example.org/p"),
            node("http://example.org/o"),
        );
        assert_ne!(q1.id(), q2.id());
    }

    #[test]
    fn test_flavor() {
        let spo = Quadruple::new(
            node("http://example.org/ctx"),
            BlankNode::from_id("b1").unwrap(),
            node("http://example.org/p"),
            node("http://example.org/o"),
        );
        assert_eq!(spo.flavor(), QuadrupleFlavor::Spo);
        assert!(spo.object_resource().is_some());
        assert!(spo.literal().is_none());

        let spl = Quadruple::from_triple(
            node("http://example.org/ctx"),
            Triple::new(
                node("http://example.org/s"),
                node("http://example.org/p"),
                Literal::new_simple_literal("lit"),
            ),
        );
        assert_eq!(spl.flavor(), QuadrupleFlavor::Spl);
        assert_eq!(spl.literal().map(|l| l.value()), Some("lit"));
    }

    #[test]
    fn test_display_is_nquads() {
        let q = Quadruple::new(
            node("http://example.org/c"),
            node("http://example.org/s"),
            node("http://example.org/p"),
            Literal::new_simple_literal("v"),
        );
        assert_eq!(
            q.to_string(),
            "<http://example.org/s> <http://example.org/p> \"v\" <http://example.org/c> ."
        );
    }
}
