//! Quadruple patterns for index lookups

use crate::model::{Literal, NamedNode, Quadruple, Resource, Term};

/// Quad pattern with optional constraints (None = variable)
///
/// `object` and `literal` describe the same slot; the store rejects
/// patterns that constrain both.
#[derive(Debug, Clone, Copy, Default)]
pub struct QuadPattern<'a> {
    pub context: Option<&'a Resource>,
    pub subject: Option<&'a Resource>,
    pub predicate: Option<&'a NamedNode>,
    pub object: Option<&'a Resource>,
    pub literal: Option<&'a Literal>,
}

impl<'a> QuadPattern<'a> {
    /// Pattern matching every quadruple
    pub fn any() -> Self {
        Self::default()
    }

    pub fn with_context(mut self, context: &'a Resource) -> Self {
        self.context = Some(context);
        self
    }

    pub fn with_subject(mut self, subject: &'a Resource) -> Self {
        self.subject = Some(subject);
        self
    }

    pub fn with_predicate(mut self, predicate: &'a NamedNode) -> Self {
        self.predicate = Some(predicate);
        self
    }

    pub fn with_object(mut self, object: &'a Resource) -> Self {
        self.object = Some(object);
        self
    }

    pub fn with_literal(mut self, literal: &'a Literal) -> Self {
        self.literal = Some(literal);
        self
    }

    /// No position is constrained
    pub fn is_unbound(&self) -> bool {
        self.context.is_none()
            && self.subject.is_none()
            && self.predicate.is_none()
            && self.object.is_none()
            && self.literal.is_none()
    }

    /// Both object and literal constrained
    pub fn is_ambiguous(&self) -> bool {
        self.object.is_some() && self.literal.is_some()
    }

    /// Check if a quadruple matches this pattern
    pub fn matches(&self, quadruple: &Quadruple) -> bool {
        if let Some(c) = self.context {
            if c != quadruple.context() {
                return false;
            }
        }
        if let Some(s) = self.subject {
            if s != quadruple.subject() {
                return false;
            }
        }
        if let Some(p) = self.predicate {
            if p != quadruple.predicate() {
                return false;
            }
        }
        match (self.object, self.literal, quadruple.object()) {
            (Some(_), Some(_), _) => false,
            (Some(o), None, Term::Resource(r)) => o == r,
            (None, Some(l), Term::Literal(lit)) => l == lit,
            (None, None, _) => true,
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pattern_matching() {
        let ctx = Resource::parse("http://example.org/ctx").unwrap();
        let s = Resource::parse("http://example.org/s").unwrap();
        let p = NamedNode::new("http://example.org/p").unwrap();
        let lit = Literal::new_simple_literal("lit");
        let q = Quadruple::new(ctx.clone(), s.clone(), p.clone(), lit.clone());

        assert!(QuadPattern::any().matches(&q));
        assert!(QuadPattern::any().with_context(&ctx).with_literal(&lit).matches(&q));
        assert!(!QuadPattern::any().with_object(&s).matches(&q));

        let other = Resource::parse("http://example.org/other").unwrap();
        assert!(!QuadPattern::any().with_subject(&other).matches(&q));
        assert!(QuadPattern::any().is_unbound());
        assert!(QuadPattern::any().with_object(&s).with_literal(&lit).is_ambiguous());
    }
}
