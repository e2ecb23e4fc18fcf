//! Set algebra over quadruple identity
//!
//! Every operation returns a fresh store and leaves both operands
//! untouched. A missing operand behaves as the empty store.

use super::memory::MemoryStore;

impl MemoryStore {
    /// Quadruples present in both stores
    pub fn intersect_with<'a>(&self, other: impl Into<Option<&'a MemoryStore>>) -> MemoryStore {
        match other.into() {
            Some(other) => {
                let (small, large) = if self.len() <= other.len() {
                    (self, other)
                } else {
                    (other, self)
                };
                small
                    .iter()
                    .filter(|q| large.contains_quadruple(*q))
                    .cloned()
                    .collect()
            }
            None => MemoryStore::new(),
        }
    }

    /// Quadruples present in either store
    pub fn union_with<'a>(&self, other: impl Into<Option<&'a MemoryStore>>) -> MemoryStore {
        let mut result = self.clone();
        if let Some(other) = other.into() {
            result.extend(other.iter().cloned());
        }
        result
    }

    /// Quadruples of this store that are absent from the other
    pub fn difference_with<'a>(&self, other: impl Into<Option<&'a MemoryStore>>) -> MemoryStore {
        match other.into() {
            Some(other) => self
                .iter()
                .filter(|q| !other.contains_quadruple(*q))
                .cloned()
                .collect(),
            None => self.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Literal, NamedNode, Quadruple, Resource};

    fn quad(s: &str, value: &str) -> Quadruple {
        Quadruple::new(
            NamedNode::new("http://example.org/ctx").unwrap(),
            Resource::parse(s).unwrap(),
            NamedNode::new("http://example.org/p").unwrap(),
            Literal::new_simple_literal(value),
        )
    }

    fn stores() -> (MemoryStore, MemoryStore) {
        let a = MemoryStore::from_quadruples(vec![
            quad("http://example.org/a", "1"),
            quad("http://example.org/b", "2"),
        ]);
        let b = MemoryStore::from_quadruples(vec![
            quad("http://example.org/b", "2"),
            quad("http://example.org/c", "3"),
        ]);
        (a, b)
    }

    #[test]
    fn test_intersect() {
        let (a, b) = stores();
        let result = a.intersect_with(&b);
        assert_eq!(result.len(), 1);
        assert!(result.contains_quadruple(&quad("http://example.org/b", "2")));
        assert_eq!(a.len(), 2);
        assert_eq!(b.len(), 2);
    }

    #[test]
    fn test_union_and_difference() {
        let (a, b) = stores();
        assert_eq!(a.union_with(&b).len(), 3);

        let diff = a.difference_with(&b);
        assert_eq!(diff.len(), 1);
        assert!(diff.contains_quadruple(&quad("http://example.org/a", "1")));
    }

    #[test]
    fn test_missing_operand_is_empty_store() {
        let (a, _) = stores();
        let none: Option<&MemoryStore> = None;

        assert!(a.intersect_with(none).is_empty());
        assert_eq!(a.union_with(none), a);
        assert_eq!(a.difference_with(none), a);
    }

    #[test]
    fn test_self_operations() {
        let (a, _) = stores();
        assert_eq!(a.intersect_with(&a), a);
        assert_eq!(a.union_with(&a), a);
        assert!(a.difference_with(&a).is_empty());
    }
}
