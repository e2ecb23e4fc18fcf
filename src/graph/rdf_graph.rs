//! Named graph: a context plus its triples

use crate::model::{Resource, Triple};
use indexmap::IndexSet;

/// Triples sharing one context, kept in insertion order without duplicates
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RdfGraph {
    context: Resource,
    triples: IndexSet<Triple>,
}

impl RdfGraph {
    /// Create an empty graph for a context
    pub fn new(context: impl Into<Resource>) -> Self {
        Self {
            context: context.into(),
            triples: IndexSet::new(),
        }
    }

    /// Context (graph name) of every triple in this graph
    pub fn context(&self) -> &Resource {
        &self.context
    }

    /// Add a triple; duplicates are ignored
    pub fn add_triple(&mut self, triple: Triple) -> &mut Self {
        self.triples.insert(triple);
        self
    }

    /// Remove a triple, keeping the order of the others
    pub fn remove_triple(&mut self, triple: &Triple) -> bool {
        self.triples.shift_remove(triple)
    }

    pub fn contains_triple(&self, triple: &Triple) -> bool {
        self.triples.contains(triple)
    }

    pub fn len(&self) -> usize {
        self.triples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.triples.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Triple> {
        self.triples.iter()
    }
}

impl Extend<Triple> for RdfGraph {
    fn extend<I: IntoIterator<Item = Triple>>(&mut self, iter: I) {
        self.triples.extend(iter);
    }
}

impl<'a> IntoIterator for &'a RdfGraph {
    type Item = &'a Triple;
    type IntoIter = indexmap::set::Iter<'a, Triple>;

    fn into_iter(self) -> Self::IntoIter {
        self.triples.iter()
    }
}
