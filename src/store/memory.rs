//! MemoryStore: identity map plus index
//!
//! Null arguments are modelled with `Option`. Two conventions coexist and
//! are both relied upon:
//! - single-dimension selectors treat `None` as a wildcard and return the
//!   whole store;
//! - removers treat any `None` as "remove nothing".

use super::error::{StoreError, StoreResult};
use crate::graph::RdfGraph;
use crate::index::{Candidates, QuadPattern, StoreIndex};
use crate::model::{ContentHash, Literal, NamedNode, Quadruple, Resource};
use indexmap::IndexMap;
use rustc_hash::{FxHashMap, FxHashSet};
use tracing::debug;

/// In-memory quadruple store
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    /// Primary storage: quadruple identity hash -> quadruple
    quadruples: FxHashMap<ContentHash, Quadruple>,

    /// Five-dimension bucket index over `quadruples`
    index: StoreIndex,
}

impl MemoryStore {
    /// Create a new empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store from a sequence of quadruples, dropping duplicates
    pub fn from_quadruples(quadruples: impl IntoIterator<Item = Quadruple>) -> Self {
        quadruples.into_iter().collect()
    }

    /// Add a quadruple; `None` and already-present quadruples are ignored
    pub fn add_quadruple(&mut self, quadruple: impl Into<Option<Quadruple>>) -> &mut Self {
        if let Some(quadruple) = quadruple.into() {
            if !self.quadruples.contains_key(&quadruple.id()) {
                self.index.add(&quadruple);
                self.quadruples.insert(quadruple.id(), quadruple);
            }
        }
        self
    }

    /// Remove a quadruple; `None` and absent quadruples are ignored
    pub fn remove_quadruple<'a>(&mut self, quadruple: impl Into<Option<&'a Quadruple>>) -> &mut Self {
        if let Some(quadruple) = quadruple.into() {
            if let Some(removed) = self.quadruples.remove(&quadruple.id()) {
                self.index.remove(&removed);
            }
        }
        self
    }

    /// Check if a quadruple exists in the store (`None` is never contained)
    pub fn contains_quadruple<'a>(&self, quadruple: impl Into<Option<&'a Quadruple>>) -> bool {
        quadruple
            .into()
            .map_or(false, |q| self.quadruples.contains_key(&q.id()))
    }

    /// Get the total number of quadruples
    pub fn quadruples_count(&self) -> usize {
        self.quadruples.len()
    }

    pub fn len(&self) -> usize {
        self.quadruples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.quadruples.is_empty()
    }

    /// Get an iterator over all quadruples
    pub fn iter(&self) -> impl Iterator<Item = &Quadruple> {
        self.quadruples.values()
    }

    /// Get a quadruple by its identity hash
    pub fn get(&self, id: &ContentHash) -> Option<&Quadruple> {
        self.quadruples.get(id)
    }

    /// Read access to the index
    pub fn index(&self) -> &StoreIndex {
        &self.index
    }

    /// Clear all quadruples and the index
    pub fn clear_quadruples(&mut self) -> &mut Self {
        self.quadruples.clear();
        self.index.clear();
        self
    }

    /// Release the identity map and the index
    ///
    /// Consumes the store, so it cannot be read afterwards.
    pub fn dispose(self) {
        debug!("Disposing store with {} quadruples", self.quadruples.len());
        drop(self);
    }

    // Pattern accessors

    /// Select the quadruples matching every given position
    ///
    /// `object` and `literal` describe the same slot: constraining both is
    /// a contract violation. With no constraint the result is a full copy.
    pub fn select(
        &self,
        context: Option<&Resource>,
        subject: Option<&Resource>,
        predicate: Option<&NamedNode>,
        object: Option<&Resource>,
        literal: Option<&Literal>,
    ) -> StoreResult<MemoryStore> {
        self.select_pattern(&QuadPattern {
            context,
            subject,
            predicate,
            object,
            literal,
        })
    }

    /// Select the quadruples matching a pattern
    pub fn select_pattern(&self, pattern: &QuadPattern<'_>) -> StoreResult<MemoryStore> {
        if pattern.is_ambiguous() {
            return Err(StoreError::ObjectAndLiteralConflict);
        }
        Ok(self.materialize_pattern(pattern))
    }

    /// Quadruples in a context; `None` selects the whole store
    pub fn select_by_context<'a>(&self, context: impl Into<Option<&'a Resource>>) -> MemoryStore {
        match context.into() {
            Some(context) => self.materialize_pattern(&QuadPattern::any().with_context(context)),
            None => self.clone(),
        }
    }

    /// Quadruples with a subject; `None` selects the whole store
    pub fn select_by_subject<'a>(&self, subject: impl Into<Option<&'a Resource>>) -> MemoryStore {
        match subject.into() {
            Some(subject) => self.materialize_pattern(&QuadPattern::any().with_subject(subject)),
            None => self.clone(),
        }
    }

    /// Quadruples with a predicate; `None` selects the whole store
    pub fn select_by_predicate<'a>(&self, predicate: impl Into<Option<&'a NamedNode>>) -> MemoryStore {
        match predicate.into() {
            Some(predicate) => self.materialize_pattern(&QuadPattern::any().with_predicate(predicate)),
            None => self.clone(),
        }
    }

    /// Quadruples with a resource object; `None` selects the whole store
    pub fn select_by_object<'a>(&self, object: impl Into<Option<&'a Resource>>) -> MemoryStore {
        match object.into() {
            Some(object) => self.materialize_pattern(&QuadPattern::any().with_object(object)),
            None => self.clone(),
        }
    }

    /// Quadruples with a literal object; `None` selects the whole store
    pub fn select_by_literal<'a>(&self, literal: impl Into<Option<&'a Literal>>) -> MemoryStore {
        match literal.into() {
            Some(literal) => self.materialize_pattern(&QuadPattern::any().with_literal(literal)),
            None => self.clone(),
        }
    }

    // Removers: any `None` argument removes nothing

    pub fn remove_by_context<'a>(&mut self, context: impl Into<Option<&'a Resource>>) -> &mut Self {
        if let Some(context) = context.into() {
            self.remove_matching(&QuadPattern::any().with_context(context), "context");
        }
        self
    }

    pub fn remove_by_subject<'a>(&mut self, subject: impl Into<Option<&'a Resource>>) -> &mut Self {
        if let Some(subject) = subject.into() {
            self.remove_matching(&QuadPattern::any().with_subject(subject), "subject");
        }
        self
    }

    pub fn remove_by_predicate<'a>(&mut self, predicate: impl Into<Option<&'a NamedNode>>) -> &mut Self {
        if let Some(predicate) = predicate.into() {
            self.remove_matching(&QuadPattern::any().with_predicate(predicate), "predicate");
        }
        self
    }

    pub fn remove_by_object<'a>(&mut self, object: impl Into<Option<&'a Resource>>) -> &mut Self {
        if let Some(object) = object.into() {
            self.remove_matching(&QuadPattern::any().with_object(object), "object");
        }
        self
    }

    pub fn remove_by_literal<'a>(&mut self, literal: impl Into<Option<&'a Literal>>) -> &mut Self {
        if let Some(literal) = literal.into() {
            self.remove_matching(&QuadPattern::any().with_literal(literal), "literal");
        }
        self
    }

    pub fn remove_by_context_subject<'a>(
        &mut self,
        context: impl Into<Option<&'a Resource>>,
        subject: impl Into<Option<&'a Resource>>,
    ) -> &mut Self {
        if let (Some(c), Some(s)) = (context.into(), subject.into()) {
            let pattern = QuadPattern::any().with_context(c).with_subject(s);
            self.remove_matching(&pattern, "context+subject");
        }
        self
    }

    pub fn remove_by_context_predicate<'a>(
        &mut self,
        context: impl Into<Option<&'a Resource>>,
        predicate: impl Into<Option<&'a NamedNode>>,
    ) -> &mut Self {
        if let (Some(c), Some(p)) = (context.into(), predicate.into()) {
            let pattern = QuadPattern::any().with_context(c).with_predicate(p);
            self.remove_matching(&pattern, "context+predicate");
        }
        self
    }

    pub fn remove_by_context_object<'a>(
        &mut self,
        context: impl Into<Option<&'a Resource>>,
        object: impl Into<Option<&'a Resource>>,
    ) -> &mut Self {
        if let (Some(c), Some(o)) = (context.into(), object.into()) {
            let pattern = QuadPattern::any().with_context(c).with_object(o);
            self.remove_matching(&pattern, "context+object");
        }
        self
    }

    pub fn remove_by_context_literal<'a>(
        &mut self,
        context: impl Into<Option<&'a Resource>>,
        literal: impl Into<Option<&'a Literal>>,
    ) -> &mut Self {
        if let (Some(c), Some(l)) = (context.into(), literal.into()) {
            let pattern = QuadPattern::any().with_context(c).with_literal(l);
            self.remove_matching(&pattern, "context+literal");
        }
        self
    }

    pub fn remove_by_subject_predicate<'a>(
        &mut self,
        subject: impl Into<Option<&'a Resource>>,
        predicate: impl Into<Option<&'a NamedNode>>,
    ) -> &mut Self {
        if let (Some(s), Some(p)) = (subject.into(), predicate.into()) {
            let pattern = QuadPattern::any().with_subject(s).with_predicate(p);
            self.remove_matching(&pattern, "subject+predicate");
        }
        self
    }

    pub fn remove_by_subject_object<'a>(
        &mut self,
        subject: impl Into<Option<&'a Resource>>,
        object: impl Into<Option<&'a Resource>>,
    ) -> &mut Self {
        if let (Some(s), Some(o)) = (subject.into(), object.into()) {
            let pattern = QuadPattern::any().with_subject(s).with_object(o);
            self.remove_matching(&pattern, "subject+object");
        }
        self
    }

    pub fn remove_by_subject_literal<'a>(
        &mut self,
        subject: impl Into<Option<&'a Resource>>,
        literal: impl Into<Option<&'a Literal>>,
    ) -> &mut Self {
        if let (Some(s), Some(l)) = (subject.into(), literal.into()) {
            let pattern = QuadPattern::any().with_subject(s).with_literal(l);
            self.remove_matching(&pattern, "subject+literal");
        }
        self
    }

    pub fn remove_by_predicate_object<'a>(
        &mut self,
        predicate: impl Into<Option<&'a NamedNode>>,
        object: impl Into<Option<&'a Resource>>,
    ) -> &mut Self {
        if let (Some(p), Some(o)) = (predicate.into(), object.into()) {
            let pattern = QuadPattern::any().with_predicate(p).with_object(o);
            self.remove_matching(&pattern, "predicate+object");
        }
        self
    }

    pub fn remove_by_predicate_literal<'a>(
        &mut self,
        predicate: impl Into<Option<&'a NamedNode>>,
        literal: impl Into<Option<&'a Literal>>,
    ) -> &mut Self {
        if let (Some(p), Some(l)) = (predicate.into(), literal.into()) {
            let pattern = QuadPattern::any().with_predicate(p).with_literal(l);
            self.remove_matching(&pattern, "predicate+literal");
        }
        self
    }

    // Contexts and graphs

    /// Distinct contexts of the store, in no particular order
    pub fn extract_contexts(&self) -> Vec<Resource> {
        self.quadruples
            .values()
            .map(|q| q.context().clone())
            .collect::<FxHashSet<_>>()
            .into_iter()
            .collect()
    }

    /// Partition the store into one graph per context
    pub fn extract_graphs(&self) -> Vec<RdfGraph> {
        let mut graphs: IndexMap<&Resource, RdfGraph> = IndexMap::new();
        for quadruple in self.quadruples.values() {
            graphs
                .entry(quadruple.context())
                .or_insert_with(|| RdfGraph::new(quadruple.context().clone()))
                .add_triple(quadruple.as_triple());
        }
        graphs.into_values().collect()
    }

    /// Add one quadruple per triple of the graph, under the graph's context
    pub fn merge_graph<'a>(&mut self, graph: impl Into<Option<&'a RdfGraph>>) -> &mut Self {
        if let Some(graph) = graph.into() {
            let before = self.len();
            for triple in graph.iter() {
                self.add_quadruple(Quadruple::from_triple(graph.context().clone(), triple.clone()));
            }
            debug!(
                "Merged graph {} ({} new quadruples)",
                graph.context(),
                self.len() - before
            );
        }
        self
    }

    // Private helper methods

    pub(crate) fn materialize_pattern(&self, pattern: &QuadPattern<'_>) -> MemoryStore {
        match self.index.candidates(pattern) {
            Candidates::All => self.clone(),
            Candidates::Matching(ids) => ids
                .iter()
                .filter_map(|id| self.quadruples.get(id))
                .cloned()
                .collect(),
        }
    }

    fn remove_matching(&mut self, pattern: &QuadPattern<'_>, dimensions: &str) -> usize {
        let ids = match self.index.candidates(pattern) {
            Candidates::All => self.quadruples.keys().copied().collect(),
            Candidates::Matching(ids) => ids,
        };
        let mut removed = 0;
        for id in ids {
            if let Some(quadruple) = self.quadruples.remove(&id) {
                self.index.remove(&quadruple);
                removed += 1;
            }
        }
        debug!("Removed {} quadruples by {}", removed, dimensions);
        removed
    }
}

/// Stores are equal when they hold the same quadruple set
impl PartialEq for MemoryStore {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.quadruples.keys().all(|id| other.quadruples.contains_key(id))
    }
}

impl Eq for MemoryStore {}

impl FromIterator<Quadruple> for MemoryStore {
    fn from_iter<I: IntoIterator<Item = Quadruple>>(iter: I) -> Self {
        let mut store = MemoryStore::new();
        store.extend(iter);
        store
    }
}

impl Extend<Quadruple> for MemoryStore {
    fn extend<I: IntoIterator<Item = Quadruple>>(&mut self, iter: I) {
        for quadruple in iter {
            self.add_quadruple(quadruple);
        }
    }
}

impl IntoIterator for MemoryStore {
    type Item = Quadruple;
    type IntoIter = std::collections::hash_map::IntoValues<ContentHash, Quadruple>;

    fn into_iter(self) -> Self::IntoIter {
        self.quadruples.into_values()
    }
}

impl<'a> IntoIterator for &'a MemoryStore {
    type Item = &'a Quadruple;
    type IntoIter = std::collections::hash_map::Values<'a, ContentHash, Quadruple>;

    fn into_iter(self) -> Self::IntoIter {
        self.quadruples.values()
    }
}
