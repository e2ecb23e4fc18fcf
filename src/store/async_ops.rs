//! Asynchronous duals of the store operations
//!
//! Each method yields once to the tokio scheduler and then runs its
//! synchronous counterpart. Results are identical; nothing is parallelized
//! and no lock is taken.

use super::error::StoreResult;
use super::memory::MemoryStore;
use crate::graph::RdfGraph;
use crate::model::{Literal, NamedNode, Quadruple, Resource};
use tokio::task::yield_now;

impl MemoryStore {
    pub async fn add_quadruple_async(&mut self, quadruple: impl Into<Option<Quadruple>>) -> &mut Self {
        yield_now().await;
        self.add_quadruple(quadruple)
    }

    pub async fn remove_quadruple_async<'a>(
        &mut self,
        quadruple: impl Into<Option<&'a Quadruple>>,
    ) -> &mut Self {
        yield_now().await;
        self.remove_quadruple(quadruple)
    }

    pub async fn contains_quadruple_async<'a>(&self, quadruple: impl Into<Option<&'a Quadruple>>) -> bool {
        yield_now().await;
        self.contains_quadruple(quadruple)
    }

    pub async fn clear_quadruples_async(&mut self) -> &mut Self {
        yield_now().await;
        self.clear_quadruples()
    }

    pub async fn select_async(
        &self,
        context: Option<&Resource>,
        subject: Option<&Resource>,
        predicate: Option<&NamedNode>,
        object: Option<&Resource>,
        literal: Option<&Literal>,
    ) -> StoreResult<MemoryStore> {
        yield_now().await;
        self.select(context, subject, predicate, object, literal)
    }

    pub async fn select_by_context_async<'a>(&self, context: impl Into<Option<&'a Resource>>) -> MemoryStore {
        yield_now().await;
        self.select_by_context(context)
    }

    pub async fn select_by_subject_async<'a>(&self, subject: impl Into<Option<&'a Resource>>) -> MemoryStore {
        yield_now().await;
        self.select_by_subject(subject)
    }

    pub async fn select_by_predicate_async<'a>(
        &self,
        predicate: impl Into<Option<&'a NamedNode>>,
    ) -> MemoryStore {
        yield_now().await;
        self.select_by_predicate(predicate)
    }

    pub async fn select_by_object_async<'a>(&self, object: impl Into<Option<&'a Resource>>) -> MemoryStore {
        yield_now().await;
        self.select_by_object(object)
    }

    pub async fn select_by_literal_async<'a>(&self, literal: impl Into<Option<&'a Literal>>) -> MemoryStore {
        yield_now().await;
        self.select_by_literal(literal)
    }

    // Removers

    pub async fn remove_by_context_async<'a>(&mut self, context: impl Into<Option<&'a Resource>>) -> &mut Self {
        yield_now().await;
        self.remove_by_context(context)
    }

    pub async fn remove_by_subject_async<'a>(&mut self, subject: impl Into<Option<&'a Resource>>) -> &mut Self {
        yield_now().await;
        self.remove_by_subject(subject)
    }

    pub async fn remove_by_predicate_async<'a>(
        &mut self,
        predicate: impl Into<Option<&'a NamedNode>>,
    ) -> &mut Self {
        yield_now().await;
        self.remove_by_predicate(predicate)
    }

    pub async fn remove_by_object_async<'a>(&mut self, object: impl Into<Option<&'a Resource>>) -> &mut Self {
        yield_now().await;
        self.remove_by_object(object)
    }

    pub async fn remove_by_literal_async<'a>(&mut self, literal: impl Into<Option<&'a Literal>>) -> &mut Self {
        yield_now().await;
        self.remove_by_literal(literal)
    }

    pub async fn remove_by_context_subject_async<'a>(
        &mut self,
        context: impl Into<Option<&'a Resource>>,
        subject: impl Into<Option<&'a Resource>>,
    ) -> &mut Self {
        yield_now().await;
        self.remove_by_context_subject(context, subject)
    }

    pub async fn remove_by_context_predicate_async<'a>(
        &mut self,
        context: impl Into<Option<&'a Resource>>,
        predicate: impl Into<Option<&'a NamedNode>>,
    ) -> &mut Self {
        yield_now().await;
        self.remove_by_context_predicate(context, predicate)
    }

    pub async fn remove_by_context_object_async<'a>(
        &mut self,
        context: impl Into<Option<&'a Resource>>,
        object: impl Into<Option<&'a Resource>>,
    ) -> &mut Self {
        yield_now().await;
        self.remove_by_context_object(context, object)
    }

    pub async fn remove_by_context_literal_async<'a>(
        &mut self,
        context: impl Into<Option<&'a Resource>>,
        literal: impl Into<Option<&'a Literal>>,
    ) -> &mut Self {
        yield_now().await;
        self.remove_by_context_literal(context, literal)
    }

    pub async fn remove_by_subject_predicate_async<'a>(
        &mut self,
        subject: impl Into<Option<&'a Resource>>,
        predicate: impl Into<Option<&'a NamedNode>>,
    ) -> &mut Self {
        yield_now().await;
        self.remove_by_subject_predicate(subject, predicate)
    }

    pub async fn remove_by_subject_object_async<'a>(
        &mut self,
        subject: impl Into<Option<&'a Resource>>,
        object: impl Into<Option<&'a Resource>>,
    ) -> &mut Self {
        yield_now().await;
        self.remove_by_subject_object(subject, object)
    }

    pub async fn remove_by_subject_literal_async<'a>(
        &mut self,
        subject: impl Into<Option<&'a Resource>>,
        literal: impl Into<Option<&'a Literal>>,
    ) -> &mut Self {
        yield_now().await;
        self.remove_by_subject_literal(subject, literal)
    }

    pub async fn remove_by_predicate_object_async<'a>(
        &mut self,
        predicate: impl Into<Option<&'a NamedNode>>,
        object: impl Into<Option<&'a Resource>>,
    ) -> &mut Self {
        yield_now().await;
        self.remove_by_predicate_object(predicate, object)
    }

    pub async fn remove_by_predicate_literal_async<'a>(
        &mut self,
        predicate: impl Into<Option<&'a NamedNode>>,
        literal: impl Into<Option<&'a Literal>>,
    ) -> &mut Self {
        yield_now().await;
        self.remove_by_predicate_literal(predicate, literal)
    }

    // Set algebra

    pub async fn intersect_with_async<'a>(&self, other: impl Into<Option<&'a MemoryStore>>) -> MemoryStore {
        yield_now().await;
        self.intersect_with(other)
    }

    pub async fn union_with_async<'a>(&self, other: impl Into<Option<&'a MemoryStore>>) -> MemoryStore {
        yield_now().await;
        self.union_with(other)
    }

    pub async fn difference_with_async<'a>(&self, other: impl Into<Option<&'a MemoryStore>>) -> MemoryStore {
        yield_now().await;
        self.difference_with(other)
    }

    // Contexts, graphs and reification

    pub async fn extract_contexts_async(&self) -> Vec<Resource> {
        yield_now().await;
        self.extract_contexts()
    }

    pub async fn extract_graphs_async(&self) -> Vec<RdfGraph> {
        yield_now().await;
        self.extract_graphs()
    }

    pub async fn merge_graph_async<'a>(&mut self, graph: impl Into<Option<&'a RdfGraph>>) -> &mut Self {
        yield_now().await;
        self.merge_graph(graph)
    }

    pub async fn reify_quadruple_async(quadruple: &Quadruple) -> MemoryStore {
        yield_now().await;
        Self::reify_quadruple(quadruple)
    }

    pub async fn reify_quadruples_async(&self) -> MemoryStore {
        yield_now().await;
        self.reify_quadruples()
    }

    pub async fn unreify_quadruples_async(&mut self) -> &mut Self {
        yield_now().await;
        self.unreify_quadruples()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quad(s: &str) -> Quadruple {
        Quadruple::new(
            NamedNode::new("http://example.org/ctx").unwrap(),
            NamedNode::new(s).unwrap(),
            NamedNode::new("http://example.org/p").unwrap(),
            Literal::new_simple_literal("v"),
        )
    }

    #[tokio::test]
    async fn test_async_matches_sync() {
        let mut store = MemoryStore::new();
        store
            .add_quadruple_async(quad("http://example.org/a"))
            .await
            .add_quadruple(quad("http://example.org/b"));
        assert!(store.contains_quadruple_async(&quad("http://example.org/a")).await);

        let subject = Resource::parse("http://example.org/a").unwrap();
        let selected = store.select_by_subject_async(&subject).await;
        assert_eq!(selected, store.select_by_subject(&subject));

        store.remove_by_subject_async(&subject).await;
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn test_async_reification_round_trip() {
        let store = MemoryStore::from_quadruples(vec![quad("http://example.org/a")]);
        let mut reified = store.reify_quadruples_async().await;
        reified.unreify_quadruples_async().await;
        assert_eq!(reified, store);
    }
}
