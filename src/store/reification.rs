//! Reification and unreification of quadruples

use super::memory::MemoryStore;
use crate::index::QuadPattern;
use crate::model::vocab::{self, rdf};
use crate::model::{BlankNode, Quadruple, Resource};
use tracing::debug;

impl MemoryStore {
    /// Encode a quadruple as four statements about a fresh blank resource
    ///
    /// The statements live in the quadruple's own context.
    pub fn reify_quadruple(quadruple: &Quadruple) -> MemoryStore {
        let statement = Resource::from(BlankNode::new());
        let context = quadruple.context();

        MemoryStore::from_quadruples([
            Quadruple::new(
                context.clone(),
                statement.clone(),
                vocab::term(rdf::TYPE),
                vocab::term(rdf::STATEMENT),
            ),
            Quadruple::new(
                context.clone(),
                statement.clone(),
                vocab::term(rdf::SUBJECT),
                quadruple.subject().clone(),
            ),
            Quadruple::new(
                context.clone(),
                statement.clone(),
                vocab::term(rdf::PREDICATE),
                quadruple.predicate().clone(),
            ),
            Quadruple::new(
                context.clone(),
                statement,
                vocab::term(rdf::OBJECT),
                quadruple.object().clone(),
            ),
        ])
    }

    /// Union of the reification of every quadruple in the store
    pub fn reify_quadruples(&self) -> MemoryStore {
        let mut result = MemoryStore::new();
        for quadruple in self.iter() {
            result.extend(Self::reify_quadruple(quadruple));
        }
        result
    }

    /// Replace every complete reification pattern with the quadruple it encodes
    ///
    /// A pattern is a blank resource typed `rdf:Statement` in some context,
    /// with exactly one `rdf:subject` (a resource), one `rdf:predicate`
    /// (a named node) and one `rdf:object` in that same context. Incomplete
    /// or ambiguous patterns are left untouched.
    pub fn unreify_quadruples(&mut self) -> &mut Self {
        let rdf_type = vocab::term(rdf::TYPE);
        let statement = Resource::from(vocab::term(rdf::STATEMENT));
        let typed = QuadPattern::any()
            .with_predicate(&rdf_type)
            .with_object(&statement);
        let candidates: Vec<Quadruple> = self
            .materialize_pattern(&typed)
            .iter()
            .filter(|q| q.subject().is_blank_node())
            .cloned()
            .collect();

        let mut unreified = 0;
        for type_statement in candidates {
            if let Some((quadruple, statements)) = self.reconstruct(&type_statement) {
                self.remove_quadruple(&type_statement);
                for statement in &statements {
                    self.remove_quadruple(statement);
                }
                self.add_quadruple(quadruple);
                unreified += 1;
            }
        }
        debug!("Unreified {} statements", unreified);
        self
    }

    // Private helper methods

    /// Rebuild the quadruple described by the blank subject of `type_statement`,
    /// along with the three statements that describe it
    fn reconstruct(&self, type_statement: &Quadruple) -> Option<(Quadruple, [Quadruple; 3])> {
        let context = type_statement.context();
        let reifier = type_statement.subject();

        let subject = self.single_value(context, reifier, rdf::SUBJECT)?;
        let predicate = self.single_value(context, reifier, rdf::PREDICATE)?;
        let object = self.single_value(context, reifier, rdf::OBJECT)?;

        let subject_resource = subject.object_resource()?.clone();
        let predicate_node = predicate.object_resource()?.as_named_node()?.clone();
        let quadruple = Quadruple::new(
            context.clone(),
            subject_resource,
            predicate_node,
            object.object().clone(),
        );
        Some((quadruple, [subject, predicate, object]))
    }

    fn single_value(&self, context: &Resource, reifier: &Resource, property: &'static str) -> Option<Quadruple> {
        let property = vocab::term(property);
        let pattern = QuadPattern::any()
            .with_context(context)
            .with_subject(reifier)
            .with_predicate(&property);
        let matches = self.materialize_pattern(&pattern);
        if matches.len() != 1 {
            return None;
        }
        let first = matches.iter().next().cloned();
        first
    }
}
