//! Hash-bucket index over the five quadruple dimensions
//!
//! Each dimension maps a term's content hash to the set of quadruple
//! identity hashes holding that term in that position. Buckets are created
//! on first insert and dropped as soon as they become empty, so the index
//! is a pure function of the indexed quadruple set.

use super::pattern::QuadPattern;
use crate::model::{ContentHash, Quadruple, Term};
use rustc_hash::{FxHashMap, FxHashSet};

/// Set of quadruple identity hashes sharing one term in one position
pub type Bucket = FxHashSet<ContentHash>;

type BucketMap = FxHashMap<ContentHash, Bucket>;

/// Indexed quadruple position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IndexDimension {
    Context,
    Subject,
    Predicate,
    Object,
    Literal,
}

impl IndexDimension {
    pub const ALL: [IndexDimension; 5] = [
        IndexDimension::Context,
        IndexDimension::Subject,
        IndexDimension::Predicate,
        IndexDimension::Object,
        IndexDimension::Literal,
    ];
}

/// Result of an index lookup
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Candidates {
    /// No constraint was given: every indexed quadruple matches
    All,
    /// Intersection of the constrained buckets (possibly empty)
    Matching(Bucket),
}

/// Index over context, subject, predicate, object and literal
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StoreIndex {
    contexts: BucketMap,
    subjects: BucketMap,
    predicates: BucketMap,
    objects: BucketMap,
    literals: BucketMap,
}

impl StoreIndex {
    /// Create a new empty index
    pub fn new() -> Self {
        Self::default()
    }

    /// Build an index from scratch over a set of quadruples
    pub fn from_quadruples<'a>(quadruples: impl IntoIterator<Item = &'a Quadruple>) -> Self {
        let mut index = Self::new();
        for quadruple in quadruples {
            index.add(quadruple);
        }
        index
    }

    /// Index a quadruple in all five dimensions
    ///
    /// Does not deduplicate: callers only add quadruples they do not hold yet.
    pub fn add(&mut self, quadruple: &Quadruple) -> &mut Self {
        let id = quadruple.id();
        for (dimension, key) in Self::keys(quadruple) {
            self.map_mut(dimension).entry(key).or_default().insert(id);
        }
        self
    }

    /// Remove a quadruple from all five dimensions, dropping emptied buckets
    pub fn remove(&mut self, quadruple: &Quadruple) -> &mut Self {
        let id = quadruple.id();
        for (dimension, key) in Self::keys(quadruple) {
            let map = self.map_mut(dimension);
            if let Some(bucket) = map.get_mut(&key) {
                bucket.remove(&id);
                if bucket.is_empty() {
                    map.remove(&key);
                }
            }
        }
        self
    }

    /// Clear all five dimensions
    pub fn clear(&mut self) {
        self.contexts.clear();
        self.subjects.clear();
        self.predicates.clear();
        self.objects.clear();
        self.literals.clear();
    }

    /// Intersect the buckets of every constrained position
    ///
    /// An absent bucket is an empty set, so any unknown term empties the
    /// result. The intersection starts from the smallest bucket.
    pub fn candidates(&self, pattern: &QuadPattern<'_>) -> Candidates {
        if pattern.is_unbound() {
            return Candidates::All;
        }
        let mut constraints: Vec<(IndexDimension, ContentHash)> = Vec::with_capacity(5);
        if let Some(c) = pattern.context {
            constraints.push((IndexDimension::Context, c.content_hash()));
        }
        if let Some(s) = pattern.subject {
            constraints.push((IndexDimension::Subject, s.content_hash()));
        }
        if let Some(p) = pattern.predicate {
            constraints.push((IndexDimension::Predicate, p.content_hash()));
        }
        if let Some(o) = pattern.object {
            constraints.push((IndexDimension::Object, o.content_hash()));
        }
        if let Some(l) = pattern.literal {
            constraints.push((IndexDimension::Literal, l.content_hash()));
        }
        let mut buckets = Vec::with_capacity(constraints.len());
        for (dimension, key) in constraints {
            match self.bucket(dimension, &key) {
                Some(bucket) => buckets.push(bucket),
                None => return Candidates::Matching(Bucket::default()),
            }
        }
        buckets.sort_by_key(|bucket| bucket.len());

        let (smallest, rest) = buckets.split_at(1);
        let matching = smallest[0]
            .iter()
            .filter(|id| rest.iter().all(|bucket| bucket.contains(*id)))
            .copied()
            .collect();
        Candidates::Matching(matching)
    }

    /// Bucket of a term hash in one dimension
    pub fn bucket(&self, dimension: IndexDimension, term_hash: &ContentHash) -> Option<&Bucket> {
        self.map(dimension).get(term_hash)
    }

    /// Number of distinct terms indexed in one dimension
    pub fn bucket_count(&self, dimension: IndexDimension) -> usize {
        self.map(dimension).len()
    }

    /// True when every dimension is empty
    pub fn is_empty(&self) -> bool {
        IndexDimension::ALL
            .iter()
            .all(|dimension| self.map(*dimension).is_empty())
    }

    // Private helper methods

    fn keys(quadruple: &Quadruple) -> [(IndexDimension, ContentHash); 4] {
        let object_key = match quadruple.object() {
            Term::Resource(r) => (IndexDimension::Object, r.content_hash()),
            Term::Literal(l) => (IndexDimension::Literal, l.content_hash()),
        };
        [
            (IndexDimension::Context, quadruple.context().content_hash()),
            (IndexDimension::Subject, quadruple.subject().content_hash()),
            (IndexDimension::Predicate, quadruple.predicate().content_hash()),
            object_key,
        ]
    }

    fn map(&self, dimension: IndexDimension) -> &BucketMap {
        match dimension {
            IndexDimension::Context => &self.contexts,
            IndexDimension::Subject => &self.subjects,
            IndexDimension::Predicate => &self.predicates,
            IndexDimension::Object => &self.objects,
            IndexDimension::Literal => &self.literals,
        }
    }

    fn map_mut(&mut self, dimension: IndexDimension) -> &mut BucketMap {
        match dimension {
            IndexDimension::Context => &mut self.contexts,
            IndexDimension::Subject => &mut self.subjects,
            IndexDimension::Predicate => &mut self.predicates,
            IndexDimension::Object => &mut self.objects,
            IndexDimension::Literal => &mut self.literals,
        }
    }
}
