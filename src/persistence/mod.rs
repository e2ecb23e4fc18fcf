//! Persistence bridge
//!
//! Moves stores in and out of the quad-capable wire formats (N-Quads, TriX,
//! TriG) and the four-column tabular form. Export always orders quadruples
//! by context, subject, predicate and object, and always writes explicit
//! graph names.

pub mod format;
pub mod parser;
pub mod rio;
pub mod serializer;
pub mod table;
pub mod trix;

pub use format::RdfFormat;
pub use parser::QuadParser;
pub use serializer::QuadSerializer;
pub use table::{QuadRow, QuadTable, TABLE_COLUMNS};

use crate::model::Quadruple;
use crate::store::{MemoryStore, StoreError};
use std::fmt::Display;

/// Quadruples of a store in export order
pub(crate) fn sorted(store: &MemoryStore) -> Vec<&Quadruple> {
    let mut quadruples: Vec<&Quadruple> = store.iter().collect();
    quadruples.sort_by_cached_key(|q| {
        (
            q.context().to_string(),
            q.subject().to_string(),
            q.predicate().as_str().to_string(),
            q.object().to_string(),
        )
    });
    quadruples
}

pub(crate) fn invalid_source(location: impl Display, reason: impl Display) -> StoreError {
    StoreError::InvalidSource {
        location: location.to_string(),
        reason: reason.to_string(),
    }
}
