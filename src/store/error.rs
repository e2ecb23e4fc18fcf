//! Store error types

use crate::model::TermError;
use thiserror::Error;

/// Contract violations raised by the store and its import/export bridge
///
/// Malformed terms keep their own [`TermError`] and pass through unchanged.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Object and literal were both constrained in a pattern
    #[error("Object and literal are mutually exclusive in a quadruple pattern")]
    ObjectAndLiteralConflict,

    /// Tabular import with the wrong columns
    #[error("Invalid table schema: expected columns {expected:?}, found {found:?}")]
    InvalidTableSchema {
        expected: Vec<String>,
        found: Vec<String>,
    },

    /// Tabular import row with a missing or ill-placed value
    #[error("Invalid row {row}: {reason}")]
    InvalidRow { row: usize, reason: String },

    /// Unreadable file, stream or URI
    #[error("Invalid source {location}: {reason}")]
    InvalidSource { location: String, reason: String },

    /// I/O error while writing
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// N-Quads / TriG syntax error
    #[error("Syntax error: {0}")]
    Syntax(#[from] rio_turtle::TurtleError),

    /// TriX document error
    #[error("XML error: {0}")]
    Xml(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialize(String),

    /// Malformed term, propagated from the model layer
    #[error(transparent)]
    Term(#[from] TermError),
}

pub type StoreResult<T> = Result<T, StoreError>;
