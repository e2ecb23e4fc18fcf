//! Quadruple indexing module
//!
//! Five hash-bucket maps (context, subject, predicate, object, literal) from
//! a term's content hash to the identity hashes of the quadruples holding
//! that term in that position.

pub mod pattern;
pub mod store_index;

pub use pattern::QuadPattern;
pub use store_index::{Bucket, Candidates, IndexDimension, StoreIndex};
