//! RDF data model for the quadruple store
//!
//! - [`Term`]: a resource (IRI or blank node) or a literal
//! - [`Triple`] and [`Quadruple`]: statements without and with a context
//! - [`ContentHash`]: deterministic hash over canonical string forms, used
//!   as the key of every map in the store and its index

pub mod hash;
pub mod quadruple;
pub mod term;
pub mod vocab;

pub use hash::ContentHash;
pub use quadruple::{Quadruple, QuadrupleFlavor, Triple};
pub use term::{BlankNode, Literal, NamedNode, Resource, Term, TermError, TermResult};
