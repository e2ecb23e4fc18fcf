//! In-memory quadruple store
//!
//! [`MemoryStore`] owns an identity map (quadruple hash -> quadruple) and a
//! [`StoreIndex`](crate::index::StoreIndex). Every mutation updates both
//! together. There is no internal locking: callers that share a store
//! across tasks wrap it themselves.

mod algebra;
mod async_ops;
mod error;
mod memory;
mod reification;

pub use error::{StoreError, StoreResult};
pub use memory::MemoryStore;
