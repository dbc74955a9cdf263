//! # redmap Store
//!
//! Primitive store adapters for the redmap object mapper.
//!
//! The mapper core decomposes objects into operations against three small
//! remote data structures, each behind its own trait here:
//!
//! - [`HashStore`] - a flat field -> string map with multi-field set/get
//! - [`SortedSetStore`] - an ordered collection of members carrying a
//!   numeric score
//! - [`KvStore`] - plain string keys
//!
//! Implementations wrap whatever transport actually talks to the remote
//! server. [`MemoryStore`] is the embedded backend used throughout the
//! test suite; it keeps the same per-key structure typing a real server
//! enforces, so structure clashes surface as [`StoreError::WrongType`]
//! rather than silently succeeding.
//!
//! The [`hash`] and [`sorted_set`] modules also expose a `SUFFIX` constant
//! naming the physical namespace their keys live in (`HASH`, `ZSET`).
//! Callers that opt into namespaced keys append it to the logical key.

pub mod error;
pub mod hash;
pub mod kv;
pub mod memory;
pub mod sorted_set;

pub use error::{Result, StoreError};
pub use hash::HashStore;
pub use kv::KvStore;
pub use memory::MemoryStore;
pub use sorted_set::SortedSetStore;
