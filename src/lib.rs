//! # redmap
//!
//! A schema-driven object mapper over flat-map and sorted-set key-value
//! stores.
//!
//! redmap decomposes nested application objects into a handful of
//! primitive remote structures - flat string maps for scalars, ordered
//! member sets for arrays - and reassembles the original object shape on
//! read. The schema driving both directions is either supplied up front
//! or inferred from the first object written.
//!
//! ## Quick Start
//!
//! ```rust
//! use std::sync::Arc;
//! use redmap::prelude::*;
//! use serde_json::json;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> redmap::Result<()> {
//! let mapper = Mapper::new(Arc::new(MemoryStore::new()));
//!
//! // First write infers and binds the schema.
//! mapper
//!     .add("user:1", &json!({ "name": "ada", "age": 36, "tags": ["math"] }))
//!     .await?;
//!
//! let user = mapper.get("user:1").await?;
//! assert_eq!(user["name"], "ada");
//! assert_eq!(user["age"], 36);
//! # Ok(())
//! # }
//! ```
//!
//! ## Crate Structure
//!
//! redmap is composed of two crates:
//!
//! - [`redmap-core`](https://docs.rs/redmap-core) - schema inference,
//!   object encoding and decoding, the mapper façade
//! - [`redmap-store`](https://docs.rs/redmap-store) - the primitive
//!   store traits and the embedded in-memory backend
//!
//! ## Features
//!
//! - **Schema Inference**: bind a schema from the first object written
//! - **Recursive Decomposition**: nested objects and arrays of objects
//!   under deterministically derived keys
//! - **Typed Reads**: per-field coercion back to ints, floats, booleans,
//!   strings, and `{value, score}` pairs
//! - **Pluggable Stores**: async traits over the flat-map and
//!   ordered-collection primitives

// Re-export core types
pub use redmap_core::{decode, encode, Error, FieldType, Mapper, Result, Schema, WriteOp};

// Re-export store traits and the embedded backend
pub use redmap_store::{HashStore, KvStore, MemoryStore, SortedSetStore, StoreError};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        Error, FieldType, HashStore, KvStore, Mapper, MemoryStore, Result, Schema,
        SortedSetStore, WriteOp,
    };
}
