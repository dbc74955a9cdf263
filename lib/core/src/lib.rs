//! # redmap Core
//!
//! Core library for the redmap object mapper.
//!
//! This crate turns nested application objects into operations against
//! two primitive remote structures - flat string maps and score-ordered
//! member sets - and turns those structures back into objects on read:
//!
//! - [`Schema`] / [`FieldType`] - the recursive descriptor driving both
//!   directions, inferred from a sample object or supplied by the caller
//! - [`encode`] - decompose an object into a batch of pending writes
//! - [`decode`] - reissue the derived keys and reassemble the object
//! - [`Mapper`] - façade holding the current schema
//!
//! ## Example
//!
//! ```rust
//! use redmap_core::{FieldType, Schema};
//! use serde_json::json;
//!
//! let schema = Schema::infer(&json!({
//!     "name": "ada",
//!     "age": 36,
//!     "tags": ["math", "engines"],
//! }))
//! .unwrap();
//!
//! assert_eq!(schema.get("name"), Some(&FieldType::String));
//! assert_eq!(schema.get("age"), Some(&FieldType::Int));
//! assert_eq!(schema.get("tags"), Some(&FieldType::Array));
//! ```

pub mod decode;
pub mod encode;
pub mod error;
pub mod key;
pub mod mapper;
pub mod schema;

pub use decode::decode;
pub use encode::{encode, WriteOp};
pub use error::{Error, Result};
pub use mapper::Mapper;
pub use schema::{FieldType, Schema};
