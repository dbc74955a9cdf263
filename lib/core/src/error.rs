use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("cannot infer a type for field '{field}': {reason}")]
    Schema { field: String, reason: String },

    #[error("field '{field}' ({kind}) is not covered by the current schema")]
    FieldMismatch { field: String, kind: String },

    #[error("no schema bound; write an object or set a schema before reading")]
    UninitializedSchema,

    #[error("a schema must define at least one field")]
    InvalidSchema,

    #[error("expected an object value, got: {kind}")]
    NotAnObject { kind: String },

    #[error("store error: {0}")]
    Store(#[from] redmap_store::StoreError),
}
