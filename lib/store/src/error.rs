use thiserror::Error;

pub type Result<T> = std::result::Result<T, StoreError>;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("key '{key}' holds a different structure type")]
    WrongType { key: String },

    #[error("transport error: {0}")]
    Transport(String),
}
