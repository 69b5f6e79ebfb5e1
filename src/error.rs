//! Store-level error type shared by every backend

use std::fmt;

/// Errors surfaced by `CategoryStore` / `ProductStore` implementations
#[derive(Debug)]
pub enum StoreError {
    /// Driver error from the underlying document store
    Database(mongodb::error::Error),
    /// Document could not be encoded/decoded
    Codec(String),
    /// Other store errors
    Other(String),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::Database(e) => {
                write!(f, "Database error: {e}")
            }
            StoreError::Codec(s) => {
                write!(f, "Codec error: {s}")
            }
            StoreError::Other(s) => {
                write!(f, "Store error: {s}")
            }
        }
    }
}

impl std::error::Error for StoreError {}

impl From<mongodb::error::Error> for StoreError {
    fn from(err: mongodb::error::Error) -> Self {
        StoreError::Database(err)
    }
}

impl From<mongodb::bson::ser::Error> for StoreError {
    fn from(err: mongodb::bson::ser::Error) -> Self {
        StoreError::Codec(err.to_string())
    }
}

impl From<mongodb::bson::de::Error> for StoreError {
    fn from(err: mongodb::bson::de::Error) -> Self {
        StoreError::Codec(err.to_string())
    }
}
