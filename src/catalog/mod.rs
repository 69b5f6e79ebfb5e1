//! Admin catalog services
//!
//! CRUD-level operations over the persistence ports, carrying the
//! validation, uniqueness and referential guards the admin dashboard relies
//! on.

pub mod categories;
pub mod products;

use std::fmt;

use crate::error::StoreError;
use crate::model::ValidationError;

/// Errors surfaced by the catalog services
#[derive(Debug)]
pub enum CatalogError {
    /// A field-level rule was violated
    Validation(ValidationError),
    /// Persistence failure
    Store(StoreError),
    /// Another category already owns this slug
    DuplicateSlug(String),
    /// The addressed document does not exist
    NotFound(String),
    /// The category still has products referencing it
    CategoryInUse { count: u64 },
}

impl fmt::Display for CatalogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CatalogError::Validation(e) => {
                write!(f, "Validation error: {e}")
            }
            CatalogError::Store(e) => {
                write!(f, "{e}")
            }
            CatalogError::DuplicateSlug(slug) => {
                write!(f, "A category with slug '{slug}' already exists")
            }
            CatalogError::NotFound(what) => {
                write!(f, "{what} not found")
            }
            CatalogError::CategoryInUse { count } => {
                write!(
                    f,
                    "Category cannot be deleted: {count} product(s) still reference it. \
                     Delete or reassign those products first."
                )
            }
        }
    }
}

impl std::error::Error for CatalogError {}

impl From<ValidationError> for CatalogError {
    fn from(err: ValidationError) -> Self {
        CatalogError::Validation(err)
    }
}

impl From<StoreError> for CatalogError {
    fn from(err: StoreError) -> Self {
        CatalogError::Store(err)
    }
}
