//! Domain models for the catalog
//!
//! [`Category`] and [`Product`] mirror the documents persisted in the
//! `categories` and `products` collections. Field-level rules (required
//! fields, length limits, slug shape) live here so every write path shares
//! one validation surface.

pub mod category;
pub mod product;

pub use category::{derive_slug, Category};
pub use product::{CategoryRef, Product};

use std::fmt;

/// Field-level validation errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// A required field is missing or blank
    MissingField(&'static str),
    /// A field exceeds its maximum length
    TooLong { field: &'static str, max: usize },
    /// Slug contains characters outside `a-z`, `0-9`, `-`
    InvalidSlug(String),
    /// Product has no usable feature entries
    NoFeatures,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::MissingField(field) => {
                write!(f, "Field '{field}' is required")
            }
            ValidationError::TooLong { field, max } => {
                write!(f, "Field '{field}' cannot exceed {max} characters")
            }
            ValidationError::InvalidSlug(slug) => {
                write!(
                    f,
                    "Slug '{slug}' may only contain lowercase letters, digits and hyphens"
                )
            }
            ValidationError::NoFeatures => {
                write!(f, "Product must have at least one feature")
            }
        }
    }
}

impl std::error::Error for ValidationError {}
