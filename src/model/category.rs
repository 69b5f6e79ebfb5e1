//! Category document model

use chrono::{DateTime, Utc};
use mongodb::bson::oid::ObjectId;
use mongodb::bson::serde_helpers::chrono_datetime_as_bson_datetime;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::model::ValidationError;

/// Maximum length of `name` and `slug`
pub const MAX_NAME_LEN: usize = 50;
/// Maximum length of `description`
pub const MAX_DESCRIPTION_LEN: usize = 200;

static SLUG_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new("^[a-z0-9-]+$").unwrap()
});

/// A named, sluggable product category
///
/// `slug` is globally unique across the `categories` collection; the catalog
/// service enforces this on create and update.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub name: String,
    pub slug: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default = "default_true")]
    pub active: bool,
    #[serde(default)]
    pub order: i32,
    #[serde(with = "chrono_datetime_as_bson_datetime")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "chrono_datetime_as_bson_datetime")]
    pub updated_at: DateTime<Utc>,
}

fn default_true() -> bool {
    true
}

impl Category {
    /// Create a new active category with a fresh id and current timestamps
    pub fn new(name: impl Into<String>, slug: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: ObjectId::new(),
            name: name.into(),
            slug: slug.into(),
            description: None,
            active: true,
            order: 0,
            created_at: now,
            updated_at: now,
        }
    }

    /// Validate field-level rules
    ///
    /// # Errors
    ///
    /// Returns the first violated rule: blank/overlong `name`, blank/overlong
    /// or malformed `slug`, or an overlong `description`.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::MissingField("name"));
        }
        if self.name.len() > MAX_NAME_LEN {
            return Err(ValidationError::TooLong {
                field: "name",
                max: MAX_NAME_LEN,
            });
        }
        if self.slug.is_empty() {
            return Err(ValidationError::MissingField("slug"));
        }
        if self.slug.len() > MAX_NAME_LEN {
            return Err(ValidationError::TooLong {
                field: "slug",
                max: MAX_NAME_LEN,
            });
        }
        if !SLUG_RE.is_match(&self.slug) {
            return Err(ValidationError::InvalidSlug(self.slug.clone()));
        }
        if let Some(description) = &self.description {
            if description.len() > MAX_DESCRIPTION_LEN {
                return Err(ValidationError::TooLong {
                    field: "description",
                    max: MAX_DESCRIPTION_LEN,
                });
            }
        }
        Ok(())
    }
}

/// Derive a slug from a display name.
///
/// Lowercases, strips everything outside `[a-z0-9 -]`, turns whitespace runs
/// into hyphens, collapses repeated hyphens and trims leading/trailing ones.
#[must_use]
pub fn derive_slug(name: &str) -> String {
    let lowered = name.to_lowercase();

    let mut cleaned = String::with_capacity(lowered.len());
    for ch in lowered.chars() {
        if ch.is_ascii_lowercase() || ch.is_ascii_digit() || ch == ' ' || ch == '-' {
            cleaned.push(ch);
        }
    }

    let mut slug = String::with_capacity(cleaned.len());
    let mut prev_hyphen = false;
    for ch in cleaned.trim().chars() {
        let ch = if ch == ' ' { '-' } else { ch };
        if ch == '-' {
            if prev_hyphen {
                continue;
            }
            prev_hyphen = true;
        } else {
            prev_hyphen = false;
        }
        slug.push(ch);
    }

    slug.trim_matches('-').to_string()
}
