//! Product document model and the category reference field

use chrono::{DateTime, Utc};
use mongodb::bson::oid::ObjectId;
use mongodb::bson::serde_helpers::chrono_datetime_as_bson_datetime;
use mongodb::bson::Bson;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::model::ValidationError;

/// Maximum length of `title`
pub const MAX_TITLE_LEN: usize = 100;
/// Maximum length of `subtitle`
pub const MAX_SUBTITLE_LEN: usize = 150;
/// Maximum length of `description`
pub const MAX_PRODUCT_DESCRIPTION_LEN: usize = 500;

/// The product's category field as persisted in the store.
///
/// During the legacy-to-reference migration this field is untyped at the
/// storage layer: old documents hold a slug string, migrated documents hold
/// an ObjectId. The distinction is resolved exactly once, when the document
/// is decoded; the rest of the codebase matches on the tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CategoryRef {
    /// Normalized reference to a `Category` document
    Id(ObjectId),
    /// Legacy hardcoded category code
    Slug(String),
}

impl CategoryRef {
    /// Classify a raw string value.
    ///
    /// A string that parses as a 24-hex-char ObjectId counts as a reference:
    /// some writers persisted the id as its hex form rather than a native
    /// ObjectId. No legacy category code has that shape.
    #[must_use]
    pub fn from_raw(raw: &str) -> Self {
        match ObjectId::parse_str(raw) {
            Ok(id) => CategoryRef::Id(id),
            Err(_) => CategoryRef::Slug(raw.to_string()),
        }
    }

    /// Resolved reference id, if migrated
    #[must_use]
    pub fn as_id(&self) -> Option<&ObjectId> {
        match self {
            CategoryRef::Id(id) => Some(id),
            CategoryRef::Slug(_) => None,
        }
    }

    /// Legacy slug, if not yet migrated
    #[must_use]
    pub fn as_slug(&self) -> Option<&str> {
        match self {
            CategoryRef::Id(_) => None,
            CategoryRef::Slug(slug) => Some(slug),
        }
    }
}

impl Serialize for CategoryRef {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            CategoryRef::Id(id) => id.serialize(serializer),
            CategoryRef::Slug(slug) => serializer.serialize_str(slug),
        }
    }
}

impl<'de> Deserialize<'de> for CategoryRef {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Bson::deserialize(deserializer)?;
        match value {
            Bson::ObjectId(id) => Ok(CategoryRef::Id(id)),
            Bson::String(raw) => Ok(CategoryRef::from_raw(&raw)),
            other => Err(D::Error::custom(format!(
                "category must be an ObjectId or a string, got {:?}",
                other.element_type()
            ))),
        }
    }
}

/// A catalog entry referencing exactly one category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    pub description: String,
    pub price: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_price: Option<String>,
    #[serde(default = "default_period")]
    pub period: String,
    #[serde(default)]
    pub features: Vec<String>,
    #[serde(default)]
    pub icon: String,
    #[serde(default = "default_color")]
    pub color: String,
    pub category: CategoryRef,
    #[serde(default)]
    pub popular: bool,
    #[serde(default)]
    pub featured: bool,
    #[serde(default = "default_true")]
    pub active: bool,
    #[serde(default)]
    pub order: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub badge: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discount: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(with = "chrono_datetime_as_bson_datetime")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "chrono_datetime_as_bson_datetime")]
    pub updated_at: DateTime<Utc>,
}

fn default_period() -> String {
    "/mes".to_string()
}

fn default_color() -> String {
    "from-blue-500 to-blue-600".to_string()
}

fn default_true() -> bool {
    true
}

impl Product {
    /// Create a new active product with a fresh id and current timestamps
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        price: impl Into<String>,
        category: CategoryRef,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: ObjectId::new(),
            title: title.into(),
            subtitle: None,
            description: description.into(),
            price: price.into(),
            original_price: None,
            period: default_period(),
            features: Vec::new(),
            icon: String::new(),
            color: default_color(),
            category,
            popular: false,
            featured: false,
            active: true,
            order: 0,
            badge: None,
            discount: None,
            href: None,
            image: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Drop whitespace-only feature entries, preserving order
    pub fn clean_features(&mut self) {
        self.features.retain(|feature| !feature.trim().is_empty());
    }

    /// Validate field-level rules
    ///
    /// # Errors
    ///
    /// Returns the first violated rule. Call [`Product::clean_features`]
    /// first; a list that is empty after cleanup is rejected.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.title.trim().is_empty() {
            return Err(ValidationError::MissingField("title"));
        }
        if self.title.len() > MAX_TITLE_LEN {
            return Err(ValidationError::TooLong {
                field: "title",
                max: MAX_TITLE_LEN,
            });
        }
        if let Some(subtitle) = &self.subtitle {
            if subtitle.len() > MAX_SUBTITLE_LEN {
                return Err(ValidationError::TooLong {
                    field: "subtitle",
                    max: MAX_SUBTITLE_LEN,
                });
            }
        }
        if self.description.trim().is_empty() {
            return Err(ValidationError::MissingField("description"));
        }
        if self.description.len() > MAX_PRODUCT_DESCRIPTION_LEN {
            return Err(ValidationError::TooLong {
                field: "description",
                max: MAX_PRODUCT_DESCRIPTION_LEN,
            });
        }
        if self.price.trim().is_empty() {
            return Err(ValidationError::MissingField("price"));
        }
        if self.icon.trim().is_empty() {
            return Err(ValidationError::MissingField("icon"));
        }
        if self.features.is_empty() {
            return Err(ValidationError::NoFeatures);
        }
        Ok(())
    }
}
