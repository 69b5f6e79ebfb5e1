//! Category CRUD service

use chrono::Utc;
use mongodb::bson::oid::ObjectId;

use crate::catalog::CatalogError;
use crate::model::{derive_slug, Category};
use crate::store::{CategoryQuery, CategoryStore, ProductStore};

/// Input for [`create`]
#[derive(Debug, Clone, Default)]
pub struct NewCategory {
    pub name: String,
    /// Explicit slug; derived from `name` when `None`
    pub slug: Option<String>,
    pub description: Option<String>,
    pub order: i32,
}

/// Partial update for [`update`]; `None` fields are left untouched
#[derive(Debug, Clone, Default)]
pub struct CategoryUpdate {
    pub name: Option<String>,
    pub slug: Option<String>,
    pub description: Option<String>,
    pub active: Option<bool>,
    pub order: Option<i32>,
}

/// One page of a category listing
#[derive(Debug, Clone)]
pub struct CategoryPage {
    pub categories: Vec<Category>,
    pub total: u64,
    pub page: u64,
    pub limit: i64,
    pub pages: u64,
}

/// Create a category, deriving the slug from the name when none is given.
///
/// # Errors
///
/// `Validation` for field-level violations, `DuplicateSlug` when the slug is
/// already taken, `Store` on persistence failure.
pub fn create(
    store: &dyn CategoryStore,
    input: NewCategory,
) -> Result<Category, CatalogError> {
    let name = input.name.trim().to_string();
    let slug = match input.slug {
        Some(slug) => slug.trim().to_lowercase(),
        None => derive_slug(&name),
    };

    let mut category = Category::new(name, slug);
    category.description = input
        .description
        .map(|d| d.trim().to_string())
        .filter(|d| !d.is_empty());
    category.order = input.order;
    category.validate()?;

    if store.find_by_slug(&category.slug)?.is_some() {
        return Err(CatalogError::DuplicateSlug(category.slug));
    }

    store.insert(&category)?;
    log::info!("created category '{}' ({})", category.name, category.slug);
    Ok(category)
}

/// Apply a partial update to a category.
///
/// # Errors
///
/// `NotFound` for an unknown id, `DuplicateSlug` when the new slug collides
/// with a different category, `Validation`/`Store` as in [`create`].
pub fn update(
    store: &dyn CategoryStore,
    id: &ObjectId,
    changes: CategoryUpdate,
) -> Result<Category, CatalogError> {
    let mut category = store
        .find_by_id(id)?
        .ok_or_else(|| CatalogError::NotFound("Category".to_string()))?;

    if let Some(name) = changes.name {
        category.name = name.trim().to_string();
    }
    if let Some(slug) = changes.slug {
        category.slug = slug.trim().to_lowercase();
    }
    if let Some(description) = changes.description {
        let description = description.trim().to_string();
        category.description = if description.is_empty() {
            None
        } else {
            Some(description)
        };
    }
    if let Some(active) = changes.active {
        category.active = active;
    }
    if let Some(order) = changes.order {
        category.order = order;
    }

    category.updated_at = Utc::now();
    category.validate()?;

    if let Some(existing) = store.find_by_slug(&category.slug)? {
        if existing.id != category.id {
            return Err(CatalogError::DuplicateSlug(category.slug));
        }
    }

    store.update(&category)?;
    Ok(category)
}

/// Delete a category that no product references.
///
/// # Errors
///
/// `NotFound` for an unknown id, `CategoryInUse` when products still point at
/// it.
pub fn delete(
    categories: &dyn CategoryStore,
    products: &dyn ProductStore,
    id: &ObjectId,
) -> Result<(), CatalogError> {
    let category = categories
        .find_by_id(id)?
        .ok_or_else(|| CatalogError::NotFound("Category".to_string()))?;

    let referencing = products.count_by_category(id)?;
    if referencing > 0 {
        return Err(CatalogError::CategoryInUse { count: referencing });
    }

    categories.delete(id)?;
    log::info!("deleted category '{}' ({})", category.name, category.slug);
    Ok(())
}

/// List categories with an optional activation filter and pagination.
///
/// `page` is 1-based; values below 1 are clamped to 1.
pub fn list(
    store: &dyn CategoryStore,
    active: Option<bool>,
    page: u64,
    limit: i64,
) -> Result<CategoryPage, CatalogError> {
    let page = page.max(1);
    let limit = limit.max(1);
    let skip = (page - 1) * limit as u64;

    let categories = store.find_matching(CategoryQuery {
        active,
        skip,
        limit: Some(limit),
    })?;
    let total = store.count_matching(active)?;
    let pages = total.div_ceil(limit as u64);

    Ok(CategoryPage {
        categories,
        total,
        page,
        limit,
        pages,
    })
}

/// Fetch an active category by slug; inactive categories are invisible here.
pub fn get_by_slug(
    store: &dyn CategoryStore,
    slug: &str,
) -> Result<Option<Category>, CatalogError> {
    let found = store.find_by_slug(slug)?;
    Ok(found.filter(|c| c.active))
}
