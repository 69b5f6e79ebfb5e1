//! Category Seeder - first phase of the forward migration

use std::collections::HashMap;

use mongodb::bson::oid::ObjectId;

use crate::error::StoreError;
use crate::migration::report::SeedOutcome;
use crate::migration::CategorySeed;
use crate::model::Category;
use crate::store::CategoryStore;

/// Ensure a category exists for every seed in `seeds`.
///
/// Existing categories are left untouched, so the phase is idempotent and a
/// re-run after a partial failure picks up where the last one stopped. The
/// returned mapping covers every seed, created or pre-existing.
///
/// # Errors
///
/// The first persistence error aborts the phase; categories created before
/// the failure stay committed.
pub fn seed_categories(
    store: &dyn CategoryStore,
    seeds: &[CategorySeed],
) -> Result<SeedOutcome, StoreError> {
    let mut mapping = HashMap::with_capacity(seeds.len());
    let mut created_count = 0;
    let mut existing_count = 0;

    for seed in seeds {
        match store.find_by_slug(seed.slug)? {
            Some(category) => {
                log::info!("category already exists: {}", seed.name);
                existing_count += 1;
                mapping.insert(seed.slug.to_string(), category.id);
            }
            None => {
                let mut category = Category::new(seed.name, seed.slug);
                category.order = seed.order;
                store.insert(&category)?;
                log::info!("created category: {}", seed.name);
                created_count += 1;
                mapping.insert(seed.slug.to_string(), category.id);
            }
        }
    }

    Ok(SeedOutcome {
        mapping,
        created_count,
        existing_count,
    })
}

/// Dry-run variant of [`seed_categories`]: missing seeds are mapped to
/// placeholder ids instead of being created.
pub fn plan_categories(
    store: &dyn CategoryStore,
    seeds: &[CategorySeed],
) -> Result<SeedOutcome, StoreError> {
    let mut mapping = HashMap::with_capacity(seeds.len());
    let mut created_count = 0;
    let mut existing_count = 0;

    for seed in seeds {
        match store.find_by_slug(seed.slug)? {
            Some(category) => {
                existing_count += 1;
                mapping.insert(seed.slug.to_string(), category.id);
            }
            None => {
                created_count += 1;
                mapping.insert(seed.slug.to_string(), ObjectId::new());
            }
        }
    }

    Ok(SeedOutcome {
        mapping,
        created_count,
        existing_count,
    })
}
