//! Rollback Procedure - inverse of the product migrator

use std::collections::HashMap;

use mongodb::bson::oid::ObjectId;

use crate::error::StoreError;
use crate::migration::report::RollbackReport;
use crate::model::CategoryRef;
use crate::store::{CategoryStore, ProductStore};

/// Convert every resolved category reference back to its slug string.
///
/// Products whose field is already a string, or whose reference matches no
/// existing category, are left untouched; re-running a rollback is a no-op.
/// Seeded categories are not deleted.
///
/// # Errors
///
/// The first persistence error aborts the run; products reverted before the
/// failure stay committed.
pub fn rollback_products(
    categories: &dyn CategoryStore,
    products: &dyn ProductStore,
) -> Result<RollbackReport, StoreError> {
    rollback(categories, products, true)
}

/// Dry-run variant of [`rollback_products`]: classifies without writing.
pub fn plan_rollback(
    categories: &dyn CategoryStore,
    products: &dyn ProductStore,
) -> Result<RollbackReport, StoreError> {
    rollback(categories, products, false)
}

fn rollback(
    categories: &dyn CategoryStore,
    products: &dyn ProductStore,
    apply: bool,
) -> Result<RollbackReport, StoreError> {
    let slug_by_id: HashMap<ObjectId, String> = categories
        .find_all()?
        .into_iter()
        .map(|category| (category.id, category.slug))
        .collect();

    let all = products.find_all()?;
    let total_products = all.len();

    let mut reverted_count = 0;
    let mut skipped_count = 0;

    for product in all {
        match &product.category {
            CategoryRef::Id(id) => match slug_by_id.get(id) {
                Some(slug) => {
                    if apply {
                        products
                            .update_category(&product.id, &CategoryRef::Slug(slug.clone()))?;
                        log::info!("reverted product: {} ({})", product.title, slug);
                    }
                    reverted_count += 1;
                }
                None => {
                    // Dangling reference: nothing to revert to
                    skipped_count += 1;
                }
            },
            CategoryRef::Slug(_) => {
                skipped_count += 1;
            }
        }
    }

    Ok(RollbackReport {
        total_products,
        reverted_count,
        skipped_count,
    })
}
