//! Product Migrator - second phase of the forward migration

use std::collections::HashMap;

use mongodb::bson::oid::ObjectId;

use crate::error::StoreError;
use crate::migration::report::{MigrateReport, UnresolvedProduct};
use crate::model::CategoryRef;
use crate::store::ProductStore;

/// Rewrite every product's legacy category code to the seeded reference.
///
/// Products already holding a reference are skipped, so an interrupted run
/// can simply be started again. Products whose code is not in `mapping` are
/// left unmodified and reported as unresolved; they never abort the run.
///
/// # Errors
///
/// The first persistence error aborts the phase; products rewritten before
/// the failure stay committed.
pub fn migrate_products(
    store: &dyn ProductStore,
    mapping: &HashMap<String, ObjectId>,
) -> Result<MigrateReport, StoreError> {
    migrate(store, mapping, true)
}

/// Dry-run variant of [`migrate_products`]: classifies every product without
/// writing.
pub fn plan_products(
    store: &dyn ProductStore,
    mapping: &HashMap<String, ObjectId>,
) -> Result<MigrateReport, StoreError> {
    migrate(store, mapping, false)
}

fn migrate(
    store: &dyn ProductStore,
    mapping: &HashMap<String, ObjectId>,
    apply: bool,
) -> Result<MigrateReport, StoreError> {
    let products = store.find_all()?;
    let total_products = products.len();
    log::info!("found {} products", total_products);

    let mut migrated_count = 0;
    let mut skipped_count = 0;
    let mut unresolved = Vec::new();

    for product in products {
        match &product.category {
            CategoryRef::Id(_) => {
                skipped_count += 1;
            }
            CategoryRef::Slug(slug) => match mapping.get(slug.as_str()) {
                Some(category_id) => {
                    if apply {
                        store.update_category(&product.id, &CategoryRef::Id(*category_id))?;
                        log::info!(
                            "migrated product: {} ({} -> {})",
                            product.title,
                            slug,
                            category_id
                        );
                    }
                    migrated_count += 1;
                }
                None => {
                    log::warn!(
                        "no category found for product: {} ({})",
                        product.title,
                        slug
                    );
                    unresolved.push(UnresolvedProduct {
                        title: product.title.clone(),
                        category: slug.clone(),
                    });
                }
            },
        }
    }

    Ok(MigrateReport {
        total_products,
        migrated_count,
        skipped_count,
        unresolved,
    })
}
