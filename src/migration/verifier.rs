//! Integrity Verifier - third phase of the forward migration

use crate::error::StoreError;
use crate::migration::report::VerifyReport;
use crate::store::ProductStore;

/// Count how many products resolve to an existing category.
///
/// A discrepancy between `total_products` and `valid_category_count` is
/// reported, not enforced: the operator decides what to do with products the
/// migrator could not resolve.
pub fn verify_integrity(store: &dyn ProductStore) -> Result<VerifyReport, StoreError> {
    let total_products = store.count()?;
    let valid_category_count = store.count_with_valid_category()?;

    log::info!(
        "integrity check: {}/{} products with valid categories",
        valid_category_count,
        total_products
    );

    Ok(VerifyReport {
        total_products,
        valid_category_count,
    })
}
