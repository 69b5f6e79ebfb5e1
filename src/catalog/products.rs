//! Product catalog service

use mongodb::bson::oid::ObjectId;

use crate::catalog::CatalogError;
use crate::model::Product;
use crate::store::ProductStore;

/// Clean and persist a new product.
///
/// Whitespace-only feature entries are discarded before validation; a product
/// left with no features is rejected.
///
/// # Errors
///
/// `Validation` for field-level violations, `Store` on persistence failure.
pub fn create(store: &dyn ProductStore, mut product: Product) -> Result<Product, CatalogError> {
    product.clean_features();
    product.validate()?;

    store.insert(&product)?;
    log::info!("created product '{}'", product.title);
    Ok(product)
}

/// Active products in a category, presentation order
pub fn by_category(
    store: &dyn ProductStore,
    category_id: &ObjectId,
) -> Result<Vec<Product>, CatalogError> {
    Ok(store.find_by_category(category_id)?)
}

/// Active featured products, presentation order
pub fn featured(store: &dyn ProductStore) -> Result<Vec<Product>, CatalogError> {
    Ok(store.find_featured()?)
}

/// Active popular products, presentation order
pub fn popular(store: &dyn ProductStore) -> Result<Vec<Product>, CatalogError> {
    Ok(store.find_popular()?)
}
