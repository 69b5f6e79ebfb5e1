//! Category migration engine
//!
//! One-shot batch conversion of legacy string category codes on products
//! into normalized `Category` references, plus the symmetric rollback:
//! - Seeder: ensure the canonical categories exist (idempotent)
//! - Migrator: rewrite each product's category field from slug to reference
//! - Verifier: join-count products whose reference resolves
//! - Rollback: convert references back to slug strings
//!
//! Phases run sequentially against a quiescent store. There is no
//! transactionality across phases or documents: a persistence error aborts
//! the run and leaves already-written documents in place. Every phase is
//! safe to re-run.
//!
//! # Example
//!
//! ```rust,no_run
//! use corredora::migration::{run_forward, LEGACY_CATEGORIES};
//! use corredora::store::{MongoCategoryStore, MongoProductStore};
//!
//! # fn demo(db: &mongodb::sync::Database) -> Result<(), corredora::StoreError> {
//! let categories = MongoCategoryStore::new(db);
//! let products = MongoProductStore::new(db);
//!
//! let summary = run_forward(&categories, &products, &LEGACY_CATEGORIES)?;
//! if summary.is_fully_valid() {
//!     println!("all {} products resolved", summary.total_products);
//! }
//! # Ok(())
//! # }
//! ```

pub mod legacy;
pub mod migrator;
pub mod report;
pub mod rollback;
pub mod seeder;
pub mod verifier;

pub use legacy::{CategorySeed, LEGACY_CATEGORIES};
pub use migrator::{migrate_products, plan_products};
pub use report::{
    MigratePlan, MigrateReport, MigrationSummary, RollbackReport, SeedOutcome, UnresolvedProduct,
    VerifyReport,
};
pub use rollback::{plan_rollback, rollback_products};
pub use seeder::seed_categories;
pub use verifier::verify_integrity;

use crate::error::StoreError;
use crate::store::{CategoryStore, ProductStore};

/// Run the forward migration: seed, migrate, verify.
///
/// # Errors
///
/// The first persistence error aborts the run. Unresolvable legacy codes are
/// not errors; they are counted in the summary.
pub fn run_forward(
    categories: &dyn CategoryStore,
    products: &dyn ProductStore,
    seeds: &[CategorySeed],
) -> Result<MigrationSummary, StoreError> {
    let seed = seed_categories(categories, seeds)?;
    let migrate = migrate_products(products, &seed.mapping)?;
    let verify = verify_integrity(products)?;
    Ok(MigrationSummary::new(&seed, &migrate, &verify))
}

/// Compute what the forward migration would do, writing nothing.
///
/// Seeds that do not exist yet are mapped to placeholder ids so products
/// referencing them still count as would-migrate.
pub fn plan_forward(
    categories: &dyn CategoryStore,
    products: &dyn ProductStore,
    seeds: &[CategorySeed],
) -> Result<MigratePlan, StoreError> {
    let seed = seeder::plan_categories(categories, seeds)?;
    let migrate = plan_products(products, &seed.mapping)?;
    Ok(MigratePlan {
        categories_to_create: seed.created_count,
        categories_existing: seed.existing_count,
        migrate,
    })
}

/// Run the rollback: convert resolved references back to slug strings.
///
/// Seeded categories are intentionally left in place; a later forward run
/// finds them and skips creation.
pub fn run_rollback(
    categories: &dyn CategoryStore,
    products: &dyn ProductStore,
) -> Result<RollbackReport, StoreError> {
    rollback_products(categories, products)
}
