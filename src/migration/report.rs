//! Per-phase result objects
//!
//! Each phase returns a report rather than signalling through console output
//! alone; the CLI renders them, embedders can inspect them.

use std::collections::HashMap;

use mongodb::bson::oid::ObjectId;
use serde::Serialize;

/// Result of the category seeding phase
#[derive(Debug, Clone, Serialize)]
pub struct SeedOutcome {
    /// Legacy slug -> category id, covering every seed in the input list
    pub mapping: HashMap<String, ObjectId>,
    /// Categories created by this run
    pub created_count: usize,
    /// Categories that already existed and were left untouched
    pub existing_count: usize,
}

/// A product whose legacy code matched no seeded category
#[derive(Debug, Clone, Serialize)]
pub struct UnresolvedProduct {
    pub title: String,
    pub category: String,
}

/// Result of the product migration phase
#[derive(Debug, Clone, Serialize)]
pub struct MigrateReport {
    /// Products examined
    pub total_products: usize,
    /// Products rewritten from slug to reference
    pub migrated_count: usize,
    /// Products already holding a reference, left untouched
    pub skipped_count: usize,
    /// Products left unmodified because their code resolved to nothing
    pub unresolved: Vec<UnresolvedProduct>,
}

impl MigrateReport {
    #[must_use]
    pub fn unresolved_count(&self) -> usize {
        self.unresolved.len()
    }
}

/// Result of the integrity verification phase
#[derive(Debug, Clone, Serialize)]
pub struct VerifyReport {
    pub total_products: u64,
    /// Products whose category reference joins to an existing category
    pub valid_category_count: u64,
}

impl VerifyReport {
    /// Whether every product resolved to a category
    #[must_use]
    pub fn is_fully_valid(&self) -> bool {
        self.valid_category_count == self.total_products
    }
}

/// Combined summary of a forward migration run
#[derive(Debug, Clone, Serialize)]
pub struct MigrationSummary {
    /// Seeds created or verified this run
    pub categories_seeded: usize,
    pub categories_created: usize,
    pub total_products: u64,
    pub migrated_count: usize,
    pub skipped_count: usize,
    pub unresolved_count: usize,
    pub valid_category_count: u64,
}

impl MigrationSummary {
    #[must_use]
    pub fn new(seed: &SeedOutcome, migrate: &MigrateReport, verify: &VerifyReport) -> Self {
        Self {
            categories_seeded: seed.mapping.len(),
            categories_created: seed.created_count,
            total_products: verify.total_products,
            migrated_count: migrate.migrated_count,
            skipped_count: migrate.skipped_count,
            unresolved_count: migrate.unresolved_count(),
            valid_category_count: verify.valid_category_count,
        }
    }

    /// Whether every product resolved to a category after the run
    #[must_use]
    pub fn is_fully_valid(&self) -> bool {
        self.valid_category_count == self.total_products
    }
}

/// Dry-run counterpart of [`MigrationSummary`]
#[derive(Debug, Clone, Serialize)]
pub struct MigratePlan {
    /// Seeds that would be created
    pub categories_to_create: usize,
    /// Seeds already present
    pub categories_existing: usize,
    /// What the migrator would do, computed without writing
    pub migrate: MigrateReport,
}

/// Result of a rollback run
#[derive(Debug, Clone, Serialize)]
pub struct RollbackReport {
    /// Products examined
    pub total_products: usize,
    /// Products rewritten from reference back to slug
    pub reverted_count: usize,
    /// Products left untouched (already strings, or dangling references)
    pub skipped_count: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_is_fully_valid() {
        let verify = VerifyReport {
            total_products: 3,
            valid_category_count: 3,
        };
        assert!(verify.is_fully_valid());

        let partial = VerifyReport {
            total_products: 3,
            valid_category_count: 2,
        };
        assert!(!partial.is_fully_valid());
    }
}
