//! Tests for the forward migration: seeding, product rewriting, verification

use corredora::migration::{
    migrate_products, plan_forward, run_forward, seed_categories, CategorySeed, LEGACY_CATEGORIES,
};
use corredora::model::{CategoryRef, Product};
use corredora::store::{CategoryStore, MemoryStore, ProductStore};

const TEST_SEEDS: [CategorySeed; 2] = [
    CategorySeed { slug: "personal", name: "Personal", order: 1 },
    CategorySeed { slug: "salud", name: "Salud", order: 3 },
];

fn legacy_product(title: &str, code: &str) -> Product {
    let mut product = Product::new(
        title,
        "cobertura de prueba",
        "Desde $10.000",
        CategoryRef::Slug(code.to_string()),
    );
    product.icon = "shield".to_string();
    product.features = vec!["Cobertura total".to_string()];
    product
}

#[test]
fn test_seeding_creates_all_legacy_categories() {
    let store = MemoryStore::new();

    let outcome = seed_categories(&store, &LEGACY_CATEGORIES).unwrap();

    assert_eq!(outcome.created_count, 6);
    assert_eq!(outcome.existing_count, 0);
    assert_eq!(outcome.mapping.len(), 6);
    assert_eq!(CategoryStore::count_matching(&store, None).unwrap(), 6);

    for slug in [
        "personal",
        "empresarial",
        "salud",
        "especiales",
        "obligatorios",
        "condominios",
    ] {
        let category = store.find_by_slug(slug).unwrap().unwrap();
        assert!(category.active, "seeded category {slug} must be active");
        assert_eq!(outcome.mapping[slug], category.id);
    }
}

#[test]
fn test_seeding_is_idempotent() {
    let store = MemoryStore::new();

    let first = seed_categories(&store, &LEGACY_CATEGORIES).unwrap();
    let second = seed_categories(&store, &LEGACY_CATEGORIES).unwrap();

    assert_eq!(second.created_count, 0);
    assert_eq!(second.existing_count, 6);
    assert_eq!(first.mapping, second.mapping);
    assert_eq!(CategoryStore::count_matching(&store, None).unwrap(), 6);
}

#[test]
fn test_seeder_preserves_existing_category() {
    let store = MemoryStore::new();
    let existing = corredora::catalog::categories::create(
        &store,
        corredora::catalog::categories::NewCategory {
            name: "Personal renombrada".to_string(),
            slug: Some("personal".to_string()),
            description: None,
            order: 9,
        },
    )
    .unwrap();

    let outcome = seed_categories(&store, &TEST_SEEDS).unwrap();

    assert_eq!(outcome.created_count, 1);
    assert_eq!(outcome.existing_count, 1);
    assert_eq!(outcome.mapping["personal"], existing.id);

    let untouched = store.find_by_slug("personal").unwrap().unwrap();
    assert_eq!(untouched.name, "Personal renombrada");
    assert_eq!(untouched.order, 9);
}

#[test]
fn test_three_product_scenario() {
    let store = MemoryStore::new();
    for (title, code) in [
        ("Vida", "personal"),
        ("Dental", "salud"),
        ("Misterio", "unknown"),
    ] {
        ProductStore::insert(&store, &legacy_product(title, code)).unwrap();
    }

    let summary = run_forward(&store, &store, &LEGACY_CATEGORIES).unwrap();

    assert_eq!(summary.total_products, 3);
    assert_eq!(summary.migrated_count, 2);
    assert_eq!(summary.skipped_count, 0);
    assert_eq!(summary.unresolved_count, 1);
    assert_eq!(summary.valid_category_count, 2);
    assert!(!summary.is_fully_valid());

    // The unknown product keeps its exact legacy value
    let products = ProductStore::find_all(&store).unwrap();
    let mystery = products.iter().find(|p| p.title == "Misterio").unwrap();
    assert_eq!(
        mystery.category,
        CategoryRef::Slug("unknown".to_string())
    );
}

#[test]
fn test_forward_migration_is_idempotent() {
    let store = MemoryStore::new();
    ProductStore::insert(&store, &legacy_product("Vida", "personal")).unwrap();
    ProductStore::insert(&store, &legacy_product("Dental", "salud")).unwrap();

    let first = run_forward(&store, &store, &LEGACY_CATEGORIES).unwrap();
    assert_eq!(first.migrated_count, 2);
    assert_eq!(first.valid_category_count, 2);

    let second = run_forward(&store, &store, &LEGACY_CATEGORIES).unwrap();
    assert_eq!(second.migrated_count, 0);
    assert_eq!(second.skipped_count, 2);
    assert_eq!(second.valid_category_count, first.valid_category_count);
}

#[test]
fn test_unknown_code_is_unresolved_not_migrated() {
    let store = MemoryStore::new();
    let product = legacy_product("Misterio", "nonexistent-code");
    let product_id = product.id;
    ProductStore::insert(&store, &product).unwrap();

    let seed = seed_categories(&store, &TEST_SEEDS).unwrap();
    let report = migrate_products(&store, &seed.mapping).unwrap();

    assert_eq!(report.migrated_count, 0);
    assert_eq!(report.skipped_count, 0);
    assert_eq!(report.unresolved_count(), 1);
    assert_eq!(report.unresolved[0].category, "nonexistent-code");

    let untouched = store.product(&product_id).unwrap().unwrap();
    assert_eq!(
        untouched.category,
        CategoryRef::Slug("nonexistent-code".to_string())
    );
}

#[test]
fn test_already_migrated_product_is_skipped() {
    let store = MemoryStore::new();
    let seed = seed_categories(&store, &TEST_SEEDS).unwrap();

    let mut product = legacy_product("Vida", "personal");
    product.category = CategoryRef::Id(seed.mapping["personal"]);
    let product_id = product.id;
    let reference = product.category.clone();
    ProductStore::insert(&store, &product).unwrap();

    let report = migrate_products(&store, &seed.mapping).unwrap();

    assert_eq!(report.migrated_count, 0);
    assert_eq!(report.skipped_count, 1);
    assert_eq!(report.unresolved_count(), 0);
    assert_eq!(store.product(&product_id).unwrap().unwrap().category, reference);
}

#[test]
fn test_plan_forward_writes_nothing() {
    let store = MemoryStore::new();
    ProductStore::insert(&store, &legacy_product("Vida", "personal")).unwrap();

    let plan = plan_forward(&store, &store, &LEGACY_CATEGORIES).unwrap();

    assert_eq!(plan.categories_to_create, 6);
    assert_eq!(plan.categories_existing, 0);
    assert_eq!(plan.migrate.migrated_count, 1);

    // Nothing was seeded or rewritten
    assert_eq!(CategoryStore::count_matching(&store, None).unwrap(), 0);
    let products = ProductStore::find_all(&store).unwrap();
    assert_eq!(
        products[0].category,
        CategoryRef::Slug("personal".to_string())
    );
}
