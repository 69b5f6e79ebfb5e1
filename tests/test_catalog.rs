//! Tests for the admin catalog services

use corredora::catalog::categories::{self, CategoryUpdate, NewCategory};
use corredora::catalog::{products, CatalogError};
use corredora::model::{CategoryRef, Product};
use corredora::store::{CategoryStore, MemoryStore, ProductStore};

fn new_category(name: &str) -> NewCategory {
    NewCategory {
        name: name.to_string(),
        slug: None,
        description: None,
        order: 0,
    }
}

fn valid_product(title: &str, category: CategoryRef) -> Product {
    let mut product = Product::new(
        title,
        "cobertura de prueba",
        "Desde $10.000",
        category,
    );
    product.icon = "shield".to_string();
    product.features = vec!["Cobertura total".to_string()];
    product
}

#[test]
fn test_create_derives_slug_from_name() {
    let store = MemoryStore::new();

    let category = categories::create(&store, new_category("Seguros Especiales!!")).unwrap();

    assert_eq!(category.slug, "seguros-especiales");
    assert!(category.active);
}

#[test]
fn test_create_rejects_duplicate_slug() {
    let store = MemoryStore::new();
    categories::create(&store, new_category("Personal")).unwrap();

    let duplicate = categories::create(&store, new_category("personal"));
    assert!(matches!(duplicate, Err(CatalogError::DuplicateSlug(_))));
}

#[test]
fn test_create_rejects_blank_name() {
    let store = MemoryStore::new();
    let result = categories::create(&store, new_category("   "));
    assert!(matches!(result, Err(CatalogError::Validation(_))));
}

#[test]
fn test_update_changes_fields_and_guards_slug() {
    let store = MemoryStore::new();
    let personal = categories::create(&store, new_category("Personal")).unwrap();
    categories::create(&store, new_category("Salud")).unwrap();

    let updated = categories::update(
        &store,
        &personal.id,
        CategoryUpdate {
            name: Some("Personas".to_string()),
            order: Some(7),
            ..CategoryUpdate::default()
        },
    )
    .unwrap();
    assert_eq!(updated.name, "Personas");
    assert_eq!(updated.order, 7);
    assert_eq!(updated.slug, "personal");

    // Taking another category's slug is rejected
    let collision = categories::update(
        &store,
        &personal.id,
        CategoryUpdate {
            slug: Some("salud".to_string()),
            ..CategoryUpdate::default()
        },
    );
    assert!(matches!(collision, Err(CatalogError::DuplicateSlug(_))));
}

#[test]
fn test_update_unknown_id_is_not_found() {
    let store = MemoryStore::new();
    let missing = mongodb::bson::oid::ObjectId::new();
    let result = categories::update(&store, &missing, CategoryUpdate::default());
    assert!(matches!(result, Err(CatalogError::NotFound(_))));
}

#[test]
fn test_delete_refuses_category_in_use() {
    let store = MemoryStore::new();
    let category = categories::create(&store, new_category("Personal")).unwrap();
    products::create(&store, valid_product("Vida", CategoryRef::Id(category.id))).unwrap();

    let blocked = categories::delete(&store, &store, &category.id);
    assert!(matches!(
        blocked,
        Err(CatalogError::CategoryInUse { count: 1 })
    ));

    // Still present
    assert!(store.find_by_slug("personal").unwrap().is_some());
}

#[test]
fn test_delete_removes_unreferenced_category() {
    let store = MemoryStore::new();
    let category = categories::create(&store, new_category("Personal")).unwrap();

    categories::delete(&store, &store, &category.id).unwrap();
    assert!(store.find_by_slug("personal").unwrap().is_none());
}

#[test]
fn test_list_paginates_and_reports_totals() {
    let store = MemoryStore::new();
    for (name, order) in [("Personal", 1), ("Empresarial", 2), ("Salud", 3)] {
        let mut input = new_category(name);
        input.order = order;
        categories::create(&store, input).unwrap();
    }

    let page = categories::list(&store, None, 1, 2).unwrap();
    assert_eq!(page.categories.len(), 2);
    assert_eq!(page.total, 3);
    assert_eq!(page.pages, 2);
    assert_eq!(page.categories[0].slug, "personal");

    let last = categories::list(&store, None, 2, 2).unwrap();
    assert_eq!(last.categories.len(), 1);
    assert_eq!(last.categories[0].slug, "salud");
}

#[test]
fn test_get_by_slug_hides_inactive() {
    let store = MemoryStore::new();
    let category = categories::create(&store, new_category("Personal")).unwrap();
    assert!(categories::get_by_slug(&store, "personal").unwrap().is_some());

    categories::update(
        &store,
        &category.id,
        CategoryUpdate {
            active: Some(false),
            ..CategoryUpdate::default()
        },
    )
    .unwrap();
    assert!(categories::get_by_slug(&store, "personal").unwrap().is_none());
}

#[test]
fn test_product_create_cleans_features() {
    let store = MemoryStore::new();
    let mut product = valid_product("Vida", CategoryRef::Slug("personal".to_string()));
    product.features = vec![
        "Cobertura total".to_string(),
        "  ".to_string(),
        "Asistencia 24/7".to_string(),
    ];

    let created = products::create(&store, product).unwrap();
    assert_eq!(created.features, vec!["Cobertura total", "Asistencia 24/7"]);
}

#[test]
fn test_product_create_rejects_featureless() {
    let store = MemoryStore::new();
    let mut product = valid_product("Vida", CategoryRef::Slug("personal".to_string()));
    product.features = vec!["   ".to_string()];

    let result = products::create(&store, product);
    assert!(matches!(result, Err(CatalogError::Validation(_))));
    assert_eq!(ProductStore::count(&store).unwrap(), 0);
}

#[test]
fn test_product_query_helpers_filter_inactive() {
    let store = MemoryStore::new();
    let category = categories::create(&store, new_category("Personal")).unwrap();

    let mut featured = valid_product("Vida", CategoryRef::Id(category.id));
    featured.featured = true;
    let mut hidden = valid_product("Hogar", CategoryRef::Id(category.id));
    hidden.featured = true;
    hidden.active = false;
    let mut popular = valid_product("Auto", CategoryRef::Id(category.id));
    popular.popular = true;

    for product in [featured, hidden, popular] {
        products::create(&store, product).unwrap();
    }

    assert_eq!(products::featured(&store).unwrap().len(), 1);
    assert_eq!(products::popular(&store).unwrap().len(), 1);
    assert_eq!(products::by_category(&store, &category.id).unwrap().len(), 2);
}
