//! In-process store backend
//!
//! Implements both persistence ports over mutex-guarded vectors. Used by the
//! engine tests and by embedders that want to dry-run catalog logic without a
//! running document store.

use std::cmp::Reverse;
use std::sync::{Mutex, MutexGuard};

use chrono::Utc;
use mongodb::bson::oid::ObjectId;

use crate::error::StoreError;
use crate::model::{Category, CategoryRef, Product};
use crate::store::{CategoryQuery, CategoryStore, ProductStore};

/// A `CategoryStore` + `ProductStore` holding documents in memory
#[derive(Default)]
pub struct MemoryStore {
    categories: Mutex<Vec<Category>>,
    products: Mutex<Vec<Product>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn categories(&self) -> Result<MutexGuard<'_, Vec<Category>>, StoreError> {
        self.categories
            .lock()
            .map_err(|_| StoreError::Other("category store lock poisoned".to_string()))
    }

    fn products(&self) -> Result<MutexGuard<'_, Vec<Product>>, StoreError> {
        self.products
            .lock()
            .map_err(|_| StoreError::Other("product store lock poisoned".to_string()))
    }

    /// Direct read of one product, bypassing the port surface (test helper)
    pub fn product(&self, id: &ObjectId) -> Result<Option<Product>, StoreError> {
        Ok(self.products()?.iter().find(|p| p.id == *id).cloned())
    }
}

fn sort_by_order_and_name(categories: &mut [Category]) {
    categories.sort_by(|a, b| a.order.cmp(&b.order).then_with(|| a.name.cmp(&b.name)));
}

fn sort_by_order_and_recency(products: &mut [Product]) {
    products.sort_by_key(|p| (p.order, Reverse(p.created_at)));
}

impl CategoryStore for MemoryStore {
    fn insert(&self, category: &Category) -> Result<(), StoreError> {
        self.categories()?.push(category.clone());
        Ok(())
    }

    fn find_by_id(&self, id: &ObjectId) -> Result<Option<Category>, StoreError> {
        Ok(self.categories()?.iter().find(|c| c.id == *id).cloned())
    }

    fn find_by_slug(&self, slug: &str) -> Result<Option<Category>, StoreError> {
        Ok(self.categories()?.iter().find(|c| c.slug == slug).cloned())
    }

    fn find_all(&self) -> Result<Vec<Category>, StoreError> {
        let mut categories = self.categories()?.clone();
        sort_by_order_and_name(&mut categories);
        Ok(categories)
    }

    fn find_matching(&self, query: CategoryQuery) -> Result<Vec<Category>, StoreError> {
        let mut categories: Vec<Category> = self
            .categories()?
            .iter()
            .filter(|c| query.active.map_or(true, |active| c.active == active))
            .cloned()
            .collect();
        sort_by_order_and_name(&mut categories);

        let skip = usize::try_from(query.skip).unwrap_or(usize::MAX);
        let limit = query
            .limit
            .and_then(|l| usize::try_from(l).ok())
            .unwrap_or(usize::MAX);
        Ok(categories.into_iter().skip(skip).take(limit).collect())
    }

    fn update(&self, category: &Category) -> Result<(), StoreError> {
        let mut categories = self.categories()?;
        if let Some(existing) = categories.iter_mut().find(|c| c.id == category.id) {
            *existing = category.clone();
        }
        Ok(())
    }

    fn delete(&self, id: &ObjectId) -> Result<bool, StoreError> {
        let mut categories = self.categories()?;
        let before = categories.len();
        categories.retain(|c| c.id != *id);
        Ok(categories.len() < before)
    }

    fn count_matching(&self, active: Option<bool>) -> Result<u64, StoreError> {
        let count = self
            .categories()?
            .iter()
            .filter(|c| active.map_or(true, |a| c.active == a))
            .count();
        Ok(count as u64)
    }
}

impl ProductStore for MemoryStore {
    fn insert(&self, product: &Product) -> Result<(), StoreError> {
        self.products()?.push(product.clone());
        Ok(())
    }

    fn find_all(&self) -> Result<Vec<Product>, StoreError> {
        Ok(self.products()?.clone())
    }

    fn find_by_category(&self, category_id: &ObjectId) -> Result<Vec<Product>, StoreError> {
        let mut products: Vec<Product> = self
            .products()?
            .iter()
            .filter(|p| p.active && p.category == CategoryRef::Id(*category_id))
            .cloned()
            .collect();
        sort_by_order_and_recency(&mut products);
        Ok(products)
    }

    fn find_featured(&self) -> Result<Vec<Product>, StoreError> {
        let mut products: Vec<Product> = self
            .products()?
            .iter()
            .filter(|p| p.active && p.featured)
            .cloned()
            .collect();
        sort_by_order_and_recency(&mut products);
        Ok(products)
    }

    fn find_popular(&self) -> Result<Vec<Product>, StoreError> {
        let mut products: Vec<Product> = self
            .products()?
            .iter()
            .filter(|p| p.active && p.popular)
            .cloned()
            .collect();
        sort_by_order_and_recency(&mut products);
        Ok(products)
    }

    fn update_category(
        &self,
        product_id: &ObjectId,
        category: &CategoryRef,
    ) -> Result<(), StoreError> {
        let mut products = self.products()?;
        if let Some(product) = products.iter_mut().find(|p| p.id == *product_id) {
            product.category = category.clone();
            product.updated_at = Utc::now();
        }
        Ok(())
    }

    fn count(&self) -> Result<u64, StoreError> {
        Ok(self.products()?.len() as u64)
    }

    fn count_by_category(&self, category_id: &ObjectId) -> Result<u64, StoreError> {
        let count = self
            .products()?
            .iter()
            .filter(|p| p.category == CategoryRef::Id(*category_id))
            .count();
        Ok(count as u64)
    }

    fn count_with_valid_category(&self) -> Result<u64, StoreError> {
        let categories = self.categories()?;
        let products = self.products()?;
        let count = products
            .iter()
            .filter(|p| match &p.category {
                CategoryRef::Id(id) => categories.iter().any(|c| c.id == *id),
                CategoryRef::Slug(_) => false,
            })
            .count();
        Ok(count as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product_with_category(title: &str, category: CategoryRef) -> Product {
        let mut product = Product::new(title, "cobertura", "Desde $10.000", category);
        product.icon = "shield".to_string();
        product.features = vec!["Cobertura total".to_string()];
        product
    }

    #[test]
    fn test_category_round_trip() {
        let store = MemoryStore::new();
        let category = Category::new("Salud", "salud");
        CategoryStore::insert(&store, &category).unwrap();

        let by_slug = store.find_by_slug("salud").unwrap().unwrap();
        assert_eq!(by_slug.id, category.id);
        assert!(store.find_by_slug("missing").unwrap().is_none());
    }

    #[test]
    fn test_find_matching_filters_and_paginates() {
        let store = MemoryStore::new();
        for (name, slug, order, active) in [
            ("Personal", "personal", 1, true),
            ("Empresarial", "empresarial", 2, true),
            ("Salud", "salud", 3, false),
        ] {
            let mut category = Category::new(name, slug);
            category.order = order;
            category.active = active;
            CategoryStore::insert(&store, &category).unwrap();
        }

        let active_only = store
            .find_matching(CategoryQuery {
                active: Some(true),
                ..CategoryQuery::default()
            })
            .unwrap();
        assert_eq!(active_only.len(), 2);

        let second_page = store
            .find_matching(CategoryQuery {
                active: None,
                skip: 1,
                limit: Some(1),
            })
            .unwrap();
        assert_eq!(second_page.len(), 1);
        assert_eq!(second_page[0].slug, "empresarial");
    }

    #[test]
    fn test_count_with_valid_category_joins() {
        let store = MemoryStore::new();
        let category = Category::new("Personal", "personal");
        CategoryStore::insert(&store, &category).unwrap();

        let valid = product_with_category("Vida", CategoryRef::Id(category.id));
        let dangling = product_with_category("Hogar", CategoryRef::Id(ObjectId::new()));
        let legacy = product_with_category("Auto", CategoryRef::Slug("personal".to_string()));
        for product in [&valid, &dangling, &legacy] {
            ProductStore::insert(&store, product).unwrap();
        }

        assert_eq!(store.count_with_valid_category().unwrap(), 1);
        assert_eq!(ProductStore::count(&store).unwrap(), 3);
        assert_eq!(store.count_by_category(&category.id).unwrap(), 1);
    }
}
