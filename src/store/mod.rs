//! Persistence ports for the catalog
//!
//! The migration engine and the catalog services talk to these traits, not
//! to a concrete driver. [`mongo`] implements them over the document store;
//! [`memory`] implements them in-process for tests and embedding.

pub mod memory;
pub mod mongo;

pub use memory::MemoryStore;
pub use mongo::{MongoCategoryStore, MongoProductStore};

use mongodb::bson::oid::ObjectId;

use crate::error::StoreError;
use crate::model::{Category, CategoryRef, Product};

/// Filtering and pagination for category listings
#[derive(Debug, Clone, Copy, Default)]
pub struct CategoryQuery {
    /// Restrict to a given activation state (`None` = all)
    pub active: Option<bool>,
    /// Number of matching documents to skip
    pub skip: u64,
    /// Page size (`None` = unbounded)
    pub limit: Option<i64>,
}

/// Category collection operations
pub trait CategoryStore: Send + Sync {
    /// Persist a new category
    fn insert(&self, category: &Category) -> Result<(), StoreError>;

    /// Fetch a category by id
    fn find_by_id(&self, id: &ObjectId) -> Result<Option<Category>, StoreError>;

    /// Fetch a category by its unique slug
    fn find_by_slug(&self, slug: &str) -> Result<Option<Category>, StoreError>;

    /// Fetch every category, sorted by `(order, name)`
    fn find_all(&self) -> Result<Vec<Category>, StoreError>;

    /// Fetch categories matching `query`, sorted by `(order, name)`
    fn find_matching(&self, query: CategoryQuery) -> Result<Vec<Category>, StoreError>;

    /// Replace a category document by id
    fn update(&self, category: &Category) -> Result<(), StoreError>;

    /// Delete a category by id; returns whether a document was removed
    fn delete(&self, id: &ObjectId) -> Result<bool, StoreError>;

    /// Count categories matching an activation filter (`None` = all)
    fn count_matching(&self, active: Option<bool>) -> Result<u64, StoreError>;
}

/// Product collection operations
pub trait ProductStore: Send + Sync {
    /// Persist a new product
    fn insert(&self, product: &Product) -> Result<(), StoreError>;

    /// Fetch every product, in no guaranteed order
    fn find_all(&self) -> Result<Vec<Product>, StoreError>;

    /// Active products referencing `category_id`, sorted by `(order, created_at desc)`
    fn find_by_category(&self, category_id: &ObjectId) -> Result<Vec<Product>, StoreError>;

    /// Active featured products, sorted by `(order, created_at desc)`
    fn find_featured(&self) -> Result<Vec<Product>, StoreError>;

    /// Active popular products, sorted by `(order, created_at desc)`
    fn find_popular(&self) -> Result<Vec<Product>, StoreError>;

    /// Rewrite the category field of one product in place
    fn update_category(
        &self,
        product_id: &ObjectId,
        category: &CategoryRef,
    ) -> Result<(), StoreError>;

    /// Count all products
    fn count(&self) -> Result<u64, StoreError>;

    /// Count products referencing `category_id`
    fn count_by_category(&self, category_id: &ObjectId) -> Result<u64, StoreError>;

    /// Count products whose category field resolves, via a join against the
    /// category collection, to an existing category
    fn count_with_valid_category(&self) -> Result<u64, StoreError>;
}
