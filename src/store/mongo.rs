//! Document-store backends for the persistence ports

use mongodb::bson::oid::ObjectId;
use mongodb::bson::{doc, to_bson, Bson, DateTime, Document};
use mongodb::options::FindOptions;
use mongodb::sync::{Collection, Database};

use crate::error::StoreError;
use crate::model::{Category, CategoryRef, Product};
use crate::store::{CategoryQuery, CategoryStore, ProductStore};

/// Name of the category collection
pub const CATEGORIES_COLLECTION: &str = "categories";
/// Name of the product collection
pub const PRODUCTS_COLLECTION: &str = "products";

/// `CategoryStore` over the `categories` collection
#[derive(Clone)]
pub struct MongoCategoryStore {
    collection: Collection<Category>,
}

impl MongoCategoryStore {
    #[must_use]
    pub fn new(database: &Database) -> Self {
        Self {
            collection: database.collection(CATEGORIES_COLLECTION),
        }
    }
}

fn sorted_by_order_and_name() -> FindOptions {
    let mut options = FindOptions::default();
    options.sort = Some(doc! { "order": 1, "name": 1 });
    options
}

fn sorted_by_order_and_recency() -> FindOptions {
    let mut options = FindOptions::default();
    options.sort = Some(doc! { "order": 1, "createdAt": -1 });
    options
}

impl CategoryStore for MongoCategoryStore {
    fn insert(&self, category: &Category) -> Result<(), StoreError> {
        self.collection.insert_one(category, None)?;
        Ok(())
    }

    fn find_by_id(&self, id: &ObjectId) -> Result<Option<Category>, StoreError> {
        let found = self.collection.find_one(doc! { "_id": *id }, None)?;
        Ok(found)
    }

    fn find_by_slug(&self, slug: &str) -> Result<Option<Category>, StoreError> {
        let found = self.collection.find_one(doc! { "slug": slug }, None)?;
        Ok(found)
    }

    fn find_all(&self) -> Result<Vec<Category>, StoreError> {
        let cursor = self
            .collection
            .find(doc! {}, sorted_by_order_and_name())?;
        let categories = cursor.collect::<Result<Vec<_>, _>>()?;
        Ok(categories)
    }

    fn find_matching(&self, query: CategoryQuery) -> Result<Vec<Category>, StoreError> {
        let mut filter = Document::new();
        if let Some(active) = query.active {
            filter.insert("active", active);
        }

        let mut options = sorted_by_order_and_name();
        if query.skip > 0 {
            options.skip = Some(query.skip);
        }
        options.limit = query.limit;

        let cursor = self.collection.find(filter, options)?;
        let categories = cursor.collect::<Result<Vec<_>, _>>()?;
        Ok(categories)
    }

    fn update(&self, category: &Category) -> Result<(), StoreError> {
        self.collection
            .replace_one(doc! { "_id": category.id }, category, None)?;
        Ok(())
    }

    fn delete(&self, id: &ObjectId) -> Result<bool, StoreError> {
        let result = self.collection.delete_one(doc! { "_id": *id }, None)?;
        Ok(result.deleted_count > 0)
    }

    fn count_matching(&self, active: Option<bool>) -> Result<u64, StoreError> {
        let mut filter = Document::new();
        if let Some(active) = active {
            filter.insert("active", active);
        }
        let count = self.collection.count_documents(filter, None)?;
        Ok(count)
    }
}

/// `ProductStore` over the `products` collection
#[derive(Clone)]
pub struct MongoProductStore {
    collection: Collection<Product>,
}

impl MongoProductStore {
    #[must_use]
    pub fn new(database: &Database) -> Self {
        Self {
            collection: database.collection(PRODUCTS_COLLECTION),
        }
    }
}

impl ProductStore for MongoProductStore {
    fn insert(&self, product: &Product) -> Result<(), StoreError> {
        self.collection.insert_one(product, None)?;
        Ok(())
    }

    fn find_all(&self) -> Result<Vec<Product>, StoreError> {
        let cursor = self.collection.find(doc! {}, None)?;
        let products = cursor.collect::<Result<Vec<_>, _>>()?;
        Ok(products)
    }

    fn find_by_category(&self, category_id: &ObjectId) -> Result<Vec<Product>, StoreError> {
        let cursor = self.collection.find(
            doc! { "category": *category_id, "active": true },
            sorted_by_order_and_recency(),
        )?;
        let products = cursor.collect::<Result<Vec<_>, _>>()?;
        Ok(products)
    }

    fn find_featured(&self) -> Result<Vec<Product>, StoreError> {
        let cursor = self.collection.find(
            doc! { "featured": true, "active": true },
            sorted_by_order_and_recency(),
        )?;
        let products = cursor.collect::<Result<Vec<_>, _>>()?;
        Ok(products)
    }

    fn find_popular(&self) -> Result<Vec<Product>, StoreError> {
        let cursor = self.collection.find(
            doc! { "popular": true, "active": true },
            sorted_by_order_and_recency(),
        )?;
        let products = cursor.collect::<Result<Vec<_>, _>>()?;
        Ok(products)
    }

    fn update_category(
        &self,
        product_id: &ObjectId,
        category: &CategoryRef,
    ) -> Result<(), StoreError> {
        let value = to_bson(category)?;
        self.collection.update_one(
            doc! { "_id": *product_id },
            doc! { "$set": { "category": value, "updatedAt": DateTime::now() } },
            None,
        )?;
        Ok(())
    }

    fn count(&self) -> Result<u64, StoreError> {
        let count = self.collection.count_documents(doc! {}, None)?;
        Ok(count)
    }

    fn count_by_category(&self, category_id: &ObjectId) -> Result<u64, StoreError> {
        let count = self
            .collection
            .count_documents(doc! { "category": *category_id }, None)?;
        Ok(count)
    }

    fn count_with_valid_category(&self) -> Result<u64, StoreError> {
        let pipeline = vec![
            doc! {
                "$lookup": {
                    "from": CATEGORIES_COLLECTION,
                    "localField": "category",
                    "foreignField": "_id",
                    "as": "categoryData",
                }
            },
            doc! { "$match": { "categoryData.0": { "$exists": true } } },
            doc! { "$count": "validCount" },
        ];

        let mut cursor = self.collection.aggregate(pipeline, None)?;
        // An empty pipeline result means no product joined a category
        match cursor.next() {
            Some(result) => {
                let document = result?;
                Ok(count_from(&document, "validCount"))
            }
            None => Ok(0),
        }
    }
}

fn count_from(document: &Document, key: &str) -> u64 {
    match document.get(key) {
        Some(Bson::Int32(n)) => u64::try_from(*n).unwrap_or(0),
        Some(Bson::Int64(n)) => u64::try_from(*n).unwrap_or(0),
        _ => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_count_from_handles_both_int_widths() {
        let mut document = Document::new();
        document.insert("validCount", Bson::Int32(4));
        assert_eq!(count_from(&document, "validCount"), 4);

        document.insert("validCount", Bson::Int64(9));
        assert_eq!(count_from(&document, "validCount"), 9);

        assert_eq!(count_from(&document, "missing"), 0);
    }
}
