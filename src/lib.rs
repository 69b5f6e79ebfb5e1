//! # Corredora
//!
//! Catalog data platform for an insurance brokerage: typed domain models,
//! a document-store persistence layer, admin catalog services, and the
//! category migration engine driven by the `corredora-migrate` CLI.
//!
//! See [README on GitHub](https://github.com/corredora/corredora) for full architecture.

pub mod catalog;
pub mod config;
pub mod connection;
pub mod error;
pub mod migration;
pub mod model;
pub mod store;

pub use connection::{connect, database_from, ConnectionError};
pub use error::StoreError;
pub use model::{Category, CategoryRef, Product};
pub use store::{CategoryStore, ProductStore};
