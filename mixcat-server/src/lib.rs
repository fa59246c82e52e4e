//! mixcat-server: HTTP server for the beverage catalog
//!
//! Validated CRUD for categories, drinks, and recipes, an image asset
//! store tied to entity mutation, and a fanned-out dashboard aggregation.
//! Storage is behind the [`db::CatalogStore`] trait so handlers run
//! identically against PostgreSQL or the in-memory backend.

pub mod assets;
pub mod db;
pub mod http;
pub mod models;

pub use assets::AssetStore;
pub use db::{CatalogStore, MemoryCatalog, PgCatalog};
pub use http::{run_server, AppState, ServerConfig};
