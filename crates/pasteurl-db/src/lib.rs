//! pasteurl Database Library
//!
//! SQLite-backed image catalog. The `images` table maps a content fingerprint
//! to its stored filename and upload metadata, and its UNIQUE constraint on
//! `hash` is what settles concurrent uploads of identical content.

pub mod catalog;
pub mod pool;
pub mod repository;

pub use catalog::{CatalogError, ImageCatalog};
pub use pool::{connect_pool, is_memory_url, run_migrations};
pub use repository::ImageRepository;
