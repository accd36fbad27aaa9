//! pasteurl Storage Library
//!
//! Content store for uploaded blobs. Files live flat under a single storage
//! root and are named `{hash}{ext}`, so the filename is fully determined by the
//! content. Keys must not contain `..`, path separators, or be empty.

pub mod factory;
pub mod local;
pub mod traits;

// Re-export commonly used types
pub use factory::create_storage;
pub use local::LocalStorage;
pub use traits::{Storage, StorageError, StorageResult};
