//! pasteurl Core Library
//!
//! This crate provides the domain models, error types, configuration and the
//! content fingerprint shared across all pasteurl components.

pub mod config;
pub mod error;
pub mod fingerprint;
pub mod models;
pub mod naming;

// Re-export commonly used types
pub use config::Config;
pub use error::{AppError, ErrorMetadata, LogLevel};
pub use fingerprint::{fingerprint, is_fingerprint};
pub use naming::{extension_for, retrieval_url, stored_filename, DEFAULT_EXTENSION, DEFAULT_MIME_TYPE};
