//! pasteurl API Library
//!
//! HTTP handlers, the upload/retrieval service and application setup.

mod api_doc;
mod handlers;
mod telemetry;
mod utils;

pub mod error;
pub mod middleware;
pub mod services;
pub mod setup;
pub mod state;

pub use api_doc::get_openapi_spec;
pub use error::{ErrorResponse, HttpAppError};
pub use services::{ImageService, RetrievedImage, UploadOutcome};
pub use state::AppState;
