pub mod images;

pub use images::{ImageService, RetrievedImage, UploadOutcome};
