pub mod image;

pub use image::{
    CheckResponse, HealthResponse, ImageRecord, ImageSummary, NewImageRecord, UploadResponse,
};
