//! Upload fixtures.

use axum_test::multipart::{MultipartForm, Part};

/// MD5 of "abc".
pub const ABC_HASH: &str = "900150983cd24fb0d6963f7d28e17f72";

/// Multipart form carrying `data` in the `image` field.
pub fn image_form(data: &[u8], file_name: &str, mime_type: &str) -> MultipartForm {
    let part = Part::bytes(bytes::Bytes::copy_from_slice(data))
        .file_name(file_name)
        .mime_type(mime_type);
    MultipartForm::new().add_part("image", part)
}

/// PNG signature followed by filler bytes derived from `seed`.
pub fn create_png_like(seed: u8) -> Vec<u8> {
    let mut data = vec![0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];
    data.extend(std::iter::repeat(seed).take(64));
    data
}
