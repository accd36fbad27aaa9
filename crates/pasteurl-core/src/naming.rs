//! Stored filename and retrieval URL derivation.

/// Extension used when the original name carries none.
pub const DEFAULT_EXTENSION: &str = ".jpg";

/// MIME type served when a record has none.
pub const DEFAULT_MIME_TYPE: &str = "image/jpeg";

const MAX_EXTENSION_LEN: usize = 16;

/// Extension (with leading dot) taken from a client-supplied original name.
///
/// Only the final path component is considered. A leading dot does not start an
/// extension (`.bashrc` has none), and anything but 1-16 ASCII alphanumerics after
/// the last dot falls back to [`DEFAULT_EXTENSION`], so the result is always safe
/// to use as part of a storage filename.
pub fn extension_for(original_name: Option<&str>) -> String {
    let Some(name) = original_name else {
        return DEFAULT_EXTENSION.to_string();
    };

    let base = name
        .rsplit(|c| c == '/' || c == '\\')
        .next()
        .unwrap_or(name);

    match base.rfind('.') {
        Some(idx) if idx > 0 => {
            let suffix = &base[idx + 1..];
            if !suffix.is_empty()
                && suffix.len() <= MAX_EXTENSION_LEN
                && suffix.chars().all(|c| c.is_ascii_alphanumeric())
            {
                format!(".{}", suffix)
            } else {
                DEFAULT_EXTENSION.to_string()
            }
        }
        _ => DEFAULT_EXTENSION.to_string(),
    }
}

/// Filename a blob is stored under: `{hash}{ext}`.
pub fn stored_filename(hash: &str, original_name: Option<&str>) -> String {
    format!("{}{}", hash, extension_for(original_name))
}

/// Public retrieval URL for a hash: `{base}/image/{hash}`.
pub fn retrieval_url(base_url: &str, hash: &str) -> String {
    format!("{}/image/{}", base_url.trim_end_matches('/'), hash)
}
