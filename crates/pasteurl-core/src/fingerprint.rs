//! Content fingerprint.
//!
//! The fingerprint is the MD5 digest of the full blob, rendered as 32 lowercase
//! hex characters. It is both the catalog key and the stem of the stored
//! filename, and it is embedded in every retrieval URL, so changing the function
//! invalidates every URL ever handed out. Clients compute the same digest
//! locally to ask `/check/{hash}` before uploading.

use md5::{Digest, Md5};

/// Length of a rendered fingerprint in characters.
pub const FINGERPRINT_LEN: usize = 32;

/// Compute the fingerprint of `content`.
pub fn fingerprint(content: &[u8]) -> String {
    let mut hasher = Md5::new();
    hasher.update(content);
    hex::encode(hasher.finalize())
}

/// Whether `value` has the shape of a fingerprint (32 lowercase hex chars).
pub fn is_fingerprint(value: &str) -> bool {
    value.len() == FINGERPRINT_LEN
        && value
            .bytes()
            .all(|b| b.is_ascii_digit() || (b'a'..=b'f').contains(&b))
}
