use chrono::{DateTime, Utc};
use pasteurl_core::models::ImageSummary;

/// Truncate a string to max_len characters, appending "..." if truncated.
pub fn truncate_string(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

/// Human-readable byte count (B, KB, MB).
pub fn format_size(bytes: i64) -> String {
    const KB: f64 = 1024.0;
    let b = bytes as f64;
    if b < KB {
        format!("{} B", bytes)
    } else if b < KB * KB {
        format!("{:.1} KB", b / KB)
    } else {
        format!("{:.1} MB", b / (KB * KB))
    }
}

fn format_timestamp(ts: &DateTime<Utc>) -> String {
    ts.format("%Y-%m-%d %H:%M:%S").to_string()
}

/// One table row per image: hash, size, upload time and original name.
pub fn format_image_table(images: &[ImageSummary]) -> String {
    let mut out = format!("{:<32}  {:>9}  {:<19}  {}\n", "HASH", "SIZE", "UPLOADED", "NAME");
    for image in images {
        out.push_str(&format!(
            "{:<32}  {:>9}  {:<19}  {}\n",
            image.hash,
            format_size(image.size),
            format_timestamp(&image.uploaded_at),
            truncate_string(image.original_name.as_deref().unwrap_or("-"), 40),
        ));
    }
    out
}

/// Initialize tracing for CLI binaries. Logs go to stderr so stdout stays
/// machine-readable.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();
}
