//! Public URLs for uploaded symbol images.
//!
//! Symbols are stored by the platform's asset storage; this crate only keeps
//! the storage path and derives the URL clients fetch it from.

/// Build the public URL of a stored symbol.
///
/// Absolute `http(s)` paths are returned unchanged; relative storage paths
/// are joined onto `media_url` with exactly one `/` between them.
pub fn symbol_url(media_url: &str, path: &str) -> String {
    if path.starts_with("http://") || path.starts_with("https://") {
        return path.to_string();
    }
    format!(
        "{}/{}",
        media_url.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}
