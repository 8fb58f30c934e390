//! Names derived from the search keyword.
//!
//! The translated keyword ends up in two places: every archive entry
//! (`{base}_{i}.jpg`) and the archive file itself
//! (`{base}_processed_images.zip`). Since both are paths, the keyword first
//! goes through [`sanitize_base`]:
//!
//! - `"cat"` → `"cat"`
//! - `"  sea otter "` → `"sea otter"`
//! - `"AC/DC"` → `"AC_DC"`
//! - `"..."` → `"images"`

/// Base name used when the keyword sanitizes to nothing.
pub const FALLBACK_BASE: &str = "images";

/// Make a keyword safe for use as a file name and zip entry prefix.
///
/// Path separators and control characters become `_`, surrounding
/// whitespace is trimmed, and a result made only of dots (or nothing at all)
/// falls back to [`FALLBACK_BASE`].
pub fn sanitize_base(keyword: &str) -> String {
    let cleaned: String = keyword
        .trim()
        .chars()
        .map(|c| {
            if c == '/' || c == '\\' || c.is_control() {
                '_'
            } else {
                c
            }
        })
        .collect();
    if cleaned.chars().all(|c| c == '.') {
        FALLBACK_BASE.to_string()
    } else {
        cleaned
    }
}

/// Archive entry name for the image at 1-based `index`.
pub fn entry_name(base: &str, index: usize) -> String {
    format!("{}_{}.jpg", base, index)
}

/// File name the archive is delivered as.
pub fn archive_file_name(base: &str) -> String {
    format!("{}_processed_images.zip", base)
}
