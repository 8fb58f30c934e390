//! CLI output formatting.
//!
//! Every function here is pure: it turns a value into display lines and
//! leaves printing to the caller, so the layout is testable.
//!
//! # Output Format
//!
//! ```text
//! Keyword: 고양이 → cat
//! Page 1
//!     001/035 https://images.pexels.com/photos/1/a.jpeg
//!         148 KB, quality 85
//!     ! https://images.pexels.com/photos/2/b.jpeg
//!         download of https://... returned status 404
//! Page 2
//!     ...
//! Collected 35 of 35 images
//! Archive: ./cat_processed_images.zip (35 entries, 5120 KB)
//! ```
//!
//! Diagnostics go through `tracing` to stderr; these lines are the user
//! facing progress display on stdout.

use crate::acquire::AcquireEvent;
use crate::archive::Archive;
use std::path::Path;

/// Format a 1-based position as three digits.
fn format_index(pos: usize) -> String {
    format!("{:03}", pos)
}

fn kib(bytes: usize) -> usize {
    bytes.div_ceil(1024)
}

/// Keyword line, showing the translation when it changed anything.
pub fn format_query(keyword: &str, query: &str) -> String {
    if keyword.trim() == query {
        format!("Keyword: {}", query)
    } else {
        format!("Keyword: {} → {}", keyword.trim(), query)
    }
}

/// Format a single progress event as display lines.
pub fn format_acquire_event(event: &AcquireEvent) -> Vec<String> {
    match event {
        AcquireEvent::QueryResolved { keyword, query } => vec![format_query(keyword, query)],
        AcquireEvent::PageRequested { page } => vec![format!("Page {}", page)],
        AcquireEvent::ImageAdded {
            index,
            quota,
            url,
            bytes,
            quality,
        } => vec![
            format!("    {}/{} {}", format_index(*index), format_index(*quota), url),
            format!("        {} KB, quality {}", kib(*bytes), quality),
        ],
        AcquireEvent::ItemFailed { url, error } => {
            vec![format!("    ! {}", url), format!("        {}", error)]
        }
        AcquireEvent::SearchStopped { page, error } => {
            vec![format!("Search stopped at page {}: {}", page, error)]
        }
        AcquireEvent::Finished { collected, quota } => {
            vec![format!("Collected {} of {} images", collected, quota)]
        }
    }
}

/// Summary line for a saved archive.
pub fn format_archive_saved(archive: &Archive, path: &Path) -> String {
    format!(
        "Archive: {} ({} entries, {} KB)",
        path.display(),
        archive.entries.len(),
        kib(archive.bytes.len())
    )
}

/// Warning shown when no image survived.
pub fn format_nothing_to_download(query: &str) -> String {
    format!("No images to download for \"{}\"", query)
}
