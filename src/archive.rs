//! Zip packaging of a finished collection.
//!
//! Entries are named positionally (`{base}_1.jpg`, `{base}_2.jpg`, ...) in
//! collection order and hold each image's final JPEG bytes, deflated. An
//! empty collection is refused with [`ArchiveError::Empty`] so callers can
//! tell "nothing to download" apart from a real archive.

use crate::acquire::ImageCollection;
use crate::naming::{archive_file_name, entry_name, sanitize_base};
use std::io::{Cursor, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;
use zip::CompressionMethod;
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

#[derive(Error, Debug)]
pub enum ArchiveError {
    #[error("no images to archive")]
    Empty,
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("zip error: {0}")]
    Zip(#[from] zip::result::ZipError),
}

/// A built archive, ready to be written out.
#[derive(Debug, Clone)]
pub struct Archive {
    /// Delivery file name, `{base}_processed_images.zip`.
    pub file_name: String,
    /// Entry names in order.
    pub entries: Vec<String>,
    pub bytes: Vec<u8>,
}

impl Archive {
    /// Write the archive into `dir` under its file name.
    pub fn save_to(&self, dir: &Path) -> Result<PathBuf, ArchiveError> {
        std::fs::create_dir_all(dir)?;
        let path = dir.join(&self.file_name);
        std::fs::write(&path, &self.bytes)?;
        Ok(path)
    }
}

/// Zip every image of `collection` under names derived from `base_name`.
pub fn build_archive(
    collection: &ImageCollection,
    base_name: &str,
) -> Result<Archive, ArchiveError> {
    if collection.is_empty() {
        return Err(ArchiveError::Empty);
    }

    let base = sanitize_base(base_name);
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    let mut entries = Vec::with_capacity(collection.len());

    for (i, image) in collection.iter().enumerate() {
        let name = entry_name(&base, i + 1);
        zip.start_file(name.as_str(), options)?;
        zip.write_all(&image.jpeg)?;
        entries.push(name);
    }

    let bytes = zip.finish()?.into_inner();
    Ok(Archive {
        file_name: archive_file_name(&base),
        entries,
        bytes,
    })
}
