//! Transform trait and shared types.
//!
//! The [`ImageTransform`] trait is the seam between the acquisition loop and
//! the pixel work. The production implementation is
//! [`RustPipeline`](super::rust_backend::RustPipeline); tests substitute a
//! mock that records calls and fails on demand.

use super::params::{Quality, TransformParams};
use image::RgbImage;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TransformError {
    #[error("Failed to decode image: {0}")]
    Decode(#[source] image::ImageError),
    #[error("JPEG encode failed: {0}")]
    Encode(#[source] image::ImageError),
    #[error("Processing failed: {0}")]
    ProcessingFailed(String),
}

/// One size measurement taken by the recompression loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompressionAttempt {
    pub quality: Quality,
    pub bytes: usize,
}

/// An image after the full transform sequence.
///
/// `pixels` is decoded back from `jpeg`, so it shows exactly what the
/// archive entry will contain.
#[derive(Debug, Clone)]
pub struct ProcessedImage {
    pub pixels: RgbImage,
    pub jpeg: Vec<u8>,
    pub quality: Quality,
    pub params: TransformParams,
}

impl ProcessedImage {
    pub fn dimensions(&self) -> (u32, u32) {
        self.pixels.dimensions()
    }

    pub fn encoded_len(&self) -> usize {
        self.jpeg.len()
    }
}

/// Turns downloaded bytes into a [`ProcessedImage`].
///
/// Takes `&mut self` because implementations draw random parameters.
pub trait ImageTransform {
    fn transform(&mut self, raw: &[u8]) -> Result<ProcessedImage, TransformError>;
}
