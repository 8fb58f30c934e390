//! Pure Rust transform pipeline.
//!
//! ## Crate mapping
//!
//! | Step | Crate / function |
//! |---|---|
//! | Decode (JPEG, PNG, TIFF, WebP) | `image::load_from_memory` |
//! | Downscale | `image::imageops::resize` with `Lanczos3` |
//! | Crop | `image::imageops::crop_imm` |
//! | Border | `image::imageops::replace` onto a filled canvas |
//! | Rotate | `imageproc::geometric_transformations::rotate_about_center` |
//! | Recompress | `image::codecs::jpeg::JpegEncoder` quality ladder |

use super::backend::{ImageTransform, ProcessedImage, TransformError};
use super::operations::{add_border, crop, decode, decode_jpeg, downscale, recompress, rotate};
use super::params::{BORDER_WIDTH, CROP_WIDTH, MAX_DIMENSION, TransformParams};
use super::random::RandomSource;
use tracing::debug;

/// The production [`ImageTransform`].
///
/// Owns its random source, so two pipelines seeded alike make identical
/// choices for identical inputs.
pub struct RustPipeline<R> {
    rng: R,
    budget_bytes: usize,
}

impl<R: RandomSource> RustPipeline<R> {
    pub fn new(rng: R, budget_bytes: usize) -> Self {
        Self { rng, budget_bytes }
    }

    /// Run every step with parameters chosen by the caller.
    pub fn transform_with(
        &self,
        raw: &[u8],
        params: TransformParams,
    ) -> Result<ProcessedImage, TransformError> {
        let img = decode(raw)?;
        let (src_w, src_h) = img.dimensions();

        let img = downscale(img, MAX_DIMENSION);
        let (img, cropped) = crop(img, params.crop, CROP_WIDTH);
        if !cropped {
            debug!(width = img.width(), "image too narrow to crop, step skipped");
        }
        let bordered = add_border(&img, BORDER_WIDTH, params.border);
        let rotated = rotate(&bordered, params.rotation, params.border);

        let compressed = recompress(&rotated, self.budget_bytes)?;
        debug!(
            source = %format!("{src_w}x{src_h}"),
            output = %format!("{}x{}", rotated.width(), rotated.height()),
            quality = compressed.quality.value(),
            bytes = compressed.jpeg.len(),
            attempts = compressed.attempts.len(),
            "transformed image"
        );

        let pixels = decode_jpeg(&compressed.jpeg)?;
        Ok(ProcessedImage {
            pixels,
            jpeg: compressed.jpeg,
            quality: compressed.quality,
            params,
        })
    }
}

impl<R: RandomSource> ImageTransform for RustPipeline<R> {
    fn transform(&mut self, raw: &[u8]) -> Result<ProcessedImage, TransformError> {
        // Bad input fails before any draw so the sequence is not consumed
        image::guess_format(raw).map_err(TransformError::Decode)?;
        let params = TransformParams::choose(&mut self.rng);
        self.transform_with(raw, params)
    }
}
