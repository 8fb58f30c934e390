//! The individual transform steps.
//!
//! Each function does one pixel operation on an RGB8 buffer. Geometry comes
//! from [`calculations`](super::calculations); the random choices arrive
//! already made, as [`params`](super::params) values.

use super::backend::{CompressionAttempt, TransformError};
use super::calculations::{bordered_dimensions, crop_window, fit_within, quality_ladder, rotated_bounds};
use super::params::{BorderColor, CropSide, Quality, Rotation};
use image::imageops::{self, FilterType};
use image::{ExtendedColorType, ImageEncoder, ImageFormat, RgbImage};
use imageproc::geometric_transformations::{Interpolation, rotate_about_center};

/// Result type for image operations.
pub type Result<T> = std::result::Result<T, TransformError>;

/// Decode any compiled-in format into an RGB8 buffer. Alpha is dropped.
pub fn decode(raw: &[u8]) -> Result<RgbImage> {
    image::load_from_memory(raw)
        .map(|img| img.to_rgb8())
        .map_err(TransformError::Decode)
}

/// Shrink so the longer side equals `max`. Images that fit are returned as is.
pub fn downscale(img: RgbImage, max: u32) -> RgbImage {
    match fit_within(img.dimensions(), max) {
        Some((w, h)) => imageops::resize(&img, w, h, FilterType::Lanczos3),
        None => img,
    }
}

/// Trim `amount` columns from `side`.
///
/// Images not wider than `amount` pass through untouched; the second value
/// reports whether a crop happened.
pub fn crop(img: RgbImage, side: CropSide, amount: u32) -> (RgbImage, bool) {
    match crop_window(img.dimensions(), side, amount) {
        Some((x, y, w, h)) => (imageops::crop_imm(&img, x, y, w, h).to_image(), true),
        None => (img, false),
    }
}

/// Expand the canvas by `border` on every side, filled with `color`.
pub fn add_border(img: &RgbImage, border: u32, color: BorderColor) -> RgbImage {
    let (w, h) = bordered_dimensions(img.dimensions(), border);
    let mut canvas = RgbImage::from_pixel(w, h, color.rgb());
    imageops::replace(&mut canvas, img, border as i64, border as i64);
    canvas
}

/// Rotate by `rotation`, growing the canvas to hold every rotated pixel.
///
/// The image is first centered on a canvas of the final size, then rotated
/// in place; corners that uncover nothing get `fill`.
pub fn rotate(img: &RgbImage, rotation: Rotation, fill: BorderColor) -> RgbImage {
    let (w, h) = img.dimensions();
    let (cw, ch) = rotated_bounds((w, h), rotation.degrees() as f64);
    let mut canvas = RgbImage::from_pixel(cw, ch, fill.rgb());
    let x = (cw as i64 - w as i64) / 2;
    let y = (ch as i64 - h as i64) / 2;
    imageops::replace(&mut canvas, img, x, y);

    // imageproc turns clockwise for positive theta
    rotate_about_center(
        &canvas,
        -rotation.radians(),
        Interpolation::Bilinear,
        fill.rgb(),
    )
}

/// Encode as baseline JPEG at `quality`.
pub fn encode_jpeg(img: &RgbImage, quality: Quality) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    image::codecs::jpeg::JpegEncoder::new_with_quality(&mut buf, quality.value())
        .write_image(img.as_raw(), img.width(), img.height(), ExtendedColorType::Rgb8)
        .map_err(TransformError::Encode)?;
    Ok(buf)
}

/// Output of [`recompress`].
#[derive(Debug, Clone)]
pub struct Compressed {
    pub jpeg: Vec<u8>,
    pub quality: Quality,
    /// Every encode performed, in ladder order.
    pub attempts: Vec<CompressionAttempt>,
}

/// Walk the quality ladder until the encoded size fits `budget` bytes.
///
/// The ladder ends at its floor, so the result can still exceed the budget.
pub fn recompress(img: &RgbImage, budget: usize) -> Result<Compressed> {
    let mut attempts = Vec::new();
    let mut last = None;

    for quality in quality_ladder() {
        let jpeg = encode_jpeg(img, quality)?;
        attempts.push(CompressionAttempt {
            quality,
            bytes: jpeg.len(),
        });
        let fits = jpeg.len() <= budget;
        last = Some((jpeg, quality));
        if fits {
            break;
        }
    }

    let (jpeg, quality) =
        last.ok_or_else(|| TransformError::ProcessingFailed("empty quality ladder".into()))?;
    Ok(Compressed {
        jpeg,
        quality,
        attempts,
    })
}

/// Decode the final JPEG back into pixels.
pub fn decode_jpeg(jpeg: &[u8]) -> Result<RgbImage> {
    image::load_from_memory_with_format(jpeg, ImageFormat::Jpeg)
        .map(|img| img.to_rgb8())
        .map_err(TransformError::Decode)
}
