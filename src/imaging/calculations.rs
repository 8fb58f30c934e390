//! Pure calculation functions for image geometry and the quality ladder.
//!
//! All functions here are pure and testable without any I/O or pixels.

use super::params::{CropSide, Quality, QUALITY_FLOOR, QUALITY_START, QUALITY_STEP};

/// Dimensions after fitting inside a `max × max` box.
///
/// Returns `None` when the image already fits (no upscaling, ever). Otherwise
/// the longer side becomes exactly `max` and the shorter side is scaled by the
/// same factor and rounded, never below 1.
///
/// # Examples
/// ```
/// # use pixcrawl::imaging::calculations::fit_within;
/// assert_eq!(fit_within((3000, 2000), 1500), Some((1500, 1000)));
/// assert_eq!(fit_within((1200, 800), 1500), None);
/// ```
pub fn fit_within(dims: (u32, u32), max: u32) -> Option<(u32, u32)> {
    let (w, h) = dims;
    let longer = w.max(h);
    if longer <= max {
        return None;
    }
    let scale = |side: u32| ((side as f64 * max as f64 / longer as f64).round() as u32).max(1);
    if w >= h {
        Some((max, scale(h)))
    } else {
        Some((scale(w), max))
    }
}

/// Crop window `(x, y, width, height)` trimming `amount` columns from `side`.
///
/// Returns `None` when the image is not wider than `amount`: the crop would
/// leave nothing, so the step is skipped.
pub fn crop_window(dims: (u32, u32), side: CropSide, amount: u32) -> Option<(u32, u32, u32, u32)> {
    let (w, h) = dims;
    if w <= amount {
        return None;
    }
    let x = match side {
        CropSide::Left => amount,
        CropSide::Right => 0,
    };
    Some((x, 0, w - amount, h))
}

/// Canvas size after adding `border` on all four sides.
pub fn bordered_dimensions(dims: (u32, u32), border: u32) -> (u32, u32) {
    (dims.0 + 2 * border, dims.1 + 2 * border)
}

/// Smallest canvas holding a `dims` rectangle rotated by `degrees`.
///
/// Tiny float error is shaved off before rounding up so that a multiple of
/// 90° does not grow the canvas by a pixel.
pub fn rotated_bounds(dims: (u32, u32), degrees: f64) -> (u32, u32) {
    let (w, h) = (dims.0 as f64, dims.1 as f64);
    let theta = degrees.to_radians();
    let (sin, cos) = (theta.sin().abs(), theta.cos().abs());
    let ceil = |v: f64| (v - 1e-6).ceil().max(1.0) as u32;
    (ceil(w * cos + h * sin), ceil(w * sin + h * cos))
}

/// JPEG qualities to try, in order: start, start - step, ..., floor.
pub fn quality_ladder() -> Vec<Quality> {
    (QUALITY_FLOOR..=QUALITY_START)
        .rev()
        .step_by(QUALITY_STEP as usize)
        .map(Quality::new)
        .collect()
}
