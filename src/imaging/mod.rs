//! Image transforms in pure Rust, no system libraries.
//!
//! | Step | What happens |
//! |---|---|
//! | **Decode** | raw download bytes → RGB8 |
//! | **Downscale** | longer side capped at 1500 |
//! | **Crop** | 100 columns off the left or right edge |
//! | **Border** | 20px frame in a rainbow color |
//! | **Rotate** | ±4–10°, canvas grows, corners take the border color |
//! | **Recompress** | JPEG quality 85 → 20 in steps of 5 under a size budget |
//!
//! The module is split into:
//! - **Calculations**: Pure functions for dimension math (unit testable)
//! - **Parameters**: Constants and the per-image random choices
//! - **Random**: [`RandomSource`] seam over `rand`
//! - **Backend**: [`ImageTransform`] trait + [`ProcessedImage`]
//! - **Operations**: One function per pixel step
//! - **Pipeline**: [`RustPipeline`], the steps in order

pub mod backend;
pub mod calculations;
pub mod operations;
mod params;
mod random;
pub mod rust_backend;

pub use backend::{CompressionAttempt, ImageTransform, ProcessedImage, TransformError};
pub use params::{
    BORDER_WIDTH, BorderColor, CROP_WIDTH, CropSide, MAX_DIMENSION, QUALITY_FLOOR,
    QUALITY_START, QUALITY_STEP, Quality, RAINBOW, ROTATION_RANGE, Rotation, TransformParams,
};
pub use random::{RandomSource, RngSource};
pub use rust_backend::RustPipeline;
