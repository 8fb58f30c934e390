//! Shared test utilities.
//!
//! Synthetic images (encoded and raw) and a scripted [`RandomSource`] that
//! replays fixed draws, so transform tests can assert exact geometry.
//! Mocks for the seam traits live next to each trait, in that module's
//! `tests` block.

use crate::imaging::RandomSource;
use image::{ExtendedColorType, ImageEncoder, Rgb, RgbImage, RgbaImage};

// =========================================================================
// Synthetic images
// =========================================================================

/// Smooth two-axis gradient.
pub fn gradient_image(width: u32, height: u32) -> RgbImage {
    RgbImage::from_fn(width, height, |x, y| {
        Rgb([(x % 256) as u8, (y % 256) as u8, 128])
    })
}

/// Deterministic high-entropy image that compresses poorly.
pub fn noise_image(width: u32, height: u32) -> RgbImage {
    let mut state: u32 = 0x2545_f491;
    RgbImage::from_fn(width, height, |_, _| {
        let mut next = || {
            state ^= state << 13;
            state ^= state >> 17;
            state ^= state << 5;
            (state & 0xff) as u8
        };
        Rgb([next(), next(), next()])
    })
}

/// Encoded JPEG of a [`gradient_image`].
pub fn synthetic_jpeg(width: u32, height: u32) -> Vec<u8> {
    let img = gradient_image(width, height);
    let mut buf = Vec::new();
    image::codecs::jpeg::JpegEncoder::new_with_quality(&mut buf, 90)
        .write_image(img.as_raw(), width, height, ExtendedColorType::Rgb8)
        .unwrap();
    buf
}

/// Encoded RGBA PNG with partial transparency.
pub fn png_bytes(width: u32, height: u32) -> Vec<u8> {
    let img = RgbaImage::from_fn(width, height, |x, _| {
        image::Rgba([200, 100, 50, if x % 2 == 0 { 255 } else { 64 }])
    });
    let mut buf = Vec::new();
    image::codecs::png::PngEncoder::new(&mut buf)
        .write_image(img.as_raw(), width, height, ExtendedColorType::Rgba8)
        .unwrap();
    buf
}

// =========================================================================
// Scripted randomness
// =========================================================================

/// [`RandomSource`] replaying fixed answers.
///
/// `coins` feeds [`RandomSource::coin`]; `numbers` feeds both `below` and
/// `between`, in call order. An exhausted script answers `true` for coins
/// and the lowest legal value for numbers.
#[derive(Debug, Default)]
pub struct ScriptedRandom {
    coins: std::collections::VecDeque<bool>,
    numbers: std::collections::VecDeque<u32>,
}

impl ScriptedRandom {
    pub fn new(coins: Vec<bool>, numbers: Vec<u32>) -> Self {
        Self {
            coins: coins.into(),
            numbers: numbers.into(),
        }
    }
}

impl RandomSource for ScriptedRandom {
    fn coin(&mut self) -> bool {
        self.coins.pop_front().unwrap_or(true)
    }

    fn below(&mut self, len: usize) -> usize {
        let n = self.numbers.pop_front().unwrap_or(0) as usize;
        assert!(n < len, "scripted draw {n} out of range 0..{len}");
        n
    }

    fn between(&mut self, lo: u32, hi: u32) -> u32 {
        let n = self.numbers.pop_front().unwrap_or(lo);
        assert!((lo..=hi).contains(&n), "scripted draw {n} out of range {lo}..={hi}");
        n
    }
}
