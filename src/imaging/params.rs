//! Parameter types for the transform pipeline.
//!
//! These types describe *what* edit to apply, not *how*. The random choices
//! of a single transform are gathered in [`TransformParams`] so they can be
//! drawn from a [`RandomSource`](super::random::RandomSource) in production
//! and written out literally in tests.
//!
//! ## Types
//!
//! - [`Quality`]: JPEG encoding quality (1–100). Clamped on construction.
//! - [`CropSide`]: Which edge loses [`CROP_WIDTH`] columns.
//! - [`BorderColor`]: One of the seven [`RAINBOW`] palette entries.
//! - [`Rotation`]: Signed whole-degree angle, counter-clockwise positive.
//! - [`TransformParams`]: All of the above for one image.

use super::random::RandomSource;

/// Longer side limit before cropping. Larger images are downscaled to it.
pub const MAX_DIMENSION: u32 = 1500;

/// Columns trimmed from one side of every image.
pub const CROP_WIDTH: u32 = 100;

/// Border margin added on each of the four sides.
pub const BORDER_WIDTH: u32 = 20;

/// Inclusive rotation magnitude range, in degrees.
pub const ROTATION_RANGE: (u32, u32) = (4, 10);

/// JPEG quality ladder: start, step, inclusive floor.
pub const QUALITY_START: u8 = 85;
pub const QUALITY_STEP: u8 = 5;
pub const QUALITY_FLOOR: u8 = 20;

/// Border palette in spectrum order.
pub const RAINBOW: [BorderColor; 7] = [
    BorderColor([255, 0, 0]),
    BorderColor([255, 127, 0]),
    BorderColor([255, 255, 0]),
    BorderColor([0, 255, 0]),
    BorderColor([0, 0, 255]),
    BorderColor([75, 0, 130]),
    BorderColor([143, 0, 255]),
];

/// Quality setting for lossy image encoding (1-100).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Quality(u8);

impl Quality {
    pub fn new(value: u8) -> Self {
        Self(value.clamp(1, 100))
    }

    pub fn value(self) -> u8 {
        self.0
    }
}

impl Default for Quality {
    fn default() -> Self {
        Self(QUALITY_START)
    }
}

/// Edge to trim during the crop step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CropSide {
    Left,
    Right,
}

/// RGB fill used for the border and the rotated corners.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BorderColor(pub [u8; 3]);

impl BorderColor {
    pub fn rgb(self) -> image::Rgb<u8> {
        image::Rgb(self.0)
    }
}

/// Signed rotation in whole degrees. Positive turns counter-clockwise.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rotation(pub i32);

impl Rotation {
    pub fn degrees(self) -> i32 {
        self.0
    }

    pub fn radians(self) -> f32 {
        (self.0 as f32).to_radians()
    }
}

/// Every randomized choice made for one image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransformParams {
    pub crop: CropSide,
    pub border: BorderColor,
    pub rotation: Rotation,
}

impl TransformParams {
    /// Draw crop side, border color, rotation sign and magnitude, in that order.
    pub fn choose(rng: &mut impl RandomSource) -> Self {
        let crop = if rng.coin() {
            CropSide::Left
        } else {
            CropSide::Right
        };
        let border = RAINBOW[rng.below(RAINBOW.len())];
        let sign = if rng.coin() { 1 } else { -1 };
        let (lo, hi) = ROTATION_RANGE;
        let magnitude = rng.between(lo, hi) as i32;
        Self {
            crop,
            border,
            rotation: Rotation(sign * magnitude),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::ScriptedRandom;

    #[test]
    fn quality_clamps_to_valid_range() {
        assert_eq!(Quality::new(0).value(), 1);
        assert_eq!(Quality::new(50).value(), 50);
        assert_eq!(Quality::new(150).value(), 100);
    }

    #[test]
    fn quality_only_built_through_clamp() {
        assert_eq!(Quality::new(255), Quality::new(100));
        assert!(Quality::new(0) > Quality(0));
    }

    #[test]
    fn quality_default_is_ladder_start() {
        assert_eq!(Quality::default().value(), 85);
    }

    #[test]
    fn palette_is_spectrum_ordered_and_distinct() {
        assert_eq!(RAINBOW[0].0, [255, 0, 0]);
        assert_eq!(RAINBOW[6].0, [143, 0, 255]);
        for (i, a) in RAINBOW.iter().enumerate() {
            for b in &RAINBOW[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn rotation_radians_sign() {
        assert!(Rotation(7).radians() > 0.0);
        assert!(Rotation(-4).radians() < 0.0);
    }

    #[test]
    fn choose_follows_scripted_draws() {
        // coin: left, palette index 4 (blue), coin: negative, magnitude 9
        let mut rng = ScriptedRandom::new(vec![true, false], vec![4, 9]);
        let params = TransformParams::choose(&mut rng);
        assert_eq!(params.crop, CropSide::Left);
        assert_eq!(params.border, BorderColor([0, 0, 255]));
        assert_eq!(params.rotation, Rotation(-9));
    }

    #[test]
    fn choose_with_real_rng_stays_in_bounds() {
        use rand::SeedableRng;
        let mut rng = crate::imaging::RngSource::new(rand::rngs::StdRng::seed_from_u64(7));
        for _ in 0..200 {
            let params = TransformParams::choose(&mut rng);
            assert!(RAINBOW.contains(&params.border));
            let magnitude = params.rotation.degrees().unsigned_abs();
            assert!((4..=10).contains(&magnitude), "magnitude {magnitude}");
        }
    }
}
