//! Directional lighting gradient, simulating light falling unevenly across a
//! scanned or photographed page.
//!
//! A one dimensional brightness profile is extruded into a light strip on a
//! padded canvas, rotated about the light anchor, cropped back to the image
//! footprint, smoothed and inverted. The resulting mask is blended into the
//! HSV value channel of the image.

use crate::{
    Augmentation, ImageAugmentError, ImageAugmentResult,
    canvas::{self, DecayLaw, LightAnchor, MaskSize},
    colour_space::{self, Hsv},
    decay::{self, DecayMode},
    finisher, transform,
};
use derivative::Derivative;
use derive_setters::Setters;
use image::{DynamicImage, GenericImageView, GrayImage, Luma};
use rand::Rng;
use std::fmt;

pub const STATIC_DECAY_RATE_RANGE: (f32, f32) = (0.2, 2.0);
pub const TRANSPARENCY_RANGE: (f32, f32) = (0.5, 0.85);

/// Lighting gradient configuration. Unset optional parameters are sampled
/// on every run.
#[derive(Debug, Clone, Derivative, Setters)]
#[derivative(Default)]
#[setters(prefix = "with_")]
#[non_exhaustive]
pub struct LightingGradientConfig {
    /// Anchor `(x, y)` of the light strip, also the pivot of the rotation.
    #[setters(strip_option)]
    light_position: Option<(i32, i32)>,

    /// Rotation of the light strip in degrees.
    #[setters(strip_option)]
    direction: Option<i32>,

    #[derivative(Default(value = "255"))]
    max_brightness: i32,

    #[derivative(Default(value = "0"))]
    min_brightness: i32,

    #[derivative(Default(value = "DecayMode::Gaussian"))]
    mode: DecayMode,

    /// Only used by [`DecayMode::LinearStatic`]. Sensible values lie in `[0.2, 2]`.
    #[setters(strip_option)]
    linear_decay_rate: Option<f32>,

    /// Weight of the original value channel, in `[0, 1]`.
    #[setters(strip_option)]
    transparency: Option<f32>,

    #[derivative(Default(value = "1.0"))]
    probability: f32,
}

impl LightingGradientConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Samples every unset parameter for an image of `size`.
    pub fn resolve<R: Rng + ?Sized>(&self, size: MaskSize, rng: &mut R) -> ResolvedLighting {
        let anchor = match self.light_position {
            Some(position) => LightAnchor::from(position),
            None => LightAnchor::new(
                rng.random_range(0..=size.width as i32),
                rng.random_range(0..=size.height as i32),
            ),
        };

        let direction = match self.direction {
            Some(direction) => direction.rem_euclid(360),
            None => rng.random_range(0..360),
        };

        let law = match self.mode {
            DecayMode::Gaussian => DecayLaw::Gaussian,
            DecayMode::LinearStatic => {
                let (low, high) = STATIC_DECAY_RATE_RANGE;
                DecayLaw::Linear {
                    rate: self
                        .linear_decay_rate
                        .unwrap_or_else(|| rng.random_range(low..=high)),
                }
            }
            DecayMode::LinearDynamic => DecayLaw::Linear {
                rate: decay::dynamic_decay_rate(
                    self.max_brightness,
                    self.min_brightness,
                    size.width,
                    size.height,
                ),
            },
        };

        let transparency = match self.transparency {
            Some(value) if (0.0..=1.0).contains(&value) => value,
            Some(value) => {
                log::warn!("transparency {value} outside [0, 1], clamping");
                value.clamp(0.0, 1.0)
            }
            None => {
                let (low, high) = TRANSPARENCY_RANGE;
                rng.random_range(low..=high)
            }
        };

        let resolved = ResolvedLighting {
            size,
            anchor,
            direction,
            max_brightness: self.max_brightness,
            min_brightness: self.min_brightness,
            mode: self.mode,
            law,
            transparency,
        };

        log::debug!("resolved lighting gradient: {resolved:?}");
        resolved
    }

    /// Generates the finished attenuation mask for an image of `size`.
    pub fn generate_mask<R: Rng + ?Sized>(&self, size: MaskSize, rng: &mut R) -> GrayImage {
        self.resolve(size, rng).generate_mask()
    }

    pub fn apply_with_rng<R: Rng + ?Sized>(
        &self,
        image: &DynamicImage,
        rng: &mut R,
    ) -> ImageAugmentResult<DynamicImage> {
        let size = MaskSize::new(image.width(), image.height())?;
        let resolved = self.resolve(size, rng);
        let mask = resolved.generate_mask();
        resolved.composite(image, &mask)
    }

    /// Same as [`Self::apply_with_rng`] using the thread local generator.
    pub fn apply(&self, image: &DynamicImage) -> ImageAugmentResult<DynamicImage> {
        self.apply_with_rng(image, &mut rand::rng())
    }
}

impl Augmentation for LightingGradientConfig {
    fn augment<R: Rng + ?Sized>(
        &self,
        image: &DynamicImage,
        rng: &mut R,
    ) -> ImageAugmentResult<DynamicImage> {
        self.apply_with_rng(image, rng)
    }

    fn probability(&self) -> f32 {
        self.probability
    }
}

impl fmt::Display for LightingGradientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "LightingGradient(light_position={:?}, direction={:?}, max_brightness={}, min_brightness={}, mode='{}', linear_decay_rate={:?}, transparency={:?}, p={})",
            self.light_position,
            self.direction,
            self.max_brightness,
            self.min_brightness,
            self.mode,
            self.linear_decay_rate,
            self.transparency,
            self.probability,
        )
    }
}

/// Fully determined parameters of one run. Building the mask from here on
/// draws no randomness.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolvedLighting {
    pub size: MaskSize,
    pub anchor: LightAnchor,
    /// Degrees in `[0, 360)`.
    pub direction: i32,
    pub max_brightness: i32,
    pub min_brightness: i32,
    pub mode: DecayMode,
    pub law: DecayLaw,
    pub transparency: f32,
}

impl ResolvedLighting {
    /// Light strip rotated into place and cropped to the image, before
    /// smoothing and inversion.
    pub fn rotated_mask(&self) -> GrayImage {
        let canvas = canvas::build_canvas(
            self.size,
            self.anchor,
            self.max_brightness,
            self.min_brightness,
            self.law,
        );
        let quantized = canvas.to_luma8();

        transform::rotate_and_crop(
            &quantized,
            canvas.anchor,
            self.direction as f32,
            canvas.crop,
        )
    }

    pub fn generate_mask(&self) -> GrayImage {
        finisher::finish_mask(&self.rotated_mask())
    }

    /// Blends `mask` into the value channel of `image`. Alpha is carried
    /// through untouched and grayscale input stays grayscale.
    pub fn composite(
        &self,
        image: &DynamicImage,
        mask: &GrayImage,
    ) -> ImageAugmentResult<DynamicImage> {
        if image.dimensions() != mask.dimensions() {
            return Err(ImageAugmentError::InvalidDimensions(format!(
                "mask is {}x{} but image is {}x{}",
                mask.width(),
                mask.height(),
                image.width(),
                image.height()
            )));
        }

        let transparency = self.transparency;

        let output = match image {
            DynamicImage::ImageLuma8(gray) => {
                let mut out = gray.clone();
                for (pixel, weight) in out.pixels_mut().zip(mask.pixels()) {
                    let v = pixel[0];
                    *pixel = Luma([blend_pixel([v, v, v], weight[0], transparency)[0]]);
                }
                DynamicImage::ImageLuma8(out)
            }
            DynamicImage::ImageRgb8(rgb) => {
                let mut out = rgb.clone();
                for (pixel, weight) in out.pixels_mut().zip(mask.pixels()) {
                    pixel.0 = blend_pixel(pixel.0, weight[0], transparency);
                }
                DynamicImage::ImageRgb8(out)
            }
            DynamicImage::ImageRgba8(rgba) => {
                let mut out = rgba.clone();
                for (pixel, weight) in out.pixels_mut().zip(mask.pixels()) {
                    let [r, g, b] =
                        blend_pixel([pixel[0], pixel[1], pixel[2]], weight[0], transparency);
                    pixel[0] = r;
                    pixel[1] = g;
                    pixel[2] = b;
                }
                DynamicImage::ImageRgba8(out)
            }
            other => {
                return Err(ImageAugmentError::InvalidParameter(format!(
                    "unsupported pixel layout {:?}, expected 8-bit gray, RGB or RGBA",
                    other.color()
                )));
            }
        };

        Ok(output)
    }
}

/// `value' = value * transparency + mask * (1 - transparency)`, clamped to 255.
pub fn blend_pixel(rgb: [u8; 3], mask: u8, transparency: f32) -> [u8; 3] {
    let hsv = colour_space::rgb_to_hsv(rgb);
    let value = hsv.value * transparency + mask as f32 * (1.0 - transparency);

    let [r, g, b] = colour_space::hsv_to_rgb(Hsv { value, ..hsv });
    [
        colour_space::to_u8(r),
        colour_space::to_u8(g),
        colour_space::to_u8(b),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ColorType, RgbImage};
    use rand::{SeedableRng, rngs::StdRng};

    fn size(width: u32, height: u32) -> MaskSize {
        MaskSize::new(width, height).unwrap()
    }

    #[test]
    fn test_resolve_is_deterministic_for_seed() {
        let config = LightingGradientConfig::new();

        let a = config.resolve(size(64, 48), &mut StdRng::seed_from_u64(7));
        let b = config.resolve(size(64, 48), &mut StdRng::seed_from_u64(7));
        assert_eq!(a, b);
    }

    #[test]
    fn test_resolve_sample_ranges() {
        let config = LightingGradientConfig::new().with_mode(DecayMode::LinearStatic);
        let mut rng = StdRng::seed_from_u64(99);

        for _ in 0..200 {
            let resolved = config.resolve(size(30, 20), &mut rng);

            assert!((0..=30).contains(&resolved.anchor.x));
            assert!((0..=20).contains(&resolved.anchor.y));
            assert!((0..360).contains(&resolved.direction));
            assert!((0.5..=0.85).contains(&resolved.transparency));

            let DecayLaw::Linear { rate } = resolved.law else {
                panic!("expected linear law, got {:?}", resolved.law);
            };
            assert!((0.2..=2.0).contains(&rate));
        }
    }

    #[test]
    fn test_explicit_parameters_are_kept() {
        let config = LightingGradientConfig::new()
            .with_light_position((-5, 300))
            .with_direction(450)
            .with_mode(DecayMode::LinearStatic)
            .with_linear_decay_rate(0.75)
            .with_transparency(0.6);

        let resolved = config.resolve(size(10, 10), &mut StdRng::seed_from_u64(1));

        assert_eq!(resolved.anchor, LightAnchor::new(-5, 300));
        assert_eq!(resolved.direction, 90);
        assert_eq!(resolved.law, DecayLaw::Linear { rate: 0.75 });
        assert_eq!(resolved.transparency, 0.6);
    }

    #[test]
    fn test_dynamic_rate_ignores_supplied_rate() {
        let config = LightingGradientConfig::new()
            .with_mode(DecayMode::LinearDynamic)
            .with_linear_decay_rate(9.0)
            .with_max_brightness(200)
            .with_min_brightness(50);

        let resolved = config.resolve(size(60, 30), &mut StdRng::seed_from_u64(3));
        assert_eq!(resolved.law, DecayLaw::Linear { rate: 2.5 });
    }

    #[test]
    fn test_transparency_is_clamped() {
        let config = LightingGradientConfig::new().with_transparency(1.5);
        let resolved = config.resolve(size(4, 4), &mut StdRng::seed_from_u64(0));
        assert_eq!(resolved.transparency, 1.0);
    }

    #[test]
    fn test_display() {
        let config = LightingGradientConfig::new()
            .with_direction(30)
            .with_mode(DecayMode::LinearDynamic);

        assert_eq!(
            config.to_string(),
            "LightingGradient(light_position=None, direction=Some(30), max_brightness=255, min_brightness=0, mode='linear_dynamic', linear_decay_rate=None, transparency=None, p=1)"
        );
    }

    #[test]
    fn test_blend_pixel() {
        assert_eq!(blend_pixel([100, 100, 100], 200, 0.5), [150, 150, 150]);
        assert_eq!(blend_pixel([255, 255, 255], 255, 0.3), [255, 255, 255]);
        assert_eq!(blend_pixel([10, 20, 30], 0, 1.0), [10, 20, 30]);

        // hue and saturation survive a brightness change
        let [r, g, b] = blend_pixel([200, 100, 50], 0, 0.5);
        assert_eq!([r, g, b], [100, 50, 25]);
    }

    #[test]
    fn test_composite_rejects_size_mismatch() {
        let resolved = LightingGradientConfig::new()
            .with_light_position((0, 0))
            .with_direction(0)
            .with_transparency(0.5)
            .resolve(size(8, 8), &mut StdRng::seed_from_u64(0));

        let image = DynamicImage::ImageRgb8(RgbImage::new(8, 8));
        let err = resolved.composite(&image, &GrayImage::new(8, 7)).unwrap_err();
        assert!(matches!(err, ImageAugmentError::InvalidDimensions(_)));
    }

    #[test]
    fn test_composite_rejects_unsupported_layout() {
        let resolved = LightingGradientConfig::new()
            .with_transparency(0.5)
            .resolve(size(4, 4), &mut StdRng::seed_from_u64(0));

        let image = DynamicImage::new(4, 4, ColorType::Rgb16);
        let err = resolved.composite(&image, &GrayImage::new(4, 4)).unwrap_err();
        assert!(matches!(err, ImageAugmentError::InvalidParameter(_)));
    }

    #[test]
    fn test_zero_direction_keeps_strip_horizontal() {
        let resolved = LightingGradientConfig::new()
            .with_light_position((20, 10))
            .with_direction(0)
            .resolve(size(40, 24), &mut StdRng::seed_from_u64(5));

        let padding = canvas::padding_for(resolved.size);
        let mut profile = vec![0.0; (24 + 2 * padding) as usize];
        decay::apply_decay_value_gaussian(&mut profile, 255.0, 0.0, (padding + 10) as f32, 24.0);

        let rotated = resolved.rotated_mask();
        assert_eq!(rotated.dimensions(), (40, 24));

        for (x, y, pixel) in rotated.enumerate_pixels() {
            let expected = profile[(y + padding) as usize] as u8;
            assert!(
                pixel[0].abs_diff(expected) <= 1,
                "({x}, {y}): {} vs {expected}",
                pixel[0]
            );
        }
    }
}
