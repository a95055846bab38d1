//! Padded canvas holding the un-rotated light strip.

use crate::{ImageAugmentError, ImageAugmentResult, decay};
use image::{GrayImage, ImageBuffer, Luma};
use std::f64::consts::SQRT_2;

pub type FloatImage = ImageBuffer<Luma<f32>, Vec<f32>>;

/// Width and height of the image the mask is generated for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MaskSize {
    pub width: u32,
    pub height: u32,
}

impl MaskSize {
    pub fn new(width: u32, height: u32) -> ImageAugmentResult<Self> {
        if width == 0 || height == 0 {
            return Err(ImageAugmentError::InvalidDimensions(format!(
                "mask size must be positive, got {width}x{height}"
            )));
        }

        Ok(Self { width, height })
    }

    pub fn longest_side(&self) -> u32 {
        self.width.max(self.height)
    }
}

/// Pivot of the light strip in image coordinates. May lie outside the image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LightAnchor {
    pub x: i32,
    pub y: i32,
}

impl LightAnchor {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl From<(i32, i32)> for LightAnchor {
    fn from((x, y): (i32, i32)) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CropRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

/// Decay law with every parameter already resolved.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DecayLaw {
    Gaussian,
    Linear { rate: f32 },
}

#[derive(Debug, Clone)]
pub struct MaskCanvas {
    pub samples: FloatImage,
    pub crop: CropRect,
    pub anchor: (f32, f32),
}

impl MaskCanvas {
    /// Quantizes the canvas to 8 bits. Out of range samples saturate.
    pub fn to_luma8(&self) -> GrayImage {
        GrayImage::from_fn(self.samples.width(), self.samples.height(), |x, y| {
            Luma([self.samples.get_pixel(x, y)[0] as u8])
        })
    }
}

/// Margin added on every side so any rotation of the mask footprint about a
/// point inside it stays on the canvas.
pub fn padding_for(size: MaskSize) -> u32 {
    (size.longest_side() as f64 * SQRT_2).floor() as u32
}

/// Builds the padded canvas and fills it with a horizontal light strip whose
/// brightness decays vertically away from the anchor row.
pub fn build_canvas(
    size: MaskSize,
    anchor: LightAnchor,
    max_brightness: i32,
    min_brightness: i32,
    law: DecayLaw,
) -> MaskCanvas {
    let padding = padding_for(size);
    let canvas_width = size.width + 2 * padding;
    let canvas_height = size.height + 2 * padding;
    let padded_anchor = (
        padding as f32 + anchor.x as f32,
        padding as f32 + anchor.y as f32,
    );

    log::debug!(
        "lighting canvas {canvas_width}x{canvas_height}, padding {padding}, anchor {padded_anchor:?}"
    );

    let mut profile = vec![0.0f32; canvas_height as usize];
    match law {
        DecayLaw::Gaussian => decay::apply_decay_value_gaussian(
            &mut profile,
            max_brightness as f32,
            min_brightness as f32,
            padded_anchor.1,
            size.height as f32,
        ),
        DecayLaw::Linear { rate } => decay::apply_decay_value_linear(
            &mut profile,
            max_brightness as f32,
            padded_anchor.1,
            rate,
        ),
    }

    let samples = FloatImage::from_fn(canvas_width, canvas_height, |_, y| {
        Luma([profile[y as usize]])
    });

    MaskCanvas {
        samples,
        crop: CropRect {
            x: padding,
            y: padding,
            width: size.width,
            height: size.height,
        },
        anchor: padded_anchor,
    }
}
