//! Rotation of the light strip about its anchor and crop back to the
//! original footprint.

use crate::canvas::CropRect;
use image::{GrayImage, Luma, imageops};
use imageproc::geometric_transformations::{Interpolation, Projection, warp_into};

/// Counter-clockwise rotation by `degrees` about `anchor`, as seen on screen
/// with the y axis pointing down.
pub fn rotation_about(anchor: (f32, f32), degrees: f32) -> Projection {
    let (cx, cy) = anchor;

    Projection::translate(cx, cy)
        * Projection::rotate(-degrees.to_radians())
        * Projection::translate(-cx, -cy)
}

/// Rotates the whole canvas with bilinear sampling. Samples falling outside
/// the source canvas read as black.
pub fn rotate_canvas(canvas: &GrayImage, anchor: (f32, f32), degrees: f32) -> GrayImage {
    let projection = rotation_about(anchor, degrees);
    let mut rotated = GrayImage::new(canvas.width(), canvas.height());

    warp_into(
        canvas,
        &projection,
        Interpolation::Bilinear,
        Luma([0u8]),
        &mut rotated,
    );

    rotated
}

pub fn crop(canvas: &GrayImage, rect: CropRect) -> GrayImage {
    imageops::crop_imm(canvas, rect.x, rect.y, rect.width, rect.height).to_image()
}

/// Rotates first so light outside the footprint can swing into view, then
/// crops.
pub fn rotate_and_crop(
    canvas: &GrayImage,
    anchor: (f32, f32),
    degrees: f32,
    rect: CropRect,
) -> GrayImage {
    let rotated = rotate_canvas(canvas, anchor, degrees);
    crop(&rotated, rect)
}
