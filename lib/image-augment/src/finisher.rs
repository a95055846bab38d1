use image::GrayImage;
use imageproc::filter::median_filter;

/// Median kernel is `2 * radius + 1` wide, i.e. 9x9.
pub const MEDIAN_RADIUS: u32 = 4;

/// Smooths out interpolation ringing and flips the mask into an attenuation
/// field: the brightest output sits where the synthesized light is weakest.
pub fn finish_mask(mask: &GrayImage) -> GrayImage {
    let mut finished = median_filter(mask, MEDIAN_RADIUS, MEDIAN_RADIUS);
    invert(&mut finished);
    finished
}

pub fn invert(mask: &mut GrayImage) {
    for pixel in mask.pixels_mut() {
        pixel[0] = 255 - pixel[0];
    }
}
