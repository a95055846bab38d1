//! RGB <-> HSV conversion for 8-bit pixels.
//!
//! Value keeps the 0-255 scale of the source channels so it can be blended
//! directly with an 8-bit mask.

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hsv {
    /// Degrees in `[0, 360)`.
    pub hue: f32,
    /// `[0, 1]`
    pub saturation: f32,
    /// `[0, 255]`
    pub value: f32,
}

pub fn rgb_to_hsv(rgb: [u8; 3]) -> Hsv {
    let r = rgb[0] as f32;
    let g = rgb[1] as f32;
    let b = rgb[2] as f32;

    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let delta = max - min;

    let saturation = if max == 0.0 { 0.0 } else { delta / max };

    let mut hue = if delta == 0.0 {
        0.0
    } else if max == r {
        60.0 * (((g - b) / delta) % 6.0)
    } else if max == g {
        60.0 * ((b - r) / delta + 2.0)
    } else {
        60.0 * ((r - g) / delta + 4.0)
    };

    if hue < 0.0 {
        hue += 360.0;
    }

    Hsv {
        hue,
        saturation,
        value: max,
    }
}

/// Converts back to RGB without clamping, so callers decide how overflow is
/// handled.
pub fn hsv_to_rgb(hsv: Hsv) -> [f32; 3] {
    let hue = hsv.hue.rem_euclid(360.0);
    let c = hsv.value * hsv.saturation;
    let x = c * (1.0 - ((hue / 60.0) % 2.0 - 1.0).abs());
    let m = hsv.value - c;

    let (r, g, b) = if hue < 60.0 {
        (c, x, 0.0)
    } else if hue < 120.0 {
        (x, c, 0.0)
    } else if hue < 180.0 {
        (0.0, c, x)
    } else if hue < 240.0 {
        (0.0, x, c)
    } else if hue < 300.0 {
        (x, 0.0, c)
    } else {
        (c, 0.0, x)
    };

    [r + m, g + m, b + m]
}

/// Clamps into `[0, 255]` and rounds to the nearest 8-bit level.
pub fn to_u8(channel: f32) -> u8 {
    channel.clamp(0.0, 255.0).round() as u8
}
