//! One dimensional brightness falloff profiles.

use num_enum::{FromPrimitive, IntoPrimitive};
use std::fmt;

/// How brightness decays from the light strip towards the canvas edges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, FromPrimitive, IntoPrimitive)]
#[repr(u8)]
pub enum DecayMode {
    #[num_enum(default)]
    Gaussian = 0,
    LinearStatic,
    LinearDynamic,
}

impl DecayMode {
    pub fn name(&self) -> &'static str {
        match self {
            DecayMode::Gaussian => "gaussian",
            DecayMode::LinearStatic => "linear_static",
            DecayMode::LinearDynamic => "linear_dynamic",
        }
    }

    pub fn is_linear(&self) -> bool {
        matches!(self, DecayMode::LinearStatic | DecayMode::LinearDynamic)
    }
}

impl Default for DecayMode {
    fn default() -> Self {
        DecayMode::Gaussian
    }
}

impl From<&str> for DecayMode {
    fn from(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "gaussian" => DecayMode::Gaussian,
            "linear_static" => DecayMode::LinearStatic,
            "linear_dynamic" => DecayMode::LinearDynamic,
            other => {
                log::warn!("unknown decay mode `{other}`, falling back to gaussian");
                DecayMode::Gaussian
            }
        }
    }
}

impl fmt::Display for DecayMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Fills `profile` with a Gaussian falloff centred on `center`.
///
/// The standard deviation is `grange / 3`, so roughly the whole falloff fits
/// inside `grange` samples on either side. The density ratio against the peak
/// is rescaled into `[min_value, max_value]`, giving exactly `max_value` at the
/// centre. A zero spread degenerates into a point light: `max_value` on the
/// sample nearest to `center` and `min_value` everywhere else.
pub fn apply_decay_value_gaussian(
    profile: &mut [f32],
    max_value: f32,
    min_value: f32,
    center: f32,
    grange: f32,
) {
    let radius = (grange / 3.0).abs();
    let span = max_value - min_value;

    if !radius.is_normal() {
        for (x, value) in profile.iter_mut().enumerate() {
            *value = if (x as f32 - center).abs() < 0.5 {
                max_value
            } else {
                min_value
            };
        }
        return;
    }

    for (x, value) in profile.iter_mut().enumerate() {
        let u = (x as f32 - center) / radius;
        let ratio = (-u * u / 2.0).exp();
        *value = ratio * span + min_value;
    }
}

/// Fills `profile` with a linear falloff of `decay_rate` per sample away from
/// `center`. Samples never drop below 1.
pub fn apply_decay_value_linear(profile: &mut [f32], max_value: f32, center: f32, decay_rate: f32) {
    for (x, value) in profile.iter_mut().enumerate() {
        let decayed = max_value - (center - x as f32).abs() * decay_rate;
        *value = decayed.max(1.0);
    }
}

/// Rate used by [`DecayMode::LinearDynamic`]: the full brightness span is
/// spent over the longer side of the mask.
pub fn dynamic_decay_rate(max_value: i32, min_value: i32, width: u32, height: u32) -> f32 {
    (max_value - min_value) as f32 / width.max(height).max(1) as f32
}
