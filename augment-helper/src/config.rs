use anyhow::{Context, Result};
use image_augment::{DecayMode, LightingGradientConfig};
use serde::{Deserialize, Serialize};
use std::{fs, path::Path};

/// Lighting gradient parameters as read from a TOML file. Every field is
/// optional; missing ones keep the library defaults.
#[derive(Serialize, Deserialize, Default, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct LightingFile {
    pub light_position: Option<(i32, i32)>,
    pub direction: Option<i32>,
    pub max_brightness: Option<i32>,
    pub min_brightness: Option<i32>,
    pub mode: Option<String>,
    pub linear_decay_rate: Option<f32>,
    pub transparency: Option<f32>,
    pub seed: Option<u64>,
}

impl LightingFile {
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("read config file {} failed", path.display()))?;

        toml::from_str(&text).with_context(|| format!("parse config file {} failed", path.display()))
    }

    /// Fields set in `other` win.
    pub fn merge(self, other: LightingFile) -> Self {
        Self {
            light_position: other.light_position.or(self.light_position),
            direction: other.direction.or(self.direction),
            max_brightness: other.max_brightness.or(self.max_brightness),
            min_brightness: other.min_brightness.or(self.min_brightness),
            mode: other.mode.or(self.mode),
            linear_decay_rate: other.linear_decay_rate.or(self.linear_decay_rate),
            transparency: other.transparency.or(self.transparency),
            seed: other.seed.or(self.seed),
        }
    }

    pub fn to_config(&self) -> LightingGradientConfig {
        let mut config = LightingGradientConfig::new();

        if let Some(position) = self.light_position {
            config = config.with_light_position(position);
        }
        if let Some(direction) = self.direction {
            config = config.with_direction(direction);
        }
        if let Some(max_brightness) = self.max_brightness {
            config = config.with_max_brightness(max_brightness);
        }
        if let Some(min_brightness) = self.min_brightness {
            config = config.with_min_brightness(min_brightness);
        }
        if let Some(mode) = &self.mode {
            config = config.with_mode(DecayMode::from(mode.as_str()));
        }
        if let Some(rate) = self.linear_decay_rate {
            config = config.with_linear_decay_rate(rate);
        }
        if let Some(transparency) = self.transparency {
            config = config.with_transparency(transparency);
        }

        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_toml() {
        let file: LightingFile = toml::from_str(
            r#"
            light_position = [10, 20]
            direction = 45
            mode = "linear_static"
            transparency = 0.6
            "#,
        )
        .unwrap();

        assert_eq!(file.light_position, Some((10, 20)));
        assert_eq!(file.direction, Some(45));
        assert_eq!(file.mode.as_deref(), Some("linear_static"));
        assert_eq!(file.max_brightness, None);
    }

    #[test]
    fn test_merge_prefers_other() {
        let file = LightingFile {
            direction: Some(10),
            max_brightness: Some(200),
            ..Default::default()
        };
        let cli = LightingFile {
            direction: Some(90),
            ..Default::default()
        };

        let merged = file.merge(cli);
        assert_eq!(merged.direction, Some(90));
        assert_eq!(merged.max_brightness, Some(200));
    }

    #[test]
    fn test_to_config() {
        let file = LightingFile {
            direction: Some(30),
            mode: Some("linear_dynamic".to_string()),
            ..Default::default()
        };

        assert_eq!(
            file.to_config().to_string(),
            "LightingGradient(light_position=None, direction=Some(30), max_brightness=255, min_brightness=0, mode='linear_dynamic', linear_decay_rate=None, transparency=None, p=1)"
        );
    }
}
