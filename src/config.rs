// Overlay configuration: the injected bracket length plus the named constants
// (stroke width, sweep speed, margin scales, mask colors). Loadable from TOML;
// every field falls back to its default.

use std::num::NonZeroU64;
use std::path::Path;

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::Error;
use crate::types::Color;

pub const STROKE_WIDTH: u32 = 5;
pub const ANIMATION_SPEED: NonZeroU64 = match NonZeroU64::new(8) {
    Some(v) => v,
    None => unreachable!(),
};
pub const WIDTH_SCALE: u32 = 7;
pub const HEIGHT_SCALE: f64 = 2.75;
pub const MASK_COLOR: Color = Color(0x7700_0000);
pub const GUIDE_COLOR: Color = Color::WHITE;
pub const BRACKET_LENGTH: u32 = 40;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FrameConfig {
    /// Leg length of each corner bracket, in pixels. Read once at construction.
    pub bracket_length: u32,
    /// Stroke width shared by brackets and laser.
    pub stroke_width: u32,
    /// Milliseconds per pixel of laser travel; larger = slower sweep.
    pub animation_speed: NonZeroU64,
    /// Horizontal margin is `width / width_scale` (integer division).
    pub width_scale: u32,
    /// Vertical margin is `round(height / height_scale)`. Must be finite and > 0.
    #[serde(deserialize_with = "positive_finite")]
    pub height_scale: f64,
    /// Corner radius of the cleared hole and its guide stroke.
    pub corner_radius: f32,
    /// Dimming layer outside the cutout.
    pub mask_color: Color,
    /// Hairline drawn around the hole on the off-screen layer.
    pub guide_color: Color,
    /// Initial bracket color; hosts normally override it.
    pub frame_color: Color,
    /// Initial laser color; hosts normally override it.
    pub laser_color: Color,
}

impl Default for FrameConfig {
    fn default() -> Self {
        Self {
            bracket_length: BRACKET_LENGTH,
            stroke_width: STROKE_WIDTH,
            animation_speed: ANIMATION_SPEED,
            width_scale: WIDTH_SCALE,
            height_scale: HEIGHT_SCALE,
            corner_radius: 0.0,
            mask_color: MASK_COLOR,
            guide_color: GUIDE_COLOR,
            // A fresh paint draws opaque black until the host sets a color.
            frame_color: Color::BLACK,
            laser_color: Color::BLACK,
        }
    }
}

impl FrameConfig {
    /// Defaults with a host-supplied bracket length.
    pub fn with_bracket_length(bracket_length: u32) -> Self {
        Self { bracket_length, ..Self::default() }
    }

    pub fn from_toml_str(contents: &str) -> Result<Self, Error> {
        toml::from_str(contents).map_err(|e| Error::Config(e.to_string()))
    }

    /// Load from a TOML file. A missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self, Error> {
        if !path.exists() {
            log::debug!("config {} not found, using defaults", path.display());
            return Ok(Self::default());
        }
        let contents = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("{}: {e}", path.display())))?;
        let config = Self::from_toml_str(&contents)?;
        log::debug!("loaded config from {}", path.display());
        Ok(config)
    }
}

fn positive_finite<'de, D: Deserializer<'de>>(d: D) -> Result<f64, D::Error> {
    let v = f64::deserialize(d)?;
    if v.is_finite() && v > 0.0 {
        Ok(v)
    } else {
        Err(serde::de::Error::custom(format!(
            "height_scale must be a positive finite number, got {v}"
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_named_constants() {
        let c = FrameConfig::default();
        assert_eq!(c.stroke_width, 5);
        assert_eq!(c.animation_speed.get(), 8);
        assert_eq!(c.width_scale, 7);
        assert_eq!(c.height_scale, 2.75);
        assert_eq!(c.mask_color, Color(0x7700_0000));
        assert_eq!(c.corner_radius, 0.0);
    }

    #[test]
    fn toml_overrides_only_given_fields() {
        let c = FrameConfig::from_toml_str(
            r##"
            bracket_length = 24
            laser_color = "#FF0000"
            animation_speed = 4
            "##,
        )
        .unwrap();
        assert_eq!(c.bracket_length, 24);
        assert_eq!(c.laser_color, Color::RED);
        assert_eq!(c.animation_speed.get(), 4);
        assert_eq!(c.stroke_width, STROKE_WIDTH);
        assert_eq!(c.frame_color, Color::BLACK);
    }

    #[test]
    fn zero_speed_is_rejected() {
        assert!(FrameConfig::from_toml_str("animation_speed = 0").is_err());
    }

    #[test]
    fn non_positive_height_scale_is_rejected() {
        for bad in ["-0.0", "0.0", "-1e-300", "-2.75", "nan", "inf"] {
            let src = format!("height_scale = {bad}");
            assert!(FrameConfig::from_toml_str(&src).is_err(), "{bad} accepted");
        }
        let ok = FrameConfig::from_toml_str("height_scale = 3.5").unwrap();
        assert_eq!(ok.height_scale, 3.5);
    }

    #[test]
    fn bad_color_is_a_config_error() {
        let err = FrameConfig::from_toml_str(r#"frame_color = "red""#).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn missing_file_gives_defaults() {
        let c = FrameConfig::load(Path::new("/definitely/not/here/scan-frame.toml")).unwrap();
        assert_eq!(c, FrameConfig::default());
    }
}
