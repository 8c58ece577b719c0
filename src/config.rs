//! Resize presets loaded from TOML.
//!
//! A preset names a mode, its dimensions and encoder options. Presets are
//! layered: stock defaults, then an optional preset file, then command-line
//! flags, each overriding the one before.
//!
//! ## Preset File
//!
//! ```toml
//! mode = "fixed-width"      # proportional | fixed | fixed-width | fixed-height
//!
//! [dimensions]
//! width = 180               # ratio (1-99), width and/or height, per mode
//!
//! [options]
//! interlace = true
//! quality = 80              # 0 (worst) - 100 (best)
//! ```
//!
//! Unknown keys are rejected to catch typos early. Dimension values are
//! checked later by [`crate::dimensions::validate`], so `ratio = "50"` parses
//! but fails with `WrongValueType`.

use crate::dimensions::{DimensionKey, DimensionSpec, DimensionValue, ResizeMode};
use crate::error::ResizeError;
use crate::imaging::Quality;
use crate::resizer::OptionSet;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// A full resize preset.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ResizeConfig {
    /// Resize mode name or numeric code.
    pub mode: String,
    pub dimensions: DimensionsConfig,
    pub options: OptionsConfig,
}

impl Default for ResizeConfig {
    fn default() -> Self {
        Self {
            mode: ResizeMode::Proportional.name().to_string(),
            dimensions: DimensionsConfig::default(),
            options: OptionsConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DimensionsConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ratio: Option<DimensionValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<DimensionValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<DimensionValue>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OptionsConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interlace: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quality: Option<u32>,
}

impl ResizeConfig {
    /// Validate values that are not checked by the resizer itself.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.options.quality.is_some_and(|q| q > 100) {
            return Err(ConfigError::Validation(
                "options.quality must be 0-100".into(),
            ));
        }
        Ok(())
    }

    pub fn mode(&self) -> Result<ResizeMode, ResizeError> {
        self.mode.parse()
    }

    pub fn dimension_spec(&self) -> DimensionSpec {
        [
            (DimensionKey::Ratio, &self.dimensions.ratio),
            (DimensionKey::Width, &self.dimensions.width),
            (DimensionKey::Height, &self.dimensions.height),
        ]
        .into_iter()
        .filter_map(|(key, value)| value.clone().map(|v| (key, v)))
        .collect()
    }

    pub fn option_set(&self) -> OptionSet {
        OptionSet {
            interlace: self.options.interlace,
            quality: self.options.quality.map(Quality::new),
        }
    }
}

/// Values given on the command line, layered over the preset file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConfigOverrides {
    pub mode: Option<String>,
    pub ratio: Option<i64>,
    pub width: Option<i64>,
    pub height: Option<i64>,
    pub quality: Option<u32>,
    pub interlace: Option<bool>,
}

impl ConfigOverrides {
    /// Sparse TOML table holding only the values that were given.
    pub fn to_toml(&self) -> toml::Value {
        let mut root = toml::Table::new();
        if let Some(mode) = &self.mode {
            root.insert("mode".into(), toml::Value::String(mode.clone()));
        }

        let mut dimensions = toml::Table::new();
        for (key, value) in [
            ("ratio", self.ratio),
            ("width", self.width),
            ("height", self.height),
        ] {
            if let Some(v) = value {
                dimensions.insert(key.into(), toml::Value::Integer(v));
            }
        }
        if !dimensions.is_empty() {
            root.insert("dimensions".into(), toml::Value::Table(dimensions));
        }

        let mut options = toml::Table::new();
        if let Some(quality) = self.quality {
            options.insert("quality".into(), toml::Value::Integer(quality.into()));
        }
        if let Some(interlace) = self.interlace {
            options.insert("interlace".into(), toml::Value::Boolean(interlace));
        }
        if !options.is_empty() {
            root.insert("options".into(), toml::Value::Table(options));
        }

        toml::Value::Table(root)
    }
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default preset as a `toml::Value::Table`.
pub fn stock_defaults_value() -> toml::Value {
    toml::Value::try_from(ResizeConfig::default()).expect("default config must serialize")
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Load a preset file as a raw TOML value.
pub fn load_raw_config(path: &Path) -> Result<toml::Value, ConfigError> {
    let content = fs::read_to_string(path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(value)
}

/// Merge overlays onto a base value in order, then deserialize and validate.
pub fn resolve_config(
    base: toml::Value,
    overlays: impl IntoIterator<Item = toml::Value>,
) -> Result<ResizeConfig, ConfigError> {
    let merged = overlays.into_iter().fold(base, merge_toml);
    let config: ResizeConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Stock defaults, then the preset file (if any), then command-line overrides.
pub fn load_config(
    preset: Option<&Path>,
    overrides: &ConfigOverrides,
) -> Result<ResizeConfig, ConfigError> {
    let mut overlays = Vec::new();
    if let Some(path) = preset {
        overlays.push(load_raw_config(path)?);
    }
    overlays.push(overrides.to_toml());
    resolve_config(stock_defaults_value(), overlays)
}

/// Returns a fully-commented stock preset.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# image-resizer preset
# =====================
# Pass with `image-resizer resize --config preset.toml IN OUT`.
# Command-line flags override values from this file.
# Unknown keys will cause an error.

# How destination dimensions are derived:
#   proportional  scale both axes by `ratio` percent
#   fixed         exactly `width` x `height` (aspect ratio not kept)
#   fixed-width   exactly `width`, height follows the source aspect ratio
#   fixed-height  exactly `height`, width follows the source aspect ratio
mode = "proportional"

# ---------------------------------------------------------------------------
# Dimensions (integers; which keys are needed depends on the mode)
# ---------------------------------------------------------------------------
[dimensions]
# Percentage for proportional mode, strictly between 0 and 100.
# ratio = 50

# Target width/height in pixels.
# width = 800
# height = 600

# ---------------------------------------------------------------------------
# Encoder options
# ---------------------------------------------------------------------------
[options]
# Interlaced GIF / progressive JPEG output (PNG is written non-interlaced).
# interlace = false

# 0 (worst) to 100 (best). JPEG uses it directly (default 75); PNG maps it
# to a compression level (default: least compression); GIF ignores it.
# quality = 75
"##
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dimensions::{Geometry, validate};
    use tempfile::TempDir;

    #[test]
    fn default_config_is_proportional_without_dimensions() {
        let config = ResizeConfig::default();
        assert_eq!(config.mode().unwrap(), ResizeMode::Proportional);
        assert!(config.dimension_spec().is_empty());
        assert_eq!(config.option_set(), OptionSet::default());
    }

    #[test]
    fn stock_config_parses_to_defaults() {
        let config: ResizeConfig = toml::from_str(stock_config_toml()).unwrap();
        assert_eq!(config.mode, "proportional");
        assert!(config.dimensions.ratio.is_none());
        assert!(config.options.quality.is_none());
    }

    #[test]
    fn parse_full_preset() {
        let toml = r#"
mode = "fixed"

[dimensions]
width = 50
height = 60

[options]
interlace = true
quality = 80
"#;
        let config: ResizeConfig = toml::from_str(toml).unwrap();
        let geometry = validate(config.mode().unwrap(), &config.dimension_spec()).unwrap();
        assert_eq!(
            geometry,
            Geometry::Fixed {
                width: 50,
                height: 60
            }
        );
        assert_eq!(config.option_set().interlace, Some(true));
        assert_eq!(config.option_set().quality, Some(Quality::new(80)));
    }

    #[test]
    fn string_dimension_parses_but_fails_validation() {
        let config: ResizeConfig = toml::from_str("[dimensions]\nratio = \"50\"").unwrap();
        assert!(matches!(
            validate(config.mode().unwrap(), &config.dimension_spec()),
            Err(ResizeError::WrongValueType(DimensionKey::Ratio))
        ));
    }

    #[test]
    fn float_dimension_is_wrong_value_type() {
        let config: ResizeConfig =
            toml::from_str("mode = \"fixed-width\"\n[dimensions]\nwidth = 180.5").unwrap();
        assert!(matches!(
            validate(config.mode().unwrap(), &config.dimension_spec()),
            Err(ResizeError::WrongValueType(DimensionKey::Width))
        ));
    }

    #[test]
    fn unknown_mode_is_wrong_resize_type() {
        let config: ResizeConfig = toml::from_str("mode = \"crop\"").unwrap();
        assert!(matches!(
            config.mode(),
            Err(ResizeError::WrongResizeType(_))
        ));
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(toml::from_str::<ResizeConfig>("modes = \"fixed\"").is_err());
        assert!(toml::from_str::<ResizeConfig>("[dimensions]\ndepth = 3").is_err());
        assert!(toml::from_str::<ResizeConfig>("[options]\nbg_red = 255").is_err());
    }

    #[test]
    fn quality_above_100_fails_validation() {
        let overrides = ConfigOverrides {
            quality: Some(101),
            ..ConfigOverrides::default()
        };
        assert!(matches!(
            load_config(None, &overrides),
            Err(ConfigError::Validation(_))
        ));
    }

    // =========================================================================
    // merge_toml / overrides
    // =========================================================================

    #[test]
    fn merge_overrides_nested_keys() {
        let base: toml::Value = toml::from_str("[dimensions]\nratio = 50\nwidth = 10").unwrap();
        let overlay: toml::Value = toml::from_str("[dimensions]\nratio = 25").unwrap();
        let merged = merge_toml(base, overlay);
        assert_eq!(merged["dimensions"]["ratio"].as_integer(), Some(25));
        assert_eq!(merged["dimensions"]["width"].as_integer(), Some(10));
    }

    #[test]
    fn empty_overrides_produce_empty_table() {
        let value = ConfigOverrides::default().to_toml();
        assert_eq!(value, toml::Value::Table(toml::Table::new()));
    }

    #[test]
    fn overrides_only_include_given_values() {
        let overrides = ConfigOverrides {
            width: Some(180),
            interlace: Some(true),
            ..ConfigOverrides::default()
        };
        let value = overrides.to_toml();
        assert_eq!(value["dimensions"]["width"].as_integer(), Some(180));
        assert!(value["dimensions"].get("ratio").is_none());
        assert_eq!(value["options"]["interlace"].as_bool(), Some(true));
        assert!(value.get("mode").is_none());
    }

    #[test]
    fn load_config_layers_file_then_flags() {
        let tmp = TempDir::new().unwrap();
        let preset = tmp.path().join("thumbs.toml");
        fs::write(
            &preset,
            r#"
mode = "fixed-width"

[dimensions]
width = 180

[options]
quality = 60
"#,
        )
        .unwrap();

        let overrides = ConfigOverrides {
            quality: Some(90),
            ..ConfigOverrides::default()
        };
        let config = load_config(Some(&preset), &overrides).unwrap();
        assert_eq!(config.mode().unwrap(), ResizeMode::FixedWidth);
        assert_eq!(
            config.dimensions.width,
            Some(DimensionValue::Integer(180))
        );
        assert_eq!(config.options.quality, Some(90));
    }

    #[test]
    fn load_config_missing_file_is_io_error() {
        let tmp = TempDir::new().unwrap();
        let result = load_config(Some(&tmp.path().join("absent.toml")), &ConfigOverrides::default());
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }

    #[test]
    fn load_config_invalid_toml_errors() {
        let tmp = TempDir::new().unwrap();
        let preset = tmp.path().join("bad.toml");
        fs::write(&preset, "mode = ").unwrap();
        let result = load_config(Some(&preset), &ConfigOverrides::default());
        assert!(matches!(result, Err(ConfigError::Toml(_))));
    }
}
