//! Resize modes, dimension parameters, and their validation.
//!
//! A resize request arrives as a [`ResizeMode`] plus a loosely typed
//! [`DimensionSpec`] (it may come from a TOML preset or a caller that only has
//! strings and numbers). [`validate`] checks the spec against the mode and, on
//! success, returns a [`Geometry`]: the typed form the dimension calculator
//! works with. Everything here runs before any file is touched.
//!
//! ## Required keys
//!
//! | Mode | Keys | Range |
//! |---|---|---|
//! | `proportional` | `ratio` | 0 < ratio < 100 |
//! | `fixed` | `width`, `height` | ≥ 1 |
//! | `fixed-width` | `width` | ≥ 1 |
//! | `fixed-height` | `height` | ≥ 1 |

use crate::error::ResizeError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Policy for deriving destination dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResizeMode {
    /// Scale both axes by the same percentage.
    Proportional,
    /// Exact width and height; aspect ratio is not preserved.
    Fixed,
    /// Exact width, height follows the source aspect ratio.
    FixedWidth,
    /// Exact height, width follows the source aspect ratio.
    FixedHeight,
}

impl ResizeMode {
    pub const ALL: [ResizeMode; 4] = [
        ResizeMode::Proportional,
        ResizeMode::Fixed,
        ResizeMode::FixedWidth,
        ResizeMode::FixedHeight,
    ];

    /// Stable numeric code (`proportional` = 0, `fixed` = 1,
    /// `fixed-height` = 2, `fixed-width` = 3).
    pub fn code(self) -> i64 {
        match self {
            Self::Proportional => 0,
            Self::Fixed => 1,
            Self::FixedHeight => 2,
            Self::FixedWidth => 3,
        }
    }

    pub fn from_code(code: i64) -> Result<Self, ResizeError> {
        Self::ALL
            .into_iter()
            .find(|mode| mode.code() == code)
            .ok_or_else(|| ResizeError::WrongResizeType(code.to_string()))
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Proportional => "proportional",
            Self::Fixed => "fixed",
            Self::FixedWidth => "fixed-width",
            Self::FixedHeight => "fixed-height",
        }
    }
}

impl fmt::Display for ResizeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Accepts the kebab-case names as well as the numeric codes.
impl FromStr for ResizeMode {
    type Err = ResizeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Ok(code) = s.parse::<i64>() {
            return Self::from_code(code);
        }
        Self::ALL
            .into_iter()
            .find(|mode| mode.name() == s)
            .ok_or_else(|| ResizeError::WrongResizeType(s.to_string()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DimensionKey {
    Ratio,
    Width,
    Height,
}

impl fmt::Display for DimensionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Ratio => "ratio",
            Self::Width => "width",
            Self::Height => "height",
        })
    }
}

/// A dimension value before validation.
///
/// Only [`DimensionValue::Integer`] passes validation; the other variants
/// exist so a preset like `ratio = "50"` fails with `WrongValueType` instead
/// of a parse error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DimensionValue {
    Integer(i64),
    Float(f64),
    Boolean(bool),
    Text(String),
}

impl DimensionValue {
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Self::Integer(v) => Some(*v),
            _ => None,
        }
    }
}

impl From<i64> for DimensionValue {
    fn from(v: i64) -> Self {
        Self::Integer(v)
    }
}

impl From<i32> for DimensionValue {
    fn from(v: i32) -> Self {
        Self::Integer(v.into())
    }
}

impl From<u32> for DimensionValue {
    fn from(v: u32) -> Self {
        Self::Integer(v.into())
    }
}

impl From<f64> for DimensionValue {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<bool> for DimensionValue {
    fn from(v: bool) -> Self {
        Self::Boolean(v)
    }
}

impl From<&str> for DimensionValue {
    fn from(v: &str) -> Self {
        Self::Text(v.to_string())
    }
}

impl From<String> for DimensionValue {
    fn from(v: String) -> Self {
        Self::Text(v)
    }
}

/// Dimension parameters keyed by [`DimensionKey`].
///
/// Keys not needed by the chosen mode are ignored.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DimensionSpec(BTreeMap<DimensionKey, DimensionValue>);

impl DimensionSpec {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ratio(ratio: i64) -> Self {
        Self::new().with(DimensionKey::Ratio, ratio)
    }

    pub fn width(width: i64) -> Self {
        Self::new().with(DimensionKey::Width, width)
    }

    pub fn height(height: i64) -> Self {
        Self::new().with(DimensionKey::Height, height)
    }

    pub fn size(width: i64, height: i64) -> Self {
        Self::new()
            .with(DimensionKey::Width, width)
            .with(DimensionKey::Height, height)
    }

    pub fn with(mut self, key: DimensionKey, value: impl Into<DimensionValue>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert(&mut self, key: DimensionKey, value: impl Into<DimensionValue>) {
        self.0.insert(key, value.into());
    }

    pub fn get(&self, key: DimensionKey) -> Option<&DimensionValue> {
        self.0.get(&key)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(DimensionKey, DimensionValue)> for DimensionSpec {
    fn from_iter<I: IntoIterator<Item = (DimensionKey, DimensionValue)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Validated resize geometry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Geometry {
    Proportional { ratio: u32 },
    Fixed { width: u32, height: u32 },
    FixedWidth { width: u32 },
    FixedHeight { height: u32 },
}

impl Geometry {
    pub fn mode(self) -> ResizeMode {
        match self {
            Self::Proportional { .. } => ResizeMode::Proportional,
            Self::Fixed { .. } => ResizeMode::Fixed,
            Self::FixedWidth { .. } => ResizeMode::FixedWidth,
            Self::FixedHeight { .. } => ResizeMode::FixedHeight,
        }
    }
}

/// Check `dimensions` against `mode` and return the typed geometry.
pub fn validate(mode: ResizeMode, dimensions: &DimensionSpec) -> Result<Geometry, ResizeError> {
    match mode {
        ResizeMode::Proportional => {
            let ratio = require_integer(dimensions, DimensionKey::Ratio, ResizeError::MissingRatio)?;
            if ratio <= 0 || ratio >= 100 {
                return Err(ResizeError::ValueOutOfRange {
                    key: DimensionKey::Ratio,
                    value: ratio,
                });
            }
            Ok(Geometry::Proportional {
                ratio: ratio as u32,
            })
        }
        ResizeMode::FixedWidth => {
            let width = require_integer(dimensions, DimensionKey::Width, ResizeError::MissingWidth)?;
            Ok(Geometry::FixedWidth {
                width: pixels(DimensionKey::Width, width)?,
            })
        }
        ResizeMode::FixedHeight => {
            let height =
                require_integer(dimensions, DimensionKey::Height, ResizeError::MissingHeight)?;
            Ok(Geometry::FixedHeight {
                height: pixels(DimensionKey::Height, height)?,
            })
        }
        ResizeMode::Fixed => {
            let (Some(width), Some(height)) = (
                dimensions.get(DimensionKey::Width),
                dimensions.get(DimensionKey::Height),
            ) else {
                return Err(ResizeError::MissingWidthOrHeight);
            };
            let width = width
                .as_integer()
                .ok_or(ResizeError::WrongValueType(DimensionKey::Width))?;
            let height = height
                .as_integer()
                .ok_or(ResizeError::WrongValueType(DimensionKey::Height))?;
            Ok(Geometry::Fixed {
                width: pixels(DimensionKey::Width, width)?,
                height: pixels(DimensionKey::Height, height)?,
            })
        }
    }
}

fn require_integer(
    dimensions: &DimensionSpec,
    key: DimensionKey,
    missing: ResizeError,
) -> Result<i64, ResizeError> {
    dimensions
        .get(key)
        .ok_or(missing)?
        .as_integer()
        .ok_or(ResizeError::WrongValueType(key))
}

/// A pixel count must be positive and fit in `u32`.
fn pixels(key: DimensionKey, value: i64) -> Result<u32, ResizeError> {
    u32::try_from(value)
        .ok()
        .filter(|&v| v > 0)
        .ok_or(ResizeError::ValueOutOfRange { key, value })
}
