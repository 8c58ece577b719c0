//! Parameter types for encode operations.
//!
//! These structs describe *what* to write, not *how* to write it. The
//! [`formats`](super::formats) adapters build them from the caller's
//! [`OptionSet`](crate::resizer::OptionSet), and the
//! [`backend`](super::backend) turns them into encoder calls.
//!
//! ## Types
//!
//! - [`Quality`] — Caller-facing quality (0 = worst, 100 = best). Clamped on construction.
//! - [`PngCompression`] — zlib-style compression level (0–9) derived from a quality.
//! - [`EncodeSettings`] — Per-format encoder settings.
//! - [`EncodeParams`] — Output path plus settings.

use std::path::PathBuf;

/// Quality setting on a 0 (worst) to 100 (best) scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quality(u8);

impl Quality {
    pub const JPEG_DEFAULT: Quality = Quality(75);

    pub fn new(value: u32) -> Self {
        Self(value.min(100) as u8)
    }

    pub fn value(self) -> u8 {
        self.0
    }
}

/// PNG compression level, 0 (least compression) to 9 (most).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PngCompression(u8);

impl PngCompression {
    pub const MAX: u8 = 9;

    pub fn new(level: u8) -> Self {
        Self(level.min(Self::MAX))
    }

    /// Map a best=100 quality onto the best=0 level scale:
    /// `round((100 - quality) / 10)`, capped at 9.
    pub fn from_quality(quality: Quality) -> Self {
        let level = (100u32.saturating_sub(quality.value().into()) as f64 / 10.0).round() as u8;
        Self::new(level)
    }

    pub fn level(self) -> u8 {
        self.0
    }
}

/// Encoder settings for one output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EncodeSettings {
    Gif,
    Jpeg { quality: Quality },
    Png { compression: PngCompression },
}

/// Parameters for writing a bitmap to disk.
#[derive(Debug, Clone, PartialEq)]
pub struct EncodeParams {
    pub output: PathBuf,
    pub settings: EncodeSettings,
}
