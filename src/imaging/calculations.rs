//! Pure calculation functions for image dimensions.
//!
//! All functions here are pure and testable without any I/O or images.

use crate::dimensions::Geometry;
use crate::error::ResizeError;

/// Largest pixel count accepted for the target or the rescaler's
/// intermediate buffer (source width × target height, and the transpose).
///
/// Equal to the largest RGBA8 image the decoder's default 512 MiB
/// allocation limit lets through.
pub const MAX_TARGET_PIXELS: u64 = 1 << 27;

/// Calculate destination dimensions for a validated geometry.
///
/// Results are rounded half away from zero. An axis that rounds down to zero
/// is raised to one pixel so the encoder always receives a drawable image.
///
/// # Arguments
/// * `geometry` - Validated resize geometry
/// * `source` - Source image dimensions (width, height)
///
/// # Returns
/// * `(width, height)` - Destination dimensions
/// * `WrongDimension` if either source axis is zero, or if the result would
///   exceed [`MAX_TARGET_PIXELS`]
///
/// # Examples
/// ```
/// # use image_resizer::dimensions::Geometry;
/// # use image_resizer::imaging::calculate_target_dimensions;
/// // 720x162 at 50% → 360x81
/// let target = calculate_target_dimensions(Geometry::Proportional { ratio: 50 }, (720, 162));
/// assert_eq!(target.unwrap(), (360, 81));
///
/// // 720x162 to width 180 → 180x41
/// let target = calculate_target_dimensions(Geometry::FixedWidth { width: 180 }, (720, 162));
/// assert_eq!(target.unwrap(), (180, 41));
/// ```
pub fn calculate_target_dimensions(
    geometry: Geometry,
    source: (u32, u32),
) -> Result<(u32, u32), ResizeError> {
    let (src_w, src_h) = source;
    if src_w == 0 || src_h == 0 {
        return Err(ResizeError::WrongDimension(format!(
            "source image is {src_w}x{src_h}"
        )));
    }

    let (w, h) = match geometry {
        Geometry::Proportional { ratio } => (scale(src_w, ratio, 100), scale(src_h, ratio, 100)),
        Geometry::Fixed { width, height } => (width, height),
        Geometry::FixedWidth { width } => (width, scale(width, src_h, src_w)),
        Geometry::FixedHeight { height } => (scale(height, src_w, src_h), height),
    };

    let (w, h) = (w.max(1), h.max(1));
    let largest = [(w, h), (src_w, h), (w, src_h)]
        .into_iter()
        .map(|(x, y)| x as u64 * y as u64)
        .max()
        .unwrap_or(0);
    if largest > MAX_TARGET_PIXELS {
        return Err(ResizeError::WrongDimension(format!(
            "resizing {src_w}x{src_h} to {w}x{h} exceeds {MAX_TARGET_PIXELS} pixels"
        )));
    }

    Ok((w, h))
}

/// `round(value * numerator / denominator)`, saturating at `u32::MAX`.
fn scale(value: u32, numerator: u32, denominator: u32) -> u32 {
    (value as f64 * numerator as f64 / denominator as f64)
        .round()
        .min(u32::MAX as f64) as u32
}
