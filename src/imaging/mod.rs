//! Image processing — dimension math plus the `image` crate behind a trait.
//!
//! | Operation | Crate / function |
//! |---|---|
//! | **Identify** | `image::image_dimensions` |
//! | **Decode** | `image::ImageReader` (GIF, JPEG, PNG) |
//! | **Rescale** | `resize_exact` + bilinear (`Triangle`) filter |
//! | **Encode** | per-format `image::codecs` encoders |
//!
//! The module is split into:
//! - **Calculations**: Pure functions for dimension math (unit testable)
//! - **Parameters**: Data structures describing encode operations
//! - **Backend**: [`ImageBackend`] trait + [`RustBackend`]
//! - **Formats**: [`FormatAdapter`] trait + [`Gif`], [`Jpeg`], [`Png`]

pub mod backend;
mod calculations;
pub mod formats;
mod params;
pub mod rust_backend;

pub use backend::{BackendError, Bitmap, Dimensions, ImageBackend};
pub use calculations::{MAX_TARGET_PIXELS, calculate_target_dimensions};
pub use formats::{FormatAdapter, Gif, ImageKind, Jpeg, Png};
pub use params::{EncodeParams, EncodeSettings, PngCompression, Quality};
pub use rust_backend::{RustBackend, supported_input_extensions};
