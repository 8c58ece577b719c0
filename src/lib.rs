//! # image-resizer
//!
//! Resize GIF, JPEG and PNG files by percentage or to fixed dimensions.
//! Pixel work (decode, bilinear rescale, encode) is done by the
//! [`image`](https://docs.rs/image) crate; this crate decides *what size* to
//! produce, validates the request, and picks the right codec per format.
//!
//! ```no_run
//! use image_resizer::{DimensionSpec, OptionSet, PngResizer, ResizeMode};
//!
//! let resizer = PngResizer::new(
//!     ResizeMode::Proportional,
//!     &DimensionSpec::ratio(50),
//!     OptionSet::new().quality(80),
//! )?;
//! let outcome = resizer.resize("logo.png", "logo-half.png")?;
//! println!("{}x{}", outcome.target.width, outcome.target.height);
//! # Ok::<(), image_resizer::ResizeError>(())
//! ```
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`dimensions`] | Resize modes, dimension parameters, validation |
//! | [`resizer`] | `Resizer<A>` and the resize pipeline |
//! | [`imaging`] | Dimension math, format adapters, `image` crate backend |
//! | [`config`] | TOML presets layered under command-line flags |
//! | [`error`] | `ResizeError` with stable numeric codes |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## Validate at Construction
//!
//! A `Resizer` can only exist with a mode and dimensions that make sense
//! together. Missing or mistyped dimensions fail in `new`, before any file is
//! opened, and a constructed resizer can be reused for any number of images.
//!
//! ## One Adapter per Format
//!
//! GIF, JPEG and PNG differ only in which extensions they accept and how the
//! quality option reaches the encoder. Each is a zero-sized type implementing
//! [`imaging::FormatAdapter`]; `Resizer<A>` is generic over it, so the
//! pipeline is written once.
//!
//! ## Backend Trait
//!
//! All library calls go through [`imaging::ImageBackend`]. Production code
//! uses [`imaging::RustBackend`]; tests substitute a recording mock to check
//! the pipeline's order of operations without real images.

pub mod config;
pub mod dimensions;
pub mod error;
pub mod imaging;
pub mod output;
pub mod resizer;

pub use dimensions::{DimensionKey, DimensionSpec, DimensionValue, Geometry, ResizeMode};
pub use error::ResizeError;
pub use resizer::{
    GifResizer, JpegResizer, OptionSet, PngResizer, ResizeOutcome, Resizer, probe_dimensions,
    resize_detected,
};

#[cfg(test)]
pub(crate) mod test_helpers;
