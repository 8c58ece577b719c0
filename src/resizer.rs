//! The resizer: validated configuration plus the resize pipeline.
//!
//! ```text
//! Resizer::<Png>::new(mode, dimensions, options)   ← validation, no I/O
//!     .resize(input, output)
//!         1. input must be a regular file        → FileDoesNotExist
//!         2. Png::decode (extension, then decode) → WrongImageType / InvalidPngFile
//!         3. calculate_target_dimensions         → WrongDimension
//!         4. backend.rescale (bilinear)
//!         5. set interlace flag
//!         6. Png::encode                          → Write
//! ```
//!
//! A `Resizer` holds no per-image state and can be reused for any number of
//! files. Both bitmaps created during a call are owned locals, so they are
//! released on every return path.

use crate::dimensions::{DimensionSpec, Geometry, ResizeMode, validate};
use crate::error::ResizeError;
use crate::imaging::{
    Dimensions, FormatAdapter, Gif, ImageBackend, ImageKind, Jpeg, Png, Quality, RustBackend,
    calculate_target_dimensions,
};
use serde::Serialize;
use std::marker::PhantomData;
use std::path::Path;
use tracing::{debug, info};

/// Encoder options. Unset values fall back to each format's default.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OptionSet {
    pub interlace: Option<bool>,
    pub quality: Option<Quality>,
}

impl OptionSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn interlace(mut self, interlace: bool) -> Self {
        self.interlace = Some(interlace);
        self
    }

    /// Quality on a 0–100 scale; larger values are clamped to 100.
    pub fn quality(mut self, quality: u32) -> Self {
        self.quality = Some(Quality::new(quality));
        self
    }

    pub fn interlace_enabled(&self) -> bool {
        self.interlace.unwrap_or(false)
    }
}

/// Source and destination sizes of a completed resize.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ResizeOutcome {
    pub source: Dimensions,
    pub target: Dimensions,
}

/// Resizer for one image format.
#[derive(Debug, Clone)]
pub struct Resizer<A: FormatAdapter> {
    geometry: Geometry,
    options: OptionSet,
    format: PhantomData<A>,
}

pub type GifResizer = Resizer<Gif>;
pub type JpegResizer = Resizer<Jpeg>;
pub type PngResizer = Resizer<Png>;

impl<A: FormatAdapter> Resizer<A> {
    /// Validate `dimensions` against `mode` and build a resizer.
    pub fn new(
        mode: ResizeMode,
        dimensions: &DimensionSpec,
        options: OptionSet,
    ) -> Result<Self, ResizeError> {
        let geometry = validate(mode, dimensions)?;
        Ok(Self::from_geometry(geometry, options))
    }

    pub fn from_geometry(geometry: Geometry, options: OptionSet) -> Self {
        Self {
            geometry,
            options,
            format: PhantomData,
        }
    }

    pub fn mode(&self) -> ResizeMode {
        self.geometry.mode()
    }

    pub fn geometry(&self) -> Geometry {
        self.geometry
    }

    pub fn options(&self) -> &OptionSet {
        &self.options
    }

    /// Resize `input` into `output` using the `image` crate.
    pub fn resize(
        &self,
        input: impl AsRef<Path>,
        output: impl AsRef<Path>,
    ) -> Result<ResizeOutcome, ResizeError> {
        self.resize_with(&RustBackend::new(), input.as_ref(), output.as_ref())
    }

    /// Resize through an explicit backend.
    pub fn resize_with(
        &self,
        backend: &impl ImageBackend,
        input: &Path,
        output: &Path,
    ) -> Result<ResizeOutcome, ResizeError> {
        ensure_file(input)?;

        let source = A::decode(backend, input)?;
        let source_dims = source.dimensions();
        let (width, height) = calculate_target_dimensions(self.geometry, source_dims.as_tuple())?;
        debug!(
            input = %input.display(),
            mode = %self.mode(),
            from = ?source_dims.as_tuple(),
            to = ?(width, height),
            "computed target size"
        );

        let mut resized = backend.rescale(&source, width, height);
        drop(source);
        resized.set_interlace(self.options.interlace_enabled());

        A::encode(backend, &resized, output, &self.options)?;
        info!(
            input = %input.display(),
            output = %output.display(),
            "resized {}x{} -> {}x{}",
            source_dims.width,
            source_dims.height,
            width,
            height
        );

        Ok(ResizeOutcome {
            source: source_dims,
            target: Dimensions { width, height },
        })
    }

    /// Read the dimensions of `input` without decoding it.
    pub fn source_dimensions(&self, input: impl AsRef<Path>) -> Result<Dimensions, ResizeError> {
        probe_dimensions(&RustBackend::new(), input.as_ref())
    }
}

/// Header-only dimension probe.
pub fn probe_dimensions(
    backend: &impl ImageBackend,
    path: &Path,
) -> Result<Dimensions, ResizeError> {
    ensure_file(path)?;
    backend
        .identify(path)
        .map_err(|e| ResizeError::CannotReadImageInfo(format!("{}: {e}", path.display())))
}

/// Resize with the adapter chosen from the input file's extension.
///
/// Configuration errors are reported first, then a missing input, then an
/// extension no adapter accepts.
pub fn resize_detected(
    backend: &impl ImageBackend,
    mode: ResizeMode,
    dimensions: &DimensionSpec,
    options: OptionSet,
    input: &Path,
    output: &Path,
) -> Result<(ImageKind, ResizeOutcome), ResizeError> {
    let geometry = validate(mode, dimensions)?;
    ensure_file(input)?;

    let kind = ImageKind::from_path(input).ok_or_else(|| ResizeError::WrongImageType {
        path: input.to_path_buf(),
        expected: "gif, jpg, jpeg or png",
    })?;
    let outcome = match kind {
        ImageKind::Gif => {
            GifResizer::from_geometry(geometry, options).resize_with(backend, input, output)
        }
        ImageKind::Jpeg => {
            JpegResizer::from_geometry(geometry, options).resize_with(backend, input, output)
        }
        ImageKind::Png => {
            PngResizer::from_geometry(geometry, options).resize_with(backend, input, output)
        }
    }?;
    Ok((kind, outcome))
}

fn ensure_file(path: &Path) -> Result<(), ResizeError> {
    if path.is_file() {
        Ok(())
    } else {
        Err(ResizeError::FileDoesNotExist(path.to_path_buf()))
    }
}
