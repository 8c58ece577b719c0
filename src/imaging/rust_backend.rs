//! Pure Rust image backend built on the `image` crate.
//!
//! ## Crate mapping
//!
//! | Operation | Crate / function |
//! |---|---|
//! | Identify | `image::image_dimensions` (header only) |
//! | Decode (GIF, JPEG, PNG) | `image::ImageReader` with the format forced |
//! | Rescale | `DynamicImage::resize_exact` with `FilterType::Triangle` (bilinear) |
//! | Encode → GIF | `gif::Encoder`, rows reordered when interlaced |
//! | Encode → JPEG | `image::codecs::jpeg::JpegEncoder` (RGB8, quality 1–100) |
//! | Encode → progressive JPEG | `jpeg_encoder::Encoder` with `set_progressive` |
//! | Encode → PNG | `image::codecs::png::PngEncoder` with a compression preset |
//!
//! The interlace flag produces interlaced GIFs and progressive JPEGs. PNG
//! output is never Adam7-interlaced; the flag is logged and ignored there.

use super::backend::{BackendError, Bitmap, Dimensions, ImageBackend};
use super::formats::ImageKind;
use super::params::{EncodeParams, EncodeSettings, PngCompression};
use super::params::Quality;
use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::{self, CompressionType, PngEncoder};
use image::imageops::FilterType;
use image::{DynamicImage, ImageFormat, ImageReader};
use std::borrow::Cow;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use std::sync::LazyLock;
use tracing::debug;

static SUPPORTED_EXTENSIONS: LazyLock<Vec<&'static str>> = LazyLock::new(|| {
    ImageKind::ALL
        .into_iter()
        .filter(|kind| image_format(*kind).reading_enabled())
        .flat_map(|kind| kind.extensions().iter().copied())
        .collect()
});

/// Returns the set of image file extensions that have working decoders compiled in.
pub fn supported_input_extensions() -> &'static [&'static str] {
    &SUPPORTED_EXTENSIONS
}

fn image_format(kind: ImageKind) -> ImageFormat {
    match kind {
        ImageKind::Gif => ImageFormat::Gif,
        ImageKind::Jpeg => ImageFormat::Jpeg,
        ImageKind::Png => ImageFormat::Png,
    }
}

/// Map a 0–9 compression level onto the encoder's presets.
fn png_compression(compression: PngCompression) -> CompressionType {
    match compression.level() {
        0..=2 => CompressionType::Fast,
        3..=6 => CompressionType::Default,
        _ => CompressionType::Best,
    }
}

/// Pure Rust backend using the `image` crate.
///
/// See the [module docs](self) for the crate-to-operation mapping.
pub struct RustBackend;

impl RustBackend {
    pub fn new() -> Self {
        Self
    }
}

impl Default for RustBackend {
    fn default() -> Self {
        Self::new()
    }
}

/// NeuQuant sampling factor for GIF palettes (1 = best, 30 = fastest).
const GIF_QUANTIZE_SPEED: i32 = 10;

fn encode_failed(kind: &str, e: impl std::fmt::Display) -> BackendError {
    BackendError::ProcessingFailed(format!("{kind} encode failed: {e}"))
}

/// GIF and the progressive JPEG encoder store sizes as 16-bit values.
fn u16_size(img: &DynamicImage, kind: &str) -> Result<(u16, u16), BackendError> {
    match (u16::try_from(img.width()), u16::try_from(img.height())) {
        (Ok(width), Ok(height)) => Ok((width, height)),
        _ => Err(BackendError::ProcessingFailed(format!(
            "{kind} cannot store {}x{} (limit 65535x65535)",
            img.width(),
            img.height()
        ))),
    }
}

/// Reorder rows into the GIF interlace sequence: every 8th row from 0, every
/// 8th from 4, every 4th from 2, then every 2nd from 1.
fn interlace_rows(pixels: &[u8], width: usize) -> Vec<u8> {
    let rows: Vec<&[u8]> = pixels.chunks(width.max(1)).collect();
    [(0, 8), (4, 8), (2, 4), (1, 2)]
        .into_iter()
        .flat_map(|(start, step)| rows.iter().skip(start).step_by(step))
        .flat_map(|row| row.iter().copied())
        .collect()
}

fn encode_gif(writer: impl Write, img: &DynamicImage, interlaced: bool) -> Result<(), BackendError> {
    let (width, height) = u16_size(img, "GIF")?;
    let mut rgba = img.to_rgba8().into_raw();
    let mut frame = gif::Frame::from_rgba_speed(width, height, &mut rgba, GIF_QUANTIZE_SPEED);
    if interlaced {
        frame.buffer = Cow::Owned(interlace_rows(&frame.buffer, usize::from(width)));
        frame.interlaced = true;
    }

    let mut encoder =
        gif::Encoder::new(writer, width, height, &[]).map_err(|e| encode_failed("GIF", e))?;
    encoder
        .write_frame(&frame)
        .map_err(|e| encode_failed("GIF", e))?;
    encoder.into_inner().map_err(BackendError::Io)?.flush()?;
    Ok(())
}

fn encode_progressive_jpeg(
    writer: impl Write,
    img: &DynamicImage,
    quality: Quality,
) -> Result<(), BackendError> {
    let (width, height) = u16_size(img, "JPEG")?;
    let rgb = img.to_rgb8();
    let mut encoder = jpeg_encoder::Encoder::new(writer, quality.value().clamp(1, 100));
    encoder.set_progressive(true);
    encoder
        .encode(rgb.as_raw(), width, height, jpeg_encoder::ColorType::Rgb)
        .map_err(|e| encode_failed("JPEG", e))
}

impl ImageBackend for RustBackend {
    fn identify(&self, path: &Path) -> Result<Dimensions, BackendError> {
        let (width, height) = image::image_dimensions(path).map_err(|e| {
            BackendError::ProcessingFailed(format!("Failed to read dimensions: {}", e))
        })?;
        Ok(Dimensions { width, height })
    }

    fn decode(&self, path: &Path, kind: ImageKind) -> Result<Bitmap, BackendError> {
        let mut reader = ImageReader::open(path).map_err(BackendError::Io)?;
        reader.set_format(image_format(kind));
        let image = reader.decode().map_err(|e| {
            BackendError::ProcessingFailed(format!("decode failed: {e}"))
        })?;
        debug!(
            source = %path.display(),
            width = image.width(),
            height = image.height(),
            "decoded"
        );
        Ok(Bitmap::new(image))
    }

    fn rescale(&self, bitmap: &Bitmap, width: u32, height: u32) -> Bitmap {
        Bitmap::new(bitmap.image().resize_exact(width, height, FilterType::Triangle))
    }

    fn encode(&self, bitmap: &Bitmap, params: &EncodeParams) -> Result<(), BackendError> {
        let file = File::create(&params.output).map_err(BackendError::Io)?;
        let writer = BufWriter::new(file);
        let img = bitmap.image();
        let interlaced = bitmap.is_interlaced();

        match params.settings {
            EncodeSettings::Gif => encode_gif(writer, img, interlaced),
            EncodeSettings::Jpeg { quality } if interlaced => {
                encode_progressive_jpeg(writer, img, quality)
            }
            EncodeSettings::Jpeg { quality } => {
                // JPEG has no alpha channel
                let rgb = DynamicImage::ImageRgb8(img.to_rgb8());
                let encoder = JpegEncoder::new_with_quality(writer, quality.value().clamp(1, 100));
                rgb.write_with_encoder(encoder)
                    .map_err(|e| encode_failed("JPEG", e))
            }
            EncodeSettings::Png { compression } => {
                if interlaced {
                    debug!(
                        output = %params.output.display(),
                        "interlace requested; PNG is written without Adam7"
                    );
                }
                let encoder = PngEncoder::new_with_quality(
                    writer,
                    png_compression(compression),
                    png::FilterType::Adaptive,
                );
                img.write_with_encoder(encoder)
                    .map_err(|e| encode_failed("PNG", e))
            }
        }
    }
}
