//! Per-format adapters: extension check + decode, option set → encode.
//!
//! | Adapter | Extensions | Encoder options |
//! |---|---|---|
//! | [`Gif`] | `gif` | none |
//! | [`Jpeg`] | `jpg`, `jpeg` | quality (default 75) |
//! | [`Png`] | `png` | compression level from quality (default 0) |
//!
//! Extension matching is case-sensitive: `photo.PNG` is not a PNG to the
//! [`Png`] adapter. The check runs before the backend is asked to decode, so
//! a valid GIF named `.gif` handed to the PNG adapter fails with
//! `WrongImageType` rather than a decode error.

use super::backend::{Bitmap, ImageBackend};
use super::params::{EncodeParams, EncodeSettings, PngCompression, Quality};
use crate::error::ResizeError;
use crate::resizer::OptionSet;
use std::fmt;
use std::path::Path;
use tracing::debug;

/// Image formats with a compiled-in adapter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImageKind {
    Gif,
    Jpeg,
    Png,
}

impl ImageKind {
    pub const ALL: [ImageKind; 3] = [ImageKind::Gif, ImageKind::Jpeg, ImageKind::Png];

    /// Accepted file extensions, first one canonical.
    pub fn extensions(self) -> &'static [&'static str] {
        match self {
            Self::Gif => &["gif"],
            Self::Jpeg => &["jpg", "jpeg"],
            Self::Png => &["png"],
        }
    }

    /// Format whose extension list contains the path's extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = extension(path)?;
        Self::ALL
            .into_iter()
            .find(|kind| kind.extensions().contains(&ext))
    }

    pub fn matches(self, path: &Path) -> bool {
        extension(path).is_some_and(|ext| self.extensions().contains(&ext))
    }

    /// Error reported when a file with the right extension fails to decode.
    pub fn invalid_file(self, reason: String) -> ResizeError {
        match self {
            Self::Gif => ResizeError::InvalidGifFile(reason),
            Self::Jpeg => ResizeError::InvalidJpgFile(reason),
            Self::Png => ResizeError::InvalidPngFile(reason),
        }
    }
}

impl fmt::Display for ImageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extensions()[0])
    }
}

fn extension(path: &Path) -> Option<&str> {
    path.extension().and_then(|e| e.to_str())
}

/// Format-specific half of a resize.
///
/// Implementors only say which [`ImageKind`] they are and how options become
/// encoder settings; [`decode`](FormatAdapter::decode) and
/// [`encode`](FormatAdapter::encode) are shared.
pub trait FormatAdapter {
    const KIND: ImageKind;

    fn encode_settings(options: &OptionSet) -> EncodeSettings;

    /// Check the extension, then decode through the backend.
    fn decode(backend: &impl ImageBackend, path: &Path) -> Result<Bitmap, ResizeError> {
        if !Self::KIND.matches(path) {
            return Err(ResizeError::WrongImageType {
                path: path.to_path_buf(),
                expected: Self::KIND.extensions()[0],
            });
        }
        backend
            .decode(path, Self::KIND)
            .map_err(|e| Self::KIND.invalid_file(format!("{}: {e}", path.display())))
    }

    fn encode(
        backend: &impl ImageBackend,
        bitmap: &Bitmap,
        path: &Path,
        options: &OptionSet,
    ) -> Result<(), ResizeError> {
        let params = EncodeParams {
            output: path.to_path_buf(),
            settings: Self::encode_settings(options),
        };
        debug!(output = %path.display(), settings = ?params.settings, "encoding");
        backend
            .encode(bitmap, &params)
            .map_err(|source| ResizeError::Write {
                path: path.to_path_buf(),
                source,
            })
    }
}

/// GIF: no quality setting.
#[derive(Debug, Clone, Copy, Default)]
pub struct Gif;

impl FormatAdapter for Gif {
    const KIND: ImageKind = ImageKind::Gif;

    fn encode_settings(_options: &OptionSet) -> EncodeSettings {
        EncodeSettings::Gif
    }
}

/// JPEG: quality passed straight through, 75 when unset.
#[derive(Debug, Clone, Copy, Default)]
pub struct Jpeg;

impl FormatAdapter for Jpeg {
    const KIND: ImageKind = ImageKind::Jpeg;

    fn encode_settings(options: &OptionSet) -> EncodeSettings {
        EncodeSettings::Jpeg {
            quality: options.quality.unwrap_or(Quality::JPEG_DEFAULT),
        }
    }
}

/// PNG: quality inverted onto the compression-level scale, level 0 when unset.
#[derive(Debug, Clone, Copy, Default)]
pub struct Png;

impl FormatAdapter for Png {
    const KIND: ImageKind = ImageKind::Png;

    fn encode_settings(options: &OptionSet) -> EncodeSettings {
        EncodeSettings::Png {
            compression: options
                .quality
                .map(PngCompression::from_quality)
                .unwrap_or_default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::imaging::backend::tests::{MockBackend, RecordedOp};
    use crate::imaging::Dimensions;

    #[test]
    fn extensions_match_case_sensitively() {
        assert!(ImageKind::Png.matches(Path::new("a/b.png")));
        assert!(!ImageKind::Png.matches(Path::new("a/b.PNG")));
        assert!(ImageKind::Jpeg.matches(Path::new("photo.jpg")));
        assert!(ImageKind::Jpeg.matches(Path::new("photo.jpeg")));
        assert!(!ImageKind::Jpeg.matches(Path::new("photo.jpe")));
        assert!(!ImageKind::Gif.matches(Path::new("anim")));
    }

    #[test]
    fn from_path_detects_kind() {
        assert_eq!(ImageKind::from_path(Path::new("x.gif")), Some(ImageKind::Gif));
        assert_eq!(ImageKind::from_path(Path::new("x.jpeg")), Some(ImageKind::Jpeg));
        assert_eq!(ImageKind::from_path(Path::new("x.webp")), None);
        assert_eq!(ImageKind::from_path(Path::new("x.Gif")), None);
    }

    #[test]
    fn wrong_extension_fails_before_decode() {
        let backend = MockBackend::with_dimensions(vec![Dimensions::from((10, 10))]);
        let result = Png::decode(&backend, Path::new("/images/logo.gif"));
        assert!(matches!(
            result,
            Err(ResizeError::WrongImageType { expected: "png", .. })
        ));
        assert!(backend.get_operations().is_empty());
    }

    #[test]
    fn decode_failure_maps_to_format_error() {
        let backend = MockBackend::new();
        assert!(matches!(
            Gif::decode(&backend, Path::new("/a.gif")),
            Err(ResizeError::InvalidGifFile(_))
        ));
        assert!(matches!(
            Jpeg::decode(&backend, Path::new("/a.jpeg")),
            Err(ResizeError::InvalidJpgFile(_))
        ));
        assert!(matches!(
            Png::decode(&backend, Path::new("/a.png")),
            Err(ResizeError::InvalidPngFile(_))
        ));
    }

    #[test]
    fn decode_passes_kind_to_backend() {
        let backend = MockBackend::with_dimensions(vec![Dimensions::from((4, 4))]);
        Jpeg::decode(&backend, Path::new("/a.jpg")).unwrap();
        assert_eq!(
            backend.get_operations(),
            vec![RecordedOp::Decode {
                source: "/a.jpg".into(),
                kind: ImageKind::Jpeg
            }]
        );
    }

    #[test]
    fn jpeg_quality_defaults_to_75() {
        assert_eq!(
            Jpeg::encode_settings(&OptionSet::default()),
            EncodeSettings::Jpeg {
                quality: Quality::new(75)
            }
        );
        assert_eq!(
            Jpeg::encode_settings(&OptionSet::default().quality(40)),
            EncodeSettings::Jpeg {
                quality: Quality::new(40)
            }
        );
    }

    #[test]
    fn png_quality_becomes_compression_level() {
        assert_eq!(
            Png::encode_settings(&OptionSet::default().quality(80)),
            EncodeSettings::Png {
                compression: PngCompression::new(2)
            }
        );
        assert_eq!(
            Png::encode_settings(&OptionSet::default()),
            EncodeSettings::Png {
                compression: PngCompression::new(0)
            }
        );
    }

    #[test]
    fn gif_ignores_quality() {
        assert_eq!(
            Gif::encode_settings(&OptionSet::default().quality(10).interlace(true)),
            EncodeSettings::Gif
        );
    }

    #[test]
    fn encode_failure_is_write_error() {
        let backend = MockBackend::failing_encode(vec![]);
        let bitmap = Bitmap::new(image::DynamicImage::new_rgb8(2, 2));
        let result = Gif::encode(&backend, &bitmap, Path::new("/out.gif"), &OptionSet::default());
        assert!(matches!(result, Err(ResizeError::Write { .. })));
    }
}
