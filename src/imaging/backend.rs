//! Image library backend trait and shared types.
//!
//! The [`ImageBackend`] trait defines the four primitives the resizer needs
//! from an image library: identify, decode, rescale and encode. Nothing in
//! the crate touches pixels except through this trait.
//!
//! The production implementation is
//! [`RustBackend`](super::rust_backend::RustBackend), built on the `image`
//! crate. Tests use the recording `MockBackend` below.

use super::formats::ImageKind;
use super::params::EncodeParams;
use image::DynamicImage;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BackendError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Processing failed: {0}")]
    ProcessingFailed(String),
}

/// Result of an identify operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

impl Dimensions {
    pub fn as_tuple(self) -> (u32, u32) {
        (self.width, self.height)
    }
}

impl From<(u32, u32)> for Dimensions {
    fn from((width, height): (u32, u32)) -> Self {
        Self { width, height }
    }
}

/// A decoded image plus the interlace flag handed to the encoder.
///
/// Pixel memory is freed when the bitmap is dropped.
#[derive(Debug, Clone)]
pub struct Bitmap {
    image: DynamicImage,
    interlaced: bool,
}

impl Bitmap {
    pub fn new(image: DynamicImage) -> Self {
        Self {
            image,
            interlaced: false,
        }
    }

    pub fn dimensions(&self) -> Dimensions {
        Dimensions {
            width: self.image.width(),
            height: self.image.height(),
        }
    }

    pub fn set_interlace(&mut self, interlaced: bool) {
        self.interlaced = interlaced;
    }

    pub fn is_interlaced(&self) -> bool {
        self.interlaced
    }

    pub fn image(&self) -> &DynamicImage {
        &self.image
    }
}

/// Trait for image library backends.
pub trait ImageBackend {
    /// Read image dimensions from the file header.
    fn identify(&self, path: &Path) -> Result<Dimensions, BackendError>;

    /// Decode a file as the given format.
    fn decode(&self, path: &Path, kind: ImageKind) -> Result<Bitmap, BackendError>;

    /// Resample to exactly `width` x `height` with a bilinear filter.
    fn rescale(&self, bitmap: &Bitmap, width: u32, height: u32) -> Bitmap;

    /// Encode and write a bitmap.
    fn encode(&self, bitmap: &Bitmap, params: &EncodeParams) -> Result<(), BackendError>;
}

#[cfg(test)]
pub mod tests {
    use super::*;
    use crate::imaging::params::{EncodeSettings, Quality};
    use std::sync::Mutex;

    /// Mock backend that records operations without touching the filesystem.
    ///
    /// `decode` pops a queued dimension and returns a blank bitmap of that size;
    /// with the queue empty it fails like a corrupt file would.
    #[derive(Default)]
    pub struct MockBackend {
        pub dimensions: Mutex<Vec<Dimensions>>,
        pub fail_encode: bool,
        pub operations: Mutex<Vec<RecordedOp>>,
    }

    #[derive(Debug, Clone, PartialEq)]
    pub enum RecordedOp {
        Identify(String),
        Decode {
            source: String,
            kind: ImageKind,
        },
        Rescale {
            width: u32,
            height: u32,
        },
        Encode {
            output: String,
            width: u32,
            height: u32,
            interlaced: bool,
            settings: EncodeSettings,
        },
    }

    impl MockBackend {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn with_dimensions(dims: Vec<Dimensions>) -> Self {
            Self {
                dimensions: Mutex::new(dims),
                ..Self::default()
            }
        }

        pub fn failing_encode(dims: Vec<Dimensions>) -> Self {
            Self {
                fail_encode: true,
                ..Self::with_dimensions(dims)
            }
        }

        pub fn get_operations(&self) -> Vec<RecordedOp> {
            self.operations.lock().unwrap().clone()
        }

        fn record(&self, op: RecordedOp) {
            self.operations.lock().unwrap().push(op);
        }

        fn next_dimensions(&self) -> Result<Dimensions, BackendError> {
            self.dimensions
                .lock()
                .unwrap()
                .pop()
                .ok_or_else(|| BackendError::ProcessingFailed("No mock dimensions".to_string()))
        }
    }

    impl ImageBackend for MockBackend {
        fn identify(&self, path: &Path) -> Result<Dimensions, BackendError> {
            self.record(RecordedOp::Identify(path.to_string_lossy().to_string()));
            self.next_dimensions()
        }

        fn decode(&self, path: &Path, kind: ImageKind) -> Result<Bitmap, BackendError> {
            self.record(RecordedOp::Decode {
                source: path.to_string_lossy().to_string(),
                kind,
            });
            let dims = self.next_dimensions()?;
            Ok(Bitmap::new(DynamicImage::new_rgb8(dims.width, dims.height)))
        }

        fn rescale(&self, bitmap: &Bitmap, width: u32, height: u32) -> Bitmap {
            self.record(RecordedOp::Rescale { width, height });
            let mut resized = Bitmap::new(DynamicImage::new_rgb8(width, height));
            resized.set_interlace(bitmap.is_interlaced());
            resized
        }

        fn encode(&self, bitmap: &Bitmap, params: &EncodeParams) -> Result<(), BackendError> {
            let dims = bitmap.dimensions();
            self.record(RecordedOp::Encode {
                output: params.output.to_string_lossy().to_string(),
                width: dims.width,
                height: dims.height,
                interlaced: bitmap.is_interlaced(),
                settings: params.settings,
            });
            if self.fail_encode {
                return Err(BackendError::ProcessingFailed("mock encode failure".into()));
            }
            Ok(())
        }
    }

    #[test]
    fn mock_records_identify() {
        let backend = MockBackend::with_dimensions(vec![Dimensions {
            width: 800,
            height: 600,
        }]);

        let result = backend.identify(Path::new("/test/image.png")).unwrap();
        assert_eq!(result.width, 800);
        assert_eq!(result.height, 600);

        let ops = backend.get_operations();
        assert_eq!(ops.len(), 1);
        assert!(matches!(&ops[0], RecordedOp::Identify(p) if p == "/test/image.png"));
    }

    #[test]
    fn mock_decode_without_dimensions_fails() {
        let backend = MockBackend::new();
        assert!(backend.decode(Path::new("/a.gif"), ImageKind::Gif).is_err());
        assert_eq!(backend.get_operations().len(), 1);
    }

    #[test]
    fn mock_records_encode_settings() {
        let backend = MockBackend::new();
        let mut bitmap = Bitmap::new(DynamicImage::new_rgb8(30, 20));
        bitmap.set_interlace(true);

        backend
            .encode(
                &bitmap,
                &EncodeParams {
                    output: "/out.jpg".into(),
                    settings: EncodeSettings::Jpeg {
                        quality: Quality::new(90),
                    },
                },
            )
            .unwrap();

        let ops = backend.get_operations();
        assert!(matches!(
            &ops[0],
            RecordedOp::Encode {
                width: 30,
                height: 20,
                interlaced: true,
                settings: EncodeSettings::Jpeg { quality },
                ..
            } if quality.value() == 90
        ));
    }

    #[test]
    fn bitmap_reports_dimensions_and_interlace() {
        let mut bitmap = Bitmap::new(DynamicImage::new_rgba8(7, 3));
        assert_eq!(bitmap.dimensions(), Dimensions::from((7, 3)));
        assert!(!bitmap.is_interlaced());
        bitmap.set_interlace(true);
        assert!(bitmap.is_interlaced());
    }
}
