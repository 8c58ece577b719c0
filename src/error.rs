//! Error type shared by construction-time validation and `resize()`.
//!
//! Every variant carries a stable numeric [`code`](ResizeError::code) so
//! callers can match on failures without parsing messages.
//!
//! | Code | Variant | Raised by |
//! |---|---|---|
//! | 0 | `FileDoesNotExist` | resize, probe |
//! | 1 | `WrongImageType` | format adapter |
//! | 2–4 | `InvalidGifFile` / `InvalidJpgFile` / `InvalidPngFile` | format adapter |
//! | 5 | `CannotReadImageInfo` | probe |
//! | 6 | `WrongResizeType` | mode parsing |
//! | 7 | `WrongDimension` | dimension calculator |
//! | 8–13 | missing / mistyped / out-of-range dimensions | validator |
//! | 14 | `Write` | encoder |

use crate::dimensions::DimensionKey;
use crate::imaging::BackendError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ResizeError {
    #[error("File does not exist: {}", .0.display())]
    FileDoesNotExist(PathBuf),
    #[error("Wrong image type for {}: expected {expected}", path.display())]
    WrongImageType {
        path: PathBuf,
        expected: &'static str,
    },
    #[error("Invalid GIF file: {0}")]
    InvalidGifFile(String),
    #[error("Invalid JPEG file: {0}")]
    InvalidJpgFile(String),
    #[error("Invalid PNG file: {0}")]
    InvalidPngFile(String),
    #[error("Cannot read image info: {0}")]
    CannotReadImageInfo(String),
    #[error("Wrong resize type: {0}")]
    WrongResizeType(String),
    #[error("Wrong dimension: {0}")]
    WrongDimension(String),
    #[error("Missing ratio")]
    MissingRatio,
    #[error("Missing width")]
    MissingWidth,
    #[error("Missing height")]
    MissingHeight,
    #[error("Missing width or height")]
    MissingWidthOrHeight,
    #[error("Wrong value type for {0}: expected an integer")]
    WrongValueType(DimensionKey),
    #[error("Value out of range for {key}: {value}")]
    ValueOutOfRange { key: DimensionKey, value: i64 },
    #[error("Failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: BackendError,
    },
}

impl ResizeError {
    /// Stable numeric code for this error kind.
    pub fn code(&self) -> u32 {
        match self {
            Self::FileDoesNotExist(_) => 0,
            Self::WrongImageType { .. } => 1,
            Self::InvalidGifFile(_) => 2,
            Self::InvalidJpgFile(_) => 3,
            Self::InvalidPngFile(_) => 4,
            Self::CannotReadImageInfo(_) => 5,
            Self::WrongResizeType(_) => 6,
            Self::WrongDimension(_) => 7,
            Self::MissingRatio => 8,
            Self::MissingWidth => 9,
            Self::MissingHeight => 10,
            Self::MissingWidthOrHeight => 11,
            Self::WrongValueType(_) => 12,
            Self::ValueOutOfRange { .. } => 13,
            Self::Write { .. } => 14,
        }
    }

    /// True for errors raised while building a `Resizer`, before any I/O.
    pub fn is_configuration_error(&self) -> bool {
        matches!(self.code(), 6 | 8..=13)
    }
}
