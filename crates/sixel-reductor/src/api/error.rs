//! Unified error type for the sixel-reductor public API.
//!
//! [`ReductorError`] wraps every failure a conversion can hit into a single
//! enum for convenient `?` propagation in application code.

use crate::image::ImageError;
use crate::palette::PaletteError;
use std::fmt;
use std::io;

/// Unified error type for the sixel-reductor public API.
///
/// # Example
///
/// ```
/// use sixel_reductor::{ColorMode, ReductorError, SixelConverter};
///
/// let err = SixelConverter::new()
///     .color_mode(ColorMode::Gray(0))
///     .palette()
///     .unwrap_err();
/// assert!(matches!(err, ReductorError::Palette(_)));
/// ```
#[derive(Debug)]
pub enum ReductorError {
    /// The source raster was rejected.
    Image(ImageError),
    /// The palette could not be built.
    Palette(PaletteError),
    /// The destination size has a zero dimension.
    InvalidSize { width: usize, height: usize },
    /// Output gain above 512.
    InvalidGain(u16),
    /// Writing to the sink failed.
    Io(io::Error),
    /// The cancellation hook fired between bands.
    Cancelled,
}

impl fmt::Display for ReductorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReductorError::Image(err) => write!(f, "image error: {}", err),
            ReductorError::Palette(err) => write!(f, "palette error: {}", err),
            ReductorError::InvalidSize { width, height } => {
                write!(f, "invalid destination size {}x{}", width, height)
            }
            ReductorError::InvalidGain(gain) => {
                write!(f, "output gain {} out of range (0..=512)", gain)
            }
            ReductorError::Io(err) => write!(f, "write error: {}", err),
            ReductorError::Cancelled => f.write_str("conversion cancelled"),
        }
    }
}

impl std::error::Error for ReductorError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ReductorError::Image(err) => Some(err),
            ReductorError::Palette(err) => Some(err),
            ReductorError::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ImageError> for ReductorError {
    fn from(err: ImageError) -> Self {
        ReductorError::Image(err)
    }
}

impl From<PaletteError> for ReductorError {
    fn from(err: PaletteError) -> Self {
        ReductorError::Palette(err)
    }
}

impl From<io::Error> for ReductorError {
    fn from(err: io::Error) -> Self {
        ReductorError::Io(err)
    }
}
