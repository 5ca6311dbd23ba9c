//! Palette construction and color-register parsing errors.

use std::fmt;
use std::num::ParseIntError;

/// A color register given as hex text could not be read.
#[derive(Debug, Clone, PartialEq)]
pub enum ParseColorError {
    /// Not `RGB` or `RRGGBB` after the optional `#`; carries the digit count.
    DigitCount(usize),
    /// The text holds a non-ASCII character.
    NotAscii,
    /// A digit is not hexadecimal.
    BadDigit(ParseIntError),
}

impl From<ParseIntError> for ParseColorError {
    fn from(err: ParseIntError) -> Self {
        ParseColorError::BadDigit(err)
    }
}

impl fmt::Display for ParseColorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseColorError::DigitCount(n) => {
                write!(f, "color register needs 3 or 6 hex digits, got {}", n)
            }
            ParseColorError::NotAscii => f.write_str("color register is not plain ASCII"),
            ParseColorError::BadDigit(err) => write!(f, "color register digit: {}", err),
        }
    }
}

impl std::error::Error for ParseColorError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ParseColorError::BadDigit(err) => Some(err),
            _ => None,
        }
    }
}

/// Error type for palette construction.
///
/// All of these are configuration errors: they are reported when the
/// palette is built, never while quantizing pixels.
#[derive(Debug, Clone, PartialEq)]
pub enum PaletteError {
    /// Grayscale level must be 1..=255 (2..=256 tones)
    InvalidGrayLevel(u8),
    /// `ColorMode::Custom` was requested without supplying colors
    MissingCustomColors,
    /// No colors provided for a custom palette
    Empty,
    /// A custom palette may hold at most 256 colors
    TooManyColors(usize),
    /// Invalid hex color string
    ParseColor(ParseColorError),
}

impl From<ParseColorError> for PaletteError {
    fn from(err: ParseColorError) -> Self {
        PaletteError::ParseColor(err)
    }
}

impl fmt::Display for PaletteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PaletteError::InvalidGrayLevel(level) => {
                write!(f, "invalid grayscale level {} (expected 1..=255)", level)
            }
            PaletteError::MissingCustomColors => {
                write!(f, "custom color mode requires a custom palette")
            }
            PaletteError::Empty => write!(f, "palette must contain at least one color"),
            PaletteError::TooManyColors(n) => {
                write!(f, "palette has {} colors, at most 256 are allowed", n)
            }
            PaletteError::ParseColor(err) => write!(f, "invalid color: {}", err),
        }
    }
}

impl std::error::Error for PaletteError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PaletteError::ParseColor(err) => Some(err),
            _ => None,
        }
    }
}
