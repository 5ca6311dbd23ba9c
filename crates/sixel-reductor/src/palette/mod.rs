//! Palette tables and nearest-color finders
//!
//! This module provides the fixed and generated color tables for every
//! [`ColorMode`], the closed set of [`Finder`] strategies that map a color
//! to a table index, and the error types for palette construction.

mod color;
mod error;
mod finder;
mod palette;
pub mod tables;

pub use color::{Hsv, Rgb};
pub use error::{PaletteError, ParseColorError};
pub use finder::Finder;
pub use palette::{ColorMode, FinderMode, Palette};
