#![allow(
    clippy::needless_range_loop,
    clippy::module_inception,
    clippy::manual_range_contains
)]

//! sixel-reductor: palette reduction and sixel encoding for terminals
//!
//! This library turns an RGB or RGBA raster into a sixel stream that a
//! DEC-compatible terminal can display. Reduction to a small palette and
//! resizing happen in a single pass; the result is an [`IndexedImage`]
//! that can be encoded as sixel or written out as a BMP.
//!
//! # Quick Start
//!
//! The [`SixelConverter`] builder is the primary entry point:
//!
//! ```
//! use sixel_reductor::{ColorMode, Image, SixelConverter};
//!
//! let pixels = vec![128u8; 8 * 8 * 3];
//! let image = Image::from_rgb(pixels, 8, 8).unwrap();
//!
//! let converter = SixelConverter::new()
//!     .color_mode(ColorMode::FixedAnsi16)
//!     .resize(4, 0);
//!
//! let mut out = Vec::new();
//! converter.convert(&image, &mut out).unwrap();
//! assert!(out.starts_with(b"\x1bP7;1;q\"1;1;4;4"));
//! assert!(out.ends_with(b"\x1b\\"));
//! ```
//!
//! # Pipeline
//!
//! 1. **Palette**: a [`ColorMode`] selects a fixed or generated table and
//!    its closed-form nearest-color finder; custom tables are searched by
//!    HSV distance.
//! 2. **Reduction**: a [`ReduceMode`] walks the destination raster with
//!    [`StepRational`] cursors, resampling and quantizing together.
//!    HighQuality averages source cells and diffuses the residual with one
//!    of eight [`Diffusion`] kernels.
//! 3. **Encoding**: the [`sixel`] module emits one band per six rows, in
//!    normal or OR mode. [`write_bmp`] is the alternative sink.
//!
//! # Integer arithmetic
//!
//! Every step is integer-only. Kernel weights are fractions of 256,
//! accumulated error is clamped to `[-512, 511]`, and gain is expressed in
//! 1/256 steps. Identical inputs and seeds always produce identical bytes.

pub mod api;
pub mod bmp;
pub mod image;
pub mod output;
pub mod palette;
pub mod rational;
pub mod reduce;
pub mod sixel;


pub use api::{ReductorError, SixelConverter};
pub use bmp::write_bmp;
pub use image::{Image, ImageError};
pub use output::IndexedImage;
pub use palette::{ColorMode, FinderMode, Palette, PaletteError, ParseColorError, Rgb};
pub use rational::StepRational;
pub use reduce::{preferred_size, Diffusion, ReduceMode, ReduceOptions, ResizeAxis};
pub use sixel::SixelOptions;
