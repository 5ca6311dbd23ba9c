//! Resampling color reduction.
//!
//! Every strategy walks the destination raster once, resampling the source
//! with a pair of [`StepRational`] cursors and mapping each pixel to a
//! palette index in the same pass:
//!
//! - **Simple**: nearest sample, no error diffusion
//! - **Fast**: nearest sample, full error carried to the right neighbor
//! - **HighQuality**: area average plus a two-dimensional [`Diffusion`]
//!   kernel (default)
//!
//! All strategies implement [`Reduce`]; [`ReduceMode`] selects one at
//! runtime. Configuration is done via [`ReduceOptions`].

mod fast;
mod high_quality;
mod kernel;
mod noise;
mod options;
mod resize;
mod simple;

use std::fmt;
use std::str::FromStr;

pub use fast::Fast;
pub use high_quality::HighQuality;
pub use kernel::*;
pub use noise::{Noise, DEFAULT_SEED};
pub use options::{ReduceOptions, MAX_GAIN, UNITY_GAIN};
pub use resize::{preferred_size, ParseResizeAxisError, ResizeAxis};
pub use simple::Simple;

use crate::image::Image;
use crate::palette::Palette;
use crate::rational::StepRational;

/// Strategy selection for [`SixelConverter`](crate::SixelConverter).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReduceMode {
    Simple,
    Fast,
    #[default]
    HighQuality,
}

impl ReduceMode {
    pub fn name(&self) -> &'static str {
        match self {
            ReduceMode::Simple => "Simple",
            ReduceMode::Fast => "Fast",
            ReduceMode::HighQuality => "HighQuality",
        }
    }

    /// The strategy behind this mode.
    pub fn strategy(&self) -> &'static dyn Reduce {
        match self {
            ReduceMode::Simple => &Simple,
            ReduceMode::Fast => &Fast,
            ReduceMode::HighQuality => &HighQuality,
        }
    }
}

impl fmt::Display for ReduceMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when parsing an unknown reduce mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseReduceModeError(pub String);

impl fmt::Display for ParseReduceModeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown reduce method '{}' (expected none, simple, fast or high)",
            self.0
        )
    }
}

impl std::error::Error for ParseReduceModeError {}

impl FromStr for ReduceMode {
    type Err = ParseReduceModeError;

    /// `none` is an alias for `simple`; `high` and `auto` for `highquality`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "none" | "simple" => Ok(ReduceMode::Simple),
            "fast" => Ok(ReduceMode::Fast),
            "auto" | "high" | "highquality" => Ok(ReduceMode::HighQuality),
            _ => Err(ParseReduceModeError(s.to_string())),
        }
    }
}

/// A resampling color reducer.
///
/// Implementors read `image` at whatever positions they need and return
/// one palette index per destination pixel, row-major, each `< palette.len()`.
///
/// Callers guarantee `dst_w >= 1` and `dst_h >= 1`; [`Image`] already
/// guarantees a non-empty source.
pub trait Reduce {
    fn reduce(
        &self,
        image: &Image,
        dst_w: usize,
        dst_h: usize,
        palette: &Palette,
        options: &ReduceOptions,
    ) -> Vec<u8>;
}

/// Walks one source axis in `dst_len` equal steps.
pub(crate) struct Sampler {
    pos: StepRational,
    step: StepRational,
}

impl Sampler {
    pub(crate) fn new(src_len: usize, dst_len: usize) -> Self {
        Self {
            pos: StepRational::origin(dst_len),
            step: StepRational::ratio(src_len, dst_len),
        }
    }

    /// Start over at source position 0.
    #[inline]
    pub(crate) fn rewind(&mut self) {
        self.pos.reset();
    }

    /// Source index for the next destination pixel.
    #[inline]
    pub(crate) fn next_start(&mut self) -> usize {
        let start = self.pos.index();
        self.pos.add(&self.step);
        start
    }

    /// Half-open source range covered by the next destination pixel.
    /// Never empty: when upscaling the range is one pixel wide.
    #[inline]
    pub(crate) fn next_span(&mut self) -> (usize, usize) {
        let start = self.next_start();
        let end = self.pos.index();
        if end == start {
            (start, start + 1)
        } else {
            (start, end)
        }
    }
}

/// First three channels of pixel `(x, y)`.
#[inline]
pub(crate) fn sample_rgb(image: &Image, x: usize, y: usize) -> [i32; 3] {
    let px = image.pixel(x, y);
    [px[0] as i32, px[1] as i32, px[2] as i32]
}
