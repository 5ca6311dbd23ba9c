//! SixelConverter builder -- the primary entry point for the crate.
//!
//! [`SixelConverter`] gathers every conversion setting behind a fluent
//! builder and runs the pipeline: palette construction, resampling
//! reduction, and sixel encoding.

use std::io::Write;

use crate::image::Image;
use crate::output::IndexedImage;
use crate::palette::{ColorMode, FinderMode, Palette, Rgb};
use crate::reduce::{preferred_size, Diffusion, ReduceMode, ReduceOptions, ResizeAxis, MAX_GAIN};
use crate::sixel::{self, SixelOptions};

use super::ReductorError;

/// High-level conversion builder.
///
/// - Configuration methods consume and return `self`
/// - [`reduce()`](Self::reduce) and [`convert()`](Self::convert) take
///   `&self`, so one converter serves any number of images
/// - Every conversion builds its own [`Palette`] and noise generator; two
///   converters never share state
///
/// # Example
///
/// ```
/// use sixel_reductor::{ColorMode, Image, ReduceMode, SixelConverter};
///
/// let img = Image::from_rgb(vec![255; 4 * 6 * 3], 4, 6).unwrap();
/// let converter = SixelConverter::new()
///     .color_mode(ColorMode::Fixed8)
///     .reduce_mode(ReduceMode::Fast)
///     .suppress_palette(true);
///
/// let mut out = Vec::new();
/// converter.convert(&img, &mut out).unwrap();
/// assert_eq!(out, b"\x1bP7;1;q\"1;1;4;6#7!4~$$-\x1b\\");
/// ```
#[derive(Debug, Clone)]
pub struct SixelConverter {
    color_mode: ColorMode,
    custom_colors: Vec<Rgb>,
    finder: FinderMode,
    reduce_mode: ReduceMode,
    reduce_opts: ReduceOptions,
    sixel_opts: SixelOptions,
    resize_axis: ResizeAxis,
    width: usize,
    height: usize,
    color_factor: Option<f32>,
}

impl Default for SixelConverter {
    fn default() -> Self {
        Self {
            color_mode: ColorMode::default(),
            custom_colors: Vec::new(),
            finder: FinderMode::default(),
            reduce_mode: ReduceMode::default(),
            reduce_opts: ReduceOptions::default(),
            sixel_opts: SixelOptions::default(),
            resize_axis: ResizeAxis::default(),
            width: 0,
            height: 0,
            color_factor: None,
        }
    }
}

impl SixelConverter {
    /// Fixed256, HighQuality with Floyd-Steinberg, unity gain, no noise,
    /// source size.
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn color_mode(mut self, mode: ColorMode) -> Self {
        self.color_mode = mode;
        self
    }

    /// Use a caller-supplied table; switches the mode to [`ColorMode::Custom`].
    #[inline]
    pub fn custom_palette(mut self, colors: &[Rgb]) -> Self {
        self.color_mode = ColorMode::Custom;
        self.custom_colors = colors.to_vec();
        self
    }

    #[inline]
    pub fn finder(mut self, finder: FinderMode) -> Self {
        self.finder = finder;
        self
    }

    #[inline]
    pub fn reduce_mode(mut self, mode: ReduceMode) -> Self {
        self.reduce_mode = mode;
        self
    }

    #[inline]
    pub fn diffusion(mut self, diffusion: Diffusion) -> Self {
        self.reduce_opts = self.reduce_opts.diffusion(diffusion);
        self
    }

    /// Output gain, 256 = unity. Values above 512 make
    /// [`reduce()`](Self::reduce) fail.
    #[inline]
    pub fn gain(mut self, gain: u16) -> Self {
        self.reduce_opts = self.reduce_opts.gain(gain);
        self
    }

    #[inline]
    pub fn noise_level(mut self, level: u16) -> Self {
        self.reduce_opts = self.reduce_opts.noise_level(level);
        self
    }

    #[inline]
    pub fn seed(mut self, seed: u32) -> Self {
        self.reduce_opts = self.reduce_opts.seed(seed);
        self
    }

    #[inline]
    pub fn ormode(mut self, enabled: bool) -> Self {
        self.sixel_opts = self.sixel_opts.ormode(enabled);
        self
    }

    #[inline]
    pub fn suppress_palette(mut self, enabled: bool) -> Self {
        self.sixel_opts = self.sixel_opts.suppress_palette(enabled);
        self
    }

    /// Requested destination size; 0 keeps the source size on that axis.
    #[inline]
    pub fn resize(mut self, width: usize, height: usize) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    #[inline]
    pub fn resize_axis(mut self, axis: ResizeAxis) -> Self {
        self.resize_axis = axis;
        self
    }

    /// Scale the emitted palette by `factor`. Reduction still runs against
    /// the unscaled table; only the reduced image's colors change.
    #[inline]
    pub fn color_factor(mut self, factor: f32) -> Self {
        self.color_factor = Some(factor);
        self
    }

    /// Build the palette this converter reduces against. The color factor
    /// is not part of it; see [`output_palette`](Self::output_palette).
    pub fn palette(&self) -> Result<Palette, ReductorError> {
        let palette = match self.color_mode {
            ColorMode::Custom if !self.custom_colors.is_empty() => {
                Palette::custom(&self.custom_colors)?
            }
            mode => Palette::new(mode)?.with_finder(self.finder),
        };
        Ok(palette)
    }

    /// The palette emitted with reduced images: [`palette`](Self::palette)
    /// scaled by the color factor, if one is set.
    pub fn output_palette(&self) -> Result<Palette, ReductorError> {
        let mut palette = self.palette()?;
        if let Some(factor) = self.color_factor {
            palette.color_factor(factor);
        }
        Ok(palette)
    }

    /// Destination size for `image` under the resize policy.
    pub fn target_size(&self, image: &Image) -> (usize, usize) {
        preferred_size(
            image.width(),
            image.height(),
            self.resize_axis,
            self.width,
            self.height,
        )
    }

    /// Resample and quantize `image` to [`target_size`](Self::target_size).
    pub fn reduce(&self, image: &Image) -> Result<IndexedImage, ReductorError> {
        let (w, h) = self.target_size(image);
        self.reduce_to(image, w, h)
    }

    /// Resample and quantize `image` to exactly `width` x `height`.
    ///
    /// # Errors
    ///
    /// Configuration is checked before any pixel is read:
    /// [`ReductorError::InvalidGain`], [`ReductorError::InvalidSize`], or
    /// [`ReductorError::Palette`].
    pub fn reduce_to(
        &self,
        image: &Image,
        width: usize,
        height: usize,
    ) -> Result<IndexedImage, ReductorError> {
        if self.reduce_opts.gain > MAX_GAIN {
            return Err(ReductorError::InvalidGain(self.reduce_opts.gain));
        }
        if width == 0 || height == 0 {
            return Err(ReductorError::InvalidSize { width, height });
        }
        let palette = self.palette()?;

        tracing::debug!(
            src_width = image.width(),
            src_height = image.height(),
            width,
            height,
            color_mode = %palette.mode(),
            reduce = %self.reduce_mode,
            diffusion = %self.reduce_opts.diffusion,
            "reducing"
        );

        let indices = self.reduce_mode.strategy().reduce(
            image,
            width,
            height,
            &palette,
            &self.reduce_opts,
        );
        let mut indexed = IndexedImage::new(indices, width, height, palette);
        if let Some(factor) = self.color_factor {
            let mut emitted = indexed.palette().clone();
            emitted.color_factor(factor);
            indexed.set_palette(emitted);
        }
        Ok(indexed)
    }

    /// Encode a reduced image as a sixel stream.
    pub fn write_sixel(&self, image: &IndexedImage, out: &mut dyn Write) -> Result<(), ReductorError> {
        sixel::encode(image, out, &self.sixel_opts)
    }

    /// Like [`write_sixel`](Self::write_sixel), polling `cancelled` before
    /// every band.
    pub fn write_sixel_cancellable(
        &self,
        image: &IndexedImage,
        out: &mut dyn Write,
        cancelled: &dyn Fn() -> bool,
    ) -> Result<(), ReductorError> {
        sixel::encode_cancellable(image, out, &self.sixel_opts, cancelled)
    }

    /// Reduce and encode in one call.
    pub fn convert(&self, image: &Image, out: &mut dyn Write) -> Result<(), ReductorError> {
        let indexed = self.reduce(image)?;
        self.write_sixel(&indexed, out)
    }
}
