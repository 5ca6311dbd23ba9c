//! Palette construction and color lookup.

use std::fmt;
use std::str::FromStr;

use super::finder::Finder;
use super::tables;
use super::{Hsv, PaletteError, Rgb};

/// Color policy of a conversion.
///
/// Grayscale modes carry a level in `1..=255`, producing `level + 1` tones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColorMode {
    /// Black and white.
    Mono,
    /// Grays matched by NTSC luma.
    Gray(u8),
    /// Grays matched by plain RGB mean.
    GrayMean(u8),
    /// 8 colors, one bit per channel.
    Fixed8,
    /// X68k 16-color text palette.
    FixedX68k,
    /// ANSI/VGA 16 colors.
    FixedAnsi16,
    /// 3-3-2 bit RGB.
    #[default]
    Fixed256,
    /// 2-2-2 bit RGB plus 2 bit intensity.
    Fixed256Rgbi,
    /// Caller-supplied table, see [`Palette::custom`].
    Custom,
}

impl ColorMode {
    pub fn name(&self) -> &'static str {
        match self {
            ColorMode::Mono => "Mono",
            ColorMode::Gray(_) => "Gray",
            ColorMode::GrayMean(_) => "GrayMean",
            ColorMode::Fixed8 => "Fixed8",
            ColorMode::FixedX68k => "FixedX68k",
            ColorMode::FixedAnsi16 => "FixedANSI16",
            ColorMode::Fixed256 => "Fixed256",
            ColorMode::Fixed256Rgbi => "Fixed256RGBI",
            ColorMode::Custom => "Custom",
        }
    }
}

impl fmt::Display for ColorMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColorMode::Gray(level) | ColorMode::GrayMean(level) => {
                write!(f, "{}({})", self.name(), level)
            }
            _ => f.write_str(self.name()),
        }
    }
}

/// Whether to use the mode's own finder or force the HSV search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FinderMode {
    #[default]
    Default,
    Hsv,
}

impl FinderMode {
    pub fn name(&self) -> &'static str {
        match self {
            FinderMode::Default => "Default",
            FinderMode::Hsv => "HSV",
        }
    }
}

/// An ordered color table bound to its nearest-color finder.
///
/// The palette is an owned value: each conversion session builds its own,
/// and [`Palette::color_factor`] rewrites only that copy.
///
/// # Example
///
/// ```
/// use sixel_reductor::{ColorMode, Palette, Rgb};
///
/// let palette = Palette::new(ColorMode::Fixed8).unwrap();
/// assert_eq!(palette.len(), 8);
/// assert_eq!(palette.find(Rgb::new(250, 10, 10)), 1);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Palette {
    colors: Vec<Rgb>,
    hsv: Vec<Hsv>,
    finder: Finder,
    mode: ColorMode,
}

impl Palette {
    /// Build the table and finder for a fixed or generated mode.
    ///
    /// # Errors
    ///
    /// [`PaletteError::InvalidGrayLevel`] for a gray level of 0, and
    /// [`PaletteError::MissingCustomColors`] for [`ColorMode::Custom`].
    pub fn new(mode: ColorMode) -> Result<Self, PaletteError> {
        let (colors, finder) = match mode {
            ColorMode::Mono => (tables::MONO.to_vec(), Finder::Mono),
            ColorMode::Gray(level) | ColorMode::GrayMean(level) => {
                if level == 0 {
                    return Err(PaletteError::InvalidGrayLevel(level));
                }
                let count = level as u16 + 1;
                let finder = if matches!(mode, ColorMode::Gray(_)) {
                    Finder::Gray { count }
                } else {
                    Finder::GrayMean { count }
                };
                (tables::gray(count as usize), finder)
            }
            ColorMode::Fixed8 => (tables::FIXED8.to_vec(), Finder::Fixed8),
            ColorMode::FixedX68k => (tables::FIXED_X68K.to_vec(), Finder::FixedX68k),
            ColorMode::FixedAnsi16 => (tables::FIXED_ANSI16.to_vec(), Finder::FixedAnsi16),
            ColorMode::Fixed256 => (tables::fixed256(), Finder::Fixed256),
            ColorMode::Fixed256Rgbi => (tables::fixed256_rgbi(), Finder::Fixed256Rgbi),
            ColorMode::Custom => return Err(PaletteError::MissingCustomColors),
        };
        Ok(Self {
            colors,
            hsv: Vec::new(),
            finder,
            mode,
        })
    }

    /// Build a caller-supplied table, searched by HSV distance.
    pub fn custom(colors: &[Rgb]) -> Result<Self, PaletteError> {
        if colors.is_empty() {
            return Err(PaletteError::Empty);
        }
        if colors.len() > 256 {
            return Err(PaletteError::TooManyColors(colors.len()));
        }
        Ok(Self {
            colors: colors.to_vec(),
            hsv: colors.iter().map(|&c| Hsv::from(c)).collect(),
            finder: Finder::Hsv,
            mode: ColorMode::Custom,
        })
    }

    /// Parse a custom table from hex strings.
    ///
    /// # Example
    ///
    /// ```
    /// use sixel_reductor::Palette;
    ///
    /// let palette = Palette::from_hex(&["#000", "#fff", "#f00"]).unwrap();
    /// assert_eq!(palette.len(), 3);
    /// ```
    pub fn from_hex(colors: &[&str]) -> Result<Self, PaletteError> {
        let parsed = colors
            .iter()
            .map(|s| Rgb::from_str(s).map_err(PaletteError::ParseColor))
            .collect::<Result<Vec<_>, _>>()?;
        Self::custom(&parsed)
    }

    /// Select the finder. [`FinderMode::Hsv`] snapshots the current
    /// table into HSV and searches it for every pixel.
    pub fn with_finder(mut self, finder: FinderMode) -> Self {
        if finder == FinderMode::Hsv {
            self.hsv = self.colors.iter().map(|&c| Hsv::from(c)).collect();
            self.finder = Finder::Hsv;
        }
        self
    }

    /// Scale every entry by `factor`, saturating to `0..=255`.
    ///
    /// Meant for a palette that is already attached to a reduced image:
    /// only the emitted colors change, the indices stay as quantized. The
    /// finder keeps matching against the table it was built with.
    pub fn color_factor(&mut self, factor: f32) {
        let scale = |v: u8| (v as f32 * factor).clamp(0.0, 255.0) as u8;
        for c in &mut self.colors {
            *c = Rgb::new(scale(c.r), scale(c.g), scale(c.b));
        }
    }

    /// Index of the nearest entry. Always `< len()`.
    #[inline]
    pub fn find(&self, c: Rgb) -> u8 {
        self.finder.find(c, &self.hsv)
    }

    #[inline]
    pub fn color(&self, index: usize) -> Rgb {
        self.colors[index]
    }

    #[inline]
    pub fn colors(&self) -> &[Rgb] {
        &self.colors
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    #[inline]
    pub fn mode(&self) -> ColorMode {
        self.mode
    }

    #[inline]
    pub fn finder(&self) -> Finder {
        self.finder
    }
}
