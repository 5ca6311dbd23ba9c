//! 8-bit RGB and cone-model HSV color types.

use std::str::FromStr;

use super::ParseColorError;

/// An 8-bit RGB color: a palette entry or a quantizer input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    #[inline]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Same value on all three channels.
    #[inline]
    pub const fn gray(v: u8) -> Self {
        Self { r: v, g: v, b: v }
    }

    /// Saturate an `i32` triple into range.
    #[inline]
    pub fn saturating(r: i32, g: i32, b: i32) -> Self {
        Self {
            r: r.clamp(0, 255) as u8,
            g: g.clamp(0, 255) as u8,
            b: b.clamp(0, 255) as u8,
        }
    }

    /// Channel sum, the luma proxy several finders threshold on.
    #[inline]
    pub fn sum(&self) -> u32 {
        self.r as u32 + self.g as u32 + self.b as u32
    }
}

impl FromStr for Rgb {
    type Err = ParseColorError;

    /// Parse `#RRGGBB`, `RRGGBB`, `#RGB` or `RGB` (case-insensitive).
    ///
    /// # Examples
    ///
    /// ```
    /// use sixel_reductor::Rgb;
    ///
    /// let red: Rgb = "#F00".parse().unwrap();
    /// assert_eq!(red, Rgb::new(255, 0, 0));
    /// ```
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let s = s.strip_prefix('#').unwrap_or(s);
        if !s.is_ascii() {
            return Err(ParseColorError::NotAscii);
        }

        match s.len() {
            3 => {
                // 0xF -> 0xFF
                let r = u8::from_str_radix(&s[0..1], 16)? * 17;
                let g = u8::from_str_radix(&s[1..2], 16)? * 17;
                let b = u8::from_str_radix(&s[2..3], 16)? * 17;
                Ok(Self::new(r, g, b))
            }
            6 => {
                let r = u8::from_str_radix(&s[0..2], 16)?;
                let g = u8::from_str_radix(&s[2..4], 16)?;
                let b = u8::from_str_radix(&s[4..6], 16)?;
                Ok(Self::new(r, g, b))
            }
            n => Err(ParseColorError::DigitCount(n)),
        }
    }
}

/// Cone-model HSV with integer channels.
///
/// `h` is in `0..240` for chromatic colors; achromatic colors (`s == 0`)
/// carry the sentinel hue [`Hsv::ACHROMATIC`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hsv {
    pub h: u8,
    pub s: u8,
    pub v: u8,
}

impl Hsv {
    /// Hue assigned to grays.
    pub const ACHROMATIC: u8 = 255;
}

impl From<Rgb> for Hsv {
    fn from(c: Rgb) -> Self {
        let (r, g, b) = (c.r as i32, c.g as i32, c.b as i32);
        let min = r.min(g).min(b);
        let max = r.max(g).max(b);
        let s = max - min;
        let h = if s == 0 {
            Hsv::ACHROMATIC as i32
        } else if min == b {
            40 * (g - r) / s + 40
        } else if min == r {
            40 * (b - g) / s + 120
        } else {
            40 * (r - b) / s + 200
        };
        Self {
            h: h as u8,
            s: s as u8,
            v: max as u8,
        }
    }
}
