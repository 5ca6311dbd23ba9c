//! Nearest-color finders.
//!
//! Every palette mode has a closed-form finder except the custom table,
//! which is searched linearly by HSV distance. [`Finder`] is the closed set
//! of strategies; [`Finder::find`] is the single dispatch point.

use super::{Hsv, Rgb};

/// Nearest-color strategy bound to a palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Finder {
    /// Threshold the channel sum at mid-gray.
    Mono,
    /// NTSC-weighted luma bucketed into `count` tones.
    Gray { count: u16 },
    /// Plain RGB mean bucketed into `count` tones.
    GrayMean { count: u16 },
    Fixed8,
    FixedX68k,
    FixedAnsi16,
    /// 3-3-2 bit truncation.
    Fixed256,
    /// 2-2-2 bits plus an intensity field from the dominant channel.
    Fixed256Rgbi,
    /// Linear search by weighted HSV distance.
    Hsv,
}

impl Finder {
    /// Map `c` to a palette index.
    ///
    /// `hsv` is the palette converted to HSV; only [`Finder::Hsv`] reads it.
    #[inline]
    pub fn find(&self, c: Rgb, hsv: &[Hsv]) -> u8 {
        match *self {
            Finder::Mono => mono(c),
            Finder::Gray { count } => gray(c, count),
            Finder::GrayMean { count } => gray_mean(c, count),
            Finder::Fixed8 => fixed8(c),
            Finder::FixedX68k => fixed_x68k(c),
            Finder::FixedAnsi16 => fixed_ansi16(c),
            Finder::Fixed256 => fixed256(c),
            Finder::Fixed256Rgbi => fixed256_rgbi(c),
            Finder::Hsv => nearest_hsv(hsv, c),
        }
    }
}

/// One bit per channel, set when the channel reaches `threshold`.
#[inline]
fn channel_bits(c: Rgb, threshold: u8) -> u8 {
    (c.r >= threshold) as u8 | ((c.g >= threshold) as u8) << 1 | ((c.b >= threshold) as u8) << 2
}

/// All three channel bits equal.
#[inline]
fn achromatic(bits: u8) -> bool {
    bits == 0 || bits == 7
}

fn mono(c: Rgb) -> u8 {
    (c.sum() > 128 * 3) as u8
}

fn gray(c: Rgb, count: u16) -> u8 {
    let count = count as u32;
    let luma = c.r as u32 * 76 + c.g as u32 * 153 + c.b as u32 * 26;
    let i = (luma * (count - 1) + 255 / count) / 255 / 255;
    i.min(count - 1) as u8
}

fn gray_mean(c: Rgb, count: u16) -> u8 {
    let count = count as u32;
    let i = (c.sum() + (255 / count) * 3) * (count - 1) / 3 / 255;
    i.min(count - 1) as u8
}

fn fixed8(c: Rgb) -> u8 {
    channel_bits(c, 128)
}

fn fixed_x68k(c: Rgb) -> u8 {
    if c.r >= 192 || c.g >= 192 || c.b >= 192 {
        let bits = channel_bits(c, 192);
        if achromatic(bits) {
            7
        } else {
            bits
        }
    } else {
        let bits = channel_bits(c, 64);
        if achromatic(bits) {
            if c.sum() >= 64 * 3 {
                15
            } else {
                8
            }
        } else {
            bits | 8
        }
    }
}

fn fixed_ansi16(c: Rgb) -> u8 {
    if c.r >= 213 || c.g >= 213 || c.b >= 213 {
        let bits = channel_bits(c, 213);
        if achromatic(bits) {
            if c.sum() >= 224 * 3 {
                15
            } else {
                7
            }
        } else {
            bits | 8
        }
    } else {
        let bits = channel_bits(c, 85);
        if achromatic(bits) {
            let sum = c.sum();
            if sum >= 128 * 3 {
                7
            } else if sum >= 42 * 3 {
                8
            } else {
                0
            }
        } else {
            bits
        }
    }
}

fn fixed256(c: Rgb) -> u8 {
    (c.r >> 5) << 5 | (c.g >> 5) << 2 | c.b >> 6
}

fn fixed256_rgbi(c: Rgb) -> u8 {
    let (r, g, b) = (c.r >> 6, c.g >> 6, c.b >> 6);
    let dominant = |v: u8| ((v & 0x3f) as u32 + 10) / 21;
    let i = if r > g && r > b {
        dominant(c.r)
    } else if g > r && g > b {
        dominant(c.g)
    } else if b > r && b > g {
        dominant(c.b)
    } else {
        ((c.r & 0x3f) as u32 + (c.g & 0x3f) as u32 + (c.b & 0x3f) as u32 + 31) / 63
    };
    r << 6 | g << 4 | b << 2 | i as u8
}

/// Weighted distance from a sample to a palette entry.
///
/// Hue differences wrap around the 240-step wheel; a chromatic sample
/// compared against a gray entry pays a fixed hue and saturation penalty.
pub(crate) fn hsv_distance(entry: Hsv, sample: Hsv) -> i32 {
    let dv = entry.v as i32 - sample.v as i32;
    let mut ds = entry.s as i32 - sample.s as i32;
    let mut dh = entry.h as i32 - sample.h as i32;
    if sample.s != 0 && entry.s == 0 {
        dh = 120;
        ds = 120;
    }
    if dh > 120 {
        dh -= 240;
    }
    if dh < -120 {
        dh += 240;
    }
    dh.abs() * (sample.s as i32 + 1) / 32 + ds.abs() * 3 + dv.abs() * 5
}

/// First index with minimal [`hsv_distance`].
fn nearest_hsv(table: &[Hsv], c: Rgb) -> u8 {
    let sample = Hsv::from(c);
    let mut best = 0;
    let mut best_d = i32::MAX;
    for (i, &entry) in table.iter().enumerate() {
        let d = hsv_distance(entry, sample);
        if d < best_d {
            best_d = d;
            best = i;
        }
    }
    best as u8
}
