//! Error diffusion kernels and the error row ring.
//!
//! Kernel weights are fractions of 256. Every scatter clamps the
//! accumulated error to `[-512, 511]` so the 16-bit cells never overflow.

use std::fmt;
use std::str::FromStr;

/// Lower bound of an accumulated error cell.
pub const ERROR_MIN: i32 = -512;
/// Upper bound of an accumulated error cell.
pub const ERROR_MAX: i32 = 511;

/// Horizontal margin on each side of an error row; no kernel reaches further.
pub const MARGIN: usize = 2;

/// Number of error rows kept alive: the current row and two below.
pub const ROWS: usize = 3;

/// An error diffusion kernel.
///
/// Each entry is `(dx, dy, weight)`: the neighbor at `(x + dx, y + dy)`
/// receives `residual * weight / 256`.
#[derive(Debug, Clone, Copy)]
pub struct Kernel {
    pub entries: &'static [(i32, usize, i32)],
}

/// Floyd-Steinberg.
///
/// ```text
///        X   112
///    48  80   16
/// ```
pub const FLOYD_STEINBERG: Kernel = Kernel {
    entries: &[(1, 0, 112), (-1, 1, 48), (0, 1, 80), (1, 1, 16)],
};

/// Atkinson: six neighbors at 1/8 each, 75% total.
///
/// ```text
///        X   32  32
///    32  32  32
///        32
/// ```
pub const ATKINSON: Kernel = Kernel {
    entries: &[
        (1, 0, 32),
        (2, 0, 32),
        (-1, 1, 32),
        (0, 1, 32),
        (1, 1, 32),
        (0, 2, 32),
    ],
};

/// Jarvis, Judice and Ninke.
///
/// ```text
///            X   37  27
///    16  27  37  27  16
///     5  16  27  16   5
/// ```
pub const JARVIS_JUDICE_NINKE: Kernel = Kernel {
    entries: &[
        (1, 0, 37),
        (2, 0, 27),
        (-2, 1, 16),
        (-1, 1, 27),
        (0, 1, 37),
        (1, 1, 27),
        (2, 1, 16),
        (-2, 2, 5),
        (-1, 2, 16),
        (0, 2, 27),
        (1, 2, 16),
        (2, 2, 5),
    ],
};

/// Stucki.
///
/// ```text
///            X   43  21
///    11  21  43  21  11
///     5  11  21  11   5
/// ```
pub const STUCKI: Kernel = Kernel {
    entries: &[
        (1, 0, 43),
        (2, 0, 21),
        (-2, 1, 11),
        (-1, 1, 21),
        (0, 1, 43),
        (1, 1, 21),
        (2, 1, 11),
        (-2, 2, 5),
        (-1, 2, 11),
        (0, 2, 21),
        (1, 2, 11),
        (2, 2, 5),
    ],
};

/// Burkes: Stucki without the third row.
///
/// ```text
///            X   64  32
///    16  32  64  32  16
/// ```
pub const BURKES: Kernel = Kernel {
    entries: &[
        (1, 0, 64),
        (2, 0, 32),
        (-2, 1, 16),
        (-1, 1, 32),
        (0, 1, 64),
        (1, 1, 32),
        (2, 1, 16),
    ],
};

/// Right and below, half each.
pub const TWO: Kernel = Kernel {
    entries: &[(1, 0, 128), (0, 1, 128)],
};

/// Right, below and below-right.
pub const THREE: Kernel = Kernel {
    entries: &[(1, 0, 102), (0, 1, 102), (1, 1, 51)],
};

/// Diffusion method for the high-quality reductor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Diffusion {
    /// Floyd-Steinberg
    #[default]
    Fs,
    Atkinson,
    /// Jarvis, Judice and Ninke
    Jajuni,
    Stucki,
    Burkes,
    /// [`TWO`]
    Two,
    /// [`THREE`]
    Three,
    /// Each channel carried whole along its own direction: red right,
    /// blue down, green down-right. Useful for inspecting the diffusion.
    Rgb,
}

impl Diffusion {
    /// All methods, in declaration order.
    pub const ALL: [Diffusion; 8] = [
        Diffusion::Fs,
        Diffusion::Atkinson,
        Diffusion::Jajuni,
        Diffusion::Stucki,
        Diffusion::Burkes,
        Diffusion::Two,
        Diffusion::Three,
        Diffusion::Rgb,
    ];

    /// The weighted kernel, or `None` for [`Diffusion::Rgb`].
    pub fn kernel(&self) -> Option<&'static Kernel> {
        match self {
            Diffusion::Fs => Some(&FLOYD_STEINBERG),
            Diffusion::Atkinson => Some(&ATKINSON),
            Diffusion::Jajuni => Some(&JARVIS_JUDICE_NINKE),
            Diffusion::Stucki => Some(&STUCKI),
            Diffusion::Burkes => Some(&BURKES),
            Diffusion::Two => Some(&TWO),
            Diffusion::Three => Some(&THREE),
            Diffusion::Rgb => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Diffusion::Fs => "FS",
            Diffusion::Atkinson => "Atkinson",
            Diffusion::Jajuni => "Jajuni",
            Diffusion::Stucki => "Stucki",
            Diffusion::Burkes => "Burkes",
            Diffusion::Two => "2",
            Diffusion::Three => "3",
            Diffusion::Rgb => "RGB",
        }
    }
}

impl fmt::Display for Diffusion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when parsing an unknown diffusion name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseDiffusionError(pub String);

impl fmt::Display for ParseDiffusionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown diffusion '{}' (expected fs, atkinson, jajuni, stucki, burkes, 2, 3 or RGB)",
            self.0
        )
    }
}

impl std::error::Error for ParseDiffusionError {}

impl FromStr for Diffusion {
    type Err = ParseDiffusionError;

    /// Case-insensitive; accepts the display names.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "fs" => Ok(Diffusion::Fs),
            "atkinson" => Ok(Diffusion::Atkinson),
            "jajuni" => Ok(Diffusion::Jajuni),
            "stucki" => Ok(Diffusion::Stucki),
            "burkes" => Ok(Diffusion::Burkes),
            "2" => Ok(Diffusion::Two),
            "3" => Ok(Diffusion::Three),
            "rgb" => Ok(Diffusion::Rgb),
            _ => Err(ParseDiffusionError(s.to_string())),
        }
    }
}

/// Three rows of signed RGB error with a fixed horizontal margin.
///
/// Row 0 is the row being quantized, rows 1 and 2 lie below it. Logical
/// column `x` maps to cell `x + MARGIN`, so taps at `x - 2 ..= x + 2` are
/// always in bounds for `x` in `0..width`.
#[derive(Debug)]
pub struct ErrorBuffer {
    rows: [Vec<[i16; 3]>; ROWS],
    /// Index of the current row within `rows`.
    cursor: usize,
    width: usize,
}

impl ErrorBuffer {
    /// Allocate a zeroed buffer for rows of `width` pixels.
    pub fn new(width: usize) -> Self {
        let len = width + 2 * MARGIN;
        Self {
            rows: [vec![[0; 3]; len], vec![[0; 3]; len], vec![[0; 3]; len]],
            cursor: 0,
            width,
        }
    }

    #[inline]
    fn cell(&self, x: isize, dy: usize) -> (usize, usize) {
        debug_assert!(dy < ROWS);
        let cx = x + MARGIN as isize;
        debug_assert!(
            cx >= 0 && (cx as usize) < self.width + 2 * MARGIN,
            "column {} outside margin",
            x
        );
        ((self.cursor + dy) % ROWS, cx as usize)
    }

    /// Error accumulated for column `x` of the current row.
    #[inline]
    pub fn get(&self, x: usize) -> [i16; 3] {
        let (row, cx) = self.cell(x as isize, 0);
        self.rows[row][cx]
    }

    /// Add `residual * weight / 256` to the cell `(x, dy)`, clamped.
    #[inline]
    pub fn scatter(&mut self, x: isize, dy: usize, residual: [i32; 3], weight: i32) {
        let (row, cx) = self.cell(x, dy);
        let cell = &mut self.rows[row][cx];
        for c in 0..3 {
            cell[c] = saturate_add(cell[c], residual[c] * weight / 256);
        }
    }

    /// Add `value` to a single channel of cell `(x, dy)`, clamped.
    #[inline]
    pub fn scatter_channel(&mut self, x: isize, dy: usize, channel: usize, value: i32) {
        let (row, cx) = self.cell(x, dy);
        let cell = &mut self.rows[row][cx][channel];
        *cell = saturate_add(*cell, value);
    }

    /// Spread `residual` from column `x` according to `diffusion`.
    pub fn diffuse(&mut self, x: usize, residual: [i32; 3], diffusion: Diffusion) {
        let x = x as isize;
        match diffusion.kernel() {
            Some(kernel) => {
                for &(dx, dy, weight) in kernel.entries {
                    self.scatter(x + dx as isize, dy, residual, weight);
                }
            }
            None => {
                self.scatter_channel(x, 0, 0, residual[0]);
                self.scatter_channel(x, 1, 2, residual[2]);
                self.scatter_channel(x + 1, 1, 1, residual[1]);
            }
        }
    }

    /// Rotate the ring: the row below becomes current and the vacated row,
    /// margins included, is zeroed to serve as the new bottom row.
    pub fn advance_row(&mut self) {
        let vacated = self.cursor;
        self.cursor = (self.cursor + 1) % ROWS;
        self.rows[vacated].fill([0; 3]);
    }

    /// Every cell of every row, margins included.
    pub fn cells(&self) -> impl Iterator<Item = &[i16; 3]> {
        self.rows.iter().flat_map(|row| row.iter())
    }
}

#[inline]
fn saturate_add(cell: i16, delta: i32) -> i16 {
    (cell as i32 + delta).clamp(ERROR_MIN, ERROR_MAX) as i16
}
