//! Reduction options.

use super::kernel::Diffusion;
use super::noise::DEFAULT_SEED;

/// Unity output gain.
pub const UNITY_GAIN: u16 = 256;

/// Largest accepted output gain (2x).
pub const MAX_GAIN: u16 = 512;

/// Tuning knobs shared by every reduction strategy.
///
/// # Example
///
/// ```
/// use sixel_reductor::{Diffusion, ReduceOptions};
///
/// let options = ReduceOptions::new()
///     .diffusion(Diffusion::Atkinson)
///     .gain(300)
///     .noise_level(32);
/// assert_eq!(options.gain, 300);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReduceOptions {
    /// Kernel used by the high-quality strategy.
    ///
    /// Default: [`Diffusion::Fs`]
    pub diffusion: Diffusion,

    /// Output gain in 1/256 steps, `0..=512`. Every sampled channel is
    /// scaled by `gain / 256` before error is added.
    ///
    /// Default: `256`
    pub gain: u16,

    /// Jitter added to the diffused error; 0 disables it.
    ///
    /// Default: `0`
    pub noise_level: u16,

    /// Seed for the jitter generator.
    ///
    /// Default: [`DEFAULT_SEED`]
    pub seed: u32,
}

impl Default for ReduceOptions {
    fn default() -> Self {
        Self {
            diffusion: Diffusion::default(),
            gain: UNITY_GAIN,
            noise_level: 0,
            seed: DEFAULT_SEED,
        }
    }
}

impl ReduceOptions {
    /// Same as [`ReduceOptions::default`].
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn diffusion(mut self, diffusion: Diffusion) -> Self {
        self.diffusion = diffusion;
        self
    }

    /// Set the output gain. Values above [`MAX_GAIN`] are rejected by
    /// [`SixelConverter::reduce`](crate::SixelConverter::reduce).
    #[inline]
    pub fn gain(mut self, gain: u16) -> Self {
        self.gain = gain;
        self
    }

    #[inline]
    pub fn noise_level(mut self, level: u16) -> Self {
        self.noise_level = level;
        self
    }

    #[inline]
    pub fn seed(mut self, seed: u32) -> Self {
        self.seed = seed;
        self
    }

    /// Scale a sampled color by the gain.
    #[inline]
    pub(crate) fn apply_gain(&self, c: [i32; 3]) -> [i32; 3] {
        if self.gain == UNITY_GAIN {
            return c;
        }
        let g = self.gain as i32;
        [c[0] * g / 256, c[1] * g / 256, c[2] * g / 256]
    }
}
