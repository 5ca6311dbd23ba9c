//! Bounded per-pixel jitter for breaking up banding.
//!
//! A 32-bit xorshift generator scoped to one conversion call. The seed is
//! explicit, so converting the same image twice yields the same output.

/// Default seed (the 64-bit constant `24539283060` truncated to 32 bits).
pub const DEFAULT_SEED: u32 = 24_539_283_060u64 as u32;

/// Xorshift32 jitter source.
#[derive(Debug, Clone)]
pub struct Noise {
    state: u32,
}

impl Noise {
    /// A zero seed would lock xorshift at zero, so it is replaced by
    /// [`DEFAULT_SEED`].
    pub fn new(seed: u32) -> Self {
        Self {
            state: if seed == 0 { DEFAULT_SEED } else { seed },
        }
    }

    #[inline]
    fn next_u32(&mut self) -> u32 {
        let mut y = self.state;
        y ^= y << 13;
        y ^= y >> 17;
        y ^= y << 5;
        self.state = y;
        y
    }

    /// A value in `-(level + 16) / 16 ..= (level + 16) / 16`.
    ///
    /// `level` is in 1/16 steps: 16 gives jitter of about ±2.
    #[inline]
    pub fn jitter(&mut self, level: i32) -> i32 {
        let span = level + 16;
        let raw = (self.next_u32() >> 4) as i32;
        (raw % (span * 2 + 1) - span) / 16
    }

    /// One jitter value per channel.
    #[inline]
    pub fn jitter3(&mut self, level: i32) -> [i32; 3] {
        [self.jitter(level), self.jitter(level), self.jitter(level)]
    }
}

impl Default for Noise {
    fn default() -> Self {
        Self::new(DEFAULT_SEED)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_seed_value() {
        assert_eq!(DEFAULT_SEED, 3_064_446_580);
    }

    #[test]
    fn test_jitter_stays_in_bounds() {
        for level in [1, 16, 64, 255, 1000] {
            let bound = (level + 16) / 16;
            let mut noise = Noise::default();
            for _ in 0..10_000 {
                let v = noise.jitter(level);
                assert!(
                    (-bound..=bound).contains(&v),
                    "level {level}: {v} outside ±{bound}"
                );
            }
        }
    }

    #[test]
    fn test_same_seed_same_sequence() {
        let mut a = Noise::new(1234);
        let mut b = Noise::new(1234);
        let xs: Vec<i32> = (0..100).map(|_| a.jitter(64)).collect();
        let ys: Vec<i32> = (0..100).map(|_| b.jitter(64)).collect();
        assert_eq!(xs, ys);
    }

    #[test]
    fn test_different_seeds_diverge() {
        let mut a = Noise::new(1);
        let mut b = Noise::new(2);
        let xs: Vec<i32> = (0..100).map(|_| a.jitter(256)).collect();
        let ys: Vec<i32> = (0..100).map(|_| b.jitter(256)).collect();
        assert_ne!(xs, ys);
    }

    #[test]
    fn test_zero_seed_is_usable() {
        let mut noise = Noise::new(0);
        let values: Vec<i32> = (0..50).map(|_| noise.jitter(256)).collect();
        assert!(values.iter().any(|&v| v != 0), "zero seed must not stall");
    }

    #[test]
    fn test_first_xorshift_step() {
        let mut noise = Noise::new(1);
        // 1 ^ 1<<13 = 0x2001; ^ >>17 unchanged; ^ <<5 = 0x2001 ^ 0x40020
        assert_eq!(noise.next_u32(), 0x0004_2021);
    }
}
