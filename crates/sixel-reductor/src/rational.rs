//! Drift-free integer stepping for resampling.
//!
//! [`StepRational`] represents `whole + num / den` and is advanced by a
//! fixed increment once per destination pixel. Because the fraction is
//! carried exactly, stepping `src / dst` a total of `dst` times lands on
//! `src` with no accumulated rounding error.

/// A mixed fraction `whole + num / den` used as a resampling cursor.
///
/// Two values exist per axis: a position that starts at zero and an
/// increment built from `src_len / dst_len`.
///
/// # Example
///
/// ```
/// use sixel_reductor::StepRational;
///
/// let step = StepRational::new(0, 10, 4);
/// let mut pos = StepRational::new(0, 0, 4);
/// for _ in 0..4 {
///     pos.add(&step);
/// }
/// assert_eq!(pos.whole, 10);
/// assert_eq!(pos.num, 0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepRational {
    /// Integer part.
    pub whole: i32,
    /// Numerator, kept in `[0, den)`.
    pub num: i32,
    /// Denominator. Must be positive.
    pub den: i32,
}

impl StepRational {
    /// Create a stepper, folding any `num >= den` overflow into `whole`.
    ///
    /// # Panics (debug only)
    ///
    /// Debug-asserts that `den > 0`. A zero denominator means a zero-sized
    /// destination axis, which callers reject before resampling.
    pub fn new(whole: i32, num: i32, den: i32) -> Self {
        debug_assert!(den > 0, "denominator must be positive, got {den}");
        if num < den {
            Self { whole, num, den }
        } else {
            Self {
                whole: whole + num / den,
                num: num % den,
                den,
            }
        }
    }

    /// Build the per-pixel increment for mapping `dst_len` pixels onto
    /// `src_len` pixels.
    #[inline]
    pub fn ratio(src_len: usize, dst_len: usize) -> Self {
        Self::new(0, src_len as i32, dst_len as i32)
    }

    /// A zero position sharing `den` with the increments it will receive.
    #[inline]
    pub fn origin(den: usize) -> Self {
        Self::new(0, 0, den as i32)
    }

    /// Add `inc` in place.
    ///
    /// Both operands keep their fraction inside `[0, den)`, so the sum of
    /// numerators lies in `[-den, 2*den)` and one borrow or carry restores
    /// the invariant.
    #[inline]
    pub fn add(&mut self, inc: &StepRational) {
        self.whole += inc.whole;
        self.num += inc.num;
        if self.num < 0 {
            self.whole -= 1;
            self.num += self.den;
        } else if self.num >= self.den {
            self.whole += 1;
            self.num -= self.den;
        }
    }

    /// Return to zero, keeping the denominator.
    #[inline]
    pub fn reset(&mut self) {
        self.whole = 0;
        self.num = 0;
    }

    /// The integer part as an index.
    #[inline]
    pub fn index(&self) -> usize {
        self.whole.max(0) as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_keeps_proper_fraction() {
        let r = StepRational::new(3, 2, 5);
        assert_eq!((r.whole, r.num, r.den), (3, 2, 5));
    }

    #[test]
    fn test_new_folds_overflow_into_whole() {
        let r = StepRational::new(1, 17, 5);
        assert_eq!((r.whole, r.num, r.den), (4, 2, 5));

        let exact = StepRational::new(0, 10, 5);
        assert_eq!((exact.whole, exact.num), (2, 0));
    }

    #[test]
    fn test_add_carries_single_unit() {
        let mut pos = StepRational::new(0, 4, 5);
        pos.add(&StepRational::new(0, 3, 5));
        assert_eq!((pos.whole, pos.num), (1, 2));
    }

    #[test]
    fn test_add_borrows_on_negative_numerator() {
        let mut pos = StepRational::new(2, 1, 5);
        pos.add(&StepRational {
            whole: 0,
            num: -3,
            den: 5,
        });
        assert_eq!((pos.whole, pos.num), (1, 3));
    }

    #[test]
    fn test_stepping_is_exact_for_all_small_sizes() {
        for src in 1..=64usize {
            for dst in 1..=64usize {
                let step = StepRational::ratio(src, dst);
                let mut pos = StepRational::origin(dst);
                for _ in 0..dst {
                    pos.add(&step);
                }
                assert_eq!(
                    pos.whole, src as i32,
                    "stepping {src}/{dst} {dst} times should land on {src}"
                );
                assert_eq!(pos.num, 0, "no fractional residue for {src}/{dst}");
            }
        }
    }

    #[test]
    fn test_stepping_is_exact_for_large_sizes() {
        for &(src, dst) in &[(4000usize, 333usize), (1920, 1080), (7, 4096), (65535, 1)] {
            let step = StepRational::ratio(src, dst);
            let mut pos = StepRational::origin(dst);
            for _ in 0..dst {
                pos.add(&step);
            }
            assert_eq!(pos.whole, src as i32, "{src}/{dst}");
        }
    }

    #[test]
    fn test_positions_are_monotonic_and_in_range() {
        let (src, dst) = (10usize, 7usize);
        let step = StepRational::ratio(src, dst);
        let mut pos = StepRational::origin(dst);
        let mut last = 0;
        for _ in 0..dst {
            let here = pos.index();
            assert!(here >= last, "positions must never move backwards");
            assert!(here < src, "sample index {here} out of range");
            last = here;
            pos.add(&step);
        }
    }

    #[test]
    fn test_reset_keeps_denominator() {
        let mut pos = StepRational::new(5, 3, 9);
        pos.reset();
        assert_eq!((pos.whole, pos.num, pos.den), (0, 0, 9));
    }
}
