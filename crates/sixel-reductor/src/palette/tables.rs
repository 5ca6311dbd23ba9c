//! Fixed and generated palette tables.

use super::Rgb;

/// Black and white.
pub const MONO: [Rgb; 2] = [Rgb::new(0, 0, 0), Rgb::new(255, 255, 255)];

/// One bit per channel at full intensity; index = `R | G<<1 | B<<2`.
pub const FIXED8: [Rgb; 8] = [
    Rgb::new(0, 0, 0),
    Rgb::new(255, 0, 0),
    Rgb::new(0, 255, 0),
    Rgb::new(255, 255, 0),
    Rgb::new(0, 0, 255),
    Rgb::new(255, 0, 255),
    Rgb::new(0, 255, 255),
    Rgb::new(255, 255, 255),
];

/// X68k text palette: a bright half and a dim half.
///
/// Index 0 is the transparent slot, index 8 the opaque black.
pub const FIXED_X68K: [Rgb; 16] = [
    Rgb::new(0, 0, 0),
    Rgb::new(252, 4, 4),
    Rgb::new(4, 252, 4),
    Rgb::new(252, 252, 4),
    Rgb::new(4, 4, 252),
    Rgb::new(252, 4, 252),
    Rgb::new(4, 252, 252),
    Rgb::new(252, 252, 252),
    Rgb::new(4, 4, 4),
    Rgb::new(124, 4, 4),
    Rgb::new(4, 124, 4),
    Rgb::new(124, 124, 4),
    Rgb::new(4, 4, 124),
    Rgb::new(124, 4, 124),
    Rgb::new(4, 124, 124),
    Rgb::new(124, 124, 124),
];

/// Standard VGA colors, with slot 3 yellow rather than brown.
pub const FIXED_ANSI16: [Rgb; 16] = [
    Rgb::new(0, 0, 0),
    Rgb::new(170, 0, 0),
    Rgb::new(0, 170, 0),
    Rgb::new(170, 170, 0),
    Rgb::new(0, 0, 170),
    Rgb::new(170, 0, 170),
    Rgb::new(0, 170, 170),
    Rgb::new(170, 170, 170),
    Rgb::new(85, 85, 85),
    Rgb::new(255, 85, 85),
    Rgb::new(85, 255, 85),
    Rgb::new(255, 255, 85),
    Rgb::new(85, 85, 255),
    Rgb::new(255, 85, 255),
    Rgb::new(85, 255, 255),
    Rgb::new(255, 255, 255),
];

/// `count` evenly spaced grays from black to white.
///
/// `count` must be at least 2.
pub fn gray(count: usize) -> Vec<Rgb> {
    debug_assert!((2..=256).contains(&count));
    (0..count)
        .map(|i| Rgb::gray((i * 255 / (count - 1)) as u8))
        .collect()
}

/// 3-3-2 bit RGB.
pub fn fixed256() -> Vec<Rgb> {
    (0..256usize)
        .map(|i| {
            Rgb::new(
                (((i >> 5) & 7) * 255 / 7) as u8,
                (((i >> 2) & 7) * 255 / 7) as u8,
                ((i & 3) * 255 / 3) as u8,
            )
        })
        .collect()
}

/// 2-2-2 bit RGB plus a 2 bit intensity added to every channel.
pub fn fixed256_rgbi() -> Vec<Rgb> {
    (0..256usize)
        .map(|i| {
            let intensity = (i & 3) * 63 / 3;
            let channel = |c: usize| ((c << 6) + intensity) as u8;
            Rgb::new(
                channel((i >> 6) & 3),
                channel((i >> 4) & 3),
                channel((i >> 2) & 3),
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gray_endpoints() {
        let table = gray(4);
        assert_eq!(
            table,
            vec![Rgb::gray(0), Rgb::gray(85), Rgb::gray(170), Rgb::gray(255)]
        );
        assert_eq!(gray(256)[255], Rgb::gray(255));
        assert_eq!(gray(2), MONO.to_vec());
    }

    #[test]
    fn test_fixed256_layout() {
        let table = fixed256();
        assert_eq!(table.len(), 256);
        assert_eq!(table[0], Rgb::new(0, 0, 0));
        assert_eq!(table[255], Rgb::new(255, 255, 255));
        // bits 7..5 = red
        assert_eq!(table[0b111_000_00], Rgb::new(255, 0, 0));
        assert_eq!(table[0b000_111_00], Rgb::new(0, 255, 0));
        assert_eq!(table[0b000_000_11], Rgb::new(0, 0, 255));
        assert_eq!(table[0b001_000_00].r, 36);
    }

    #[test]
    fn test_fixed256_rgbi_layout() {
        let table = fixed256_rgbi();
        assert_eq!(table[0], Rgb::new(0, 0, 0));
        assert_eq!(table[255], Rgb::new(255, 255, 255));
        // R=3, G=B=0, I=0
        assert_eq!(table[0b11_00_00_00], Rgb::new(192, 0, 0));
        // I=1 lifts every channel by 21
        assert_eq!(table[0b00_00_00_01], Rgb::new(21, 21, 21));
    }

    #[test]
    fn test_x68k_halves() {
        assert_eq!(FIXED_X68K[7], Rgb::new(252, 252, 252), "bright white");
        assert_eq!(FIXED_X68K[8], Rgb::new(4, 4, 4), "opaque black");
        assert_eq!(FIXED_X68K[15], Rgb::new(124, 124, 124), "dim gray");
    }
}
