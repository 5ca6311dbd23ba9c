//! OR-mode band encoding.
//!
//! In OR mode (`P2 = 5`) the terminal ORs color numbers together instead
//! of replacing them, so an index can be drawn as one layer per bit:
//! plane `i` paints with color `1 << i` wherever bit `i` of the index is
//! set. No per-color extents are needed, which keeps the encoder a plain
//! run-length pass per plane.

use super::repunit::{push_decimal, push_repunit};

/// Number of bit planes needed for a palette of `len` colors, in `1..=8`.
pub fn plane_count(len: usize) -> usize {
    (0..8usize).find(|&i| len <= 1 << i).unwrap_or(8).max(1)
}

/// Encode one band into `buf`, ending with `-`.
///
/// `band` holds `rows` complete rows of `width` indices, `1 <= rows <= 6`.
/// Index bits at or above `planes` are ignored.
pub fn encode_band(buf: &mut Vec<u8>, band: &[u8], width: usize, rows: usize, planes: usize) {
    debug_assert!((1..=6).contains(&rows));
    debug_assert!((1..=8).contains(&planes));
    debug_assert_eq!(band.len(), width * rows);

    // columns[x * planes + i]: six-row pattern of plane i at column x
    let mut columns = vec![0u8; width * planes];
    for (dy, row) in band.chunks_exact(width).enumerate() {
        for (x, &index) in row.iter().enumerate() {
            let cell = &mut columns[x * planes..(x + 1) * planes];
            for (i, bits) in cell.iter_mut().enumerate() {
                *bits |= ((index >> i) & 1) << dy;
            }
        }
    }

    for i in 0..planes {
        buf.push(b'#');
        push_decimal(buf, 1 << i);

        let mut pattern = columns[i];
        let mut run = 1;
        for x in 1..width {
            let t = columns[x * planes + i];
            if t == pattern {
                run += 1;
            } else {
                push_repunit(buf, run, pattern);
                pattern = t;
                run = 1;
            }
        }
        if pattern != 0 {
            push_repunit(buf, run, pattern);
        }
        buf.push(b'$');
    }

    // the last carriage return becomes the band's line feed
    if let Some(last) = buf.last_mut() {
        *last = b'-';
    }
}
