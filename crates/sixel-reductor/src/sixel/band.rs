//! Normal-mode band encoding.
//!
//! A band is up to six rows of the indexed raster. Within a band every
//! color is painted as one horizontal stretch from its leftmost to its
//! rightmost column. Colors are packed greedily into passes: each pass
//! paints non-overlapping stretches left to right and ends with `$`
//! (carriage return). A pass that paints nothing ends the band.

use super::repunit::{push_decimal, push_repunit};

/// Encode one band into `buf`, ending with `-`.
///
/// `band` holds `rows` complete rows of `width` indices, `1 <= rows <= 6`;
/// every index is `< colors`.
pub fn encode_band(buf: &mut Vec<u8>, band: &[u8], width: usize, rows: usize, colors: usize) {
    debug_assert!((1..=6).contains(&rows));
    debug_assert_eq!(band.len(), width * rows);

    // Column extent per color; min_x is None once the color is painted.
    let mut min_x: Vec<Option<usize>> = vec![None; colors];
    let mut max_x: Vec<usize> = vec![0; colors];
    for row in band.chunks_exact(width) {
        for (x, &i) in row.iter().enumerate() {
            let i = i as usize;
            min_x[i] = Some(min_x[i].map_or(x, |m| m.min(x)));
            if max_x[i] < x {
                max_x[i] = x;
            }
        }
    }

    loop {
        // Rightmost column painted so far in this pass.
        let mut painted: Option<usize> = None;

        while let Some(color) = next_color(&min_x, painted) {
            let start = min_x[color].unwrap_or(0);
            let end = max_x[color];

            buf.push(b'#');
            push_decimal(buf, color);

            let resume = painted.map_or(0, |p| p + 1);
            if start > resume {
                push_repunit(buf, start - resume, 0);
            }

            let mut prev = 0u8;
            let mut run = 0usize;
            for x in start..=end {
                let t = column_pattern(band, width, rows, x, color);
                if t != prev {
                    if run > 0 {
                        push_repunit(buf, run, prev);
                    }
                    prev = t;
                    run = 1;
                } else {
                    run += 1;
                }
            }
            if prev != 0 {
                push_repunit(buf, run, prev);
            }

            painted = Some(end);
            min_x[color] = None;
        }

        buf.push(b'$');
        if painted.is_none() {
            break;
        }
    }
    buf.push(b'-');
}

/// Unpainted color with the smallest start column right of `painted`.
/// Ties go to the lowest color index.
fn next_color(min_x: &[Option<usize>], painted: Option<usize>) -> Option<usize> {
    let mut best: Option<(usize, usize)> = None;
    for (c, m) in min_x.iter().enumerate() {
        let Some(m) = *m else { continue };
        if painted.is_some_and(|p| m <= p) {
            continue;
        }
        if best.map_or(true, |(_, bm)| m < bm) {
            best = Some((c, m));
        }
    }
    best.map(|(c, _)| c)
}

/// Bit `dy` set for every row `dy` whose pixel at `x` is `color`.
#[inline]
fn column_pattern(band: &[u8], width: usize, rows: usize, x: usize, color: usize) -> u8 {
    let mut t = 0u8;
    for dy in 0..rows {
        if band[dy * width + x] as usize == color {
            t |= 1 << dy;
        }
    }
    t
}
