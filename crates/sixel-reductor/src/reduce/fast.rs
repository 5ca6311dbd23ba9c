//! One-dimensional error carry along each row.

use crate::image::Image;
use crate::palette::{Palette, Rgb};

use super::noise::Noise;
use super::{sample_rgb, Reduce, ReduceOptions, Sampler};

/// Fraction of the residual carried to the next pixel, out of 256.
const CARRY: i32 = 256;

/// Nearest-sample reduction that carries each pixel's full quantization
/// error to its right-hand neighbor.
///
/// The carry restarts at zero on every row, so errors never cross row
/// boundaries. The carried value is computed from the unsaturated color.
pub struct Fast;

impl Reduce for Fast {
    fn reduce(
        &self,
        image: &Image,
        dst_w: usize,
        dst_h: usize,
        palette: &Palette,
        options: &ReduceOptions,
    ) -> Vec<u8> {
        let mut out = Vec::with_capacity(dst_w * dst_h);
        let mut rows = Sampler::new(image.height(), dst_h);
        let mut cols = Sampler::new(image.width(), dst_w);
        let mut noise = Noise::new(options.seed);
        let level = options.noise_level as i32;

        for _ in 0..dst_h {
            let sy = rows.next_start();
            cols.rewind();
            let mut carry = [0i32; 3];
            for _ in 0..dst_w {
                let sx = cols.next_start();
                let sample = options.apply_gain(sample_rgb(image, sx, sy));
                let col = [
                    sample[0] + carry[0],
                    sample[1] + carry[1],
                    sample[2] + carry[2],
                ];

                let idx = palette.find(Rgb::saturating(col[0], col[1], col[2]));
                let pal = palette.color(idx as usize);
                carry = [
                    (col[0] - pal.r as i32) * CARRY / 256,
                    (col[1] - pal.g as i32) * CARRY / 256,
                    (col[2] - pal.b as i32) * CARRY / 256,
                ];
                if level > 0 {
                    let j = noise.jitter3(level);
                    for c in 0..3 {
                        carry[c] += j[c];
                    }
                }
                out.push(idx);
            }
        }
        out
    }
}
