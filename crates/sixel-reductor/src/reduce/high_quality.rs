//! Area-averaging reduction with two-dimensional error diffusion.

use crate::image::Image;
use crate::palette::{Palette, Rgb};

use super::kernel::ErrorBuffer;
use super::noise::Noise;
use super::{Reduce, ReduceOptions, Sampler};

/// Average every source pixel that falls inside a destination pixel, then
/// quantize with error diffusion using [`ReduceOptions::diffusion`].
///
/// For 4-channel sources a destination pixel whose source cell is fully
/// transparent maps to index 0 regardless of its color.
pub struct HighQuality;

impl Reduce for HighQuality {
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
        let mut errors = ErrorBuffer::new(dst_w);
        let mut noise = Noise::new(options.seed);
        let level = options.noise_level as i32;
        let has_alpha = image.has_alpha();

        for _ in 0..dst_h {
            let (sy0, sy1) = rows.next_span();
            cols.rewind();
            for x in 0..dst_w {
                let (sx0, sx1) = cols.next_span();
                let (mean, alpha) = average(image, sx0..sx1, sy0..sy1);

                let err = errors.get(x);
                let sample = options.apply_gain(mean);
                let col = [
                    sample[0] + err[0] as i32,
                    sample[1] + err[1] as i32,
                    sample[2] + err[2] as i32,
                ];

                let idx = if has_alpha && alpha == 0 {
                    0
                } else {
                    palette.find(Rgb::saturating(col[0], col[1], col[2]))
                };

                let pal = palette.color(idx as usize);
                let mut residual = [
                    col[0] - pal.r as i32,
                    col[1] - pal.g as i32,
                    col[2] - pal.b as i32,
                ];
                if level > 0 {
                    let j = noise.jitter3(level);
                    for c in 0..3 {
                        residual[c] += j[c];
                    }
                }
                errors.diffuse(x, residual, options.diffusion);
                out.push(idx);
            }
            errors.advance_row();
        }
        out
    }
}

/// Mean RGB over the cell and the sum of its alpha (0 for RGB sources).
///
/// Sums are 64-bit: a cell may span the whole source when reducing a large
/// image to a few pixels.
fn average(
    image: &Image,
    xs: std::ops::Range<usize>,
    ys: std::ops::Range<usize>,
) -> ([i32; 3], u64) {
    let channels = image.channels();
    let mut sum = [0u64; 3];
    let mut alpha = 0u64;
    for y in ys.clone() {
        let row = &image.row(y)[xs.start * channels..xs.end * channels];
        for px in row.chunks_exact(channels) {
            sum[0] += px[0] as u64;
            sum[1] += px[1] as u64;
            sum[2] += px[2] as u64;
            if channels == 4 {
                alpha += px[3] as u64;
            }
        }
    }
    let count = (xs.len() * ys.len()) as u64;
    (
        [
            (sum[0] / count) as i32,
            (sum[1] / count) as i32,
            (sum[2] / count) as i32,
        ],
        alpha,
    )
}
