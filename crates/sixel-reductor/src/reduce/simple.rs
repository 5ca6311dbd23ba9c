//! Nearest-sample reduction without error diffusion.

use crate::image::Image;
use crate::palette::{Palette, Rgb};

use super::{sample_rgb, Reduce, ReduceOptions, Sampler};

/// Pick one source pixel per destination pixel and map it straight to the
/// palette. Fastest and flattest; no error is carried anywhere.
pub struct Simple;

impl Reduce for Simple {
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

        for _ in 0..dst_h {
            let sy = rows.next_start();
            cols.rewind();
            for _ in 0..dst_w {
                let sx = cols.next_start();
                let [r, g, b] = options.apply_gain(sample_rgb(image, sx, sy));
                out.push(palette.find(Rgb::saturating(r, g, b)));
            }
        }
        out
    }
}
