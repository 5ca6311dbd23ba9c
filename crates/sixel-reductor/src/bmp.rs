//! 24-bit uncompressed BMP output.

use std::io::{self, Write};

use crate::image::Image;

/// Size of the file header plus BITMAPINFOHEADER.
const HEADER_LEN: u32 = 14 + 40;

/// 96 DPI expressed in pixels per meter.
const PIXELS_PER_METER: i32 = 3780;

/// Bytes per stored row: three per pixel, padded to a multiple of 4.
#[inline]
pub fn row_stride(width: usize) -> usize {
    (width * 3 + 3) & !3
}

fn push_u16_le(out: &mut Vec<u8>, v: u16) {
    out.extend_from_slice(&v.to_le_bytes());
}

fn push_u32_le(out: &mut Vec<u8>, v: u32) {
    out.extend_from_slice(&v.to_le_bytes());
}

fn push_i32_le(out: &mut Vec<u8>, v: i32) {
    out.extend_from_slice(&v.to_le_bytes());
}

/// Write `image` as a bottom-up BGR bitmap. Alpha is discarded.
///
/// # Example
///
/// ```
/// use sixel_reductor::{write_bmp, Image};
///
/// let img = Image::from_rgb(vec![255, 0, 0], 1, 1).unwrap();
/// let mut out = Vec::new();
/// write_bmp(&mut out, &img).unwrap();
/// assert_eq!(&out[0..2], b"BM");
/// assert_eq!(out.len(), 54 + 4);
/// assert_eq!(&out[54..58], &[0, 0, 255, 0]);
/// ```
pub fn write_bmp<W: Write + ?Sized>(out: &mut W, image: &Image) -> io::Result<()> {
    let (width, height) = (image.width(), image.height());
    let stride = row_stride(width);
    let image_len = u32::try_from(stride * height)
        .map_err(|_| io::Error::new(io::ErrorKind::InvalidInput, "bitmap too large"))?;
    let w = i32::try_from(width)
        .map_err(|_| io::Error::new(io::ErrorKind::InvalidInput, "bitmap too wide"))?;
    let h = i32::try_from(height)
        .map_err(|_| io::Error::new(io::ErrorKind::InvalidInput, "bitmap too tall"))?;

    let mut header = Vec::with_capacity(HEADER_LEN as usize);
    header.extend_from_slice(b"BM");
    push_u32_le(&mut header, HEADER_LEN + image_len);
    push_u16_le(&mut header, 0);
    push_u16_le(&mut header, 0);
    push_u32_le(&mut header, HEADER_LEN);

    push_u32_le(&mut header, 40);
    push_i32_le(&mut header, w);
    push_i32_le(&mut header, h);
    push_u16_le(&mut header, 1);
    push_u16_le(&mut header, 24);
    push_u32_le(&mut header, 0);
    push_u32_le(&mut header, image_len);
    push_i32_le(&mut header, PIXELS_PER_METER);
    push_i32_le(&mut header, PIXELS_PER_METER);
    push_u32_le(&mut header, 0);
    push_u32_le(&mut header, 0);
    out.write_all(&header)?;

    let channels = image.channels();
    let mut row = vec![0u8; stride];
    for y in (0..height).rev() {
        for (dst, px) in row.chunks_exact_mut(3).zip(image.row(y).chunks_exact(channels)) {
            dst[0] = px[2];
            dst[1] = px[1];
            dst[2] = px[0];
        }
        out.write_all(&row)?;
    }
    tracing::debug!(width, height, "wrote bitmap");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn u32_at(buf: &[u8], offset: usize) -> u32 {
        u32::from_le_bytes(buf[offset..offset + 4].try_into().unwrap())
    }

    #[test]
    fn test_row_stride_padding() {
        assert_eq!(row_stride(1), 4);
        assert_eq!(row_stride(4), 12);
        assert_eq!(row_stride(5), 16);
    }

    #[test]
    fn test_header_fields() {
        let img = Image::from_rgb(vec![0; 3 * 3 * 2], 3, 2).unwrap();
        let mut out = Vec::new();
        write_bmp(&mut out, &img).unwrap();
        assert_eq!(out.len(), 54 + 12 * 2);
        assert_eq!(u32_at(&out, 2), 54 + 24, "file size");
        assert_eq!(u32_at(&out, 10), 54, "pixel offset");
        assert_eq!(u32_at(&out, 14), 40, "info header size");
        assert_eq!(u32_at(&out, 18), 3, "width");
        assert_eq!(u32_at(&out, 22), 2, "positive height means bottom-up");
        assert_eq!(&out[26..30], &[1, 0, 24, 0], "planes and bpp");
        assert_eq!(u32_at(&out, 34), 24, "image size");
        assert_eq!(u32_at(&out, 38), 3780);
    }

    #[test]
    fn test_rows_bottom_up_bgr() {
        // top row red, bottom row blue
        let img = Image::from_rgb(vec![255, 0, 0, 0, 0, 255], 1, 2).unwrap();
        let mut out = Vec::new();
        write_bmp(&mut out, &img).unwrap();
        assert_eq!(&out[54..58], &[255, 0, 0, 0], "first stored row is the bottom (blue)");
        assert_eq!(&out[58..62], &[0, 0, 255, 0]);
    }

    #[test]
    fn test_alpha_dropped() {
        let img = Image::from_rgba(vec![1, 2, 3, 4, 5, 6, 7, 8], 2, 1).unwrap();
        let mut out = Vec::new();
        write_bmp(&mut out, &img).unwrap();
        assert_eq!(&out[54..62], &[3, 2, 1, 7, 6, 5, 0, 0]);
    }
}
