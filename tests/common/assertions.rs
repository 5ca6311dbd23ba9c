//! Assertion helpers for sixel and bitmap output.

use pretty_assertions::assert_eq;

/// Assert `out` is one complete sixel stream with the given raster size.
pub fn assert_sixel(out: &[u8], width: usize, height: usize) {
    let text = String::from_utf8_lossy(out);
    let raster = format!("\"1;1;{};{}", width, height);
    assert!(
        out.starts_with(b"\x1bP7;"),
        "Expected DCS introducer, got {:?}",
        &text[..text.len().min(16)]
    );
    assert!(text.contains(&raster), "Expected raster {raster} in {text:?}");
    assert!(out.ends_with(b"-\x1b\\"), "Expected band end and ST, got {text:?}");
}

/// Number of complete sixel streams in `out`.
pub fn count_streams(out: &[u8]) -> usize {
    out.windows(2).filter(|w| *w == b"\x1bP").count()
}

/// Assert `out` is a 24-bit BMP of the given size.
pub fn assert_bmp(out: &[u8], width: u32, height: u32) {
    assert_eq!(&out[0..2], b"BM", "Expected BMP magic");
    let field = |offset: usize| u32::from_le_bytes(out[offset..offset + 4].try_into().unwrap());
    assert_eq!(field(18), width, "BMP width");
    assert_eq!(field(22), height, "BMP height");
    assert_eq!(&out[28..30], &[24, 0], "BMP bits per pixel");
    assert_eq!(field(2) as usize, out.len(), "BMP file size field");
}
