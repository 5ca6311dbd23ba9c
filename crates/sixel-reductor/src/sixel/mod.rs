//! Sixel stream encoding.
//!
//! A sixel image is a DCS string: a preamble with the raster attributes and
//! color registers, one band per six rows of pixels, and the string
//! terminator. Two band formats are available:
//!
//! - **Normal** (`P2 = 1`): each palette color is painted as a stretch per
//!   band, packed greedily into carriage-return passes
//! - **OR mode** (`P2 = 5`): each index bit is painted as its own plane and
//!   the terminator combines them
//!
//! Every band is written to the sink with a single `write_all`, so a slow
//! transport sees whole bands. A cancellation hook is polled before each
//! band; when it fires the stream is left open and the caller may send
//! [`ABORT`] to make the terminal discard it.

mod band;
mod ormode;
mod repunit;

use std::io::Write;

use crate::api::ReductorError;
use crate::output::IndexedImage;

pub use ormode::plane_count;

/// String terminator (`ESC \`) closing a sixel stream.
pub const POSTAMBLE: &[u8] = b"\x1b\\";

/// `CAN ESC \`: abandons a partially sent sixel stream.
pub const ABORT: &[u8] = &[0x18, 0x1b, 0x5c];

/// Rows per band.
pub const BAND_HEIGHT: usize = 6;

/// Stream format options.
///
/// # Example
///
/// ```
/// use sixel_reductor::SixelOptions;
///
/// let options = SixelOptions::new().ormode(true);
/// assert!(options.ormode);
/// assert!(!options.suppress_palette);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SixelOptions {
    /// Encode bit planes for an OR-combining terminal.
    ///
    /// Default: `false`
    pub ormode: bool,

    /// Leave the color registers out of the preamble, for terminals whose
    /// registers already hold the palette.
    ///
    /// Default: `false`
    pub suppress_palette: bool,
}

impl SixelOptions {
    /// Same as [`SixelOptions::default`].
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn ormode(mut self, enabled: bool) -> Self {
        self.ormode = enabled;
        self
    }

    #[inline]
    pub fn suppress_palette(mut self, enabled: bool) -> Self {
        self.suppress_palette = enabled;
        self
    }
}

/// DCS introducer, raster attributes and (unless suppressed) the color
/// registers in percent RGB.
pub fn preamble(image: &IndexedImage, options: &SixelOptions) -> Vec<u8> {
    let mode = if options.ormode { 5 } else { 1 };
    let mut buf = format!(
        "\x1bP7;{};q\"1;1;{};{}",
        mode,
        image.width(),
        image.height()
    )
    .into_bytes();

    if !options.suppress_palette {
        for (i, c) in image.palette().colors().iter().enumerate() {
            let pct = |v: u8| v as u32 * 100 / 255;
            buf.extend_from_slice(
                format!("#{};2;{};{};{}", i, pct(c.r), pct(c.g), pct(c.b)).as_bytes(),
            );
        }
    }
    buf
}

/// Write a complete sixel stream for `image`.
pub fn encode(
    image: &IndexedImage,
    out: &mut dyn Write,
    options: &SixelOptions,
) -> Result<(), ReductorError> {
    encode_cancellable(image, out, options, &|| false)
}

/// Write a sixel stream, polling `cancelled` before every band.
///
/// # Errors
///
/// [`ReductorError::Cancelled`] as soon as the hook returns `true`; bands
/// already written stay written and no postamble is sent.
/// [`ReductorError::Io`] if the sink fails.
pub fn encode_cancellable(
    image: &IndexedImage,
    out: &mut dyn Write,
    options: &SixelOptions,
    cancelled: &dyn Fn() -> bool,
) -> Result<(), ReductorError> {
    let width = image.width();
    let colors = image.palette().len();
    let planes = plane_count(colors);

    if options.ormode {
        tracing::debug!(width, height = image.height(), planes, "encoding sixel, OR mode");
    } else {
        tracing::debug!(width, height = image.height(), colors, "encoding sixel");
    }

    out.write_all(&preamble(image, options))?;

    let mut buf = Vec::new();
    for band in image.indices().chunks(width * BAND_HEIGHT) {
        if cancelled() {
            tracing::debug!("sixel output cancelled");
            return Err(ReductorError::Cancelled);
        }
        let rows = band.len() / width;
        buf.clear();
        if options.ormode {
            ormode::encode_band(&mut buf, band, width, rows, planes);
        } else {
            band::encode_band(&mut buf, band, width, rows, colors);
        }
        out.write_all(&buf)?;
    }

    out.write_all(POSTAMBLE)?;
    out.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::palette::{ColorMode, Palette};
    use pretty_assertions::assert_eq;
    use std::cell::Cell;

    fn mono(indices: Vec<u8>, width: usize, height: usize) -> IndexedImage {
        IndexedImage::new(indices, width, height, Palette::new(ColorMode::Mono).unwrap())
    }

    fn to_string(bytes: Vec<u8>) -> String {
        String::from_utf8(bytes).unwrap()
    }

    #[test]
    fn test_preamble_with_palette() {
        let img = mono(vec![0; 6], 1, 6);
        assert_eq!(
            to_string(preamble(&img, &SixelOptions::new())),
            "\x1bP7;1;q\"1;1;1;6#0;2;0;0;0#1;2;100;100;100"
        );
    }

    #[test]
    fn test_preamble_ormode_without_palette() {
        let img = mono(vec![0; 6], 1, 6);
        let options = SixelOptions::new().ormode(true).suppress_palette(true);
        assert_eq!(to_string(preamble(&img, &options)), "\x1bP7;5;q\"1;1;1;6");
    }

    #[test]
    fn test_register_percentages_truncate() {
        let palette = Palette::from_hex(&["#808080"]).unwrap();
        let img = IndexedImage::new(vec![0], 1, 1, palette);
        let text = to_string(preamble(&img, &SixelOptions::new()));
        assert!(text.ends_with("#0;2;50;50;50"), "{text}");
    }

    #[test]
    fn test_full_stream() {
        let img = mono(vec![1; 6], 1, 6);
        let mut out = Vec::new();
        encode(&img, &mut out, &SixelOptions::new().suppress_palette(true)).unwrap();
        assert_eq!(to_string(out), "\x1bP7;1;q\"1;1;1;6#1~$$-\x1b\\");
    }

    #[test]
    fn test_last_band_may_be_short() {
        // 8 rows: one full band and one of two rows
        let img = mono(vec![1; 8], 1, 8);
        let mut out = Vec::new();
        encode(&img, &mut out, &SixelOptions::new().suppress_palette(true)).unwrap();
        assert_eq!(to_string(out), "\x1bP7;1;q\"1;1;1;8#1~$$-#1B$$-\x1b\\");
    }

    #[test]
    fn test_ormode_stream() {
        let img = mono(vec![1; 6], 1, 6);
        let mut out = Vec::new();
        let options = SixelOptions::new().ormode(true).suppress_palette(true);
        encode(&img, &mut out, &options).unwrap();
        assert_eq!(to_string(out), "\x1bP7;5;q\"1;1;1;6#1~-\x1b\\");
    }

    #[test]
    fn test_cancel_before_second_band() {
        let img = mono(vec![1; 12], 1, 12);
        let polls = Cell::new(0);
        let hook = || {
            polls.set(polls.get() + 1);
            polls.get() > 1
        };
        let mut out = Vec::new();
        let err = encode_cancellable(
            &img,
            &mut out,
            &SixelOptions::new().suppress_palette(true),
            &hook,
        )
        .unwrap_err();
        assert!(matches!(err, ReductorError::Cancelled));
        let text = to_string(out);
        assert!(text.ends_with("#1~$$-"), "first band must be complete: {text:?}");
        assert!(!text.contains("\x1b\\"), "no postamble after cancel");
    }

    #[test]
    fn test_abort_sequence_bytes() {
        assert_eq!(ABORT, b"\x18\x1b\\");
    }
}
