//! PNG input.

use sixel_reductor::{Image, ReductorError};
use std::io::Read;

use crate::error::CliError;

/// Decode a PNG into an 8-bit RGB or RGBA [`Image`].
///
/// Palette and low-bit images are expanded, 16-bit samples are stripped to
/// 8 bits, and gray is replicated into all three channels.
pub fn decode_png<R: Read>(input: R) -> Result<Image, CliError> {
    let mut decoder = png::Decoder::new(input);
    decoder.set_transformations(png::Transformations::EXPAND | png::Transformations::STRIP_16);
    let mut reader = decoder.read_info()?;
    let mut buf = vec![0; reader.output_buffer_size()];
    let info = reader.next_frame(&mut buf)?;
    buf.truncate(info.buffer_size());

    if info.bit_depth != png::BitDepth::Eight {
        return Err(CliError::UnsupportedPng(format!(
            "{:?} bit samples after expansion",
            info.bit_depth
        )));
    }

    let (width, height) = (info.width as usize, info.height as usize);
    let image = match info.color_type {
        png::ColorType::Rgb => Image::from_rgb(buf, width, height),
        png::ColorType::Rgba => Image::from_rgba(buf, width, height),
        png::ColorType::Grayscale => {
            let rgb = buf.iter().flat_map(|&v| [v, v, v]).collect();
            Image::from_rgb(rgb, width, height)
        }
        png::ColorType::GrayscaleAlpha => {
            let rgba = buf
                .chunks_exact(2)
                .flat_map(|p| [p[0], p[0], p[0], p[1]])
                .collect();
            Image::from_rgba(rgba, width, height)
        }
        other => {
            return Err(CliError::UnsupportedPng(format!("{:?} color type", other)));
        }
    };
    tracing::debug!(width, height, color_type = ?info.color_type, "decoded PNG");
    Ok(image.map_err(ReductorError::from)?)
}
