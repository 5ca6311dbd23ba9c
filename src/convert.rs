//! One input file to one output stream.

use sixel_reductor::{write_bmp, Image, ReductorError, SixelConverter};
use std::fs::File;
use std::io::{self, BufReader, Write};

use crate::config::OutputFormat;
use crate::decode::decode_png;
use crate::error::CliError;

/// Read and decode `path`; `-` reads standard input.
pub fn read_image(path: &str) -> Result<Image, CliError> {
    if path == "-" {
        decode_png(io::stdin().lock())
    } else {
        decode_png(BufReader::new(File::open(path)?))
    }
}

/// Reduce `image` and write it to `out` in `format`.
pub fn write_image(
    image: &Image,
    converter: &SixelConverter,
    format: OutputFormat,
    out: &mut dyn Write,
) -> Result<(), CliError> {
    match format {
        OutputFormat::Sixel => converter.convert(image, out)?,
        OutputFormat::Bmp => {
            let reduced = converter.reduce(image)?;
            let colored = reduced.to_rgb_image().map_err(ReductorError::from)?;
            write_bmp(out, &colored)?;
            out.flush()?;
        }
    }
    Ok(())
}

/// Decode `path` and write it to `out`.
pub fn convert_file(
    path: &str,
    converter: &SixelConverter,
    format: OutputFormat,
    out: &mut dyn Write,
) -> Result<(), CliError> {
    let image = read_image(path)?;
    tracing::debug!(
        file = path,
        width = image.width(),
        height = image.height(),
        "converting"
    );
    write_image(&image, converter, format, out)
}
