//! Test fixtures: synthetic PNG files and scratch directories.

use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Encode an 8-bit PNG in memory.
pub fn png_bytes(color: png::ColorType, width: u32, height: u32, data: &[u8]) -> Vec<u8> {
    let mut out = Vec::new();
    {
        let mut encoder = png::Encoder::new(&mut out, width, height);
        encoder.set_color(color);
        encoder.set_depth(png::BitDepth::Eight);
        let mut writer = encoder.write_header().unwrap();
        writer.write_image_data(data).unwrap();
    }
    out
}

/// Solid RGB image.
pub fn solid_rgb(width: u32, height: u32, rgb: [u8; 3]) -> Vec<u8> {
    let data: Vec<u8> = (0..width * height).flat_map(|_| rgb).collect();
    png_bytes(png::ColorType::Rgb, width, height, &data)
}

/// Horizontal gray ramp from black to white.
pub fn gray_ramp(width: u32, height: u32) -> Vec<u8> {
    let data: Vec<u8> = (0..height)
        .flat_map(|_| (0..width).map(move |x| (x * 255 / (width - 1).max(1)) as u8))
        .collect();
    png_bytes(png::ColorType::Grayscale, width, height, &data)
}

/// A scratch directory holding test inputs and outputs.
pub struct Scratch {
    dir: TempDir,
}

impl Scratch {
    pub fn new() -> Self {
        Self {
            dir: tempfile::tempdir().unwrap(),
        }
    }

    pub fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    /// Write `bytes` to `name` and return the path as a string.
    pub fn write(&self, name: &str, bytes: &[u8]) -> String {
        let path = self.path(name);
        std::fs::write(&path, bytes).unwrap();
        path_str(&path)
    }
}

pub fn path_str(path: &Path) -> String {
    path.to_str().unwrap().to_string()
}
