//! Output types for the reduction pipeline.
//!
//! [`IndexedImage`] is the Indexed Raster: one palette index per
//! destination pixel plus the palette those indices refer to. The sixel
//! encoder consumes it directly; [`IndexedImage::to_rgb_image`] expands it
//! back to RGB for the bitmap writer.

mod indexed_image;

pub use indexed_image::IndexedImage;
