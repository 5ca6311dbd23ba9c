//! The Indexed Raster with its palette.

use crate::image::{Image, ImageError};
use crate::palette::Palette;

/// The canonical output of the reductor.
///
/// Stores one `u8` palette index per pixel in row-major order, with the
/// destination dimensions and the palette used for reduction.
///
/// # Example
///
/// ```
/// use sixel_reductor::{ColorMode, IndexedImage, Palette};
///
/// let palette = Palette::new(ColorMode::Mono).unwrap();
/// let image = IndexedImage::new(vec![0, 1, 1, 0], 2, 2, palette);
///
/// assert_eq!(image.row(1), &[1, 0]);
/// let rgb = image.to_rgb_image().unwrap();
/// assert_eq!(rgb.pixel(1, 0), &[255, 255, 255]);
/// ```
#[derive(Debug, Clone)]
pub struct IndexedImage {
    /// Palette indices, one per pixel, row-major order.
    indices: Vec<u8>,
    width: usize,
    height: usize,
    palette: Palette,
}

impl IndexedImage {
    /// Create a new `IndexedImage`.
    ///
    /// # Panics (debug only)
    ///
    /// Debug-asserts that `indices.len() == width * height` and that every
    /// index lies inside the palette.
    pub fn new(indices: Vec<u8>, width: usize, height: usize, palette: Palette) -> Self {
        debug_assert_eq!(
            indices.len(),
            width * height,
            "indices length ({}) must match width * height ({}x{}={})",
            indices.len(),
            width,
            height,
            width * height,
        );
        debug_assert!(
            indices.iter().all(|&i| (i as usize) < palette.len()),
            "index outside palette of {} colors",
            palette.len()
        );
        Self {
            indices,
            width,
            height,
            palette,
        }
    }

    #[inline]
    pub fn indices(&self) -> &[u8] {
        &self.indices
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    /// The indices of row `y`.
    #[inline]
    pub fn row(&self, y: usize) -> &[u8] {
        &self.indices[y * self.width..(y + 1) * self.width]
    }

    /// Replace the palette, e.g. after a color factor was applied.
    ///
    /// # Panics (debug only)
    ///
    /// Debug-asserts the new palette has the same length.
    pub fn set_palette(&mut self, palette: Palette) {
        debug_assert_eq!(palette.len(), self.palette.len());
        self.palette = palette;
    }

    /// Look every index up in the palette, producing a packed RGB image.
    ///
    /// # Errors
    ///
    /// [`ImageError::ZeroSize`] for an empty raster.
    pub fn to_rgb_image(&self) -> Result<Image, ImageError> {
        let mut rgb = Vec::with_capacity(self.indices.len() * 3);
        for &idx in &self.indices {
            let c = self.palette.color(idx as usize);
            rgb.extend_from_slice(&[c.r, c.g, c.b]);
        }
        Image::from_rgb(rgb, self.width, self.height)
    }
}
