//! Strided RGB/RGBA source raster.
//!
//! [`Image`] is what a decoder hands to the reductor: a flat byte buffer
//! with an explicit row stride. All layout preconditions are checked once
//! in [`Image::new`] so the conversion loops can index rows directly.

use std::fmt;

/// Error returned when a raster's buffer and geometry disagree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageError {
    /// Width or height is zero.
    ZeroSize { width: usize, height: usize },
    /// Channel count is neither 3 (RGB) nor 4 (RGBA).
    UnsupportedChannels(usize),
    /// Stride is shorter than one row of pixels.
    StrideTooSmall { stride: usize, min: usize },
    /// Buffer is shorter than the geometry requires.
    BufferTooSmall { len: usize, expected: usize },
}

impl fmt::Display for ImageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImageError::ZeroSize { width, height } => {
                write!(f, "image has zero size ({}x{})", width, height)
            }
            ImageError::UnsupportedChannels(n) => {
                write!(f, "unsupported channel count {} (expected 3 or 4)", n)
            }
            ImageError::StrideTooSmall { stride, min } => {
                write!(f, "stride {} is smaller than a row ({} bytes)", stride, min)
            }
            ImageError::BufferTooSmall { len, expected } => {
                write!(f, "buffer holds {} bytes, need at least {}", len, expected)
            }
        }
    }
}

impl std::error::Error for ImageError {}

/// A decoded raster with 3 or 4 interleaved 8-bit channels.
///
/// # Example
///
/// ```
/// use sixel_reductor::Image;
///
/// let img = Image::from_rgb(vec![10, 10, 10, 250, 250, 250], 2, 1).unwrap();
/// assert_eq!(img.pixel(1, 0), &[250, 250, 250]);
/// ```
#[derive(Debug, Clone)]
pub struct Image {
    data: Vec<u8>,
    width: usize,
    height: usize,
    channels: usize,
    stride: usize,
}

impl Image {
    /// Wrap a raw buffer.
    ///
    /// # Arguments
    ///
    /// * `data` - Pixel bytes, row `y` starting at `y * stride`.
    /// * `width` - Pixels per row.
    /// * `height` - Number of rows.
    /// * `channels` - 3 for RGB, 4 for RGBA.
    /// * `stride` - Bytes from one row start to the next.
    pub fn new(
        data: Vec<u8>,
        width: usize,
        height: usize,
        channels: usize,
        stride: usize,
    ) -> Result<Self, ImageError> {
        if width == 0 || height == 0 {
            return Err(ImageError::ZeroSize { width, height });
        }
        if channels != 3 && channels != 4 {
            return Err(ImageError::UnsupportedChannels(channels));
        }
        let row_len = width * channels;
        if stride < row_len {
            return Err(ImageError::StrideTooSmall {
                stride,
                min: row_len,
            });
        }
        let expected = stride * (height - 1) + row_len;
        if data.len() < expected {
            return Err(ImageError::BufferTooSmall {
                len: data.len(),
                expected,
            });
        }
        Ok(Self {
            data,
            width,
            height,
            channels,
            stride,
        })
    }

    /// Wrap a tightly packed RGB buffer.
    pub fn from_rgb(data: Vec<u8>, width: usize, height: usize) -> Result<Self, ImageError> {
        Self::new(data, width, height, 3, width * 3)
    }

    /// Wrap a tightly packed RGBA buffer.
    pub fn from_rgba(data: Vec<u8>, width: usize, height: usize) -> Result<Self, ImageError> {
        Self::new(data, width, height, 4, width * 4)
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
    pub fn channels(&self) -> usize {
        self.channels
    }

    #[inline]
    pub fn stride(&self) -> usize {
        self.stride
    }

    /// True for 4-channel sources.
    #[inline]
    pub fn has_alpha(&self) -> bool {
        self.channels == 4
    }

    /// The underlying buffer, padding included.
    #[inline]
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// The pixel bytes of row `y`, without stride padding.
    ///
    /// # Panics
    ///
    /// Panics if `y >= height`.
    #[inline]
    pub fn row(&self, y: usize) -> &[u8] {
        assert!(y < self.height, "row {} out of range (height {})", y, self.height);
        let start = y * self.stride;
        &self.data[start..start + self.width * self.channels]
    }

    /// The `channels` bytes of pixel `(x, y)`.
    ///
    /// # Panics
    ///
    /// Panics if the coordinate lies outside the image.
    #[inline]
    pub fn pixel(&self, x: usize, y: usize) -> &[u8] {
        assert!(x < self.width, "column {} out of range (width {})", x, self.width);
        let start = x * self.channels;
        &self.row(y)[start..start + self.channels]
    }
}
