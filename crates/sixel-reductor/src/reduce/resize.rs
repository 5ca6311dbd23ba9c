//! Destination size policy.
//!
//! The reductor resamples while it quantizes, so resizing is only a matter
//! of choosing the destination dimensions. [`preferred_size`] applies a
//! [`ResizeAxis`] policy to a requested size and keeps the aspect ratio on
//! the axis that was not fixed.

use std::fmt;
use std::str::FromStr;

/// Which requested dimension drives the resize.
///
/// The `ScaleDown*` variants never enlarge: each requested dimension is
/// capped at the source size first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResizeAxis {
    /// Use both dimensions as given; a zero dimension follows the other.
    #[default]
    Both,
    Width,
    Height,
    /// Fit the longer source side.
    Long,
    /// Fit the shorter source side.
    Short,
    ScaleDownBoth,
    ScaleDownWidth,
    ScaleDownHeight,
    ScaleDownLong,
    ScaleDownShort,
}

impl ResizeAxis {
    pub const ALL: [ResizeAxis; 10] = [
        ResizeAxis::Both,
        ResizeAxis::Width,
        ResizeAxis::Height,
        ResizeAxis::Long,
        ResizeAxis::Short,
        ResizeAxis::ScaleDownBoth,
        ResizeAxis::ScaleDownWidth,
        ResizeAxis::ScaleDownHeight,
        ResizeAxis::ScaleDownLong,
        ResizeAxis::ScaleDownShort,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            ResizeAxis::Both => "Both",
            ResizeAxis::Width => "Width",
            ResizeAxis::Height => "Height",
            ResizeAxis::Long => "Long",
            ResizeAxis::Short => "Short",
            ResizeAxis::ScaleDownBoth => "ScaleDownBoth",
            ResizeAxis::ScaleDownWidth => "ScaleDownWidth",
            ResizeAxis::ScaleDownHeight => "ScaleDownHeight",
            ResizeAxis::ScaleDownLong => "ScaleDownLong",
            ResizeAxis::ScaleDownShort => "ScaleDownShort",
        }
    }

    #[inline]
    pub fn is_scale_down(&self) -> bool {
        matches!(
            self,
            ResizeAxis::ScaleDownBoth
                | ResizeAxis::ScaleDownWidth
                | ResizeAxis::ScaleDownHeight
                | ResizeAxis::ScaleDownLong
                | ResizeAxis::ScaleDownShort
        )
    }
}

impl fmt::Display for ResizeAxis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when parsing an unknown resize axis.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseResizeAxisError(pub String);

impl fmt::Display for ParseResizeAxisError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown resize axis '{}'", self.0)
    }
}

impl std::error::Error for ParseResizeAxisError {}

impl FromStr for ResizeAxis {
    type Err = ParseResizeAxisError;

    /// Accepts the display names, the dashed command-line spellings and the
    /// `sd` abbreviations, case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_ascii_lowercase().replace('-', "");
        let axis = match key.as_str() {
            "both" => ResizeAxis::Both,
            "w" | "width" => ResizeAxis::Width,
            "h" | "height" => ResizeAxis::Height,
            "long" => ResizeAxis::Long,
            "short" => ResizeAxis::Short,
            "scaledownboth" | "sdboth" => ResizeAxis::ScaleDownBoth,
            "scaledownwidth" | "sdwidth" | "sdw" => ResizeAxis::ScaleDownWidth,
            "scaledownheight" | "sdheight" | "sdh" => ResizeAxis::ScaleDownHeight,
            "scaledownlong" | "sdlong" => ResizeAxis::ScaleDownLong,
            "scaledownshort" | "sdshort" => ResizeAxis::ScaleDownShort,
            _ => return Err(ParseResizeAxisError(s.to_string())),
        };
        Ok(axis)
    }
}

/// The axis that actually drives the computation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Driver {
    Both,
    Width,
    Height,
}

/// Resolve a requested size against the source size.
///
/// A requested dimension of 0 means "the source size". The result is never
/// 0 on either axis for a non-empty source.
///
/// # Example
///
/// ```
/// use sixel_reductor::{preferred_size, ResizeAxis};
///
/// let size = preferred_size(400, 100, ResizeAxis::ScaleDownLong, 100, 100);
/// assert_eq!(size, (100, 25));
/// ```
pub fn preferred_size(
    src_w: usize,
    src_h: usize,
    axis: ResizeAxis,
    req_w: usize,
    req_h: usize,
) -> (usize, usize) {
    let driver = match axis {
        ResizeAxis::Both | ResizeAxis::ScaleDownBoth => {
            if req_w == 0 {
                Driver::Height
            } else if req_h == 0 {
                Driver::Width
            } else {
                Driver::Both
            }
        }
        ResizeAxis::Width | ResizeAxis::ScaleDownWidth => Driver::Width,
        ResizeAxis::Height | ResizeAxis::ScaleDownHeight => Driver::Height,
        ResizeAxis::Long | ResizeAxis::ScaleDownLong => {
            if src_w >= src_h {
                Driver::Width
            } else {
                Driver::Height
            }
        }
        ResizeAxis::Short | ResizeAxis::ScaleDownShort => {
            if src_w <= src_h {
                Driver::Width
            } else {
                Driver::Height
            }
        }
    };

    let mut w = if req_w == 0 { src_w } else { req_w };
    let mut h = if req_h == 0 { src_h } else { req_h };
    if axis.is_scale_down() {
        w = w.min(src_w);
        h = h.min(src_h);
    }

    match driver {
        Driver::Both => {}
        Driver::Width => h = scale(src_h, w, src_w),
        Driver::Height => w = scale(src_w, h, src_h),
    }
    (w.max(1), h.max(1))
}

/// `len * num / den` in 64 bits, 0 for an empty source axis.
#[inline]
fn scale(len: usize, num: usize, den: usize) -> usize {
    if den == 0 {
        return 0;
    }
    (len as u64 * num as u64 / den as u64) as usize
}
