//! Opacity map builder.
//!
//! The displayed image is rasterized at its *displayed* size, so every index
//! in an [`OpacityMap`] is a displayed pixel rather than a source pixel.  The
//! map is a snapshot: whoever owns it must rebuild it whenever the displayed
//! size changes.

use std::fmt;

use crate::debug_log;
use crate::surface::IDraggableImage;

/// Why no opacity data could be produced.
#[derive(Debug, Clone, PartialEq)]
pub enum RasterError {
    /// The image has not finished loading.
    NotReady,
    /// No 2D context could be obtained for the offscreen canvas.
    ContextUnavailable,
    /// `drawImage` threw.
    DrawFailed(String),
    /// `getImageData` threw, usually because the canvas is tainted by a
    /// cross-origin image.
    ReadbackBlocked(String),
    /// The readback did not contain `width * height` RGBA pixels.
    SizeMismatch { expected: usize, actual: usize },
}

impl fmt::Display for RasterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RasterError::NotReady => write!(f, "image not loaded yet"),
            RasterError::ContextUnavailable => write!(f, "2d context unavailable"),
            RasterError::DrawFailed(msg) => write!(f, "drawImage failed: {}", msg),
            RasterError::ReadbackBlocked(msg) => write!(f, "pixel readback blocked: {}", msg),
            RasterError::SizeMismatch { expected, actual } => {
                write!(f, "raster has {} bytes, expected {}", actual, expected)
            }
        }
    }
}

/// Per-column visibility summary of one rasterization.
#[derive(Debug, Clone, PartialEq)]
pub struct OpacityMap {
    width: u32,
    height: u32,
    column_visible: Vec<bool>,
    visible_columns: Vec<u32>,
    top_row: u32,
    alpha: Vec<u8>,
}

impl OpacityMap {
    /// Build from row-major RGBA bytes of a `width x height` raster.
    pub fn from_rgba(width: u32, height: u32, rgba: &[u8]) -> Result<Self, RasterError> {
        let expected = width as usize * height as usize * 4;
        if rgba.len() != expected {
            return Err(RasterError::SizeMismatch { expected, actual: rgba.len() });
        }

        let alpha: Vec<u8> = rgba.chunks_exact(4).map(|px| px[3]).collect();
        let mut column_visible = vec![false; width as usize];
        let mut visible_columns = Vec::new();
        let mut top_row = height;

        for x in 0..width as usize {
            let first_opaque = (0..height as usize).find(|&y| alpha[y * width as usize + x] > 0);
            if let Some(y) = first_opaque {
                column_visible[x] = true;
                visible_columns.push(x as u32);
                top_row = top_row.min(y as u32);
            }
        }

        Ok(Self {
            width,
            height,
            column_visible,
            visible_columns,
            top_row,
            alpha,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn is_column_visible(&self, x: u32) -> bool {
        self.column_visible.get(x as usize).copied().unwrap_or(false)
    }

    /// Indices of all columns holding at least one opaque pixel, ascending.
    pub fn visible_columns(&self) -> &[u32] {
        &self.visible_columns
    }

    /// Topmost opaque row over all columns; `None` when the raster is fully
    /// transparent (internally the sentinel `height`).
    pub fn top_visible_row(&self) -> Option<u32> {
        if self.top_row < self.height {
            Some(self.top_row)
        } else {
            None
        }
    }

    /// Raw topmost-row value including the `height` sentinel.
    pub fn top_row_raw(&self) -> u32 {
        self.top_row
    }

    /// Alpha at raster pixel `(x, y)`.  Pixels outside the raster read as
    /// fully transparent, like `getImageData` outside the canvas.
    pub fn alpha_at(&self, x: i64, y: i64) -> u8 {
        if x < 0 || y < 0 || x >= self.width as i64 || y >= self.height as i64 {
            return 0;
        }
        self.alpha[y as usize * self.width as usize + x as usize]
    }
}

/// Result of a rebuild: either real pixel data or the reason there is none.
#[derive(Debug, Clone, PartialEq)]
pub enum OpacityData {
    Available(OpacityMap),
    Unavailable(RasterError),
}

impl OpacityData {
    pub fn map(&self) -> Option<&OpacityMap> {
        match self {
            OpacityData::Available(map) => Some(map),
            OpacityData::Unavailable(_) => None,
        }
    }

    pub fn is_available(&self) -> bool {
        matches!(self, OpacityData::Available(_))
    }
}

impl Default for OpacityData {
    fn default() -> Self {
        OpacityData::Unavailable(RasterError::NotReady)
    }
}

/// Rasterize `image` at its current displayed size and summarize it.
pub fn rebuild(image: &dyn IDraggableImage) -> OpacityData {
    if !image.is_ready() {
        return OpacityData::Unavailable(RasterError::NotReady);
    }
    let (width, height) = image.bounds().raster_size();
    let result = image
        .rasterize(width, height)
        .and_then(|rgba| OpacityMap::from_rgba(width, height, &rgba));

    match result {
        Ok(map) => {
            debug_log!(
                "opacity map rebuilt at {}x{}: {} visible columns, top row {}",
                width,
                height,
                map.visible_columns().len(),
                map.top_row_raw()
            );
            OpacityData::Available(map)
        }
        Err(err) => {
            debug_log!("opacity data unavailable: {}", err);
            OpacityData::Unavailable(err)
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// RGBA raster with an opaque `fill_w x fill_h` block in the top-left.
    pub(crate) fn quadrant_raster(width: u32, height: u32, fill_w: u32, fill_h: u32) -> Vec<u8> {
        let mut rgba = vec![0u8; (width * height * 4) as usize];
        for y in 0..fill_h.min(height) {
            for x in 0..fill_w.min(width) {
                let i = ((y * width + x) * 4) as usize;
                rgba[i..i + 4].copy_from_slice(&[200, 120, 40, 255]);
            }
        }
        rgba
    }

    #[test]
    fn top_left_quadrant_marks_left_half_columns() {
        let map = OpacityMap::from_rgba(100, 100, &quadrant_raster(100, 100, 50, 50)).unwrap();
        assert_eq!(map.visible_columns(), (0..50).collect::<Vec<u32>>().as_slice());
        assert_eq!(map.top_visible_row(), Some(0));
        assert!(map.is_column_visible(49));
        assert!(!map.is_column_visible(50));
        assert_eq!(map.alpha_at(10, 10), 255);
        assert_eq!(map.alpha_at(60, 10), 0);
    }

    #[test]
    fn fully_transparent_raster_uses_height_sentinel() {
        let map = OpacityMap::from_rgba(30, 20, &vec![0u8; 30 * 20 * 4]).unwrap();
        assert!(map.visible_columns().is_empty());
        assert_eq!(map.top_row_raw(), 20);
        assert_eq!(map.top_visible_row(), None);
    }

    #[test]
    fn top_row_is_minimum_over_columns() {
        let (w, h) = (4u32, 6u32);
        let mut rgba = vec![0u8; (w * h * 4) as usize];
        // column 1 opaque from row 4, column 3 from row 2
        for (x, y) in [(1u32, 4u32), (1, 5), (3, 2)] {
            rgba[((y * w + x) * 4 + 3) as usize] = 10;
        }
        let map = OpacityMap::from_rgba(w, h, &rgba).unwrap();
        assert_eq!(map.visible_columns(), &[1, 3]);
        assert_eq!(map.top_visible_row(), Some(2));
    }

    #[test]
    fn out_of_raster_samples_are_transparent() {
        let map = OpacityMap::from_rgba(2, 2, &[255u8; 16]).unwrap();
        assert_eq!(map.alpha_at(-1, 0), 0);
        assert_eq!(map.alpha_at(0, 2), 0);
        assert_eq!(map.alpha_at(1, 1), 255);
    }

    #[test]
    fn short_buffer_is_rejected() {
        let err = OpacityMap::from_rgba(2, 2, &[0u8; 12]).unwrap_err();
        assert_eq!(err, RasterError::SizeMismatch { expected: 16, actual: 12 });
    }
}
