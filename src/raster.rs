//! The raster surface under edit and its full-buffer snapshots.

use image::RgbaImage;

use crate::error::EditorError;
use crate::transform::{MAX_RASTER_HEIGHT, MAX_RASTER_WIDTH};

/// Immutable full-buffer copy of a surface at one point in history.
///
/// Snapshots are whole-buffer copies, not diffs; memory is bounded by the
/// history cap and the raster ceiling.
#[derive(Clone, PartialEq)]
#[derive(Debug)]
pub struct RasterSnapshot {
    data: Box<[u8]>,
}

impl RasterSnapshot {
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }
}

/// The RGBA pixel buffer under edit.
///
/// Exclusively owned by the active editing session: created on open, mutated
/// by the stroke engine and undo/redo restore, dropped on close. Its size is
/// fixed once initialized and never exceeds the raster ceiling.
#[derive(Debug)]
pub struct RasterSurface {
    pixels: RgbaImage,
}

impl RasterSurface {
    /// Allocate a blank (fully transparent) surface.
    ///
    /// Callers are expected to pass dimensions already bounded by the
    /// coordinate mapper; a zero or over-ceiling size means the raster
    /// context effectively could not be acquired.
    pub fn new(width: u32, height: u32) -> Result<Self, EditorError> {
        if width == 0 || height == 0 || width > MAX_RASTER_WIDTH || height > MAX_RASTER_HEIGHT {
            return Err(EditorError::CanvasUnavailable(format!(
                "raster dimensions {}×{} out of range",
                width, height
            )));
        }
        Ok(Self {
            pixels: RgbaImage::new(width, height),
        })
    }

    /// Wrap an existing RGBA buffer (used when rasterizing the source is the
    /// caller's job, e.g. in tests).
    pub fn from_image(pixels: RgbaImage) -> Result<Self, EditorError> {
        let (w, h) = pixels.dimensions();
        if w == 0 || h == 0 || w > MAX_RASTER_WIDTH || h > MAX_RASTER_HEIGHT {
            return Err(EditorError::CanvasUnavailable(format!(
                "raster dimensions {}×{} out of range",
                w, h
            )));
        }
        Ok(Self { pixels })
    }

    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    pub fn pixels(&self) -> &RgbaImage {
        &self.pixels
    }

    pub(crate) fn pixels_mut(&mut self) -> &mut RgbaImage {
        &mut self.pixels
    }

    /// Capture a full-buffer snapshot of the current content.
    pub fn snapshot(&self) -> RasterSnapshot {
        RasterSnapshot {
            data: self.pixels.as_raw().clone().into_boxed_slice(),
        }
    }

    /// Restore the surface to a previously captured snapshot.
    ///
    /// Snapshots always come from this surface, so lengths match by
    /// construction; a mismatch would mean the fixed-size invariant broke.
    pub fn restore(&mut self, snapshot: &RasterSnapshot) {
        debug_assert_eq!(self.pixels.as_raw().len(), snapshot.data.len());
        self.pixels.copy_from_slice(&snapshot.data);
    }

    /// Wipe the surface back to fully transparent.
    pub fn clear(&mut self) {
        self.pixels.fill(0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    #[test]
    fn snapshot_and_restore_round_trip() {
        let mut surface = RasterSurface::new(8, 8).unwrap();
        let blank = surface.snapshot();
        surface
            .pixels_mut()
            .put_pixel(3, 4, Rgba([255, 80, 80, 128]));
        let painted = surface.snapshot();
        assert_ne!(blank, painted);

        surface.restore(&blank);
        assert_eq!(surface.snapshot(), blank);
        surface.restore(&painted);
        assert_eq!(surface.snapshot(), painted);
    }

    #[test]
    fn clear_resets_every_byte() {
        let mut surface = RasterSurface::new(4, 4).unwrap();
        surface.pixels_mut().put_pixel(0, 0, Rgba([1, 2, 3, 4]));
        surface.clear();
        assert!(surface.pixels().as_raw().iter().all(|&b| b == 0));
    }

    #[test]
    fn rejects_out_of_range_dimensions() {
        assert!(RasterSurface::new(0, 10).is_err());
        assert!(RasterSurface::new(1921, 10).is_err());
        assert!(RasterSurface::new(1920, 1080).is_ok());
    }
}
