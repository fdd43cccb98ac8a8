//! Stroke engine: turns pointer drags into circular brush stamps and
//! coalesces high-frequency input to at most one paint per rendering frame.

use image::Rgba;

use crate::raster::RasterSurface;

/// Presentation fill for painted pixels. Semi-transparent so the source image
/// stays visible under the selection; synthesis keys only on alpha > 0, so
/// the exact color never reaches the output mask.
pub const BRUSH_FILL: Rgba<u8> = Rgba([255, 64, 64, 128]);

/// One circular paint operation at a single raster-space coordinate.
/// Ephemeral — built per flush, never retained after painting.
#[derive(Clone, Copy, Debug)]
pub struct BrushStamp {
    pub x: f32,
    pub y: f32,
    pub radius: f32,
}

impl BrushStamp {
    /// Paint the stamp onto the surface: every pixel whose center lies within
    /// `radius` of the stamp center receives the constant brush fill
    /// (draw-over; re-stamping the same spot is a no-op).
    pub fn paint(&self, surface: &mut RasterSurface) {
        let width = surface.width();
        let height = surface.height();

        // Clamp the bounding box to the surface; the stamp center itself may
        // sit near an edge with most of the circle outside.
        let min_x = (self.x - self.radius).max(0.0) as u32;
        let max_x = ((self.x + self.radius).ceil() as u32).min(width.saturating_sub(1));
        let min_y = (self.y - self.radius).max(0.0) as u32;
        let max_y = ((self.y + self.radius).ceil() as u32).min(height.saturating_sub(1));

        let radius_sq = self.radius * self.radius;
        let pixels = surface.pixels_mut();
        for y in min_y..=max_y {
            for x in min_x..=max_x {
                let dx = x as f32 - self.x;
                let dy = y as f32 - self.y;
                if dx * dx + dy * dy <= radius_sq {
                    pixels.put_pixel(x, y, BRUSH_FILL);
                }
            }
        }
    }
}

/// Per-frame pointer coalescing: a single pending-sample slot plus a
/// flush-on-next-tick flag.
///
/// Under fast motion many samples arrive within one rendering frame; only the
/// most recent one is painted per tick, the rest are discarded, and at most
/// one tick request is ever outstanding.
#[derive(Default)]
#[derive(Debug)]
pub struct FrameCoalescer {
    pending: Option<(f32, f32)>,
    tick_scheduled: bool,
}

impl FrameCoalescer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a raster-space sample, overwriting any pending one.
    ///
    /// Returns `true` when the host must schedule a frame tick; `false` means
    /// one is already outstanding and the sample will ride along with it.
    pub fn submit(&mut self, x: f32, y: f32) -> bool {
        self.pending = Some((x, y));
        if self.tick_scheduled {
            return false;
        }
        self.tick_scheduled = true;
        true
    }

    /// Take the pending sample at the frame tick, clearing the slot and the
    /// outstanding-tick flag.
    pub fn take(&mut self) -> Option<(f32, f32)> {
        self.tick_scheduled = false;
        self.pending.take()
    }

    /// Drop any pending sample without painting (stroke abandoned).
    pub fn reset(&mut self) {
        self.pending = None;
        self.tick_scheduled = false;
    }
}
