//! Coordinate mapping between display space (on-screen pixels of the visible
//! canvas) and raster space (internal pixel coordinates of the buffer under
//! edit).
//!
//! The transform is computed once per editor open and never changes for the
//! lifetime of a session: the source's natural dimensions are fitted into the
//! host container with "contain" semantics, and sources larger than the
//! raster ceiling are downscaled proportionally so per-stroke cost and
//! snapshot memory stay bounded.

/// Maximum raster dimensions. Larger sources are downscaled proportionally.
pub const MAX_RASTER_WIDTH: u32 = 1920;
pub const MAX_RASTER_HEIGHT: u32 = 1080;

/// Host container rectangle, queried synchronously at open time.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ContainerRect {
    pub width: f32,
    pub height: f32,
}

impl ContainerRect {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// Mapping between the displayed canvas and the internal raster.
///
/// `scale_x` / `scale_y` are raster pixels per display pixel, so any
/// downscale applied to the raster is already folded in; conversions never
/// consult the source's natural dimensions again.
#[derive(Clone, Copy, Debug)]
pub struct DisplayTransform {
    /// Size of the displayed canvas inside the container ("contain" fit).
    pub display_width: f32,
    pub display_height: f32,
    /// Letterbox offsets centering the canvas inside the container.
    pub offset_x: f32,
    pub offset_y: f32,
    /// Raster pixels per display pixel.
    pub scale_x: f32,
    pub scale_y: f32,
}

impl DisplayTransform {
    /// Fit a source of `natural_w × natural_h` into `container` under
    /// "contain" semantics and derive the raster dimensions.
    ///
    /// Returns the transform plus the raster size: the source size when it
    /// fits under the ceiling, else downscaled by
    /// `min(MAX_W / w, MAX_H / h)` with aspect preserved.
    ///
    /// Returns `None` for degenerate inputs (zero-area source or container).
    pub fn contain(
        natural_w: u32,
        natural_h: u32,
        container: ContainerRect,
    ) -> Option<(Self, u32, u32)> {
        if natural_w == 0 || natural_h == 0 || container.width <= 0.0 || container.height <= 0.0 {
            return None;
        }

        // "Contain" fit: the axis with the larger relative extent fills the
        // container; the other is centered with letterbox offsets.
        let fit = (container.width / natural_w as f32).min(container.height / natural_h as f32);
        let display_width = natural_w as f32 * fit;
        let display_height = natural_h as f32 * fit;
        let offset_x = (container.width - display_width) / 2.0;
        let offset_y = (container.height - display_height) / 2.0;

        let (raster_w, raster_h) = raster_dimensions(natural_w, natural_h);

        let transform = Self {
            display_width,
            display_height,
            offset_x,
            offset_y,
            scale_x: raster_w as f32 / display_width,
            scale_y: raster_h as f32 / display_height,
        };
        Some((transform, raster_w, raster_h))
    }

    /// Convert a container-relative pointer sample into raster coordinates.
    ///
    /// Samples outside the displayed canvas rect are dropped (`None`), never
    /// clamped — a stroke tracked past the edge simply paints nothing until
    /// the pointer re-enters.
    pub fn to_raster(&self, x: f32, y: f32) -> Option<(f32, f32)> {
        let dx = x - self.offset_x;
        let dy = y - self.offset_y;
        if dx < 0.0 || dy < 0.0 || dx >= self.display_width || dy >= self.display_height {
            return None;
        }
        Some((dx * self.scale_x, dy * self.scale_y))
    }

    /// Scale a display-space brush radius into raster space.
    ///
    /// Always `display radius × (raster width / display width)` — the
    /// inverse would shrink the brush on downscaled rasters.
    pub fn raster_radius(&self, display_radius: f32) -> f32 {
        display_radius * self.scale_x
    }
}

/// Raster size for a source: unchanged when it fits under the ceiling, else
/// proportionally downscaled (aspect preserved, at least 1×1).
fn raster_dimensions(natural_w: u32, natural_h: u32) -> (u32, u32) {
    if natural_w <= MAX_RASTER_WIDTH && natural_h <= MAX_RASTER_HEIGHT {
        return (natural_w, natural_h);
    }
    let factor = (MAX_RASTER_WIDTH as f32 / natural_w as f32)
        .min(MAX_RASTER_HEIGHT as f32 / natural_h as f32);
    let w = ((natural_w as f32 * factor).round() as u32).max(1);
    let h = ((natural_h as f32 * factor).round() as u32).max(1);
    (w, h)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contain_wider_than_container_letterboxes_vertically() {
        // Container 400×300, source 800×400: width fills, height is centered.
        let (t, rw, rh) =
            DisplayTransform::contain(800, 400, ContainerRect::new(400.0, 300.0)).unwrap();
        assert_eq!(t.display_width, 400.0);
        assert_eq!(t.display_height, 200.0);
        assert_eq!(t.offset_x, 0.0);
        assert!(t.offset_y > 0.0);
        assert_eq!(t.offset_y, 50.0);
        assert_eq!((rw, rh), (800, 400));
    }

    #[test]
    fn contain_taller_than_container_letterboxes_horizontally() {
        let (t, _, _) =
            DisplayTransform::contain(400, 800, ContainerRect::new(400.0, 300.0)).unwrap();
        assert_eq!(t.display_height, 300.0);
        assert_eq!(t.offset_y, 0.0);
        assert!(t.offset_x > 0.0);
    }

    #[test]
    fn oversized_source_is_downscaled_proportionally() {
        let (t, rw, rh) =
            DisplayTransform::contain(3840, 2160, ContainerRect::new(400.0, 300.0)).unwrap();
        assert_eq!((rw, rh), (1920, 1080));
        // Downscale factor is folded into the conversion scale.
        assert!((t.scale_x - 1920.0 / t.display_width).abs() < 1e-6);
    }

    #[test]
    fn downscale_preserves_aspect_for_tall_sources() {
        let (_, rw, rh) =
            DisplayTransform::contain(1000, 4000, ContainerRect::new(400.0, 300.0)).unwrap();
        assert_eq!(rh, 1080);
        assert_eq!(rw, 270);
    }

    #[test]
    fn degenerate_inputs_are_rejected() {
        assert!(DisplayTransform::contain(0, 100, ContainerRect::new(400.0, 300.0)).is_none());
        assert!(DisplayTransform::contain(100, 100, ContainerRect::new(0.0, 300.0)).is_none());
    }

    #[test]
    fn pointer_samples_map_through_raster_over_display_ratio() {
        // Source 200×200 shown at 100×100: scale is exactly 2.
        let (t, _, _) =
            DisplayTransform::contain(200, 200, ContainerRect::new(100.0, 100.0)).unwrap();
        let (rx, ry) = t.to_raster(25.0, 50.0).unwrap();
        assert_eq!((rx, ry), (50.0, 100.0));
    }

    #[test]
    fn out_of_bounds_samples_are_dropped_not_clamped() {
        let (t, _, _) =
            DisplayTransform::contain(800, 400, ContainerRect::new(400.0, 300.0)).unwrap();
        // Above the letterboxed canvas (y < offset_y).
        assert!(t.to_raster(200.0, 10.0).is_none());
        // Left of the container entirely.
        assert!(t.to_raster(-5.0, 150.0).is_none());
        // Just past the right edge.
        assert!(t.to_raster(400.0, 150.0).is_none());
        // Inside.
        assert!(t.to_raster(200.0, 150.0).is_some());
    }

    #[test]
    fn brush_radius_scales_by_raster_over_display_width() {
        let container = ContainerRect::new(400.0, 300.0);
        let (t, rw, _) = DisplayTransform::contain(3840, 2160, container).unwrap();
        let s = rw as f32 / t.display_width;
        for b in 5..=50 {
            let b = b as f32;
            assert_eq!(t.raster_radius(b), b * s);
        }
    }
}
