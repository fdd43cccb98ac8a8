//! Mask synthesis: collapse the painted raster into a binary stencil.

use image::codecs::png::PngEncoder;
use image::RgbaImage;
use rayon::prelude::*;

use crate::error::EditorError;
use crate::raster::RasterSurface;

/// Binary stencil derived from a committed raster. Same pixel dimensions as
/// the surface; handed to the caller by value and never persisted here.
pub struct MaskResult {
    pub width: u32,
    pub height: u32,
    /// Lossless PNG encoding of the binary mask.
    pub png: Vec<u8>,
    /// Number of selected (white) pixels. Zero means "nothing selected" —
    /// downstream consumers treat that differently from a real mask, so the
    /// count rides along rather than forcing them to decode and scan.
    pub selected_px: u64,
}

/// Map every painted pixel to opaque white and everything else to opaque
/// black: alpha > 0 → (255,255,255,255), alpha == 0 → (0,0,0,255).
///
/// The output alpha channel encodes nothing (always 255); alpha carries
/// meaning only in the editing raster. One carve-out keeps the map a fixed
/// point on its own output: exact opaque black is the "unselected" encoding
/// and stays black even though its alpha is 255. Editing rasters never
/// contain that value (paint is the constant semi-transparent brush fill), so
/// the carve-out only ever matches mask output.
pub fn binarize(pixels: &RgbaImage) -> RgbaImage {
    let mut out = pixels.clone();
    out.par_chunks_exact_mut(4)
        .for_each(|px| {
            let unselected =
                px[3] == 0 || (px[0] == 0 && px[1] == 0 && px[2] == 0 && px[3] == 255);
            let v = if unselected { 0 } else { 255 };
            px[0] = v;
            px[1] = v;
            px[2] = v;
            px[3] = 255;
        });
    out
}

/// Synthesize the binary stencil for a finished surface and encode it as a
/// lossless PNG.
pub fn synthesize(surface: &RasterSurface) -> Result<MaskResult, EditorError> {
    let mask = binarize(surface.pixels());
    let selected_px = mask
        .as_raw()
        .par_chunks_exact(4)
        .filter(|px| px[0] == 255)
        .count() as u64;

    let mut png = Vec::new();
    let encoder = PngEncoder::new(&mut png);
    #[allow(deprecated)]
    encoder.encode(mask.as_raw(), mask.width(), mask.height(), image::ColorType::Rgba8)?;

    Ok(MaskResult {
        width: mask.width(),
        height: mask.height(),
        png,
        selected_px,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    fn sample_raster() -> RgbaImage {
        let mut img = RgbaImage::new(16, 16);
        img.put_pixel(0, 0, Rgba([255, 64, 64, 128]));
        img.put_pixel(5, 5, Rgba([10, 20, 30, 1])); // faintest possible paint
        img.put_pixel(9, 3, Rgba([1, 1, 1, 255]));
        img
    }

    #[test]
    fn every_pixel_is_pure_black_or_pure_white() {
        let mask = binarize(&sample_raster());
        for px in mask.pixels() {
            assert!(
                *px == Rgba([255, 255, 255, 255]) || *px == Rgba([0, 0, 0, 255]),
                "unexpected mask pixel {:?}",
                px
            );
        }
        assert_eq!(*mask.get_pixel(0, 0), Rgba([255, 255, 255, 255]));
        assert_eq!(*mask.get_pixel(5, 5), Rgba([255, 255, 255, 255]));
        assert_eq!(*mask.get_pixel(9, 3), Rgba([255, 255, 255, 255]));
        assert_eq!(*mask.get_pixel(1, 1), Rgba([0, 0, 0, 255]));
    }

    #[test]
    fn opaque_black_is_the_unselected_encoding() {
        let mut img = RgbaImage::new(2, 2);
        img.put_pixel(0, 0, Rgba([0, 0, 0, 255]));
        let mask = binarize(&img);
        assert_eq!(*mask.get_pixel(0, 0), Rgba([0, 0, 0, 255]));
    }

    #[test]
    fn binarize_is_idempotent() {
        let once = binarize(&sample_raster());
        let twice = binarize(&once);
        assert_eq!(once.as_raw(), twice.as_raw());
    }

    #[test]
    fn synthesize_counts_selected_pixels_and_round_trips_through_png() {
        let surface = RasterSurface::from_image(sample_raster()).unwrap();
        let result = synthesize(&surface).unwrap();
        assert_eq!((result.width, result.height), (16, 16));
        assert_eq!(result.selected_px, 3);

        let decoded = image::load_from_memory(&result.png).unwrap().into_rgba8();
        assert_eq!(decoded.as_raw(), binarize(surface.pixels()).as_raw());
    }

    #[test]
    fn blank_surface_yields_all_black() {
        let surface = RasterSurface::new(8, 8).unwrap();
        let result = synthesize(&surface).unwrap();
        assert_eq!(result.selected_px, 0);
        let decoded = image::load_from_memory(&result.png).unwrap().into_rgba8();
        assert!(decoded.pixels().all(|p| *p == Rgba([0, 0, 0, 255])));
    }
}
