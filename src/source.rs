//! Source resolution: obtain the image to edit, either directly or as a
//! video's extracted first frame.

use image::RgbaImage;

use crate::error::EditorError;

/// Host-supplied decode capability for video sources.
///
/// The extractor owns whatever temporary handles decoding needs (demuxer,
/// decoder, offscreen frame buffer); [`FrameExtractor::release`] is invoked
/// on every resolve path, success and failure alike, so those handles never
/// outlive resolution.
pub trait FrameExtractor {
    /// Seek to time zero, decode the first frame, and hand it back as an
    /// owned RGBA raster (the lossless still).
    fn extract_first_frame(&mut self) -> Result<RgbaImage, String>;

    /// Release temporary decoding handles. Default is a no-op for extractors
    /// with nothing to tear down.
    fn release(&mut self) {}
}

/// The two raster sources the editor accepts, resolved once at open.
pub enum MediaSource<X: FrameExtractor> {
    /// A decoded still image.
    Image(RgbaImage),
    /// A video whose first frame becomes the editing source.
    VideoFirstFrame(X),
}

/// Resolve a media source into an image ready for rasterization.
///
/// A zero-area image is `NoMedia` (the caller must supply usable media); a
/// failed seek/decode is `MediaDecode` (recoverable by re-upload). The
/// editor stays unopened on either.
pub fn resolve<X: FrameExtractor>(source: MediaSource<X>) -> Result<RgbaImage, EditorError> {
    let image = match source {
        MediaSource::Image(image) => image,
        MediaSource::VideoFirstFrame(mut extractor) => {
            let frame = extractor.extract_first_frame();
            extractor.release();
            frame.map_err(EditorError::MediaDecode)?
        }
    };
    if image.width() == 0 || image.height() == 0 {
        return Err(EditorError::NoMedia);
    }
    Ok(image)
}

/// Decode encoded image bytes (PNG, JPEG, ...) into an RGBA raster, for hosts
/// that hand over file contents rather than a decoded frame.
pub fn decode_image(bytes: &[u8]) -> Result<RgbaImage, EditorError> {
    if bytes.is_empty() {
        return Err(EditorError::NoMedia);
    }
    let image = image::load_from_memory(bytes)
        .map_err(|e| EditorError::MediaDecode(e.to_string()))?
        .into_rgba8();
    if image.width() == 0 || image.height() == 0 {
        return Err(EditorError::NoMedia);
    }
    Ok(image)
}
