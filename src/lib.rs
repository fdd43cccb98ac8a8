//! MaskPad — interactive raster mask editor.
//!
//! Paint a free-form selection over a still image (or a video's extracted
//! first frame) with a circular brush, undo/redo through a bounded snapshot
//! history, and commit the strokes as a binary PNG stencil for a downstream
//! generation pipeline.
//!
//! The crate is the editor subsystem only: the host application owns the
//! window, the event loop, and whatever happens to the mask afterwards. It
//! feeds the session container-relative pointer samples and a once-per-frame
//! tick; the session owns the raster, the history, and the synthesis.
//!
//! ```no_run
//! use maskpad::{ContainerRect, EditorSession, MediaSource, NoVideoSupport};
//!
//! let photo = maskpad::source::decode_image(&std::fs::read("photo.png").unwrap()).unwrap();
//! let mut session = EditorSession::open::<NoVideoSupport>(
//!     MediaSource::Image(photo),
//!     ContainerRect::new(400.0, 300.0),
//! ).unwrap();
//!
//! session.set_brush_size(12.0);
//! if session.pointer_down(200.0, 150.0) {
//!     session.frame_tick(); // host schedules this on the next frame
//! }
//! session.pointer_up();
//!
//! let mask = session.commit().unwrap();
//! assert!(mask.selected_px > 0);
//! ```

pub mod logger;

pub mod error;
pub mod history;
pub mod mask;
pub mod raster;
pub mod session;
pub mod source;
pub mod stroke;
pub mod transform;

pub use error::EditorError;
pub use history::{HISTORY_CAP, SnapshotHistory};
pub use mask::MaskResult;
pub use raster::{RasterSnapshot, RasterSurface};
pub use session::{
    BRUSH_MAX_SIZE, BRUSH_MIN_SIZE, DEFAULT_BRUSH_SIZE, EditorSession, SessionState,
};
pub use source::{FrameExtractor, MediaSource};
pub use stroke::{BRUSH_FILL, BrushStamp, FrameCoalescer};
pub use transform::{ContainerRect, DisplayTransform, MAX_RASTER_HEIGHT, MAX_RASTER_WIDTH};

/// Placeholder extractor for hosts that only ever open still images; it
/// satisfies the [`MediaSource`] type parameter and can never be invoked.
pub enum NoVideoSupport {}

impl FrameExtractor for NoVideoSupport {
    fn extract_first_frame(&mut self) -> Result<image::RgbaImage, String> {
        match *self {}
    }
}
