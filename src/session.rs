//! Editor session: the state machine orchestrating open, draw, undo/redo,
//! commit, and cancel.
//!
//! A session is the exclusive owner of its raster surface and history.
//! `Closed`, `Committed`, and `Cancelled` from the lifecycle are ownership
//! facts rather than enum variants: no session value exists while closed,
//! and `commit`/`cancel` consume `self`, so a second active session cannot
//! be opened before the first is gone and teardown runs on every exit path.

use crate::error::EditorError;
use crate::history::SnapshotHistory;
use crate::log_info;
use crate::log_warn;
use crate::mask::{self, MaskResult};
use crate::raster::RasterSurface;
use crate::source::{self, FrameExtractor, MediaSource};
use crate::stroke::{BrushStamp, FrameCoalescer};
use crate::transform::{ContainerRect, DisplayTransform};
use image::RgbaImage;

/// Brush size bounds, display-space pixels (radius).
pub const BRUSH_MIN_SIZE: f32 = 5.0;
pub const BRUSH_MAX_SIZE: f32 = 50.0;
pub const DEFAULT_BRUSH_SIZE: f32 = 20.0;

/// Live states of an open session. One `Ready ⇄ Drawing` cycle per stroke.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionState {
    Ready,
    Drawing,
}

/// Stand-in for the global pointer listeners a host attaches while a session
/// is live. Detached on every exit path — commit, cancel, and drop alike —
/// so listeners can never leak past the session.
#[derive(Debug)]
struct PointerCapture {
    attached: bool,
}

impl PointerCapture {
    fn attach() -> Self {
        log_info!("pointer capture attached");
        Self { attached: true }
    }

    fn detach(&mut self) {
        if self.attached {
            self.attached = false;
            log_info!("pointer capture detached");
        }
    }
}

impl Drop for PointerCapture {
    fn drop(&mut self) {
        self.detach();
    }
}

/// One interactive mask-editing session over a resolved media source.
///
/// All methods run on the caller's (UI) thread; the only scheduling the
/// session asks of its host is a once-per-rendering-frame [`frame_tick`]
/// whenever a pointer call returns `true`.
///
/// [`frame_tick`]: EditorSession::frame_tick
#[derive(Debug)]
pub struct EditorSession {
    state: SessionState,
    source: RgbaImage,
    transform: DisplayTransform,
    surface: RasterSurface,
    history: SnapshotHistory,
    coalescer: FrameCoalescer,
    /// Display-space brush radius, clamped to [BRUSH_MIN_SIZE, BRUSH_MAX_SIZE].
    brush_size: f32,
    /// Whether the current stroke has landed at least one stamp.
    stroke_painted: bool,
    capture: PointerCapture,
}

impl EditorSession {
    /// Open an editing session: resolve the source, derive the display
    /// transform and raster from the host container, push the initial blank
    /// history entry, and attach pointer capture.
    ///
    /// On any error no session exists and nothing is left attached.
    pub fn open<X: FrameExtractor>(
        media: MediaSource<X>,
        container: ContainerRect,
    ) -> Result<Self, EditorError> {
        let source = source::resolve(media)?;

        let (transform, raster_w, raster_h) =
            DisplayTransform::contain(source.width(), source.height(), container).ok_or_else(
                || {
                    EditorError::CanvasUnavailable(format!(
                        "container {}×{} cannot host a canvas",
                        container.width, container.height
                    ))
                },
            )?;

        // The surface is a transparent overlay above the displayed source;
        // the source itself is never painted into it.
        let surface = RasterSurface::new(raster_w, raster_h)?;

        let mut history = SnapshotHistory::new();
        history.push(surface.snapshot());

        log_info!(
            "session opened: source {}×{}, raster {}×{}, display {:.1}×{:.1}",
            source.width(),
            source.height(),
            raster_w,
            raster_h,
            transform.display_width,
            transform.display_height
        );

        Ok(Self {
            state: SessionState::Ready,
            source,
            transform,
            surface,
            history,
            coalescer: FrameCoalescer::new(),
            brush_size: DEFAULT_BRUSH_SIZE,
            stroke_painted: false,
            capture: PointerCapture::attach(),
        })
    }

    // ---- accessors ----------------------------------------------------------

    pub fn state(&self) -> SessionState {
        self.state
    }

    /// The resolved source image (the still, or the extracted video frame).
    pub fn source(&self) -> &RgbaImage {
        &self.source
    }

    pub fn transform(&self) -> &DisplayTransform {
        &self.transform
    }

    pub fn surface(&self) -> &RasterSurface {
        &self.surface
    }

    pub fn brush_size(&self) -> f32 {
        self.brush_size
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    // ---- brush --------------------------------------------------------------

    /// Set the display-space brush radius, clamped to [5, 50] pixels.
    pub fn set_brush_size(&mut self, px: f32) {
        self.brush_size = px.clamp(BRUSH_MIN_SIZE, BRUSH_MAX_SIZE);
    }

    // ---- stroke lifecycle ---------------------------------------------------
    //
    // Pointer coordinates are container-relative display pixels, exactly as
    // the host's input stream delivers them. The return value of the two
    // pointer entry points tells the host whether to schedule a frame tick;
    // at most one is ever outstanding.

    /// Begin a stroke. Returns `true` when a frame tick must be scheduled.
    pub fn pointer_down(&mut self, x: f32, y: f32) -> bool {
        if self.state != SessionState::Ready {
            log_warn!("pointer_down ignored in state {:?}", self.state);
            return false;
        }
        self.state = SessionState::Drawing;
        self.stroke_painted = false;
        self.submit_sample(x, y)
    }

    /// Track the pointer during a stroke. Out-of-bounds samples are dropped
    /// (never clamped) but the stroke stays live — capture is global, so the
    /// pointer may wander off the canvas and come back.
    pub fn pointer_move(&mut self, x: f32, y: f32) -> bool {
        if self.state != SessionState::Drawing {
            return false;
        }
        self.submit_sample(x, y)
    }

    /// Once-per-rendering-frame callback: paint the most recent coalesced
    /// sample, discarding any intermediates that arrived since the last tick.
    pub fn frame_tick(&mut self) {
        if self.state != SessionState::Drawing {
            self.coalescer.reset();
            return;
        }
        if let Some((x, y)) = self.coalescer.take() {
            self.paint_at(x, y);
        }
    }

    /// End the stroke on pointer release. A pending sample is flushed first
    /// so the final position is never lost to a tick that will not come;
    /// then, unless the stroke was zero-length, a history entry is pushed.
    pub fn pointer_up(&mut self) {
        if self.state != SessionState::Drawing {
            return;
        }
        if let Some((x, y)) = self.coalescer.take() {
            self.paint_at(x, y);
        }
        if self.stroke_painted {
            self.history.push(self.surface.snapshot());
        }
        self.state = SessionState::Ready;
    }

    /// Leaving the interactive area ends the stroke exactly like a release.
    pub fn pointer_leave(&mut self) {
        self.pointer_up();
    }

    fn submit_sample(&mut self, x: f32, y: f32) -> bool {
        match self.transform.to_raster(x, y) {
            Some((rx, ry)) => self.coalescer.submit(rx, ry),
            None => false, // dropped, expected behavior
        }
    }

    fn paint_at(&mut self, x: f32, y: f32) {
        let stamp = BrushStamp {
            x,
            y,
            radius: self.transform.raster_radius(self.brush_size),
        };
        stamp.paint(&mut self.surface);
        self.stroke_painted = true;
    }

    // ---- history ------------------------------------------------------------

    /// Step back one history entry. Idempotent no-op at the oldest entry or
    /// while a stroke is in progress. Returns whether anything changed.
    pub fn undo(&mut self) -> bool {
        if self.state != SessionState::Ready {
            log_warn!("undo ignored while drawing");
            return false;
        }
        match self.history.undo() {
            Some(snapshot) => {
                self.surface.restore(snapshot);
                true
            }
            None => false,
        }
    }

    /// Step forward one history entry. Idempotent no-op at the newest entry
    /// or while a stroke is in progress. Returns whether anything changed.
    pub fn redo(&mut self) -> bool {
        if self.state != SessionState::Ready {
            log_warn!("redo ignored while drawing");
            return false;
        }
        match self.history.redo() {
            Some(snapshot) => {
                self.surface.restore(snapshot);
                true
            }
            None => false,
        }
    }

    /// Wipe all painted content. Undoable — the wipe itself is pushed as a
    /// history entry.
    pub fn clear(&mut self) {
        if self.state != SessionState::Ready {
            log_warn!("clear ignored while drawing");
            return;
        }
        self.surface.clear();
        self.history.push(self.surface.snapshot());
    }

    // ---- exit paths ---------------------------------------------------------

    /// Synthesize the binary mask and close the session.
    ///
    /// With zero strokes ever drawn this returns an all-black mask rather
    /// than an error — "nothing selected" is a valid selection, and
    /// [`MaskResult::selected_px`] lets the caller tell the two apart.
    pub fn commit(mut self) -> Result<MaskResult, EditorError> {
        // A commit racing a stroke finishes the stroke first.
        self.pointer_up();
        let result = mask::synthesize(&self.surface)?;
        log_info!(
            "session committed: {}×{} mask, {} selected px",
            result.width,
            result.height,
            result.selected_px
        );
        self.capture.detach();
        Ok(result)
    }

    /// Discard the session without output. Surface and history are dropped,
    /// pointer capture is detached.
    pub fn cancel(mut self) {
        log_info!("session cancelled");
        self.capture.detach();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::MediaSource;
    use image::RgbaImage;

    /// Extractor for tests that never resolve a video.
    struct NoVideo;
    impl FrameExtractor for NoVideo {
        fn extract_first_frame(&mut self) -> Result<RgbaImage, String> {
            unreachable!()
        }
    }

    /// 100×100 source in a 100×100 container: identity transform, scale 1.
    fn open_session() -> EditorSession {
        EditorSession::open::<NoVideo>(
            MediaSource::Image(RgbaImage::new(100, 100)),
            ContainerRect::new(100.0, 100.0),
        )
        .unwrap()
    }

    /// One full stroke: down, tick, up.
    fn stroke_at(session: &mut EditorSession, x: f32, y: f32) {
        assert!(session.pointer_down(x, y));
        session.frame_tick();
        session.pointer_up();
    }

    #[test]
    fn open_starts_ready_with_blank_history_entry() {
        let session = open_session();
        assert_eq!(session.state(), SessionState::Ready);
        assert!(!session.can_undo());
        assert!(!session.can_redo());
        assert!(session.surface().pixels().as_raw().iter().all(|&b| b == 0));
    }

    #[test]
    fn brush_size_clamps_to_bounds() {
        let mut session = open_session();
        session.set_brush_size(2.0);
        assert_eq!(session.brush_size(), BRUSH_MIN_SIZE);
        session.set_brush_size(500.0);
        assert_eq!(session.brush_size(), BRUSH_MAX_SIZE);
        session.set_brush_size(17.5);
        assert_eq!(session.brush_size(), 17.5);
    }

    #[test]
    fn zero_length_stroke_pushes_no_history() {
        let mut session = open_session();
        // A stroke that never lands a sample: down outside the canvas, up.
        session.pointer_down(-10.0, -10.0);
        assert_eq!(session.state(), SessionState::Drawing);
        session.pointer_up();
        assert!(!session.can_undo());
    }

    #[test]
    fn pointer_up_flushes_the_pending_sample() {
        let mut session = open_session();
        session.pointer_down(50.0, 50.0);
        session.pointer_up(); // no tick ever fired
        assert!(session.can_undo());
        assert_ne!(session.surface().pixels().get_pixel(50, 50).0[3], 0);
    }

    #[test]
    fn stroke_then_undo_restores_blank() {
        let mut session = open_session();
        stroke_at(&mut session, 50.0, 50.0);
        assert!(session.undo());
        assert!(session.surface().pixels().as_raw().iter().all(|&b| b == 0));
        assert!(!session.undo()); // boundary no-op
    }

    #[test]
    fn undo_and_redo_are_ignored_mid_stroke() {
        let mut session = open_session();
        stroke_at(&mut session, 30.0, 30.0);
        session.pointer_down(60.0, 60.0);
        assert!(!session.undo());
        assert!(!session.redo());
        session.pointer_up();
    }

    #[test]
    fn clear_is_undoable() {
        let mut session = open_session();
        stroke_at(&mut session, 50.0, 50.0);
        let painted = session.surface().snapshot();
        session.clear();
        assert!(session.surface().pixels().as_raw().iter().all(|&b| b == 0));
        assert!(session.undo());
        assert_eq!(session.surface().snapshot(), painted);
    }

    #[test]
    fn second_pointer_down_while_drawing_is_ignored() {
        let mut session = open_session();
        session.pointer_down(50.0, 50.0);
        assert!(!session.pointer_down(60.0, 60.0));
        assert_eq!(session.state(), SessionState::Drawing);
        session.pointer_up();
    }
}
