/// Error type for editor session operations.
///
/// Every variant surfaces synchronously through the same `Result` channel as
/// commit/cancel results. Dropped out-of-bounds pointer samples are expected
/// behavior, not errors, and never appear here. The editor performs no
/// internal retries; re-uploading media or re-opening a session is the
/// caller's concern.
#[derive(Debug)]
pub enum EditorError {
    /// `open()` was called without a usable media source. Recoverable — the
    /// caller must supply media.
    NoMedia,
    /// Video first-frame extraction failed (bad codec, corrupt file, seek
    /// failure). Recoverable by re-upload.
    MediaDecode(String),
    /// The raster buffer could not be acquired or encoded (host resource
    /// exhaustion). Fatal to the session.
    CanvasUnavailable(String),
}

impl std::fmt::Display for EditorError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EditorError::NoMedia => write!(f, "no usable media source"),
            EditorError::MediaDecode(e) => write!(f, "media decode error: {}", e),
            EditorError::CanvasUnavailable(e) => write!(f, "canvas unavailable: {}", e),
        }
    }
}

impl std::error::Error for EditorError {}

impl From<image::ImageError> for EditorError {
    fn from(e: image::ImageError) -> Self {
        EditorError::CanvasUnavailable(e.to_string())
    }
}
