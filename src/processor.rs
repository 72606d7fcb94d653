//! Frame processor interface.
//!
//! The vision work itself (frame differencing, contour extraction, color
//! sampling) lives in an external collaborator; this crate only defines the
//! seam it is reached through and the handshake around committed captures.

use crate::camera::Frame;

/// One extracted color sample, RGB.
pub type ColorSample = [u8; 3];

/// Errors surfaced by a frame processor.
#[derive(Debug, thiserror::Error)]
pub enum ProcessorError {
    /// The processor rejected or failed on a frame
    #[error("frame processing failed: {0}")]
    Failed(String),
}

/// External vision collaborator consumed by the capture session.
///
/// Two invocation modes, selected by `commit`:
///
/// * `commit == false` — lightweight preview annotation: the processor may
///   draw on the frame in place (detected contours, markers) but must not
///   touch its persistent result state.
/// * `commit == true` — the full extraction pass: the processor analyzes the
///   frame, stores its result internally, and raises [`completed`] once
///   finished.
///
/// The result container belongs to the processor. The session's only
/// responsibility is to call [`clear_result`] once it observes `completed`
/// after a commit; it never reads or acts on the contents. Whatever consumes
/// the extracted samples does so through the processor directly.
///
/// [`completed`]: FrameProcessor::completed
/// [`clear_result`]: FrameProcessor::clear_result
pub trait FrameProcessor {
    /// Process one frame in place, in preview or commit mode.
    fn process(&mut self, frame: &mut Frame, commit: bool) -> Result<(), ProcessorError>;

    /// Whether the last commit pass has finished.
    fn completed(&self) -> bool;

    /// The extracted samples of the last commit, if any remain.
    fn result(&self) -> Option<&[ColorSample]>;

    /// Discard the stored result. Called by the session once `completed`
    /// has been observed after a commit.
    fn clear_result(&mut self);
}

/// Processor that performs no vision work.
///
/// Preview mode leaves frames untouched; commit mode extracts nothing but
/// still reports completion, so the session's handshake runs end to end.
/// Useful for wiring the capture loop before a real vision backend is
/// attached.
#[derive(Debug, Default)]
pub struct PassthroughProcessor {
    completed: bool,
    result: Option<Vec<ColorSample>>,
}

impl PassthroughProcessor {
    pub fn new() -> Self {
        Self::default()
    }
}

impl FrameProcessor for PassthroughProcessor {
    fn process(&mut self, frame: &mut Frame, commit: bool) -> Result<(), ProcessorError> {
        if commit {
            log::debug!(
                "passthrough commit on {}x{} frame, nothing extracted",
                frame.width,
                frame.height
            );
            self.result = Some(Vec::new());
            self.completed = true;
        }
        Ok(())
    }

    fn completed(&self) -> bool {
        self.completed
    }

    fn result(&self) -> Option<&[ColorSample]> {
        self.result.as_deref()
    }

    fn clear_result(&mut self) {
        self.result = None;
    }
}
