//! Per-frame capture orchestration.
//!
//! [`CaptureSession`] drives one camera source and one frame processor
//! through the preview/commit cycle: every call to [`get_one_frame`] reads a
//! frame, lets the processor annotate it, and returns the display bitmap.
//! When a capture has been requested, the same call additionally pulls a
//! second, unannotated frame, runs the processor's full extraction pass on
//! it, and completes the result handshake.
//!
//! Everything runs synchronously on the calling thread. The
//! capture-requested flag is owned by the session and is expected to be set
//! by a single external caller between cycles.
//!
//! [`get_one_frame`]: CaptureSession::get_one_frame

use image::RgbImage;

use crate::adapter::{AdapterError, FrameAdapter};
use crate::camera::{CameraError, FrameSource};
use crate::processor::{FrameProcessor, ProcessorError};

/// Errors surfaced by one capture cycle.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// The device read failed (e.g. camera disconnected mid-session)
    #[error("frame read failed: {0}")]
    Camera(#[from] CameraError),
    /// The frame processor failed; propagated as-is
    #[error(transparent)]
    Processor(#[from] ProcessorError),
    /// The captured frame could not be converted to a display image
    #[error(transparent)]
    Adapter(#[from] AdapterError),
}

/// Output of one explicit state-machine transition.
#[derive(Debug)]
pub struct CycleOutput {
    /// The annotated preview frame, converted for display
    pub bitmap: RgbImage,
    /// Whether a pending capture request was acted upon this cycle
    pub flag_consumed: bool,
}

/// Synchronous capture session over a frame source and a processor.
///
/// Owns two independent frame adapters: one for the continuously updated
/// preview buffer and one for the on-demand fresh buffer used when a capture
/// is requested. Both buffers are overwritten in place on each read.
pub struct CaptureSession<S: FrameSource, P: FrameProcessor> {
    source: S,
    processor: P,
    preview: FrameAdapter,
    fresh: FrameAdapter,
    /// Pending capture request; consumed at most once per request
    capture_requested: bool,
    /// Uncontoured display image of the last committed capture
    snapshot: Option<RgbImage>,
}

impl<S: FrameSource, P: FrameProcessor> CaptureSession<S, P> {
    pub fn new(source: S, processor: P) -> Self {
        Self {
            source,
            processor,
            preview: FrameAdapter::new(),
            fresh: FrameAdapter::new(),
            capture_requested: false,
            snapshot: None,
        }
    }

    /// Request that the next cycle commits a capture.
    ///
    /// Set by the external trigger (a UI action, a hotkey) between cycles;
    /// consumed by the next [`get_one_frame`] call.
    ///
    /// [`get_one_frame`]: CaptureSession::get_one_frame
    pub fn request_capture(&mut self) {
        self.capture_requested = true;
    }

    /// Whether a capture request is still pending.
    pub fn capture_pending(&self) -> bool {
        self.capture_requested
    }

    /// Run one capture cycle and return the display bitmap.
    ///
    /// Feeds the session-owned capture flag into [`advance`] and resets it
    /// once the cycle has acted on it. If the cycle fails, the flag is left
    /// pending so the request is honored by the next successful cycle.
    ///
    /// [`advance`]: CaptureSession::advance
    pub fn get_one_frame(&mut self) -> Result<RgbImage, SessionError> {
        let requested = self.capture_requested;
        let output = self.advance(requested)?;
        if output.flag_consumed {
            self.capture_requested = false;
        }
        Ok(output.bitmap)
    }

    /// The explicit state-machine transition: one cycle, flag passed in,
    /// `(bitmap, flag_consumed)` passed out.
    ///
    /// 1. Read the next frame into the preview buffer.
    /// 2. Preview-process it in place (annotation only).
    /// 3. If `capture_requested`: read a second, independent frame into the
    ///    fresh buffer (a new device read, not a copy — the commit operates
    ///    on an unannotated sample), convert it to the snapshot image, run
    ///    the processor in commit mode, and clear the processor's result
    ///    container if it reports completion. The flag counts as consumed
    ///    regardless of the completion value.
    /// 4. Convert the annotated preview buffer to the cycle's bitmap.
    pub fn advance(&mut self, capture_requested: bool) -> Result<CycleOutput, SessionError> {
        self.source.read_frame(self.preview.frame_mut())?;
        self.processor.process(self.preview.frame_mut(), false)?;

        let mut flag_consumed = false;
        if capture_requested {
            self.source.read_frame(self.fresh.frame_mut())?;

            // Snapshot before the commit pass so it stays uncontoured
            self.snapshot = Some(self.fresh.to_display_image()?);

            self.processor.process(self.fresh.frame_mut(), true)?;

            if self.processor.completed() {
                log::debug!("commit completed, clearing processor result");
                self.processor.clear_result();
            }

            flag_consumed = true;
        }

        let bitmap = self.preview.display_image()?.clone();
        Ok(CycleOutput { bitmap, flag_consumed })
    }

    /// The uncontoured display image of the last committed capture, if any.
    ///
    /// Overwritten by the next commit; never consulted by the session itself.
    pub fn snapshot(&self) -> Option<&RgbImage> {
        self.snapshot.as_ref()
    }

    /// Release the underlying device. Idempotent.
    pub fn release(&mut self) {
        self.source.release();
    }

    /// Whether the underlying device is still open.
    pub fn is_open(&self) -> bool {
        self.source.is_open()
    }

    /// The processor, for downstream consumers of extracted results.
    pub fn processor(&self) -> &P {
        &self.processor
    }

    pub fn processor_mut(&mut self) -> &mut P {
        &mut self.processor
    }
}
