//! Frame source abstraction.

use super::types::{CameraError, Frame};

/// Blocking producer of frames from a capture device.
///
/// `read_frame` overwrites the caller-owned buffer with the next available
/// frame and must only be called while the source is open. `release` is
/// idempotent: calling it on a closed or never-opened source is a no-op and
/// never fails.
pub trait FrameSource {
    /// Block until the next frame is available and overwrite `frame` with it.
    fn read_frame(&mut self, frame: &mut Frame) -> Result<(), CameraError>;

    /// Release the underlying device. Safe to call multiple times.
    fn release(&mut self);

    /// Whether the source currently holds an open device.
    fn is_open(&self) -> bool;
}
