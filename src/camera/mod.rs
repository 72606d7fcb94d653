//! Camera capture module for webcam access and frame capture.
//!
//! This module provides a high-level API for camera capture operations:
//! - Device enumeration via [`list_devices`]
//! - Synchronous camera capture via [`CameraCapture`]
//! - The [`FrameSource`] seam the capture session is written against
//! - Configuration via [`CameraSettings`] and [`Resolution`]

mod capture;
mod device;
mod frame_utils;
mod source;
mod types;

pub use capture::CameraCapture;
pub use device::list_devices;
pub use frame_utils::{mirror_horizontal, overwrite_rgb};
pub use source::FrameSource;
pub use types::{CameraError, CameraInfo, CameraSettings, Frame, FrameFormat, Resolution};
