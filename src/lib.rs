//! contour-cam library crate.
//!
//! A minimal synchronous webcam-capture wrapper: open a camera device, pull
//! frames from it, hand each one to an external contour-detection
//! collaborator, and convert the result into a displayable bitmap.
//!
//! The pieces:
//! - [`camera`] — device enumeration, the camera handle, and the
//!   [`camera::FrameSource`] seam
//! - [`processor`] — the [`processor::FrameProcessor`] interface the external
//!   vision collaborator implements
//! - [`adapter`] — frame-to-bitmap conversion
//! - [`session`] — the per-frame preview/commit orchestration
//! - [`config`] / [`cli`] — TOML configuration and the command-line surface

pub mod adapter;
pub mod camera;
pub mod cli;
pub mod config;
pub mod processor;
pub mod session;
