//! Camera capture handle and public API.

use nokhwa::pixel_format::RgbFormat;
use nokhwa::utils::{
    CameraFormat, CameraIndex, FrameFormat as NokhwaFrameFormat, RequestedFormat,
    RequestedFormatType,
};
use nokhwa::Camera;

use super::device::list_devices;
use super::frame_utils::{mirror_horizontal, overwrite_rgb};
use super::source::FrameSource;
use super::types::{CameraError, CameraSettings, Frame, Resolution};

/// Camera capture handle.
///
/// Wraps a nokhwa Camera opened synchronously at construction time. All
/// reads happen on the calling thread: [`CameraCapture::read_frame`] blocks
/// until the device produces the next frame and overwrites the given buffer
/// in place. The device is released by [`CameraCapture::release`] (idempotent)
/// or on drop, whichever comes first.
pub struct CameraCapture {
    /// Open device handle; `None` once released
    camera: Option<Camera>,
    /// Settings the camera was opened with
    settings: CameraSettings,
    /// Resolution the device actually negotiated
    actual_resolution: Resolution,
    /// Frame rate the device actually negotiated
    actual_fps: u32,
}

impl std::fmt::Debug for CameraCapture {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CameraCapture")
            .field("settings", &self.settings)
            .field("is_open", &self.is_open())
            .finish_non_exhaustive()
    }
}

impl CameraCapture {
    /// Open a camera with the specified settings and start its stream.
    ///
    /// Opening is a startup precondition: there is no retry. The returned
    /// error names the specific failure so the caller can decide whether to
    /// terminate, pick a different index, or prompt the user.
    ///
    /// # Errors
    /// * `CameraError::DeviceNotFound` - If the device index doesn't exist
    /// * `CameraError::PermissionDenied` - If camera access is denied (macOS)
    /// * `CameraError::OpenFailed` - If the camera fails to open
    /// * `CameraError::StreamFailed` - If the stream fails to start
    pub fn open(settings: CameraSettings) -> Result<Self, CameraError> {
        // First check if the device exists
        let devices = list_devices()?;
        if !devices.iter().any(|d| d.index == settings.device_index) {
            return Err(CameraError::DeviceNotFound(settings.device_index));
        }

        let index = CameraIndex::Index(settings.device_index);
        let mut camera = open_camera_with_fallback(&index, &settings)?;

        if let Err(e) = camera.open_stream() {
            return Err(CameraError::StreamFailed(e.to_string()));
        }

        let res = camera.resolution();
        let actual_resolution = Resolution {
            width: res.width(),
            height: res.height(),
        };
        let actual_fps = camera.frame_rate();

        log::info!(
            "Camera {} opened at {}x{} @ {} fps",
            settings.device_index,
            actual_resolution.width,
            actual_resolution.height,
            actual_fps
        );

        Ok(Self {
            camera: Some(camera),
            settings,
            actual_resolution,
            actual_fps,
        })
    }

    /// Get the settings the camera was opened with.
    pub fn settings(&self) -> &CameraSettings {
        &self.settings
    }

    /// Get the resolution the device actually negotiated.
    ///
    /// This may differ from the requested resolution if the camera
    /// doesn't support it exactly.
    pub fn actual_resolution(&self) -> Resolution {
        self.actual_resolution
    }

    /// Get the frame rate the device actually negotiated.
    pub fn actual_fps(&self) -> u32 {
        self.actual_fps
    }

    /// Block until the next frame is available and overwrite `frame` with it.
    ///
    /// The frame's native format (MJPEG, YUYV, NV12, ...) is decoded to RGB
    /// and written into the buffer in place, reusing its allocation.
    /// Horizontal mirroring is applied when enabled in the settings.
    ///
    /// # Errors
    /// * `CameraError::Closed` - If the handle was already released
    /// * `CameraError::ReadFailed` - If the device read or decode fails
    ///   (e.g. the camera was disconnected mid-session)
    pub fn read_frame(&mut self, frame: &mut Frame) -> Result<(), CameraError> {
        let camera = self.camera.as_mut().ok_or(CameraError::Closed)?;

        let buffer = camera
            .frame()
            .map_err(|e| CameraError::ReadFailed(e.to_string()))?;
        let decoded = buffer
            .decode_image::<RgbFormat>()
            .map_err(|e| CameraError::ReadFailed(e.to_string()))?;
        let resolution = buffer.resolution();

        overwrite_rgb(frame, decoded.as_raw(), resolution.width(), resolution.height());

        if self.settings.mirror {
            mirror_horizontal(frame);
        }

        Ok(())
    }

    /// Release the camera device.
    ///
    /// Idempotent: safe to call when already released. Also runs on drop,
    /// so the device is released exactly once on every exit path.
    pub fn release(&mut self) {
        if let Some(mut camera) = self.camera.take() {
            if let Err(e) = camera.stop_stream() {
                log::warn!("Failed to stop camera stream cleanly: {}", e);
            }
            log::info!("Camera {} released", self.settings.device_index);
        }
    }

    /// Whether the handle still holds an open device.
    pub fn is_open(&self) -> bool {
        self.camera.is_some()
    }
}

impl FrameSource for CameraCapture {
    fn read_frame(&mut self, frame: &mut Frame) -> Result<(), CameraError> {
        CameraCapture::read_frame(self, frame)
    }

    fn release(&mut self) {
        CameraCapture::release(self);
    }

    fn is_open(&self) -> bool {
        CameraCapture::is_open(self)
    }
}

impl Drop for CameraCapture {
    fn drop(&mut self) {
        self.release();
    }
}

/// Try to open a camera with multiple format fallback strategies.
fn open_camera_with_fallback(
    index: &CameraIndex,
    settings: &CameraSettings,
) -> Result<Camera, CameraError> {
    // Try multiple format strategies in order of preference:
    // 1. Closest match with NV12 (common on macOS)
    // 2. Closest match with MJPEG (widely supported)
    // 3. Highest resolution available (let camera decide format)
    let format_attempts: Vec<RequestedFormat> = vec![
        RequestedFormat::new::<RgbFormat>(RequestedFormatType::Closest(CameraFormat::new(
            nokhwa::utils::Resolution::new(settings.resolution.width, settings.resolution.height),
            NokhwaFrameFormat::NV12,
            settings.fps,
        ))),
        RequestedFormat::new::<RgbFormat>(RequestedFormatType::Closest(CameraFormat::new(
            nokhwa::utils::Resolution::new(settings.resolution.width, settings.resolution.height),
            NokhwaFrameFormat::MJPEG,
            settings.fps,
        ))),
        RequestedFormat::new::<RgbFormat>(RequestedFormatType::AbsoluteHighestResolution),
    ];

    let mut last_error = None;

    for requested in format_attempts {
        match Camera::new(index.clone(), requested) {
            Ok(cam) => return Ok(cam),
            Err(e) => {
                last_error = Some(e);
                continue;
            }
        }
    }

    let e = last_error.expect("format_attempts is non-empty");
    let msg = e.to_string().to_lowercase();
    if msg.contains("permission")
        || msg.contains("denied")
        || msg.contains("authorization")
        || msg.contains("access")
    {
        Err(CameraError::PermissionDenied)
    } else {
        Err(CameraError::OpenFailed(e.to_string()))
    }
}
