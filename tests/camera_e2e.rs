//! End-to-end tests for camera capture functionality.
//!
//! These tests exercise the real device path and skip gracefully on
//! machines without a camera:
//! - Device enumeration works (or returns an empty list)
//! - The camera opens, produces frames, and releases idempotently
//! - A full session cycle returns a display bitmap

use contour_cam::camera::{list_devices, CameraCapture, CameraSettings, Frame};
use contour_cam::processor::PassthroughProcessor;
use contour_cam::session::CaptureSession;

/// Test that list_devices returns devices (or empty list) without error.
#[test]
fn test_list_devices_succeeds() {
    let result = list_devices();
    assert!(
        result.is_ok(),
        "list_devices should not error: {:?}",
        result.err()
    );

    let devices = result.unwrap();
    println!("Found {} camera device(s)", devices.len());
    for device in &devices {
        println!("  {}", device);
    }
}

/// Test that the camera opens, reads frames into a reused buffer, and
/// releases without error. Requires a camera to be available.
#[test]
fn test_camera_reads_and_releases() {
    let devices = list_devices().expect("Should be able to list devices");

    if devices.is_empty() {
        println!("SKIP: No cameras available for this test");
        return;
    }

    let settings = CameraSettings::default();
    let mut camera = match CameraCapture::open(settings) {
        Ok(camera) => camera,
        Err(e) => {
            // Device exists but is busy or blocked; nothing to assert against
            println!("SKIP: Camera did not open: {}", e);
            return;
        }
    };

    assert!(camera.is_open());
    let resolution = camera.actual_resolution();
    println!(
        "Camera opened at {}x{} @ {} fps",
        resolution.width,
        resolution.height,
        camera.actual_fps()
    );

    let mut frame = Frame::empty();
    for _ in 0..3 {
        camera
            .read_frame(&mut frame)
            .expect("open camera should produce frames");
        assert!(!frame.is_empty());
        assert_eq!(
            frame.data.len(),
            frame.width as usize * frame.height as usize * frame.bytes_per_pixel()
        );
    }

    // Release is idempotent
    camera.release();
    camera.release();
    assert!(!camera.is_open());
}

/// Test a full session cycle against real hardware.
#[test]
fn test_session_produces_bitmap() {
    let devices = list_devices().expect("Should be able to list devices");

    if devices.is_empty() {
        println!("SKIP: No cameras available for this test");
        return;
    }

    let camera = match CameraCapture::open(CameraSettings::default()) {
        Ok(camera) => camera,
        Err(e) => {
            println!("SKIP: Camera did not open: {}", e);
            return;
        }
    };

    let mut session = CaptureSession::new(camera, PassthroughProcessor::new());

    let bitmap = session.get_one_frame().expect("cycle should succeed");
    assert!(bitmap.width() > 0 && bitmap.height() > 0);

    session.request_capture();
    session.get_one_frame().expect("capture cycle should succeed");
    assert!(session.snapshot().is_some());
    assert!(!session.capture_pending());

    session.release();
    assert!(!session.is_open());
}
