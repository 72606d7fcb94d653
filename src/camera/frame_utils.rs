//! Frame buffer overwrite and transformation utilities.

use std::time::Instant;

use super::types::{Frame, FrameFormat};

/// Overwrite a frame in place with new RGB pixel data.
///
/// The frame's existing allocation is reused when its capacity suffices, so
/// steady-state capture does not allocate per frame. Dimensions and timestamp
/// are updated to describe the new contents.
pub fn overwrite_rgb(frame: &mut Frame, pixels: &[u8], width: u32, height: u32) {
    frame.data.clear();
    frame.data.extend_from_slice(pixels);
    frame.width = width;
    frame.height = height;
    frame.format = FrameFormat::Rgb;
    frame.timestamp = Instant::now();
}

/// Mirror a frame horizontally (flip left-right) for selfie mode.
pub fn mirror_horizontal(frame: &mut Frame) {
    let width = frame.width as usize;
    let height = frame.height as usize;
    let bpp = frame.bytes_per_pixel();

    for y in 0..height {
        let row_start = y * width * bpp;
        let row = &mut frame.data[row_start..row_start + width * bpp];

        // Swap pixels from left and right
        for x in 0..width / 2 {
            let left = x * bpp;
            let right = (width - 1 - x) * bpp;
            for i in 0..bpp {
                row.swap(left + i, right + i);
            }
        }
    }
}
