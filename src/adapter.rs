//! Frame-to-bitmap adapter.
//!
//! Converts the raw capture representation ([`Frame`]) into a display-ready
//! [`image::RgbImage`]. Each adapter wraps exactly one frame buffer; the
//! session owns two of them, one for the live preview and one for the fresh
//! snapshot taken on a capture request.

use image::RgbImage;

use crate::camera::Frame;

/// Errors that can occur converting a frame to a display image.
#[derive(Debug, thiserror::Error)]
pub enum AdapterError {
    /// The frame has not been filled by a read yet
    #[error("cannot convert an empty frame to a display image")]
    EmptyFrame,
    /// The frame's pixel data does not match its stated dimensions
    #[error("frame data length {len} does not match {width}x{height} RGB")]
    DimensionMismatch { len: usize, width: u32, height: u32 },
}

/// Owns one reusable frame buffer and converts it to a display bitmap.
///
/// The conversion is pure; the only side effect is an internal cache of the
/// last converted image, invalidated whenever the frame is borrowed mutably.
#[derive(Debug, Default)]
pub struct FrameAdapter {
    frame: Frame,
    cached: Option<RgbImage>,
}

impl FrameAdapter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read access to the wrapped frame.
    pub fn frame(&self) -> &Frame {
        &self.frame
    }

    /// Mutable access to the wrapped frame, for overwriting reads and
    /// in-place processing. Invalidates the cached conversion.
    pub fn frame_mut(&mut self) -> &mut Frame {
        self.cached = None;
        &mut self.frame
    }

    /// Convert the wrapped frame to a display image without caching.
    pub fn to_display_image(&self) -> Result<RgbImage, AdapterError> {
        convert(&self.frame)
    }

    /// Convert the wrapped frame to a display image, caching the result.
    ///
    /// Repeated calls between frame mutations return the cached image.
    pub fn display_image(&mut self) -> Result<&RgbImage, AdapterError> {
        if self.cached.is_none() {
            self.cached = Some(convert(&self.frame)?);
        }
        Ok(self.cached.as_ref().expect("cache was just filled"))
    }
}

fn convert(frame: &Frame) -> Result<RgbImage, AdapterError> {
    if frame.is_empty() {
        return Err(AdapterError::EmptyFrame);
    }

    let expected = frame.width as usize * frame.height as usize * frame.bytes_per_pixel();
    if frame.data.len() != expected {
        return Err(AdapterError::DimensionMismatch {
            len: frame.data.len(),
            width: frame.width,
            height: frame.height,
        });
    }

    RgbImage::from_raw(frame.width, frame.height, frame.data.clone()).ok_or(
        AdapterError::DimensionMismatch {
            len: frame.data.len(),
            width: frame.width,
            height: frame.height,
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::camera::overwrite_rgb;

    #[test]
    fn test_convert_empty_frame_errors() {
        let adapter = FrameAdapter::new();
        match adapter.to_display_image() {
            Err(AdapterError::EmptyFrame) => {}
            other => panic!("Expected EmptyFrame, got {:?}", other),
        }
    }

    #[test]
    fn test_convert_dimension_mismatch_errors() {
        let mut adapter = FrameAdapter::new();
        overwrite_rgb(adapter.frame_mut(), &[1, 2, 3], 2, 2); // 2x2 needs 12 bytes
        match adapter.to_display_image() {
            Err(AdapterError::DimensionMismatch { len: 3, width: 2, height: 2 }) => {}
            other => panic!("Expected DimensionMismatch, got {:?}", other),
        }
    }

    #[test]
    fn test_convert_produces_matching_bitmap() {
        let mut adapter = FrameAdapter::new();
        overwrite_rgb(adapter.frame_mut(), &[10, 20, 30, 40, 50, 60], 2, 1);

        let bitmap = adapter.to_display_image().unwrap();
        assert_eq!(bitmap.width(), 2);
        assert_eq!(bitmap.height(), 1);
        assert_eq!(bitmap.get_pixel(0, 0).0, [10, 20, 30]);
        assert_eq!(bitmap.get_pixel(1, 0).0, [40, 50, 60]);
    }

    #[test]
    fn test_display_image_caches_until_mutation() {
        let mut adapter = FrameAdapter::new();
        overwrite_rgb(adapter.frame_mut(), &[1, 1, 1], 1, 1);

        let first = adapter.display_image().unwrap().clone();
        // No mutation in between: cached image is returned
        let second = adapter.display_image().unwrap().clone();
        assert_eq!(first, second);

        // Mutating the frame invalidates the cache
        overwrite_rgb(adapter.frame_mut(), &[9, 9, 9], 1, 1);
        let third = adapter.display_image().unwrap();
        assert_eq!(third.get_pixel(0, 0).0, [9, 9, 9]);
    }
}
