//! YUV 4:2:0 frame view

use crate::FrameError;

/// Borrowed view over a tightly packed single-plane YUV 4:2:0 buffer.
///
/// The buffer is owned by the caller and borrowed for the duration of one
/// pipeline invocation. Layout: full-resolution luma plane followed by the
/// subsampled chroma data, `width * height * 3 / 2` bytes in total.
#[derive(Debug, Clone, Copy)]
pub struct Yuv420Frame<'a> {
    data: &'a [u8],
    width: u32,
    height: u32,
}

impl<'a> Yuv420Frame<'a> {
    /// Minimum buffer length for a `width` x `height` YUV 4:2:0 frame
    pub fn expected_len(width: u32, height: u32) -> usize {
        width as usize * height as usize * 3 / 2
    }

    /// Wrap a caller-owned buffer, validating dimensions and length
    pub fn new(data: &'a [u8], width: u32, height: u32) -> Result<Self, FrameError> {
        if width == 0 || height == 0 {
            return Err(FrameError::ZeroDimension { width, height });
        }

        let expected = Self::expected_len(width, height);
        if data.len() < expected {
            return Err(FrameError::BufferTooShort {
                width,
                height,
                expected,
                actual: data.len(),
            });
        }

        Ok(Self {
            data,
            width,
            height,
        })
    }

    /// Frame width in pixels
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Frame height in pixels
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Full byte sequence, luma plane followed by chroma data
    pub fn bytes(&self) -> &'a [u8] {
        self.data
    }

    /// Full-resolution luma plane
    pub fn luma(&self) -> &'a [u8] {
        &self.data[..self.width as usize * self.height as usize]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_frame() {
        let data = vec![0u8; Yuv420Frame::expected_len(640, 480)];
        let frame = Yuv420Frame::new(&data, 640, 480).unwrap();
        assert_eq!(frame.width(), 640);
        assert_eq!(frame.height(), 480);
        assert_eq!(frame.luma().len(), 640 * 480);
        assert_eq!(frame.bytes().len(), 640 * 480 * 3 / 2);
    }

    #[test]
    fn test_zero_dimensions_rejected() {
        let data = vec![0u8; 16];
        assert_eq!(
            Yuv420Frame::new(&data, 0, 480).unwrap_err(),
            FrameError::ZeroDimension {
                width: 0,
                height: 480
            }
        );
        assert_eq!(
            Yuv420Frame::new(&data, 640, 0).unwrap_err(),
            FrameError::ZeroDimension {
                width: 640,
                height: 0
            }
        );
    }

    #[test]
    fn test_short_buffer_rejected() {
        let data = vec![0u8; 100];
        let err = Yuv420Frame::new(&data, 640, 480).unwrap_err();
        assert_eq!(
            err,
            FrameError::BufferTooShort {
                width: 640,
                height: 480,
                expected: 640 * 480 * 3 / 2,
                actual: 100,
            }
        );
    }

    #[test]
    fn test_oversized_buffer_accepted() {
        let data = vec![0u8; Yuv420Frame::expected_len(64, 48) + 32];
        assert!(Yuv420Frame::new(&data, 64, 48).is_ok());
    }
}
