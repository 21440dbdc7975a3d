//! Camera Frame Handling
//!
//! Borrowed views over caller-owned camera buffers for the pose pipeline.
//! The capture layer delivers tightly packed single-plane YUV 4:2:0 frames;
//! this crate validates their geometry and exposes plane access without
//! copying or decoding.

pub mod frame;

pub use frame::Yuv420Frame;

use thiserror::Error;

/// Frame error types
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameError {
    #[error("frame dimensions must be non-zero, got {width}x{height}")]
    ZeroDimension { width: u32, height: u32 },

    #[error("buffer too short for {width}x{height} YUV 4:2:0: need {expected} bytes, got {actual}")]
    BufferTooShort {
        width: u32,
        height: u32,
        expected: usize,
        actual: usize,
    },
}
