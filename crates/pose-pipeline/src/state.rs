//! Session state and performance tracking

use std::time::Instant;

use serde::{Deserialize, Serialize};

use crate::keypoint::Keypoint;
use crate::posture::PostureReport;

/// Per-stage latency and throughput counters, overwritten every frame
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PerformanceMetrics {
    /// Person detection stage latency (ms)
    pub detection_time_ms: f32,
    /// Keypoint estimation stage latency (ms)
    pub pose_time_ms: f32,
    /// Whole pipeline invocation latency (ms)
    pub total_time_ms: f32,
    /// Instantaneous frame rate from call spacing
    pub fps: f32,
    /// Frames processed since initialization
    pub frame_count: u32,
}

/// Mutable per-session pipeline state.
///
/// One instance exists per engine. Every field is overwritten, not grown,
/// by each invocation, so the session holds no history beyond the last
/// frame and the current posture session clock.
#[derive(Debug)]
pub struct SessionState {
    /// Rolling performance counters
    pub perf: PerformanceMetrics,
    /// Latest posture analysis
    pub posture: PostureReport,
    /// Threshold-filtered keypoints of the most recent successful frame
    pub last_pose: Vec<Keypoint>,
    /// Completion time of the previous invocation, for FPS
    pub(crate) last_frame_at: Instant,
    /// Start of the current continuous posture session; `None` while no
    /// person is detected
    pub(crate) posture_started_at: Option<Instant>,
}

impl SessionState {
    /// Fresh session with armed frame and posture clocks
    pub fn new() -> Self {
        let now = Instant::now();
        Self {
            perf: PerformanceMetrics::default(),
            posture: PostureReport::default(),
            last_pose: Vec::new(),
            last_frame_at: now,
            posture_started_at: Some(now),
        }
    }

    /// Forget the current posture session. The next successful analysis
    /// re-arms the clock and counts up from zero.
    pub fn reset_posture_session(&mut self) {
        self.posture_started_at = None;
        self.posture.duration_seconds = 0.0;
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new()
    }
}
