//! Pipeline configuration

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Pipeline configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Minimum keypoint count before posture analysis runs
    pub min_analysis_keypoints: usize,

    /// Diagnostic log cadence in processed frames
    pub log_interval_frames: u32,

    /// Artificial latency of the simulated detection stage
    pub detector_latency: Duration,

    /// Artificial latency of the simulated estimation stage
    pub estimator_latency: Duration,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            min_analysis_keypoints: 10,
            log_interval_frames: 30,
            detector_latency: Duration::from_micros(1500),
            estimator_latency: Duration::from_micros(4500),
        }
    }
}

impl PipelineConfig {
    /// Config with no artificial stage latency, for tests and benchmarks
    pub fn instant() -> Self {
        Self {
            detector_latency: Duration::ZERO,
            estimator_latency: Duration::ZERO,
            ..Default::default()
        }
    }
}
