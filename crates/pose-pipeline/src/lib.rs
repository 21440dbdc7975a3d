//! Human Pose Analytics Pipeline
//!
//! Per-frame posture analytics for a mobile capture loop:
//! - Person detection (single best region per frame)
//! - COCO-17 keypoint estimation on the detected region
//! - Posture scoring from shoulder tilt, spine alignment, and head offset
//! - Latency / FPS instrumentation and posture-session tracking
//!
//! Detection and estimation are pluggable strategies. The bundled
//! simulated strategies stand in for real model inference behind the same
//! contracts a production backend would implement.

pub mod config;
pub mod detector;
pub mod engine;
pub mod estimator;
pub mod keypoint;
pub mod posture;
pub mod state;

pub use config::PipelineConfig;
pub use detector::{PersonDetector, SimulatedPersonDetector};
pub use engine::PoseEngine;
pub use estimator::{KeypointEstimator, SimulatedKeypointEstimator};
pub use keypoint::{BodyLandmark, BoundingRegion, Keypoint};
pub use posture::{PostureAnalyzer, PostureGrade, PostureReport};
pub use state::{PerformanceMetrics, SessionState};

use std::time::Instant;

use camera_frame::Yuv420Frame;
use thiserror::Error;
use tracing::info;

/// Pipeline error types
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("pipeline not initialized")]
    NotInitialized,

    #[error("invalid frame: {0}")]
    InvalidFrame(#[from] camera_frame::FrameError),

    #[error("detection region degenerated to {width}x{height}")]
    DegenerateRegion { width: f32, height: f32 },
}

/// Per-frame pose pipeline: detection, estimation, posture analysis.
///
/// The pipeline owns the stage strategies; session state is passed in
/// explicitly so callers can run independent sessions side by side. All
/// stage timing lands in the session's [`PerformanceMetrics`].
pub struct PosePipeline {
    config: PipelineConfig,
    detector: Box<dyn PersonDetector + Send>,
    estimator: Box<dyn KeypointEstimator + Send>,
    analyzer: PostureAnalyzer,
}

impl PosePipeline {
    /// Pipeline with the simulated detection and estimation stages
    pub fn new(config: PipelineConfig) -> Self {
        let detector = Box::new(SimulatedPersonDetector::new(config.detector_latency));
        let estimator = Box::new(SimulatedKeypointEstimator::new(config.estimator_latency));
        Self::with_stages(config, detector, estimator)
    }

    /// Pipeline with caller-provided stage strategies
    pub fn with_stages(
        config: PipelineConfig,
        detector: Box<dyn PersonDetector + Send>,
        estimator: Box<dyn KeypointEstimator + Send>,
    ) -> Self {
        Self {
            analyzer: PostureAnalyzer::new(config.min_analysis_keypoints),
            config,
            detector,
            estimator,
        }
    }

    /// Run the three-stage pipeline on one frame and update the session.
    ///
    /// Returns the keypoints passing `confidence_threshold`, at most
    /// `max_keypoints` of them, in landmark order. An empty result means no
    /// person was detected this frame; the last pose is dropped and the
    /// posture session resets so the next detection counts up from zero.
    pub fn process_frame(
        &mut self,
        session: &mut SessionState,
        frame: &Yuv420Frame<'_>,
        confidence_threshold: f32,
        max_keypoints: usize,
    ) -> Result<Vec<Keypoint>, PipelineError> {
        let frame_start = Instant::now();

        let detect_start = Instant::now();
        let detections = self.detector.detect(frame);
        session.perf.detection_time_ms = detect_start.elapsed().as_secs_f32() * 1000.0;

        // At most one candidate is acted on: the most confident
        let Some(best) = detections
            .into_iter()
            .reduce(|best, det| if det.confidence > best.confidence { det } else { best })
        else {
            // Person lost: drop the stale pose and re-arm the posture timer
            session.last_pose.clear();
            session.reset_posture_session();
            session.perf.pose_time_ms = 0.0;
            return Ok(Vec::new());
        };

        // Guard the fractional-offset math in the estimator
        let region = best.clamped(frame.width(), frame.height()).ok_or(
            PipelineError::DegenerateRegion {
                width: best.width(),
                height: best.height(),
            },
        )?;

        let estimate_start = Instant::now();
        let keypoints = self.estimator.estimate(frame, &region);
        session.perf.pose_time_ms = estimate_start.elapsed().as_secs_f32() * 1000.0;

        let filtered: Vec<Keypoint> = keypoints
            .iter()
            .filter(|kp| kp.confidence >= confidence_threshold)
            .take(max_keypoints)
            .copied()
            .collect();

        let frame_end = Instant::now();
        session.perf.total_time_ms = (frame_end - frame_start).as_secs_f32() * 1000.0;
        session.perf.frame_count += 1;

        let since_last = (frame_end - session.last_frame_at).as_secs_f32();
        if since_last > 0.0 {
            session.perf.fps = 1.0 / since_last;
        }
        session.last_frame_at = frame_end;

        // Posture scoring sees the full estimate, never the caller's filter
        self.analyzer.analyze(&keypoints, session);
        session.last_pose = filtered.clone();

        if self.config.log_interval_frames > 0
            && session.perf.frame_count % self.config.log_interval_frames == 0
        {
            info!(
                "performance: detection={:.1}ms pose={:.1}ms total={:.1}ms fps={:.1} posture={}({})",
                session.perf.detection_time_ms,
                session.perf.pose_time_ms,
                session.perf.total_time_ms,
                session.perf.fps,
                session.posture.grade.as_str(),
                session.posture.score,
            );
        }

        Ok(filtered)
    }
}
