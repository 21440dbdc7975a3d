//! Session engine: the mutual-exclusion boundary around one pipeline
//!
//! This is the surface a binding layer (JNI, FFI, IPC) calls into. One
//! lock serializes every operation over the whole session, so exactly one
//! frame is in flight at a time and reads always observe the state left by
//! the previous serialized call.

use std::sync::{Mutex, MutexGuard, PoisonError};

use camera_frame::Yuv420Frame;
use tracing::info;

use crate::keypoint::Keypoint;
use crate::posture::{PostureGrade, PostureReport};
use crate::state::{PerformanceMetrics, SessionState};
use crate::{PipelineConfig, PipelineError, PosePipeline};

struct EngineInner {
    pipeline: PosePipeline,
    session: SessionState,
}

/// One pose pipeline plus its session behind a single exclusive lock.
///
/// The engine starts uninitialized; every operation except
/// [`initialize`](Self::initialize) fails fast with
/// [`PipelineError::NotInitialized`] until then. Multiple independent
/// engines can coexist, one per capture source.
pub struct PoseEngine {
    config: PipelineConfig,
    inner: Mutex<Option<EngineInner>>,
}

impl PoseEngine {
    /// Engine with default configuration, not yet initialized
    pub fn new() -> Self {
        Self::with_config(PipelineConfig::default())
    }

    /// Engine with custom configuration, not yet initialized
    pub fn with_config(config: PipelineConfig) -> Self {
        Self {
            config,
            inner: Mutex::new(None),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Option<EngineInner>> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Set up the session and arm its clocks. Idempotent: calling again
    /// while initialized is a success no-op.
    pub fn initialize(&self) -> bool {
        let mut inner = self.lock();
        if inner.is_none() {
            *inner = Some(EngineInner {
                pipeline: PosePipeline::new(self.config.clone()),
                session: SessionState::new(),
            });
            info!("pose engine initialized with simulated detection and estimation stages");
        }
        true
    }

    /// Whether [`initialize`](Self::initialize) has been called
    pub fn is_available(&self) -> bool {
        self.lock().is_some()
    }

    /// Validate and process one frame, returning the filtered keypoints.
    ///
    /// The buffer is validated before any session state is touched, so a
    /// malformed frame never mutates the session. An empty result means no
    /// person was detected (a first-class outcome, not an error).
    pub fn process_frame(
        &self,
        data: &[u8],
        width: u32,
        height: u32,
        confidence_threshold: f32,
        max_keypoints: usize,
    ) -> Result<Vec<Keypoint>, PipelineError> {
        let frame = Yuv420Frame::new(data, width, height)?;

        let mut inner = self.lock();
        let inner = inner.as_mut().ok_or(PipelineError::NotInitialized)?;
        inner
            .pipeline
            .process_frame(&mut inner.session, &frame, confidence_threshold, max_keypoints)
    }

    /// Binding-layer form of [`process_frame`](Self::process_frame): fill
    /// caller-provided parallel buffers and return the count written.
    ///
    /// Capacity is the shortest of the four buffers. Entries past the
    /// returned count are left untouched, so callers reusing buffers must
    /// consume only `count` entries.
    pub fn run_pipeline(
        &self,
        data: &[u8],
        width: u32,
        height: u32,
        confidence_threshold: f32,
        out_ids: &mut [i32],
        out_x: &mut [f32],
        out_y: &mut [f32],
        out_scores: &mut [f32],
    ) -> Result<usize, PipelineError> {
        let capacity = out_ids
            .len()
            .min(out_x.len())
            .min(out_y.len())
            .min(out_scores.len());

        let keypoints = self.process_frame(data, width, height, confidence_threshold, capacity)?;
        for (i, kp) in keypoints.iter().enumerate() {
            out_ids[i] = kp.landmark.index();
            out_x[i] = kp.x;
            out_y[i] = kp.y;
            out_scores[i] = kp.confidence;
        }

        Ok(keypoints.len())
    }

    /// Snapshot of the latency and throughput counters
    pub fn performance_metrics(&self) -> Result<PerformanceMetrics, PipelineError> {
        let inner = self.lock();
        let inner = inner.as_ref().ok_or(PipelineError::NotInitialized)?;
        Ok(inner.session.perf.clone())
    }

    /// Snapshot of the latest posture analysis
    pub fn posture_analysis(&self) -> Result<PostureReport, PipelineError> {
        let inner = self.lock();
        let inner = inner.as_ref().ok_or(PipelineError::NotInitialized)?;
        Ok(inner.session.posture.clone())
    }

    /// Current posture band; `Unknown` until the first successful analysis
    pub fn posture_grade(&self) -> Result<PostureGrade, PipelineError> {
        let inner = self.lock();
        let inner = inner.as_ref().ok_or(PipelineError::NotInitialized)?;
        Ok(inner.session.posture.grade)
    }
}

impl Default for PoseEngine {
    fn default() -> Self {
        Self::new()
    }
}
