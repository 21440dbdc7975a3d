//! Keypoint estimation stage

use std::thread;
use std::time::Duration;

use camera_frame::Yuv420Frame;

use crate::keypoint::{BodyLandmark, BoundingRegion, Keypoint};

/// Keypoint estimation strategy.
///
/// Implementations return all 17 landmarks in [`BodyLandmark::ALL`] order
/// for the given person region; confidence filtering happens downstream in
/// the pipeline, never here. Callers must hand in a region with positive
/// extent.
pub trait KeypointEstimator {
    /// Estimate the full keypoint set for a person region
    fn estimate(&mut self, frame: &Yuv420Frame<'_>, region: &BoundingRegion) -> Vec<Keypoint>;
}

/// Simulated estimator deriving each landmark from fixed fractional offsets
/// of the region center and extent.
///
/// Two smooth oscillation terms keep repeated calls on a stationary region
/// from freezing in place: a slow sway moving the head and arms, and a
/// faster low-amplitude term moving the shoulder line like breathing.
/// Confidences are fixed per landmark, head and torso ranking above the
/// extremities.
pub struct SimulatedKeypointEstimator {
    frames_seen: u64,
    latency: Duration,
}

impl SimulatedKeypointEstimator {
    pub fn new(latency: Duration) -> Self {
        Self {
            frames_seen: 0,
            latency,
        }
    }
}

impl KeypointEstimator for SimulatedKeypointEstimator {
    fn estimate(&mut self, _frame: &Yuv420Frame<'_>, region: &BoundingRegion) -> Vec<Keypoint> {
        if !self.latency.is_zero() {
            thread::sleep(self.latency);
        }

        self.frames_seen += 1;

        let (cx, _) = region.center();
        let rw = region.width();
        let rh = region.height();
        let top = region.top;

        let sway = (self.frames_seen as f32 * 0.1).sin();
        let breathing = (self.frames_seen as f32 * 0.05).sin() * 0.01;

        let head_shift = sway * 0.02 * rw;
        let arm_shift = sway * 0.03;

        let mut keypoints = Vec::with_capacity(BodyLandmark::COUNT);

        // Head landmarks sit in the top portion of the region
        keypoints.push(Keypoint::new(cx + head_shift, top + rh * 0.15, 0.95, BodyLandmark::Nose));
        keypoints.push(Keypoint::new(cx - rw * 0.08 + head_shift, top + rh * 0.12, 0.88, BodyLandmark::LeftEye));
        keypoints.push(Keypoint::new(cx + rw * 0.08 + head_shift, top + rh * 0.12, 0.87, BodyLandmark::RightEye));
        keypoints.push(Keypoint::new(cx - rw * 0.12 + head_shift, top + rh * 0.10, 0.82, BodyLandmark::LeftEar));
        keypoints.push(Keypoint::new(cx + rw * 0.12 + head_shift, top + rh * 0.10, 0.81, BodyLandmark::RightEar));

        // Torso; the shoulder line carries the breathing motion
        let shoulder_y = top + rh * (0.30 + breathing);
        keypoints.push(Keypoint::new(cx - rw * 0.18, shoulder_y, 0.93, BodyLandmark::LeftShoulder));
        keypoints.push(Keypoint::new(cx + rw * 0.18, shoulder_y, 0.92, BodyLandmark::RightShoulder));
        keypoints.push(Keypoint::new(cx - rw * 0.25, top + rh * 0.48, 0.85, BodyLandmark::LeftElbow));
        keypoints.push(Keypoint::new(cx + rw * 0.25, top + rh * 0.48, 0.84, BodyLandmark::RightElbow));
        keypoints.push(Keypoint::new(cx - rw * (0.28 + arm_shift), top + rh * 0.62, 0.78, BodyLandmark::LeftWrist));
        keypoints.push(Keypoint::new(cx + rw * (0.28 - arm_shift), top + rh * 0.62, 0.77, BodyLandmark::RightWrist));

        // Hips stay put
        keypoints.push(Keypoint::new(cx - rw * 0.12, top + rh * 0.65, 0.90, BodyLandmark::LeftHip));
        keypoints.push(Keypoint::new(cx + rw * 0.12, top + rh * 0.65, 0.89, BodyLandmark::RightHip));

        // Legs in the bottom portion
        keypoints.push(Keypoint::new(cx - rw * 0.15, top + rh * 0.82, 0.75, BodyLandmark::LeftKnee));
        keypoints.push(Keypoint::new(cx + rw * 0.15, top + rh * 0.82, 0.74, BodyLandmark::RightKnee));
        keypoints.push(Keypoint::new(cx - rw * 0.12, top + rh * 0.95, 0.68, BodyLandmark::LeftAnkle));
        keypoints.push(Keypoint::new(cx + rw * 0.12, top + rh * 0.95, 0.67, BodyLandmark::RightAnkle));

        keypoints
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn person_region() -> BoundingRegion {
        BoundingRegion {
            left: 200.0,
            top: 100.0,
            right: 440.0,
            bottom: 420.0,
            confidence: 0.9,
            class_id: 0,
        }
    }

    fn estimate_once(estimator: &mut SimulatedKeypointEstimator) -> Vec<Keypoint> {
        let buffer = vec![0u8; Yuv420Frame::expected_len(640, 480)];
        let frame = Yuv420Frame::new(&buffer, 640, 480).unwrap();
        estimator.estimate(&frame, &person_region())
    }

    #[test]
    fn test_always_seventeen_in_stable_order() {
        let mut estimator = SimulatedKeypointEstimator::new(Duration::ZERO);
        for _ in 0..5 {
            let keypoints = estimate_once(&mut estimator);
            assert_eq!(keypoints.len(), BodyLandmark::COUNT);
            for (kp, landmark) in keypoints.iter().zip(BodyLandmark::ALL) {
                assert_eq!(kp.landmark, landmark);
            }
        }
    }

    #[test]
    fn test_positions_finite_and_near_region() {
        let mut estimator = SimulatedKeypointEstimator::new(Duration::ZERO);
        let region = person_region();
        for _ in 0..40 {
            for kp in estimate_once(&mut estimator) {
                assert!(kp.x.is_finite() && kp.y.is_finite());
                assert!(kp.x >= region.left && kp.x <= region.right);
                assert!(kp.y >= region.top && kp.y <= region.bottom);
            }
        }
    }

    #[test]
    fn test_confidences_fixed_per_landmark() {
        let mut estimator = SimulatedKeypointEstimator::new(Duration::ZERO);
        let first = estimate_once(&mut estimator);
        let second = estimate_once(&mut estimator);

        for (a, b) in first.iter().zip(&second) {
            assert_eq!(a.confidence, b.confidence);
            assert!(a.confidence > 0.0 && a.confidence <= 1.0);
        }

        // Reliability ranks by body part: nose highest, ankles lowest
        assert_eq!(first[0].confidence, 0.95);
        assert_eq!(first[15].confidence, 0.68);
        assert_eq!(first[16].confidence, 0.67);
        for kp in &first {
            assert!(kp.confidence >= 0.67);
        }
    }

    #[test]
    fn test_stationary_region_still_moves_slightly() {
        let mut estimator = SimulatedKeypointEstimator::new(Duration::ZERO);
        let first = estimate_once(&mut estimator);
        let second = estimate_once(&mut estimator);
        assert_ne!(first[0].x, second[0].x, "head sway should move the nose");
    }
}
