//! Posture analysis
//!
//! Derives shoulder tilt, spine alignment, and head-forward offset from a
//! keypoint set, folds them into a 0-100 score with a qualitative band, and
//! tracks how long the current posture session has been continuous.

use std::time::Instant;

use serde::{Deserialize, Serialize};

use crate::keypoint::{BodyLandmark, Keypoint};
use crate::state::SessionState;

/// Shoulder tilt tolerated before penalties apply (degrees)
const SHOULDER_TOLERANCE_DEG: f32 = 5.0;
/// Spine deviation tolerated before penalties apply (degrees)
const SPINE_TOLERANCE_DEG: f32 = 10.0;
/// Head-forward ratio tolerated before penalties apply
const NECK_FORWARD_TOLERANCE: f32 = 0.2;

/// Per-term penalty caps; all three stacked can zero the score exactly
const SHOULDER_PENALTY_CAP: i32 = 30;
const SPINE_PENALTY_CAP: i32 = 40;
const NECK_PENALTY_CAP: i32 = 30;

/// Qualitative posture band
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PostureGrade {
    /// No successful analysis yet
    #[default]
    Unknown,
    Excellent,
    Good,
    Fair,
    Poor,
}

impl PostureGrade {
    /// Band for a 0-100 posture score
    pub fn from_score(score: i32) -> Self {
        if score >= 80 {
            PostureGrade::Excellent
        } else if score >= 60 {
            PostureGrade::Good
        } else if score >= 40 {
            PostureGrade::Fair
        } else {
            PostureGrade::Poor
        }
    }

    /// String representation
    pub fn as_str(&self) -> &'static str {
        match self {
            PostureGrade::Unknown => "Unknown",
            PostureGrade::Excellent => "Excellent",
            PostureGrade::Good => "Good",
            PostureGrade::Fair => "Fair",
            PostureGrade::Poor => "Poor",
        }
    }
}

/// Derived posture angles, score, and session duration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PostureReport {
    /// Shoulder line tilt from horizontal (degrees, signed)
    pub shoulder_angle_deg: f32,
    /// Spine deviation from vertical (degrees)
    pub spine_alignment_deg: f32,
    /// Horizontal nose offset from the shoulder midpoint (pixels)
    pub head_tilt_px: f32,
    /// Overall posture score (0-100)
    pub score: i32,
    /// Qualitative band for the score
    pub grade: PostureGrade,
    /// Continuous posture session length (seconds)
    pub duration_seconds: f32,
}

/// Posture analyzer
pub struct PostureAnalyzer {
    min_keypoints: usize,
}

impl PostureAnalyzer {
    pub fn new(min_keypoints: usize) -> Self {
        Self { min_keypoints }
    }

    /// Update the session's posture report from a full keypoint set.
    ///
    /// A set that is too small, or missing any of nose, shoulders, or hips,
    /// leaves the report at its previous value. Never fails loudly.
    pub fn analyze(&self, keypoints: &[Keypoint], session: &mut SessionState) {
        if keypoints.len() < self.min_keypoints {
            return;
        }

        let Some(nose) = find(keypoints, BodyLandmark::Nose) else {
            return;
        };
        let Some(left_shoulder) = find(keypoints, BodyLandmark::LeftShoulder) else {
            return;
        };
        let Some(right_shoulder) = find(keypoints, BodyLandmark::RightShoulder) else {
            return;
        };
        let Some(left_hip) = find(keypoints, BodyLandmark::LeftHip) else {
            return;
        };
        let Some(right_hip) = find(keypoints, BodyLandmark::RightHip) else {
            return;
        };

        // Shoulder line tilt; the sign tells which shoulder rides high
        let slope = (right_shoulder.y - left_shoulder.y)
            / (right_shoulder.x - left_shoulder.x).max(1.0);
        let shoulder_angle = slope.atan().to_degrees();

        let (shoulder_mid_x, shoulder_mid_y) = pose_geometry::midpoint(
            left_shoulder.x,
            left_shoulder.y,
            right_shoulder.x,
            right_shoulder.y,
        );
        let (hip_mid_x, hip_mid_y) =
            pose_geometry::midpoint(left_hip.x, left_hip.y, right_hip.x, right_hip.y);

        let spine_alignment = pose_geometry::vertical_deviation_deg(
            shoulder_mid_x,
            shoulder_mid_y,
            hip_mid_x,
            hip_mid_y,
        );

        let head_tilt = (nose.x - shoulder_mid_x).abs();

        let mut score = 100;

        if shoulder_angle.abs() > SHOULDER_TOLERANCE_DEG {
            let penalty = ((shoulder_angle.abs() - SHOULDER_TOLERANCE_DEG) * 2.0).floor() as i32;
            score -= penalty.min(SHOULDER_PENALTY_CAP);
        }

        if spine_alignment > SPINE_TOLERANCE_DEG {
            let penalty = ((spine_alignment - SPINE_TOLERANCE_DEG) * 3.0).floor() as i32;
            score -= penalty.min(SPINE_PENALTY_CAP);
        }

        let shoulder_width = (right_shoulder.x - left_shoulder.x).max(1.0);
        let neck_forward = head_tilt / shoulder_width;
        if neck_forward > NECK_FORWARD_TOLERANCE {
            let penalty = (neck_forward * 100.0).floor() as i32;
            score -= penalty.min(NECK_PENALTY_CAP);
        }

        let score = score.max(0);

        session.posture.shoulder_angle_deg = shoulder_angle;
        session.posture.spine_alignment_deg = spine_alignment;
        session.posture.head_tilt_px = head_tilt;
        session.posture.score = score;
        session.posture.grade = PostureGrade::from_score(score);

        // Arm the session clock on the first analysis after a detection gap
        let started = *session.posture_started_at.get_or_insert_with(Instant::now);
        session.posture.duration_seconds = started.elapsed().as_secs_f32();
    }
}

fn find(keypoints: &[Keypoint], landmark: BodyLandmark) -> Option<&Keypoint> {
    keypoints.iter().find(|kp| kp.landmark == landmark)
}
