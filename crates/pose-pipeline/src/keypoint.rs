//! Keypoint and detection region types (COCO-17 layout)

use serde::{Deserialize, Serialize};

/// Body landmark identities in COCO-17 order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BodyLandmark {
    Nose = 0,
    LeftEye = 1,
    RightEye = 2,
    LeftEar = 3,
    RightEar = 4,
    LeftShoulder = 5,
    RightShoulder = 6,
    LeftElbow = 7,
    RightElbow = 8,
    LeftWrist = 9,
    RightWrist = 10,
    LeftHip = 11,
    RightHip = 12,
    LeftKnee = 13,
    RightKnee = 14,
    LeftAnkle = 15,
    RightAnkle = 16,
}

impl BodyLandmark {
    /// Number of landmark identities
    pub const COUNT: usize = 17;

    /// All landmarks in estimator output order
    pub const ALL: [BodyLandmark; Self::COUNT] = [
        BodyLandmark::Nose,
        BodyLandmark::LeftEye,
        BodyLandmark::RightEye,
        BodyLandmark::LeftEar,
        BodyLandmark::RightEar,
        BodyLandmark::LeftShoulder,
        BodyLandmark::RightShoulder,
        BodyLandmark::LeftElbow,
        BodyLandmark::RightElbow,
        BodyLandmark::LeftWrist,
        BodyLandmark::RightWrist,
        BodyLandmark::LeftHip,
        BodyLandmark::RightHip,
        BodyLandmark::LeftKnee,
        BodyLandmark::RightKnee,
        BodyLandmark::LeftAnkle,
        BodyLandmark::RightAnkle,
    ];

    /// Numeric id used across the binding boundary
    pub fn index(self) -> i32 {
        self as i32
    }

    /// Landmark for a boundary id, if valid
    pub fn from_index(index: i32) -> Option<Self> {
        Self::ALL.get(usize::try_from(index).ok()?).copied()
    }

    /// Snake-case landmark name
    pub fn name(self) -> &'static str {
        match self {
            BodyLandmark::Nose => "nose",
            BodyLandmark::LeftEye => "left_eye",
            BodyLandmark::RightEye => "right_eye",
            BodyLandmark::LeftEar => "left_ear",
            BodyLandmark::RightEar => "right_ear",
            BodyLandmark::LeftShoulder => "left_shoulder",
            BodyLandmark::RightShoulder => "right_shoulder",
            BodyLandmark::LeftElbow => "left_elbow",
            BodyLandmark::RightElbow => "right_elbow",
            BodyLandmark::LeftWrist => "left_wrist",
            BodyLandmark::RightWrist => "right_wrist",
            BodyLandmark::LeftHip => "left_hip",
            BodyLandmark::RightHip => "right_hip",
            BodyLandmark::LeftKnee => "left_knee",
            BodyLandmark::RightKnee => "right_knee",
            BodyLandmark::LeftAnkle => "left_ankle",
            BodyLandmark::RightAnkle => "right_ankle",
        }
    }
}

/// A single estimated body keypoint in frame coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Keypoint {
    pub x: f32,
    pub y: f32,
    /// Estimation confidence (0-1)
    pub confidence: f32,
    /// Landmark identity
    pub landmark: BodyLandmark,
}

impl Keypoint {
    /// New keypoint; confidence is clamped into [0, 1]
    pub fn new(x: f32, y: f32, confidence: f32, landmark: BodyLandmark) -> Self {
        Self {
            x,
            y,
            confidence: confidence.clamp(0.0, 1.0),
            landmark,
        }
    }
}

/// Axis-aligned region believed to bound a detected person
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingRegion {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
    /// Detection confidence (0-1)
    pub confidence: f32,
    /// Detector class (0 = person)
    pub class_id: u32,
}

impl BoundingRegion {
    pub fn width(&self) -> f32 {
        self.right - self.left
    }

    pub fn height(&self) -> f32 {
        self.bottom - self.top
    }

    /// Region center
    pub fn center(&self) -> (f32, f32) {
        (
            (self.left + self.right) * 0.5,
            (self.top + self.bottom) * 0.5,
        )
    }

    /// Clamp the region to frame bounds; `None` if nothing with positive
    /// extent remains
    pub fn clamped(&self, frame_width: u32, frame_height: u32) -> Option<BoundingRegion> {
        let w = frame_width as f32;
        let h = frame_height as f32;

        let left = self.left.clamp(0.0, w);
        let top = self.top.clamp(0.0, h);
        let right = self.right.clamp(0.0, w);
        let bottom = self.bottom.clamp(0.0, h);

        if right - left <= 0.0 || bottom - top <= 0.0 {
            return None;
        }

        Some(BoundingRegion {
            left,
            top,
            right,
            bottom,
            ..*self
        })
    }
}
