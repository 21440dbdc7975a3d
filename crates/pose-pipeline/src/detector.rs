//! Person detection stage

use std::thread;
use std::time::Duration;

use camera_frame::Yuv420Frame;

use crate::keypoint::BoundingRegion;

/// Detector class id for a person
pub const PERSON_CLASS_ID: u32 = 0;

/// Person detection strategy.
///
/// Implementations return zero or more candidate regions for the frame; the
/// pipeline acts on at most the highest-confidence one. A real model
/// backend plugs in behind this same contract.
pub trait PersonDetector {
    /// Detect person candidates in the frame
    fn detect(&mut self, frame: &Yuv420Frame<'_>) -> Vec<BoundingRegion>;
}

/// Simulated detector with an intermittent duty cycle.
///
/// Emits one region near the frame center on 7 of every 10 calls, with the
/// box size oscillating over 30-40% of frame width and 35-50% of frame
/// height and confidence in [0.85, 0.95). The remaining calls model true
/// negatives.
pub struct SimulatedPersonDetector {
    frames_seen: u64,
    latency: Duration,
}

impl SimulatedPersonDetector {
    pub fn new(latency: Duration) -> Self {
        Self {
            frames_seen: 0,
            latency,
        }
    }
}

impl PersonDetector for SimulatedPersonDetector {
    fn detect(&mut self, frame: &Yuv420Frame<'_>) -> Vec<BoundingRegion> {
        if !self.latency.is_zero() {
            thread::sleep(self.latency);
        }

        self.frames_seen += 1;
        let counter = self.frames_seen;

        // Person visible on 7 of every 10 frames
        if counter % 10 >= 7 {
            return Vec::new();
        }

        let width = frame.width() as f32;
        let height = frame.height() as f32;

        // Small positional jitter so the region never sits perfectly still
        let jitter_x = ((counter % 20) as f32 - 10.0) * width * 0.01;
        let jitter_y = ((counter % 30) as f32 - 15.0) * height * 0.005;

        let center_x = width * 0.5 + jitter_x;
        let center_y = height * 0.5 + jitter_y;
        let box_width = width * (0.30 + (counter % 10) as f32 * 0.01);
        let box_height = height * (0.35 + (counter % 15) as f32 * 0.01);

        vec![BoundingRegion {
            left: center_x - box_width * 0.5,
            top: center_y - box_height * 0.5,
            right: center_x + box_width * 0.5,
            bottom: center_y + box_height * 0.5,
            confidence: 0.85 + (counter % 20) as f32 * 0.005,
            class_id: PERSON_CLASS_ID,
        }]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_frame(buffer: &[u8]) -> Yuv420Frame<'_> {
        Yuv420Frame::new(buffer, 640, 480).unwrap()
    }

    #[test]
    fn test_duty_cycle_is_seven_of_ten() {
        let buffer = vec![0u8; Yuv420Frame::expected_len(640, 480)];
        let frame = test_frame(&buffer);
        let mut detector = SimulatedPersonDetector::new(Duration::ZERO);

        for call in 1..=30u64 {
            let detections = detector.detect(&frame);
            if call % 10 < 7 {
                assert_eq!(detections.len(), 1, "call {call} should detect");
            } else {
                assert!(detections.is_empty(), "call {call} should be a true negative");
            }
        }
    }

    #[test]
    fn test_regions_stay_inside_frame_with_valid_confidence() {
        let buffer = vec![0u8; Yuv420Frame::expected_len(640, 480)];
        let frame = test_frame(&buffer);
        let mut detector = SimulatedPersonDetector::new(Duration::ZERO);

        for _ in 0..120 {
            for region in detector.detect(&frame) {
                assert!(region.left >= 0.0 && region.right <= 640.0);
                assert!(region.top >= 0.0 && region.bottom <= 480.0);
                assert!(region.width() > 0.0 && region.height() > 0.0);
                assert!((0.85..0.95).contains(&region.confidence));
                assert_eq!(region.class_id, PERSON_CLASS_ID);
            }
        }
    }

    #[test]
    fn test_size_envelope() {
        let buffer = vec![0u8; Yuv420Frame::expected_len(1000, 1000)];
        let frame = Yuv420Frame::new(&buffer, 1000, 1000).unwrap();
        let mut detector = SimulatedPersonDetector::new(Duration::ZERO);

        for _ in 0..60 {
            for region in detector.detect(&frame) {
                assert!((300.0..400.0).contains(&region.width()));
                assert!((350.0..500.0).contains(&region.height()));
            }
        }
    }
}
