//! Pose Analytics Pipeline - Demo Runner
//!
//! Drives the engine over synthetic camera frames the way a capture loop
//! would, then dumps the final metrics. Useful for eyeballing timings and
//! the every-30th-frame diagnostics without a device attached.

use pose_pipeline::PoseEngine;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

const WIDTH: u32 = 640;
const HEIGHT: u32 = 480;
const FRAMES: u32 = 90;
const CONFIDENCE_THRESHOLD: f32 = 0.5;

fn init_logging() {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .with_target(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .expect("Failed to set tracing subscriber");
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_logging();

    info!("=== Pose Analytics Pipeline v{} ===", env!("CARGO_PKG_VERSION"));

    let engine = PoseEngine::new();
    engine.initialize();

    // Mid-gray YUV 4:2:0 buffer standing in for live camera frames
    let frame = vec![128u8; camera_frame::Yuv420Frame::expected_len(WIDTH, HEIGHT)];

    let mut visible_frames = 0u32;
    for _ in 0..FRAMES {
        let keypoints = engine.process_frame(&frame, WIDTH, HEIGHT, CONFIDENCE_THRESHOLD, 17)?;
        if !keypoints.is_empty() {
            visible_frames += 1;
        }
    }

    let perf = engine.performance_metrics()?;
    let posture = engine.posture_analysis()?;

    info!("processed {} frames, person visible in {}", FRAMES, visible_frames);
    info!("performance: {}", serde_json::to_string(&perf)?);
    info!("posture: {}", serde_json::to_string(&posture)?);

    Ok(())
}
