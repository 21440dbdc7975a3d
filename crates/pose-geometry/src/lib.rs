//! 2D Geometry Helpers
//!
//! Pure functions shared by the pose pipeline stages: distances, angles,
//! and midpoints over points in frame coordinates. No state, no allocation.

/// Euclidean distance between two points
pub fn distance(ax: f32, ay: f32, bx: f32, by: f32) -> f32 {
    let dx = bx - ax;
    let dy = by - ay;
    (dx * dx + dy * dy).sqrt()
}

/// Midpoint of two points
pub fn midpoint(ax: f32, ay: f32, bx: f32, by: f32) -> (f32, f32) {
    ((ax + bx) * 0.5, (ay + by) * 0.5)
}

/// Absolute angle at vertex `b` formed by the segments b->a and b->c, in
/// degrees.
///
/// Computed from the two-argument arctangent of determinant over dot
/// product, which stays well-defined for collinear inputs.
pub fn angle_deg(ax: f32, ay: f32, bx: f32, by: f32, cx: f32, cy: f32) -> f32 {
    let v1x = ax - bx;
    let v1y = ay - by;
    let v2x = cx - bx;
    let v2y = cy - by;

    let dot = v1x * v2x + v1y * v2y;
    let det = v1x * v2y - v1y * v2x;
    det.atan2(dot).to_degrees().abs()
}

/// Absolute deviation of the `top` -> `bottom` segment from vertical, in
/// degrees. A plumb segment yields 0, a horizontal one 90.
pub fn vertical_deviation_deg(top_x: f32, top_y: f32, bottom_x: f32, bottom_y: f32) -> f32 {
    (bottom_x - top_x)
        .atan2(bottom_y - top_y)
        .to_degrees()
        .abs()
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-4;

    #[test]
    fn test_distance() {
        assert!((distance(0.0, 0.0, 3.0, 4.0) - 5.0).abs() < EPS);
        assert_eq!(distance(2.0, 2.0, 2.0, 2.0), 0.0);
    }

    #[test]
    fn test_midpoint() {
        let (mx, my) = midpoint(0.0, 0.0, 4.0, 6.0);
        assert!((mx - 2.0).abs() < EPS);
        assert!((my - 3.0).abs() < EPS);
    }

    #[test]
    fn test_right_angle() {
        let angle = angle_deg(1.0, 0.0, 0.0, 0.0, 0.0, 1.0);
        assert!((angle - 90.0).abs() < EPS);
    }

    #[test]
    fn test_straight_angle() {
        let angle = angle_deg(-1.0, 0.0, 0.0, 0.0, 1.0, 0.0);
        assert!((angle - 180.0).abs() < EPS);
    }

    #[test]
    fn test_vertical_segment_has_no_deviation() {
        assert!(vertical_deviation_deg(5.0, 0.0, 5.0, 10.0).abs() < EPS);
    }

    #[test]
    fn test_horizontal_segment_deviates_fully() {
        let deviation = vertical_deviation_deg(0.0, 5.0, 10.0, 5.0);
        assert!((deviation - 90.0).abs() < EPS);
    }

    #[test]
    fn test_diagonal_deviation() {
        let deviation = vertical_deviation_deg(0.0, 0.0, 3.0, 3.0);
        assert!((deviation - 45.0).abs() < EPS);
    }
}
