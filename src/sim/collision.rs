//! Head-to-target capture test

use glam::Vec2;

/// Result of a capture check
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CaptureResult {
    /// Head is strictly inside the capture radius
    pub hit: bool,
    /// Euclidean distance head to target base position
    pub distance: f32,
}

/// Check whether the head captures a target at `target`
pub fn check_capture(head: Vec2, target: Vec2, radius: f32) -> CaptureResult {
    let distance = head.distance(target);
    CaptureResult {
        hit: distance < radius,
        distance,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capture_inside() {
        let result = check_capture(Vec2::new(10.0, 0.0), Vec2::ZERO, 40.0);
        assert!(result.hit);
        assert_eq!(result.distance, 10.0);
    }

    #[test]
    fn test_capture_boundary_is_exclusive() {
        assert!(!check_capture(Vec2::new(40.0, 0.0), Vec2::ZERO, 40.0).hit);
        assert!(check_capture(Vec2::new(39.99, 0.0), Vec2::ZERO, 40.0).hit);
    }

    #[test]
    fn test_capture_miss() {
        let result = check_capture(Vec2::new(30.0, 40.0), Vec2::ZERO, 40.0);
        assert!(!result.hit);
        assert_eq!(result.distance, 50.0);
    }
}
