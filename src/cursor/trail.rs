//! Fading pointer trail
//!
//! Sampled on a fixed interval, not per frame, so the fade speed does not
//! depend on the host's refresh rate.

use glam::Vec2;

use crate::consts::TRAIL_INTERVAL_MS;

/// Maximum points kept
pub const MAX_TRAIL_POINTS: usize = 30;
/// Pointer travel that records a new point (px)
const MIN_STEP: f32 = 5.0;
/// Catch-up limit after a stall
const MAX_SAMPLES_PER_UPDATE: u32 = 4;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrailPoint {
    /// Screen position (px)
    pub pos: Vec2,
    /// 0 fresh, dropped at 1
    pub age: f32,
}

/// Recent pointer positions, newest first
#[derive(Debug, Clone, Default)]
pub struct Trail {
    pub points: Vec<TrailPoint>,
    last: Vec2,
    accumulator_ms: f64,
}

impl Trail {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take one sample of the pointer
    pub fn sample(&mut self, pointer: Vec2) {
        if pointer.distance(self.last) > MIN_STEP {
            self.points.insert(0, TrailPoint { pos: pointer, age: 0.0 });
            self.points.truncate(MAX_TRAIL_POINTS);
            for (i, point) in self.points.iter_mut().enumerate() {
                point.age = (point.age + 0.05 + i as f32 * 0.02).min(1.0);
            }
            self.last = pointer;
        } else {
            for point in &mut self.points {
                point.age = (point.age + 0.03).min(1.0);
            }
        }
        self.points.retain(|p| p.age < 1.0);
    }

    /// Run as many samples as `elapsed_ms` covers
    pub fn update(&mut self, pointer: Vec2, elapsed_ms: f64) {
        self.accumulator_ms += elapsed_ms;
        let mut samples = 0;
        while self.accumulator_ms >= TRAIL_INTERVAL_MS && samples < MAX_SAMPLES_PER_UPDATE {
            self.sample(pointer);
            self.accumulator_ms -= TRAIL_INTERVAL_MS;
            samples += 1;
        }
        if samples == MAX_SAMPLES_PER_UPDATE {
            self.accumulator_ms = 0.0;
        }
    }

    pub fn clear(&mut self) {
        self.points.clear();
        self.accumulator_ms = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_small_moves_only_age() {
        let mut trail = Trail::new();
        trail.sample(Vec2::new(100.0, 0.0));
        assert_eq!(trail.points.len(), 1);
        trail.sample(Vec2::new(102.0, 0.0));
        assert_eq!(trail.points.len(), 1);
        assert!((trail.points[0].age - 0.08).abs() < 1e-6);
    }

    #[test]
    fn test_length_capped_and_ages_valid() {
        let mut trail = Trail::new();
        for i in 0..100 {
            trail.sample(Vec2::new(i as f32 * 10.0, 0.0));
            assert!(trail.points.len() <= MAX_TRAIL_POINTS);
            assert!(trail.points.iter().all(|p| p.age >= 0.0 && p.age < 1.0));
        }
        // Newest first
        assert_eq!(trail.points[0].pos, Vec2::new(990.0, 0.0));
    }

    #[test]
    fn test_idle_trail_fades_out() {
        let mut trail = Trail::new();
        trail.sample(Vec2::new(50.0, 50.0));
        for _ in 0..40 {
            trail.sample(Vec2::new(50.0, 50.0));
        }
        assert!(trail.points.is_empty());
    }

    #[test]
    fn test_update_samples_on_interval() {
        let mut trail = Trail::new();
        trail.update(Vec2::new(50.0, 0.0), 10.0);
        assert!(trail.points.is_empty());
        trail.update(Vec2::new(50.0, 0.0), 10.0);
        assert_eq!(trail.points.len(), 1);
    }

    #[test]
    fn test_stall_catch_up_is_bounded() {
        let mut trail = Trail::new();
        trail.update(Vec2::new(50.0, 0.0), 10_000.0);
        assert_eq!(trail.points.len(), 1);
        // 1 new point + 3 idle agings
        assert!((trail.points[0].age - (0.05 + 0.09)).abs() < 1e-5);
    }
}
