//! Collection bursts
//!
//! Purely decorative: nothing in the loop reads a particle back.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::renderer::Rgba;

/// Absorbs f32 drift so that life 1.0 at decay 0.02 expires on update 50
const LIFE_EPSILON: f32 = 1e-4;

/// A particle for visual effects
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Particle {
    pub pos: Vec2,
    /// px per tick
    pub vel: Vec2,
    /// 1 at spawn, drawn with this opacity
    pub life: f32,
    pub color: Rgba,
}

impl Particle {
    /// Random velocity in `[-speed, speed)` on each axis
    pub fn spawn<R: Rng + ?Sized>(rng: &mut R, pos: Vec2, speed: f32, color: Rgba) -> Self {
        let vel = Vec2::new(
            (rng.random::<f32>() - 0.5) * 2.0 * speed,
            (rng.random::<f32>() - 0.5) * 2.0 * speed,
        );
        Self {
            pos,
            vel,
            life: 1.0,
            color,
        }
    }

    /// Integrate one tick
    pub fn update(&mut self, decay: f32) {
        self.pos += self.vel;
        self.life -= decay;
    }

    pub fn is_alive(&self) -> bool {
        self.life > LIFE_EPSILON
    }

    /// Opacity for drawing
    pub fn alpha(&self) -> f32 {
        self.life.clamp(0.0, 1.0)
    }
}

/// Push `count` particles at `pos`
pub fn burst<R: Rng + ?Sized>(
    particles: &mut Vec<Particle>,
    rng: &mut R,
    pos: Vec2,
    count: usize,
    speed: f32,
    color: Rgba,
) {
    particles.reserve(count);
    for _ in 0..count {
        particles.push(Particle::spawn(rng, pos, speed, color));
    }
}

/// Advance every particle and drop the expired ones
pub fn update_particles(particles: &mut Vec<Particle>, decay: f32) {
    for particle in particles.iter_mut() {
        particle.update(decay);
    }
    particles.retain(Particle::is_alive);
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_burst_velocity_range() {
        let mut rng = Pcg32::seed_from_u64(42);
        let mut particles = Vec::new();
        burst(&mut particles, &mut rng, Vec2::new(10.0, 20.0), 15, 4.0, Rgba::WHITE);
        assert_eq!(particles.len(), 15);
        for p in &particles {
            assert_eq!(p.pos, Vec2::new(10.0, 20.0));
            assert_eq!(p.life, 1.0);
            assert!(p.vel.x >= -4.0 && p.vel.x < 4.0);
            assert!(p.vel.y >= -4.0 && p.vel.y < 4.0);
        }
    }

    #[test]
    fn test_particle_removed_on_fiftieth_update() {
        let mut rng = Pcg32::seed_from_u64(1);
        let mut particles = Vec::new();
        burst(&mut particles, &mut rng, Vec2::ZERO, 1, 4.0, Rgba::WHITE);

        for tick in 1..=49 {
            update_particles(&mut particles, 0.02);
            assert_eq!(particles.len(), 1, "removed too early at tick {}", tick);
        }
        update_particles(&mut particles, 0.02);
        assert!(particles.is_empty());
    }

    #[test]
    fn test_linear_motion_and_fade() {
        let mut p = Particle {
            pos: Vec2::ZERO,
            vel: Vec2::new(1.0, -2.0),
            life: 1.0,
            color: Rgba::WHITE,
        };
        p.update(0.25);
        p.update(0.25);
        assert_eq!(p.pos, Vec2::new(2.0, -4.0));
        assert!((p.alpha() - 0.5).abs() < 1e-6);
    }
}
