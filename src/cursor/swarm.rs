//! Particle swarm around the pointer
//!
//! Positions are offsets from the pointer in world units (y up); the overlay
//! converts to pixels. Each particle drifts by its own velocity and is then
//! eased toward a slot in the current formation.

use std::f32::consts::TAU;

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::state::CursorState;
use crate::lerp;
use crate::renderer::{Rgba, palette};

/// Ease factor toward the formation slot per frame
const FORMATION_LERP: f32 = 0.08;

#[derive(Debug, Clone, PartialEq)]
pub struct SwarmParticle {
    /// Offset from the pointer
    pub offset: Vec2,
    /// Pseudo-depth, scales the drawn size
    pub z: f32,
    pub vel: Vec2,
    pub base_size: f32,
    /// Current animated size
    pub size: f32,
    pub color: Rgba,
}

/// The cursor swarm
#[derive(Debug, Clone)]
pub struct Swarm {
    pub state: CursorState,
    pub particles: Vec<SwarmParticle>,
    /// Seconds since creation
    pub time: f32,
    rng: Pcg32,
}

impl Swarm {
    pub fn new(seed: u64) -> Self {
        let mut swarm = Self {
            state: CursorState::Default,
            particles: Vec::new(),
            time: 0.0,
            rng: Pcg32::seed_from_u64(seed),
        };
        swarm.regenerate();
        swarm
    }

    /// Switch state; the swarm is rebuilt only if its size changes
    pub fn set_state(&mut self, state: CursorState) {
        let resize = state.particle_count() != self.state.particle_count();
        self.state = state;
        if resize {
            self.regenerate();
        }
    }

    fn regenerate(&mut self) {
        let count = self.state.particle_count();
        let (h, s, l) = palette::CURSOR_HSL;
        let rng = &mut self.rng;
        self.particles = (0..count)
            .map(|_| {
                let offset = Vec2::new(centered(rng) * 0.5, centered(rng) * 0.5);
                let z = centered(rng) * 0.3;
                let vel = Vec2::new(centered(rng) * 0.02, centered(rng) * 0.02);
                let base_size = rng.random::<f32>() * 3.0 + 1.0;
                let color = Rgba::from_hsl(
                    h + centered(rng) * 0.05,
                    s + centered(rng) * 0.1,
                    l + centered(rng) * 0.1,
                );
                SwarmParticle {
                    offset,
                    z,
                    vel,
                    base_size,
                    size: base_size,
                    color,
                }
            })
            .collect();
    }

    /// Advance by `dt` seconds
    pub fn update(&mut self, dt: f32) {
        self.time += dt;
        let time = self.time;
        let state = self.state;
        let formation = state.formation(time);
        let size_mult = state.size_multiplier();
        let count = self.particles.len();

        for (i, p) in self.particles.iter_mut().enumerate() {
            p.offset += p.vel * formation.expansion;

            let slot = formation_slot(state, i, count, time);
            let z_target = depth_slot(state, i, time) * formation.depth;

            p.offset = Vec2::new(
                lerp(p.offset.x, slot.x, FORMATION_LERP),
                lerp(p.offset.y, slot.y, FORMATION_LERP),
            );
            p.z = lerp(p.z, z_target, FORMATION_LERP);
            p.size = p.base_size * size_mult * (1.0 + (time * 3.0 + i as f32).sin() * 0.3);
        }
    }
}

/// Uniform in [-0.5, 0.5)
fn centered(rng: &mut Pcg32) -> f32 {
    rng.random::<f32>() - 0.5
}

/// Where particle `i` of `count` sits in the formation at `time`
pub fn formation_slot(state: CursorState, i: usize, count: usize, time: f32) -> Vec2 {
    let formation = state.formation(time);
    let r = formation.radius;
    let n = count.max(1) as f32;
    let t = i as f32 / n;
    let angle = t * TAU + time * formation.rotation_speed;

    match state {
        // Vertical bar
        CursorState::Text => Vec2::new(0.0, (t - 0.5) * r * 2.0),
        // Tightening spiral drifting up
        CursorState::Drag => {
            let shrink = 1.0 - t * 0.5;
            Vec2::new(angle.cos() * r * shrink, angle.sin() * r * shrink + t * 0.3)
        }
        // Four diagonal arms
        CursorState::Resize => {
            const DIRS: [Vec2; 4] = [
                Vec2::new(1.0, 1.0),
                Vec2::new(-1.0, 1.0),
                Vec2::new(-1.0, -1.0),
                Vec2::new(1.0, -1.0),
            ];
            let quadrant = ((t * 4.0) as usize).min(3);
            let arm = n / 4.0;
            let local = (i as f32 % arm) / arm;
            DIRS[quadrant] * local * r
        }
        CursorState::Loading => {
            let orbit = angle + (time * 3.0).sin() * 0.5;
            Vec2::new(orbit.cos() * r, orbit.sin() * r)
        }
        CursorState::Default | CursorState::Hover => {
            let spiral = (time * 2.0 + i as f32 * 0.5).sin() * 0.1;
            Vec2::new(angle.cos() * (r + spiral), angle.sin() * (r + spiral))
        }
    }
}

/// Depth wobble in [-1, 1] before scaling by the formation depth
fn depth_slot(state: CursorState, i: usize, time: f32) -> f32 {
    let i = i as f32;
    match state {
        CursorState::Text => (time * 3.0 + i).sin() * 0.5,
        CursorState::Drag => (time * 2.0 + i * 0.3).sin(),
        CursorState::Loading => (time * 4.0 + i * 0.5).cos(),
        _ => (time * 2.0 + i * 0.2).sin(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_count_follows_state() {
        let mut swarm = Swarm::new(1);
        assert_eq!(swarm.particles.len(), 42);
        swarm.set_state(CursorState::Drag);
        assert_eq!(swarm.particles.len(), 96);
        swarm.set_state(CursorState::Text);
        assert_eq!(swarm.particles.len(), 48);
    }

    #[test]
    fn test_same_count_keeps_particles() {
        let mut swarm = Swarm::new(1);
        swarm.update(0.016);
        let before = swarm.particles.clone();
        swarm.set_state(CursorState::Resize);
        assert_eq!(swarm.particles, before);
    }

    #[test]
    fn test_settles_around_ring() {
        let mut swarm = Swarm::new(7);
        for _ in 0..600 {
            swarm.update(1.0 / 60.0);
        }
        let radii: Vec<f32> = swarm.particles.iter().map(|p| p.offset.length()).collect();
        assert!(radii.iter().all(|&r| r < 1.0));
        let mean = radii.iter().sum::<f32>() / radii.len() as f32;
        assert!(mean > 0.15 && mean < 0.5, "mean radius {}", mean);
    }

    #[test]
    fn test_text_slots_are_vertical() {
        for i in 0..48 {
            let slot = formation_slot(CursorState::Text, i, 48, 1.0);
            assert_eq!(slot.x, 0.0);
            assert!(slot.y.abs() <= 0.15 + 1e-6);
        }
    }

    #[test]
    fn test_resize_arms() {
        let first = formation_slot(CursorState::Resize, 5, 42, 0.0);
        assert!(first.x > 0.0 && first.y > 0.0);
        let last = formation_slot(CursorState::Resize, 40, 42, 0.0);
        assert!(last.x > 0.0 && last.y < 0.0);
    }

    #[test]
    fn test_sizes_pulse_within_bounds() {
        let mut swarm = Swarm::new(3);
        swarm.set_state(CursorState::Hover);
        for _ in 0..30 {
            swarm.update(1.0 / 60.0);
            for p in &swarm.particles {
                let max = p.base_size * 1.5 * 1.3 + 1e-4;
                let min = p.base_size * 1.5 * 0.7 - 1e-4;
                assert!(p.size <= max && p.size >= min);
            }
        }
    }
}
