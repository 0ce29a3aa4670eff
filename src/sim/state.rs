//! Session state and core simulation types
//!
//! One `Session` is one mounted collector: it owns the chain, the active
//! target, the live particles and the seeded RNG. Nothing here is global.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::particles::Particle;
use crate::settings::ResizePolicy;
use crate::surface_center;
use crate::tuning::Tuning;

/// Where the session is in its stage sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionPhase {
    /// No target yet (only observable with an empty stage list)
    Idle,
    /// A target for stage `progress` is on the surface
    TargetActive,
    /// Every stage collected, no further targets
    AllCollected,
}

/// Things that happened since the previous tick
#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    /// Target for `stage` placed at `pos`
    TargetSpawned { stage: usize, pos: Vec2 },
    /// Stage `stage` collected by the head
    StageCollected { stage: usize, label: String },
    /// Last stage collected
    Completed,
    /// Session restarted from stage 0 (resize)
    Reset,
}

/// One badge in the pursuer chain
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub pos: Vec2,
    pub label: String,
}

/// The collectible for the next stage
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Target {
    /// Base position (collision uses this, never the bobbed one)
    pub pos: Vec2,
    pub label: String,
    /// Pop-in scale, 0 at spawn, capped at 1
    pub scale: f32,
    pub active: bool,
}

impl Target {
    pub fn new(pos: Vec2, label: impl Into<String>) -> Self {
        Self {
            pos,
            label: label.into(),
            scale: 0.0,
            active: true,
        }
    }

    /// Advance the pop-in animation by one tick
    pub fn grow(&mut self, step: f32) {
        if self.scale < 1.0 {
            self.scale = (self.scale + step).min(1.0);
        }
    }

    /// Render-only vertical offset for `frame`
    pub fn bob_offset(frame: u64, tuning: &Tuning) -> f32 {
        (frame as f32 * tuning.bob_frequency).sin() * tuning.bob_amplitude
    }

    /// Radius of the pulsing ring for `frame`
    pub fn ring_radius(frame: u64, tuning: &Tuning) -> f32 {
        tuning.ring_radius
            + (frame as f32 * tuning.ring_pulse_frequency).sin() * tuning.ring_pulse_amplitude
    }
}

/// Complete collector session (one play-through at a time)
#[derive(Debug, Clone)]
pub struct Session {
    /// Ordered stage labels
    pub stages: Vec<String>,
    pub tuning: Tuning,
    pub resize_policy: ResizePolicy,
    /// Surface dimensions in pixels
    pub width: f32,
    pub height: f32,
    /// Latest pointer position (surface-local)
    pub pointer: Vec2,
    /// Head first; never empty
    pub chain: Vec<Segment>,
    pub target: Option<Target>,
    /// Visual only, no gameplay effect
    pub particles: Vec<Particle>,
    /// Ticks since construction (not reset by resize)
    pub frame: u64,
    /// Stages collected in this play-through
    pub progress: usize,
    pub phase: SessionPhase,
    pub(crate) rng: Pcg32,
    pub(crate) pending: Vec<SessionEvent>,
}

impl Session {
    /// Create a session on a `width` x `height` surface, first target spawned
    pub fn new(stages: Vec<String>, width: f32, height: f32, seed: u64, tuning: Tuning) -> Self {
        let center = surface_center(width, height);
        let mut session = Self {
            stages,
            tuning,
            resize_policy: ResizePolicy::default(),
            width,
            height,
            pointer: center,
            chain: Vec::new(),
            target: None,
            particles: Vec::new(),
            frame: 0,
            progress: 0,
            phase: SessionPhase::Idle,
            rng: Pcg32::seed_from_u64(seed),
            pending: Vec::new(),
        };
        session.reset();
        session
    }

    /// Back to stage 0: pointer and head recentred, chain cut to the head
    pub fn reset(&mut self) {
        let center = surface_center(self.width, self.height);
        self.pointer = center;
        self.chain = vec![Segment {
            pos: center,
            label: self.tuning.head_label.clone(),
        }];
        self.target = None;
        self.progress = 0;
        self.phase = SessionPhase::Idle;
        self.spawn_target();
    }

    /// Place the target for stage `progress`, or clear it when none remain
    pub fn spawn_target(&mut self) {
        let Some(label) = self.stages.get(self.progress).cloned() else {
            self.target = None;
            return;
        };
        let pos = self.random_spawn_pos();
        log::debug!("Spawned target {} ({}) at {:?}", self.progress, label, pos);
        self.pending.push(SessionEvent::TargetSpawned {
            stage: self.progress,
            pos,
        });
        self.target = Some(Target::new(pos, label));
        self.phase = SessionPhase::TargetActive;
    }

    /// Uniform position inside the margin-inset surface
    fn random_spawn_pos(&mut self) -> Vec2 {
        let margin = self.tuning.spawn_margin;
        let x = spawn_axis(&mut self.rng, self.width, margin);
        let y = spawn_axis(&mut self.rng, self.height, margin);
        Vec2::new(x, y)
    }

    /// Record a pointer position for the next tick
    pub fn on_pointer_move(&mut self, pos: Vec2) {
        self.pointer = pos;
    }

    /// New surface dimensions, handled per `resize_policy`
    pub fn on_resize(&mut self, width: f32, height: f32) {
        let old = Vec2::new(self.width, self.height);
        self.width = width;
        self.height = height;

        match self.resize_policy {
            ResizePolicy::Rescale if old.x > 0.0 && old.y > 0.0 => {
                let factor = Vec2::new(width, height) / old;
                self.pointer *= factor;
                for segment in &mut self.chain {
                    segment.pos *= factor;
                }
                for particle in &mut self.particles {
                    particle.pos *= factor;
                }
                let bounds = self.spawn_bounds();
                if let Some(target) = &mut self.target {
                    target.pos = (target.pos * factor).clamp(bounds.0, bounds.1);
                }
                log::info!("Surface rescaled to {}x{}", width, height);
            }
            _ => {
                // Reset precedes the respawn it causes
                self.pending.push(SessionEvent::Reset);
                self.reset();
                log::info!("Surface resized to {}x{}, session reset", width, height);
            }
        }
    }

    /// Whether a surface-local point lies on the surface (edges included)
    pub fn contains(&self, pos: Vec2) -> bool {
        (0.0..=self.width).contains(&pos.x) && (0.0..=self.height).contains(&pos.y)
    }

    /// Inclusive corners of the spawn region
    pub fn spawn_bounds(&self) -> (Vec2, Vec2) {
        let margin = self.tuning.spawn_margin;
        let center = surface_center(self.width, self.height);
        let lo = Vec2::new(
            if self.width > 2.0 * margin { margin } else { center.x },
            if self.height > 2.0 * margin { margin } else { center.y },
        );
        let hi = Vec2::new(
            if self.width > 2.0 * margin { self.width - margin } else { center.x },
            if self.height > 2.0 * margin { self.height - margin } else { center.y },
        );
        (lo, hi)
    }

    pub fn head(&self) -> &Segment {
        &self.chain[0]
    }

    pub fn progress(&self) -> usize {
        self.progress
    }

    /// Index of the next stage to collect (equals `progress`)
    pub fn stage_index(&self) -> usize {
        self.progress
    }

    pub fn stage_count(&self) -> usize {
        self.stages.len()
    }

    pub fn is_complete(&self) -> bool {
        self.phase == SessionPhase::AllCollected
    }
}

/// One spawn coordinate; collapses to the centre when the axis is too short
fn spawn_axis(rng: &mut Pcg32, len: f32, margin: f32) -> f32 {
    let span = len - 2.0 * margin;
    if span > 0.0 {
        rng.random::<f32>() * span + margin
    } else {
        len / 2.0
    }
}
