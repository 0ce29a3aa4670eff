//! Data-driven animation constants
//!
//! Every magic number of the collector loop lives here so a page can ship a
//! JSON override without touching the simulation.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::HEAD_LABEL;

/// Rejected tuning values
#[derive(Debug, Error)]
pub enum TuningError {
    #[error("follow speed must be in (0, 1], got {0}")]
    FollowSpeed(f32),

    #[error("{field} must be positive, got {value}")]
    NonPositive { field: &'static str, value: f32 },

    #[error("particle decay must be in (0, 1], got {0}")]
    ParticleDecay(f32),

    #[error("pop-in step must be in (0, 1], got {0}")]
    PopInStep(f32),

    #[error("invalid tuning json: {0}")]
    Json(#[from] serde_json::Error),
}

/// Collector loop constants (per-tick units, pixels)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Head lerp factor toward the pointer each tick
    pub follow_speed: f32,
    /// Maximum distance between adjacent chain segments
    pub segment_dist: f32,
    /// Head-to-target distance that counts as a collection
    pub capture_radius: f32,
    /// Keep-out border for target spawns
    pub spawn_margin: f32,
    /// Target scale increment per tick
    pub pop_in_step: f32,
    /// Bob phase per frame
    pub bob_frequency: f32,
    pub bob_amplitude: f32,
    /// Base radius of the ring drawn around a target
    pub ring_radius: f32,
    pub ring_pulse_frequency: f32,
    pub ring_pulse_amplitude: f32,
    /// Particles spawned per collection
    pub burst_count: usize,
    /// Max particle speed per axis (px/tick)
    pub particle_speed: f32,
    /// Life lost per tick
    pub particle_decay: f32,
    pub particle_radius: f32,
    /// Label of the head segment
    pub head_label: String,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            follow_speed: 0.12,
            segment_dist: 25.0,
            capture_radius: 40.0,
            spawn_margin: 50.0,
            pop_in_step: 0.05,
            bob_frequency: 0.05,
            bob_amplitude: 5.0,
            ring_radius: 40.0,
            ring_pulse_frequency: 0.1,
            ring_pulse_amplitude: 5.0,
            burst_count: 15,
            particle_speed: 4.0,
            particle_decay: 0.02,
            particle_radius: 2.0,
            head_label: HEAD_LABEL.to_string(),
        }
    }
}

impl Tuning {
    /// Parse and validate a JSON override (missing fields keep defaults)
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Check every field is in a range the loop can run with
    pub fn validate(&self) -> Result<(), TuningError> {
        if !(self.follow_speed > 0.0 && self.follow_speed <= 1.0) {
            return Err(TuningError::FollowSpeed(self.follow_speed));
        }
        if !(self.pop_in_step > 0.0 && self.pop_in_step <= 1.0) {
            return Err(TuningError::PopInStep(self.pop_in_step));
        }
        if !(self.particle_decay > 0.0 && self.particle_decay <= 1.0) {
            return Err(TuningError::ParticleDecay(self.particle_decay));
        }
        let positive = [
            ("segment_dist", self.segment_dist),
            ("capture_radius", self.capture_radius),
            ("ring_radius", self.ring_radius),
            ("particle_radius", self.particle_radius),
        ];
        for (field, value) in positive {
            if !(value > 0.0) {
                return Err(TuningError::NonPositive { field, value });
            }
        }
        if self.spawn_margin < 0.0 {
            return Err(TuningError::NonPositive {
                field: "spawn_margin",
                value: self.spawn_margin,
            });
        }
        Ok(())
    }

    /// Copy with the decorative motion (bob, ring pulse) switched off
    pub fn without_motion(&self) -> Self {
        Self {
            bob_amplitude: 0.0,
            ring_pulse_amplitude: 0.0,
            ..self.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(Tuning::default().validate().is_ok());
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let tuning = Tuning::from_json(r#"{ "segment_dist": 30.0 }"#).unwrap();
        assert_eq!(tuning.segment_dist, 30.0);
        assert_eq!(tuning.follow_speed, 0.12);
        assert_eq!(tuning.head_label, "HANI");
    }

    #[test]
    fn test_rejects_follow_speed() {
        let tuning = Tuning {
            follow_speed: 1.5,
            ..Default::default()
        };
        assert!(matches!(tuning.validate(), Err(TuningError::FollowSpeed(_))));

        let tuning = Tuning {
            follow_speed: 0.0,
            ..Default::default()
        };
        assert!(matches!(tuning.validate(), Err(TuningError::FollowSpeed(_))));
    }

    #[test]
    fn test_default_json_round_trip() {
        let json = serde_json::to_string(&Tuning::default()).unwrap();
        assert_eq!(Tuning::from_json(&json).unwrap(), Tuning::default());
    }

    #[test]
    fn test_rejects_non_positive_fields() {
        let cases: [(&str, fn(&mut Tuning)); 4] = [
            ("segment_dist", |t| t.segment_dist = 0.0),
            ("capture_radius", |t| t.capture_radius = -3.0),
            ("ring_radius", |t| t.ring_radius = 0.0),
            ("particle_radius", |t| t.particle_radius = f32::NAN),
        ];
        for (expected, corrupt) in cases {
            let mut tuning = Tuning::default();
            corrupt(&mut tuning);
            match tuning.validate() {
                Err(TuningError::NonPositive { field, .. }) => assert_eq!(field, expected),
                other => panic!("{}: unexpected {:?}", expected, other),
            }
        }

        let tuning = Tuning {
            spawn_margin: -1.0,
            ..Default::default()
        };
        match tuning.validate() {
            Err(TuningError::NonPositive { field, .. }) => assert_eq!(field, "spawn_margin"),
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn test_rejects_decay_and_pop_in() {
        let tuning = Tuning {
            particle_decay: 0.0,
            ..Default::default()
        };
        assert!(matches!(tuning.validate(), Err(TuningError::ParticleDecay(_))));

        let tuning = Tuning {
            pop_in_step: 2.0,
            ..Default::default()
        };
        assert!(matches!(tuning.validate(), Err(TuningError::PopInStep(_))));
    }

    #[test]
    fn test_bad_json() {
        let err = Tuning::from_json("{ not json").unwrap_err();
        assert!(err.to_string().starts_with("invalid tuning json"));
    }

    #[test]
    fn test_invalid_json_value_is_rejected() {
        assert!(Tuning::from_json(r#"{ "particle_decay": 5.0 }"#).is_err());
    }

    #[test]
    fn test_without_motion() {
        let still = Tuning::default().without_motion();
        assert_eq!(still.bob_amplitude, 0.0);
        assert_eq!(still.ring_pulse_amplitude, 0.0);
        assert_eq!(still.segment_dist, 25.0);
    }
}
