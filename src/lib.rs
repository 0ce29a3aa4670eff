//! Process Trail - a pointer-chasing canvas mini-game
//!
//! Core modules:
//! - `sim`: Deterministic collector loop (pursuit, chain, targets, particles)
//! - `collector`: The component that owns a session and its completion sink
//! - `renderer`: 2D drawing surface abstraction and scene rendering
//! - `cursor`: Particle cursor overlay (swarm + pointer trail)
//! - `hud`: Progress indicator view model
//! - `tuning`: Data-driven animation constants
//! - `settings`: Persisted user preferences

pub mod collector;
pub mod cursor;
pub mod hud;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use collector::StageCollector;
pub use settings::{ResizePolicy, Settings};
pub use tuning::{Tuning, TuningError};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Stages collected in a full play-through of the page's process game
    pub const DEFAULT_STAGES: [&str; 7] = [
        "DISCOVER",
        "DEFINE",
        "STRATEGIZE",
        "IDEATE",
        "PROTOTYPE",
        "TEST",
        "LAUNCH",
    ];

    /// Label carried by the head segment
    pub const HEAD_LABEL: &str = "HANI";

    /// Nominal frame cadence of the host clock (ms)
    pub const FRAME_MS: f64 = 1000.0 / 60.0;

    /// Cursor trail sampling interval (ms)
    pub const TRAIL_INTERVAL_MS: f64 = 16.0;

    /// Viewports narrower than this get the native cursor
    pub const CURSOR_MIN_VIEWPORT: f32 = 768.0;
}

/// Linear interpolation from `from` toward `to` by factor `t`
#[inline]
pub fn lerp(from: f32, to: f32, t: f32) -> f32 {
    from + (to - from) * t
}

/// Centre of a surface with the given pixel dimensions
#[inline]
pub fn surface_center(width: f32, height: f32) -> Vec2 {
    Vec2::new(width / 2.0, height / 2.0)
}
