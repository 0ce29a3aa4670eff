//! Deterministic collector simulation
//!
//! All loop logic lives here. This module must stay pure and deterministic:
//! - One tick per host frame
//! - Seeded RNG only
//! - No rendering or platform dependencies

pub mod chain;
pub mod collision;
pub mod particles;
pub mod state;
pub mod tick;

pub use chain::{constrain, pursue, solve_chain, step_chain};
pub use collision::{CaptureResult, check_capture};
pub use particles::{Particle, burst, update_particles};
pub use state::{Segment, Session, SessionEvent, SessionPhase, Target};
pub use tick::tick;
