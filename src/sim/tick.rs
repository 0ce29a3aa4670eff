//! Per-frame simulation tick
//!
//! Core loop that advances a session by one host frame. Rendering is not
//! done here; see `renderer::scene`.

use super::chain::step_chain;
use super::collision::check_capture;
use super::particles::{burst, update_particles};
use super::state::{Segment, Session, SessionEvent, SessionPhase};
use crate::renderer::palette;

/// Advance the session by one frame and return what happened
pub fn tick(session: &mut Session) -> Vec<SessionEvent> {
    session.frame += 1;

    // Pursuit reads the latest pointer sample
    let pointer = session.pointer;
    let tuning = &session.tuning;
    step_chain(
        &mut session.chain,
        pointer,
        tuning.follow_speed,
        tuning.segment_dist,
    );

    match session.phase {
        // Nothing was ever spawned: the sequence is already exhausted
        SessionPhase::Idle if session.progress >= session.stages.len() => {
            complete(session);
        }
        SessionPhase::TargetActive => update_target(session),
        _ => {}
    }

    update_particles(&mut session.particles, session.tuning.particle_decay);

    std::mem::take(&mut session.pending)
}

/// Pop-in, then the capture check against the base position
fn update_target(session: &mut Session) {
    let head = session.chain[0].pos;
    let Some(target) = session.target.as_mut() else {
        return;
    };

    target.grow(session.tuning.pop_in_step);

    if check_capture(head, target.pos, session.tuning.capture_radius).hit {
        collect(session);
    }
}

/// Collection side effects, in order: burst, grow chain, advance, next target
fn collect(session: &mut Session) {
    let Some(target) = session.target.take() else {
        return;
    };

    burst(
        &mut session.particles,
        &mut session.rng,
        target.pos,
        session.tuning.burst_count,
        session.tuning.particle_speed,
        palette::HEAD,
    );

    let tail = session.chain[session.chain.len() - 1].pos;
    session.chain.push(Segment {
        pos: tail,
        label: target.label.clone(),
    });

    let stage = session.progress;
    session.progress += 1;
    log::info!(
        "Collected stage {}/{}: {}",
        session.progress,
        session.stages.len(),
        target.label
    );
    session.pending.push(SessionEvent::StageCollected {
        stage,
        label: target.label,
    });

    if session.progress >= session.stages.len() {
        complete(session);
    } else {
        session.spawn_target();
    }
}

fn complete(session: &mut Session) {
    session.target = None;
    session.phase = SessionPhase::AllCollected;
    session.pending.push(SessionEvent::Completed);
    log::info!("All {} stages collected", session.stages.len());
}
