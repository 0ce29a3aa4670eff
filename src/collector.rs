//! Sequential target collector component
//!
//! Wraps a `Session` with the host-facing surface: pointer, resize and frame
//! inputs in, progress and a one-shot completion callback out.

use glam::Vec2;

use crate::hud::HudView;
use crate::renderer::{Surface, render_session};
use crate::settings::ResizePolicy;
use crate::sim::{Session, SessionEvent, tick};
use crate::tuning::Tuning;

/// One mounted collector
pub struct StageCollector {
    session: Session,
    on_complete: Option<Box<dyn FnOnce()>>,
}

impl StageCollector {
    /// Start a play-through on a `size` surface; `on_complete` runs at most once
    pub fn new(
        stages: Vec<String>,
        size: Vec2,
        seed: u64,
        tuning: Tuning,
        on_complete: impl FnOnce() + 'static,
    ) -> Self {
        log::info!("Collector started with {} stages (seed {})", stages.len(), seed);
        Self {
            session: Session::new(stages, size.x, size.y, seed, tuning),
            on_complete: Some(Box::new(on_complete)),
        }
    }

    pub fn with_resize_policy(mut self, policy: ResizePolicy) -> Self {
        self.set_resize_policy(policy);
        self
    }

    /// Takes effect on the next resize
    pub fn set_resize_policy(&mut self, policy: ResizePolicy) {
        self.session.resize_policy = policy;
    }

    /// Record the latest pointer sample (surface-local px)
    pub fn on_pointer_move(&mut self, pos: Vec2) {
        self.session.on_pointer_move(pos);
    }

    /// Like `on_pointer_move`, but samples off the surface are dropped so the
    /// head keeps the last on-surface position. Returns whether it was taken.
    pub fn on_surface_pointer(&mut self, pos: Vec2) -> bool {
        let on_surface = self.session.contains(pos);
        if on_surface {
            self.session.on_pointer_move(pos);
        }
        on_surface
    }

    pub fn on_resize(&mut self, size: Vec2) {
        self.session.on_resize(size.x, size.y);
    }

    /// Advance one frame without drawing
    pub fn update(&mut self) -> Vec<SessionEvent> {
        let events = tick(&mut self.session);
        if events.contains(&SessionEvent::Completed) {
            if let Some(on_complete) = self.on_complete.take() {
                on_complete();
            }
        }
        events
    }

    /// Advance one frame and draw it
    pub fn on_tick<S: Surface + ?Sized>(&mut self, surface: &mut S) -> Vec<SessionEvent> {
        let events = self.update();
        render_session(&self.session, surface);
        events
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn progress(&self) -> usize {
        self.session.progress()
    }

    pub fn stage_index(&self) -> usize {
        self.session.stage_index()
    }

    pub fn stage_count(&self) -> usize {
        self.session.stage_count()
    }

    pub fn is_complete(&self) -> bool {
        self.session.is_complete()
    }

    pub fn hud(&self) -> HudView {
        HudView::from_session(&self.session)
    }

    /// Direct session access for tests
    #[cfg(test)]
    pub(crate) fn session_mut(&mut self) -> &mut Session {
        &mut self.session
    }
}
