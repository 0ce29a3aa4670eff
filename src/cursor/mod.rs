//! Particle cursor overlay
//!
//! A swarm of mint particles that changes formation with what the pointer
//! is over, plus a fading trail of recent pointer positions.

pub mod state;
pub mod swarm;
pub mod trail;

pub use state::{CursorState, ElementHints, Formation, classify};
pub use swarm::{Swarm, SwarmParticle};
pub use trail::{MAX_TRAIL_POINTS, Trail, TrailPoint};

use glam::Vec2;

use crate::consts::CURSOR_MIN_VIEWPORT;

/// Cursor overlay state driven by pointer events and frames
#[derive(Debug, Clone)]
pub struct CursorOverlay {
    pub swarm: Swarm,
    pub trail: Trail,
    /// Screen position (px)
    pub pointer: Vec2,
    /// Pointer is inside the document
    pub visible: bool,
    pub dragging: bool,
    /// Draw the trail
    pub trail_enabled: bool,
    /// Viewport too narrow or touch-driven; the native cursor is in use
    pub suppressed: bool,
}

impl CursorOverlay {
    pub fn new(seed: u64) -> Self {
        Self {
            swarm: Swarm::new(seed),
            trail: Trail::new(),
            pointer: Vec2::ZERO,
            visible: false,
            dragging: false,
            trail_enabled: true,
            suppressed: false,
        }
    }

    /// Touch devices and narrow viewports keep the native cursor
    pub fn supported(viewport_width: f32, touch: bool) -> bool {
        !touch && viewport_width >= CURSOR_MIN_VIEWPORT
    }

    /// Re-check the viewport; returns whether the overlay stays active
    pub fn on_viewport(&mut self, viewport_width: f32, touch: bool) -> bool {
        self.suppressed = !Self::supported(viewport_width, touch);
        if self.suppressed {
            self.visible = false;
            self.trail.clear();
        }
        !self.suppressed
    }

    pub fn state(&self) -> CursorState {
        self.swarm.state
    }

    pub fn on_pointer_move(&mut self, pos: Vec2, hints: Option<&ElementHints>, has_selection: bool) {
        self.pointer = pos;
        self.visible = !self.suppressed;
        self.swarm.set_state(classify(hints, self.dragging, has_selection));
    }

    pub fn on_pointer_down(&mut self) {
        self.dragging = true;
        self.swarm.set_state(CursorState::Drag);
    }

    /// State is re-classified on the next move
    pub fn on_pointer_up(&mut self) {
        self.dragging = false;
    }

    pub fn on_selection_change(&mut self, has_selection: bool) {
        if has_selection {
            self.swarm.set_state(CursorState::Text);
        }
    }

    /// Driven by the embedding page through the wasm export
    pub fn set_loading(&mut self, loading: bool) {
        if loading {
            self.swarm.set_state(CursorState::Loading);
        } else if self.swarm.state == CursorState::Loading {
            self.swarm.set_state(CursorState::Default);
        }
    }

    pub fn on_leave(&mut self) {
        self.visible = false;
    }

    pub fn on_enter(&mut self) {
        self.visible = !self.suppressed;
    }

    /// Advance by `dt_ms` milliseconds
    pub fn update(&mut self, dt_ms: f64) {
        self.swarm.update((dt_ms / 1000.0) as f32);
        if self.trail_enabled && !self.suppressed {
            self.trail.update(self.pointer, dt_ms);
        } else {
            self.trail.clear();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_supported_viewports() {
        assert!(CursorOverlay::supported(1280.0, false));
        assert!(!CursorOverlay::supported(600.0, false));
        assert!(!CursorOverlay::supported(1280.0, true));
    }

    #[test]
    fn test_drag_cycle() {
        let mut cursor = CursorOverlay::new(1);
        cursor.on_pointer_down();
        assert_eq!(cursor.state(), CursorState::Drag);
        cursor.on_pointer_move(Vec2::new(10.0, 10.0), None, false);
        assert_eq!(cursor.state(), CursorState::Drag);
        cursor.on_pointer_up();
        cursor.on_pointer_move(Vec2::new(12.0, 10.0), None, false);
        assert_eq!(cursor.state(), CursorState::Default);
    }

    #[test]
    fn test_visibility() {
        let mut cursor = CursorOverlay::new(1);
        assert!(!cursor.visible);
        cursor.on_pointer_move(Vec2::ZERO, None, false);
        assert!(cursor.visible);
        cursor.on_leave();
        assert!(!cursor.visible);
    }

    #[test]
    fn test_loading_toggle() {
        let mut cursor = CursorOverlay::new(1);
        cursor.set_loading(true);
        assert_eq!(cursor.state(), CursorState::Loading);
        assert_eq!(cursor.swarm.particles.len(), 80);
        cursor.set_loading(false);
        assert_eq!(cursor.state(), CursorState::Default);
    }

    #[test]
    fn test_trail_disabled_stays_empty() {
        let mut cursor = CursorOverlay::new(1);
        cursor.trail_enabled = false;
        cursor.on_pointer_move(Vec2::new(100.0, 100.0), None, false);
        cursor.update(50.0);
        assert!(cursor.trail.points.is_empty());
    }

    #[test]
    fn test_narrowed_viewport_hides_overlay() {
        let mut cursor = CursorOverlay::new(1);
        cursor.on_pointer_move(Vec2::new(100.0, 100.0), None, false);
        cursor.update(20.0);
        assert!(cursor.visible);

        assert!(!cursor.on_viewport(600.0, false));
        assert!(!cursor.visible);
        assert!(cursor.trail.points.is_empty());
        cursor.on_pointer_move(Vec2::new(120.0, 100.0), None, false);
        cursor.on_enter();
        assert!(!cursor.visible);

        assert!(cursor.on_viewport(1280.0, false));
        cursor.on_pointer_move(Vec2::new(140.0, 100.0), None, false);
        assert!(cursor.visible);
    }
}
