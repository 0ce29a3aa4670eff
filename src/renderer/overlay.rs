//! Cursor overlay rendering
//!
//! Drawn on its own transparent canvas, cleared every frame.

use glam::Vec2;

use super::color::{Rgba, palette};
use super::surface::Surface;
use crate::cursor::CursorOverlay;

/// Pixels per swarm world unit
pub const PX_PER_UNIT: f32 = 60.0;
const SWARM_ALPHA: f32 = 0.8;
const TRAIL_ALPHA: f32 = 0.6;
const TRAIL_RADIUS: f32 = 6.0;
/// Swarm size units to radius pixels
const SIZE_TO_RADIUS: f32 = 1.2;

/// Screen position of a swarm offset around `pointer` (world y is up)
pub fn swarm_to_screen(pointer: Vec2, offset: Vec2) -> Vec2 {
    pointer + Vec2::new(offset.x, -offset.y) * PX_PER_UNIT
}

/// Draw trail then swarm
pub fn render_cursor<S: Surface + ?Sized>(cursor: &CursorOverlay, surface: &mut S) {
    surface.clear();
    if !cursor.visible {
        return;
    }

    let (h, s, l) = palette::CURSOR_HSL;
    let mint = Rgba::from_hsl(h, s, l);

    if cursor.trail_enabled {
        for point in &cursor.trail.points {
            let fade = 1.0 - point.age;
            surface.fill_circle(point.pos, TRAIL_RADIUS * fade, mint.with_alpha(TRAIL_ALPHA * fade));
        }
    }

    for p in &cursor.swarm.particles {
        let center = swarm_to_screen(cursor.pointer, p.offset);
        let radius = p.size * SIZE_TO_RADIUS * (1.0 + p.z).max(0.1);
        surface.fill_circle(center, radius, p.color.with_alpha(SWARM_ALPHA));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::recording::{DrawCmd, RecordingSurface};

    #[test]
    fn test_hidden_cursor_only_clears() {
        let cursor = CursorOverlay::new(1);
        let mut surface = RecordingSurface::new(100.0, 100.0);
        render_cursor(&cursor, &mut surface);
        assert_eq!(surface.commands, vec![DrawCmd::Clear]);
    }

    #[test]
    fn test_draws_trail_then_swarm() {
        let mut cursor = CursorOverlay::new(1);
        cursor.on_pointer_move(Vec2::new(200.0, 200.0), None, false);
        cursor.update(20.0);
        assert_eq!(cursor.trail.points.len(), 1);

        let mut surface = RecordingSurface::new(400.0, 400.0);
        render_cursor(&cursor, &mut surface);
        assert_eq!(surface.commands.len(), 1 + 1 + 42);
        match &surface.commands[1] {
            DrawCmd::FillCircle { center, .. } => assert_eq!(*center, Vec2::new(200.0, 200.0)),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_swarm_y_flips() {
        let screen = swarm_to_screen(Vec2::new(10.0, 10.0), Vec2::new(0.5, 0.5));
        assert_eq!(screen, Vec2::new(40.0, -20.0));
    }
}
