//! In-memory surface that records draw calls
//!
//! Used by tests and by the native headless run.

use glam::Vec2;

use super::color::Rgba;
use super::surface::{Font, Surface};

/// Average glyph advance as a fraction of the font size
const GLYPH_ADVANCE: f32 = 0.6;

/// A recorded draw call, in surface space (transform already applied)
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCmd {
    Clear,
    FillRect { min: Vec2, size: Vec2, color: Rgba },
    StrokeRect { min: Vec2, size: Vec2, color: Rgba, width: f32 },
    FillCircle { center: Vec2, radius: f32, color: Rgba },
    StrokeCircle { center: Vec2, radius: f32, color: Rgba, width: f32 },
    StrokePath { points: Vec<Vec2>, color: Rgba, width: f32 },
    FillText { text: String, center: Vec2, font: Font, color: Rgba, scale: f32 },
}

#[derive(Debug, Clone, Copy)]
struct DrawState {
    offset: Vec2,
    scale: f32,
    alpha: f32,
}

impl Default for DrawState {
    fn default() -> Self {
        Self {
            offset: Vec2::ZERO,
            scale: 1.0,
            alpha: 1.0,
        }
    }
}

/// Surface that keeps every command for later inspection
#[derive(Debug, Clone)]
pub struct RecordingSurface {
    size: Vec2,
    state: DrawState,
    stack: Vec<DrawState>,
    pub commands: Vec<DrawCmd>,
}

impl RecordingSurface {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            size: Vec2::new(width, height),
            state: DrawState::default(),
            stack: Vec::new(),
            commands: Vec::new(),
        }
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        self.size = Vec2::new(width, height);
    }

    /// Drop recorded commands (keeps size)
    pub fn take_commands(&mut self) -> Vec<DrawCmd> {
        std::mem::take(&mut self.commands)
    }

    /// Current save/restore depth
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    /// Labels drawn, in draw order
    pub fn texts(&self) -> Vec<&str> {
        self.commands
            .iter()
            .filter_map(|c| match c {
                DrawCmd::FillText { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    fn map(&self, p: Vec2) -> Vec2 {
        self.state.offset + p * self.state.scale
    }

    fn tint(&self, color: Rgba) -> Rgba {
        color.with_alpha(color.a * self.state.alpha)
    }
}

impl Surface for RecordingSurface {
    fn size(&self) -> Vec2 {
        self.size
    }

    fn save(&mut self) {
        self.stack.push(self.state);
    }

    fn restore(&mut self) {
        if let Some(state) = self.stack.pop() {
            self.state = state;
        }
    }

    fn translate(&mut self, offset: Vec2) {
        self.state.offset += offset * self.state.scale;
    }

    fn scale(&mut self, factor: f32) {
        self.state.scale *= factor;
    }

    fn set_alpha(&mut self, alpha: f32) {
        self.state.alpha = alpha.clamp(0.0, 1.0);
    }

    fn fill_rect(&mut self, min: Vec2, size: Vec2, color: Rgba) {
        let cmd = DrawCmd::FillRect {
            min: self.map(min),
            size: size * self.state.scale,
            color: self.tint(color),
        };
        self.commands.push(cmd);
    }

    fn stroke_rect(&mut self, min: Vec2, size: Vec2, color: Rgba, width: f32) {
        let cmd = DrawCmd::StrokeRect {
            min: self.map(min),
            size: size * self.state.scale,
            color: self.tint(color),
            width,
        };
        self.commands.push(cmd);
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Rgba) {
        let cmd = DrawCmd::FillCircle {
            center: self.map(center),
            radius: radius * self.state.scale,
            color: self.tint(color),
        };
        self.commands.push(cmd);
    }

    fn stroke_circle(&mut self, center: Vec2, radius: f32, color: Rgba, width: f32) {
        let cmd = DrawCmd::StrokeCircle {
            center: self.map(center),
            radius: radius * self.state.scale,
            color: self.tint(color),
            width,
        };
        self.commands.push(cmd);
    }

    fn stroke_path(&mut self, points: &[Vec2], color: Rgba, width: f32) {
        let cmd = DrawCmd::StrokePath {
            points: points.iter().map(|&p| self.map(p)).collect(),
            color: self.tint(color),
            width,
        };
        self.commands.push(cmd);
    }

    fn fill_text(&mut self, text: &str, center: Vec2, font: Font, color: Rgba) {
        let cmd = DrawCmd::FillText {
            text: text.to_string(),
            center: self.map(center),
            font,
            color: self.tint(color),
            scale: self.state.scale,
        };
        self.commands.push(cmd);
    }

    fn measure_text(&mut self, text: &str, font: Font) -> f32 {
        text.chars().count() as f32 * font.size_px() * GLYPH_ADVANCE
    }

    fn clear(&mut self) {
        self.commands.push(DrawCmd::Clear);
    }
}
