//! 2D drawing surface abstraction
//!
//! The collector and the cursor draw through this trait so the same scene
//! code runs against a browser canvas or an in-memory recorder.

use glam::Vec2;

use super::color::Rgba;

/// Text styles used by the page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Font {
    /// Label on a target
    Target,
    /// Label on the head badge
    Head,
    /// Label on trailing badges
    Badge,
}

impl Font {
    /// CSS font shorthand
    pub fn css(&self) -> &'static str {
        match self {
            Font::Target => "900 24px 'Anton', sans-serif",
            Font::Head => "900 16px 'Anton', sans-serif",
            Font::Badge => "700 12px 'JetBrains Mono', monospace",
        }
    }

    pub fn size_px(&self) -> f32 {
        match self {
            Font::Target => 24.0,
            Font::Head => 16.0,
            Font::Badge => 12.0,
        }
    }
}

/// Primitive 2D drawing operations (canvas semantics: later draws on top)
///
/// Text is always centred on `center`, horizontally and vertically.
pub trait Surface {
    /// Pixel dimensions
    fn size(&self) -> Vec2;

    /// Push the transform and alpha state
    fn save(&mut self);
    /// Pop the transform and alpha state
    fn restore(&mut self);
    fn translate(&mut self, offset: Vec2);
    /// Uniform scale
    fn scale(&mut self, factor: f32);
    /// Multiplies every subsequent draw's alpha
    fn set_alpha(&mut self, alpha: f32);

    fn fill_rect(&mut self, min: Vec2, size: Vec2, color: Rgba);
    fn stroke_rect(&mut self, min: Vec2, size: Vec2, color: Rgba, width: f32);
    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Rgba);
    fn stroke_circle(&mut self, center: Vec2, radius: f32, color: Rgba, width: f32);
    /// Open polyline through `points`
    fn stroke_path(&mut self, points: &[Vec2], color: Rgba, width: f32);
    fn fill_text(&mut self, text: &str, center: Vec2, font: Font, color: Rgba);
    /// Advance width of `text` in pixels
    fn measure_text(&mut self, text: &str, font: Font) -> f32;

    /// Clear to fully transparent
    fn clear(&mut self);
}
