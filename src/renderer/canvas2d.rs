//! Browser canvas backend

use glam::Vec2;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use super::color::Rgba;
use super::surface::{Font, Surface};

/// `Surface` over a `<canvas>` 2D context
pub struct Canvas2dSurface {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
}

impl Canvas2dSurface {
    /// None when the canvas has no 2D context
    pub fn new(canvas: HtmlCanvasElement) -> Option<Self> {
        let ctx = canvas
            .get_context("2d")
            .ok()
            .flatten()?
            .dyn_into::<CanvasRenderingContext2d>()
            .ok()?;
        Some(Self { canvas, ctx })
    }

    pub fn canvas(&self) -> &HtmlCanvasElement {
        &self.canvas
    }

    /// Match the backing store to the element's layout size
    pub fn fit_to_client(&self) -> Vec2 {
        let width = self.canvas.client_width().max(0) as u32;
        let height = self.canvas.client_height().max(0) as u32;
        self.canvas.set_width(width);
        self.canvas.set_height(height);
        Vec2::new(width as f32, height as f32)
    }

    fn circle_path(&self, center: Vec2, radius: f32) {
        self.ctx.begin_path();
        let _ = self.ctx.arc(
            center.x as f64,
            center.y as f64,
            radius.max(0.0) as f64,
            0.0,
            std::f64::consts::TAU,
        );
    }
}

impl Surface for Canvas2dSurface {
    fn size(&self) -> Vec2 {
        Vec2::new(self.canvas.width() as f32, self.canvas.height() as f32)
    }

    fn save(&mut self) {
        self.ctx.save();
    }

    fn restore(&mut self) {
        self.ctx.restore();
    }

    fn translate(&mut self, offset: Vec2) {
        let _ = self.ctx.translate(offset.x as f64, offset.y as f64);
    }

    fn scale(&mut self, factor: f32) {
        let _ = self.ctx.scale(factor as f64, factor as f64);
    }

    fn set_alpha(&mut self, alpha: f32) {
        self.ctx.set_global_alpha(alpha.clamp(0.0, 1.0) as f64);
    }

    fn fill_rect(&mut self, min: Vec2, size: Vec2, color: Rgba) {
        self.ctx.set_fill_style_str(&color.to_css());
        self.ctx
            .fill_rect(min.x as f64, min.y as f64, size.x as f64, size.y as f64);
    }

    fn stroke_rect(&mut self, min: Vec2, size: Vec2, color: Rgba, width: f32) {
        self.ctx.set_stroke_style_str(&color.to_css());
        self.ctx.set_line_width(width as f64);
        self.ctx
            .stroke_rect(min.x as f64, min.y as f64, size.x as f64, size.y as f64);
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Rgba) {
        self.ctx.set_fill_style_str(&color.to_css());
        self.circle_path(center, radius);
        self.ctx.fill();
    }

    fn stroke_circle(&mut self, center: Vec2, radius: f32, color: Rgba, width: f32) {
        self.ctx.set_stroke_style_str(&color.to_css());
        self.ctx.set_line_width(width as f64);
        self.circle_path(center, radius);
        self.ctx.stroke();
    }

    fn stroke_path(&mut self, points: &[Vec2], color: Rgba, width: f32) {
        let Some((first, rest)) = points.split_first() else {
            return;
        };
        self.ctx.begin_path();
        self.ctx.move_to(first.x as f64, first.y as f64);
        for p in rest {
            self.ctx.line_to(p.x as f64, p.y as f64);
        }
        self.ctx.set_stroke_style_str(&color.to_css());
        self.ctx.set_line_width(width as f64);
        self.ctx.stroke();
    }

    fn fill_text(&mut self, text: &str, center: Vec2, font: Font, color: Rgba) {
        self.ctx.set_font(font.css());
        self.ctx.set_text_align("center");
        self.ctx.set_text_baseline("middle");
        self.ctx.set_fill_style_str(&color.to_css());
        let _ = self.ctx.fill_text(text, center.x as f64, center.y as f64);
    }

    fn measure_text(&mut self, text: &str, font: Font) -> f32 {
        self.ctx.set_font(font.css());
        self.ctx
            .measure_text(text)
            .map(|m| m.width() as f32)
            .unwrap_or(0.0)
    }

    fn clear(&mut self) {
        let size = self.size();
        self.ctx.clear_rect(0.0, 0.0, size.x as f64, size.y as f64);
    }
}
