//! Collector scene rendering
//!
//! Draw order matters: the fade goes first or it erases the frame, and the
//! head badge goes last so it sits on top of the chain.

use glam::Vec2;

use super::color::palette;
use super::surface::{Font, Surface};
use crate::sim::{Session, Target};

/// Badge padding around label text (x, y half-height)
const BADGE_PAD: Vec2 = Vec2::new(5.0, 15.0);
const HEAD_PAD: Vec2 = Vec2::new(10.0, 20.0);
const CHAIN_LINE_WIDTH: f32 = 2.0;

/// Draw one frame of the session
pub fn render_session<S: Surface + ?Sized>(session: &Session, surface: &mut S) {
    draw_fade(surface);
    if let Some(target) = &session.target {
        draw_target(session, target, surface);
    }
    draw_chain_line(session, surface);
    draw_badges(session, surface);
    draw_particles(session, surface);
}

/// Low-opacity overlay, leaves a motion trail of previous frames
fn draw_fade<S: Surface + ?Sized>(surface: &mut S) {
    let size = surface.size();
    surface.fill_rect(Vec2::ZERO, size, palette::BACKGROUND_FADE);
}

fn draw_target<S: Surface + ?Sized>(session: &Session, target: &Target, surface: &mut S) {
    let tuning = &session.tuning;
    let bob = Target::bob_offset(session.frame, tuning);

    surface.save();
    surface.translate(target.pos + Vec2::new(0.0, bob));
    surface.scale(target.scale);
    surface.fill_text(&target.label, Vec2::ZERO, Font::Target, palette::TARGET);
    surface.stroke_circle(
        Vec2::ZERO,
        Target::ring_radius(session.frame, tuning),
        palette::TARGET_RING,
        1.0,
    );
    surface.restore();
}

fn draw_chain_line<S: Surface + ?Sized>(session: &Session, surface: &mut S) {
    let points: Vec<Vec2> = session.chain.iter().map(|s| s.pos).collect();
    surface.stroke_path(&points, palette::HEAD, CHAIN_LINE_WIDTH);
}

/// Tail first, head last
fn draw_badges<S: Surface + ?Sized>(session: &Session, surface: &mut S) {
    for (i, segment) in session.chain.iter().enumerate().rev() {
        let is_head = i == 0;
        let font = if is_head { Font::Head } else { Font::Badge };
        let text_width = surface.measure_text(&segment.label, font);

        surface.save();
        surface.translate(segment.pos);
        if is_head {
            let size = Vec2::new(text_width + HEAD_PAD.x * 2.0, HEAD_PAD.y * 2.0);
            surface.fill_rect(-size / 2.0, size, palette::HEAD);
            surface.fill_text(&segment.label, Vec2::ZERO, font, palette::HEAD_TEXT);
        } else {
            let size = Vec2::new(text_width + BADGE_PAD.x * 2.0, BADGE_PAD.y * 2.0);
            surface.stroke_rect(-size / 2.0, size, palette::HEAD, 1.0);
            surface.fill_rect(-size / 2.0, size, palette::BADGE);
            surface.fill_text(&segment.label, Vec2::ZERO, font, palette::HEAD);
        }
        surface.restore();
    }
}

/// Opacity tracks remaining life
fn draw_particles<S: Surface + ?Sized>(session: &Session, surface: &mut S) {
    let radius = session.tuning.particle_radius;
    for particle in &session.particles {
        surface.set_alpha(particle.alpha());
        surface.fill_circle(particle.pos, radius, particle.color);
    }
    surface.set_alpha(1.0);
}
