//! Colors for 2D rendering

use serde::{Deserialize, Serialize};

/// sRGB color with straight alpha
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f32,
}

impl Rgba {
    pub const WHITE: Rgba = Rgba::rgb(255, 255, 255);
    pub const BLACK: Rgba = Rgba::rgb(0, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 1.0)
    }

    /// Same color, different alpha
    pub fn with_alpha(self, a: f32) -> Self {
        Self {
            a: a.clamp(0.0, 1.0),
            ..self
        }
    }

    /// HSL (all components 0-1) to RGB
    pub fn from_hsl(h: f32, s: f32, l: f32) -> Self {
        let h = h.rem_euclid(1.0) * 6.0;
        let s = s.clamp(0.0, 1.0);
        let l = l.clamp(0.0, 1.0);

        let c = (1.0 - (2.0 * l - 1.0).abs()) * s;
        let x = c * (1.0 - (h % 2.0 - 1.0).abs());
        let m = l - c / 2.0;

        let (r, g, b) = match h as u32 {
            0 => (c, x, 0.0),
            1 => (x, c, 0.0),
            2 => (0.0, c, x),
            3 => (0.0, x, c),
            4 => (x, 0.0, c),
            _ => (c, 0.0, x),
        };

        let channel = |v: f32| ((v + m) * 255.0).round().clamp(0.0, 255.0) as u8;
        Self::rgb(channel(r), channel(g), channel(b))
    }

    /// CSS color string for canvas fill/stroke styles
    pub fn to_css(&self) -> String {
        if self.a >= 1.0 {
            format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
        }
    }
}

/// Colors for page elements
pub mod palette {
    use super::Rgba;

    /// Brand mint (#21cb98)
    pub const HEAD: Rgba = Rgba::rgb(33, 203, 152);
    pub const HEAD_TEXT: Rgba = Rgba::BLACK;
    /// Full-surface fade painted every frame (leaves motion trails)
    pub const BACKGROUND_FADE: Rgba = Rgba::new(17, 17, 17, 0.3);
    pub const TARGET: Rgba = Rgba::WHITE;
    pub const TARGET_RING: Rgba = Rgba::new(255, 255, 255, 0.2);
    /// Badge body (#111)
    pub const BADGE: Rgba = Rgba::rgb(17, 17, 17);
    /// Cursor swarm base hue/saturation/lightness (hsl(160, 72%, 46%))
    pub const CURSOR_HSL: (f32, f32, f32) = (160.0 / 360.0, 0.72, 0.46);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_css_output() {
        assert_eq!(palette::HEAD.to_css(), "#21cb98");
        assert_eq!(palette::BACKGROUND_FADE.to_css(), "rgba(17, 17, 17, 0.3)");
    }

    #[test]
    fn test_hsl_primaries() {
        assert_eq!(Rgba::from_hsl(0.0, 1.0, 0.5), Rgba::rgb(255, 0, 0));
        assert_eq!(Rgba::from_hsl(1.0 / 3.0, 1.0, 0.5), Rgba::rgb(0, 255, 0));
        assert_eq!(Rgba::from_hsl(0.0, 0.0, 1.0), Rgba::WHITE);
    }

    #[test]
    fn test_cursor_mint() {
        let (h, s, l) = palette::CURSOR_HSL;
        let mint = Rgba::from_hsl(h, s, l);
        assert_eq!(mint.r, 33);
        assert!(mint.g >= 201 && mint.g <= 203);
        assert!(mint.b >= 144 && mint.b <= 146);
    }

    #[test]
    fn test_with_alpha_clamps() {
        assert_eq!(Rgba::WHITE.with_alpha(3.0).a, 1.0);
        assert_eq!(Rgba::WHITE.with_alpha(-1.0).a, 0.0);
    }
}
