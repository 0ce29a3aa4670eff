//! Cursor interaction states
//!
//! The swarm's shape follows what the pointer is over. Classification is a
//! pure function of a few element hints so the browser glue stays thin.

use serde::{Deserialize, Serialize};

/// What the pointer is doing / hovering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CursorState {
    #[default]
    Default,
    /// Over a link or button
    Hover,
    /// Primary button held
    Drag,
    /// Over editable text, or a selection exists
    Text,
    /// Over a resize handle
    Resize,
    Loading,
}

/// Shape parameters for a formation (world units, see `overlay`)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Formation {
    pub radius: f32,
    /// radians per second
    pub rotation_speed: f32,
    /// Velocity multiplier
    pub expansion: f32,
    /// Amplitude of the pseudo-depth wobble
    pub depth: f32,
}

impl CursorState {
    /// Swarm size for this state
    pub fn particle_count(&self) -> usize {
        match self {
            CursorState::Hover => 64,
            CursorState::Drag => 96,
            CursorState::Text => 48,
            CursorState::Loading => 80,
            CursorState::Default | CursorState::Resize => 42,
        }
    }

    /// Particle size multiplier
    pub fn size_multiplier(&self) -> f32 {
        match self {
            CursorState::Hover => 1.5,
            CursorState::Drag => 2.0,
            _ => 1.0,
        }
    }

    /// Formation at `time` seconds (only `Loading` varies with time)
    pub fn formation(&self, time: f32) -> Formation {
        match self {
            CursorState::Default => Formation {
                radius: 0.3,
                rotation_speed: 1.0,
                expansion: 1.0,
                depth: 0.2,
            },
            CursorState::Hover => Formation {
                radius: 0.5,
                rotation_speed: 2.0,
                expansion: 1.5,
                depth: 0.4,
            },
            CursorState::Drag => Formation {
                radius: 0.7,
                rotation_speed: 3.0,
                expansion: 2.0,
                depth: 0.3,
            },
            CursorState::Text => Formation {
                radius: 0.15,
                rotation_speed: 0.5,
                expansion: 0.5,
                depth: 0.1,
            },
            CursorState::Resize => Formation {
                radius: 0.6,
                rotation_speed: 1.5,
                expansion: 1.8,
                depth: 0.5,
            },
            CursorState::Loading => Formation {
                radius: 0.4 + (time * 4.0).sin() * 0.2,
                rotation_speed: 4.0,
                expansion: 1.0 + (time * 2.0).sin() * 0.5,
                depth: 0.3,
            },
        }
    }
}

/// What the browser glue reports about the element under the pointer
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ElementHints {
    /// Upper-case tag name (`A`, `BUTTON`, `INPUT`, ...)
    pub tag: String,
    /// Computed `cursor` style
    pub css_cursor: String,
    pub content_editable: bool,
    pub role: Option<String>,
    /// The element sits inside an `a` or `button`
    pub in_link_or_button: bool,
}

/// Pick a state. Priority: drag, selection, text, resize, hover, default.
pub fn classify(hints: Option<&ElementHints>, dragging: bool, has_selection: bool) -> CursorState {
    if dragging {
        return CursorState::Drag;
    }
    let Some(hints) = hints else {
        return CursorState::Default;
    };
    if has_selection {
        return CursorState::Text;
    }

    let tag = hints.tag.as_str();
    let cursor = hints.css_cursor.as_str();

    if tag == "INPUT" || tag == "TEXTAREA" || hints.content_editable || cursor == "text" {
        return CursorState::Text;
    }
    if cursor.contains("resize") {
        return CursorState::Resize;
    }
    if tag == "A"
        || tag == "BUTTON"
        || hints.in_link_or_button
        || cursor == "pointer"
        || hints.role.as_deref() == Some("button")
    {
        return CursorState::Hover;
    }
    CursorState::Default
}
