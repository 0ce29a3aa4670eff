//! Page animation preferences
//!
//! Persisted in LocalStorage, separate from the tuning constants.

use serde::{Deserialize, Serialize};

use crate::tuning::Tuning;

/// What a surface resize does to a running session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum ResizePolicy {
    /// Start over: progress 0, chain recentred, first target respawned
    #[default]
    Reset,
    /// Keep progress and scale every position to the new dimensions
    Rescale,
}

impl ResizePolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResizePolicy::Reset => "Reset",
            ResizePolicy::Rescale => "Rescale",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "reset" => Some(ResizePolicy::Reset),
            "rescale" | "scale" => Some(ResizePolicy::Rescale),
            _ => None,
        }
    }
}

/// Animation preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Resize handling for the collector
    pub resize_policy: ResizePolicy,

    // === Cursor ===
    /// Replace the native cursor with the particle swarm
    pub custom_cursor: bool,
    /// Draw the fading pointer trail behind the swarm
    pub cursor_trail: bool,

    // === Accessibility ===
    /// Reduced motion (no target bob, no ring pulse, no custom cursor)
    pub reduced_motion: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            resize_policy: ResizePolicy::Reset,
            custom_cursor: true,
            cursor_trail: true,
            reduced_motion: false,
        }
    }
}

impl Settings {
    /// Effective custom cursor (respects reduced_motion)
    pub fn effective_custom_cursor(&self) -> bool {
        self.custom_cursor && !self.reduced_motion
    }

    /// Effective trail (needs the custom cursor)
    pub fn effective_cursor_trail(&self) -> bool {
        self.cursor_trail && self.effective_custom_cursor()
    }

    /// Tuning with the decorative motion stripped when reduced_motion is on
    pub fn apply_to(&self, tuning: &Tuning) -> Tuning {
        if self.reduced_motion {
            tuning.without_motion()
        } else {
            tuning.clone()
        }
    }

    /// Apply `change` and persist only if it altered something
    pub fn update(&mut self, change: impl FnOnce(&mut Settings)) -> bool {
        let before = self.clone();
        change(self);
        let changed = *self != before;
        if changed {
            self.save();
        }
        changed
    }

    #[cfg(target_arch = "wasm32")]
    const STORAGE_KEY: &'static str = "process_trail_settings";

    /// Stored preferences, or defaults when none (or unreadable) are stored
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let stored = web_sys::window()
            .and_then(|w| w.local_storage().ok().flatten())
            .and_then(|storage| storage.get_item(Self::STORAGE_KEY).ok().flatten());

        match stored.map(|json| serde_json::from_str::<Settings>(&json)) {
            Some(Ok(settings)) => {
                log::info!("Loaded settings (resize: {})", settings.resize_policy.as_str());
                settings
            }
            Some(Err(e)) => {
                log::warn!("Discarding stored settings: {}", e);
                Self::default()
            }
            None => Self::default(),
        }
    }

    /// Persist to LocalStorage
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let Some(storage) = web_sys::window().and_then(|w| w.local_storage().ok().flatten()) else {
            return;
        };
        match serde_json::to_string(self) {
            Ok(json) => {
                if storage.set_item(Self::STORAGE_KEY, &json).is_err() {
                    log::warn!("LocalStorage rejected settings");
                }
            }
            Err(e) => log::warn!("Could not encode settings: {}", e),
        }
    }

    /// Native stubs
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {
        // No-op for native
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resize_policy_parse() {
        assert_eq!(ResizePolicy::from_str("RESET"), Some(ResizePolicy::Reset));
        assert_eq!(ResizePolicy::from_str("scale"), Some(ResizePolicy::Rescale));
        assert_eq!(ResizePolicy::from_str("stretch"), None);
        assert_eq!(ResizePolicy::Rescale.as_str(), "Rescale");
    }

    #[test]
    fn test_reduced_motion_disables_cursor_and_bob() {
        let settings = Settings {
            reduced_motion: true,
            ..Default::default()
        };
        assert!(!settings.effective_custom_cursor());
        assert!(!settings.effective_cursor_trail());

        let tuning = settings.apply_to(&Tuning::default());
        assert_eq!(tuning.bob_amplitude, 0.0);
    }

    #[test]
    fn test_update_reports_changes_only() {
        let mut settings = Settings::default();
        assert!(!settings.update(|s| s.resize_policy = ResizePolicy::Reset));
        assert!(settings.update(|s| s.resize_policy = ResizePolicy::Rescale));
        assert_eq!(settings.resize_policy, ResizePolicy::Rescale);
        assert!(!settings.update(|s| s.resize_policy = ResizePolicy::Rescale));
    }

    #[test]
    fn test_missing_fields_default() {
        let settings: Settings = serde_json::from_str(r#"{ "cursor_trail": false }"#).unwrap();
        assert!(!settings.cursor_trail);
        assert!(settings.custom_cursor);
        assert_eq!(settings.resize_policy, ResizePolicy::Reset);
    }
}
