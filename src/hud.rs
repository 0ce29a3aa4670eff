//! Progress indicator view model
//!
//! Everything the page overlay shows about a session, computed without
//! touching the DOM.

use crate::sim::Session;

/// Overlay contents for one frame
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HudView {
    /// "PROCESS: k / N"
    pub counter: String,
    /// One pip per stage, true once collected
    pub pips: Vec<bool>,
    pub hint: String,
    /// Big "START" watermark before the first collection
    pub show_start: bool,
    /// "READY?" overlay with the call to action
    pub show_ready: bool,
}

impl HudView {
    pub fn from_session(session: &Session) -> Self {
        let progress = session.progress();
        let count = session.stage_count();
        let complete = session.is_complete();

        let hint = match session.stages.first() {
            Some(first) if progress == 0 && !complete => {
                format!("Collect the first step: {}", first)
            }
            _ if progress < count && !complete => "Next Step Unlocked".to_string(),
            _ => "Process Complete".to_string(),
        };

        Self {
            counter: format!("PROCESS: {} / {}", progress, count),
            pips: (0..count).map(|i| i < progress).collect(),
            hint,
            show_start: progress == 0 && !complete,
            show_ready: complete,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::tick;
    use crate::tuning::Tuning;

    fn session(names: &[&str]) -> Session {
        let stages = names.iter().map(|s| s.to_string()).collect();
        Session::new(stages, 800.0, 600.0, 4, Tuning::default())
    }

    fn collect_one(s: &mut Session) {
        let pos = s.target.as_ref().unwrap().pos;
        s.chain[0].pos = pos;
        s.pointer = pos;
        tick(s);
    }

    #[test]
    fn test_initial_hud() {
        let hud = HudView::from_session(&session(&["DISCOVER", "DEFINE", "TEST"]));
        assert_eq!(hud.counter, "PROCESS: 0 / 3");
        assert_eq!(hud.pips, vec![false, false, false]);
        assert_eq!(hud.hint, "Collect the first step: DISCOVER");
        assert!(hud.show_start);
        assert!(!hud.show_ready);
    }

    #[test]
    fn test_mid_game_hud() {
        let mut s = session(&["DISCOVER", "DEFINE", "TEST"]);
        collect_one(&mut s);
        let hud = HudView::from_session(&s);
        assert_eq!(hud.counter, "PROCESS: 1 / 3");
        assert_eq!(hud.pips, vec![true, false, false]);
        assert_eq!(hud.hint, "Next Step Unlocked");
        assert!(!hud.show_start);
    }

    #[test]
    fn test_complete_hud() {
        let mut s = session(&["DISCOVER"]);
        collect_one(&mut s);
        let hud = HudView::from_session(&s);
        assert_eq!(hud.counter, "PROCESS: 1 / 1");
        assert_eq!(hud.hint, "Process Complete");
        assert!(hud.show_ready);
    }

    #[test]
    fn test_empty_sequence_hud() {
        let mut s = session(&[]);
        let hud = HudView::from_session(&s);
        assert_eq!(hud.counter, "PROCESS: 0 / 0");
        assert!(hud.pips.is_empty());
        tick(&mut s);
        assert_eq!(HudView::from_session(&s).hint, "Process Complete");
    }
}
