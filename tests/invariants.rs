//! Property tests for the collector loop

use glam::Vec2;
use proptest::prelude::*;
use std::cell::Cell;
use std::rc::Rc;

use process_trail::renderer::RecordingSurface;
use process_trail::sim::{Session, SessionEvent, tick};
use process_trail::{StageCollector, Tuning};

fn stages(n: usize) -> Vec<String> {
    (0..n).map(|i| format!("STAGE{}", i)).collect()
}

fn pointer_path() -> impl Strategy<Value = Vec<(f32, f32)>> {
    prop::collection::vec((-100.0f32..1000.0, -100.0f32..800.0), 1..200)
}

proptest! {
    #[test]
    fn chain_links_never_stretch(seed in any::<u64>(), path in pointer_path(), n in 1usize..8) {
        let mut session = Session::new(stages(n), 800.0, 600.0, seed, Tuning::default());
        let max = session.tuning.segment_dist;
        for (x, y) in path {
            session.on_pointer_move(Vec2::new(x, y));
            tick(&mut session);
            for pair in session.chain.windows(2) {
                prop_assert!(pair[0].pos.distance(pair[1].pos) <= max + 1e-3);
            }
        }
    }

    #[test]
    fn progress_is_monotonic_and_matches_chain(seed in any::<u64>(), path in pointer_path(), n in 0usize..8) {
        let mut session = Session::new(stages(n), 800.0, 600.0, seed, Tuning::default());
        let mut last = 0;
        for (x, y) in path {
            session.on_pointer_move(Vec2::new(x, y));
            tick(&mut session);
            prop_assert!(session.progress >= last);
            prop_assert!(session.progress <= n);
            prop_assert_eq!(session.chain.len(), session.progress + 1);
            last = session.progress;
        }
    }

    #[test]
    fn targets_spawn_inside_margins(seed in any::<u64>(), w in 120.0f32..2000.0, h in 120.0f32..2000.0) {
        let mut session = Session::new(stages(7), w, h, seed, Tuning::default());
        for _ in 0..20 {
            let (min, max) = session.spawn_bounds();
            let pos = session.target.as_ref().map(|t| t.pos);
            prop_assert!(pos.is_some());
            let pos = pos.unwrap_or_default();
            prop_assert!(pos.x >= min.x - 1e-3 && pos.x <= max.x + 1e-3);
            prop_assert!(pos.y >= min.y - 1e-3 && pos.y <= max.y + 1e-3);
            session.spawn_target();
        }
    }

    #[test]
    fn tiny_surfaces_spawn_at_centre(seed in any::<u64>(), w in 0.0f32..100.0, h in 0.0f32..100.0) {
        let session = Session::new(stages(3), w, h, seed, Tuning::default());
        let pos = session.target.as_ref().map(|t| t.pos).unwrap_or(Vec2::NAN);
        prop_assert_eq!(pos, Vec2::new(w / 2.0, h / 2.0));
    }

    #[test]
    fn completion_fires_exactly_once(seed in any::<u64>(), n in 0usize..6, extra in 0usize..30) {
        let fired = Rc::new(Cell::new(0u32));
        let counter = fired.clone();
        let mut collector = StageCollector::new(
            stages(n),
            Vec2::new(800.0, 600.0),
            seed,
            Tuning::default(),
            move || counter.set(counter.get() + 1),
        );
        let mut surface = RecordingSurface::new(800.0, 600.0);
        let mut completed_events = 0;

        for _ in 0..(n * 400 + 1 + extra) {
            if let Some(pos) = collector.session().target.as_ref().map(|t| t.pos) {
                collector.on_pointer_move(pos);
            }
            let events = collector.on_tick(&mut surface);
            completed_events += events.iter().filter(|e| **e == SessionEvent::Completed).count();
            surface.take_commands();
        }

        prop_assert!(collector.is_complete());
        prop_assert_eq!(collector.progress(), n);
        prop_assert_eq!(completed_events, 1);
        prop_assert_eq!(fired.get(), 1);
    }

    #[test]
    fn particles_always_fade_out(seed in any::<u64>()) {
        let mut session = Session::new(stages(1), 800.0, 600.0, seed, Tuning::default());
        if let Some(pos) = session.target.as_ref().map(|t| t.pos) {
            session.chain[0].pos = pos;
            session.pointer = pos;
        }
        tick(&mut session);
        prop_assert_eq!(session.particles.len(), 15);
        for _ in 0..49 {
            tick(&mut session);
        }
        prop_assert!(session.particles.is_empty());
    }
}
