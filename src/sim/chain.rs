//! Pursuit and chain constraint
//!
//! The head eases toward the pointer; every other segment is pulled along by
//! direct projection onto its predecessor, one pass per tick.

use glam::Vec2;

use super::state::Segment;
use crate::lerp;

/// Move `head` a fraction `speed` of the way to `pointer`
#[inline]
pub fn pursue(head: Vec2, pointer: Vec2, speed: f32) -> Vec2 {
    Vec2::new(lerp(head.x, pointer.x, speed), lerp(head.y, pointer.y, speed))
}

/// Pull `pos` to within `max_dist` of `anchor`, keeping its bearing
#[inline]
pub fn constrain(pos: Vec2, anchor: Vec2, max_dist: f32) -> Vec2 {
    let offset = anchor - pos;
    let dist = offset.length();
    if dist > max_dist {
        anchor - offset / dist * max_dist
    } else {
        pos
    }
}

/// Enforce the separation limit down the whole chain (head is not moved)
pub fn solve_chain(chain: &mut [Segment], max_dist: f32) {
    for i in 1..chain.len() {
        let anchor = chain[i - 1].pos;
        chain[i].pos = constrain(chain[i].pos, anchor, max_dist);
    }
}

/// Head pursuit followed by the constraint pass
pub fn step_chain(chain: &mut [Segment], pointer: Vec2, speed: f32, max_dist: f32) {
    if let Some(head) = chain.first_mut() {
        head.pos = pursue(head.pos, pointer, speed);
    }
    solve_chain(chain, max_dist);
}
