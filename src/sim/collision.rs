//! Collision detection between the player square and obstacles
//!
//! Strict inequalities: rectangles that only share an edge do not collide.

use super::state::{Obstacle, Rect};
use crate::tuning::Tuning;

/// Open-interval AABB overlap on both axes
#[inline]
pub fn aabb_overlap(a: &Rect, b: &Rect) -> bool {
    a.min.cmplt(b.max()).all() && a.max().cmpgt(b.min).all()
}

/// Id of the first obstacle (in collection order) overlapping `player`
pub fn first_collision(player: &Rect, obstacles: &[Obstacle], tuning: &Tuning) -> Option<u32> {
    obstacles
        .iter()
        .find(|o| aabb_overlap(player, &o.rect(tuning)))
        .map(|o| o.id)
}
