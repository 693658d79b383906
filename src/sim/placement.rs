//! Obstacle placement
//!
//! Rejection sampling: throw random candidates at the field and keep the ones
//! that sit fully on screen, clear of the safe zone and the bottom edge, and
//! well apart from every obstacle already placed.

use rand::Rng;

use super::collision::{Body, check_collision};
use super::entities::{Field, Obstacle};
use crate::consts::OBSTACLE_SPRITE_SIZE;

/// Limits for one packing run
#[derive(Debug, Clone, Copy)]
pub struct PackingParams {
    /// Stop once this many obstacles are placed
    pub target: usize,
    /// Stop after this many candidates regardless
    pub max_attempts: u32,
    /// Extra clearance required between obstacle circles
    pub buffer: f32,
}

/// Whether a candidate fits on the field
///
/// The whole sprite must be on screen horizontally, and the collision center
/// must keep three radii from the safe zone and from the bottom edge.
pub fn fits_field(candidate: &Obstacle, field: &Field) -> bool {
    let sprite_x = candidate.sprite_origin().x;
    let margin = candidate.radius * 3.0;
    sprite_x > 0.0
        && sprite_x < field.width - OBSTACLE_SPRITE_SIZE
        && candidate.pos.y > field.top_margin + margin
        && candidate.pos.y < field.height - margin
}

/// Whether a candidate keeps `buffer` clear of every placed obstacle
pub fn clear_of(candidate: &Obstacle, placed: &[Obstacle], buffer: f32) -> bool {
    let circle = candidate.circle();
    placed.iter().all(|other| {
        let result = check_collision(&circle, &other.circle());
        result.distance >= result.sum_of_radii + buffer
    })
}

/// Place up to `params.target` non-overlapping obstacles
///
/// Best effort: running out of attempts returns however many fit.
pub fn pack_obstacles<R: Rng>(field: &Field, params: &PackingParams, rng: &mut R) -> Vec<Obstacle> {
    let mut placed: Vec<Obstacle> = Vec::with_capacity(params.target);
    let mut attempts = 0;

    while placed.len() < params.target && attempts < params.max_attempts {
        let candidate = Obstacle::random(field, rng);
        if clear_of(&candidate, &placed, params.buffer) && fits_field(&candidate, field) {
            placed.push(candidate);
        }
        attempts += 1;
    }

    if placed.len() < params.target {
        log::warn!(
            "Placed only {}/{} obstacles after {} attempts",
            placed.len(),
            params.target,
            attempts
        );
    } else {
        log::debug!("Placed {} obstacles in {} attempts", placed.len(), attempts);
    }

    placed
}
