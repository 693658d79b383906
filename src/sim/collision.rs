//! Circle overlap tests and push-out resolution
//!
//! Every body in the game is a circle. Overlaps are resolved by moving the
//! body being updated so it sits one unit outside the other circle, along the
//! line between the two centers.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// A circular collision body
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Circle {
    pub center: Vec2,
    pub radius: f32,
}

impl Circle {
    pub const fn new(center: Vec2, radius: f32) -> Self {
        Self { center, radius }
    }
}

/// Anything that occupies a collision circle
pub trait Body {
    fn circle(&self) -> Circle;
}

impl Body for Circle {
    fn circle(&self) -> Circle {
        *self
    }
}

/// Result of a collision check
#[derive(Debug, Clone, Copy)]
pub struct CollisionResult {
    /// Whether the circles overlap (`distance < sum_of_radii`)
    pub hit: bool,
    /// Distance between centers
    pub distance: f32,
    pub sum_of_radii: f32,
    /// Offset from `b` to `a`
    pub delta: Vec2,
}

impl CollisionResult {
    /// Unit vector from the other body toward this one
    ///
    /// Concentric circles have no direction; they separate along +x.
    pub fn unit(&self) -> Vec2 {
        if self.distance > 0.0 {
            self.delta / self.distance
        } else {
            Vec2::X
        }
    }
}

/// Check whether two circles overlap
pub fn check_collision(a: &Circle, b: &Circle) -> CollisionResult {
    let delta = a.center - b.center;
    let distance = delta.length();
    let sum_of_radii = a.radius + b.radius;
    CollisionResult {
        hit: distance < sum_of_radii,
        distance,
        sum_of_radii,
        delta,
    }
}

/// Position that places a body just outside `other`
#[inline]
pub fn push_out(result: &CollisionResult, other: &Circle) -> Vec2 {
    other.center + result.unit() * (result.sum_of_radii + 1.0)
}

/// Push `pos` out of each overlapping collider in order
///
/// Colliders are checked one at a time against the current position, so a
/// later push-out replaces an earlier one. Returns whether anything was hit.
pub fn resolve_overlaps<I>(pos: &mut Vec2, radius: f32, colliders: I) -> bool
where
    I: IntoIterator<Item = Circle>,
{
    let mut any_hit = false;
    for other in colliders {
        let result = check_collision(&Circle::new(*pos, radius), &other);
        if result.hit {
            *pos = push_out(&result, &other);
            any_hit = true;
        }
    }
    any_hit
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_overlap_and_miss() {
        let a = Circle::new(Vec2::new(0.0, 0.0), 30.0);
        let b = Circle::new(Vec2::new(50.0, 0.0), 40.0);
        let result = check_collision(&a, &b);
        assert!(result.hit);
        assert!((result.distance - 50.0).abs() < 1e-4);
        assert_eq!(result.sum_of_radii, 70.0);
        assert_eq!(result.delta, Vec2::new(-50.0, 0.0));

        let c = Circle::new(Vec2::new(70.0, 0.0), 40.0);
        // Touching is not overlapping
        assert!(!check_collision(&a, &c).hit);
    }

    #[test]
    fn test_push_out_along_center_line() {
        let obstacle = Circle::new(Vec2::new(100.0, 100.0), 40.0);
        let mut pos = Vec2::new(130.0, 140.0);
        assert!(resolve_overlaps(&mut pos, 30.0, [obstacle]));
        let dist = (pos - obstacle.center).length();
        assert!((dist - 71.0).abs() < 1e-3);
        // Direction preserved (3-4-5 triangle)
        let dir = (pos - obstacle.center).normalize();
        assert!((dir - Vec2::new(0.6, 0.8)).length() < 1e-4);
    }

    #[test]
    fn test_concentric_fallback() {
        let other = Circle::new(Vec2::new(10.0, 10.0), 40.0);
        let mut pos = other.center;
        assert!(resolve_overlaps(&mut pos, 30.0, [other]));
        assert!(pos.is_finite());
        assert_eq!(pos, Vec2::new(81.0, 10.0));
    }

    #[test]
    fn test_last_push_wins() {
        let first = Circle::new(Vec2::new(0.0, 0.0), 10.0);
        let second = Circle::new(Vec2::new(25.0, 0.0), 10.0);
        // Pushed off `first` to x=21, which lands inside `second`
        let mut pos = Vec2::new(5.0, 0.0);
        resolve_overlaps(&mut pos, 10.0, [first, second]);
        assert!((pos.x - 4.0).abs() < 1e-4);
    }

    proptest! {
        #[test]
        fn overlap_iff_closer_than_radii(
            ax in -1000.0f32..1000.0, ay in -1000.0f32..1000.0,
            bx in -1000.0f32..1000.0, by in -1000.0f32..1000.0,
            ar in 0.1f32..200.0, br in 0.1f32..200.0,
            same_center in any::<bool>(),
        ) {
            let a = Circle::new(Vec2::new(ax, ay), ar);
            let b = if same_center {
                Circle::new(a.center, br)
            } else {
                Circle::new(Vec2::new(bx, by), br)
            };
            let result = check_collision(&a, &b);
            prop_assert_eq!(result.hit, result.distance < ar + br);
            // Scalars are symmetric
            let reverse = check_collision(&b, &a);
            prop_assert_eq!(result.hit, reverse.hit);
            prop_assert!((result.distance - reverse.distance).abs() < 1e-3);
        }

        #[test]
        fn push_out_lands_one_unit_clear(
            ox in -500.0f32..500.0, oy in -500.0f32..500.0,
            dx in -60.0f32..60.0, dy in -60.0f32..60.0,
            r in 1.0f32..50.0, or in 1.0f32..50.0,
        ) {
            prop_assume!(dx.abs() > 1e-2 || dy.abs() > 1e-2);
            let other = Circle::new(Vec2::new(ox, oy), or);
            let before = Circle::new(other.center + Vec2::new(dx, dy), r);
            let result = check_collision(&before, &other);
            let after = push_out(&result, &other);
            let dist = (after - other.center).length();
            prop_assert!((dist - (r + or + 1.0)).abs() < 1e-2);
        }
    }
}
