//! Game entities and their per-pass updates
//!
//! Entities never touch their siblings. Each update receives the bodies it
//! collides with and reports back what should happen to it; the world applies
//! spawns, scoring and removal.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::collision::{Body, Circle, check_collision, resolve_overlaps};
use crate::consts::*;
use crate::tuning::Tuning;
use crate::{random_span, sprite_origin};

/// What the world should do with an entity after its update
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Disposition {
    Alive,
    Remove,
}

/// Play field extents
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Field {
    pub width: f32,
    pub height: f32,
    /// Everything above this line is the safe zone
    pub top_margin: f32,
}

impl Field {
    pub fn from_tuning(tuning: &Tuning) -> Self {
        Self {
            width: tuning.width,
            height: tuning.height,
            top_margin: tuning.top_margin,
        }
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width * 0.5, self.height * 0.5)
    }
}

/// Facing row for a movement angle (radians, as returned by `atan2`)
///
/// Rows go clockwise from "up" (0) in 45 degree steps; row 2 faces right and
/// row 6 faces left.
pub fn facing_from_angle(angle: f32) -> u32 {
    if !(-2.74..=2.74).contains(&angle) {
        6
    } else if angle < -1.96 {
        7
    } else if angle < -1.17 {
        0
    } else if angle < -0.39 {
        1
    } else if angle < 0.39 {
        2
    } else if angle < 1.17 {
        3
    } else if angle < 1.96 {
        4
    } else {
        5
    }
}

/// The bull steered by the pointer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub pos: Vec2,
    pub radius: f32,
    /// Unit direction of travel (zero when parked on the target)
    pub vel: Vec2,
    /// Distance covered per pass
    pub speed_modifier: f32,
    /// Sprite row, see [`facing_from_angle`]
    pub facing: u32,
}

impl Player {
    pub fn new(field: &Field, speed_modifier: f32) -> Self {
        Self {
            pos: field.center(),
            radius: PLAYER_RADIUS,
            vel: Vec2::ZERO,
            speed_modifier,
            facing: 0,
        }
    }

    /// Move back to the middle of the field
    pub fn reset(&mut self, field: &Field) {
        self.pos = field.center();
        self.vel = Vec2::ZERO;
    }

    pub fn sprite_origin(&self) -> Vec2 {
        sprite_origin(
            self.pos,
            PLAYER_SPRITE_WIDTH,
            PLAYER_SPRITE_HEIGHT,
            PLAYER_SPRITE_LIFT,
        )
    }

    /// Steer toward `target`, stay on the field, slide off obstacles
    pub fn update(&mut self, target: Vec2, field: &Field, obstacles: &[Obstacle]) {
        let to_target = target - self.pos;
        self.facing = facing_from_angle(to_target.y.atan2(to_target.x));

        let distance = to_target.length();
        // Parking inside one step avoids jittering around the target
        self.vel = if distance > self.speed_modifier {
            to_target / distance
        } else {
            Vec2::ZERO
        };
        self.pos += self.vel * self.speed_modifier;

        self.pos.x = self.pos.x.clamp(self.radius, field.width - self.radius);
        self.pos.y = self
            .pos
            .y
            .clamp(field.top_margin + self.radius, field.height - self.radius);

        resolve_overlaps(&mut self.pos, self.radius, obstacles.iter().map(Body::circle));
    }
}

impl Body for Player {
    fn circle(&self) -> Circle {
        Circle::new(self.pos, self.radius)
    }
}

/// A static mushroom/rock that everything else slides around
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Obstacle {
    pub pos: Vec2,
    pub radius: f32,
    /// Sprite sheet (column, row)
    pub frame: (u32, u32),
}

impl Obstacle {
    /// Candidate at a uniformly random spot on the field
    pub fn random<R: Rng>(field: &Field, rng: &mut R) -> Self {
        Self {
            pos: Vec2::new(
                rng.random::<f32>() * field.width,
                rng.random::<f32>() * field.height,
            ),
            radius: OBSTACLE_RADIUS,
            frame: (
                rng.random_range(0..OBSTACLE_FRAME_COLUMNS),
                rng.random_range(0..OBSTACLE_FRAME_ROWS),
            ),
        }
    }

    pub fn sprite_origin(&self) -> Vec2 {
        sprite_origin(
            self.pos,
            OBSTACLE_SPRITE_SIZE,
            OBSTACLE_SPRITE_SIZE,
            OBSTACLE_SPRITE_LIFT,
        )
    }
}

impl Body for Obstacle {
    fn circle(&self) -> Circle {
        Circle::new(self.pos, self.radius)
    }
}

/// An egg incubating on the field
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Egg {
    pub pos: Vec2,
    pub radius: f32,
    /// Milliseconds incubated so far
    pub hatch_timer: f32,
    pub hatch_interval: f32,
}

impl Egg {
    pub fn new(pos: Vec2, hatch_interval: f32) -> Self {
        Self {
            pos,
            radius: EGG_RADIUS,
            hatch_timer: 0.0,
            hatch_interval,
        }
    }

    /// Lay an egg somewhere below the safe zone, clear of the field edges
    pub fn spawn<R: Rng>(field: &Field, hatch_interval: f32, rng: &mut R) -> Self {
        let margin = EGG_RADIUS * 2.0;
        let pos = Vec2::new(
            random_span(rng, margin, field.width - margin * 2.0),
            random_span(rng, field.top_margin, field.height - field.top_margin - margin),
        );
        Self::new(pos, hatch_interval)
    }

    pub fn sprite_origin(&self) -> Vec2 {
        sprite_origin(
            self.pos,
            EGG_SPRITE_WIDTH,
            EGG_SPRITE_HEIGHT,
            EGG_SPRITE_LIFT,
        )
    }

    /// Whole seconds incubated, for the debug overlay
    pub fn timer_label(&self) -> String {
        format!("{:.0}", self.hatch_timer * 0.001)
    }

    /// Get shoved around, then hatch when ripe or pushed into the safe zone
    ///
    /// `Remove` means the egg hatched; a larva belongs at its final position.
    pub fn update<I>(&mut self, dt: f32, field: &Field, colliders: I) -> Disposition
    where
        I: IntoIterator<Item = Circle>,
    {
        resolve_overlaps(&mut self.pos, self.radius, colliders);

        if self.hatch_timer > self.hatch_interval || self.pos.y < field.top_margin {
            return Disposition::Remove;
        }
        self.hatch_timer += dt;
        Disposition::Alive
    }
}

impl Body for Egg {
    fn circle(&self) -> Circle {
        Circle::new(self.pos, self.radius)
    }
}

/// How a larva's pass ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LarvaOutcome {
    /// Still crawling toward the safe zone
    Crawling,
    /// Crossed into the safe zone
    Rescued,
    /// Caught by an enemy
    Eaten,
}

impl LarvaOutcome {
    pub fn disposition(&self) -> Disposition {
        match self {
            LarvaOutcome::Crawling => Disposition::Alive,
            LarvaOutcome::Rescued | LarvaOutcome::Eaten => Disposition::Remove,
        }
    }
}

/// A freshly hatched larva crawling up toward safety
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Larva {
    pub pos: Vec2,
    pub radius: f32,
    /// Upward distance per pass
    pub speed_y: f32,
    pub frame_row: u32,
}

impl Larva {
    pub fn new<R: Rng>(pos: Vec2, rng: &mut R) -> Self {
        Self {
            pos,
            radius: LARVA_RADIUS,
            speed_y: 1.0 + rng.random::<f32>(),
            frame_row: rng.random_range(0..LARVA_FRAME_ROWS),
        }
    }

    pub fn sprite_origin(&self) -> Vec2 {
        sprite_origin(
            self.pos,
            LARVA_SPRITE_SIZE,
            LARVA_SPRITE_SIZE,
            LARVA_SPRITE_LIFT,
        )
    }

    /// Crawl upward, slide off solid bodies, check for rescue or capture
    ///
    /// Reaching the safe zone is checked first, so a larva that escapes on the
    /// same pass an enemy reaches it counts as rescued. Enemies only eat while
    /// the game is running.
    pub fn update<I>(
        &mut self,
        field: &Field,
        game_over: bool,
        colliders: I,
        enemies: &[Enemy],
    ) -> LarvaOutcome
    where
        I: IntoIterator<Item = Circle>,
    {
        self.pos.y -= self.speed_y;

        if self.pos.y < field.top_margin {
            return LarvaOutcome::Rescued;
        }

        resolve_overlaps(&mut self.pos, self.radius, colliders);

        if !game_over {
            let me = self.circle();
            if enemies
                .iter()
                .any(|enemy| check_collision(&me, &enemy.circle()).hit)
            {
                return LarvaOutcome::Eaten;
            }
        }

        LarvaOutcome::Crawling
    }
}

impl Body for Larva {
    fn circle(&self) -> Circle {
        Circle::new(self.pos, self.radius)
    }
}

/// A toad walking right-to-left across the field
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    pub pos: Vec2,
    pub radius: f32,
    /// Leftward distance per pass
    pub speed_x: f32,
    pub frame_row: u32,
}

impl Enemy {
    pub fn spawn<R: Rng>(field: &Field, rng: &mut R) -> Self {
        let mut enemy = Self {
            pos: Vec2::ZERO,
            radius: ENEMY_RADIUS,
            speed_x: random_span(rng, 0.5, 3.0),
            frame_row: 0,
        };
        enemy.recycle(field, rng);
        enemy
    }

    /// Re-enter from somewhere past the right edge
    pub fn recycle<R: Rng>(&mut self, field: &Field, rng: &mut R) {
        self.pos = Vec2::new(
            random_span(rng, field.width + ENEMY_SPRITE_WIDTH, field.width * 0.5),
            random_span(rng, field.top_margin, field.height - field.top_margin),
        );
        self.frame_row = rng.random_range(0..ENEMY_FRAME_ROWS);
    }

    pub fn sprite_origin(&self) -> Vec2 {
        Vec2::new(
            self.pos.x - ENEMY_SPRITE_WIDTH * 0.5,
            self.pos.y - ENEMY_SPRITE_HEIGHT + ENEMY_SPRITE_DROP,
        )
    }

    /// Walk left, wrap around once fully off screen, slide off solid bodies
    ///
    /// Returns whether the enemy was recycled this pass.
    pub fn update<R, I>(
        &mut self,
        field: &Field,
        game_over: bool,
        rng: &mut R,
        colliders: I,
    ) -> bool
    where
        R: Rng,
        I: IntoIterator<Item = Circle>,
    {
        // Off-screen test uses where the sprite was at the start of the pass
        let sprite_right = self.sprite_origin().x + ENEMY_SPRITE_WIDTH;
        self.pos.x -= self.speed_x;

        let recycled = sprite_right < 0.0 && !game_over;
        if recycled {
            self.recycle(field, rng);
        }

        resolve_overlaps(&mut self.pos, self.radius, colliders);
        recycled
    }
}

impl Body for Enemy {
    fn circle(&self) -> Circle {
        Circle::new(self.pos, self.radius)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    const NONE: [Circle; 0] = [];

    fn field() -> Field {
        Field::from_tuning(&Tuning::default())
    }

    #[test]
    fn test_facing_breakpoints() {
        use std::f32::consts::PI;
        assert_eq!(facing_from_angle(0.0), 2); // right
        assert_eq!(facing_from_angle(PI), 6); // left
        assert_eq!(facing_from_angle(-PI), 6);
        assert_eq!(facing_from_angle(-PI / 2.0), 0); // up (screen y grows down)
        assert_eq!(facing_from_angle(PI / 2.0), 4); // down
        assert_eq!(facing_from_angle(-2.0), 7);
        assert_eq!(facing_from_angle(-1.0), 1);
        assert_eq!(facing_from_angle(1.0), 3);
        assert_eq!(facing_from_angle(2.0), 5);
        // Boundaries belong to the next bucket up
        assert_eq!(facing_from_angle(0.39), 3);
        assert_eq!(facing_from_angle(-0.39), 2);
        assert_eq!(facing_from_angle(2.74), 5);
        assert_eq!(facing_from_angle(2.7401), 6);
    }

    #[test]
    fn test_player_moves_toward_target() {
        let field = field();
        let mut player = Player::new(&field, 3.0);
        let start = player.pos;
        player.update(start + Vec2::new(100.0, 0.0), &field, &[]);
        assert!((player.pos - (start + Vec2::new(3.0, 0.0))).length() < 1e-4);
        assert_eq!(player.facing, 2);
    }

    #[test]
    fn test_player_parks_near_target() {
        let field = field();
        let mut player = Player::new(&field, 3.0);
        let start = player.pos;
        player.update(start + Vec2::new(2.0, 0.0), &field, &[]);
        assert_eq!(player.pos, start);
        assert_eq!(player.vel, Vec2::ZERO);
    }

    #[test]
    fn test_player_clamped_below_safe_zone() {
        let field = field();
        let mut player = Player::new(&field, 3.0);
        player.pos = Vec2::new(10.0, field.top_margin + 5.0);
        player.update(Vec2::new(-100.0, 0.0), &field, &[]);
        assert_eq!(player.pos.x, player.radius);
        assert_eq!(player.pos.y, field.top_margin + player.radius);
    }

    #[test]
    fn test_player_slides_off_obstacle() {
        let field = field();
        let mut player = Player::new(&field, 3.0);
        let obstacle = Obstacle {
            pos: player.pos + Vec2::new(60.0, 0.0),
            radius: OBSTACLE_RADIUS,
            frame: (0, 0),
        };
        player.update(obstacle.pos, &field, std::slice::from_ref(&obstacle));
        let dist = (player.pos - obstacle.pos).length();
        assert!((dist - (PLAYER_RADIUS + OBSTACLE_RADIUS + 1.0)).abs() < 1e-3);
    }

    #[test]
    fn test_egg_hatches_after_interval() {
        let field = field();
        let mut egg = Egg::new(Vec2::new(600.0, 500.0), 10_000.0);
        // 100 passes of 100ms then one of 1ms: timer reaches 10001
        for _ in 0..100 {
            assert_eq!(egg.update(100.0, &field, NONE), Disposition::Alive);
        }
        assert_eq!(egg.update(1.0, &field, NONE), Disposition::Alive);
        assert_eq!(egg.hatch_timer, 10_001.0);
        assert_eq!(egg.update(16.0, &field, NONE), Disposition::Remove);
        assert_eq!(egg.pos, Vec2::new(600.0, 500.0));
    }

    #[test]
    fn test_egg_pushed_into_safe_zone_hatches() {
        let field = field();
        let mut egg = Egg::new(Vec2::new(600.0, field.top_margin + 10.0), 10_000.0);
        // Player just below shoves the egg upward past the margin
        let shover = Circle::new(Vec2::new(600.0, field.top_margin + 40.0), PLAYER_RADIUS);
        assert_eq!(egg.update(16.0, &field, [shover]), Disposition::Remove);
        assert!(egg.pos.y < field.top_margin);
        assert_eq!(egg.hatch_timer, 0.0);
    }

    #[test]
    fn test_egg_spawns_inside_field() {
        let field = field();
        let mut rng = Pcg32::seed_from_u64(3);
        for _ in 0..500 {
            let egg = Egg::spawn(&field, 10_000.0, &mut rng);
            assert!(egg.pos.x >= EGG_RADIUS * 2.0 && egg.pos.x <= field.width - EGG_RADIUS * 2.0);
            assert!(egg.pos.y >= field.top_margin && egg.pos.y <= field.height - EGG_RADIUS * 2.0);
        }
    }

    #[test]
    fn test_larva_rescued_before_eaten() {
        let field = field();
        let mut rng = Pcg32::seed_from_u64(5);
        let mut larva = Larva::new(Vec2::new(400.0, field.top_margin + 0.5), &mut rng);
        let enemy = Enemy {
            pos: larva.pos,
            radius: ENEMY_RADIUS,
            speed_x: 1.0,
            frame_row: 0,
        };
        let outcome = larva.update(&field, false, NONE, std::slice::from_ref(&enemy));
        assert_eq!(outcome, LarvaOutcome::Rescued);
    }

    #[test]
    fn test_larva_eaten_only_while_running() {
        let field = field();
        let mut rng = Pcg32::seed_from_u64(5);
        let start = Vec2::new(400.0, 600.0);
        let enemy = Enemy {
            pos: start,
            radius: ENEMY_RADIUS,
            speed_x: 1.0,
            frame_row: 0,
        };

        let mut larva = Larva::new(start, &mut rng);
        assert_eq!(
            larva.update(&field, false, NONE, std::slice::from_ref(&enemy)),
            LarvaOutcome::Eaten
        );

        let mut larva = Larva::new(start, &mut rng);
        assert_eq!(
            larva.update(&field, true, NONE, std::slice::from_ref(&enemy)),
            LarvaOutcome::Crawling
        );
    }

    #[test]
    fn test_larva_speed_range() {
        let mut rng = Pcg32::seed_from_u64(11);
        for _ in 0..100 {
            let larva = Larva::new(Vec2::ZERO, &mut rng);
            assert!((1.0..=2.0).contains(&larva.speed_y));
            assert!(larva.frame_row < LARVA_FRAME_ROWS);
        }
    }

    #[test]
    fn test_enemy_spawns_off_screen_right() {
        let field = field();
        let mut rng = Pcg32::seed_from_u64(9);
        for _ in 0..100 {
            let enemy = Enemy::spawn(&field, &mut rng);
            assert!(enemy.pos.x >= field.width + ENEMY_SPRITE_WIDTH);
            assert!(enemy.pos.y >= field.top_margin && enemy.pos.y <= field.height);
            assert!((0.5..=3.5).contains(&enemy.speed_x));
            assert!(enemy.frame_row < ENEMY_FRAME_ROWS);
        }
    }

    #[test]
    fn test_enemy_recycles_past_left_edge() {
        let field = field();
        let mut rng = Pcg32::seed_from_u64(9);
        let mut enemy = Enemy::spawn(&field, &mut rng);
        enemy.pos = Vec2::new(-ENEMY_SPRITE_WIDTH, 500.0);

        // Game over: keeps walking away
        assert!(!enemy.update(&field, true, &mut rng, NONE));
        assert!(enemy.pos.x < -ENEMY_SPRITE_WIDTH);

        assert!(enemy.update(&field, false, &mut rng, NONE));
        assert!(enemy.pos.x >= field.width + ENEMY_SPRITE_WIDTH);
    }
}
