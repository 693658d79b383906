//! Hatchery - simulation core for a hatchling-rescue arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, collisions, world state)
//! - `renderer`: Draw commands and sprite instances for an external renderer
//! - `tuning`: Data-driven game balance
//! - `settings`: Session preferences

pub mod renderer;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use settings::Settings;
pub use tuning::Tuning;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Default play field dimensions
    pub const WORLD_WIDTH: f32 = 1280.0;
    pub const WORLD_HEIGHT: f32 = 720.0;
    /// Band at the top of the field where hatchlings are safe
    pub const TOP_MARGIN: f32 = 260.0;

    /// Simulation pass rate (passes per second)
    pub const FRAME_RATE: f32 = 70.0;

    /// Player defaults
    pub const PLAYER_RADIUS: f32 = 30.0;
    pub const PLAYER_SPEED: f32 = 3.0;
    pub const PLAYER_SPRITE_WIDTH: f32 = 255.0;
    pub const PLAYER_SPRITE_HEIGHT: f32 = 256.0;
    pub const PLAYER_SPRITE_LIFT: f32 = 100.0;

    /// Obstacle defaults
    pub const OBSTACLE_RADIUS: f32 = 40.0;
    pub const OBSTACLE_SPRITE_SIZE: f32 = 250.0;
    pub const OBSTACLE_SPRITE_LIFT: f32 = 70.0;
    pub const OBSTACLE_FRAME_COLUMNS: u32 = 4;
    pub const OBSTACLE_FRAME_ROWS: u32 = 3;

    /// Egg defaults
    pub const EGG_RADIUS: f32 = 40.0;
    pub const EGG_SPRITE_WIDTH: f32 = 110.0;
    pub const EGG_SPRITE_HEIGHT: f32 = 135.0;
    pub const EGG_SPRITE_LIFT: f32 = 30.0;

    /// Larva defaults
    pub const LARVA_RADIUS: f32 = 30.0;
    pub const LARVA_SPRITE_SIZE: f32 = 150.0;
    pub const LARVA_SPRITE_LIFT: f32 = 40.0;
    pub const LARVA_FRAME_ROWS: u32 = 2;
    /// Particles released when a larva reaches safety / is eaten
    pub const FIREFLIES_PER_RESCUE: usize = 3;
    pub const SPARKS_PER_LOSS: usize = 5;

    /// Enemy defaults
    pub const ENEMY_RADIUS: f32 = 30.0;
    pub const ENEMY_SPRITE_WIDTH: f32 = 140.0;
    pub const ENEMY_SPRITE_HEIGHT: f32 = 260.0;
    /// Sprite bottom sits this far below the collision center
    pub const ENEMY_SPRITE_DROP: f32 = 40.0;
    pub const ENEMY_FRAME_ROWS: u32 = 4;

    /// Spark shrink step and its two thresholds
    pub const SPARK_SHRINK: f32 = 0.5;
    pub const SPARK_SHRINK_FLOOR: f32 = 0.1;
    pub const SPARK_REMOVE_FLOOR: f32 = 0.2;
}

/// Random point in `[min, min + span)`
#[inline]
pub fn random_span<R: rand::Rng>(rng: &mut R, min: f32, span: f32) -> f32 {
    min + rng.random::<f32>() * span
}

/// Top-left corner of a sprite drawn centered on `center`, raised by `lift`
#[inline]
pub fn sprite_origin(center: Vec2, width: f32, height: f32, lift: f32) -> Vec2 {
    Vec2::new(center.x - width * 0.5, center.y - height * 0.5 - lift)
}
