//! Celebration and loss particles
//!
//! Fireflies drift up and off the top of the screen when a hatchling is
//! rescued; sparks swirl and shrink away when one is eaten.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::entities::Disposition;
use crate::consts::{SPARK_REMOVE_FLOOR, SPARK_SHRINK, SPARK_SHRINK_FLOOR};

/// Particle behavior
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ParticleKind {
    /// Weaves sideways while rising at a constant rate
    Firefly,
    /// Swirls on both axes while shrinking
    Spark,
}

/// Color tag handed to the renderer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ParticleColor {
    Yellow,
    Blue,
}

impl ParticleKind {
    pub fn color(&self) -> ParticleColor {
        match self {
            ParticleKind::Firefly => ParticleColor::Yellow,
            ParticleKind::Spark => ParticleColor::Blue,
        }
    }
}

/// A particle for visual effects
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Particle {
    pub kind: ParticleKind,
    pub pos: Vec2,
    pub radius: f32,
    /// Horizontal sway amplitude and vertical speed
    pub speed: Vec2,
    pub angle: f32,
    pub angular_vel: f32,
}

impl Particle {
    pub fn new<R: Rng>(kind: ParticleKind, pos: Vec2, rng: &mut R) -> Self {
        Self {
            kind,
            pos,
            radius: (rng.random::<f32>() * 10.0 + 5.0).floor(),
            speed: Vec2::new(
                rng.random::<f32>() * 6.0 - 3.0,
                rng.random::<f32>() * 2.0 + 0.5,
            ),
            angle: 0.0,
            angular_vel: rng.random::<f32>() * 0.1 + 0.01,
        }
    }

    pub fn color(&self) -> ParticleColor {
        self.kind.color()
    }

    pub fn update(&mut self) -> Disposition {
        match self.kind {
            ParticleKind::Firefly => {
                self.angle += self.angular_vel;
                self.pos.x += self.angle.cos() * self.speed.x;
                self.pos.y -= self.speed.y;
                // Gone once fully above the top of the screen
                if self.pos.y < -self.radius {
                    return Disposition::Remove;
                }
            }
            ParticleKind::Spark => {
                self.angle += self.angular_vel * 0.5;
                self.pos.x -= self.angle.cos() * self.speed.x;
                self.pos.y -= self.angle.sin() * self.speed.y;
                if self.radius > SPARK_SHRINK_FLOOR {
                    self.radius -= SPARK_SHRINK;
                }
                if self.radius < SPARK_REMOVE_FLOOR {
                    return Disposition::Remove;
                }
            }
        }
        Disposition::Alive
    }
}
