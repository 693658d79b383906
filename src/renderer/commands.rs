//! Draw commands and HUD text

use glam::Vec2;
use serde::Serialize;

use crate::consts::*;
use crate::sim::particle::ParticleColor;
use crate::sim::state::{EntityKey, EntityKind, FinalMessage, World};

/// Destination rectangle for a sprite
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SpriteRect {
    /// Top-left corner
    pub origin: Vec2,
    pub size: Vec2,
}

/// One entity to draw
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DrawCommand {
    pub kind: EntityKind,
    pub pos: Vec2,
    pub radius: f32,
    /// Sprite sheet (column, row)
    pub frame: (u32, u32),
    /// Particles have no sprite and draw as filled circles
    pub sprite: Option<SpriteRect>,
    pub color: Option<ParticleColor>,
    pub debug: bool,
}

/// Debug-only decorations
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Overlay {
    /// Half-transparent collision circle
    CollisionCircle { center: Vec2, radius: f32 },
    /// Line from the player to the pointer target
    AimLine { from: Vec2, to: Vec2 },
    Label { text: String, pos: Vec2 },
}

/// Everything drawn in one pass
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DrawList {
    pub commands: Vec<DrawCommand>,
    pub overlays: Vec<Overlay>,
}

impl DrawList {
    pub fn clear(&mut self) {
        self.commands.clear();
        self.overlays.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Record an entity as it is right now
    ///
    /// Keys that no longer name a live entity are skipped.
    pub fn push_entity(&mut self, world: &World, key: EntityKey) {
        let Some(view) = world.view(key) else {
            log::debug!("Skipping stale draw key {:?}", key);
            return;
        };
        let i = key.index;

        let sprite = match key.kind {
            EntityKind::Player => Some(SpriteRect {
                origin: world.player.sprite_origin(),
                size: Vec2::new(PLAYER_SPRITE_WIDTH, PLAYER_SPRITE_HEIGHT),
            }),
            EntityKind::Egg => Some(SpriteRect {
                origin: world.eggs[i].sprite_origin(),
                size: Vec2::new(EGG_SPRITE_WIDTH, EGG_SPRITE_HEIGHT),
            }),
            EntityKind::Obstacle => Some(SpriteRect {
                origin: world.obstacles[i].sprite_origin(),
                size: Vec2::splat(OBSTACLE_SPRITE_SIZE),
            }),
            EntityKind::Enemy => Some(SpriteRect {
                origin: world.enemies[i].sprite_origin(),
                size: Vec2::new(ENEMY_SPRITE_WIDTH, ENEMY_SPRITE_HEIGHT),
            }),
            EntityKind::Larva => Some(SpriteRect {
                origin: world.larvae[i].sprite_origin(),
                size: Vec2::splat(LARVA_SPRITE_SIZE),
            }),
            EntityKind::Particle => None,
        };

        if world.debug && key.kind != EntityKind::Particle {
            self.overlays.push(Overlay::CollisionCircle {
                center: view.pos,
                radius: view.radius,
            });
            match key.kind {
                EntityKind::Player => self.overlays.push(Overlay::AimLine {
                    from: view.pos,
                    to: world.pointer,
                }),
                EntityKind::Egg => self.overlays.push(Overlay::Label {
                    text: world.eggs[i].timer_label(),
                    pos: Vec2::new(view.pos.x, view.pos.y - view.radius * 2.8),
                }),
                _ => {}
            }
        }

        self.commands.push(DrawCommand {
            kind: view.kind,
            pos: view.pos,
            radius: view.radius,
            frame: view.frame,
            sprite,
            color: view.color,
            debug: world.debug,
        });
    }
}

/// Status text drawn over the field every frame
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Hud {
    /// Top-left status lines
    pub lines: Vec<String>,
    /// Centered banner once the game is over
    pub message: Option<FinalMessage>,
}

impl Hud {
    pub fn from_world(world: &World) -> Self {
        let mut lines = vec![format!("Score: {}", world.score)];
        if world.debug {
            lines.push(format!("Lost: {}", world.lost_hatchlings));
        }
        Self {
            lines,
            message: world.final_message(),
        }
    }
}
