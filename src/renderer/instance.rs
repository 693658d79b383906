//! Sprite instance data for GPU upload

use bytemuck::{Pod, Zeroable};

use super::commands::DrawCommand;
use crate::sim::particle::ParticleColor;
use crate::sim::state::EntityKind;

/// One sprite or particle, laid out for an instance buffer
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct SpriteInstance {
    /// Sprite top-left, or particle center
    pub position: [f32; 2],
    /// Sprite size, or particle diameter on both axes
    pub size: [f32; 2],
    /// Sprite sheet (column, row)
    pub frame: [u32; 2],
    /// Texture/atlas slot, see [`atlas_slot`]
    pub atlas: u32,
    pub radius: f32,
    pub color: [f32; 4],
}

/// Atlas slot for an entity kind
pub const fn atlas_slot(kind: EntityKind) -> u32 {
    match kind {
        EntityKind::Player => 0,
        EntityKind::Egg => 1,
        EntityKind::Obstacle => 2,
        EntityKind::Enemy => 3,
        EntityKind::Larva => 4,
        EntityKind::Particle => 5,
    }
}

impl SpriteInstance {
    pub fn from_command(cmd: &DrawCommand) -> Self {
        let (position, size) = match cmd.sprite {
            Some(rect) => (rect.origin.to_array(), rect.size.to_array()),
            None => (cmd.pos.to_array(), [cmd.radius * 2.0; 2]),
        };
        let color = match cmd.color {
            Some(ParticleColor::Yellow) => colors::FIREFLY,
            Some(ParticleColor::Blue) => colors::SPARK,
            None => colors::WHITE,
        };
        Self {
            position,
            size,
            frame: [cmd.frame.0, cmd.frame.1],
            atlas: atlas_slot(cmd.kind),
            radius: cmd.radius,
            color,
        }
    }

    /// Instances for a whole pass, in draw order
    pub fn batch(commands: &[DrawCommand]) -> Vec<Self> {
        commands.iter().map(Self::from_command).collect()
    }

    /// Raw bytes of an instance batch
    pub fn as_bytes(instances: &[Self]) -> &[u8] {
        bytemuck::cast_slice(instances)
    }
}

/// Colors for game elements
pub mod colors {
    pub const WHITE: [f32; 4] = [1.0, 1.0, 1.0, 1.0];
    pub const FIREFLY: [f32; 4] = [1.0, 1.0, 0.0, 1.0];
    pub const SPARK: [f32; 4] = [0.0, 0.0, 1.0, 1.0];
}
