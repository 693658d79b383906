//! Deterministic simulation module
//!
//! All gameplay logic lives here:
//! - Randomness only from the world's seeded RNG
//! - Entities updated back to front, removals applied after the pass
//! - No rendering or platform dependencies

pub mod collision;
pub mod entities;
pub mod particle;
pub mod placement;
pub mod state;
pub mod tick;

pub use collision::{Body, Circle, CollisionResult, check_collision, push_out, resolve_overlaps};
pub use entities::{Disposition, Egg, Enemy, Field, Larva, LarvaOutcome, Obstacle, Player};
pub use particle::{Particle, ParticleColor, ParticleKind};
pub use placement::{PackingParams, pack_obstacles};
pub use state::{EntityKey, EntityKind, EntityView, FinalMessage, Snapshot, World};
pub use tick::{TickInput, tick};
