//! Per-frame simulation tick
//!
//! The host calls [`tick`] once per animation frame with the raw frame delta.
//! A full simulation pass only runs once enough time has accumulated, so the
//! game runs at the same pace regardless of the display refresh rate.

use glam::Vec2;

use super::collision::Body;
use super::entities::{Disposition, LarvaOutcome};
use super::particle::ParticleKind;
use super::state::{EntityKey, EntityKind, World};
use crate::consts::{FIREFLIES_PER_RESCUE, SPARKS_PER_LOSS};

/// Input commands for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Latest pointer target, if it moved
    pub pointer: Option<Vec2>,
    /// Flip the debug overlay
    pub toggle_debug: bool,
    /// Start over
    pub restart: bool,
}

/// Indices flagged for removal during a pass
#[derive(Debug, Default)]
struct Removals {
    eggs: Vec<usize>,
    larvae: Vec<usize>,
    particles: Vec<usize>,
}

/// Advance the world by one animation frame of `dt` milliseconds
pub fn tick(world: &mut World, input: &TickInput, dt: f32) {
    if input.restart {
        world.restart();
    }
    if input.toggle_debug {
        world.debug = !world.debug;
        log::debug!("Debug overlay {}", if world.debug { "on" } else { "off" });
    }
    if let Some(pointer) = input.pointer {
        world.pointer = pointer;
    }

    if world.frame_timer > world.tuning.frame_interval() {
        run_pass(world, dt);
        world.frame_timer = 0.0;
    }
    world.frame_timer += dt;

    if world.egg_timer > world.tuning.egg_interval
        && world.eggs.len() < world.tuning.max_eggs
        && !world.game_over
    {
        world.spawn_egg();
        world.egg_timer = 0.0;
    } else {
        world.egg_timer += dt;
    }

    world.check_win();
}

/// Draw then update every live entity, back to front, then drop the dead
fn run_pass(world: &mut World, dt: f32) {
    let mut draw_list = std::mem::take(&mut world.draw_list);
    draw_list.clear();
    let mut removals = Removals::default();

    for key in world.draw_order() {
        draw_list.push_entity(world, key);
        update_entity(world, key, dt, &mut removals);
    }

    retain_unmarked(&mut world.eggs, &removals.eggs);
    retain_unmarked(&mut world.larvae, &removals.larvae);
    retain_unmarked(&mut world.particles, &removals.particles);

    world.draw_list = draw_list;
    world.passes += 1;
}

fn update_entity(world: &mut World, key: EntityKey, dt: f32, removals: &mut Removals) {
    let i = key.index;
    match key.kind {
        EntityKind::Player => {
            world
                .player
                .update(world.pointer, &world.field, &world.obstacles);
        }

        // Obstacles never move
        EntityKind::Obstacle => {}

        EntityKind::Egg => {
            let colliders = std::iter::once(world.player.circle())
                .chain(world.obstacles.iter().map(Body::circle))
                .chain(world.enemies.iter().map(Body::circle));
            let egg = &mut world.eggs[i];
            if egg.update(dt, &world.field, colliders) == Disposition::Remove {
                let pos = egg.pos;
                removals.eggs.push(i);
                world.spawn_larva(pos);
            }
        }

        EntityKind::Larva => {
            let hatched = &removals.eggs;
            let colliders = std::iter::once(world.player.circle())
                .chain(world.obstacles.iter().map(Body::circle))
                .chain(
                    world
                        .eggs
                        .iter()
                        .enumerate()
                        .filter(|(j, _)| !hatched.contains(j))
                        .map(|(_, egg)| egg.circle()),
                );
            let larva = &mut world.larvae[i];
            let outcome = larva.update(&world.field, world.game_over, colliders, &world.enemies);
            let pos = larva.pos;

            match outcome {
                LarvaOutcome::Crawling => {}
                LarvaOutcome::Rescued => {
                    if !world.game_over {
                        world.score += 1;
                    }
                    log::debug!("Larva rescued (score {})", world.score);
                    world.spawn_particles(ParticleKind::Firefly, pos, FIREFLIES_PER_RESCUE);
                }
                LarvaOutcome::Eaten => {
                    world.lost_hatchlings += 1;
                    log::debug!("Larva eaten (lost {})", world.lost_hatchlings);
                    world.spawn_particles(ParticleKind::Spark, pos, SPARKS_PER_LOSS);
                }
            }
            if outcome.disposition() == Disposition::Remove {
                removals.larvae.push(i);
            }
        }

        EntityKind::Enemy => {
            let colliders = std::iter::once(world.player.circle())
                .chain(world.obstacles.iter().map(Body::circle));
            let enemy = &mut world.enemies[i];
            if enemy.update(&world.field, world.game_over, &mut world.rng, colliders) {
                log::debug!("Enemy {} re-entering at y={:.0}", i, enemy.pos.y);
            }
        }

        EntityKind::Particle => {
            if world.particles[i].update() == Disposition::Remove {
                removals.particles.push(i);
            }
        }
    }
}

/// Drop the items at the marked indices, keeping the rest in order
fn retain_unmarked<T>(items: &mut Vec<T>, marked: &[usize]) {
    if marked.is_empty() {
        return;
    }
    let mut index = 0;
    items.retain(|_| {
        let keep = !marked.contains(&index);
        index += 1;
        keep
    });
}
