//! World state
//!
//! The world owns every entity collection and is the only place counters,
//! spawns and removals happen.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::entities::{Egg, Enemy, Field, Larva, Obstacle, Player};
use super::particle::{Particle, ParticleColor, ParticleKind};
use super::placement::{PackingParams, pack_obstacles};
use crate::renderer::DrawList;
use crate::tuning::Tuning;

/// Entity variant tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EntityKind {
    Player,
    Egg,
    Obstacle,
    Enemy,
    Larva,
    Particle,
}

/// Reference to one live entity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntityKey {
    pub kind: EntityKind,
    /// Index into the variant's collection (0 for the player)
    pub index: usize,
}

/// End-of-game text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinalMessage {
    /// Whether few enough hatchlings were lost to call it a win
    pub won: bool,
    pub headline: String,
    pub detail: String,
    pub footer: String,
}

/// Read-only view of one entity
#[derive(Debug, Clone, Serialize)]
pub struct EntityView {
    pub kind: EntityKind,
    pub pos: Vec2,
    pub radius: f32,
    /// Sprite sheet (column, row)
    pub frame: (u32, u32),
    pub color: Option<ParticleColor>,
}

/// Read-only view of the whole session
#[derive(Debug, Clone, Serialize)]
pub struct Snapshot {
    /// Back to front
    pub entities: Vec<EntityView>,
    pub score: u32,
    pub lost_hatchlings: u32,
    pub game_over: bool,
    pub debug: bool,
    pub message: Option<FinalMessage>,
}

/// Complete session state
#[derive(Debug, Clone)]
pub struct World {
    pub tuning: Tuning,
    pub field: Field,
    /// Draw collision circles and timers
    pub debug: bool,
    pub player: Player,
    pub obstacles: Vec<Obstacle>,
    pub eggs: Vec<Egg>,
    pub larvae: Vec<Larva>,
    pub enemies: Vec<Enemy>,
    pub particles: Vec<Particle>,
    /// Hatchlings rescued
    pub score: u32,
    /// Hatchlings eaten
    pub lost_hatchlings: u32,
    /// Set once the winning score is reached, cleared only by restart
    pub game_over: bool,
    /// Where the player is steering
    pub pointer: Vec2,
    /// Milliseconds since the last simulation pass
    pub frame_timer: f32,
    /// Milliseconds since the last egg was laid
    pub egg_timer: f32,
    /// Simulation passes run this session
    pub passes: u64,
    /// Draw commands from the latest pass
    pub draw_list: DrawList,
    pub(crate) rng: Pcg32,
}

impl World {
    /// Create a session with default tuning
    pub fn new(seed: u64) -> Self {
        Self::with_tuning(Tuning::default(), seed)
    }

    pub fn with_tuning(tuning: Tuning, seed: u64) -> Self {
        log::info!("World seed: {}", seed);
        Self::with_rng(tuning, Pcg32::seed_from_u64(seed))
    }

    /// Create a session drawing all randomness from `rng`
    pub fn with_rng(tuning: Tuning, rng: Pcg32) -> Self {
        let field = Field::from_tuning(&tuning);
        let mut world = Self {
            player: Player::new(&field, tuning.player_speed),
            pointer: field.center(),
            field,
            tuning,
            debug: true,
            obstacles: Vec::new(),
            eggs: Vec::new(),
            larvae: Vec::new(),
            enemies: Vec::new(),
            particles: Vec::new(),
            score: 0,
            lost_hatchlings: 0,
            game_over: false,
            frame_timer: 0.0,
            egg_timer: 0.0,
            passes: 0,
            draw_list: DrawList::default(),
            rng,
        };
        world.init();
        world
    }

    /// Spawn the enemy pool and lay out obstacles
    pub fn init(&mut self) {
        for _ in 0..self.tuning.enemy_count {
            let enemy = Enemy::spawn(&self.field, &mut self.rng);
            self.enemies.push(enemy);
        }

        let params = PackingParams {
            target: self.tuning.obstacle_count,
            max_attempts: self.tuning.placement_attempts,
            buffer: self.tuning.placement_buffer,
        };
        self.obstacles = pack_obstacles(&self.field, &params, &mut self.rng);

        log::info!(
            "World ready: {} enemies, {} obstacles",
            self.enemies.len(),
            self.obstacles.len()
        );
    }

    /// Start a fresh session on the same field
    pub fn restart(&mut self) {
        log::info!(
            "Restarting (score {}, lost {})",
            self.score,
            self.lost_hatchlings
        );
        self.player.reset(&self.field);
        self.obstacles.clear();
        self.eggs.clear();
        self.larvae.clear();
        self.enemies.clear();
        self.particles.clear();
        self.draw_list = DrawList::default();
        self.pointer = self.field.center();
        self.score = 0;
        self.lost_hatchlings = 0;
        self.game_over = false;
        self.passes = 0;
        self.init();
    }

    /// Lay one egg at a random spot
    pub fn spawn_egg(&mut self) {
        let egg = Egg::spawn(&self.field, self.tuning.hatch_interval, &mut self.rng);
        log::debug!("Egg laid at ({:.0}, {:.0})", egg.pos.x, egg.pos.y);
        self.eggs.push(egg);
    }

    /// Hatch a larva where an egg was
    pub fn spawn_larva(&mut self, pos: Vec2) {
        let larva = Larva::new(pos, &mut self.rng);
        log::debug!("Larva hatched at ({:.0}, {:.0})", pos.x, pos.y);
        self.larvae.push(larva);
    }

    pub fn spawn_particles(&mut self, kind: ParticleKind, pos: Vec2, count: usize) {
        for _ in 0..count {
            let particle = Particle::new(kind, pos, &mut self.rng);
            self.particles.push(particle);
        }
    }

    /// Mark the game over once enough hatchlings are safe
    pub fn check_win(&mut self) {
        if !self.game_over && self.score >= self.tuning.winning_score {
            self.game_over = true;
            log::info!(
                "Game over after {} passes: score {}, lost {}",
                self.passes,
                self.score,
                self.lost_hatchlings
            );
        }
    }

    /// Closing text, once the game is over
    pub fn final_message(&self) -> Option<FinalMessage> {
        if !self.game_over {
            return None;
        }
        let won = self.lost_hatchlings <= self.tuning.loss_tolerance;
        let (headline, detail) = if won {
            (
                "Bullseye!!!".to_string(),
                "You saved the hatchlings!".to_string(),
            )
        } else {
            (
                "Bullocks!".to_string(),
                format!("You lost {} hatchlings", self.lost_hatchlings),
            )
        };
        Some(FinalMessage {
            won,
            headline,
            detail,
            footer: format!(
                "Final score: {}. Press 'R' to restart the game",
                self.score
            ),
        })
    }

    /// Every live entity, back to front
    ///
    /// Sorted by collision y; ties keep the order player, eggs, obstacles,
    /// enemies, larvae, particles.
    pub fn draw_order(&self) -> Vec<EntityKey> {
        fn tagged<I>(kind: EntityKind, ys: I) -> impl Iterator<Item = (f32, EntityKey)>
        where
            I: Iterator<Item = f32>,
        {
            ys.enumerate().map(move |(index, y)| (y, EntityKey { kind, index }))
        }

        let mut keyed: Vec<(f32, EntityKey)> = Vec::with_capacity(
            1 + self.eggs.len()
                + self.obstacles.len()
                + self.enemies.len()
                + self.larvae.len()
                + self.particles.len(),
        );
        keyed.extend(tagged(EntityKind::Player, std::iter::once(self.player.pos.y)));
        keyed.extend(tagged(EntityKind::Egg, self.eggs.iter().map(|e| e.pos.y)));
        keyed.extend(tagged(EntityKind::Obstacle, self.obstacles.iter().map(|o| o.pos.y)));
        keyed.extend(tagged(EntityKind::Enemy, self.enemies.iter().map(|e| e.pos.y)));
        keyed.extend(tagged(EntityKind::Larva, self.larvae.iter().map(|l| l.pos.y)));
        keyed.extend(tagged(EntityKind::Particle, self.particles.iter().map(|p| p.pos.y)));

        // Stable: equal heights keep insertion order
        keyed.sort_by(|a, b| a.0.total_cmp(&b.0));
        keyed.into_iter().map(|(_, key)| key).collect()
    }

    /// Read-only view of one entity
    ///
    /// `None` when the key no longer names a live entity, e.g. one taken from
    /// an older [`World::draw_order`].
    pub fn view(&self, key: EntityKey) -> Option<EntityView> {
        let i = key.index;
        let (pos, radius, frame, color) = match key.kind {
            EntityKind::Player => {
                if i != 0 {
                    return None;
                }
                let p = &self.player;
                (p.pos, p.radius, (0, p.facing), None)
            }
            EntityKind::Egg => {
                let e = self.eggs.get(i)?;
                (e.pos, e.radius, (0, 0), None)
            }
            EntityKind::Obstacle => {
                let o = self.obstacles.get(i)?;
                (o.pos, o.radius, o.frame, None)
            }
            EntityKind::Enemy => {
                let e = self.enemies.get(i)?;
                (e.pos, e.radius, (0, e.frame_row), None)
            }
            EntityKind::Larva => {
                let l = self.larvae.get(i)?;
                (l.pos, l.radius, (0, l.frame_row), None)
            }
            EntityKind::Particle => {
                let p = self.particles.get(i)?;
                (p.pos, p.radius, (0, 0), Some(p.color()))
            }
        };
        Some(EntityView {
            kind: key.kind,
            pos,
            radius,
            frame,
            color,
        })
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            entities: self
                .draw_order()
                .into_iter()
                .filter_map(|key| self.view(key))
                .collect(),
            score: self.score,
            lost_hatchlings: self.lost_hatchlings,
            game_over: self.game_over,
            debug: self.debug,
            message: self.final_message(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_world_populated() {
        let world = World::new(12345);
        assert_eq!(world.enemies.len(), 5);
        assert!(world.obstacles.len() <= 10);
        assert!(!world.obstacles.is_empty());
        assert!(world.eggs.is_empty());
        assert_eq!(world.player.pos, world.field.center());
        assert_eq!(world.pointer, world.field.center());
        assert!(!world.game_over);
    }

    #[test]
    fn test_same_seed_same_layout() {
        let a = World::new(777);
        let b = World::new(777);
        assert_eq!(a.obstacles.len(), b.obstacles.len());
        for (x, y) in a.obstacles.iter().zip(&b.obstacles) {
            assert_eq!(x.pos, y.pos);
        }
        for (x, y) in a.enemies.iter().zip(&b.enemies) {
            assert_eq!(x.pos, y.pos);
        }
    }

    #[test]
    fn test_restart_resets_session() {
        let mut world = World::new(42);
        world.score = 12;
        world.lost_hatchlings = 7;
        world.game_over = true;
        world.spawn_egg();
        world.spawn_larva(Vec2::new(300.0, 500.0));
        world.spawn_particles(ParticleKind::Firefly, Vec2::new(300.0, 250.0), 3);
        world.player.pos = Vec2::new(100.0, 600.0);
        world.pointer = Vec2::new(100.0, 600.0);

        world.restart();

        assert_eq!(world.score, 0);
        assert_eq!(world.lost_hatchlings, 0);
        assert!(!world.game_over);
        assert!(world.eggs.is_empty());
        assert!(world.larvae.is_empty());
        assert!(world.particles.is_empty());
        assert_eq!(world.enemies.len(), 5);
        assert!(!world.obstacles.is_empty());
        assert_eq!(world.player.pos, world.field.center());
        assert_eq!(world.pointer, world.field.center());
    }

    #[test]
    fn test_final_message_branches() {
        let mut world = World::new(1);
        assert_eq!(world.final_message(), None);

        world.game_over = true;
        world.score = 30;
        world.lost_hatchlings = 5;
        let msg = world.final_message().unwrap();
        assert!(msg.won);
        assert_eq!(msg.headline, "Bullseye!!!");
        assert_eq!(msg.detail, "You saved the hatchlings!");
        assert_eq!(msg.footer, "Final score: 30. Press 'R' to restart the game");

        world.lost_hatchlings = 6;
        let msg = world.final_message().unwrap();
        assert!(!msg.won);
        assert_eq!(msg.headline, "Bullocks!");
        assert_eq!(msg.detail, "You lost 6 hatchlings");
    }

    #[test]
    fn test_draw_order_sorted_and_stable() {
        let mut world = World::new(3);
        world.obstacles.clear();
        world.enemies.clear();
        let y = world.player.pos.y;
        world.eggs.push(Egg::new(Vec2::new(100.0, y), 10_000.0));
        world.eggs.push(Egg::new(Vec2::new(200.0, y - 50.0), 10_000.0));

        let order = world.draw_order();
        let kinds: Vec<_> = order.iter().map(|k| (k.kind, k.index)).collect();
        assert_eq!(
            kinds,
            vec![
                (EntityKind::Egg, 1),
                (EntityKind::Player, 0),
                (EntityKind::Egg, 0),
            ]
        );
    }

    #[test]
    fn test_stale_key_has_no_view() {
        let mut world = World::new(4);
        world.spawn_egg();
        let key = EntityKey {
            kind: EntityKind::Egg,
            index: 0,
        };
        assert!(world.view(key).is_some());

        world.eggs.clear();
        assert!(world.view(key).is_none());
        let past_end = EntityKey {
            kind: EntityKind::Enemy,
            index: world.enemies.len(),
        };
        assert!(world.view(past_end).is_none());
        let second_player = EntityKey {
            kind: EntityKind::Player,
            index: 1,
        };
        assert!(world.view(second_player).is_none());
    }

    #[test]
    fn test_snapshot_serializes() {
        let mut world = World::new(9);
        world.spawn_particles(ParticleKind::Spark, Vec2::new(400.0, 400.0), 2);
        let snapshot = world.snapshot();
        assert_eq!(snapshot.entities.len(), 1 + world.obstacles.len() + 5 + 2);
        let sparks = snapshot
            .entities
            .iter()
            .filter(|e| e.color == Some(ParticleColor::Blue))
            .count();
        assert_eq!(sparks, 2);

        let json = serde_json::to_string(&snapshot).unwrap();
        assert!(json.contains("\"score\":0"));
        assert!(json.contains("\"Particle\""));
    }
}
