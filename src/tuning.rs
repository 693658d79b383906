//! Data-driven game balance
//!
//! Every value here has a sensible default; a JSON document may override any
//! subset of them.

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Balance values for one session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Play field ===
    pub width: f32,
    pub height: f32,
    /// Height of the safe band at the top of the field
    pub top_margin: f32,

    // === Cadence ===
    /// Simulation passes per second
    pub frame_rate: f32,
    /// Milliseconds between egg spawns
    pub egg_interval: f32,

    // === Population ===
    pub max_eggs: usize,
    pub obstacle_count: usize,
    pub placement_attempts: u32,
    /// Extra gap required between placed obstacles
    pub placement_buffer: f32,
    pub enemy_count: usize,

    // === Entities ===
    /// Milliseconds an egg incubates before hatching
    pub hatch_interval: f32,
    pub player_speed: f32,

    // === Scoring ===
    pub winning_score: u32,
    /// Most hatchlings that may be lost and still count as a win
    pub loss_tolerance: u32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            width: WORLD_WIDTH,
            height: WORLD_HEIGHT,
            top_margin: TOP_MARGIN,

            frame_rate: FRAME_RATE,
            egg_interval: 1000.0,

            max_eggs: 5,
            obstacle_count: 10,
            placement_attempts: 500,
            placement_buffer: 150.0,
            enemy_count: 5,

            hatch_interval: 10_000.0,
            player_speed: PLAYER_SPEED,

            winning_score: 30,
            loss_tolerance: 5,
        }
    }
}

impl Tuning {
    /// Parse tuning from JSON; missing fields keep their defaults
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let tuning: Tuning = serde_json::from_str(json)?;
        Ok(tuning.validate())
    }

    /// Milliseconds between simulation passes
    pub fn frame_interval(&self) -> f32 {
        1000.0 / self.frame_rate
    }

    /// Replace values that cannot drive a simulation with defaults
    pub fn validate(mut self) -> Self {
        let defaults = Self::default();

        if !(self.width > 0.0) || !(self.height > 0.0) {
            log::warn!(
                "Rejected field size {}x{}, using {}x{}",
                self.width,
                self.height,
                defaults.width,
                defaults.height
            );
            self.width = defaults.width;
            self.height = defaults.height;
        }
        if !(self.top_margin >= 0.0) || self.top_margin >= self.height {
            let fallback = defaults.top_margin.min(self.height * 0.5);
            log::warn!("Rejected top margin {}, using {}", self.top_margin, fallback);
            self.top_margin = fallback;
        }
        if !(self.frame_rate > 0.0) {
            log::warn!("Rejected frame rate {}, using {}", self.frame_rate, defaults.frame_rate);
            self.frame_rate = defaults.frame_rate;
        }
        if !(self.player_speed > 0.0) {
            log::warn!(
                "Rejected player speed {}, using {}",
                self.player_speed,
                defaults.player_speed
            );
            self.player_speed = defaults.player_speed;
        }

        self
    }
}
