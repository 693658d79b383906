//! Session preferences
//!
//! Injected by the host at startup. Nothing here is ever written back.

use serde::{Deserialize, Serialize};

/// Session preferences
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Draw collision circles, aim line, hatch timers and the lost counter
    pub debug: bool,
    /// Fixed RNG seed (random per session when absent)
    pub seed: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            debug: true,
            seed: None,
        }
    }
}

impl Settings {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Seed to start a session with
    pub fn session_seed(&self) -> u64 {
        self.seed.unwrap_or_else(rand::random)
    }
}
