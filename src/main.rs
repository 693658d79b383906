//! Hatchery entry point
//!
//! Runs a headless session with a scripted pointer and prints the final
//! snapshot as JSON.
//!
//! Usage: `hatchery [tuning.json] [settings.json]`

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use glam::Vec2;
    use hatchery::sim::{TickInput, World, tick};
    use hatchery::{Settings, Tuning};

    /// Fixed frame delta in milliseconds
    const DT: f32 = 16.0;
    /// Give up after this many frames (about 53 minutes of play)
    const MAX_FRAMES: u64 = 200_000;
    /// Frames spent steering toward each waypoint
    const FRAMES_PER_WAYPOINT: u64 = 240;

    /// Waypoints as fractions of the field, patrolling just under the safe zone
    const PATROL: [(f32, f32); 6] = [
        (0.15, 0.45),
        (0.5, 0.55),
        (0.85, 0.45),
        (0.85, 0.8),
        (0.5, 0.7),
        (0.15, 0.8),
    ];

    fn load<T>(path: Option<&str>, what: &str, parse: fn(&str) -> Result<T, serde_json::Error>) -> T
    where
        T: Default,
    {
        let Some(path) = path else {
            return T::default();
        };
        let parsed = std::fs::read_to_string(path)
            .map_err(|e| e.to_string())
            .and_then(|text| parse(&text).map_err(|e| e.to_string()));
        match parsed {
            Ok(value) => {
                log::info!("Loaded {} from {}", what, path);
                value
            }
            Err(e) => {
                log::warn!("Failed to load {} from {}: {} (using defaults)", what, path, e);
                T::default()
            }
        }
    }

    fn waypoint(world: &World, frame: u64) -> Vec2 {
        let (fx, fy) = PATROL[(frame / FRAMES_PER_WAYPOINT) as usize % PATROL.len()];
        Vec2::new(world.field.width * fx, world.field.height * fy)
    }

    pub fn run() {
        env_logger::init();
        log::info!("Hatchery (headless) starting...");

        let args: Vec<String> = std::env::args().skip(1).collect();
        let tuning = load(args.first().map(String::as_str), "tuning", Tuning::from_json);
        let settings = load(args.get(1).map(String::as_str), "settings", Settings::from_json);

        let mut world = World::with_tuning(tuning, settings.session_seed());
        world.debug = settings.debug;

        let mut frame = 0;
        while !world.game_over && frame < MAX_FRAMES {
            let input = TickInput {
                pointer: Some(waypoint(&world, frame)),
                ..Default::default()
            };
            tick(&mut world, &input, DT);
            frame += 1;

            if frame % 3_600 == 0 {
                log::info!(
                    "Frame {}: score {}, lost {}, eggs {}, larvae {}",
                    frame,
                    world.score,
                    world.lost_hatchlings,
                    world.eggs.len(),
                    world.larvae.len()
                );
            }
        }

        if world.game_over {
            log::info!("Finished after {} frames", frame);
        } else {
            log::warn!("Stopped at the {} frame cap without a winner", MAX_FRAMES);
        }

        match serde_json::to_string_pretty(&world.snapshot()) {
            Ok(json) => println!("{}", json),
            Err(e) => log::error!("Failed to serialize snapshot: {}", e),
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    headless::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // The web host drives the library directly
}
