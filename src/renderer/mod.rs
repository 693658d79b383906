//! Draw output for an external renderer
//!
//! The simulation never draws. Each pass records draw commands in back-to-front
//! order; a renderer replays them, optionally uploading sprite instances as raw
//! bytes.

pub mod commands;
pub mod instance;

pub use commands::{DrawCommand, DrawList, Hud, Overlay, SpriteRect};
pub use instance::{SpriteInstance, colors};
