//! Shape Destroyer - a real-time shape matching game
//!
//! Core modules:
//! - `sim`: Game engine (spawner, registry, match engine, session controller)
//! - `settings`: Data-driven game balance and difficulty presets
//! - `web`: wasm-bindgen bridge for a browser presentation layer

pub mod settings;
pub mod sim;
#[cfg(target_arch = "wasm32")]
pub mod web;

pub use settings::{Difficulty, Settings, SettingsError};
pub use sim::Session;

/// Game configuration constants
pub mod consts {
    /// Score awarded per successful match
    pub const MATCH_REWARD: u64 = 10;
    /// Shapes spawned when a session starts
    pub const INITIAL_ENTITIES: usize = 10;
    /// Delay between a match and removal, long enough for the burst effect
    pub const SETTLE_DELAY_MS: u64 = 400;

    /// Shape edge length range (pixels)
    pub const SHAPE_MIN_SIZE: f32 = 40.0;
    pub const SHAPE_MAX_SIZE: f32 = 100.0;
    /// Cosmetic float animation period range (seconds)
    pub const FLOAT_PERIOD_MIN: f32 = 2.0;
    pub const FLOAT_PERIOD_MAX: f32 = 5.0;

    /// Arena used until the host reports its real size
    pub const DEFAULT_ARENA_WIDTH: f32 = 1280.0;
    pub const DEFAULT_ARENA_HEIGHT: f32 = 720.0;

    /// Host frame step for the headless demo (ms)
    pub const FRAME_MS: u64 = 16;
}
