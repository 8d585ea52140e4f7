//! Game settings and difficulty presets
//!
//! Loaded from JSON on native builds; the web build receives them from JS.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;
use crate::sim::{Arena, MatchMode};

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse settings: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid setting `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Difficulty preset levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Difficulty {
    Relaxed,
    #[default]
    Normal,
    Frantic,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Relaxed => "Relaxed",
            Difficulty::Normal => "Normal",
            Difficulty::Frantic => "Frantic",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "relaxed" | "easy" => Some(Difficulty::Relaxed),
            "normal" => Some(Difficulty::Normal),
            "frantic" | "hard" => Some(Difficulty::Frantic),
            _ => None,
        }
    }

    /// Shapes on screen that end the run
    pub fn capacity(&self) -> usize {
        match self {
            Difficulty::Relaxed => 60,
            Difficulty::Normal => 50,
            Difficulty::Frantic => 40,
        }
    }

    /// (initial interval ms, floor ms, decay per spawn timer fire)
    pub fn spawn_curve(&self) -> (f64, f64, f64) {
        match self {
            Difficulty::Relaxed => (2000.0, 500.0, 0.98),
            Difficulty::Normal => (1500.0, 300.0, 0.97),
            Difficulty::Frantic => (1200.0, 250.0, 0.95),
        }
    }
}

/// Game tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub difficulty: Difficulty,
    pub match_mode: MatchMode,

    // === Spawning ===
    /// Registry size that ends the session
    pub capacity: usize,
    /// Shapes spawned immediately on start
    pub initial_entities: usize,
    pub initial_spawn_interval_ms: f64,
    /// Lower bound for the spawn interval
    pub spawn_interval_floor_ms: f64,
    /// Multiplier applied to the interval per spawn timer fire, in (0, 1)
    pub spawn_decay: f64,

    // === Destruction ===
    /// Time between a match and structural removal
    pub settle_delay_ms: u64,

    pub arena: Arena,
}

impl Default for Settings {
    fn default() -> Self {
        Self::from_preset(Difficulty::Normal)
    }
}

impl Settings {
    /// Create settings from a difficulty preset
    pub fn from_preset(difficulty: Difficulty) -> Self {
        let (initial, floor, decay) = difficulty.spawn_curve();
        Self {
            difficulty,
            match_mode: MatchMode::Pair,
            capacity: difficulty.capacity(),
            initial_entities: INITIAL_ENTITIES,
            initial_spawn_interval_ms: initial,
            spawn_interval_floor_ms: floor,
            spawn_decay: decay,
            settle_delay_ms: SETTLE_DELAY_MS,
            arena: Arena::default(),
        }
    }

    /// Apply a difficulty preset (updates capacity and spawn curve only)
    pub fn apply_preset(&mut self, difficulty: Difficulty) {
        let (initial, floor, decay) = difficulty.spawn_curve();
        self.difficulty = difficulty;
        self.capacity = difficulty.capacity();
        self.initial_spawn_interval_ms = initial;
        self.spawn_interval_floor_ms = floor;
        self.spawn_decay = decay;
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        fn invalid(field: &'static str, reason: impl Into<String>) -> SettingsError {
            SettingsError::Invalid {
                field,
                reason: reason.into(),
            }
        }

        if self.capacity == 0 {
            return Err(invalid("capacity", "must be at least 1"));
        }
        if self.initial_entities >= self.capacity {
            return Err(invalid(
                "initial_entities",
                format!("must be below capacity ({})", self.capacity),
            ));
        }
        if !(self.spawn_interval_floor_ms >= 1.0) {
            return Err(invalid("spawn_interval_floor_ms", "must be at least 1 ms"));
        }
        if !(self.initial_spawn_interval_ms >= self.spawn_interval_floor_ms) {
            return Err(invalid(
                "initial_spawn_interval_ms",
                "must not be below spawn_interval_floor_ms",
            ));
        }
        if !(self.spawn_decay > 0.0 && self.spawn_decay < 1.0) {
            return Err(invalid("spawn_decay", "must be in (0, 1)"));
        }
        if !(self.arena.width > 0.0 && self.arena.height > 0.0) {
            return Err(invalid("arena", "width and height must be positive"));
        }
        Ok(())
    }

    /// Parse and validate settings from JSON. Missing fields take defaults.
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn load_from_path(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let json = std::fs::read_to_string(path.as_ref())?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.as_ref().display());
        Ok(settings)
    }

    pub fn to_json(&self) -> Result<String, SettingsError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
