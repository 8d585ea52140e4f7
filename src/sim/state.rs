//! Entity and session data types
//!
//! Everything the presentation layer can observe lives here.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Shape kinds an entity can take
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapeKind {
    Circle,
    Square,
    Triangle,
    Hexagon,
    Diamond,
    Star,
    Pentagon,
}

impl ShapeKind {
    /// Every kind, in draw order for the factory
    pub const ALL: [ShapeKind; 7] = [
        ShapeKind::Circle,
        ShapeKind::Square,
        ShapeKind::Triangle,
        ShapeKind::Hexagon,
        ShapeKind::Diamond,
        ShapeKind::Star,
        ShapeKind::Pentagon,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ShapeKind::Circle => "circle",
            ShapeKind::Square => "square",
            ShapeKind::Triangle => "triangle",
            ShapeKind::Hexagon => "hexagon",
            ShapeKind::Diamond => "diamond",
            ShapeKind::Star => "star",
            ShapeKind::Pentagon => "pentagon",
        }
    }

    /// Fill color as 0xRRGGBB
    pub fn color(&self) -> u32 {
        match self {
            ShapeKind::Circle => 0xFF6B6B,
            ShapeKind::Square => 0x4ECDC4,
            ShapeKind::Triangle => 0xFFE66D,
            ShapeKind::Hexagon => 0x95E1D3,
            ShapeKind::Diamond => 0xAA96DA,
            ShapeKind::Star => 0xF7DC6F,
            ShapeKind::Pentagon => 0xFCBAD3,
        }
    }
}

/// Usable play area in pixels, origin at the top-left corner
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Arena {
    pub width: f32,
    pub height: f32,
}

impl Arena {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width: width.max(0.0),
            height: height.max(0.0),
        }
    }

    /// True if a square of `size` at `pos` lies fully inside the arena
    pub fn contains_square(&self, pos: Vec2, size: f32) -> bool {
        pos.x >= 0.0 && pos.y >= 0.0 && pos.x + size <= self.width && pos.y + size <= self.height
    }
}

impl Default for Arena {
    fn default() -> Self {
        Self::new(crate::consts::DEFAULT_ARENA_WIDTH, crate::consts::DEFAULT_ARENA_HEIGHT)
    }
}

/// One on-screen shape
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    pub id: u32,
    pub kind: ShapeKind,
    /// Derived from `kind`
    pub color: u32,
    /// Edge length of the bounding square
    pub size: f32,
    /// Top-left corner of the bounding square
    pub pos: Vec2,
    /// Degrees, [0, 360)
    pub rotation: f32,
    /// Cosmetic float animation period in seconds
    pub float_period: f32,
    /// Set once when matched, never cleared
    pub pending_destruction: bool,
}

impl Entity {
    /// Whether the player may still interact with this entity
    #[inline]
    pub fn is_selectable(&self) -> bool {
        !self.pending_destruction
    }
}

/// Session lifecycle phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionPhase {
    /// Created but never started
    Ready,
    /// Spawning and accepting input
    Running,
    /// Spawner halted by the player
    Paused,
    /// Capacity reached. Terminal until restart
    Over,
}

/// Distinguishes timers of the current session from those of earlier ones
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Generation(pub u32);

impl Generation {
    pub fn next(self) -> Self {
        Generation(self.0.wrapping_add(1))
    }
}

/// Things that happened since the presentation layer last drained events
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    Started { generation: u32 },
    Spawned { id: u32 },
    Selected { id: u32 },
    Deselected { id: u32 },
    Reselected { from: u32, to: u32 },
    Matched { first: u32, second: u32, score: u64 },
    /// Single-tap mode destruction
    Destroyed { id: u32, score: u64 },
    Removed { ids: Vec<u32> },
    Cleared,
    Paused,
    Resumed,
    GameOver { score: u64 },
}

/// Read-only view handed to the presentation layer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub score: u64,
    pub is_over: bool,
    pub is_paused: bool,
    pub spawn_interval_ms: f64,
    pub selection: Option<u32>,
    pub now_ms: u64,
    pub generation: u32,
    pub entities: Vec<Entity>,
}
