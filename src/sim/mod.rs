//! Game engine
//!
//! All gameplay logic lives here. No rendering or platform dependencies:
//! - Virtual millisecond clock, advanced by the host
//! - Seeded RNG only
//! - Stable iteration order (by entity ID)

pub mod autoplay;
pub mod factory;
pub mod matching;
pub mod registry;
pub mod session;
pub mod settle;
pub mod spawner;
pub mod state;
pub mod timer;

pub use autoplay::choose_tap;
pub use factory::create_entity;
pub use matching::{MatchMode, TapOutcome, resolve_tap};
pub use registry::Registry;
pub use session::Session;
pub use settle::DestructionCoordinator;
pub use spawner::{FireAction, SpawnScheduler, SpawnState};
pub use state::{Arena, Entity, GameEvent, Generation, SessionPhase, SessionSnapshot, ShapeKind};
pub use timer::{Timer, TimerKind, TimerQueue};
