//! Spawn scheduler
//!
//! Self-rescheduling spawn timer with a geometrically shrinking interval.
//! The ramp is time based: decay applies on every fire that isn't halted,
//! whether or not an entity was actually spawned.

use serde::{Deserialize, Serialize};

use super::state::Generation;
use super::timer::{TimerKind, TimerQueue};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SpawnState {
    /// No timer outstanding. Resume re-arms
    Idle,
    /// Exactly one spawn timer outstanding for the current generation
    Armed,
    /// Session over, never re-arms
    Stopped,
}

/// What the session should do for a spawn timer fire
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FireAction {
    /// Paused, over or not armed: nothing happens, nothing reschedules
    Halt,
    /// At capacity: no spawn, but check the terminal condition and reschedule
    SkipSpawn,
    /// Spawn one entity then reschedule
    Spawn,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpawnScheduler {
    state: SpawnState,
    interval_ms: f64,
    floor_ms: f64,
    decay: f64,
}

impl SpawnScheduler {
    pub fn new(initial_ms: f64, floor_ms: f64, decay: f64) -> Self {
        Self {
            state: SpawnState::Idle,
            interval_ms: initial_ms.max(floor_ms),
            floor_ms,
            decay,
        }
    }

    pub fn state(&self) -> SpawnState {
        self.state
    }

    pub fn interval_ms(&self) -> f64 {
        self.interval_ms
    }

    /// Queue the next fire one interval from `now_ms`. No-op unless idle.
    pub fn arm(&mut self, now_ms: u64, generation: Generation, timers: &mut TimerQueue) {
        if self.state != SpawnState::Idle {
            return;
        }
        // Round up so a fire never lands before its interval has elapsed
        let due = now_ms + self.interval_ms.ceil() as u64;
        timers.schedule(due, generation, TimerKind::Spawn);
        self.state = SpawnState::Armed;
    }

    /// Decide what a fire means. `halted` is true while paused or over.
    pub fn on_fire(&mut self, halted: bool, at_capacity: bool) -> FireAction {
        if self.state != SpawnState::Armed {
            return FireAction::Halt;
        }
        // The outstanding timer is the one firing now
        self.state = SpawnState::Idle;
        if halted {
            FireAction::Halt
        } else if at_capacity {
            FireAction::SkipSpawn
        } else {
            FireAction::Spawn
        }
    }

    /// Shrink the interval toward the floor. Runs on every fire that isn't halted.
    pub fn decay(&mut self) {
        self.interval_ms = (self.interval_ms * self.decay).max(self.floor_ms);
    }

    pub fn stop(&mut self) {
        self.state = SpawnState::Stopped;
    }
}
