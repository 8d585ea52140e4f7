//! Cooperative timer queue
//!
//! One virtual millisecond clock drives every delayed reaction. Timers carry
//! the generation that scheduled them; the session compares it at fire time,
//! so cancelling a generation never has to reach into the queue.

use std::collections::BTreeMap;

use super::state::Generation;

/// What a timer does when it fires
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TimerKind {
    /// Spawn scheduler tick
    Spawn,
    /// Remove settled entities
    Settle { ids: Vec<u32> },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Timer {
    pub due_ms: u64,
    pub generation: Generation,
    pub kind: TimerKind,
}

/// Timers ordered by (due time, scheduling order)
#[derive(Debug, Clone, Default)]
pub struct TimerQueue {
    entries: BTreeMap<(u64, u64), Timer>,
    next_seq: u64,
}

impl TimerQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule(&mut self, due_ms: u64, generation: Generation, kind: TimerKind) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.entries.insert(
            (due_ms, seq),
            Timer {
                due_ms,
                generation,
                kind,
            },
        );
    }

    /// Remove and return the earliest timer due at or before `now_ms`
    pub fn pop_due(&mut self, now_ms: u64) -> Option<Timer> {
        let (&(due, _), _) = self.entries.first_key_value()?;
        if due > now_ms {
            return None;
        }
        self.entries.pop_first().map(|(_, timer)| timer)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
