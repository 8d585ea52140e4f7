//! Destruction coordinator
//!
//! Flagged entities stay in the registry for a fixed settle delay so the
//! presentation layer can finish its destruction effect, then get removed.

use super::registry::Registry;
use super::state::Generation;
use super::timer::{TimerKind, TimerQueue};

#[derive(Debug, Clone)]
pub struct DestructionCoordinator {
    settle_delay_ms: u64,
    /// Removal batches scheduled by this generation and not yet fired
    in_flight: usize,
}

impl DestructionCoordinator {
    pub fn new(settle_delay_ms: u64) -> Self {
        Self {
            settle_delay_ms,
            in_flight: 0,
        }
    }

    pub fn in_flight(&self) -> usize {
        self.in_flight
    }

    pub fn schedule_removal(
        &mut self,
        ids: Vec<u32>,
        now_ms: u64,
        generation: Generation,
        timers: &mut TimerQueue,
    ) {
        timers.schedule(now_ms + self.settle_delay_ms, generation, TimerKind::Settle { ids });
        self.in_flight += 1;
    }

    /// Remove a fired batch. Ids already gone are skipped.
    pub fn settle(&mut self, registry: &mut Registry, ids: &[u32]) -> Vec<u32> {
        self.in_flight = self.in_flight.saturating_sub(1);
        registry.remove_settled(ids)
    }

    /// A fired batch that may not touch the registry (session over)
    pub fn discard(&mut self) {
        self.in_flight = self.in_flight.saturating_sub(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::{Entity, ShapeKind};
    use glam::Vec2;

    fn entity(id: u32) -> Entity {
        Entity {
            id,
            kind: ShapeKind::Square,
            color: ShapeKind::Square.color(),
            size: 40.0,
            pos: Vec2::ZERO,
            rotation: 90.0,
            float_period: 4.0,
            pending_destruction: true,
        }
    }

    #[test]
    fn test_removal_scheduled_after_delay() {
        let mut timers = TimerQueue::new();
        let mut c = DestructionCoordinator::new(400);
        c.schedule_removal(vec![1, 2], 1000, Generation(3), &mut timers);
        assert_eq!(c.in_flight(), 1);
        assert!(timers.pop_due(1399).is_none());
        let timer = timers.pop_due(1400).unwrap();
        assert_eq!(timer.generation, Generation(3));
        assert_eq!(timer.kind, TimerKind::Settle { ids: vec![1, 2] });
    }

    #[test]
    fn test_settle_is_idempotent() {
        let mut reg = Registry::new(10);
        reg.insert(entity(1));
        reg.insert(entity(2));
        let mut c = DestructionCoordinator::new(400);
        let mut timers = TimerQueue::new();
        c.schedule_removal(vec![1, 2], 0, Generation(1), &mut timers);
        c.schedule_removal(vec![1, 2], 0, Generation(1), &mut timers);
        assert_eq!(c.settle(&mut reg, &[1, 2]), vec![1, 2]);
        assert!(c.settle(&mut reg, &[1, 2]).is_empty());
        assert!(reg.is_empty());
        assert_eq!(c.in_flight(), 0);
    }
}
