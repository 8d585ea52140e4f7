//! Game session controller
//!
//! Owns the registry, selection, score and timers of one run. Every mutation
//! is a discrete reaction to a command, a tap, or a timer fire; none of them
//! can interleave, so no locking is needed.

use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::factory::create_entity;
use super::matching::{TapOutcome, resolve_tap};
use super::registry::Registry;
use super::settle::DestructionCoordinator;
use super::spawner::{FireAction, SpawnScheduler, SpawnState};
use super::state::{Arena, Entity, GameEvent, Generation, SessionPhase, SessionSnapshot};
use super::timer::{Timer, TimerKind, TimerQueue};
use crate::consts::MATCH_REWARD;
use crate::settings::Settings;

pub struct Session {
    settings: Settings,
    seed: u64,
    rng: Pcg32,
    /// Virtual clock, milliseconds since construction
    now_ms: u64,
    generation: Generation,
    phase: SessionPhase,
    registry: Registry,
    selection: Option<u32>,
    score: u64,
    next_id: u32,
    spawner: SpawnScheduler,
    settler: DestructionCoordinator,
    timers: TimerQueue,
    events: Vec<GameEvent>,
}

impl Session {
    /// Create an idle session. Nothing spawns until `start()`.
    pub fn new(settings: Settings, seed: u64) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
            seed,
            now_ms: 0,
            generation: Generation::default(),
            phase: SessionPhase::Ready,
            registry: Registry::new(settings.capacity),
            selection: None,
            score: 0,
            next_id: 0,
            spawner: Self::fresh_spawner(&settings),
            settler: DestructionCoordinator::new(settings.settle_delay_ms),
            timers: TimerQueue::new(),
            events: Vec::new(),
            settings,
        }
    }

    fn fresh_spawner(settings: &Settings) -> SpawnScheduler {
        SpawnScheduler::new(
            settings.initial_spawn_interval_ms,
            settings.spawn_interval_floor_ms,
            settings.spawn_decay,
        )
    }

    // === Commands ===

    /// Begin the first run. No-op once started; use `restart()` afterwards.
    pub fn start(&mut self) {
        if self.phase == SessionPhase::Ready {
            self.reset();
        }
    }

    /// Throw away the current run and begin a fresh one
    pub fn restart(&mut self) {
        self.reset();
    }

    fn reset(&mut self) {
        // Timers of the old generation stay queued and are discarded on fire
        self.generation = self.generation.next();
        self.registry = Registry::new(self.settings.capacity);
        self.selection = None;
        self.score = 0;
        self.next_id = 0;
        self.spawner = Self::fresh_spawner(&self.settings);
        self.settler = DestructionCoordinator::new(self.settings.settle_delay_ms);
        self.phase = SessionPhase::Running;
        self.events.push(GameEvent::Started {
            generation: self.generation.0,
        });
        log::info!(
            "Session started (generation {}, seed {})",
            self.generation.0,
            self.seed
        );

        for _ in 0..self.settings.initial_entities {
            if self.phase == SessionPhase::Over || self.registry.is_at_capacity() {
                break;
            }
            self.spawn_entity();
            self.check_terminal();
        }

        if self.phase != SessionPhase::Over {
            self.spawner.arm(self.now_ms, self.generation, &mut self.timers);
        }
    }

    pub fn pause(&mut self) {
        if self.phase == SessionPhase::Running {
            self.phase = SessionPhase::Paused;
            self.events.push(GameEvent::Paused);
            log::debug!("Paused at {} ms", self.now_ms);
        }
    }

    pub fn resume(&mut self) {
        if self.phase != SessionPhase::Paused {
            return;
        }
        self.phase = SessionPhase::Running;
        // A spawn fire during the pause left the scheduler idle
        if self.spawner.state() == SpawnState::Idle {
            self.spawner.arm(self.now_ms, self.generation, &mut self.timers);
        }
        self.events.push(GameEvent::Resumed);
        log::debug!("Resumed at {} ms", self.now_ms);
    }

    pub fn toggle_pause(&mut self) {
        match self.phase {
            SessionPhase::Running => self.pause(),
            SessionPhase::Paused => self.resume(),
            _ => {}
        }
    }

    /// Spawn one shape on demand
    pub fn add_shape(&mut self) {
        if matches!(self.phase, SessionPhase::Ready | SessionPhase::Over)
            || self.registry.is_at_capacity()
        {
            return;
        }
        self.spawn_entity();
        self.check_terminal();
    }

    /// Remove every live shape
    pub fn clear_all(&mut self) {
        if matches!(self.phase, SessionPhase::Ready | SessionPhase::Over) {
            return;
        }
        self.registry.clear();
        self.selection = None;
        self.events.push(GameEvent::Cleared);
        log::debug!("Cleared all shapes");
    }

    /// Change the arena used for future spawns
    pub fn set_arena(&mut self, arena: Arena) {
        self.settings.arena = arena;
    }

    // === Input ===

    pub fn handle_tap(&mut self, id: u32) {
        let selected = self.selection.and_then(|sel| self.registry.get(sel));
        let outcome = resolve_tap(
            self.settings.match_mode,
            self.phase == SessionPhase::Over,
            selected,
            self.registry.get(id),
        );

        match outcome {
            TapOutcome::Ignored => {
                log::trace!("Tap on {id} ignored");
            }
            TapOutcome::Select(id) => {
                self.selection = Some(id);
                self.events.push(GameEvent::Selected { id });
            }
            TapOutcome::Deselect(id) => {
                self.selection = None;
                self.events.push(GameEvent::Deselected { id });
            }
            TapOutcome::Reselect { from, to } => {
                self.selection = Some(to);
                self.events.push(GameEvent::Reselected { from, to });
            }
            TapOutcome::Match { first, second } => {
                self.selection = None;
                self.destroy(vec![first, second]);
                self.events.push(GameEvent::Matched {
                    first,
                    second,
                    score: self.score,
                });
                log::debug!("Matched {first} + {second}, score {}", self.score);
            }
            TapOutcome::Destroy(id) => {
                self.destroy(vec![id]);
                self.events.push(GameEvent::Destroyed {
                    id,
                    score: self.score,
                });
            }
        }
    }

    fn destroy(&mut self, ids: Vec<u32>) {
        for &id in &ids {
            self.registry.mark_pending(id);
        }
        self.score += MATCH_REWARD;
        self.settler
            .schedule_removal(ids, self.now_ms, self.generation, &mut self.timers);
    }

    // === Clock ===

    /// Advance the clock by `dt_ms`, firing every timer that comes due
    pub fn advance(&mut self, dt_ms: u64) {
        let target = self.now_ms.saturating_add(dt_ms);
        while let Some(timer) = self.timers.pop_due(target) {
            self.now_ms = self.now_ms.max(timer.due_ms);
            self.fire(timer);
        }
        self.now_ms = target;
    }

    fn fire(&mut self, timer: Timer) {
        if timer.generation != self.generation {
            log::trace!(
                "Discarding stale {:?} timer from generation {}",
                timer.kind,
                timer.generation.0
            );
            return;
        }

        match timer.kind {
            TimerKind::Spawn => self.on_spawn_timer(),
            TimerKind::Settle { ids } => self.on_settle_timer(&ids),
        }
    }

    fn on_spawn_timer(&mut self) {
        let halted = matches!(self.phase, SessionPhase::Paused | SessionPhase::Over);
        match self.spawner.on_fire(halted, self.registry.is_at_capacity()) {
            FireAction::Halt => return,
            FireAction::SkipSpawn => self.check_terminal(),
            FireAction::Spawn => {
                self.spawn_entity();
                self.check_terminal();
            }
        }

        // The ramp is time based, so even the fire that ends the run decays
        self.spawner.decay();
        if self.phase == SessionPhase::Over {
            self.spawner.stop();
        } else {
            self.spawner.arm(self.now_ms, self.generation, &mut self.timers);
        }
    }

    fn on_settle_timer(&mut self, ids: &[u32]) {
        // Game over freezes the registry until restart
        if self.phase == SessionPhase::Over {
            self.settler.discard();
            return;
        }
        let removed = self.settler.settle(&mut self.registry, ids);
        if !removed.is_empty() {
            self.events.push(GameEvent::Removed { ids: removed });
        }
    }

    // === Internals ===

    fn spawn_entity(&mut self) {
        let id = self.next_id;
        self.next_id = self.next_id.wrapping_add(1);
        let entity = create_entity(id, self.settings.arena, &mut self.rng);
        let kind = entity.kind;
        if self.registry.insert(entity) {
            log::debug!("Spawned {} #{id}", kind.as_str());
            self.events.push(GameEvent::Spawned { id });
        }
    }

    /// Must run after every registry mutation that can grow it
    fn check_terminal(&mut self) {
        if self.phase == SessionPhase::Over || !self.registry.is_at_capacity() {
            return;
        }
        self.phase = SessionPhase::Over;
        self.selection = None;
        self.spawner.stop();
        self.events.push(GameEvent::GameOver { score: self.score });
        log::info!(
            "Game over: {} shapes on screen, final score {}",
            self.registry.len(),
            self.score
        );
    }

    // === Read-only views ===

    pub fn score(&self) -> u64 {
        self.score
    }

    pub fn is_over(&self) -> bool {
        self.phase == SessionPhase::Over
    }

    /// Over implies paused
    pub fn is_paused(&self) -> bool {
        matches!(self.phase, SessionPhase::Paused | SessionPhase::Over)
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn spawn_interval_ms(&self) -> f64 {
        self.spawner.interval_ms()
    }

    pub fn spawn_state(&self) -> SpawnState {
        self.spawner.state()
    }

    pub fn selection(&self) -> Option<u32> {
        self.selection
    }

    pub fn entities(&self) -> &[Entity] {
        self.registry.as_slice()
    }

    pub fn entity(&self, id: u32) -> Option<&Entity> {
        self.registry.get(id)
    }

    pub fn len(&self) -> usize {
        self.registry.len()
    }

    pub fn is_empty(&self) -> bool {
        self.registry.is_empty()
    }

    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    pub fn generation(&self) -> Generation {
        self.generation
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Removal batches waiting on their settle delay
    pub fn pending_removals(&self) -> usize {
        self.settler.in_flight()
    }

    /// Timers still queued, including stale ones from earlier generations
    pub fn queued_timers(&self) -> usize {
        self.timers.len()
    }

    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            score: self.score,
            is_over: self.is_over(),
            is_paused: self.is_paused(),
            spawn_interval_ms: self.spawn_interval_ms(),
            selection: self.selection,
            now_ms: self.now_ms,
            generation: self.generation.0,
            entities: self.registry.as_slice().to_vec(),
        }
    }
}
