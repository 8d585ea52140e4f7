mod common;

use proptest::prelude::*;
use shape_destroyer::consts::MATCH_REWARD;
use shape_destroyer::sim::{MatchMode, Session};
use shape_destroyer::Settings;

#[derive(Debug, Clone)]
enum Op {
    /// Tap the n-th live entity (modulo count)
    Tap(usize),
    /// Tap an arbitrary id, usually one that doesn't exist
    TapRaw(u32),
    Advance(u64),
    Pause,
    Resume,
    Restart,
    AddShape,
    ClearAll,
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        6 => any::<usize>().prop_map(Op::Tap),
        1 => (0u32..64).prop_map(Op::TapRaw),
        5 => (0u64..800).prop_map(Op::Advance),
        1 => Just(Op::Pause),
        1 => Just(Op::Resume),
        1 => Just(Op::Restart),
        2 => Just(Op::AddShape),
        1 => Just(Op::ClearAll),
    ]
}

/// Small, fast settings so random runs hit capacity often
fn tight_settings(mode: MatchMode) -> Settings {
    Settings {
        capacity: 12,
        initial_entities: 4,
        initial_spawn_interval_ms: 300.0,
        spawn_interval_floor_ms: 100.0,
        spawn_decay: 0.9,
        settle_delay_ms: 200,
        match_mode: mode,
        ..Settings::default()
    }
}

fn apply(s: &mut Session, op: &Op) {
    match *op {
        Op::Tap(n) => {
            if !s.is_empty() {
                let id = s.entities()[n % s.len()].id;
                s.handle_tap(id);
            }
        }
        Op::TapRaw(id) => s.handle_tap(id),
        Op::Advance(ms) => s.advance(ms),
        Op::Pause => s.pause(),
        Op::Resume => s.resume(),
        Op::Restart => s.restart(),
        Op::AddShape => s.add_shape(),
        Op::ClearAll => s.clear_all(),
    }
}

fn pending_count(s: &Session) -> usize {
    s.entities().iter().filter(|e| e.pending_destruction).count()
}

fn check_invariants(seed: u64, mode: MatchMode, ops: &[Op]) -> Result<(), TestCaseError> {
    let mut s = common::started(tight_settings(mode), seed);
    let mut prev_generation = s.generation();
    let mut last_interval = s.spawn_interval_ms();
    let mut frozen: Option<(u64, usize)> = None;

    for op in ops {
        let score_before = s.score();
        let pending_before = pending_count(&s);
        apply(&mut s, op);

        if s.generation() != prev_generation {
            prev_generation = s.generation();
            last_interval = s.spawn_interval_ms();
            frozen = None;
        }

        // Selection always names a live, non-pending entity
        if let Some(sel) = s.selection() {
            let e = s.entity(sel);
            prop_assert!(e.is_some_and(|e| !e.pending_destruction), "stale selection {sel}");
        }

        // Capacity is never exceeded, and reaching it always ends the session
        prop_assert!(s.len() <= 12);
        if s.len() >= 12 {
            prop_assert!(s.is_over());
        }
        if s.is_over() {
            prop_assert!(s.is_paused());
        }

        // Score only moves in whole rewards, one per tap
        prop_assert_eq!(s.score() % MATCH_REWARD, 0);
        if let Op::Tap(_) | Op::TapRaw(_) = op {
            let delta = s.score() - score_before;
            prop_assert!(delta == 0 || delta == MATCH_REWARD);
            if delta == MATCH_REWARD {
                let flagged = match mode {
                    MatchMode::Pair => 2,
                    MatchMode::Single => 1,
                };
                prop_assert_eq!(pending_count(&s), pending_before + flagged);
            }
        } else if !matches!(op, Op::Restart) {
            prop_assert_eq!(s.score(), score_before);
        }

        // Spawn interval ramps down monotonically within a generation
        let interval = s.spawn_interval_ms();
        prop_assert!(interval <= last_interval);
        prop_assert!(interval >= 100.0);
        last_interval = interval;

        // Terminal state is frozen until restart
        if s.is_over() {
            match frozen {
                None => frozen = Some((s.score(), s.len())),
                Some((score, len)) => {
                    prop_assert_eq!(s.score(), score);
                    prop_assert_eq!(s.len(), len);
                }
            }
        } else {
            prop_assert!(frozen.is_none(), "left terminal state without restart");
        }
    }
    Ok(())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn pair_mode_invariants(seed in any::<u64>(), ops in prop::collection::vec(op_strategy(), 1..200)) {
        check_invariants(seed, MatchMode::Pair, &ops)?;
    }

    #[test]
    fn single_mode_invariants(seed in any::<u64>(), ops in prop::collection::vec(op_strategy(), 1..200)) {
        check_invariants(seed, MatchMode::Single, &ops)?;
    }

    #[test]
    fn removal_waits_exactly_the_settle_delay(seed in any::<u64>(), lead in 0u64..1000) {
        let mut s = common::started(common::reference_settings(), seed);
        s.advance(lead);
        let (a, b) = common::pair(&mut s, true);
        s.handle_tap(a);
        s.handle_tap(b);
        s.advance(399);
        prop_assert!(s.entity(a).is_some() && s.entity(b).is_some());
        s.advance(1);
        prop_assert!(s.entity(a).is_none() && s.entity(b).is_none());
    }
}
