#![allow(dead_code)]

use shape_destroyer::sim::{Entity, Session};
use shape_destroyer::Settings;

/// Settings matching the reference tuning: capacity 50, 1500 ms, 300 ms floor, 0.97 decay
pub fn reference_settings() -> Settings {
    Settings {
        capacity: 50,
        initial_entities: 10,
        initial_spawn_interval_ms: 1500.0,
        spawn_interval_floor_ms: 300.0,
        spawn_decay: 0.97,
        settle_delay_ms: 400,
        ..Settings::default()
    }
}

pub fn started(settings: Settings, seed: u64) -> Session {
    let mut session = Session::new(settings, seed);
    session.start();
    session
}

fn find_pair(entities: &[Entity], same_kind: bool) -> Option<(u32, u32)> {
    entities.iter().enumerate().find_map(|(i, a)| {
        entities[i + 1..]
            .iter()
            .find(|b| (a.kind == b.kind) == same_kind && a.is_selectable() && b.is_selectable())
            .map(|b| (a.id, b.id))
    })
}

/// Two live ids, same kind or not, adding shapes on demand until one exists
pub fn pair(session: &mut Session, same_kind: bool) -> (u32, u32) {
    loop {
        if let Some(pair) = find_pair(session.entities(), same_kind) {
            return pair;
        }
        let before = session.len();
        session.add_shape();
        assert!(session.len() > before, "ran out of room looking for a pair");
    }
}
