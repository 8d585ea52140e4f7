//! Demo autoplayer
//!
//! Picks the next tap from the live entities. Drives the headless demo and
//! long-running tests; not used by the engine itself.

use std::collections::HashMap;

use super::state::{Entity, ShapeKind};

/// Choose the id to tap next, or `None` if there is nothing useful to do.
///
/// With a selection: tap the oldest selectable partner of the same kind, or
/// drop the selection if it has none. Without: select the oldest entity whose
/// kind has at least one partner.
pub fn choose_tap(entities: &[Entity], selection: Option<u32>) -> Option<u32> {
    let live = || entities.iter().filter(|e| e.is_selectable());

    if let Some(sel_id) = selection {
        let sel = entities.iter().find(|e| e.id == sel_id)?;
        return live()
            .find(|e| e.id != sel.id && e.kind == sel.kind)
            .map(|e| e.id)
            // No partner: tapping the selection again clears it
            .or(Some(sel.id));
    }

    let mut counts: HashMap<ShapeKind, usize> = HashMap::new();
    for e in live() {
        *counts.entry(e.kind).or_default() += 1;
    }
    live().find(|e| counts[&e.kind] >= 2).map(|e| e.id)
}
