//! Selection/match decision
//!
//! Decides what a tap means without touching any state. The session applies
//! the returned outcome.

use serde::{Deserialize, Serialize};

use super::state::Entity;

/// How taps destroy shapes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum MatchMode {
    /// Two taps on distinct shapes of the same kind destroy both
    #[default]
    Pair,
    /// Every tap destroys the tapped shape
    Single,
}

impl MatchMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            MatchMode::Pair => "Pair",
            MatchMode::Single => "Single",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "pair" | "pairs" => Some(MatchMode::Pair),
            "single" => Some(MatchMode::Single),
            _ => None,
        }
    }
}

/// Result of resolving one tap
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TapOutcome {
    /// No state change
    Ignored,
    /// Tapped entity becomes the selection
    Select(u32),
    /// Current selection tapped again, selection clears
    Deselect(u32),
    /// Selection and tapped entity share a kind
    Match { first: u32, second: u32 },
    /// Different kind tapped, selection moves without penalty
    Reselect { from: u32, to: u32 },
    /// Single-tap mode: tapped entity is destroyed outright
    Destroy(u32),
}

/// Resolve a tap against the current selection.
///
/// `tapped` is `None` when the id is no longer in the registry.
/// `selection` must be a live, non-pending entity when present.
pub fn resolve_tap(
    mode: MatchMode,
    is_over: bool,
    selection: Option<&Entity>,
    tapped: Option<&Entity>,
) -> TapOutcome {
    if is_over {
        return TapOutcome::Ignored;
    }
    let Some(tapped) = tapped else {
        return TapOutcome::Ignored;
    };
    if !tapped.is_selectable() {
        return TapOutcome::Ignored;
    }

    if mode == MatchMode::Single {
        return TapOutcome::Destroy(tapped.id);
    }

    match selection {
        None => TapOutcome::Select(tapped.id),
        Some(sel) if sel.id == tapped.id => TapOutcome::Deselect(sel.id),
        Some(sel) if sel.kind == tapped.kind => TapOutcome::Match {
            first: sel.id,
            second: tapped.id,
        },
        Some(sel) => TapOutcome::Reselect {
            from: sel.id,
            to: tapped.id,
        },
    }
}
