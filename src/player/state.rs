//! Player components and the control-intent resource.
//!
//! Systems that mutate this state live in the sibling modules:
//! - [`super::control`] — input + horizontal force
//! - [`super::damage`] — collision-driven health loss and death triggering

use bevy::prelude::*;

// ── Components ─────────────────────────────────────────────────────────────────

/// Marker component for the player entity.
#[derive(Component)]
pub struct Player;

/// Integer hit points.  Starts at the configured value, strictly decreases by
/// exactly 1 per qualifying collision, never increases within a round.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlayerHealth {
    pub hp: i32,
}

impl PlayerHealth {
    pub fn new(starting: i32) -> Self {
        Self { hp: starting }
    }
}

// ── Input abstraction ──────────────────────────────────────────────────────────

/// Aggregated control intent for the current frame.
///
/// The keyboard system writes this each frame after it is cleared;
/// [`super::control::apply_player_intent_system`] turns `left`/`right` into
/// horizontal force and [`crate::web::web_toggle_system`] consumes
/// `toggle_web`.  Tests populate this directly to drive the player without a
/// real input device.
///
/// `left`/`right` are only set while a web exists — there is no air steering
/// without tension.  `toggle_web` is edge-triggered: one press, one toggle.
#[derive(Resource, Default, Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlayerIntent {
    pub left: bool,
    pub right: bool,
    pub toggle_web: bool,
}
