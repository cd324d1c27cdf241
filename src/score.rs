//! Score tracking derived from horizontal displacement.
//!
//! Score is `floor((player.x − spawn_x) / score_factor)`, latched at its peak:
//! swinging backward never lowers the stored value.  The tracker is the single
//! writer of the score; the HUD and the round-over message only read it.

use crate::config::GameConfig;
use crate::player::Player;
use bevy::prelude::*;

/// Raw score candidate for a given player position.
///
/// Negative while the player is behind the spawn point; the tracker ignores
/// anything that doesn't beat the stored peak, so early backward swings stay
/// at score 0.
#[inline]
pub fn score_candidate(player_x: f32, spawn_x: f32, score_factor: f32) -> i64 {
    ((player_x - spawn_x) / score_factor).floor() as i64
}

/// Monotonic non-decreasing score for the current round.
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScoreTracker {
    /// Peak score reached so far this round.
    pub current: u32,
}

impl ScoreTracker {
    /// Fold one position sample into the tracker.  Only ever raises the score.
    pub fn observe(&mut self, player_x: f32, spawn_x: f32, score_factor: f32) {
        let candidate = score_candidate(player_x, spawn_x, score_factor);
        if candidate > self.current as i64 {
            self.current = candidate as u32;
        }
    }
}

/// Per-tick score update while the round is active.
pub fn score_update_system(
    q_player: Query<&Transform, With<Player>>,
    mut score: ResMut<ScoreTracker>,
    config: Res<GameConfig>,
) {
    let Ok(transform) = q_player.single() else {
        return;
    };
    score.observe(
        transform.translation.x,
        config.spawn_x,
        config.score_factor,
    );
}
