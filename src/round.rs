//! Round state machine and per-round lifecycle.
//!
//! ## States
//!
//! | State    | Meaning                                                    |
//! |----------|------------------------------------------------------------|
//! | `Active` | Gameplay running; all per-tick systems live                |
//! | `Dying`  | Health exhausted; physics frozen, death sequence playing   |
//! | `Over`   | Terminal; final score emitted, game-over overlay shown     |
//!
//! Transitions: `Active → Dying` when health drops below 1 (requested by
//! [`crate::player::damage`]); `Dying → Over` when the one-shot death timer
//! fires.  `Over` is terminal for the round — a restart re-enters `Active`,
//! which tears down and re-creates every round-owned entity and resource.
//!
//! The death timer ticks on **real** time, so it keeps running while the
//! Rapier pipeline is paused.  Teardown clears any pending timer so a timer
//! armed in one round can never fire into the next.

use crate::ceiling::{spawn_ceiling_strip, CeilingStrip};
use crate::config::GameConfig;
use crate::player::{spawn_player, Player, PlayerIntent};
use crate::score::ScoreTracker;
use crate::web::{spawn_web_rig, CeilingAnchor, PlayerPivot, WebState};
use bevy::prelude::*;
use bevy::time::Real;
use bevy_rapier2d::prelude::*;

// ── State machine ─────────────────────────────────────────────────────────────

/// Round lifecycle state.
#[derive(States, Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum RoundState {
    /// Gameplay running.
    #[default]
    Active,
    /// Health exhausted; death sequence in progress, physics paused.
    Dying,
    /// Round finished; final score available.
    Over,
}

/// Emitted once per round, on the `Dying → Over` transition, carrying the
/// final (peak) score.  The game-over overlay and any outer scene plumbing
/// read this to hand the score onward.
#[derive(Message, Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoundOver {
    pub score: u32,
}

/// One-shot countdown between death-sequence start and round-over emission.
/// `None` means no death is pending; teardown resets it to `None` so a stale
/// timer can never fire into a fresh round.
#[derive(Resource, Default)]
pub struct DeathTimer {
    pub timer: Option<Timer>,
}

// ── Physics pause ─────────────────────────────────────────────────────────────

/// Freeze the Rapier pipeline so the world holds its final pose while the
/// death sequence plays.
pub fn pause_physics(mut config: Query<&mut RapierConfiguration>) {
    for mut cfg in config.iter_mut() {
        cfg.physics_pipeline_active = false;
    }
}

/// Re-enable the Rapier pipeline when a round (re)starts.
pub fn resume_physics(mut config: Query<&mut RapierConfiguration>) {
    for mut cfg in config.iter_mut() {
        cfg.physics_pipeline_active = true;
    }
}

// ── Round setup / teardown ────────────────────────────────────────────────────

/// Build a fresh round: reset per-round resources and spawn the player, the
/// web rig (pivot + anchor + opening web), and the ceiling strip.
///
/// Runs on `OnEnter(Active)`, which covers both the first round at startup
/// and every restart from the game-over screen.
pub fn setup_round(
    mut commands: Commands,
    mut score: ResMut<ScoreTracker>,
    mut web: ResMut<WebState>,
    mut death: ResMut<DeathTimer>,
    mut intent: ResMut<PlayerIntent>,
    config: Res<GameConfig>,
) {
    *score = ScoreTracker::default();
    *web = WebState::default();
    *intent = PlayerIntent::default();
    death.timer = None;

    let player = spawn_player(&mut commands, &config);
    spawn_web_rig(&mut commands, player, &config, &mut web);
    spawn_ceiling_strip(&mut commands, &config);
}

/// Despawn every round-owned entity on the way out of `Over`, so
/// `OnEnter(Active)` rebuilds from nothing.
#[allow(clippy::type_complexity)]
pub fn cleanup_round(
    mut commands: Commands,
    round_entities: Query<
        Entity,
        Or<(
            With<Player>,
            With<PlayerPivot>,
            With<CeilingAnchor>,
            With<CeilingStrip>,
        )>,
    >,
    mut death: ResMut<DeathTimer>,
) {
    for entity in round_entities.iter() {
        commands.entity(entity).despawn();
    }
    death.timer = None;
}

// ── Death sequence ────────────────────────────────────────────────────────────

/// Arm the death timer and start the death-animation stand-in.
///
/// Runs on `OnEnter(Dying)` alongside [`pause_physics`].  Duration covers the
/// animation time plus the configured lingering delay, folded into a single
/// deadline.
pub fn start_death_sequence(mut death: ResMut<DeathTimer>, config: Res<GameConfig>) {
    death.timer = Some(Timer::from_seconds(
        config.death_sequence_secs(),
        TimerMode::Once,
    ));
    info!("[round] death sequence started");
}

/// Tick the death timer on real time; on expiry, emit [`RoundOver`] with the
/// frozen peak score and transition to `Over`.
pub fn death_timer_system(
    time: Res<Time<Real>>,
    mut death: ResMut<DeathTimer>,
    score: Res<ScoreTracker>,
    mut round_over: MessageWriter<RoundOver>,
    mut next_state: ResMut<NextState<RoundState>>,
) {
    let Some(timer) = death.timer.as_mut() else {
        return;
    };
    if timer.tick(time.delta()).just_finished() {
        round_over.write(RoundOver {
            score: score.current,
        });
        next_state.set(RoundState::Over);
        death.timer = None;
    }
}

/// Log the final score when a round ends.
pub fn log_round_over_system(mut round_over: MessageReader<RoundOver>) {
    for over in round_over.read() {
        info!("[round] over — final score {}", over.score);
    }
}

// ── Restart ───────────────────────────────────────────────────────────────────

/// `R` on the game-over screen starts a new round.
pub fn restart_input_system(
    keys: Res<ButtonInput<KeyCode>>,
    mut next_state: ResMut<NextState<RoundState>>,
) {
    if keys.just_pressed(KeyCode::KeyR) {
        next_state.set(RoundState::Active);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_state_is_active() {
        assert_eq!(RoundState::default(), RoundState::Active);
    }

    #[test]
    fn death_timer_defaults_to_disarmed() {
        let death = DeathTimer::default();
        assert!(death.timer.is_none());
    }
}
