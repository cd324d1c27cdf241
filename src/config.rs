//! Runtime gameplay configuration loaded from `assets/settings.toml`.
//!
//! [`GameConfig`] is a Bevy [`Resource`] that mirrors every constant in
//! [`crate::constants`].  At startup, [`load_game_config`] reads
//! `assets/settings.toml` and overwrites the defaults with any values present
//! in the file.  Missing keys fall back to the compile-time defaults, so a
//! minimal TOML can override just the values you care about.
//!
//! All gameplay tuning routes through this one resource — systems take
//! `config: Res<GameConfig>` and never hard-code balance numbers.

use crate::constants::*;
use crate::error::{
    validate_death_delays, validate_score_factor, validate_starting_health, validate_web_overhead,
};
use bevy::prelude::*;
use serde::Deserialize;

/// Runtime-tunable gameplay configuration.
///
/// All fields default to the corresponding compile-time constant from
/// `src/constants.rs`.  Override any subset by setting the value in
/// `assets/settings.toml`.
#[derive(Resource, Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    // ── World Layout ──────────────────────────────────────────────────────────
    pub ceiling_y: f32,
    pub ceiling_half_thickness: f32,
    pub viewport_width: f32,
    pub viewport_height: f32,

    // ── Player ────────────────────────────────────────────────────────────────
    pub spawn_x: f32,
    pub spawn_y: f32,
    pub player_mass: f32,
    pub player_half_width: f32,
    pub player_half_height: f32,
    pub player_leg_inset: f32,
    pub pivot_offset_y: f32,
    pub pivot_radius: f32,

    // ── Gameplay ──────────────────────────────────────────────────────────────
    pub starting_health: i32,
    pub control_force: f32,
    pub web_overhead: f32,
    pub score_factor: f32,
    pub gravity_x: f32,
    pub gravity_y: f32,

    // ── Death sequence ────────────────────────────────────────────────────────
    pub death_anim_secs: f32,
    pub game_over_delay_secs: f32,

    // ── Camera / Debug ────────────────────────────────────────────────────────
    pub camera_offset_x: f32,
    pub debug: bool,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            // World Layout
            ceiling_y: CEILING_Y,
            ceiling_half_thickness: CEILING_HALF_THICKNESS,
            viewport_width: VIEWPORT_WIDTH,
            viewport_height: VIEWPORT_HEIGHT,
            // Player
            spawn_x: SPAWN_X,
            spawn_y: SPAWN_Y,
            player_mass: PLAYER_MASS,
            player_half_width: PLAYER_HALF_WIDTH,
            player_half_height: PLAYER_HALF_HEIGHT,
            player_leg_inset: PLAYER_LEG_INSET,
            pivot_offset_y: PIVOT_OFFSET_Y,
            pivot_radius: PIVOT_RADIUS,
            // Gameplay
            starting_health: STARTING_HEALTH,
            control_force: CONTROL_FORCE,
            web_overhead: WEB_OVERHEAD,
            score_factor: SCORE_FACTOR,
            gravity_x: GRAVITY_X,
            gravity_y: GRAVITY_Y,
            // Death sequence
            death_anim_secs: DEATH_ANIM_SECS,
            game_over_delay_secs: GAME_OVER_DELAY_SECS,
            // Camera / Debug
            camera_offset_x: CAMERA_OFFSET_X,
            debug: false,
        }
    }
}

impl GameConfig {
    /// World gravity as a vector.
    #[inline]
    pub fn gravity(&self) -> Vec2 {
        Vec2::new(self.gravity_x, self.gravity_y)
    }

    /// Total death-sequence duration: animation plus the lingering delay.
    #[inline]
    pub fn death_sequence_secs(&self) -> f32 {
        self.death_anim_secs + self.game_over_delay_secs
    }

    /// Revert any field that fails validation to its compiled default,
    /// logging a warning per rejected value.  Keeps a half-broken TOML from
    /// producing a division-by-zero score or an unkillable player.
    pub fn sanitize(&mut self) {
        let defaults = GameConfig::default();
        if let Err(e) = validate_score_factor(self.score_factor) {
            eprintln!("⚠ {e}; reverting to {}", defaults.score_factor);
            self.score_factor = defaults.score_factor;
        }
        if let Err(e) = validate_web_overhead(self.web_overhead) {
            eprintln!("⚠ {e}; reverting to {}", defaults.web_overhead);
            self.web_overhead = defaults.web_overhead;
        }
        if let Err(e) = validate_starting_health(self.starting_health) {
            eprintln!("⚠ {e}; reverting to {}", defaults.starting_health);
            self.starting_health = defaults.starting_health;
        }
        if let Err(e) = validate_death_delays(self.death_anim_secs, self.game_over_delay_secs) {
            eprintln!(
                "⚠ {e}; reverting to {} + {}",
                defaults.death_anim_secs, defaults.game_over_delay_secs
            );
            self.death_anim_secs = defaults.death_anim_secs;
            self.game_over_delay_secs = defaults.game_over_delay_secs;
        }
    }
}

/// Startup system: attempt to load `assets/settings.toml` and overwrite the
/// `GameConfig` resource with any values present in the file.
///
/// Missing keys retain their compiled defaults.  TOML parse errors are printed
/// to stderr but do not abort the game.  A missing file is silently ignored
/// (defaults are already in place from `insert_resource`).
pub fn load_game_config(mut config: ResMut<GameConfig>) {
    let path = "assets/settings.toml";
    match std::fs::read_to_string(path) {
        Ok(contents) => match toml::from_str::<GameConfig>(&contents) {
            Ok(loaded) => {
                *config = loaded;
                println!("✓ Loaded game config from {path}");
            }
            Err(e) => {
                eprintln!("⚠ Failed to parse {path}: {e}; using defaults");
            }
        },
        Err(_) => {
            // File not present — defaults are already in place; not an error.
            println!("ℹ No {path} found; using compiled defaults");
        }
    }
    config.sanitize();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_mirror_constants() {
        let config = GameConfig::default();
        assert_eq!(config.spawn_x, SPAWN_X);
        assert_eq!(config.starting_health, STARTING_HEALTH);
        assert_eq!(config.score_factor, SCORE_FACTOR);
        assert_eq!(config.web_overhead, WEB_OVERHEAD);
        assert_eq!(config.gravity(), Vec2::new(GRAVITY_X, GRAVITY_Y));
    }

    #[test]
    fn partial_toml_overrides_only_named_keys() {
        let loaded: GameConfig = toml::from_str("score_factor = 1000.0").unwrap();
        assert_eq!(loaded.score_factor, 1000.0);
        assert_eq!(loaded.web_overhead, WEB_OVERHEAD);
        assert_eq!(loaded.starting_health, STARTING_HEALTH);
    }

    #[test]
    fn sanitize_reverts_invalid_values() {
        let mut config = GameConfig {
            score_factor: 0.0,
            web_overhead: -5.0,
            starting_health: 0,
            death_anim_secs: -1.0,
            ..Default::default()
        };
        config.sanitize();
        assert_eq!(config.score_factor, SCORE_FACTOR);
        assert_eq!(config.web_overhead, WEB_OVERHEAD);
        assert_eq!(config.starting_health, STARTING_HEALTH);
        assert_eq!(config.death_anim_secs, DEATH_ANIM_SECS);
    }

    #[test]
    fn death_sequence_is_anim_plus_delay() {
        let config = GameConfig::default();
        assert!(
            (config.death_sequence_secs() - (DEATH_ANIM_SECS + GAME_OVER_DELAY_SECS)).abs() < 1e-6
        );
    }
}
