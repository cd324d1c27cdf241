//! Game-specific error types and config validation helpers.
//!
//! The gameplay core itself has no recoverable-error taxonomy: collision
//! events, timer fires, and control intent are all internally generated and
//! trusted by construction.  Contract violations (cutting a nonexistent web,
//! double-triggering the death sequence) are prevented by caller-side guards
//! on [`crate::web::WebState::exists`] and the round state machine, not by
//! runtime error signalling.
//!
//! What *can* go wrong is configuration: `assets/settings.toml` is user-edited
//! and a zero score divisor or negative health would break round invariants.
//! The validators below are run by [`crate::config::GameConfig::sanitize`]
//! after loading.

use std::fmt;

/// Top-level error enum for swingline.
#[derive(Debug)]
pub enum GameError {
    /// A configuration value is outside its safe operating range.
    /// Returned by the validation helpers; the loader reverts the field to
    /// its compiled default rather than aborting.
    UnsafeConfig {
        /// Name of the setting (for logging).
        name: &'static str,
        /// The value that was rejected.
        value: f32,
        /// Human-readable description of the safe range.
        safe_range: &'static str,
    },
}

impl fmt::Display for GameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameError::UnsafeConfig {
                name,
                value,
                safe_range,
            } => write!(
                f,
                "setting '{}' = {} is outside safe range {}",
                name, value, safe_range
            ),
        }
    }
}

impl std::error::Error for GameError {}

/// Convenience alias: a `Result` using `GameError` as the error type.
pub type GameResult<T> = Result<T, GameError>;

// ── Validation helpers ────────────────────────────────────────────────────────

/// The score divisor must be strictly positive: it divides horizontal
/// displacement, and zero would make every score infinite.
pub fn validate_score_factor(value: f32) -> GameResult<()> {
    if value > 0.0 {
        Ok(())
    } else {
        Err(GameError::UnsafeConfig {
            name: "score_factor",
            value,
            safe_range: "(0.0, ∞)",
        })
    }
}

/// The web lead distance must be strictly positive, or anchor targeting
/// degenerates to always shooting straight up regardless of velocity.
pub fn validate_web_overhead(value: f32) -> GameResult<()> {
    if value > 0.0 {
        Ok(())
    } else {
        Err(GameError::UnsafeConfig {
            name: "web_overhead",
            value,
            safe_range: "(0.0, ∞)",
        })
    }
}

/// Starting health below 1 would put the player past the death threshold
/// before the first collision.
pub fn validate_starting_health(value: i32) -> GameResult<()> {
    if value >= 1 {
        Ok(())
    } else {
        Err(GameError::UnsafeConfig {
            name: "starting_health",
            value: value as f32,
            safe_range: "[1, ∞)",
        })
    }
}

/// Death-sequence durations must be non-negative; the one-shot timer treats
/// zero as "fire on the next tick", which is valid (and used by tests).
pub fn validate_death_delays(anim_secs: f32, delay_secs: f32) -> GameResult<()> {
    if anim_secs < 0.0 {
        return Err(GameError::UnsafeConfig {
            name: "death_anim_secs",
            value: anim_secs,
            safe_range: "[0.0, ∞)",
        });
    }
    if delay_secs < 0.0 {
        return Err(GameError::UnsafeConfig {
            name: "game_over_delay_secs",
            value: delay_secs,
            safe_range: "[0.0, ∞)",
        });
    }
    Ok(())
}
