//! Centralised gameplay and physics constants.
//!
//! All tuneable values live here so they can be found, reasoned-about, and
//! modified in one place without source-diving across multiple modules.
//! [`crate::config::GameConfig`] mirrors every constant and can override it
//! from `assets/settings.toml` without recompiling.

// ── World Layout ──────────────────────────────────────────────────────────────

/// Height of the ceiling line (world units). The anchor body and the scrolling
/// collision strip both sit on this line; the player swings below it.
pub const CEILING_Y: f32 = 0.0;

/// Half-thickness of the ceiling collision strip's cuboid collider.
pub const CEILING_HALF_THICKNESS: f32 = 8.0;

/// Logical viewport width (world units). The window opens at this resolution
/// and the ceiling strip spans twice this width, so re-centering the strip on
/// the camera each tick never exposes a gap at either edge.
pub const VIEWPORT_WIDTH: f32 = 1280.0;

/// Logical viewport height (world units).
pub const VIEWPORT_HEIGHT: f32 = 720.0;

// ── Player ────────────────────────────────────────────────────────────────────

/// Player spawn position. The ceiling is at y = 0, so the spawn sits well
/// below the anchor line, giving the opening web its full pendulum length.
pub const SPAWN_X: f32 = 320.0;
pub const SPAWN_Y: f32 = -400.0;

/// Player body mass. Heavier bodies need proportionally more control force
/// but carry more momentum through a cut-and-reshoot.
pub const PLAYER_MASS: f32 = 1.2;

/// Half-extents of the player's collision trapezoid at the torso.
pub const PLAYER_HALF_WIDTH: f32 = 12.0;
pub const PLAYER_HALF_HEIGHT: f32 = 16.0;

/// Horizontal inset of the trapezoid's bottom edge relative to the torso.
/// Narrows the collider at the legs so glancing passes under the ceiling
/// don't register as hits.
pub const PLAYER_LEG_INSET: f32 = 6.0;

/// Vertical offset of the web pivot above the player's centre.
pub const PIVOT_OFFSET_Y: f32 = 8.0;

/// Radius of the pivot's ball collider. The pivot never collides with
/// anything (empty collision groups); the collider exists only to give the
/// body non-zero mass so the rope joint stays stable.
pub const PIVOT_RADIUS: f32 = 2.0;

// ── Gameplay ──────────────────────────────────────────────────────────────────

/// Hit points at round start. Each qualifying collision removes exactly 1;
/// dropping below 1 triggers the death sequence.
pub const STARTING_HEALTH: i32 = 3;

/// Magnitude of the horizontal force applied per tick while an arrow key is
/// held and a web exists. There is deliberately no velocity cap: momentum
/// management is the core skill, and runaway speed ends in a ceiling hit
/// long before it ends in a numeric problem.
pub const CONTROL_FORCE: f32 = 900.0;

/// Horizontal lead distance for a fresh web shot. A new anchor is placed this
/// far ahead of (or behind) the player depending on travel direction, which
/// converts swing momentum into forward progress.
pub const WEB_OVERHEAD: f32 = 80.0;

/// Score divisor: score = floor(horizontal distance travelled / SCORE_FACTOR).
pub const SCORE_FACTOR: f32 = 250.0;

/// World gravity. Negative y pulls the player down and away from the ceiling,
/// keeping the web taut while it exists.
pub const GRAVITY_X: f32 = 0.0;
pub const GRAVITY_Y: f32 = -600.0;

// ── Death sequence ────────────────────────────────────────────────────────────

/// Duration of the death-animation stand-in (player outline flashes red).
pub const DEATH_ANIM_SECS: f32 = 0.6;

/// Extra delay after the death animation before the round-over transition,
/// so the final frame lingers briefly on screen.
pub const GAME_OVER_DELAY_SECS: f32 = 0.5;

// ── Camera ────────────────────────────────────────────────────────────────────

/// Horizontal offset from the player to the camera centre. Positive values
/// keep the player left of centre so more of the upcoming world is visible.
pub const CAMERA_OFFSET_X: f32 = 320.0;
