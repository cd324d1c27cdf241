//! Player module: body spawn, input handling, and collision damage.
//!
//! ## Sub-module layout
//!
//! | Module | Responsibility |
//! |--------|----------------|
//! | [`state`] | Components (`Player`, `PlayerHealth`) and the `PlayerIntent` resource |
//! | [`control`] | Input pipeline: clear → keyboard-to-intent → apply horizontal force |
//! | [`damage`] | Collision event draining, health decrement, death triggering |
//!
//! All public items are re-exported at this level so the rest of the crate
//! can use flat `crate::player::*` imports without knowing the sub-module
//! layout.

pub mod control;
pub mod damage;
pub mod state;

// ── Flat re-exports ────────────────────────────────────────────────────────────

pub use control::{
    apply_player_intent_system, keyboard_to_intent_system, player_intent_clear_system,
};
pub use damage::player_collision_damage_system;
pub use state::{Player, PlayerHealth, PlayerIntent};

// ── Body spawn ─────────────────────────────────────────────────────────────────

use crate::config::GameConfig;
use bevy::prelude::*;
use bevy_rapier2d::prelude::*;

/// Collision trapezoid, counter-clockwise from the top-left corner.
///
/// The bottom edge is inset by `leg_inset` on both sides so the collider is
/// narrower at the legs than the torso, matching the drawn character.
pub fn player_collider_points(config: &GameConfig) -> [Vec2; 4] {
    let hw = config.player_half_width;
    let hh = config.player_half_height;
    let inset = config.player_leg_inset;
    [
        Vec2::new(-hw, hh),
        Vec2::new(-(hw - inset), -hh),
        Vec2::new(hw - inset, -hh),
        Vec2::new(hw, hh),
    ]
}

/// Spawn the player body at the configured spawn position.
///
/// Collision groups:
/// - `GROUP_2` — the player belongs to this group
/// - collides with `GROUP_1` (world geometry / ceiling strip) only; the pivot
///   and anchor carry empty groups and can never hit the player.
///
/// Returns the entity so the caller can wire the web rig's pivot joint to it.
pub fn spawn_player(commands: &mut Commands, config: &GameConfig) -> Entity {
    let collider = Collider::convex_hull(&player_collider_points(config))
        // 4 distinct points always hull; fall back to a box if geometry config
        // is degenerate (zero extents).
        .unwrap_or_else(|| Collider::cuboid(config.player_half_width, config.player_half_height));

    let entity = commands
        .spawn((
            Player,
            PlayerHealth::new(config.starting_health),
            // Physics
            RigidBody::Dynamic,
            collider,
            ColliderMassProperties::Mass(config.player_mass),
            Velocity::zero(),
            ExternalForce::default(),
            LockedAxes::ROTATION_LOCKED,
            CollisionGroups::new(Group::GROUP_2, Group::GROUP_1),
            ActiveEvents::COLLISION_EVENTS,
            // Transform / visibility
            Transform::from_xyz(config.spawn_x, config.spawn_y, 0.0),
            Visibility::default(),
        ))
        .id();

    println!("✓ Player spawned at ({}, {})", config.spawn_x, config.spawn_y);
    entity
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collider_is_narrower_at_the_legs() {
        let config = GameConfig::default();
        let points = player_collider_points(&config);
        let top_width = points[3].x - points[0].x;
        let bottom_width = points[2].x - points[1].x;
        assert!(
            bottom_width < top_width,
            "legs ({bottom_width}) must be narrower than torso ({top_width})"
        );
    }

    #[test]
    fn health_starts_at_configured_value() {
        let health = PlayerHealth::new(3);
        assert_eq!(health.hp, 3);
    }
}
