//! Web (rope) lifecycle: anchor, pivot, shoot, cut, and line rendering.
//!
//! The web is a rope joint between two bodies this module owns:
//!
//! - **Pivot** — a small dynamic ball rigidly fixed a few units above the
//!   player's centre.  It never collides with anything; it exists so the rope
//!   attaches above the sprite rather than at the centre of mass.
//! - **Anchor** — a single fixed point body on the ceiling line.  Its
//!   horizontal position is overwritten (not respawned) on every shot, so at
//!   most one anchor and at most one rope joint exist at any time.
//!
//! Shoot/cut are gated on [`WebState::exists`]; callers must check it first.
//! All anchor mutation routes through [`shoot_web`] — no other module writes
//! the anchor transform.

use crate::config::GameConfig;
use crate::player::{Player, PlayerIntent};
use bevy::prelude::*;
use bevy_rapier2d::prelude::*;

// ── Components / resources ────────────────────────────────────────────────────

/// Marker for the ceiling anchor point body.  The rope joint component lives
/// on this entity while a web exists.
#[derive(Component)]
pub struct CeilingAnchor;

/// Marker for the pivot body fixed above the player.
#[derive(Component)]
pub struct PlayerPivot;

/// Current web status.  `exists` is the single source of truth gating shoot
/// and cut; the other fields are kept for rendering and the debug overlay.
#[derive(Resource, Debug, Clone, Copy, Default)]
pub struct WebState {
    /// Whether a rope joint currently connects pivot and anchor.
    pub exists: bool,
    /// Horizontal position of the anchor for the most recent shot.
    pub anchor_offset_x: f32,
    /// Rope rest length computed at the most recent shot.
    pub rest_length: f32,
}

// ── Geometry ──────────────────────────────────────────────────────────────────

/// Rope rest length for a shot: the hypotenuse of the horizontal lead distance
/// and the pivot's current vertical drop below the ceiling line.  Shooting
/// from higher up yields a shorter, tauter rope — this is what makes swing
/// height part of the skill loop.
#[inline]
pub fn web_rest_length(web_overhead: f32, vertical_drop: f32) -> f32 {
    (web_overhead * web_overhead + vertical_drop * vertical_drop).sqrt()
}

/// Anchor targeting policy for a fresh shot.
///
/// The anchor leads the player by `web_overhead` in the direction of travel:
/// rightward velocity places it ahead, leftward behind, and at rest the shot
/// goes straight up with no lead.  Player x is floored to whole units first
/// so the zero-velocity case lands on an exact position.
#[inline]
pub fn target_anchor_offset(player_x: f32, vel_x: f32, web_overhead: f32) -> f32 {
    let px = player_x.floor();
    if vel_x > 0.0 {
        px + web_overhead
    } else if vel_x < 0.0 {
        px - web_overhead
    } else {
        px
    }
}

fn rope_joint(pivot: Entity, rest_length: f32) -> ImpulseJoint {
    ImpulseJoint::new(
        pivot,
        RopeJointBuilder::new(rest_length)
            .local_anchor1(Vec2::ZERO)
            .local_anchor2(Vec2::ZERO),
    )
}

// ── Lifecycle ─────────────────────────────────────────────────────────────────

/// Spawn the pivot and anchor bodies for a fresh round and shoot the opening
/// web straight up from the spawn point (the round always starts attached).
pub fn spawn_web_rig(commands: &mut Commands, player: Entity, config: &GameConfig, web: &mut WebState) {
    let pivot_y = config.spawn_y + config.pivot_offset_y;

    let pivot = commands
        .spawn((
            PlayerPivot,
            RigidBody::Dynamic,
            // Collider only contributes mass; empty groups collide with nothing.
            Collider::ball(config.pivot_radius),
            CollisionGroups::new(Group::NONE, Group::NONE),
            Velocity::zero(),
            // Rigid link to the player, offset above its centre.
            ImpulseJoint::new(
                player,
                FixedJointBuilder::new()
                    .local_anchor1(Vec2::new(0.0, config.pivot_offset_y))
                    .local_anchor2(Vec2::ZERO),
            ),
            Transform::from_xyz(config.spawn_x, pivot_y, 0.0),
            Visibility::default(),
        ))
        .id();

    let rest_length = web_rest_length(config.web_overhead, config.ceiling_y - pivot_y);
    commands.spawn((
        CeilingAnchor,
        RigidBody::Fixed,
        // No collider: the anchor is a massless point used only by the rope.
        rope_joint(pivot, rest_length),
        Transform::from_xyz(config.spawn_x, config.ceiling_y, 0.0),
        Visibility::default(),
    ));

    web.exists = true;
    web.anchor_offset_x = config.spawn_x;
    web.rest_length = rest_length;
}

/// Attach a new rope between pivot and anchor.
///
/// Precondition: no web exists (checked in debug builds; callers gate on
/// [`WebState::exists`]).  Overwrites the anchor's horizontal offset.
pub fn shoot_web(
    commands: &mut Commands,
    web: &mut WebState,
    anchor: Entity,
    anchor_transform: &mut Transform,
    pivot: Entity,
    pivot_y: f32,
    anchor_offset_x: f32,
    config: &GameConfig,
) {
    debug_assert!(!web.exists, "shoot_web called while a web exists");

    anchor_transform.translation.x = anchor_offset_x;
    let rest_length = web_rest_length(config.web_overhead, config.ceiling_y - pivot_y);
    commands.entity(anchor).insert(rope_joint(pivot, rest_length));

    web.exists = true;
    web.anchor_offset_x = anchor_offset_x;
    web.rest_length = rest_length;
}

/// Remove the rope joint from the anchor.
///
/// Precondition: a web exists (checked in debug builds; callers gate on
/// [`WebState::exists`]).
pub fn cut_web(commands: &mut Commands, web: &mut WebState, anchor: Entity) {
    debug_assert!(web.exists, "cut_web called without an active web");

    commands.entity(anchor).remove::<ImpulseJoint>();
    web.exists = false;
}

// ── Systems ───────────────────────────────────────────────────────────────────

/// Consume the edge-triggered toggle intent: cut the web if one exists,
/// otherwise shoot a new one at the velocity-led target offset.
#[allow(clippy::type_complexity)]
pub fn web_toggle_system(
    mut commands: Commands,
    intent: Res<PlayerIntent>,
    mut web: ResMut<WebState>,
    q_player: Query<(&Transform, &Velocity), With<Player>>,
    q_pivot: Query<(Entity, &Transform), (With<PlayerPivot>, Without<Player>)>,
    mut q_anchor: Query<
        (Entity, &mut Transform),
        (With<CeilingAnchor>, Without<Player>, Without<PlayerPivot>),
    >,
    config: Res<GameConfig>,
) {
    if !intent.toggle_web {
        return;
    }
    let Ok((anchor, mut anchor_transform)) = q_anchor.single_mut() else {
        return;
    };

    if web.exists {
        cut_web(&mut commands, &mut web, anchor);
        return;
    }

    let Ok((player_transform, velocity)) = q_player.single() else {
        return;
    };
    let Ok((pivot, pivot_transform)) = q_pivot.single() else {
        return;
    };

    let offset = target_anchor_offset(
        player_transform.translation.x,
        velocity.linvel.x,
        config.web_overhead,
    );
    shoot_web(
        &mut commands,
        &mut web,
        anchor,
        &mut anchor_transform,
        pivot,
        pivot_transform.translation.y,
        offset,
        &config,
    );
}

/// Draw the web as a straight line from the anchor to the player while it
/// exists.  Gizmos clear automatically each frame, so a cut web simply stops
/// being drawn.  Pure presentation; no physical effect.
pub fn render_web_system(
    mut gizmos: Gizmos,
    web: Res<WebState>,
    q_player: Query<&Transform, With<Player>>,
    q_anchor: Query<&Transform, (With<CeilingAnchor>, Without<Player>)>,
) {
    if !web.exists {
        return;
    }
    let (Ok(player), Ok(anchor)) = (q_player.single(), q_anchor.single()) else {
        return;
    };
    gizmos.line_2d(
        anchor.translation.truncate(),
        player.translation.truncate(),
        Color::WHITE,
    );
}

// ── Unit tests ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    // ── Pure geometry ─────────────────────────────────────────────────────────

    #[test]
    fn rest_length_is_hypotenuse() {
        assert!((web_rest_length(3.0, 4.0) - 5.0).abs() < 1e-6);
        assert!((web_rest_length(0.0, 7.5) - 7.5).abs() < 1e-6);
    }

    #[test]
    fn targeting_leads_in_travel_direction() {
        assert_eq!(target_anchor_offset(320.0, 12.0, 80.0), 400.0);
        assert_eq!(target_anchor_offset(320.0, -12.0, 80.0), 240.0);
    }

    #[test]
    fn targeting_at_rest_has_no_lead() {
        // Zero velocity → anchor exactly at player x.
        assert_eq!(target_anchor_offset(320.0, 0.0, 80.0), 320.0);
    }

    // ── Toggle system ─────────────────────────────────────────────────────────

    fn build_toggle_app() -> (App, Entity) {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins);
        app.insert_resource(GameConfig::default());
        app.insert_resource(WebState::default());
        app.insert_resource(PlayerIntent::default());
        app.add_systems(Update, web_toggle_system);

        app.world_mut().spawn((
            Player,
            Transform::from_xyz(320.0, -400.0, 0.0),
            Velocity::zero(),
        ));
        app.world_mut()
            .spawn((PlayerPivot, Transform::from_xyz(320.0, -392.0, 0.0)));
        let anchor = app
            .world_mut()
            .spawn((CeilingAnchor, Transform::from_xyz(0.0, 0.0, 0.0)))
            .id();
        (app, anchor)
    }

    fn toggle_once(app: &mut App) {
        app.insert_resource(PlayerIntent {
            toggle_web: true,
            ..Default::default()
        });
        app.update();
    }

    #[test]
    fn toggle_without_web_shoots_at_player_x() {
        let (mut app, anchor) = build_toggle_app();
        toggle_once(&mut app);

        let web = app.world().resource::<WebState>();
        assert!(web.exists, "toggle with no web must shoot");
        assert_eq!(web.anchor_offset_x, 320.0, "zero velocity → no lead");
        assert!(
            app.world().entity(anchor).contains::<ImpulseJoint>(),
            "rope joint must be attached to the anchor"
        );
        let anchor_x = app
            .world()
            .entity(anchor)
            .get::<Transform>()
            .unwrap()
            .translation
            .x;
        assert_eq!(anchor_x, 320.0);
    }

    #[test]
    fn toggle_with_web_cuts_it() {
        let (mut app, anchor) = build_toggle_app();
        toggle_once(&mut app); // shoot
        toggle_once(&mut app); // cut

        let web = app.world().resource::<WebState>();
        assert!(!web.exists, "second toggle must cut");
        assert!(
            !app.world().entity(anchor).contains::<ImpulseJoint>(),
            "rope joint must be removed on cut"
        );
    }

    #[test]
    fn reshoot_overwrites_anchor_offset() {
        let (mut app, anchor) = build_toggle_app();
        toggle_once(&mut app); // shoot at 320
        toggle_once(&mut app); // cut

        // Now moving rightward: the next shot leads by web_overhead.
        let mut player_query = app.world_mut().query_filtered::<Entity, With<Player>>();
        let player = player_query.single(app.world()).unwrap();
        app.world_mut().entity_mut(player).insert(Velocity {
            linvel: Vec2::new(50.0, 0.0),
            angvel: 0.0,
        });
        toggle_once(&mut app);

        let web = app.world().resource::<WebState>();
        assert!(web.exists);
        assert_eq!(web.anchor_offset_x, 400.0, "rightward shot leads by 80");
        let anchor_x = app
            .world()
            .entity(anchor)
            .get::<Transform>()
            .unwrap()
            .translation
            .x;
        assert_eq!(anchor_x, 400.0, "previous offset is overwritten");
    }

    #[test]
    fn no_toggle_intent_is_a_no_op() {
        let (mut app, anchor) = build_toggle_app();
        app.update();

        assert!(!app.world().resource::<WebState>().exists);
        assert!(!app.world().entity(anchor).contains::<ImpulseJoint>());
    }

    #[test]
    fn rest_length_shrinks_when_shot_from_higher_up() {
        let (mut app, _) = build_toggle_app();
        toggle_once(&mut app);
        let low_rest = app.world().resource::<WebState>().rest_length;
        toggle_once(&mut app); // cut

        // Raise the pivot closer to the ceiling and re-shoot.
        let mut pivot_query = app.world_mut().query_filtered::<Entity, With<PlayerPivot>>();
        let pivot = pivot_query.single(app.world()).unwrap();
        app.world_mut()
            .entity_mut(pivot)
            .insert(Transform::from_xyz(320.0, -100.0, 0.0));
        toggle_once(&mut app);

        let high_rest = app.world().resource::<WebState>().rest_length;
        assert!(
            high_rest < low_rest,
            "shooting from higher up must give a shorter rope ({high_rest} vs {low_rest})"
        );
    }
}
