//! Collision-driven health loss and death triggering.
//!
//! Rapier queues collision events during its step; this system drains them
//! once per tick, after physics and before the rest of the game logic.  A
//! qualifying event is any contact start involving the player body — the
//! pivot and anchor carry empty collision groups, so they can never produce
//! one.  Each qualifying event severs the web (a direct hit cuts the line)
//! and removes exactly 1 hp.  The first time hp drops below 1 the round
//! transitions to `Dying`; the `was_alive` check latches the transition so a
//! multi-contact frame can't trigger the death sequence twice.

use super::state::{Player, PlayerHealth};
use crate::round::RoundState;
use crate::web::{cut_web, CeilingAnchor, WebState};
use bevy::prelude::*;
use bevy_rapier2d::prelude::*;

/// Drain collision events and apply the collision → health → death sequence.
pub fn player_collision_damage_system(
    mut commands: Commands,
    mut collision_events: MessageReader<CollisionEvent>,
    mut q_player: Query<(Entity, &mut PlayerHealth), With<Player>>,
    q_anchor: Query<Entity, With<CeilingAnchor>>,
    mut web: ResMut<WebState>,
    mut next_state: ResMut<NextState<RoundState>>,
) {
    let Ok((player_entity, mut health)) = q_player.single_mut() else {
        return;
    };

    for event in collision_events.read() {
        let (e1, e2) = match event {
            CollisionEvent::Started(e1, e2, _) => (*e1, *e2),
            CollisionEvent::Stopped(..) => continue,
        };
        if e1 != player_entity && e2 != player_entity {
            continue;
        }

        if web.exists {
            if let Ok(anchor) = q_anchor.single() {
                cut_web(&mut commands, &mut web, anchor);
            }
        }

        let was_alive = health.hp >= 1;
        health.hp -= 1;
        info!("[player] hit — health now {}", health.hp);

        if was_alive && health.hp < 1 {
            next_state.set(RoundState::Dying);
        }
    }
}

// ── Unit tests ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::state::app::StatesPlugin;
    use bevy_rapier2d::rapier::geometry::CollisionEventFlags;

    fn damage_test_app() -> (App, Entity, Entity, Entity) {
        let mut app = App::new();
        app.add_plugins((MinimalPlugins, StatesPlugin));
        app.init_state::<RoundState>();
        app.add_message::<CollisionEvent>();
        app.insert_resource(WebState {
            exists: true,
            anchor_offset_x: 320.0,
            rest_length: 400.0,
        });
        app.add_systems(Update, player_collision_damage_system);

        let player = app
            .world_mut()
            .spawn((Player, PlayerHealth::new(3)))
            .id();
        let anchor = app.world_mut().spawn(CeilingAnchor).id();
        let ceiling = app.world_mut().spawn_empty().id();
        (app, player, anchor, ceiling)
    }

    fn hit(app: &mut App, player: Entity, other: Entity) {
        app.world_mut().write_message(CollisionEvent::Started(
            player,
            other,
            CollisionEventFlags::empty(),
        ));
        app.update();
    }

    fn hp(app: &mut App, player: Entity) -> i32 {
        app.world().get::<PlayerHealth>(player).unwrap().hp
    }

    fn state(app: &App) -> RoundState {
        app.world().resource::<State<RoundState>>().get().clone()
    }

    #[test]
    fn qualifying_collision_removes_exactly_one_hp_and_cuts_web() {
        let (mut app, player, _, ceiling) = damage_test_app();
        hit(&mut app, player, ceiling);

        assert_eq!(hp(&mut app, player), 2);
        assert!(
            !app.world().resource::<WebState>().exists,
            "a direct hit severs the line"
        );
        assert_eq!(state(&app), RoundState::Active, "2 hp left — still active");
    }

    #[test]
    fn collision_not_involving_player_is_ignored() {
        let (mut app, player, _, ceiling) = damage_test_app();
        let bystander = app.world_mut().spawn_empty().id();
        hit(&mut app, bystander, ceiling);

        assert_eq!(hp(&mut app, player), 3);
        assert!(app.world().resource::<WebState>().exists);
    }

    #[test]
    fn stopped_events_do_not_damage() {
        let (mut app, player, _, ceiling) = damage_test_app();
        app.world_mut().write_message(CollisionEvent::Stopped(
            player,
            ceiling,
            CollisionEventFlags::empty(),
        ));
        app.update();
        assert_eq!(hp(&mut app, player), 3);
    }

    #[test]
    fn third_collision_triggers_dying_exactly_once() {
        // health=3: the third qualifying collision crosses the threshold.
        let (mut app, player, _, ceiling) = damage_test_app();
        hit(&mut app, player, ceiling);
        assert_eq!(state(&app), RoundState::Active);
        hit(&mut app, player, ceiling);
        assert_eq!(state(&app), RoundState::Active);
        hit(&mut app, player, ceiling);
        assert_eq!(hp(&mut app, player), 0);
        assert_eq!(state(&app), RoundState::Dying);

        // A further hit past the threshold must not re-trigger the sequence:
        // the was_alive latch only fires on the crossing.
        hit(&mut app, player, ceiling);
        assert_eq!(state(&app), RoundState::Dying);
    }

    #[test]
    fn two_hits_in_one_frame_both_count() {
        let (mut app, player, _, ceiling) = damage_test_app();
        app.world_mut().write_message(CollisionEvent::Started(
            player,
            ceiling,
            CollisionEventFlags::empty(),
        ));
        app.world_mut().write_message(CollisionEvent::Started(
            ceiling,
            player,
            CollisionEventFlags::empty(),
        ));
        app.update();
        assert_eq!(hp(&mut app, player), 1, "each contact event costs 1 hp");
    }
}
