//! Player input and horizontal-force systems.
//!
//! ## Pipeline (runs in order every `Update` frame while the round is active)
//!
//! 1. [`player_intent_clear_system`] — resets `PlayerIntent` and `ExternalForce` to zero.
//! 2. [`keyboard_to_intent_system`] — translates arrow keys + space into `PlayerIntent`.
//! 3. [`apply_player_intent_system`] — converts `PlayerIntent` into horizontal force.
//!
//! The input abstraction (`PlayerIntent`) keeps movement fully testable:
//! tests populate the resource directly and run only the apply step.
//!
//! The left/right gate lives at the input layer: arrow keys are only honored
//! while a web exists, so there is no air steering after a cut.  The force
//! model is deliberately additive with no velocity clamp.

use super::state::{Player, PlayerIntent};
use crate::config::GameConfig;
use crate::web::WebState;
use bevy::prelude::*;
use bevy_rapier2d::prelude::*;

// ── Step 1: Clear ─────────────────────────────────────────────────────────────

/// Clear `ExternalForce` and `PlayerIntent` to zero at the start of every frame.
///
/// Must run before any system that writes `PlayerIntent` or accumulates
/// forces.  Running both resets here gives a single ordered dependency.
pub fn player_intent_clear_system(
    mut q: Query<&mut ExternalForce, With<Player>>,
    mut intent: ResMut<PlayerIntent>,
) {
    if let Ok(mut force) = q.single_mut() {
        force.force = Vec2::ZERO;
        force.torque = 0.0;
    }
    *intent = PlayerIntent::default();
}

// ── Step 2: Keyboard → Intent ─────────────────────────────────────────────────

/// Translate keyboard state into [`PlayerIntent`].
///
/// - **←** → `left = true` (only while a web exists)
/// - **→** → `right = true` (only while a web exists)
/// - **Space** (just pressed) → `toggle_web = true`
pub fn keyboard_to_intent_system(
    keys: Res<ButtonInput<KeyCode>>,
    web: Res<WebState>,
    mut intent: ResMut<PlayerIntent>,
) {
    if keys.pressed(KeyCode::ArrowLeft) && web.exists {
        intent.left = true;
    }
    if keys.pressed(KeyCode::ArrowRight) && web.exists {
        intent.right = true;
    }
    if keys.just_pressed(KeyCode::Space) {
        intent.toggle_web = true;
    }
}

// ── Step 3: Apply intent → physics ────────────────────────────────────────────

/// Convert [`PlayerIntent`] into horizontal `ExternalForce` on the player.
///
/// This is the only system that writes control forces.  Left and right each
/// contribute `∓control_force`; holding both cancels exactly.
pub fn apply_player_intent_system(
    mut q: Query<&mut ExternalForce, With<Player>>,
    intent: Res<PlayerIntent>,
    config: Res<GameConfig>,
) {
    let Ok(mut force) = q.single_mut() else {
        return;
    };

    if intent.left {
        force.force.x -= config.control_force;
    }
    if intent.right {
        force.force.x += config.control_force;
    }
}

// ── Unit tests ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::CONTROL_FORCE;

    // ── helpers ───────────────────────────────────────────────────────────────

    /// Build a minimal Bevy `App` with just the resources and systems needed to
    /// test the PlayerIntent → force pipeline, without Rapier or rendering.
    fn build_test_app() -> App {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins);
        app.insert_resource(PlayerIntent::default());
        app.insert_resource(GameConfig::default());
        app.insert_resource(WebState::default());
        app.world_mut().spawn((Player, ExternalForce::default()));
        app
    }

    fn player_force(app: &mut App) -> Vec2 {
        let mut query = app
            .world_mut()
            .query_filtered::<&ExternalForce, With<Player>>();
        query.single(app.world()).unwrap().force
    }

    /// Run only the apply step with the given intent.
    fn run_apply(app: &mut App, intent: PlayerIntent) {
        app.insert_resource(intent);
        app.add_systems(Update, apply_player_intent_system);
        app.update();
    }

    // ── apply_player_intent_system ────────────────────────────────────────────

    #[test]
    fn right_intent_applies_positive_x_force() {
        let mut app = build_test_app();
        run_apply(
            &mut app,
            PlayerIntent {
                right: true,
                ..Default::default()
            },
        );
        let force = player_force(&mut app);
        assert!(
            (force.x - CONTROL_FORCE).abs() < 1e-4 && force.y == 0.0,
            "expected ({CONTROL_FORCE}, 0), got {force:?}"
        );
    }

    #[test]
    fn left_intent_applies_negative_x_force() {
        let mut app = build_test_app();
        run_apply(
            &mut app,
            PlayerIntent {
                left: true,
                ..Default::default()
            },
        );
        let force = player_force(&mut app);
        assert!(
            (force.x + CONTROL_FORCE).abs() < 1e-4,
            "expected -{CONTROL_FORCE}, got {}",
            force.x
        );
    }

    #[test]
    fn simultaneous_left_and_right_cancel() {
        let mut app = build_test_app();
        run_apply(
            &mut app,
            PlayerIntent {
                left: true,
                right: true,
                ..Default::default()
            },
        );
        assert_eq!(player_force(&mut app), Vec2::ZERO);
    }

    #[test]
    fn no_intent_leaves_force_zero() {
        let mut app = build_test_app();
        run_apply(&mut app, PlayerIntent::default());
        assert_eq!(player_force(&mut app), Vec2::ZERO);
    }

    // ── keyboard_to_intent_system ─────────────────────────────────────────────

    fn run_keyboard(app: &mut App, key: KeyCode, web_exists: bool) {
        let mut input = ButtonInput::<KeyCode>::default();
        input.press(key);
        app.insert_resource(input);
        app.insert_resource(WebState {
            exists: web_exists,
            ..Default::default()
        });
        app.add_systems(Update, keyboard_to_intent_system);
        app.update();
    }

    #[test]
    fn arrows_are_ignored_without_a_web() {
        let mut app = build_test_app();
        run_keyboard(&mut app, KeyCode::ArrowRight, false);
        let intent = app.world().resource::<PlayerIntent>();
        assert!(!intent.right, "no air steering without tension");
    }

    #[test]
    fn arrows_are_honored_while_a_web_exists() {
        let mut app = build_test_app();
        run_keyboard(&mut app, KeyCode::ArrowRight, true);
        let intent = app.world().resource::<PlayerIntent>();
        assert!(intent.right);
        assert!(!intent.left);
    }

    #[test]
    fn space_toggles_regardless_of_web_state() {
        let mut app = build_test_app();
        run_keyboard(&mut app, KeyCode::Space, false);
        let intent = app.world().resource::<PlayerIntent>();
        assert!(intent.toggle_web, "toggle must fire even with no web");
    }
}
