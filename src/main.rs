use bevy::prelude::*;
use bevy::window::WindowResolution;
use bevy_rapier2d::prelude::*;

use swingline::ceiling;
use swingline::config::{self, GameConfig};
use swingline::constants::{VIEWPORT_HEIGHT, VIEWPORT_WIDTH};
use swingline::menu;
use swingline::player;
use swingline::rendering;
use swingline::round::{self, DeathTimer, RoundOver, RoundState};
use swingline::score::{self, ScoreTracker};
use swingline::web::{self, WebState};

/// Configure Rapier from the loaded config: world gravity and a fixed 60 Hz
/// physics step decoupled from the render frame rate.
fn setup_physics_config(
    mut rapier: Query<&mut RapierConfiguration>,
    mut timestep: ResMut<TimestepMode>,
    config: Res<GameConfig>,
) {
    for mut cfg in rapier.iter_mut() {
        cfg.gravity = config.gravity();
    }
    *timestep = TimestepMode::Fixed {
        dt: 1.0 / 60.0,
        substeps: 1,
    };
}

fn main() {
    let mut app = App::new();

    app.add_plugins(DefaultPlugins.set(WindowPlugin {
        primary_window: Some(Window {
            title: "Swingline".into(),
            resolution: WindowResolution::new(VIEWPORT_WIDTH as u32, VIEWPORT_HEIGHT as u32),
            ..Default::default()
        }),
        ..Default::default()
    }))
    .insert_resource(ClearColor(Color::srgb(0.02, 0.02, 0.05)))
    // pixels_per_meter(1.0) keeps world units identical to screen pixels; all
    // forces and gravity in constants.rs are tuned against that scale.
    .add_plugins(RapierPhysicsPlugin::<NoUserData>::pixels_per_meter(1.0))
    // Insert GameConfig with compiled defaults; load_game_config overwrites it
    // from assets/settings.toml (if present) in the Startup schedule.
    .insert_resource(GameConfig::default())
    .insert_resource(ScoreTracker::default())
    .insert_resource(WebState::default())
    .insert_resource(player::PlayerIntent::default())
    .insert_resource(DeathTimer::default())
    .init_state::<RoundState>()
    .add_message::<RoundOver>();

    app.add_systems(
        Startup,
        (
            // Load config first so every other startup system sees final values.
            config::load_game_config,
            rendering::setup_camera.after(config::load_game_config),
            rendering::setup_hud,
            rendering::setup_debug_text.after(config::load_game_config),
            setup_physics_config.after(config::load_game_config),
        ),
    );

    // ── Round lifecycle ───────────────────────────────────────────────────────
    app.add_systems(
        OnEnter(RoundState::Active),
        (round::resume_physics, round::setup_round),
    )
    .add_systems(
        OnEnter(RoundState::Dying),
        (round::pause_physics, round::start_death_sequence),
    )
    .add_systems(OnEnter(RoundState::Over), menu::setup_game_over)
    .add_systems(
        OnExit(RoundState::Over),
        (menu::cleanup_game_over, round::cleanup_round),
    );

    // ── Per-tick gameplay (Active only) ───────────────────────────────────────
    app.add_systems(
        Update,
        (
            score::score_update_system,
            ceiling::ceiling_track_system,
            player::player_intent_clear_system,
            player::keyboard_to_intent_system,
            player::apply_player_intent_system,
            web::web_toggle_system,
            player::player_collision_damage_system,
        )
            .chain()
            .run_if(in_state(RoundState::Active)),
    );

    // ── Presentation (all states) ─────────────────────────────────────────────
    app.add_systems(
        Update,
        (
            rendering::camera_follow_system,
            web::render_web_system,
            rendering::player_gizmo_system,
            rendering::hud_display_system,
            rendering::debug_text_system,
            round::log_round_over_system,
        ),
    );

    // ── Death / game-over flow ────────────────────────────────────────────────
    app.add_systems(
        Update,
        round::death_timer_system.run_if(in_state(RoundState::Dying)),
    )
    .add_systems(
        Update,
        (menu::play_again_button_system, round::restart_input_system)
            .run_if(in_state(RoundState::Over)),
    );

    app.run();
}
