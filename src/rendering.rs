//! Camera, HUD, and gizmo rendering.
//!
//! ## Systems
//!
//! | System                    | Schedule | Purpose                              |
//! |---------------------------|----------|--------------------------------------|
//! | `setup_camera`            | Startup  | Spawn the 2D camera                  |
//! | `camera_follow_system`    | Update   | Horizontal-only follow with offset   |
//! | `setup_hud`               | Startup  | Spawn score + health HUD nodes       |
//! | `hud_display_system`      | Update   | Refresh HUD text                     |
//! | `player_gizmo_system`     | Update   | Player trapezoid outline + ceiling   |
//! | `setup_debug_text` / `debug_text_system` | Startup / Update | Stats-for-nerds overlay (config-gated) |

use crate::ceiling::CeilingStrip;
use crate::config::GameConfig;
use crate::player::{player_collider_points, Player, PlayerHealth};
use crate::round::RoundState;
use crate::score::ScoreTracker;
use crate::web::WebState;
use bevy::prelude::*;

// ── Component markers ─────────────────────────────────────────────────────────

/// Marker for the permanent score/health HUD node.
#[derive(Component)]
pub struct HudDisplay;

/// Marker for the debug stats overlay node.
#[derive(Component)]
pub struct DebugTextDisplay;

// ── Camera ────────────────────────────────────────────────────────────────────

/// Setup camera for 2D rendering, vertically centred between the ceiling line
/// and the spawn depth so both stay on screen.
pub fn setup_camera(mut commands: Commands, config: Res<GameConfig>) {
    let cam_y = (config.ceiling_y + config.spawn_y) / 2.0;
    commands.spawn((Camera2d, Transform::from_xyz(0.0, cam_y, 0.0)));
    eprintln!("[SETUP] Camera spawned");
}

/// Horizontal-only camera follow with a fixed lead offset.  Vertical position
/// never moves; swinging up or down stays inside the fixed frame.
pub fn camera_follow_system(
    q_player: Query<&Transform, With<Player>>,
    mut q_camera: Query<&mut Transform, (With<Camera>, Without<Player>)>,
    config: Res<GameConfig>,
) {
    let Ok(player_transform) = q_player.single() else {
        return;
    };
    let Ok(mut cam) = q_camera.single_mut() else {
        return;
    };

    cam.translation.x = player_transform.translation.x + config.camera_offset_x;
}

// ── HUD ───────────────────────────────────────────────────────────────────────

/// Spawn the permanent score + health HUD in the top-left corner.
pub fn setup_hud(mut commands: Commands) {
    commands
        .spawn((
            Node {
                position_type: PositionType::Absolute,
                left: Val::Px(10.0),
                top: Val::Px(10.0),
                ..default()
            },
            HudDisplay,
        ))
        .with_children(|parent| {
            parent.spawn((
                Text::new("Score: 0 | Health: 0"),
                TextFont {
                    font_size: 20.0,
                    ..default()
                },
                TextColor(Color::srgb(0.95, 0.88, 0.45)),
            ));
        });
}

/// Refresh the HUD text from the score tracker and player health.
pub fn hud_display_system(
    score: Res<ScoreTracker>,
    q_health: Query<&PlayerHealth, With<Player>>,
    parent_query: Query<&Children, With<HudDisplay>>,
    mut text_query: Query<&mut Text>,
) {
    let hp = q_health.single().map(|h| h.hp).unwrap_or(0);
    for children in parent_query.iter() {
        for child in children.iter() {
            if let Ok(mut text) = text_query.get_mut(child) {
                *text = Text::new(format!("Score: {} | Health: {}", score.current, hp));
            }
        }
    }
}

// ── Gizmos ────────────────────────────────────────────────────────────────────

/// Draw the player trapezoid outline and the ceiling strip edge.
///
/// The outline doubles as the death-animation stand-in: white while alive,
/// red once the round enters `Dying`.
pub fn player_gizmo_system(
    mut gizmos: Gizmos,
    q_player: Query<&Transform, With<Player>>,
    q_strip: Query<&Transform, (With<CeilingStrip>, Without<Player>)>,
    state: Res<State<RoundState>>,
    config: Res<GameConfig>,
) {
    if let Ok(transform) = q_player.single() {
        let pos = transform.translation.truncate();
        let color = if *state.get() == RoundState::Active {
            Color::WHITE
        } else {
            Color::srgb(1.0, 0.2, 0.2)
        };
        let verts = player_collider_points(&config);
        for i in 0..verts.len() {
            gizmos.line_2d(pos + verts[i], pos + verts[(i + 1) % verts.len()], color);
        }
    }

    // Underside of the ceiling strip, so the hazard is visible.
    if let Ok(strip) = q_strip.single() {
        let y = strip.translation.y - config.ceiling_half_thickness;
        let half = config.viewport_width;
        gizmos.line_2d(
            Vec2::new(strip.translation.x - half, y),
            Vec2::new(strip.translation.x + half, y),
            Color::srgb(0.6, 0.6, 0.7),
        );
    }
}

// ── Debug overlay ─────────────────────────────────────────────────────────────

/// Spawn the stats-for-nerds overlay when `debug = true` in settings.
pub fn setup_debug_text(mut commands: Commands, config: Res<GameConfig>) {
    if !config.debug {
        return;
    }
    commands
        .spawn((
            Node {
                position_type: PositionType::Absolute,
                left: Val::Px(10.0),
                top: Val::Px(40.0),
                ..default()
            },
            DebugTextDisplay,
        ))
        .with_children(|parent| {
            parent.spawn((
                Text::new("STATS FOR NERDS"),
                TextFont {
                    font_size: 14.0,
                    ..default()
                },
                TextColor(Color::srgb(0.0, 1.0, 0.0)),
            ));
        });
}

/// Refresh the debug overlay each frame.
#[allow(clippy::type_complexity)]
pub fn debug_text_system(
    q_player: Query<(&Transform, &PlayerHealth), With<Player>>,
    web: Res<WebState>,
    score: Res<ScoreTracker>,
    state: Res<State<RoundState>>,
    parent_query: Query<&Children, With<DebugTextDisplay>>,
    mut text_query: Query<&mut Text>,
) {
    let Ok((transform, health)) = q_player.single() else {
        return;
    };
    let body = format!(
        "STATS FOR NERDS\n\
         state = {:?}\n\
         score = {}\n\
         health = {}\n\
         player.x = {:.1}\n\
         player.y = {:.1}\n\
         webExists = {}\n\
         webLength = {:.1}\n\
         anchorOffset = {:.1}",
        state.get(),
        score.current,
        health.hp,
        transform.translation.x,
        transform.translation.y,
        web.exists,
        web.rest_length,
        web.anchor_offset_x,
    );
    for children in parent_query.iter() {
        for child in children.iter() {
            if let Ok(mut text) = text_query.get_mut(child) {
                *text = Text::new(body.clone());
            }
        }
    }
}
