//! Scrolling ceiling collision strip.
//!
//! The playable world is unbounded to the right, but static geometry can't be.
//! Instead of tiling ceiling colliders forever, a single strip twice the
//! viewport width is re-centred on the camera every tick, so it always spans
//! ahead of and behind the visible area no matter how far the player travels.
//! The strip is pure collision geometry; the web anchors to the separate
//! point body owned by [`crate::web`].

use crate::config::GameConfig;
use bevy::prelude::*;
use bevy_rapier2d::prelude::*;

/// Marker for the single ceiling collision strip entity.
#[derive(Component)]
pub struct CeilingStrip;

/// Target centre of the strip for a given camera scroll position.
///
/// `camera_scroll_x` is the world-space left edge of the viewport.  Centring
/// the strip one full viewport width to the right of it puts half the strip
/// over the visible area and half ahead of it; with a total strip width of
/// 2× the viewport, neither edge is ever exposed.
#[inline]
pub fn strip_center_x(camera_scroll_x: f32, viewport_width: f32) -> f32 {
    camera_scroll_x + viewport_width
}

/// Spawn the ceiling strip at round start.
///
/// Collision groups: the strip is world geometry (`GROUP_1`) and collides with
/// the player (`GROUP_2`) only.
pub fn spawn_ceiling_strip(commands: &mut Commands, config: &GameConfig) {
    commands.spawn((
        CeilingStrip,
        RigidBody::Fixed,
        Collider::cuboid(config.viewport_width, config.ceiling_half_thickness),
        CollisionGroups::new(Group::GROUP_1, Group::GROUP_2),
        Transform::from_xyz(
            strip_center_x(0.0, config.viewport_width),
            config.ceiling_y,
            0.0,
        ),
        Visibility::default(),
    ));
}

/// Per-tick strip re-centring.  Idempotent when the camera hasn't moved;
/// vertical position is never touched.
pub fn ceiling_track_system(
    q_camera: Query<&Transform, With<Camera>>,
    mut q_strip: Query<&mut Transform, (With<CeilingStrip>, Without<Camera>)>,
    windows: Query<&Window>,
    config: Res<GameConfig>,
) {
    let Ok(cam) = q_camera.single() else {
        return;
    };
    let Ok(mut strip) = q_strip.single_mut() else {
        return;
    };

    let viewport_width = windows
        .single()
        .map(|w| w.width())
        .unwrap_or(config.viewport_width);
    let scroll_x = cam.translation.x - viewport_width / 2.0;
    strip.translation.x = strip_center_x(scroll_x, viewport_width);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strip_tracks_camera_scroll() {
        assert_eq!(strip_center_x(0.0, 1280.0), 1280.0);
        assert_eq!(strip_center_x(500.0, 1280.0), 1780.0);
    }

    #[test]
    fn strip_handles_negative_and_large_scroll() {
        assert_eq!(strip_center_x(-2000.0, 1280.0), -720.0);
        assert_eq!(strip_center_x(1.0e7, 1280.0), 1.0e7 + 1280.0);
    }

    #[test]
    fn recentring_is_idempotent() {
        let once = strip_center_x(431.5, 1280.0);
        let twice = strip_center_x(431.5, 1280.0);
        assert_eq!(once, twice);
    }
}
