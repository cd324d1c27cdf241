//! Game-over overlay.
//!
//! Spawned on `OnEnter(Over)` centred over the frozen world; shows the final
//! score and a PLAY AGAIN button.  Restarting (button or `R`) transitions
//! back to `Active`, which rebuilds the round from scratch.

use crate::round::RoundState;
use crate::score::ScoreTracker;
use bevy::prelude::*;

/// Root node of the game-over UI; the entire tree is despawned on `OnExit(Over)`.
#[derive(Component)]
pub struct GameOverRoot;

/// Tags the "PLAY AGAIN" button.
#[derive(Component)]
pub struct PlayAgainButton;

/// Spawn the game-over overlay with the final score.
pub fn setup_game_over(mut commands: Commands, score: Res<ScoreTracker>) {
    commands
        .spawn((
            Node {
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
                position_type: PositionType::Absolute,
                left: Val::Px(0.0),
                top: Val::Px(0.0),
                ..default()
            },
            BackgroundColor(Color::srgba(0.0, 0.0, 0.0, 0.78)),
            ZIndex(100),
            GameOverRoot,
        ))
        .with_children(|overlay| {
            overlay
                .spawn((
                    Node {
                        flex_direction: FlexDirection::Column,
                        align_items: AlignItems::Center,
                        padding: UiRect::all(Val::Px(36.0)),
                        row_gap: Val::Px(14.0),
                        border: UiRect::all(Val::Px(2.0)),
                        min_width: Val::Px(280.0),
                        ..default()
                    },
                    BackgroundColor(Color::srgb(0.05, 0.05, 0.08)),
                    BorderColor::all(Color::srgb(0.45, 0.45, 0.58)),
                ))
                .with_children(|card| {
                    card.spawn((
                        Text::new("GAME OVER"),
                        TextFont {
                            font_size: 40.0,
                            ..default()
                        },
                        TextColor(Color::srgb(1.0, 0.25, 0.25)),
                    ));

                    card.spawn((
                        Text::new(format!("Score: {}", score.current)),
                        TextFont {
                            font_size: 22.0,
                            ..default()
                        },
                        TextColor(Color::srgb(0.68, 0.68, 0.68)),
                    ));

                    card.spawn((
                        Button,
                        Node {
                            width: Val::Px(220.0),
                            height: Val::Px(48.0),
                            justify_content: JustifyContent::Center,
                            align_items: AlignItems::Center,
                            border: UiRect::all(Val::Px(2.0)),
                            ..default()
                        },
                        BackgroundColor(Color::srgb(0.10, 0.22, 0.10)),
                        BorderColor::all(Color::srgb(0.30, 0.62, 0.30)),
                        PlayAgainButton,
                    ))
                    .with_children(|btn| {
                        btn.spawn((
                            Text::new("PLAY AGAIN"),
                            TextFont {
                                font_size: 18.0,
                                ..default()
                            },
                            TextColor(Color::srgb(0.72, 0.95, 0.72)),
                        ));
                    });

                    card.spawn((
                        Text::new("R → restart"),
                        TextFont {
                            font_size: 12.0,
                            ..default()
                        },
                        TextColor(Color::srgb(0.5, 0.5, 0.5)),
                    ));
                });
        });
}

/// Recursively despawn the game-over overlay.
pub fn cleanup_game_over(mut commands: Commands, query: Query<Entity, With<GameOverRoot>>) {
    for entity in query.iter() {
        commands.entity(entity).despawn();
    }
}

/// Handle PLAY AGAIN presses.
#[allow(clippy::type_complexity)]
pub fn play_again_button_system(
    query: Query<(&Interaction, &Children), (Changed<Interaction>, With<PlayAgainButton>)>,
    mut btn_text: Query<&mut TextColor>,
    mut next_state: ResMut<NextState<RoundState>>,
) {
    for (interaction, children) in query.iter() {
        match interaction {
            Interaction::Pressed => {
                next_state.set(RoundState::Active);
            }
            Interaction::Hovered => {
                for child in children.iter() {
                    if let Ok(mut color) = btn_text.get_mut(child) {
                        *color = TextColor(Color::WHITE);
                    }
                }
            }
            Interaction::None => {
                for child in children.iter() {
                    if let Ok(mut color) = btn_text.get_mut(child) {
                        *color = TextColor(Color::srgb(0.72, 0.95, 0.72));
                    }
                }
            }
        }
    }
}
