use bevy::prelude::*;
use bits_helpers::restart::{handle_restart, spawn_restart_button};

use crate::MatcherSet;
use crate::animation::{ColorFade, ScreenShake, SnapBack};
use crate::game::DropResolved;
use crate::palette::{ColorOption, PALETTE};
use crate::round::{DropOutcome, RoundState};
use crate::settings::MatcherSettings;

const HIGHLIGHT_BORDER: f32 = 8.0;
const LABEL_FONT_SIZE: f32 = 40.0;
const HINT_FONT_SIZE: f32 = 24.0;

const Z_HIGHLIGHT: f32 = 0.0;
const Z_TARGET: f32 = 1.0;
const Z_LABEL: f32 = 2.0;
const Z_SQUARE: f32 = 3.0;
const Z_DRAGGED: f32 = 5.0;

#[derive(Component)]
pub struct TargetSquare;

#[derive(Component)]
pub struct TargetHighlight;

#[derive(Component)]
pub struct TargetLabel;

/// A draggable square and the position it returns to.
#[derive(Component, Clone, Copy, Debug)]
pub struct ColorSquare {
    pub color: ColorOption,
    pub rest: Vec2,
}

impl ColorSquare {
    pub const fn rest_translation(&self) -> Vec3 {
        Vec3::new(self.rest.x, self.rest.y, Z_SQUARE)
    }
}

pub struct ScreenPlugin;

impl Plugin for ScreenPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, spawn_board)
            .add_systems(
                Update,
                (handle_restart::<RoundState>, react_to_drops).in_set(MatcherSet::React),
            )
            .add_systems(
                Update,
                (
                    (paint_target, place_squares).run_if(resource_changed::<RoundState>),
                    follow_shake,
                )
                    .in_set(MatcherSet::Render),
            );
    }
}

fn spawn_board(mut commands: Commands, settings: Res<MatcherSettings>, round: Res<RoundState>) {
    let target_center = Vec2::new(0.0, settings.target_y);

    commands.spawn((
        Sprite::from_color(
            Color::WHITE,
            Vec2::splat(HIGHLIGHT_BORDER.mul_add(2.0, settings.target_size)),
        ),
        Transform::from_translation(target_center.extend(Z_HIGHLIGHT)),
        Visibility::Hidden,
        TargetHighlight,
    ));

    commands
        .spawn((
            Sprite::from_color(
                round.current_target_color(),
                Vec2::splat(settings.target_size),
            ),
            Transform::from_translation(target_center.extend(Z_TARGET)),
            TargetSquare,
        ))
        .with_children(|parent| {
            parent.spawn((
                Text2d::new(round.target_text().to_uppercase()),
                TextFont {
                    font_size: LABEL_FONT_SIZE,
                    ..default()
                },
                TextColor(Color::WHITE),
                Transform::from_xyz(0.0, 0.0, Z_LABEL - Z_TARGET),
                TargetLabel,
            ));
        });

    commands.spawn((
        Text2d::new("Drag the matching color"),
        TextFont {
            font_size: HINT_FONT_SIZE,
            ..default()
        },
        TextColor(Color::srgb(0.8, 0.8, 0.8)),
        Transform::from_xyz(
            0.0,
            settings.target_y + settings.target_size.mul_add(0.5, LABEL_FONT_SIZE),
            Z_LABEL,
        ),
    ));

    let first_x = -settings.square_spacing * (PALETTE.len() as f32 - 1.0) / 2.0;
    for (index, color) in PALETTE.into_iter().enumerate() {
        let square = ColorSquare {
            color,
            rest: Vec2::new(
                (index as f32).mul_add(settings.square_spacing, first_x),
                settings.square_row_y,
            ),
        };
        commands.spawn((
            Sprite::from_color(color.display_color(), Vec2::splat(settings.square_size)),
            Transform::from_translation(square.rest_translation()),
            square,
        ));
    }

    spawn_restart_button(&mut commands, "Restart");
}

/// Starts the eased snap-back of missed squares; wrong answers jump back on their own.
fn react_to_drops(
    mut commands: Commands,
    mut drops: EventReader<DropResolved>,
    squares: Query<(Entity, &ColorSquare, &Transform)>,
    settings: Res<MatcherSettings>,
) {
    for drop in drops.read() {
        if drop.outcome != DropOutcome::Miss {
            continue;
        }
        for (entity, square, transform) in &squares {
            if square.color == drop.color {
                commands.entity(entity).insert(SnapBack::new(
                    transform.translation,
                    square.rest_translation(),
                    settings.ease_duration,
                ));
            }
        }
    }
}

fn paint_target(
    mut commands: Commands,
    round: Res<RoundState>,
    settings: Res<MatcherSettings>,
    target: Query<(Entity, &Sprite, Option<&ColorFade>), With<TargetSquare>>,
    mut label: Query<&mut Text2d, With<TargetLabel>>,
    mut highlight: Query<
        (&mut Sprite, &mut Visibility),
        (With<TargetHighlight>, Without<TargetSquare>),
    >,
) {
    if let Ok(mut text) = label.get_single_mut() {
        let wanted = round.target_text().to_uppercase();
        if text.0 != wanted {
            text.0 = wanted;
        }
    }

    if let Ok((mut sprite, mut visibility)) = highlight.get_single_mut() {
        match round.highlight_color() {
            Some(color) => {
                sprite.color = color;
                *visibility = Visibility::Visible;
            }
            None => *visibility = Visibility::Hidden,
        }
    }

    if let Ok((entity, sprite, fade)) = target.get_single() {
        let wanted = round.current_target_color();
        let heading = fade.map_or(sprite.color, ColorFade::target);
        if heading != wanted {
            commands
                .entity(entity)
                .insert(ColorFade::new(sprite.color, wanted, settings.ease_duration));
        }
    }
}

fn place_squares(
    round: Res<RoundState>,
    mut squares: Query<(&ColorSquare, &mut Transform, &mut Visibility), Without<SnapBack>>,
) {
    for (square, mut transform, mut visibility) in &mut squares {
        *visibility = if round.is_used(square.color) {
            Visibility::Hidden
        } else {
            Visibility::Visible
        };

        transform.translation = if round.dragged_color() == Some(square.color) {
            (square.rest + round.drag_offset()).extend(Z_DRAGGED)
        } else {
            square.rest_translation()
        };
    }
}

/// Restarts the camera transition on every shake write, repeated values included.
fn follow_shake(
    mut commands: Commands,
    round: Res<RoundState>,
    settings: Res<MatcherSettings>,
    camera: Query<(Entity, &Transform), With<Camera2d>>,
    mut seen_revision: Local<u32>,
) {
    if round.shake_revision() == *seen_revision {
        return;
    }
    *seen_revision = round.shake_revision();

    if let Ok((entity, transform)) = camera.get_single() {
        commands.entity(entity).insert(ScreenShake::new(
            -transform.translation.x,
            round.shake_offset(),
            settings.shake.step,
        ));
    }
}
