use bevy::prelude::*;
use bits_helpers::input::{
    held_world_position, just_pressed_world_position, just_released_world_position,
};

use crate::MatcherSet;
use crate::animation::SnapBack;
use crate::game::DropResolved;
use crate::palette::ColorOption;
use crate::round::RoundState;
use crate::screen::{ColorSquare, TargetSquare};
use crate::settings::MatcherSettings;

/// The square currently held by the pointer.
#[derive(Clone, Copy, Debug)]
struct Grab {
    color: ColorOption,
    rest: Vec2,
    /// Pointer position that corresponds to a zero translation.
    origin: Vec2,
    translation: Vec2,
}

#[derive(Resource, Default)]
pub struct DragState {
    grab: Option<Grab>,
}

pub struct InputPlugin;

impl Plugin for InputPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<DragState>().add_systems(
            Update,
            (sync_target_frame, start_drag, continue_drag, finish_drag)
                .chain()
                .in_set(MatcherSet::Input),
        );
    }
}

/// Keeps the store's target frame equal to where the target sprite sits in the world.
fn sync_target_frame(
    mut round: ResMut<RoundState>,
    settings: Res<MatcherSettings>,
    target: Query<(&GlobalTransform, &Sprite), (With<TargetSquare>, Changed<GlobalTransform>)>,
) {
    let Ok((transform, sprite)) = target.get_single() else {
        return;
    };

    let size = sprite
        .custom_size
        .unwrap_or_else(|| Vec2::splat(settings.target_size));
    let frame = Rect::from_center_size(transform.translation().truncate(), size);
    if round.target_frame() != frame {
        debug!("Target frame is now {frame:?}");
        round.set_target_frame(frame);
    }
}

fn start_drag(
    mut commands: Commands,
    mut drag: ResMut<DragState>,
    mut round: ResMut<RoundState>,
    settings: Res<MatcherSettings>,
    buttons: Res<ButtonInput<MouseButton>>,
    touches: Res<Touches>,
    windows: Query<&Window>,
    camera: Query<(&Camera, &GlobalTransform)>,
    squares: Query<(Entity, &ColorSquare, &Transform)>,
) {
    if drag.grab.is_some() {
        return;
    }
    let Some(pointer) = just_pressed_world_position(&buttons, &touches, &windows, &camera) else {
        return;
    };

    let hit = squares.iter().find(|(_, square, transform)| {
        !round.is_used(square.color)
            && Rect::from_center_size(
                transform.translation.truncate(),
                Vec2::splat(settings.square_size),
            )
            .contains(pointer)
    });
    let Some((entity, square, transform)) = hit else {
        return;
    };

    // A square caught mid snap-back keeps its current position.
    commands.entity(entity).remove::<SnapBack>();
    let translation = transform.translation.truncate() - square.rest;

    drag.grab = Some(Grab {
        color: square.color,
        rest: square.rest,
        origin: pointer - translation,
        translation,
    });
    round.begin_or_continue_drag(square.color, translation, square.rest + translation);
}

fn continue_drag(
    mut drag: ResMut<DragState>,
    mut round: ResMut<RoundState>,
    buttons: Res<ButtonInput<MouseButton>>,
    touches: Res<Touches>,
    windows: Query<&Window>,
    camera: Query<(&Camera, &GlobalTransform)>,
) {
    let Some(grab) = drag.grab.as_mut() else {
        return;
    };
    let Some(pointer) = held_world_position(&buttons, &touches, &windows, &camera) else {
        return;
    };

    let translation = pointer - grab.origin;
    if translation == grab.translation {
        return;
    }
    grab.translation = translation;
    round.begin_or_continue_drag(grab.color, translation, grab.rest + translation);
}

fn finish_drag(
    mut drag: ResMut<DragState>,
    mut round: ResMut<RoundState>,
    mut drops: EventWriter<DropResolved>,
    settings: Res<MatcherSettings>,
    buttons: Res<ButtonInput<MouseButton>>,
    touches: Res<Touches>,
    windows: Query<&Window>,
    camera: Query<(&Camera, &GlobalTransform)>,
) {
    let Some(grab) = drag.grab else {
        return;
    };
    if buttons.pressed(MouseButton::Left) || touches.iter().next().is_some() {
        return;
    }

    // The pointer may have left the window; fall back to the last sample.
    let translation = just_released_world_position(&buttons, &touches, &windows, &camera)
        .map_or(grab.translation, |pointer| pointer - grab.origin);
    let final_frame =
        Rect::from_center_size(grab.rest + translation, Vec2::splat(settings.square_size));

    let outcome = round.end_drag(grab.color, final_frame);
    drops.send(DropResolved {
        color: grab.color,
        outcome,
    });
    drag.grab = None;
}
