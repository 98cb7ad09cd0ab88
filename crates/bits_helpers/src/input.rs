use bevy::prelude::*;

/// Which pointer event to read from mouse or touch input.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerPhase {
    JustPressed,
    Held,
    JustReleased,
}

/// Screen position of the first mouse or touch pointer in the given phase.
pub fn pointer_screen_position(
    phase: PointerPhase,
    button_input: &ButtonInput<MouseButton>,
    touch_input: &Touches,
    window: &Window,
) -> Option<Vec2> {
    let mouse_matches = match phase {
        PointerPhase::JustPressed => button_input.just_pressed(MouseButton::Left),
        PointerPhase::Held => button_input.pressed(MouseButton::Left),
        PointerPhase::JustReleased => button_input.just_released(MouseButton::Left),
    };
    if mouse_matches {
        return window.cursor_position();
    }

    let touch = match phase {
        PointerPhase::JustPressed => touch_input.iter_just_pressed().next(),
        PointerPhase::Held => touch_input.iter().next(),
        PointerPhase::JustReleased => touch_input.iter_just_released().next(),
    }?;
    Some(touch.position())
}

/// Same as [`pointer_screen_position`], converted to 2D world coordinates through the camera.
pub fn pointer_world_position(
    phase: PointerPhase,
    button_input: &Res<ButtonInput<MouseButton>>,
    touch_input: &Res<Touches>,
    windows: &Query<&Window>,
    camera: &Query<(&Camera, &GlobalTransform)>,
) -> Option<Vec2> {
    let window = windows.get_single().ok()?;
    let position = pointer_screen_position(phase, button_input, touch_input, window)?;

    let (camera, camera_transform) = camera.get_single().ok()?;

    camera
        .viewport_to_world(camera_transform, position)
        .map(|ray| ray.origin.truncate())
        .ok()
}

pub fn just_pressed_world_position(
    button_input: &Res<ButtonInput<MouseButton>>,
    touch_input: &Res<Touches>,
    windows: &Query<&Window>,
    camera: &Query<(&Camera, &GlobalTransform)>,
) -> Option<Vec2> {
    pointer_world_position(
        PointerPhase::JustPressed,
        button_input,
        touch_input,
        windows,
        camera,
    )
}

pub fn held_world_position(
    button_input: &Res<ButtonInput<MouseButton>>,
    touch_input: &Res<Touches>,
    windows: &Query<&Window>,
    camera: &Query<(&Camera, &GlobalTransform)>,
) -> Option<Vec2> {
    pointer_world_position(PointerPhase::Held, button_input, touch_input, windows, camera)
}

pub fn just_released_world_position(
    button_input: &Res<ButtonInput<MouseButton>>,
    touch_input: &Res<Touches>,
    windows: &Query<&Window>,
    camera: &Query<(&Camera, &GlobalTransform)>,
) -> Option<Vec2> {
    pointer_world_position(
        PointerPhase::JustReleased,
        button_input,
        touch_input,
        windows,
        camera,
    )
}
