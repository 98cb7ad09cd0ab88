use core::time::Duration;

use bevy::prelude::*;

/// Eased move of a released square back to its rest position.
#[derive(Component)]
pub struct SnapBack {
    timer: Timer,
    from: Vec3,
    to: Vec3,
}

impl SnapBack {
    pub fn new(from: Vec3, to: Vec3, duration: Duration) -> Self {
        Self {
            timer: Timer::new(duration, TimerMode::Once),
            from,
            to,
        }
    }
}

/// Eased change of a sprite color.
#[derive(Component)]
pub struct ColorFade {
    timer: Timer,
    from: Color,
    to: Color,
}

impl ColorFade {
    pub fn new(from: Color, to: Color, duration: Duration) -> Self {
        Self {
            timer: Timer::new(duration, TimerMode::Once),
            from,
            to,
        }
    }

    /// The color the fade ends on.
    pub const fn target(&self) -> Color {
        self.to
    }
}

/// Eased horizontal offset of the whole screen, applied through the camera.
///
/// Every shake write replaces this component, so two writes of the same value
/// still restart the transition from wherever the screen currently is.
#[derive(Component)]
pub struct ScreenShake {
    timer: Timer,
    from: f32,
    to: f32,
}

impl ScreenShake {
    pub fn new(from: f32, to: f32, duration: Duration) -> Self {
        Self {
            timer: Timer::new(duration, TimerMode::Once),
            from,
            to,
        }
    }
}

pub struct AnimationPlugin;

impl Plugin for AnimationPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Update,
            (animate_snap_back, animate_color_fade, animate_screen_shake),
        );
    }
}

/// Smoothstep: slow start, slow finish.
pub fn ease_in_out(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    t * t * 2.0f32.mul_add(-t, 3.0)
}

fn animate_snap_back(
    mut commands: Commands,
    time: Res<Time>,
    mut query: Query<(Entity, &mut SnapBack, &mut Transform)>,
) {
    for (entity, mut snap, mut transform) in &mut query {
        snap.timer.tick(time.delta());
        let progress = ease_in_out(snap.timer.fraction());
        transform.translation = snap.from.lerp(snap.to, progress);

        if snap.timer.finished() {
            transform.translation = snap.to;
            commands.entity(entity).remove::<SnapBack>();
        }
    }
}

fn animate_color_fade(
    mut commands: Commands,
    time: Res<Time>,
    mut query: Query<(Entity, &mut ColorFade, &mut Sprite)>,
) {
    for (entity, mut fade, mut sprite) in &mut query {
        fade.timer.tick(time.delta());
        let progress = ease_in_out(fade.timer.fraction());
        sprite.color = fade.from.mix(&fade.to, progress);

        if fade.timer.finished() {
            sprite.color = fade.to;
            commands.entity(entity).remove::<ColorFade>();
        }
    }
}

fn animate_screen_shake(
    mut commands: Commands,
    time: Res<Time>,
    mut query: Query<(Entity, &mut ScreenShake, &mut Transform)>,
) {
    for (entity, mut shake, mut transform) in &mut query {
        shake.timer.tick(time.delta());
        let progress = ease_in_out(shake.timer.fraction());
        let offset = (shake.to - shake.from).mul_add(progress, shake.from);
        // Moving the camera left shifts the screen contents right.
        transform.translation.x = -offset;

        if shake.timer.finished() {
            transform.translation.x = -shake.to;
            commands.entity(entity).remove::<ScreenShake>();
        }
    }
}
