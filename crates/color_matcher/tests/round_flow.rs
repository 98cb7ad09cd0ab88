use core::time::Duration;

use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;
use color_matcher::{GamePlugin, MatcherSet};
use color_matcher::palette::{ColorOption, NEUTRAL_GRAY, PALETTE};
use color_matcher::round::{DropOutcome, RoundState};
use color_matcher::settings::MatcherSettings;

const STEP: Duration = Duration::from_millis(10);

fn target_frame() -> Rect {
    Rect::from_center_size(Vec2::new(0.0, 110.0), Vec2::splat(150.0))
}

fn headless_app(settings: MatcherSettings) -> App {
    let mut app = App::new();
    app.add_plugins(MinimalPlugins)
        .insert_resource(TimeUpdateStrategy::ManualDuration(STEP))
        .insert_resource(settings)
        .add_plugins(GamePlugin);
    // The first update only establishes the clock.
    app.update();
    app.world_mut()
        .resource_mut::<RoundState>()
        .set_target_frame(target_frame());
    app
}

fn round(app: &App) -> &RoundState {
    app.world().resource::<RoundState>()
}

fn round_mut(app: &mut App) -> Mut<'_, RoundState> {
    app.world_mut().resource_mut::<RoundState>()
}

fn wrong_color(app: &App) -> ColorOption {
    let target = round(app).target();
    PALETTE
        .into_iter()
        .find(|color| *color != target)
        .unwrap_or_default()
}

fn run_for(app: &mut App, duration: Duration) {
    let frames = duration.as_millis() / STEP.as_millis();
    for _ in 0..frames {
        app.update();
    }
}

#[test]
fn seeded_settings_pick_reproducible_targets() {
    let settings = MatcherSettings {
        seed: Some(1234),
        ..default()
    };
    let first = headless_app(settings.clone());
    let second = headless_app(settings);
    assert_eq!(
        round(&first).target(),
        round(&second).target(),
        "same seed, same target"
    );
}

#[test]
fn inserted_round_is_kept() {
    let mut app = App::new();
    app.add_plugins(MinimalPlugins)
        .insert_resource(RoundState::with_seed(77))
        .add_plugins(GamePlugin);
    app.update();
    assert_eq!(
        round(&app).target(),
        RoundState::with_seed(77).target(),
        "plugin must not replace a round inserted up front"
    );
}

#[test]
fn wrong_drop_shakes_then_settles() {
    let mut app = headless_app(MatcherSettings::default());
    let wrong = wrong_color(&app);

    let outcome = round_mut(&mut app).end_drag(wrong, target_frame());
    assert_eq!(outcome, DropOutcome::Incorrect, "outcome");
    assert!(round(&app).shake_offset() > 0.0, "screen moves right away");

    run_for(&mut app, Duration::from_millis(40));
    assert!(round(&app).shake_offset() > 0.0, "still displaced before the second pulse");

    run_for(&mut app, Duration::from_millis(80));
    assert_eq!(round(&app).shake_offset(), 0.0, "settled after the last pulse");
    assert!(!round(&app).is_shaking(), "sequence finished");
}

#[test]
fn correct_drop_recolors_and_does_not_shake() {
    let mut app = headless_app(MatcherSettings::default());
    let target = round(&app).target();

    let outcome = round_mut(&mut app).end_drag(target, target_frame());
    run_for(&mut app, Duration::from_millis(200));

    assert_eq!(outcome, DropOutcome::Correct, "outcome");
    let snapshot = round(&app).snapshot();
    assert_eq!(
        snapshot.current_target_color,
        target.display_color(),
        "target recolored"
    );
    assert!(snapshot.used_colors.contains(&target), "color retired");
    assert_eq!(snapshot.shake_offset, 0.0, "no shake");
}

#[test]
fn restart_mid_shake_leaves_a_quiet_screen() {
    let mut app = headless_app(MatcherSettings::default());
    let wrong = wrong_color(&app);

    round_mut(&mut app).end_drag(wrong, target_frame());
    run_for(&mut app, Duration::from_millis(20));
    round_mut(&mut app).reset_game();

    for _ in 0..15 {
        app.update();
        assert_eq!(round(&app).shake_offset(), 0.0, "no pulse after restart");
    }
    assert_eq!(
        round(&app).current_target_color(),
        NEUTRAL_GRAY,
        "target gray again"
    );
}

#[test]
fn idle_frames_do_not_mark_the_round_changed() {
    let mut app = headless_app(MatcherSettings::default());
    app.update();
    let last_changed = app
        .world()
        .get_resource_ref::<RoundState>()
        .map(|round| round.last_changed());

    run_for(&mut app, Duration::from_millis(50));

    let now_changed = app
        .world()
        .get_resource_ref::<RoundState>()
        .map(|round| round.last_changed());
    assert_eq!(last_changed, now_changed, "nothing happened, nothing changed");
}

/// Color to drop on the target during the next `MatcherSet::Input` pass.
#[derive(Resource, Default)]
struct PendingDrop(Option<ColorOption>);

fn drop_pending(mut pending: ResMut<PendingDrop>, mut round: ResMut<RoundState>) {
    if let Some(color) = pending.0.take() {
        let frame = round.target_frame();
        round.end_drag(color, frame);
    }
}

#[test]
fn long_frame_does_not_swallow_a_fresh_shake() {
    let mut app = App::new();
    app.add_plugins(MinimalPlugins)
        .insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_millis(120)))
        .init_resource::<PendingDrop>()
        .add_plugins(GamePlugin)
        .add_systems(Update, drop_pending.in_set(MatcherSet::Input));
    app.update();
    app.update();
    round_mut(&mut app).set_target_frame(target_frame());

    let wrong = wrong_color(&app);
    app.world_mut().resource_mut::<PendingDrop>().0 = Some(wrong);
    app.update();
    assert!(!round(&app).is_used(wrong), "wrong color is not retired");
    assert_eq!(
        round(&app).shake_offset(),
        20.0,
        "first pulse survives the frame that started it"
    );
    assert!(round(&app).is_shaking(), "remaining pulses still pending");

    app.update();
    assert_eq!(round(&app).shake_offset(), 0.0, "settled one long frame later");
    assert!(!round(&app).is_shaking(), "sequence finished");
}
