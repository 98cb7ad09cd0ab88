use core::time::Duration;
use std::collections::BTreeSet;

use bevy::prelude::*;
use bits_helpers::restart::Restartable;

use crate::geometry::{frame_contains, frames_intersect};
use crate::palette::{ColorOption, NEUTRAL_GRAY};
use crate::settings::MatcherSettings;
use crate::shake::{ShakePattern, ShakeSequence};

/// How a drop was resolved.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DropOutcome {
    /// The square was released away from the target.
    Miss,
    /// The square landed on the target and its name matches the target text.
    Correct,
    /// The square landed on the target with the wrong name.
    Incorrect,
}

/// Read-only copy of everything the renderer consumes.
#[derive(Clone, Debug, PartialEq)]
pub struct RoundSnapshot {
    pub target_text: &'static str,
    pub current_target_color: Color,
    pub used_colors: BTreeSet<ColorOption>,
    pub dragged_color: Option<ColorOption>,
    pub drag_offset: Vec2,
    pub target_frame: Rect,
    pub highlight_color: Option<Color>,
    pub shake_offset: f32,
}

/// State of the current round and the only place game rules live.
///
/// Callers resolve all layout themselves: drag samples come in as a translation
/// plus the moving square's center, drops as the square's final frame, both in
/// the same space as the target frame.
#[derive(Resource, Debug)]
pub struct RoundState {
    target: ColorOption,
    current_target_color: Color,
    used_colors: BTreeSet<ColorOption>,
    dragged_color: Option<ColorOption>,
    drag_offset: Vec2,
    target_frame: Rect,
    highlight_color: Option<Color>,
    shake_offset: f32,
    /// Bumped on every write to `shake_offset`, including writes of an unchanged value.
    shake_revision: u32,
    shake: Option<ShakeSequence>,
    shake_pattern: ShakePattern,
    rng: fastrand::Rng,
}

impl RoundState {
    pub fn new(mut rng: fastrand::Rng, shake_pattern: ShakePattern) -> Self {
        Self {
            target: ColorOption::random(&mut rng),
            current_target_color: NEUTRAL_GRAY,
            used_colors: BTreeSet::new(),
            dragged_color: None,
            drag_offset: Vec2::ZERO,
            target_frame: Rect::default(),
            highlight_color: None,
            shake_offset: 0.0,
            shake_revision: 0,
            shake: None,
            shake_pattern,
            rng,
        }
    }

    /// A reproducible round with the default shake.
    pub fn with_seed(seed: u64) -> Self {
        Self::new(fastrand::Rng::with_seed(seed), ShakePattern::default())
    }

    pub const fn target(&self) -> ColorOption {
        self.target
    }

    pub fn target_text(&self) -> &'static str {
        self.target.name()
    }

    pub const fn current_target_color(&self) -> Color {
        self.current_target_color
    }

    pub const fn used_colors(&self) -> &BTreeSet<ColorOption> {
        &self.used_colors
    }

    pub fn is_used(&self, color: ColorOption) -> bool {
        self.used_colors.contains(&color)
    }

    pub const fn dragged_color(&self) -> Option<ColorOption> {
        self.dragged_color
    }

    pub const fn drag_offset(&self) -> Vec2 {
        self.drag_offset
    }

    pub const fn target_frame(&self) -> Rect {
        self.target_frame
    }

    pub const fn highlight_color(&self) -> Option<Color> {
        self.highlight_color
    }

    pub const fn shake_offset(&self) -> f32 {
        self.shake_offset
    }

    pub const fn shake_revision(&self) -> u32 {
        self.shake_revision
    }

    pub const fn is_shaking(&self) -> bool {
        self.shake.is_some()
    }

    pub fn snapshot(&self) -> RoundSnapshot {
        RoundSnapshot {
            target_text: self.target_text(),
            current_target_color: self.current_target_color,
            used_colors: self.used_colors.clone(),
            dragged_color: self.dragged_color,
            drag_offset: self.drag_offset,
            target_frame: self.target_frame,
            highlight_color: self.highlight_color,
            shake_offset: self.shake_offset,
        }
    }

    /// Records where the target square currently sits on screen.
    pub fn set_target_frame(&mut self, frame: Rect) {
        self.target_frame = frame;
    }

    /// Records one pointer-move sample of the square being dragged.
    pub fn begin_or_continue_drag(&mut self, color: ColorOption, translation: Vec2, center: Vec2) {
        if self.dragged_color != Some(color) {
            debug!("Dragging {color}");
        }
        self.dragged_color = Some(color);
        self.drag_offset = translation;
        self.highlight_color =
            frame_contains(self.target_frame, center).then_some(color.display_color());
    }

    /// Resolves the release of `color` with its final frame.
    pub fn end_drag(&mut self, color: ColorOption, final_frame: Rect) -> DropOutcome {
        self.highlight_color = None;
        self.dragged_color = None;
        self.drag_offset = Vec2::ZERO;

        let outcome = if !frames_intersect(final_frame, self.target_frame) {
            DropOutcome::Miss
        } else if color == self.target {
            self.current_target_color = color.display_color();
            self.used_colors.insert(color);
            DropOutcome::Correct
        } else {
            self.start_shake();
            DropOutcome::Incorrect
        };

        info!("Dropped {color} on target {}: {outcome:?}", self.target);
        outcome
    }

    /// Moves the running shake forward by `delta`, writing any pulse that came due.
    pub fn advance_shake(&mut self, delta: Duration) {
        let Some(sequence) = self.shake.as_mut() else {
            return;
        };

        let pulse = sequence.advance(delta);
        if sequence.is_finished() {
            self.shake = None;
        }
        if let Some(offset) = pulse {
            self.write_shake_offset(offset);
        }
    }

    /// Starts a new round with a fresh target. Cancels any running shake.
    pub fn reset_game(&mut self) {
        self.cancel_shake();
        self.drag_offset = Vec2::ZERO;
        self.dragged_color = None;
        self.highlight_color = None;
        self.current_target_color = NEUTRAL_GRAY;
        self.target = ColorOption::random(&mut self.rng);
        self.write_shake_offset(0.0);
        self.used_colors.clear();
        info!("New round, match {}", self.target);
    }

    fn start_shake(&mut self) {
        self.cancel_shake();
        let (sequence, offset) = ShakeSequence::start(self.shake_pattern);
        self.shake = Some(sequence);
        self.write_shake_offset(offset);
    }

    fn cancel_shake(&mut self) {
        if self.shake.take().is_some() {
            debug!("Cancelled running shake");
        }
    }

    fn write_shake_offset(&mut self, offset: f32) {
        self.shake_offset = offset;
        self.shake_revision = self.shake_revision.wrapping_add(1);
    }
}

impl FromWorld for RoundState {
    fn from_world(world: &mut World) -> Self {
        let settings = world
            .get_resource::<MatcherSettings>()
            .cloned()
            .unwrap_or_default()
            .validated();
        Self::new(settings.rng(), settings.shake)
    }
}

impl Restartable for RoundState {
    fn reset(&mut self) {
        self.reset_game();
    }
}
