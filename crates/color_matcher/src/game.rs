use bevy::prelude::*;

use crate::MatcherSet;
use crate::palette::ColorOption;
use crate::round::{DropOutcome, RoundState};
use crate::settings::MatcherSettings;

/// Sent by the input bridge every time a drop is resolved.
#[derive(Event, Clone, Copy, Debug, PartialEq, Eq)]
pub struct DropResolved {
    pub color: ColorOption,
    pub outcome: DropOutcome,
}

/// Game rules without any rendering or input. Runs headless.
pub struct GamePlugin;

impl Plugin for GamePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<MatcherSettings>()
            .init_resource::<RoundState>()
            .add_event::<DropResolved>()
            .add_systems(Update, advance_shake.before(MatcherSet::Input));
    }
}

/// Runs ahead of input, so a shake started by this frame's drop is first ticked next frame.
fn advance_shake(time: Res<Time>, mut round: ResMut<RoundState>) {
    // Only touch the store mutably while a shake runs, so idle frames do not trip change detection.
    if round.is_shaking() {
        round.advance_shake(time.delta());
    }
}
