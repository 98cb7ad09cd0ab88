use bevy::prelude::*;

mod animation;
mod game;
pub mod geometry;
mod input;
pub mod palette;
pub mod round;
mod screen;
pub mod settings;
pub mod shake;

use animation::AnimationPlugin;
pub use game::{DropResolved, GamePlugin};
use input::InputPlugin;
use screen::ScreenPlugin;

/// Frame ordering: pointer input resolves drags, then drop reactions and
/// restarts, then sprites mirror the round.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum MatcherSet {
    Input,
    React,
    Render,
}

pub fn run() {
    bits_helpers::get_default_app("Color Matcher", env!("CARGO_CRATE_NAME"))
        .configure_sets(
            Update,
            (MatcherSet::Input, MatcherSet::React, MatcherSet::Render).chain(),
        )
        .add_plugins(GamePlugin)
        .add_plugins(InputPlugin)
        .add_plugins(ScreenPlugin)
        .add_plugins(AnimationPlugin)
        .add_systems(Startup, setup)
        .run();
}

fn setup(mut commands: Commands) {
    commands.spawn(Camera2d);
}
