use bevy::color::Color;
use strum::{Display, EnumIter, EnumString, IntoStaticStr};

/// Fill of the target square before anything has been matched.
pub const NEUTRAL_GRAY: Color = Color::srgb(0.56, 0.56, 0.58);

/// One slot of the fixed palette. Names are unique, so slot identity and name
/// identity are the same thing.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Display,
    EnumIter,
    EnumString,
    IntoStaticStr,
)]
#[strum(serialize_all = "lowercase")]
pub enum ColorOption {
    #[default]
    Red,
    Yellow,
    Green,
}

pub const PALETTE: [ColorOption; 3] = [ColorOption::Red, ColorOption::Yellow, ColorOption::Green];

impl ColorOption {
    /// The label matched against the target text.
    pub fn name(self) -> &'static str {
        self.into()
    }

    pub const fn display_color(self) -> Color {
        match self {
            Self::Red => Color::srgb(1.0, 0.23, 0.19),
            Self::Yellow => Color::srgb(1.0, 0.8, 0.0),
            Self::Green => Color::srgb(0.2, 0.78, 0.35),
        }
    }

    /// Picks a palette entry uniformly at random.
    pub fn random(rng: &mut fastrand::Rng) -> Self {
        rng.choice(PALETTE).unwrap_or_default()
    }
}
