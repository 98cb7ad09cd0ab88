use core::time::Duration;

use bevy::prelude::*;
use thiserror::Error;

use crate::shake::ShakePattern;

const SQUARE_SIZE: f32 = 80.0;
const TARGET_SIZE: f32 = 150.0;
const SQUARE_SPACING: f32 = 110.0;
const TARGET_Y: f32 = 110.0;
const SQUARE_ROW_Y: f32 = -130.0;
const EASE_DURATION: Duration = Duration::from_millis(250);

/// Tunables of the color matcher. Insert a custom value before adding the plugins to override.
#[derive(Resource, Clone, Debug, PartialEq)]
pub struct MatcherSettings {
    /// Wrong-answer shake
    pub shake: ShakePattern,
    /// Side of each draggable square
    pub square_size: f32,
    /// Side of the target square
    pub target_size: f32,
    /// Horizontal distance between the centers of neighboring squares
    pub square_spacing: f32,
    /// Vertical position of the target center
    pub target_y: f32,
    /// Vertical position of the draggable row
    pub square_row_y: f32,
    /// Duration of the eased snap-back and target color fade
    pub ease_duration: Duration,
    /// Seeds the target picker; `None` draws a fresh seed
    pub seed: Option<u64>,
}

impl Default for MatcherSettings {
    fn default() -> Self {
        Self {
            shake: ShakePattern::default(),
            square_size: SQUARE_SIZE,
            target_size: TARGET_SIZE,
            square_spacing: SQUARE_SPACING,
            target_y: TARGET_Y,
            square_row_y: SQUARE_ROW_Y,
            ease_duration: EASE_DURATION,
            seed: None,
        }
    }
}

#[derive(Error, Debug, PartialEq)]
pub enum SettingsError {
    #[error("{name} must be a positive, finite length, got {value}")]
    InvalidLength { name: &'static str, value: f32 },

    #[error("Shake amplitude must be finite, got {0}")]
    InvalidAmplitude(f32),

    #[error("{0} must be longer than zero")]
    ZeroDuration(&'static str),

    #[error("Squares of size {size} overlap when spaced {spacing} apart")]
    OverlappingSquares { size: f32, spacing: f32 },
}

impl MatcherSettings {
    pub fn validate(&self) -> Result<(), SettingsError> {
        for (name, value) in [
            ("square_size", self.square_size),
            ("target_size", self.target_size),
            ("square_spacing", self.square_spacing),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(SettingsError::InvalidLength { name, value });
            }
        }

        if !self.shake.amplitude.is_finite() {
            return Err(SettingsError::InvalidAmplitude(self.shake.amplitude));
        }
        if self.shake.step.is_zero() {
            return Err(SettingsError::ZeroDuration("shake.step"));
        }
        if self.ease_duration.is_zero() {
            return Err(SettingsError::ZeroDuration("ease_duration"));
        }

        if self.square_spacing < self.square_size {
            return Err(SettingsError::OverlappingSquares {
                size: self.square_size,
                spacing: self.square_spacing,
            });
        }

        Ok(())
    }

    /// The settings themselves when valid, otherwise the defaults (with the error logged).
    pub fn validated(self) -> Self {
        match self.validate() {
            Ok(()) => self,
            Err(error) => {
                error!("Invalid matcher settings, falling back to defaults: {error}");
                Self {
                    seed: self.seed,
                    ..Self::default()
                }
            }
        }
    }

    /// A generator for the target picker, seeded when `seed` is set.
    pub fn rng(&self) -> fastrand::Rng {
        self.seed
            .map_or_else(fastrand::Rng::new, fastrand::Rng::with_seed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert_eq!(MatcherSettings::default().validate(), Ok(()), "defaults");
    }

    #[test]
    fn rejects_non_positive_lengths() {
        let settings = MatcherSettings {
            target_size: 0.0,
            ..default()
        };
        assert_eq!(
            settings.validate(),
            Err(SettingsError::InvalidLength {
                name: "target_size",
                value: 0.0
            }),
            "zero target"
        );
    }

    #[test]
    fn rejects_zero_shake_step() {
        let settings = MatcherSettings {
            shake: ShakePattern {
                amplitude: 20.0,
                step: Duration::ZERO,
            },
            ..default()
        };
        assert_eq!(
            settings.validate(),
            Err(SettingsError::ZeroDuration("shake.step")),
            "zero step"
        );
    }

    #[test]
    fn rejects_overlapping_row() {
        let settings = MatcherSettings {
            square_spacing: 40.0,
            ..default()
        };
        assert!(
            matches!(
                settings.validate(),
                Err(SettingsError::OverlappingSquares { .. })
            ),
            "squares would overlap"
        );
    }

    #[test]
    fn invalid_settings_fall_back_but_keep_the_seed() {
        let settings = MatcherSettings {
            square_size: f32::NAN,
            seed: Some(9),
            ..default()
        }
        .validated();
        assert_eq!(
            settings,
            MatcherSettings {
                seed: Some(9),
                ..default()
            },
            "fallback"
        );
    }

    #[test]
    fn seeded_generators_repeat() {
        let settings = MatcherSettings {
            seed: Some(42),
            ..default()
        };
        assert_eq!(settings.rng().u64(..), settings.rng().u64(..), "same seed, same draw");
    }
}
