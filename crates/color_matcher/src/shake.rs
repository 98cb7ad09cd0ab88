use core::time::Duration;

use bevy::time::{Timer, TimerMode};

/// Displacement of each pulse, as a fraction of the amplitude. The first pulse
/// fires when the sequence starts, the rest one step apart.
const PULSES: [f32; 3] = [1.0, 1.0, 0.0];

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ShakePattern {
    /// Horizontal screen offset written by the non-zero pulses.
    pub amplitude: f32,
    /// Delay between consecutive pulses.
    pub step: Duration,
}

impl Default for ShakePattern {
    fn default() -> Self {
        Self {
            amplitude: 20.0,
            step: Duration::from_millis(50),
        }
    }
}

impl ShakePattern {
    /// Time from the first pulse to the last one.
    pub fn total_duration(&self) -> Duration {
        self.step * (PULSES.len() as u32 - 1)
    }
}

/// A running shake. Dropping it cancels the pulses that have not fired.
#[derive(Clone, Debug)]
pub struct ShakeSequence {
    timer: Timer,
    amplitude: f32,
    fired: usize,
}

impl ShakeSequence {
    /// Starts a sequence and returns it with the offset of the first pulse,
    /// which is due immediately.
    pub fn start(pattern: ShakePattern) -> (Self, f32) {
        let sequence = Self {
            timer: Timer::new(pattern.step, TimerMode::Repeating),
            amplitude: pattern.amplitude,
            fired: 1,
        };
        (sequence, PULSES[0] * pattern.amplitude)
    }

    /// Advances the sequence by `delta`. Returns the offset of the latest pulse that
    /// came due, or `None` if no pulse fired during this step.
    pub fn advance(&mut self, delta: Duration) -> Option<f32> {
        if self.is_finished() {
            return None;
        }

        self.timer.tick(delta);
        let due = self.timer.times_finished_this_tick() as usize;
        if due == 0 {
            return None;
        }

        self.fired = (self.fired + due).min(PULSES.len());
        PULSES
            .get(self.fired - 1)
            .map(|pulse| pulse * self.amplitude)
    }

    pub const fn is_finished(&self) -> bool {
        self.fired >= PULSES.len()
    }
}
