//! Recurring-interval gate driven by the game clock.

use bevy::prelude::*;
use serde::Deserialize;

/// Fires at most once per `interval` seconds of game time.
///
/// Not reentrant; all calls come from the single simulation step.
#[derive(Debug, Clone, Copy, PartialEq, Reflect, Deserialize)]
pub struct IntervalTrigger {
    /// Seconds between firings.
    pub interval: f32,
    /// Game time (seconds) of the last firing.
    #[serde(default)]
    pub last_fire: f32,
}

impl IntervalTrigger {
    #[must_use]
    pub const fn new(interval: f32) -> Self {
        Self {
            interval,
            last_fire: 0.0,
        }
    }

    /// Whether a call to [`Self::try_fire`] at `now` would fire.
    #[must_use]
    pub fn is_due(&self, now: f32) -> bool {
        now - self.last_fire >= self.interval
    }

    /// Fire if a full interval has elapsed since the last firing.
    ///
    /// Returns `true` and records `now` as the last fire time when due;
    /// otherwise leaves the trigger untouched.
    pub fn try_fire(&mut self, now: f32) -> bool {
        if !self.is_due(now) {
            return false;
        }
        self.last_fire = now;
        true
    }
}
