//! Timers for power-up effects that outlive the pickup.

use std::collections::BTreeMap;

use crate::items::PowerUpKind;

/// Power-up effects that stay active for a number of movement ticks.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, PartialOrd, Ord)]
pub enum TimedEffect {
    SpeedBoost,
    SlowDown,
    Invincibility,
    DoublePoints,
}

impl TimedEffect {
    pub fn label(&self) -> &'static str {
        match self {
            TimedEffect::SpeedBoost => "Speed Boost",
            TimedEffect::SlowDown => "Slow Down",
            TimedEffect::Invincibility => "Invincibility",
            TimedEffect::DoublePoints => "Double Points",
        }
    }
}

impl PowerUpKind {
    /// The lasting effect of a pickup, if it has one.
    pub fn timed_effect(&self) -> Option<TimedEffect> {
        match self {
            PowerUpKind::SpeedBoost => Some(TimedEffect::SpeedBoost),
            PowerUpKind::SlowDown => Some(TimedEffect::SlowDown),
            PowerUpKind::Invincibility => Some(TimedEffect::Invincibility),
            PowerUpKind::DoublePoints => Some(TimedEffect::DoublePoints),
            PowerUpKind::Grow | PowerUpKind::Shrink => None,
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct ActiveEffects {
    remaining: BTreeMap<TimedEffect, u32>,
}

impl ActiveEffects {
    /// Starts or restarts an effect.
    pub fn start(&mut self, effect: TimedEffect, ticks: u32) {
        self.remaining.insert(effect, ticks);
    }

    pub fn is_active(&self, effect: TimedEffect) -> bool {
        self.remaining.contains_key(&effect)
    }

    /// Counts every effect down by one tick and returns those that ran out.
    pub fn tick(&mut self) -> Vec<TimedEffect> {
        let mut expired = Vec::new();
        self.remaining.retain(|&effect, ticks| {
            *ticks = ticks.saturating_sub(1);
            if *ticks == 0 {
                expired.push(effect);
                false
            } else {
                true
            }
        });
        expired
    }

    pub fn iter(&self) -> impl Iterator<Item = (TimedEffect, u32)> + '_ {
        self.remaining.iter().map(|(&effect, &ticks)| (effect, ticks))
    }

    pub fn clear(&mut self) {
        self.remaining.clear();
    }
}
