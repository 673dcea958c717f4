//! Invisibility: speed boost, obstacle immunity, trail and a flickering body.

use serde::{Deserialize, Serialize};

use runner_core::constants::{
    FLICKER_INTERVAL, INVISIBILITY_DURATION, INVISIBILITY_SPEED_MULTIPLIER,
};

use crate::EffectTransition;

/// The player state an effect may touch.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Appearance {
    pub forward_speed: f32,
    pub visible: bool,
    pub trail: bool,
    pub ignores_obstacles: bool,
}

impl Appearance {
    pub fn new(forward_speed: f32) -> Self {
        Self {
            forward_speed,
            visible: true,
            trail: false,
            ignores_obstacles: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InvisibilityParams {
    pub duration: f64,
    pub flicker_interval: f64,
    pub speed_multiplier: f32,
}

impl Default for InvisibilityParams {
    fn default() -> Self {
        Self {
            duration: INVISIBILITY_DURATION,
            flicker_interval: FLICKER_INTERVAL,
            speed_multiplier: INVISIBILITY_SPEED_MULTIPLIER,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum State {
    Idle,
    Running {
        elapsed: f64,
        /// Flicker steps applied so far; step 0 (hidden) happens on start.
        flips: u64,
        saved: Appearance,
    },
}

#[derive(Debug, Clone)]
pub struct InvisibilityEffect {
    params: InvisibilityParams,
    state: State,
}

impl InvisibilityEffect {
    pub fn new(params: InvisibilityParams) -> Self {
        Self {
            params,
            state: State::Idle,
        }
    }

    pub fn params(&self) -> InvisibilityParams {
        self.params
    }

    pub fn is_running(&self) -> bool {
        matches!(self.state, State::Running { .. })
    }

    /// Seconds left, or `None` when idle.
    pub fn remaining(&self) -> Option<f64> {
        match self.state {
            State::Running { elapsed, .. } => Some((self.params.duration - elapsed).max(0.0)),
            State::Idle => None,
        }
    }

    /// Start the effect. A running instance is cancelled first, so the
    /// snapshot taken here is always the un-boosted appearance.
    pub fn start(&mut self, appearance: &mut Appearance) -> EffectTransition {
        let restarted = self.cancel(appearance).is_some();

        let saved = *appearance;
        appearance.forward_speed = saved.forward_speed * self.params.speed_multiplier;
        appearance.trail = true;
        appearance.ignores_obstacles = true;
        appearance.visible = false;

        self.state = State::Running {
            elapsed: 0.0,
            flips: 0,
            saved,
        };

        if restarted {
            EffectTransition::Restarted
        } else {
            EffectTransition::Started
        }
    }

    /// Stop early and restore the pre-effect appearance. `None` when idle.
    pub fn cancel(&mut self, appearance: &mut Appearance) -> Option<EffectTransition> {
        match std::mem::replace(&mut self.state, State::Idle) {
            State::Running { saved, .. } => {
                *appearance = saved;
                Some(EffectTransition::Cancelled)
            }
            State::Idle => None,
        }
    }

    /// Advance by `dt` seconds.
    pub fn tick(&mut self, dt: f64, appearance: &mut Appearance) -> Option<EffectTransition> {
        let State::Running {
            elapsed,
            flips,
            saved,
        } = &mut self.state
        else {
            return None;
        };

        *elapsed += dt;
        if *elapsed >= self.params.duration {
            *appearance = *saved;
            self.state = State::Idle;
            return Some(EffectTransition::Completed);
        }

        let due = if self.params.flicker_interval > 0.0 {
            (*elapsed / self.params.flicker_interval).floor() as u64
        } else {
            0
        };
        if due > *flips {
            *flips = due;
            // Even steps hide the body, odd steps show it.
            appearance.visible = due % 2 == 1;
            return Some(EffectTransition::Flicker {
                visible: appearance.visible,
            });
        }
        None
    }
}

impl Default for InvisibilityEffect {
    fn default() -> Self {
        Self::new(InvisibilityParams::default())
    }
}
