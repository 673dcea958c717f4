//! Magnet: widens the coin pickup radius for a while.

use glam::Vec3;

use runner_core::constants::{MAGNET_DURATION, MAGNET_RADIUS};
use runner_core::types::planar_distance;

use crate::EffectTransition;

#[derive(Debug, Clone)]
pub struct MagnetEffect {
    duration: f64,
    radius: f32,
    remaining: Option<f64>,
}

impl MagnetEffect {
    pub fn new(duration: f64, radius: f32) -> Self {
        Self {
            duration,
            radius,
            remaining: None,
        }
    }

    pub fn is_active(&self) -> bool {
        self.remaining.is_some()
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    pub fn remaining(&self) -> Option<f64> {
        self.remaining
    }

    /// Activate, or refill the timer if already active.
    pub fn start(&mut self) -> EffectTransition {
        let restarted = self.remaining.replace(self.duration).is_some();
        if restarted {
            EffectTransition::Restarted
        } else {
            EffectTransition::Started
        }
    }

    pub fn cancel(&mut self) -> Option<EffectTransition> {
        self.remaining.take().map(|_| EffectTransition::Cancelled)
    }

    pub fn tick(&mut self, dt: f64) -> Option<EffectTransition> {
        let remaining = self.remaining.as_mut()?;
        *remaining -= dt;
        if *remaining <= 0.0 {
            self.remaining = None;
            return Some(EffectTransition::Completed);
        }
        None
    }

    /// Whether a coin at `coin` is pulled in by a player at `player`.
    pub fn attracts(&self, player: Vec3, coin: Vec3) -> bool {
        self.is_active() && planar_distance(player, coin) <= self.radius
    }
}

impl Default for MagnetEffect {
    fn default() -> Self {
        Self::new(MAGNET_DURATION, MAGNET_RADIUS)
    }
}
