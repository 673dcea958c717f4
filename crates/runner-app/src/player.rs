//! Player model: forward motion, lane changes, power-up effects, and
//! proximity checks standing in for physics collisions.

use glam::Vec3;

use runner_core::constants::{
    MAGNET_PULL_SPEED, OBSTACLE_HIT_RADIUS, PICKUP_RADIUS, PLAYER_FORWARD_SPEED,
    PLAYER_TURN_SPEED,
};
use runner_core::enums::{EntityCategory, PowerUpKind};
use runner_core::events::RunEvent;
use runner_core::types::{planar_distance, EntityHandle};
use runner_effects::{
    Appearance, EffectTransition, InvisibilityEffect, InvisibilityParams, MagnetEffect,
};
use runner_sim::RunEngine;

/// How far ahead the autopilot looks for obstacles.
const LOOKAHEAD: f32 = 12.0;

/// What the player is touching this tick.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Contacts {
    pub coins: Vec<EntityHandle>,
    pub power_ups: Vec<EntityHandle>,
    pub hit_obstacle: bool,
}

#[derive(Debug, Clone)]
pub struct PlayerModel {
    position: Vec3,
    lanes: Vec<f32>,
    target_lane: usize,
    appearance: Appearance,
    invisibility: InvisibilityEffect,
    magnet: MagnetEffect,
}

impl PlayerModel {
    /// Player standing in the middle lane at `start`.
    pub fn new(start: Vec3, lanes: Vec<f32>) -> Self {
        let target_lane = lanes.len() / 2;
        let x = lanes.get(target_lane).copied().unwrap_or(0.0);
        Self {
            position: Vec3::new(start.x + x, start.y, start.z),
            lanes,
            target_lane,
            appearance: Appearance::new(PLAYER_FORWARD_SPEED),
            invisibility: InvisibilityEffect::new(InvisibilityParams::default()),
            magnet: MagnetEffect::default(),
        }
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn z(&self) -> f32 {
        self.position.z
    }

    pub fn appearance(&self) -> Appearance {
        self.appearance
    }

    pub fn invisibility(&self) -> &InvisibilityEffect {
        &self.invisibility
    }

    pub fn magnet(&self) -> &MagnetEffect {
        &self.magnet
    }

    pub fn target_lane(&self) -> usize {
        self.target_lane
    }

    /// Steer toward `lane`, clamped to the available lanes.
    pub fn set_target_lane(&mut self, lane: usize) {
        self.target_lane = lane.min(self.lanes.len().saturating_sub(1));
    }

    pub fn activate(&mut self, kind: PowerUpKind) -> EffectTransition {
        let transition = match kind {
            PowerUpKind::Invisibility => self.invisibility.start(&mut self.appearance),
            PowerUpKind::Magnet => self.magnet.start(),
        };
        tracing::debug!(?kind, ?transition, z = self.position.z, "power-up");
        transition
    }

    /// React to an engine event. Only power-up activations concern the player.
    pub fn apply_event(&mut self, event: &RunEvent) -> Option<EffectTransition> {
        match event {
            RunEvent::PowerUpActivated { kind } => Some(self.activate(*kind)),
            _ => None,
        }
    }

    /// Move forward and toward the target lane, and run the effect timers.
    pub fn advance(&mut self, dt: f64) -> Vec<EffectTransition> {
        let step = dt as f32;
        let target_x = self.lanes.get(self.target_lane).copied().unwrap_or(0.0);
        let dx = target_x - self.position.x;
        let max_dx = PLAYER_TURN_SPEED * step;
        self.position.x += dx.clamp(-max_dx, max_dx);
        self.position.z += self.appearance.forward_speed * step;

        let mut transitions = Vec::new();
        transitions.extend(self.invisibility.tick(dt, &mut self.appearance));
        transitions.extend(self.magnet.tick(dt));
        transitions
    }

    /// Pick the lane with the farthest clear run ahead, preferring the
    /// current one on ties.
    pub fn steer(&mut self, engine: &RunEngine) {
        if self.appearance.ignores_obstacles {
            return;
        }
        let obstacles = engine.positions(EntityCategory::Obstacle);
        let clearance = |lane_x: f32| {
            obstacles
                .iter()
                .map(|(_, p)| *p)
                .filter(|p| (p.x - lane_x).abs() < OBSTACLE_HIT_RADIUS)
                .map(|p| p.z - self.position.z)
                .filter(|d| *d > -OBSTACLE_HIT_RADIUS && *d < LOOKAHEAD)
                .fold(LOOKAHEAD, f32::min)
        };

        let current = self
            .lanes
            .get(self.target_lane)
            .map(|x| clearance(*x))
            .unwrap_or(0.0);
        if current >= LOOKAHEAD {
            return;
        }
        let mut best = (self.target_lane, current);
        for (lane, x) in self.lanes.iter().enumerate() {
            let clear = clearance(*x);
            if clear > best.1 {
                best = (lane, clear);
            }
        }
        self.target_lane = best.0;
    }

    /// Where each coin inside an active magnet's radius moves to after
    /// `dt` seconds of being drawn toward the player.
    pub fn magnet_pulls(&self, engine: &RunEngine, dt: f64) -> Vec<(EntityHandle, Vec3)> {
        if !self.magnet.is_active() {
            return Vec::new();
        }
        let max_step = MAGNET_PULL_SPEED * dt as f32;
        engine
            .positions(EntityCategory::Coin)
            .into_iter()
            .filter(|(_, p)| self.magnet.attracts(self.position, *p))
            .map(|(h, p)| (h, move_towards(p, self.position, max_step)))
            .collect()
    }

    /// Coins and power-ups within reach, and whether an obstacle is hit.
    pub fn contacts(&self, engine: &RunEngine) -> Contacts {
        let near = |p: Vec3, radius: f32| planar_distance(self.position, p) <= radius;

        let coins = engine
            .positions(EntityCategory::Coin)
            .into_iter()
            .filter(|(_, p)| near(*p, PICKUP_RADIUS))
            .map(|(h, _)| h)
            .collect();
        let power_ups = engine
            .positions(EntityCategory::PowerUp)
            .into_iter()
            .filter(|(_, p)| near(*p, PICKUP_RADIUS))
            .map(|(h, _)| h)
            .collect();
        let hit_obstacle = !self.appearance.ignores_obstacles
            && engine
                .positions(EntityCategory::Obstacle)
                .iter()
                .any(|(_, p)| near(*p, OBSTACLE_HIT_RADIUS));

        Contacts {
            coins,
            power_ups,
            hit_obstacle,
        }
    }
}

/// Step from `from` toward `to` by at most `max_step`, never overshooting.
fn move_towards(from: Vec3, to: Vec3, max_step: f32) -> Vec3 {
    let delta = to - from;
    let distance = delta.length();
    if distance <= max_step || distance <= f32::EPSILON {
        to
    } else {
        from + delta / distance * max_step
    }
}
