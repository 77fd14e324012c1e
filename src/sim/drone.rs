//! Support drone: a short-lived companion circling the player
//!
//! The drone follows the frame target (the player's position) on a fixed
//! radius and, while the player holds fire, throws a ring of shots on its own
//! cooldown. It never collides with anything itself.

use std::f64::consts::{FRAC_PI_4, TAU};

use glam::DVec2;
use serde::{Deserialize, Serialize};

use super::entity::{Body, Entity, Frame, Projectile, ProjectileStyle, SimRng};
use crate::consts::*;
use crate::polar_to_cartesian;
use crate::renderer::{Surface, colors, sprite_or_placeholder};
use crate::tuning::Tuning;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Drone {
    pub pos: DVec2,
    /// Orbit angle around the player in radians
    pub angle: f64,
    pub size: f64,
    /// Seconds until the drone leaves
    remaining: f64,
    fire_cooldown: f64,
    last_volley: f64,
    damage: i32,
}

impl Drone {
    pub fn new(anchor: DVec2, tuning: &Tuning) -> Self {
        Self {
            pos: anchor + polar_to_cartesian(DRONE_ORBIT_RADIUS, 0.0),
            angle: 0.0,
            size: DRONE_SIZE,
            remaining: tuning.drone_duration,
            fire_cooldown: tuning.drone_fire_cooldown,
            last_volley: f64::NEG_INFINITY,
            damage: tuning.drone_damage,
        }
    }

    pub fn remaining(&self) -> f64 {
        self.remaining.max(0.0)
    }

    pub fn is_expired(&self) -> bool {
        self.remaining <= 0.0
    }

    /// Ring of shots if the player is firing and the cooldown has elapsed.
    /// The ring rotates with the clock so consecutive volleys interleave.
    pub fn try_volley(&mut self, clock: f64, firing: bool) -> Vec<Projectile> {
        if !firing || clock - self.last_volley < self.fire_cooldown {
            return Vec::new();
        }
        self.last_volley = clock;
        (0..DRONE_VOLLEY_SIZE)
            .map(|i| {
                let heading = (clock + i as f64 * FRAC_PI_4) % TAU;
                let muzzle = self.pos + polar_to_cartesian(DRONE_MUZZLE_OFFSET, heading);
                Projectile::new(muzzle, heading, ProjectileStyle::Drone, self.damage)
            })
            .collect()
    }

    fn sprite(&self) -> &'static str {
        "playerLife1_orange.png"
    }
}

impl Body for Drone {
    fn position(&self) -> DVec2 {
        self.pos
    }

    fn size(&self) -> f64 {
        self.size
    }
}

impl Entity for Drone {
    fn advance(&mut self, frame: &Frame, _rng: &mut SimRng) {
        self.remaining -= frame.dt;
        self.angle = (self.angle + DRONE_ORBIT_STEP) % TAU;
        self.pos = frame.target + polar_to_cartesian(DRONE_ORBIT_RADIUS, self.angle);
    }

    fn render(&self, surface: &mut dyn Surface) {
        sprite_or_placeholder(
            surface,
            self.sprite(),
            self.pos,
            self.size,
            self.angle,
            colors::PLACEHOLDER_DRONE,
        );
    }
}
