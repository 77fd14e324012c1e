//! Hostile ships: wander or pursue the player and fire on a cooldown

use glam::DVec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::entity::{Body, Bounds, Entity, Frame, Projectile, ProjectileStyle, SimRng};
use crate::consts::*;
use crate::renderer::{Surface, colors, sprite_or_placeholder};
use crate::{angle_to, polar_to_cartesian};

/// Hull paint, picked at spawn; decides the sprite and explosion palette
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HullColor {
    Black,
    Blue,
    Green,
    Red,
}

impl HullColor {
    pub const ALL: [HullColor; 4] = [
        HullColor::Black,
        HullColor::Blue,
        HullColor::Green,
        HullColor::Red,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            HullColor::Black => "Black",
            HullColor::Blue => "Blue",
            HullColor::Green => "Green",
            HullColor::Red => "Red",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Hostile {
    pub pos: DVec2,
    /// Pixels per tick
    pub speed: f64,
    pub size: f64,
    /// Current heading in radians
    pub heading: f64,
    pub health: i32,
    pub hull: HullColor,
    /// Sprite variant 1..=5
    pub variant: u8,
    /// Ticks until the next heading decision
    turn_timer: u32,
    /// Clock time of the last shot
    last_shot: f64,
}

impl Hostile {
    pub fn new(pos: DVec2, speed: f64, health: i32, clock: f64, rng: &mut SimRng) -> Self {
        Self {
            pos,
            speed,
            size: HOSTILE_SIZE,
            heading: std::f64::consts::FRAC_PI_2,
            health,
            hull: HullColor::ALL[rng.random_range(0..HullColor::ALL.len())],
            variant: rng.random_range(1..=5),
            turn_timer: 0,
            last_shot: clock,
        }
    }

    /// Hostile at a random point with a random speed
    pub fn spawn(bounds: &Bounds, health: i32, clock: f64, rng: &mut SimRng) -> Self {
        let pos = bounds.random_point(rng);
        let speed = rng.random_range(HOSTILE_MIN_SPEED..HOSTILE_MAX_SPEED);
        Self::new(pos, speed, health, clock, rng)
    }

    pub fn take_damage(&mut self, amount: i32) {
        self.health -= amount;
    }

    pub fn is_destroyed(&self) -> bool {
        self.health <= 0
    }

    /// True (and restarts the cooldown) when the weapon is ready
    pub fn try_fire(&mut self, clock: f64, cooldown: f64) -> bool {
        if clock - self.last_shot >= cooldown {
            self.last_shot = clock;
            true
        } else {
            false
        }
    }

    /// Shot aimed straight at the target
    pub fn shoot_at(&self, target: DVec2, damage: i32) -> Projectile {
        Projectile::new(self.pos, angle_to(self.pos, target), ProjectileStyle::Hostile, damage)
    }

    pub fn sprite(&self) -> String {
        format!("enemy{}{}.png", self.hull.as_str(), self.variant)
    }
}

impl Body for Hostile {
    fn position(&self) -> DVec2 {
        self.pos
    }

    fn size(&self) -> f64 {
        self.size
    }
}

impl Entity for Hostile {
    fn advance(&mut self, frame: &Frame, rng: &mut SimRng) {
        if self.turn_timer == 0 {
            // Half the time wander, half the time close in on the target
            self.heading = if rng.random_bool(0.5) {
                rng.random::<f64>() * std::f64::consts::TAU
            } else {
                angle_to(self.pos, frame.target)
            };
            self.turn_timer = rng.random_range(50..150);
        } else {
            self.turn_timer -= 1;
        }

        self.pos += polar_to_cartesian(self.speed, self.heading);

        let b = &frame.bounds;
        self.pos.x = self.pos.x.rem_euclid(b.width);
        self.pos.y = self.pos.y.rem_euclid(b.height);
    }

    fn render(&self, surface: &mut dyn Surface) {
        sprite_or_placeholder(
            surface,
            &self.sprite(),
            self.pos,
            self.size,
            self.heading,
            colors::PLACEHOLDER_SHIP,
        );
    }
}
