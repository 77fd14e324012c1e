//! Shared entity capabilities and the projectile entity
//!
//! Every movable object implements [`Body`] (where it is, how big it is) and
//! [`Entity`] (how it moves and draws). There is no class hierarchy; the
//! manager holds each variant in its own collection.

use glam::DVec2;
use rand::Rng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::polar_to_cartesian;
use crate::renderer::{Surface, colors, sprite_or_placeholder};

/// Seedable random source injected into everything that rolls dice
pub type SimRng = Pcg32;

/// Playfield rectangle, origin top-left, +y down
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub width: f64,
    pub height: f64,
}

impl Default for Bounds {
    fn default() -> Self {
        Self {
            width: ARENA_WIDTH,
            height: ARENA_HEIGHT,
        }
    }
}

impl Bounds {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    pub fn contains(&self, pos: DVec2) -> bool {
        pos.x >= 0.0 && pos.x <= self.width && pos.y >= 0.0 && pos.y <= self.height
    }

    pub fn center(&self) -> DVec2 {
        DVec2::new(self.width / 2.0, self.height / 2.0)
    }

    /// Uniformly random point inside the playfield
    pub fn random_point(&self, rng: &mut SimRng) -> DVec2 {
        DVec2::new(
            rng.random::<f64>() * self.width,
            rng.random::<f64>() * self.height,
        )
    }
}

/// Per-tick context handed to every `advance`
#[derive(Debug, Clone, Copy)]
pub struct Frame {
    pub bounds: Bounds,
    /// Point hostiles pursue (the player's position)
    pub target: DVec2,
    /// Simulated seconds since the manager was created
    pub clock: f64,
    /// Seconds covered by this tick
    pub dt: f64,
}

/// Position and size, enough for the circular proximity test
pub trait Body {
    fn position(&self) -> DVec2;

    /// Diameter used as the collision proxy
    fn size(&self) -> f64;

    fn radius(&self) -> f64 {
        self.size() / 2.0
    }
}

/// A simulated, drawable object
pub trait Entity: Body {
    fn advance(&mut self, frame: &Frame, rng: &mut SimRng);
    fn render(&self, surface: &mut dyn Surface);
}

/// Projectile payload variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProjectileStyle {
    /// Player default laser
    Standard,
    /// Player alternate fire
    Shuriken,
    /// Player heavy fire
    Pulse,
    /// Hostile ship laser
    Hostile,
    /// Boss orb
    Boss,
    /// Support drone volley
    Drone,
}

impl ProjectileStyle {
    pub fn sprite(&self) -> &'static str {
        match self {
            ProjectileStyle::Standard => "laserBlue07.png",
            ProjectileStyle::Shuriken => "laserBlue11.png",
            ProjectileStyle::Pulse => "laserBlue08.png",
            ProjectileStyle::Hostile => "laserRed01.png",
            ProjectileStyle::Boss => "laserGreen14.png",
            ProjectileStyle::Drone => "laserGreen07.png",
        }
    }

    /// Damage carried by player shots of this style
    pub fn player_damage(&self) -> i32 {
        match self {
            ProjectileStyle::Shuriken => 12,
            ProjectileStyle::Pulse => 15,
            _ => 10,
        }
    }
}

/// A straight-flying shot. Lives until it leaves the playfield or hits something.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Projectile {
    pub pos: DVec2,
    /// Heading in radians
    pub direction: f64,
    /// Pixels per tick
    pub speed: f64,
    pub damage: i32,
    pub size: f64,
    pub style: ProjectileStyle,
}

impl Projectile {
    pub fn new(pos: DVec2, direction: f64, style: ProjectileStyle, damage: i32) -> Self {
        let (speed, size) = match style {
            ProjectileStyle::Boss => (BOSS_PROJECTILE_SPEED, BOSS_PROJECTILE_SIZE),
            _ => (PROJECTILE_SPEED, PROJECTILE_SIZE),
        };
        Self {
            pos,
            direction,
            speed,
            damage,
            size,
            style,
        }
    }

    pub fn with_speed(mut self, speed: f64) -> Self {
        self.speed = speed;
        self
    }

    pub fn velocity(&self) -> DVec2 {
        polar_to_cartesian(self.speed, self.direction)
    }

    pub fn is_off_screen(&self, bounds: &Bounds) -> bool {
        !bounds.contains(self.pos)
    }
}

impl Body for Projectile {
    fn position(&self) -> DVec2 {
        self.pos
    }

    fn size(&self) -> f64 {
        self.size
    }
}

impl Entity for Projectile {
    fn advance(&mut self, _frame: &Frame, _rng: &mut SimRng) {
        self.pos += self.velocity();
    }

    fn render(&self, surface: &mut dyn Surface) {
        // Laser sprites point up; rotate so they face along the heading
        sprite_or_placeholder(
            surface,
            self.style.sprite(),
            self.pos,
            self.size * 2.0,
            self.direction + std::f64::consts::FRAC_PI_2,
            colors::PLACEHOLDER_PROJECTILE,
        );
    }
}
