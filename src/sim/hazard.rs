//! Drifting hazards (asteroids) and the split rule

use glam::DVec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::entity::{Body, Bounds, Entity, Frame, SimRng};
use crate::consts::*;
use crate::polar_to_cartesian;
use crate::renderer::{Surface, colors, sprite_or_placeholder};

/// Large sprites first; fresh hazards only pick from these
const HAZARD_SPRITES: [&str; 20] = [
    "meteorBrown_big1.png",
    "meteorBrown_big2.png",
    "meteorBrown_big3.png",
    "meteorBrown_big4.png",
    "meteorBrown_med1.png",
    "meteorBrown_med3.png",
    "meteorBrown_small1.png",
    "meteorBrown_small2.png",
    "meteorBrown_tiny1.png",
    "meteorBrown_tiny2.png",
    "meteorGrey_big1.png",
    "meteorGrey_big2.png",
    "meteorGrey_big3.png",
    "meteorGrey_big4.png",
    "meteorGrey_med1.png",
    "meteorGrey_med2.png",
    "meteorGrey_small1.png",
    "meteorGrey_small2.png",
    "meteorGrey_tiny1.png",
    "meteorGrey_tiny2.png",
];
const FRESH_SPRITE_COUNT: usize = 4;

/// Discrete spawn sizes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HazardTier {
    Small,
    Medium,
    Large,
}

impl HazardTier {
    pub fn size(&self) -> f64 {
        match self {
            HazardTier::Small => SMALL_HAZARD_SIZE,
            HazardTier::Medium => MEDIUM_HAZARD_SIZE,
            HazardTier::Large => LARGE_HAZARD_SIZE,
        }
    }

    pub fn points(&self) -> u32 {
        match self {
            HazardTier::Small => SMALL_HAZARD_POINTS,
            HazardTier::Medium => MEDIUM_HAZARD_POINTS,
            HazardTier::Large => LARGE_HAZARD_POINTS,
        }
    }

    /// Uniform roll across thirds
    pub fn roll(rng: &mut SimRng) -> Self {
        let roll: f64 = rng.random();
        if roll < 1.0 / 3.0 {
            HazardTier::Small
        } else if roll < 2.0 / 3.0 {
            HazardTier::Medium
        } else {
            HazardTier::Large
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Hazard {
    pub pos: DVec2,
    /// Heading in radians
    pub direction: f64,
    /// Pixels per tick
    pub speed: f64,
    pub size: f64,
    /// Score awarded on destruction
    pub points: u32,
    pub is_split_result: bool,
    /// Sprite rotation in degrees (cosmetic)
    pub rotation: f64,
    /// Degrees per tick
    pub spin: f64,
    sprite: usize,
}

impl Hazard {
    pub fn new(
        pos: DVec2,
        speed: f64,
        size: f64,
        points: u32,
        is_split_result: bool,
        rng: &mut SimRng,
    ) -> Self {
        debug_assert!(size > 0.0, "hazard size must be positive");
        let sprite_pool = if is_split_result {
            HAZARD_SPRITES.len()
        } else {
            FRESH_SPRITE_COUNT
        };
        Self {
            pos,
            direction: rng.random::<f64>() * std::f64::consts::TAU,
            speed,
            size,
            points,
            is_split_result,
            rotation: rng.random::<f64>() * 360.0,
            spin: rng.random_range(-2.0..2.0),
            sprite: rng.random_range(0..sprite_pool),
        }
    }

    /// Fresh hazard at a random point with a random tier and speed
    pub fn spawn(bounds: &Bounds, rng: &mut SimRng) -> Self {
        let pos = bounds.random_point(rng);
        let speed = rng.random_range(HAZARD_MIN_SPEED..HAZARD_MAX_SPEED);
        let tier = HazardTier::roll(rng);
        Self::new(pos, speed, tier.size(), tier.points(), false, rng)
    }

    pub fn can_split(&self) -> bool {
        self.size > HAZARD_SPLIT_FLOOR
    }

    /// Children produced when this hazard is destroyed (two, or none below the
    /// split floor)
    pub fn split(&self, rng: &mut SimRng) -> Vec<Hazard> {
        if !self.can_split() {
            return Vec::new();
        }
        let size = self.size / HAZARD_SPLIT_SHRINK;
        let points = self.points / 2;
        let speed = self.speed * HAZARD_SPLIT_SPEEDUP;

        [HAZARD_SPLIT_ANGLE, -HAZARD_SPLIT_ANGLE]
            .into_iter()
            .map(|offset| {
                let mut child = Hazard::new(self.pos, speed, size, points, true, rng);
                child.direction = self.direction + offset;
                child
            })
            .collect()
    }

    pub fn sprite(&self) -> &'static str {
        HAZARD_SPRITES[self.sprite]
    }

    /// Wrap to the opposite edge once fully off screen
    fn wrap(&mut self, bounds: &Bounds) {
        if self.pos.x < -self.size {
            self.pos.x = bounds.width + self.size;
        } else if self.pos.x > bounds.width + self.size {
            self.pos.x = -self.size;
        }
        if self.pos.y < -self.size {
            self.pos.y = bounds.height + self.size;
        } else if self.pos.y > bounds.height + self.size {
            self.pos.y = -self.size;
        }
    }
}

impl Body for Hazard {
    fn position(&self) -> DVec2 {
        self.pos
    }

    fn size(&self) -> f64 {
        self.size
    }
}

impl Entity for Hazard {
    fn advance(&mut self, frame: &Frame, _rng: &mut SimRng) {
        self.pos += polar_to_cartesian(self.speed, self.direction);
        self.rotation += self.spin;
        self.wrap(&frame.bounds);
    }

    fn render(&self, surface: &mut dyn Surface) {
        sprite_or_placeholder(
            surface,
            self.sprite(),
            self.pos,
            self.size,
            self.rotation.to_radians(),
            colors::PLACEHOLDER_HAZARD,
        );
    }
}
