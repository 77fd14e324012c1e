//! Particle bursts
//!
//! A burst is a bounded list of typed particles. Counts grow with the size of
//! whatever was destroyed but are hard-capped per type, and the quality scale
//! is applied after the cap, so per-frame cost never depends on the source.
//! A burst is active while it still holds at least one particle.

pub mod explosion;
pub mod ship_explosion;

pub use explosion::{Explosion, ParticleKind};
pub use ship_explosion::{ShipExplosion, ShipParticleKind};

use glam::DVec2;
use rand::Rng;

use super::entity::SimRng;
use crate::polar_to_cartesian;
use crate::renderer::Surface;

/// Particles smaller than this are dead
pub const VISIBILITY_FLOOR: f64 = 0.5;

/// Per-type shrink factor for particles that do not grow
pub const SHRINK: f64 = 0.97;

/// Number of particles of one type in a burst: proportional to the source
/// size, capped, then scaled by quality.
pub fn burst_count(source_size: f64, factor: f64, cap: usize, scale: f64) -> usize {
    let raw = ((source_size * factor).max(0.0) as usize).min(cap);
    ((raw as f64) * scale.clamp(0.0, 1.0)).round() as usize
}

/// Kinematic state shared by every particle type. Units are per tick.
#[derive(Debug, Clone)]
pub struct Motion {
    pub pos: DVec2,
    pub vel: DVec2,
    /// Degrees
    pub rotation: f64,
    /// Degrees per tick
    pub spin: f64,
    pub size: f64,
    /// Ticks left
    pub life: f64,
    pub max_life: f64,
    /// Added to vertical velocity each tick (+y is down)
    pub gravity: f64,
    pub drag: f64,
    /// Size multiplier per tick
    pub growth: f64,
}

impl Motion {
    /// Motion flung from `origin` at a random angle
    pub fn burst(
        origin: DVec2,
        speed: f64,
        size: f64,
        life: f64,
        rng: &mut SimRng,
    ) -> Self {
        let angle = rng.random::<f64>() * std::f64::consts::TAU;
        debug_assert!(size > 0.0, "particle size must be positive");
        Self {
            pos: origin,
            vel: polar_to_cartesian(speed, angle),
            rotation: rng.random::<f64>() * 360.0,
            spin: rng.random::<f64>() * 10.0 - 5.0,
            size,
            life,
            max_life: life,
            gravity: 0.0,
            drag: 1.0,
            growth: SHRINK,
        }
    }

    pub fn with_physics(mut self, gravity: f64, drag: f64, growth: f64) -> Self {
        self.gravity = gravity;
        self.drag = drag;
        self.growth = growth;
        self
    }

    pub fn step(&mut self) {
        self.vel.y += self.gravity;
        self.vel *= self.drag;
        self.pos += self.vel;
        self.rotation += self.spin;
        self.size *= self.growth;
        self.life -= 1.0;
    }

    pub fn is_dead(&self) -> bool {
        self.life <= 0.0 || self.size < VISIBILITY_FLOOR
    }

    /// Remaining life in [0, 1]
    pub fn life_fraction(&self) -> f64 {
        if self.max_life <= 0.0 {
            return 0.0;
        }
        (self.life / self.max_life).clamp(0.0, 1.0)
    }
}

/// A live particle burst of either variant
#[derive(Debug, Clone)]
pub enum Effect {
    Explosion(Explosion),
    Ship(ShipExplosion),
}

impl Effect {
    pub fn update(&mut self, rng: &mut SimRng) {
        match self {
            Effect::Explosion(e) => e.update(),
            Effect::Ship(e) => e.update(rng),
        }
    }

    pub fn render(&self, surface: &mut dyn Surface) {
        match self {
            Effect::Explosion(e) => e.render(surface),
            Effect::Ship(e) => e.render(surface),
        }
    }

    pub fn is_active(&self) -> bool {
        match self {
            Effect::Explosion(e) => e.is_active(),
            Effect::Ship(e) => e.is_active(),
        }
    }

    pub fn particle_count(&self) -> usize {
        match self {
            Effect::Explosion(e) => e.particle_count(),
            Effect::Ship(e) => e.particle_count(),
        }
    }
}

impl From<Explosion> for Effect {
    fn from(e: Explosion) -> Self {
        Effect::Explosion(e)
    }
}

impl From<ShipExplosion> for Effect {
    fn from(e: ShipExplosion) -> Self {
        Effect::Ship(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn test_burst_count_caps_before_scaling() {
        assert_eq!(burst_count(10.0, 1.0, 28, 1.0), 10);
        assert_eq!(burst_count(1000.0, 1.0, 28, 1.0), 28);
        assert_eq!(burst_count(1000.0, 1.0, 28, 0.5), 14);
        assert_eq!(burst_count(1000.0, 1.0, 28, 0.0), 0);
        assert_eq!(burst_count(-5.0, 1.0, 28, 1.0), 0);
    }

    #[test]
    fn test_motion_applies_gravity_and_drag() {
        let mut rng = SimRng::seed_from_u64(1);
        let mut m = Motion::burst(DVec2::ZERO, 0.0, 10.0, 5.0, &mut rng).with_physics(0.2, 0.5, 1.0);
        m.step();
        assert!((m.vel.y - 0.1).abs() < 1e-12);
        assert!((m.pos.y - 0.1).abs() < 1e-12);
        assert_eq!(m.life, 4.0);
    }

    #[test]
    fn test_motion_dies_by_life_or_size() {
        let mut rng = SimRng::seed_from_u64(1);
        let mut m = Motion::burst(DVec2::ZERO, 1.0, 10.0, 2.0, &mut rng).with_physics(0.0, 1.0, 1.0);
        m.step();
        assert!(!m.is_dead());
        m.step();
        assert!(m.is_dead());

        let mut tiny = Motion::burst(DVec2::ZERO, 1.0, 0.6, 100.0, &mut rng).with_physics(0.0, 1.0, 0.5);
        tiny.step();
        assert!(tiny.is_dead());
    }
}
