//! Generic explosion: debris, sparks, smoke and a core flash

use glam::DVec2;
use rand::Rng;

use super::{Motion, SHRINK, burst_count};
use crate::renderer::{BlendMode, Rgba, Surface, colors, with_alpha};
use crate::sim::entity::SimRng;

pub const DEBRIS_CAP: usize = 28;
pub const SPARK_CAP: usize = 36;
pub const SMOKE_CAP: usize = 24;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParticleKind {
    Debris,
    Spark,
    Smoke,
    Core,
}

#[derive(Debug, Clone)]
pub struct Particle {
    pub kind: ParticleKind,
    pub motion: Motion,
    pub color: Rgba,
}

impl Particle {
    fn new(kind: ParticleKind, origin: DVec2, base_size: f64, rng: &mut SimRng) -> Self {
        let r: f64 = rng.random();
        let (motion, color) = match kind {
            ParticleKind::Debris => {
                let m = Motion::burst(
                    origin,
                    2.0 + r * 5.0,
                    3.0 + rng.random::<f64>() * base_size / 3.0,
                    12.0 + rng.random::<f64>() * 8.0,
                    rng,
                )
                .with_physics(0.2, 0.98, SHRINK);
                let color = if rng.random_bool(0.5) {
                    colors::BROWN
                } else {
                    colors::GRAY
                };
                (m, color)
            }
            ParticleKind::Spark => {
                let m = Motion::burst(
                    origin,
                    3.0 + r * 7.0,
                    1.0 + rng.random::<f64>() * base_size / 4.0,
                    6.0 + rng.random::<f64>() * 6.0,
                    rng,
                )
                .with_physics(0.1, 0.95, SHRINK);
                let color = if rng.random_bool(0.5) {
                    colors::YELLOW
                } else {
                    colors::ORANGE
                };
                (m, color)
            }
            ParticleKind::Smoke => {
                // Smoke rises and swells
                let m = Motion::burst(
                    origin,
                    0.5 + r * 2.0,
                    5.0 + rng.random::<f64>() * base_size / 2.0,
                    18.0 + rng.random::<f64>() * 10.0,
                    rng,
                )
                .with_physics(-0.05, 0.99, 1.02);
                (m, colors::DARK_GRAY)
            }
            ParticleKind::Core => {
                let m = Motion::burst(
                    origin,
                    0.2 + r,
                    (base_size / 2.0).max(1.0),
                    4.0 + rng.random::<f64>() * 4.0,
                    rng,
                )
                .with_physics(0.0, 0.9, SHRINK);
                (m, colors::WHITE)
            }
        };
        Self {
            kind,
            motion,
            color,
        }
    }

    fn render(&self, surface: &mut dyn Surface) {
        let m = &self.motion;
        if !surface.is_visible(m.pos, m.size) {
            return;
        }
        let fade = m.life_fraction();
        match self.kind {
            ParticleKind::Smoke => surface.fill_circle(
                m.pos,
                m.size / 2.0,
                with_alpha(self.color, fade * 0.5),
                BlendMode::Normal,
            ),
            ParticleKind::Debris => surface.fill_rect(
                m.pos,
                DVec2::splat(m.size / 2.0),
                m.rotation.to_radians(),
                with_alpha(self.color, fade),
            ),
            ParticleKind::Spark => surface.fill_circle(
                m.pos,
                m.size / 2.0,
                with_alpha(self.color, fade),
                BlendMode::Additive,
            ),
            ParticleKind::Core => {
                let glow = with_alpha(colors::YELLOW, fade * 0.6);
                surface.fill_circle(m.pos, m.size / 2.0, with_alpha(self.color, fade), BlendMode::Additive);
                surface.stroke_circle(m.pos, m.size / 2.0 + 2.0, 2.0, glow);
            }
        }
    }
}

/// Burst spawned when a hazard is destroyed
#[derive(Debug, Clone)]
pub struct Explosion {
    particles: Vec<Particle>,
}

impl Explosion {
    /// `scale` is the quality factor in [0, 1]; 0 leaves only the core flash
    pub fn new(origin: DVec2, source_size: f64, scale: f64, rng: &mut SimRng) -> Self {
        let mut particles = Vec::new();
        particles.push(Particle::new(ParticleKind::Core, origin, source_size, rng));

        let batches = [
            (ParticleKind::Debris, 1.0, DEBRIS_CAP),
            (ParticleKind::Spark, 1.2, SPARK_CAP),
            (ParticleKind::Smoke, 0.8, SMOKE_CAP),
        ];
        for (kind, factor, cap) in batches {
            for _ in 0..burst_count(source_size, factor, cap, scale) {
                particles.push(Particle::new(kind, origin, source_size, rng));
            }
        }
        Self { particles }
    }

    pub fn update(&mut self) {
        for p in &mut self.particles {
            p.motion.step();
        }
        self.particles.retain(|p| !p.motion.is_dead());
    }

    /// Smoke underneath, solid debris over it, bright sparks and core on top
    pub fn render(&self, surface: &mut dyn Surface) {
        let layers: [&[ParticleKind]; 3] = [
            &[ParticleKind::Smoke],
            &[ParticleKind::Debris],
            &[ParticleKind::Spark, ParticleKind::Core],
        ];
        for layer in layers {
            for p in self.particles.iter().filter(|p| layer.contains(&p.kind)) {
                p.render(surface);
            }
        }
    }

    pub fn is_active(&self) -> bool {
        !self.particles.is_empty()
    }

    pub fn particle_count(&self) -> usize {
        self.particles.len()
    }

    pub fn count(&self, kind: ParticleKind) -> usize {
        self.particles.iter().filter(|p| p.kind == kind).count()
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }
}
