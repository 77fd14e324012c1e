//! Ship-destruction burst
//!
//! Hull fragments tinted by the ship's paint, flickering energy sparks, a
//! swelling plasma cloud, short electric arcs and one core burst.

use glam::DVec2;
use rand::Rng;

use super::{Motion, SHRINK, burst_count};
use crate::renderer::{BlendMode, Rgba, Surface, colors, with_alpha};
use crate::sim::entity::SimRng;
use crate::sim::hostile::HullColor;

pub const SHIP_DEBRIS_CAP: usize = 28;
pub const ENERGY_SPARK_CAP: usize = 36;
pub const PLASMA_CLOUD_CAP: usize = 24;
pub const ELECTRIC_ARC_CAP: usize = 12;

const DRAG: f64 = 0.98;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShipParticleKind {
    ShipDebris,
    EnergySpark,
    PlasmaCloud,
    ElectricArc,
    CoreBurst,
}

/// Colors used by one burst
#[derive(Debug, Clone, Copy)]
struct Scheme {
    debris: [Rgba; 2],
    energy: [Rgba; 2],
}

impl Scheme {
    fn for_hull(hull: HullColor) -> Self {
        let debris = match hull {
            HullColor::Black => [colors::GRAY, colors::LIGHT_GRAY],
            HullColor::Blue => [colors::BLUE, colors::DARK_BLUE],
            HullColor::Green => [colors::GREEN, colors::DARK_GREEN],
            HullColor::Red => [colors::RED, colors::DARK_RED],
        };
        let energy = match hull {
            HullColor::Blue => [colors::CYAN, colors::WHITE],
            HullColor::Red => [colors::MAGENTA, colors::WHITE],
            HullColor::Black | HullColor::Green => [colors::YELLOW, colors::WHITE],
        };
        Self { debris, energy }
    }

    fn plasma(&self) -> [Rgba; 2] {
        [colors::brighter(self.debris[0]), self.debris[1]]
    }
}

fn pick(rng: &mut SimRng, pair: [Rgba; 2]) -> Rgba {
    pair[usize::from(rng.random_bool(0.5))]
}

#[derive(Debug, Clone)]
pub struct ShipParticle {
    pub kind: ShipParticleKind,
    pub motion: Motion,
    pub color: Rgba,
    /// Opacity oscillation rate (sparks and arcs)
    flicker: f64,
    /// Arc polyline, relative to the particle position
    pub arc: Vec<DVec2>,
}

impl ShipParticle {
    fn new(
        kind: ShipParticleKind,
        origin: DVec2,
        base_size: f64,
        scheme: &Scheme,
        rng: &mut SimRng,
    ) -> Self {
        let r: f64 = rng.random();
        let (speed, size, life, growth) = match kind {
            ShipParticleKind::ShipDebris => (
                2.0 + r * 6.0,
                4.0 + rng.random::<f64>() * base_size / 2.5,
                12.0 + rng.random::<f64>() * 8.0,
                SHRINK,
            ),
            ShipParticleKind::EnergySpark => (
                4.0 + r * 8.0,
                2.0 + rng.random::<f64>() * base_size / 3.0,
                6.0 + rng.random::<f64>() * 6.0,
                SHRINK,
            ),
            ShipParticleKind::PlasmaCloud => (
                1.0 + r * 3.0,
                6.0 + rng.random::<f64>() * base_size / 2.0,
                18.0 + rng.random::<f64>() * 10.0,
                1.03,
            ),
            ShipParticleKind::CoreBurst => (
                0.5 + r * 2.0,
                (base_size / 1.5).max(1.0),
                6.0 + rng.random::<f64>() * 6.0,
                1.0,
            ),
            ShipParticleKind::ElectricArc => (
                0.2 + r,
                3.0 + rng.random::<f64>() * base_size / 4.0,
                6.0 + rng.random::<f64>() * 4.0,
                SHRINK,
            ),
        };
        let motion =
            Motion::burst(origin, speed, size, life, rng).with_physics(0.0, DRAG, growth);

        let color = match kind {
            ShipParticleKind::ShipDebris => pick(rng, scheme.debris),
            ShipParticleKind::EnergySpark | ShipParticleKind::ElectricArc => {
                pick(rng, scheme.energy)
            }
            ShipParticleKind::PlasmaCloud => pick(rng, scheme.plasma()),
            ShipParticleKind::CoreBurst => pick(rng, [colors::WHITE, colors::YELLOW]),
        };

        let flicker = match kind {
            ShipParticleKind::EnergySpark | ShipParticleKind::ElectricArc => {
                0.7 + rng.random::<f64>() * 0.3
            }
            _ => 0.0,
        };

        let arc = if kind == ShipParticleKind::ElectricArc {
            let points = rng.random_range(3..=5);
            let step = size / (points - 1) as f64;
            (0..points)
                .map(|i| {
                    DVec2::new(
                        i as f64 * step - size / 2.0,
                        rng.random::<f64>() * 2.0 - 1.0,
                    )
                })
                .collect()
        } else {
            Vec::new()
        };

        Self {
            kind,
            motion,
            color,
            flicker,
            arc,
        }
    }

    fn update(&mut self, rng: &mut SimRng) {
        self.motion.step();
        for point in &mut self.arc {
            point.y += rng.random::<f64>() * 2.0 - 1.0;
        }
    }

    fn opacity(&self) -> f64 {
        let fade = self.motion.life_fraction();
        if self.flicker > 0.0 {
            fade * (0.6 + 0.4 * (self.motion.life * self.flicker).sin().abs())
        } else {
            fade
        }
    }

    fn render(&self, surface: &mut dyn Surface) {
        let m = &self.motion;
        if !surface.is_visible(m.pos, m.size) {
            return;
        }
        let color = with_alpha(self.color, self.opacity());
        match self.kind {
            ShipParticleKind::PlasmaCloud => {
                let haze = with_alpha(self.color, self.opacity() * 0.5);
                surface.fill_circle(m.pos, m.size / 2.0, haze, BlendMode::Normal);
            }
            ShipParticleKind::ShipDebris => {
                let half = DVec2::new(m.size / 2.0, m.size / 4.0);
                surface.fill_rect(m.pos, half, m.rotation.to_radians(), color);
            }
            ShipParticleKind::EnergySpark => {
                surface.fill_circle(m.pos, m.size / 2.0, color, BlendMode::Additive);
            }
            ShipParticleKind::CoreBurst => {
                surface.fill_circle(m.pos, m.size / 2.0, color, BlendMode::Additive);
                let rim = with_alpha(colors::WHITE, self.opacity() * 0.8);
                surface.stroke_circle(m.pos, m.size / 2.0, 3.0, rim);
            }
            ShipParticleKind::ElectricArc => {
                let points: Vec<DVec2> = self.arc.iter().map(|p| m.pos + *p).collect();
                surface.stroke_polyline(&points, 1.5, color);
            }
        }
    }
}

/// Burst spawned when a ship (hostile or boss) is destroyed
#[derive(Debug, Clone)]
pub struct ShipExplosion {
    particles: Vec<ShipParticle>,
}

impl ShipExplosion {
    /// `scale` is the quality factor in [0, 1]; 0 leaves only the core burst
    pub fn new(
        origin: DVec2,
        source_size: f64,
        hull: HullColor,
        scale: f64,
        rng: &mut SimRng,
    ) -> Self {
        let scheme = Scheme::for_hull(hull);
        let mut particles = vec![ShipParticle::new(
            ShipParticleKind::CoreBurst,
            origin,
            source_size,
            &scheme,
            rng,
        )];

        let batches = [
            (ShipParticleKind::ShipDebris, 1.0, SHIP_DEBRIS_CAP),
            (ShipParticleKind::EnergySpark, 1.2, ENERGY_SPARK_CAP),
            (ShipParticleKind::PlasmaCloud, 0.8, PLASMA_CLOUD_CAP),
            (ShipParticleKind::ElectricArc, 0.6, ELECTRIC_ARC_CAP),
        ];
        for (kind, factor, cap) in batches {
            for _ in 0..burst_count(source_size, factor, cap, scale) {
                particles.push(ShipParticle::new(kind, origin, source_size, &scheme, rng));
            }
        }
        Self { particles }
    }

    pub fn update(&mut self, rng: &mut SimRng) {
        for p in &mut self.particles {
            p.update(rng);
        }
        self.particles.retain(|p| !p.motion.is_dead());
    }

    /// Plasma underneath, hull fragments over it, energy effects on top
    pub fn render(&self, surface: &mut dyn Surface) {
        let layers: [&[ShipParticleKind]; 3] = [
            &[ShipParticleKind::PlasmaCloud],
            &[ShipParticleKind::ShipDebris],
            &[
                ShipParticleKind::EnergySpark,
                ShipParticleKind::CoreBurst,
                ShipParticleKind::ElectricArc,
            ],
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

    pub fn count(&self, kind: ShipParticleKind) -> usize {
        self.particles.iter().filter(|p| p.kind == kind).count()
    }

    pub fn particles(&self) -> &[ShipParticle] {
        &self.particles
    }
}
