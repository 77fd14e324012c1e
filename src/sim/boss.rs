//! Boss encounter: health-gated phase ladder and a timed attack-pattern cycle
//!
//! Two independent state machines live here:
//! - `phase` only ever climbs (1 → 2 → 3) as health crosses 60% and 30% of max.
//!   Each step speeds up the horizontal sweep; phases 2 and 3 add a vertical bob.
//! - `pattern` rotates SINGLE → SPREAD → SPIRAL → WAVE every fixed interval,
//!   regardless of phase.
//!
//! The boss owns its projectiles; nothing else appends to that list.

use std::f64::consts::{FRAC_PI_2, FRAC_PI_4, FRAC_PI_8, TAU};

use glam::DVec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::entity::{Body, Bounds, Entity, Frame, Projectile, ProjectileStyle, SimRng};
use crate::angle_to;
use crate::consts::*;
use crate::renderer::{Surface, colors, sprite_or_placeholder};
use crate::tuning::{Tuning, probability};

const BOSS_SPRITES: [&str; 4] = ["ufoBlue.png", "ufoGreen.png", "ufoRed.png", "ufoYellow.png"];

/// Escalation level, ordered
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum BossPhase {
    One,
    Two,
    Three,
}

impl BossPhase {
    /// Phase implied by a health level (health ≤ 60% → Two, ≤ 30% → Three)
    pub fn for_health(health: i32, max_health: i32) -> Self {
        let health = i64::from(health) * 100;
        let max = i64::from(max_health);
        if health <= max * 30 {
            BossPhase::Three
        } else if health <= max * 60 {
            BossPhase::Two
        } else {
            BossPhase::One
        }
    }

    pub fn number(&self) -> u8 {
        match self {
            BossPhase::One => 1,
            BossPhase::Two => 2,
            BossPhase::Three => 3,
        }
    }

    pub fn bobs(&self) -> bool {
        *self >= BossPhase::Two
    }
}

/// Projectile emission shape
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AttackPattern {
    Single,
    Spread,
    Spiral,
    Wave,
}

impl AttackPattern {
    pub fn next(&self) -> Self {
        match self {
            AttackPattern::Single => AttackPattern::Spread,
            AttackPattern::Spread => AttackPattern::Spiral,
            AttackPattern::Spiral => AttackPattern::Wave,
            AttackPattern::Wave => AttackPattern::Single,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Boss {
    pub pos: DVec2,
    /// Vertical line the bob oscillates around
    pub base_y: f64,
    pub size: f64,
    /// Signed horizontal speed, pixels per tick
    pub velocity_x: f64,
    pub health: i32,
    pub max_health: i32,
    phase: BossPhase,
    pattern: AttackPattern,
    pattern_started: f64,
    /// Seconds spent bobbing (starts at the first phase change)
    bob_time: f64,
    sprite_index: usize,
    sprite_time: f64,
    projectile_damage: i32,
    fire_chance: f64,
    pattern_interval: f64,
    /// Boss-owned projectiles
    pub projectiles: Vec<Projectile>,
}

impl Boss {
    pub fn new(pos: DVec2, tuning: &Tuning, clock: f64) -> Self {
        Self {
            pos,
            base_y: pos.y,
            size: BOSS_SIZE,
            velocity_x: BOSS_BASE_SPEED,
            health: tuning.boss_max_health,
            max_health: tuning.boss_max_health,
            phase: BossPhase::One,
            pattern: AttackPattern::Single,
            pattern_started: clock,
            bob_time: 0.0,
            sprite_index: 0,
            sprite_time: 0.0,
            projectile_damage: tuning.boss_projectile_damage,
            fire_chance: probability(tuning.boss_fire_chance),
            pattern_interval: tuning.boss_pattern_interval,
            projectiles: Vec::new(),
        }
    }

    /// Boss at its entry point: top-center of the playfield
    pub fn spawn(bounds: &Bounds, tuning: &Tuning, clock: f64) -> Self {
        Self::new(DVec2::new(bounds.width / 2.0, BOSS_SPAWN_Y), tuning, clock)
    }

    pub fn phase(&self) -> BossPhase {
        self.phase
    }

    pub fn pattern(&self) -> AttackPattern {
        self.pattern
    }

    pub fn is_defeated(&self) -> bool {
        self.health <= 0
    }

    pub fn health_fraction(&self) -> f64 {
        (f64::from(self.health) / f64::from(self.max_health)).clamp(0.0, 1.0)
    }

    /// Apply damage and climb the phase ladder. Returns the new phase when a
    /// transition happened.
    pub fn take_damage(&mut self, amount: i32) -> Option<BossPhase> {
        self.health -= amount;
        let target = BossPhase::for_health(self.health, self.max_health);
        if target <= self.phase {
            return None;
        }
        // One speed-up per phase crossed, even when a big hit skips one
        let steps = target.number() - self.phase.number();
        for _ in 0..steps {
            self.velocity_x *= BOSS_PHASE_SPEEDUP;
        }
        log::info!(
            "Boss phase {} -> {} (health {}/{})",
            self.phase.number(),
            target.number(),
            self.health,
            self.max_health
        );
        self.phase = target;
        Some(target)
    }

    /// Emit the current pattern's batch
    pub fn fire(&mut self, clock: f64, target: DVec2) {
        let muzzle = DVec2::new(self.pos.x, self.pos.y + self.size / 2.0);
        let damage = self.projectile_damage;
        let shot = |pos: DVec2, angle: f64| Projectile::new(pos, angle, ProjectileStyle::Boss, damage);

        match self.pattern {
            AttackPattern::Single => {
                // Aimed, but never more than 45° off straight down
                let aim = angle_to(muzzle, target).clamp(FRAC_PI_4, FRAC_PI_2 + FRAC_PI_4);
                self.projectiles.push(shot(muzzle, aim));
            }
            AttackPattern::Spread => {
                for i in -2..=2 {
                    let angle = FRAC_PI_2 + f64::from(i) * FRAC_PI_8;
                    self.projectiles.push(shot(muzzle, angle));
                }
            }
            AttackPattern::Spiral => {
                let base = clock;
                for i in 0..8 {
                    let angle = (base + f64::from(i) * FRAC_PI_4) % TAU;
                    self.projectiles.push(shot(self.pos, angle));
                }
            }
            AttackPattern::Wave => {
                for i in -1..=1 {
                    let offset = DVec2::new(f64::from(i) * self.size / 2.0, 0.0);
                    let speed = BOSS_PROJECTILE_SPEED + f64::from(i + 1) * 0.75;
                    self.projectiles
                        .push(shot(muzzle + offset, FRAC_PI_2).with_speed(speed));
                }
            }
        }
    }

    fn sweep_horizontally(&mut self, bounds: &Bounds) {
        let half = self.size / 2.0;
        self.pos.x += self.velocity_x;
        if self.pos.x > bounds.width - half {
            self.pos.x = bounds.width - half;
            self.velocity_x = -self.velocity_x.abs();
        } else if self.pos.x < half {
            self.pos.x = half;
            self.velocity_x = self.velocity_x.abs();
        }
    }

    fn sprite(&self) -> &'static str {
        BOSS_SPRITES[self.sprite_index]
    }
}

impl Body for Boss {
    fn position(&self) -> DVec2 {
        self.pos
    }

    fn size(&self) -> f64 {
        self.size
    }
}

impl Entity for Boss {
    fn advance(&mut self, frame: &Frame, rng: &mut SimRng) {
        self.sweep_horizontally(&frame.bounds);

        if self.phase.bobs() {
            self.bob_time += frame.dt;
            self.pos.y = self.base_y + BOSS_BOB_AMPLITUDE * (self.bob_time * BOSS_BOB_FREQUENCY).sin();
        }

        if frame.clock - self.pattern_started >= self.pattern_interval {
            self.pattern = self.pattern.next();
            self.pattern_started = frame.clock;
            log::debug!("Boss attack pattern -> {:?}", self.pattern);
        }

        self.sprite_time += frame.dt;
        if self.sprite_time >= BOSS_SPRITE_INTERVAL {
            self.sprite_time = 0.0;
            self.sprite_index = (self.sprite_index + 1) % BOSS_SPRITES.len();
        }

        if rng.random_bool(self.fire_chance) {
            self.fire(frame.clock, frame.target);
        }

        for projectile in &mut self.projectiles {
            projectile.advance(frame, rng);
        }
        self.projectiles.retain(|p| !p.is_off_screen(&frame.bounds));
    }

    fn render(&self, surface: &mut dyn Surface) {
        sprite_or_placeholder(
            surface,
            self.sprite(),
            self.pos,
            self.size,
            0.0,
            colors::PLACEHOLDER_BOSS,
        );

        let bar_y = self.pos.y - self.size / 2.0 - 10.0;
        let half_w = self.size / 2.0;
        surface.fill_rect(
            DVec2::new(self.pos.x, bar_y),
            DVec2::new(half_w, 2.5),
            0.0,
            colors::HEALTH_BAR_BACK,
        );
        let fill = half_w * self.health_fraction();
        surface.fill_rect(
            DVec2::new(self.pos.x - half_w + fill, bar_y),
            DVec2::new(fill, 2.5),
            0.0,
            colors::HEALTH_BAR,
        );

        for projectile in &self.projectiles {
            projectile.render(surface);
        }
    }
}
