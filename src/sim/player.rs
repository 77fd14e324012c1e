//! Player ship: inertial movement, weapon modes and the respawn shield

use glam::DVec2;
use serde::{Deserialize, Serialize};

use super::entity::{Body, Bounds, Entity, Frame, Projectile, ProjectileStyle, SimRng};
use crate::consts::*;
use crate::polar_to_cartesian;
use crate::renderer::{Surface, colors, sprite_or_placeholder};

/// Player weapon selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum BulletMode {
    #[default]
    Standard,
    Shuriken,
    Pulse,
}

impl BulletMode {
    pub fn style(&self) -> ProjectileStyle {
        match self {
            BulletMode::Standard => ProjectileStyle::Standard,
            BulletMode::Shuriken => ProjectileStyle::Shuriken,
            BulletMode::Pulse => ProjectileStyle::Pulse,
        }
    }

    pub fn next(&self) -> Self {
        match self {
            BulletMode::Standard => BulletMode::Shuriken,
            BulletMode::Shuriken => BulletMode::Pulse,
            BulletMode::Pulse => BulletMode::Standard,
        }
    }
}

/// Control state sampled once per tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PlayerInput {
    pub thrust: bool,
    pub rotate_left: bool,
    pub rotate_right: bool,
    pub fire: bool,
    pub summon_drone: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerShip {
    pub pos: DVec2,
    /// Pixels per tick
    pub vel: DVec2,
    /// Facing in radians (0 = +x, -π/2 = up)
    pub angle: f64,
    pub size: f64,
    pub health: i32,
    pub bullet_mode: BulletMode,
    /// Seconds of shield left
    shield_time: f64,
    fire_cooldown: f64,
    last_shot: f64,
}

impl PlayerShip {
    pub fn new(pos: DVec2, fire_cooldown: f64) -> Self {
        Self {
            pos,
            vel: DVec2::ZERO,
            angle: -std::f64::consts::FRAC_PI_2,
            size: PLAYER_SIZE,
            health: PLAYER_MAX_HEALTH,
            bullet_mode: BulletMode::Standard,
            shield_time: 0.0,
            fire_cooldown,
            last_shot: f64::NEG_INFINITY,
        }
    }

    /// Ship parked at the center of the playfield
    pub fn centered(bounds: &Bounds, fire_cooldown: f64) -> Self {
        Self::new(bounds.center(), fire_cooldown)
    }

    pub fn take_damage(&mut self, amount: i32) {
        self.health -= amount;
    }

    pub fn is_destroyed(&self) -> bool {
        self.health <= 0
    }

    /// Shields block every kind of damage
    pub fn is_vulnerable(&self) -> bool {
        self.shield_time <= 0.0
    }

    pub fn shield_time(&self) -> f64 {
        self.shield_time.max(0.0)
    }

    /// Back to full health at `pos`, at rest, shielded for `shield_duration`
    pub fn respawn(&mut self, pos: DVec2, shield_duration: f64) {
        self.pos = pos;
        self.vel = DVec2::ZERO;
        self.angle = -std::f64::consts::FRAC_PI_2;
        self.health = PLAYER_MAX_HEALTH;
        self.shield_time = shield_duration;
    }

    pub fn cycle_bullet_mode(&mut self) {
        self.bullet_mode = self.bullet_mode.next();
    }

    /// Rotation and thrust for one tick
    pub fn apply_input(&mut self, input: &PlayerInput) {
        if input.rotate_left {
            self.angle -= PLAYER_TURN_RATE;
        }
        if input.rotate_right {
            self.angle += PLAYER_TURN_RATE;
        }
        if input.thrust {
            self.vel += polar_to_cartesian(PLAYER_THRUST, self.angle);
            self.vel = self.vel.clamp_length_max(PLAYER_MAX_SPEED);
        } else {
            self.vel *= PLAYER_DECELERATION;
        }
    }

    /// A shot from the nose if the cooldown has elapsed
    pub fn try_fire(&mut self, clock: f64) -> Option<Projectile> {
        if clock - self.last_shot < self.fire_cooldown {
            return None;
        }
        self.last_shot = clock;
        let style = self.bullet_mode.style();
        let nose = self.pos + polar_to_cartesian(self.size / 2.0, self.angle);
        Some(Projectile::new(nose, self.angle, style, style.player_damage()))
    }

    /// Shield countdown and inertial drift with wrap-around
    pub fn update(&mut self, bounds: &Bounds, dt: f64) {
        if self.shield_time > 0.0 {
            self.shield_time -= dt;
        }
        self.pos += self.vel;
        self.pos.x = self.pos.x.rem_euclid(bounds.width);
        self.pos.y = self.pos.y.rem_euclid(bounds.height);
    }

    fn sprite(&self) -> &'static str {
        "playerShip1_blue.png"
    }
}

impl Body for PlayerShip {
    fn position(&self) -> DVec2 {
        self.pos
    }

    fn size(&self) -> f64 {
        self.size
    }
}

impl Entity for PlayerShip {
    fn advance(&mut self, frame: &Frame, _rng: &mut SimRng) {
        self.update(&frame.bounds, frame.dt);
    }

    fn render(&self, surface: &mut dyn Surface) {
        // Sprite nose points up
        sprite_or_placeholder(
            surface,
            self.sprite(),
            self.pos,
            self.size,
            self.angle + std::f64::consts::FRAC_PI_2,
            colors::PLACEHOLDER_PLAYER,
        );
        if !self.is_vulnerable() {
            surface.stroke_circle(self.pos, self.size * 0.75, 2.0, colors::SHIELD);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn frame() -> Frame {
        Frame {
            bounds: Bounds::new(800.0, 600.0),
            target: DVec2::ZERO,
            clock: 0.0,
            dt: SIM_DT,
        }
    }

    #[test]
    fn test_fire_respects_cooldown() {
        let mut p = PlayerShip::new(DVec2::new(400.0, 300.0), 0.3);
        assert!(p.try_fire(0.0).is_some());
        assert!(p.try_fire(0.2).is_none());
        assert!(p.try_fire(0.3).is_some());
    }

    #[test]
    fn test_bullet_modes_change_damage() {
        let mut p = PlayerShip::new(DVec2::new(400.0, 300.0), 0.0);
        let damages: Vec<i32> = (0..3)
            .map(|i| {
                let shot = p.try_fire(f64::from(i)).unwrap();
                p.cycle_bullet_mode();
                shot.damage
            })
            .collect();
        assert_eq!(damages, vec![10, 12, 15]);
        assert_eq!(p.bullet_mode, BulletMode::Standard);
    }

    #[test]
    fn test_shot_leaves_from_nose() {
        let mut p = PlayerShip::new(DVec2::new(400.0, 300.0), 0.3);
        let shot = p.try_fire(0.0).unwrap();
        assert!((shot.pos.y - (300.0 - PLAYER_SIZE / 2.0)).abs() < 1e-9);
        assert!((shot.direction + std::f64::consts::FRAC_PI_2).abs() < 1e-12);
    }

    #[test]
    fn test_thrust_capped_at_max_speed() {
        let mut p = PlayerShip::new(DVec2::new(400.0, 300.0), 0.3);
        let input = PlayerInput {
            thrust: true,
            ..Default::default()
        };
        for _ in 0..1_000 {
            p.apply_input(&input);
        }
        assert!(p.vel.length() <= PLAYER_MAX_SPEED + 1e-9);
        assert!(p.vel.length() > PLAYER_MAX_SPEED - 1e-6);
    }

    #[test]
    fn test_decelerates_without_thrust() {
        let mut p = PlayerShip::new(DVec2::new(400.0, 300.0), 0.3);
        p.vel = DVec2::new(2.0, 0.0);
        p.apply_input(&PlayerInput::default());
        assert!((p.vel.x - 2.0 * PLAYER_DECELERATION).abs() < 1e-12);
    }

    #[test]
    fn test_respawn_grants_shield_that_expires() {
        let mut p = PlayerShip::new(DVec2::new(10.0, 10.0), 0.3);
        p.vel = DVec2::new(3.0, 3.0);
        p.take_damage(70);
        p.respawn(DVec2::new(400.0, 300.0), 1.0);
        assert_eq!(p.health, PLAYER_MAX_HEALTH);
        assert_eq!(p.vel, DVec2::ZERO);
        assert!(!p.is_vulnerable());

        let mut rng = SimRng::seed_from_u64(0);
        for _ in 0..61 {
            p.advance(&frame(), &mut rng);
        }
        assert!(p.is_vulnerable());
    }

    #[test]
    fn test_wraps_around_edges() {
        let mut p = PlayerShip::new(DVec2::new(799.0, 300.0), 0.3);
        p.vel = DVec2::new(3.0, 0.0);
        p.advance(&frame(), &mut SimRng::seed_from_u64(0));
        assert!((p.pos.x - 2.0).abs() < 1e-9);
    }
}
