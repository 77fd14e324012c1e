//! Astro Arena - entity simulation core for a real-time arena shooter
//!
//! Core modules:
//! - `sim`: Simulation (entities, boss state machine, particles, collisions)
//! - `renderer`: Abstract drawing surface consumed by the simulation
//! - `audio`: Feedback hooks (sound effect playback contract)
//! - `settings`: User preferences loaded from JSON
//! - `tuning`: Data-driven game balance

pub mod audio;
pub mod error;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use error::AssetError;
pub use settings::{QualityPreset, Settings};
pub use tuning::Tuning;

use glam::DVec2;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz, one tick per frame)
    pub const SIM_DT: f64 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 4;

    /// Default arena dimensions
    pub const ARENA_WIDTH: f64 = 1680.0;
    pub const ARENA_HEIGHT: f64 = 900.0;

    /// Hazard size tiers (diameter) and their score values
    pub const SMALL_HAZARD_SIZE: f64 = 20.0;
    pub const MEDIUM_HAZARD_SIZE: f64 = 40.0;
    pub const LARGE_HAZARD_SIZE: f64 = 60.0;
    pub const SMALL_HAZARD_POINTS: u32 = 3;
    pub const MEDIUM_HAZARD_POINTS: u32 = 2;
    pub const LARGE_HAZARD_POINTS: u32 = 1;
    pub const HAZARD_MIN_SPEED: f64 = 1.0;
    pub const HAZARD_MAX_SPEED: f64 = 3.0;

    /// Hazards at or below this size are destroyed without splitting
    pub const HAZARD_SPLIT_FLOOR: f64 = 20.0;
    /// Child size = parent size / this
    pub const HAZARD_SPLIT_SHRINK: f64 = 1.5;
    /// Child speed = parent speed * this
    pub const HAZARD_SPLIT_SPEEDUP: f64 = 1.2;
    /// Children diverge +/- this from the parent heading (45 degrees)
    pub const HAZARD_SPLIT_ANGLE: f64 = std::f64::consts::FRAC_PI_4;

    /// Projectile defaults
    pub const PROJECTILE_SPEED: f64 = 10.0;
    pub const PROJECTILE_SIZE: f64 = 10.0;
    pub const BOSS_PROJECTILE_SPEED: f64 = 5.0;
    pub const BOSS_PROJECTILE_SIZE: f64 = 14.0;

    /// Player ship
    pub const PLAYER_SIZE: f64 = 40.0;
    pub const PLAYER_MAX_HEALTH: i32 = 100;
    pub const PLAYER_MAX_SPEED: f64 = 5.0;
    pub const PLAYER_THRUST: f64 = 0.05;
    pub const PLAYER_DECELERATION: f64 = 0.98;
    /// Radians per tick when rotating
    pub const PLAYER_TURN_RATE: f64 = 0.05;

    /// Hostile ship
    pub const HOSTILE_SIZE: f64 = 30.0;
    pub const HOSTILE_MIN_SPEED: f64 = 1.0;
    pub const HOSTILE_MAX_SPEED: f64 = 3.0;

    /// Boss
    pub const BOSS_SIZE: f64 = 80.0;
    pub const BOSS_BASE_SPEED: f64 = 1.5;
    pub const BOSS_SPAWN_Y: f64 = 100.0;
    pub const BOSS_PHASE_SPEEDUP: f64 = 1.5;
    pub const BOSS_BOB_AMPLITUDE: f64 = 50.0;
    /// Radians per second of the vertical bob
    pub const BOSS_BOB_FREQUENCY: f64 = 2.0;
    pub const BOSS_SPRITE_INTERVAL: f64 = 0.2;

    /// Support drone
    pub const DRONE_SIZE: f64 = 20.0;
    pub const DRONE_ORBIT_RADIUS: f64 = 100.0;
    /// Radians per tick around the player
    pub const DRONE_ORBIT_STEP: f64 = 0.05;
    pub const DRONE_VOLLEY_SIZE: usize = 8;
    /// Shots leave this far from the drone's center
    pub const DRONE_MUZZLE_OFFSET: f64 = 20.0;

    /// Particles more than this far outside the surface are not drawn
    pub const OFFSCREEN_MARGIN: f64 = 16.0;
}

/// Normalized angle to [-π, π)
#[inline]
pub fn normalize_angle(mut angle: f64) -> f64 {
    use std::f64::consts::PI;
    while angle >= PI {
        angle -= 2.0 * PI;
    }
    while angle < -PI {
        angle += 2.0 * PI;
    }
    angle
}

/// Convert polar (r, theta) to cartesian (x, y)
#[inline]
pub fn polar_to_cartesian(r: f64, theta: f64) -> DVec2 {
    DVec2::new(r * theta.cos(), r * theta.sin())
}

/// Heading (radians) pointing from `from` toward `to`
#[inline]
pub fn angle_to(from: DVec2, to: DVec2) -> f64 {
    let d = to - from;
    d.y.atan2(d.x)
}
