//! Data-driven game balance
//!
//! Every value has a serde default so a tuning file only needs the knobs it
//! changes. Times are in seconds of simulated time.

use std::path::Path;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub hazard_spawn_cooldown: f64,
    pub hazards_per_spawn: usize,
    pub hostile_spawn_cooldown: f64,

    pub hostile_health: i32,
    pub hostile_fire_cooldown: f64,
    pub hostile_kill_score: u32,
    /// Damage dealt to the player by one hostile projectile
    pub hostile_projectile_damage: i32,
    /// Damage dealt to the player by ramming a hostile
    pub hostile_contact_damage: i32,

    pub boss_max_health: i32,
    pub boss_defeat_score: u32,
    pub boss_projectile_damage: i32,
    pub boss_pattern_interval: f64,
    /// Probability per tick that the boss emits a batch
    pub boss_fire_chance: f64,
    /// Score at which the first boss stage starts (and every multiple after)
    pub boss_trigger_score: u32,

    pub player_fire_cooldown: f64,
    pub shield_duration: f64,
    pub starting_lives: u32,

    pub level_time_limit: f64,

    /// Seconds a summoned drone stays
    pub drone_duration: f64,
    /// Seconds between summons, counted from the previous summon
    pub drone_summon_cooldown: f64,
    /// Seconds between drone volleys while the player fires
    pub drone_fire_cooldown: f64,
    pub drone_damage: i32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            hazard_spawn_cooldown: 1.0,
            hazards_per_spawn: 3,
            hostile_spawn_cooldown: 5.0,

            hostile_health: 30,
            hostile_fire_cooldown: 2.0,
            hostile_kill_score: 50,
            hostile_projectile_damage: 5,
            hostile_contact_damage: 10,

            boss_max_health: 200,
            boss_defeat_score: 100,
            boss_projectile_damage: 20,
            boss_pattern_interval: 5.0,
            boss_fire_chance: 0.02,
            boss_trigger_score: 1000,

            player_fire_cooldown: 0.3,
            shield_duration: 3.0,
            starting_lives: 3,

            level_time_limit: 60.0,

            drone_duration: 5.0,
            drone_summon_cooldown: 10.0,
            drone_fire_cooldown: 0.5,
            drone_damage: 7,
        }
    }
}

impl Tuning {
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str::<Self>(json).map(Self::sanitized)
    }

    /// Pull out-of-range knobs back to values the simulation accepts
    fn sanitized(mut self) -> Self {
        if !(0.0..=1.0).contains(&self.boss_fire_chance) {
            let fixed = probability(self.boss_fire_chance);
            log::warn!(
                "boss_fire_chance {} outside [0, 1], using {fixed}",
                self.boss_fire_chance
            );
            self.boss_fire_chance = fixed;
        }
        self
    }

    /// Load tuning from a JSON file, keeping defaults when it is absent or bad
    pub fn load(path: &Path) -> Self {
        let json = match std::fs::read_to_string(path) {
            Ok(json) => json,
            Err(_) => return Self::default(),
        };
        Self::from_json(&json).unwrap_or_else(|e| {
            log::warn!("Ignoring malformed tuning in {}: {e}", path.display());
            Self::default()
        })
    }
}

/// Clamp to [0, 1]; NaN becomes 0
pub fn probability(p: f64) -> f64 {
    if p.is_nan() { 0.0 } else { p.clamp(0.0, 1.0) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_override_single_knob() {
        let tuning = Tuning::from_json(r#"{ "boss_max_health": 100 }"#).unwrap();
        assert_eq!(tuning.boss_max_health, 100);
        assert_eq!(tuning.boss_defeat_score, 100);
        assert_eq!(tuning.hazards_per_spawn, 3);
    }

    #[test]
    fn test_fire_chance_clamped_on_load() {
        let tuning = Tuning::from_json(r#"{ "boss_fire_chance": 1.5 }"#).unwrap();
        assert_eq!(tuning.boss_fire_chance, 1.0);
        let tuning = Tuning::from_json(r#"{ "boss_fire_chance": -0.2 }"#).unwrap();
        assert_eq!(tuning.boss_fire_chance, 0.0);
        assert_eq!(probability(f64::NAN), 0.0);
    }

    #[test]
    fn test_missing_file_keeps_defaults() {
        let tuning = Tuning::load(Path::new("/nonexistent/tuning.json"));
        assert_eq!(tuning.boss_max_health, 200);
    }
}
