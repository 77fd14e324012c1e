//! Entity manager: owns every live collection and runs spawn cadence,
//! per-tick advancement and collision resolution.
//!
//! Collection membership only changes here. Entities never remove themselves;
//! collision passes mark what they destroy and sweep afterwards.

use glam::DVec2;
use rand::SeedableRng;

use super::boss::Boss;
use super::collision::{Marks, collides};
use super::drone::Drone;
use super::entity::{Bounds, Entity, Frame, Projectile, SimRng};
use super::hazard::Hazard;
use super::hostile::{HullColor, Hostile};
use super::particles::{Effect, Explosion, ShipExplosion};
use super::player::PlayerShip;
use super::state::GameState;
use crate::audio::{AudioSink, SoundEffect};
use crate::renderer::Surface;
use crate::settings::Settings;
use crate::tuning::Tuning;

/// Elapsed-time context handed to [`EntityManager::tick`]
#[derive(Debug, Clone, Copy)]
pub struct TickContext {
    /// Seconds since the previous tick
    pub dt: f64,
    /// Point hostiles pursue and aim at (the player's position)
    pub target: DVec2,
    /// Player is holding fire; drives drone volleys
    pub firing: bool,
}

/// Seed used when settings do not pin one
pub const DEFAULT_SEED: u64 = 0x5eed_a57e_501d;

fn play(audio: &mut dyn AudioSink, effect: SoundEffect) {
    if let Err(err) = audio.play(effect) {
        log::warn!("{err}");
    }
}

#[derive(Debug)]
pub struct EntityManager {
    bounds: Bounds,
    tuning: Tuning,
    /// Quality factor applied to particle bursts
    particle_scale: f64,
    rng: SimRng,
    /// Simulated seconds since construction
    clock: f64,
    last_hazard_spawn: f64,
    last_hostile_spawn: f64,

    hazards: Vec<Hazard>,
    hostiles: Vec<Hostile>,
    player_projectiles: Vec<Projectile>,
    hostile_projectiles: Vec<Projectile>,
    /// Present exactly while the boss stage is active
    boss: Option<Boss>,
    effects: Vec<Effect>,
    drone: Option<Drone>,
    last_drone_summon: f64,
}

impl EntityManager {
    pub fn new(bounds: Bounds, tuning: Tuning, particle_scale: f64, seed: u64) -> Self {
        Self {
            bounds,
            tuning,
            particle_scale: particle_scale.clamp(0.0, 1.0),
            rng: SimRng::seed_from_u64(seed),
            clock: 0.0,
            last_hazard_spawn: 0.0,
            last_hostile_spawn: 0.0,
            hazards: Vec::new(),
            hostiles: Vec::new(),
            player_projectiles: Vec::new(),
            hostile_projectiles: Vec::new(),
            boss: None,
            effects: Vec::new(),
            drone: None,
            last_drone_summon: f64::NEG_INFINITY,
        }
    }

    pub fn from_settings(settings: &Settings, tuning: Tuning) -> Self {
        let seed = settings.seed.unwrap_or(DEFAULT_SEED);
        log::info!(
            "Entity manager: arena {}x{}, seed {seed:#x}, quality {}",
            settings.arena_width,
            settings.arena_height,
            settings.quality.as_str()
        );
        Self::new(
            Bounds::new(settings.arena_width, settings.arena_height),
            tuning,
            settings.particle_scale(),
            seed,
        )
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    pub fn clock(&self) -> f64 {
        self.clock
    }

    pub fn hazards(&self) -> &[Hazard] {
        &self.hazards
    }

    pub fn hostiles(&self) -> &[Hostile] {
        &self.hostiles
    }

    pub fn player_projectiles(&self) -> &[Projectile] {
        &self.player_projectiles
    }

    pub fn hostile_projectiles(&self) -> &[Projectile] {
        &self.hostile_projectiles
    }

    pub fn effects(&self) -> &[Effect] {
        &self.effects
    }

    pub fn boss(&self) -> Option<&Boss> {
        self.boss.as_ref()
    }

    pub fn boss_mut(&mut self) -> Option<&mut Boss> {
        self.boss.as_mut()
    }

    pub fn is_boss_active(&self) -> bool {
        self.boss.is_some()
    }

    pub fn drone(&self) -> Option<&Drone> {
        self.drone.as_ref()
    }

    /// Seconds until another drone can be summoned
    pub fn drone_cooldown_remaining(&self) -> f64 {
        (self.last_drone_summon + self.tuning.drone_summon_cooldown - self.clock).max(0.0)
    }

    pub fn can_summon_drone(&self) -> bool {
        self.drone.is_none() && self.drone_cooldown_remaining() <= 0.0
    }

    // --- Spawning ---

    /// One fresh hazard at a random point
    pub fn spawn_hazard(&mut self) {
        let hazard = Hazard::spawn(&self.bounds, &mut self.rng);
        self.hazards.push(hazard);
    }

    /// One hostile at a random point
    pub fn spawn_hostile(&mut self) {
        let hostile = Hostile::spawn(
            &self.bounds,
            self.tuning.hostile_health,
            self.clock,
            &mut self.rng,
        );
        self.hostiles.push(hostile);
    }

    pub fn add_hazard(&mut self, hazard: Hazard) {
        self.hazards.push(hazard);
    }

    pub fn add_hostile(&mut self, hostile: Hostile) {
        self.hostiles.push(hostile);
    }

    pub fn add_player_projectile(&mut self, projectile: Projectile) {
        self.player_projectiles.push(projectile);
    }

    /// Bring in a drone orbiting `anchor`. Returns `false` while one is out
    /// or the summon cooldown is still running.
    pub fn summon_drone(&mut self, anchor: DVec2) -> bool {
        if !self.can_summon_drone() {
            return false;
        }
        self.drone = Some(Drone::new(anchor, &self.tuning));
        self.last_drone_summon = self.clock;
        log::info!("Drone summoned at t={:.1}s", self.clock);
        true
    }

    fn run_spawn_cadence(&mut self) {
        if self.boss.is_some() {
            return;
        }
        if self.clock - self.last_hazard_spawn >= self.tuning.hazard_spawn_cooldown {
            for _ in 0..self.tuning.hazards_per_spawn {
                self.spawn_hazard();
            }
            self.last_hazard_spawn = self.clock;
        }
        if self.clock - self.last_hostile_spawn >= self.tuning.hostile_spawn_cooldown {
            self.spawn_hostile();
            self.last_hostile_spawn = self.clock;
        }
    }

    // --- Boss stage ---

    /// Clear the field and bring in the boss. No-op while a boss is active.
    pub fn start_boss_stage(&mut self) {
        if self.boss.is_some() {
            return;
        }
        self.clear_hazards();
        self.clear_hostiles();
        self.clear_projectiles();
        self.boss = Some(Boss::spawn(&self.bounds, &self.tuning, self.clock));
        log::info!("Boss stage started at t={:.1}s", self.clock);
    }

    /// `true` starts the boss stage; `false` ends it and drops the boss
    pub fn set_boss_active(&mut self, active: bool) {
        if active {
            self.start_boss_stage();
        } else if self.boss.take().is_some() {
            self.restart_spawn_timers();
            log::info!("Boss stage ended");
        }
    }

    fn restart_spawn_timers(&mut self) {
        self.last_hazard_spawn = self.clock;
        self.last_hostile_spawn = self.clock;
    }

    // --- Clearing ---

    pub fn clear_hazards(&mut self) {
        self.hazards.clear();
    }

    pub fn clear_hostiles(&mut self) {
        self.hostiles.clear();
    }

    /// Player and hostile projectiles (boss projectiles go with the boss)
    pub fn clear_projectiles(&mut self) {
        self.player_projectiles.clear();
        self.hostile_projectiles.clear();
    }

    /// Restart: empty every collection and end any boss stage
    pub fn clear_all(&mut self) {
        self.clear_hazards();
        self.clear_hostiles();
        self.clear_projectiles();
        self.effects.clear();
        self.boss = None;
        self.drone = None;
        self.last_drone_summon = f64::NEG_INFINITY;
        self.restart_spawn_timers();
    }

    // --- Per-tick advancement ---

    /// Advance and draw everything by one tick
    pub fn tick(&mut self, ctx: &TickContext, surface: &mut dyn Surface) {
        self.clock += ctx.dt;
        self.run_spawn_cadence();

        let frame = Frame {
            bounds: self.bounds,
            target: ctx.target,
            clock: self.clock,
            dt: ctx.dt,
        };

        for hazard in &mut self.hazards {
            hazard.advance(&frame, &mut self.rng);
            hazard.render(surface);
        }

        for hostile in &mut self.hostiles {
            hostile.advance(&frame, &mut self.rng);
            if hostile.try_fire(self.clock, self.tuning.hostile_fire_cooldown) {
                let shot = hostile.shoot_at(ctx.target, self.tuning.hostile_projectile_damage);
                self.hostile_projectiles.push(shot);
            }
            hostile.render(surface);
        }

        let volley = match self.drone.as_mut() {
            Some(drone) => {
                drone.advance(&frame, &mut self.rng);
                drone.try_volley(self.clock, ctx.firing)
            }
            None => Vec::new(),
        };
        for shot in volley {
            self.add_player_projectile(shot);
        }
        if self.drone.as_ref().is_some_and(Drone::is_expired) {
            self.drone = None;
            log::info!("Drone left at t={:.1}s", self.clock);
        }
        if let Some(drone) = &self.drone {
            drone.render(surface);
        }

        for projectiles in [&mut self.player_projectiles, &mut self.hostile_projectiles] {
            for projectile in projectiles.iter_mut() {
                projectile.advance(&frame, &mut self.rng);
            }
            projectiles.retain(|p| !p.is_off_screen(&self.bounds));
            for projectile in projectiles.iter() {
                projectile.render(surface);
            }
        }

        if let Some(boss) = self.boss.as_mut() {
            boss.advance(&frame, &mut self.rng);
            boss.render(surface);
        }

        for effect in &mut self.effects {
            effect.update(&mut self.rng);
        }
        self.effects.retain(Effect::is_active);
        for effect in &self.effects {
            effect.render(surface);
        }
    }

    // --- Collisions ---

    /// Run every collision pass once, pushing health, score and life changes
    /// into the caller's state.
    pub fn check_collisions(
        &mut self,
        state: &mut GameState,
        player: &mut PlayerShip,
        audio: &mut dyn AudioSink,
    ) {
        self.hostile_projectiles_vs_player(state, player, audio);
        self.player_vs_hostiles(state, player, audio);
        self.player_projectiles_vs_hostiles(state, audio);
        self.player_projectiles_vs_hazards(state);
        self.player_vs_hazards(state, player, audio);
        if self.boss.is_some() {
            self.boss_collisions(state, player, audio);
        }
    }

    fn hostile_projectiles_vs_player(
        &mut self,
        state: &mut GameState,
        player: &mut PlayerShip,
        audio: &mut dyn AudioSink,
    ) {
        if !player.is_vulnerable() {
            return;
        }
        let mut spent = Marks::new(self.hostile_projectiles.len());
        for (i, projectile) in self.hostile_projectiles.iter().enumerate() {
            if !collides(projectile, player) {
                continue;
            }
            spent.mark(i);
            player.take_damage(projectile.damage);
            play(audio, SoundEffect::Hit);
            if player.is_destroyed() {
                state.set_game_over();
            }
        }
        spent.sweep(&mut self.hostile_projectiles);
    }

    fn player_vs_hostiles(
        &mut self,
        state: &mut GameState,
        player: &mut PlayerShip,
        audio: &mut dyn AudioSink,
    ) {
        if !player.is_vulnerable() {
            return;
        }
        let mut rammed = Marks::new(self.hostiles.len());
        for (i, hostile) in self.hostiles.iter().enumerate() {
            if !collides(player, hostile) {
                continue;
            }
            rammed.mark(i);
            player.take_damage(self.tuning.hostile_contact_damage);
            play(audio, SoundEffect::Hit);
            log::info!("Player rammed a hostile, health {}", player.health);
            if player.is_destroyed() {
                log::warn!("Player destroyed by a hostile");
                state.set_game_over();
                play(audio, SoundEffect::Explode);
            }
        }
        rammed.sweep(&mut self.hostiles);
    }

    fn player_projectiles_vs_hostiles(&mut self, state: &mut GameState, audio: &mut dyn AudioSink) {
        let mut spent = Marks::new(self.player_projectiles.len());
        let mut destroyed = Marks::new(self.hostiles.len());
        for (i, projectile) in self.player_projectiles.iter().enumerate() {
            for (j, hostile) in self.hostiles.iter_mut().enumerate() {
                if destroyed.is_marked(j) || !collides(projectile, hostile) {
                    continue;
                }
                spent.mark(i);
                hostile.take_damage(projectile.damage);
                if hostile.is_destroyed() {
                    destroyed.mark(j);
                    state.add_score(self.tuning.hostile_kill_score);
                    let burst = ShipExplosion::new(
                        hostile.pos,
                        hostile.size,
                        hostile.hull,
                        self.particle_scale,
                        &mut self.rng,
                    );
                    self.effects.push(burst.into());
                    play(audio, SoundEffect::HostileDown);
                }
                // One projectile, one target
                break;
            }
        }
        spent.sweep(&mut self.player_projectiles);
        destroyed.sweep(&mut self.hostiles);
    }

    fn player_projectiles_vs_hazards(&mut self, state: &mut GameState) {
        let mut spent = Marks::new(self.player_projectiles.len());
        let mut destroyed = Marks::new(self.hazards.len());
        // Split children join after the sweep, so they are not tested this tick
        let mut children = Vec::new();
        for (i, projectile) in self.player_projectiles.iter().enumerate() {
            for (j, hazard) in self.hazards.iter().enumerate() {
                if destroyed.is_marked(j) || !collides(projectile, hazard) {
                    continue;
                }
                spent.mark(i);
                destroyed.mark(j);
                state.add_score(hazard.points);
                children.extend(hazard.split(&mut self.rng));
                let burst = Explosion::new(hazard.pos, hazard.size, self.particle_scale, &mut self.rng);
                self.effects.push(burst.into());
                log::debug!(
                    "Hazard (size {:.0}) destroyed, score {}",
                    hazard.size,
                    state.score
                );
                break;
            }
        }
        spent.sweep(&mut self.player_projectiles);
        destroyed.sweep(&mut self.hazards);
        self.hazards.extend(children);
    }

    fn player_vs_hazards(
        &mut self,
        state: &mut GameState,
        player: &mut PlayerShip,
        audio: &mut dyn AudioSink,
    ) {
        if !player.is_vulnerable() {
            return;
        }
        // The player respawns shielded, so at most one hazard counts per tick
        let Some(index) = self.hazards.iter().position(|h| collides(player, h)) else {
            return;
        };
        self.hazards.remove(index);
        state.lose_life();
        play(audio, SoundEffect::Hit);
        log::warn!("Player hit by a hazard, {} lives left", state.lives);
        if state.game_over {
            play(audio, SoundEffect::Explode);
        } else {
            player.respawn(self.bounds.center(), self.tuning.shield_duration);
        }
    }

    fn boss_collisions(
        &mut self,
        state: &mut GameState,
        player: &mut PlayerShip,
        audio: &mut dyn AudioSink,
    ) {
        let Some(boss) = self.boss.as_mut() else {
            return;
        };

        if player.is_vulnerable() {
            let mut spent = Marks::new(boss.projectiles.len());
            for (i, projectile) in boss.projectiles.iter().enumerate() {
                // A lethal hit respawns the player shielded
                if !player.is_vulnerable() || !collides(projectile, player) {
                    continue;
                }
                spent.mark(i);
                player.take_damage(projectile.damage);
                play(audio, SoundEffect::Hit);
                log::info!("Player hit by boss projectile, health {}", player.health);
                if player.is_destroyed() {
                    state.lose_life();
                    play(audio, SoundEffect::Explode);
                    if !state.game_over {
                        player.respawn(self.bounds.center(), self.tuning.shield_duration);
                    }
                }
            }
            spent.sweep(&mut boss.projectiles);
        }

        let mut spent = Marks::new(self.player_projectiles.len());
        let mut defeated = false;
        for (i, projectile) in self.player_projectiles.iter().enumerate() {
            if !collides(projectile, boss) {
                continue;
            }
            spent.mark(i);
            boss.take_damage(projectile.damage);
            play(audio, SoundEffect::BossHit);
            log::debug!("Boss hit, health {}", boss.health);
            if boss.is_defeated() {
                defeated = true;
                break;
            }
        }
        spent.sweep(&mut self.player_projectiles);

        if defeated {
            let (pos, size) = (boss.pos, boss.size);
            self.boss = None;
            self.restart_spawn_timers();
            state.add_score(self.tuning.boss_defeat_score);
            let burst = ShipExplosion::new(pos, size, HullColor::Black, self.particle_scale, &mut self.rng);
            self.effects.push(burst.into());
            play(audio, SoundEffect::BossDefeated);
            log::info!("Boss defeated, score {}", state.score);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::{AudioManager, SilentAudio};
    use crate::renderer::DrawList;
    use crate::sim::boss::BossPhase;
    use crate::sim::entity::ProjectileStyle;
    use crate::sim::particles::ParticleKind;

    const W: f64 = 800.0;
    const H: f64 = 600.0;

    fn manager() -> EntityManager {
        EntityManager::new(Bounds::new(W, H), Tuning::default(), 1.0, 42)
    }

    fn player_at(pos: DVec2) -> PlayerShip {
        PlayerShip::new(pos, 0.3)
    }

    fn shot(pos: DVec2) -> Projectile {
        Projectile::new(pos, 0.0, ProjectileStyle::Standard, 10)
    }

    fn ctx() -> TickContext {
        TickContext {
            dt: crate::consts::SIM_DT,
            target: DVec2::new(W / 2.0, H / 2.0),
            firing: false,
        }
    }

    #[test]
    fn test_projectile_destroys_and_splits_large_hazard() {
        let mut m = manager();
        let mut rng = SimRng::seed_from_u64(1);
        let pos = DVec2::new(600.0, 400.0);
        m.add_hazard(Hazard::new(pos, 2.0, 60.0, 1, false, &mut rng));
        m.add_player_projectile(shot(pos));

        let mut state = GameState::default();
        let mut player = player_at(DVec2::new(50.0, 50.0));
        m.check_collisions(&mut state, &mut player, &mut SilentAudio);

        assert_eq!(state.score, 1);
        assert!(m.player_projectiles().is_empty());
        assert_eq!(m.hazards().len(), 2);
        assert!(m.hazards().iter().all(|h| (h.size - 40.0).abs() < 1e-9));
        assert_eq!(m.effects().len(), 1);
        match &m.effects()[0] {
            Effect::Explosion(e) => {
                assert_eq!(e.count(ParticleKind::Core), 1);
                assert!(e.count(ParticleKind::Debris) <= 28);
                assert!(e.count(ParticleKind::Spark) <= 36);
                assert!(e.count(ParticleKind::Smoke) <= 24);
            }
            other => panic!("expected a generic explosion, got {other:?}"),
        }
    }

    #[test]
    fn test_small_hazard_destroyed_without_children() {
        let mut m = manager();
        let mut rng = SimRng::seed_from_u64(1);
        let pos = DVec2::new(600.0, 400.0);
        m.add_hazard(Hazard::new(pos, 2.0, 20.0, 3, false, &mut rng));
        m.add_player_projectile(shot(pos));
        let mut state = GameState::default();
        m.check_collisions(&mut state, &mut player_at(DVec2::new(50.0, 50.0)), &mut SilentAudio);
        assert_eq!(state.score, 3);
        assert!(m.hazards().is_empty());
    }

    #[test]
    fn test_one_projectile_one_hazard() {
        let mut m = manager();
        let mut rng = SimRng::seed_from_u64(1);
        let pos = DVec2::new(600.0, 400.0);
        m.add_hazard(Hazard::new(pos, 2.0, 20.0, 3, false, &mut rng));
        m.add_hazard(Hazard::new(pos, 2.0, 20.0, 3, false, &mut rng));
        m.add_player_projectile(shot(pos));
        let mut state = GameState::default();
        m.check_collisions(&mut state, &mut player_at(DVec2::new(50.0, 50.0)), &mut SilentAudio);
        assert_eq!(state.score, 3);
        assert_eq!(m.hazards().len(), 1);
    }

    #[test]
    fn test_destroyed_hazard_not_matched_twice() {
        let mut m = manager();
        let mut rng = SimRng::seed_from_u64(1);
        let pos = DVec2::new(600.0, 400.0);
        m.add_hazard(Hazard::new(pos, 2.0, 20.0, 3, false, &mut rng));
        m.add_player_projectile(shot(pos));
        m.add_player_projectile(shot(pos));
        let mut state = GameState::default();
        m.check_collisions(&mut state, &mut player_at(DVec2::new(50.0, 50.0)), &mut SilentAudio);

        assert_eq!(state.score, 3);
        assert!(m.hazards().is_empty());
        assert_eq!(m.player_projectiles().len(), 1);
        assert_eq!(m.effects().len(), 1);
    }

    #[test]
    fn test_destroyed_hostile_not_matched_twice() {
        let mut m = manager();
        let mut rng = SimRng::seed_from_u64(1);
        let pos = DVec2::new(600.0, 300.0);
        m.add_hostile(Hostile::new(pos, 1.0, 10, 0.0, &mut rng));
        m.add_player_projectile(shot(pos));
        m.add_player_projectile(shot(pos));
        let mut state = GameState::default();
        let mut audio = AudioManager::new();
        m.check_collisions(&mut state, &mut player_at(DVec2::new(50.0, 50.0)), &mut audio);

        assert_eq!(state.score, 50);
        assert!(m.hostiles().is_empty());
        assert_eq!(m.player_projectiles().len(), 1);
        assert_eq!(m.effects().len(), 1);
        assert_eq!(audio.count(SoundEffect::HostileDown), 1);
    }

    #[test]
    fn test_hostile_projectile_damages_player() {
        let mut m = manager();
        let pos = DVec2::new(300.0, 300.0);
        m.hostile_projectiles
            .push(Projectile::new(pos, 0.0, ProjectileStyle::Hostile, 5));
        let mut state = GameState::default();
        let mut player = player_at(pos);
        let mut audio = AudioManager::new();
        m.check_collisions(&mut state, &mut player, &mut audio);

        assert_eq!(player.health, 95);
        assert!(m.hostile_projectiles().is_empty());
        assert_eq!(audio.count(SoundEffect::Hit), 1);
        assert!(!state.game_over);
    }

    #[test]
    fn test_lethal_hostile_projectile_ends_game() {
        let mut m = manager();
        let pos = DVec2::new(300.0, 300.0);
        m.hostile_projectiles
            .push(Projectile::new(pos, 0.0, ProjectileStyle::Hostile, 5));
        let mut state = GameState::default();
        let mut player = player_at(pos);
        player.health = 5;
        m.check_collisions(&mut state, &mut player, &mut SilentAudio);
        assert!(state.game_over);
    }

    #[test]
    fn test_shielded_player_is_immune() {
        let mut m = manager();
        let mut rng = SimRng::seed_from_u64(1);
        let pos = DVec2::new(300.0, 300.0);
        m.hostile_projectiles
            .push(Projectile::new(pos, 0.0, ProjectileStyle::Hostile, 5));
        m.add_hostile(Hostile::new(pos, 1.0, 30, 0.0, &mut rng));
        m.add_hazard(Hazard::new(pos, 1.0, 60.0, 1, false, &mut rng));

        let mut state = GameState::default();
        let mut player = player_at(pos);
        player.respawn(pos, 3.0);
        m.check_collisions(&mut state, &mut player, &mut SilentAudio);

        assert_eq!(player.health, 100);
        assert_eq!(state.lives, 3);
        assert_eq!(m.hostiles().len(), 1);
        assert_eq!(m.hazards().len(), 1);
        assert_eq!(m.hostile_projectiles().len(), 1);
    }

    #[test]
    fn test_ramming_hostile_removes_it() {
        let mut m = manager();
        let mut rng = SimRng::seed_from_u64(1);
        let pos = DVec2::new(300.0, 300.0);
        m.add_hostile(Hostile::new(pos, 1.0, 30, 0.0, &mut rng));
        let mut state = GameState::default();
        let mut player = player_at(pos);
        m.check_collisions(&mut state, &mut player, &mut SilentAudio);
        assert_eq!(player.health, 90);
        assert!(m.hostiles().is_empty());
        assert_eq!(state.score, 0);
    }

    #[test]
    fn test_three_shots_destroy_hostile() {
        let mut m = manager();
        let mut rng = SimRng::seed_from_u64(1);
        let pos = DVec2::new(600.0, 300.0);
        m.add_hostile(Hostile::new(pos, 1.0, 30, 0.0, &mut rng));
        let mut state = GameState::default();
        let mut player = player_at(DVec2::new(50.0, 50.0));
        let mut audio = AudioManager::new();

        for expected_left in [1, 1, 0] {
            m.add_player_projectile(shot(pos));
            m.check_collisions(&mut state, &mut player, &mut audio);
            assert_eq!(m.hostiles().len(), expected_left);
        }
        assert_eq!(state.score, 50);
        assert_eq!(audio.count(SoundEffect::HostileDown), 1);
        assert!(matches!(m.effects()[0], Effect::Ship(_)));
    }

    #[test]
    fn test_projectile_damages_only_one_hostile() {
        let mut m = manager();
        let mut rng = SimRng::seed_from_u64(1);
        let pos = DVec2::new(600.0, 300.0);
        m.add_hostile(Hostile::new(pos, 1.0, 30, 0.0, &mut rng));
        m.add_hostile(Hostile::new(pos, 1.0, 30, 0.0, &mut rng));
        m.add_player_projectile(shot(pos));
        m.check_collisions(
            &mut GameState::default(),
            &mut player_at(DVec2::new(50.0, 50.0)),
            &mut SilentAudio,
        );
        assert_eq!(m.hostiles()[0].health, 20);
        assert_eq!(m.hostiles()[1].health, 30);
    }

    #[test]
    fn test_hazard_contact_costs_life_and_respawns() {
        let mut m = manager();
        let mut rng = SimRng::seed_from_u64(1);
        let pos = DVec2::new(100.0, 100.0);
        m.add_hazard(Hazard::new(pos, 1.0, 40.0, 2, false, &mut rng));
        m.add_hazard(Hazard::new(pos, 1.0, 40.0, 2, false, &mut rng));
        let mut state = GameState::default();
        let mut player = player_at(pos);
        player.health = 40;
        m.check_collisions(&mut state, &mut player, &mut SilentAudio);

        assert_eq!(state.lives, 2);
        assert_eq!(m.hazards().len(), 1);
        assert_eq!(player.pos, DVec2::new(W / 2.0, H / 2.0));
        assert_eq!(player.health, 100);
        assert!(!player.is_vulnerable());
    }

    #[test]
    fn test_start_boss_stage_clears_field() {
        let mut m = manager();
        for _ in 0..5 {
            m.spawn_hazard();
            m.spawn_hostile();
        }
        m.add_player_projectile(shot(DVec2::new(10.0, 10.0)));
        m.start_boss_stage();

        assert!(m.is_boss_active());
        assert!(m.hazards().is_empty());
        assert!(m.hostiles().is_empty());
        assert!(m.player_projectiles().is_empty());
        let boss = m.boss().unwrap();
        assert_eq!(boss.health, 200);
        assert_eq!(boss.phase(), BossPhase::One);
    }

    #[test]
    fn test_start_boss_stage_is_idempotent() {
        let mut m = manager();
        m.start_boss_stage();
        m.boss_mut().unwrap().take_damage(90);
        m.start_boss_stage();
        m.set_boss_active(true);
        let boss = m.boss().unwrap();
        assert_eq!(boss.health, 110);
        assert_eq!(boss.phase(), BossPhase::Two);
    }

    #[test]
    fn test_spawning_suppressed_during_boss() {
        let mut m = manager();
        m.start_boss_stage();
        let mut surface = DrawList::new(W, H);
        for _ in 0..(60 * 12) {
            m.tick(&ctx(), &mut surface);
        }
        assert!(m.hazards().is_empty());
        assert!(m.hostiles().is_empty());
    }

    #[test]
    fn test_spawn_cadence() {
        let mut m = manager();
        let mut surface = DrawList::new(W, H);
        for _ in 0..61 {
            m.tick(&ctx(), &mut surface);
        }
        assert_eq!(m.hazards().len(), 3);
        assert!(m.hostiles().is_empty());
        for _ in 0..(60 * 4 + 9) {
            m.tick(&ctx(), &mut surface);
        }
        assert_eq!(m.hazards().len(), 15);
        assert_eq!(m.hostiles().len(), 1);
    }

    #[test]
    fn test_boss_defeat_ends_stage() {
        let mut m = manager();
        m.start_boss_stage();
        let boss_pos = m.boss().unwrap().pos;
        m.boss_mut().unwrap().health = 10;
        m.add_player_projectile(shot(boss_pos));
        m.add_player_projectile(shot(boss_pos));

        let mut state = GameState::default();
        let mut audio = AudioManager::new();
        m.check_collisions(&mut state, &mut player_at(DVec2::new(50.0, 550.0)), &mut audio);

        assert!(!m.is_boss_active());
        assert!(m.boss().is_none());
        assert_eq!(state.score, 100);
        assert_eq!(m.effects().len(), 1);
        assert_eq!(audio.count(SoundEffect::BossDefeated), 1);
        // Defeat stops the pass: the second projectile is untouched
        assert_eq!(m.player_projectiles().len(), 1);
    }

    #[test]
    fn test_boss_phase_advances_through_collisions() {
        let mut m = manager();
        m.start_boss_stage();
        let boss_pos = m.boss().unwrap().pos;
        let mut state = GameState::default();
        let mut player = player_at(DVec2::new(50.0, 550.0));
        for hit in 1..=8 {
            m.add_player_projectile(shot(boss_pos));
            m.check_collisions(&mut state, &mut player, &mut SilentAudio);
            let phase = m.boss().unwrap().phase();
            if hit < 8 {
                assert_eq!(phase, BossPhase::One);
            } else {
                assert_eq!(phase, BossPhase::Two);
            }
        }
    }

    #[test]
    fn test_lethal_boss_projectile_costs_life() {
        let mut m = manager();
        m.start_boss_stage();
        let pos = DVec2::new(400.0, 500.0);
        m.boss_mut()
            .unwrap()
            .projectiles
            .push(Projectile::new(pos, 0.0, ProjectileStyle::Boss, 20));
        let mut state = GameState::default();
        let mut player = player_at(pos);
        player.health = 20;
        m.check_collisions(&mut state, &mut player, &mut SilentAudio);

        assert_eq!(state.lives, 2);
        assert!(!state.game_over);
        assert_eq!(player.health, 100);
        assert!(m.boss().unwrap().projectiles.is_empty());
    }

    #[test]
    fn test_out_of_range_fire_chance_ticks_safely() {
        let tuning = Tuning::from_json(r#"{ "boss_fire_chance": 1.5 }"#).unwrap();
        let mut m = EntityManager::new(Bounds::new(W, H), tuning, 1.0, 42);
        m.start_boss_stage();
        let mut surface = DrawList::new(W, H);
        for _ in 0..30 {
            m.tick(&ctx(), &mut surface);
        }
        // Certain to fire every tick once clamped to 1
        assert!(!m.boss().unwrap().projectiles.is_empty());
    }

    #[test]
    fn test_set_boss_inactive_drops_boss() {
        let mut m = manager();
        m.set_boss_active(true);
        assert!(m.boss().is_some());
        m.set_boss_active(false);
        assert!(m.boss().is_none());
        assert!(!m.is_boss_active());
    }

    #[test]
    fn test_clear_all_empties_everything() {
        let mut m = manager();
        let mut rng = SimRng::seed_from_u64(1);
        let pos = DVec2::new(600.0, 400.0);
        m.add_hazard(Hazard::new(pos, 2.0, 60.0, 1, false, &mut rng));
        m.add_player_projectile(shot(pos));
        m.check_collisions(
            &mut GameState::default(),
            &mut player_at(DVec2::new(50.0, 50.0)),
            &mut SilentAudio,
        );
        m.spawn_hostile();
        m.hostile_projectiles
            .push(Projectile::new(pos, 0.0, ProjectileStyle::Hostile, 5));
        m.start_boss_stage();
        m.spawn_hazard();

        m.clear_all();
        assert!(m.hazards().is_empty());
        assert!(m.hostiles().is_empty());
        assert!(m.player_projectiles().is_empty());
        assert!(m.hostile_projectiles().is_empty());
        assert!(m.effects().is_empty());
        assert!(!m.is_boss_active());
    }

    #[test]
    fn test_drone_summon_respects_cooldown() {
        let mut m = manager();
        let mut surface = DrawList::new(W, H);
        assert!(m.can_summon_drone());
        assert!(m.summon_drone(DVec2::new(W / 2.0, H / 2.0)));
        assert!(!m.summon_drone(DVec2::new(W / 2.0, H / 2.0)));

        // Leaves after 5 s, but the summon cooldown runs 10 s
        for _ in 0..301 {
            m.tick(&ctx(), &mut surface);
        }
        assert!(m.drone().is_none());
        assert!(!m.can_summon_drone());
        assert!(m.drone_cooldown_remaining() > 4.0);

        for _ in 0..300 {
            m.tick(&ctx(), &mut surface);
        }
        assert!(m.can_summon_drone());
        assert!(m.summon_drone(DVec2::new(W / 2.0, H / 2.0)));
    }

    #[test]
    fn test_drone_volley_joins_player_projectiles() {
        let mut m = manager();
        let mut surface = DrawList::new(W, H);
        m.summon_drone(DVec2::new(W / 2.0, H / 2.0));

        m.tick(&ctx(), &mut surface);
        assert!(m.player_projectiles().is_empty());

        let firing = TickContext {
            firing: true,
            ..ctx()
        };
        m.tick(&firing, &mut surface);
        assert_eq!(m.player_projectiles().len(), crate::consts::DRONE_VOLLEY_SIZE);
        assert!(
            m.player_projectiles()
                .iter()
                .all(|p| p.style == ProjectileStyle::Drone && p.damage == 7)
        );

        // Cooldown holds the next volley back
        m.tick(&firing, &mut surface);
        assert_eq!(m.player_projectiles().len(), crate::consts::DRONE_VOLLEY_SIZE);
    }

    #[test]
    fn test_clear_all_dismisses_drone() {
        let mut m = manager();
        m.summon_drone(DVec2::new(W / 2.0, H / 2.0));
        m.clear_all();
        assert!(m.drone().is_none());
        assert!(m.can_summon_drone());
    }

    #[test]
    fn test_effects_retire() {
        let mut m = manager();
        let mut rng = SimRng::seed_from_u64(1);
        let pos = DVec2::new(600.0, 400.0);
        m.add_hazard(Hazard::new(pos, 2.0, 20.0, 3, false, &mut rng));
        m.add_player_projectile(shot(pos));
        m.check_collisions(
            &mut GameState::default(),
            &mut player_at(DVec2::new(50.0, 50.0)),
            &mut SilentAudio,
        );
        assert_eq!(m.effects().len(), 1);
        let mut surface = DrawList::new(W, H);
        for _ in 0..40 {
            m.tick(&ctx(), &mut surface);
        }
        assert!(m.effects().is_empty());
    }

    #[test]
    fn test_missing_sound_does_not_stop_resolution() {
        let mut m = manager();
        let mut rng = SimRng::seed_from_u64(1);
        let pos = DVec2::new(300.0, 300.0);
        m.add_hostile(Hostile::new(pos, 1.0, 30, 0.0, &mut rng));
        let mut audio = AudioManager::with_clips(Vec::<SoundEffect>::new());
        let mut player = player_at(pos);
        m.check_collisions(&mut GameState::default(), &mut player, &mut audio);
        assert_eq!(player.health, 90);
        assert!(audio.played.is_empty());
    }

    #[test]
    fn test_missing_sprites_fall_back_to_placeholders() {
        let mut m = manager();
        m.spawn_hazard();
        let mut surface = DrawList::with_atlas(W, H, Vec::<String>::new());
        m.tick(&ctx(), &mut surface);
        assert_eq!(surface.sprite_count(), 0);
        assert!(surface.circle_count() >= 1);
        assert!(surface.missing_sprites().count() >= 1);
    }

    #[test]
    fn test_unseeded_settings_use_default_seed() {
        let settings = Settings {
            arena_width: W,
            arena_height: H,
            ..Settings::default()
        };
        assert!(settings.seed.is_none());
        let mut from_settings = EntityManager::from_settings(&settings, Tuning::default());
        let mut seeded = EntityManager::new(Bounds::new(W, H), Tuning::default(), 1.0, DEFAULT_SEED);
        for m in [&mut from_settings, &mut seeded] {
            m.spawn_hazard();
            m.spawn_hostile();
        }
        assert_eq!(from_settings.hazards()[0].pos, seeded.hazards()[0].pos);
        assert_eq!(from_settings.hostiles()[0].pos, seeded.hostiles()[0].pos);
    }

    #[test]
    fn test_same_seed_same_run() {
        let run = || {
            let mut m = manager();
            let mut surface = DrawList::new(W, H);
            for _ in 0..(60 * 8) {
                surface.clear();
                m.tick(&ctx(), &mut surface);
            }
            let positions: Vec<DVec2> = m
                .hazards()
                .iter()
                .map(|h| h.pos)
                .chain(m.hostiles().iter().map(|h| h.pos))
                .collect();
            (positions, surface.commands)
        };
        let (a_pos, a_cmds) = run();
        let (b_pos, b_cmds) = run();
        assert!(!a_pos.is_empty());
        assert_eq!(a_pos, b_pos);
        assert_eq!(a_cmds, b_cmds);
    }
}
