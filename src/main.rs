//! Astro Arena headless driver
//!
//! Runs the simulation on a fixed timestep with a scripted pilot, recording
//! draw calls instead of rasterizing them, and logs a summary of the run.
//!
//! Usage: `astro-arena [--quality low|medium|high] [--print-settings]
//! [settings.json] [seconds] [tuning.json]`

use std::path::PathBuf;

use astro_arena::audio::{AudioManager, AudioSink, SoundEffect};
use astro_arena::consts::*;
use astro_arena::renderer::DrawList;
use astro_arena::sim::{
    Entity, EntityManager, GameState, PlayerInput, PlayerShip, StageDirector, StageEvent,
    TickContext,
};
use astro_arena::{QualityPreset, Settings, Tuning, angle_to, normalize_angle};

/// Host frame time; the simulation substeps inside it
const HOST_FRAME: f64 = 1.0 / 30.0;

/// Headless game instance holding all state
struct Game {
    manager: EntityManager,
    director: StageDirector,
    state: GameState,
    player: PlayerShip,
    audio: AudioManager,
    surface: DrawList,
    accumulator: f64,
    ticks: u64,
    boss_stages: u32,
}

impl Game {
    fn new(settings: &Settings, tuning: Tuning) -> Self {
        let manager = EntityManager::from_settings(settings, tuning);
        let tuning = manager.tuning();
        let state = GameState::new(tuning.starting_lives);
        let player = PlayerShip::centered(&manager.bounds(), tuning.player_fire_cooldown);
        Self {
            director: StageDirector::from_manager(&manager),
            state,
            player,
            audio: AudioManager::from_settings(settings),
            surface: DrawList::new(settings.arena_width, settings.arena_height),
            manager,
            accumulator: 0.0,
            ticks: 0,
            boss_stages: 0,
        }
    }

    /// Run simulation ticks for one host frame
    fn update(&mut self, dt: f64) {
        let dt = dt.min(0.1);
        self.accumulator += dt;

        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            self.step();
            self.accumulator -= SIM_DT;
            substeps += 1;
        }
    }

    fn step(&mut self) {
        self.surface.clear();

        let input = pilot(&self.player, &self.manager);
        if input.summon_drone {
            self.manager.summon_drone(self.player.pos);
        }
        self.player.apply_input(&input);
        if input.fire {
            if let Some(shot) = self.player.try_fire(self.manager.clock()) {
                self.manager.add_player_projectile(shot);
                play(&mut self.audio, SoundEffect::Laser);
            }
        }
        self.player.update(&self.manager.bounds(), SIM_DT);

        let ctx = TickContext {
            dt: SIM_DT,
            target: self.player.pos,
            firing: input.fire,
        };
        self.manager.tick(&ctx, &mut self.surface);
        self.player.render(&mut self.surface);

        self.manager
            .check_collisions(&mut self.state, &mut self.player, &mut self.audio);

        match self
            .director
            .update(SIM_DT, &mut self.state, &mut self.manager)
        {
            Some(StageEvent::BossStage) => {
                self.boss_stages += 1;
                play(&mut self.audio, SoundEffect::BossStage);
            }
            Some(StageEvent::LevelUp(level)) => log::info!("Level {level}"),
            None => {}
        }

        self.ticks += 1;
    }
}

fn play(audio: &mut AudioManager, effect: SoundEffect) {
    if let Err(err) = audio.play(effect) {
        log::warn!("{err}");
    }
}

/// Turn toward the nearest threat, fire when lined up, close in when far
fn pilot(player: &PlayerShip, manager: &EntityManager) -> PlayerInput {
    let threats = manager
        .hazards()
        .iter()
        .map(|h| h.pos)
        .chain(manager.hostiles().iter().map(|h| h.pos))
        .chain(manager.boss().map(|b| b.pos));
    let nearest = threats.min_by(|a, b| {
        a.distance_squared(player.pos)
            .total_cmp(&b.distance_squared(player.pos))
    });
    let Some(nearest) = nearest else {
        return PlayerInput::default();
    };

    let turn = normalize_angle(angle_to(player.pos, nearest) - player.angle);
    let crowded = manager.is_boss_active() || manager.hostiles().len() >= 2;
    PlayerInput {
        thrust: player.pos.distance(nearest) > 350.0,
        rotate_left: turn < -PLAYER_TURN_RATE,
        rotate_right: turn > PLAYER_TURN_RATE,
        fire: turn.abs() < 0.2,
        summon_drone: crowded && manager.can_summon_drone(),
    }
}

struct Args {
    settings_path: PathBuf,
    seconds: f64,
    tuning_path: PathBuf,
    quality: Option<QualityPreset>,
    print_settings: bool,
}

fn parse_args() -> Args {
    let mut positional = Vec::new();
    let mut quality = None;
    let mut print_settings = false;

    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--quality" => {
                let value = args.next().unwrap_or_default();
                quality = QualityPreset::parse(&value);
                if quality.is_none() {
                    log::warn!("Unknown quality preset {value:?}, keeping the settings file value");
                }
            }
            "--print-settings" => print_settings = true,
            _ => positional.push(arg),
        }
    }

    let mut positional = positional.into_iter();
    Args {
        settings_path: PathBuf::from(positional.next().unwrap_or_else(|| "settings.json".into())),
        seconds: positional
            .next()
            .and_then(|s| s.parse().ok())
            .unwrap_or(120.0),
        tuning_path: PathBuf::from(positional.next().unwrap_or_else(|| "tuning.json".into())),
        quality,
        print_settings,
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = parse_args();
    let seconds = args.seconds;
    let mut settings = Settings::load(&args.settings_path);
    if let Some(quality) = args.quality {
        settings.quality = quality;
    }
    if args.print_settings {
        match settings.to_json() {
            Ok(json) => println!("{json}"),
            Err(e) => log::warn!("Could not serialize settings: {e}"),
        }
    }
    let tuning = Tuning::load(&args.tuning_path);
    log::info!("Astro Arena (headless) starting, {seconds:.0}s of play");

    let mut game = Game::new(&settings, tuning);
    let frames = (seconds / HOST_FRAME).ceil() as u64;
    for _ in 0..frames {
        game.update(HOST_FRAME);
        if game.state.game_over {
            play(&mut game.audio, SoundEffect::GameOver);
            break;
        }
    }

    log::info!(
        "Finished after {} ticks ({:.1}s): score {}, lives {}, level {}, boss stages {}",
        game.ticks,
        game.manager.clock(),
        game.state.score,
        game.state.lives,
        game.state.level,
        game.boss_stages
    );
    log::info!(
        "Last frame: {} draw calls, {} live effects, boss active: {}",
        game.surface.commands.len(),
        game.manager.effects().len(),
        game.manager.is_boss_active()
    );
    log::info!(
        "Sounds played: {}, drone ready: {}",
        game.audio.played.len(),
        game.manager.can_summon_drone()
    );
    let missing: Vec<&str> = game.surface.missing_sprites().collect();
    if !missing.is_empty() {
        log::warn!("Missing sprites: {}", missing.join(", "));
    }
}
