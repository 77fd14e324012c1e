//! Audio feedback hooks
//!
//! The simulation never mixes sound itself. It asks an [`AudioSink`] to play a
//! named effect and carries on whether or not the clip exists.

use std::collections::HashSet;

use crate::error::AssetError;
use crate::settings::Settings;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoundEffect {
    /// Player ship takes a hit
    Hit,
    /// Player ship destroyed / lethal hit
    Explode,
    /// Player fires
    Laser,
    /// Hostile ship destroyed
    HostileDown,
    /// Boss takes a hit
    BossHit,
    /// Boss stage begins
    BossStage,
    /// Boss defeated
    BossDefeated,
    /// Game over
    GameOver,
}

impl SoundEffect {
    pub const ALL: [SoundEffect; 8] = [
        SoundEffect::Hit,
        SoundEffect::Explode,
        SoundEffect::Laser,
        SoundEffect::HostileDown,
        SoundEffect::BossHit,
        SoundEffect::BossStage,
        SoundEffect::BossDefeated,
        SoundEffect::GameOver,
    ];

    /// Clip file name expected by the asset loader
    pub fn clip_name(&self) -> &'static str {
        match self {
            SoundEffect::Hit => "hit.wav",
            SoundEffect::Explode => "explode.wav",
            SoundEffect::Laser => "laser.wav",
            SoundEffect::HostileDown => "enemy_down.wav",
            SoundEffect::BossHit => "boss_hit.wav",
            SoundEffect::BossStage => "boss.mp3",
            SoundEffect::BossDefeated => "boss_down.wav",
            SoundEffect::GameOver => "game_over.wav",
        }
    }
}

/// Feedback hook the simulation calls into
pub trait AudioSink {
    fn play(&mut self, effect: SoundEffect) -> Result<(), AssetError>;
}

/// Sink that accepts everything and plays nothing
#[derive(Debug, Default, Clone, Copy)]
pub struct SilentAudio;

impl AudioSink for SilentAudio {
    fn play(&mut self, _effect: SoundEffect) -> Result<(), AssetError> {
        Ok(())
    }
}

/// Headless audio manager: tracks which clips are loaded, applies volume and
/// records what would have been played.
#[derive(Debug, Clone)]
pub struct AudioManager {
    loaded: HashSet<SoundEffect>,
    master_volume: f32,
    sfx_volume: f32,
    muted: bool,
    /// Effects played so far with the volume they were played at
    pub played: Vec<(SoundEffect, f32)>,
}

impl Default for AudioManager {
    fn default() -> Self {
        Self::new()
    }
}

impl AudioManager {
    /// Manager with every clip loaded
    pub fn new() -> Self {
        Self::with_clips(SoundEffect::ALL)
    }

    /// Manager with only the given clips loaded
    pub fn with_clips(clips: impl IntoIterator<Item = SoundEffect>) -> Self {
        Self {
            loaded: clips.into_iter().collect(),
            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,
            played: Vec::new(),
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        let mut audio = Self::new();
        audio.set_master_volume(settings.master_volume);
        audio.set_sfx_volume(settings.sfx_volume);
        audio.set_muted(settings.muted);
        audio
    }

    /// Set master volume (0.0 - 1.0)
    pub fn set_master_volume(&mut self, vol: f32) {
        self.master_volume = vol.clamp(0.0, 1.0);
    }

    /// Set SFX volume (0.0 - 1.0)
    pub fn set_sfx_volume(&mut self, vol: f32) {
        self.sfx_volume = vol.clamp(0.0, 1.0);
    }

    /// Mute/unmute all audio
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.sfx_volume
        }
    }

    /// Number of times an effect has been played
    pub fn count(&self, effect: SoundEffect) -> usize {
        self.played.iter().filter(|(e, _)| *e == effect).count()
    }
}

impl AudioSink for AudioManager {
    fn play(&mut self, effect: SoundEffect) -> Result<(), AssetError> {
        if !self.loaded.contains(&effect) {
            return Err(AssetError::MissingSound(effect));
        }
        let volume = self.effective_volume();
        if volume > 0.0 {
            self.played.push((effect, volume));
        }
        Ok(())
    }
}
