//! Recoverable asset errors
//!
//! Nothing here halts the simulation: callers degrade to a placeholder draw or
//! a silent frame and log the condition.

use core::fmt;

use crate::audio::SoundEffect;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AssetError {
    /// A named sprite is not present in the loaded atlas
    MissingSprite(String),
    /// A sound effect has no loaded clip
    MissingSound(SoundEffect),
}

impl fmt::Display for AssetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingSprite(name) => write!(f, "sprite not found: {name}"),
            Self::MissingSound(effect) => write!(f, "sound not loaded: {effect:?}"),
        }
    }
}

impl std::error::Error for AssetError {}
