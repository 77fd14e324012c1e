//! Run-level game state
//!
//! Score, lives and level live here rather than in the entity manager. The
//! manager only ever pushes changes into it; it never reads the game-over flag
//! back to alter its own collision logic.

use serde::{Deserialize, Serialize};

/// Score, lives, level and the game-over flag for one run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    pub score: u32,
    pub lives: u32,
    /// 1-based
    pub level: u32,
    pub game_over: bool,
    starting_lives: u32,
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(3)
    }
}

impl GameState {
    pub fn new(starting_lives: u32) -> Self {
        Self {
            score: 0,
            lives: starting_lives,
            level: 1,
            game_over: false,
            starting_lives,
        }
    }

    pub fn add_score(&mut self, points: u32) {
        self.score = self.score.saturating_add(points);
    }

    /// Lose one life; the run ends when none are left
    pub fn lose_life(&mut self) {
        self.lives = self.lives.saturating_sub(1);
        if self.lives == 0 {
            self.set_game_over();
        }
    }

    pub fn set_game_over(&mut self) {
        if !self.game_over {
            log::info!("Game over (score {}, level {})", self.score, self.level);
        }
        self.game_over = true;
    }

    pub fn next_level(&mut self) {
        self.level += 1;
        log::info!("Advanced to level {}", self.level);
    }

    /// Fresh run with the same starting lives
    pub fn reset(&mut self) {
        *self = Self::new(self.starting_lives);
    }
}
