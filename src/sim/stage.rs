//! Stage director: level clock and boss trigger
//!
//! Sits beside the entity manager and decides when the run moves on. Levels
//! advance on a fixed time limit outside boss stages; a boss stage starts
//! whenever the score reaches the next trigger threshold.

use super::manager::EntityManager;
use super::state::GameState;

/// Something the shell may want to react to (music, banners)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StageEvent {
    LevelUp(u32),
    BossStage,
}

#[derive(Debug, Clone)]
pub struct StageDirector {
    /// Seconds into the current level
    level_time: f64,
    level_time_limit: f64,
    next_boss_score: u32,
    boss_score_step: u32,
}

impl StageDirector {
    pub fn new(level_time_limit: f64, boss_trigger_score: u32) -> Self {
        Self {
            level_time: 0.0,
            level_time_limit,
            next_boss_score: boss_trigger_score,
            boss_score_step: boss_trigger_score.max(1),
        }
    }

    pub fn from_manager(manager: &EntityManager) -> Self {
        let tuning = manager.tuning();
        Self::new(tuning.level_time_limit, tuning.boss_trigger_score)
    }

    pub fn next_boss_score(&self) -> u32 {
        self.next_boss_score
    }

    pub fn level_time(&self) -> f64 {
        self.level_time
    }

    /// Advance the level clock by `dt` and start stages that are due
    pub fn update(
        &mut self,
        dt: f64,
        state: &mut GameState,
        manager: &mut EntityManager,
    ) -> Option<StageEvent> {
        if state.game_over {
            return None;
        }

        if !manager.is_boss_active() && state.score >= self.next_boss_score {
            let step = self.boss_score_step;
            self.next_boss_score = (state.score / step).saturating_add(1).saturating_mul(step);
            manager.start_boss_stage();
            return Some(StageEvent::BossStage);
        }

        // The level clock stands still while the boss is up
        if manager.is_boss_active() {
            return None;
        }
        self.level_time += dt;
        if self.level_time >= self.level_time_limit {
            self.level_time = 0.0;
            state.next_level();
            manager.clear_hostiles();
            return Some(StageEvent::LevelUp(state.level));
        }
        None
    }
}
