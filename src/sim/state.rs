//! Session state: the active level, the player and level progression
//!
//! One `Session` owns everything the simulation mutates. There is no global
//! state; the tick driver and the presentation layer both work through it.

use serde::{Deserialize, Serialize};

use super::level::LevelLayout;
use super::player::Player;
use crate::consts::*;
use crate::levels::{LevelError, LevelSet};
use crate::settings::Settings;

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionPhase {
    /// Simulating the given level (1-based)
    Playing(u32),
    /// Quit was requested; ticks are ignored
    Stopped(u32),
}

/// Something notable that happened during a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// Fell onto a platform
    Landed,
    /// Launched by a bounce obstacle
    Bounced,
    /// Dropped off the bottom of the screen and respawned
    FellOffscreen { health: u32, score: i64 },
    /// Goal reached; `wrapped` is set when the run restarted at level 1
    LevelComplete { from: u32, to: u32, wrapped: bool },
    /// Quit signal handled
    Stopped,
}

/// A play session
#[derive(Debug, Clone)]
pub struct Session {
    pub phase: SessionPhase,
    /// Geometry of the active level
    pub layout: LevelLayout,
    pub player: Player,
    pub settings: Settings,
    /// Simulation tick counter
    pub time_ticks: u64,
    levels: LevelSet,
}

impl Session {
    /// Start a session at `settings.start_level`
    pub fn new(levels: LevelSet, settings: Settings) -> Result<Self, LevelError> {
        let level = settings.start_level;
        let layout = levels.layout(level)?;
        let player = Player::new(layout.spawn_point());

        log::info!("Session started at level {}/{}", level, levels.len());

        Ok(Self {
            phase: SessionPhase::Playing(level),
            layout,
            player,
            settings,
            time_ticks: 0,
            levels,
        })
    }

    /// Current level (1-based)
    pub fn level(&self) -> u32 {
        match self.phase {
            SessionPhase::Playing(level) | SessionPhase::Stopped(level) => level,
        }
    }

    pub fn max_levels(&self) -> u32 {
        self.levels.len()
    }

    pub fn score(&self) -> i64 {
        self.player.score
    }

    pub fn health(&self) -> u32 {
        self.player.health
    }

    pub fn is_running(&self) -> bool {
        matches!(self.phase, SessionPhase::Playing(_))
    }

    /// Stop accepting ticks
    pub fn stop(&mut self) {
        self.phase = SessionPhase::Stopped(self.level());
    }

    /// Move to the next level (wrapping after the last) and reward the player.
    ///
    /// Score and health carry over; the player is placed on the new level's
    /// spawn platform.
    pub fn advance_level(&mut self) -> Result<GameEvent, LevelError> {
        let from = self.level();
        let to = self.levels.next_index(from);
        let wrapped = to <= from;

        self.layout = self.levels.layout(to)?;
        self.phase = SessionPhase::Playing(to);

        self.player.set_spawn(self.layout.spawn_point());
        self.player.respawn();
        self.player.score += GOAL_REWARD;
        self.player.reached_goal = false;

        if wrapped {
            log::info!(
                "Level {} complete, run wraps to level {} (score {})",
                from,
                to,
                self.player.score
            );
        } else {
            log::info!(
                "Level {} complete, entering level {} (score {})",
                from,
                to,
                self.player.score
            );
        }

        Ok(GameEvent::LevelComplete { from, to, wrapped })
    }
}
