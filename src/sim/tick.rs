//! Fixed timestep simulation tick
//!
//! Core game loop step: advances obstacles, the player and level
//! progression by exactly one frame.

use super::player::Controls;
use super::state::{GameEvent, Session};
use crate::levels::LevelError;

/// Input for a single tick (held-key snapshot plus out-of-band signals)
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    pub move_left: bool,
    pub move_right: bool,
    pub jump: bool,
    /// Complete the current level immediately (debug)
    pub force_reach_goal: bool,
    /// Stop the session
    pub quit: bool,
}

impl TickInput {
    pub fn controls(&self) -> Controls {
        Controls {
            left: self.move_left,
            right: self.move_right,
            jump: self.jump,
        }
    }
}

/// Advance the session by one fixed timestep.
///
/// Only a level that fails to load on transition produces an error; the
/// built-in and directory level sets are validated up front, so in practice
/// this does not happen.
pub fn tick(session: &mut Session, input: &TickInput) -> Result<Vec<GameEvent>, LevelError> {
    let mut events = Vec::new();

    if !session.is_running() {
        return Ok(events);
    }

    if input.quit {
        log::info!("Quit at level {} after {} ticks", session.level(), session.time_ticks);
        session.stop();
        events.push(GameEvent::Stopped);
        return Ok(events);
    }

    if input.force_reach_goal {
        session.player.reached_goal = true;
    }

    session.layout.update();

    let step = session
        .player
        .update(input.controls(), &session.layout, session.settings.air_jump);

    if step.contacts.landed {
        log::debug!("Landed at ({:.1}, {:.1})", session.player.pos.x, session.player.pos.y);
        events.push(GameEvent::Landed);
    }
    if step.contacts.bounced {
        log::debug!("Bounced at ({:.1}, {:.1})", session.player.pos.x, session.player.pos.y);
        events.push(GameEvent::Bounced);
    }
    if step.fell {
        log::warn!(
            "Fell off level {} (health {}, score {})",
            session.level(),
            session.player.health,
            session.player.score
        );
        events.push(GameEvent::FellOffscreen {
            health: session.player.health,
            score: session.player.score,
        });
    }

    if session.player.reached_goal {
        events.push(session.advance_level()?);
    }

    session.time_ticks += 1;
    Ok(events)
}
