//! Player kinematic controller
//!
//! Integrates held-key input into velocity and position, applies gravity
//! and drag, and hands each axis to the collision resolver in turn.

use glam::Vec2;
use serde::Serialize;

use super::collision::{Contacts, resolve};
use super::level::LevelLayout;
use super::rect::{Collidable, Rect};
use crate::consts::*;

/// Held-key snapshot for one tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Controls {
    pub left: bool,
    pub right: bool,
    pub jump: bool,
}

/// Result of one controller update
#[derive(Debug, Clone, Copy, Default)]
pub struct PlayerStep {
    /// Contacts from both resolver passes
    pub contacts: Contacts,
    /// The player dropped below the viewport and was respawned
    pub fell: bool,
}

/// The player-controlled entity
#[derive(Debug, Clone, Serialize)]
pub struct Player {
    pub pos: Vec2,
    pub vel: Vec2,
    pub on_ground: bool,
    pub health: u32,
    pub score: i64,
    /// One-shot flag consumed by the session after each tick
    pub reached_goal: bool,
    /// Respawn position for the current level
    spawn: Vec2,
}

impl Player {
    pub fn new(spawn: Vec2) -> Self {
        Self {
            pos: spawn,
            vel: Vec2::ZERO,
            on_ground: false,
            health: MAX_HEALTH,
            score: 0,
            reached_goal: false,
            spawn,
        }
    }

    pub fn spawn(&self) -> Vec2 {
        self.spawn
    }

    /// Record a new respawn position (used on level entry)
    pub fn set_spawn(&mut self, spawn: Vec2) {
        self.spawn = spawn;
    }

    /// Advance the player one tick against `layout`.
    ///
    /// `air_jump` lets a held jump relaunch the player every tick, grounded
    /// or not.
    pub fn update(
        &mut self,
        controls: Controls,
        layout: &LevelLayout,
        air_jump: bool,
    ) -> PlayerStep {
        if controls.left {
            self.vel.x = -LEVELSPEED;
        } else if controls.right {
            self.vel.x = LEVELSPEED;
        } else {
            self.apply_drag();
        }

        if controls.jump && self.on_ground {
            self.vel.y = -JUMP_VEL;
            self.on_ground = false;
        }

        if !self.on_ground {
            self.vel.y = (self.vel.y + GRAVITY).min(MAX_Y_VELOCITY);
        }

        if air_jump && controls.jump {
            self.vel.y = -JUMP_VEL;
        }

        let vx = self.vel.x;
        self.pos.x += vx;
        let horizontal = resolve(self, layout, vx, 0.0);

        let vy = self.vel.y;
        self.pos.y += vy;
        self.on_ground = false;
        let vertical = resolve(self, layout, 0.0, vy);

        let fell = self.pos.y > SCREEN_HEIGHT;
        if fell {
            self.damage();
        }

        PlayerStep {
            contacts: horizontal.merge(vertical),
            fell,
        }
    }

    /// Step horizontal speed toward zero without overshooting
    fn apply_drag(&mut self) {
        if self.vel.x > 0.0 {
            self.vel.x = (self.vel.x - DRAG_STEP).max(0.0);
        } else if self.vel.x < 0.0 {
            self.vel.x = (self.vel.x + DRAG_STEP).min(0.0);
        }
    }

    /// Fall damage: lose health (never below zero) and points, then respawn
    pub fn damage(&mut self) {
        self.health = self.health.saturating_sub(FALL_DAMAGE);
        self.score -= FALL_PENALTY;
        self.respawn();
    }

    /// Return to the recorded spawn. Horizontal velocity is kept.
    pub fn respawn(&mut self) {
        self.pos = self.spawn;
        self.vel.y = 0.0;
    }
}

impl Collidable for Player {
    fn rect(&self) -> Rect {
        Rect::at(self.pos, PLAYER_SIZE, PLAYER_SIZE)
    }
}
