//! Bounce obstacles and their patrol motion
//!
//! Obstacles move back and forth inside a fixed window around their origin.
//! Motion has no randomness: the position is a pure function of the pattern,
//! the origin and the tick count.

use glam::Vec2;
use serde::Serialize;

use super::rect::{Collidable, Rect};
use crate::consts::*;

/// Movement pattern of a bounce obstacle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BouncePattern {
    #[default]
    Stationary,
    Horizontal,
    Vertical,
    /// Moves along `/` (right and up)
    DiagonalUp,
    /// Moves along `\` (right and down)
    DiagonalDown,
}

impl BouncePattern {
    /// Decode the level-file pattern code (0..=4)
    pub fn from_code(code: i64) -> Option<Self> {
        match code {
            0 => Some(BouncePattern::Stationary),
            1 => Some(BouncePattern::Horizontal),
            2 => Some(BouncePattern::Vertical),
            3 => Some(BouncePattern::DiagonalUp),
            4 => Some(BouncePattern::DiagonalDown),
            _ => None,
        }
    }

    /// Starting velocity for this pattern
    pub fn initial_velocity(&self) -> Vec2 {
        let s = OBSTACLE_SPEED;
        match self {
            BouncePattern::Stationary => Vec2::ZERO,
            BouncePattern::Horizontal => Vec2::new(s, 0.0),
            BouncePattern::Vertical => Vec2::new(0.0, s),
            BouncePattern::DiagonalUp => Vec2::new(s, -s),
            BouncePattern::DiagonalDown => Vec2::new(s, s),
        }
    }
}

/// A non-solid box that launches the player upward when landed on
#[derive(Debug, Clone, Serialize)]
pub struct BounceObstacle {
    pub pos: Vec2,
    pub origin: Vec2,
    pub vel: Vec2,
    pub pattern: BouncePattern,
}

impl BounceObstacle {
    pub fn new(origin: Vec2, pattern: BouncePattern) -> Self {
        Self {
            pos: origin,
            origin,
            vel: pattern.initial_velocity(),
            pattern,
        }
    }

    /// Advance one tick of patrol motion
    pub fn update(&mut self) {
        if self.pattern == BouncePattern::Stationary {
            return;
        }

        self.pos += self.vel;

        // Axes are reversed independently
        if let Some(bound) = crossed_bound(self.pos.x, self.origin.x) {
            self.pos.x = bound;
            self.vel.x = -self.vel.x;
        }
        if let Some(bound) = crossed_bound(self.pos.y, self.origin.y) {
            self.pos.y = bound;
            self.vel.y = -self.vel.y;
        }
    }
}

/// Returns the bound that `value` went past, if any
fn crossed_bound(value: f32, origin: f32) -> Option<f32> {
    let (lo, hi) = (origin - OBSTACLE_RANGE, origin + OBSTACLE_RANGE);
    if value > hi {
        Some(hi)
    } else if value < lo {
        Some(lo)
    } else {
        None
    }
}

impl Collidable for BounceObstacle {
    fn rect(&self) -> Rect {
        Rect::at(self.pos, OBSTACLE_WIDTH, OBSTACLE_HEIGHT)
    }
}
