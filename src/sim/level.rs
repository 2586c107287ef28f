//! Level layout: platforms, bounce obstacles and the goal
//!
//! A layout is built once per level entry. Its geometry never changes; only
//! obstacle motion state advances each tick.

use glam::Vec2;
use serde::Serialize;

use super::obstacle::{BounceObstacle, BouncePattern};
use super::rect::{Collidable, Rect};
use crate::consts::*;

/// Static block types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum BlockKind {
    /// Solid; can be stood on, walked into and bumped from below
    Platform,
    /// Trigger region; touching it completes the level
    Goal,
}

/// An immutable rectangle in the level
#[derive(Debug, Clone, Serialize)]
pub struct StaticBlock {
    pub kind: BlockKind,
    pub rect: Rect,
}

impl StaticBlock {
    pub fn platform(rect: Rect) -> Self {
        Self {
            kind: BlockKind::Platform,
            rect,
        }
    }

    /// Goal box with its top-left corner at `pos`
    pub fn goal(pos: Vec2) -> Self {
        Self {
            kind: BlockKind::Goal,
            rect: Rect::at(pos, GOAL_SIZE, GOAL_SIZE),
        }
    }
}

impl Collidable for StaticBlock {
    fn rect(&self) -> Rect {
        self.rect
    }
}

/// Geometry for one level
#[derive(Debug, Clone, Serialize)]
pub struct LevelLayout {
    /// Solid platforms in resolution order; the spawn platform is always first
    platforms: Vec<StaticBlock>,
    /// Bounce obstacles in resolution order
    pub obstacles: Vec<BounceObstacle>,
    goal: StaticBlock,
}

/// Index of the spawn platform in `LevelLayout::platforms`
const SPAWN_INDEX: usize = 0;

impl LevelLayout {
    /// Build a layout. `spawn` is placed ahead of every other platform.
    pub fn new(
        spawn: Rect,
        platforms: impl IntoIterator<Item = Rect>,
        obstacles: impl IntoIterator<Item = (Vec2, BouncePattern)>,
        goal: Vec2,
    ) -> Self {
        let platforms = std::iter::once(spawn)
            .chain(platforms)
            .map(StaticBlock::platform)
            .collect();
        let obstacles = obstacles
            .into_iter()
            .map(|(origin, pattern)| BounceObstacle::new(origin, pattern))
            .collect();

        Self {
            platforms,
            obstacles,
            goal: StaticBlock::goal(goal),
        }
    }

    pub fn platforms(&self) -> &[StaticBlock] {
        &self.platforms
    }

    pub fn spawn_platform(&self) -> &StaticBlock {
        &self.platforms[SPAWN_INDEX]
    }

    pub fn goal(&self) -> &StaticBlock {
        &self.goal
    }

    /// Where the player appears: on top of the spawn platform's left end
    pub fn spawn_point(&self) -> Vec2 {
        let spawn = self.spawn_platform().rect;
        Vec2::new(spawn.left(), spawn.top() - PLAYER_SIZE)
    }

    /// Advance obstacle motion by one tick
    pub fn update(&mut self) {
        for obstacle in &mut self.obstacles {
            obstacle.update();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_layout() -> LevelLayout {
        LevelLayout::new(
            Rect::new(120.0, 600.0, 400.0, 120.0),
            [Rect::new(600.0, 500.0, 200.0, 40.0)],
            [
                (Vec2::new(900.0, 400.0), BouncePattern::Horizontal),
                (Vec2::new(1000.0, 300.0), BouncePattern::Stationary),
            ],
            Vec2::new(1200.0, 200.0),
        )
    }

    #[test]
    fn test_spawn_platform_is_first() {
        let layout = sample_layout();
        assert_eq!(layout.platforms().len(), 2);
        assert_eq!(layout.spawn_platform().rect.x, 120.0);
        assert_eq!(layout.platforms()[1].rect.x, 600.0);
        assert!(layout.platforms().iter().all(|p| p.kind == BlockKind::Platform));
    }

    #[test]
    fn test_spawn_point_sits_on_spawn_platform() {
        let layout = sample_layout();
        let spawn = layout.spawn_point();
        assert_eq!(spawn, Vec2::new(120.0, 600.0 - PLAYER_SIZE));
    }

    #[test]
    fn test_goal_is_four_meters_square() {
        let layout = sample_layout();
        let goal = layout.goal();
        assert_eq!(goal.kind, BlockKind::Goal);
        assert_eq!(goal.rect.w, 40.0);
        assert_eq!(goal.rect.h, 40.0);
    }

    #[test]
    fn test_update_moves_only_patrolling_obstacles() {
        let mut layout = sample_layout();
        layout.update();
        assert_eq!(layout.obstacles[0].pos, Vec2::new(905.0, 400.0));
        assert_eq!(layout.obstacles[1].pos, Vec2::new(1000.0, 300.0));
    }

    #[test]
    fn test_bare_layout_still_has_spawn_and_goal() {
        let layout = LevelLayout::new(
            Rect::new(0.0, 600.0, 50.0, 10.0),
            [],
            [],
            Vec2::new(300.0, 300.0),
        );
        assert_eq!(layout.platforms().len(), 1);
        assert_eq!(layout.spawn_platform().rect.w, 50.0);
        assert_eq!(layout.spawn_point(), Vec2::new(0.0, 600.0 - PLAYER_SIZE));
        assert_eq!(layout.goal().rect.left(), 300.0);
    }

    #[test]
    fn test_layout_serializes_for_traces() {
        let json = serde_json::to_value(sample_layout()).unwrap();
        assert_eq!(json["platforms"][0]["kind"], "Platform");
        assert_eq!(json["platforms"][0]["rect"]["w"], 400.0);
        assert_eq!(json["obstacles"][0]["pattern"], "horizontal");
        assert_eq!(json["goal"]["rect"]["h"], 40.0);
    }
}
