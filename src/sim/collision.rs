//! Axis-separated collision resolution
//!
//! The player controller calls `resolve` twice per tick: once after the
//! horizontal move with `(vx, 0)` and once after the vertical move with
//! `(0, vy)`. Resolving X fully before Y keeps corner contacts unambiguous.
//!
//! Each entity is first gated with the strict AABB test from `rect`; the
//! directional hit checks beneath that gate use inclusive comparisons.

use super::level::LevelLayout;
use super::player::Player;
use super::rect::{Collidable, Rect, overlaps};
use crate::consts::*;

/// What the player touched during one resolver pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Contacts {
    /// Stopped against the side of a platform
    pub blocked: bool,
    /// Fell onto a platform top
    pub landed: bool,
    /// Hit the underside of a platform while rising
    pub bumped_ceiling: bool,
    /// Launched by a bounce obstacle
    pub bounced: bool,
    /// Touched the goal
    pub reached_goal: bool,
}

impl Contacts {
    /// Combine two passes
    pub fn merge(self, other: Contacts) -> Contacts {
        Contacts {
            blocked: self.blocked || other.blocked,
            landed: self.landed || other.landed,
            bumped_ceiling: self.bumped_ceiling || other.bumped_ceiling,
            bounced: self.bounced || other.bounced,
            reached_goal: self.reached_goal || other.reached_goal,
        }
    }
}

/// Correct the player against platforms, then obstacles, then the goal.
///
/// Platforms are visited in layout order and each may overwrite the
/// correction made by an earlier one, so when two platforms overlap the
/// player at once the last one wins.
pub fn resolve(player: &mut Player, layout: &LevelLayout, xvel: f32, yvel: f32) -> Contacts {
    let mut contacts = Contacts::default();

    for platform in layout.platforms() {
        let block = platform.rect();
        if overlaps(&player.rect(), &block) {
            resolve_platform(player, &block, xvel, yvel, &mut contacts);
        } else if xvel == 0.0 && yvel == 0.0 {
            settle_on(player, &block);
        }
    }

    for obstacle in &layout.obstacles {
        let block = obstacle.rect();
        let rect = player.rect();
        if overlaps(&rect, &block) && yvel > 0.0 && rect.bottom() >= block.top() {
            player.vel.y = -JUMP_VEL;
            contacts.bounced = true;
        }
    }

    if overlaps(&player.rect(), &layout.goal().rect()) {
        player.reached_goal = true;
        contacts.reached_goal = true;
    }

    contacts
}

fn resolve_platform(
    player: &mut Player,
    block: &Rect,
    xvel: f32,
    yvel: f32,
    contacts: &mut Contacts,
) {
    // Moving right into the platform's left face
    if xvel > 0.0 && player.pos.x < block.left() && player.rect().right() >= block.left() {
        player.pos.x = block.left() - PLAYER_SIZE;
        contacts.blocked = true;
    }

    // Moving left into the platform's right face
    if xvel < 0.0 && player.rect().right() > block.right() && player.pos.x <= block.right() {
        player.pos.x = block.right();
        contacts.blocked = true;
    }

    // Falling onto the top
    if yvel > 0.0 && player.rect().spans_x(block) && player.rect().bottom() >= block.top() {
        player.pos.y = block.top() - PLAYER_SIZE;
        player.on_ground = true;
        player.vel.y = 0.0;
        contacts.landed = true;
    }

    // Rising into the underside
    if yvel < 0.0 && player.rect().spans_x(block) && player.pos.y <= block.bottom() {
        player.pos.y = block.bottom();
        contacts.bumped_ceiling = true;
    }

    edge_walk(player, block);
}

/// Re-apply a tick of gravity when a grounded player is no longer over
/// `block` horizontally.
fn edge_walk(player: &mut Player, block: &Rect) {
    if player.on_ground && (player.pos.x > block.right() || player.rect().right() < block.left()) {
        player.vel.y += GRAVITY;
    }
}

/// Resting contact: a player standing exactly on a platform top with no
/// vertical motion never passes the strict overlap gate, so it is
/// re-grounded here.
fn settle_on(player: &mut Player, block: &Rect) {
    let rect = player.rect();
    if rect.spans_x(block) && (rect.bottom() - block.top()).abs() <= CONTACT_EPSILON {
        player.pos.y = block.top() - PLAYER_SIZE;
        player.on_ground = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::obstacle::BouncePattern;
    use glam::Vec2;

    /// Floor at y=600 spanning x in [0, 400), a wall at x in [400, 440)
    /// reaching up to y=400, a bounce obstacle at (600, 500) and the goal
    /// far away.
    fn arena() -> LevelLayout {
        LevelLayout::new(
            Rect::new(0.0, 600.0, 400.0, 120.0),
            [
                Rect::new(400.0, 400.0, 40.0, 320.0),
                Rect::new(600.0, 200.0, 100.0, 20.0),
            ],
            [(Vec2::new(600.0, 500.0), BouncePattern::Stationary)],
            Vec2::new(1200.0, 100.0),
        )
    }

    fn player_at(x: f32, y: f32) -> Player {
        Player::new(Vec2::new(x, y))
    }

    #[test]
    fn test_landing_snaps_to_top() {
        let layout = arena();
        let mut player = player_at(100.0, 580.0); // bottom at 610, 10 into the floor
        player.vel.y = 12.0;

        let contacts = resolve(&mut player, &layout, 0.0, 12.0);
        assert!(contacts.landed);
        assert!(player.on_ground);
        assert_eq!(player.pos.y, 570.0);
        assert_eq!(player.vel.y, 0.0);
    }

    #[test]
    fn test_moving_right_stops_at_wall() {
        let layout = arena();
        let mut player = player_at(375.0, 500.0); // right edge at 405
        let contacts = resolve(&mut player, &layout, LEVELSPEED, 0.0);
        assert!(contacts.blocked);
        assert_eq!(player.pos.x, 370.0);
    }

    #[test]
    fn test_moving_left_stops_at_wall() {
        let layout = arena();
        let mut player = player_at(435.0, 500.0); // left edge inside the wall
        let contacts = resolve(&mut player, &layout, -LEVELSPEED, 0.0);
        assert!(contacts.blocked);
        assert_eq!(player.pos.x, 440.0);
    }

    #[test]
    fn test_moving_left_ignores_wall_to_the_right() {
        let layout = arena();
        // Overlaps the wall but the right edge is not past the wall's right face
        let mut player = player_at(395.0, 500.0);
        let contacts = resolve(&mut player, &layout, -LEVELSPEED, 0.0);
        assert!(!contacts.blocked);
        assert_eq!(player.pos.x, 395.0);
    }

    #[test]
    fn test_pad_on_platform_bounces_after_landing() {
        // Pad lying on the floor: the landing snap zeroes vy, then the pad
        // relaunches
        let layout = LevelLayout::new(
            Rect::new(0.0, 600.0, 400.0, 120.0),
            [],
            [(Vec2::new(200.0, 580.0), BouncePattern::Stationary)],
            Vec2::new(1200.0, 100.0),
        );
        let mut player = player_at(200.0, 575.0);
        player.vel.y = 5.0;

        let contacts = resolve(&mut player, &layout, 0.0, 5.0);
        assert!(contacts.landed);
        assert!(contacts.bounced);
        assert!(player.on_ground);
        assert_eq!(player.pos.y, 600.0 - PLAYER_SIZE);
        assert_eq!(player.vel.y, -JUMP_VEL);
    }

    #[test]
    fn test_ceiling_bump() {
        let layout = arena();
        // Top edge inside the ledge, whose underside is at 220
        let mut player = player_at(620.0, 210.0);
        player.vel.y = -JUMP_VEL;
        let contacts = resolve(&mut player, &layout, 0.0, -JUMP_VEL);
        assert!(contacts.bumped_ceiling);
        assert_eq!(player.pos.y, 220.0);
        // Velocity is left alone; gravity brings the player back down
        assert_eq!(player.vel.y, -JUMP_VEL);
    }

    #[test]
    fn test_bounce_from_above_launches() {
        let layout = arena();
        for incoming in [0.5, GRAVITY, 20.0, MAX_Y_VELOCITY] {
            let mut player = player_at(610.0, 475.0); // bottom at 505, obstacle top at 500
            player.vel.y = incoming;
            let contacts = resolve(&mut player, &layout, 0.0, incoming);
            assert!(contacts.bounced);
            assert_eq!(player.vel.y, -JUMP_VEL);
        }
    }

    #[test]
    fn test_bounce_ignores_side_and_below() {
        let layout = arena();

        let mut side = player_at(580.0, 500.0);
        let contacts = resolve(&mut side, &layout, LEVELSPEED, 0.0);
        assert!(!contacts.bounced);
        assert_eq!(side.vel.y, 0.0);

        let mut below = player_at(610.0, 510.0);
        below.vel.y = -10.0;
        let contacts = resolve(&mut below, &layout, 0.0, -10.0);
        assert!(!contacts.bounced);
        assert_eq!(below.vel.y, -10.0);
    }

    #[test]
    fn test_goal_contact_sets_flag_on_either_axis() {
        let layout = arena();
        let mut player = player_at(1190.0, 110.0);
        assert!(resolve(&mut player, &layout, 0.0, 0.0).reached_goal);
        assert!(player.reached_goal);

        let mut player = player_at(1190.0, 110.0);
        assert!(resolve(&mut player, &layout, LEVELSPEED, 0.0).reached_goal);
    }

    #[test]
    fn test_touching_goal_edge_is_not_reaching_it() {
        let layout = arena();
        let mut player = player_at(1170.0, 100.0); // right edge == goal left edge
        resolve(&mut player, &layout, 0.0, 0.0);
        assert!(!player.reached_goal);
    }

    #[test]
    fn test_resting_contact_regrounds() {
        let layout = arena();
        let mut player = player_at(100.0, 570.0);
        player.on_ground = false;
        let contacts = resolve(&mut player, &layout, 0.0, 0.0);
        assert!(player.on_ground);
        assert!(!contacts.landed);
        assert_eq!(player.pos.y, 570.0);
    }

    #[test]
    fn test_resting_contact_needs_horizontal_overlap() {
        let layout = arena();
        // Just past the floor's right end, standing height matches the floor top
        let mut player = player_at(440.0, 570.0);
        resolve(&mut player, &layout, 0.0, 0.0);
        assert!(!player.on_ground);
    }

    #[test]
    fn test_later_platform_wins_overlap() {
        // Two stacked floors overlapped while falling. The spawn floor snaps
        // the player to 570, which still overlaps the higher floor listed
        // second, and that one snaps again.
        let layout = LevelLayout::new(
            Rect::new(0.0, 600.0, 400.0, 40.0),
            [Rect::new(0.0, 590.0, 400.0, 40.0)],
            [],
            Vec2::new(1200.0, 100.0),
        );
        let mut player = player_at(100.0, 575.0); // bottom at 605
        resolve(&mut player, &layout, 0.0, 10.0);
        assert_eq!(player.pos.y, 560.0);
    }

    #[test]
    fn test_edge_walk_adds_gravity_when_off_platform() {
        let block = Rect::new(0.0, 600.0, 100.0, 40.0);
        let mut player = player_at(120.0, 570.0);
        player.on_ground = true;
        edge_walk(&mut player, &block);
        assert_eq!(player.vel.y, GRAVITY);

        let mut on_top = player_at(50.0, 570.0);
        on_top.on_ground = true;
        edge_walk(&mut on_top, &block);
        assert_eq!(on_top.vel.y, 0.0);
    }

    #[test]
    fn test_contacts_merge() {
        let a = Contacts {
            blocked: true,
            ..Default::default()
        };
        let b = Contacts {
            landed: true,
            ..Default::default()
        };
        let merged = a.merge(b);
        assert!(merged.blocked && merged.landed);
        assert!(!merged.bounced);
    }
}
