//! Bounce Runner - a single-player traversal platformer
//!
//! Core modules:
//! - `sim`: Deterministic simulation (kinematics, collisions, session state)
//! - `levels`: Level data loading (text and JSON records, built-in levels)
//! - `settings`: Runtime configuration
//! - `view`: Render/HUD snapshot handed to the presentation layer

pub mod levels;
pub mod settings;
pub mod sim;
pub mod view;

pub use levels::{LevelError, LevelSet};
pub use settings::{Settings, SettingsError};
pub use view::FrameView;

/// Game configuration constants
///
/// Everything is derived from a 720-unit-tall viewport running at 60 ticks
/// per second. Level layouts are authored in meters, so these ratios must
/// stay fixed for the levels to remain traversable.
pub mod consts {
    /// Fixed simulation timestep (60 Hz)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Ticks per second
    pub const FRAMERATE: f32 = 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 4;

    /// Viewport dimensions (scene units)
    pub const SCREEN_WIDTH: f32 = 1280.0;
    pub const SCREEN_HEIGHT: f32 = 720.0;

    /// One meter in scene units
    pub const METER: f32 = SCREEN_HEIGHT / 72.0;

    /// Horizontal player speed (units/tick)
    pub const LEVELSPEED: f32 = METER;
    /// Launch speed for jumps and bounces (units/tick)
    pub const JUMP_VEL: f32 = 2.3 * METER;
    /// Per-tick gravity increment
    pub const GRAVITY: f32 = 10.0 * METER / FRAMERATE;
    /// Terminal fall velocity
    pub const MAX_Y_VELOCITY: f32 = JUMP_VEL * 2.0;
    /// Horizontal drag applied per tick when no direction is held
    pub const DRAG_STEP: f32 = 7.0;

    /// Player box (3m x 3m)
    pub const PLAYER_SIZE: f32 = 3.0 * METER;
    /// Bounce obstacle box (3m x 2m)
    pub const OBSTACLE_WIDTH: f32 = 3.0 * METER;
    pub const OBSTACLE_HEIGHT: f32 = 2.0 * METER;
    /// Goal box (4m x 4m)
    pub const GOAL_SIZE: f32 = 4.0 * METER;

    /// Patrol half-range of a bounce obstacle around its origin
    pub const OBSTACLE_RANGE: f32 = 12.0 * METER;
    /// Per-axis obstacle speed
    pub const OBSTACLE_SPEED: f32 = 0.5 * LEVELSPEED;

    /// Health lost per fall
    pub const FALL_DAMAGE: u32 = 1;
    /// Starting health
    pub const MAX_HEALTH: u32 = 1;
    /// Score lost per fall
    pub const FALL_PENALTY: i64 = 10;
    /// Score gained per goal
    pub const GOAL_REWARD: i64 = 100;

    /// Number of built-in levels
    pub const MAX_LEVELS: u32 = 4;

    /// Tolerance for "standing on" a surface after float snapping
    pub const CONTACT_EPSILON: f32 = 1e-3;
}

/// Convert a level-file meter coordinate to scene units.
///
/// Level files measure `y` upward from the bottom of the viewport.
#[inline]
pub fn meters_to_scene(x_m: f32, y_m: f32) -> glam::Vec2 {
    glam::Vec2::new(x_m * consts::METER, consts::SCREEN_HEIGHT - y_m * consts::METER)
}

#[cfg(test)]
mod tests {
    use super::consts::*;
    use super::meters_to_scene;

    #[test]
    fn test_physics_ratios() {
        assert_eq!(METER, 10.0);
        assert_eq!(LEVELSPEED, 10.0);
        assert!((JUMP_VEL - 23.0).abs() < 1e-4);
        assert!((GRAVITY - 100.0 / 60.0).abs() < 1e-4);
        assert!((MAX_Y_VELOCITY - 46.0).abs() < 1e-4);
        assert_eq!(OBSTACLE_SPEED, 5.0);
        assert_eq!(OBSTACLE_RANGE, 120.0);
    }

    #[test]
    fn test_meters_to_scene_flips_y() {
        let p = meters_to_scene(12.0, 12.0);
        assert_eq!(p.x, 120.0);
        assert_eq!(p.y, 600.0);
    }
}
