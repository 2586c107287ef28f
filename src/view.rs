//! Render/HUD snapshot
//!
//! The simulation never draws. Each frame the presentation layer takes a
//! `FrameView` and draws the boxes and HUD text it describes.

use serde::Serialize;

use crate::consts::{SCREEN_HEIGHT, SCREEN_WIDTH};
use crate::sim::{Collidable, Rect, Session};

/// What a box in the scene represents (maps to a draw colour)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewKind {
    Platform,
    Obstacle,
    Goal,
    Player,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ViewRect {
    pub kind: ViewKind,
    pub rect: Rect,
}

/// Everything the presentation layer needs for one frame
#[derive(Debug, Clone, Serialize)]
pub struct FrameView {
    pub tick: u64,
    /// Scene size; every rect is in these units
    pub width: f32,
    pub height: f32,
    /// Draw order: platforms, obstacles, goal, player last
    pub rects: Vec<ViewRect>,
    pub score: i64,
    pub health: u32,
    pub level: u32,
    pub max_levels: u32,
}

impl FrameView {
    pub fn capture(session: &Session) -> Self {
        let layout = &session.layout;
        let platforms = layout.platforms().iter().map(|p| ViewRect {
            kind: ViewKind::Platform,
            rect: p.rect(),
        });
        let obstacles = layout.obstacles.iter().map(|o| ViewRect {
            kind: ViewKind::Obstacle,
            rect: o.rect(),
        });
        let goal = ViewRect {
            kind: ViewKind::Goal,
            rect: layout.goal().rect(),
        };
        let player = ViewRect {
            kind: ViewKind::Player,
            rect: session.player.rect(),
        };

        Self {
            tick: session.time_ticks,
            width: SCREEN_WIDTH,
            height: SCREEN_HEIGHT,
            rects: platforms
                .chain(obstacles)
                .chain([goal, player])
                .collect(),
            score: session.score(),
            health: session.health(),
            level: session.level(),
            max_levels: session.max_levels(),
        }
    }

    /// The HUD line drawn at the top of the screen
    pub fn hud_text(&self) -> String {
        format!(
            "Score: {}    Health: {}    Level: {}/{}    A:Left  D:Right  SPACE:Jump",
            self.score, self.health, self.level, self.max_levels
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::levels::LevelSet;
    use crate::settings::Settings;

    fn session() -> Session {
        Session::new(LevelSet::builtin().unwrap(), Settings::default()).unwrap()
    }

    #[test]
    fn test_capture_lists_every_entity() {
        let session = session();
        let view = FrameView::capture(&session);

        let count = |kind: ViewKind| view.rects.iter().filter(|r| r.kind == kind).count();
        assert_eq!(count(ViewKind::Platform), session.layout.platforms().len());
        assert_eq!(count(ViewKind::Obstacle), session.layout.obstacles.len());
        assert_eq!(count(ViewKind::Goal), 1);
        assert_eq!(count(ViewKind::Player), 1);
        assert_eq!(view.rects.last().map(|r| r.kind), Some(ViewKind::Player));
    }

    #[test]
    fn test_hud_text() {
        let mut session = session();
        session.player.score = -10;
        let view = FrameView::capture(&session);
        let hud = view.hud_text();
        assert!(hud.starts_with("Score: -10"));
        assert!(hud.contains("Level: 1/4"));
        assert!(hud.contains("Health: 1"));
    }

    #[test]
    fn test_serializes_to_json() {
        let view = FrameView::capture(&session());
        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(json["level"], 1);
        assert_eq!(json["width"], 1280.0);
        assert_eq!(json["height"], 720.0);
        assert_eq!(json["rects"][0]["kind"], "platform");
        assert!(json["rects"][0]["rect"]["w"].as_f64().unwrap() > 0.0);
    }
}
