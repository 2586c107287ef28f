//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - No randomness
//! - Stable iteration order (layout insertion order)
//! - No rendering or platform dependencies

pub mod collision;
pub mod level;
pub mod obstacle;
pub mod player;
pub mod rect;
pub mod state;
pub mod tick;

pub use collision::{Contacts, resolve};
pub use level::{BlockKind, LevelLayout, StaticBlock};
pub use obstacle::{BounceObstacle, BouncePattern};
pub use player::{Controls, Player, PlayerStep};
pub use rect::{Collidable, Rect, overlaps};
pub use state::{GameEvent, Session, SessionPhase};
pub use tick::{TickInput, tick};
