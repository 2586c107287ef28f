//! Level data loading
//!
//! Levels are lists of typed records in meters, with `y` measured up from
//! the bottom of the viewport. Two encodings are accepted:
//!
//! - Text, one record per line: `0 x y w h` spawn platform, `1 x y w h`
//!   platform, `2 x y pattern` bounce obstacle, `3 x y` goal. Blank lines and
//!   `#` comments are skipped.
//! - JSON: `{"records": [{"kind": "spawn", "x": 12, "y": 12, "w": 40, "h": 12}, ...]}`
//!
//! Every level is validated when it is loaded; the simulation only ever sees
//! a complete `LevelLayout`.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;
use crate::meters_to_scene;
use crate::sim::{BouncePattern, LevelLayout, Rect};

/// Errors raised while loading level data
#[derive(Debug, Error)]
pub enum LevelError {
    #[error("level has no spawn platform")]
    MissingSpawn,

    #[error("level has more than one spawn platform")]
    DuplicateSpawn,

    #[error("level has no goal")]
    MissingGoal,

    #[error("level has more than one goal")]
    DuplicateGoal,

    #[error("line {line}: unknown record tag {tag}")]
    UnknownRecord { line: usize, tag: i64 },

    #[error("line {line}: {reason}")]
    Malformed { line: usize, reason: String },

    #[error("unknown bounce pattern {0} (expected 0-4)")]
    UnknownPattern(i64),

    #[error("block size must be positive, got {w}x{h}")]
    NonPositiveSize { w: f32, h: f32 },

    #[error("no level {0}")]
    NoSuchLevel(u32),

    #[error("no levels found in {0}")]
    EmptySet(PathBuf),

    #[error("level {index}: {source}")]
    InLevel {
        index: u32,
        #[source]
        source: Box<LevelError>,
    },

    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid level json: {0}")]
    Json(#[from] serde_json::Error),
}

/// One typed entry of a level description (meters, y up from the bottom)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LevelRecord {
    Spawn { x: f32, y: f32, w: f32, h: f32 },
    Platform { x: f32, y: f32, w: f32, h: f32 },
    Bounce { x: f32, y: f32, pattern: i64 },
    Goal { x: f32, y: f32 },
}

/// JSON envelope for a level
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LevelDescription {
    pub records: Vec<LevelRecord>,
}

/// Parse the line-oriented text format
pub fn parse_text(src: &str) -> Result<Vec<LevelRecord>, LevelError> {
    let mut records = Vec::new();

    for (i, raw) in src.lines().enumerate() {
        let line = i + 1;
        let text = raw.trim();
        if text.is_empty() || text.starts_with('#') {
            continue;
        }

        let values = text
            .split_whitespace()
            .map(|tok| {
                tok.parse::<i64>().map_err(|_| LevelError::Malformed {
                    line,
                    reason: format!("expected an integer, got {tok:?}"),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let (tag, args) = match values.split_first() {
            Some((tag, args)) => (*tag, args),
            None => continue,
        };

        let expected = match tag {
            0 | 1 => 4,
            2 => 3,
            3 => 2,
            _ => return Err(LevelError::UnknownRecord { line, tag }),
        };
        if args.len() != expected {
            return Err(LevelError::Malformed {
                line,
                reason: format!("record {tag} takes {expected} values, got {}", args.len()),
            });
        }

        let f = |n: usize| args[n] as f32;
        records.push(match tag {
            0 => LevelRecord::Spawn {
                x: f(0),
                y: f(1),
                w: f(2),
                h: f(3),
            },
            1 => LevelRecord::Platform {
                x: f(0),
                y: f(1),
                w: f(2),
                h: f(3),
            },
            2 => LevelRecord::Bounce {
                x: f(0),
                y: f(1),
                pattern: args[2],
            },
            _ => LevelRecord::Goal { x: f(0), y: f(1) },
        });
    }

    Ok(records)
}

/// Parse the JSON format
pub fn parse_json(src: &str) -> Result<Vec<LevelRecord>, LevelError> {
    let description: LevelDescription = serde_json::from_str(src)?;
    Ok(description.records)
}

fn block_rect(x: f32, y: f32, w: f32, h: f32) -> Result<Rect, LevelError> {
    if !(w > 0.0 && h > 0.0) {
        return Err(LevelError::NonPositiveSize { w, h });
    }
    let top_left = meters_to_scene(x, y);
    Ok(Rect::new(top_left.x, top_left.y, w * METER, h * METER))
}

/// Validate records and convert them to a scene-unit layout
pub fn build_layout(records: &[LevelRecord]) -> Result<LevelLayout, LevelError> {
    let mut spawn = None;
    let mut goal = None;
    let mut platforms = Vec::new();
    let mut obstacles = Vec::new();

    for record in records {
        match *record {
            LevelRecord::Spawn { x, y, w, h } => {
                if spawn.is_some() {
                    return Err(LevelError::DuplicateSpawn);
                }
                spawn = Some(block_rect(x, y, w, h)?);
            }
            LevelRecord::Platform { x, y, w, h } => platforms.push(block_rect(x, y, w, h)?),
            LevelRecord::Bounce { x, y, pattern } => {
                let pattern =
                    BouncePattern::from_code(pattern).ok_or(LevelError::UnknownPattern(pattern))?;
                obstacles.push((meters_to_scene(x, y), pattern));
            }
            LevelRecord::Goal { x, y } => {
                if goal.is_some() {
                    return Err(LevelError::DuplicateGoal);
                }
                goal = Some(meters_to_scene(x, y));
            }
        }
    }

    let spawn = spawn.ok_or(LevelError::MissingSpawn)?;
    let goal = goal.ok_or(LevelError::MissingGoal)?;
    Ok(LevelLayout::new(spawn, platforms, obstacles, goal))
}

/// Load a single level file, picking the format from its extension
pub fn load_file(path: &Path) -> Result<LevelLayout, LevelError> {
    let src = fs::read_to_string(path).map_err(|source| LevelError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let records = match path.extension().and_then(|e| e.to_str()) {
        Some("json") => parse_json(&src)?,
        _ => parse_text(&src)?,
    };
    build_layout(&records)
}

const BUILTIN: [&str; MAX_LEVELS as usize] = [
    include_str!("level_1.txt"),
    include_str!("level_2.txt"),
    include_str!("level_3.txt"),
    include_str!("level_4.txt"),
];

/// Validated, pristine layouts for every level of a run (1-based indexes)
#[derive(Debug, Clone)]
pub struct LevelSet {
    layouts: Vec<LevelLayout>,
}

impl LevelSet {
    /// The levels compiled into the binary
    pub fn builtin() -> Result<Self, LevelError> {
        let layouts = BUILTIN
            .iter()
            .zip(1..)
            .map(|(src, index)| {
                parse_text(src)
                    .and_then(|records| build_layout(&records))
                    .map_err(|e| in_level(index, e))
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { layouts })
    }

    /// Load `Level_1.txt`, `Level_2.txt`, ... (or `.json`) from `dir`,
    /// stopping at the first missing index.
    pub fn from_dir(dir: &Path) -> Result<Self, LevelError> {
        let mut layouts = Vec::new();

        for index in 1u32.. {
            let Some(path) = level_path(dir, index) else {
                break;
            };
            log::debug!("Loading level {} from {}", index, path.display());
            layouts.push(load_file(&path).map_err(|e| in_level(index, e))?);
        }

        if layouts.is_empty() {
            return Err(LevelError::EmptySet(dir.to_path_buf()));
        }
        log::info!("Loaded {} levels from {}", layouts.len(), dir.display());
        Ok(Self { layouts })
    }

    /// Wrap already-built layouts. At least one is required.
    pub fn from_layouts(layouts: Vec<LevelLayout>) -> Option<Self> {
        if layouts.is_empty() {
            None
        } else {
            Some(Self { layouts })
        }
    }

    /// Number of levels before the run wraps back to level 1
    pub fn len(&self) -> u32 {
        self.layouts.len() as u32
    }

    pub fn is_empty(&self) -> bool {
        self.layouts.is_empty()
    }

    /// A fresh copy of level `index`
    pub fn layout(&self, index: u32) -> Result<LevelLayout, LevelError> {
        index
            .checked_sub(1)
            .and_then(|i| self.layouts.get(i as usize))
            .cloned()
            .ok_or(LevelError::NoSuchLevel(index))
    }

    /// The level after `index`, wrapping past the last one
    pub fn next_index(&self, index: u32) -> u32 {
        index % self.len() + 1
    }
}

fn level_path(dir: &Path, index: u32) -> Option<PathBuf> {
    ["txt", "json"]
        .iter()
        .map(|ext| dir.join(format!("Level_{index}.{ext}")))
        .find(|p| p.is_file())
}

fn in_level(index: u32, source: LevelError) -> LevelError {
    LevelError::InLevel {
        index,
        source: Box::new(source),
    }
}
