//! Brick grid loaded from a whitespace-separated level file
//!
//! Each line is a row, each integer a tile: 0 = empty, 1 = solid,
//! 2..=5 = destructible with a per-code color. The grid is stretched to
//! fill the level area, so every brick is `width / columns` by
//! `height / rows` pixels.

use std::fs;
use std::path::Path;

use glam::{Vec2, Vec3};

use super::state::{Body, Brick};
use crate::error::LevelError;

const SOLID_COLOR: Vec3 = Vec3::new(0.8, 0.8, 0.7);

/// Tint for a tile code, `None` for empty or unknown codes
pub fn tile_color(code: u8) -> Option<Vec3> {
    match code {
        1 => Some(SOLID_COLOR),
        2 => Some(Vec3::new(0.2, 0.6, 1.0)),
        3 => Some(Vec3::new(0.0, 0.7, 0.0)),
        4 => Some(Vec3::new(0.8, 0.8, 0.4)),
        5 => Some(Vec3::new(1.0, 0.5, 0.0)),
        _ => None,
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Level {
    bricks: Vec<Brick>,
    bricks_alive: usize,
}

impl Level {
    /// Parse a level grid and lay it out over a `width` x `height` area
    pub fn parse(source: &str, width: f32, height: f32) -> Result<Self, LevelError> {
        let mut rows: Vec<Vec<u8>> = Vec::new();
        for line in source.lines().filter(|l| !l.trim().is_empty()) {
            let row_index = rows.len();
            let mut row = Vec::new();
            for (column, token) in line.split_whitespace().enumerate() {
                let code: i64 = token.parse().map_err(|_| LevelError::Malformed {
                    row: row_index,
                    column,
                    token: token.to_string(),
                })?;
                if !(0..=5).contains(&code) {
                    return Err(LevelError::InvalidTile {
                        row: row_index,
                        column,
                        code,
                    });
                }
                row.push(code as u8);
            }
            if let Some(first) = rows.first() {
                if first.len() != row.len() {
                    return Err(LevelError::RaggedRow {
                        row: row_index,
                        expected: first.len(),
                        found: row.len(),
                    });
                }
            }
            rows.push(row);
        }

        Ok(Self::from_tiles(&rows, width, height))
    }

    /// Read a level file and lay it out over a `width` x `height` area
    pub fn load(path: impl AsRef<Path>, width: f32, height: f32) -> Result<Self, LevelError> {
        let path = path.as_ref();
        let source = fs::read_to_string(path).map_err(|source| LevelError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let level = Self::parse(&source, width, height)?;
        log::info!(
            "Loaded level {} ({} bricks, {} destructible)",
            path.display(),
            level.bricks.len(),
            level.bricks_alive
        );
        Ok(level)
    }

    fn from_tiles(rows: &[Vec<u8>], width: f32, height: f32) -> Self {
        let Some(columns) = rows.first().map(Vec::len).filter(|&c| c > 0) else {
            return Self::default();
        };
        let unit = Vec2::new(width / columns as f32, height / rows.len() as f32);

        let mut bricks = Vec::new();
        for (y, row) in rows.iter().enumerate() {
            for (x, &code) in row.iter().enumerate() {
                let Some(color) = tile_color(code) else {
                    continue;
                };
                let pos = Vec2::new(unit.x * x as f32, unit.y * y as f32);
                bricks.push(Brick {
                    body: Body::new(pos, unit).with_color(color),
                    code,
                    solid: code == 1,
                    destroyed: false,
                });
            }
        }

        let bricks_alive = bricks.iter().filter(|b| !b.solid).count();
        Self {
            bricks,
            bricks_alive,
        }
    }

    pub fn bricks(&self) -> &[Brick] {
        &self.bricks
    }

    /// Destructible bricks still standing
    pub fn bricks_alive(&self) -> usize {
        self.bricks_alive
    }

    pub fn is_completed(&self) -> bool {
        self.bricks_alive == 0
    }

    /// Mark a destructible brick destroyed.
    ///
    /// Panics if the brick is solid, already destroyed, or out of range.
    pub fn set_brick_destroyed(&mut self, index: usize) {
        assert!(self.bricks_alive > 0, "no destructible bricks left");
        let brick = &mut self.bricks[index];
        assert!(!brick.solid, "solid bricks cannot be destroyed");
        assert!(!brick.destroyed, "brick {index} destroyed twice");
        brick.destroyed = true;
        self.bricks_alive -= 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_parse_lays_out_grid() {
        let level = Level::parse("1 2\n0 0", 100.0, 100.0).unwrap();
        assert_eq!(level.bricks().len(), 2);

        let solid = &level.bricks()[0];
        assert!(solid.solid);
        assert_eq!(solid.body.pos, Vec2::ZERO);
        assert_eq!(solid.body.size, Vec2::new(50.0, 50.0));
        assert_eq!(solid.body.color, SOLID_COLOR);

        let brick = &level.bricks()[1];
        assert!(!brick.solid);
        assert_eq!(brick.body.pos, Vec2::new(50.0, 0.0));
        assert_eq!(brick.body.color, Vec3::new(0.2, 0.6, 1.0));

        assert_eq!(level.bricks_alive(), 1);
        assert!(!level.is_completed());
    }

    #[test]
    fn test_completion_tracks_destroyed_bricks() {
        let mut level = Level::parse("2 3 1", 300.0, 50.0).unwrap();
        assert_eq!(level.bricks_alive(), 2);

        level.set_brick_destroyed(0);
        assert!(!level.is_completed());
        level.set_brick_destroyed(1);
        assert!(level.is_completed());
        assert!(!level.bricks()[2].destroyed);
    }

    #[test]
    #[should_panic]
    fn test_destroying_solid_brick_panics() {
        let mut level = Level::parse("1 2", 100.0, 50.0).unwrap();
        level.set_brick_destroyed(0);
    }

    #[test]
    #[should_panic]
    fn test_destroying_twice_panics() {
        let mut level = Level::parse("2 2", 100.0, 50.0).unwrap();
        level.set_brick_destroyed(0);
        level.set_brick_destroyed(0);
    }

    #[test]
    fn test_empty_source_gives_empty_level() {
        let level = Level::parse("", 800.0, 300.0).unwrap();
        assert!(level.bricks().is_empty());
        assert!(level.is_completed());
    }

    #[test]
    fn test_rejects_bad_tiles() {
        assert!(matches!(
            Level::parse("1 x", 100.0, 100.0),
            Err(LevelError::Malformed { column: 1, .. })
        ));
        assert!(matches!(
            Level::parse("1 9", 100.0, 100.0),
            Err(LevelError::InvalidTile { code: 9, .. })
        ));
        assert!(matches!(
            Level::parse("1 2\n1", 100.0, 100.0),
            Err(LevelError::RaggedRow { row: 1, expected: 2, found: 1 })
        ));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "5 5 5 5").unwrap();
        writeln!(file, "0 1 1 0").unwrap();

        let level = Level::load(file.path(), 400.0, 100.0).unwrap();
        assert_eq!(level.bricks().len(), 6);
        assert_eq!(level.bricks_alive(), 4);
        assert_eq!(level.bricks()[5].body.pos, Vec2::new(200.0, 50.0));
    }

    #[test]
    fn test_load_missing_file() {
        let err = Level::load("does/not/exist.lvl", 100.0, 100.0).unwrap_err();
        assert!(matches!(err, LevelError::Io { .. }));
    }
}
