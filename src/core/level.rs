use std::path::{Path, PathBuf};

use bevy::math::IVec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::bounded_grid::BoundedGrid;
use crate::core::bounds::BoundsOriginRoot;
use crate::core::models::Terrain;

#[derive(Debug, Error)]
pub enum LevelError {
    #[error("failed to read level file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed level json: {0}")]
    Json(#[from] serde_json::Error),
    #[error("level has no cells")]
    Empty,
    #[error("column {column} has {found} cells, expected {expected}")]
    Ragged {
        column: usize,
        expected: usize,
        found: usize,
    },
    #[error("unknown terrain value {value} at {x},{y}")]
    UnknownTerrain { x: usize, y: usize, value: u8 },
    #[error("level {index} requested but the file only has {available}")]
    NoSuchLevel { index: usize, available: usize },
    #[error("dozer start {x},{y} is not on a street")]
    DozerOffStreet { x: i32, y: i32 },
}

/// One entry of a levels file: either the bare column array or an object
/// that also names where the dozer starts.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(untagged)]
pub enum LevelEntry {
    Columns(Vec<Vec<u8>>),
    Described {
        terrain: Vec<Vec<u8>>,
        #[serde(default)]
        dozer: Option<[i32; 2]>,
    },
}

/// The authoritative terrain of a level, indexed by x then y.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Level {
    terrain: BoundedGrid<Terrain>,
    dozer: Option<IVec2>,
}

impl Level {
    pub fn new_filled(width: i32, height: i32, terrain: Terrain) -> Level {
        Level {
            terrain: BoundedGrid::new(BoundsOriginRoot::new(width, height), terrain),
            dozer: None,
        }
    }

    /// Builds a level from `columns[x][y]` terrain codes.
    pub fn from_columns(columns: &[Vec<u8>]) -> Result<Level, LevelError> {
        let width = columns.len();
        let height = columns.first().map(Vec::len).unwrap_or(0);
        if width == 0 || height == 0 {
            return Err(LevelError::Empty);
        }

        let mut level = Level::new_filled(width as i32, height as i32, Terrain::Building);
        for (x, column) in columns.iter().enumerate() {
            if column.len() != height {
                return Err(LevelError::Ragged {
                    column: x,
                    expected: height,
                    found: column.len(),
                });
            }
            for (y, &value) in column.iter().enumerate() {
                let terrain = Terrain::try_from(value)
                    .map_err(|value| LevelError::UnknownTerrain { x, y, value })?;
                level.set(&IVec2::new(x as i32, y as i32), terrain);
            }
        }
        Ok(level)
    }

    pub fn from_entry(entry: &LevelEntry) -> Result<Level, LevelError> {
        match entry {
            LevelEntry::Columns(columns) => Level::from_columns(columns),
            LevelEntry::Described { terrain, dozer } => {
                let level = Level::from_columns(terrain)?;
                match dozer {
                    Some([x, y]) => level.with_dozer(IVec2::new(*x, *y)),
                    None => Ok(level),
                }
            }
        }
    }

    /// Parses a levels file and picks the level at `index`.
    pub fn from_json_str(json: &str, index: usize) -> Result<Level, LevelError> {
        let entries: Vec<LevelEntry> = serde_json::from_str(json)?;
        let entry = entries.get(index).ok_or(LevelError::NoSuchLevel {
            index,
            available: entries.len(),
        })?;
        Level::from_entry(entry)
    }

    pub fn load(path: &Path, index: usize) -> Result<Level, LevelError> {
        let json = std::fs::read_to_string(path).map_err(|source| LevelError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Level::from_json_str(&json, index)
    }

    pub fn with_dozer(mut self, start: IVec2) -> Result<Level, LevelError> {
        if !self.get(&start).is_some_and(Terrain::has_street) {
            return Err(LevelError::DozerOffStreet { x: start.x, y: start.y });
        }
        self.dozer = Some(start);
        Ok(self)
    }

    pub fn dozer_start(&self) -> Option<IVec2> {
        self.dozer
    }

    pub fn bounds(&self) -> BoundsOriginRoot {
        self.terrain.size()
    }

    pub fn width(&self) -> i32 {
        self.bounds().width()
    }

    pub fn height(&self) -> i32 {
        self.bounds().height()
    }

    pub fn get(&self, pos: &IVec2) -> Option<Terrain> {
        self.terrain.get(pos).copied()
    }

    pub fn set(&mut self, pos: &IVec2, terrain: Terrain) -> bool {
        self.terrain.set(pos, terrain)
    }

    pub fn iter(&self) -> impl Iterator<Item = (IVec2, Terrain)> {
        self.terrain.iter().map(|(pos, &terrain)| (pos, terrain))
    }

    pub fn to_columns(&self) -> Vec<Vec<u8>> {
        (0..self.width())
            .map(|x| {
                (0..self.height())
                    .map(|y| self.terrain[&IVec2::new(x, y)].code())
                    .collect()
            })
            .collect()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_columns_are_indexed_x_then_y() {
        let level = Level::from_columns(&[vec![0, 1, 2], vec![3, 1, 0]]).unwrap();
        assert_eq!(level.width(), 2);
        assert_eq!(level.height(), 3);
        assert_eq!(level.get(&IVec2::new(0, 2)), Some(Terrain::Barricade));
        assert_eq!(level.get(&IVec2::new(1, 0)), Some(Terrain::WaterBorder));
        assert_eq!(level.get(&IVec2::new(2, 0)), None);
        assert_eq!(level.to_columns(), vec![vec![0, 1, 2], vec![3, 1, 0]]);
    }

    #[test]
    fn test_rejects_ragged_columns() {
        let err = Level::from_columns(&[vec![1, 1], vec![1]]).unwrap_err();
        assert!(matches!(err, LevelError::Ragged { column: 1, expected: 2, found: 1 }));
    }

    #[test]
    fn test_rejects_unknown_terrain() {
        let err = Level::from_columns(&[vec![1, 7]]).unwrap_err();
        assert!(matches!(err, LevelError::UnknownTerrain { x: 0, y: 1, value: 7 }));
    }

    #[test]
    fn test_rejects_empty() {
        assert!(matches!(Level::from_columns(&[]), Err(LevelError::Empty)));
        assert!(matches!(Level::from_columns(&[vec![]]), Err(LevelError::Empty)));
    }

    #[test]
    fn test_json_accepts_bare_and_described_levels() {
        let json = r#"[
            [[1, 1], [1, 0]],
            { "terrain": [[1, 1], [1, 0]], "dozer": [0, 1] }
        ]"#;
        let bare = Level::from_json_str(json, 0).unwrap();
        assert_eq!(bare.dozer_start(), None);

        let described = Level::from_json_str(json, 1).unwrap();
        assert_eq!(described.dozer_start(), Some(IVec2::new(0, 1)));
        assert_eq!(bare.bounds(), described.bounds());
    }

    #[test]
    fn test_json_level_index_out_of_range() {
        let err = Level::from_json_str("[[[1]]]", 3).unwrap_err();
        assert!(matches!(err, LevelError::NoSuchLevel { index: 3, available: 1 }));
    }

    #[test]
    fn test_dozer_must_start_on_street() {
        let json = r#"[{ "terrain": [[1, 0]], "dozer": [0, 1] }]"#;
        let err = Level::from_json_str(json, 0).unwrap_err();
        assert!(matches!(err, LevelError::DozerOffStreet { x: 0, y: 1 }));
    }

    #[test]
    fn test_malformed_json_is_reported() {
        assert!(matches!(Level::from_json_str("{", 0), Err(LevelError::Json(_))));
    }
}
