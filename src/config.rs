use std::path::{Path, PathBuf};
use std::time::Duration;

use bevy::math::Vec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

use crate::core::{Projection, TileMetrics, MOVE_TWEEN};

pub const DEFAULT_CONFIG_PATH: &str = "floodgate.json";
pub const CONFIG_PATH_ENV: &str = "FLOODGATE_CONFIG";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed config {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Game constants. Every field falls back to its default when missing from
/// the config file.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub tile_width: f32,
    pub tile_height: f32,
    pub city_origin: [f32; 2],
    pub projection: Projection,
    pub barricades: u32,
    pub build_seconds: f32,
    pub move_tween_ms: u64,
    pub level_index: usize,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            tile_width: 40.0,
            tile_height: 40.0,
            city_origin: [220.0, 180.0],
            projection: Projection::Isometric,
            barricades: 3,
            build_seconds: 6.0,
            move_tween_ms: MOVE_TWEEN.as_millis() as u64,
            level_index: 0,
        }
    }
}

impl GameConfig {
    pub fn from_json_str(json: &str, path: &Path) -> Result<GameConfig, ConfigError> {
        let config: GameConfig = serde_json::from_str(json).map_err(|source| ConfigError::Json {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<GameConfig, ConfigError> {
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        GameConfig::from_json_str(&json, path)
    }

    /// Loads from `$FLOODGATE_CONFIG`, then `floodgate.json`, and falls back
    /// to defaults when neither file exists.
    pub fn discover() -> Result<GameConfig, ConfigError> {
        let path = std::env::var_os(CONFIG_PATH_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH));
        if !path.exists() {
            debug!(path = %path.display(), "no config file, using defaults");
            return Ok(GameConfig::default());
        }
        let config = GameConfig::load(&path)?;
        info!(path = %path.display(), "loaded config");
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.tile_width > 0.0 && self.tile_height > 0.0) {
            return Err(ConfigError::Invalid("tile dimensions must be positive".into()));
        }
        if !(self.build_seconds.is_finite() && self.build_seconds > 0.0) {
            return Err(ConfigError::Invalid("build_seconds must be positive".into()));
        }
        if Duration::try_from_secs_f32(self.build_seconds).is_err() {
            return Err(ConfigError::Invalid("build_seconds is too large".into()));
        }
        Ok(())
    }

    pub fn metrics(&self) -> TileMetrics {
        TileMetrics {
            tile_width: self.tile_width,
            tile_height: self.tile_height,
            origin: Vec2::from(self.city_origin),
            projection: self.projection,
        }
    }

    /// Unvalidated values saturate instead of panicking.
    pub fn build_time(&self) -> Duration {
        Duration::try_from_secs_f32(self.build_seconds.max(0.0)).unwrap_or(Duration::MAX)
    }

    pub fn move_tween(&self) -> Duration {
        Duration::from_millis(self.move_tween_ms)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_missing_fields_use_defaults() {
        let config = GameConfig::from_json_str(r#"{ "barricades": 5 }"#, Path::new("test.json")).unwrap();
        assert_eq!(config.barricades, 5);
        assert_eq!(config.tile_width, 40.0);
        assert_eq!(config.build_time(), Duration::from_secs(6));
        assert_eq!(config.move_tween(), Duration::from_millis(200));
    }

    #[test]
    fn test_projection_is_snake_case() {
        let config = GameConfig::from_json_str(r#"{ "projection": "flat" }"#, Path::new("test.json")).unwrap();
        assert_eq!(config.projection, Projection::Flat);
    }

    #[test]
    fn test_rejects_non_positive_build_time() {
        let err = GameConfig::from_json_str(r#"{ "build_seconds": 0 }"#, Path::new("test.json")).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_rejects_build_time_beyond_duration_range() {
        let err = GameConfig::from_json_str(r#"{ "build_seconds": 1e30 }"#, Path::new("test.json")).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));

        let unchecked = GameConfig { build_seconds: 1e30, ..GameConfig::default() };
        assert_eq!(unchecked.build_time(), Duration::MAX);
    }

    #[test]
    fn test_reports_malformed_json_with_path() {
        let err = GameConfig::from_json_str("{ nope", Path::new("broken.json")).unwrap_err();
        assert!(err.to_string().contains("broken.json"));
    }
}
