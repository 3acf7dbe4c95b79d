//! Application settings: the game profile plus round settings, stored as JSON.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::game::GameConfig;
use crate::modes::RoundConfig;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub game: GameConfig,
    pub round: RoundConfig,
}

impl AppConfig {
    /// Load and validate settings from a JSON file
    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {:?}", path))?;
        let config: AppConfig = serde_json::from_str(&json)
            .with_context(|| format!("Failed to parse config {:?}", path))?;
        config.validate()?;
        Ok(config)
    }

    /// Write settings as pretty JSON, creating parent directories if needed
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {:?}", parent))?;
        }

        let json = serde_json::to_string_pretty(self).context("Failed to serialize config")?;
        std::fs::write(path, json).with_context(|| format!("Failed to write config to {:?}", path))
    }

    pub fn validate(&self) -> Result<()> {
        self.game.validate().context("Invalid game settings")?;
        self.round.validate().context("Invalid round settings")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::BoundaryPolicy;
    use crate::modes::Speed;
    use tempfile::TempDir;

    #[test]
    fn test_save_and_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("snake.json");

        let config = AppConfig {
            game: GameConfig::classic().with_grid_size(12),
            round: RoundConfig {
                speed: Speed::Rocket,
                duration_secs: 90,
            },
        };
        config.save(&path).unwrap();

        assert_eq!(AppConfig::load(&path).unwrap(), config);
    }

    #[test]
    fn test_load_partial_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("snake.json");
        std::fs::write(&path, r#"{ "game": { "boundary": "walled" } }"#).unwrap();

        let config = AppConfig::load(&path).unwrap();
        assert_eq!(config.game.boundary, BoundaryPolicy::Walled);
        assert_eq!(config.game.grid_size, 16);
        assert_eq!(config.round, RoundConfig::default());
    }

    #[test]
    fn test_load_rejects_invalid_settings() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("snake.json");
        std::fs::write(&path, r#"{ "round": { "duration_secs": 0 } }"#).unwrap();

        assert!(AppConfig::load(&path).is_err());
    }

    #[test]
    fn test_load_missing_file() {
        let dir = TempDir::new().unwrap();
        let err = AppConfig::load(&dir.path().join("absent.json")).unwrap_err();
        assert!(err.to_string().contains("Failed to read config"));
    }
}
