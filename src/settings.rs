//! Game settings and preferences
//!
//! Stored as a small JSON file next to the binary. Only preferences live
//! here; scores are never written to disk.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::sim::Difficulty;

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Music volume relative to master (0.0 - 1.0)
    pub music_volume: f32,
    pub muted: bool,

    // === Gameplay ===
    /// Tier used until the player picks one (and by the tutorial hand-off)
    pub default_difficulty: Difficulty,
    /// Fixed RNG seed for reproducible runs; None derives one from the clock
    pub seed: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            // Audio
            master_volume: 0.8,
            music_volume: 1.0,
            muted: false,

            // Gameplay
            default_difficulty: Difficulty::Medium,
            seed: None,
        }
    }
}

impl Settings {
    /// Default file name
    pub const FILE_NAME: &'static str = "rain_catcher_settings.json";

    /// Clamp volumes into range
    pub fn sanitized(mut self) -> Self {
        self.master_volume = self.master_volume.clamp(0.0, 1.0);
        self.music_volume = self.music_volume.clamp(0.0, 1.0);
        self
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let json = fs::read_to_string(path)?;
        let settings: Settings = serde_json::from_str(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings.sanitized())
    }

    /// Load settings, falling back to defaults on any failure
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load_from(path) {
            Ok(settings) => settings,
            Err(err) => {
                if path.exists() {
                    log::warn!("Ignoring settings at {}: {}", path.display(), err);
                } else {
                    log::info!("Using default settings");
                }
                Self::default()
            }
        }
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        log::info!("Settings saved to {}", path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GameError;

    fn temp_path(name: &str) -> std::path::PathBuf {
        std::env::temp_dir().join(format!("rain_catcher_{}_{}.json", name, std::process::id()))
    }

    #[test]
    fn test_round_trip() {
        let path = temp_path("round_trip");
        let settings = Settings {
            master_volume: 0.3,
            default_difficulty: Difficulty::Hard,
            seed: Some(42),
            ..Default::default()
        };
        settings.save_to(&path).unwrap();
        let loaded = Settings::load_from(&path).unwrap();
        let _ = fs::remove_file(&path);
        assert_eq!(loaded, settings);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let settings: Settings = serde_json::from_str(r#"{"master_volume": 4.0}"#).unwrap();
        let settings = settings.sanitized();
        assert_eq!(settings.master_volume, 1.0);
        assert_eq!(settings.default_difficulty, Difficulty::Medium);
        assert_eq!(settings.seed, None);
    }

    #[test]
    fn test_malformed_file_falls_back() {
        let path = temp_path("malformed");
        fs::write(&path, "{ not json").unwrap();
        assert!(matches!(
            Settings::load_from(&path),
            Err(GameError::Settings(_))
        ));
        assert_eq!(Settings::load_or_default(&path), Settings::default());
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_missing_file() {
        let path = temp_path("missing");
        assert!(matches!(Settings::load_from(&path), Err(GameError::Io(_))));
        assert_eq!(Settings::load_or_default(&path), Settings::default());
    }
}
