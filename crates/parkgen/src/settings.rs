//! Export settings

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::SettingsError;
use crate::metadata::WorldInfo;
use crate::transform::TARGET_UNIT_SCALE;

const SETTINGS_FILE: &str = "settings.json";

/// All export settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportSettings {
    /// Editor units → game units multiplier
    pub unit_scale: f64,
    /// Edge length of the ground slab placed under every park
    pub ground_size: f64,
    /// Editor-space offset applied to the ground slab
    pub ground_position: [f64; 3],
    /// Edge length of generated textures in pixels
    pub texture_size: u32,
    /// JPEG quality (1 - 100)
    pub jpeg_quality: u8,
    /// Used when the park name is blank
    pub default_park_name: String,
    /// Texture names listed in the scene file
    pub textures: Vec<String>,
    /// Spawn points, sky and lighting
    pub world: WorldInfo,
}

impl Default for ExportSettings {
    fn default() -> Self {
        Self {
            unit_scale: TARGET_UNIT_SCALE,
            ground_size: 50.0,
            ground_position: [0.0, -0.25, 0.0],
            texture_size: 256,
            jpeg_quality: 85,
            default_park_name: shared::DEFAULT_PARK_NAME.to_string(),
            textures: vec!["concrete_gray".to_string()],
            world: WorldInfo::default(),
        }
    }
}

impl ExportSettings {
    /// Platform config location of `settings.json`, if the platform has one.
    pub fn default_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "parkgen", "parkgen")
            .map(|dirs| dirs.config_dir().join(SETTINGS_FILE))
    }

    /// Load settings from the platform config directory, or return default
    /// if the file is missing or unreadable.
    pub fn load() -> Self {
        match Self::default_path() {
            Some(path) if path.exists() => match Self::load_from(&path) {
                Ok(settings) => settings,
                Err(e) => {
                    tracing::warn!("ignoring settings: {e}");
                    Self::default()
                }
            },
            _ => Self::default(),
        }
    }

    /// Load settings from an explicit file. Missing keys take defaults.
    pub fn load_from(path: &Path) -> Result<Self, SettingsError> {
        let json = std::fs::read_to_string(path).map_err(|source| SettingsError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&json).map_err(|source| SettingsError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Save settings to the platform config directory.
    pub fn save(&self) -> Result<PathBuf, SettingsError> {
        let path = Self::default_path().ok_or(SettingsError::NoConfigDir)?;
        if let Some(dir) = path.parent() {
            std::fs::create_dir_all(dir)?;
        }
        std::fs::write(&path, serde_json::to_string_pretty(self)?)?;
        Ok(path)
    }

    /// JPEG quality clamped into the encoder's accepted range.
    pub fn jpeg_quality(&self) -> u8 {
        self.jpeg_quality.clamp(1, 100)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let s = ExportSettings::default();
        assert_eq!(s.unit_scale, 100.0);
        assert_eq!(s.ground_position, [0.0, -0.25, 0.0]);
        assert_eq!(s.textures, vec!["concrete_gray".to_string()]);
        assert_eq!(s.default_park_name, "My Skatepark");
    }

    #[test]
    fn test_json_round_trip() {
        let mut s = ExportSettings::default();
        s.texture_size = 64;
        s.world.gamma = 0.8;
        let json = serde_json::to_string(&s).unwrap();
        let back: ExportSettings = serde_json::from_str(&json).unwrap();
        assert_eq!(back, s);
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let s: ExportSettings = serde_json::from_str(r#"{ "ground_size": 80.0 }"#).unwrap();
        assert_eq!(s.ground_size, 80.0);
        assert_eq!(s.jpeg_quality, 85);
        assert_eq!(s.world, WorldInfo::default());
    }

    #[test]
    fn test_load_from_reports_errors() {
        let dir = std::env::temp_dir().join(format!("parkgen-settings-{}", uuid::Uuid::new_v4()));
        std::fs::create_dir_all(&dir).unwrap();

        let missing = dir.join("missing.json");
        assert!(matches!(
            ExportSettings::load_from(&missing),
            Err(SettingsError::Read { .. })
        ));

        let broken = dir.join("broken.json");
        std::fs::write(&broken, "{ not json").unwrap();
        assert!(matches!(
            ExportSettings::load_from(&broken),
            Err(SettingsError::Parse { .. })
        ));

        let good = dir.join("good.json");
        std::fs::write(&good, r#"{ "unit_scale": 50.0 }"#).unwrap();
        assert_eq!(ExportSettings::load_from(&good).unwrap().unit_scale, 50.0);

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_quality_is_clamped() {
        let s = ExportSettings {
            jpeg_quality: 0,
            ..Default::default()
        };
        assert_eq!(s.jpeg_quality(), 1);
    }
}
