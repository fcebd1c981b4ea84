//! Application settings

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::i18n::Lang;

/// Floor grid display settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GridSettings {
    /// Show grid
    pub visible: bool,
    /// Grid cell size in metres
    pub size: f32,
    /// Number of grid lines in each direction from origin
    pub range: i32,
    /// Grid line opacity (0.0 - 1.0)
    pub opacity: f32,
}

impl Default for GridSettings {
    fn default() -> Self {
        Self {
            visible: true,
            size: 0.25,
            range: 8,
            opacity: 0.4,
        }
    }
}

/// Viewport settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ViewportSettings {
    /// Background color RGB
    pub background_color: [u8; 3],
    /// Duration of the front/back camera reset, in seconds
    pub camera_reset_secs: f64,
}

impl Default for ViewportSettings {
    fn default() -> Self {
        Self {
            background_color: [30, 30, 35],
            camera_reset_secs: 0.8,
        }
    }
}

/// UI settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiSettings {
    /// Font size in points
    pub font_size: f32,
    /// Interface language
    #[serde(default)]
    pub language: Lang,
}

impl Default for UiSettings {
    fn default() -> Self {
        Self {
            font_size: 14.0,
            language: Lang::default(),
        }
    }
}

/// Body model source
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssetSettings {
    /// GLB file loaded at startup
    pub model_path: PathBuf,
}

impl Default for AssetSettings {
    fn default() -> Self {
        Self {
            model_path: PathBuf::from("assets/body.glb"),
        }
    }
}

/// All application settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppSettings {
    /// Grid settings
    #[serde(default)]
    pub grid: GridSettings,
    /// Viewport settings
    #[serde(default)]
    pub viewport: ViewportSettings,
    /// UI settings
    #[serde(default)]
    pub ui: UiSettings,
    /// Model file
    #[serde(default)]
    pub asset: AssetSettings,
}

impl AppSettings {
    /// `settings.json` in the per-user config directory
    pub fn config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "musclemap", "musclemap")
            .map(|dirs| dirs.config_dir().join("settings.json"))
    }

    /// Load settings from file, or return default if not found
    pub fn load() -> Self {
        match Self::config_path() {
            Some(path) => Self::load_from(&path),
            None => Self::default(),
        }
    }

    /// Load from an explicit path; missing or unreadable files give defaults.
    pub fn load_from(path: &Path) -> Self {
        let Ok(json) = std::fs::read_to_string(path) else {
            return Self::default();
        };
        match serde_json::from_str(&json) {
            Ok(settings) => settings,
            Err(e) => {
                tracing::warn!("Ignoring invalid settings file {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Save settings to file
    pub fn save(&self) {
        if let Some(path) = Self::config_path() {
            if let Err(e) = self.save_to(&path) {
                tracing::warn!("Failed to save settings to {}: {}", path.display(), e);
            }
        }
    }

    pub fn save_to(&self, path: &Path) -> std::io::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir()
            .join(format!("musclemap-settings-{}-{}", name, std::process::id()))
            .join("settings.json")
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let settings = AppSettings::load_from(Path::new("/nonexistent/settings.json"));
        assert_eq!(settings.ui.language, Lang::Ja);
        assert_eq!(settings.asset.model_path, PathBuf::from("assets/body.glb"));
    }

    #[test]
    fn test_save_then_load() {
        let path = temp_path("roundtrip");
        let mut settings = AppSettings::default();
        settings.ui.language = Lang::En;
        settings.grid.visible = false;
        settings.save_to(&path).unwrap();

        let back = AppSettings::load_from(&path);
        assert_eq!(back.ui.language, Lang::En);
        assert!(!back.grid.visible);
        let _ = std::fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn test_partial_file_fills_missing_sections() {
        let path = temp_path("partial");
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, r#"{ "ui": { "font_size": 18.0 } }"#).unwrap();

        let settings = AppSettings::load_from(&path);
        assert_eq!(settings.ui.font_size, 18.0);
        assert_eq!(settings.ui.language, Lang::Ja);
        assert!(settings.grid.visible);
        let _ = std::fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn test_invalid_file_gives_defaults() {
        let path = temp_path("invalid");
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, "not json").unwrap();
        assert_eq!(AppSettings::load_from(&path).ui.font_size, 14.0);
        let _ = std::fs::remove_dir_all(path.parent().unwrap());
    }
}
