//! Configuration file handling for contour-cam.
//!
//! Loads configuration from `~/.config/contour-cam/config.toml` or a custom path.

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::camera::{CameraSettings, Resolution};

/// Configuration file structure for contour-cam.
/// Loaded from ~/.config/contour-cam/config.toml (or custom path via --config).
#[derive(Debug, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub camera: CameraConfig,
}

#[derive(Debug, Deserialize)]
pub struct CameraConfig {
    /// Camera device index
    #[serde(default)]
    pub device: u32,
    /// Mirror horizontally (selfie mode)
    #[serde(default = "default_true")]
    pub mirror: bool,
    /// Requested capture width; the device may negotiate a different one
    #[serde(default)]
    pub width: Option<u32>,
    /// Requested capture height
    #[serde(default)]
    pub height: Option<u32>,
    /// Target frame rate
    #[serde(default = "default_fps")]
    pub fps: u32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            device: 0,
            mirror: true,
            width: None,
            height: None,
            fps: default_fps(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_fps() -> u32 {
    30
}

impl Config {
    /// Load configuration from a file path.
    /// Returns default config if the file doesn't exist.
    /// Returns an error if the file exists but cannot be parsed.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let path = path.map(PathBuf::from).unwrap_or_else(default_path);

        if path.exists() {
            let content = std::fs::read_to_string(&path).map_err(|e| ConfigError::IoError {
                path: path.clone(),
                source: e,
            })?;
            let config: Config = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
                path: path.clone(),
                source: e,
            })?;
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    /// Build camera settings from the config, falling back to defaults for
    /// anything unset.
    pub fn camera_settings(&self) -> CameraSettings {
        let defaults = CameraSettings::default();
        let resolution = match (self.camera.width, self.camera.height) {
            (Some(width), Some(height)) => Resolution { width, height },
            _ => defaults.resolution,
        };
        CameraSettings {
            device_index: self.camera.device,
            resolution,
            fps: self.camera.fps,
            mirror: self.camera.mirror,
        }
    }
}

/// Errors that can occur when loading configuration.
#[derive(Debug)]
pub enum ConfigError {
    IoError {
        path: PathBuf,
        source: std::io::Error,
    },
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::IoError { path, source } => {
                write!(
                    f,
                    "Failed to read config file '{}': {}",
                    path.display(),
                    source
                )
            }
            ConfigError::ParseError { path, source } => {
                write!(
                    f,
                    "Failed to parse config file '{}': {}",
                    path.display(),
                    source
                )
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::IoError { source, .. } => Some(source),
            ConfigError::ParseError { source, .. } => Some(source),
        }
    }
}

/// Get the default config file path.
pub fn default_path() -> PathBuf {
    directories::ProjectDirs::from("com", "contour-cam", "contour-cam")
        .map(|d| d.config_dir().to_path_buf().join("config.toml"))
        .unwrap_or_else(|| {
            let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(home).join(".config/contour-cam/config.toml")
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults_when_missing() {
        let config = Config::load(Some(Path::new("/nonexistent/config.toml"))).unwrap();
        assert_eq!(config.camera.device, 0);
        assert!(config.camera.mirror);
        assert_eq!(config.camera.fps, 30);
        assert!(config.camera.width.is_none());
    }

    #[test]
    fn test_parse_camera_section() {
        let config: Config = toml::from_str(
            r#"
            [camera]
            device = 2
            mirror = false
            width = 1280
            height = 720
            fps = 15
            "#,
        )
        .unwrap();
        assert_eq!(config.camera.device, 2);
        assert!(!config.camera.mirror);
        assert_eq!(config.camera.width, Some(1280));
        assert_eq!(config.camera.height, Some(720));
        assert_eq!(config.camera.fps, 15);
    }

    #[test]
    fn test_camera_settings_resolution_fallback() {
        // Width without height falls back to the default resolution
        let config: Config = toml::from_str(
            r#"
            [camera]
            width = 1280
            "#,
        )
        .unwrap();
        let settings = config.camera_settings();
        assert_eq!(settings.resolution, Resolution::MEDIUM);
    }

    #[test]
    fn test_camera_settings_from_config() {
        let config: Config = toml::from_str(
            r#"
            [camera]
            device = 1
            width = 320
            height = 240
            "#,
        )
        .unwrap();
        let settings = config.camera_settings();
        assert_eq!(settings.device_index, 1);
        assert_eq!(settings.resolution, Resolution::LOW);
        assert!(settings.mirror);
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[camera]\ndevice = 3").unwrap();

        let config = Config::load(Some(file.path())).unwrap();
        assert_eq!(config.camera.device, 3);
    }

    #[test]
    fn test_load_invalid_toml_errors() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "not valid toml [[[").unwrap();

        let result = Config::load(Some(file.path()));
        assert!(matches!(result, Err(ConfigError::ParseError { .. })));
    }
}
