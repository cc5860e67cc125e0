//! Configuration and color scheme management for termfolio.
//!
//! This module provides:
//! - TOML configuration file loading from `~/.termfolio/config.toml`
//! - Built-in color schemes (matrix, amber, mono)
//!
//! # Configuration File
//!
//! ```toml
//! # Color scheme: matrix, amber, mono
//! color_scheme = "matrix"
//!
//! # Print the welcome lines on start
//! show_banner = true
//!
//! [typing]
//! interval_ms = 20
//! threshold = 50
//!
//! [history]
//! max_entries = 100
//! ```

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, warn};

use crate::core::session::DEFAULT_TYPING_THRESHOLD;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to access config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("Could not determine home directory")]
    NoHomeDir,
}

/// Main configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Color scheme name
    pub color_scheme: String,
    /// Print the welcome lines when the console starts
    pub show_banner: bool,
    /// Typing effect settings
    pub typing: TypingConfig,
    /// Command recall settings
    pub history: HistoryConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            color_scheme: "matrix".to_string(),
            show_banner: true,
            typing: TypingConfig::default(),
            history: HistoryConfig::default(),
        }
    }
}

/// Typing effect configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TypingConfig {
    /// Milliseconds between revealed chars
    pub interval_ms: u64,
    /// Responses longer than this many chars are typed out
    pub threshold: usize,
}

impl Default for TypingConfig {
    fn default() -> Self {
        Self {
            interval_ms: 20,
            threshold: DEFAULT_TYPING_THRESHOLD,
        }
    }
}

impl TypingConfig {
    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }
}

/// Command recall configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HistoryConfig {
    pub max_entries: usize,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self { max_entries: 100 }
    }
}

impl Config {
    /// Load configuration from the default location, falling back to
    /// defaults when the file is missing or invalid
    pub fn load() -> Self {
        let Some(path) = Self::get_config_path() else {
            return Self::default();
        };
        if !path.exists() {
            return Self::default();
        }
        match Self::load_from(&path) {
            Ok(config) => {
                info!("Loaded config from {}", path.display());
                config
            }
            Err(e) => {
                warn!("{}; using defaults", e);
                Self::default()
            }
        }
    }

    /// Load configuration from a specific file
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&content)
    }

    /// Parse configuration from TOML text
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Save configuration to the default location, returning the path
    pub fn save(&self) -> Result<PathBuf, ConfigError> {
        let path = Self::get_config_path().ok_or(ConfigError::NoHomeDir)?;
        self.save_to(&path)?;
        Ok(path)
    }

    /// Save configuration to a specific file
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let content = toml::to_string_pretty(self)?;
        fs::write(path, content).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Get config file path
    fn get_config_path() -> Option<PathBuf> {
        data_dir().map(|dir| dir.join("config.toml"))
    }

    /// Get the color scheme
    pub fn get_color_scheme(&self) -> ColorScheme {
        ColorScheme::by_name(&self.color_scheme)
    }
}

/// Color definition (RGB)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Convert to crossterm Color
    pub fn to_crossterm(&self) -> crossterm::style::Color {
        crossterm::style::Color::Rgb {
            r: self.r,
            g: self.g,
            b: self.b,
        }
    }
}

/// Color scheme definition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColorScheme {
    pub name: String,

    pub background: Color,

    // Scrollback
    pub input_fg: Color,
    pub output_fg: Color,
    pub error_fg: Color,
    pub prompt_fg: Color,

    // Chrome
    pub title_fg: Color,
    pub badge_bg: Color,
    pub badge_fg: Color,
    pub border: Color,
    pub hint_fg: Color,
}

impl Default for ColorScheme {
    fn default() -> Self {
        Self::matrix()
    }
}

impl ColorScheme {
    /// Green phosphor on black
    pub fn matrix() -> Self {
        Self {
            name: "matrix".to_string(),

            background: Color::new(0, 0, 0),

            input_fg: Color::new(134, 239, 172),
            output_fg: Color::new(74, 222, 128),
            error_fg: Color::new(248, 113, 113),
            prompt_fg: Color::new(134, 239, 172),

            title_fg: Color::new(74, 222, 128),
            badge_bg: Color::new(20, 83, 45),
            badge_fg: Color::new(74, 222, 128),
            border: Color::new(22, 101, 52),
            hint_fg: Color::new(22, 163, 74),
        }
    }

    /// Amber monochrome
    pub fn amber() -> Self {
        Self {
            name: "amber".to_string(),

            background: Color::new(20, 12, 0),

            input_fg: Color::new(255, 200, 87),
            output_fg: Color::new(255, 176, 0),
            error_fg: Color::new(255, 94, 58),
            prompt_fg: Color::new(255, 200, 87),

            title_fg: Color::new(255, 176, 0),
            badge_bg: Color::new(102, 64, 0),
            badge_fg: Color::new(255, 200, 87),
            border: Color::new(128, 82, 0),
            hint_fg: Color::new(191, 128, 0),
        }
    }

    /// Plain grayscale
    pub fn mono() -> Self {
        Self {
            name: "mono".to_string(),

            background: Color::new(0, 0, 0),

            input_fg: Color::new(255, 255, 255),
            output_fg: Color::new(200, 200, 200),
            error_fg: Color::new(255, 255, 255),
            prompt_fg: Color::new(255, 255, 255),

            title_fg: Color::new(255, 255, 255),
            badge_bg: Color::new(80, 80, 80),
            badge_fg: Color::new(255, 255, 255),
            border: Color::new(100, 100, 100),
            hint_fg: Color::new(150, 150, 150),
        }
    }

    /// Get scheme by name
    pub fn by_name(name: &str) -> Self {
        match name.to_lowercase().as_str() {
            "amber" => Self::amber(),
            "mono" | "monochrome" => Self::mono(),
            _ => Self::matrix(),
        }
    }

    /// List available schemes
    pub fn list() -> Vec<&'static str> {
        vec!["matrix", "amber", "mono"]
    }
}

/// `~/.termfolio`, created on first use
pub fn data_dir() -> Option<PathBuf> {
    let dir = home_dir()?.join(".termfolio");
    if !dir.exists() {
        let _ = fs::create_dir_all(&dir);
    }
    Some(dir)
}

// Get home directory
fn home_dir() -> Option<PathBuf> {
    std::env::var_os("USERPROFILE")
        .or_else(|| std::env::var_os("HOME"))
        .map(PathBuf::from)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.color_scheme, "matrix");
        assert!(config.show_banner);
        assert_eq!(config.typing.interval(), Duration::from_millis(20));
        assert_eq!(config.typing.threshold, 50);
        assert_eq!(config.history.max_entries, 100);
    }

    #[test]
    fn test_parse_partial() {
        let config = Config::parse(
            r#"
            color_scheme = "amber"

            [typing]
            interval_ms = 5
            "#,
        )
        .unwrap();

        assert_eq!(config.color_scheme, "amber");
        assert_eq!(config.typing.interval_ms, 5);
        // Unset fields keep their defaults
        assert_eq!(config.typing.threshold, 50);
        assert!(config.show_banner);
        assert_eq!(config.get_color_scheme(), ColorScheme::amber());
    }

    #[test]
    fn test_parse_empty() {
        assert_eq!(Config::parse("").unwrap(), Config::default());
    }

    #[test]
    fn test_parse_invalid() {
        let err = Config::parse("show_banner = \"yes\"").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_save_and_load_file() {
        let mut config = Config::default();
        config.color_scheme = "mono".to_string();
        config.show_banner = false;
        config.history.max_entries = 7;

        let path = std::env::temp_dir()
            .join(format!("termfolio-config-{}.toml", std::process::id()));
        config.save_to(&path).unwrap();
        let loaded = Config::load_from(&path);
        let _ = fs::remove_file(&path);

        assert_eq!(loaded.unwrap(), config);
    }

    #[test]
    fn test_save_to_missing_dir() {
        let err = Config::default()
            .save_to(Path::new("/definitely/not/here/config.toml"))
            .unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn test_scheme_lookup() {
        for name in ColorScheme::list() {
            assert_eq!(ColorScheme::by_name(name).name, name);
        }
        assert_eq!(ColorScheme::by_name("AMBER").name, "amber");
        assert_eq!(ColorScheme::by_name("unknown").name, "matrix");
    }

    #[test]
    fn test_load_missing_file() {
        let err = Config::load_from(Path::new("/definitely/not/here.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
