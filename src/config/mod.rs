//! Configuration management for newsdesk.
//!
//! Configuration is read from `~/.config/newsdesk/config.toml` at startup.
//! If the file doesn't exist, a default configuration with comments is created.

pub mod colors;
pub mod keybindings;

pub use colors::{ColorConfig, Theme};
pub use keybindings::KeybindingConfig;

use serde::Deserialize;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

pub const API_KEY_ENV: &str = "NEWS_API_KEY";

/// Main configuration struct.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api: ApiConfig,
    pub ui: UiConfig,
    pub colors: ColorConfig,
    pub keybindings: KeybindingConfig,
}

/// Remote headline source settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    pub base_url: String,
    pub country: String,
    /// Falls back to the `NEWS_API_KEY` environment variable when unset.
    pub key: Option<String>,
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "https://newsapi.org/v2/top-headlines".to_string(),
            country: "us".to_string(),
            key: None,
            timeout_secs: 10,
        }
    }
}

impl ApiConfig {
    pub fn resolved_key(&self) -> Option<String> {
        self.key
            .as_deref()
            .map(str::trim)
            .filter(|k| !k.is_empty())
            .map(String::from)
            .or_else(|| {
                std::env::var(API_KEY_ENV)
                    .ok()
                    .map(|k| k.trim().to_string())
                    .filter(|k| !k.is_empty())
            })
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    /// Theme at startup.
    pub theme: Theme,
    /// Quiet period before typed search text is applied.
    pub search_debounce_ms: u64,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            theme: Theme::Light,
            search_debounce_ms: 300,
        }
    }
}

impl Config {
    /// Load configuration from the default path.
    ///
    /// If the config file doesn't exist, creates a default one with comments.
    /// If the config file exists but is invalid, returns an error.
    /// Missing fields in the config file will use default values.
    pub fn load() -> Result<Self, ConfigError> {
        let config_path = Self::default_config_path()?;
        Self::load_from(&config_path)
    }

    /// Load configuration from `config_path`, creating a default file if missing.
    pub fn load_from(config_path: &Path) -> Result<Self, ConfigError> {
        if !config_path.exists() {
            Self::create_default_config(config_path)?;
            return Ok(Self::default());
        }

        let content = fs::read_to_string(config_path).map_err(|e| ConfigError::Io {
            path: config_path.to_path_buf(),
            source: e,
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: config_path.to_path_buf(),
            source: e,
        })?;

        Ok(config)
    }

    /// Get the default config file path: `~/.config/newsdesk/config.toml`
    pub fn default_config_path() -> Result<PathBuf, ConfigError> {
        let config_dir = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
        Ok(config_dir.join("newsdesk").join("config.toml"))
    }

    /// Create a default config file with comments.
    fn create_default_config(path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| ConfigError::Io {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        let mut file = fs::File::create(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        file.write_all(Self::default_config_content().as_bytes())
            .map_err(|e| ConfigError::Io {
                path: path.to_path_buf(),
                source: e,
            })?;

        Ok(())
    }

    /// Generate the default config file content with comments.
    fn default_config_content() -> String {
        r##"# newsdesk configuration
#
# Colors can be specified as:
# - Named colors: Black, Red, Green, Yellow, Blue, Magenta, Cyan, Gray,
#   DarkGray, LightRed, LightGreen, LightYellow, LightBlue, LightMagenta,
#   LightCyan, White, Reset
# - Hex colors: "#RRGGBB" or "#RGB"
#
# Keybindings can be specified as:
# - Single characters: "a", "A", "1", "/"
# - Special keys: Enter, Tab, BackTab, Backspace, Delete, Home, End,
#   PageUp, PageDown, Up, Down, Left, Right, Esc, Space, F1-F12
# - With modifiers: "Ctrl+c", "Shift+Tab", "Alt+Enter"

[api]
base_url = "https://newsapi.org/v2/top-headlines"
country = "us"
# API key; leave unset to read it from the NEWS_API_KEY environment variable
# key = "..."
timeout_secs = 10

[ui]
# "light" or "dark"
theme = "light"
search_debounce_ms = 300

[colors]
accent = "Blue"
inactive_border = "DarkGray"
selection_bg = "Blue"
selection_fg = "White"
favorite = "Red"
muted = "Gray"
link = "Cyan"
error = "LightRed"
status_fg = "White"
status_bg = "DarkGray"

[keybindings]
quit = ["q", "Ctrl+c"]
move_up = ["k", "Up"]
move_down = ["j", "Down"]
next_page = ["n", "PageDown", "Right"]
prev_page = ["p", "PageUp", "Left"]
next_category = ["Tab", "l"]
prev_category = ["BackTab", "Shift+Tab", "h"]
toggle_favorite = ["s", "Space"]
open_in_browser = ["o", "Enter"]
search = ["/"]
date_from = ["f"]
date_to = ["t"]
clear_filters = ["x"]
toggle_theme = ["T"]
refresh = ["R"]
"##
        .to_string()
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Could not determine config directory")]
    NoConfigDir,

    #[error("Failed to read/write config file at {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_deserializes() {
        let content = Config::default_config_content();
        let config: Config = toml::from_str(&content).expect("Default config should be valid TOML");

        assert_eq!(config.api.country, "us");
        assert_eq!(config.api.timeout_secs, 10);
        assert_eq!(config.ui.theme, Theme::Light);
        assert_eq!(config.ui.search_debounce_ms, 300);
        assert_eq!(config.colors.favorite, ratatui::style::Color::Red);
        assert_eq!(config.keybindings.quit, vec!["q", "Ctrl+c"]);
    }

    #[test]
    fn test_partial_config() {
        let content = r##"
[api]
country = "gb"

[ui]
theme = "dark"

[colors]
accent = "#FF0000"
"##;
        let config: Config = toml::from_str(content).expect("Partial config should work");

        assert_eq!(config.api.country, "gb");
        assert_eq!(config.api.base_url, "https://newsapi.org/v2/top-headlines");
        assert_eq!(config.ui.theme, Theme::Dark);
        assert_eq!(config.ui.search_debounce_ms, 300);
        assert_eq!(config.colors.accent, ratatui::style::Color::Rgb(255, 0, 0));
        assert_eq!(
            config.colors.inactive_border,
            ratatui::style::Color::DarkGray
        );
    }

    #[test]
    fn test_empty_config() {
        let config: Config = toml::from_str("").expect("Empty config should work");

        assert_eq!(config.api.timeout_secs, 10);
        assert_eq!(config.ui.theme, Theme::Light);
        assert_eq!(config.keybindings.quit, vec!["q", "Ctrl+c"]);
    }

    #[test]
    fn test_configured_key_wins() {
        let api = ApiConfig {
            key: Some("  from-file  ".into()),
            ..Default::default()
        };
        assert_eq!(api.resolved_key().as_deref(), Some("from-file"));
    }

    #[test]
    fn test_load_from_creates_default_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let config = Config::load_from(&path).unwrap();
        assert!(path.exists());
        assert_eq!(config.api.country, "us");

        // A second load parses the file that was written
        let reloaded = Config::load_from(&path).unwrap();
        assert_eq!(reloaded.keybindings.search, vec!["/"]);
    }

    #[test]
    fn test_load_from_invalid_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[ui]\ntheme = \"sepia\"\n").unwrap();

        let err = Config::load_from(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }
}
