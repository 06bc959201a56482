//! Configuration system for treesift.
//!
//! Defaults for the command-line tool live in a TOML file. Every field is
//! optional; anything missing falls back to the built-in default.
//!
//! # Example
//!
//! ```
//! use treesift::config::Config;
//!
//! let config = Config::default();
//! assert!(!config.regex);
//! assert!(config.sort_results);
//!
//! let custom = Config {
//!     return_parent: true,
//!     ..Config::default()
//! };
//! assert!(custom.return_parent);
//! ```

use serde::{Deserialize, Serialize};

use crate::search::SearchOptions;

/// Configuration for the treesift command-line tool.
///
/// # Fields
///
/// * `regex` - Treat string targets as regex patterns (default: false)
/// * `convert_numeric_strings` - Compare numeric strings as numbers (default: true)
/// * `sort_results` - Sort results by depth and last path segment (default: true)
/// * `return_parent` - Report the enclosing container instead of the match (default: false)
/// * `pretty` - Pretty-print JSON output (default: false)
/// * `log_level` - Tracing filter directive (default: "warn")
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub regex: bool,

    #[serde(default = "default_true")]
    pub convert_numeric_strings: bool,

    #[serde(default = "default_true")]
    pub sort_results: bool,

    #[serde(default)]
    pub return_parent: bool,

    #[serde(default)]
    pub pretty: bool,

    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_true() -> bool {
    true
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            regex: false,
            convert_numeric_strings: true,
            sort_results: true,
            return_parent: false,
            pretty: false,
            log_level: default_log_level(),
        }
    }
}

impl Config {
    /// Returns the path to the config file.
    ///
    /// Uses `~/.config/treesift/config.toml` on all platforms.
    pub fn config_path() -> Option<std::path::PathBuf> {
        dirs::home_dir().map(|mut path| {
            path.push(".config");
            path.push("treesift");
            path.push("config.toml");
            path
        })
    }

    /// Loads configuration from the default config file.
    ///
    /// Returns the default configuration if the file doesn't exist or can't be read.
    pub fn load() -> Self {
        match Self::config_path() {
            Some(path) => Self::load_from(&path),
            None => Self::default(),
        }
    }

    /// Loads configuration from `path`, falling back to defaults.
    pub fn load_from(path: &std::path::Path) -> Self {
        if !path.exists() {
            return Self::default();
        }

        match std::fs::read_to_string(path) {
            Ok(contents) => toml::from_str(&contents).unwrap_or_else(|e| {
                tracing::warn!(path = %path.display(), error = %e, "ignoring malformed config");
                Self::default()
            }),
            Err(_) => Self::default(),
        }
    }

    /// Search options described by this configuration.
    pub fn search_options(&self) -> SearchOptions {
        SearchOptions::default()
            .regex(self.regex)
            .convert_numeric_strings(self.convert_numeric_strings)
            .sort_results(self.sort_results)
    }
}
