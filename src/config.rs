//! Settings persistence - load and save settings to disk.
//!
//! Settings are stored in the platform-specific config folder:
//! - macOS: ~/Library/Application Support/dev.solvetty.SolveTTY/
//! - Windows: %APPDATA%/solvetty/SolveTTY/config/
//! - Linux: ~/.config/solvetty/

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

const APP_QUALIFIER: &str = "dev";
const APP_ORG: &str = "solvetty";
const APP_NAME: &str = "SolveTTY";
const CONFIG_FILENAME: &str = "settings.toml";

/// Where the solving service listens by default
pub const DEFAULT_API_URL: &str = "http://127.0.0.1:8000";

/// Origin the chart view URL is built against
pub const DEFAULT_CHART_ORIGIN: &str = "http://localhost:5173";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Base URL of the solving service
    pub api_url: String,
    /// Origin used when encoding chart view URLs
    pub chart_origin: String,
    /// Interpret angles as radians on startup
    pub default_radians: bool,
    /// Request timeout; the HTTP client's default when unset
    pub request_timeout_secs: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            api_url: DEFAULT_API_URL.to_string(),
            chart_origin: DEFAULT_CHART_ORIGIN.to_string(),
            default_radians: false,
            request_timeout_secs: None,
        }
    }
}

impl Settings {
    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not determine the settings directory")]
    NoConfigDir,

    #[error("failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to serialize settings: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// Get the path to the settings file.
///
/// Returns `None` if the platform-specific directory cannot be determined.
pub fn settings_path() -> Option<PathBuf> {
    ProjectDirs::from(APP_QUALIFIER, APP_ORG, APP_NAME)
        .map(|dirs| dirs.config_dir().join(CONFIG_FILENAME))
}

/// Load settings from `path`, or from the default location.
///
/// Returns default settings if:
/// - The settings file doesn't exist
/// - The settings file cannot be read or parsed
/// - The platform-specific directory cannot be determined
pub fn load_settings(path: Option<&Path>) -> Settings {
    let path = match path {
        Some(path) => path.to_path_buf(),
        None => {
            let Some(path) = settings_path() else {
                tracing::warn!("Could not determine settings path, using defaults");
                return Settings::default();
            };
            path
        }
    };

    match fs::read_to_string(&path) {
        Ok(content) => match parse_settings(&content) {
            Ok(settings) => {
                tracing::info!("Loaded settings from {:?}", path);
                settings
            }
            Err(e) => {
                tracing::warn!("Failed to parse settings file: {}, using defaults", e);
                Settings::default()
            }
        },
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            tracing::info!("No settings file found at {:?}, using defaults", path);
            Settings::default()
        }
        Err(e) => {
            tracing::warn!("Failed to read settings file: {}, using defaults", e);
            Settings::default()
        }
    }
}

pub fn parse_settings(content: &str) -> Result<Settings, toml::de::Error> {
    toml::from_str(content)
}

/// Save settings to `path`, or to the default location.
///
/// Creates the parent directory if it doesn't exist. Returns the path written.
pub fn save_settings(settings: &Settings, path: Option<&Path>) -> Result<PathBuf, ConfigError> {
    let path = match path {
        Some(path) => path.to_path_buf(),
        None => settings_path().ok_or(ConfigError::NoConfigDir)?,
    };

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|source| ConfigError::Io {
            path: parent.to_path_buf(),
            source,
        })?;
    }

    let content = toml::to_string_pretty(settings)?;
    fs::write(&path, content).map_err(|source| ConfigError::Io {
        path: path.clone(),
        source,
    })?;

    tracing::info!("Saved settings to {:?}", path);
    Ok(path)
}
