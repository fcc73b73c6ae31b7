//! Configuration file handling.
//!
//! The config lives at `<config dir>/ansimirror/config.toml`. Every field has
//! a default, so a missing file or a file with only some sections is valid.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::render::{Pacing, TimingMode};

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub archive: ArchiveConfig,
    pub modem: ModemConfig,
}

/// Listener settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Address of the Gemini listener
    pub gemini_listen: String,
    /// Whether to also serve plain HTTP
    pub http_enabled: bool,
    /// Address of the HTTP listener
    pub http_listen: String,
    /// Public host name, shown on the front page
    pub hostname: String,
    /// Seconds a client gets to send its request
    pub request_timeout_secs: u64,
    /// Where `/source` sends users for the running code; empty hides the link
    pub source_url: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            gemini_listen: "0.0.0.0:1965".to_string(),
            http_enabled: true,
            http_listen: "0.0.0.0:2080".to_string(),
            hostname: "localhost".to_string(),
            request_timeout_secs: 10,
            source_url: env!("CARGO_PKG_REPOSITORY").to_string(),
        }
    }
}

impl ServerConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// HTTP listen address, if HTTP is enabled.
    pub fn http_addr(&self) -> Option<&str> {
        self.http_enabled.then_some(self.http_listen.as_str())
    }
}

/// Where the artwork lives
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArchiveConfig {
    /// Directory scanned recursively for artwork files
    pub root: PathBuf,
}

impl Default for ArchiveConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("pack"),
        }
    }
}

/// Default modem emulation for plain `/NAME` requests
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModemConfig {
    /// Bits per second; 0 serves artwork unthrottled
    pub bitrate: u32,
    /// `line` (constant time per line) or `simulated` (per character)
    pub mode: TimingMode,
}

impl Default for ModemConfig {
    fn default() -> Self {
        Self {
            bitrate: 9600,
            mode: TimingMode::PerLine,
        }
    }
}

impl ModemConfig {
    pub fn pacing(&self) -> Pacing {
        Pacing::new(self.bitrate, self.mode)
    }
}

impl Config {
    /// Default config file location.
    pub fn config_path() -> Result<PathBuf> {
        let dir = dirs::config_dir().context("Could not determine config directory")?;
        Ok(dir.join("ansimirror").join("config.toml"))
    }

    /// Load the config from the default location.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// Load the config from `path`, falling back to defaults if it does not exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        Self::parse(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Parse config from TOML text.
    pub fn parse(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Serialize as pretty TOML.
    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }
}
