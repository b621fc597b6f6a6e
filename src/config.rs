//! Shell configuration.
//!
//! Built-in defaults are overlaid with a TOML file: `--config <path>` when
//! given, else `~/.config/pipesh/config.toml` when it exists. Keys missing
//! from the file keep their defaults.

use crate::error::ConfigError;
use crate::input::MAX_INPUT_BYTES;
use crate::pipeline::MAX_SEGMENTS;
use crate::tokenizer::MAX_ARGS;
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Location of the user config, relative to `$HOME`.
const USER_CONFIG: &str = ".config/pipesh/config.toml";

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    pub limits: Limits,
    pub prompt: PromptSettings,
    pub history: HistorySettings,
    pub logging: LogSettings,
}

/// Capacity policy. Input past any of these limits is dropped silently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct Limits {
    /// Arguments kept per command.
    pub max_args: usize,
    /// Pipeline segments kept per line.
    pub max_segments: usize,
    /// Size of the input line buffer, terminator included.
    pub max_input_bytes: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_args: MAX_ARGS,
            max_segments: MAX_SEGMENTS,
            max_input_bytes: MAX_INPUT_BYTES,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct PromptSettings {
    pub color: PromptColor,
}

/// Color of the `user@host:cwd` part of the prompt.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PromptColor {
    None,
    Black,
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    #[default]
    Cyan,
    White,
}

impl PromptColor {
    /// ANSI escape selecting this color, `None` for an uncolored prompt.
    pub fn escape(self) -> Option<&'static str> {
        let code = match self {
            PromptColor::None => return None,
            PromptColor::Black => "\x1b[0;30m",
            PromptColor::Red => "\x1b[0;31m",
            PromptColor::Green => "\x1b[0;32m",
            PromptColor::Yellow => "\x1b[0;33m",
            PromptColor::Blue => "\x1b[0;34m",
            PromptColor::Magenta => "\x1b[0;35m",
            PromptColor::Cyan => "\x1b[0;36m",
            PromptColor::White => "\x1b[0;37m",
        };
        Some(code)
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct HistorySettings {
    /// Keep entered lines in the line editor's history.
    pub enabled: bool,
    /// Load history from and save it to this file.
    pub file: Option<PathBuf>,
}

impl Default for HistorySettings {
    fn default() -> Self {
        Self {
            enabled: true,
            file: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct LogSettings {
    /// `off`, `error`, `warn`, `info`, `debug` or `trace`.
    pub level: String,
    /// Append log records to this file instead of stderr.
    pub file: Option<PathBuf>,
}

impl Default for LogSettings {
    fn default() -> Self {
        Self {
            level: "off".to_string(),
            file: None,
        }
    }
}

impl Config {
    /// Resolve the configuration.
    ///
    /// An explicit path must be readable and valid. The user config is
    /// optional; if it cannot be parsed a warning is printed and the
    /// defaults are used.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = explicit {
            return Self::from_file(path);
        }
        let Some(path) = Self::user_config_path() else {
            return Ok(Self::default());
        };
        if !path.exists() {
            return Ok(Self::default());
        }
        match Self::from_file(&path) {
            Ok(config) => Ok(config),
            Err(e) => {
                eprintln!("pipesh: {e}");
                warn!("ignoring user config: {e}");
                Ok(Self::default())
            }
        }
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        debug!("loaded config from {}", path.display());
        Ok(config)
    }

    pub fn from_toml(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }

    fn user_config_path() -> Option<PathBuf> {
        let home = std::env::var_os("HOME")?;
        Some(Path::new(&home).join(USER_CONFIG))
    }
}
