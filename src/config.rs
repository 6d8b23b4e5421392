//! Configuration types for the dialogue engine.

use crate::error::{AgentError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Top-level configuration for the engine.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AgentConfig {
    /// Turn pacing settings.
    pub dialogue: DialogueConfig,
    /// Voice capture settings.
    pub capture: CaptureConfig,
}

/// Turn pacing configuration.
///
/// The delays are deliberate pacing, not computation: a turn always passes
/// through thinking and working even though classification itself is
/// near-instant. Renderers rely on each phase being visible.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DialogueConfig {
    /// How long the thinking phase is held, in ms.
    pub thinking_ms: u64,
    /// How long the working phase is held, in ms.
    pub working_ms: u64,
    /// How long the done phase is displayed before returning to idle, in ms.
    pub done_hold_ms: u64,
}

impl Default for DialogueConfig {
    fn default() -> Self {
        Self {
            thinking_ms: 800,
            working_ms: 1200,
            done_hold_ms: 2000,
        }
    }
}

/// Voice capture configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CaptureConfig {
    /// Transparently reopen the recognition stream when the platform engine
    /// ends it while capture is still wanted. The underlying stream has a
    /// maximum continuous duration, so this keeps the listening illusion up.
    pub auto_restart: bool,
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self { auto_restart: true }
    }
}

impl AgentConfig {
    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        toml::from_str(&text)
            .map_err(|e| AgentError::Config(format!("cannot parse {}: {e}", path.display())))
    }

    /// Load configuration from `path`, falling back to defaults when the file
    /// does not exist. A file that exists but fails to parse is still an
    /// error, so typos do not silently revert the user to defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if an existing file cannot be read or parsed.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Save configuration as pretty TOML, creating parent directories.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or writing fails.
    pub fn save(&self, path: &Path) -> Result<()> {
        let text = toml::to_string_pretty(self)
            .map_err(|e| AgentError::Config(format!("cannot serialize config: {e}")))?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, text)?;
        Ok(())
    }
}

/// Returns the default config file path, `jonny/config.toml` under the
/// platform config directory.
#[must_use]
pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("jonny")
        .join("config.toml")
}
