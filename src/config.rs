//! Configuration file handling
//!
//! Model paths and the voice list live in a TOML file so the command line
//! only has to name the document.

use crate::speech::{TtsConfig, VoiceEntry, VoiceList};
use crate::{Pdf2AudioError, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Directory name under the platform config dir
const APP_DIR: &str = "pdf2audio";

/// File name of the configuration file
const CONFIG_FILE: &str = "config.toml";

/// Contents of `config.toml`
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// VITS model settings
    pub tts: TtsConfig,

    /// Voices offered by the model, indexed by `--voice`
    pub voices: Vec<VoiceEntry>,
}

impl AppConfig {
    /// Parse a configuration from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content)
            .map_err(|e| Pdf2AudioError::ConfigError(format!("Failed to parse config: {}", e)))
    }

    /// Load a configuration file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            Pdf2AudioError::ConfigError(format!(
                "Failed to read config file {}: {}",
                path.display(),
                e
            ))
        })?;

        let config = Self::from_toml_str(&content)?;
        info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Load from `explicit` if given, otherwise from the default location when
    /// it exists, otherwise fall back to defaults
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            if !path.is_file() {
                return Err(Pdf2AudioError::ConfigError(format!(
                    "Config file not found: {}",
                    path.display()
                )));
            }
            return Self::from_file(path);
        }

        match default_config_path() {
            Some(path) if path.is_file() => Self::from_file(path),
            _ => {
                debug!("No config file found, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// Override the model path
    pub fn with_model(mut self, model_path: impl Into<PathBuf>) -> Self {
        self.tts.model_path = model_path.into();
        self
    }

    /// Override the tokens path
    pub fn with_tokens(mut self, tokens_path: impl Into<PathBuf>) -> Self {
        self.tts.tokens_path = tokens_path.into();
        self
    }

    /// The configured voice catalog; a single default voice when none is listed
    pub fn voice_list(&self) -> VoiceList {
        if self.voices.is_empty() {
            VoiceList::default()
        } else {
            VoiceList::new(self.voices.clone())
        }
    }
}

/// `<config dir>/pdf2audio/config.toml`
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(APP_DIR).join(CONFIG_FILE))
}
