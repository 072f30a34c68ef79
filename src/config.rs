//! YAML configuration file support.
//!
//! Lets a deployment keep its matcher settings in one file and load them at
//! runtime.
//!
//! ## Example YAML Configuration
//!
//! ```yaml
//! version: "1.0"
//! name: "genome-scan"
//!
//! matcher:
//!   version: 1
//!   error_exponent: 1
//!   max_text_len: 1048576
//!   alphabet: "acgt"
//!   seed: 1732584193
//!   periodic_shortcut: true
//! ```

use std::fs;
use std::path::Path;

use matcher::MatcherConfig;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

/// Errors that can occur when loading YAML configuration files
#[derive(Debug, Error)]
pub enum ConfigLoadError {
    #[error("failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),

    #[error("failed to parse YAML: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    #[error("validation error: {0}")]
    Validation(String),

    #[error("unsupported config version: {0}")]
    UnsupportedVersion(String),
}

/// Top-level YAML configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "snake_case")]
pub struct RtMatchConfig {
    /// Configuration format version
    pub version: String,

    /// Optional configuration name/description
    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub matcher: MatcherYamlConfig,
}

impl RtMatchConfig {
    /// Load a YAML configuration file from the given path
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigLoadError> {
        let path = path.as_ref();
        debug!(path = %path.display(), "config_load");
        let content = fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse YAML configuration from a string
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigLoadError> {
        let config: RtMatchConfig = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_yaml(&self) -> Result<String, ConfigLoadError> {
        Ok(serde_yaml::to_string(self)?)
    }

    fn validate(&self) -> Result<(), ConfigLoadError> {
        match self.version.as_str() {
            "1.0" | "1" => Ok(()),
            v => Err(ConfigLoadError::UnsupportedVersion(v.to_string())),
        }?;
        self.matcher.validate()
    }

    /// Settings for [`matcher::ExactMatcher::new`].
    pub fn matcher_config(&self) -> MatcherConfig {
        self.matcher.to_matcher_config()
    }
}

impl Default for RtMatchConfig {
    fn default() -> Self {
        Self {
            version: "1.0".to_string(),
            name: None,
            matcher: MatcherYamlConfig::default(),
        }
    }
}

/// Matcher section of the YAML file
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MatcherYamlConfig {
    #[serde(default = "default_version")]
    pub version: u32,

    #[serde(default = "default_error_exponent")]
    pub error_exponent: u32,

    #[serde(default = "default_max_text_len")]
    pub max_text_len: usize,

    /// Symbols as a string, one byte each
    #[serde(default)]
    pub alphabet: Option<String>,

    #[serde(default)]
    pub seed: Option<u64>,

    #[serde(default = "true_value")]
    pub periodic_shortcut: bool,
}

impl MatcherYamlConfig {
    fn validate(&self) -> Result<(), ConfigLoadError> {
        self.to_matcher_config()
            .validate()
            .map_err(|err| ConfigLoadError::Validation(format!("matcher: {err}")))
    }

    pub fn to_matcher_config(&self) -> MatcherConfig {
        MatcherConfig {
            version: self.version,
            error_exponent: self.error_exponent,
            max_text_len: self.max_text_len,
            alphabet: self.alphabet.as_ref().map(|a| a.as_bytes().to_vec()),
            seed: self.seed,
            periodic_shortcut: self.periodic_shortcut,
        }
    }
}

impl Default for MatcherYamlConfig {
    fn default() -> Self {
        Self {
            version: default_version(),
            error_exponent: default_error_exponent(),
            max_text_len: default_max_text_len(),
            alphabet: None,
            seed: None,
            periodic_shortcut: true,
        }
    }
}

fn default_version() -> u32 {
    MatcherConfig::default().version
}

fn default_error_exponent() -> u32 {
    MatcherConfig::default().error_exponent
}

fn default_max_text_len() -> usize {
    MatcherConfig::default().max_text_len
}

fn true_value() -> bool {
    true
}
