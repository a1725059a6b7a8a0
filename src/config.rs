//! Configuration management for command replay
//!
//! Supports loading configuration from:
//! - Default values
//! - Config file (records.toml)
//! - Environment variables (RECORDS__*)
//!
//! ## Example config file (records.toml):
//! ```toml
//! [source]
//! dir = "sequence"
//! order = "name"
//! recursive = false
//!
//! [policy]
//! missing_delete = "error"
//!
//! [report]
//! snapshot = true
//! ```

use config_crate::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::operation::DeletePolicy;
use crate::source::SourceOrder;

/// Main configuration for a replay run
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReplayConfig {
    /// Where command files come from
    #[serde(default)]
    pub source: SourceConfig,

    /// How failures are treated
    #[serde(default)]
    pub policy: PolicyConfig,

    /// What gets printed
    #[serde(default)]
    pub report: ReportConfig,
}

/// Command source configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceConfig {
    /// Directory holding the command sequence
    #[serde(default = "default_sequence_dir")]
    pub dir: PathBuf,

    /// Replay order of the files in `dir`
    #[serde(default)]
    pub order: SourceOrder,

    /// Descend into subdirectories
    #[serde(default)]
    pub recursive: bool,
}

/// Failure policy
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PolicyConfig {
    /// Delete of an identity that is not present
    #[serde(default)]
    pub missing_delete: DeletePolicy,
}

/// Report configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Print the whole collection after every command
    #[serde(default = "default_true")]
    pub snapshot: bool,
}

fn default_sequence_dir() -> PathBuf {
    PathBuf::from("sequence")
}

fn default_true() -> bool {
    true
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            dir: default_sequence_dir(),
            order: SourceOrder::Name,
            recursive: false,
        }
    }
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self { snapshot: true }
    }
}

impl ReplayConfig {
    /// Load configuration from default locations
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(None)
    }

    /// Load configuration, adding a specific file on top of the defaults
    pub fn load_from(config_path: Option<&str>) -> Result<Self, ConfigError> {
        let mut builder = Config::builder();

        let config_locations = ["records.toml", ".records.toml", "config/records.toml"];

        for location in config_locations {
            builder = builder.add_source(File::with_name(location).required(false));
        }

        if let Some(config_dir) = directories::ProjectDirs::from("dev", "school", "records") {
            let xdg_config = config_dir.config_dir().join("records.toml");
            if xdg_config.exists() {
                builder = builder.add_source(File::from(xdg_config).required(false));
            }
        }

        if let Some(path) = config_path {
            builder = builder.add_source(File::with_name(path).required(true));
        }

        // RECORDS__POLICY__MISSING_DELETE=ignore
        builder = builder.add_source(
            Environment::with_prefix("RECORDS")
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder.build()?;
        config.try_deserialize()
    }

    /// Save configuration to a file
    pub fn save(&self, path: &str) -> std::io::Result<()> {
        let content = self
            .to_toml()
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
        std::fs::write(path, content)
    }

    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }

    /// Sequence directory as configured; relative paths are left relative
    pub fn sequence_dir(&self) -> &Path {
        &self.source.dir
    }
}
