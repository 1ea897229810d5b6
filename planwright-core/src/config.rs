//! Plan configuration, read from a TOML file such as `plan.toml`:
//!
//! ```toml
//! name = "weekly"
//! description = "Weekly constrained plan"
//! current = "2024-06-03T00:00:00"
//! logfile = "logs/plan.log"
//! log_filter = "info"
//! ```

use planwright_types::PlanDate;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::{PlanError, PlanResult};

/// Top-level planning configuration applied when the context is built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanConfig {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Reference time; the wall-clock time at construction when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current: Option<PlanDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logfile: Option<PathBuf>,
    #[serde(default = "default_log_filter")]
    pub log_filter: String,
}

fn default_log_filter() -> String {
    "info".to_string()
}

impl Default for PlanConfig {
    fn default() -> Self {
        Self {
            name: String::new(),
            description: String::new(),
            current: None,
            logfile: None,
            log_filter: default_log_filter(),
        }
    }
}

impl PlanConfig {
    /// Parses a configuration document, rejecting malformed input.
    pub fn from_toml_str(contents: &str) -> PlanResult<Self> {
        toml::from_str(contents).map_err(|e| PlanError::Config(e.to_string()))
    }

    /// Loads configuration from `path`.
    /// Falls back to defaults with a warning on read or parse errors.
    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            info!("No plan configuration at {:?}, using defaults", path);
            return Self::default();
        }

        match std::fs::read_to_string(path) {
            Ok(contents) => match Self::from_toml_str(&contents) {
                Ok(config) => {
                    info!("Loaded plan configuration from {:?}", path);
                    config
                }
                Err(e) => {
                    warn!("{} in {:?}. Falling back to defaults.", e, path);
                    Self::default()
                }
            },
            Err(e) => {
                warn!("Failed to read plan configuration {:?}: {}", path, e);
                Self::default()
            }
        }
    }

    /// Serializes the configuration back to TOML.
    pub fn to_toml_string(&self) -> PlanResult<String> {
        toml::to_string(self).map_err(|e| PlanError::Config(e.to_string()))
    }
}
