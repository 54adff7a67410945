// Configuration: where the data file lives

use crate::store::DEFAULT_FILE_NAME;
use eyre::{Context, Result};
use serde::{Deserialize, Serialize};
use std::ffi::OsString;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Environment variable naming a config file
pub const CONFIG_ENV: &str = "FACTURAS_CONFIG";

/// Settings read from an optional YAML file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// JSON data file; relative paths resolve against the working directory
    pub data_file: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_file: PathBuf::from(DEFAULT_FILE_NAME),
        }
    }
}

impl Config {
    /// Load from `path`, falling back to defaults if the file is absent
    pub fn load(path: &Path) -> Result<Self> {
        let content = match fs::read_to_string(path) {
            Ok(c) => c,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(file = ?path, "Config file not found, using defaults");
                return Ok(Self::default());
            }
            Err(e) => return Err(e).context(format!("Failed to read config file {}", path.display())),
        };

        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        let config: Config = serde_yaml::from_str(&content)
            .context(format!("Failed to parse config file {}", path.display()))?;
        debug!(file = ?path, data_file = ?config.data_file, "Loaded config");

        Ok(config)
    }

    /// Per-user config location, e.g. `~/.config/facturas/facturas.yml`
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("facturas").join("facturas.yml"))
    }

    /// Pick the config file: explicit flag, then environment, then per-user default
    pub fn resolve_path(explicit: Option<&Path>, env: Option<OsString>) -> Option<PathBuf> {
        explicit
            .map(Path::to_path_buf)
            .or_else(|| env.filter(|v| !v.is_empty()).map(PathBuf::from))
            .or_else(Self::default_path)
    }

    /// Data file to use, with a command-line override taking precedence
    pub fn data_file(&self, override_path: Option<&Path>) -> PathBuf {
        override_path
            .map(Path::to_path_buf)
            .unwrap_or_else(|| self.data_file.clone())
    }
}
