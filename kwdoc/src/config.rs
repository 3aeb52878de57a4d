//! JSON configuration file loading.

use kwdoc_core::Config;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{error, info, warn};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file not found: {}", path.display())]
    NotFound { path: PathBuf },
    #[error("failed to read config file {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("invalid JSON in config file {}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

pub fn load(path: &Path) -> Result<Config, ConfigError> {
    let text = std::fs::read_to_string(path).map_err(|source| match source.kind() {
        io::ErrorKind::NotFound => ConfigError::NotFound {
            path: path.to_path_buf(),
        },
        _ => ConfigError::Read {
            path: path.to_path_buf(),
            source,
        },
    })?;
    serde_json::from_str(&text).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Load the configuration, falling back to defaults on any problem.
pub fn load_or_default(path: Option<&Path>) -> Config {
    let Some(path) = path else {
        return Config::default();
    };
    match load(path) {
        Ok(config) => {
            info!("loaded configuration from {}", path.display());
            config
        }
        Err(e @ ConfigError::NotFound { .. }) => {
            warn!("{e}; using defaults");
            Config::default()
        }
        Err(e) => {
            let cause = std::error::Error::source(&e)
                .map(|s| format!(": {s}"))
                .unwrap_or_default();
            error!("{e}{cause}; using defaults");
            Config::default()
        }
    }
}
