use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::model::config::ViewConfig;

/// Default config file name, looked up next to the document
pub const CONFIG_FILE: &str = "phasionary.toml";

/// Error type for reading the view config
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("could not read {path}: {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not parse {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },
}

/// Read the view config at `path`. A missing file gives the defaults.
pub fn read_config(path: &Path) -> Result<ViewConfig, ConfigError> {
    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            debug!(path = %path.display(), "no config file, using defaults");
            return Ok(ViewConfig::default());
        }
        Err(e) => {
            return Err(ConfigError::ReadError {
                path: path.to_path_buf(),
                source: e,
            });
        }
    };
    parse_config(&text).map_err(|source| ConfigError::ParseError {
        path: path.to_path_buf(),
        source,
    })
}

pub fn parse_config(text: &str) -> Result<ViewConfig, toml::de::Error> {
    toml::from_str(text)
}

/// Config path for a document: `phasionary.toml` in the document's directory
pub fn config_path_for(document: &Path) -> PathBuf {
    document
        .parent()
        .map(|dir| dir.join(CONFIG_FILE))
        .unwrap_or_else(|| PathBuf::from(CONFIG_FILE))
}
