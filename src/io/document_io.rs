use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::model::Project;

/// Error type for loading a document
#[derive(Debug, thiserror::Error)]
pub enum DocumentError {
    #[error("could not read {path}: {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not parse {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// Load a project document from a JSON file
pub fn read_document(path: &Path) -> Result<Project, DocumentError> {
    let text = fs::read_to_string(path).map_err(|e| DocumentError::ReadError {
        path: path.to_path_buf(),
        source: e,
    })?;
    let project: Project =
        serde_json::from_str(&text).map_err(|e| DocumentError::ParseError {
            path: path.to_path_buf(),
            source: e,
        })?;
    debug!(
        path = %path.display(),
        categories = project.categories.len(),
        "loaded document"
    );
    Ok(project)
}
