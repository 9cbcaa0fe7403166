//! Hint files with JSON-path context in their errors.
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::types::TypeHints;

/// A hint file that exists but cannot be used. Always fatal: hints are written
/// by a previous run or by hand next to the inputs, so a bad one is a setup bug.
#[derive(Debug, Error)]
pub enum HintError {
    #[error("failed to read hint file {}: {source}", path.display())]
    Read { path: PathBuf, source: std::io::Error },
    #[error("malformed hint entry at JSON path {path}: {message}")]
    Malformed { path: String, message: String },
}

/// Deserialize with JSON-path context in error messages.
pub fn from_str_with_path<T: DeserializeOwned>(src: &str) -> Result<T, HintError> {
    let de = &mut serde_json::Deserializer::from_str(src);
    serde_path_to_error::deserialize::<_, T>(de).map_err(|error| HintError::Malformed {
        path: error.path().to_string(),
        message: error.into_inner().to_string(),
    })
}

/// Load hints from `path`; a missing file is an empty table.
pub fn load_hints(path: &Path) -> Result<TypeHints, HintError> {
    if !path.exists() {
        log::info!("no hint file at {}; starting from an empty table", path.display());
        return Ok(TypeHints::default());
    }
    let source = std::fs::read_to_string(path).map_err(|source| HintError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    from_str_with_path(&source)
}
