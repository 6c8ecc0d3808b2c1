//! Input file loading.
//!
//! Calculation inputs are read from TOML or JSON files, picked by extension.
//! The core input records reject unknown fields, so a misspelt key fails the
//! load instead of silently falling back to a default.

use std::fs;
use std::path::Path;

use serde::de::DeserializeOwned;
use thiserror::Error;

/// Error loading an input document.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("input error: {field}: {message}")]
pub struct InputError {
    /// What was being loaded (`"input"`, `"toml"`, `"json"`)
    pub field: String,
    pub message: String,
}

/// Supported input encodings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFormat {
    Toml,
    Json,
}

impl InputFormat {
    /// Pick the format from a file extension (case-insensitive).
    pub fn from_path(path: &Path) -> Result<Self, InputError> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();
        match ext.as_str() {
            "toml" => Ok(InputFormat::Toml),
            "json" => Ok(InputFormat::Json),
            _ => Err(InputError {
                field: "input".to_string(),
                message: format!("unsupported file type \"{}\", expected .toml or .json", path.display()),
            }),
        }
    }
}

/// Read and parse an input document from disk.
pub fn load<T: DeserializeOwned>(path: &Path) -> Result<T, InputError> {
    let format = InputFormat::from_path(path)?;
    let content = fs::read_to_string(path).map_err(|e| InputError {
        field: "input".to_string(),
        message: format!("cannot read \"{}\": {e}", path.display()),
    })?;
    tracing::debug!(path = %path.display(), ?format, bytes = content.len(), "loaded input");
    parse(&content, format)
}

/// Parse an input document already held in memory.
pub fn parse<T: DeserializeOwned>(content: &str, format: InputFormat) -> Result<T, InputError> {
    match format {
        InputFormat::Toml => from_toml_str(content),
        InputFormat::Json => from_json_str(content),
    }
}

pub fn from_toml_str<T: DeserializeOwned>(s: &str) -> Result<T, InputError> {
    toml::from_str(s).map_err(|e| InputError {
        field: "toml".to_string(),
        message: e.to_string(),
    })
}

pub fn from_json_str<T: DeserializeOwned>(s: &str) -> Result<T, InputError> {
    serde_json::from_str(s).map_err(|e| InputError {
        field: "json".to_string(),
        message: e.to_string(),
    })
}
