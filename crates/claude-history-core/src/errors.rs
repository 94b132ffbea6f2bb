//! Error types for the core crate

use thiserror::Error;

/// Core errors
#[derive(Error, Debug)]
pub enum ExportError {
    #[error("Unknown language code: {0}")]
    UnknownLanguage(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
