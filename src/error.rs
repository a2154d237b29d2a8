//! Error types for drf-scaffold

use std::path::PathBuf;
use thiserror::Error;

use crate::templates::TemplateError;

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// drf-scaffold errors
#[derive(Error, Debug)]
pub enum Error {
    #[error("No models provided: {0}")]
    MissingModels(String),

    #[error("Parsing model definitions is not implemented: {0}")]
    UnimplementedParsing(String),

    #[error("Unknown test method '{0}' (expected one of: list, detail, specs, facets, filter)")]
    UnknownMethod(String),

    #[error("Cannot read models file {}: {source}", path.display())]
    ModelsFile {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Config error: {0}")]
    Config(String),

    #[error(transparent)]
    Template(#[from] TemplateError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_norway::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    Other(String),
}

impl From<&str> for Error {
    fn from(s: &str) -> Self {
        Error::Other(s.to_string())
    }
}

impl From<String> for Error {
    fn from(s: String) -> Self {
        Error::Other(s)
    }
}
