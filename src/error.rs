//! Prompt loading error types

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while locating, reading or assembling a prompt
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Both `{field}_path` and `{field}` cannot be provided")]
    ConflictingField { field: String },

    #[error("Unsupported file type '{extension}' for {context}")]
    UnsupportedFormat { extension: String, context: &'static str },

    #[error("Invalid examples file format '{extension}', only json or yaml formats are supported")]
    UnsupportedExamplesFormat { extension: String },

    #[error("Invalid examples format: expected a list of records or a file path, got {found}")]
    InvalidExamplesType { found: String },

    #[error("Unsupported output parser {tag}")]
    UnsupportedStrategy { tag: String },

    #[error("Unknown prompt type {tag}")]
    UnknownPromptType { tag: String },

    #[error("Failed to construct {target}: {message}")]
    Construction { target: &'static str, message: String },

    #[error("Could not find file at {url}")]
    NotFound { url: String },

    #[error("Missing required field `{field}`")]
    MissingField { field: String },

    #[error("Invalid prompt config: {0}")]
    InvalidConfig(String),

    #[error("Nested prompt exceeds maximum depth of {max_depth}")]
    RecursionLimit { max_depth: usize },

    #[error("No source evaluator registered to load {path}")]
    NoSourceEvaluator { path: PathBuf },

    #[error("Source {path} did not define a PROMPT binding")]
    MissingPromptBinding { path: PathBuf },

    #[error("PROMPT binding in {path} is not a prompt template")]
    InvalidPromptBinding { path: PathBuf },

    #[error("Failed to read {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse JSON from {path}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to parse YAML from {path}")]
    Yaml {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
}

impl LoadError {
    /// Shorthand for a construction failure
    pub fn construction(target: &'static str, message: impl Into<String>) -> Self {
        LoadError::Construction {
            target,
            message: message.into(),
        }
    }

    /// Wrap an I/O error with the path that produced it
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        LoadError::Io {
            path: path.into(),
            source,
        }
    }

    /// Check if this error came from the remote hub rather than local input
    pub fn is_remote(&self) -> bool {
        matches!(self, LoadError::NotFound { .. } | LoadError::Network(_))
    }
}

/// Result alias used throughout the loader
pub type Result<T> = std::result::Result<T, LoadError>;
