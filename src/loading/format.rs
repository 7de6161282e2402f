//! File format detection and reading

use std::fs;
use std::path::Path;

use serde::de::DeserializeOwned;
use tracing::debug;

use super::draft::PromptConfig;
use super::plugin::{SourceEvaluator, evaluate_source};
use crate::error::{LoadError, Result};
use crate::prompts::Prompt;

/// Serialization of a top-level prompt file, chosen by extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    Json,
    Yaml,
    /// Source text handed to a registered evaluator
    Source,
}

impl FileFormat {
    pub fn from_path(path: &Path) -> Result<Self> {
        let extension = extension_of(path);
        match extension.as_str() {
            ".json" => Ok(FileFormat::Json),
            ".yaml" | ".yml" => Ok(FileFormat::Yaml),
            ".py" => Ok(FileFormat::Source),
            _ => Err(LoadError::UnsupportedFormat {
                extension,
                context: "prompt file",
            }),
        }
    }
}

/// What reading a prompt file produced
#[derive(Debug)]
pub enum Loaded {
    /// A config still to be resolved
    Config(PromptConfig),
    /// A finished prompt from a source file
    Prompt(Prompt),
}

/// Read a prompt file into a config, or into a prompt for source files
pub fn read_prompt_file(path: &Path, evaluator: Option<&dyn SourceEvaluator>) -> Result<Loaded> {
    let format = FileFormat::from_path(path)?;
    debug!(path = %path.display(), ?format, "read_prompt_file: called");

    let text = read_text(path)?;
    match format {
        FileFormat::Json => Ok(Loaded::Config(PromptConfig::from_value(parse_json(path, &text)?)?)),
        FileFormat::Yaml => Ok(Loaded::Config(PromptConfig::from_value(parse_yaml(path, &text)?)?)),
        FileFormat::Source => Ok(Loaded::Prompt(evaluate_source(evaluator, path, &text)?)),
    }
}

/// Extension including the leading dot, or an empty string
pub(crate) fn extension_of(path: &Path) -> String {
    path.extension()
        .map(|ext| format!(".{}", ext.to_string_lossy()))
        .unwrap_or_default()
}

pub(crate) fn read_text(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|e| LoadError::io(path, e))
}

pub(crate) fn parse_json<T: DeserializeOwned>(path: &Path, text: &str) -> Result<T> {
    serde_json::from_str(text).map_err(|source| LoadError::Json {
        path: path.to_path_buf(),
        source,
    })
}

pub(crate) fn parse_yaml<T: DeserializeOwned>(path: &Path, text: &str) -> Result<T> {
    serde_yaml::from_str(text).map_err(|source| LoadError::Yaml {
        path: path.to_path_buf(),
        source,
    })
}
