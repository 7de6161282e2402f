//! Configuration values threaded through the resolution steps

use std::path::PathBuf;

use serde_json::{Map, Value};

use crate::error::{LoadError, Result};
use crate::prompts::{OutputParser, Prompt};

/// Reserved field selecting which object a config constructs
pub const TYPE_TAG: &str = "_type";

/// Suffix marking a field that references a file instead of holding the value
pub const PATH_SUFFIX: &str = "_path";

/// A prompt configuration: field name to raw value
///
/// Each resolution step takes the config by value and hands back the
/// updated one, so no step ever sees another's half-finished state.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PromptConfig {
    fields: Map<String, Value>,
}

impl PromptConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap a parsed document, which must be a mapping
    pub fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Object(fields) => Ok(Self { fields }),
            other => Err(LoadError::InvalidConfig(format!(
                "expected a mapping at the top level, got {}",
                json_type(&other)
            ))),
        }
    }

    pub fn from_json_str(text: &str) -> Result<Self> {
        let value = serde_json::from_str(text).map_err(|source| LoadError::Json {
            path: PathBuf::from("<string>"),
            source,
        })?;
        Self::from_value(value)
    }

    pub fn from_yaml_str(text: &str) -> Result<Self> {
        let value = serde_yaml::from_str(text).map_err(|source| LoadError::Yaml {
            path: PathBuf::from("<string>"),
            source,
        })?;
        Self::from_value(value)
    }

    /// Builder-style insert
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(key.into(), value.into());
        self
    }

    pub fn contains(&self, key: &str) -> bool {
        self.fields.contains_key(key)
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    pub fn insert(&mut self, key: impl Into<String>, value: Value) {
        self.fields.insert(key.into(), value);
    }

    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.fields.remove(key)
    }

    /// Remove a `*_path` style field, requiring it to be a string
    pub fn remove_path(&mut self, key: &str) -> Result<Option<PathBuf>> {
        match self.fields.remove(key) {
            None => Ok(None),
            Some(Value::String(path)) => Ok(Some(PathBuf::from(path))),
            Some(other) => Err(LoadError::InvalidConfig(format!(
                "`{}` must be a file path string, got {}",
                key,
                json_type(&other)
            ))),
        }
    }

    /// Take the file reference for `name` from its `name_path` twin
    ///
    /// Both forms present is a conflict, whatever the twin holds.
    pub fn take_reference(&mut self, name: &str) -> Result<Option<PathBuf>> {
        let path_key = format!("{}{}", name, PATH_SUFFIX);
        if self.contains(&path_key) && self.contains(name) {
            return Err(LoadError::ConflictingField { field: name.to_string() });
        }
        self.remove_path(&path_key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    pub fn into_fields(self) -> Map<String, Value> {
        self.fields
    }
}

impl From<Map<String, Value>> for PromptConfig {
    fn from(fields: Map<String, Value>) -> Self {
        Self { fields }
    }
}

impl TryFrom<Value> for PromptConfig {
    type Error = LoadError;

    fn try_from(value: Value) -> Result<Self> {
        Self::from_value(value)
    }
}

/// A config part-way through resolution, plus the objects built from it so far
///
/// A sub-object moves out of `config` when it is materialized, so the raw
/// field and its constructed value never coexist.
#[derive(Debug, Clone, Default)]
pub struct Draft {
    pub config: PromptConfig,
    pub output_parser: Option<OutputParser>,
    pub example_prompt: Option<Prompt>,
}

impl Draft {
    pub fn new(config: PromptConfig) -> Self {
        Self {
            config,
            output_parser: None,
            example_prompt: None,
        }
    }
}

/// Name of a JSON value's type, for error messages
pub(crate) fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "list",
        Value::Object(_) => "mapping",
    }
}
