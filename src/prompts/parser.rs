//! Output parser strategies attached to a prompt
//!
//! Only the construction config is modelled here. Running a parser over
//! model output belongs to whoever consumes the loaded prompt.

use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::validate::from_fields;
use crate::error::{LoadError, Result};

/// A constructed output parsing strategy
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "_type")]
pub enum OutputParser {
    /// Extract named groups with a regular expression
    #[serde(rename = "regex_parser")]
    Regex(RegexParser),
}

impl OutputParser {
    /// The `_type` tag this parser is configured with
    pub fn parser_type(&self) -> &'static str {
        match self {
            OutputParser::Regex(_) => "regex_parser",
        }
    }
}

impl From<RegexParser> for OutputParser {
    fn from(parser: RegexParser) -> Self {
        OutputParser::Regex(parser)
    }
}

/// Regex extraction config: capture group N maps to `output_keys[N-1]`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RegexParser {
    pub regex: String,
    pub output_keys: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_output_key: Option<String>,
}

impl RegexParser {
    /// Create a parser, checking that the expression compiles
    pub fn new(regex: impl Into<String>, output_keys: Vec<String>) -> Result<Self> {
        Self {
            regex: regex.into(),
            output_keys,
            default_output_key: None,
        }
        .validated()
    }

    /// Build from the fields of an `output_parser` config (tag already removed)
    pub fn from_config(fields: Map<String, Value>) -> Result<Self> {
        from_fields::<Self>("RegexParser", fields)?.validated()
    }

    /// Set the key that receives the whole text when the regex does not match
    pub fn with_default_output_key(mut self, key: impl Into<String>) -> Self {
        self.default_output_key = Some(key.into());
        self
    }

    fn validated(self) -> Result<Self> {
        Regex::new(&self.regex)
            .map_err(|e| LoadError::construction("RegexParser", format!("invalid regex '{}': {}", self.regex, e)))?;
        Ok(self)
    }
}
