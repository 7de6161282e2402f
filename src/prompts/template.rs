//! Single-template prompt

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::parser::OutputParser;
use super::validate::{
    DEFAULT_TEMPLATE_FORMAT, check_input_variables, check_template, default_template_format,
    default_validate_template, from_fields,
};
use crate::error::Result;

const TARGET: &str = "PromptTemplate";

/// A prompt made of one template string and its declared input variables
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PromptTemplate {
    pub input_variables: Vec<String>,
    pub template: String,
    pub template_format: String,
    pub validate_template: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_parser: Option<OutputParser>,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct Fields {
    input_variables: Vec<String>,
    template: String,
    #[serde(default = "default_template_format")]
    template_format: String,
    #[serde(default = "default_validate_template")]
    validate_template: bool,
}

impl PromptTemplate {
    /// Create an f-string prompt, validating the placeholders
    pub fn new(template: impl Into<String>, input_variables: Vec<String>) -> Result<Self> {
        Self {
            input_variables,
            template: template.into(),
            template_format: DEFAULT_TEMPLATE_FORMAT.to_string(),
            validate_template: true,
            output_parser: None,
        }
        .validated()
    }

    /// Build from resolved config fields and an already-constructed output parser
    pub fn from_config(fields: Map<String, Value>, output_parser: Option<OutputParser>) -> Result<Self> {
        let fields: Fields = from_fields(TARGET, fields)?;
        Self {
            input_variables: fields.input_variables,
            template: fields.template,
            template_format: fields.template_format,
            validate_template: fields.validate_template,
            output_parser,
        }
        .validated()
    }

    /// Attach an output parser
    pub fn with_output_parser(mut self, parser: impl Into<OutputParser>) -> Self {
        self.output_parser = Some(parser.into());
        self
    }

    fn validated(self) -> Result<Self> {
        check_input_variables(TARGET, &self.input_variables)?;
        check_template(
            TARGET,
            &self.template,
            &self.template_format,
            self.validate_template,
            &self.input_variables,
        )?;
        Ok(self)
    }
}
