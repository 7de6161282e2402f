//! Few-shot prompt: prefix, formatted examples, suffix

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::Prompt;
use super::parser::OutputParser;
use super::validate::{
    check_input_variables, check_template, default_template_format, default_validate_template, from_fields,
};
use crate::error::Result;

const TARGET: &str = "FewShotPromptTemplate";

/// Separator placed between rendered examples when a config omits one
pub const DEFAULT_EXAMPLE_SEPARATOR: &str = "\n\n";

/// One example record: variable name to value
pub type Example = Map<String, Value>;

/// A prompt assembled from a prefix, one sub-prompt per example and a suffix
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FewShotPromptTemplate {
    pub examples: Vec<Example>,
    pub example_prompt: Box<Prompt>,
    pub suffix: String,
    pub input_variables: Vec<String>,
    pub example_separator: String,
    pub prefix: String,
    pub template_format: String,
    pub validate_template: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_parser: Option<OutputParser>,
}

fn default_example_separator() -> String {
    DEFAULT_EXAMPLE_SEPARATOR.to_string()
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct Fields {
    examples: Vec<Example>,
    suffix: String,
    input_variables: Vec<String>,
    #[serde(default = "default_example_separator")]
    example_separator: String,
    #[serde(default)]
    prefix: String,
    #[serde(default = "default_template_format")]
    template_format: String,
    #[serde(default = "default_validate_template")]
    validate_template: bool,
}

impl FewShotPromptTemplate {
    /// Build from resolved config fields plus the already-constructed sub-objects
    pub fn from_config(
        fields: Map<String, Value>,
        example_prompt: Prompt,
        output_parser: Option<OutputParser>,
    ) -> Result<Self> {
        let fields: Fields = from_fields(TARGET, fields)?;
        let prompt = Self {
            examples: fields.examples,
            example_prompt: Box::new(example_prompt),
            suffix: fields.suffix,
            input_variables: fields.input_variables,
            example_separator: fields.example_separator,
            prefix: fields.prefix,
            template_format: fields.template_format,
            validate_template: fields.validate_template,
            output_parser,
        };

        check_input_variables(TARGET, &prompt.input_variables)?;
        check_template(
            TARGET,
            &format!("{}{}", prompt.prefix, prompt.suffix),
            &prompt.template_format,
            prompt.validate_template,
            &prompt.input_variables,
        )?;
        Ok(prompt)
    }
}
