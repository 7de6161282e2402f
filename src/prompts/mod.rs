//! Prompt template objects
//!
//! These are the finished values a load produces. Each type validates its own
//! fields on construction; rendering them into text is left to the caller.

mod few_shot;
mod parser;
mod template;
mod validate;

use serde::Serialize;

pub use few_shot::{DEFAULT_EXAMPLE_SEPARATOR, Example, FewShotPromptTemplate};
pub use parser::{OutputParser, RegexParser};
pub use template::PromptTemplate;
pub use validate::{DEFAULT_TEMPLATE_FORMAT, RESERVED_VARIABLES, TEMPLATE_FORMATS, fstring_variables};

/// A loaded prompt of any supported type
///
/// Serializes back into config shape, including the `_type` tag.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "_type")]
pub enum Prompt {
    #[serde(rename = "prompt")]
    Simple(PromptTemplate),
    #[serde(rename = "few_shot")]
    FewShot(FewShotPromptTemplate),
}

impl Prompt {
    /// The `_type` tag for this prompt
    pub fn prompt_type(&self) -> &'static str {
        match self {
            Prompt::Simple(_) => "prompt",
            Prompt::FewShot(_) => "few_shot",
        }
    }

    pub fn input_variables(&self) -> &[String] {
        match self {
            Prompt::Simple(p) => &p.input_variables,
            Prompt::FewShot(p) => &p.input_variables,
        }
    }

    pub fn output_parser(&self) -> Option<&OutputParser> {
        match self {
            Prompt::Simple(p) => p.output_parser.as_ref(),
            Prompt::FewShot(p) => p.output_parser.as_ref(),
        }
    }

    pub fn as_simple(&self) -> Option<&PromptTemplate> {
        match self {
            Prompt::Simple(p) => Some(p),
            Prompt::FewShot(_) => None,
        }
    }

    pub fn as_few_shot(&self) -> Option<&FewShotPromptTemplate> {
        match self {
            Prompt::FewShot(p) => Some(p),
            Prompt::Simple(_) => None,
        }
    }
}

impl From<PromptTemplate> for Prompt {
    fn from(prompt: PromptTemplate) -> Self {
        Prompt::Simple(prompt)
    }
}

impl From<FewShotPromptTemplate> for Prompt {
    fn from(prompt: FewShotPromptTemplate) -> Self {
        Prompt::FewShot(prompt)
    }
}
