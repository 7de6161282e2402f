//! `_type` dispatch from a config to a constructed prompt
//!
//! New prompt types are added to [`PROMPT_TYPES`]; call sites stay as they are.

use serde_json::Value;
use tracing::debug;

use super::Loader;
use super::draft::{Draft, PromptConfig, TYPE_TAG, json_type};
use super::examples::materialize_examples;
use super::fields::materialize_field;
use super::output::materialize_output_parser;
use crate::error::{LoadError, Result};
use crate::prompts::{FewShotPromptTemplate, Prompt, PromptTemplate};

/// Prompt type used when a config has no `_type`
pub const DEFAULT_PROMPT_TYPE: &str = "prompt";

const EXAMPLE_PROMPT: &str = "example_prompt";

type PromptBuilder = fn(&Loader, PromptConfig, usize) -> Result<Prompt>;

/// Prompt types by `_type` tag
const PROMPT_TYPES: &[(&str, PromptBuilder)] = &[("prompt", build_prompt), ("few_shot", build_few_shot)];

/// Tags accepted for a prompt's `_type`
pub fn prompt_types() -> impl Iterator<Item = &'static str> {
    PROMPT_TYPES.iter().map(|(tag, _)| *tag)
}

/// Resolve a config into a prompt; `depth` is 1 for a top-level config
pub(crate) fn resolve(loader: &Loader, mut config: PromptConfig, depth: usize) -> Result<Prompt> {
    let max_depth = loader.config().max_depth;
    if depth > max_depth {
        return Err(LoadError::RecursionLimit { max_depth });
    }

    let tag = match config.remove(TYPE_TAG) {
        None => DEFAULT_PROMPT_TYPE.to_string(),
        Some(Value::String(tag)) => tag,
        Some(other) => return Err(LoadError::UnknownPromptType { tag: other.to_string() }),
    };

    let builder = PROMPT_TYPES
        .iter()
        .find(|(name, _)| *name == tag)
        .map(|(_, builder)| *builder)
        .ok_or_else(|| LoadError::UnknownPromptType { tag: tag.clone() })?;

    debug!(%tag, depth, "resolve: dispatching");
    builder(loader, config, depth)
}

fn build_prompt(_loader: &Loader, config: PromptConfig, _depth: usize) -> Result<Prompt> {
    let config = materialize_field("template", config)?;
    let draft = materialize_output_parser(Draft::new(config))?;

    Ok(PromptTemplate::from_config(draft.config.into_fields(), draft.output_parser)?.into())
}

fn build_few_shot(loader: &Loader, config: PromptConfig, depth: usize) -> Result<Prompt> {
    // suffix before prefix, always
    let config = materialize_field("suffix", config)?;
    let config = materialize_field("prefix", config)?;

    let mut draft = materialize_example_prompt(loader, Draft::new(config), depth)?;
    draft.config = materialize_examples(draft.config)?;
    let draft = materialize_output_parser(draft)?;

    let example_prompt = draft.example_prompt.ok_or_else(|| LoadError::MissingField {
        field: EXAMPLE_PROMPT.to_string(),
    })?;
    Ok(FewShotPromptTemplate::from_config(draft.config.into_fields(), example_prompt, draft.output_parser)?.into())
}

/// Resolve the per-example sub-prompt from a file reference or an inline config
fn materialize_example_prompt(loader: &Loader, mut draft: Draft, depth: usize) -> Result<Draft> {
    let example_prompt = match draft.config.take_reference(EXAMPLE_PROMPT)? {
        Some(path) => {
            debug!(path = %path.display(), "materialize_example_prompt: loading from path");
            loader.load_at_depth(&path, depth + 1)?
        }
        None => match draft.config.remove(EXAMPLE_PROMPT) {
            Some(Value::Object(fields)) => resolve(loader, PromptConfig::from(fields), depth + 1)?,
            Some(other) => {
                return Err(LoadError::construction(
                    "FewShotPromptTemplate",
                    format!("`{}` must be a mapping, got {}", EXAMPLE_PROMPT, json_type(&other)),
                ));
            }
            None => {
                return Err(LoadError::MissingField {
                    field: EXAMPLE_PROMPT.to_string(),
                });
            }
        },
    };

    draft.example_prompt = Some(example_prompt);
    Ok(draft)
}
