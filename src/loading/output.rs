//! Output parser resolution
//!
//! New parser types are added to [`OUTPUT_PARSERS`]; call sites stay as they are.

use serde_json::Value;
use tracing::debug;

use super::draft::{Draft, PromptConfig, TYPE_TAG, json_type};
use crate::error::{LoadError, Result};
use crate::prompts::{OutputParser, RegexParser};

const OUTPUT_PARSER: &str = "output_parser";

type ParserBuilder = fn(PromptConfig) -> Result<OutputParser>;

/// Output parser types by `_type` tag
const OUTPUT_PARSERS: &[(&str, ParserBuilder)] = &[("regex_parser", build_regex_parser)];

fn build_regex_parser(config: PromptConfig) -> Result<OutputParser> {
    Ok(RegexParser::from_config(config.into_fields())?.into())
}

/// Tags accepted for `output_parser._type`
pub fn output_parser_types() -> impl Iterator<Item = &'static str> {
    OUTPUT_PARSERS.iter().map(|(tag, _)| *tag)
}

/// Move `output_parser` out of the config and into the draft as a constructed parser
///
/// An absent or `null` parser leaves the draft without one.
pub fn materialize_output_parser(mut draft: Draft) -> Result<Draft> {
    let fields = match draft.config.remove(OUTPUT_PARSER) {
        None | Some(Value::Null) => return Ok(draft),
        Some(Value::Object(fields)) => fields,
        Some(other) => {
            return Err(LoadError::construction(
                "output parser",
                format!("`{}` must be a mapping, got {}", OUTPUT_PARSER, json_type(&other)),
            ));
        }
    };

    let mut nested = PromptConfig::from(fields);
    let tag = match nested.remove(TYPE_TAG) {
        Some(Value::String(tag)) => tag,
        Some(other) => return Err(LoadError::UnsupportedStrategy { tag: other.to_string() }),
        None => {
            return Err(LoadError::construction(
                "output parser",
                format!("`{}` is missing `{}`", OUTPUT_PARSER, TYPE_TAG),
            ));
        }
    };

    let builder = OUTPUT_PARSERS
        .iter()
        .find(|(name, _)| *name == tag)
        .map(|(_, builder)| *builder)
        .ok_or_else(|| LoadError::UnsupportedStrategy { tag: tag.clone() })?;

    debug!(%tag, "materialize_output_parser: building parser");
    draft.output_parser = Some(builder(nested)?);
    Ok(draft)
}
