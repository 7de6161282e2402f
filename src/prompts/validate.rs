//! Construction-time checks shared by the template types

use std::collections::BTreeSet;

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use tracing::debug;

use crate::error::{LoadError, Result};

/// Template format used when a config does not name one
pub const DEFAULT_TEMPLATE_FORMAT: &str = "f-string";

/// Formats a template may declare
pub const TEMPLATE_FORMATS: &[&str] = &["f-string", "jinja2"];

/// Input variable names reserved for the model call itself
pub const RESERVED_VARIABLES: &[&str] = &["stop"];

pub(crate) fn default_template_format() -> String {
    DEFAULT_TEMPLATE_FORMAT.to_string()
}

pub(crate) fn default_validate_template() -> bool {
    true
}

/// Deserialize the remaining config fields into a constructor's field set
pub(crate) fn from_fields<T: DeserializeOwned>(target: &'static str, fields: Map<String, Value>) -> Result<T> {
    serde_json::from_value(Value::Object(fields)).map_err(|e| LoadError::construction(target, e.to_string()))
}

pub(crate) fn check_input_variables(target: &'static str, input_variables: &[String]) -> Result<()> {
    for reserved in RESERVED_VARIABLES {
        if input_variables.iter().any(|v| v == reserved) {
            return Err(LoadError::construction(
                target,
                format!("cannot have an input variable named '{}', as it is used internally", reserved),
            ));
        }
    }
    Ok(())
}

/// Check the template format and, for f-strings, that every placeholder is declared
pub(crate) fn check_template(
    target: &'static str,
    template: &str,
    template_format: &str,
    validate_template: bool,
    input_variables: &[String],
) -> Result<()> {
    if !TEMPLATE_FORMATS.contains(&template_format) {
        return Err(LoadError::construction(
            target,
            format!(
                "invalid template format '{}', should be one of {}",
                template_format,
                TEMPLATE_FORMATS.join(", ")
            ),
        ));
    }

    if !validate_template || template_format != DEFAULT_TEMPLATE_FORMAT {
        debug!(%template_format, validate_template, "check_template: skipping placeholder check");
        return Ok(());
    }

    let placeholders = fstring_variables(template).map_err(|e| LoadError::construction(target, e))?;
    for name in &placeholders {
        if !input_variables.contains(name) {
            return Err(LoadError::construction(
                target,
                format!("invalid prompt schema; missing input variable '{}'", name),
            ));
        }
    }
    if let Some(unused) = input_variables.iter().find(|v| !placeholders.contains(*v)) {
        return Err(LoadError::construction(
            target,
            format!("invalid prompt schema; input variable '{}' is not used in the template", unused),
        ));
    }
    Ok(())
}

/// Collect the named placeholders of an f-string style template
///
/// `{{` and `}}` are literal braces. A placeholder name ends at the first
/// conversion (`!`), format spec (`:`), attribute (`.`) or index (`[`).
/// Placeholders nested in a format spec (`{x:{width}}`) are collected too.
pub fn fstring_variables(template: &str) -> std::result::Result<BTreeSet<String>, String> {
    let mut names = BTreeSet::new();
    let mut chars = template.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '{' => {
                if chars.peek() == Some(&'{') {
                    chars.next();
                    continue;
                }

                let mut field = String::new();
                let mut nested = 0usize;
                let mut closed = false;
                for c in chars.by_ref() {
                    match c {
                        '{' => {
                            nested += 1;
                            field.push(c);
                        }
                        '}' if nested > 0 => {
                            nested -= 1;
                            field.push(c);
                        }
                        '}' => {
                            closed = true;
                            break;
                        }
                        _ => field.push(c),
                    }
                }
                if !closed {
                    return Err("unclosed '{' in template".to_string());
                }

                let name: String = field
                    .chars()
                    .take_while(|c| !matches!(c, '!' | ':' | '.' | '['))
                    .collect();
                if name.is_empty() || name.chars().all(|c| c.is_ascii_digit()) {
                    return Err(format!("positional placeholder '{{{}}}' is not supported", field));
                }
                names.extend(fstring_variables(&field[name.len()..])?);
                names.insert(name);
            }
            '}' => {
                if chars.peek() == Some(&'}') {
                    chars.next();
                    continue;
                }
                return Err("single '}' encountered in template".to_string());
            }
            _ => {}
        }
    }

    Ok(names)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn vars(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_fstring_variables_simple() {
        let names = fstring_variables("Tell me a {adjective} joke about {content}.").unwrap();
        assert_eq!(names.into_iter().collect::<Vec<_>>(), vec!["adjective", "content"]);
    }

    #[test]
    fn test_fstring_variables_escapes_and_specs() {
        let names = fstring_variables("{{literal}} {price:.2f} {user.name} {items[0]} {x!r}").unwrap();
        assert_eq!(names.into_iter().collect::<Vec<_>>(), vec!["items", "price", "user", "x"]);
    }

    #[test]
    fn test_fstring_variables_nested_spec() {
        let names = fstring_variables("{x:{width}} {y:>{align}.{precision}f}").unwrap();
        assert_eq!(
            names.into_iter().collect::<Vec<_>>(),
            vec!["align", "precision", "width", "x", "y"]
        );
    }

    #[test]
    fn test_check_template_nested_spec_must_be_declared() {
        let err = check_template("PromptTemplate", "{x:{width}}", "f-string", true, &vars(&["x"])).unwrap_err();
        assert!(err.to_string().contains("width"));
        check_template("PromptTemplate", "{x:{width}}", "f-string", true, &vars(&["x", "width"])).unwrap();
    }

    #[test]
    fn test_fstring_variables_unbalanced() {
        assert!(fstring_variables("hello {name").is_err());
        assert!(fstring_variables("hello name}").is_err());
        assert!(fstring_variables("hello {}").is_err());
        assert!(fstring_variables("hello {0}").is_err());
    }

    #[test]
    fn test_check_template_missing_variable() {
        let err = check_template("PromptTemplate", "Hi {name} from {place}", "f-string", true, &vars(&["name"]))
            .unwrap_err();
        assert!(err.to_string().contains("place"));
    }

    #[test]
    fn test_check_template_rejects_unused_variable() {
        let err = check_template("PromptTemplate", "Hi {name}", "f-string", true, &vars(&["name", "unused"]))
            .unwrap_err();
        assert!(matches!(err, LoadError::Construction { .. }));
        assert!(err.to_string().contains("unused"));
    }

    #[test]
    fn test_check_template_skips_when_disabled_or_jinja() {
        check_template("PromptTemplate", "Hi {name}", "f-string", false, &[]).unwrap();
        check_template("PromptTemplate", "Hi {{ name }}", "jinja2", true, &[]).unwrap();
    }

    #[test]
    fn test_check_template_rejects_unknown_format() {
        let err = check_template("PromptTemplate", "Hi", "mustache", true, &[]).unwrap_err();
        assert!(err.to_string().contains("mustache"));
    }

    #[test]
    fn test_reserved_input_variable() {
        assert!(check_input_variables("PromptTemplate", &vars(&["question", "stop"])).is_err());
        assert!(check_input_variables("PromptTemplate", &vars(&["question"])).is_ok());
    }

    proptest! {
        #[test]
        fn prop_declared_placeholders_are_found(names in prop::collection::btree_set("[a-z][a-z0-9_]{0,8}", 1..6)) {
            let template = names.iter().map(|n| format!("<{{{}}}>", n)).collect::<Vec<_>>().join(" and ");
            let found = fstring_variables(&template).unwrap();
            prop_assert_eq!(found, names);
        }

        #[test]
        fn prop_escaped_text_has_no_placeholders(text in ".*") {
            let escaped = text.replace('{', "{{").replace('}', "}}");
            let found = fstring_variables(&escaped).unwrap();
            prop_assert!(found.is_empty());
        }
    }
}
