//! Few-shot example resolution

use std::path::Path;

use serde_json::Value;
use tracing::debug;

use super::draft::{PromptConfig, json_type};
use super::format::{extension_of, parse_json, parse_yaml, read_text};
use crate::error::{LoadError, Result};

const EXAMPLES: &str = "examples";

/// Resolve `examples` into an inline list of records
///
/// The value may already be a list, or a path to a `.json`/`.yaml`/`.yml`
/// file holding one. `examples_path` is accepted as an explicit spelling of
/// the file form and conflicts with `examples`.
pub fn materialize_examples(mut config: PromptConfig) -> Result<PromptConfig> {
    if let Some(path) = config.take_reference(EXAMPLES)? {
        config.insert(EXAMPLES, Value::String(path.to_string_lossy().into_owned()));
    }

    let records = match config.remove(EXAMPLES) {
        Some(Value::Array(records)) => records,
        Some(Value::String(path)) => read_examples_file(Path::new(&path))?,
        Some(other) => {
            return Err(LoadError::InvalidExamplesType {
                found: json_type(&other).to_string(),
            });
        }
        None => {
            return Err(LoadError::MissingField {
                field: EXAMPLES.to_string(),
            });
        }
    };

    if let Some(bad) = records.iter().find(|r| !r.is_object()) {
        return Err(LoadError::InvalidExamplesType {
            found: format!("list containing a {}", json_type(bad)),
        });
    }

    debug!(count = records.len(), "materialize_examples: resolved");
    config.insert(EXAMPLES, Value::Array(records));
    Ok(config)
}

fn read_examples_file(path: &Path) -> Result<Vec<Value>> {
    let extension = extension_of(path);
    let document: Value = match extension.as_str() {
        ".json" => parse_json(path, &read_text(path)?)?,
        ".yaml" | ".yml" => parse_yaml(path, &read_text(path)?)?,
        _ => return Err(LoadError::UnsupportedExamplesFormat { extension }),
    };
    debug!(path = %path.display(), "read_examples_file: loaded");

    match document {
        Value::Array(records) => Ok(records),
        other => Err(LoadError::InvalidExamplesType {
            found: format!("{} in {}", json_type(&other), path.display()),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::fs;
    use tempfile::TempDir;

    fn examples(config: &PromptConfig) -> &Vec<Value> {
        config.get("examples").and_then(Value::as_array).unwrap()
    }

    #[test]
    fn test_inline_list_passthrough() {
        let config = PromptConfig::new().with("examples", json!([{"input": "a"}, {"input": "b"}]));
        let resolved = materialize_examples(config).unwrap();
        assert_eq!(examples(&resolved).len(), 2);
    }

    #[test]
    fn test_json_file_preserves_order() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("examples.json");
        fs::write(&path, r#"[{"n": "1"}, {"n": "2"}, {"n": "3"}]"#).unwrap();

        let config = PromptConfig::new().with("examples", path.to_str().unwrap());
        let resolved = materialize_examples(config).unwrap();

        let order: Vec<_> = examples(&resolved).iter().map(|r| r["n"].as_str().unwrap()).collect();
        assert_eq!(order, vec!["1", "2", "3"]);
    }

    #[test]
    fn test_yaml_and_yml_files() {
        let dir = TempDir::new().unwrap();
        for name in ["examples.yaml", "examples.yml"] {
            let path = dir.path().join(name);
            fs::write(&path, "- input: happy\n  output: sad\n- input: tall\n  output: short\n").unwrap();

            let config = PromptConfig::new().with("examples", path.to_str().unwrap());
            let resolved = materialize_examples(config).unwrap();
            assert_eq!(examples(&resolved)[1]["output"], "short");
        }
    }

    #[test]
    fn test_examples_path_field() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("examples.json");
        fs::write(&path, r#"[{"n": "1"}]"#).unwrap();

        let config = PromptConfig::new().with("examples_path", path.to_str().unwrap());
        let resolved = materialize_examples(config).unwrap();
        assert_eq!(examples(&resolved).len(), 1);
        assert!(!resolved.contains("examples_path"));
    }

    #[test]
    fn test_examples_path_conflict() {
        let config = PromptConfig::new()
            .with("examples", json!([]))
            .with("examples_path", "examples.json");
        let err = materialize_examples(config).unwrap_err();
        assert!(matches!(err, LoadError::ConflictingField { ref field } if field == "examples"));
    }

    #[test]
    fn test_examples_path_conflict_with_non_string_path() {
        for twin in [json!(null), json!(1), json!([{"input": "a"}])] {
            let config = PromptConfig::new()
                .with("examples", json!([]))
                .with("examples_path", twin.clone());
            let err = materialize_examples(config).unwrap_err();
            assert!(matches!(err, LoadError::ConflictingField { ref field } if field == "examples"), "{twin}");
        }
    }

    #[test]
    fn test_unsupported_file_extension() {
        let config = PromptConfig::new().with("examples", "examples.csv");
        let err = materialize_examples(config).unwrap_err();
        assert!(matches!(err, LoadError::UnsupportedExamplesFormat { ref extension } if extension == ".csv"));
    }

    #[test]
    fn test_invalid_types() {
        let err = materialize_examples(PromptConfig::new().with("examples", 3)).unwrap_err();
        assert!(matches!(err, LoadError::InvalidExamplesType { .. }));

        let err = materialize_examples(PromptConfig::new().with("examples", json!({"a": 1}))).unwrap_err();
        assert!(matches!(err, LoadError::InvalidExamplesType { ref found } if found == "mapping"));

        let err = materialize_examples(PromptConfig::new().with("examples", json!(["plain"]))).unwrap_err();
        assert!(matches!(err, LoadError::InvalidExamplesType { .. }));
    }

    #[test]
    fn test_file_must_hold_a_list() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("examples.json");
        fs::write(&path, r#"{"input": "a"}"#).unwrap();

        let config = PromptConfig::new().with("examples", path.to_str().unwrap());
        assert!(matches!(
            materialize_examples(config),
            Err(LoadError::InvalidExamplesType { .. })
        ));
    }

    #[test]
    fn test_missing_examples() {
        let err = materialize_examples(PromptConfig::new()).unwrap_err();
        assert!(matches!(err, LoadError::MissingField { ref field } if field == "examples"));
    }
}
