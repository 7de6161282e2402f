//! Inline-or-file field resolution (`template` / `template_path` and friends)

use serde_json::Value;
use tracing::debug;

use super::draft::PromptConfig;
use super::format::{extension_of, read_text};
use crate::error::{LoadError, Result};

/// The only extension accepted for a `*_path` text reference
pub const TEXT_EXTENSION: &str = ".txt";

/// Resolve `name` from `name_path` if the config references a file
///
/// The file's full text becomes the value of `name` and `name_path` is
/// dropped. A config carrying both forms is rejected.
pub fn materialize_field(name: &str, mut config: PromptConfig) -> Result<PromptConfig> {
    let Some(path) = config.take_reference(name)? else {
        return Ok(config);
    };

    let extension = extension_of(&path);
    if extension != TEXT_EXTENSION {
        return Err(LoadError::UnsupportedFormat {
            extension,
            context: "template file",
        });
    }

    debug!(field = %name, path = %path.display(), "materialize_field: reading from file");
    let text = read_text(&path)?;
    config.insert(name, Value::String(text));
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use serde_json::json;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_no_path_is_unchanged() {
        let config = PromptConfig::new().with("template", "inline {x}");
        let resolved = materialize_field("template", config.clone()).unwrap();
        assert_eq!(resolved, config);
    }

    #[test]
    fn test_reads_text_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("suffix.txt");
        fs::write(&path, "Input: {adjective}\nOutput:").unwrap();

        let config = PromptConfig::new().with("suffix_path", path.to_str().unwrap());
        let resolved = materialize_field("suffix", config).unwrap();

        assert_eq!(resolved.get("suffix").unwrap(), "Input: {adjective}\nOutput:");
        assert!(!resolved.contains("suffix_path"));
    }

    #[test]
    fn test_conflicting_forms() {
        let config = PromptConfig::new()
            .with("template", "inline")
            .with("template_path", "template.txt");

        let err = materialize_field("template", config).unwrap_err();
        assert!(matches!(err, LoadError::ConflictingField { ref field } if field == "template"));
    }

    #[test]
    fn test_conflict_reported_before_path_type() {
        for twin in [json!(null), json!(42), json!(["template.txt"])] {
            let config = PromptConfig::new().with("template", "inline").with("template_path", twin.clone());
            let err = materialize_field("template", config).unwrap_err();
            assert!(matches!(err, LoadError::ConflictingField { ref field } if field == "template"), "{twin}");
        }
    }

    #[test]
    fn test_rejects_non_text_extension() {
        let config = PromptConfig::new().with("prefix_path", "prefix.md");
        let err = materialize_field("prefix", config).unwrap_err();
        assert!(matches!(err, LoadError::UnsupportedFormat { ref extension, .. } if extension == ".md"));
    }

    #[test]
    fn test_missing_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("absent.txt");
        let config = PromptConfig::new().with("template_path", path.to_str().unwrap());
        assert!(matches!(materialize_field("template", config), Err(LoadError::Io { .. })));
    }

    #[test]
    fn test_other_fields_untouched() {
        let config = PromptConfig::new().with("prefix", "keep me").with("suffix", "and me");
        let resolved = materialize_field("template", config.clone()).unwrap();
        assert_eq!(resolved, config);
    }

    proptest! {
        #[test]
        fn prop_file_text_is_preserved_exactly(text in "(?s).{0,200}") {
            let dir = TempDir::new().unwrap();
            let path = dir.path().join("template.txt");
            fs::write(&path, &text).unwrap();

            let config = PromptConfig::new().with("template_path", path.to_str().unwrap());
            let resolved = materialize_field("template", config).unwrap();
            prop_assert_eq!(resolved.get("template").and_then(Value::as_str), Some(text.as_str()));
        }
    }
}
