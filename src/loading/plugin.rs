//! Source-file prompts (`.py`)
//!
//! A source file is never executed by the loader. Instead the host links in a
//! [`SourceEvaluator`] at build time and the loader hands it the file text.
//! Whatever an evaluator does runs with the loader's privileges: registering
//! one is the caller's decision to trust every source file it will be given.

use std::collections::HashMap;
use std::path::Path;

use serde_json::Value;
use tracing::debug;

use crate::error::{LoadError, Result};
use crate::prompts::Prompt;

/// Binding a source file must define to yield a prompt
pub const PROMPT_BINDING: &str = "PROMPT";

/// A value bound by evaluating a source file
#[derive(Debug, Clone, PartialEq)]
pub enum Binding {
    Prompt(Prompt),
    Value(Value),
}

/// Names bound by evaluating a source file
pub type Bindings = HashMap<String, Binding>;

/// Turns the text of a source file into named bindings
pub trait SourceEvaluator: Send + Sync {
    fn evaluate(&self, path: &Path, source: &str) -> Result<Bindings>;
}

type Factory = Box<dyn Fn(&str) -> Result<Bindings> + Send + Sync>;

/// Evaluator backed by factories compiled into the host, keyed by file stem
///
/// `greeting.py` is handled by the factory registered as `greeting`. A file
/// with no registered factory evaluates to no bindings.
#[derive(Default)]
pub struct FactoryRegistry {
    factories: HashMap<String, Factory>,
}

impl FactoryRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a factory producing the full binding set for a file stem
    pub fn register<F>(mut self, stem: impl Into<String>, factory: F) -> Self
    where
        F: Fn(&str) -> Result<Bindings> + Send + Sync + 'static,
    {
        self.factories.insert(stem.into(), Box::new(factory));
        self
    }

    /// Register a factory that only binds `PROMPT`
    pub fn register_prompt<F>(self, stem: impl Into<String>, factory: F) -> Self
    where
        F: Fn() -> Result<Prompt> + Send + Sync + 'static,
    {
        self.register(stem, move |_source| {
            let mut bindings = Bindings::new();
            bindings.insert(PROMPT_BINDING.to_string(), Binding::Prompt(factory()?));
            Ok(bindings)
        })
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.factories.keys().map(String::as_str)
    }
}

impl SourceEvaluator for FactoryRegistry {
    fn evaluate(&self, path: &Path, source: &str) -> Result<Bindings> {
        let stem = path.file_stem().and_then(|s| s.to_str()).unwrap_or_default();
        match self.factories.get(stem) {
            Some(factory) => {
                debug!(%stem, "FactoryRegistry::evaluate: running factory");
                factory(source)
            }
            None => {
                debug!(%stem, "FactoryRegistry::evaluate: no factory registered");
                Ok(Bindings::new())
            }
        }
    }
}

/// Evaluate a source file and pull out its `PROMPT` binding
pub(crate) fn evaluate_source(evaluator: Option<&dyn SourceEvaluator>, path: &Path, source: &str) -> Result<Prompt> {
    let evaluator = evaluator.ok_or_else(|| LoadError::NoSourceEvaluator { path: path.to_path_buf() })?;
    let mut bindings = evaluator.evaluate(path, source)?;

    match bindings.remove(PROMPT_BINDING) {
        Some(Binding::Prompt(prompt)) => Ok(prompt),
        Some(Binding::Value(_)) => Err(LoadError::InvalidPromptBinding { path: path.to_path_buf() }),
        None => Err(LoadError::MissingPromptBinding { path: path.to_path_buf() }),
    }
}
