//! Prompt loading
//!
//! Turns a prompt identifier into a [`Prompt`]:
//!
//! ```text
//! load_prompt(id)
//!   ├── lc://prompts/...  → hub fetch → scratch file ─┐
//!   └── local path ───────────────────────────────────┤
//!                                                     ▼
//!                                  read_prompt_file (.json/.yaml/.yml/.py)
//!                                                     │ config
//!                                                     ▼
//!                                  resolve (_type: prompt | few_shot)
//!                                    ├── materialize_field (template, suffix, prefix)
//!                                    ├── example prompt (recursive resolve / load)
//!                                    ├── materialize_examples
//!                                    └── materialize_output_parser
//! ```
//!
//! Every step is synchronous. A [`Loader`] holds no mutable state, so one
//! instance can serve loads from several threads.

mod draft;
mod examples;
mod fields;
mod format;
mod hub;
mod output;
mod plugin;
mod resolver;

use std::path::Path;

use tracing::{debug, info};

pub use draft::{Draft, PATH_SUFFIX, PromptConfig, TYPE_TAG};
pub use examples::materialize_examples;
pub use fields::{TEXT_EXTENSION, materialize_field};
pub use format::{FileFormat, Loaded, read_prompt_file};
pub use hub::{DEFAULT_HUB_URL, HUB_EXTENSIONS, HUB_PREFIX, hub_path, hub_url};
pub use output::{materialize_output_parser, output_parser_types};
pub use plugin::{Binding, Bindings, FactoryRegistry, PROMPT_BINDING, SourceEvaluator};
pub use resolver::{DEFAULT_PROMPT_TYPE, prompt_types};

use crate::config::LoaderConfig;
use crate::error::Result;
use crate::prompts::Prompt;

/// Loads prompts from local files, the hub, or in-memory configs
#[derive(Default)]
pub struct Loader {
    config: LoaderConfig,
    evaluator: Option<Box<dyn SourceEvaluator>>,
}

impl Loader {
    pub fn new(config: LoaderConfig) -> Self {
        Self {
            config,
            evaluator: None,
        }
    }

    /// Register the evaluator used for `.py` prompt files
    ///
    /// The evaluator is trusted with every source file this loader reads.
    pub fn with_evaluator(mut self, evaluator: impl SourceEvaluator + 'static) -> Self {
        self.evaluator = Some(Box::new(evaluator));
        self
    }

    pub fn config(&self) -> &LoaderConfig {
        &self.config
    }

    /// Load a prompt from a local path or an `lc://prompts/...` hub identifier
    pub fn load_prompt(&self, identifier: impl AsRef<Path>) -> Result<Prompt> {
        self.load_at_depth(identifier.as_ref(), 1)
    }

    /// Resolve an in-memory config
    pub fn load_prompt_from_config(&self, config: PromptConfig) -> Result<Prompt> {
        resolver::resolve(self, config, 1)
    }

    pub(crate) fn load_at_depth(&self, identifier: &Path, depth: usize) -> Result<Prompt> {
        if let Some(path) = identifier.to_str().and_then(hub_path) {
            info!(%path, depth, "load_prompt: loading from hub");
            return hub::load_from_hub(self, path, depth);
        }

        debug!(path = %identifier.display(), depth, "load_prompt: loading from file");
        match read_prompt_file(identifier, self.evaluator.as_deref())? {
            Loaded::Config(config) => resolver::resolve(self, config, depth),
            Loaded::Prompt(prompt) => Ok(prompt),
        }
    }
}

impl std::fmt::Debug for Loader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Loader")
            .field("config", &self.config)
            .field("evaluator", &self.evaluator.is_some())
            .finish()
    }
}

/// Load a prompt with the default loader configuration
pub fn load_prompt(identifier: impl AsRef<Path>) -> Result<Prompt> {
    Loader::default().load_prompt(identifier)
}

/// Resolve an in-memory config with the default loader configuration
pub fn load_prompt_from_config(config: PromptConfig) -> Result<Prompt> {
    Loader::default().load_prompt_from_config(config)
}
