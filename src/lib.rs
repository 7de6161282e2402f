//! promptloader - load prompt templates from configs, files and the prompt hub
//!
//! A prompt config is a JSON or YAML mapping tagged with `_type`. Loading one
//! resolves every external reference it makes (text files for `template`,
//! `prefix` and `suffix`, example datasets, nested example prompts, hub
//! downloads) and returns a validated, typed [`Prompt`].
//!
//! # Modules
//!
//! - [`loading`] - Format detection, field resolution, `_type` dispatch, hub fetch
//! - [`prompts`] - The prompt and output parser types a load produces
//! - [`config`] - Loader configuration and loading
//! - [`error`] - Load error taxonomy
//! - [`cli`] - Command-line interface
//!
//! # Example
//!
//! ```ignore
//! use promptloader::load_prompt;
//!
//! let prompt = load_prompt("prompts/few_shot.yaml")?;
//! let remote = load_prompt("lc://prompts/hello-world/prompt.yaml")?;
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod loading;
pub mod prompts;

// Re-export commonly used types
pub use config::LoaderConfig;
pub use error::{LoadError, Result};
pub use loading::{FactoryRegistry, Loader, PromptConfig, SourceEvaluator, load_prompt, load_prompt_from_config};
pub use prompts::{FewShotPromptTemplate, OutputParser, Prompt, PromptTemplate, RegexParser};
