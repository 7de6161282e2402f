//! Prompt hub: fetch a prompt file over HTTP and load it from a scratch dir

use std::fs;
use std::path::Path;
use std::time::Duration;

use reqwest::StatusCode;
use tempfile::TempDir;
use tracing::{debug, info};

use super::Loader;
use crate::error::{LoadError, Result};
use crate::prompts::Prompt;

/// Identifier prefix routing a load to the hub
pub const HUB_PREFIX: &str = "lc://prompts";

/// Where hub paths resolve unless configured otherwise
pub const DEFAULT_HUB_URL: &str = "https://raw.githubusercontent.com/hwchase17/langchain-hub/master/prompts/";

/// Extensions a hub file may have
pub const HUB_EXTENSIONS: &[&str] = &["py", "json", "yaml"];

/// Strip the hub prefix, returning the hub-relative path
pub fn hub_path(identifier: &str) -> Option<&str> {
    identifier
        .strip_prefix(HUB_PREFIX)
        .map(|rest| rest.trim_start_matches('/'))
}

/// Full URL for a hub-relative path, checking its extension first
pub fn hub_url(base: &str, path: &str) -> Result<String> {
    let suffix = path.rsplit('.').next().unwrap_or_default();
    if !HUB_EXTENSIONS.contains(&suffix) {
        return Err(LoadError::UnsupportedFormat {
            extension: format!(".{}", suffix),
            context: "hub file",
        });
    }

    if base.ends_with('/') {
        Ok(format!("{}{}", base, path))
    } else {
        Ok(format!("{}/{}", base, path))
    }
}

/// Fetch `path` from the hub and load it
///
/// The download lives in a fresh temp dir that is removed when this returns,
/// whether the load succeeded or not.
pub(crate) fn load_from_hub(loader: &Loader, path: &str, depth: usize) -> Result<Prompt> {
    let config = loader.config();
    let url = hub_url(&config.hub_url, path)?;
    info!(%url, "load_from_hub: fetching");

    let client = reqwest::blocking::Client::builder()
        .timeout(config.timeout_ms.map(Duration::from_millis))
        .user_agent(concat!("promptloader/", env!("CARGO_PKG_VERSION")))
        .build()?;

    let response = client.get(&url).send()?;
    if response.status() != StatusCode::OK {
        debug!(%url, status = %response.status(), "load_from_hub: fetch failed");
        return Err(LoadError::NotFound { url });
    }
    let bytes = response.bytes()?;

    let scratch = scratch_dir(config.temp_dir.as_deref())?;
    let file_name = Path::new(path)
        .file_name()
        .map(|name| name.to_os_string())
        .unwrap_or_else(|| "prompt".into());
    let file = scratch.path().join(file_name);
    fs::write(&file, &bytes).map_err(|e| LoadError::io(&file, e))?;
    debug!(file = %file.display(), size = bytes.len(), "load_from_hub: wrote download");

    loader.load_at_depth(&file, depth)
}

fn scratch_dir(parent: Option<&Path>) -> Result<TempDir> {
    let mut builder = tempfile::Builder::new();
    builder.prefix("promptloader-hub-");
    match parent {
        Some(dir) => builder.tempdir_in(dir).map_err(|e| LoadError::io(dir, e)),
        None => builder.tempdir().map_err(|e| LoadError::io(std::env::temp_dir(), e)),
    }
}
