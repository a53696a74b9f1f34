use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};

pub const DEFAULT_BASE_URL: &str = "http://localhost:3001/api/v1";
pub const DEFAULT_ASSISTANT_NAME: &str = "PAL-adin";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Field names a chat reply may carry its text under, in priority order.
pub const REPLY_FIELDS: &[&str] = &["textResponse", "response", "message"];

#[derive(Debug, Clone)]
pub struct Config {
    /// Root of the workspace API, without trailing slash
    pub base_url: String,
    pub api_key: String,
    pub workspace_slug: String,
    pub memory_dir: PathBuf,
    /// Persona name used in prompts and transcript labels
    pub assistant_name: String,
    /// Per-request HTTP timeout
    pub timeout: Duration,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let base_url = var("ANYTHINGLLM_BASE_URL")
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
            .trim_end_matches('/')
            .to_string();

        let api_key = var("ANYTHINGLLM_API_KEY")
            .ok_or_else(|| anyhow::anyhow!("ANYTHINGLLM_API_KEY not set"))?;
        let workspace_slug = var("ANYTHINGLLM_WORKSPACE")
            .ok_or_else(|| anyhow::anyhow!("ANYTHINGLLM_WORKSPACE not set"))?;

        let memory_dir = PathBuf::from(var("PAL_MEMORY_DIR").unwrap_or_else(|| {
            let home = lookup("HOME").unwrap_or_else(|| ".".into());
            format!("{}/.pal-memory/memories", home)
        }));

        let assistant_name =
            var("PAL_ASSISTANT_NAME").unwrap_or_else(|| DEFAULT_ASSISTANT_NAME.to_string());

        let timeout_secs = match var("PAL_HTTP_TIMEOUT_SECS") {
            Some(raw) => raw
                .trim()
                .parse::<u64>()
                .with_context(|| format!("invalid PAL_HTTP_TIMEOUT_SECS '{}'", raw))?,
            None => DEFAULT_TIMEOUT_SECS,
        };

        Ok(Self {
            base_url,
            api_key,
            workspace_slug,
            memory_dir,
            assistant_name,
            timeout: Duration::from_secs(timeout_secs),
        })
    }
}

#[cfg(test)]
impl Config {
    pub fn for_test(base_url: &str, memory_dir: &std::path::Path) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: "test-key".into(),
            workspace_slug: "pal".into(),
            memory_dir: memory_dir.to_path_buf(),
            assistant_name: DEFAULT_ASSISTANT_NAME.into(),
            timeout: Duration::from_secs(5),
        }
    }
}
