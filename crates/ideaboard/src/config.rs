//! Client configuration
//!
//! Values come from CLI flags, which fall back to `IDEABOARD_*` environment
//! variables, which fall back to the defaults below.

use crate::error::{ClientError, Result};
use std::path::PathBuf;
use url::Url;

pub const DEFAULT_BASE_URL: &str = "http://localhost:5000/api";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_ENRICH_CONCURRENCY: usize = 8;

/// What gets re-fetched after a successful approve or reject
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum RefreshPolicy {
  /// Reload every list the dashboard shows
  #[default]
  FullReload,
  /// Re-fetch only the idea that changed
  AffectedIdea,
}

#[derive(Debug, Clone)]
pub struct ClientConfig {
  /// API root, including the `/api` prefix (e.g., "http://localhost:5000/api")
  pub base_url: String,
  /// Request timeout in seconds
  pub timeout_secs: u64,
  /// Upper bound on simultaneous detail fetches during list enrichment
  pub enrich_concurrency: usize,
  pub refresh_policy: RefreshPolicy,
}

impl Default for ClientConfig {
  fn default() -> Self {
    Self {
      base_url: DEFAULT_BASE_URL.to_string(),
      timeout_secs: DEFAULT_TIMEOUT_SECS,
      enrich_concurrency: DEFAULT_ENRICH_CONCURRENCY,
      refresh_policy: RefreshPolicy::default(),
    }
  }
}

impl ClientConfig {
  /// Check the base URL parses and normalize away a trailing slash
  pub fn validated(mut self) -> Result<Self> {
    let trimmed = self.base_url.trim().trim_end_matches('/').to_string();
    Url::parse(&trimmed)
      .map_err(|e| ClientError::Config(format!("invalid API URL '{}': {e}", self.base_url)))?;

    if self.timeout_secs == 0 {
      return Err(ClientError::Config("timeout must be at least one second".to_string()));
    }

    self.base_url = trimmed;
    self.enrich_concurrency = self.enrich_concurrency.max(1);
    Ok(self)
  }
}

/// Directory holding the persisted session
///
/// `IDEABOARD_HOME` wins; otherwise `~/.ideaboard`, or `./.ideaboard` when no
/// home directory can be determined.
pub fn data_dir() -> PathBuf {
  if let Ok(dir) = std::env::var("IDEABOARD_HOME") {
    if !dir.trim().is_empty() {
      return PathBuf::from(dir);
    }
  }

  dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")).join(".ideaboard")
}
