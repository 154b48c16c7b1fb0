//! Configuration for the generation provider, sampling and retry behavior

use std::path::Path;
use serde::{Deserialize, Serialize};
use log::{debug, warn};

pub const DEFAULT_API_BASE: &str
  = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_API_KEY_ENV: &str = "GEMINI_API_KEY";

/// Provider endpoint configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderConfig
{   /// API base URL
    pub api_base: String
  , /// Model name
    pub model: String
  , /// Per-attempt timeout in seconds
    pub timeout_secs: u64
  , /// Environment variable holding the default API key
    pub api_key_env: String
}

impl Default for ProviderConfig
{   fn default() -> Self
    {   ProviderConfig
        {   api_base: DEFAULT_API_BASE.to_string()
          , model: DEFAULT_MODEL.to_string()
          , timeout_secs: 30
          , api_key_env: DEFAULT_API_KEY_ENV.to_string()
        }
    }
}

/// Sampling parameters sent with every generation call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SamplingConfig
{   pub temperature: f32
  , /// Nucleus sampling cutoff
    pub top_p: f32
  , pub max_output_tokens: u32
}

impl Default for SamplingConfig
{   fn default() -> Self
    {   SamplingConfig
        {   temperature: 0.7
          , top_p: 0.4
          , max_output_tokens: 1024
        }
    }
}

/// Retry configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RetryConfig
{   /// Total attempts, including the first
    pub max_attempts: usize
  , /// Delay before the second attempt in milliseconds
    pub initial_backoff_ms: u64
  , /// Backoff multiplier for retries
    pub backoff_multiplier: f32
  , /// Upper bound on the un-jittered delay
    pub max_backoff_ms: u64
  , /// Extra random delay, as a fraction of the base delay
    pub jitter_ratio: f32
}

impl Default for RetryConfig
{   fn default() -> Self
    {   RetryConfig
        {   max_attempts: 3
          , initial_backoff_ms: 1000
          , backoff_multiplier: 2.0
          , max_backoff_ms: 6000
          , jitter_ratio: 0.25
        }
    }
}

/// Namesmith configuration
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct NamesmithConfig
{   pub provider: ProviderConfig
  , pub sampling: SamplingConfig
  , pub retry: RetryConfig
  , pub parser: crate::parser::NameHeuristics
  , /// Process-wide fallback key, used when the caller supplies none
    #[serde(skip)]
    pub default_api_key: Option<String>
}

impl NamesmithConfig
{   /// Parse a (possibly partial) JSON configuration
    pub fn from_json_str(json: &str)
      -> Result<Self, crate::error::Error>
    {   serde_json::from_str(json).map_err(|e| {
          warn!("Rejected configuration: {}", e);
          crate::error::Error::InvalidRequest(
            format!("malformed configuration: {}", e)
          )
        })
    }

    /// Load configuration from a JSON file
    pub fn from_json_file(path: &Path)
      -> Result<Self, crate::error::Error>
    {   debug!("Loading configuration from {}", path.display());
        let json = std::fs::read_to_string(path).map_err(|e| {
          warn!("Cannot read {}: {}", path.display(), e);
          crate::error::Error::InvalidRequest(
            format!("cannot read configuration {}", path.display())
          )
        })?;
        Self::from_json_str(&json)
    }

    /// Set the fallback key explicitly
    pub fn with_default_api_key(mut self, key: impl Into<String>)
      -> Self
    {   let key: String = key.into();
        self.default_api_key = normalize_key(Some(&key));
        self
    }

    /// Read the fallback key from the configured environment variable.
    /// Called once at startup; the client never reads the environment.
    pub fn with_env_default_key(mut self) -> Self
    {   let from_env = std::env::var(&self.provider.api_key_env).ok();
        debug!(
          "Default API key from {}: {}",
          self.provider.api_key_env,
          if from_env.is_some() { "present" } else { "absent" }
        );
        self.default_api_key = normalize_key(from_env.as_deref());
        self
    }
}

fn normalize_key(key: Option<&str>) -> Option<String>
{   key.map(str::trim)
      .filter(|k| !k.is_empty())
      .map(str::to_string)
}

/// Pick the key for one call: user-provided beats the configured default
pub fn resolve_api_key(
  user: Option<&str>
, default: Option<&str>
) -> Result<String, crate::error::Error>
{   if let Some(key) = normalize_key(user)
    {   debug!("Using user-provided API key");
        return Ok(key);
    }
    if let Some(key) = normalize_key(default)
    {   debug!("Using default API key");
        return Ok(key);
    }
    Err(crate::error::Error::Authentication(
      "no API key provided or configured".to_string()
    ))
}
