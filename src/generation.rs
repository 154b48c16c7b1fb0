//! Retrying access to the remote generation API

use log::{debug, info};
use crate::providers::gemini::{GenerateContentRequest, GeminiTransport};

/// Sends prompts with fixed sampling and a bounded retry policy.
///
/// Holds no per-request state; the only configuration it carries
/// besides endpoint and policy is the fallback API key.
#[derive(Debug, Clone)]
pub struct GenerationClient
{   transport: GeminiTransport
  , sampling: crate::config::SamplingConfig
  , retry: crate::failover::RetryPolicy
  , default_api_key: Option<String>
}

impl GenerationClient
{   pub fn new(config: &crate::config::NamesmithConfig) -> Self
    {   debug!("Creating GenerationClient");
        GenerationClient
        {   transport: GeminiTransport::new(&config.provider)
          , sampling: config.sampling.clone()
          , retry: crate::failover::RetryPolicy::from(&config.retry)
          , default_api_key: config.default_api_key.clone()
        }
    }

    pub fn set_default_api_key(&mut self, key: Option<String>)
    {   debug!("Replacing default API key");
        self.default_api_key = key;
    }

    /// Return the raw completion for `prompt`.
    ///
    /// `api_key` overrides the configured default. A missing key fails
    /// before any network call.
    pub async fn generate(
      &self
    , prompt: &crate::PromptText
    , api_key: Option<&str>
    ) -> Result<String, crate::error::Error>
    {   let key = crate::config::resolve_api_key(
          api_key,
          self.default_api_key.as_deref()
        )?;
        let request = GenerateContentRequest::new(
          prompt.as_str(),
          &self.sampling
        );
        debug!(
          "Generating with up to {} attempts against {}",
          self.retry.max_attempts, self.transport.endpoint()
        );

        let transport = &self.transport;
        let raw = self.retry
          .execute(|_| transport.attempt(&request, &key))
          .await?;
        info!("Received completion of {} chars", raw.len());
        Ok(raw)
    }
}
