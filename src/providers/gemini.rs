use std::time::Duration;
use serde::{Deserialize, Serialize};
use log::{debug, error, trace, warn};
use crate::failover::{AttemptOutcome, PermanentFailure, TransientFailure};

// ===== Message Types =====

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Part
{   #[serde(default)]
    pub text: String
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Content
{   #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>
  , #[serde(default)]
    pub parts: Vec<Part>
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig
{   pub temperature: f32
  , pub top_p: f32
  , pub max_output_tokens: u32
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentRequest
{   pub contents: Vec<Content>
  , pub generation_config: GenerationConfig
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentResponse
{   #[serde(default)]
    pub candidates: Vec<Candidate>
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate
{   pub content: Option<Content>
  , pub finish_reason: Option<String>
}

impl GenerateContentResponse
{   /// Concatenated text of the first candidate
    pub fn text(&self) -> String
    {   self.candidates.first()
          .and_then(|c| c.content.as_ref())
          .map(|content| {
            content.parts
              .iter()
              .map(|p| p.text.as_str())
              .collect::<String>()
          })
          .unwrap_or_default()
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorEnvelope
{   pub error: ApiErrorBody
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorBody
{   #[serde(default)]
    pub message: String
  , #[serde(default)]
    pub status: String
}

impl GenerateContentRequest
{   pub fn new(
      prompt: &str
    , sampling: &crate::config::SamplingConfig
    ) -> Self
    {   GenerateContentRequest
        {   contents: vec![
              Content
              {   role: Some("user".to_string())
                , parts: vec![Part { text: prompt.to_string() }]
              }
            ]
          , generation_config: GenerationConfig
            {   temperature: sampling.temperature
              , top_p: sampling.top_p
              , max_output_tokens: sampling.max_output_tokens
            }
        }
    }
}

// ===== Transport =====

/// Single-attempt access to the `generateContent` endpoint.
/// Every call maps its result onto an [`AttemptOutcome`]; it never
/// retries on its own.
#[derive(Debug, Clone)]
pub struct GeminiTransport
{   http_client: reqwest::Client
  , api_base: String
  , model: String
  , timeout: Duration
}

impl GeminiTransport
{   pub fn new(provider: &crate::config::ProviderConfig) -> Self
    {   debug!(
          "Creating GeminiTransport for model {}",
          provider.model
        );
        GeminiTransport
        {   http_client: reqwest::Client::new()
          , api_base: provider.api_base.trim_end_matches('/').to_string()
          , model: provider.model.clone()
          , timeout: Duration::from_secs(provider.timeout_secs.max(1))
        }
    }

    pub fn endpoint(&self) -> String
    {   format!(
          "{}/models/{}:generateContent",
          self.api_base, self.model
        )
    }

    /// One bounded attempt
    pub async fn attempt(
      &self
    , request: &GenerateContentRequest
    , api_key: &str
    ) -> AttemptOutcome<String>
    {   match tokio::time::timeout(
          self.timeout,
          self.send(request, api_key)
        ).await
        {   Ok(outcome) => outcome
          , Err(_) => {
              warn!("Gemini call exceeded {:?}", self.timeout);
              AttemptOutcome::Transient(
                TransientFailure::TimedOut(self.timeout)
              )
            }
        }
    }

    async fn send(
      &self
    , request: &GenerateContentRequest
    , api_key: &str
    ) -> AttemptOutcome<String>
    {   trace!("Gemini request: {:?}", request);

        let response = match self.http_client
          .post(self.endpoint())
          .header("x-goog-api-key", api_key)
          .header("Content-Type", "application/json")
          .json(request)
          .send()
          .await
        {   Ok(response) => response
          , Err(e) => {
              error!("HTTP error: {}", e);
              return AttemptOutcome::Transient(TransientFailure::Network);
            }
        };

        let status = response.status();
        trace!("Gemini response status: {}", status);

        if !status.is_success()
        {   let body = response.text().await.unwrap_or_default();
            error!("Gemini API error {}: {}", status, body);
            return classify_status(status.as_u16(), &body);
        }

        let parsed: GenerateContentResponse = match response.json().await
        {   Ok(parsed) => parsed
          , Err(e) => {
              error!("Parse error: {}", e);
              return AttemptOutcome::Transient(
                TransientFailure::MalformedBody
              );
            }
        };

        let text = parsed.text();
        if text.trim().is_empty()
        {   warn!(
              "Gemini returned no text (finish reason {:?})",
              parsed.candidates.first().and_then(|c| c.finish_reason.clone())
            );
            return AttemptOutcome::Transient(
              TransientFailure::EmptyCompletion
            );
        }
        debug!("Gemini returned {} chars", text.len());
        AttemptOutcome::Success(text)
    }
}

/// Map a non-success status (and its error body) onto an outcome
pub fn classify_status(status: u16, body: &str) -> AttemptOutcome<String>
{   let detail = serde_json::from_str::<ApiErrorEnvelope>(body)
      .map(|envelope| envelope.error)
      .ok();
    let key_rejected = detail.as_ref().map_or(false, |d| {
      d.message.contains("API key") || d.status == "UNAUTHENTICATED"
    }) || body.contains("API_KEY_INVALID");

    match status
    {   401 | 403 => AttemptOutcome::Permanent(
          PermanentFailure::Unauthorized(
            "the API key was rejected".to_string()
          )
        )
      , 400 if key_rejected => AttemptOutcome::Permanent(
          PermanentFailure::Unauthorized(
            "the API key is not valid".to_string()
          )
        )
      , 408 | 429 => AttemptOutcome::Transient(
          TransientFailure::ServerBusy(status)
        )
      , 500..=599 => AttemptOutcome::Transient(
          TransientFailure::ServerBusy(status)
        )
      , _ => AttemptOutcome::Permanent(
          PermanentFailure::Rejected(
            format!("the generation service rejected the request (HTTP {})", status)
          )
        )
    }
}
