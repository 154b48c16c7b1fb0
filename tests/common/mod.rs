#![allow(dead_code)]

use serde_json::json;
use wiremock::ResponseTemplate;

pub const TEST_KEY: &str = "test-key";
pub const GENERATE_PATH: &str = "/models/gemini-2.5-flash:generateContent";

/// Configuration pointed at a mock server, with near-zero backoff
pub fn test_config(api_base: &str) -> namesmith::NamesmithConfig
{   let mut config = namesmith::NamesmithConfig::default();
    config.provider.api_base = api_base.to_string();
    config.provider.timeout_secs = 1;
    config.retry.initial_backoff_ms = 1;
    config.retry.max_backoff_ms = 5;
    config.retry.jitter_ratio = 0.0;
    config.with_default_api_key(TEST_KEY)
}

/// A successful generateContent body carrying `text`
pub fn completion(text: &str) -> ResponseTemplate
{   ResponseTemplate::new(200).set_body_json(json!({
      "candidates": [
        {   "content": { "role": "model", "parts": [ { "text": text } ] }
          , "finishReason": "STOP"
        }
      ]
    }))
}

/// A Google-style error body
pub fn api_error(status: u16, message: &str, code: &str) -> ResponseTemplate
{   ResponseTemplate::new(status).set_body_json(json!({
      "error": { "code": status, "message": message, "status": code }
    }))
}

pub fn tech_startup_request(count: usize) -> namesmith::GenerationRequest
{   namesmith::GenerationRequest::builder()
      .business_type("Tech startup")
      .keywords(["innovation", "speed"])
      .style(namesmith::NameStyle::ModernTech)
      .count(count)
      .build()
      .expect("valid request")
}
