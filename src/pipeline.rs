//! One submission, end to end

use log::{debug, info};

/// Prompt, generate and parse for a single request.
/// All or nothing: no partial list is returned on failure.
pub async fn generate_names(
  client: &crate::GenerationClient
, parser: &crate::ResponseParser
, request: &crate::GenerationRequest
, api_key: Option<&str>
) -> Result<crate::CandidateList, crate::error::Error>
{   let prompt = crate::PromptBuilder::new().build(request)?;
    debug!("Prompt ready for {} names", request.count());

    let raw = client.generate(&prompt, api_key).await?;
    let names = parser.parse(&raw, request.count())?;
    info!(
      "Generated {} of {} requested names",
      names.len(), request.count()
    );
    Ok(names)
}
