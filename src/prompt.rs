//! Assembles the instruction text sent to the generation API

use std::fmt;
use log::debug;

/// Prompt text ready to send
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptText(String);

impl PromptText
{   pub fn as_str(&self) -> &str
    {   &self.0
    }
}

impl fmt::Display for PromptText
{   fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
    {   f.write_str(&self.0)
    }
}

/// Turns a request into a prompt. Pure: the same request always
/// produces the same text, and absent fields are never mentioned.
#[derive(Debug, Clone, Copy, Default)]
pub struct PromptBuilder;

impl PromptBuilder
{   pub fn new() -> Self
    {   PromptBuilder
    }

    pub fn build(
      &self
    , request: &crate::GenerationRequest
    ) -> Result<PromptText, crate::error::Error>
    {   request.validate()?;

        let count = request.count();
        let language = request.language();
        let mut out = format!(
          "You are an expert brand strategist. Generate exactly {} \
           unique, distinctive and brandable company or product \
           names in {}.\n\n",
          count, language
        );

        let mut details = Vec::new();
        if let Some(business) = present(request.business_type())
        {   details.push(format!("Business type: {}", business));
        }
        let keywords: Vec<&str> = request.keywords()
          .iter()
          .map(|k| k.trim())
          .filter(|k| !k.is_empty())
          .collect();
        if !keywords.is_empty()
        {   details.push(format!(
              "Brand values/keywords: {}", keywords.join(", ")
            ));
        }
        if let Some(personality) = present(request.personality())
        {   details.push(format!("Brand personality: {}", personality));
        }
        if request.style() != crate::NameStyle::Any
        {   details.push(format!("Desired style: {}", request.style()));
        }
        if let Some(guidance) = request.length().guidance()
        {   details.push(format!("Preferred length: {}", guidance));
        }
        let market = present(request.market());
        if let Some(market) = market
        {   details.push(format!("Target market: {}", market));
        }
        out.push_str(&details.join("\n"));

        out.push_str(
          "\n\nUniqueness requirements: Focus on coined, blended, or \
           metaphorical names. Favor slight neologisms, portmanteaus, \
           or evocative roots. Avoid direct dictionary words unless \
           fresh.\n\nConstraints:\n"
        );
        let mut constraints = vec![
          format!("Generate exactly {} names", count)
        , "Never repeat a name, even with different capitalization"
            .to_string()
        , "Each name should be easy to spell and pronounce"
            .to_string()
        , "Avoid hyphens, numbers, and hard-to-spell words"
            .to_string()
        , "Avoid generic terms and overused suffixes".to_string()
        ];
        if request.style() != crate::NameStyle::Any
        {   constraints.push(format!(
              "Every name must fit the {} style", request.style()
            ));
        }
        if request.length() != crate::NameLength::Any
        {   constraints.push(format!(
              "Every name must respect the {} length preference",
              request.length().label().to_lowercase()
            ));
        }
        constraints.push(match market
        {   Some(market) => format!(
              "Names must be written in {} and culturally appropriate \
               for the {} market",
              language, market
            )
          , None => format!(
              "Names must be written in {} and culturally appropriate",
              language
            )
        });
        for constraint in &constraints
        {   out.push_str("- ");
            out.push_str(constraint);
            out.push('\n');
        }

        out.push_str(
          "\nOutput format: Return only the names, one per line. Do not \
           number them, do not use bullets or quotes, and do not add \
           descriptions or any other text."
        );

        debug!(
          "Built prompt of {} chars for {} names",
          out.len(), count
        );
        Ok(PromptText(out))
    }
}

fn present(field: Option<&str>) -> Option<&str>
{   field.map(str::trim).filter(|s| !s.is_empty())
}
