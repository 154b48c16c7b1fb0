//! The user's description of the business to name

use serde::{Deserialize, Serialize};
use log::debug;

pub const MIN_COUNT: usize = 1;
pub const MAX_COUNT: usize = 15;
pub const DEFAULT_COUNT: usize = 10;

/// One submission's worth of naming input.
///
/// Built through [`GenerationRequestBuilder`], which trims every text
/// field, drops blank ones and rejects requests without signal. Values
/// that arrive through serde are checked again by [`Self::validate`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationRequest
{   business_type: Option<String>
  , keywords: Vec<String>
  , personality: Option<String>
  , style: crate::NameStyle
  , length: crate::NameLength
  , language: crate::Language
  , market: Option<String>
  , count: usize
}

impl GenerationRequest
{   pub fn builder() -> GenerationRequestBuilder
    {   GenerationRequestBuilder::default()
    }

    pub fn business_type(&self) -> Option<&str>
    {   self.business_type.as_deref()
    }

    pub fn keywords(&self) -> &[String]
    {   &self.keywords
    }

    pub fn personality(&self) -> Option<&str>
    {   self.personality.as_deref()
    }

    pub fn style(&self) -> crate::NameStyle
    {   self.style
    }

    pub fn length(&self) -> crate::NameLength
    {   self.length
    }

    pub fn language(&self) -> crate::Language
    {   self.language
    }

    pub fn market(&self) -> Option<&str>
    {   self.market.as_deref()
    }

    pub fn count(&self) -> usize
    {   self.count
    }

    /// Check the count bounds and that there is something to name
    pub fn validate(&self) -> Result<(), crate::error::Error>
    {   if !(MIN_COUNT..=MAX_COUNT).contains(&self.count)
        {   return Err(crate::error::Error::InvalidRequest(
              format!(
                "count must be between {} and {}, got {}",
                MIN_COUNT, MAX_COUNT, self.count
              )
            ));
        }
        let has_signal
          = is_present(self.business_type.as_deref())
          || self.keywords.iter().any(|k| !k.trim().is_empty())
          || is_present(self.personality.as_deref());
        if !has_signal
        {   return Err(crate::error::Error::InvalidRequest(
              "describe the business type, keywords or personality"
                .to_string()
            ));
        }
        Ok(())
    }
}

fn is_present(field: Option<&str>) -> bool
{   field.map_or(false, |s| !s.trim().is_empty())
}

fn clean(field: Option<String>) -> Option<String>
{   field.map(|s| s.trim().to_string())
      .filter(|s| !s.is_empty())
}

/// Split comma-separated keyword input, dropping blanks
pub fn parse_keywords(input: &str) -> Vec<String>
{   input.split(',')
      .map(str::trim)
      .filter(|k| !k.is_empty())
      .map(str::to_string)
      .collect()
}

/// Builder for [`GenerationRequest`]
#[derive(Debug, Clone)]
pub struct GenerationRequestBuilder
{   business_type: Option<String>
  , keywords: Vec<String>
  , personality: Option<String>
  , style: crate::NameStyle
  , length: crate::NameLength
  , language: crate::Language
  , market: Option<String>
  , count: usize
}

impl Default for GenerationRequestBuilder
{   fn default() -> Self
    {   GenerationRequestBuilder
        {   business_type: None
          , keywords: vec![]
          , personality: None
          , style: crate::NameStyle::default()
          , length: crate::NameLength::default()
          , language: crate::Language::default()
          , market: None
          , count: DEFAULT_COUNT
        }
    }
}

impl GenerationRequestBuilder
{   pub fn business_type(mut self, value: impl Into<String>) -> Self
    {   self.business_type = Some(value.into());
        self
    }

    pub fn keyword(mut self, value: impl Into<String>) -> Self
    {   self.keywords.push(value.into());
        self
    }

    pub fn keywords<I, S>(mut self, values: I) -> Self
    where
      I: IntoIterator<Item = S>,
      S: Into<String>,
    {   self.keywords.extend(values.into_iter().map(Into::into));
        self
    }

    pub fn personality(mut self, value: impl Into<String>) -> Self
    {   self.personality = Some(value.into());
        self
    }

    pub fn style(mut self, value: crate::NameStyle) -> Self
    {   self.style = value;
        self
    }

    pub fn length(mut self, value: crate::NameLength) -> Self
    {   self.length = value;
        self
    }

    pub fn language(mut self, value: crate::Language) -> Self
    {   self.language = value;
        self
    }

    pub fn market(mut self, value: impl Into<String>) -> Self
    {   self.market = Some(value.into());
        self
    }

    pub fn count(mut self, value: usize) -> Self
    {   self.count = value;
        self
    }

    pub fn build(self)
      -> Result<GenerationRequest, crate::error::Error>
    {   let request = GenerationRequest
        {   business_type: clean(self.business_type)
          , keywords: self.keywords
              .into_iter()
              .map(|k| k.trim().to_string())
              .filter(|k| !k.is_empty())
              .collect()
          , personality: clean(self.personality)
          , style: self.style
          , length: self.length
          , language: self.language
          , market: clean(self.market)
          , count: self.count
        };
        request.validate()?;
        debug!(
          "Built request for {} names ({} keywords)",
          request.count, request.keywords.len()
        );
        Ok(request)
    }
}
