pub mod error;
pub mod config;
pub mod request;
pub mod prompt;
pub mod failover;
pub mod providers;
pub mod generation;
pub mod parser;
pub mod export;
pub mod pipeline;
pub mod client;
use serde::{Deserialize, Serialize};

pub use client::NamesmithBackend;
pub use config::NamesmithConfig;
pub use error::Error;
pub use export::{ResultExporter, TabularArtifact};
pub use generation::GenerationClient;
pub use parser::{CandidateList, NameHeuristics, ResponseParser};
pub use prompt::{PromptBuilder, PromptText};
pub use request::{GenerationRequest, GenerationRequestBuilder};

/*

namesmith turns a short business description into a list of
brand-name candidates:

  GenerationRequest -> PromptBuilder -> GenerationClient (retrying)
    -> ResponseParser -> CandidateList -> ResultExporter (.xlsx)

namesmith/
├── src/
│   ├── lib.rs          # Backend interface and option vocabularies
│   ├── error.rs        # Error kinds surfaced to callers
│   ├── config.rs       # Provider, sampling, retry, parser settings
│   ├── request.rs      # GenerationRequest and its builder
│   ├── prompt.rs       # Prompt assembly
│   ├── failover.rs     # Retry policy over tagged attempt outcomes
│   ├── providers/      # Wire formats for remote generation APIs
│   ├── generation.rs   # Key resolution + retrying generation
│   ├── parser.rs       # Completion text -> candidate names
│   ├── export.rs       # Candidate names -> spreadsheet
│   ├── pipeline.rs     # One submission, end to end
│   ├── client.rs       # Backend task serializing submissions
│   └── main.rs         # Command line front end
└── tests/

*/

/// NAMESMITH BACKEND INTERFACE:

// ===== GenerateNames =====

pub type GenerateNamesReply
  = Result<CandidateList, crate::error::Error>;
pub type GenerateNamesReplySender
  = tokio::sync::mpsc::UnboundedSender<GenerateNamesReply>;

pub struct GenerateNamesArgs
{   pub request: GenerationRequest
  , pub api_key: Option<String>
  , pub reply: GenerateNamesReplySender
}

// ===== SetDefaultApiKey =====

pub type SetDefaultApiKeyReply = Result<(), crate::error::Error>;
pub type SetDefaultApiKeyReplySender
  = tokio::sync::mpsc::UnboundedSender<SetDefaultApiKeyReply>;

pub struct SetDefaultApiKeyArgs
{   pub key: Option<String>
  , pub reply: SetDefaultApiKeyReplySender
}

// ===== KillProcess =====

pub type KillProcessReply = Result<(), crate::error::Error>;
pub type KillProcessReplySender
  = tokio::sync::mpsc::UnboundedSender<KillProcessReply>;

pub struct KillProcessArgs
{   pub reply: KillProcessReplySender
}

// ===== NamesmithHand (sender side) =====

pub struct NamesmithHand
{   pub generate_names_tx
      : tokio::sync::mpsc::UnboundedSender<GenerateNamesArgs>
  , pub set_default_api_key_tx
      : tokio::sync::mpsc::UnboundedSender<SetDefaultApiKeyArgs>
  , pub kill_process_tx
      : tokio::sync::mpsc::UnboundedSender<KillProcessArgs>
}

// ===== NamesmithFoot (receiver side) =====

pub struct NamesmithFoot
{   pub generate_names_rx
      : tokio::sync::mpsc::UnboundedReceiver<GenerateNamesArgs>
  , pub set_default_api_key_rx
      : tokio::sync::mpsc::UnboundedReceiver<SetDefaultApiKeyArgs>
  , pub kill_process_rx
      : tokio::sync::mpsc::UnboundedReceiver<KillProcessArgs>
}

/// NAMESMITH VOCABULARIES:

/// Overall feel of the generated names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize, Serialize)]
pub enum NameStyle
{   ModernTech
  , ClassicTraditional
  , #[default]
    CreativeUnique
  , ElegantPremium
  , PlayfulFriendly
  , MinimalClean
  , /// No style preference; left out of the prompt
    Any
}

impl NameStyle
{   pub const ALL: [NameStyle; 7] =
    [   NameStyle::ModernTech
      , NameStyle::ClassicTraditional
      , NameStyle::CreativeUnique
      , NameStyle::ElegantPremium
      , NameStyle::PlayfulFriendly
      , NameStyle::MinimalClean
      , NameStyle::Any
    ];

    pub fn label(&self) -> &'static str
    {   match self
        {   NameStyle::ModernTech => "Modern & Tech"
          , NameStyle::ClassicTraditional => "Classic & Traditional"
          , NameStyle::CreativeUnique => "Creative & Unique"
          , NameStyle::ElegantPremium => "Elegant & Premium"
          , NameStyle::PlayfulFriendly => "Playful & Friendly"
          , NameStyle::MinimalClean => "Minimal & Clean"
          , NameStyle::Any => "Any"
        }
    }
}

/// Preferred name length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize, Serialize)]
pub enum NameLength
{   #[default]
    Any
  , Short
  , Medium
  , Long
}

impl NameLength
{   pub const ALL: [NameLength; 4] =
    [   NameLength::Any
      , NameLength::Short
      , NameLength::Medium
      , NameLength::Long
    ];

    pub fn label(&self) -> &'static str
    {   match self
        {   NameLength::Any => "Any"
          , NameLength::Short => "Short"
          , NameLength::Medium => "Medium"
          , NameLength::Long => "Long"
        }
    }

    /// Concrete guidance for the model; None when unconstrained
    pub fn guidance(&self) -> Option<&'static str>
    {   match self
        {   NameLength::Any => None
          , NameLength::Short => Some("Short (one or two syllables, up to 6 letters)")
          , NameLength::Medium => Some("Medium (roughly 6 to 10 letters)")
          , NameLength::Long => Some("Long (more than 10 letters or two combined words)")
        }
    }
}

/// Language the names should be written in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize, Serialize)]
pub enum Language
{   #[default]
    English
  , Spanish
  , French
  , German
  , Italian
  , Portuguese
  , Dutch
  , Japanese
  , Korean
  , Chinese
  , Hindi
  , Arabic
  , Latin
}

impl Language
{   pub const ALL: [Language; 13] =
    [   Language::English
      , Language::Spanish
      , Language::French
      , Language::German
      , Language::Italian
      , Language::Portuguese
      , Language::Dutch
      , Language::Japanese
      , Language::Korean
      , Language::Chinese
      , Language::Hindi
      , Language::Arabic
      , Language::Latin
    ];

    pub fn label(&self) -> &'static str
    {   match self
        {   Language::English => "English"
          , Language::Spanish => "Spanish"
          , Language::French => "French"
          , Language::German => "German"
          , Language::Italian => "Italian"
          , Language::Portuguese => "Portuguese"
          , Language::Dutch => "Dutch"
          , Language::Japanese => "Japanese"
          , Language::Korean => "Korean"
          , Language::Chinese => "Chinese"
          , Language::Hindi => "Hindi"
          , Language::Arabic => "Arabic"
          , Language::Latin => "Latin"
        }
    }
}

/// Lowercase alphanumerics only, so "Modern & Tech" == "modern-tech"
fn slug(text: &str) -> String
{   text.chars()
      .filter(|c| c.is_alphanumeric())
      .flat_map(char::to_lowercase)
      .collect()
}

macro_rules! vocabulary_impls
{   ($ty:ty, $what:literal) => {
      impl std::fmt::Display for $ty
      {   fn fmt(&self, f: &mut std::fmt::Formatter<'_>)
            -> std::fmt::Result
          {   f.write_str(self.label())
          }
      }

      impl std::str::FromStr for $ty
      {   type Err = crate::error::Error;

          fn from_str(s: &str) -> Result<Self, Self::Err>
          {   let wanted = slug(s);
              <$ty>::ALL.iter()
                .copied()
                .find(|v| slug(v.label()) == wanted)
                .ok_or_else(|| {
                  crate::error::Error::InvalidRequest(
                    format!("unknown {}: {:?}", $what, s)
                  )
                })
          }
      }
    };
}

vocabulary_impls!(NameStyle, "name style");
vocabulary_impls!(NameLength, "name length");
vocabulary_impls!(Language, "language");
