use std::fmt;

/// Error kinds surfaced by the naming pipeline
/// Implements Clone for sending through channels
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error
{   /// Request carries no usable signal or is out of bounds
    InvalidRequest(String)
  , /// API key is missing or was rejected
    Authentication(String)
  , /// Every attempt hit a transient failure
    GenerationUnavailable
    {   attempts: usize
      , last_failure: String
    }
  , /// Completion parsed into zero candidates
    EmptyResult
  , /// Workbook could not be produced or written
    Export(String)
}

impl Error
{   /// Short label for logs and CLI output
    pub fn kind(&self) -> &'static str
    {   match self
        {   Error::InvalidRequest(_) => "invalid_request"
          , Error::Authentication(_) => "authentication"
          , Error::GenerationUnavailable { .. } => {
              "generation_unavailable"
            }
          , Error::EmptyResult => "empty_result"
          , Error::Export(_) => "export"
        }
    }

    /// Whether re-submitting (possibly with new inputs) can help
    pub fn is_retryable_by_user(&self) -> bool
    {   matches!(
          self,
          Error::GenerationUnavailable { .. } | Error::EmptyResult
        )
    }
}

impl fmt::Display for Error
{   fn fmt(&self, f: &mut fmt::Formatter<'_>)
      -> fmt::Result
    {   match self
        {   Error::InvalidRequest(msg) => {
              write!(f, "Invalid request: {}", msg)
            }
          , Error::Authentication(msg) => {
              write!(f, "Authentication failed: {}", msg)
            }
          , Error::GenerationUnavailable
            {   attempts
              , last_failure
            } => {
              write!(f,
                "Name generation unavailable after {} attempt(s) \
                 (last failure: {})",
                attempts, last_failure
              )
            }
          , Error::EmptyResult => {
              write!(f,
                "No usable names were generated; \
                 try again or adjust your inputs"
              )
            }
          , Error::Export(msg) => {
              write!(f, "Export failed: {}", msg)
            }
        }
    }
}

impl std::error::Error for Error {}
