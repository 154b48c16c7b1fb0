//! Retry logic over tagged attempt outcomes

use std::future::Future;
use std::time::Duration;
use log::{debug, info, warn};
use rand::Rng;

/// Retryable failure of a single attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransientFailure
{   /// Connection, DNS or TLS trouble
    Network
  , /// Attempt exceeded its time budget
    TimedOut(Duration)
  , /// 429 or a 5xx / 408 status
    ServerBusy(u16)
  , /// 2xx whose body carried no text
    EmptyCompletion
  , /// 2xx whose body could not be decoded
    MalformedBody
}

impl std::fmt::Display for TransientFailure
{   fn fmt(&self, f: &mut std::fmt::Formatter<'_>)
      -> std::fmt::Result
    {   match self
        {   TransientFailure::Network => write!(f, "network error")
          , TransientFailure::TimedOut(limit) => {
              write!(f, "timed out after {}s", limit.as_secs())
            }
          , TransientFailure::ServerBusy(status) => {
              write!(f, "HTTP {}", status)
            }
          , TransientFailure::EmptyCompletion => {
              write!(f, "empty completion")
            }
          , TransientFailure::MalformedBody => {
              write!(f, "unreadable response body")
            }
        }
    }
}

/// Non-retryable failure of a single attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PermanentFailure
{   /// Key missing, invalid or lacking permission
    Unauthorized(String)
  , /// Remote rejected the request itself
    Rejected(String)
}

impl From<PermanentFailure> for crate::error::Error
{   fn from(failure: PermanentFailure) -> Self
    {   match failure
        {   PermanentFailure::Unauthorized(msg) => {
              crate::error::Error::Authentication(msg)
            }
          , PermanentFailure::Rejected(msg) => {
              crate::error::Error::InvalidRequest(msg)
            }
        }
    }
}

/// What one attempt produced. The retry loop only looks at the tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttemptOutcome<T>
{   Success(T)
  , Transient(TransientFailure)
  , Permanent(PermanentFailure)
}

/// Retry policy for failed requests
#[derive(Debug, Clone)]
pub struct RetryPolicy
{   pub max_attempts: usize
  , pub backoff_multiplier: f32
  , pub initial_backoff: Duration
  , pub max_backoff: Duration
  , pub jitter_ratio: f32
}

impl RetryPolicy
{   /// Create a new retry policy
    pub fn new(
      max_attempts: usize
    , backoff_multiplier: f32
    , initial_backoff_ms: u64
    , max_backoff_ms: u64
    , jitter_ratio: f32
    ) -> Self
    {   RetryPolicy
        {   max_attempts: max_attempts.max(1)
          , backoff_multiplier
          , initial_backoff: Duration::from_millis(
              initial_backoff_ms
            )
          , max_backoff: Duration::from_millis(max_backoff_ms)
          , jitter_ratio: jitter_ratio.max(0.0)
        }
    }

    /// Base delay after the given failed attempt (0-based), capped
    pub fn backoff_for_attempt(
      &self
    , attempt: usize
    ) -> Duration
    {   let multiplier
          = self.backoff_multiplier.powi(attempt as i32);
        let millis = (self.initial_backoff.as_millis() as f32
          * multiplier) as u64;
        Duration::from_millis(millis)
          .min(self.max_backoff)
    }

    /// Base delay plus a uniformly random share of it
    pub fn jittered_backoff(
      &self
    , attempt: usize
    ) -> Duration
    {   let base = self.backoff_for_attempt(attempt);
        let spread = (base.as_millis() as f32 * self.jitter_ratio) as u64;
        let extra = if spread == 0
        {   0
        } else
        {   rand::thread_rng().gen_range(0..=spread)
        };
        let delay = base + Duration::from_millis(extra);
        debug!(
          "Backoff after attempt {}: {:?} (base {:?})",
          attempt + 1, delay, base
        );
        delay
    }

    /// Drive `attempt` until it succeeds, fails permanently, or the
    /// attempt budget runs out. `attempt` receives the 0-based index.
    pub async fn execute<T, F, Fut>(
      &self
    , mut attempt: F
    ) -> Result<T, crate::error::Error>
    where
      F: FnMut(usize) -> Fut,
      Fut: Future<Output = AttemptOutcome<T>>,
    {   let mut last_failure = None;
        for index in 0..self.max_attempts
        {   if index > 0
            {   tokio::time::sleep(
                  self.jittered_backoff(index - 1)
                ).await;
            }
            match attempt(index).await
            {   AttemptOutcome::Success(value) => {
                  if index > 0
                  {   info!("Attempt {} succeeded", index + 1);
                  }
                  return Ok(value);
                }
              , AttemptOutcome::Permanent(failure) => {
                  warn!(
                    "Attempt {} failed permanently: {:?}",
                    index + 1, failure
                  );
                  return Err(failure.into());
                }
              , AttemptOutcome::Transient(failure) => {
                  warn!(
                    "Attempt {}/{} failed: {}",
                    index + 1, self.max_attempts, failure
                  );
                  last_failure = Some(failure);
                }
            }
        }
        Err(crate::error::Error::GenerationUnavailable
        {   attempts: self.max_attempts
          , last_failure: last_failure
              .map(|f| f.to_string())
              .unwrap_or_else(|| "no attempt made".to_string())
        })
    }
}

impl From<&crate::config::RetryConfig> for RetryPolicy
{   fn from(config: &crate::config::RetryConfig) -> Self
    {   RetryPolicy::new(
          config.max_attempts
        , config.backoff_multiplier
        , config.initial_backoff_ms
        , config.max_backoff_ms
        , config.jitter_ratio
        )
    }
}

impl Default for RetryPolicy
{   fn default() -> Self
    {   RetryPolicy::from(&crate::config::RetryConfig::default())
    }
}

#[cfg(test)]
mod tests
{   use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn fast_policy(max_attempts: usize) -> RetryPolicy
    {   RetryPolicy::new(max_attempts, 2.0, 1, 4, 0.0)
    }

    #[test]
    fn test_backoff_grows_and_caps()
    {   let policy = RetryPolicy::new(5, 2.0, 1000, 6000, 0.25);
        assert_eq!(policy.backoff_for_attempt(0), Duration::from_millis(1000));
        assert_eq!(policy.backoff_for_attempt(1), Duration::from_millis(2000));
        assert_eq!(policy.backoff_for_attempt(2), Duration::from_millis(4000));
        assert_eq!(policy.backoff_for_attempt(3), Duration::from_millis(6000));
    }

    #[test]
    fn test_jitter_stays_in_range()
    {   let policy = RetryPolicy::new(3, 2.0, 1000, 6000, 0.25);
        for _ in 0..50
        {   let delay = policy.jittered_backoff(1);
            assert!(delay >= Duration::from_millis(2000));
            assert!(delay <= Duration::from_millis(2500));
        }
    }

    #[tokio::test]
    async fn test_transient_exhausts_budget()
    {   let calls = AtomicUsize::new(0);
        let result: Result<String, _> = fast_policy(3)
          .execute(|_| {
            calls.fetch_add(1, Ordering::SeqCst);
            async { AttemptOutcome::Transient(TransientFailure::ServerBusy(503)) }
          })
          .await;
        assert_eq!(calls.load(Ordering::SeqCst), 3);
        assert_eq!(
          result,
          Err(crate::error::Error::GenerationUnavailable
          {   attempts: 3
            , last_failure: "HTTP 503".to_string()
          })
        );
    }

    #[tokio::test]
    async fn test_permanent_stops_immediately()
    {   let calls = AtomicUsize::new(0);
        let result: Result<String, _> = fast_policy(3)
          .execute(|_| {
            calls.fetch_add(1, Ordering::SeqCst);
            async {
              AttemptOutcome::Permanent(
                PermanentFailure::Unauthorized("bad key".to_string())
              )
            }
          })
          .await;
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(matches!(result, Err(crate::error::Error::Authentication(_))));
    }

    #[tokio::test]
    async fn test_recovers_after_transient()
    {   let result = fast_policy(3)
          .execute(|index| async move {
            if index == 0
            {   AttemptOutcome::Transient(TransientFailure::Network)
            } else
            {   AttemptOutcome::Success(index)
            }
          })
          .await;
        assert_eq!(result, Ok(1));
    }
}
