use tokio::sync::mpsc;
use log::{debug, error, info};
use crate::NamesmithFoot;

/// Backend state owned by the event loop
pub struct NamesmithBackendState
{   pub generation_client: crate::GenerationClient
  , pub parser: crate::ResponseParser
}

impl NamesmithBackendState
{   /// Create backend state from configuration
    pub fn new(config: &crate::NamesmithConfig) -> Self
    {   debug!("Initializing NamesmithBackendState");
        NamesmithBackendState
        {   generation_client: crate::GenerationClient::new(config)
          , parser: crate::ResponseParser::new(config.parser.clone())
        }
    }
}

/// Public API for the namesmith backend - owns the task
pub struct NamesmithBackend
{   hand: crate::NamesmithHand
  , _task_handle: tokio::task::JoinHandle<()>
}

impl NamesmithBackend
{   /// Create and spawn a new backend
    /// Returns immediately - spawns background task
    pub fn new(config: crate::NamesmithConfig) -> Self
    {   debug!("Creating NamesmithBackend with task ownership");

        let (generate_names_tx, generate_names_rx)
          = mpsc::unbounded_channel();
        let (set_default_api_key_tx, set_default_api_key_rx)
          = mpsc::unbounded_channel();
        let (kill_process_tx, kill_process_rx)
          = mpsc::unbounded_channel();

        let hand = crate::NamesmithHand
        {   generate_names_tx
          , set_default_api_key_tx
          , kill_process_tx
        };

        let foot = crate::NamesmithFoot
        {   generate_names_rx
          , set_default_api_key_rx
          , kill_process_rx
        };

        let _task_handle = tokio::spawn(async move {
          run_backend_loop(foot, config).await
        });

        NamesmithBackend
        {   hand
          , _task_handle
        }
    }

    /// Queue a submission - returns almost immediately
    pub async fn generate_names(
      &self
    , request: crate::GenerationRequest
    , api_key: Option<String>
    ) -> Result<
        mpsc::UnboundedReceiver<crate::GenerateNamesReply>,
        crate::error::Error
      >
    {   debug!("generate_names queuing {} names", request.count());
        let (reply_tx, reply_rx)
          = mpsc::unbounded_channel();

        let cmd = crate::GenerateNamesArgs
        {   request
          , api_key
          , reply: reply_tx
        };

        self.hand.generate_names_tx
          .send(cmd)
          .map_err(|_| backend_gone())?;

        Ok(reply_rx)
    }

    /// Replace the fallback API key - returns almost immediately
    pub async fn set_default_api_key(
      &self
    , key: Option<String>
    ) -> Result<
        mpsc::UnboundedReceiver<crate::SetDefaultApiKeyReply>,
        crate::error::Error
      >
    {   debug!("set_default_api_key queuing");
        let (reply_tx, reply_rx)
          = mpsc::unbounded_channel();

        let cmd = crate::SetDefaultApiKeyArgs
        {   key
          , reply: reply_tx
        };

        self.hand.set_default_api_key_tx
          .send(cmd)
          .map_err(|_| backend_gone())?;

        Ok(reply_rx)
    }

    /// Gracefully shutdown the backend
    pub async fn shutdown(self)
      -> Result<(), crate::error::Error>
    {   debug!("Shutting down NamesmithBackend");
        let (reply_tx, mut reply_rx)
          = mpsc::unbounded_channel();

        let cmd = crate::KillProcessArgs
        {   reply: reply_tx
        };

        self.hand.kill_process_tx
          .send(cmd)
          .map_err(|_| backend_gone())?;

        // Wait for shutdown confirmation
        if let Some(result) = reply_rx.recv().await
        {   debug!("Backend shutdown confirmed");
            result
        } else
        {   Err(backend_gone())
        }
    }
}

fn backend_gone() -> crate::error::Error
{   error!("Backend channel closed");
    crate::error::Error::GenerationUnavailable
    {   attempts: 0
      , last_failure: "backend stopped".to_string()
    }
}

/// Main backend event loop
///
/// Submissions are handled one at a time, in arrival order.
async fn run_backend_loop(
  foot: crate::NamesmithFoot
, config: crate::NamesmithConfig
)
{   debug!("Starting NamesmithBackend event loop");
    let mut state = NamesmithBackendState::new(&config);
    let NamesmithFoot
    {   mut generate_names_rx
      , mut set_default_api_key_rx
      , mut kill_process_rx
    } = foot;

    loop
    { tokio::select!
      { Some(cmd) = generate_names_rx.recv() => {
          debug!("Received GenerateNames");
          let result = crate::pipeline::generate_names(
            &state.generation_client,
            &state.parser,
            &cmd.request,
            cmd.api_key.as_deref()
          ).await;
          if let Err(e) = &result
          {   error!("GenerateNames failed ({}): {}", e.kind(), e);
          }
          let _ = cmd.reply.send(result);
        }
      , Some(cmd) = set_default_api_key_rx.recv() => {
          debug!("Received SetDefaultApiKey");
          let key = cmd.key
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty());
          state.generation_client.set_default_api_key(key);
          let _ = cmd.reply.send(Ok(()));
        }
      , Some(cmd) = kill_process_rx.recv() => {
          debug!("Received KillProcess");
          let _ = cmd.reply.send(Ok(()));
          info!("NamesmithBackend shutting down");
          break;
        }
      , else => {
          debug!("All command channels closed");
          break;
        }
      }
    }
}
