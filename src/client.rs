use tokio::sync::mpsc;
use log::{debug, trace, error};
use crate::request::{ChatResponse, PromptRequest};

/// Client for the Perplexity chat-completions endpoint.
///
/// Holds no per-call state: every `submit` is one independent POST.
/// Cloning is cheap and clones share the connection pool.
#[derive(Debug, Clone)]
pub struct PerplexityClient
{   config: crate::config::ClientConfig
  , http_client: reqwest::Client
}

impl PerplexityClient
{   /// Create a client from explicit configuration
    pub fn new(config: crate::config::ClientConfig) -> Self
    {   debug!("Creating PerplexityClient for {}", config.api_base);
        PerplexityClient
        {   config
          , http_client: reqwest::Client::new()
        }
    }

    /// Create a client from `PERPLEXITY_API_KEY` / `PERPLEXITY_API_BASE`
    pub fn from_env() -> Result<Self, crate::error::Error>
    {   Ok(Self::new(crate::config::ClientConfig::from_env()?))
    }

    /// Use a custom reqwest client
    pub fn with_http_client(
      mut self
    , http_client: reqwest::Client
    ) -> Self
    {   self.http_client = http_client;
        self
    }

    pub fn config(&self) -> &crate::config::ClientConfig
    {   &self.config
    }

    /// Send a prompt with all defaults and the given model
    pub async fn send_prompt(
      &self
    , prompt: &str
    , model: &str
    ) -> crate::PromptReply
    {   self.submit(&PromptRequest::new(prompt).model(model)).await
    }

    /// Send a prompt with all defaults. Failures collapse to `None`
    /// (they are already logged where they happen).
    pub async fn ask(&self, prompt: &str) -> Option<String>
    {   match self.submit(&PromptRequest::new(prompt)).await
        {   Ok(text) => Some(text)
          , Err(e) => {
              debug!("ask failed: {}", e);
              None
            }
        }
    }

    /// Submit a request and return the first choice's content.
    ///
    /// With `stream` set the server-sent deltas are accumulated and
    /// the full text returned.
    pub async fn submit(
      &self
    , request: &PromptRequest
    ) -> crate::PromptReply
    {   let response = self.post(request).await?;

        if request.stream
        {   return crate::stream::collect_deltas(
              response.bytes_stream()
            ).await;
        }

        let body = response.text().await.map_err(|e| {
          error!("Failed to read response body: {}", e);
          crate::error::Error::HttpError(e.to_string())
        })?;
        trace!("Perplexity response body: {}", body);

        let chat_response: ChatResponse
          = serde_json::from_str(&body).map_err(|e| {
            error!("Parse error: {}", e);
            crate::error::Error::ParseError(e.to_string())
          })?;

        if let Some(usage) = &chat_response.usage
        {   debug!(
              "Tokens used: {} prompt, {} completion",
              usage.prompt_tokens, usage.completion_tokens
            );
        }

        chat_response.into_first_content().map_err(|e| {
          error!("No choices in response");
          e
        })
    }

    /// Submit a streamed request; each content delta arrives on the
    /// returned receiver as soon as it is decoded.
    ///
    /// Transport and status failures are returned directly. A
    /// decoding failure is sent as the last item before the channel
    /// closes.
    pub async fn stream_prompt(
      &self
    , request: &PromptRequest
    ) -> Result<
        mpsc::UnboundedReceiver<crate::PromptReply>,
        crate::error::Error
      >
    {   let request = request.clone().stream(true);
        let response = self.post(&request).await?;
        let (reply_tx, reply_rx) = mpsc::unbounded_channel();

        tokio::spawn(async move {
          crate::stream::forward_deltas(
            response.bytes_stream(),
            reply_tx
          ).await;
        });

        Ok(reply_rx)
    }

    /// POST the request and check the status
    async fn post(
      &self
    , request: &PromptRequest
    ) -> Result<reqwest::Response, crate::error::Error>
    {   debug!(
          "Sending prompt to model: {} (stream: {})",
          request.model, request.stream
        );
        if crate::models::lookup(&request.model).is_none()
        {   debug!("Model {} is not in the known list", request.model);
        }

        let chat_request = request.to_chat_request();
        trace!("Perplexity request: {:?}", chat_request);

        let response = self.http_client
          .post(self.config.endpoint())
          .header("Accept", "application/json")
          .header("Content-Type", "application/json")
          .bearer_auth(&self.config.api_key)
          .json(&chat_request)
          .send()
          .await
          .map_err(|e| {
            error!("HTTP error: {}", e);
            crate::error::Error::HttpError(e.to_string())
          })?;

        let status = response.status();
        trace!("Perplexity response status: {}", status);

        if !status.is_success()
        {   let error_text = response.text().await
              .unwrap_or_else(|_|
                "Unknown error".to_string()
              );
            error!(
              "HTTP error occurred: {} - {}",
              status.as_u16(), error_text
            );
            return Err(crate::error::Error::ApiError(
              status.as_u16(), error_text
            ));
        }

        Ok(response)
    }
}
