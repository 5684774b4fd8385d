//! Prompt request and the chat-completions wire types

use serde::{Deserialize, Serialize};

/// Default model when the caller names none
pub const DEFAULT_MODEL: &str = "llama-3-70b-instruct";

/// Default generation limit
pub const DEFAULT_MAX_TOKENS: u32 = 1000;

/// System instruction prepended to every prompt
pub const SYSTEM_MESSAGE: &str = "Be precise and concise.";

// ===== Caller-facing request =====

/// A single prompt and its generation controls.
///
/// Nothing here is validated: the remote service is the only
/// authority on acceptable ranges. Unset sampling fields are left
/// out of the wire body, so the service defaults apply.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PromptRequest
{   /// The prompt text, sent as the user turn
    pub prompt: String
  , /// Model identifier
    pub model: String
  , /// Max tokens to generate
    pub max_tokens: u32
  , /// Sampling temperature
    pub temperature: Option<f32>
  , /// Nucleus sampling threshold
    pub top_p: Option<f32>
  , /// Top-k filtering, 0 disables
    pub top_k: Option<u32>
  , /// Penalty for tokens already present
    pub presence_penalty: Option<f32>
  , /// Penalty scaled by token frequency
    pub frequency_penalty: Option<f32>
  , /// Ask the service for a server-sent-events response
    pub stream: bool
}

impl PromptRequest
{   pub fn new(prompt: impl Into<String>) -> Self
    {   PromptRequest
        {   prompt: prompt.into()
          , model: DEFAULT_MODEL.to_string()
          , max_tokens: DEFAULT_MAX_TOKENS
          , temperature: None
          , top_p: None
          , top_k: None
          , presence_penalty: None
          , frequency_penalty: None
          , stream: false
        }
    }

    pub fn model(mut self, model: impl Into<String>) -> Self
    {   self.model = model.into();
        self
    }

    pub fn max_tokens(mut self, max_tokens: u32) -> Self
    {   self.max_tokens = max_tokens;
        self
    }

    pub fn temperature(mut self, temperature: f32) -> Self
    {   self.temperature = Some(temperature);
        self
    }

    pub fn top_p(mut self, top_p: f32) -> Self
    {   self.top_p = Some(top_p);
        self
    }

    pub fn top_k(mut self, top_k: u32) -> Self
    {   self.top_k = Some(top_k);
        self
    }

    pub fn presence_penalty(mut self, penalty: f32) -> Self
    {   self.presence_penalty = Some(penalty);
        self
    }

    pub fn frequency_penalty(mut self, penalty: f32) -> Self
    {   self.frequency_penalty = Some(penalty);
        self
    }

    pub fn stream(mut self, stream: bool) -> Self
    {   self.stream = stream;
        self
    }

    /// Build the wire body for this request
    pub fn to_chat_request(&self) -> ChatRequest
    {   ChatRequest
        {   model: self.model.clone()
          , messages: vec![
              ChatMessage::system(SYSTEM_MESSAGE)
            , ChatMessage::user(self.prompt.clone())
            ]
          , max_tokens: self.max_tokens
          , temperature: self.temperature
          , top_p: self.top_p
          , top_k: self.top_k
          , stream: self.stream.then_some(true)
          , presence_penalty: self.presence_penalty
          , frequency_penalty: self.frequency_penalty
        }
    }
}

// ===== Message Types =====

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage
{   pub role: String
  , pub content: String
}

impl ChatMessage
{   pub fn system(content: impl Into<String>) -> Self
    {   ChatMessage
        {   role: "system".to_string()
          , content: content.into()
        }
    }

    pub fn user(content: impl Into<String>) -> Self
    {   ChatMessage
        {   role: "user".to_string()
          , content: content.into()
        }
    }
}

/// Body POSTed to `/chat/completions`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChatRequest
{   pub model: String
  , pub messages: Vec<ChatMessage>
  , pub max_tokens: u32
  , #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>
  , #[serde(skip_serializing_if = "Option::is_none")]
    pub top_p: Option<f32>
  , #[serde(skip_serializing_if = "Option::is_none")]
    pub top_k: Option<u32>
  , #[serde(skip_serializing_if = "Option::is_none")]
    pub stream: Option<bool>
  , #[serde(skip_serializing_if = "Option::is_none")]
    pub presence_penalty: Option<f32>
  , #[serde(skip_serializing_if = "Option::is_none")]
    pub frequency_penalty: Option<f32>
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChatResponse
{   pub choices: Vec<Choice>
  , #[serde(default)]
    pub model: Option<String>
  , #[serde(default)]
    pub usage: Option<Usage>
}

#[derive(Debug, Clone, Deserialize)]
pub struct Choice
{   pub message: ResponseMessage
  , #[serde(default)]
    pub finish_reason: Option<String>
}

/// Assistant message; `role` is not always echoed back
#[derive(Debug, Clone, Deserialize)]
pub struct ResponseMessage
{   #[serde(default)]
    pub role: Option<String>
  , pub content: String
}

/// Token accounting reported by the service
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Usage
{   pub prompt_tokens: u32
  , pub completion_tokens: u32
  , pub total_tokens: u32
}

impl ChatResponse
{   /// Content of the first choice
    pub fn into_first_content(self)
      -> Result<String, crate::error::Error>
    {   self.choices.into_iter()
          .next()
          .map(|c| c.message.content)
          .ok_or(crate::error::Error::NoChoicesInResponse)
    }
}

#[cfg(test)]
mod tests
{   use super::*;
    use serde_json::json;

    #[test]
    fn defaults_match_minimal_body()
    {   let body = serde_json::to_value(
          PromptRequest::new("hello").to_chat_request()
        ).unwrap();
        assert_eq!(body, json!({
          "model": "llama-3-70b-instruct",
          "messages": [
            {"role": "system", "content": "Be precise and concise."},
            {"role": "user", "content": "hello"}
          ],
          "max_tokens": 1000
        }));
    }

    #[test]
    fn extended_fields_serialize_when_set()
    {   let request = PromptRequest::new("Describe the solar system.")
          .temperature(0.5)
          .top_p(0.25)
          .top_k(0)
          .presence_penalty(-2.0)
          .frequency_penalty(1.5)
          .stream(true);
        let body = serde_json::to_value(request.to_chat_request())
          .unwrap();
        assert_eq!(body["temperature"], json!(0.5));
        assert_eq!(body["top_p"], json!(0.25));
        assert_eq!(body["top_k"], json!(0));
        assert_eq!(body["stream"], json!(true));
        assert_eq!(body["presence_penalty"], json!(-2.0));
        assert_eq!(body["frequency_penalty"], json!(1.5));
    }

    #[test]
    fn stream_false_is_omitted()
    {   let body = serde_json::to_value(
          PromptRequest::new("x").stream(false).to_chat_request()
        ).unwrap();
        assert!(body.get("stream").is_none());
    }

    #[test]
    fn empty_prompt_is_forwarded()
    {   let chat = PromptRequest::new("").to_chat_request();
        assert_eq!(chat.messages[1], ChatMessage::user(""));
    }

    #[test]
    fn first_content_of_response()
    {   let response: ChatResponse = serde_json::from_value(json!({
          "choices": [
            {"message": {"role": "assistant", "content": "4"}},
            {"message": {"role": "assistant", "content": "four"}}
          ]
        })).unwrap();
        assert_eq!(response.into_first_content().unwrap(), "4");
    }

    #[test]
    fn empty_choices_is_no_result()
    {   let response: ChatResponse =
          serde_json::from_value(json!({"choices": []})).unwrap();
        assert_eq!(
          response.into_first_content(),
          Err(crate::error::Error::NoChoicesInResponse)
        );
    }

    #[test]
    fn missing_content_fails_to_parse()
    {   let parsed = serde_json::from_value::<ChatResponse>(json!({
          "choices": [{"message": {"role": "assistant"}}]
        }));
        assert!(parsed.is_err());
    }
}
