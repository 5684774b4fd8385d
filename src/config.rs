//! Client configuration: bearer token and endpoint base

use serde::{Deserialize, Serialize};
use log::{debug, error};

/// Default Perplexity API base, `/chat/completions` is appended
pub const DEFAULT_API_BASE: &str
  = "https://api.perplexity.ai";

/// Environment variable holding the bearer token
pub const API_KEY_VAR: &str = "PERPLEXITY_API_KEY";

/// Environment variable overriding the API base
pub const API_BASE_VAR: &str = "PERPLEXITY_API_BASE";

/// Client configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientConfig
{   /// Bearer token sent in the Authorization header
    pub api_key: String
  , /// API base URL, without trailing `/chat/completions`
    #[serde(default = "default_api_base")]
    pub api_base: String
}

fn default_api_base() -> String
{   DEFAULT_API_BASE.to_string()
}

impl ClientConfig
{   /// Configuration with the given token and the default base
    pub fn new(api_key: impl Into<String>) -> Self
    {   ClientConfig
        {   api_key: api_key.into()
          , api_base: default_api_base()
        }
    }

    /// Override the API base (e.g. a proxy or a local stub)
    pub fn with_api_base(
      mut self
    , api_base: impl Into<String>
    ) -> Self
    {   self.api_base = api_base.into();
        self
    }

    /// Read configuration from the process environment
    pub fn from_env() -> Result<Self, crate::error::Error>
    {   Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Read configuration through an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F)
      -> Result<Self, crate::error::Error>
    where F: Fn(&str) -> Option<String>
    {   let api_key = lookup(API_KEY_VAR)
          .filter(|k| !k.trim().is_empty())
          .ok_or_else(|| {
            error!("{} is not set", API_KEY_VAR);
            crate::error::Error::MissingApiKey(
              API_KEY_VAR.to_string()
            )
          })?;

        let api_base = match lookup(API_BASE_VAR)
        {   Some(base) if base.trim().is_empty() => {
              error!("{} is set but empty", API_BASE_VAR);
              return Err(
                crate::error::Error::InvalidConfiguration(
                  format!("{} is empty", API_BASE_VAR)
                )
              );
            }
          , Some(base) => {
              debug!("Using API base override: {}", base);
              base
            }
          , None => default_api_base()
        };

        Ok(ClientConfig { api_key, api_base })
    }

    /// Full chat-completions endpoint URL
    pub fn endpoint(&self) -> String
    {   format!(
          "{}/chat/completions",
          self.api_base.trim_end_matches('/')
        )
    }
}
