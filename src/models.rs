//! Known Perplexity models, for reference only.
//!
//! Pricing and context lengths as published 2024-04-22. Requests are
//! never checked against this table; unknown models go out as-is.

/// Capabilities and pricing of a hosted model
#[derive(Debug, Clone, PartialEq)]
pub struct ModelInfo
{   /// Identifier sent as `model`
    pub name: &'static str
  , /// Context window (in tokens)
    pub context_length: usize
  , /// Cost per 1M tokens (in USD)
    pub cost_per_million_tokens: f32
  , /// Flat cost per 1000 requests (online models only)
    pub cost_per_thousand_requests: Option<f32>
}

pub const KNOWN_MODELS: &[ModelInfo] = &[
  ModelInfo
  {   name: "llama-3-70b-instruct"
    , context_length: 8192
    , cost_per_million_tokens: 1.00
    , cost_per_thousand_requests: None
  }
, ModelInfo
  {   name: "llama-3-8b-instruct"
    , context_length: 8192
    , cost_per_million_tokens: 0.20
    , cost_per_thousand_requests: None
  }
, ModelInfo
  {   name: "codellama-70b-instruct"
    , context_length: 16384
    , cost_per_million_tokens: 1.00
    , cost_per_thousand_requests: None
  }
, ModelInfo
  {   name: "sonar-small-chat"
    , context_length: 16384
    , cost_per_million_tokens: 0.20
    , cost_per_thousand_requests: None
  }
, ModelInfo
  {   name: "sonar-medium-chat"
    , context_length: 16384
    , cost_per_million_tokens: 0.60
    , cost_per_thousand_requests: None
  }
, ModelInfo
  {   name: "sonar-small-online"
    , context_length: 12000
    , cost_per_million_tokens: 0.20
    , cost_per_thousand_requests: Some(5.0)
  }
, ModelInfo
  {   name: "sonar-medium-online"
    , context_length: 12000
    , cost_per_million_tokens: 0.60
    , cost_per_thousand_requests: Some(5.0)
  }
];

/// Look up a model by identifier
pub fn lookup(name: &str) -> Option<&'static ModelInfo>
{   KNOWN_MODELS.iter().find(|m| m.name == name)
}

#[cfg(test)]
mod tests
{   use super::*;

    #[test]
    fn default_model_is_known()
    {   let info = lookup(crate::request::DEFAULT_MODEL).unwrap();
        assert_eq!(info.context_length, 8192);
    }

    #[test]
    fn online_models_carry_request_pricing()
    {   let info = lookup("sonar-medium-online").unwrap();
        assert_eq!(info.cost_per_thousand_requests, Some(5.0));
    }

    #[test]
    fn unknown_model_is_none()
    {   assert!(lookup("gpt-4").is_none());
    }
}
