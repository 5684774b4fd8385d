use std::fmt;

/// Error type for prompt submission
/// Implements Clone for sending through channels
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error
{   /// API key is missing from the configuration
    MissingApiKey(String)
  , /// Invalid configuration
    InvalidConfiguration(String)
  , /// Transport failure: DNS, connection refused, timeout
    HttpError(String)
  , /// API answered with a non-success status (status, body)
    ApiError(u16, String)
  , /// Failed to parse API response
    ParseError(String)
  , /// No choices in API response
    NoChoicesInResponse
  , /// Failed while decoding a streamed response
    StreamError(String)
}

impl fmt::Display for Error
{   fn fmt(&self, f: &mut fmt::Formatter<'_>)
      -> fmt::Result
    {   match self
        {   Error::MissingApiKey(var) => {
              write!(f, "Missing API key: {} is not set", var)
            }
          , Error::InvalidConfiguration(msg) => {
              write!(f, "Invalid configuration: {}", msg)
            }
          , Error::HttpError(msg) => {
              write!(f, "HTTP error: {}", msg)
            }
          , Error::ApiError(status, body) => {
              write!(f, "API error ({}): {}", status, body)
            }
          , Error::ParseError(msg) => {
              write!(f, "Parse error: {}", msg)
            }
          , Error::NoChoicesInResponse => {
              write!(f, "API response contained no choices")
            }
          , Error::StreamError(msg) => {
              write!(f, "Stream error: {}", msg)
            }
        }
    }
}

impl std::error::Error for Error {}

#[cfg(test)]
mod tests
{   use super::*;

    #[test]
    fn api_error_displays_status_and_body()
    {   let err = Error::ApiError(
          500, "internal server error".to_string()
        );
        assert_eq!(
          err.to_string(),
          "API error (500): internal server error"
        );
    }

    #[test]
    fn no_choices_displays_message()
    {   assert_eq!(
          Error::NoChoicesInResponse.to_string(),
          "API response contained no choices"
        );
    }

    #[test]
    fn missing_key_names_the_variable()
    {   let err = Error::MissingApiKey(
          "PERPLEXITY_API_KEY".to_string()
        );
        assert!(err.to_string().contains("PERPLEXITY_API_KEY"));
    }
}
