pub mod error;
pub mod config;
pub mod request;
pub mod stream;
pub mod models;
pub mod client;

/*

pplx: send one prompt to the Perplexity chat-completions api and
get the reply text back. one request in, one string (or one typed
error) out; no conversation state, no retries.

pplx/
├── Cargo.toml
├── src/
│   ├── lib.rs          # Re-exports
│   ├── main.rs         # Example entry point
│   ├── error.rs        # Error type
│   ├── config.rs       # Token and endpoint configuration
│   ├── client.rs       # PerplexityClient: submit / ask / stream
│   ├── request.rs      # PromptRequest and wire types
│   ├── stream.rs       # SSE decoding for stream = true
│   └── models.rs       # Known model list (reference only)
└── tests/              # Integration tests against a stub server

*/

pub use client::PerplexityClient;
pub use config::ClientConfig;
pub use error::Error;
pub use request::PromptRequest;

/// Reply text, or the reason there is none
pub type PromptReply = Result<String, crate::error::Error>;
