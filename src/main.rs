use log::{debug, error};
use pplx::{PerplexityClient, PromptRequest};

const DEFAULT_PROMPT: &str = "How many stars are in the universe?";

/// Plain reply text, or `None` when there is none
fn render_reply(result: Option<&str>) -> String
{   format!(
      "Received from Perplexity AI: {}",
      result.unwrap_or("None")
    )
}

#[tokio::main]
async fn main()
{   // .env is optional
    let _ = dotenvy::dotenv();
    env_logger::init();

    let prompt = std::env::args()
      .nth(1)
      .unwrap_or_else(|| DEFAULT_PROMPT.to_string());
    let stream = std::env::var("PERPLEXITY_STREAM")
      .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
      .unwrap_or(false);

    let client = match PerplexityClient::from_env()
    {   Ok(client) => client
      , Err(e) => {
          error!("{}", e);
          std::process::exit(1);
        }
    };

    if !stream
    {   let result = client.ask(&prompt).await;
        println!("{}", render_reply(result.as_deref()));
        return;
    }

    debug!("Streaming reply");
    match client.stream_prompt(&PromptRequest::new(prompt)).await
    {   Ok(mut rx) => {
          while let Some(delta) = rx.recv().await
          {   match delta
              {   Ok(text) => println!("{}", text)
                , Err(e) => error!("An error occurred: {}", e)
              }
          }
        }
      , Err(e) => error!("An error occurred: {}", e)
    }
}
