//! Server-sent-events decoding for streamed completions

use eventsource_stream::Eventsource;
use futures_util::{Stream, StreamExt};
use log::{debug, error, trace};
use serde::Deserialize;
use tokio::sync::mpsc;
use std::ops::ControlFlow;

/// Terminal marker sent as the last `data:` payload
const DONE_MARKER: &str = "[DONE]";

#[derive(Debug, Clone, Deserialize)]
pub struct StreamChunk
{   #[serde(default)]
    pub choices: Vec<StreamChoice>
}

#[derive(Debug, Clone, Deserialize)]
pub struct StreamChoice
{   #[serde(default)]
    pub delta: StreamDelta
  , #[serde(default)]
    pub finish_reason: Option<String>
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct StreamDelta
{   #[serde(default)]
    pub content: Option<String>
}

/// Decode an SSE byte stream and hand every non-empty content
/// delta to `on_delta`, in arrival order. `on_delta` returning
/// `Break` stops decoding early.
///
/// Ends on `[DONE]` or when the byte stream ends. A stream with no
/// `data:` events is a `ParseError`; one whose chunks never carry a
/// choice is `NoChoicesInResponse`.
pub async fn for_each_delta<S, B, E, F>(
  bytes: S
, mut on_delta: F
) -> Result<(), crate::error::Error>
where S: Stream<Item = Result<B, E>>
    , B: AsRef<[u8]>
    , E: std::fmt::Display
    , F: FnMut(String) -> ControlFlow<()>
{   let mut events = Box::pin(bytes.eventsource());
    let mut saw_event = false;
    let mut saw_choice = false;
    let mut count = 0usize;

    while let Some(event) = events.next().await
    {   let event = event.map_err(|e| {
          error!("SSE stream error: {}", e);
          crate::error::Error::StreamError(e.to_string())
        })?;

        let data = event.data.trim();
        if data.is_empty()
        {   continue;
        }
        saw_event = true;
        if data == DONE_MARKER
        {   break;
        }
        trace!("Stream event: {}", data);

        let chunk: StreamChunk = serde_json::from_str(data)
          .map_err(|e| {
            error!("Failed to parse stream chunk: {}", e);
            crate::error::Error::ParseError(e.to_string())
          })?;

        let Some(choice) = chunk.choices.into_iter().next()
        else
        {   continue;
        };
        saw_choice = true;

        if let Some(content) = choice.delta.content
          .filter(|c| !c.is_empty())
        {   count += 1;
            if on_delta(content).is_break()
            {   debug!("Delta consumer gone after {} deltas", count);
                return Ok(());
            }
        }
    }

    if !saw_event
    {   error!("Response carried no stream events");
        return Err(crate::error::Error::ParseError(
          "response is not an event stream".to_string()
        ));
    }
    if !saw_choice
    {   error!("No choices in streamed response");
        return Err(crate::error::Error::NoChoicesInResponse);
    }

    debug!("Stream finished after {} deltas", count);
    Ok(())
}

/// Accumulate the full reply text from an SSE byte stream
pub async fn collect_deltas<S, B, E>(bytes: S)
  -> crate::PromptReply
where S: Stream<Item = Result<B, E>>
    , B: AsRef<[u8]>
    , E: std::fmt::Display
{   let mut text = String::new();
    for_each_delta(bytes, |delta| {
      text.push_str(&delta);
      ControlFlow::Continue(())
    }).await?;
    Ok(text)
}

/// Forward each delta through `reply` as it arrives, stopping once
/// the receiver is dropped. A decoding error is sent as the final
/// item.
pub async fn forward_deltas<S, B, E>(
  bytes: S
, reply: mpsc::UnboundedSender<crate::PromptReply>
)
where S: Stream<Item = Result<B, E>>
    , B: AsRef<[u8]>
    , E: std::fmt::Display
{   let result = for_each_delta(bytes, |delta| {
      match reply.send(Ok(delta))
      {   Ok(()) => ControlFlow::Continue(())
        , Err(_) => ControlFlow::Break(())
      }
    }).await;

    if let Err(e) = result
    {   let _ = reply.send(Err(e));
    }
}
