use std::pin::Pin;

use eventsource_stream::Eventsource;
use futures_util::{future, Stream, StreamExt};
use rephrase_logging::rephrase_debug;

use crate::{decode_event, ApiError, WireEvent};

/// Decoded events of one session, in the order the server sent them.
pub type WireEventStream = Pin<Box<dyn Stream<Item = Result<WireEvent, ApiError>> + Send>>;

/// Parses an SSE byte stream into wire events.
///
/// Only unnamed (`message`) events are considered. Payloads that are not JSON
/// or that match no known shape are dropped here and never surface.
pub(crate) fn wire_events<S, B, E>(bytes: S) -> WireEventStream
where
    S: Stream<Item = Result<B, E>> + Send + 'static,
    B: AsRef<[u8]>,
    E: std::error::Error + Send + 'static,
{
    let events = bytes.eventsource().filter_map(|item| {
        let decoded = match item {
            Ok(event) if !is_message_event(&event.event) => None,
            Ok(event) => match decode_event(&event.data) {
                Ok(Some(wire)) => Some(Ok(wire)),
                Ok(None) => {
                    rephrase_debug!("Ignoring stream event without required fields: {}", event.data);
                    None
                }
                Err(err) => {
                    rephrase_debug!("Failed to parse stream event {:?}: {}", event.data, err);
                    None
                }
            },
            Err(err) => Some(Err(ApiError::Transport(format!("event stream error: {err}")))),
        };
        future::ready(decoded)
    });
    Box::pin(events)
}

fn is_message_event(name: &str) -> bool {
    name.is_empty() || name == "message"
}
