//! Decoding raw transport bytes into provider JSON events
//!
//! The transport hands over an ordered byte stream. Depending on the
//! endpoint it is framed as server-sent events or as newline-delimited JSON.
//! Payloads that are not valid JSON are skipped; transport failures are
//! forwarded to the consumer.

use std::fmt::Display;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use eventsource_stream::{EventStreamError, Eventsource};
use futures_util::{Stream, StreamExt, stream};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use strum::{Display as StrumDisplay, EnumString};

use crate::error::StreamError;
use crate::stream::EventStream;

/// How JSON events are delimited on the wire
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, StrumDisplay, EnumString)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Framing {
    /// Server-sent events, one JSON object per `data:` field
    #[default]
    Sse,
    /// One JSON object per line
    Ndjson,
}

/// Decode a byte stream with the given framing
pub fn decode_events<S, B, E>(bytes: S, framing: Framing) -> EventStream<Value>
where
    S: Stream<Item = Result<B, E>> + Send + 'static,
    B: AsRef<[u8]> + Send + 'static,
    E: Display + Send + 'static,
{
    match framing {
        Framing::Sse => sse_events(bytes),
        Framing::Ndjson => ndjson_events(bytes),
    }
}

/// Decode a server-sent event byte stream
///
/// Empty payloads and the `[DONE]` sentinel are skipped.
pub fn sse_events<S, B, E>(bytes: S) -> EventStream<Value>
where
    S: Stream<Item = Result<B, E>> + Send + 'static,
    B: AsRef<[u8]> + Send + 'static,
    E: Display + Send + 'static,
{
    let mapped = bytes.eventsource().filter_map(|result| {
        let event = match result {
            Ok(event) => parse_payload(&event.data),
            Err(EventStreamError::Transport(e)) => Some(Err(StreamError::Transport(e.to_string()))),
            Err(e) => Some(Err(StreamError::Framing(e.to_string()))),
        };

        async move { event }
    });

    Box::pin(mapped)
}

/// Decode a newline-delimited JSON byte stream
///
/// Lines may be split across chunks; a final line without a trailing
/// newline is still decoded.
pub fn ndjson_events<S, B, E>(bytes: S) -> EventStream<Value>
where
    S: Stream<Item = Result<B, E>> + Send + 'static,
    B: AsRef<[u8]> + Send + 'static,
    E: Display + Send + 'static,
{
    let lines = Lines::new(Box::pin(bytes), MAX_LINE_BYTES);

    let mapped = stream::unfold(lines, |mut lines| async move {
        let line = lines.next_line().await?;
        Some((line, lines))
    })
    .filter_map(|line| {
        let event = match line {
            Ok(text) => parse_payload(&text),
            Err(e) => Some(Err(StreamError::Transport(e.to_string()))),
        };

        async move { event }
    });

    Box::pin(mapped)
}

/// Unwrap a Bedrock invoke-with-response-stream chunk
///
/// Bedrock wraps each Messages event as `{"bytes": "<base64 JSON>"}`,
/// sometimes nested under `"chunk"`. Such envelopes are replaced by the
/// decoded event; any other value is returned unchanged.
pub fn unwrap_invoke_chunk(value: Value) -> Value {
    let envelope = value.get("chunk").unwrap_or(&value);
    let Some(encoded) = envelope.get("bytes").and_then(Value::as_str) else {
        return value;
    };

    let decoded = match STANDARD.decode(encoded) {
        Ok(decoded) => decoded,
        Err(e) => {
            tracing::debug!(error = %e, "invoke chunk is not valid base64, passing through");
            return value;
        }
    };

    match serde_json::from_slice(&decoded) {
        Ok(inner) => inner,
        Err(e) => {
            tracing::debug!(error = %e, "invoke chunk does not contain JSON, passing through");
            value
        }
    }
}

fn parse_payload(data: &str) -> Option<Result<Value, StreamError>> {
    let data = data.trim();
    if data.is_empty() || data == "[DONE]" {
        return None;
    }

    match serde_json::from_str(data) {
        Ok(value) => Some(Ok(value)),
        Err(e) => {
            tracing::debug!(error = %e, "skipping unparseable stream payload");
            None
        }
    }
}

/// Longest NDJSON line kept before it is discarded
const MAX_LINE_BYTES: usize = 16 * 1024 * 1024;

/// Reassembles newline-terminated lines from arbitrary byte chunks
///
/// A line that grows past `max_line` bytes is dropped up to its next newline.
struct Lines<S> {
    bytes: S,
    buffer: Vec<u8>,
    max_line: usize,
    oversized: bool,
    exhausted: bool,
}

impl<S> Lines<S> {
    const fn new(bytes: S, max_line: usize) -> Self {
        Self {
            bytes,
            buffer: Vec::new(),
            max_line,
            oversized: false,
            exhausted: false,
        }
    }
}

impl<S, B, E> Lines<S>
where
    S: Stream<Item = Result<B, E>> + Unpin,
    B: AsRef<[u8]>,
{
    async fn next_line(&mut self) -> Option<Result<String, E>> {
        loop {
            if let Some(pos) = self.buffer.iter().position(|&b| b == b'\n') {
                let line: Vec<u8> = self.buffer.drain(..=pos).collect();
                if std::mem::take(&mut self.oversized) {
                    continue;
                }
                return Some(Ok(String::from_utf8_lossy(&line).into_owned()));
            }

            if self.buffer.len() > self.max_line {
                tracing::debug!(limit = self.max_line, "dropping oversized stream line");
                self.buffer.clear();
                self.oversized = true;
            }

            if self.exhausted {
                if self.buffer.is_empty() || self.oversized {
                    return None;
                }
                let rest = std::mem::take(&mut self.buffer);
                return Some(Ok(String::from_utf8_lossy(&rest).into_owned()));
            }

            match self.bytes.next().await {
                Some(Ok(chunk)) => self.buffer.extend_from_slice(chunk.as_ref()),
                Some(Err(e)) => return Some(Err(e)),
                None => self.exhausted = true,
            }
        }
    }
}
