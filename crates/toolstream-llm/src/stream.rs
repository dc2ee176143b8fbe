//! Driving a parser over a sequence of provider events

use std::borrow::Borrow;
use std::fmt::Display;
use std::pin::Pin;

use futures_util::{Stream, StreamExt};
use serde_json::Value;
use toolstream_config::{ParserConfig, ProviderFamily};

use crate::decode::{Framing, decode_events, unwrap_invoke_chunk};
use crate::error::StreamError;
use crate::parser::{EventParser, new_parser};
use crate::types::UnifiedEvent;

/// Boxed stream of fallible items
pub type EventStream<T> = Pin<Box<dyn Stream<Item = Result<T, StreamError>> + Send>>;

/// Iterator adapter yielding the unified events for a sequence of provider events
///
/// Inbound events that produce no output are skipped, so every item is a
/// real [`UnifiedEvent`] in inbound order.
#[derive(Debug)]
pub struct UnifiedEvents<I, P> {
    events: I,
    parser: P,
}

impl<I, P> UnifiedEvents<I, P> {
    pub const fn new(events: I, parser: P) -> Self {
        Self { events, parser }
    }

    /// Give back the parser, for example to inspect its family
    pub fn into_parser(self) -> P {
        self.parser
    }
}

impl<I, P> Iterator for UnifiedEvents<I, P>
where
    I: Iterator,
    I::Item: Borrow<Value>,
    P: EventParser,
{
    type Item = UnifiedEvent;

    fn next(&mut self) -> Option<UnifiedEvent> {
        let parser = &mut self.parser;
        self.events.find_map(|event| parser.parse_event(event.borrow()))
    }
}

/// Extension for turning any iterator of provider events into unified events
pub trait UnifiedEventsExt: Iterator + Sized {
    fn unified<P: EventParser>(self, parser: P) -> UnifiedEvents<Self, P> {
        UnifiedEvents::new(self, parser)
    }
}

impl<I> UnifiedEventsExt for I
where
    I: Iterator,
    I::Item: Borrow<Value>,
{
}

/// Translate a stream of decoded provider events
///
/// Transport errors are forwarded unchanged; events the parser ignores are
/// filtered out.
pub fn unified_stream<S, P>(events: S, mut parser: P) -> EventStream<UnifiedEvent>
where
    S: Stream<Item = Result<Value, StreamError>> + Send + 'static,
    P: EventParser + 'static,
{
    let mapped = events.filter_map(move |result| {
        let event = match result {
            Ok(value) => parser.parse_event(&value).map(Ok),
            Err(e) => Some(Err(e)),
        };

        async move { event }
    });

    Box::pin(mapped)
}

/// Full path from raw transport bytes to unified events
///
/// Invoke streams have their base64 chunk envelopes unwrapped before
/// parsing.
pub fn event_pipeline<S, B, E>(
    bytes: S,
    family: ProviderFamily,
    framing: Framing,
    config: ParserConfig,
) -> EventStream<UnifiedEvent>
where
    S: Stream<Item = Result<B, E>> + Send + 'static,
    B: AsRef<[u8]> + Send + 'static,
    E: Display + Send + 'static,
{
    tracing::debug!(%family, %framing, "starting event pipeline");

    let events = decode_events(bytes, framing);
    let events: EventStream<Value> = match family {
        ProviderFamily::InvokeStream => Box::pin(events.map(|result| result.map(unwrap_invoke_chunk))),
        ProviderFamily::ConverseStream => events,
    };

    unified_stream(events, new_parser(family, config))
}
