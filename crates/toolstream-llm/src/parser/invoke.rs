//! Invoke stream parser for Anthropic Messages events
//!
//! | `type` | Condition | Effect |
//! |---|---|---|
//! | `content_block_start` | `content_block.type == "text"` | emit its text (or `""`) |
//! | `content_block_start` | `content_block.type == "tool_use"` | open a tool call |
//! | `content_block_delta` | `delta.type == "text_delta"` | emit its text (or `""`) |
//! | `content_block_delta` | `delta.type == "input_json_delta"` | emit a tool call fragment |
//! | `content_block_stop` | | close the open tool call |
//! | anything else | | ignored |
//!
//! Tool call fragments require both an id and a name on the open call.

use serde::Deserialize;
use serde_json::Value;
use toolstream_config::{ParserConfig, ProviderFamily};

use super::EventParser;
use super::state::{Guard, InFlightToolCall};
use crate::protocol::invoke::{InvokeContentBlock, InvokeDelta, InvokeStreamEvent};
use crate::types::UnifiedEvent;

/// Parser for the Anthropic Messages (Invoke) stream grammar
#[derive(Debug, Default)]
pub struct InvokeParser {
    in_flight: InFlightToolCall,
    config: ParserConfig,
}

impl InvokeParser {
    /// Create a parser with no open tool call
    pub fn new(config: ParserConfig) -> Self {
        Self {
            in_flight: InFlightToolCall::Idle,
            config,
        }
    }

    /// Apply one typed event to the parser state
    pub fn convert_event(&mut self, event: InvokeStreamEvent) -> Option<UnifiedEvent> {
        match event {
            InvokeStreamEvent::ContentBlockStart { index, content_block } => match content_block {
                InvokeContentBlock::Text { text } => Some(UnifiedEvent::text(text.unwrap_or_default())),
                InvokeContentBlock::ToolUse { id, name } => {
                    self.in_flight.open(id, name, index);
                    None
                }
                InvokeContentBlock::Other => None,
            },

            InvokeStreamEvent::ContentBlockDelta { index, delta } => match delta {
                InvokeDelta::TextDelta { text } => Some(UnifiedEvent::text(text.unwrap_or_default())),
                InvokeDelta::InputJsonDelta {
                    partial_json: Some(partial_json),
                } => self.in_flight.fragment(
                    partial_json,
                    index,
                    Guard::IdAndName,
                    self.config.track_block_index,
                ),
                InvokeDelta::InputJsonDelta { partial_json: None } | InvokeDelta::Other => None,
            },

            InvokeStreamEvent::ContentBlockStop { index } => {
                self.in_flight.close(index, self.config.track_block_index);
                None
            }

            InvokeStreamEvent::MessageDelta { delta } => {
                if let Some(stop_reason) = delta.and_then(|d| d.stop_reason) {
                    tracing::debug!(stop_reason = %stop_reason, "invoke message stopping");
                }
                None
            }

            InvokeStreamEvent::MessageStart
            | InvokeStreamEvent::MessageStop
            | InvokeStreamEvent::Ping
            | InvokeStreamEvent::Unknown => None,
        }
    }
}

impl EventParser for InvokeParser {
    fn family(&self) -> ProviderFamily {
        ProviderFamily::InvokeStream
    }

    fn parse_event(&mut self, event: &Value) -> Option<UnifiedEvent> {
        match InvokeStreamEvent::deserialize(event) {
            Ok(event) => self.convert_event(event),
            Err(e) => {
                tracing::debug!(error = %e, "skipping unrecognized invoke stream event");
                None
            }
        }
    }
}
