//! Converse stream parser
//!
//! | Event | Effect |
//! |---|---|
//! | `contentBlockStart` with `start.toolUse` | open a tool call |
//! | `contentBlockDelta` with `delta.toolUse.input` | emit a tool call fragment |
//! | `contentBlockDelta` with `delta.text` | emit text |
//! | `contentBlockStop` | close the open tool call |
//! | anything else | ignored |

use serde::Deserialize;
use serde_json::Value;
use toolstream_config::{ParserConfig, ProviderFamily};

use super::EventParser;
use super::state::{Guard, InFlightToolCall};
use crate::protocol::converse::{ContentBlockDelta, ContentBlockDeltaEvent, ConverseStreamChunk, ToolUseBlockDelta};
use crate::types::UnifiedEvent;

/// Parser for the Bedrock Converse stream grammar
#[derive(Debug, Default)]
pub struct ConverseParser {
    in_flight: InFlightToolCall,
    config: ParserConfig,
}

impl ConverseParser {
    /// Create a parser with no open tool call
    pub fn new(config: ParserConfig) -> Self {
        Self {
            in_flight: InFlightToolCall::Idle,
            config,
        }
    }

    /// Apply one typed chunk to the parser state
    pub fn convert_chunk(&mut self, chunk: ConverseStreamChunk) -> Option<UnifiedEvent> {
        if let Some(start) = chunk.content_block_start {
            if let Some(tool) = start.start.and_then(|s| s.tool_use) {
                self.in_flight
                    .open(tool.tool_use_id, tool.name, start.content_block_index);
            }
            return None;
        }

        if let Some(delta) = chunk.content_block_delta {
            return self.convert_delta(delta);
        }

        if let Some(stop) = chunk.content_block_stop {
            self.in_flight
                .close(stop.content_block_index, self.config.track_block_index);
            return None;
        }

        if let Some(stop) = chunk.message_stop {
            tracing::debug!(stop_reason = ?stop.stop_reason, "converse message stopped");
        }

        if let Some(usage) = chunk.metadata.and_then(|m| m.usage) {
            tracing::trace!(
                input_tokens = usage.input_tokens,
                output_tokens = usage.output_tokens,
                "converse usage reported"
            );
        }

        None
    }

    fn convert_delta(&mut self, event: ContentBlockDeltaEvent) -> Option<UnifiedEvent> {
        match event.delta? {
            ContentBlockDelta {
                tool_use: Some(ToolUseBlockDelta { input: Some(input) }),
                ..
            } => self.in_flight.fragment(
                input,
                event.content_block_index,
                Guard::Id,
                self.config.track_block_index,
            ),
            ContentBlockDelta { text: Some(text), .. } => Some(UnifiedEvent::text(text)),
            _ => None,
        }
    }
}

impl EventParser for ConverseParser {
    fn family(&self) -> ProviderFamily {
        ProviderFamily::ConverseStream
    }

    fn parse_event(&mut self, event: &Value) -> Option<UnifiedEvent> {
        match ConverseStreamChunk::deserialize(event) {
            Ok(chunk) => self.convert_chunk(chunk),
            Err(e) => {
                tracing::debug!(error = %e, "skipping unrecognized converse stream event");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn start(id: &str, name: &str) -> Value {
        json!({"contentBlockStart": {"start": {"toolUse": {"toolUseId": id, "name": name}}}})
    }

    fn tool_delta(input: &str) -> Value {
        json!({"contentBlockDelta": {"delta": {"toolUse": {"input": input}}}})
    }

    fn text_delta(text: &str) -> Value {
        json!({"contentBlockDelta": {"delta": {"text": text}}})
    }

    fn stop() -> Value {
        json!({"contentBlockStop": {}})
    }

    fn run(events: &[Value]) -> Vec<UnifiedEvent> {
        let mut parser = ConverseParser::new(ParserConfig::default());
        events.iter().filter_map(|e| parser.parse_event(e)).collect()
    }

    #[test]
    fn search_scenario() {
        let events = run(&[
            start("t1", "search"),
            tool_delta("{\"q\":"),
            tool_delta("\"cats\"}"),
            stop(),
        ]);

        assert_eq!(
            events,
            vec![
                UnifiedEvent::tool_call("t1", "search", "{\"q\":"),
                UnifiedEvent::tool_call("t1", "search", "\"cats\"}"),
            ]
        );

        let arguments: String = events
            .iter()
            .filter_map(UnifiedEvent::as_tool_call)
            .map(|f| f.arguments_fragment.as_str())
            .collect();
        assert_eq!(arguments, r#"{"q":"cats"}"#);
    }

    #[test]
    fn delta_before_start_is_dropped() {
        assert!(run(&[tool_delta("{}"), stop()]).is_empty());
    }

    #[test]
    fn stop_with_malformed_index_still_closes() {
        for index in [json!(-1), json!("0"), json!(5_000_000_000_u64)] {
            let events = run(&[
                json!({"contentBlockStart": {"start": {"toolUse": {"toolUseId": "A", "name": "foo"}}, "contentBlockIndex": 0}}),
                json!({"contentBlockStop": {"contentBlockIndex": index}}),
                tool_delta("leak"),
            ]);

            assert!(events.is_empty(), "call leaked past stop with index {index}");
        }
    }

    #[test]
    fn no_leakage_between_calls() {
        let events = run(&[
            start("A", "foo"),
            tool_delta("x"),
            stop(),
            tool_delta("orphan"),
            start("B", "bar"),
            tool_delta("z"),
            stop(),
        ]);

        assert_eq!(
            events,
            vec![
                UnifiedEvent::tool_call("A", "foo", "x"),
                UnifiedEvent::tool_call("B", "bar", "z"),
            ]
        );
    }

    #[test]
    fn text_interleaves_in_order() {
        let events = run(&[
            text_delta("Let me search. "),
            start("t1", "search"),
            tool_delta("{}"),
            text_delta("still here"),
            stop(),
            text_delta("done"),
        ]);

        assert_eq!(
            events,
            vec![
                UnifiedEvent::text("Let me search. "),
                UnifiedEvent::tool_call("t1", "search", "{}"),
                UnifiedEvent::text("still here"),
                UnifiedEvent::text("done"),
            ]
        );
    }

    #[test]
    fn unknown_events_are_ignored() {
        let events = run(&[
            json!({"messageStart": {"role": "assistant"}}),
            json!({"metadata": {"usage": {"inputTokens": 10, "outputTokens": 5}}}),
            json!({"contentBlockDelta": {"delta": {"reasoningContent": {"text": "hmm"}}}}),
            json!({"contentBlockStart": {"start": {}}}),
            json!({"messageStop": {"stopReason": "tool_use"}}),
            json!({"contentBlockDelta": "not an object"}),
            json!(42),
        ]);
        assert!(events.is_empty());
    }

    #[test]
    fn empty_tool_use_id_emits_nothing() {
        assert!(run(&[start("", "search"), tool_delta("{}")]).is_empty());
    }

    #[test]
    fn start_without_stop_is_replaced() {
        let events = run(&[start("A", "foo"), start("B", "bar"), tool_delta("{}")]);
        assert_eq!(events, vec![UnifiedEvent::tool_call("B", "bar", "{}")]);
    }

    #[test]
    fn indexed_stop_of_text_block_keeps_tool_open() {
        let events = run(&[
            json!({"contentBlockDelta": {"delta": {"text": "hi"}, "contentBlockIndex": 0}}),
            json!({"contentBlockStart": {"start": {"toolUse": {"toolUseId": "t1", "name": "search"}}, "contentBlockIndex": 1}}),
            json!({"contentBlockStop": {"contentBlockIndex": 0}}),
            json!({"contentBlockDelta": {"delta": {"toolUse": {"input": "{}"}}, "contentBlockIndex": 1}}),
            json!({"contentBlockDelta": {"delta": {"toolUse": {"input": "ignored"}}, "contentBlockIndex": 2}}),
            json!({"contentBlockStop": {"contentBlockIndex": 1}}),
        ]);

        assert_eq!(
            events,
            vec![
                UnifiedEvent::text("hi"),
                UnifiedEvent::tool_call("t1", "search", "{}"),
            ]
        );
    }

    #[test]
    fn index_tracking_can_be_disabled() {
        let mut parser = ConverseParser::new(ParserConfig {
            track_block_index: false,
        });

        parser.parse_event(&json!({"contentBlockStart": {"start": {"toolUse": {"toolUseId": "t1", "name": "search"}}, "contentBlockIndex": 1}}));
        parser.parse_event(&json!({"contentBlockStop": {"contentBlockIndex": 0}}));

        assert_eq!(parser.parse_event(&tool_delta("{}")), None);
    }
}
