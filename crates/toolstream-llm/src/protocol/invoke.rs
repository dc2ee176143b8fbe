//! Anthropic Messages API wire format types used by the Invoke stream

use serde::{Deserialize, Serialize};
use serde_json::Value;

// -- Tool configuration --

/// Native tool definition (`input_schema` dialect)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvokeTool {
    /// Tool name
    pub name: String,
    /// Human-readable description
    #[serde(default)]
    pub description: String,
    /// JSON Schema for the tool input
    pub input_schema: Value,
}

// -- Streaming types --

/// Invoke stream event, discriminated by `type`
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum InvokeStreamEvent {
    /// Stream started
    MessageStart,
    /// New content block started
    ContentBlockStart {
        /// Block index
        #[serde(default, deserialize_with = "super::lenient_index")]
        index: Option<u32>,
        /// Initial block content
        content_block: InvokeContentBlock,
    },
    /// Incremental content within a block
    ContentBlockDelta {
        /// Block index
        #[serde(default, deserialize_with = "super::lenient_index")]
        index: Option<u32>,
        /// Delta content
        delta: InvokeDelta,
    },
    /// Content block finished
    ContentBlockStop {
        /// Block index
        #[serde(default, deserialize_with = "super::lenient_index")]
        index: Option<u32>,
    },
    /// Message metadata delta (stop reason, usage)
    MessageDelta {
        /// Delta with stop reason
        #[serde(default)]
        delta: Option<InvokeMessageDelta>,
    },
    /// Stream completed
    MessageStop,
    /// Keep-alive
    Ping,
    /// Any event type this crate does not handle
    #[serde(other)]
    Unknown,
}

/// Content block in a `content_block_start` event
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum InvokeContentBlock {
    /// Text block
    Text {
        /// Initial text (usually empty)
        #[serde(default)]
        text: Option<String>,
    },
    /// Tool use block
    ToolUse {
        /// Tool use ID
        #[serde(default)]
        id: String,
        /// Tool name
        #[serde(default)]
        name: String,
    },
    /// Thinking, redacted or future block types
    #[serde(other)]
    Other,
}

/// Delta content in a `content_block_delta` event
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum InvokeDelta {
    /// Incremental text
    TextDelta {
        /// Text fragment
        #[serde(default)]
        text: Option<String>,
    },
    /// Incremental tool input JSON
    InputJsonDelta {
        /// JSON fragment
        #[serde(default)]
        partial_json: Option<String>,
    },
    /// Thinking, signature or future delta types
    #[serde(other)]
    Other,
}

/// Delta in a `message_delta` event
#[derive(Debug, Clone, Default, Deserialize)]
pub struct InvokeMessageDelta {
    /// Stop reason
    #[serde(default)]
    pub stop_reason: Option<String>,
}
