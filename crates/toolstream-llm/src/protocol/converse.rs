//! Bedrock Converse API wire format types

use serde::{Deserialize, Serialize};
use serde_json::Value;

// -- Tool configuration --

/// `toolConfig` member of a Converse request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConverseToolConfig {
    /// Declared tools, in caller order
    pub tools: Vec<ConverseTool>,
    /// When the model may call a tool
    pub tool_choice: ConverseToolChoice,
}

/// A single Converse tool entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConverseTool {
    /// Tool specification
    pub tool_spec: ToolSpecification,
}

/// Converse tool specification
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolSpecification {
    /// Tool name
    pub name: String,
    /// Human-readable description
    #[serde(default)]
    pub description: String,
    /// Input schema wrapper
    pub input_schema: ToolInputSchema,
}

/// Converse wraps the JSON Schema in a `json` member
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolInputSchema {
    /// JSON Schema for the tool input
    pub json: Value,
}

/// Converse tool choice
///
/// Only automatic selection is supported.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ConverseToolChoice {
    /// Model decides whether to call a tool
    Auto(AutoToolChoice),
}

/// Empty body of `{"auto": {}}`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AutoToolChoice {}

// -- Streaming types --

/// One Converse stream chunk
///
/// Each chunk carries exactly one of the members below. Members this crate
/// does not model are ignored during deserialization.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConverseStreamChunk {
    /// The assistant message started
    #[serde(default)]
    pub message_start: Option<MessageStartEvent>,
    /// A content block started
    #[serde(default)]
    pub content_block_start: Option<ContentBlockStartEvent>,
    /// Incremental content within a block
    #[serde(default)]
    pub content_block_delta: Option<ContentBlockDeltaEvent>,
    /// A content block finished
    #[serde(default)]
    pub content_block_stop: Option<ContentBlockStopEvent>,
    /// The message finished
    #[serde(default)]
    pub message_stop: Option<MessageStopEvent>,
    /// Trailing usage information
    #[serde(default)]
    pub metadata: Option<MetadataEvent>,
}

/// Payload of `messageStart`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MessageStartEvent {
    #[serde(default)]
    pub role: Option<String>,
}

/// Payload of `metadata`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MetadataEvent {
    #[serde(default)]
    pub usage: Option<TokenUsage>,
}

/// Token counts reported at the end of a Converse stream
#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenUsage {
    #[serde(default)]
    pub input_tokens: u64,
    #[serde(default)]
    pub output_tokens: u64,
}

/// Payload of `contentBlockStart`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentBlockStartEvent {
    /// Start information; only tool use blocks announce themselves
    #[serde(default)]
    pub start: Option<ContentBlockStart>,
    /// Index of the block within the message
    #[serde(default, deserialize_with = "super::lenient_index")]
    pub content_block_index: Option<u32>,
}

/// Start information for a content block
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentBlockStart {
    /// Tool the model is requesting to use
    #[serde(default)]
    pub tool_use: Option<ToolUseBlockStart>,
}

/// Tool use announced by `contentBlockStart`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolUseBlockStart {
    /// Identifier of the tool request
    #[serde(default)]
    pub tool_use_id: String,
    /// Name of the requested tool
    #[serde(default)]
    pub name: String,
}

/// Payload of `contentBlockDelta`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentBlockDeltaEvent {
    /// Delta content
    #[serde(default)]
    pub delta: Option<ContentBlockDelta>,
    /// Index of the block within the message
    #[serde(default, deserialize_with = "super::lenient_index")]
    pub content_block_index: Option<u32>,
}

/// Delta content for a block
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentBlockDelta {
    /// Text fragment
    #[serde(default)]
    pub text: Option<String>,
    /// Tool input fragment
    #[serde(default)]
    pub tool_use: Option<ToolUseBlockDelta>,
}

/// Tool input fragment
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ToolUseBlockDelta {
    /// Slice of the tool input JSON
    #[serde(default)]
    pub input: Option<String>,
}

/// Payload of `contentBlockStop`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentBlockStopEvent {
    /// Index of the block within the message
    #[serde(default, deserialize_with = "super::lenient_index")]
    pub content_block_index: Option<u32>,
}

/// Payload of `messageStop`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageStopEvent {
    /// Why the model stopped (`end_turn`, `tool_use`, `max_tokens`, ...)
    #[serde(default)]
    pub stop_reason: Option<String>,
}
