//! Tool-call stream translation for Bedrock Converse and Anthropic Messages streams
//!
//! Both vendor grammars are parsed into one protocol-agnostic sequence of
//! [`UnifiedEvent`]s. The crate also builds each provider's tool
//! configuration from a unified tool definition list and converts tool
//! definitions between the native `input_schema` dialect and the `OpenAI`
//! `function.parameters` dialect.

#![allow(clippy::must_use_candidate, clippy::missing_errors_doc)]

pub mod accumulate;
pub mod convert;
pub mod decode;
pub mod error;
pub mod parser;
pub mod protocol;
pub mod stream;
pub mod types;

pub use accumulate::{Accumulated, ToolCallAccumulator};
pub use convert::{ProviderToolConfig, build_provider_tool_config, normalize_for_family, normalize_tool_definition};
pub use decode::Framing;
pub use error::StreamError;
pub use parser::{ConverseParser, EventParser, InvokeParser, new_parser};
pub use stream::{EventStream, UnifiedEvents, UnifiedEventsExt, event_pipeline, unified_stream};
pub use toolstream_config::{ParserConfig, ProviderFamily};
pub use types::{ToolCall, ToolCallFragment, ToolDefinition, UnifiedEvent};
