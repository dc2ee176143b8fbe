//! Internal canonical types shared by both stream grammars
//!
//! These types are provider-agnostic. Wire formats convert to and from them
//! in the `convert` and `parser` modules.

pub mod event;
pub mod tool;

pub use event::{ToolCallFragment, UnifiedEvent};
pub use tool::{ToolCall, ToolDefinition};
