//! Conversion between unified tool definitions and the `OpenAI` function dialect

use crate::protocol::openai::{FunctionDefinition, OpenAiTool};
use crate::types::ToolDefinition;
use crate::types::tool::empty_object_schema;

impl From<&ToolDefinition> for OpenAiTool {
    fn from(def: &ToolDefinition) -> Self {
        Self {
            tool_type: "function".to_owned(),
            function: FunctionDefinition {
                name: def.name.clone(),
                description: Some(def.description.clone()).filter(|d| !d.is_empty()),
                parameters: Some(def.parameters.clone()),
            },
        }
    }
}

impl From<OpenAiTool> for ToolDefinition {
    fn from(tool: OpenAiTool) -> Self {
        let function = tool.function;
        Self {
            name: function.name,
            description: function.description.unwrap_or_default(),
            parameters: function.parameters.unwrap_or_else(empty_object_schema),
        }
    }
}
