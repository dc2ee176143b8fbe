//! Conversion between unified tool definitions and the native `input_schema` dialect

use crate::protocol::invoke::InvokeTool;
use crate::types::ToolDefinition;

impl From<&ToolDefinition> for InvokeTool {
    fn from(def: &ToolDefinition) -> Self {
        Self {
            name: def.name.clone(),
            description: def.description.clone(),
            input_schema: def.parameters.clone(),
        }
    }
}

impl From<InvokeTool> for ToolDefinition {
    fn from(tool: InvokeTool) -> Self {
        Self {
            name: tool.name,
            description: tool.description,
            parameters: tool.input_schema,
        }
    }
}
