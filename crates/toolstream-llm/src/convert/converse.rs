//! Conversion between unified tool definitions and the Converse tool format

use crate::protocol::converse::{
    AutoToolChoice, ConverseTool, ConverseToolChoice, ConverseToolConfig, ToolInputSchema, ToolSpecification,
};
use crate::types::ToolDefinition;

impl From<&ToolDefinition> for ConverseTool {
    fn from(def: &ToolDefinition) -> Self {
        Self {
            tool_spec: ToolSpecification {
                name: def.name.clone(),
                description: def.description.clone(),
                input_schema: ToolInputSchema {
                    json: def.parameters.clone(),
                },
            },
        }
    }
}

impl From<ConverseTool> for ToolDefinition {
    fn from(tool: ConverseTool) -> Self {
        let spec = tool.tool_spec;
        Self {
            name: spec.name,
            description: spec.description,
            parameters: spec.input_schema.json,
        }
    }
}

impl ConverseToolConfig {
    /// Build a configuration that lets the model choose tools freely
    pub fn auto(defs: &[ToolDefinition]) -> Self {
        Self {
            tools: defs.iter().map(ConverseTool::from).collect(),
            tool_choice: ConverseToolChoice::Auto(AutoToolChoice::default()),
        }
    }
}
