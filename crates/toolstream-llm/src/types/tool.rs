use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Provider-agnostic definition of a tool the model may call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolDefinition {
    /// Tool name
    pub name: String,
    /// Human-readable description
    #[serde(default)]
    pub description: String,
    /// JSON Schema for the tool input
    #[serde(default = "empty_object_schema")]
    pub parameters: Value,
}

impl ToolDefinition {
    /// Create a definition from its parts
    pub fn new(name: impl Into<String>, description: impl Into<String>, parameters: Value) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            parameters,
        }
    }
}

/// Schema used when a definition carries none
pub(crate) fn empty_object_schema() -> Value {
    serde_json::json!({"type": "object"})
}

/// A complete tool call rebuilt from streamed fragments
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolCall {
    /// Provider-assigned tool call identifier
    pub id: String,
    /// Name of the tool being called
    pub name: String,
    /// Concatenated argument JSON, not validated
    pub arguments: String,
}

impl ToolCall {
    /// Parse the accumulated arguments as JSON
    ///
    /// An empty argument string is treated as an empty object, which is what
    /// providers stream for tools without input.
    pub fn parse_arguments(&self) -> Result<Value, serde_json::Error> {
        if self.arguments.trim().is_empty() {
            return Ok(Value::Object(serde_json::Map::new()));
        }
        serde_json::from_str(&self.arguments)
    }
}
