//! Schema normalization between unified tool definitions and provider formats
//!
//! Builds each provider family's tool configuration and converts tool
//! definitions between the native `input_schema` dialect and the `OpenAI`
//! `function.parameters` dialect. Unrecognized shapes always pass through
//! untouched so that already-correct or newer formats are never rejected.

pub mod converse;
pub mod invoke;
pub mod openai;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use toolstream_config::ProviderFamily;

use crate::protocol::converse::{ConverseTool, ConverseToolConfig};
use crate::protocol::invoke::InvokeTool;
use crate::protocol::openai::OpenAiTool;
use crate::types::ToolDefinition;

/// Tool configuration in a provider family's request format
///
/// Serializes verbatim into the outbound request body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ProviderToolConfig {
    /// `toolConfig` for the Converse stream
    Converse(ConverseToolConfig),
    /// `tools` array for the Invoke stream
    Invoke(Vec<InvokeTool>),
}

impl ProviderToolConfig {
    /// Provider family this configuration targets
    pub const fn family(&self) -> ProviderFamily {
        match self {
            Self::Converse(_) => ProviderFamily::ConverseStream,
            Self::Invoke(_) => ProviderFamily::InvokeStream,
        }
    }

    /// Recover the unified definitions, in declaration order
    pub fn tool_definitions(&self) -> Vec<ToolDefinition> {
        match self {
            Self::Converse(config) => config.tools.iter().cloned().map(ToolDefinition::from).collect(),
            Self::Invoke(tools) => tools.iter().cloned().map(ToolDefinition::from).collect(),
        }
    }
}

/// Build the tool configuration for a provider family
///
/// Returns `None` for an absent or empty list: callers must then omit the
/// tools field entirely, since some providers reject an empty tools array.
/// Tool choice is always automatic.
pub fn build_provider_tool_config(
    defs: Option<&[ToolDefinition]>,
    family: ProviderFamily,
) -> Option<ProviderToolConfig> {
    let defs = defs.filter(|defs| !defs.is_empty())?;

    tracing::debug!(%family, tools = defs.len(), "building provider tool configuration");

    Some(match family {
        ProviderFamily::ConverseStream => ProviderToolConfig::Converse(ConverseToolConfig::auto(defs)),
        ProviderFamily::InvokeStream => ProviderToolConfig::Invoke(defs.iter().map(InvokeTool::from).collect()),
    })
}

/// Rewrite an `OpenAI`-style tool definition into the native dialect
///
/// A record that already has `input_schema` is returned unchanged. A record
/// with a nested `function` object becomes `{ name, description,
/// input_schema }`. Anything else is returned unchanged.
pub fn normalize_tool_definition(raw: Value) -> Value {
    if raw.get("input_schema").is_some() {
        return raw;
    }

    let Some(function) = raw.get("function").and_then(Value::as_object) else {
        return raw;
    };

    let mut native = Map::new();
    for (from, to) in [
        ("name", "name"),
        ("description", "description"),
        ("parameters", "input_schema"),
    ] {
        if let Some(value) = function.get(from) {
            native.insert(to.to_owned(), value.clone());
        }
    }

    Value::Object(native)
}

/// Convert a tool definition of any dialect into the shape a family expects
///
/// Unrecognized shapes pass through unchanged.
pub fn normalize_for_family(raw: Value, family: ProviderFamily) -> Value {
    match family {
        ProviderFamily::InvokeStream => normalize_tool_definition(raw),
        ProviderFamily::ConverseStream => {
            if raw.get("toolSpec").is_some() {
                return raw;
            }
            match ToolDefinition::from_value(&raw) {
                Some(def) => serde_json::to_value(ConverseTool::from(&def)).unwrap_or(raw),
                None => raw,
            }
        }
    }
}

impl ToolDefinition {
    /// Read a tool definition in any supported dialect
    ///
    /// Accepts native (`input_schema`), `OpenAI` (`function.parameters`),
    /// Converse (`toolSpec`) and unified (`name` / `parameters`) records. Returns
    /// `None` for anything else.
    pub fn from_value(raw: &Value) -> Option<Self> {
        let object = raw.as_object()?;

        if object.contains_key("input_schema") {
            return InvokeTool::deserialize(raw).ok().map(Self::from);
        }
        if object.get("function").is_some_and(Value::is_object) {
            return OpenAiTool::deserialize(raw).ok().map(Self::from);
        }
        if object.contains_key("toolSpec") {
            return ConverseTool::deserialize(raw).ok().map(Self::from);
        }
        if object.contains_key("name") {
            return Self::deserialize(raw).ok();
        }

        None
    }
}
