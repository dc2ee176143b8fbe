use serde::{Deserialize, Serialize};

/// One normalized event produced by a stream parser
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum UnifiedEvent {
    /// Fragment of assistant-visible text
    Text {
        /// The text fragment
        text: String,
    },
    /// Fragment of a tool call's JSON argument string
    ToolCall(ToolCallFragment),
}

/// Partial tool call arguments
///
/// `arguments_fragment` is not valid JSON on its own. Fragments sharing an
/// `id` must be concatenated in arrival order to rebuild the argument
/// document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolCallFragment {
    /// Provider-assigned tool call identifier
    pub id: String,
    /// Name of the tool being called
    pub name: String,
    /// Newly arrived slice of the argument JSON
    pub arguments_fragment: String,
}

impl UnifiedEvent {
    /// Build a text event
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text { text: text.into() }
    }

    /// Build a tool call fragment event
    pub fn tool_call(id: impl Into<String>, name: impl Into<String>, arguments_fragment: impl Into<String>) -> Self {
        Self::ToolCall(ToolCallFragment {
            id: id.into(),
            name: name.into(),
            arguments_fragment: arguments_fragment.into(),
        })
    }

    /// Text content, if this is a text event
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text { text } => Some(text),
            Self::ToolCall(_) => None,
        }
    }

    /// Tool call fragment, if this is a tool call event
    pub const fn as_tool_call(&self) -> Option<&ToolCallFragment> {
        match self {
            Self::ToolCall(fragment) => Some(fragment),
            Self::Text { .. } => None,
        }
    }
}
