//! Rebuilding complete tool calls from unified event fragments

use std::collections::HashMap;

use serde::Serialize;

use crate::types::{ToolCall, ToolCallFragment, UnifiedEvent};

/// Final result of accumulating a unified event sequence
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Accumulated {
    /// All text fragments concatenated
    pub text: String,
    /// Tool calls in the order they were first seen
    pub tool_calls: Vec<ToolCall>,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
enum CallKey {
    Id(String),
    Name(String),
}

impl CallKey {
    fn of(fragment: &ToolCallFragment) -> Self {
        if fragment.id.is_empty() {
            Self::Name(fragment.name.clone())
        } else {
            Self::Id(fragment.id.clone())
        }
    }
}

/// Concatenates text and groups tool call fragments by call
///
/// Fragments are grouped by tool call id; fragments with an empty id fall
/// back to grouping by tool name.
#[derive(Debug, Clone, Default)]
pub struct ToolCallAccumulator {
    text: String,
    calls: Vec<ToolCall>,
    index: HashMap<CallKey, usize>,
}

impl ToolCallAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one unified event into the running result
    pub fn push(&mut self, event: UnifiedEvent) {
        match event {
            UnifiedEvent::Text { text } => self.text.push_str(&text),
            UnifiedEvent::ToolCall(fragment) => self.push_fragment(fragment),
        }
    }

    fn push_fragment(&mut self, fragment: ToolCallFragment) {
        let key = CallKey::of(&fragment);
        if let Some(&slot) = self.index.get(&key) {
            self.calls[slot].arguments.push_str(&fragment.arguments_fragment);
            return;
        }

        tracing::trace!(id = %fragment.id, name = %fragment.name, "new tool call");
        self.index.insert(key, self.calls.len());
        self.calls.push(ToolCall {
            id: fragment.id,
            name: fragment.name,
            arguments: fragment.arguments_fragment,
        });
    }

    /// Text accumulated so far
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Tool calls accumulated so far
    pub fn tool_calls(&self) -> &[ToolCall] {
        &self.calls
    }

    pub fn finish(self) -> Accumulated {
        Accumulated {
            text: self.text,
            tool_calls: self.calls,
        }
    }
}

impl Extend<UnifiedEvent> for ToolCallAccumulator {
    fn extend<T: IntoIterator<Item = UnifiedEvent>>(&mut self, iter: T) {
        for event in iter {
            self.push(event);
        }
    }
}

impl FromIterator<UnifiedEvent> for ToolCallAccumulator {
    fn from_iter<T: IntoIterator<Item = UnifiedEvent>>(iter: T) -> Self {
        let mut acc = Self::new();
        acc.extend(iter);
        acc
    }
}
