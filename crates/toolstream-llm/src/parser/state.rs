use crate::types::UnifiedEvent;

/// Which fields must be set before a fragment may be emitted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Guard {
    /// A non-empty id is enough
    Id,
    /// Both id and name must be non-empty
    IdAndName,
}

/// The single tool call a parser is currently streaming
///
/// At most one call is open at a time. A stop returns the record to `Idle`
/// and the next start reuses it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) enum InFlightToolCall {
    #[default]
    Idle,
    Open {
        id: String,
        name: String,
        /// Content block index, when the provider sent one
        index: Option<u32>,
        /// Fragments forwarded so far
        fragments: usize,
    },
}

impl InFlightToolCall {
    /// Start tracking a tool call, replacing any call left open
    pub(crate) fn open(&mut self, id: String, name: String, index: Option<u32>) {
        if let Self::Open { id: previous, .. } = self {
            tracing::debug!(previous = %previous, next = %id, "tool call started before previous block stopped");
        }

        tracing::trace!(id = %id, name = %name, ?index, "tool call opened");
        *self = Self::Open {
            id,
            name,
            index,
            fragments: 0,
        };
    }

    /// Forward an argument fragment for the open call
    ///
    /// Returns `None`, dropping the fragment, when no call is open, the guard
    /// is not satisfied, or the fragment belongs to another block.
    pub(crate) fn fragment(
        &mut self,
        fragment: String,
        index: Option<u32>,
        guard: Guard,
        track_index: bool,
    ) -> Option<UnifiedEvent> {
        let Self::Open {
            id,
            name,
            index: open_index,
            fragments,
        } = self
        else {
            tracing::debug!("dropping tool input fragment without an open tool call");
            return None;
        };

        let ready = match guard {
            Guard::Id => !id.is_empty(),
            Guard::IdAndName => !id.is_empty() && !name.is_empty(),
        };
        if !ready {
            tracing::debug!(id = %id, name = %name, "dropping tool input fragment for incomplete tool call");
            return None;
        }

        if !same_block(*open_index, index, track_index) {
            tracing::debug!(id = %id, open = ?open_index, received = ?index, "dropping tool input fragment for another block");
            return None;
        }

        *fragments += 1;
        Some(UnifiedEvent::tool_call(id.clone(), name.clone(), fragment))
    }

    /// Close the open call if the stop belongs to its block
    pub(crate) fn close(&mut self, index: Option<u32>, track_index: bool) {
        let Self::Open {
            id,
            index: open_index,
            fragments,
            ..
        } = self
        else {
            return;
        };

        if !same_block(*open_index, index, track_index) {
            tracing::trace!(id = %id, open = ?open_index, received = ?index, "block stop for another block");
            return;
        }

        tracing::trace!(id = %id, fragments = *fragments, "tool call closed");
        *self = Self::Idle;
    }
}

/// Whether an event index refers to the open block
///
/// A missing index on either side always matches.
const fn same_block(open: Option<u32>, received: Option<u32>, track_index: bool) -> bool {
    match (open, received) {
        (Some(open), Some(received)) if track_index => open == received,
        _ => true,
    }
}
