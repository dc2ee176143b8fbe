//! Wire format types for the provider protocols
//!
//! Each module contains pure serde structs matching a provider's JSON
//! format. They are only used at the boundary and never leak into the
//! unified event stream.

pub mod converse;
pub mod invoke;
pub mod openai;

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Read a content block index, treating anything other than a `u32` as absent
///
/// A malformed index must not cause the whole event to be dropped, since a
/// dropped stop would leave the open tool call in place.
pub(crate) fn lenient_index<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    let index = value.as_u64().and_then(|n| u32::try_from(n).ok());
    if index.is_none() && !value.is_null() {
        tracing::debug!(index = %value, "ignoring malformed content block index");
    }
    Ok(index)
}
