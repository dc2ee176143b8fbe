use serde::Deserialize;

/// Options shared by both stream parsers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ParserConfig {
    /// Record the content block index of an open tool call and ignore stop or
    /// delta events that carry a different index
    #[serde(default = "default_track_block_index")]
    pub track_block_index: bool,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            track_block_index: default_track_block_index(),
        }
    }
}

const fn default_track_block_index() -> bool {
    true
}
