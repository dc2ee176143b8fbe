#![allow(clippy::must_use_candidate)]

mod env;
pub mod family;
mod loader;
pub mod parser;
pub mod telemetry;

use serde::Deserialize;

pub use family::*;
pub use parser::*;
pub use telemetry::*;

/// Top-level toolstream configuration
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Stream parser behaviour
    #[serde(default)]
    pub parser: ParserConfig,
    /// Provider family selection by model identifier
    #[serde(default)]
    pub families: FamilyConfig,
    /// Logging configuration
    #[serde(default)]
    pub telemetry: Option<TelemetryConfig>,
}
