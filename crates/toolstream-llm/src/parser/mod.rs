//! Stream parsers translating vendor events into unified events
//!
//! Each grammar has its own stateful parser. Both implement [`EventParser`]
//! and produce the same [`UnifiedEvent`] type, so consumers never branch on
//! the provider family.

pub mod converse;
pub mod invoke;
mod state;

use serde_json::Value;
use toolstream_config::{ParserConfig, ProviderFamily};

pub use converse::ConverseParser;
pub use invoke::InvokeParser;

use crate::types::UnifiedEvent;

/// Capability shared by the per-grammar stream parsers
///
/// A parser advances one step per inbound event and yields at most one
/// unified event for it. Events it cannot interpret are dropped.
pub trait EventParser: Send {
    /// Grammar this parser understands
    fn family(&self) -> ProviderFamily;

    /// Consume one decoded provider event
    fn parse_event(&mut self, event: &Value) -> Option<UnifiedEvent>;
}

impl<P: EventParser + ?Sized> EventParser for Box<P> {
    fn family(&self) -> ProviderFamily {
        (**self).family()
    }

    fn parse_event(&mut self, event: &Value) -> Option<UnifiedEvent> {
        (**self).parse_event(event)
    }
}

/// Create the parser for a provider family
pub fn new_parser(family: ProviderFamily, config: ParserConfig) -> Box<dyn EventParser> {
    match family {
        ProviderFamily::ConverseStream => Box::new(ConverseParser::new(config)),
        ProviderFamily::InvokeStream => Box::new(InvokeParser::new(config)),
    }
}
