use regex::Regex;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Streaming grammar spoken by a model deployment
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ProviderFamily {
    /// Bedrock Converse stream (`contentBlockStart` / `contentBlockDelta` / `contentBlockStop`)
    #[default]
    ConverseStream,
    /// Anthropic Messages stream (`type` discriminated events)
    InvokeStream,
}

/// Mapping from model identifiers to provider families
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FamilyConfig {
    /// Family used when no pattern matches
    #[serde(default)]
    pub default: ProviderFamily,
    /// Model patterns (regex) served by the Converse stream
    #[serde(default)]
    pub converse_stream: Vec<String>,
    /// Model patterns (regex) served by the Invoke stream
    #[serde(default)]
    pub invoke_stream: Vec<String>,
}

impl FamilyConfig {
    /// Compile the configured patterns into a selector
    ///
    /// # Errors
    ///
    /// Returns the first pattern that fails to compile
    pub fn selector(&self) -> Result<FamilySelector, regex::Error> {
        let converse = self
            .converse_stream
            .iter()
            .map(|p| Regex::new(p).map(|re| (re, ProviderFamily::ConverseStream)));
        let invoke = self
            .invoke_stream
            .iter()
            .map(|p| Regex::new(p).map(|re| (re, ProviderFamily::InvokeStream)));

        Ok(FamilySelector {
            rules: converse.chain(invoke).collect::<Result<_, _>>()?,
            default: self.default,
        })
    }
}

/// Compiled model-to-family rules
///
/// Converse patterns are checked before Invoke patterns.
#[derive(Debug, Clone)]
pub struct FamilySelector {
    rules: Vec<(Regex, ProviderFamily)>,
    default: ProviderFamily,
}

impl FamilySelector {
    /// Resolve the family for a model identifier
    pub fn resolve(&self, model: &str) -> ProviderFamily {
        let family = self
            .rules
            .iter()
            .find(|(re, _)| re.is_match(model))
            .map_or(self.default, |(_, family)| *family);

        tracing::debug!(model, %family, "resolved provider family");
        family
    }
}
