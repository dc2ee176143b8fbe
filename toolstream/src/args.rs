use std::path::PathBuf;

use clap::{Args as ClapArgs, Parser, Subcommand};
use toolstream_config::ProviderFamily;
use toolstream_llm::Framing;

/// Toolstream command line
#[derive(Debug, Parser)]
#[command(
    name = "toolstream",
    about = "Translate Bedrock and Anthropic tool-call streams into unified events"
)]
pub struct Args {
    /// Path to configuration file
    #[arg(short, long, default_value = "toolstream.toml", env = "TOOLSTREAM_CONFIG", global = true)]
    pub config: PathBuf,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Replay a captured response stream and print unified events as JSON lines
    Replay(ReplayArgs),
    /// Build the provider tool configuration for a file of tool definitions
    Tools(ToolsArgs),
}

/// How the provider family is chosen
#[derive(Debug, Clone, ClapArgs)]
pub struct FamilyArgs {
    /// Provider family, overriding model-based selection
    #[arg(long)]
    pub family: Option<ProviderFamily>,

    /// Model identifier, resolved against the configured family patterns
    #[arg(long, conflicts_with = "family")]
    pub model: Option<String>,
}

#[derive(Debug, Clone, ClapArgs)]
pub struct ReplayArgs {
    /// Captured raw response body
    pub file: PathBuf,

    #[command(flatten)]
    pub family: FamilyArgs,

    /// Framing of the captured body
    #[arg(long, default_value_t = Framing::Sse)]
    pub framing: Framing,

    /// Print the rebuilt text and tool calls instead of individual events
    #[arg(long)]
    pub accumulate: bool,
}

#[derive(Debug, Clone, ClapArgs)]
pub struct ToolsArgs {
    /// JSON array of tool definitions in any supported dialect
    pub file: PathBuf,

    #[command(flatten)]
    pub family: FamilyArgs,
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn command_is_well_formed() {
        Args::command().debug_assert();
    }

    #[test]
    fn replay_parses_family_and_framing() {
        let args = Args::try_parse_from([
            "toolstream",
            "replay",
            "body.bin",
            "--family",
            "converse_stream",
            "--framing",
            "ndjson",
        ])
        .unwrap();

        let Command::Replay(replay) = args.command else {
            panic!("expected replay");
        };
        assert_eq!(replay.family.family, Some(ProviderFamily::ConverseStream));
        assert_eq!(replay.framing, Framing::Ndjson);
        assert!(!replay.accumulate);
    }

    #[test]
    fn family_and_model_conflict() {
        let result = Args::try_parse_from([
            "toolstream",
            "tools",
            "tools.json",
            "--family",
            "invoke_stream",
            "--model",
            "anthropic.claude-v2",
        ]);
        assert!(result.is_err());
    }
}
