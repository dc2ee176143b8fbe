#![allow(clippy::must_use_candidate, clippy::missing_errors_doc)]

mod args;

use anyhow::Context;
use args::{Args, Command, FamilyArgs, ReplayArgs, ToolsArgs};
use clap::Parser;
use futures_util::StreamExt;
use serde_json::Value;
use tokio_util::io::ReaderStream;
use toolstream_config::{Config, ProviderFamily};
use toolstream_llm::{ToolCallAccumulator, ToolDefinition, build_provider_tool_config, event_pipeline};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Load configuration, falling back to defaults when the file is absent
    let config = Config::load_or_default(&args.config)?;

    // Initialize telemetry
    toolstream_telemetry::init(config.telemetry.as_ref(), "warn")?;

    tracing::debug!(config_path = %args.config.display(), "starting toolstream");

    match args.command {
        Command::Replay(replay) => run_replay(&config, &replay).await,
        Command::Tools(tools) => run_tools(&config, &tools).await,
    }
}

/// Pick the provider family from explicit flags or configuration
fn resolve_family(config: &Config, args: &FamilyArgs) -> anyhow::Result<ProviderFamily> {
    if let Some(family) = args.family {
        return Ok(family);
    }

    let Some(model) = args.model.as_deref() else {
        return Ok(config.families.default);
    };

    let selector = config
        .families
        .selector()
        .context("invalid family pattern in configuration")?;
    Ok(selector.resolve(model))
}

async fn run_replay(config: &Config, args: &ReplayArgs) -> anyhow::Result<()> {
    let family = resolve_family(config, &args.family)?;
    let file = tokio::fs::File::open(&args.file)
        .await
        .with_context(|| format!("failed to open {}", args.file.display()))?;

    tracing::info!(file = %args.file.display(), %family, framing = %args.framing, "replaying stream");

    let mut events = event_pipeline(ReaderStream::new(file), family, args.framing, config.parser);
    let mut accumulator = ToolCallAccumulator::new();

    while let Some(event) = events.next().await {
        let event = event.context("stream failed")?;
        if !args.accumulate {
            println!("{}", serde_json::to_string(&event)?);
        }
        accumulator.push(event);
    }

    let result = accumulator.finish();
    if args.accumulate {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        for call in &result.tool_calls {
            tracing::info!(id = %call.id, name = %call.name, arguments = %call.arguments, "tool call");
        }
    }

    Ok(())
}

async fn run_tools(config: &Config, args: &ToolsArgs) -> anyhow::Result<()> {
    let family = resolve_family(config, &args.family)?;
    let raw = tokio::fs::read_to_string(&args.file)
        .await
        .with_context(|| format!("failed to read {}", args.file.display()))?;

    let value: Value = serde_json::from_str(&raw).context("tool file is not valid JSON")?;
    let records = match value {
        Value::Array(records) => records,
        other => vec![other],
    };

    let mut defs = Vec::with_capacity(records.len());
    for (position, record) in records.iter().enumerate() {
        match ToolDefinition::from_value(record) {
            Some(def) => defs.push(def),
            None => tracing::warn!(position, "skipping unrecognized tool definition"),
        }
    }

    match build_provider_tool_config(Some(&defs), family) {
        Some(tool_config) => println!("{}", serde_json::to_string_pretty(&tool_config)?),
        None => tracing::warn!(%family, "no tools defined, omit the tools field"),
    }

    Ok(())
}
