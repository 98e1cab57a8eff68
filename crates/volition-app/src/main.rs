//! Volition application binary - composition root.
//!
//! 1. Parse CLI arguments and load TOML configuration
//! 2. Initialize tracing
//! 3. Assemble the pipeline (extract -> classify -> reason -> suggest)
//! 4. Process the captured text and print the structured output
//! 5. Optionally execute the suggested actions

use std::io::Read;
use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use volition_app::{CliArgs, Pipeline};
use volition_core::{RawInput, Result, VolitionConfig, VolitionError};
use volition_exec::StaticPermissions;

#[tokio::main]
async fn main() -> Result<()> {
    let args = CliArgs::parse();
    let config = VolitionConfig::load_or_default(&args.resolve_config_path());

    let log_level = args
        .resolve_log_level()
        .unwrap_or_else(|| config.general.log_level.clone());
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(log_level)),
        )
        .init();

    let text = if args.text.is_empty() {
        let mut buffer = String::new();
        std::io::stdin().read_to_string(&mut buffer)?;
        buffer
    } else {
        args.text.join(" ")
    };
    let text = text.trim().to_string();
    if text.is_empty() {
        return Err(VolitionError::Config(
            "no input text given on the command line or stdin".to_string(),
        ));
    }

    // No learned model is bundled; classification runs on the keyword
    // fallback unless a primary backend is injected here.
    let pipeline = Arc::new(Pipeline::new(
        &config,
        None,
        Arc::new(StaticPermissions::allow_all()),
    ));

    let output = pipeline.process(RawInput::new(text, args.source)).await;
    println!("{}", serde_json::to_string_pretty(&output)?);

    if args.execute {
        let mut suggestions = output.suggestions.clone();
        let results = pipeline.execute_suggestions(&mut suggestions).await;
        println!("{}", serde_json::to_string_pretty(&results)?);
    }

    Ok(())
}
