//! SEO Assistant - keyword insertion and text analysis over HTTP

use std::io::Read;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use tracing::{error, info};

use seo_assistant::{
    assistant::Assistant,
    cli::{Cli, Command, OutputFormat, TextInput},
    config::Config,
    server::Server,
    setup_tracing,
};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(e) = setup_tracing(&cli.log_level, cli.log_format.as_deref()) {
        eprintln!("Failed to setup tracing: {e}");
        return ExitCode::FAILURE;
    }

    let config = match load_config(&cli) {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {e:#}");
            return ExitCode::FAILURE;
        }
    };

    let result = match cli.command {
        Some(Command::Insert {
            keyword,
            input,
            mode,
            format,
        }) => run_insert(&config, &keyword, &input, mode.map(Into::into), format).await,
        Some(Command::Analyze { input, format }) => run_analyze(&config, &input, format).await,
        Some(Command::Serve) | None => run_server(config).await,
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e:#}");
            ExitCode::FAILURE
        }
    }
}

fn load_config(cli: &Cli) -> anyhow::Result<Config> {
    let mut config = Config::load(cli.config.as_deref())?;

    // CLI overrides
    if let Some(port) = cli.port {
        config.server.port = port;
    }
    if let Some(host) = &cli.host {
        config.server.host.clone_from(host);
    }
    Ok(config)
}

async fn run_server(config: Config) -> anyhow::Result<()> {
    info!(
        version = env!("CARGO_PKG_VERSION"),
        "Starting SEO assistant"
    );
    Server::new(config)?.run().await?;
    Ok(())
}

fn read_input(input: &TextInput) -> anyhow::Result<String> {
    if let Some(text) = &input.text {
        return Ok(text.clone());
    }
    if let Some(path) = &input.file {
        return std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()));
    }
    let mut text = String::new();
    std::io::stdin()
        .read_to_string(&mut text)
        .context("Failed to read stdin")?;
    Ok(text)
}

async fn run_insert(
    config: &Config,
    keyword: &str,
    input: &TextInput,
    mode: Option<seo_assistant::insertion::InsertionMode>,
    format: OutputFormat,
) -> anyhow::Result<()> {
    let text = read_input(input)?;
    let assistant = Assistant::from_config(config)?;
    let result = assistant.insert(&text, keyword, mode).await?;

    match format {
        OutputFormat::Text => println!("{}", result.updated_text),
        OutputFormat::Json => {
            let json = serde_json::json!({
                "updatedText": result.updated_text,
                "insertedAt": result.utf16_inserted_at(),
                "keywordLength": result.utf16_keyword_len(),
                "strategy": result.strategy,
            });
            println!("{}", serde_json::to_string_pretty(&json)?);
        }
    }
    Ok(())
}

async fn run_analyze(config: &Config, input: &TextInput, format: OutputFormat) -> anyhow::Result<()> {
    let text = read_input(input)?;
    let assistant = Assistant::from_config(config)?;
    let analysis = assistant.analyze(&text).await?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&analysis)?),
        OutputFormat::Text => {
            println!("Keywords:    {}", analysis.keywords.join(", "));
            println!("Readability: {}", analysis.readability);
            println!(
                "Sentiment:   {:?} ({:.3})",
                analysis.sentiment.tone, analysis.sentiment.score
            );
            println!("{}", analysis.suggestions);
            println!("{}", analysis.sentiment.suggestion);
        }
    }
    Ok(())
}
