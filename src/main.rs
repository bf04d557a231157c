// ABOUTME: Entry point for the chat binary — a resumable command-line chat with a completion API.
// ABOUTME: Parses CLI args, loads .env and config, sets up diagnostics, and launches the app.

use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use statefulchat::agent;
use statefulchat::app::App;
use statefulchat::config::Config;
use statefulchat::console::TerminalConsole;

/// Chat with a language model; every exchange is saved and can be resumed later.
#[derive(Parser, Debug)]
#[command(name = "chat", version)]
struct Cli {
    /// Model to request completions from (overrides config).
    #[arg(long)]
    model: Option<String>,

    /// Directory holding session logs and JSON records (overrides config).
    #[arg(long)]
    logs_dir: Option<PathBuf>,

    /// Alternate config file.
    #[arg(long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let mut config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    if let Some(model) = cli.model {
        config.llm.model = model;
    }
    if let Some(logs_dir) = cli.logs_dir {
        config.session.logs_dir = logs_dir;
    }

    let client = agent::create_client(&config.llm)?;
    let console = TerminalConsole::new()?;
    let mut app = App::new(console, client, config.llm.model.clone(), &config.session);
    app.run().await?;
    Ok(())
}
