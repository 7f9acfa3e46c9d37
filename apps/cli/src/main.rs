use std::{io::Write, path::PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use client_core::{BridgeSession, HttpTransport};
use tracing::info;
use tracing_subscriber::EnvFilter;

mod config;
mod render;
mod repl;

use config::{load_settings, Settings};

#[derive(Parser, Debug)]
#[command(name = "intent-bridge", about = "Talk to the IntentBridge planner from a terminal")]
struct Args {
    #[arg(long, default_value = "bridge.toml")]
    config: PathBuf,
    #[arg(long)]
    api_base: Option<String>,
    #[arg(long)]
    timeout_secs: Option<u64>,
    /// Send these messages in order and exit instead of starting a prompt.
    #[arg(long = "message", short = 'm')]
    messages: Vec<String>,
}

impl Args {
    fn apply(&self, settings: &mut Settings) {
        if let Some(v) = &self.api_base {
            settings.api_base = v.clone();
        }
        if let Some(v) = self.timeout_secs.filter(|secs| *secs > 0) {
            settings.request_timeout_secs = v;
        }
    }
}

fn init_tracing(default_filter: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let mut settings = load_settings(&args.config);
    args.apply(&mut settings);
    init_tracing(&settings.log_filter);

    let transport = HttpTransport::new(&settings.api_base, settings.request_timeout())
        .with_context(|| format!("failed to configure transport for '{}'", settings.api_base))?;
    info!(url = %transport.process_url(), "planning backend configured");
    let mut session = BridgeSession::new(transport);

    if args.messages.is_empty() {
        return repl::run(&mut session).await;
    }

    let mut stdout = std::io::stdout();
    for message in args.messages {
        writeln!(stdout, "YOU {message}")?;
        repl::run_turn(&mut session, message, &mut stdout).await?;
    }
    Ok(())
}
