mod cli;
mod commands;
mod terminal;

use anyhow::{Context, Result};
use clap::Parser;
use std::sync::Arc;
use tokio::sync::Mutex;

use storefront_assistant::{AssistantController, HttpAssistant};
use storefront_core::config::{load_dotenv, Config};
use storefront_editor::EditorSession;
use storefront_storage::Reconciler;

use crate::cli::CliArgs;
use crate::terminal::Terminal;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_target(false)
        .init();

    load_dotenv();
    let args = CliArgs::parse();
    let terminal = Terminal::new();

    let mut config = Config::from_env();
    if let Some(dir) = args.data_dir {
        config.storage.data_dir = dir;
    }
    if let Some(mode) = args.mode {
        config.editor.layout_mode = mode;
    }
    if let Some(url) = args.assistant_url {
        config.assistant.base_url = url;
    }
    config.log_summary();

    let reconciler = Reconciler::local(&config.storage.data_dir).with_context(|| {
        format!(
            "failed to open data directory {}",
            config.storage.data_dir.display()
        )
    })?;
    let session = Mutex::new(EditorSession::open(reconciler, config.editor.layout_mode));

    let assistant =
        HttpAssistant::new(&config.assistant).context("failed to create assistant client")?;
    let controller = AssistantController::new(Arc::new(assistant));

    if let Err(e) = commands::execute(args.command, &session, &controller, &terminal).await {
        terminal.print_error(&format!("{:#}", e))?;
        std::process::exit(1);
    }
    Ok(())
}
