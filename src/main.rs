// src/main.rs — fichar entry point

use clap::Parser;
use std::path::Path;
use std::sync::Arc;
use url::Url;

use fichar::cli::{actions, status, Cli, Commands};
use fichar::clock::http::HttpClockService;
use fichar::core::controller::Controller;
use fichar::core::machine::SessionAction;
use fichar::infra::config::Config;
use fichar::infra::errors::FicharError;
use fichar::infra::logger;
use fichar::infra::store::StateStore;
use fichar::location;

#[tokio::main]
async fn main() {
    // Initialize logging (respects RUST_LOG)
    logger::init_logging("warn");

    if let Err(e) = run().await {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Load config (falls back to defaults if no config.toml)
    let config = if let Some(ref path) = cli.config {
        Config::load_from(Path::new(path))?
    } else {
        Config::load()?
    };

    let store = StateStore::at_default();
    let snapshot = store.load()?;

    let timeout = config.service.timeout();
    let url = Url::parse(&config.service.url)
        .map_err(|e| FicharError::Config(format!("service.url: {e}")))?;
    let clock = Arc::new(HttpClockService::new(url, timeout)?);
    let provider = location::from_config(&config.location, timeout)?;

    let controller = Controller::new(snapshot, clock, provider, store, config.pause.rules());

    match cli.command {
        Commands::Start => actions::run_action(&controller, SessionAction::StartWorkday).await,
        Commands::Warehouse => {
            actions::run_action(&controller, SessionAction::StartWarehouse).await
        }
        Commands::Workday => {
            actions::run_action(&controller, SessionAction::SwitchToWorkday).await
        }
        Commands::Pause => actions::run_action(&controller, SessionAction::StartPause).await,
        Commands::Resume => actions::run_action(&controller, SessionAction::EndPause).await,
        Commands::End => actions::run_action(&controller, SessionAction::EndDay).await,
        Commands::Status => status::show_status(&controller).await,
        Commands::Watch => status::watch(&controller).await,
    }
}
