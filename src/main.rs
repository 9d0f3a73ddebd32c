// src/main.rs — ontodash entry point

use std::sync::Arc;

use clap::Parser;

use ontodash::api::HttpApiClient;
use ontodash::cli::{run, Cli, Commands, OutputFormat};
use ontodash::dashboard::{Dashboard, Tab};
use ontodash::infra::config::{Config, API_URL_ENV};
use ontodash::infra::errors::DashboardError;
use ontodash::infra::{logger, paths};

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("error: {e}");
        if e
            .downcast_ref::<DashboardError>()
            .is_some_and(DashboardError::is_transport)
        {
            eprintln!("hint: check that the API is reachable (--api-url or {API_URL_ENV})");
        }
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let command = cli.command.unwrap_or(Commands::Dashboard { tab: None });
    let interactive =
        matches!(command, Commands::Dashboard { .. }) && cli.format == OutputFormat::Text;

    // The TUI owns the terminal, so its logs go to a file (respects RUST_LOG).
    if interactive {
        logger::init_file_logging("warn", &paths::log_file_path())?;
    } else {
        logger::init_logging("warn");
    }

    // Load config (falls back to defaults if no config.toml)
    let config = if let Some(ref path) = cli.config {
        Config::load_from(std::path::Path::new(path))?
    } else {
        Config::load()?
    };

    let client = HttpApiClient::new(config.resolve_base_url(cli.api_url.as_deref())?);
    tracing::info!(base_url = %client.base_url(), "Using dashboard API");

    let dashboard = Dashboard::new(client, config.metrics.clone());
    let format = cli.format;

    match command {
        Commands::Dashboard { tab } => {
            if let Some(tab) = tab {
                dashboard.select_tab(tab.parse::<Tab>()?).await;
            }
            if interactive {
                let base_url = dashboard.api().base_url().to_string();
                let dashboard = Arc::new(dashboard);
                tokio::task::block_in_place(|| {
                    ontodash::tui::run_dashboard(dashboard, &config.dashboard, &base_url)
                })
            } else {
                run::print_page(&dashboard).await
            }
        }
        Commands::Query { text } => run::run_query(&dashboard, &text.join(" "), format).await,
        Commands::Cq {
            number,
            all,
            batch,
        } => {
            if all {
                run::run_all_cqs(&dashboard, format).await
            } else if batch {
                run::run_cq_batch(&dashboard, format).await
            } else if let Some(number) = number {
                run::run_cq(&dashboard, number, format).await
            } else {
                anyhow::bail!("Specify a CQ number, --all or --batch")
            }
        }
        Commands::Reasoner { op } => run::run_reasoner(&dashboard, &op, format).await,
        Commands::Metrics => run::show_metrics(&dashboard, format).await,
        Commands::Health => run::show_health(&dashboard).await,
    }
}
