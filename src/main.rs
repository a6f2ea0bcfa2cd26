use btc_watch::cli::{Cli, Command, WatchArgs, snapshot_report, watch_loop};
use btc_watch::config::AppConfig;
use btc_watch::error::AppError;
use btc_watch::source::{CoinGeckoClient, MarketSource};
use btc_watch::web::{AppState, DashboardServer};
use btc_watch::AnalyzerImpl;

use clap::Parser;
use std::process::ExitCode;
use std::sync::Arc;
use tracing::{error, warn};

#[tokio::main]
async fn main() -> ExitCode {
    // Initialize logging
    tracing_subscriber::fmt::init();

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            eprintln!("error: {e}");
            ExitCode::from(e.exit_code())
        }
    }
}

async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let config = cli.resolve_config()?;
    let color = !cli.no_color;

    let analyzer = AnalyzerImpl::new(config.signal_config());
    analyzer.config().validate()?;
    let source: Arc<dyn MarketSource> = Arc::new(CoinGeckoClient::from_config(&config)?);

    match cli.command.unwrap_or(Command::Watch(WatchArgs::default())) {
        Command::Watch(_) => watch(source.as_ref(), &analyzer, &config, color).await,
        Command::Snapshot => {
            let report = snapshot_report(source.as_ref(), &analyzer, color).await?;
            println!("{report}");
            Ok(())
        }
        Command::Serve(_) => serve(source, analyzer, &config).await,
    }
}

/// Polls the source on a timer until the iteration budget runs out or Ctrl-C.
async fn watch(
    source: &dyn MarketSource,
    analyzer: &AnalyzerImpl,
    config: &AppConfig,
    color: bool,
) -> Result<(), AppError> {
    let interrupted = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!("Could not listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
    };
    watch_loop(source, analyzer, config, color, interrupted).await;
    Ok(())
}

async fn serve(
    source: Arc<dyn MarketSource>,
    analyzer: AnalyzerImpl,
    config: &AppConfig,
) -> Result<(), AppError> {
    let state = AppState::new(source, analyzer, config.hours);
    let server = DashboardServer::start(state, (config.host.as_str(), config.port)).await?;
    println!("BTC dashboard running at http://{}", server.local_addr());

    tokio::signal::ctrl_c().await?;
    println!("\nStopping server...");
    server.stop().await?;
    Ok(())
}
