// CLI arguments and the per-iteration work behind each command

use crate::analyzer::{Analyzer, AnalyzerImpl, MarketInput};
use crate::config::{AppConfig, MIN_POLL_INTERVAL_SECONDS, load_config};
use crate::error::AppError;
use crate::render::{highlight, render_report, render_signal_text};
use crate::source::MarketSource;

use chrono::Utc;
use clap::{Args, Parser, Subcommand};
use std::future::Future;
use std::path::{Path, PathBuf};
use tokio::time::{Duration, sleep};
use tracing::{info, warn};

/// Config file picked up from the working directory when `--config` is absent.
pub const DEFAULT_CONFIG_PATH: &str = "config.json";

/// Watch Bitcoin prices and print simple, reference-only signals.
#[derive(Debug, Parser)]
#[command(name = "btc-watch", version, about)]
pub struct Cli {
    /// JSON config file (defaults to ./config.json when present).
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Disable ANSI colors in console output.
    #[arg(long, global = true, default_value_t = false)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Poll price history and print a moving-average signal (default).
    Watch(WatchArgs),
    /// Fetch the current market snapshot and print a report.
    Snapshot,
    /// Serve the web dashboard until interrupted.
    Serve(ServeArgs),
}

#[derive(Debug, Default, Args)]
pub struct WatchArgs {
    /// Hours of history to request.
    #[arg(long)]
    pub hours: Option<f64>,

    /// Seconds between polls (minimum 10).
    #[arg(long)]
    pub interval: Option<u64>,

    /// Number of polls; 0 runs until interrupted.
    #[arg(long)]
    pub iterations: Option<u32>,
}

#[derive(Debug, Default, Args)]
pub struct ServeArgs {
    #[arg(long)]
    pub host: Option<String>,

    #[arg(long)]
    pub port: Option<u16>,

    /// Default hours of history for /api/signal.
    #[arg(long)]
    pub hours: Option<f64>,
}

impl Cli {
    /// Reads the config file and applies command-line overrides.
    pub fn resolve_config(&self) -> Result<AppConfig, AppError> {
        let mut config = match &self.config {
            Some(path) => load_config(path)?,
            None if Path::new(DEFAULT_CONFIG_PATH).exists() => load_config(DEFAULT_CONFIG_PATH)?,
            None => AppConfig::default(),
        };

        match &self.command {
            Some(Command::Watch(args)) => args.apply(&mut config),
            Some(Command::Serve(args)) => args.apply(&mut config),
            Some(Command::Snapshot) | None => {}
        }
        Ok(config)
    }
}

impl WatchArgs {
    fn apply(&self, config: &mut AppConfig) {
        if let Some(hours) = self.hours {
            config.hours = hours;
        }
        if let Some(interval) = self.interval {
            config.poll_interval_seconds = interval;
        }
        if let Some(iterations) = self.iterations {
            config.iterations = iterations;
        }
    }
}

impl ServeArgs {
    fn apply(&self, config: &mut AppConfig) {
        if let Some(host) = &self.host {
            config.host = host.clone();
        }
        if let Some(port) = self.port {
            config.port = port;
        }
        if let Some(hours) = self.hours {
            config.hours = hours;
        }
    }
}

/// One watch iteration: fetch history, classify, render.
pub async fn watch_once(
    source: &dyn MarketSource,
    analyzer: &AnalyzerImpl,
    hours: f64,
    color: bool,
) -> Result<String, AppError> {
    let series = source.fetch_price_points(hours).await?;
    let signal = analyzer.signal(&series)?;
    let text = render_signal_text(&signal, Utc::now());
    Ok(if color { highlight(&text) } else { text })
}

/// Console line for a failed watch iteration.
pub fn describe_failure(err: &AppError) -> String {
    match err {
        AppError::DataSource(e) => format!("data fetch failed: {e}"),
        other => format!("processing failed: {other}"),
    }
}

/// Polls until the iteration budget runs out or `shutdown` resolves, which
/// cuts short both an in-flight fetch and the pause between polls.
/// Returns the number of completed iterations.
pub async fn watch_loop(
    source: &dyn MarketSource,
    analyzer: &AnalyzerImpl,
    config: &AppConfig,
    color: bool,
    shutdown: impl Future<Output = ()>,
) -> u32 {
    let pause = Duration::from_secs(config.poll_interval_seconds.max(MIN_POLL_INTERVAL_SECONDS));
    let mut iteration: u32 = 0;
    tokio::pin!(shutdown);

    loop {
        info!("Fetching {}h of price history...", config.hours);
        let outcome = tokio::select! {
            biased;
            _ = &mut shutdown => break,
            outcome = watch_once(source, analyzer, config.hours, color) => outcome,
        };
        match outcome {
            Ok(text) => println!("{text}"),
            Err(e) => {
                warn!("Watch iteration failed: {:?}", e);
                println!("{}", describe_failure(&e));
            }
        }

        iteration += 1;
        if config.iterations != 0 && iteration >= config.iterations {
            return iteration;
        }

        info!("Waiting {}s for the next poll...", pause.as_secs());
        tokio::select! {
            biased;
            _ = &mut shutdown => break,
            _ = sleep(pause) => {}
        }
    }
    info!("Interrupted, stopping.");
    iteration
}

/// Snapshot report for the `snapshot` command.
pub async fn snapshot_report(
    source: &dyn MarketSource,
    analyzer: &AnalyzerImpl,
    color: bool,
) -> Result<String, AppError> {
    let snapshot = source.fetch_snapshot().await?;
    let recommendation = analyzer.recommend(&MarketInput::Snapshot(snapshot.clone()))?;
    let report = render_report(&snapshot, &recommendation);
    Ok(if color { highlight(&report) } else { report })
}
