use crate::model::AnalysisError;
use serde::Deserialize;
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Margin around the long average before a crossover counts (0.2%).
pub const MA_DEAD_BAND: f64 = 0.002;
/// Volatility above this share of the long average flags the headline.
pub const VOLATILITY_ALERT_RATIO: f64 = 0.01;
/// 1h change (percent) needed for the snapshot momentum branches.
pub const HOURLY_MOMENTUM_PCT: f64 = 0.25;
/// 24h change (percent) needed for the snapshot momentum branches.
pub const DAILY_MOMENTUM_PCT: f64 = 0.5;
/// 7d change (percent) that adds a weekly trend note.
pub const WEEKLY_TREND_PCT: f64 = 5.0;

pub const DEFAULT_SHORT_WINDOW: usize = 20;
pub const DEFAULT_LONG_WINDOW: usize = 60;
/// Upper bound for the volatility window when none is configured.
pub const DEFAULT_VOLATILITY_CAP: usize = 60;

/// Lower bound of the watch loop interval.
pub const MIN_POLL_INTERVAL_SECONDS: u64 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct Thresholds {
    pub ma_dead_band: f64,
    pub volatility_alert_ratio: f64,
    pub hourly_momentum_pct: f64,
    pub daily_momentum_pct: f64,
    pub weekly_trend_pct: f64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            ma_dead_band: MA_DEAD_BAND,
            volatility_alert_ratio: VOLATILITY_ALERT_RATIO,
            hourly_momentum_pct: HOURLY_MOMENTUM_PCT,
            daily_momentum_pct: DAILY_MOMENTUM_PCT,
            weekly_trend_pct: WEEKLY_TREND_PCT,
        }
    }
}

/// Parameters for the moving-average classifier.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SignalConfig {
    pub short_window: usize,
    pub long_window: usize,
    /// `None` means `min(series length, 60)`.
    pub volatility_window: Option<usize>,
    pub thresholds: Thresholds,
}

impl Default for SignalConfig {
    fn default() -> Self {
        Self {
            short_window: DEFAULT_SHORT_WINDOW,
            long_window: DEFAULT_LONG_WINDOW,
            volatility_window: None,
            thresholds: Thresholds::default(),
        }
    }
}

impl SignalConfig {
    pub fn validate(&self) -> Result<(), AnalysisError> {
        if self.short_window == 0 {
            return Err(AnalysisError::Configuration(
                "short_window must be positive".into(),
            ));
        }
        if self.long_window == 0 {
            return Err(AnalysisError::Configuration(
                "long_window must be positive".into(),
            ));
        }
        if self.volatility_window == Some(0) {
            return Err(AnalysisError::Configuration(
                "volatility_window must be positive".into(),
            ));
        }
        Ok(())
    }

    pub fn volatility_window_for(&self, series_len: usize) -> usize {
        self.volatility_window
            .unwrap_or_else(|| series_len.min(DEFAULT_VOLATILITY_CAP))
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub api_base_url: String,
    pub user_agent: String,
    pub request_timeout_seconds: u64,
    pub hours: f64,
    pub poll_interval_seconds: u64,
    pub iterations: u32,
    pub short_window: usize,
    pub long_window: usize,
    pub volatility_window: Option<usize>,
    pub thresholds: Thresholds,
    pub host: String,
    pub port: u16,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: "https://api.coingecko.com/api/v3".into(),
            user_agent: "btc-ai-assistant/1.0".into(),
            request_timeout_seconds: 10,
            hours: 6.0,
            poll_interval_seconds: 60,
            iterations: 1,
            short_window: DEFAULT_SHORT_WINDOW,
            long_window: DEFAULT_LONG_WINDOW,
            volatility_window: None,
            thresholds: Thresholds::default(),
            host: "127.0.0.1".into(),
            port: 8000,
        }
    }
}

impl AppConfig {
    pub fn signal_config(&self) -> SignalConfig {
        SignalConfig {
            short_window: self.short_window,
            long_window: self.long_window,
            volatility_window: self.volatility_window,
            thresholds: self.thresholds,
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

pub fn load_config(path: impl AsRef<Path>) -> Result<AppConfig, ConfigError> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.display().to_string(),
        source,
    })?;
    parse_config(&content).map_err(|source| ConfigError::Parse {
        path: path.display().to_string(),
        source,
    })
}

pub fn parse_config(content: &str) -> Result<AppConfig, serde_json::Error> {
    serde_json::from_str(content)
}
