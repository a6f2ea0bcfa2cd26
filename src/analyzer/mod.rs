// Analyzer module: statistics, the two recommendation paths and their common face.

pub mod indicators;
pub mod signal;
pub mod trend;

use crate::config::{SignalConfig, Thresholds};
use crate::model::{AnalysisError, MarketSnapshot, PriceSeries, Sentiment, TrendAction};
use signal::{Signal, generate_signal};
use trend::{TrendAdvice, summarize_trend};

pub use signal::SignalDetails;

/// Whatever the data source could provide for one analysis pass.
#[derive(Debug, Clone)]
pub enum MarketInput {
    Snapshot(MarketSnapshot),
    Series(PriceSeries),
}

/// How a recommendation leans, used for styling only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Positive,
    Negative,
    Neutral,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Recommendation {
    Trend(TrendAdvice),
    Signal(Signal),
}

impl Recommendation {
    /// Action or sentiment label, e.g. "Consider buying" or "Bullish".
    pub fn label(&self) -> String {
        match self {
            Recommendation::Trend(advice) => advice.action.to_string(),
            Recommendation::Signal(signal) => signal.sentiment.to_string(),
        }
    }

    pub fn headline(&self) -> String {
        match self {
            Recommendation::Trend(advice) => format!("Recommended action: {}", advice.action),
            Recommendation::Signal(signal) => format!("{} - {}", signal.sentiment, signal.headline),
        }
    }

    pub fn reasons(&self) -> Vec<String> {
        match self {
            Recommendation::Trend(advice) => advice.reasons.clone(),
            Recommendation::Signal(signal) => vec![signal.headline.clone()],
        }
    }

    pub fn disclaimer(&self) -> &'static str {
        match self {
            Recommendation::Trend(advice) => advice.caution,
            Recommendation::Signal(signal) => signal.caution,
        }
    }

    pub fn tone(&self) -> Tone {
        match self {
            Recommendation::Trend(advice) => match advice.action {
                TrendAction::ConsiderBuying => Tone::Positive,
                TrendAction::ConsiderReducing => Tone::Negative,
                TrendAction::HoldWait => Tone::Neutral,
            },
            Recommendation::Signal(signal) => match signal.sentiment {
                Sentiment::Bullish => Tone::Positive,
                Sentiment::Bearish => Tone::Negative,
                Sentiment::Neutral => Tone::Neutral,
            },
        }
    }
}

/// Trait defining the interface for a market analyzer.
pub trait Analyzer {
    fn recommend(&self, input: &MarketInput) -> Result<Recommendation, AnalysisError>;
}

/// Implementation of the market analyzer.
#[derive(Debug, Clone, Copy, Default)]
pub struct AnalyzerImpl {
    config: SignalConfig,
}

impl AnalyzerImpl {
    pub fn new(config: SignalConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SignalConfig {
        &self.config
    }

    pub fn thresholds(&self) -> &Thresholds {
        &self.config.thresholds
    }

    pub fn signal(&self, series: &PriceSeries) -> Result<Signal, AnalysisError> {
        generate_signal(series, &self.config)
    }

    pub fn trend(&self, snapshot: &MarketSnapshot) -> TrendAdvice {
        summarize_trend(snapshot, self.thresholds())
    }
}

impl Analyzer for AnalyzerImpl {
    fn recommend(&self, input: &MarketInput) -> Result<Recommendation, AnalysisError> {
        match input {
            MarketInput::Snapshot(snapshot) => Ok(Recommendation::Trend(self.trend(snapshot))),
            MarketInput::Series(series) => self.signal(series).map(Recommendation::Signal),
        }
    }
}
