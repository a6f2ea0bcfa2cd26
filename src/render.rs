// Text and JSON renderings: two decimals for display, full precision in payloads

use crate::analyzer::signal::{Signal, SignalDetails};
use crate::analyzer::{Recommendation, Tone};
use crate::model::{MarketSnapshot, Sentiment};
use crate::utils::{format_usd, iso_utc};
use chrono::{DateTime, Utc};
use serde::Serialize;

pub const REPORT_TITLE: &str = "BTC Market Snapshot";

const GREEN: &str = "\x1b[32m";
const RED: &str = "\x1b[31m";
const YELLOW: &str = "\x1b[33m";
const BOLD: &str = "\x1b[1m";
const RESET: &str = "\x1b[0m";

/// Action line followed by bulleted reasons.
pub fn format_recommendation(recommendation: &Recommendation) -> String {
    let mut lines = vec![recommendation.headline()];
    lines.extend(recommendation.reasons().iter().map(|r| format!("- {r}")));
    lines.join("\n")
}

pub fn render_report(snapshot: &MarketSnapshot, recommendation: &Recommendation) -> String {
    let lines = [
        REPORT_TITLE.to_string(),
        format!("Fetched at: {}", iso_utc(snapshot.fetched_at)),
        format!("Price: {}", format_usd(snapshot.price, 2)),
        format!(
            "24h High / Low: {} / {}",
            format_usd(snapshot.high_24h, 2),
            format_usd(snapshot.low_24h, 2)
        ),
        format!("Market Cap: {}", format_usd(snapshot.market_cap, 0)),
        format!("24h Volume: {}", format_usd(snapshot.total_volume, 0)),
        String::new(),
        format_recommendation(recommendation),
        recommendation.disclaimer().to_string(),
    ];
    lines.join("\n")
}

/// Console rendering of a moving-average signal.
pub fn render_signal_text(signal: &Signal, rendered_at: DateTime<Utc>) -> String {
    let d = &signal.details;
    let lines = [
        format!("[{}] Price: ${:.2}", iso_utc(rendered_at), d.price),
        format!(
            "Short MA({}): ${:.2} | Long MA({}): ${:.2}",
            signal.short_window, d.short_ma, signal.long_window, d.long_ma
        ),
        format!(
            "Change: {:.2}% | Volatility (last {}): {:.2}",
            d.change_pct, signal.volatility_window, d.volatility
        ),
        format!("Signal: {} - {}", signal.sentiment, signal.headline),
        signal.caution.to_string(),
    ];
    lines.join("\n")
}

/// Flat, serializable form of a signal for transports.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SignalPayload {
    #[serde(flatten)]
    pub details: SignalDetails,
    pub sentiment: Sentiment,
    pub headline: String,
    pub caution: String,
    pub timestamp: String,
}

pub fn signal_payload(signal: &Signal, rendered_at: DateTime<Utc>) -> SignalPayload {
    SignalPayload {
        details: signal.details,
        sentiment: signal.sentiment,
        headline: signal.headline.clone(),
        caution: signal.caution.to_string(),
        timestamp: iso_utc(rendered_at),
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SnapshotPayload {
    pub report: String,
    pub action: String,
    pub reasons: Vec<String>,
    pub caution: String,
    pub timestamp: String,
}

pub fn snapshot_payload(
    snapshot: &MarketSnapshot,
    recommendation: &Recommendation,
    rendered_at: DateTime<Utc>,
) -> SnapshotPayload {
    SnapshotPayload {
        report: render_report(snapshot, recommendation),
        action: recommendation.label(),
        reasons: recommendation.reasons(),
        caution: recommendation.disclaimer().to_string(),
        timestamp: iso_utc(rendered_at),
    }
}

/// Keyword-based tone of a rendered line.
pub fn tone_from_text(line: &str) -> Tone {
    let lower = line.to_lowercase();
    if lower.contains("buy") || lower.contains("bullish") {
        Tone::Positive
    } else if lower.contains("reduc") || lower.contains("bearish") {
        Tone::Negative
    } else {
        Tone::Neutral
    }
}

pub fn colorize(text: &str, tone: Tone) -> String {
    let color = match tone {
        Tone::Positive => GREEN,
        Tone::Negative => RED,
        Tone::Neutral => YELLOW,
    };
    format!("{BOLD}{color}{text}{RESET}")
}

/// Highlights the action / signal lines of a rendered report.
pub fn highlight(report: &str) -> String {
    report
        .lines()
        .map(|line| {
            if line.starts_with("Recommended action:") || line.starts_with("Signal:") {
                colorize(line, tone_from_text(line))
            } else {
                line.to_string()
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}
