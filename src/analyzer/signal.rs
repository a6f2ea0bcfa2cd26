use crate::analyzer::indicators::{moving_average, price_change, volatility};
use crate::config::SignalConfig;
use crate::model::{AnalysisError, PriceSeries, Sentiment};
use serde::Serialize;
use tracing::debug;

pub const SIGNAL_DISCLAIMER: &str = "⚠️ Signals are based on public data and simple indicators and are for reference only, not investment advice; digital assets are volatile, assess the risk yourself.";

const BULLISH_HEADLINE: &str = "Short-term average crossed above long-term average, upward momentum";
const BEARISH_HEADLINE: &str = "Short-term average crossed below long-term average, watch for pullback";
const NEUTRAL_HEADLINE: &str = "No clear price signal";
const VOLATILITY_SUFFIX: &str = "; volatility elevated, manage position size";

/// Metrics backing a signal, in the units they were computed in.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SignalDetails {
    pub price: f64,
    pub short_ma: f64,
    pub long_ma: f64,
    pub volatility: f64,
    pub change_pct: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Signal {
    pub sentiment: Sentiment,
    pub headline: String,
    pub details: SignalDetails,
    pub caution: &'static str,
    pub short_window: usize,
    pub long_window: usize,
    pub volatility_window: usize,
}

/// Moving-average crossover classification over the most recent points.
pub fn generate_signal(series: &PriceSeries, cfg: &SignalConfig) -> Result<Signal, AnalysisError> {
    cfg.validate()?;
    if series.len() < cfg.long_window {
        return Err(AnalysisError::InsufficientData {
            required: cfg.long_window,
            available: series.len(),
        });
    }

    let prices = series.prices();
    let short_ma = moving_average(&prices, cfg.short_window)?;
    let long_ma = moving_average(&prices, cfg.long_window)?;
    let volatility_window = cfg.volatility_window_for(series.len());
    let vol = volatility(series.points(), volatility_window)?;
    let change_pct = price_change(series.points());

    let band = cfg.thresholds.ma_dead_band;
    let (sentiment, mut headline) = if short_ma > long_ma * (1.0 + band) && change_pct > 0.0 {
        (Sentiment::Bullish, BULLISH_HEADLINE.to_string())
    } else if short_ma < long_ma * (1.0 - band) && change_pct < 0.0 {
        (Sentiment::Bearish, BEARISH_HEADLINE.to_string())
    } else {
        (Sentiment::Neutral, NEUTRAL_HEADLINE.to_string())
    };

    if vol > cfg.thresholds.volatility_alert_ratio * long_ma {
        headline.push_str(VOLATILITY_SUFFIX);
    }

    debug!(
        "signal: {} short_ma={:.2} long_ma={:.2} vol={:.2} change={:.4}%",
        sentiment, short_ma, long_ma, vol, change_pct
    );

    Ok(Signal {
        sentiment,
        headline,
        details: SignalDetails {
            price: series.last().map(|p| p.price).unwrap_or_default(),
            short_ma,
            long_ma,
            volatility: vol,
            change_pct,
        },
        caution: SIGNAL_DISCLAIMER,
        short_window: cfg.short_window,
        long_window: cfg.long_window,
        volatility_window,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::PricePoint;
    use chrono::{Duration, TimeZone, Utc};

    fn series(prices: impl IntoIterator<Item = f64>) -> PriceSeries {
        let base = Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap();
        let points = prices
            .into_iter()
            .enumerate()
            .map(|(i, p)| PricePoint::new(base + Duration::minutes(i as i64), p))
            .collect();
        PriceSeries::new(points).unwrap()
    }

    #[test]
    fn rising_series_is_bullish() {
        let s = series((0..80).map(|i| 44_000.0 + i as f64 * 5.0));
        let signal = generate_signal(&s, &SignalConfig::default()).unwrap();
        assert_eq!(signal.sentiment, Sentiment::Bullish);
        assert_eq!(signal.headline, BULLISH_HEADLINE);
        assert_eq!(signal.details.price, 44_395.0);
        assert!(signal.details.short_ma > signal.details.long_ma);
        assert_eq!(signal.volatility_window, 60);
    }

    #[test]
    fn falling_series_is_bearish() {
        let s = series((0..80).map(|i| 50_000.0 - i as f64 * 10.0));
        let signal = generate_signal(&s, &SignalConfig::default()).unwrap();
        assert_eq!(signal.sentiment, Sentiment::Bearish);
        assert!(signal.headline.starts_with(BEARISH_HEADLINE));
        assert!(signal.details.change_pct < 0.0);
    }

    #[test]
    fn flat_series_is_neutral() {
        let s = series(std::iter::repeat_n(30_000.0, 60));
        let signal = generate_signal(&s, &SignalConfig::default()).unwrap();
        assert_eq!(signal.sentiment, Sentiment::Neutral);
        assert_eq!(signal.headline, NEUTRAL_HEADLINE);
        assert_eq!(signal.details.volatility, 0.0);
        assert_eq!(signal.caution, SIGNAL_DISCLAIMER);
    }

    #[test]
    fn dead_band_suppresses_small_crossovers() {
        // short average sits 0.1% above the long one
        let mut prices: Vec<f64> = std::iter::repeat_n(1_000.0, 40).collect();
        prices.extend((0..20).map(|i| 1_001.0 + i as f64 * 0.05));
        let signal = generate_signal(&series(prices), &SignalConfig::default()).unwrap();
        assert_eq!(signal.sentiment, Sentiment::Neutral);
    }

    #[test]
    fn high_volatility_extends_headline() {
        let s = series((0..60).map(|i| if i % 2 == 0 { 900.0 } else { 1_100.0 }));
        let signal = generate_signal(&s, &SignalConfig::default()).unwrap();
        assert!(signal.headline.ends_with(VOLATILITY_SUFFIX));
    }

    #[test]
    fn volatility_suffix_keeps_sentiment() {
        // steep climb: stddev over 60 points is ~11% of the long average
        let s = series((0..80).map(|i| 1_000.0 + i as f64 * 10.0));
        let signal = generate_signal(&s, &SignalConfig::default()).unwrap();
        assert_eq!(signal.sentiment, Sentiment::Bullish);
        assert_eq!(signal.headline, format!("{BULLISH_HEADLINE}{VOLATILITY_SUFFIX}"));
    }

    #[test]
    fn needs_long_window_points() {
        let s = series((0..59).map(|i| 100.0 + i as f64));
        assert_eq!(
            generate_signal(&s, &SignalConfig::default()),
            Err(AnalysisError::InsufficientData {
                required: 60,
                available: 59
            })
        );
    }

    #[test]
    fn rejects_zero_window() {
        let s = series((0..80).map(|i| 100.0 + i as f64));
        let cfg = SignalConfig {
            short_window: 0,
            ..SignalConfig::default()
        };
        assert!(matches!(
            generate_signal(&s, &cfg),
            Err(AnalysisError::Configuration(_))
        ));
    }
}
