// Core structs: PricePoint, PriceSeries, MarketSnapshot, error types
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// A single price/time observation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PricePoint {
    pub timestamp: DateTime<Utc>,
    pub price: f64,
}

impl PricePoint {
    pub fn new(timestamp: DateTime<Utc>, price: f64) -> Self {
        Self { timestamp, price }
    }
}

/// Time-ordered price observations, oldest first.
///
/// Duplicated timestamps are kept as they arrive; only the ordering is enforced.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceSeries {
    points: Vec<PricePoint>,
}

impl PriceSeries {
    /// Validates and sorts the points. An empty feed or a non-positive /
    /// non-finite price is rejected instead of being patched over.
    pub fn new(mut points: Vec<PricePoint>) -> Result<Self, DataSourceError> {
        if points.is_empty() {
            return Err(DataSourceError::Empty("price series has no points".into()));
        }
        if let Some(bad) = points
            .iter()
            .find(|p| !p.price.is_finite() || p.price <= 0.0)
        {
            return Err(DataSourceError::InvalidValue(format!(
                "price {} at {} is not a positive number",
                bad.price,
                bad.timestamp.to_rfc3339()
            )));
        }
        points.sort_by_key(|p| p.timestamp);
        Ok(Self { points })
    }

    pub fn points(&self) -> &[PricePoint] {
        &self.points
    }

    pub fn prices(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.price).collect()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn last(&self) -> Option<&PricePoint> {
        self.points.last()
    }
}

/// One entry of the `/coins/markets` response as the provider sends it.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawMarketRecord {
    pub current_price: Option<f64>,
    pub high_24h: Option<f64>,
    pub low_24h: Option<f64>,
    pub market_cap: Option<f64>,
    pub total_volume: Option<f64>,
    pub price_change_percentage_1h_in_currency: Option<f64>,
    pub price_change_percentage_24h_in_currency: Option<f64>,
    pub price_change_percentage_7d_in_currency: Option<f64>,
}

/// Point-in-time market read.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MarketSnapshot {
    pub fetched_at: DateTime<Utc>,
    pub price: f64,
    pub high_24h: f64,
    pub low_24h: f64,
    pub market_cap: f64,
    pub total_volume: f64,
    pub change_1h: f64,
    pub change_24h: f64,
    pub change_7d: f64,
}

impl MarketSnapshot {
    /// Builds a snapshot from a provider record.
    ///
    /// All five required fields must be present; the three percentage changes
    /// fall back to 0.0 when absent.
    pub fn from_record(
        record: &RawMarketRecord,
        fetched_at: DateTime<Utc>,
    ) -> Result<Self, DataSourceError> {
        let required = [
            ("current_price", record.current_price),
            ("high_24h", record.high_24h),
            ("low_24h", record.low_24h),
            ("market_cap", record.market_cap),
            ("total_volume", record.total_volume),
        ];
        let missing: Vec<String> = required
            .iter()
            .filter(|(_, value)| value.is_none())
            .map(|(name, _)| name.to_string())
            .collect();
        if !missing.is_empty() {
            return Err(DataSourceError::MissingFields(missing));
        }

        let snapshot = Self {
            fetched_at,
            price: record.current_price.unwrap_or_default(),
            high_24h: record.high_24h.unwrap_or_default(),
            low_24h: record.low_24h.unwrap_or_default(),
            market_cap: record.market_cap.unwrap_or_default(),
            total_volume: record.total_volume.unwrap_or_default(),
            change_1h: record.price_change_percentage_1h_in_currency.unwrap_or(0.0),
            change_24h: record.price_change_percentage_24h_in_currency.unwrap_or(0.0),
            change_7d: record.price_change_percentage_7d_in_currency.unwrap_or(0.0),
        };

        let values = [
            ("current_price", snapshot.price),
            ("high_24h", snapshot.high_24h),
            ("low_24h", snapshot.low_24h),
            ("market_cap", snapshot.market_cap),
            ("total_volume", snapshot.total_volume),
            ("price_change_percentage_1h_in_currency", snapshot.change_1h),
            ("price_change_percentage_24h_in_currency", snapshot.change_24h),
            ("price_change_percentage_7d_in_currency", snapshot.change_7d),
        ];
        if let Some((name, _)) = values.iter().find(|(_, v)| !v.is_finite()) {
            return Err(DataSourceError::InvalidValue(format!("{name} is not finite")));
        }

        Ok(snapshot)
    }
}

/// Output category of the moving-average classifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Sentiment {
    Bullish,
    Bearish,
    Neutral,
}

impl fmt::Display for Sentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Sentiment::Bullish => "Bullish",
            Sentiment::Bearish => "Bearish",
            Sentiment::Neutral => "Neutral",
        };
        f.write_str(label)
    }
}

/// Action suggested by the snapshot heuristic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TrendAction {
    #[serde(rename = "Consider buying")]
    ConsiderBuying,
    #[serde(rename = "Consider reducing exposure")]
    ConsiderReducing,
    #[serde(rename = "Hold / wait")]
    HoldWait,
}

impl fmt::Display for TrendAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            TrendAction::ConsiderBuying => "Consider buying",
            TrendAction::ConsiderReducing => "Consider reducing exposure",
            TrendAction::HoldWait => "Hold / wait",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum AnalysisError {
    #[error("invalid configuration: {0}")]
    Configuration(String),

    #[error("not enough data: {required} points required, {available} available")]
    InsufficientData { required: usize, available: usize },
}

#[derive(Debug, Error, PartialEq)]
pub enum DataSourceError {
    #[error("HTTP request failed: {0}")]
    Http(String),

    #[error("market data provider returned HTTP {0}")]
    Status(u16),

    #[error("failed to decode response: {0}")]
    Decode(String),

    #[error("market data missing required fields: {}", .0.join(", "))]
    MissingFields(Vec<String>),

    #[error("{0}")]
    Empty(String),

    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error("invalid market value: {0}")]
    InvalidValue(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn full_record() -> RawMarketRecord {
        RawMarketRecord {
            current_price: Some(50_000.0),
            high_24h: Some(51_000.0),
            low_24h: Some(49_000.0),
            market_cap: Some(1_000_000.0),
            total_volume: Some(10_000.0),
            price_change_percentage_1h_in_currency: Some(0.5),
            price_change_percentage_24h_in_currency: Some(1.0),
            price_change_percentage_7d_in_currency: Some(6.0),
        }
    }

    #[test]
    fn snapshot_requires_market_cap() {
        let record = RawMarketRecord {
            market_cap: None,
            ..full_record()
        };
        let err = MarketSnapshot::from_record(&record, Utc::now()).unwrap_err();
        assert_eq!(err, DataSourceError::MissingFields(vec!["market_cap".into()]));
        assert!(err.to_string().contains("market_cap"));
    }

    #[test]
    fn snapshot_lists_every_missing_field() {
        let record = RawMarketRecord {
            current_price: Some(1.0),
            ..Default::default()
        };
        let err = MarketSnapshot::from_record(&record, Utc::now()).unwrap_err();
        assert_eq!(
            err.to_string(),
            "market data missing required fields: high_24h, low_24h, market_cap, total_volume"
        );
    }

    #[test]
    fn snapshot_defaults_missing_changes_to_zero() {
        let record = RawMarketRecord {
            price_change_percentage_1h_in_currency: None,
            price_change_percentage_24h_in_currency: None,
            price_change_percentage_7d_in_currency: None,
            ..full_record()
        };
        let snapshot = MarketSnapshot::from_record(&record, Utc::now()).unwrap();
        assert_eq!(snapshot.change_1h, 0.0);
        assert_eq!(snapshot.change_24h, 0.0);
        assert_eq!(snapshot.change_7d, 0.0);
        assert_eq!(snapshot.market_cap, 1_000_000.0);
    }

    #[test]
    fn snapshot_rejects_non_finite_values() {
        let record = RawMarketRecord {
            high_24h: Some(f64::NAN),
            ..full_record()
        };
        assert!(matches!(
            MarketSnapshot::from_record(&record, Utc::now()),
            Err(DataSourceError::InvalidValue(_))
        ));
    }

    #[test]
    fn series_sorts_and_keeps_duplicates() {
        let t0 = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let t1 = Utc.with_ymd_and_hms(2024, 1, 1, 0, 1, 0).unwrap();
        let series = PriceSeries::new(vec![
            PricePoint::new(t1, 3.0),
            PricePoint::new(t0, 1.0),
            PricePoint::new(t0, 2.0),
        ])
        .unwrap();
        assert_eq!(series.prices(), vec![1.0, 2.0, 3.0]);
        assert_eq!(series.len(), 3);
    }

    #[test]
    fn series_rejects_empty_and_bad_prices() {
        assert!(matches!(
            PriceSeries::new(Vec::new()),
            Err(DataSourceError::Empty(_))
        ));
        let t0 = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        assert!(matches!(
            PriceSeries::new(vec![PricePoint::new(t0, -5.0)]),
            Err(DataSourceError::InvalidValue(_))
        ));
    }
}
