use crate::config::AppConfig;
use crate::model::{DataSourceError, MarketSnapshot, PricePoint, PriceSeries, RawMarketRecord};
use crate::source::traits::MarketSource;
use crate::utils::datetime_from_millis;

use chrono::{DateTime, Utc};
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, info, warn};

/// CoinGecko-backed market source.
pub struct CoinGeckoClient {
    client: Client,
    base_url: String,
}

impl CoinGeckoClient {
    pub fn new(
        base_url: impl Into<String>,
        user_agent: &str,
        timeout: Duration,
    ) -> Result<Self, DataSourceError> {
        let client = Client::builder()
            .user_agent(user_agent)
            .timeout(timeout)
            .build()
            .map_err(|e| DataSourceError::Http(e.to_string()))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn from_config(cfg: &AppConfig) -> Result<Self, DataSourceError> {
        Self::new(
            cfg.api_base_url.clone(),
            &cfg.user_agent,
            Duration::from_secs(cfg.request_timeout_seconds),
        )
    }

    fn markets_url(&self) -> String {
        format!("{}/coins/markets", self.base_url)
    }

    fn market_chart_url(&self) -> String {
        format!("{}/coins/bitcoin/market_chart", self.base_url)
    }

    async fn get_json(&self, url: &str, query: &[(&str, String)]) -> Result<Value, DataSourceError> {
        debug!("GET {} {:?}", url, query);
        let response = self
            .client
            .get(url)
            .query(query)
            .send()
            .await
            .map_err(|e| DataSourceError::Http(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            warn!("Market data provider responded [{}] for {}", status, url);
            return Err(DataSourceError::Status(status.as_u16()));
        }

        response
            .json::<Value>()
            .await
            .map_err(|e| DataSourceError::Decode(e.to_string()))
    }
}

#[async_trait::async_trait]
impl MarketSource for CoinGeckoClient {
    async fn fetch_snapshot(&self) -> Result<MarketSnapshot, DataSourceError> {
        let query = [
            ("vs_currency", "usd".to_string()),
            ("ids", "bitcoin".to_string()),
            ("price_change_percentage", "1h,24h,7d".to_string()),
        ];
        let payload = self.get_json(&self.markets_url(), &query).await?;
        let snapshot = parse_markets_payload(payload, Utc::now())?;
        info!("Fetched snapshot: price {:.2}", snapshot.price);
        Ok(snapshot)
    }

    async fn fetch_price_points(&self, hours: f64) -> Result<PriceSeries, DataSourceError> {
        if !hours.is_finite() || hours <= 0.0 {
            return Err(DataSourceError::InvalidRequest("hours must be positive".into()));
        }
        let query = [
            ("vs_currency", "usd".to_string()),
            ("days", (hours / 24.0).to_string()),
            ("interval", "minute".to_string()),
        ];
        let payload = self.get_json(&self.market_chart_url(), &query).await?;
        let series = parse_market_chart(&payload)?;
        info!("Fetched {} price points covering {}h", series.len(), hours);
        Ok(series)
    }
}

/// Takes the first record of a `/coins/markets` response.
pub fn parse_markets_payload(
    payload: Value,
    fetched_at: DateTime<Utc>,
) -> Result<MarketSnapshot, DataSourceError> {
    let records: Vec<RawMarketRecord> =
        serde_json::from_value(payload).map_err(|e| DataSourceError::Decode(e.to_string()))?;
    let record = records.first().ok_or_else(|| {
        DataSourceError::Empty("empty response from market data provider".into())
    })?;
    MarketSnapshot::from_record(record, fetched_at)
}

/// Reads `prices: [[millis, price], ...]`, skipping malformed entries.
pub fn parse_market_chart(payload: &Value) -> Result<PriceSeries, DataSourceError> {
    let entries = payload
        .get("prices")
        .and_then(Value::as_array)
        .ok_or_else(|| {
            DataSourceError::Decode("unexpected response structure: missing prices list".into())
        })?;

    let points: Vec<PricePoint> = entries.iter().filter_map(parse_chart_entry).collect();
    if points.len() < entries.len() {
        debug!("Skipped {} malformed price entries", entries.len() - points.len());
    }
    if points.is_empty() {
        return Err(DataSourceError::Empty("no valid price points returned".into()));
    }
    PriceSeries::new(points)
}

fn parse_chart_entry(entry: &Value) -> Option<PricePoint> {
    let [millis, price] = entry.as_array()?.as_slice() else {
        return None;
    };
    let timestamp = datetime_from_millis(millis.as_f64()?)?;
    Some(PricePoint::new(timestamp, price.as_f64()?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_market_record() {
        let payload = json!([{
            "current_price": 50000,
            "high_24h": 51000,
            "low_24h": 49000,
            "market_cap": 1_000_000,
            "total_volume": 10_000,
            "price_change_percentage_1h_in_currency": 0.5,
            "price_change_percentage_24h_in_currency": 1.0,
            "price_change_percentage_7d_in_currency": 6.0,
            "symbol": "btc"
        }]);
        let snapshot = parse_markets_payload(payload, Utc::now()).unwrap();
        assert_eq!(snapshot.price, 50_000.0);
        assert_eq!(snapshot.high_24h, 51_000.0);
        assert_eq!(snapshot.low_24h, 49_000.0);
        assert_eq!(snapshot.market_cap, 1_000_000.0);
        assert_eq!(snapshot.total_volume, 10_000.0);
        assert_eq!(snapshot.change_7d, 6.0);
    }

    #[test]
    fn missing_market_cap_fails() {
        let payload = json!([{
            "current_price": 50000,
            "high_24h": 51000,
            "low_24h": 49000,
            "total_volume": 10_000
        }]);
        let err = parse_markets_payload(payload, Utc::now()).unwrap_err();
        assert_eq!(err, DataSourceError::MissingFields(vec!["market_cap".into()]));
    }

    #[test]
    fn null_field_counts_as_missing() {
        let payload = json!([{
            "current_price": null,
            "high_24h": 51000,
            "low_24h": 49000,
            "market_cap": 1,
            "total_volume": 10_000
        }]);
        assert!(matches!(
            parse_markets_payload(payload, Utc::now()),
            Err(DataSourceError::MissingFields(_))
        ));
    }

    #[test]
    fn empty_markets_response_fails() {
        assert!(matches!(
            parse_markets_payload(json!([]), Utc::now()),
            Err(DataSourceError::Empty(_))
        ));
        assert!(matches!(
            parse_markets_payload(json!({"error": "rate limited"}), Utc::now()),
            Err(DataSourceError::Decode(_))
        ));
    }

    #[test]
    fn chart_skips_malformed_entries_and_sorts() {
        let payload = json!({
            "prices": [
                [1_704_067_260_000_i64, 44010.5],
                [1_704_067_200_000_i64, 44000.0],
                ["bad", 1.0],
                [1_704_067_320_000_i64],
                [1_704_067_380_000_i64, null]
            ]
        });
        let series = parse_market_chart(&payload).unwrap();
        assert_eq!(series.prices(), vec![44_000.0, 44_010.5]);
    }

    #[test]
    fn chart_without_prices_fails() {
        assert!(matches!(
            parse_market_chart(&json!({"total_volumes": []})),
            Err(DataSourceError::Decode(_))
        ));
        assert_eq!(
            parse_market_chart(&json!({"prices": [["x", "y"]]})),
            Err(DataSourceError::Empty("no valid price points returned".into()))
        );
    }

    #[test]
    fn chart_with_non_positive_price_is_rejected() {
        let payload = json!({
            "prices": [
                [1_704_067_200_000_i64, 0.0],
                [1_704_067_260_000_i64, -5.0],
                [1_704_067_320_000_i64, 44000.0]
            ]
        });
        assert!(matches!(
            parse_market_chart(&payload),
            Err(DataSourceError::InvalidValue(_))
        ));
    }

    #[tokio::test]
    async fn rejects_non_positive_hours() {
        let client = CoinGeckoClient::new("http://127.0.0.1:9", "test", Duration::from_secs(1)).unwrap();
        assert_eq!(
            client.fetch_price_points(0.0).await.unwrap_err(),
            DataSourceError::InvalidRequest("hours must be positive".into())
        );
    }
}
