use crate::model::{DataSourceError, MarketSnapshot, PriceSeries};

/// Supplier of Bitcoin market data. One attempt per call; no retries.
#[async_trait::async_trait]
pub trait MarketSource: Send + Sync {
    async fn fetch_snapshot(&self) -> Result<MarketSnapshot, DataSourceError>;

    /// Price history covering the last `hours` hours, oldest first.
    async fn fetch_price_points(&self, hours: f64) -> Result<PriceSeries, DataSourceError>;
}
