// Market data sources
pub mod fetcher;
pub mod traits;

pub use fetcher::{CoinGeckoClient, parse_market_chart, parse_markets_payload};
pub use traits::MarketSource;
