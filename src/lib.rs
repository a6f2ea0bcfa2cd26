// Bitcoin market watcher: price statistics, signals and their renderings

pub mod analyzer;
pub mod cli;
pub mod config;
pub mod error;
pub mod model;
pub mod render;
pub mod source;
pub mod utils;
pub mod web;

pub use analyzer::{Analyzer, AnalyzerImpl, MarketInput, Recommendation};
pub use config::{AppConfig, SignalConfig, Thresholds};
pub use error::AppError;
pub use model::{AnalysisError, DataSourceError, MarketSnapshot, PricePoint, PriceSeries, Sentiment};
