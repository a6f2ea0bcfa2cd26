use crate::config::ConfigError;
use crate::model::{AnalysisError, DataSourceError};
use thiserror::Error;

/// Application-level error categories mapped to exit codes.
///
/// Wrapped errors keep their own message so adapters can show it verbatim.
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Analysis(#[from] AnalysisError),

    #[error(transparent)]
    DataSource(#[from] DataSourceError),

    #[error("{0}")]
    InvalidParameter(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl AppError {
    pub const fn exit_code(&self) -> u8 {
        match self {
            Self::Config(_) => 2,
            Self::InvalidParameter(_) => 2,
            Self::Analysis(_) => 3,
            Self::DataSource(_) => 4,
            Self::Io(_) => 10,
        }
    }
}
