//! Domain error types.

use crate::domain::month::MonthListError;

/// Top-level error type for cashprod.
#[derive(Debug, thiserror::Error)]
pub enum CashprodError {
    #[error("data error: {reason}")]
    Data { reason: String },

    #[error("config parse error in {file}: {reason}")]
    ConfigParse { file: String, reason: String },

    #[error("missing config key [{section}] {key}")]
    ConfigMissing { section: String, key: String },

    #[error("invalid config value [{section}] {key}: {reason}")]
    ConfigInvalid {
        section: String,
        key: String,
        reason: String,
    },

    #[error(transparent)]
    MonthList(#[from] MonthListError),

    #[error("invalid month label {label:?}: {reason}")]
    InvalidMonth { label: String, reason: String },

    #[error("no data for month {month}")]
    NoData { month: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<&CashprodError> for std::process::ExitCode {
    fn from(err: &CashprodError) -> Self {
        let code: u8 = match err {
            CashprodError::Io(_) => 1,
            CashprodError::ConfigParse { .. }
            | CashprodError::ConfigMissing { .. }
            | CashprodError::ConfigInvalid { .. } => 2,
            CashprodError::Data { .. } => 3,
            CashprodError::MonthList(_) | CashprodError::InvalidMonth { .. } => 4,
            CashprodError::NoData { .. } => 5,
        };
        std::process::ExitCode::from(code)
    }
}
