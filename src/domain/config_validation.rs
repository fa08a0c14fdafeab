//! Analysis configuration validation.
//!
//! Checks all config fields before any data is read.

use crate::domain::error::CashprodError;
use crate::domain::month::{parse_months, validate_month_label};
use crate::ports::config_port::ConfigPort;

pub fn validate_analysis_config(config: &dyn ConfigPort) -> Result<(), CashprodError> {
    let months = configured_months(config)?;
    for label in &months {
        validate_month_label(label)?;
    }
    validate_data_dir(config)?;
    Ok(())
}

/// The month list from `[analysis] months`, split and duplicate-checked.
pub fn configured_months(config: &dyn ConfigPort) -> Result<Vec<String>, CashprodError> {
    let months_str = config.get_string("analysis", "months").ok_or_else(|| {
        CashprodError::ConfigMissing {
            section: "analysis".to_string(),
            key: "months".to_string(),
        }
    })?;

    Ok(parse_months(&months_str)?)
}

fn validate_data_dir(config: &dyn ConfigPort) -> Result<(), CashprodError> {
    if let Some(dir) = config.get_string("analysis", "data_dir") {
        if dir.trim().is_empty() {
            return Err(CashprodError::ConfigInvalid {
                section: "analysis".to_string(),
                key: "data_dir".to_string(),
                reason: "data_dir must not be empty".to_string(),
            });
        }
    }
    Ok(())
}
