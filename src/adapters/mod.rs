//! Concrete adapter implementations for ports.

pub mod chart_svg;
pub mod csv_data_adapter;
pub mod csv_export_adapter;
pub mod file_config_adapter;
#[cfg(feature = "web")]
pub mod web;
