//! cashprod — monthly cash-productivity analyzer.
//!
//! Takes per-product throughput (TP) and lead-time (LT) figures for a set of
//! selected months, plus each month's starting and ending cash balance, and
//! produces one summary per month: the throughput-weighted average cash
//! productivity (Σ TP²/LT over Σ TP) and the net cash change. Summaries are
//! written as a CSV table and a scatter chart, or served through a web form.
//!
//! Hexagonal architecture: domain logic in [`domain`], port traits in
//! [`ports`], concrete implementations in [`adapters`].

pub mod domain;
pub mod ports;
pub mod adapters;
pub mod cli;
