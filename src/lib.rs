//! `sarimax-screen` library crate.
//!
//! Grid search over SARIMAX hyperparameters for a univariate monthly-style
//! series: split the series 85/15 by position, fit all 81 combinations of
//! small (p, q) x (P, Q) orders with fixed differencing, score each
//! candidate by held-out RMSE and by BIC, select the best row under each
//! criterion, and optionally persist the table and the winning forecast.
//!
//! There is no binary; the crate is driven programmatically:
//!
//! - build a [`domain::Series`] (or generate one via [`data::sample`])
//! - call [`search::run_grid_search`] with a [`domain::SearchConfig`]
//! - inspect the returned [`search::GridSearch`] bundle, or format it with
//!   [`report::format_search_summary`]

pub mod data;
pub mod domain;
pub mod error;
pub mod io;
pub mod math;
pub mod metrics;
pub mod report;
pub mod sarimax;
pub mod search;
