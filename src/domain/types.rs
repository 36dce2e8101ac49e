//! Candidate orders, evaluation rows, and run configuration.

use std::fmt;
use std::path::PathBuf;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::FitError;

/// Non-seasonal ARIMA order (p, d, q).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Order {
    /// Autoregressive order.
    pub p: usize,
    /// Differencing order.
    pub d: usize,
    /// Moving-average order.
    pub q: usize,
}

impl Order {
    pub fn new(p: usize, d: usize, q: usize) -> Self {
        Self { p, d, q }
    }
}

impl fmt::Display for Order {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.p, self.d, self.q)
    }
}

/// Seasonal ARIMA order (P, D, Q, s).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SeasonalOrder {
    /// Seasonal autoregressive order.
    pub p: usize,
    /// Seasonal differencing order.
    pub d: usize,
    /// Seasonal moving-average order.
    pub q: usize,
    /// Seasonal period (observations per cycle, e.g. 12 for monthly data).
    pub s: usize,
}

impl SeasonalOrder {
    pub fn new(p: usize, d: usize, q: usize, s: usize) -> Self {
        Self { p, d, q, s }
    }
}

impl fmt::Display for SeasonalOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {}, {})", self.p, self.d, self.q, self.s)
    }
}

/// One row of the result table: a candidate that fit successfully,
/// with its two scores.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Evaluation {
    pub order: Order,
    pub seasonal_order: SeasonalOrder,
    /// Root mean squared error of the held-out forecast.
    pub rmse: f64,
    /// Bayesian information criterion of the fit on the training segment.
    pub bic: f64,
}

/// A candidate the engine rejected, with the reason it was dropped.
///
/// Kept alongside the result table so a caller can tell "81/81 converged"
/// apart from "1/81 converged" without changing the best-effort policy.
#[derive(Debug, Clone, PartialEq)]
pub struct SkippedCandidate {
    pub order: Order,
    pub seasonal_order: SeasonalOrder,
    pub reason: FitError,
}

/// Configuration of a single grid search run.
#[derive(Debug, Clone)]
pub struct SearchConfig {
    /// Non-seasonal differencing order, fixed across the grid.
    pub d: usize,
    /// Seasonal differencing order, fixed across the grid.
    pub seasonal_d: usize,
    /// Seasonal period, fixed across the grid. Must be >= 1.
    pub period: usize,
    /// When true, write the result table and the best-candidate forecast
    /// as CSV files under `output_dir`.
    pub persist: bool,
    /// Directory for persisted artifacts. Created if absent; existing files
    /// are overwritten.
    pub output_dir: PathBuf,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            d: 2,
            seasonal_d: 1,
            period: 12,
            persist: true,
            output_dir: PathBuf::from("outputs"),
        }
    }
}

/// Point forecast for the held-out segment, paired positionally with the
/// actual values and their dates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastBundle {
    pub dates: Vec<NaiveDate>,
    pub actual: Vec<f64>,
    pub forecast: Vec<f64>,
}

impl ForecastBundle {
    pub fn len(&self) -> usize {
        self.forecast.len()
    }

    pub fn is_empty(&self) -> bool {
        self.forecast.is_empty()
    }
}

/// A saved search summary (JSON).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchSummaryFile {
    pub tool: String,
    pub d: usize,
    pub seasonal_d: usize,
    pub period: usize,
    pub n_obs: usize,
    pub n_train: usize,
    pub n_test: usize,
    pub best_by_rmse: Evaluation,
    pub best_by_bic: Evaluation,
    pub table: Vec<Evaluation>,
}
