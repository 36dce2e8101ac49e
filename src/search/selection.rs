//! The sweep itself: fit every candidate, keep what converged, pick the two
//! winners, refit, and optionally persist.
//!
//! Selection rules:
//!
//! 1. Every fitting failure drops its candidate; the reason is kept in a
//!    diagnostics list but never aborts the sweep.
//! 2. The RMSE-best and BIC-best rows are chosen independently by a stable
//!    minimum (ties go to the earlier row in evaluation order).
//! 3. The RMSE-best candidate is refit on the training segment and drives
//!    the returned forecast, whether or not files are written.

use std::fs;

use crate::domain::{
    Evaluation, ForecastBundle, Order, SearchConfig, SeasonalOrder, Series, SkippedCandidate,
};
use crate::error::{FitError, SearchError};
use crate::io::export::{FORECAST_FILE, GRID_RESULTS_FILE, write_forecast_csv, write_grid_results_csv};
use crate::metrics::rmse;
use crate::sarimax::{CssSarimax, FittedModel, FittedSarimax, FittingEngine};
use crate::search::grid::candidate_grid;
use crate::search::split::split_train_test;

/// Everything a single run produces.
#[derive(Debug, Clone)]
pub struct GridSearch<M> {
    /// Row with the lowest held-out RMSE.
    pub best_by_rmse: Evaluation,
    /// Row with the lowest BIC.
    pub best_by_bic: Evaluation,
    /// All successful rows, in evaluation order (not sorted).
    pub table: Vec<Evaluation>,
    pub train: Series,
    pub test: Series,
    /// Held-out forecast of the refit RMSE-best candidate.
    pub forecast: ForecastBundle,
    /// The refit RMSE-best model.
    pub model: M,
    /// Candidates the engine rejected, with reasons.
    pub skipped: Vec<SkippedCandidate>,
}

/// Run the sweep with the default CSS engine.
pub fn run_grid_search(
    series: &Series,
    config: &SearchConfig,
) -> Result<GridSearch<FittedSarimax>, SearchError> {
    run_grid_search_with(&CssSarimax::new(), series, config)
}

/// Run the sweep against a caller-supplied fitting backend.
pub fn run_grid_search_with<E: FittingEngine>(
    engine: &E,
    series: &Series,
    config: &SearchConfig,
) -> Result<GridSearch<E::Model>, SearchError> {
    if config.period == 0 {
        return Err(SearchError::InvalidParameter(
            "seasonal period must be >= 1".to_string(),
        ));
    }

    let (train, test) = split_train_test(series)?;
    let grid = candidate_grid(config.d, config.seasonal_d, config.period);

    let mut table = Vec::new();
    let mut skipped = Vec::new();

    // Sequential by design: one blocking fit at a time, appended in grid
    // order so selection tie-breaks stay reproducible.
    for &(order, seasonal) in &grid {
        match evaluate_candidate(engine, train.values(), test.values(), order, seasonal) {
            Ok(row) => table.push(row),
            Err(reason) => skipped.push(SkippedCandidate {
                order,
                seasonal_order: seasonal,
                reason,
            }),
        }
    }

    if table.is_empty() {
        return Err(SearchError::NoCandidateConverged {
            attempted: grid.len(),
        });
    }

    let best_by_rmse = stable_min_by(&table, |row| row.rmse);
    let best_by_bic = stable_min_by(&table, |row| row.bic);

    // Refit the winner and forecast the held-out horizon. This runs for
    // persist=false too, so the returned bundle never depends on the flag.
    let model = engine.fit(
        train.values(),
        best_by_rmse.order,
        best_by_rmse.seasonal_order,
    )?;
    let predictions = model.forecast(test.len())?;
    let forecast = ForecastBundle {
        dates: test.dates().to_vec(),
        actual: test.values().to_vec(),
        forecast: predictions,
    };

    if config.persist {
        fs::create_dir_all(&config.output_dir).map_err(|e| SearchError::Export {
            path: config.output_dir.clone(),
            message: e.to_string(),
        })?;
        write_grid_results_csv(&config.output_dir.join(GRID_RESULTS_FILE), &table)?;
        write_forecast_csv(&config.output_dir.join(FORECAST_FILE), &forecast)?;
    }

    Ok(GridSearch {
        best_by_rmse,
        best_by_bic,
        table,
        train,
        test,
        forecast,
        model,
        skipped,
    })
}

fn evaluate_candidate<E: FittingEngine>(
    engine: &E,
    train_values: &[f64],
    test_values: &[f64],
    order: Order,
    seasonal: SeasonalOrder,
) -> Result<Evaluation, FitError> {
    let fitted = engine.fit(train_values, order, seasonal)?;
    let predictions = fitted.forecast(test_values.len())?;

    let rmse = match rmse(test_values, &predictions) {
        Ok(value) => value,
        Err(_) => {
            return Err(FitError::ForecastLength {
                expected: test_values.len(),
                got: predictions.len(),
            });
        }
    };
    let bic = fitted.bic();

    // A non-finite score can never win a minimum; exclude the row outright
    // rather than letting it poison the comparisons.
    if !(rmse.is_finite() && bic.is_finite()) {
        return Err(FitError::NonFinite);
    }

    Ok(Evaluation {
        order,
        seasonal_order: seasonal,
        rmse,
        bic,
    })
}

/// Minimum by key with first-occurrence tie-breaking.
fn stable_min_by<F: Fn(&Evaluation) -> f64>(table: &[Evaluation], key: F) -> Evaluation {
    let mut best = &table[0];
    for row in &table[1..] {
        if key(row) < key(best) {
            best = row;
        }
    }
    best.clone()
}
