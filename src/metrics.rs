//! Forecast error metrics.

use crate::error::SearchError;

/// Root mean squared error between paired observations.
///
/// Requires equal, non-zero lengths.
pub fn rmse(actual: &[f64], predicted: &[f64]) -> Result<f64, SearchError> {
    if actual.is_empty() || predicted.is_empty() {
        return Err(SearchError::EmptyData);
    }
    if actual.len() != predicted.len() {
        return Err(SearchError::DimensionMismatch {
            expected: actual.len(),
            got: predicted.len(),
        });
    }

    let n = actual.len() as f64;
    let mse = actual
        .iter()
        .zip(predicted.iter())
        .map(|(a, p)| (a - p) * (a - p))
        .sum::<f64>()
        / n;

    Ok(mse.sqrt())
}
