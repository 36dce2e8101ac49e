//! Positional train/test split.

use crate::domain::Series;
use crate::error::SearchError;

/// Share of observations assigned to the training segment.
pub const TRAIN_FRACTION: f64 = 0.85;

/// Split a series into leading train and trailing test segments.
///
/// The split index is `floor(TRAIN_FRACTION * len)`: truncation, not
/// rounding. Downstream scoring depends on this exact boundary, so the
/// semantics are fixed here rather than left to the caller.
///
/// Fails when either segment would be empty (fewer than two observations).
pub fn split_train_test(series: &Series) -> Result<(Series, Series), SearchError> {
    let n = series.len();
    let split_idx = (n as f64 * TRAIN_FRACTION) as usize;

    if split_idx == 0 || split_idx >= n {
        return Err(SearchError::InsufficientData { needed: 2, got: n });
    }

    let train = Series::from_parts(
        series.dates()[..split_idx].to_vec(),
        series.values()[..split_idx].to_vec(),
    );
    let test = Series::from_parts(
        series.dates()[split_idx..].to_vec(),
        series.values()[split_idx..].to_vec(),
    );

    Ok((train, test))
}
