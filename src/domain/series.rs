//! The univariate time series the search operates on.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::SearchError;

/// An ordered sequence of (date, value) observations.
///
/// Invariants, enforced at construction:
/// - dates and values have the same length
/// - at least one observation
/// - dates strictly ascending
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Series {
    dates: Vec<NaiveDate>,
    values: Vec<f64>,
}

impl Series {
    /// Build a series, validating the invariants above.
    pub fn new(dates: Vec<NaiveDate>, values: Vec<f64>) -> Result<Self, SearchError> {
        if dates.len() != values.len() {
            return Err(SearchError::DimensionMismatch {
                expected: dates.len(),
                got: values.len(),
            });
        }
        if dates.is_empty() {
            return Err(SearchError::EmptyData);
        }
        if dates.windows(2).any(|w| w[0] >= w[1]) {
            return Err(SearchError::UnorderedDates);
        }
        Ok(Self { dates, values })
    }

    /// Construct from pre-validated parts (slices of an existing series).
    pub(crate) fn from_parts(dates: Vec<NaiveDate>, values: Vec<f64>) -> Self {
        debug_assert_eq!(dates.len(), values.len());
        Self { dates, values }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn monthly_dates(n: usize) -> Vec<NaiveDate> {
        (0..n)
            .map(|i| {
                NaiveDate::from_ymd_opt(2024, 1, 1)
                    .unwrap()
                    .checked_add_months(chrono::Months::new(i as u32))
                    .unwrap()
            })
            .collect()
    }

    #[test]
    fn new_accepts_ordered_input() {
        let series = Series::new(monthly_dates(3), vec![1.0, 2.0, 3.0]).unwrap();
        assert_eq!(series.len(), 3);
        assert_eq!(series.values(), &[1.0, 2.0, 3.0]);
    }

    #[test]
    fn new_rejects_length_mismatch() {
        let err = Series::new(monthly_dates(3), vec![1.0, 2.0]).unwrap_err();
        assert_eq!(err, SearchError::DimensionMismatch { expected: 3, got: 2 });
    }

    #[test]
    fn new_rejects_empty_input() {
        let err = Series::new(vec![], vec![]).unwrap_err();
        assert_eq!(err, SearchError::EmptyData);
    }

    #[test]
    fn new_rejects_unordered_dates() {
        let mut dates = monthly_dates(3);
        dates.swap(0, 2);
        let err = Series::new(dates, vec![1.0, 2.0, 3.0]).unwrap_err();
        assert_eq!(err, SearchError::UnorderedDates);
    }

    #[test]
    fn new_rejects_duplicate_dates() {
        let mut dates = monthly_dates(3);
        dates[2] = dates[1];
        let err = Series::new(dates, vec![1.0, 2.0, 3.0]).unwrap_err();
        assert_eq!(err, SearchError::UnorderedDates);
    }
}
