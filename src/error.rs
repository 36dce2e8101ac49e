//! Error types for the grid search and the fitting engine.
//!
//! Two tiers, matching how failures are actually handled:
//!
//! - [`FitError`]: a single candidate failed to fit. Recoverable; the sweep
//!   drops the candidate and moves on.
//! - [`SearchError`]: the run as a whole cannot produce a result. Fatal;
//!   propagated to the caller.

use std::path::PathBuf;

use thiserror::Error;

/// Per-candidate fitting failure. Recoverable at the sweep level.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FitError {
    /// Not enough observations remain after differencing to estimate the
    /// candidate's parameters.
    #[error("insufficient observations after differencing: need at least {needed}, got {got}")]
    InsufficientData { needed: usize, got: usize },

    /// The candidate's orders are internally inconsistent (e.g. seasonal
    /// terms with a zero period).
    #[error("invalid candidate order: {0}")]
    InvalidOrder(String),

    /// The objective or a derived score became non-finite.
    #[error("estimation produced a non-finite value")]
    NonFinite,

    /// The fitted model returned a forecast of the wrong length.
    #[error("forecast length mismatch: expected {expected}, got {got}")]
    ForecastLength { expected: usize, got: usize },
}

/// Fatal search failure. Propagated to the caller; no partial results.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SearchError {
    /// Empty input where observations were required.
    #[error("empty input series")]
    EmptyData,

    /// Paired inputs of unequal length.
    #[error("dimension mismatch: expected {expected}, got {got}")]
    DimensionMismatch { expected: usize, got: usize },

    /// Series dates must be strictly ascending.
    #[error("series dates must be strictly ascending")]
    UnorderedDates,

    /// The series is too short for the train/test split to leave both
    /// segments non-empty.
    #[error("series too short to split: need at least {needed} observations, got {got}")]
    InsufficientData { needed: usize, got: usize },

    /// Every candidate in the grid failed to fit, so there is no row to
    /// select a minimum from.
    #[error("no candidate converged: all {attempted} grid entries failed to fit")]
    NoCandidateConverged { attempted: usize },

    /// A configuration value is out of range.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// Refitting the selected candidate failed. With a deterministic engine
    /// this indicates an engine bug, not bad data.
    #[error("refit of selected candidate failed: {0}")]
    Refit(#[from] FitError),

    /// Writing or reading a persisted artifact failed.
    #[error("export failed for '{}': {message}", .path.display())]
    Export { path: PathBuf, message: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fit_error_messages_are_descriptive() {
        let err = FitError::InsufficientData { needed: 8, got: 5 };
        assert_eq!(
            err.to_string(),
            "insufficient observations after differencing: need at least 8, got 5"
        );

        let err = FitError::InvalidOrder("seasonal terms require a period".to_string());
        assert_eq!(
            err.to_string(),
            "invalid candidate order: seasonal terms require a period"
        );
    }

    #[test]
    fn search_error_messages_are_descriptive() {
        let err = SearchError::NoCandidateConverged { attempted: 81 };
        assert_eq!(
            err.to_string(),
            "no candidate converged: all 81 grid entries failed to fit"
        );

        let err = SearchError::InsufficientData { needed: 2, got: 1 };
        assert_eq!(
            err.to_string(),
            "series too short to split: need at least 2 observations, got 1"
        );
    }

    #[test]
    fn fit_error_converts_into_search_error() {
        let err: SearchError = FitError::NonFinite.into();
        assert_eq!(err, SearchError::Refit(FitError::NonFinite));
    }
}
