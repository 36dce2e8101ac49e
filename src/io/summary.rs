//! Read/write search summary JSON files.
//!
//! The summary is the "portable" representation of a finished run:
//! - the fixed grid parameters (d, D, s)
//! - split sizes
//! - both selections and the full result table
//!
//! The schema is defined by `domain::SearchSummaryFile`. Unlike the CSV
//! artifacts this is written on request, not as part of a persisting run.

use std::fs::File;
use std::path::Path;

use crate::domain::{SearchConfig, SearchSummaryFile};
use crate::error::SearchError;
use crate::search::GridSearch;

/// Name recorded in the `tool` field of every summary this crate writes.
const TOOL_NAME: &str = "sarimax-screen";

/// Build the summary for a finished run.
pub fn build_summary<M>(search: &GridSearch<M>, config: &SearchConfig) -> SearchSummaryFile {
    SearchSummaryFile {
        tool: TOOL_NAME.to_string(),
        d: config.d,
        seasonal_d: config.seasonal_d,
        period: config.period,
        n_obs: search.train.len() + search.test.len(),
        n_train: search.train.len(),
        n_test: search.test.len(),
        best_by_rmse: search.best_by_rmse.clone(),
        best_by_bic: search.best_by_bic.clone(),
        table: search.table.clone(),
    }
}

/// Write a summary JSON file.
pub fn write_summary_json<M>(
    path: &Path,
    search: &GridSearch<M>,
    config: &SearchConfig,
) -> Result<(), SearchError> {
    let file = File::create(path).map_err(|e| SearchError::Export {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    serde_json::to_writer_pretty(file, &build_summary(search, config)).map_err(|e| {
        SearchError::Export {
            path: path.to_path_buf(),
            message: e.to_string(),
        }
    })?;

    Ok(())
}

/// Read a summary JSON file.
pub fn read_summary_json(path: &Path) -> Result<SearchSummaryFile, SearchError> {
    let file = File::open(path).map_err(|e| SearchError::Export {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    serde_json::from_reader(file).map_err(|e| SearchError::Export {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}
