//! CSV artifacts of a persisting run.
//!
//! Two files, written unconditionally (no merge with prior runs):
//!
//! - the full result table, one row per converged candidate
//! - the held-out forecast of the RMSE-best candidate
//!
//! Order tuples contain commas, so those columns are quoted.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::domain::{Evaluation, ForecastBundle};
use crate::error::SearchError;

/// File name of the result table artifact.
pub const GRID_RESULTS_FILE: &str = "sarimax_grid_results.csv";
/// File name of the forecast artifact.
pub const FORECAST_FILE: &str = "forecast_best_rmse.csv";

/// Write the result table, in evaluation order.
pub fn write_grid_results_csv(path: &Path, table: &[Evaluation]) -> Result<(), SearchError> {
    let mut file = File::create(path).map_err(|e| export_error(path, e))?;

    writeln!(file, "order,seasonal_order,rmse,bic").map_err(|e| export_error(path, e))?;
    for row in table {
        writeln!(
            file,
            "\"{}\",\"{}\",{},{}",
            row.order, row.seasonal_order, row.rmse, row.bic
        )
        .map_err(|e| export_error(path, e))?;
    }

    Ok(())
}

/// Write the held-out forecast next to the actual values, keyed by date.
pub fn write_forecast_csv(path: &Path, bundle: &ForecastBundle) -> Result<(), SearchError> {
    let mut file = File::create(path).map_err(|e| export_error(path, e))?;

    writeln!(file, "date,actual,forecast").map_err(|e| export_error(path, e))?;
    for ((date, actual), forecast) in bundle
        .dates
        .iter()
        .zip(bundle.actual.iter())
        .zip(bundle.forecast.iter())
    {
        writeln!(file, "{date},{actual},{forecast}").map_err(|e| export_error(path, e))?;
    }

    Ok(())
}

fn export_error(path: &Path, source: std::io::Error) -> SearchError {
    SearchError::Export {
        path: path.to_path_buf(),
        message: source.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Order, SeasonalOrder};
    use chrono::NaiveDate;
    use std::path::PathBuf;

    fn test_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("sarimax_screen_export_{name}"));
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn grid_results_quote_order_tuples() {
        let table = vec![
            Evaluation {
                order: Order::new(0, 2, 1),
                seasonal_order: SeasonalOrder::new(0, 1, 0, 12),
                rmse: 3.25,
                bic: 110.5,
            },
            Evaluation {
                order: Order::new(1, 2, 0),
                seasonal_order: SeasonalOrder::new(2, 1, 1, 12),
                rmse: 2.0,
                bic: 99.0,
            },
        ];

        let path = test_dir("grid").join(GRID_RESULTS_FILE);
        write_grid_results_csv(&path, &table).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let mut lines = content.lines();
        assert_eq!(lines.next(), Some("order,seasonal_order,rmse,bic"));
        assert_eq!(lines.next(), Some("\"(0, 2, 1)\",\"(0, 1, 0, 12)\",3.25,110.5"));
        assert_eq!(lines.next(), Some("\"(1, 2, 0)\",\"(2, 1, 1, 12)\",2,99"));
        assert_eq!(lines.next(), None);

        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn forecast_rows_pair_dates_with_both_values() {
        let bundle = ForecastBundle {
            dates: vec![
                NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
                NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
            ],
            actual: vec![10.0, 11.5],
            forecast: vec![9.75, 11.0],
        };

        let path = test_dir("forecast").join(FORECAST_FILE);
        write_forecast_csv(&path, &bundle).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let mut lines = content.lines();
        assert_eq!(lines.next(), Some("date,actual,forecast"));
        assert_eq!(lines.next(), Some("2024-05-01,10,9.75"));
        assert_eq!(lines.next(), Some("2024-06-01,11.5,11"));
        assert_eq!(lines.next(), None);

        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn unwritable_path_reports_an_export_error() {
        let path = Path::new("/nonexistent-dir/never/results.csv");
        let err = write_grid_results_csv(path, &[]).unwrap_err();
        assert!(matches!(err, SearchError::Export { .. }));
    }
}
