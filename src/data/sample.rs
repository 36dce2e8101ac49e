//! Synthetic monthly series generation.
//!
//! Used by tests and as the quickest way to try the search end to end:
//! a linear trend plus an annual sine cycle plus seeded Gaussian noise.
//! Deterministic for a given configuration (no ambient RNG).

use chrono::{Months, NaiveDate};
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand_distr::{Distribution, Normal};

use crate::domain::Series;
use crate::error::SearchError;

/// Shape of the generated series.
#[derive(Debug, Clone)]
pub struct SampleConfig {
    /// Number of monthly observations.
    pub months: usize,
    /// Date of the first observation; subsequent points advance by one month.
    pub start: NaiveDate,
    /// Constant level.
    pub level: f64,
    /// Linear trend per month.
    pub trend: f64,
    /// Amplitude of the annual cycle.
    pub seasonal_amplitude: f64,
    /// Standard deviation of the additive noise. Zero disables noise.
    pub noise_sigma: f64,
    /// RNG seed; equal seeds give equal series.
    pub seed: u64,
}

impl Default for SampleConfig {
    fn default() -> Self {
        Self {
            months: 48,
            start: NaiveDate::from_ymd_opt(2020, 1, 1).expect("fixed valid calendar date"),
            level: 120.0,
            trend: 1.5,
            seasonal_amplitude: 18.0,
            noise_sigma: 2.0,
            seed: 7,
        }
    }
}

/// Generate a monthly series per `config`.
pub fn generate_monthly_series(config: &SampleConfig) -> Result<Series, SearchError> {
    if config.months == 0 {
        return Err(SearchError::InvalidParameter(
            "sample must contain at least one month".to_string(),
        ));
    }
    if !(config.noise_sigma.is_finite() && config.noise_sigma >= 0.0) {
        return Err(SearchError::InvalidParameter(
            "noise sigma must be finite and non-negative".to_string(),
        ));
    }

    let mut rng = StdRng::seed_from_u64(config.seed);
    let normal = Normal::new(0.0, config.noise_sigma)
        .map_err(|e| SearchError::InvalidParameter(format!("noise distribution: {e}")))?;

    let mut dates = Vec::with_capacity(config.months);
    let mut values = Vec::with_capacity(config.months);

    for i in 0..config.months {
        let date = config
            .start
            .checked_add_months(Months::new(i as u32))
            .ok_or_else(|| {
                SearchError::InvalidParameter("sample dates exceed the calendar range".to_string())
            })?;

        let t = i as f64;
        let cycle = (std::f64::consts::TAU * t / 12.0).sin();
        let value =
            config.level + config.trend * t + config.seasonal_amplitude * cycle
                + normal.sample(&mut rng);

        dates.push(date);
        values.push(value);
    }

    Series::new(dates, values)
}
