//! Conditional sum-of-squares estimation of one seasonal ARIMA candidate.
//!
//! Estimation steps:
//!
//! 1. difference the training values per the candidate's (d, D, s)
//! 2. seed coefficients from an OLS lag regression (MA terms start at zero)
//! 3. minimize the conditional sum of squared innovations over the expanded
//!    lag polynomials with Nelder-Mead inside a coefficient box
//! 4. score the fit with the Gaussian likelihood implied by the residual
//!    variance: AIC and BIC with `k = p + q + P + Q + 1`
//!
//! The recursion conditions on the first `p + s*P` observations and treats
//! pre-sample innovations as zero, so no state-space machinery is needed.

use nalgebra::{DMatrix, DVector};

use crate::domain::{Order, SeasonalOrder};
use crate::error::FitError;
use crate::math::{minimize, solve_least_squares};
use crate::sarimax::diff::DifferenceStack;
use crate::sarimax::poly::{reduced_ar, reduced_ma};
use crate::sarimax::traits::{FitOptions, FittedModel, FittingEngine};

/// Coefficient box half-width when a constraint is enforced.
const ENFORCED_BOUND: f64 = 0.99;
/// Half-width with the constraint relaxed. Still bounded: an unbounded MA
/// side lets the innovation recursion blow up numerically.
const RELAXED_BOUND: f64 = 1.98;

/// Floor on the residual variance so exact fits keep finite scores.
const VARIANCE_FLOOR: f64 = 1e-12;

/// The CSS fitting engine.
#[derive(Debug, Clone)]
pub struct CssSarimax {
    options: FitOptions,
}

impl CssSarimax {
    pub fn new() -> Self {
        Self {
            options: FitOptions::default(),
        }
    }

    pub fn with_options(options: FitOptions) -> Self {
        Self { options }
    }
}

impl Default for CssSarimax {
    fn default() -> Self {
        Self::new()
    }
}

/// A fitted seasonal ARIMA candidate.
#[derive(Debug, Clone)]
pub struct FittedSarimax {
    order: Order,
    seasonal: SeasonalOrder,
    ar: Vec<f64>,
    ma: Vec<f64>,
    sar: Vec<f64>,
    sma: Vec<f64>,
    sigma2: f64,
    loglike: f64,
    aic: f64,
    bic: f64,
    n_effective: usize,
    converged: bool,
    iterations: usize,
    stack: DifferenceStack,
    residuals: Vec<f64>,
}

impl FittedSarimax {
    pub fn order(&self) -> Order {
        self.order
    }

    pub fn seasonal_order(&self) -> SeasonalOrder {
        self.seasonal
    }

    pub fn ar_coefficients(&self) -> &[f64] {
        &self.ar
    }

    pub fn ma_coefficients(&self) -> &[f64] {
        &self.ma
    }

    pub fn seasonal_ar_coefficients(&self) -> &[f64] {
        &self.sar
    }

    pub fn seasonal_ma_coefficients(&self) -> &[f64] {
        &self.sma
    }

    /// Residual (innovation) variance on the differenced scale.
    pub fn sigma2(&self) -> f64 {
        self.sigma2
    }

    pub fn loglike(&self) -> f64 {
        self.loglike
    }

    pub fn aic(&self) -> f64 {
        self.aic
    }

    /// Observations that actually entered the objective.
    pub fn n_effective(&self) -> usize {
        self.n_effective
    }

    /// Whether the optimizer met its tolerance. Non-convergence is reported,
    /// not treated as a fitting failure.
    pub fn converged(&self) -> bool {
        self.converged
    }

    pub fn iterations(&self) -> usize {
        self.iterations
    }
}

impl FittedModel for FittedSarimax {
    fn forecast(&self, steps: usize) -> Result<Vec<f64>, FitError> {
        if steps == 0 {
            return Ok(vec![]);
        }

        let c = reduced_ar(&self.ar, &self.sar, self.seasonal.s);
        let m = reduced_ma(&self.ma, &self.sma, self.seasonal.s);

        let w = self.stack.transformed();
        let n = w.len();
        let mut values = w.to_vec();
        let mut innovations = self.residuals.clone();

        // Future innovations are zero, so each step is the deterministic part
        // of the recursion on the differenced scale.
        for _ in 0..steps {
            let t = values.len();
            let mut next = 0.0;
            for (i, &ci) in c.iter().enumerate().skip(1) {
                if t >= i {
                    next -= ci * values[t - i];
                }
            }
            for (j, &mj) in m.iter().enumerate().skip(1) {
                if t >= j {
                    next += mj * innovations[t - j];
                }
            }
            if !next.is_finite() {
                return Err(FitError::NonFinite);
            }
            values.push(next);
            innovations.push(0.0);
        }

        Ok(self.stack.invert(&values[n..]))
    }

    fn bic(&self) -> f64 {
        self.bic
    }
}

impl FittingEngine for CssSarimax {
    type Model = FittedSarimax;

    fn fit(
        &self,
        train: &[f64],
        order: Order,
        seasonal: SeasonalOrder,
    ) -> Result<FittedSarimax, FitError> {
        if seasonal.s == 0 && (seasonal.p > 0 || seasonal.d > 0 || seasonal.q > 0) {
            return Err(FitError::InvalidOrder(
                "seasonal terms require a positive period".to_string(),
            ));
        }

        let stack = DifferenceStack::new(train, order.d, seasonal.d, seasonal.s)?;
        let w = stack.transformed().to_vec();
        if w.iter().any(|v| !v.is_finite()) {
            return Err(FitError::NonFinite);
        }

        let n = w.len();
        let ar_lag = order.p + seasonal.s * seasonal.p;
        let n_coeffs = order.p + order.q + seasonal.p + seasonal.q;
        let needed = ar_lag + n_coeffs + 2;
        if n < needed {
            return Err(FitError::InsufficientData { needed, got: n });
        }

        let (params, converged, iterations) = if n_coeffs == 0 {
            (vec![], true, 0)
        } else {
            let start = start_values(&w, order, seasonal);
            let bounds = coefficient_bounds(order, seasonal, &self.options);
            let objective = |params: &[f64]| {
                let (ar, ma, sar, sma) = split_params(params, order, seasonal);
                let c = reduced_ar(ar, sar, seasonal.s);
                let m = reduced_ma(ma, sma, seasonal.s);
                let (css, _) = css_residuals(&w, &c, &m, ar_lag);
                if css.is_finite() { css } else { f64::MAX }
            };
            let result = minimize(
                objective,
                &start,
                &bounds,
                self.options.max_iter,
                self.options.tolerance,
            );
            (result.point, result.converged, result.iterations)
        };

        let (ar, ma, sar, sma) = split_params(&params, order, seasonal);
        let (ar, ma, sar, sma) = (ar.to_vec(), ma.to_vec(), sar.to_vec(), sma.to_vec());

        let c = reduced_ar(&ar, &sar, seasonal.s);
        let m = reduced_ma(&ma, &sma, seasonal.s);
        let (css, residuals) = css_residuals(&w, &c, &m, ar_lag);
        if !css.is_finite() {
            return Err(FitError::NonFinite);
        }

        let n_effective = n - ar_lag;
        let sigma2 = (css / n_effective as f64).max(VARIANCE_FLOOR);
        let ln_2pi = (2.0 * std::f64::consts::PI).ln();
        let loglike = -0.5 * n_effective as f64 * (ln_2pi + sigma2.ln() + 1.0);
        let k = (n_coeffs + 1) as f64;
        let aic = 2.0 * k - 2.0 * loglike;
        let bic = k * (n_effective as f64).ln() - 2.0 * loglike;
        if !(loglike.is_finite() && aic.is_finite() && bic.is_finite()) {
            return Err(FitError::NonFinite);
        }

        Ok(FittedSarimax {
            order,
            seasonal,
            ar,
            ma,
            sar,
            sma,
            sigma2,
            loglike,
            aic,
            bic,
            n_effective,
            converged,
            iterations,
            stack,
            residuals,
        })
    }
}

/// Parameter layout: `[ar(p) | ma(q) | sar(P) | sma(Q)]`.
fn split_params(
    params: &[f64],
    order: Order,
    seasonal: SeasonalOrder,
) -> (&[f64], &[f64], &[f64], &[f64]) {
    let (ar, rest) = params.split_at(order.p);
    let (ma, rest) = rest.split_at(order.q);
    let (sar, sma) = rest.split_at(seasonal.p);
    (ar, ma, sar, sma)
}

fn coefficient_bounds(
    order: Order,
    seasonal: SeasonalOrder,
    options: &FitOptions,
) -> Vec<(f64, f64)> {
    let ar_bound = if options.enforce_stationarity {
        ENFORCED_BOUND
    } else {
        RELAXED_BOUND
    };
    let ma_bound = if options.enforce_invertibility {
        ENFORCED_BOUND
    } else {
        RELAXED_BOUND
    };

    let mut bounds = Vec::with_capacity(order.p + order.q + seasonal.p + seasonal.q);
    bounds.extend(std::iter::repeat((-ar_bound, ar_bound)).take(order.p));
    bounds.extend(std::iter::repeat((-ma_bound, ma_bound)).take(order.q));
    bounds.extend(std::iter::repeat((-ar_bound, ar_bound)).take(seasonal.p));
    bounds.extend(std::iter::repeat((-ma_bound, ma_bound)).take(seasonal.q));
    bounds
}

/// Innovations of the CSS recursion and their sum of squares.
///
/// `c` and `m` are the expanded AR/MA polynomials (`c[0] == m[0] == 1`);
/// `start` is the conditioning point, normally the AR-side lag depth.
fn css_residuals(w: &[f64], c: &[f64], m: &[f64], start: usize) -> (f64, Vec<f64>) {
    let n = w.len();
    let mut innovations = vec![0.0; n];
    let mut total = 0.0;

    for t in start..n {
        let mut v = 0.0;
        for (i, &ci) in c.iter().enumerate() {
            if t >= i {
                v += ci * w[t - i];
            } else {
                break;
            }
        }
        for (j, &mj) in m.iter().enumerate().skip(1) {
            if t >= j {
                v -= mj * innovations[t - j];
            } else {
                break;
            }
        }
        innovations[t] = v;
        total += v * v;
    }

    (total, innovations)
}

/// Optimizer start point: AR-side coefficients from an OLS regression of the
/// differenced series on its own lags, MA-side coefficients at zero.
fn start_values(w: &[f64], order: Order, seasonal: SeasonalOrder) -> Vec<f64> {
    let n_coeffs = order.p + order.q + seasonal.p + seasonal.q;
    let mut params = vec![0.0; n_coeffs];

    let lags: Vec<usize> = (1..=order.p)
        .chain((1..=seasonal.p).map(|j| j * seasonal.s))
        .collect();
    if lags.is_empty() {
        // Pure MA candidate: a neutral start is fine.
        return params;
    }

    let max_lag = lags.iter().copied().max().unwrap_or(0);
    let rows = w.len().saturating_sub(max_lag);
    if rows < lags.len() + 1 {
        return default_ar_start(params, order, seasonal);
    }

    let mut x = DMatrix::<f64>::zeros(rows, lags.len());
    let mut y = DVector::<f64>::zeros(rows);
    for t in max_lag..w.len() {
        let row = t - max_lag;
        y[row] = w[t];
        for (col, &lag) in lags.iter().enumerate() {
            x[(row, col)] = w[t - lag];
        }
    }

    match solve_least_squares(&x, &y) {
        Some(beta) => {
            for i in 0..order.p {
                params[i] = clamp_start(beta[i]);
            }
            for j in 0..seasonal.p {
                params[order.p + order.q + j] = clamp_start(beta[order.p + j]);
            }
            params
        }
        None => default_ar_start(params, order, seasonal),
    }
}

fn default_ar_start(mut params: Vec<f64>, order: Order, seasonal: SeasonalOrder) -> Vec<f64> {
    for i in 0..order.p {
        params[i] = 0.1 / (i + 1) as f64;
    }
    for j in 0..seasonal.p {
        params[order.p + order.q + j] = 0.1 / (j + 1) as f64;
    }
    params
}

/// Keep regression-derived starts finite and off the box boundary.
fn clamp_start(value: f64) -> f64 {
    if value.is_finite() { value.clamp(-0.9, 0.9) } else { 0.0 }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn trend_seasonal_series(n: usize) -> Vec<f64> {
        let pattern = [4.0, -2.0, 7.0, -9.0];
        (0..n)
            .map(|i| 20.0 + 1.5 * i as f64 + pattern[i % 4])
            .collect()
    }

    #[test]
    fn pure_differencing_candidate_forecasts_deterministic_pattern_exactly() {
        // Trend plus quarterly cycle is annihilated by (1-B)(1-B^4), so the
        // forecast must reproduce the continuation exactly.
        let full = trend_seasonal_series(30);
        let (train, tail) = full.split_at(24);

        let engine = CssSarimax::new();
        let fitted = engine
            .fit(train, Order::new(0, 1, 0), SeasonalOrder::new(0, 1, 0, 4))
            .unwrap();

        let forecast = fitted.forecast(tail.len()).unwrap();
        assert_eq!(forecast.len(), tail.len());
        for (predicted, expected) in forecast.iter().zip(tail) {
            assert_relative_eq!(*predicted, *expected, epsilon = 1e-8);
        }
        assert!(fitted.sigma2() <= 1e-10);
    }

    #[test]
    fn ar1_coefficient_is_recovered_approximately() {
        let mut values = vec![10.0];
        for i in 1..120 {
            values.push(0.7 * values[i - 1] + (i as f64 * 0.37).sin());
        }

        let engine = CssSarimax::new();
        let fitted = engine
            .fit(&values, Order::new(1, 0, 0), SeasonalOrder::new(0, 0, 0, 12))
            .unwrap();

        let phi = fitted.ar_coefficients()[0];
        assert!(phi > 0.4 && phi < 0.95, "phi={phi}");
        assert!(fitted.bic().is_finite());
    }

    #[test]
    fn white_noise_candidate_forecasts_zero() {
        let values: Vec<f64> = (0..40).map(|i| (i as f64 * 0.7).sin() * 2.0).collect();

        let engine = CssSarimax::new();
        let fitted = engine
            .fit(&values, Order::new(0, 0, 0), SeasonalOrder::new(0, 0, 0, 12))
            .unwrap();

        let forecast = fitted.forecast(5).unwrap();
        assert_eq!(forecast, vec![0.0; 5]);
        assert!(fitted.converged());
    }

    #[test]
    fn bic_exceeds_aic_once_the_sample_is_moderately_large() {
        // bic - aic = k (ln n_eff - 2), positive for n_eff >= 8.
        let values: Vec<f64> = (0..60).map(|i| (i as f64 * 0.9).sin()).collect();

        let engine = CssSarimax::new();
        let fitted = engine
            .fit(&values, Order::new(1, 0, 1), SeasonalOrder::new(0, 0, 0, 12))
            .unwrap();

        assert!(fitted.bic() > fitted.aic());
        assert_eq!(fitted.n_effective(), 59);
    }

    #[test]
    fn insufficient_data_is_reported_per_candidate() {
        let values: Vec<f64> = (0..20).map(|i| i as f64).collect();

        let engine = CssSarimax::new();
        let err = engine
            .fit(
                &values,
                Order::new(2, 2, 2),
                SeasonalOrder::new(2, 1, 2, 12),
            )
            .unwrap_err();

        assert!(matches!(err, FitError::InsufficientData { .. }));
    }

    #[test]
    fn seasonal_terms_without_a_period_are_rejected() {
        let values: Vec<f64> = (0..30).map(|i| i as f64).collect();

        let engine = CssSarimax::new();
        let err = engine
            .fit(&values, Order::new(1, 0, 0), SeasonalOrder::new(1, 0, 0, 0))
            .unwrap_err();

        assert!(matches!(err, FitError::InvalidOrder(_)));
    }

    #[test]
    fn enforced_stationarity_keeps_coefficients_inside_the_unit_box() {
        // A pure trend pushes the unconstrained AR(1) coefficient past one.
        let values: Vec<f64> = (0..40).map(|i| 1.0 + i as f64).collect();

        let engine = CssSarimax::with_options(FitOptions {
            enforce_stationarity: true,
            ..FitOptions::default()
        });
        let fitted = engine
            .fit(&values, Order::new(1, 0, 0), SeasonalOrder::new(0, 0, 0, 12))
            .unwrap();

        assert!(fitted.ar_coefficients()[0].abs() <= 0.99 + 1e-9);
    }

    #[test]
    fn forecast_returns_exactly_the_requested_horizon() {
        let values = trend_seasonal_series(30);

        let engine = CssSarimax::new();
        let fitted = engine
            .fit(&values, Order::new(1, 1, 0), SeasonalOrder::new(0, 1, 0, 4))
            .unwrap();

        assert_eq!(fitted.forecast(0).unwrap().len(), 0);
        assert_eq!(fitted.forecast(7).unwrap().len(), 7);
    }

    #[test]
    fn non_finite_training_values_are_rejected() {
        let mut values = trend_seasonal_series(30);
        values[10] = f64::NAN;

        let engine = CssSarimax::new();
        let err = engine
            .fit(&values, Order::new(0, 1, 0), SeasonalOrder::new(0, 1, 0, 4))
            .unwrap_err();

        assert_eq!(err, FitError::NonFinite);
    }
}
