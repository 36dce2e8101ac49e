//! Differencing and its inversion.
//!
//! The engine estimates on the differenced scale and forecasts on the
//! original scale, so differencing has to be invertible. We keep every
//! intermediate stage rather than recomputing it: inversion walks the
//! stages in reverse, and each stage supplies the history its inversion
//! needs (the last value for a regular difference, the last `s` values for
//! a seasonal one).

use crate::error::FitError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DiffOp {
    Regular,
    Seasonal(usize),
}

/// The full differencing pipeline applied to one training segment.
///
/// Regular differences are applied first, then seasonal ones. The operators
/// commute algebraically; fixing the order keeps inversion deterministic.
#[derive(Debug, Clone)]
pub struct DifferenceStack {
    ops: Vec<DiffOp>,
    /// `stages[i]` is the series before `ops[i]`; the final element is the
    /// fully differenced series.
    stages: Vec<Vec<f64>>,
}

impl DifferenceStack {
    /// Difference `series` `d` times regularly, then `seasonal_d` times with
    /// the given period.
    pub fn new(
        series: &[f64],
        d: usize,
        seasonal_d: usize,
        period: usize,
    ) -> Result<Self, FitError> {
        let mut ops = Vec::with_capacity(d + seasonal_d);
        let mut stages = vec![series.to_vec()];

        for _ in 0..d {
            let prev = stages.last().map(Vec::as_slice).unwrap_or_default();
            if prev.len() < 2 {
                return Err(FitError::InsufficientData {
                    needed: 2,
                    got: prev.len(),
                });
            }
            stages.push(prev.windows(2).map(|w| w[1] - w[0]).collect());
            ops.push(DiffOp::Regular);
        }

        for _ in 0..seasonal_d {
            let prev = stages.last().map(Vec::as_slice).unwrap_or_default();
            if prev.len() < period + 1 {
                return Err(FitError::InsufficientData {
                    needed: period + 1,
                    got: prev.len(),
                });
            }
            stages.push(
                prev.iter()
                    .skip(period)
                    .zip(prev.iter())
                    .map(|(curr, lagged)| curr - lagged)
                    .collect(),
            );
            ops.push(DiffOp::Seasonal(period));
        }

        Ok(Self { ops, stages })
    }

    /// The fully differenced series.
    pub fn transformed(&self) -> &[f64] {
        self.stages.last().map(Vec::as_slice).unwrap_or_default()
    }

    /// Map future values on the differenced scale back to the original scale.
    ///
    /// `future` must be a direct continuation of [`transformed`]; the result
    /// is the corresponding continuation of the original series.
    ///
    /// [`transformed`]: DifferenceStack::transformed
    pub fn invert(&self, future: &[f64]) -> Vec<f64> {
        let mut values = future.to_vec();

        for (idx, op) in self.ops.iter().enumerate().rev() {
            // History at the level this op produced its output from.
            let history = &self.stages[idx];
            match op {
                DiffOp::Regular => {
                    let mut level = *history.last().unwrap_or(&0.0);
                    for v in &mut values {
                        level += *v;
                        *v = level;
                    }
                }
                DiffOp::Seasonal(period) => {
                    let n = history.len();
                    let mut out = Vec::with_capacity(values.len());
                    for (h, &dv) in values.iter().enumerate() {
                        // Construction guarantees n >= period + 1.
                        let base = if h < *period {
                            history[n - period + h]
                        } else {
                            out[h - period]
                        };
                        out.push(dv + base);
                    }
                    values = out;
                }
            }
        }

        values
    }
}
