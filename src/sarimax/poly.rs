//! Lag-polynomial algebra for the multiplicative seasonal form.
//!
//! A SARIMA candidate is defined by four short polynomials in the lag
//! operator `L`:
//!
//! ```text
//! phi(L) Phi(L^s) w_t = theta(L) Theta(L^s) e_t
//! ```
//!
//! The CSS recursion works on the *reduced* form, i.e. the products
//! `phi(L) * Phi(L^s)` and `theta(L) * Theta(L^s)` expanded into plain
//! coefficient vectors indexed by lag.

/// Polynomial product (convolution of coefficient vectors).
pub fn polymul(a: &[f64], b: &[f64]) -> Vec<f64> {
    if a.is_empty() || b.is_empty() {
        return vec![];
    }
    let mut out = vec![0.0; a.len() + b.len() - 1];
    for (i, &ai) in a.iter().enumerate() {
        for (j, &bj) in b.iter().enumerate() {
            out[i + j] += ai * bj;
        }
    }
    out
}

/// Autoregressive polynomial `1 - phi_1 L - ... - phi_p L^p`.
pub fn ar_polynomial(coeffs: &[f64]) -> Vec<f64> {
    let mut poly = Vec::with_capacity(coeffs.len() + 1);
    poly.push(1.0);
    poly.extend(coeffs.iter().map(|&c| -c));
    poly
}

/// Moving-average polynomial `1 + theta_1 L + ... + theta_q L^q`.
pub fn ma_polynomial(coeffs: &[f64]) -> Vec<f64> {
    let mut poly = Vec::with_capacity(coeffs.len() + 1);
    poly.push(1.0);
    poly.extend_from_slice(coeffs);
    poly
}

/// Seasonal AR polynomial `1 - Phi_1 L^s - ... - Phi_P L^(Ps)`.
pub fn seasonal_ar_polynomial(coeffs: &[f64], period: usize) -> Vec<f64> {
    seasonal_polynomial(coeffs, period, -1.0)
}

/// Seasonal MA polynomial `1 + Theta_1 L^s + ... + Theta_Q L^(Qs)`.
pub fn seasonal_ma_polynomial(coeffs: &[f64], period: usize) -> Vec<f64> {
    seasonal_polynomial(coeffs, period, 1.0)
}

fn seasonal_polynomial(coeffs: &[f64], period: usize, sign: f64) -> Vec<f64> {
    if coeffs.is_empty() {
        return vec![1.0];
    }
    let mut poly = vec![0.0; coeffs.len() * period + 1];
    poly[0] = 1.0;
    for (i, &c) in coeffs.iter().enumerate() {
        poly[(i + 1) * period] = sign * c;
    }
    poly
}

/// Expanded AR side: `ar_polynomial(ar) * seasonal_ar_polynomial(sar, s)`.
pub fn reduced_ar(ar: &[f64], sar: &[f64], period: usize) -> Vec<f64> {
    polymul(&ar_polynomial(ar), &seasonal_ar_polynomial(sar, period))
}

/// Expanded MA side: `ma_polynomial(ma) * seasonal_ma_polynomial(sma, s)`.
pub fn reduced_ma(ma: &[f64], sma: &[f64], period: usize) -> Vec<f64> {
    polymul(&ma_polynomial(ma), &seasonal_ma_polynomial(sma, period))
}
