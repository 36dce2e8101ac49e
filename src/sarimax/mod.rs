//! Seasonal ARIMA fitting engine (conditional sum of squares).
//!
//! Responsibilities:
//!
//! - apply regular and seasonal differencing (`diff`)
//! - expand the multiplicative seasonal lag polynomials (`poly`)
//! - estimate coefficients by minimizing the conditional sum of squares and
//!   score the fit with Gaussian AIC/BIC (`css`)
//! - expose the engine behind the [`FittingEngine`] seam so the sweep can
//!   run against any conforming implementation (`traits`)

pub mod css;
pub mod diff;
pub mod poly;
pub mod traits;

pub use css::*;
pub use diff::*;
pub use poly::*;
pub use traits::*;
