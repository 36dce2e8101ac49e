//! Numeric building blocks shared by the fitting engine.

pub mod neldermead;
pub mod ols;

pub use neldermead::*;
pub use ols::*;
