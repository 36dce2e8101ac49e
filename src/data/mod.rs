//! Data sources.
//!
//! Only synthetic generation lives here; real series arrive through
//! `Series::new` from whatever the caller ingests.

pub mod sample;

pub use sample::*;
