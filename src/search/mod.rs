//! Grid search orchestration.
//!
//! Responsibilities:
//!
//! - split the input series into train/test segments (`split`)
//! - enumerate the fixed candidate grid (`grid`)
//! - fit and score every candidate sequentially, select the RMSE-best and
//!   BIC-best rows, refit the winner, and optionally persist (`selection`)

pub mod grid;
pub mod selection;
pub mod split;

pub use grid::*;
pub use selection::*;
pub use split::*;
