//! Input/output helpers.
//!
//! - CSV artifacts written by a persisting run (`export`)
//! - search summary JSON read/write (`summary`)

pub mod export;
pub mod summary;

pub use export::*;
pub use summary::*;
