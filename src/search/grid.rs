//! Candidate grid enumeration.
//!
//! The sweep explores every combination of small AR/MA orders on both the
//! non-seasonal and seasonal side while the differencing orders and the
//! period stay fixed. A deterministic enumeration order matters: tie-breaks
//! during selection go to the first row, so the grid must always be produced
//! in the same sequence.

use crate::domain::{Order, SeasonalOrder};

/// Upper bound (inclusive) for p, q, P and Q.
pub const MAX_ORDER: usize = 2;

/// Number of candidates: (MAX_ORDER + 1)^4.
pub const GRID_SIZE: usize = 81;

/// Enumerate all candidates for fixed `d`, `seasonal_d` and `period`.
///
/// Ordering: non-seasonal loop outer (p outer, q inner), seasonal loop inner
/// (P outer, Q inner), so the seasonal order varies fastest.
pub fn candidate_grid(d: usize, seasonal_d: usize, period: usize) -> Vec<(Order, SeasonalOrder)> {
    let mut grid = Vec::with_capacity(GRID_SIZE);
    for p in 0..=MAX_ORDER {
        for q in 0..=MAX_ORDER {
            for sp in 0..=MAX_ORDER {
                for sq in 0..=MAX_ORDER {
                    grid.push((
                        Order::new(p, d, q),
                        SeasonalOrder::new(sp, seasonal_d, sq, period),
                    ));
                }
            }
        }
    }
    grid
}
