//! Formatted run summaries.
//!
//! We keep formatting code in one place so:
//! - the sweep and engine code stays clean and testable
//! - output changes are localized (important for future snapshot tests)

use crate::domain::{Evaluation, SearchConfig};
use crate::search::GridSearch;

/// Rows shown in the per-candidate table.
const TOP_N: usize = 5;

/// Format the full run summary (split sizes + candidate table + selections).
pub fn format_search_summary<M>(search: &GridSearch<M>, config: &SearchConfig) -> String {
    let mut out = String::new();

    out.push_str("=== sarimax-screen - SARIMAX grid search ===\n");
    out.push_str(&format!(
        "Grid: p,q,P,Q in 0..=2 | d={} D={} s={}\n",
        config.d, config.seasonal_d, config.period
    ));
    out.push_str(&format!(
        "Split: n={} -> train={} test={}\n",
        search.train.len() + search.test.len(),
        search.train.len(),
        search.test.len()
    ));
    out.push_str(&format!(
        "Candidates: {} fitted, {} skipped\n",
        search.table.len(),
        search.skipped.len()
    ));

    out.push_str(&format!("\nTop {} by RMSE:\n", TOP_N.min(search.table.len())));
    out.push_str(&format_table(&top_by_rmse(&search.table, TOP_N)));

    out.push_str("\nBest by RMSE:\n");
    out.push_str(&format_selection(&search.best_by_rmse));
    out.push_str("Best by BIC:\n");
    out.push_str(&format_selection(&search.best_by_bic));

    out
}

fn top_by_rmse(table: &[Evaluation], n: usize) -> Vec<Evaluation> {
    let mut sorted = table.to_vec();
    sorted.sort_by(|a, b| a.rmse.partial_cmp(&b.rmse).unwrap_or(std::cmp::Ordering::Equal));
    sorted.truncate(n);
    sorted
}

fn format_table(rows: &[Evaluation]) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "{:<12} {:<16} {:>12} {:>12}\n",
        "order", "seasonal", "rmse", "bic"
    ));
    out.push_str(&format!("{:-<12} {:-<16} {:-<12} {:-<12}\n", "", "", "", ""));
    for row in rows {
        out.push_str(&format!(
            "{:<12} {:<16} {:>12.4} {:>12.3}\n",
            row.order.to_string(),
            row.seasonal_order.to_string(),
            row.rmse,
            row.bic
        ));
    }
    out
}

fn format_selection(row: &Evaluation) -> String {
    format!(
        "- {} x {} | rmse={:.4} bic={:.3}\n",
        row.order, row.seasonal_order, row.rmse, row.bic
    )
}
