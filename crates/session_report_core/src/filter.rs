//! crates/session_report_core/src/filter.rs
//!
//! Composes independent per-row predicates over the normalized record set
//! and paginates the result. Every criterion is ANDed, so the matched set is
//! invariant to evaluation order.

use crate::domain::{FilterState, SessionReportRow};

/// The matched set plus the requested page window of it.
#[derive(Debug, Clone)]
pub struct FilterOutcome {
    pub matched: Vec<SessionReportRow>,
    pub page_rows: Vec<SessionReportRow>,
    /// Effective page after clamping, 1-indexed.
    pub current_page: usize,
    pub total_pages: usize,
}

/// Evaluates all set criteria against one row.
pub fn row_matches(row: &SessionReportRow, state: &FilterState) -> bool {
    if let Some(q) = state.search.as_deref() {
        let q = q.trim().to_lowercase();
        if !q.is_empty() {
            let hit = [
                &row.provider_name,
                &row.patient_name,
                &row.appointment_key,
                &row.insurance,
                &row.note,
            ]
            .iter()
            .any(|field| field.to_lowercase().contains(&q));
            if !hit {
                return false;
            }
        }
    }

    let wants = |filter: &Option<String>, value: &str| match filter.as_deref() {
        Some(f) if !f.is_empty() => f == value,
        _ => true,
    };

    wants(&state.insurance, &row.insurance)
        && wants(&state.where_to_bill, &row.where_to_bill)
        && wants(&state.auto_where_to_bill, &row.auto_where_to_bill)
        && wants(&state.billed, &row.billed)
        && wants(&state.dns_reason, &row.dns_reason)
        && wants(&state.duration, &row.duration)
        && wants(&state.appt_type, &row.appt_type)
        && (!state.final_only || row.final_row_flag.eq_ignore_ascii_case("true"))
}

/// Filters `rows` by `state` and slices out the requested page.
///
/// The page window is `[(page-1)*size, page*size)` over the matched
/// sequence, with the effective page clamped into `1..=total_pages` so an
/// out-of-range cursor never produces an out-of-range slice.
pub fn apply(rows: &[SessionReportRow], state: &FilterState) -> FilterOutcome {
    let matched: Vec<SessionReportRow> = rows
        .iter()
        .filter(|row| row_matches(row, state))
        .cloned()
        .collect();

    let page_size = state.page_size.max(1);
    let total_pages = matched.len().div_ceil(page_size).max(1);
    let current_page = state.page.clamp(1, total_pages);
    let start = (current_page - 1) * page_size;
    let page_rows: Vec<SessionReportRow> =
        matched.iter().skip(start).take(page_size).cloned().collect();

    FilterOutcome {
        matched,
        page_rows,
        current_page,
        total_pages,
    }
}
