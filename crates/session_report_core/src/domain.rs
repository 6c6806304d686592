//! crates/session_report_core/src/domain.rs
//!
//! Defines the pure, core data structures for the application.
//! These structs are independent of any transport or storage format.

use serde::{Deserialize, Serialize};

/// One tenant's login record from the shared configuration sheet.
///
/// The credential store discards rows whose `email`, `sheet_id`, or
/// `tab_name` are empty after trimming, so consumers never see them.
#[derive(Debug, Clone)]
pub struct TenantCredential {
    pub email: String,
    pub password: String,
    pub sheet_id: String,
    pub tab_name: String,
    pub display_name: Option<String>,
}

/// The contents of a signed session token.
///
/// Created once at login and never mutated; the server keeps no copy, so
/// everything a request handler needs (identity + dataset routing) must be
/// reconstructible from the token alone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionPayload {
    pub email: String,
    pub sheet_id: String,
    pub tab_name: String,
    pub display_name: Option<String>,
    /// Unix epoch milliseconds at signing time.
    pub issued_at: i64,
}

/// One report row, in sheet column order.
///
/// Field order here is the index-to-field mapping for raw rows: reordering
/// fields is a breaking change. Every field is always present; missing
/// source cells become empty strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionReportRow {
    pub report_run_date: String,
    pub run_attempt: String,
    pub appointment_key: String,
    pub provider_name: String,
    pub patient_name: String,
    pub date_of_session: String,
    pub patient_initials: String,
    pub patient_state: String,
    pub timecard_cpt_format: String,
    pub timecard_appt_type: String,
    pub missing_notes_audit_status: String,
    pub missing_notes_url: String,
    pub provider_no_show_attestation: String,
    pub no_show_late_cancellation_action: String,
    pub patient_name_dup: String,
    pub dob: String,
    pub cpt_code_1: String,
    pub cpt_code_2: String,
    pub icd10_codes: String,
    pub appt_type: String,
    pub start_time: String,
    pub therapy_time: String,
    pub duration: String,
    pub final_row_flag: String,
    pub insurance: String,
    pub where_to_bill: String,
    pub auto_where_to_bill: String,
    pub billed: String,
    pub dns_reason: String,
    pub note_link: String,
    pub note: String,
}

/// User-selected filter criteria plus the pagination cursor.
///
/// Owned by the presentation layer and passed by reference into the filter
/// engine; each criterion is independent and unset criteria match all rows.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterState {
    /// Free-text search over provider, patient, appointment key, insurance, note.
    pub search: Option<String>,
    pub insurance: Option<String>,
    pub where_to_bill: Option<String>,
    pub auto_where_to_bill: Option<String>,
    pub billed: Option<String>,
    pub dns_reason: Option<String>,
    pub duration: Option<String>,
    pub appt_type: Option<String>,
    /// When set, only rows whose final-row flag equals "true" (any case) match.
    pub final_only: bool,
    /// 1-indexed; clamped against the matched count by the filter engine.
    pub page: usize,
    pub page_size: usize,
}

impl Default for FilterState {
    fn default() -> Self {
        Self {
            search: None,
            insurance: None,
            where_to_bill: None,
            auto_where_to_bill: None,
            billed: None,
            dns_reason: None,
            duration: None,
            appt_type: None,
            final_only: false,
            page: 1,
            page_size: 25,
        }
    }
}

/// Pass-through result of firing the automation webhook.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TriggerOutcome {
    pub ok: bool,
    pub status: u16,
    pub body: String,
}
