//! crates/session_report_core/src/normalize.rs
//!
//! Converts raw sheet rows into fixed-shape report records.

use crate::domain::SessionReportRow;

/// Fixed column count of the report tab (columns A through AE).
pub const COLUMN_COUNT: usize = 31;

/// 1-indexed first data row: row 1 is run metadata, row 2 is headers.
pub const FIRST_DATA_ROW: usize = 3;

/// Maps one raw row to a report record by fixed column index.
///
/// Missing trailing cells become empty strings, never an error, and every
/// cell is trimmed of surrounding whitespace. The assignment order below is
/// the column mapping; it must stay in sheet order.
pub fn normalize(raw: &[String]) -> SessionReportRow {
    let cell = |i: usize| raw.get(i).map(|c| c.trim().to_string()).unwrap_or_default();
    SessionReportRow {
        report_run_date: cell(0),
        run_attempt: cell(1),
        appointment_key: cell(2),
        provider_name: cell(3),
        patient_name: cell(4),
        date_of_session: cell(5),
        patient_initials: cell(6),
        patient_state: cell(7),
        timecard_cpt_format: cell(8),
        timecard_appt_type: cell(9),
        missing_notes_audit_status: cell(10),
        missing_notes_url: cell(11),
        provider_no_show_attestation: cell(12),
        no_show_late_cancellation_action: cell(13),
        patient_name_dup: cell(14),
        dob: cell(15),
        cpt_code_1: cell(16),
        cpt_code_2: cell(17),
        icd10_codes: cell(18),
        appt_type: cell(19),
        start_time: cell(20),
        therapy_time: cell(21),
        duration: cell(22),
        final_row_flag: cell(23),
        insurance: cell(24),
        where_to_bill: cell(25),
        auto_where_to_bill: cell(26),
        billed: cell(27),
        dns_reason: cell(28),
        note_link: cell(29),
        note: cell(30),
    }
}

/// True when every cell is empty or whitespace-only after trimming.
pub fn is_blank(raw: &[String]) -> bool {
    raw.iter().all(|c| c.trim().is_empty())
}

/// Normalizes a whole tab: skips the metadata and header rows, drops blank
/// rows entirely (they are not represented as empty records), and maps the
/// rest.
pub fn normalize_sheet(raw_rows: &[Vec<String>]) -> Vec<SessionReportRow> {
    raw_rows
        .iter()
        .skip(FIRST_DATA_ROW - 1)
        .filter(|row| !is_blank(row))
        .map(|row| normalize(row))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cells(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn short_row_pads_missing_cells_with_empty_strings() {
        let row = normalize(&cells(&["2024-01-01", "1", "APPT-1", "Dr. Smith", "Jane Doe"]));
        assert_eq!(row.provider_name, "Dr. Smith");
        assert_eq!(row.patient_name, "Jane Doe");
        assert_eq!(row.date_of_session, "");
        assert_eq!(row.note, "");
    }

    #[test]
    fn empty_row_normalizes_without_fault() {
        let row = normalize(&[]);
        assert_eq!(row, SessionReportRow::default());
    }

    #[test]
    fn cells_are_trimmed() {
        let row = normalize(&cells(&["  2024-01-01 ", "\t1", " APPT-1  "]));
        assert_eq!(row.report_run_date, "2024-01-01");
        assert_eq!(row.run_attempt, "1");
        assert_eq!(row.appointment_key, "APPT-1");
    }

    #[test]
    fn column_mapping_is_positionally_stable() {
        let raw: Vec<String> = (0..COLUMN_COUNT).map(|i| format!("c{i}")).collect();
        let row = normalize(&raw);
        assert_eq!(row.report_run_date, "c0");
        assert_eq!(row.provider_name, "c3");
        assert_eq!(row.appt_type, "c19");
        assert_eq!(row.final_row_flag, "c23");
        assert_eq!(row.insurance, "c24");
        assert_eq!(row.note, "c30");
    }

    #[test]
    fn sheet_skips_metadata_and_header_rows() {
        let raw = vec![
            cells(&["run meta"]),
            cells(&["Report Run Date", "Run Attempt"]),
            cells(&["2024-01-01", "1", "APPT-1"]),
            cells(&["2024-01-02", "1", "APPT-2"]),
        ];
        let rows = normalize_sheet(&raw);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].appointment_key, "APPT-1");
        assert_eq!(rows[1].appointment_key, "APPT-2");
    }

    #[test]
    fn sheet_drops_blank_rows_instead_of_normalizing_them() {
        let raw = vec![
            cells(&["meta"]),
            cells(&["headers"]),
            cells(&["2024-01-01", "1"]),
            cells(&["", "  ", "\t"]),
            Vec::new(),
            cells(&["2024-01-02", "2"]),
        ];
        let rows = normalize_sheet(&raw);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1].report_run_date, "2024-01-02");
    }
}
