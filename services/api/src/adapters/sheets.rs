//! services/api/src/adapters/sheets.rs
//!
//! This module contains the spreadsheet adapter, which is the concrete
//! implementation of the `CredentialStore` and `ReportStore` ports from the
//! `core` crate. It reads value ranges from the Google Sheets v4 API over
//! `reqwest`; everything past the raw rows (normalization, filtering) lives
//! in the core crate.

use async_trait::async_trait;
use serde::Deserialize;
use session_report_core::domain::TenantCredential;
use session_report_core::ports::{CredentialStore, PortError, PortResult, ReportStore};

use crate::config::Config;

//=========================================================================================
// The Main Adapter Struct
//=========================================================================================

/// A read-only adapter over the Sheets values API.
#[derive(Clone)]
pub struct SheetsAdapter {
    http: reqwest::Client,
    base_url: String,
    api_token: String,
    config_sheet_id: String,
    config_sheet_tab: String,
}

impl SheetsAdapter {
    /// Creates a new `SheetsAdapter`.
    pub fn new(http: reqwest::Client, config: &Config) -> Self {
        Self {
            http,
            base_url: config.sheets_api_base.clone(),
            api_token: config.sheets_api_token.clone(),
            config_sheet_id: config.config_sheet_id.clone(),
            config_sheet_tab: config.config_sheet_tab.clone(),
        }
    }

    /// Fetches one A1-notation range, returning the raw cell grid.
    async fn read_range(&self, sheet_id: &str, range: &str) -> PortResult<Vec<Vec<String>>> {
        let mut url = reqwest::Url::parse(&self.base_url)
            .map_err(|e| PortError::Unexpected(format!("invalid sheets base URL: {e}")))?;
        url.path_segments_mut()
            .map_err(|_| PortError::Unexpected("sheets base URL cannot be a base".to_string()))?
            .extend(["v4", "spreadsheets", sheet_id, "values", range]);

        let response = self
            .http
            .get(url)
            .bearer_auth(&self.api_token)
            .send()
            .await
            .map_err(|e| PortError::Upstream(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(PortError::Upstream(format!(
                "sheets API returned {status}: {body}"
            )));
        }

        let body: ValuesResponse = response
            .json()
            .await
            .map_err(|e| PortError::Upstream(e.to_string()))?;
        Ok(body.values)
    }
}

/// The subset of the values API response we consume. An empty range comes
/// back with no `values` key at all.
#[derive(Deserialize)]
struct ValuesResponse {
    #[serde(default)]
    values: Vec<Vec<String>>,
}

//=========================================================================================
// Port Implementations
//=========================================================================================

#[async_trait]
impl CredentialStore for SheetsAdapter {
    /// Reads the credential list: columns A-E starting at row 2
    /// (email, password, sheet id, tab name, display name).
    ///
    /// Rows missing an email, sheet id, or tab name after trimming are
    /// discarded here; downstream auth never sees them.
    async fn load_credentials(&self) -> PortResult<Vec<TenantCredential>> {
        let range = format!("'{}'!A2:E", self.config_sheet_tab);
        let rows = self.read_range(&self.config_sheet_id, &range).await?;
        Ok(rows.iter().filter_map(|row| credential_from_row(row)).collect())
    }
}

/// Maps one configuration row (email, password, sheet id, tab name, display
/// name) to a credential, or `None` if a routing field is missing.
fn credential_from_row(row: &[String]) -> Option<TenantCredential> {
    let cell = |i: usize| row.get(i).map(|c| c.trim().to_string()).unwrap_or_default();
    let credential = TenantCredential {
        email: cell(0),
        password: cell(1),
        sheet_id: cell(2),
        tab_name: cell(3),
        display_name: Some(cell(4)).filter(|d| !d.is_empty()),
    };
    (!credential.email.is_empty()
        && !credential.sheet_id.is_empty()
        && !credential.tab_name.is_empty())
    .then_some(credential)
}

#[async_trait]
impl ReportStore for SheetsAdapter {
    /// Reads a tenant's report tab verbatim (columns A through AE),
    /// including the metadata and header rows.
    async fn fetch_rows(&self, sheet_id: &str, tab_name: &str) -> PortResult<Vec<Vec<String>>> {
        let range = format!("'{tab_name}'!A:AE");
        self.read_range(sheet_id, &range).await
    }
}
