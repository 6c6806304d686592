//! Common test utilities for api integration tests.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum_test::TestServer;
use serde_json::json;

use api_lib::config::Config;
use api_lib::web::{create_router, state::AppState};
use session_report_core::domain::{TenantCredential, TriggerOutcome};
use session_report_core::ports::{
    CredentialStore, EngineTrigger, PortError, PortResult, ReportStore,
};
use session_report_core::token::TokenCodec;

pub const TEST_SECRET: &str = "test-secret";

/// Credential store backed by a fixed list.
pub struct StaticCredentialStore(pub Vec<TenantCredential>);

#[async_trait]
impl CredentialStore for StaticCredentialStore {
    async fn load_credentials(&self) -> PortResult<Vec<TenantCredential>> {
        Ok(self.0.clone())
    }
}

/// Credential store whose upstream read always fails.
pub struct FailingCredentialStore(pub String);

#[async_trait]
impl CredentialStore for FailingCredentialStore {
    async fn load_credentials(&self) -> PortResult<Vec<TenantCredential>> {
        Err(PortError::Upstream(self.0.clone()))
    }
}

/// Report store backed by a fixed raw-row grid; records every request so
/// tests can assert which dataset a handler asked for.
pub struct StaticReportStore {
    pub rows: Vec<Vec<String>>,
    pub error: Option<String>,
    pub requests: Arc<Mutex<Vec<(String, String)>>>,
}

impl StaticReportStore {
    pub fn new(rows: Vec<Vec<String>>) -> Self {
        Self {
            rows,
            error: None,
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn failing(error: &str) -> Self {
        Self {
            rows: Vec::new(),
            error: Some(error.to_string()),
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }
}

#[async_trait]
impl ReportStore for StaticReportStore {
    async fn fetch_rows(&self, sheet_id: &str, tab_name: &str) -> PortResult<Vec<Vec<String>>> {
        self.requests
            .lock()
            .unwrap()
            .push((sheet_id.to_string(), tab_name.to_string()));
        match &self.error {
            Some(e) => Err(PortError::Upstream(e.clone())),
            None => Ok(self.rows.clone()),
        }
    }
}

/// Engine trigger that records calls and reports success.
#[derive(Clone, Default)]
pub struct RecordingTrigger {
    pub calls: Arc<Mutex<Vec<(String, String)>>>,
}

#[async_trait]
impl EngineTrigger for RecordingTrigger {
    async fn trigger_rerun(&self, sheet_id: &str, tab_name: &str) -> PortResult<TriggerOutcome> {
        self.calls
            .lock()
            .unwrap()
            .push((sheet_id.to_string(), tab_name.to_string()));
        Ok(TriggerOutcome {
            ok: true,
            status: 200,
            body: "queued".to_string(),
        })
    }
}

pub fn test_config() -> Config {
    Config {
        bind_address: "127.0.0.1:0".parse().unwrap(),
        log_level: tracing::Level::INFO,
        session_secret: TEST_SECRET.to_string(),
        sheets_api_base: "https://sheets.invalid".to_string(),
        sheets_api_token: "unused".to_string(),
        config_sheet_id: "config-sheet".to_string(),
        config_sheet_tab: "config".to_string(),
        processed_sheet_id: Some("processed-sheet".to_string()),
        webhook_url: None,
        webhook_secret: None,
    }
}

/// The stored record deliberately carries mixed-case email so tests can
/// exercise case-insensitive matching.
pub fn tenant() -> TenantCredential {
    TenantCredential {
        email: "Biller@Example.com".to_string(),
        password: "pw1".to_string(),
        sheet_id: "D1".to_string(),
        tab_name: "T1".to_string(),
        display_name: Some("Biller One".to_string()),
    }
}

pub fn row(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

/// A full-width data row with the cells the filter engine cares about.
pub fn data_row(
    appointment_key: &str,
    provider: &str,
    insurance: &str,
    billed: &str,
    final_flag: &str,
) -> Vec<String> {
    let mut cells = vec![String::new(); 31];
    cells[0] = "2024-01-01".to_string();
    cells[2] = appointment_key.to_string();
    cells[3] = provider.to_string();
    cells[23] = final_flag.to_string();
    cells[24] = insurance.to_string();
    cells[27] = billed.to_string();
    cells
}

/// A report tab as the store returns it: metadata row, header row, then
/// data. The last row is deliberately short to exercise padding.
pub fn report_sheet() -> Vec<Vec<String>> {
    vec![
        row(&["Session Report Run", "2024-01-05"]),
        row(&["Report Run Date", "Run Attempt", "AppointmentKey"]),
        data_row("APPT-1", " Dr. Adams ", "Aetna", "DNS", "true"),
        data_row("APPT-2", "Dr. Brown", "Cigna", "Billed", "false"),
        row(&["2024-01-02", "2", "APPT-3"]),
    ]
}

pub fn default_state() -> AppState {
    AppState {
        credentials: Arc::new(StaticCredentialStore(vec![tenant()])),
        reports: Arc::new(StaticReportStore::new(report_sheet())),
        trigger: None,
        codec: TokenCodec::new(TEST_SECRET),
        config: Arc::new(test_config()),
    }
}

pub fn build_server(state: AppState) -> TestServer {
    TestServer::new(create_router(Arc::new(state))).expect("Failed to create test server")
}

pub fn default_server() -> TestServer {
    build_server(default_state())
}

/// Logs in as the default tenant and returns the session cookie value.
pub async fn login(server: &TestServer) -> String {
    let response = server
        .post("/api/login")
        .json(&json!({ "email": "biller@example.com", "password": "pw1" }))
        .await;
    assert_eq!(response.status_code(), 200);
    response
        .maybe_cookie("session")
        .expect("No session cookie")
        .value()
        .to_string()
}
