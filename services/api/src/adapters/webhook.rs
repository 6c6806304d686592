//! services/api/src/adapters/webhook.rs
//!
//! This module contains the adapter for the external automation webhook.
//! It implements the `EngineTrigger` port from the `core` crate.

use async_trait::async_trait;
use session_report_core::domain::TriggerOutcome;
use session_report_core::ports::{EngineTrigger, PortError, PortResult};

/// An adapter that fires the Apps Script automation webhook.
///
/// The webhook side owns locking and throttling; this adapter only forwards
/// the request and passes the outcome through.
#[derive(Clone)]
pub struct AppsScriptTrigger {
    http: reqwest::Client,
    url: String,
    secret: String,
}

impl AppsScriptTrigger {
    /// Creates a new `AppsScriptTrigger`.
    pub fn new(http: reqwest::Client, url: String, secret: String) -> Self {
        Self { http, url, secret }
    }
}

#[async_trait]
impl EngineTrigger for AppsScriptTrigger {
    async fn trigger_rerun(&self, sheet_id: &str, tab_name: &str) -> PortResult<TriggerOutcome> {
        let response = self
            .http
            .post(&self.url)
            .form(&[
                ("key", self.secret.as_str()),
                ("sheetId", sheet_id),
                ("tabName", tab_name),
                ("mode", "new"),
            ])
            .send()
            .await
            .map_err(|e| PortError::Upstream(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| PortError::Upstream(e.to_string()))?;

        Ok(TriggerOutcome {
            ok: status.is_success(),
            status: status.as_u16(),
            body,
        })
    }
}
