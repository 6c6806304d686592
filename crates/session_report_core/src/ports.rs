//! crates/session_report_core/src/ports.rs
//!
//! Defines the service contracts (traits) for the application's core logic.
//! These traits form the boundary of the hexagonal architecture, allowing the
//! core to be independent of the external tabular store and webhook transport.

use async_trait::async_trait;

use crate::domain::{TenantCredential, TriggerOutcome};

//=========================================================================================
// Generic Port Error and Result Types
//=========================================================================================

/// A generic error type for all port operations.
/// This abstracts away the specific errors from external services.
#[derive(Debug, thiserror::Error)]
pub enum PortError {
    /// The external store was unavailable or returned a malformed response.
    /// The underlying message is preserved for diagnostics.
    #[error("Upstream read failed: {0}")]
    Upstream(String),
    #[error("An unexpected error occurred: {0}")]
    Unexpected(String),
}

/// A convenience type alias for `Result<T, PortError>`.
pub type PortResult<T> = Result<T, PortError>;

//=========================================================================================
// Service Ports (Traits)
//=========================================================================================

/// Read-only access to the shared tenant configuration list.
///
/// Fetched fresh per login attempt; there is no caching contract here.
#[async_trait]
pub trait CredentialStore: Send + Sync {
    async fn load_credentials(&self) -> PortResult<Vec<TenantCredential>>;
}

/// Read-only access to one tenant's report tab.
///
/// Returns the ordered raw rows exactly as the store presents them,
/// including the leading metadata/header rows. Row shape is variable;
/// normalization happens downstream.
#[async_trait]
pub trait ReportStore: Send + Sync {
    async fn fetch_rows(&self, sheet_id: &str, tab_name: &str) -> PortResult<Vec<Vec<String>>>;
}

/// Fire the external automation webhook for one tenant's dataset.
///
/// The automation system owns its own locking and idempotency; callers
/// perform no local deduplication.
#[async_trait]
pub trait EngineTrigger: Send + Sync {
    async fn trigger_rerun(&self, sheet_id: &str, tab_name: &str) -> PortResult<TriggerOutcome>;
}
