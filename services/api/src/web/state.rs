//! services/api/src/web/state.rs
//!
//! Defines the application's shared state.

use crate::config::Config;
use session_report_core::ports::{CredentialStore, EngineTrigger, ReportStore};
use session_report_core::token::TokenCodec;
use std::sync::Arc;

/// The shared application state, created once at startup and passed to all
/// handlers.
///
/// There is no session store in here: sessions are stateless signed tokens,
/// so request handling needs only the codec plus the external-store ports.
#[derive(Clone)]
pub struct AppState {
    pub credentials: Arc<dyn CredentialStore>,
    pub reports: Arc<dyn ReportStore>,
    /// Absent when the deployment has no automation webhook configured.
    pub trigger: Option<Arc<dyn EngineTrigger>>,
    pub codec: TokenCodec,
    pub config: Arc<Config>,
}
