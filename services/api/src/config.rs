//! services/api/src/config.rs
//!
//! Defines the application's configuration structure and loading logic.
//!
//! All configuration is loaded from environment variables at startup. The `.env`
//! file is used for local development. A missing required variable is fatal
//! before any request-specific logic runs.

use std::net::SocketAddr;
use tracing::Level;

/// A custom error type for configuration loading failures.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing the environment variable {0}")]
    MissingVar(String),
    #[error("Invalid value for the environment variable {0}: {1}")]
    InvalidValue(String, String),
}

/// Holds all configuration loaded from the environment at startup.
#[derive(Clone, Debug)]
pub struct Config {
    pub bind_address: SocketAddr,
    pub log_level: Level,
    /// Process-wide HMAC secret for session tokens.
    pub session_secret: String,
    pub sheets_api_base: String,
    pub sheets_api_token: String,
    /// Sheet holding the per-tenant credential list.
    pub config_sheet_id: String,
    pub config_sheet_tab: String,
    /// Sheet holding the processed-file log, if the deployment has one.
    pub processed_sheet_id: Option<String>,
    pub webhook_url: Option<String>,
    pub webhook_secret: Option<String>,
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// It will look for a `.env` file in the current directory for development,
    /// but this is skipped in test environments to ensure tests are hermetic.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Only load from .env in non-test mode to avoid contamination.
        if !cfg!(test) {
            dotenvy::dotenv().ok();
        }

        // --- Load Server Settings ---
        let bind_address_str =
            std::env::var("BIND_ADDRESS").unwrap_or_else(|_| "0.0.0.0:3000".to_string());
        let bind_address = bind_address_str
            .parse::<SocketAddr>()
            .map_err(|e| ConfigError::InvalidValue("BIND_ADDRESS".to_string(), e.to_string()))?;

        let log_level_str = std::env::var("RUST_LOG").unwrap_or_else(|_| "INFO".to_string());
        let log_level = log_level_str.parse::<Level>().map_err(|_| {
            ConfigError::InvalidValue(
                "RUST_LOG".to_string(),
                format!("'{}' is not a valid log level", log_level_str),
            )
        })?;

        // --- Load Session and Store Settings (required) ---
        let session_secret = std::env::var("SESSION_SECRET")
            .map_err(|_| ConfigError::MissingVar("SESSION_SECRET".to_string()))?;

        let sheets_api_base = std::env::var("SHEETS_API_BASE")
            .unwrap_or_else(|_| "https://sheets.googleapis.com".to_string());

        let sheets_api_token = std::env::var("SHEETS_API_TOKEN")
            .map_err(|_| ConfigError::MissingVar("SHEETS_API_TOKEN".to_string()))?;

        let config_sheet_id = std::env::var("CONFIG_SHEET_ID")
            .map_err(|_| ConfigError::MissingVar("CONFIG_SHEET_ID".to_string()))?;

        let config_sheet_tab =
            std::env::var("CONFIG_SHEET_TAB").unwrap_or_else(|_| "config".to_string());

        // --- Load Optional Collaborator Settings ---
        let processed_sheet_id = std::env::var("PROCESSED_SHEET_ID").ok();
        let webhook_url = std::env::var("ENGINE_WEBHOOK_URL").ok();
        let webhook_secret = std::env::var("ENGINE_WEBHOOK_SECRET").ok();

        Ok(Self {
            bind_address,
            log_level,
            session_secret,
            sheets_api_base,
            sheets_api_token,
            config_sheet_id,
            config_sheet_tab,
            processed_sheet_id,
            webhook_url,
            webhook_secret,
        })
    }
}
