//! services/api/src/bin/api.rs

use api_lib::{
    adapters::{AppsScriptTrigger, SheetsAdapter},
    config::Config,
    error::ApiError,
    web::{create_router, rest::ApiDoc, state::AppState},
};
use session_report_core::token::TokenCodec;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[tokio::main]
async fn main() -> Result<(), ApiError> {
    // --- 1. Load Configuration & Set Up Logging ---
    let config = Arc::new(Config::from_env()?);
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(config.log_level.to_string()))
        .with(tracing_subscriber::fmt::layer())
        .init();
    info!("Configuration loaded. Starting server...");

    // --- 2. Initialize Service Adapters ---
    let http = reqwest::Client::new();

    let sheets_adapter = Arc::new(SheetsAdapter::new(http.clone(), &config));

    let trigger = match (config.webhook_url.clone(), config.webhook_secret.clone()) {
        (Some(url), Some(secret)) => Some(Arc::new(AppsScriptTrigger::new(http, url, secret))
            as Arc<dyn session_report_core::ports::EngineTrigger>),
        _ => {
            warn!("ENGINE_WEBHOOK_URL / ENGINE_WEBHOOK_SECRET not set; re-run trigger disabled");
            None
        }
    };

    let codec = TokenCodec::new(config.session_secret.as_bytes().to_vec());

    // --- 3. Build the Shared AppState ---
    let app_state = Arc::new(AppState {
        credentials: sheets_adapter.clone(),
        reports: sheets_adapter,
        trigger,
        codec,
        config: config.clone(),
    });

    // --- 4. Create the Web Router ---
    // Merge the guarded application router with the Swagger UI router.
    let app = create_router(app_state)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()));

    // --- 5. Start the Server ---
    info!("Starting server on {}", config.bind_address);
    info!(
        "Swagger UI available at http://{}/swagger-ui",
        config.bind_address
    );
    let listener = tokio::net::TcpListener::bind(&config.bind_address).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
