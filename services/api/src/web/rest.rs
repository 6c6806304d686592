//! services/api/src/web/rest.rs
//!
//! Contains the Axum handlers for the data-serving REST endpoints and the
//! master definition for the OpenAPI specification.

use axum::{
    extract::{Query, State},
    http::{HeaderMap, StatusCode},
    response::Json,
};
use chrono::Utc;
use serde::Serialize;
use std::sync::Arc;
use tracing::error;
use utoipa::{OpenApi, ToSchema};

use crate::web::auth::{ErrorResponse, LoginRequest, LoginResponse, OkResponse};
use crate::web::middleware::session_cookie;
use crate::web::state::AppState;
use session_report_core::domain::{FilterState, SessionPayload, SessionReportRow};
use session_report_core::{filter, normalize};

//=========================================================================================
// OpenAPI Master Definition
//=========================================================================================

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::web::auth::login_handler,
        crate::web::auth::logout_handler,
        report_handler,
        processed_handler,
        trigger_handler,
    ),
    components(
        schemas(LoginRequest, LoginResponse, ErrorResponse, OkResponse,
            ReportApiResponse, ProcessedApiResponse, TriggerResponse)
    ),
    tags(
        (name = "Session Report API", description = "API endpoints for the tenant billing/session report dashboard.")
    )
)]
pub struct ApiDoc;

//=========================================================================================
// API Response Structs
//=========================================================================================

/// The report payload: the requested page of the filtered row set plus a
/// freshness timestamp.
#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReportApiResponse {
    pub ok: bool,
    #[schema(value_type = Vec<Object>)]
    pub rows: Vec<SessionReportRow>,
    /// Total rows matching the filters, across all pages.
    pub matched: usize,
    pub page: usize,
    pub total_pages: usize,
    pub first_data_row: usize,
    pub last_updated: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ReportApiResponse {
    fn failure(error: impl Into<String>) -> Self {
        Self {
            ok: false,
            rows: Vec::new(),
            matched: 0,
            page: 0,
            total_pages: 0,
            first_data_row: 0,
            last_updated: Utc::now().to_rfc3339(),
            error: Some(error.into()),
        }
    }
}

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProcessedApiResponse {
    pub processed_file_ids: Vec<String>,
    pub last_updated: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Pass-through of the automation webhook's own response.
#[derive(Serialize, ToSchema)]
pub struct TriggerResponse {
    pub ok: bool,
    pub status: u16,
    pub body: String,
}

//=========================================================================================
// Session Extraction
//=========================================================================================

/// Verifies the session cookie for a data-serving handler, distinguishing an
/// absent cookie from one that fails verification. Callers treat both as
/// unauthenticated.
fn require_session(
    state: &AppState,
    headers: &HeaderMap,
) -> Result<SessionPayload, &'static str> {
    let token = session_cookie(headers).ok_or("Not authenticated")?;
    state.codec.verify(&token).ok_or("Invalid session")
}

//=========================================================================================
// REST API Handlers
//=========================================================================================

/// Return the tenant's normalized report rows, filtered and paginated.
///
/// The sheet id and tab are taken from the verified session token, never
/// from client input. Filter criteria and the pagination cursor arrive as
/// query parameters.
#[utoipa::path(
    get,
    path = "/api/report",
    params(
        ("search" = Option<String>, Query, description = "Free-text search over provider, patient, appointment key, insurance, and note"),
        ("insurance" = Option<String>, Query, description = "Exact insurance match"),
        ("where_to_bill" = Option<String>, Query, description = "Exact where-to-bill match"),
        ("auto_where_to_bill" = Option<String>, Query, description = "Exact auto-where-to-bill match"),
        ("billed" = Option<String>, Query, description = "Exact billed-status match"),
        ("dns_reason" = Option<String>, Query, description = "Exact DNS-reason match"),
        ("duration" = Option<String>, Query, description = "Exact duration match"),
        ("appt_type" = Option<String>, Query, description = "Exact appointment-type match"),
        ("final_only" = Option<bool>, Query, description = "Only rows whose final-row flag is \"true\""),
        ("page" = Option<usize>, Query, description = "1-indexed page, clamped to the matched count"),
        ("page_size" = Option<usize>, Query, description = "Rows per page, minimum 1 (default 25)")
    ),
    responses(
        (status = 200, description = "Filtered report rows", body = ReportApiResponse),
        (status = 401, description = "Missing or invalid session cookie", body = ReportApiResponse),
        (status = 500, description = "Report store unavailable", body = ReportApiResponse)
    )
)]
pub async fn report_handler(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Query(filters): Query<FilterState>,
) -> (StatusCode, Json<ReportApiResponse>) {
    let session = match require_session(&state, &headers) {
        Ok(session) => session,
        Err(reason) => {
            return (
                StatusCode::UNAUTHORIZED,
                Json(ReportApiResponse::failure(reason)),
            )
        }
    };

    let raw = match state
        .reports
        .fetch_rows(&session.sheet_id, &session.tab_name)
        .await
    {
        Ok(raw) => raw,
        Err(e) => {
            error!("Failed to read report rows: {e}");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ReportApiResponse::failure(e.to_string())),
            );
        }
    };

    let rows = normalize::normalize_sheet(&raw);
    let outcome = filter::apply(&rows, &filters);

    (
        StatusCode::OK,
        Json(ReportApiResponse {
            ok: true,
            matched: outcome.matched.len(),
            rows: outcome.page_rows,
            page: outcome.current_page,
            total_pages: outcome.total_pages,
            first_data_row: normalize::FIRST_DATA_ROW,
            last_updated: Utc::now().to_rfc3339(),
            error: None,
        }),
    )
}

/// List file ids the external processor has already handled.
///
/// Read from the first column of the shared ProcessedLog tab; the UI uses it
/// to show an "already processed" state. Read failures degrade to an empty
/// list rather than an error.
#[utoipa::path(
    get,
    path = "/api/processed",
    responses(
        (status = 200, description = "Deduplicated processed file ids", body = ProcessedApiResponse),
        (status = 500, description = "Processed log not configured", body = ProcessedApiResponse)
    )
)]
pub async fn processed_handler(
    State(state): State<Arc<AppState>>,
) -> (StatusCode, Json<ProcessedApiResponse>) {
    let Some(sheet_id) = state.config.processed_sheet_id.as_deref() else {
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ProcessedApiResponse {
                processed_file_ids: Vec::new(),
                last_updated: Utc::now().to_rfc3339(),
                error: Some("PROCESSED_SHEET_ID is not set".to_string()),
            }),
        );
    };

    let file_ids = match state.reports.fetch_rows(sheet_id, "ProcessedLog").await {
        Ok(raw) => {
            let mut seen = std::collections::HashSet::new();
            raw.iter()
                .filter_map(|row| row.first())
                .map(|c| c.trim().to_string())
                .filter(|id| !id.is_empty() && id.len() > 10 && !id.starts_with("File ID"))
                .filter(|id| seen.insert(id.clone()))
                .collect()
        }
        Err(e) => {
            error!("Failed to read processed log: {e}");
            Vec::new()
        }
    };

    (
        StatusCode::OK,
        Json(ProcessedApiResponse {
            processed_file_ids: file_ids,
            last_updated: Utc::now().to_rfc3339(),
            error: None,
        }),
    )
}

/// Request a re-run of the external processing engine for this tenant.
///
/// Forwards to the automation webhook with the dataset identifier from the
/// session token. The webhook owns locking and idempotency; no local
/// deduplication happens here.
#[utoipa::path(
    post,
    path = "/api/trigger-engine",
    responses(
        (status = 200, description = "Webhook response passed through", body = TriggerResponse),
        (status = 401, description = "Missing or invalid session cookie", body = ErrorResponse),
        (status = 500, description = "Webhook not configured or unreachable", body = ErrorResponse)
    )
)]
pub async fn trigger_handler(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Json<TriggerResponse>, (StatusCode, Json<ErrorResponse>)> {
    let Some(trigger) = state.trigger.as_ref() else {
        return Err((
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse::new(
                "ENGINE_WEBHOOK_URL / ENGINE_WEBHOOK_SECRET not configured",
            )),
        ));
    };

    let session = require_session(&state, &headers)
        .map_err(|reason| (StatusCode::UNAUTHORIZED, Json(ErrorResponse::new(reason))))?;

    let outcome = trigger
        .trigger_rerun(&session.sheet_id, &session.tab_name)
        .await
        .map_err(|e| {
            error!("Failed to fire automation webhook: {e}");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::new(e.to_string())),
            )
        })?;

    Ok(Json(TriggerResponse {
        ok: outcome.ok,
        status: outcome.status,
        body: outcome.body,
    }))
}
