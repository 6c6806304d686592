//! services/api/src/web/auth.rs
//!
//! Authentication endpoints: tenant login and logout.

use axum::{
    extract::State,
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::error;
use utoipa::ToSchema;

use crate::web::state::AppState;
use session_report_core::domain::SessionPayload;

//=========================================================================================
// Request/Response Types
//=========================================================================================

#[derive(Deserialize, ToSchema)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// Routing info returned on a successful login. The same data also rides in
/// the session cookie; this copy just saves the client a round trip.
#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub ok: bool,
    pub sheet_id: String,
    pub tab_name: String,
    pub display_name: Option<String>,
}

#[derive(Serialize, ToSchema)]
pub struct ErrorResponse {
    pub ok: bool,
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            ok: false,
            error: error.into(),
        }
    }
}

#[derive(Serialize, ToSchema)]
pub struct OkResponse {
    pub ok: bool,
}

//=========================================================================================
// Handlers
//=========================================================================================

/// POST /api/login - Authenticate a tenant against the credential list
#[utoipa::path(
    post,
    path = "/api/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful; session cookie set", body = LoginResponse),
        (status = 400, description = "Missing email or password", body = ErrorResponse),
        (status = 401, description = "Invalid credentials", body = ErrorResponse),
        (status = 500, description = "Credential store unavailable", body = ErrorResponse)
    )
)]
pub async fn login_handler(
    State(state): State<Arc<AppState>>,
    Json(req): Json<LoginRequest>,
) -> Result<impl IntoResponse, (StatusCode, Json<ErrorResponse>)> {
    // 1. Validate the payload before any credential lookup.
    let email = req.email.trim().to_lowercase();
    let password = req.password.trim().to_string();
    if email.is_empty() || password.is_empty() {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::new("Email and password are required")),
        ));
    }

    // 2. Load the credential list fresh from the external store.
    let credentials = state.credentials.load_credentials().await.map_err(|e| {
        error!("Failed to load credential list: {e}");
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse::new(e.to_string())),
        )
    })?;

    // 3. First match wins. Email is compared case-insensitively; the
    //    password must match byte for byte. The rejection message never
    //    reveals whether the email exists.
    let matched = credentials
        .iter()
        .find(|c| c.email.to_lowercase() == email && c.password == password)
        .ok_or_else(|| {
            (
                StatusCode::UNAUTHORIZED,
                Json(ErrorResponse::new("Invalid email or password")),
            )
        })?;

    // 4. Build and sign the session payload.
    let payload = SessionPayload {
        email: matched.email.clone(),
        sheet_id: matched.sheet_id.clone(),
        tab_name: matched.tab_name.clone(),
        display_name: matched.display_name.clone(),
        issued_at: Utc::now().timestamp_millis(),
    };
    let token = state.codec.sign(&payload).map_err(|e| {
        error!("Failed to sign session token: {e}");
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse::new("Failed to create session")),
        )
    })?;

    // 5. Session cookie: no Max-Age, so it lives for the browser session.
    let cookie = format!("session={token}; HttpOnly; Secure; SameSite=Lax; Path=/");

    let response = LoginResponse {
        ok: true,
        sheet_id: matched.sheet_id.clone(),
        tab_name: matched.tab_name.clone(),
        display_name: matched.display_name.clone(),
    };

    Ok((
        StatusCode::OK,
        [(header::SET_COOKIE, cookie)],
        Json(response),
    ))
}

/// POST /api/logout - Clear the session cookie
///
/// Unconditional and idempotent: the server holds no session record, so
/// "logging out" is just overwriting the cookie. A captured token stays
/// valid for the rest of the browser session; there is no revocation list.
#[utoipa::path(
    post,
    path = "/api/logout",
    responses(
        (status = 200, description = "Session cookie cleared", body = OkResponse)
    )
)]
pub async fn logout_handler() -> impl IntoResponse {
    let cookie = "session=; HttpOnly; Secure; SameSite=Lax; Path=/; Max-Age=0";
    (
        StatusCode::OK,
        [(header::SET_COOKIE, cookie.to_string())],
        Json(OkResponse { ok: true }),
    )
}
