pub mod auth;
pub mod middleware;
pub mod pages;
pub mod rest;
pub mod state;

use axum::{
    middleware as axum_middleware,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::services::ServeDir;

use state::AppState;

/// Builds the application router: API endpoints, page shells, static assets,
/// all behind the route guard. The Swagger UI is merged in by the binary,
/// outside the guard.
pub fn create_router(app_state: Arc<AppState>) -> Router {
    let api_routes = Router::new()
        .route("/api/login", post(auth::login_handler))
        .route("/api/logout", post(auth::logout_handler))
        .route("/api/report", get(rest::report_handler))
        .route("/api/processed", get(rest::processed_handler))
        .route("/api/trigger-engine", post(rest::trigger_handler));

    let page_routes = Router::new()
        .route("/", get(pages::dashboard_page))
        .route("/login", get(pages::login_page));

    Router::new()
        .merge(api_routes)
        .merge(page_routes)
        .nest_service("/assets", ServeDir::new("assets"))
        .layer(axum_middleware::from_fn(middleware::route_guard))
        .with_state(app_state)
}
