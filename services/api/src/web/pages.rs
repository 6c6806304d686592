//! services/api/src/web/pages.rs
//!
//! Minimal HTML shells for the dashboard and login surfaces. All data flows
//! through the API endpoints; the shells only bootstrap the client.

use axum::response::Html;

pub async fn dashboard_page() -> Html<&'static str> {
    Html(include_str!("../../assets/dashboard.html"))
}

pub async fn login_page() -> Html<&'static str> {
    Html(include_str!("../../assets/login.html"))
}
