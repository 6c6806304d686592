//! Tests for the login endpoint: credential matching, cookie issuance, and
//! the shape of its rejections.

mod common;

use common::*;
use serde_json::{json, Value};

/// Test: email matching is case-insensitive and returns routing info
#[tokio::test]
async fn login_matches_email_case_insensitively() {
    let server = default_server();

    let response = server
        .post("/api/login")
        .json(&json!({ "email": "BILLER@example.COM", "password": "pw1" }))
        .await;

    assert_eq!(response.status_code(), 200);
    let body: Value = response.json();
    assert_eq!(body["ok"], true);
    assert_eq!(body["sheetId"], "D1");
    assert_eq!(body["tabName"], "T1");
    assert_eq!(body["displayName"], "Biller One");
}

/// Test: a successful login sets a browser-session cookie with the expected
/// attributes
#[tokio::test]
async fn login_sets_session_cookie_attributes() {
    let server = default_server();

    let response = server
        .post("/api/login")
        .json(&json!({ "email": "biller@example.com", "password": "pw1" }))
        .await;

    let cookie = response.maybe_cookie("session").expect("No session cookie");
    assert!(!cookie.value().is_empty());
    assert_eq!(cookie.http_only(), Some(true));
    assert_eq!(cookie.secure(), Some(true));
    assert_eq!(cookie.path(), Some("/"));
    assert_eq!(cookie.same_site(), Some(cookie::SameSite::Lax));
    // No Max-Age: the cookie lives only for the browser session.
    assert!(cookie.max_age().is_none());
}

/// Test: password comparison is exact, not case-folded
#[tokio::test]
async fn password_comparison_is_case_sensitive() {
    let server = default_server();

    let response = server
        .post("/api/login")
        .json(&json!({ "email": "biller@example.com", "password": "PW1" }))
        .await;

    assert_eq!(response.status_code(), 401);
    let body: Value = response.json();
    assert_eq!(body["ok"], false);
}

/// Test: the rejection never reveals whether the email exists
#[tokio::test]
async fn unknown_email_and_wrong_password_are_indistinguishable() {
    let server = default_server();

    let unknown_email = server
        .post("/api/login")
        .json(&json!({ "email": "nobody@example.com", "password": "pw1" }))
        .await;
    let wrong_password = server
        .post("/api/login")
        .json(&json!({ "email": "biller@example.com", "password": "wrong" }))
        .await;

    assert_eq!(unknown_email.status_code(), 401);
    assert_eq!(wrong_password.status_code(), 401);
    let a: Value = unknown_email.json();
    let b: Value = wrong_password.json();
    assert_eq!(a["error"], b["error"]);
}

/// Test: missing fields fail validation with a status distinct from an auth
/// rejection
#[tokio::test]
async fn blank_credentials_fail_validation_before_lookup() {
    let server = default_server();

    let response = server
        .post("/api/login")
        .json(&json!({ "email": "   ", "password": "" }))
        .await;

    assert_eq!(response.status_code(), 400);
    let body: Value = response.json();
    assert_eq!(body["ok"], false);
    assert_eq!(body["error"], "Email and password are required");
}

/// Test: a credential-store outage surfaces as a server error, not an auth
/// rejection
#[tokio::test]
async fn credential_store_failure_is_a_server_error() {
    let mut state = default_state();
    state.credentials = std::sync::Arc::new(FailingCredentialStore(
        "config sheet unreachable".to_string(),
    ));
    let server = build_server(state);

    let response = server
        .post("/api/login")
        .json(&json!({ "email": "biller@example.com", "password": "pw1" }))
        .await;

    assert_eq!(response.status_code(), 500);
    let body: Value = response.json();
    assert!(body["error"]
        .as_str()
        .unwrap()
        .contains("config sheet unreachable"));
}
