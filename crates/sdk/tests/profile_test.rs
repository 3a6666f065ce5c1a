use std::collections::HashMap;

use axum::extract::Query;
use axum::http::{HeaderMap, StatusCode};
use axum::routing::get;
use axum::{Json, Router};
use blurtpay_sdk::{Identity, ProfileProvider, SdkError, SupabaseProfiles};
use serde_json::{json, Value};

const ANON_KEY: &str = "anon-test-key";

async fn users(
    headers: HeaderMap,
    Query(params): Query<HashMap<String, String>>,
) -> (StatusCode, Json<Value>) {
    let apikey = headers.get("apikey").and_then(|v| v.to_str().ok());
    let bearer = headers.get("authorization").and_then(|v| v.to_str().ok());
    let expected_bearer = format!("Bearer {}", ANON_KEY);
    if apikey != Some(ANON_KEY) || bearer != Some(expected_bearer.as_str()) {
        return (StatusCode::UNAUTHORIZED, Json(json!({"message": "Invalid API key"})));
    }
    if params.get("select").map(String::as_str) != Some("*") {
        return (StatusCode::BAD_REQUEST, Json(json!({"message": "select missing"})));
    }

    let rows = match params.get("email").map(String::as_str) {
        Some("eq.jane@example.com") => json!([
            {"email": "jane@example.com", "id": 42, "balance": 15200.5, "bbalance": "87.123456"}
        ]),
        _ => json!([]),
    };
    (StatusCode::OK, Json(rows))
}

async fn spawn_users() -> String {
    let app = Router::new().route("/rest/v1/users", get(users));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}", addr)
}

fn identity(email: &str) -> Identity {
    Identity {
        email: email.into(),
        id: "user-42".into(),
    }
}

#[tokio::test]
async fn test_profile_is_read_by_email() {
    let base = spawn_users().await;
    let profiles = SupabaseProfiles::new(&base, ANON_KEY, 5).unwrap();

    let profile = profiles.profile(&identity("jane@example.com")).await.unwrap();
    assert_eq!(profile.email, "jane@example.com");
    assert_eq!(profile.id, "42");
    assert_eq!(profile.naira_display(), "15200.50");
    assert_eq!(profile.blurt_display(), "87.1235");
}

#[tokio::test]
async fn test_unknown_email_is_not_found() {
    let base = spawn_users().await;
    let profiles = SupabaseProfiles::new(&base, ANON_KEY, 5).unwrap();

    let err = profiles.profile(&identity("ghost@example.com")).await.unwrap_err();
    assert!(matches!(err, SdkError::RemoteRejection(ref m) if m == "Profile not found"));
}

#[tokio::test]
async fn test_wrong_key_is_rejected() {
    let base = spawn_users().await;
    let profiles = SupabaseProfiles::new(&base, "someone-elses-key", 5).unwrap();

    let err = profiles.profile(&identity("jane@example.com")).await.unwrap_err();
    assert!(matches!(err, SdkError::RemoteRejection(ref m) if m.contains("401")));
}
