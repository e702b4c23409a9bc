use axum::{
    body::{Body, to_bytes},
    http::{Request, StatusCode},
};
use std::{
    sync::Arc,
    time::{SystemTime, UNIX_EPOCH},
};
use tokio::fs;
use tower::ServiceExt;
use vitrine::config::Config;
use vitrine::mailer::{Mailer, Outbox};
use vitrine::server::{AppState, api_router};

async fn test_app(tag: &str) -> (axum::Router, std::path::PathBuf) {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("system time before UNIX_EPOCH")
        .as_nanos();
    let mut path = std::env::temp_dir();
    path.push(format!("vitrine-{tag}-{}-{nanos}.sqlite", std::process::id()));

    let pool = vitrine::db::connect(&format!("sqlite:{}", path.display()))
        .await
        .expect("db connect failed");
    vitrine::db::apply_schema(&pool).await.expect("schema init failed");

    // The mailer is deliberately unconfigured: submissions must succeed
    // with the provider unreachable.
    let mailer = Arc::new(Mailer::from_config(&Config::default()));
    let outbox = Outbox::spawn(Arc::clone(&mailer), true);
    let state = AppState::new(pool, mailer, outbox, Arc::from("secret"));
    (api_router(state), path)
}

async fn cleanup(path: &std::path::Path) {
    let wal = std::path::PathBuf::from(format!("{}-wal", path.to_string_lossy()));
    let shm = std::path::PathBuf::from(format!("{}-shm", path.to_string_lossy()));
    let _ = fs::remove_file(&wal).await;
    let _ = fs::remove_file(&shm).await;
    let _ = fs::remove_file(path).await;
}

const CONTACT_BODY: &str =
    r#"{"name": "Ada Lovelace", "email": "ada@example.com", "message": "Hello there"}"#;

async fn authed_get(app: &axum::Router, uri: &str) -> (StatusCode, serde_json::Value) {
    let resp = app
        .clone()
        .oneshot(
            Request::builder()
                .uri(uri)
                .header("x-api-key", "secret")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    let status = resp.status();
    let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn submission_persists_even_with_the_email_provider_unavailable() {
    let (app, path) = test_app("contact-persist").await;

    let resp = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/v1/contact")
                .header("content-type", "application/json")
                .body(Body::from(CONTACT_BODY))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);
    let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(json["success"], true);
    let id = json["data"]["id"].as_i64().expect("stored message id");

    // Immediately readable through the authenticated list.
    let (status, listed) = authed_get(&app, "/api/v1/messages").await;
    assert_eq!(status, StatusCode::OK);
    let messages = listed["data"].as_array().unwrap();
    assert_eq!(messages.len(), 1);
    assert_eq!(messages[0]["id"].as_i64(), Some(id));
    assert_eq!(messages[0]["name"], "Ada Lovelace");
    assert_eq!(messages[0]["read"], false);

    cleanup(&path).await;
}

#[tokio::test]
async fn unread_flow_and_delete_contract() {
    let (app, path) = test_app("contact-unread").await;

    let resp = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/v1/contact")
                .header("content-type", "application/json")
                .body(Body::from(CONTACT_BODY))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);
    let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    let id = json["data"]["id"].as_i64().unwrap();

    let (_, unread) = authed_get(&app, "/api/v1/messages/unread").await;
    assert_eq!(unread["data"].as_array().unwrap().len(), 1);

    let resp = app
        .clone()
        .oneshot(
            Request::builder()
                .method("PUT")
                .uri(format!("/api/v1/messages/{id}/read"))
                .header("x-api-key", "secret")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let (_, unread) = authed_get(&app, "/api/v1/messages/unread").await;
    assert!(unread["data"].as_array().unwrap().is_empty());

    let (status, fetched) = authed_get(&app, &format!("/api/v1/messages/{id}")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["data"]["read"], true);

    // Delete once, then confirm the repeat reports not-found.
    for (round, expected) in [(1, StatusCode::OK), (2, StatusCode::NOT_FOUND)] {
        let resp = app
            .clone()
            .oneshot(
                Request::builder()
                    .method("DELETE")
                    .uri(format!("/api/v1/messages/{id}"))
                    .header("x-api-key", "secret")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(resp.status(), expected, "round={round}");
    }

    cleanup(&path).await;
}

#[tokio::test]
async fn malformed_and_incomplete_submissions_get_envelope_400s() {
    let (app, path) = test_app("contact-validation").await;

    let resp = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/v1/contact")
                .header("content-type", "application/json")
                .body(Body::from("not-json"))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(json["success"], false);

    let resp = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/v1/contact")
                .header("content-type", "application/json")
                .body(Body::from(
                    r#"{"name": "Ada", "email": "not-an-address", "message": "hi"}"#,
                ))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    // Nothing was stored by either rejected submission.
    let (_, listed) = authed_get(&app, "/api/v1/messages").await;
    assert!(listed["data"].as_array().unwrap().is_empty());

    cleanup(&path).await;
}

#[tokio::test]
async fn test_email_endpoint_surfaces_configuration_errors() {
    let (app, path) = test_app("contact-test-email").await;

    let resp = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/v1/test-email")
                .header("x-api-key", "secret")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    // Unlike contact notifications, this path is synchronous and honest
    // about a missing provider configuration.
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(json["success"], false);

    cleanup(&path).await;
}
