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

async fn test_app(tag: &str, api_key: &str) -> (axum::Router, std::path::PathBuf) {
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

    // Mailer stays unconfigured: no network traffic from tests.
    let mailer = Arc::new(Mailer::from_config(&Config::default()));
    let outbox = Outbox::spawn(Arc::clone(&mailer), false);
    let state = AppState::new(pool, mailer, outbox, Arc::from(api_key));
    (api_router(state), path)
}

async fn cleanup(path: &std::path::Path) {
    let wal = std::path::PathBuf::from(format!("{}-wal", path.to_string_lossy()));
    let shm = std::path::PathBuf::from(format!("{}-shm", path.to_string_lossy()));
    let _ = fs::remove_file(&wal).await;
    let _ = fs::remove_file(&shm).await;
    let _ = fs::remove_file(path).await;
}

const PROJECT_BODY: &str = r##"{
    "statusText": "Live", "statusColor": "#00ff9d", "image": "https://img.example/p.png",
    "titleEn": "Thing", "titlePt": "Coisa",
    "shortDescEn": "short", "shortDescPt": "curto",
    "tech": ["rust"]
}"##;

#[tokio::test]
async fn unconfigured_server_key_fails_closed_with_500() {
    let (app, path) = test_app("auth-unconfigured", "").await;

    // Even a request that presents a key is refused: the server cannot
    // validate anything without its own secret.
    let resp = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/v1/projects")
                .header("content-type", "application/json")
                .header("x-api-key", "whatever")
                .body(Body::from(PROJECT_BODY))
                .expect("failed to build request"),
        )
        .await
        .expect("request failed");

    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["success"], false);
    assert_eq!(json["error"], "API key not configured on server");

    cleanup(&path).await;
}

#[tokio::test]
async fn missing_key_is_401_and_wrong_key_is_403() {
    let (app, path) = test_app("auth-tristate", "secret").await;

    let resp = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/v1/projects")
                .header("content-type", "application/json")
                .body(Body::from(PROJECT_BODY))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let resp = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/v1/projects")
                .header("content-type", "application/json")
                .header("x-api-key", "not-the-secret")
                .body(Body::from(PROJECT_BODY))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    cleanup(&path).await;
}

#[tokio::test]
async fn bearer_and_query_parameter_keys_are_accepted() {
    let (app, path) = test_app("auth-sources", "secret").await;

    // Auth passes; the missing row is the 404, not the key.
    let resp = app
        .clone()
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri("/api/v1/projects/424242")
                .header("authorization", "Bearer secret")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let resp = app
        .clone()
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri("/api/v1/projects/424242?api_key=secret")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    cleanup(&path).await;
}

#[tokio::test]
async fn project_crud_over_http_and_delete_is_not_idempotent_silently() {
    let (app, path) = test_app("auth-project-crud", "secret").await;

    let resp = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/v1/projects")
                .header("content-type", "application/json")
                .header("x-api-key", "secret")
                .body(Body::from(PROJECT_BODY))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
    let id = json["data"]["id"].as_i64().expect("created project id");
    assert_eq!(json["data"]["title"], serde_json::json!({"en": "Thing", "pt": "Coisa"}));

    // Public read works without a key.
    let resp = app
        .clone()
        .oneshot(
            Request::builder()
                .uri(format!("/api/v1/projects/{id}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    // Non-numeric id is a 400 with the envelope.
    let resp = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/api/v1/projects/abc")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    // First delete succeeds, the second reports not-found: the delete
    // contract is pinned, not left to database defaults.
    let delete = |app: axum::Router| async move {
        app.oneshot(
            Request::builder()
                .method("DELETE")
                .uri(format!("/api/v1/projects/{id}"))
                .header("x-api-key", "secret")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap()
    };
    let resp = delete(app.clone()).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let resp = delete(app.clone()).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    cleanup(&path).await;
}

#[tokio::test]
async fn health_is_public_at_both_paths() {
    let (app, path) = test_app("auth-health", "secret").await;

    for uri in ["/health", "/api/v1/health"] {
        let resp = app
            .clone()
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK, "uri={uri}");
        let body = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["status"], "healthy");
    }

    cleanup(&path).await;
}
