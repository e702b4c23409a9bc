use axum::{
    Json,
    Router,
    extract::Request,
    http::{HeaderName, HeaderValue, Method, StatusCode, Version, header},
    middleware::{self, Next},
    response::Response,
    routing::{get, post, put},
};
use base64::Engine as _;
use rand::RngCore;
use serde_json::{Value, json};
use sqlx::SqlitePool;
use std::sync::Arc;
use std::time::Instant;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tracing::{error, info, warn};

use crate::config::Config;
use crate::db::{ContactStore, DocStore, ExperienceStore, ProjectStore};
use crate::mailer::{Mailer, Outbox};
use crate::server::respond::ApiResponse;
use crate::server::routes::{contact, docs, experience, projects};

const MAX_REQUEST_ID_LEN: usize = 128;
const X_REQUEST_ID: HeaderName = HeaderName::from_static("x-request-id");

fn generate_request_id() -> String {
    // 96 bits => 16 chars base64url (no padding).
    let mut bytes = [0u8; 12];
    rand::rng().fill_bytes(&mut bytes);
    base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(bytes)
}

fn format_http_version(version: Version) -> &'static str {
    match version {
        Version::HTTP_09 => "HTTP/0.9",
        Version::HTTP_10 => "HTTP/1.0",
        Version::HTTP_11 => "HTTP/1.1",
        Version::HTTP_2 => "HTTP/2",
        Version::HTTP_3 => "HTTP/3",
        _ => "HTTP/?",
    }
}

/// Shared application state: one store per entity (each holding a clone
/// of the single startup pool), the mailer, the outbox handle, and the
/// configured shared secret (empty means not configured).
#[derive(Clone)]
pub struct AppState {
    pub projects: ProjectStore,
    pub experience: ExperienceStore,
    pub contact: ContactStore,
    pub docs: DocStore,
    pub mailer: Arc<Mailer>,
    pub outbox: Outbox,
    pub api_key: Arc<str>,
}

impl AppState {
    pub fn new(pool: SqlitePool, mailer: Arc<Mailer>, outbox: Outbox, api_key: Arc<str>) -> Self {
        Self {
            projects: ProjectStore::new(pool.clone()),
            experience: ExperienceStore::new(pool.clone()),
            contact: ContactStore::new(pool.clone()),
            docs: DocStore::new(pool),
            mailer,
            outbox,
            api_key,
        }
    }
}

async fn health() -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "service": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

async fn not_found_handler() -> (StatusCode, Json<ApiResponse<()>>) {
    (
        StatusCode::NOT_FOUND,
        Json(ApiResponse::<()>::error("not found")),
    )
}

async fn access_log(req: Request, next: Next) -> Response {
    // Capture request metadata before moving `req` into the handler stack.
    let method = req.method().clone();
    let uri = req.uri().clone();
    let version = req.version();

    let request_id = req
        .headers()
        .get(X_REQUEST_ID)
        .and_then(|v| v.to_str().ok())
        .filter(|v| !v.is_empty() && v.len() <= MAX_REQUEST_ID_LEN)
        .map(str::to_string)
        .unwrap_or_else(generate_request_id);

    let start = Instant::now();
    let mut resp = next.run(req).await;

    // Always reflect `x-request-id` for easier correlation, even if the
    // client didn't send one.
    if let Ok(value) = HeaderValue::from_str(&request_id) {
        resp.headers_mut().insert(X_REQUEST_ID, value);
    }

    let status = resp.status();
    let latency_ms = start.elapsed().as_millis() as u64;
    let path = uri.path();
    let protocol = format_http_version(version);

    if status.is_server_error() {
        error!(
            "| {:>3} | {} | {:^7} | {:<8} | {} | {}ms",
            status.as_u16(),
            request_id,
            method.as_str(),
            protocol,
            path,
            latency_ms,
        );
    } else if status.is_client_error() {
        warn!(
            "| {:>3} | {} | {:^7} | {:<8} | {} | {}ms",
            status.as_u16(),
            request_id,
            method.as_str(),
            protocol,
            path,
            latency_ms,
        );
    } else {
        info!(
            "| {:>3} | {} | {:^7} | {:<8} | {} | {}ms",
            status.as_u16(),
            request_id,
            method.as_str(),
            protocol,
            path,
            latency_ms,
        );
    }

    resp
}

/// CORS policy from the configured allow-list (`*` means any origin).
pub fn cors_layer(cfg: &Config) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([
            header::ORIGIN,
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
            HeaderName::from_static("x-api-key"),
        ]);

    match cfg.origin_list() {
        None => layer.allow_origin(Any),
        Some(origins) => {
            let origins: Vec<HeaderValue> = origins
                .iter()
                .filter_map(|origin| origin.parse().ok())
                .collect();
            layer.allow_origin(AllowOrigin::list(origins))
        }
    }
}

/// Builds the full application router. Write access is enforced inside
/// the protected handlers via the [`RequireApiKey`] extractor; public and
/// protected operations share route paths, so a subrouter-level auth
/// layer would not cut at the right granularity.
///
/// [`RequireApiKey`]: crate::server::guards::RequireApiKey
pub fn api_router(state: AppState) -> Router {
    let v1 = Router::new()
        .route("/health", get(health))
        .route("/projects", get(projects::list).post(projects::create))
        .route(
            "/projects/{id}",
            get(projects::get_by_id)
                .put(projects::update)
                .delete(projects::remove),
        )
        .route(
            "/experience",
            get(experience::list).post(experience::create),
        )
        .route(
            "/experience/{id}",
            get(experience::get_by_id)
                .put(experience::update)
                .delete(experience::remove),
        )
        .route("/docs", get(docs::list).post(docs::create))
        .route("/docs/{slug}", get(docs::get_by_slug))
        .route("/docs/category/{category}", get(docs::list_by_category))
        .route(
            "/docs/id/{id}",
            get(docs::get_by_id).put(docs::update).delete(docs::remove),
        )
        .route("/contact", post(contact::submit))
        .route("/messages", get(contact::list))
        .route("/messages/unread", get(contact::list_unread))
        .route(
            "/messages/{id}",
            get(contact::get_by_id).delete(contact::remove),
        )
        .route("/messages/{id}/read", put(contact::mark_read))
        .route("/test-email", post(contact::test_email));

    Router::new()
        .route("/health", get(health))
        .nest("/api/v1", v1)
        .fallback(not_found_handler)
        .with_state(state)
        .layer(middleware::from_fn(access_log))
}
