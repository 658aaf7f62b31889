#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{HeaderName, Method, Request, StatusCode};
use axum::response::Response;
use axum::Router;
use jsonwebtoken::{encode, EncodingKey, Header};
use sqlx::PgPool;
use tower::ServiceExt;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::CorsLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use tripkeep_api::auth::jwt::{Claims, JwtConfig};
use tripkeep_api::config::ServerConfig;
use tripkeep_api::routes;
use tripkeep_api::state::AppState;

/// Shared signing secret for tokens minted by tests.
pub const TEST_JWT_SECRET: &str = "integration-test-secret";

/// Build a test `ServerConfig` with safe defaults.
///
/// Uses `http://localhost:5173` as CORS origin (matching the dev default)
/// and a 30-second request timeout.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        shutdown_timeout_secs: 30,
        jwt: JwtConfig {
            secret: TEST_JWT_SECRET.to_string(),
        },
    }
}

/// Build the full application router with all middleware layers, using the
/// given database pool.
///
/// This mirrors the router construction in `main.rs` so integration tests
/// exercise the same middleware stack (CORS, request ID, timeout, tracing,
/// panic recovery) that production uses.
pub fn build_test_app(pool: PgPool) -> Router {
    let config = test_config();

    let state = AppState {
        pool,
        config: Arc::new(config),
    };

    let cors = CorsLayer::new()
        .allow_origin(["http://localhost:5173".parse().unwrap()])
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::PATCH,
        ])
        .allow_headers([CONTENT_TYPE, AUTHORIZATION])
        .allow_credentials(true)
        .max_age(Duration::from_secs(3600));

    let request_id_header = HeaderName::from_static("x-request-id");

    Router::new()
        .merge(routes::health::router())
        .nest("/api/v1", routes::api_routes())
        .layer(CatchPanicLayer::new())
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            Duration::from_secs(30),
        ))
        .layer(PropagateRequestIdLayer::new(request_id_header.clone()))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(SetRequestIdLayer::new(request_id_header, MakeRequestUuid))
        .layer(cors)
        .with_state(state)
}

/// Mint a bearer token for the given user id, signed with the test secret.
pub fn mint_token(user_id: i64) -> String {
    let now = chrono::Utc::now().timestamp();
    let claims = Claims {
        sub: user_id,
        exp: now + 3600,
        iat: now,
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(TEST_JWT_SECRET.as_bytes()),
    )
    .unwrap()
}

/// Insert a user row directly and return its id.
///
/// The ledger has no user-registration endpoint (users come from the
/// upstream identity service), so tests seed the directory by hand.
pub async fn seed_user(pool: &PgPool, full_name: &str) -> i64 {
    sqlx::query_scalar::<_, i64>(
        "INSERT INTO users (full_name, avatar) VALUES ($1, $2) RETURNING id",
    )
    .bind(full_name)
    .bind(format!("https://avatars.test/{full_name}.png"))
    .fetch_one(pool)
    .await
    .unwrap()
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

async fn send(
    app: Router,
    method: Method,
    path: &str,
    token: Option<&str>,
    body: Option<serde_json::Value>,
) -> Response {
    let mut builder = Request::builder().method(method).uri(path);
    if let Some(token) = token {
        builder = builder.header(AUTHORIZATION, format!("Bearer {token}"));
    }
    let request = match body {
        Some(json) => builder
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, path: &str, token: &str) -> Response {
    send(app, Method::GET, path, Some(token), None).await
}

pub async fn get_unauth(app: Router, path: &str) -> Response {
    send(app, Method::GET, path, None, None).await
}

pub async fn post_json(app: Router, path: &str, token: &str, body: serde_json::Value) -> Response {
    send(app, Method::POST, path, Some(token), Some(body)).await
}

pub async fn post_json_unauth(app: Router, path: &str, body: serde_json::Value) -> Response {
    send(app, Method::POST, path, None, Some(body)).await
}

pub async fn put_json(app: Router, path: &str, token: &str, body: serde_json::Value) -> Response {
    send(app, Method::PUT, path, Some(token), Some(body)).await
}

pub async fn patch_json(app: Router, path: &str, token: &str, body: serde_json::Value) -> Response {
    send(app, Method::PATCH, path, Some(token), Some(body)).await
}

pub async fn patch_empty(app: Router, path: &str, token: &str) -> Response {
    send(app, Method::PATCH, path, Some(token), None).await
}

pub async fn delete(app: Router, path: &str, token: &str) -> Response {
    send(app, Method::DELETE, path, Some(token), None).await
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = http_body_util::BodyExt::collect(response.into_body())
        .await
        .unwrap()
        .to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
