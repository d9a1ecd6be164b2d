#![allow(dead_code)]

use std::sync::Arc;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use internhub_api::auth::google::{AssertionError, GoogleConfig, GoogleIdentity, IdTokenVerifier};
use internhub_api::auth::jwt::JwtConfig;
use internhub_api::config::ServerConfig;
use internhub_api::router::build_app_router;
use internhub_api::state::AppState;
use internhub_db::models::internship::{CreateInternship, Internship};
use internhub_db::repositories::InternshipRepo;
use sqlx::PgPool;
use tower::ServiceExt;

pub const TEST_SECRET: &str = "test-secret-that-is-long-enough-for-hmac";
pub const TEST_CLIENT_ID: &str = "test-client-id.apps.googleusercontent.com";

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        seed_sample_internships: false,
        jwt: JwtConfig {
            secret: TEST_SECRET.to_string(),
            expiry_days: 7,
        },
        google: GoogleConfig {
            client_id: TEST_CLIENT_ID.to_string(),
            client_secret: String::new(),
            tokeninfo_url: "http://127.0.0.1:9/tokeninfo".to_string(),
            verify_timeout_secs: 1,
            allow_unverified: false,
        },
    }
}

/// Deterministic stand-in for Google.
///
/// Accepts tokens of the form `good:<sub>:<email>[:<name>]`; everything else
/// is rejected as if the audience did not match.
pub struct FakeVerifier;

#[async_trait]
impl IdTokenVerifier for FakeVerifier {
    async fn verify(&self, id_token: &str) -> Result<GoogleIdentity, AssertionError> {
        let mut parts = id_token.split(':');
        match (parts.next(), parts.next(), parts.next()) {
            (Some("good"), Some(sub), Some(email)) => Ok(GoogleIdentity {
                google_id: sub.to_string(),
                email: Some(email.to_string()).filter(|e| !e.is_empty()),
                name: parts.next().map(str::to_string),
            }),
            _ => Err(AssertionError::AudienceMismatch),
        }
    }
}

/// Build the full application router with the production middleware stack.
pub fn build_test_app(pool: PgPool) -> Router {
    build_test_app_with(pool, test_config())
}

pub fn build_test_app_with(pool: PgPool, config: ServerConfig) -> Router {
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        id_verifier: Arc::new(FakeVerifier),
    };
    build_app_router(state, &config)
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

async fn send(app: Router, request: Request<Body>) -> Response<Body> {
    app.oneshot(request).await.unwrap()
}

fn json_request(
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: serde_json::Value,
) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(CONTENT_TYPE, "application/json");
    if let Some(token) = token {
        builder = builder.header(AUTHORIZATION, format!("Bearer {token}"));
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

fn empty_request(method: Method, uri: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(AUTHORIZATION, format!("Bearer {token}"));
    }
    builder.body(Body::empty()).unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    send(app, empty_request(Method::GET, uri, None)).await
}

pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, empty_request(Method::GET, uri, Some(token))).await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send(app, json_request(Method::POST, uri, None, body)).await
}

pub async fn post_json_auth(
    app: Router,
    uri: &str,
    token: &str,
    body: serde_json::Value,
) -> Response<Body> {
    send(app, json_request(Method::POST, uri, Some(token), body)).await
}

pub async fn post_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, empty_request(Method::POST, uri, Some(token))).await
}

pub async fn put_json_auth(
    app: Router,
    uri: &str,
    token: &str,
    body: serde_json::Value,
) -> Response<Body> {
    send(app, json_request(Method::PUT, uri, Some(token), body)).await
}

pub async fn delete_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, empty_request(Method::DELETE, uri, Some(token))).await
}

/// Send a request with an arbitrary raw body (for malformed-JSON tests).
pub async fn post_raw(app: Router, uri: &str, body: &'static str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from(body))
        .unwrap();
    send(app, request).await
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

/// Sign up through the API and return `(user_id, token)`.
pub async fn signup(app: &Router, email: &str, password: &str) -> (i64, String) {
    let body = serde_json::json!({ "email": email, "password": password });
    let response = post_json(app.clone(), "/api/auth/signup", body).await;
    assert_eq!(response.status(), axum::http::StatusCode::CREATED);
    let json = body_json(response).await;
    (
        json["user_id"].as_i64().unwrap(),
        json["token"].as_str().unwrap().to_string(),
    )
}

/// Insert a listing directly through the repository.
pub async fn create_internship(
    pool: &PgPool,
    title: &str,
    company: &str,
    location: &str,
) -> Internship {
    let input = CreateInternship {
        title: title.to_string(),
        company: company.to_string(),
        location: Some(location.to_string()),
        description: Some(format!("{title} at {company}")),
        url: Some("https://example.com/jobs/1".to_string()),
        requirements: Some("Rust".to_string()),
        salary_range: None,
        duration: None,
        application_deadline: None,
    };
    InternshipRepo::create(pool, &input).await.unwrap()
}

/// Number of applications a user holds for a listing.
pub async fn count_applications(pool: &PgPool, user_id: i64, internship_id: i64) -> i64 {
    let row: (i64,) = sqlx::query_as(
        "SELECT COUNT(*) FROM applications WHERE user_id = $1 AND internship_id = $2",
    )
    .bind(user_id)
    .bind(internship_id)
    .fetch_one(pool)
    .await
    .unwrap();
    row.0
}

/// Number of tracking rows recorded for an application.
pub async fn count_tracking(pool: &PgPool, application_id: i64) -> i64 {
    let row: (i64,) =
        sqlx::query_as("SELECT COUNT(*) FROM application_tracking WHERE application_id = $1")
            .bind(application_id)
            .fetch_one(pool)
            .await
            .unwrap();
    row.0
}
