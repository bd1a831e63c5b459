#![allow(dead_code)]

use std::path::Path;
use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use jambakan_api::auth::jwt::JwtConfig;
use jambakan_api::auth::password::hash_password;
use jambakan_api::config::{AdminBootstrapConfig, DatabaseConfig, ServerConfig, UploadConfig};
use jambakan_api::router::build_app_router;
use jambakan_api::state::AppState;
use jambakan_core::session::SessionPolicy;
use jambakan_db::models::admin_user::{AdminUser, CreateAdminUser};
use jambakan_db::repositories::AdminUserRepo;
use serde_json::Value;
use sqlx::PgPool;
use tower::ServiceExt;

pub const TEST_USERNAME: &str = "admin";
pub const TEST_PASSWORD: &str = "jambakan-rahasia-1";

/// Build a test `ServerConfig` with safe defaults and the default session
/// policy (15 / 2 / 30 minutes).
pub fn test_config(upload_dir: &Path) -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:3000".to_string()],
        request_timeout_secs: 30,
        database: DatabaseConfig {
            url: None,
            host: "localhost".to_string(),
            port: 5432,
            user: "postgres".to_string(),
            password: String::new(),
            name: "desa_jambakan".to_string(),
            max_connections: 5,
        },
        jwt: JwtConfig {
            secret: "test-secret-that-is-long-enough-for-hmac".to_string(),
        },
        session: SessionPolicy::default(),
        upload: UploadConfig {
            dir: upload_dir.to_path_buf(),
            prefix: "upload".to_string(),
        },
        admin: AdminBootstrapConfig {
            username: TEST_USERNAME.to_string(),
            password: None,
            email: "admin@desajambakan.id".to_string(),
        },
    }
}

/// Build the full application router (same middleware stack as `main.rs`).
///
/// Uploads go to a directory that is never created; tests that upload use
/// [`build_test_app_with_uploads`].
pub fn build_test_app(pool: PgPool) -> Router {
    let dir = std::env::temp_dir().join("jambakan-api-tests-unused-uploads");
    build_test_app_with_uploads(pool, &dir)
}

pub fn build_test_app_with_uploads(pool: PgPool, upload_dir: &Path) -> Router {
    let config = test_config(upload_dir);
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
    };
    build_app_router(state, &config)
}

// ---------------------------------------------------------------------------
// Accounts
// ---------------------------------------------------------------------------

/// Insert an admin with [`TEST_PASSWORD`] directly in the database.
pub async fn create_admin(pool: &PgPool, username: &str) -> AdminUser {
    let input = CreateAdminUser {
        username: username.to_string(),
        email: format!("{username}@desajambakan.id"),
        password_hash: hash_password(TEST_PASSWORD).expect("hashing should succeed"),
    };
    AdminUserRepo::create(pool, &input)
        .await
        .expect("admin creation should succeed")
}

/// Log in through the API and return the full JSON response.
pub async fn login(app: Router, username: &str, password: &str) -> Response<Body> {
    let body = serde_json::json!({ "username": username, "password": password });
    post_json(app, "/api/v1/auth/login", body).await
}

/// Create the default admin, log in, and return the access token.
pub async fn admin_token(pool: &PgPool, app: Router) -> String {
    create_admin(pool, TEST_USERNAME).await;
    let response = login(app, TEST_USERNAME, TEST_PASSWORD).await;
    assert_eq!(response.status(), axum::http::StatusCode::OK);
    let json = body_json(response).await;
    json["access_token"]
        .as_str()
        .expect("login must return access_token")
        .to_string()
}

// ---------------------------------------------------------------------------
// Requests
// ---------------------------------------------------------------------------

pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn send(
    app: Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> Response<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("Authorization", format!("Bearer {token}"));
    }
    let request = match body {
        Some(json) => builder
            .header("Content-Type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::GET, uri, None, None).await
}

pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, Method::GET, uri, Some(token), None).await
}

pub async fn post_json(app: Router, uri: &str, body: Value) -> Response<Body> {
    send(app, Method::POST, uri, None, Some(body)).await
}

pub async fn post_json_auth(app: Router, uri: &str, body: Value, token: &str) -> Response<Body> {
    send(app, Method::POST, uri, Some(token), Some(body)).await
}

pub async fn post_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, Method::POST, uri, Some(token), None).await
}

pub async fn put_json_auth(app: Router, uri: &str, body: Value, token: &str) -> Response<Body> {
    send(app, Method::PUT, uri, Some(token), Some(body)).await
}

pub async fn delete_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, Method::DELETE, uri, Some(token), None).await
}

/// A single-part multipart body; `field` is the form field name.
pub struct Part<'a> {
    pub field: &'a str,
    pub file_name: &'a str,
    pub content_type: &'a str,
    pub bytes: &'a [u8],
}

const BOUNDARY: &str = "jambakan-test-boundary";

pub async fn post_multipart(
    app: Router,
    uri: &str,
    part: Option<Part<'_>>,
    token: Option<&str>,
) -> Response<Body> {
    let mut body: Vec<u8> = Vec::new();
    if let Some(part) = part {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\nContent-Type: {}\r\n\r\n",
                part.field, part.file_name, part.content_type
            )
            .as_bytes(),
        );
        body.extend_from_slice(part.bytes);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());

    let mut builder = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(
            "Content-Type",
            format!("multipart/form-data; boundary={BOUNDARY}"),
        );
    if let Some(token) = token {
        builder = builder.header("Authorization", format!("Bearer {token}"));
    }
    app.oneshot(builder.body(Body::from(body)).unwrap())
        .await
        .unwrap()
}
