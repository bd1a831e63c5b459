//! Integration tests for the admin session supervisor.
//!
//! Clocks are moved by rewriting `admin_sessions` timestamps rather than by
//! sleeping. The default policy is 15 minutes idle, a 2 minute warning and
//! a 30 minute lifetime cap.

mod common;

use axum::http::StatusCode;
use common::{admin_token, body_json, get, get_auth, post_auth, post_json_auth};
use serde_json::json;
use sqlx::PgPool;

/// Push the session's idle clock `mins` minutes into the past.
async fn idle_for(pool: &PgPool, mins: i32) {
    sqlx::query(
        "UPDATE admin_sessions SET last_activity_at = NOW() - make_interval(mins => $1)",
    )
    .bind(mins)
    .execute(pool)
    .await
    .unwrap();
}

/// Pretend the session started `mins` minutes ago.
async fn started_ago(pool: &PgPool, mins: i32) {
    sqlx::query("UPDATE admin_sessions SET started_at = NOW() - make_interval(mins => $1)")
        .bind(mins)
        .execute(pool)
        .await
        .unwrap();
}

async fn is_revoked(pool: &PgPool) -> bool {
    let (revoked,): (bool,) = sqlx::query_as("SELECT is_revoked FROM admin_sessions LIMIT 1")
        .fetch_one(pool)
        .await
        .unwrap();
    revoked
}

// ---------------------------------------------------------------------------
// Status
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_fresh_session_is_active(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let token = admin_token(&pool, app.clone()).await;

    let response = get_auth(app, "/api/v1/auth/session", &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["state"], "active");
    assert!(json["data"]["session_expires_at"].is_string());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_session_status_requires_token(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = get(app, "/api/v1/auth/session").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_warning_after_thirteen_idle_minutes(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let token = admin_token(&pool, app.clone()).await;
    idle_for(&pool, 13).await;

    let json = body_json(get_auth(app.clone(), "/api/v1/auth/session", &token).await).await;
    assert_eq!(json["data"]["state"], "warning");
    let remaining = json["data"]["remaining_secs"].as_i64().unwrap();
    assert!((118..=120).contains(&remaining), "got: {remaining}");

    // Polling the status does not count as activity.
    let json = body_json(get_auth(app, "/api/v1/auth/session", &token).await).await;
    assert_eq!(json["data"]["state"], "warning");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_activity_clears_warning(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let token = admin_token(&pool, app.clone()).await;
    idle_for(&pool, 14).await;

    let response = post_auth(app.clone(), "/api/v1/auth/session/activity", &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["state"], "active");

    let json = body_json(get_auth(app, "/api/v1/auth/session", &token).await).await;
    assert_eq!(json["data"]["state"], "active");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_admin_request_counts_as_activity(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let token = admin_token(&pool, app.clone()).await;
    idle_for(&pool, 14).await;

    let response = post_json_auth(
        app.clone(),
        "/api/v1/gallery",
        json!({ "title": "Panen raya" }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let json = body_json(get_auth(app, "/api/v1/auth/session", &token).await).await;
    assert_eq!(json["data"]["state"], "active");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_public_reads_ignore_stale_token(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let token = admin_token(&pool, app.clone()).await;
    idle_for(&pool, 20).await;

    let response = get_auth(app.clone(), "/api/v1/gallery", &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let response = get_auth(app.clone(), "/api/v1/activities/1", &token).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    // Draft reads still check the session.
    let response = get_auth(app, "/api/v1/activities?include_drafts=true", &token).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_reads_do_not_count_as_activity(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let token = admin_token(&pool, app.clone()).await;
    idle_for(&pool, 14).await;

    let response = get_auth(app.clone(), "/api/v1/gallery", &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let response = get_auth(app.clone(), "/api/v1/activities?include_drafts=true", &token).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(get_auth(app, "/api/v1/auth/session", &token).await).await;
    assert_eq!(json["data"]["state"], "warning");
}

// ---------------------------------------------------------------------------
// Expiry
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_idle_session_expires(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let token = admin_token(&pool, app.clone()).await;
    idle_for(&pool, 16).await;

    let response = post_auth(app.clone(), "/api/v1/auth/session/activity", &token).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let json = body_json(response).await;
    assert_eq!(json["error"], "Session expired");
    assert!(is_revoked(&pool).await);

    // Once revoked, a later request sees an inactive session.
    let response = get_auth(app, "/api/v1/auth/session", &token).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_lifetime_cap_applies_despite_activity(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let token = admin_token(&pool, app.clone()).await;
    started_ago(&pool, 31).await;

    let response = get_auth(app, "/api/v1/auth/session", &token).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert!(is_revoked(&pool).await);
}

// ---------------------------------------------------------------------------
// Extend
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_extend_restarts_both_clocks(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let token = admin_token(&pool, app.clone()).await;
    started_ago(&pool, 25).await;
    idle_for(&pool, 13).await;

    let response = post_auth(app.clone(), "/api/v1/auth/session/extend", &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    let new_token = json["access_token"].as_str().unwrap().to_string();
    assert_ne!(new_token, token);
    assert_eq!(json["session"]["state"], "active");
    let expires_in = json["expires_in"].as_i64().unwrap();
    assert!((30 * 60 - 5..=30 * 60).contains(&expires_in), "got: {expires_in}");

    // Ten more minutes would have crossed the original cap.
    started_ago(&pool, 10).await;
    let response = get_auth(app, "/api/v1/auth/session", &new_token).await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_extend_after_expiry_fails(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let token = admin_token(&pool, app.clone()).await;
    idle_for(&pool, 15).await;

    let response = post_auth(app, "/api/v1/auth/session/extend", &token).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert!(is_revoked(&pool).await);
}

// ---------------------------------------------------------------------------
// Resume
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_resume_within_cap_restores_idle_session(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let token = admin_token(&pool, app.clone()).await;
    started_ago(&pool, 20).await;
    idle_for(&pool, 20).await;

    let response = post_auth(app.clone(), "/api/v1/auth/session/resume", &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["state"], "active");

    let json = body_json(get_auth(app, "/api/v1/auth/session", &token).await).await;
    assert_eq!(json["data"]["state"], "active");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_resume_past_cap_is_rejected(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let token = admin_token(&pool, app.clone()).await;
    started_ago(&pool, 31).await;

    let response = post_auth(app, "/api/v1/auth/session/resume", &token).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert!(is_revoked(&pool).await);
}
