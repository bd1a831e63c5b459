//! Tests for startup and background jobs: the session reaper and the
//! first-run admin bootstrap.

mod common;

use assert_matches::assert_matches;
use chrono::{Duration, Utc};
use jambakan_api::background::session_reaper::reap_once;
use jambakan_api::bootstrap::{ensure_admin, BootstrapOutcome};
use jambakan_api::config::AdminBootstrapConfig;
use jambakan_api::error::AppError;
use jambakan_core::session::SessionPolicy;
use jambakan_db::models::admin_session::CreateAdminSession;
use jambakan_db::repositories::{AdminSessionRepo, AdminUserRepo};
use sqlx::PgPool;

fn bootstrap_config(password: Option<&str>) -> AdminBootstrapConfig {
    AdminBootstrapConfig {
        username: "kades".to_string(),
        password: password.map(str::to_string),
        email: "kades@desajambakan.id".to_string(),
    }
}

// ---------------------------------------------------------------------------
// Session reaper
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_reaper_revokes_only_sessions_past_lifetime(pool: PgPool) {
    let admin = common::create_admin(&pool, "admin").await;
    let now = Utc::now();

    let old = AdminSessionRepo::create(
        &pool,
        &CreateAdminSession {
            user_id: admin.id,
            started_at: now - Duration::minutes(31),
            user_agent: None,
        },
    )
    .await
    .unwrap();

    // Idle for 20 minutes but inside the cap: left for resume.
    let idle = AdminSessionRepo::create(
        &pool,
        &CreateAdminSession {
            user_id: admin.id,
            started_at: now - Duration::minutes(20),
            user_agent: None,
        },
    )
    .await
    .unwrap();

    let (revoked, deleted) = reap_once(&pool, SessionPolicy::default()).await.unwrap();
    assert_eq!(revoked, 1);
    assert_eq!(deleted, 0, "freshly revoked rows are retained");

    let old = AdminSessionRepo::find_by_id(&pool, old.id).await.unwrap().unwrap();
    assert!(old.is_revoked);
    let idle = AdminSessionRepo::find_by_id(&pool, idle.id).await.unwrap().unwrap();
    assert!(!idle.is_revoked);

    let (revoked, _) = reap_once(&pool, SessionPolicy::default()).await.unwrap();
    assert_eq!(revoked, 0);
}

// ---------------------------------------------------------------------------
// Admin bootstrap
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_bootstrap_creates_admin_once(pool: PgPool) {
    let config = bootstrap_config(Some("gamelan-2026"));

    let outcome = ensure_admin(&pool, &config).await.unwrap();
    assert_eq!(outcome, BootstrapOutcome::Created("kades".to_string()));

    let outcome = ensure_admin(&pool, &config).await.unwrap();
    assert_eq!(outcome, BootstrapOutcome::Existing);
    assert_eq!(AdminUserRepo::count(&pool).await.unwrap(), 1);

    let app = common::build_test_app(pool);
    let response = common::login(app, "kades", "gamelan-2026").await;
    assert_eq!(response.status(), axum::http::StatusCode::OK);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_bootstrap_skipped_without_password(pool: PgPool) {
    let outcome = ensure_admin(&pool, &bootstrap_config(None)).await.unwrap();
    assert_eq!(outcome, BootstrapOutcome::Skipped);
    assert_eq!(AdminUserRepo::count(&pool).await.unwrap(), 0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_bootstrap_rejects_short_password(pool: PgPool) {
    let result = ensure_admin(&pool, &bootstrap_config(Some("pendek"))).await;
    assert_matches!(result, Err(AppError::BadRequest(_)));
    assert_eq!(AdminUserRepo::count(&pool).await.unwrap(), 0);
}
