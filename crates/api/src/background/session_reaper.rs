//! Periodic cleanup of admin sessions.
//!
//! Revokes sessions past their lifetime cap and deletes revoked rows once
//! they have been dead for a retention window. Idle expiry is left to the
//! per-request check so a reload can still resume an idle session within
//! its cap.

use std::time::Duration;

use chrono::Utc;
use jambakan_core::session::SessionPolicy;
use jambakan_db::repositories::AdminSessionRepo;
use sqlx::PgPool;
use tokio_util::sync::CancellationToken;

/// How often the reaper runs.
pub const REAP_INTERVAL: Duration = Duration::from_secs(60);

/// How long revoked rows are kept before deletion.
const REVOKED_RETENTION_HOURS: i64 = 24;

/// Run a single reaping pass. Returns `(revoked, deleted)`.
pub async fn reap_once(
    pool: &PgPool,
    policy: SessionPolicy,
) -> Result<(u64, u64), sqlx::Error> {
    let now = Utc::now();
    let revoked = AdminSessionRepo::revoke_started_before(pool, now - policy.max_lifetime).await?;
    let deleted = AdminSessionRepo::delete_revoked(
        pool,
        now - chrono::Duration::hours(REVOKED_RETENTION_HOURS),
    )
    .await?;
    Ok((revoked, deleted))
}

/// Run the reaper loop until `cancel` is triggered.
pub async fn run(pool: PgPool, policy: SessionPolicy, cancel: CancellationToken) {
    tracing::info!(
        interval_secs = REAP_INTERVAL.as_secs(),
        max_lifetime_mins = policy.max_lifetime.num_minutes(),
        "Session reaper started"
    );

    let mut interval = tokio::time::interval(REAP_INTERVAL);

    loop {
        tokio::select! {
            _ = cancel.cancelled() => {
                tracing::info!("Session reaper stopping");
                break;
            }
            _ = interval.tick() => {
                match reap_once(&pool, policy).await {
                    Ok((0, 0)) => tracing::debug!("Session reaper: nothing to do"),
                    Ok((revoked, deleted)) => {
                        tracing::info!(revoked, deleted, "Session reaper: sessions cleaned up");
                    }
                    Err(e) => {
                        tracing::error!(error = %e, "Session reaper: cleanup failed");
                    }
                }
            }
        }
    }
}
