//! Persistence layer: connection pool, migrations, models and repositories.

pub mod models;
pub mod repositories;
pub mod resource;

use sqlx::postgres::{PgConnectOptions, PgPoolOptions};

pub use resource::Resource;

pub type DbPool = sqlx::PgPool;

/// Create a connection pool.
///
/// Every handler borrows a connection from this pool for the duration of a
/// single statement; sqlx returns it on every exit path, including errors.
pub async fn create_pool(
    options: PgConnectOptions,
    max_connections: u32,
) -> Result<DbPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(max_connections)
        .connect_with(options)
        .await
}

/// Round-trip a trivial query to confirm the database is reachable.
pub async fn health_check(pool: &DbPool) -> Result<(), sqlx::Error> {
    sqlx::query_scalar::<_, i32>("SELECT 1")
        .fetch_one(pool)
        .await
        .map(|_| ())
}

/// Apply pending migrations from `db/migrations`.
pub async fn run_migrations(pool: &DbPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("../../db/migrations").run(pool).await
}
