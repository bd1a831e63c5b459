use sqlx::PgPool;

/// Full bootstrap test: connect, migrate, verify schema.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_full_bootstrap(pool: PgPool) {
    jambakan_db::health_check(&pool).await.unwrap();

    let tables = [
        "activities",
        "gallery",
        "karawitan",
        "tenun_products",
        "struktur_members",
        "desa_profile",
        "desa_demographics",
        "admin_users",
        "admin_sessions",
    ];

    for table in tables {
        let count: (i64,) = sqlx::query_as(&format!("SELECT COUNT(*) FROM {table}"))
            .fetch_one(&pool)
            .await
            .unwrap_or_else(|e| panic!("{table} query failed: {e}"));
        assert_eq!(count.0, 0, "{table} should start empty");
    }
}

/// `updated_at` is maintained by the shared trigger.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_updated_at_trigger_fires(pool: PgPool) {
    let (id, created): (i64, chrono::DateTime<chrono::Utc>) = sqlx::query_as(
        "INSERT INTO gallery (title, updated_at) VALUES ('Sawah', NOW() - INTERVAL '1 hour')
         RETURNING id, updated_at",
    )
    .fetch_one(&pool)
    .await
    .unwrap();

    let (updated,): (chrono::DateTime<chrono::Utc>,) =
        sqlx::query_as("UPDATE gallery SET title = 'Sawah Hijau' WHERE id = $1 RETURNING updated_at")
            .bind(id)
            .fetch_one(&pool)
            .await
            .unwrap();

    assert!(updated > created);
}
