use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use jambakan_api::background::session_reaper;
use jambakan_api::bootstrap::ensure_admin;
use jambakan_api::config::ServerConfig;
use jambakan_api::router::build_app_router;
use jambakan_api::state::AppState;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "jambakan_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // --- Configuration ---
    let config = ServerConfig::from_env();
    tracing::info!(
        host = %config.host,
        port = %config.port,
        upload_dir = %config.upload.dir.display(),
        idle_mins = config.session.idle_timeout.num_minutes(),
        max_mins = config.session.max_lifetime.num_minutes(),
        "Loaded server configuration"
    );

    // --- Database ---
    let connect_options = config
        .database
        .connect_options()
        .expect("Invalid database configuration");

    let pool = jambakan_db::create_pool(connect_options, config.database.max_connections)
        .await
        .expect("Failed to connect to database");
    tracing::info!("Database connection pool created");

    jambakan_db::health_check(&pool)
        .await
        .expect("Database health check failed");
    tracing::info!("Database health check passed");

    jambakan_db::run_migrations(&pool)
        .await
        .expect("Failed to run database migrations");
    tracing::info!("Database migrations applied");

    // --- Admin bootstrap ---
    ensure_admin(&pool, &config.admin)
        .await
        .expect("Failed to bootstrap admin account");

    // --- Session reaper ---
    let reaper_cancel = tokio_util::sync::CancellationToken::new();
    let reaper_handle = tokio::spawn(session_reaper::run(
        pool.clone(),
        config.session,
        reaper_cancel.clone(),
    ));

    // --- App state ---
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
    };

    let app = build_app_router(state, &config);

    // --- Start server ---
    let addr = SocketAddr::new(
        config.host.parse().expect("Invalid HOST address"),
        config.port,
    );
    tracing::info!(%addr, "Starting server");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");

    // --- Post-shutdown cleanup ---
    tracing::info!("Server stopped accepting connections, cleaning up");

    reaper_cancel.cancel();
    let _ = tokio::time::timeout(Duration::from_secs(5), reaper_handle).await;
    tracing::info!("Session reaper stopped");

    tracing::info!("Graceful shutdown complete");
}

/// Wait for SIGINT (Ctrl-C) or, on Unix, SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl-C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received SIGINT (Ctrl-C), starting graceful shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        }
    }
}
