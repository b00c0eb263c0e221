use std::net::SocketAddr;
use std::time::Duration;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use ems_api::config::ServerConfig;
use ems_api::router::build_app_router;
use ems_api::services;
use ems_api::state::AppState;

/// How often stale rate-limit windows are swept.
const RATE_LIMIT_SWEEP: Duration = Duration::from_secs(300);
/// Entries idle for longer than the widest window are dropped.
const RATE_LIMIT_MAX_AGE: Duration = Duration::from_secs(60 * 60);

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "ems_api=debug,ems_db=info,tower_http=debug".into());
    let json_logs = std::env::var("LOG_FORMAT").is_ok_and(|v| v.eq_ignore_ascii_case("json"));
    if json_logs {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }

    // --- Configuration ---
    let config = ServerConfig::from_env();
    tracing::info!(host = %config.host, port = %config.port, "Loaded server configuration");

    // --- Database ---
    let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");

    let pool = ems_db::create_pool(&database_url)
        .await
        .expect("Failed to connect to database");
    tracing::info!("Database connection pool created");

    ems_db::health_check(&pool)
        .await
        .expect("Database health check failed");

    ems_db::run_migrations(&pool)
        .await
        .expect("Failed to run database migrations");
    tracing::info!("Database migrations applied");

    // --- Admin bootstrap ---
    if let Some(admin) = &config.bootstrap_admin {
        match services::auth::ensure_admin(&pool, admin).await {
            Ok(true) => tracing::info!(email = %admin.email, "Bootstrap admin created"),
            Ok(false) => tracing::debug!(email = %admin.email, "Bootstrap admin already present"),
            Err(e) => panic!("Failed to bootstrap admin identity: {e}"),
        }
    }

    // --- App state ---
    let state = AppState::new(pool, config.clone());

    // --- Rate limiter sweep ---
    let limiter = state.rate_limiter.clone();
    let sweep_handle = tokio::spawn(async move {
        let mut interval = tokio::time::interval(RATE_LIMIT_SWEEP);
        loop {
            interval.tick().await;
            limiter.cleanup(RATE_LIMIT_MAX_AGE).await;
        }
    });

    // --- Router ---
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

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await
    .expect("Server error");

    sweep_handle.abort();
    tracing::info!("Graceful shutdown complete");
}

/// Wait for SIGINT or, on Unix, SIGTERM.
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
