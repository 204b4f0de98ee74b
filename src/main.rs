//! PanelKit Server — Admin Panel Backend
//!
//! Main entry point that wires all crates together and starts the server.

use std::sync::Arc;

use tracing;
use tracing_subscriber::{EnvFilter, fmt};

use panelkit_core::config::AppConfig;
use panelkit_core::error::AppError;

#[tokio::main]
async fn main() {
    let config = match load_configuration() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    init_logging(&config);

    if let Err(e) = run(config).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}

/// Load configuration from file and environment
fn load_configuration() -> Result<AppConfig, AppError> {
    let env = std::env::var("PANELKIT_ENV").unwrap_or_else(|_| "development".to_string());
    AppConfig::load(&env)
}

/// Initialize tracing/logging
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .with_thread_ids(true)
                .init();
        }
        _ => {
            fmt()
                .pretty()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
    }
}

/// Main server run function
async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!("Starting PanelKit v{}", env!("CARGO_PKG_VERSION"));

    // ── Step 1: Database connection + migrations ─────────────────
    tracing::info!("Connecting to database...");
    let pool = panelkit_database::DatabasePool::connect(&config.database).await?;

    tracing::info!("Running database migrations...");
    panelkit_database::migration::run_migrations(pool.pool()).await?;
    tracing::info!("Database migrations complete");

    // ── Step 2: Wire stores and application state ────────────────
    let store = Arc::new(panelkit_database::PgStore::new(pool.pool().clone()));

    let state = panelkit_api::AppState::build(
        Arc::new(config.clone()),
        Arc::clone(&store) as Arc<dyn panelkit_auth::SessionStore>,
        Arc::clone(&store) as Arc<dyn panelkit_auth::PrincipalStore>,
        Arc::clone(&store) as Arc<dyn panelkit_auth::RbacStore>,
    )?;

    // ── Step 3: Seed the first superuser, if configured ──────────
    if let (Ok(email), Ok(password)) = (
        std::env::var("PANELKIT_BOOTSTRAP_EMAIL"),
        std::env::var("PANELKIT_BOOTSTRAP_PASSWORD"),
    ) {
        let hasher = panelkit_auth::PasswordHasher::new(&config.auth)?;
        panelkit_auth::bootstrap::ensure_super_admin(
            &*store,
            &*store,
            &hasher,
            &email,
            &password,
        )
        .await?;
    }

    // ── Step 4: Start the maintenance scheduler ──────────────────
    tracing::info!("Starting maintenance scheduler...");
    let sweeper = Arc::new(panelkit_worker::SessionSweeper::new(Arc::clone(
        &state.session_manager,
    )));

    let mut scheduler = panelkit_worker::MaintenanceScheduler::new().await?;
    scheduler
        .register_session_sweep(sweeper, config.session.sweep_interval_minutes)
        .await?;
    scheduler.start().await?;

    // ── Step 5: Build and start HTTP server ──────────────────────
    let app = panelkit_api::build_router(state);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {}: {}", addr, e)))?;

    tracing::info!("PanelKit server listening on {}", addr);

    let server = axum::serve(listener, app).with_graceful_shutdown(async move {
        shutdown_signal().await;
        tracing::info!("Shutdown signal received, starting graceful shutdown...");
    });

    server
        .await
        .map_err(|e| AppError::internal(format!("Server error: {}", e)))?;

    // ── Step 6: Stop background tasks ────────────────────────────
    scheduler.shutdown().await?;
    pool.close().await;

    tracing::info!("PanelKit server shut down gracefully");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
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
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
