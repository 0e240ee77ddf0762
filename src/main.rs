//! GradeUp NIL backend service
//!
//! Serves the JSON API used by the athlete, brand and athletic director dashboards.

use gradeup_nil::database::{create_pool, run_migrations};
use gradeup_nil::http::build_router;
use gradeup_nil::{AppConfig, AppError, AppResult, AppState};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{error, info, warn};

#[tokio::main]
async fn main() -> AppResult<()> {
    // Load environment variables first
    dotenv::dotenv().ok();

    let config = AppConfig::from_env().map_err(|e| {
        eprintln!("Configuration error: {}", e);
        AppError::Config(e)
    })?;

    init_tracing(&config);

    info!("╔══════════════════════════════════════════════════════════╗");
    info!("║           GradeUp NIL Service Starting                   ║");
    info!("╚══════════════════════════════════════════════════════════╝");
    info!("Environment: {}", config.environment);
    info!("Log level: {}", config.log_level);
    info!("HTTP port: {}", config.http_port);
    info!("Auth provider: {}", config.auth.url);

    // =========================================================================
    // DATABASE
    // =========================================================================
    info!("Connecting to database...");

    let pool = create_pool(&config.database).await.map_err(|e| {
        let err = AppError::Database(e);
        if err.is_connection_error() {
            error!("Database unreachable, check DATABASE_URL: {}", err);
        } else {
            error!("Failed to create database pool: {}", err);
        }
        err
    })?;

    info!("Database connection pool created successfully");
    info!("Max connections: {}", config.database.max_connections);

    info!("Running database migrations...");
    run_migrations(&pool).await.map_err(|e| {
        error!("Database migration failed: {}", e);
        AppError::Database(e)
    })?;

    info!("Database migrations completed successfully");

    // =========================================================================
    // SERVICES
    // =========================================================================
    if !config.email.delivery_enabled() {
        warn!("SMTP_HOST not configured - emails will be logged, not sent");
    }

    let state = Arc::new(AppState::new(pool, &config)?);
    info!("✓ Services initialized");

    let addr: SocketAddr = format!("0.0.0.0:{}", config.http_port)
        .parse()
        .map_err(|e| AppError::Config(format!("Invalid HTTP address: {}", e)))?;

    let listener = TcpListener::bind(addr)
        .await
        .map_err(|e| AppError::Message(format!("Failed to bind HTTP server: {}", e)))?;

    info!("╔══════════════════════════════════════════════════════════╗");
    info!("║           GradeUp NIL Service Ready!                     ║");
    info!("╠══════════════════════════════════════════════════════════╣");
    info!("║  HTTP API:     {}                              ║", addr);
    info!("║  Environment:  {}                                    ║", config.environment);
    info!("╚══════════════════════════════════════════════════════════╝");
    info!("Press Ctrl+C to shutdown gracefully");

    axum::serve(listener, build_router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| AppError::Message(format!("HTTP server error: {}", e)))?;

    info!("GradeUp NIL service shutdown complete");
    Ok(())
}

fn init_tracing(config: &AppConfig) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        format!(
            "gradeup_nil={},sqlx=warn,tower_http=info",
            config.log_level
        )
        .into()
    });

    if config.is_production() {
        tracing_subscriber::fmt().json().with_env_filter(filter).init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received, shutting down gracefully...");
}
