//! Contacts API - HTTP server entry point
//!
//! Serves the contacts REST API and, unless `RUN_JOBS=false`, also drives the
//! background jobs in-process.

use std::net::SocketAddr;

use anyhow::Context;
use tokio::task::JoinHandle;
use tracing::{info, warn};

use contacts_api::api::create_router;
use contacts_api::db::seed_demo_data;
use contacts_api::shutdown::wait_for_signal;
use contacts_api::telemetry::init_tracing;
use contacts_api::{spawn_purge_task, spawn_synthetic_contact_task, AppState, Config, Database};

/// Main entry point for the contacts server.
///
/// # Startup Sequence
/// 1. Initialize tracing subscriber for logging
/// 2. Load configuration from environment variables
/// 3. Open the database and apply migrations (optionally seed demo data)
/// 4. Start background jobs when enabled
/// 5. Create Axum router with all endpoints
/// 6. Start HTTP server on configured port
/// 7. Handle graceful shutdown on SIGINT/SIGTERM
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    info!("Starting Contacts API server");

    let config = Config::from_env();
    info!(
        "Configuration loaded: port={}, database={}, run_jobs={}, synthetic_interval={}s, purge_interval={}s, purge_max_age={}s",
        config.server_port,
        config.database_path,
        config.run_jobs,
        config.synthetic_interval,
        config.purge_interval,
        config.purge_max_age
    );

    let db = Database::open(&config.database_path)
        .with_context(|| format!("failed to open database {}", config.database_path))?;

    if config.seed_demo_data {
        db.call(seed_demo_data)
            .await
            .context("failed to seed demo data")?;
    }

    let job_handles = if config.run_jobs {
        let handles = vec![
            spawn_synthetic_contact_task(db.clone(), config.synthetic_interval),
            spawn_purge_task(db.clone(), config.purge_interval, config.purge_max_age),
        ];
        info!("Background jobs started");
        handles
    } else {
        info!("Background jobs disabled; run contacts_worker separately");
        Vec::new()
    };

    let app = create_router(AppState::new(db));

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server_port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    info!("Server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(job_handles))
        .await
        .context("server error")?;

    info!("Server shutdown complete");
    Ok(())
}

/// Waits for shutdown signal (Ctrl+C or SIGTERM), then aborts the job tasks.
async fn shutdown_signal(job_handles: Vec<JoinHandle<()>>) {
    wait_for_signal().await;

    for handle in &job_handles {
        handle.abort();
    }
    if !job_handles.is_empty() {
        warn!("Background jobs aborted");
    }
}
