//! Contacts Worker - background job entry point
//!
//! Runs the synthetic-contact and aged-purge jobs against the configured
//! database without serving HTTP. Use together with `RUN_JOBS=false` on the
//! server so that the jobs run in exactly one process.

use anyhow::Context;
use tracing::{info, warn};

use contacts_api::shutdown::wait_for_signal;
use contacts_api::telemetry::init_tracing;
use contacts_api::{spawn_purge_task, spawn_synthetic_contact_task, Config, Database};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let config = Config::from_env();
    info!(
        "Starting contacts worker: database={}, synthetic_interval={}s, purge_interval={}s, purge_max_age={}s",
        config.database_path,
        config.synthetic_interval,
        config.purge_interval,
        config.purge_max_age
    );

    let db = Database::open(&config.database_path)
        .with_context(|| format!("failed to open database {}", config.database_path))?;

    let synthetic = spawn_synthetic_contact_task(db.clone(), config.synthetic_interval);
    let purge = spawn_purge_task(db, config.purge_interval, config.purge_max_age);

    wait_for_signal().await;

    synthetic.abort();
    purge.abort();
    warn!("Background jobs aborted");

    info!("Worker shutdown complete");
    Ok(())
}
