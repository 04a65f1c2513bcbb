//! Aged Purge Task
//!
//! Background task that periodically removes contacts past the retention window.

use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{debug, error, info};

use crate::contacts::ContactRepository;
use crate::db::Database;

/// Runs one purge of contacts created more than `max_age` ago.
///
/// Owned emails are removed with their contact. Returns the number of contacts
/// removed, or `None` when the run failed; failures are logged, not propagated.
pub async fn run_purge_job(db: &Database, max_age: Duration) -> Option<usize> {
    let result = db
        .call(move |conn| ContactRepository::new(conn).purge_older_than(max_age))
        .await;

    match result {
        Ok(removed) => {
            if removed > 0 {
                info!("Aged purge: removed {} contact(s)", removed);
            } else {
                debug!("Aged purge: no contacts older than {:?}", max_age);
            }
            Some(removed)
        }
        Err(err) => {
            error!("Aged purge failed: {}", err);
            None
        }
    }
}

/// Spawns a background task that purges aged contacts every `interval_secs`.
///
/// # Arguments
/// * `db` - Shared database handle
/// * `interval_secs` - Interval in seconds between purge runs
/// * `max_age_secs` - Contacts created longer ago than this are removed
pub fn spawn_purge_task(db: Database, interval_secs: u64, max_age_secs: u64) -> JoinHandle<()> {
    let interval = Duration::from_secs(interval_secs);
    let max_age = Duration::from_secs(max_age_secs);

    tokio::spawn(async move {
        info!(
            "Starting aged purge task with interval of {} seconds (max age {} seconds)",
            interval_secs, max_age_secs
        );

        loop {
            tokio::time::sleep(interval).await;
            run_purge_job(&db, max_age).await;
        }
    })
}
