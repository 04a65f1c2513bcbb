//! Synthetic Contact Task
//!
//! Background task that periodically inserts a placeholder contact.

use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{error, info, warn};

use crate::contacts::{Contact, ContactRepository, SYNTHETIC_FIRST_NAME, SYNTHETIC_LAST_NAME};
use crate::db::Database;

/// Runs one synthetic-contact job.
///
/// Returns the created contact, or `None` when the run failed. Failures are
/// logged here and never propagated.
pub async fn run_synthetic_contact_job(db: &Database) -> Option<Contact> {
    let result = db
        .call(|conn| {
            ContactRepository::new(conn).create_synthetic(SYNTHETIC_FIRST_NAME, SYNTHETIC_LAST_NAME)
        })
        .await;

    match result {
        Ok(contact) => {
            info!(
                "Synthetic contact job: created {} (id {})",
                contact.username, contact.id
            );
            Some(contact)
        }
        Err(err) if err.is_client_error() => {
            warn!("Synthetic contact job skipped: {}", err);
            None
        }
        Err(err) => {
            error!("Synthetic contact job failed: {}", err);
            None
        }
    }
}

/// Spawns a background task that creates a synthetic contact every `interval_secs`.
///
/// # Returns
/// A JoinHandle for the spawned task, which can be used to abort the task
/// during graceful shutdown.
pub fn spawn_synthetic_contact_task(db: Database, interval_secs: u64) -> JoinHandle<()> {
    let interval = Duration::from_secs(interval_secs);

    tokio::spawn(async move {
        info!(
            "Starting synthetic contact task with interval of {} seconds",
            interval_secs
        );

        loop {
            tokio::time::sleep(interval).await;
            run_synthetic_contact_job(&db).await;
        }
    })
}
