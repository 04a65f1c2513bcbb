//! Data Store Module
//!
//! Owns the SQLite connection shared by the HTTP handlers and the background jobs.
//!
//! # Invariants
//! - Every handed-out connection has `foreign_keys=ON` and all migrations applied.
//! - Writers go through the repository, which scopes each mutation in one transaction.

mod migrations;
mod seed;

use std::path::Path;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::{Duration, Instant};

use rusqlite::Connection;
use tracing::{error, info};

use crate::error::{ContactError, Result};

pub use migrations::{apply_migrations, latest_version};
pub use seed::seed_demo_data;

/// How long a writer waits for another connection's write lock before failing.
pub const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Process-wide handle to the data store.
///
/// Cloning is cheap; all clones share one connection. The connection is closed
/// when the last clone is dropped. SQLite calls block, so they run on the
/// blocking thread pool through [`Database::call`].
#[derive(Clone)]
pub struct Database {
    conn: Arc<Mutex<Connection>>,
}

impl Database {
    /// Opens (or creates) a database file and applies pending migrations.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let started_at = Instant::now();
        info!("Opening database at {}", path.display());

        let conn = Connection::open(path).map_err(|err| {
            error!("Failed to open database {}: {}", path.display(), err);
            err
        })?;
        let db = Self::bootstrap(conn)?;

        info!(
            "Database ready in {}ms (schema version {})",
            started_at.elapsed().as_millis(),
            latest_version()
        );
        Ok(db)
    }

    /// Opens a private in-memory database with the schema applied.
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        Self::bootstrap(conn)
    }

    fn bootstrap(mut conn: Connection) -> Result<Self> {
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        conn.busy_timeout(BUSY_TIMEOUT)?;
        apply_migrations(&mut conn)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Runs `f` with exclusive use of the connection on the blocking thread pool.
    ///
    /// A panic inside an earlier call does not poison the handle: its open
    /// transaction was rolled back when it unwound.
    pub async fn call<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&mut Connection) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let conn = Arc::clone(&self.conn);
        tokio::task::spawn_blocking(move || {
            let mut guard = conn.lock().unwrap_or_else(PoisonError::into_inner);
            f(&mut guard)
        })
        .await
        .map_err(|e| ContactError::Internal(format!("spawn_blocking join error: {}", e)))?
    }
}
