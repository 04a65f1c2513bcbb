//! Background Tasks Module
//!
//! Periodic jobs that run against the data store independently of HTTP traffic.
//!
//! # Tasks
//! - Synthetic contact: inserts a placeholder contact every tick
//! - Aged purge: removes contacts older than the retention window every tick
//!
//! A failing tick is logged and skipped; the next tick retries.

mod purge;
mod synthetic;

pub use purge::{run_purge_job, spawn_purge_task};
pub use synthetic::{run_synthetic_contact_job, spawn_synthetic_contact_task};
