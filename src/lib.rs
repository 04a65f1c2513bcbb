//! Contacts API - A small contacts REST service
//!
//! Stores contacts and their email addresses in SQLite, serves them over
//! HTTP, and runs two periodic jobs (synthetic contact creation and aged purge).

pub mod api;
pub mod config;
pub mod contacts;
pub mod db;
pub mod error;
pub mod models;
pub mod tasks;
pub mod shutdown;
pub mod telemetry;

pub use api::AppState;
pub use config::Config;
pub use db::Database;
pub use error::{ContactError, Result};
pub use tasks::{spawn_purge_task, spawn_synthetic_contact_task};
