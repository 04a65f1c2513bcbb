//! Configuration Module
//!
//! Handles loading and managing service configuration from environment variables.

use std::env;
use std::str::FromStr;

/// Service configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port
    pub server_port: u16,
    /// Path of the SQLite database file
    pub database_path: String,
    /// Synthetic-contact job interval in seconds
    pub synthetic_interval: u64,
    /// Aged-purge job interval in seconds
    pub purge_interval: u64,
    /// Contacts created longer ago than this many seconds are purged
    pub purge_max_age: u64,
    /// Whether the HTTP server also drives the background jobs
    pub run_jobs: bool,
    /// Whether to reset the database with demo rows at startup
    pub seed_demo_data: bool,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    /// - `DATABASE_PATH` - SQLite database file (default: data.sqlite)
    /// - `SYNTHETIC_INTERVAL` - Synthetic-contact job frequency in seconds (default: 15)
    /// - `PURGE_INTERVAL` - Aged-purge job frequency in seconds (default: 60)
    /// - `PURGE_MAX_AGE` - Contact retention in seconds (default: 60)
    /// - `RUN_JOBS` - Run the jobs inside the server process (default: true)
    /// - `SEED_DEMO_DATA` - Reset and seed demo contacts at startup (default: false)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            server_port: parse_var("SERVER_PORT").unwrap_or(defaults.server_port),
            database_path: env::var("DATABASE_PATH")
                .ok()
                .filter(|v| !v.is_empty())
                .unwrap_or(defaults.database_path),
            synthetic_interval: parse_var("SYNTHETIC_INTERVAL")
                .unwrap_or(defaults.synthetic_interval),
            purge_interval: parse_var("PURGE_INTERVAL").unwrap_or(defaults.purge_interval),
            purge_max_age: parse_var("PURGE_MAX_AGE").unwrap_or(defaults.purge_max_age),
            run_jobs: parse_var("RUN_JOBS").unwrap_or(defaults.run_jobs),
            seed_demo_data: parse_var("SEED_DEMO_DATA").unwrap_or(defaults.seed_demo_data),
        }
    }
}

fn parse_var<T: FromStr>(name: &str) -> Option<T> {
    env::var(name).ok().and_then(|v| v.trim().parse().ok())
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_port: 3000,
            database_path: "data.sqlite".to_string(),
            synthetic_interval: 15,
            purge_interval: 60,
            purge_max_age: 60,
            run_jobs: true,
            seed_demo_data: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.server_port, 3000);
        assert_eq!(config.database_path, "data.sqlite");
        assert_eq!(config.synthetic_interval, 15);
        assert_eq!(config.purge_interval, 60);
        assert_eq!(config.purge_max_age, 60);
        assert!(config.run_jobs);
        assert!(!config.seed_demo_data);
    }

    #[test]
    fn test_config_from_env_defaults() {
        // Clear any existing env vars to test defaults
        env::remove_var("SERVER_PORT");
        env::remove_var("DATABASE_PATH");
        env::remove_var("SYNTHETIC_INTERVAL");
        env::remove_var("PURGE_INTERVAL");
        env::remove_var("PURGE_MAX_AGE");
        env::remove_var("RUN_JOBS");
        env::remove_var("SEED_DEMO_DATA");

        let config = Config::from_env();
        assert_eq!(config.server_port, 3000);
        assert_eq!(config.database_path, "data.sqlite");
        assert_eq!(config.synthetic_interval, 15);
        assert!(config.run_jobs);
    }
}
