//! Configuration module for the Bucketlist client.
//!
//! This module handles parsing configuration from environment variables.
//!
//! # Environment Variables
//!
//! | Variable | Required | Default | Description |
//! |----------|----------|---------|-------------|
//! | `BUCKETLIST_API_URL` | Yes | - | GraphQL endpoint URL |
//! | `BUCKETLIST_AUTH_URL` | Yes | - | Identity service base URL |
//! | `BUCKETLIST_SESSION_PATH` | No | `~/.bucketlist` | Directory containing `session.json` |
//! | `BUCKETLIST_TIMEOUT_SECS` | No | 30 | HTTP request timeout in seconds |
//!
//! # Example
//!
//! ```no_run
//! use bucketlist_client::config::Config;
//!
//! let config = Config::from_env().expect("Failed to load configuration");
//! println!("API URL: {}", config.api_url);
//! ```

use std::env;
use std::path::PathBuf;
use std::time::Duration;

use directories::BaseDirs;
use thiserror::Error;

/// Default HTTP request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Default session directory name relative to home.
const DEFAULT_SESSION_DIR: &str = ".bucketlist";

/// Errors that can occur during configuration parsing.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Required environment variable is missing.
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    /// Environment variable has an invalid value.
    #[error("invalid value for {key}: {message}")]
    InvalidValue { key: String, message: String },

    /// Failed to determine home directory.
    #[error("failed to determine home directory")]
    NoHomeDirectory,
}

/// Configuration for the Bucketlist client.
#[derive(Debug, Clone)]
pub struct Config {
    /// GraphQL endpoint URL (e.g., `https://api.example.com/graphql`).
    pub api_url: String,

    /// Identity service base URL (e.g., `https://auth.example.com`).
    pub auth_url: String,

    /// Path to the directory containing `session.json`.
    pub session_path: PathBuf,

    /// HTTP request timeout for API and identity calls.
    pub timeout: Duration,
}

impl Config {
    /// Creates a new `Config` by parsing environment variables.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if:
    /// - `BUCKETLIST_API_URL` or `BUCKETLIST_AUTH_URL` is not set
    /// - `BUCKETLIST_TIMEOUT_SECS` is set but cannot be parsed as a positive integer
    /// - The home directory cannot be determined (needed for the default session path)
    pub fn from_env() -> Result<Self, ConfigError> {
        let base_dirs = BaseDirs::new().ok_or(ConfigError::NoHomeDirectory)?;
        let home_dir = base_dirs.home_dir();

        // Required: BUCKETLIST_API_URL
        let api_url = env::var("BUCKETLIST_API_URL")
            .map_err(|_| ConfigError::MissingEnvVar("BUCKETLIST_API_URL".to_string()))?;

        // Required: BUCKETLIST_AUTH_URL
        let auth_url = env::var("BUCKETLIST_AUTH_URL")
            .map_err(|_| ConfigError::MissingEnvVar("BUCKETLIST_AUTH_URL".to_string()))?;

        // Optional: BUCKETLIST_SESSION_PATH (default: ~/.bucketlist)
        let session_path = env::var("BUCKETLIST_SESSION_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|_| home_dir.join(DEFAULT_SESSION_DIR));

        // Optional: BUCKETLIST_TIMEOUT_SECS (default: 30, must be > 0)
        let timeout_secs = match env::var("BUCKETLIST_TIMEOUT_SECS") {
            Ok(val) => {
                let secs = val.parse::<u64>().map_err(|_| ConfigError::InvalidValue {
                    key: "BUCKETLIST_TIMEOUT_SECS".to_string(),
                    message: format!("expected positive integer, got '{val}'"),
                })?;
                if secs == 0 {
                    return Err(ConfigError::InvalidValue {
                        key: "BUCKETLIST_TIMEOUT_SECS".to_string(),
                        message: "timeout must be greater than 0".to_string(),
                    });
                }
                secs
            }
            Err(_) => DEFAULT_TIMEOUT_SECS,
        };

        Ok(Self {
            api_url,
            auth_url,
            session_path,
            timeout: Duration::from_secs(timeout_secs),
        })
    }
}
