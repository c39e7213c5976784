//! Error types for the Bucketlist client.
//!
//! This module defines the error types used throughout the client crate,
//! providing structured error handling with clear, human-readable messages.

use thiserror::Error;

use crate::api::ApiError;
use crate::config::ConfigError;
use crate::session::AuthError;

/// Errors that can occur during client operations.
///
/// This is the primary error type for the client crate, encompassing all
/// possible failure modes.
#[derive(Error, Debug)]
pub enum ClientError {
    /// Configuration-related error.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// GraphQL API error.
    ///
    /// This variant wraps failures that occur while talking to the remote
    /// bucket list API: transport errors, non-success statuses, and GraphQL
    /// error responses.
    #[error("API error: {0}")]
    Api(#[from] ApiError),

    /// Identity service or session storage error.
    #[error("authentication error: {0}")]
    Auth(#[from] AuthError),

    /// File system I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// TUI-related error.
    #[error("TUI error: {0}")]
    Tui(#[from] TuiError),
}

/// Errors that can occur during TUI operation.
#[derive(Error, Debug)]
pub enum TuiError {
    /// Terminal initialization failed.
    #[error("failed to initialize terminal: {0}")]
    TerminalInit(#[source] std::io::Error),

    /// Terminal rendering failed.
    #[error("render error: {0}")]
    Render(#[source] std::io::Error),

    /// Event handling error.
    #[error("event error: {0}")]
    Event(String),
}

/// A specialized `Result` type for client operations.
pub type Result<T> = std::result::Result<T, ClientError>;
