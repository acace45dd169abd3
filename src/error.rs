//! Startup error type

use thiserror::Error;

/// Errors that stop the server from starting.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Failed to load configuration: {0}")]
    Config(#[from] config::ConfigError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid listen address: {0}")]
    InvalidAddress(String),

    #[error("Failed to render template: {0}")]
    Template(#[from] askama::Error),
}
