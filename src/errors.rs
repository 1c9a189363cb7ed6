// src/errors.rs

//! Crate-wide error type and result alias.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum RatexecError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Reading the line stream failed part-way through. Lines admitted
    /// before the failure have already been run when this is returned.
    #[error("Input error after {lines_read} line(s)")]
    InputError {
        lines_read: u64,
        #[source]
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub use anyhow::Error;
pub type Result<T> = std::result::Result<T, RatexecError>;
