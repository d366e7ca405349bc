//! Error types and handling for the calculator.
//!
//! This module defines the error type returned by the long-running parts of
//! the crate, such as serving HTTP.

use thiserror::Error;

/// A specialized Result type for the crate's entry points.
pub type Result<T> = std::result::Result<T, Error>;

/// Unified error type for the calculator.
#[derive(Debug, Error)]
pub enum Error {
    /// Error originating from a transport.
    #[error("Transport error: {0}")]
    Transport(#[from] super::transport::TransportError),

    /// I/O errors.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
