//! Core module containing shared infrastructure components.
//!
//! This module provides the foundational building blocks for the calculator,
//! including error handling, configuration, logging, and the transport layer.

pub mod config;
pub mod error;
pub mod logging;
pub mod transport;

pub use config::Config;
pub use error::{Error, Result};
pub use logging::init_logging;
pub use transport::{HttpConfig, TransportError};
