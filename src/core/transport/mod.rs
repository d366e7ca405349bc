//! Transport layer for the calculator.
//!
//! This module provides the two front ends:
//! - **CLI**: one `<operation> <a> <b>` invocation per process - feature: `cli`
//! - **HTTP**: JSON over POST, one task per request - feature: `http`
//!
//! Each transport parses its own input and delegates the arithmetic to a
//! shared [`Calculator`](crate::domains::calculator::Calculator).

mod config;
mod error;

#[cfg(feature = "cli")]
pub mod cli;

#[cfg(feature = "http")]
pub mod http;

pub use config::HttpConfig;
pub use error::{TransportError, TransportResult};

#[cfg(feature = "cli")]
pub use cli::CliTransport;

#[cfg(feature = "http")]
pub use http::{AppState, HttpTransport};
