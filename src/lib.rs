//! MathFormer calculator library.
//!
//! A four-operation calculator (add, sub, mul, div) with two front ends: a
//! command-line tool and a JSON-over-HTTP server. Arithmetic is delegated to
//! the external mathformer backend when it can be reached at startup, and to
//! native integer arithmetic otherwise.
//!
//! # Architecture
//!
//! - **core**: configuration, error handling, logging and the transports
//! - **domains**: business logic
//!   - **calculator**: operand parsing, operation dispatch and backends
//!
//! # Example
//!
//! ```rust,no_run
//! use mathformer_calc::{Config, domains::calculator::{BackendSelection, Calculator}};
//!
//! #[tokio::main]
//! async fn main() {
//!     let config = Config::from_env();
//!     let selection = BackendSelection::resolve(&config.backend).await;
//!     let calculator = Calculator::from_selection(&selection);
//!     let result = calculator.calculate("mul", 4, 5).await;
//!     println!("{:?}", result);
//! }
//! ```

pub mod core;
pub mod domains;

// Re-export commonly used types for convenience
pub use core::{Config, Error, Result};
