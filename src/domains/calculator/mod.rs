//! Calculator domain module.
//!
//! ## Architecture
//!
//! - `operand.rs` - Operand parsing for the CLI and HTTP adapters
//! - `operation.rs` - The four supported operations
//! - `dispatcher.rs` - [`Calculator`], maps operations onto a backend
//! - `backend/` - Native and external arithmetic, startup selection
//! - `number.rs` - Result values
//! - `error.rs` - Calculator-specific error types

pub mod backend;
mod dispatcher;
mod error;
pub mod number;
pub mod operand;
mod operation;

pub use backend::{ArithmeticBackend, BackendSelection};
pub use dispatcher::Calculator;
pub use error::{CalcError, CalcResult};
pub use number::Number;
pub use operand::{parse_cli_operand, parse_json_operand};
pub use operation::Operation;
