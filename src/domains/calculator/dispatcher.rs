//! Operation dispatch.

use std::fmt;
use std::sync::Arc;

use tracing::debug;

use super::backend::{ArithmeticBackend, BackendSelection, NativeBackend};
use super::error::{CalcError, CalcResult};
use super::number::Number;
use super::operation::Operation;

/// Maps an operation name onto the active backend.
///
/// The backend is fixed at construction. Cloning is cheap and shares it.
#[derive(Clone)]
pub struct Calculator {
    backend: Arc<dyn ArithmeticBackend>,
}

impl Calculator {
    /// Create a calculator bound to the given backend.
    pub fn new(backend: Arc<dyn ArithmeticBackend>) -> Self {
        Self { backend }
    }

    /// Create a calculator from the startup backend selection.
    pub fn from_selection(selection: &BackendSelection) -> Self {
        Self::new(selection.backend())
    }

    /// Create a calculator using native arithmetic.
    pub fn native() -> Self {
        Self::new(Arc::new(NativeBackend))
    }

    /// Name of the backend serving this calculator.
    pub fn backend_name(&self) -> &str {
        self.backend.name()
    }

    /// Dispatch an operation given by name.
    pub async fn calculate(&self, operation: &str, a: i64, b: i64) -> CalcResult<Number> {
        let operation: Operation = operation.parse()?;
        self.apply(operation, a, b).await
    }

    /// Dispatch an already parsed operation.
    pub async fn apply(&self, operation: Operation, a: i64, b: i64) -> CalcResult<Number> {
        debug!(%operation, a, b, backend = self.backend.name(), "dispatching");

        match operation {
            Operation::Add => self.backend.add(a, b).await,
            Operation::Sub => self.backend.sub(a, b).await,
            Operation::Mul => self.backend.mul(a, b).await,
            Operation::Div if b == 0 => Err(CalcError::DivisionByZero),
            Operation::Div => self.backend.div(a, b).await,
        }
    }
}

impl fmt::Debug for Calculator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Calculator")
            .field("backend", &self.backend.name())
            .finish()
    }
}
