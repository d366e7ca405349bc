//! Calculator-specific error types.

use thiserror::Error;

/// Result type for calculator operations.
pub type CalcResult<T> = Result<T, CalcError>;

/// Errors that can occur while parsing operands or dispatching an operation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CalcError {
    /// Operand text is not a valid number.
    #[error("Invalid number: '{0}'")]
    InvalidNumber(String),

    /// The operation name is not one of add, sub, mul, div.
    #[error("Unknown operation '{0}'")]
    UnknownOperation(String),

    /// Division with a zero divisor. Raised before any backend is called.
    #[error("Division by zero")]
    DivisionByZero,

    /// Native arithmetic overflowed `i64`.
    #[error("Integer overflow")]
    Overflow,

    /// The external backend failed to answer.
    #[error("Backend error: {0}")]
    Backend(String),
}

impl CalcError {
    /// Create a new "invalid number" error.
    pub fn invalid_number(text: impl Into<String>) -> Self {
        Self::InvalidNumber(text.into())
    }

    /// Create a new "unknown operation" error.
    pub fn unknown_operation(name: impl Into<String>) -> Self {
        Self::UnknownOperation(name.into())
    }

    /// Create a new backend error.
    pub fn backend(msg: impl Into<String>) -> Self {
        Self::Backend(msg.into())
    }

    /// HTTP status code this error maps to.
    ///
    /// Caller mistakes are 400; a failing backend is an unhandled condition
    /// on our side and maps to 500.
    pub fn status_code(&self) -> u16 {
        match self {
            Self::InvalidNumber(_)
            | Self::UnknownOperation(_)
            | Self::DivisionByZero
            | Self::Overflow => 400,
            Self::Backend(_) => 500,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        assert_eq!(CalcError::DivisionByZero.to_string(), "Division by zero");
        assert_eq!(
            CalcError::unknown_operation("pow").to_string(),
            "Unknown operation 'pow'"
        );
        assert_eq!(
            CalcError::invalid_number("abc").to_string(),
            "Invalid number: 'abc'"
        );
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(CalcError::DivisionByZero.status_code(), 400);
        assert_eq!(CalcError::Overflow.status_code(), 400);
        assert_eq!(CalcError::backend("down").status_code(), 500);
    }
}
