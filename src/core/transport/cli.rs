//! Command-line transport.
//!
//! Evaluates a single `<operation> <a> <b>` invocation. Every failure is
//! rendered as `Error: <message>` text; the caller decides what to print.

use tracing::{debug, instrument};

use crate::domains::calculator::{CalcResult, Calculator, Number, parse_cli_operand};

/// Usage text printed when the argument count is wrong.
pub const USAGE: &str = "Usage: calculator <operation> <a> <b>\nOperations: add, sub, mul, div";

/// CLI transport handler.
#[derive(Debug, Clone)]
pub struct CliTransport {
    calculator: Calculator,
}

impl CliTransport {
    /// Create a new CLI transport around the given calculator.
    pub fn new(calculator: Calculator) -> Self {
        Self { calculator }
    }

    /// Evaluate one invocation and return the text to print.
    ///
    /// Never fails: errors come back as `Error: <message>`.
    #[instrument(skip(self))]
    pub async fn evaluate(&self, operation: &str, a: &str, b: &str) -> String {
        match self.try_evaluate(operation, a, b).await {
            Ok(result) => result.to_string(),
            Err(e) => {
                debug!("Calculation failed: {}", e);
                format!("Error: {}", e)
            }
        }
    }

    async fn try_evaluate(&self, operation: &str, a: &str, b: &str) -> CalcResult<Number> {
        // Operands are checked before the operation name.
        let a = parse_cli_operand(a)?;
        let b = parse_cli_operand(b)?;
        self.calculator.calculate(operation, a, b).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn transport() -> CliTransport {
        CliTransport::new(Calculator::native())
    }

    #[tokio::test]
    async fn test_success_output() {
        let cli = transport();
        assert_eq!(cli.evaluate("add", "2", "3").await, "5");
        assert_eq!(cli.evaluate("sub", "2", "3").await, "-1");
        assert_eq!(cli.evaluate("mul", "2.7", "3").await, "6");
        assert_eq!(cli.evaluate("div", "7", "2").await, "3");
    }

    #[tokio::test]
    async fn test_error_output() {
        let cli = transport();
        assert_eq!(cli.evaluate("div", "5", "0").await, "Error: Division by zero");
        // A divisor that truncates to zero is still a division by zero.
        assert_eq!(cli.evaluate("div", "5", "0.4").await, "Error: Division by zero");
        assert_eq!(
            cli.evaluate("pow", "2", "3").await,
            "Error: Unknown operation 'pow'"
        );
        assert_eq!(
            cli.evaluate("add", "two", "3").await,
            "Error: Invalid number: 'two'"
        );
    }

    #[tokio::test]
    async fn test_operands_checked_before_operation() {
        let cli = transport();
        assert_eq!(
            cli.evaluate("pow", "x", "3").await,
            "Error: Invalid number: 'x'"
        );
    }
}
