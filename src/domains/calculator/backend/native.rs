//! Native `i64` arithmetic.

use async_trait::async_trait;

use super::{ArithmeticBackend, NATIVE_BACKEND_NAME};
use crate::domains::calculator::error::{CalcError, CalcResult};
use crate::domains::calculator::number::Number;

/// Checked integer arithmetic. Division truncates toward zero.
#[derive(Debug, Clone, Copy, Default)]
pub struct NativeBackend;

fn checked(value: Option<i64>) -> CalcResult<Number> {
    value.map(Number::Int).ok_or(CalcError::Overflow)
}

#[async_trait]
impl ArithmeticBackend for NativeBackend {
    fn name(&self) -> &str {
        NATIVE_BACKEND_NAME
    }

    async fn add(&self, a: i64, b: i64) -> CalcResult<Number> {
        checked(a.checked_add(b))
    }

    async fn sub(&self, a: i64, b: i64) -> CalcResult<Number> {
        checked(a.checked_sub(b))
    }

    async fn mul(&self, a: i64, b: i64) -> CalcResult<Number> {
        checked(a.checked_mul(b))
    }

    async fn div(&self, a: i64, b: i64) -> CalcResult<Number> {
        if b == 0 {
            return Err(CalcError::DivisionByZero);
        }
        // Only i64::MIN / -1 can fail here.
        checked(a.checked_div(b))
    }
}
