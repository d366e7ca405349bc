//! Operand parsing.
//!
//! The two adapters parse operands slightly differently:
//!
//! - The CLI parses integer text directly and only goes through a real-number
//!   parse when the text contains a decimal point.
//! - The HTTP adapter always parses through a real number, so `"1e3"` is
//!   accepted there but rejected on the command line.
//!
//! Either way, reals are truncated toward zero.

use serde_json::Value;

use super::error::{CalcError, CalcResult};

/// Lower bound of `i64` as an `f64` (exact).
const I64_MIN_F: f64 = -9_223_372_036_854_775_808.0;
/// Upper bound (exclusive) of `i64` as an `f64` (exact).
const I64_MAX_EXCLUSIVE_F: f64 = 9_223_372_036_854_775_808.0;

/// Parse an operand given on the command line.
pub fn parse_cli_operand(text: &str) -> CalcResult<i64> {
    let trimmed = text.trim();
    if trimmed.contains('.') {
        let real = parse_real(trimmed).ok_or_else(|| CalcError::invalid_number(text))?;
        truncate(real).ok_or_else(|| CalcError::invalid_number(text))
    } else {
        trimmed
            .parse::<i64>()
            .map_err(|_| CalcError::invalid_number(text))
    }
}

/// Parse an operand taken from a JSON request body.
///
/// Numbers and numeric strings are accepted; everything else is rejected.
pub fn parse_json_operand(value: &Value) -> CalcResult<i64> {
    let real = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => parse_real(s.trim()),
        _ => None,
    };

    real.and_then(truncate)
        .ok_or_else(|| CalcError::invalid_number(display_value(value)))
}

/// Parse a real number.
fn parse_real(text: &str) -> Option<f64> {
    text.parse::<f64>().ok()
}

/// Truncate toward zero, rejecting values with no `i64` counterpart.
fn truncate(real: f64) -> Option<i64> {
    if !real.is_finite() {
        return None;
    }
    let truncated = real.trunc();
    if (I64_MIN_F..I64_MAX_EXCLUSIVE_F).contains(&truncated) {
        Some(truncated as i64)
    } else {
        None
    }
}

fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_cli_integers() {
        assert_eq!(parse_cli_operand("42"), Ok(42));
        assert_eq!(parse_cli_operand("-17"), Ok(-17));
        assert_eq!(parse_cli_operand("+3"), Ok(3));
        assert_eq!(parse_cli_operand(" 8 "), Ok(8));
    }

    #[test]
    fn test_cli_truncates_reals_toward_zero() {
        assert_eq!(parse_cli_operand("2.9"), Ok(2));
        assert_eq!(parse_cli_operand("-2.9"), Ok(-2));
        assert_eq!(parse_cli_operand("0.5"), Ok(0));
        assert_eq!(parse_cli_operand("1.5e3"), Ok(1500));
    }

    #[test]
    fn test_cli_rejects_garbage() {
        assert_eq!(
            parse_cli_operand("abc"),
            Err(CalcError::invalid_number("abc"))
        );
        assert!(parse_cli_operand("").is_err());
        assert!(parse_cli_operand("1.2.3").is_err());
        // Exponent without a decimal point is not integer text.
        assert!(parse_cli_operand("1e3").is_err());
        assert!(parse_cli_operand("99999999999999999999").is_err());
    }

    #[test]
    fn test_cli_parse_is_idempotent_on_integers() {
        for n in [0, 1, -1, 12345, i64::MAX, i64::MIN] {
            assert_eq!(parse_cli_operand(&n.to_string()), Ok(n));
        }
    }

    #[test]
    fn test_json_operands() {
        assert_eq!(parse_json_operand(&json!("4")), Ok(4));
        assert_eq!(parse_json_operand(&json!(" 4.8 ")), Ok(4));
        assert_eq!(parse_json_operand(&json!(-7.2)), Ok(-7));
        assert_eq!(parse_json_operand(&json!(10)), Ok(10));
        assert_eq!(parse_json_operand(&json!("1e3")), Ok(1000));
    }

    #[test]
    fn test_json_rejects_non_numeric() {
        assert_eq!(
            parse_json_operand(&json!("four")),
            Err(CalcError::invalid_number("four"))
        );
        assert!(parse_json_operand(&json!("nan")).is_err());
        assert!(parse_json_operand(&json!("inf")).is_err());
        assert!(parse_json_operand(&json!("1e300")).is_err());
        assert!(parse_json_operand(&json!([1])).is_err());
        assert!(parse_json_operand(&json!({"n": 1})).is_err());
    }

    #[test]
    fn test_truncate_bounds() {
        assert_eq!(truncate(I64_MIN_F), Some(i64::MIN));
        assert_eq!(truncate(I64_MAX_EXCLUSIVE_F), None);
        assert_eq!(truncate(f64::NAN), None);
    }
}
