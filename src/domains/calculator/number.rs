//! Calculation results.

use std::fmt;

/// A value produced by a backend.
///
/// Native arithmetic always yields integers; the external backend may answer
/// a division with a real number.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Number {
    Int(i64),
    Float(f64),
}

impl Number {
    /// Interpret a JSON number as returned by the external backend.
    pub fn from_json(value: &serde_json::Number) -> Option<Self> {
        if let Some(i) = value.as_i64() {
            return Some(Self::Int(i));
        }
        value.as_f64().map(Self::Float)
    }
}

impl From<i64> for Number {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(i) => write!(f, "{i}"),
            Self::Float(x) if x.is_nan() => f.write_str("nan"),
            Self::Float(x) if x.is_infinite() => {
                f.write_str(if x.is_sign_positive() { "inf" } else { "-inf" })
            }
            // Reals always carry a fractional digit so `5.0` stays distinguishable from `5`.
            Self::Float(x) if x.fract() == 0.0 => write!(f, "{x:.1}"),
            Self::Float(x) => write!(f, "{x}"),
        }
    }
}
