//! Declared value types, token coercion and numeric clamping

use crate::error::OverrideError;
use kor_host::Value;
use serde::{Deserialize, Serialize};

/// Primitive type a keyword argument is declared as
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueType {
    /// Signed integer
    Int,
    /// Floating point
    Float,
    /// Boolean (`true`/`false`/`1`/`0`, case-insensitive)
    Bool,
    /// Free text
    Text,
}

impl ValueType {
    /// Type name used in error messages and the exported schema
    #[inline]
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Int => "int",
            Self::Float => "float",
            Self::Bool => "bool",
            Self::Text => "text",
        }
    }
}

/// Coerce a raw argument token to the declared type
///
/// # Errors
/// `TypeCoercionError` when the token does not parse as the declared type.
pub fn coerce(keyword: &str, token: &str, ty: ValueType) -> Result<Value, OverrideError> {
    let token = token.trim();
    match ty {
        ValueType::Int => token
            .parse::<i64>()
            .map(Value::Int)
            .map_err(|_| OverrideError::coercion(keyword, token, "int")),
        ValueType::Float => token
            .parse::<f64>()
            .map(Value::Float)
            .map_err(|_| OverrideError::coercion(keyword, token, "float")),
        ValueType::Bool => match token.to_ascii_lowercase().as_str() {
            "true" | "1" => Ok(Value::Bool(true)),
            "false" | "0" => Ok(Value::Bool(false)),
            _ => Err(OverrideError::coercion(keyword, token, "bool")),
        },
        ValueType::Text => Ok(Value::Text(token.to_string())),
    }
}

/// Clamp a numeric value into configured bounds
///
/// `None` bounds impose no limit; `Some(0.0)` is a real bound. Non-numeric
/// values pass through untouched.
#[must_use]
pub fn clamp(value: Value, min: Option<f64>, max: Option<f64>) -> Value {
    match value {
        Value::Int(v) => {
            let mut v = v;
            if let Some(min) = min {
                v = v.max(min.ceil() as i64);
            }
            if let Some(max) = max {
                v = v.min(max.floor() as i64);
            }
            Value::Int(v)
        }
        Value::Float(v) => {
            let mut v = v;
            if let Some(min) = min {
                v = v.max(min);
            }
            if let Some(max) = max {
                v = v.min(max);
            }
            Value::Float(v)
        }
        other => other,
    }
}

/// Round an integer value down to a multiple of `step`
///
/// Used by the width/height adjust callbacks to snap dimensions onto the
/// 8-pixel grid the generation backend requires.
#[must_use]
pub fn round_down_to_multiple(value: Value, step: i64) -> Value {
    match value {
        Value::Int(v) => Value::Int(v - v.rem_euclid(step)),
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coerce_int() {
        assert_eq!(coerce("steps", "30", ValueType::Int).unwrap(), Value::Int(30));
        assert_eq!(
            coerce("seed", " -1 ", ValueType::Int).unwrap(),
            Value::Int(-1)
        );
        assert!(coerce("steps", "thirty", ValueType::Int).is_err());
        assert!(coerce("steps", "3.5", ValueType::Int).is_err());
    }

    #[test]
    fn coerce_float() {
        assert_eq!(
            coerce("cfg_scale", "7.5", ValueType::Float).unwrap(),
            Value::Float(7.5)
        );
        assert_eq!(
            coerce("cfg_scale", "7", ValueType::Float).unwrap(),
            Value::Float(7.0)
        );
        assert!(coerce("cfg_scale", "x", ValueType::Float).is_err());
    }

    #[test]
    fn coerce_bool() {
        assert_eq!(
            coerce("enable_hr", "TRUE", ValueType::Bool).unwrap(),
            Value::Bool(true)
        );
        assert_eq!(
            coerce("enable_hr", "0", ValueType::Bool).unwrap(),
            Value::Bool(false)
        );
        assert!(coerce("enable_hr", "yep", ValueType::Bool).is_err());
    }

    #[test]
    fn coerce_text_passthrough() {
        assert_eq!(
            coerce("sampler_name", "Euler a", ValueType::Text).unwrap(),
            Value::Text("Euler a".to_string())
        );
    }

    #[test]
    fn clamp_int_bounds() {
        assert_eq!(clamp(Value::Int(0), Some(1.0), Some(12.0)), Value::Int(1));
        assert_eq!(clamp(Value::Int(20), Some(1.0), Some(12.0)), Value::Int(12));
        assert_eq!(clamp(Value::Int(5), Some(1.0), Some(12.0)), Value::Int(5));
    }

    #[test]
    fn clamp_unset_bound_is_no_limit() {
        assert_eq!(clamp(Value::Int(1_000_000), Some(1.0), None), Value::Int(1_000_000));
        assert_eq!(clamp(Value::Float(-5.0), None, Some(1.0)), Value::Float(-5.0));
    }

    #[test]
    fn clamp_zero_is_a_real_bound() {
        assert_eq!(clamp(Value::Float(-0.5), Some(0.0), Some(1.0)), Value::Float(0.0));
    }

    #[test]
    fn clamp_ignores_non_numeric() {
        let text = Value::Text("x".to_string());
        assert_eq!(clamp(text.clone(), Some(0.0), Some(1.0)), text);
    }

    #[test]
    fn round_down() {
        assert_eq!(round_down_to_multiple(Value::Int(513), 8), Value::Int(512));
        assert_eq!(round_down_to_multiple(Value::Int(512), 8), Value::Int(512));
        assert_eq!(round_down_to_multiple(Value::Int(71), 8), Value::Int(64));
    }
}
