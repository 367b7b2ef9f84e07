//! Type coercion table
//!
//! Converts a loosely-typed map value into one specific target kind.
//! Every function returns:
//! - `Ok(None)` when there is no value (null input, or an empty string),
//! - `Ok(Some(_))` on success,
//! - `Err(InvalidFormat)` when a string (or out-of-range number) cannot be read,
//! - `Err(UnsupportedCoercion)` for any (value kind, target) pair outside the table.
//!
//! Numeric narrowing mirrors two's-complement integer conversion and
//! saturating float truncation; floats headed for `byte`/`short` pass
//! through `int` first.

use crate::value::Value;
use crate::value_type::CoercionTarget;
use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use thiserror::Error;

/// Date-only pattern, 10 characters
pub const DATE_PATTERN: &str = "%Y-%m-%d";
/// `yyyy-MM-dd HH:mm:ss`
pub const DATETIME_PATTERN: &str = "%Y-%m-%d %H:%M:%S";
/// `yyyy-MM-dd'T'HH:mm:ss.SSS'Z'`, always UTC
pub const ISO_MILLIS_PATTERN: &str = "%Y-%m-%dT%H:%M:%S%.3fZ";
/// `yyyy-MM-dd HH:mm:ss.SSS`, fallback for any other length
pub const DATETIME_MILLIS_PATTERN: &str = "%Y-%m-%d %H:%M:%S%.3f";

const DATETIME_LEN: usize = "yyyy-MM-dd HH:mm:ss".len();
const ISO_MILLIS_LEN: usize = "yyyy-MM-ddTHH:mm:ss.SSSZ".len();

/// Coercion errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoercionError {
    /// The value has the right kind but cannot be read as the target
    #[error("can not cast to {target}, invalid format: {value}")]
    InvalidFormat { target: &'static str, value: String },

    /// No rule exists for this value kind and target
    #[error("can not cast to {target}, unsupported value: {value} ({kind})")]
    UnsupportedCoercion {
        target: &'static str,
        value: String,
        kind: &'static str,
    },
}

impl CoercionError {
    pub fn invalid_format(target: &'static str, value: impl ToString) -> Self {
        Self::InvalidFormat {
            target,
            value: value.to_string(),
        }
    }

    pub fn unsupported(target: &'static str, value: &Value) -> Self {
        Self::UnsupportedCoercion {
            target,
            value: value.to_string(),
            kind: value.kind_name(),
        }
    }

    /// Check if this is an `InvalidFormat` error
    pub fn is_invalid_format(&self) -> bool {
        matches!(self, Self::InvalidFormat { .. })
    }

    /// Check if this is an `UnsupportedCoercion` error
    pub fn is_unsupported(&self) -> bool {
        matches!(self, Self::UnsupportedCoercion { .. })
    }
}

/// Coercion result
pub type CoercionResult<T> = Result<T, CoercionError>;

/// Dispatches a value to the coercion rule for a target kind
#[derive(Debug, Clone, Copy, Default)]
pub struct TypeCoercer;

impl TypeCoercer {
    /// Create a new type coercer
    pub fn new() -> Self {
        Self
    }

    /// Coerce `value` into `target`, producing a value of the exact target variant
    pub fn coerce(&self, value: &Value, target: CoercionTarget) -> CoercionResult<Option<Value>> {
        Ok(match target {
            CoercionTarget::Byte => to_byte(value)?.map(Value::Byte),
            CoercionTarget::Short => to_short(value)?.map(Value::Short),
            CoercionTarget::Int => to_int(value)?.map(Value::Int),
            CoercionTarget::Long => to_long(value)?.map(Value::Long),
            CoercionTarget::Float => to_float(value)?.map(Value::Float),
            CoercionTarget::Double => to_double(value)?.map(Value::Double),
            CoercionTarget::Boolean => to_boolean(value)?.map(Value::Bool),
            CoercionTarget::Char => to_char(value)?.map(Value::Char),
            CoercionTarget::Date => to_date(value)?.map(Value::Date),
        })
    }
}

// Integer view of a number: wrapping for integers, saturating truncation for floats.
fn number_as_i64(value: &Value) -> Option<i64> {
    Some(match value {
        Value::Byte(n) => i64::from(*n),
        Value::Short(n) => i64::from(*n),
        Value::Int(n) => i64::from(*n),
        Value::Long(n) => *n,
        Value::Float(n) => *n as i64,
        Value::Double(n) => *n as i64,
        _ => return None,
    })
}

fn number_as_i32(value: &Value) -> Option<i32> {
    Some(match value {
        Value::Float(n) => *n as i32,
        Value::Double(n) => *n as i32,
        other => number_as_i64(other)? as i32,
    })
}

fn number_as_f64(value: &Value) -> Option<f64> {
    Some(match value {
        Value::Byte(n) => f64::from(*n),
        Value::Short(n) => f64::from(*n),
        Value::Int(n) => f64::from(*n),
        Value::Long(n) => *n as f64,
        Value::Float(n) => f64::from(*n),
        Value::Double(n) => *n,
        _ => return None,
    })
}

// Shared shape of the numeric rules: number -> narrow/widen, string -> parse.
fn to_number<T>(
    value: &Value,
    target: &'static str,
    from_number: impl FnOnce(&Value) -> Option<T>,
    parse: impl FnOnce(&str) -> Option<T>,
) -> CoercionResult<Option<T>> {
    match value {
        Value::Null => Ok(None),
        Value::String(s) if s.is_empty() => Ok(None),
        Value::String(s) => parse(s)
            .map(Some)
            .ok_or_else(|| CoercionError::invalid_format(target, s)),
        other => match from_number(other) {
            Some(n) => Ok(Some(n)),
            None => Err(CoercionError::unsupported(target, other)),
        },
    }
}

/// Coerce to `byte`
pub fn to_byte(value: &Value) -> CoercionResult<Option<i8>> {
    to_number(
        value,
        "byte",
        |v| match v {
            Value::Byte(n) => Some(*n),
            other => number_as_i32(other).map(|n| n as i8),
        },
        |s| s.parse().ok(),
    )
}

/// Coerce to `short`
pub fn to_short(value: &Value) -> CoercionResult<Option<i16>> {
    to_number(
        value,
        "short",
        |v| match v {
            Value::Short(n) => Some(*n),
            other => number_as_i32(other).map(|n| n as i16),
        },
        |s| s.parse().ok(),
    )
}

/// Coerce to `int`
pub fn to_int(value: &Value) -> CoercionResult<Option<i32>> {
    to_number(value, "int", number_as_i32, |s| s.parse().ok())
}

/// Coerce to `long`
pub fn to_long(value: &Value) -> CoercionResult<Option<i64>> {
    to_number(value, "long", number_as_i64, |s| s.parse().ok())
}

/// Coerce to `float`
pub fn to_float(value: &Value) -> CoercionResult<Option<f32>> {
    to_number(
        value,
        "float",
        |v| match v {
            Value::Float(n) => Some(*n),
            Value::Long(n) => Some(*n as f32),
            other => number_as_f64(other).map(|n| n as f32),
        },
        |s| s.trim().parse().ok(),
    )
}

/// Coerce to `double`
pub fn to_double(value: &Value) -> CoercionResult<Option<f64>> {
    to_number(value, "double", number_as_f64, |s| s.trim().parse().ok())
}

/// Coerce to `boolean`
///
/// Numbers are true only when their integer value is exactly 1.
pub fn to_boolean(value: &Value) -> CoercionResult<Option<bool>> {
    match value {
        Value::Null => Ok(None),
        Value::Bool(b) => Ok(Some(*b)),
        Value::String(s) => match s.as_str() {
            "" => Ok(None),
            "true" | "1" => Ok(Some(true)),
            "false" => Ok(Some(false)),
            _ => Err(CoercionError::invalid_format("boolean", s)),
        },
        other => match number_as_i32(other) {
            Some(n) => Ok(Some(n == 1)),
            None => Err(CoercionError::unsupported("boolean", other)),
        },
    }
}

/// Coerce to `char`; strings must hold exactly one character
pub fn to_char(value: &Value) -> CoercionResult<Option<char>> {
    match value {
        Value::Null => Ok(None),
        Value::Char(c) => Ok(Some(*c)),
        Value::String(s) => {
            let mut chars = s.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => Ok(Some(c)),
                _ => Err(CoercionError::invalid_format("char", s)),
            }
        }
        other => Err(CoercionError::unsupported("char", other)),
    }
}

/// Coerce to `Date`
///
/// Numbers are epoch milliseconds and must not be negative. Strings
/// containing `-` are parsed with a pattern picked by their length; other
/// strings are read as an epoch-milliseconds literal.
pub fn to_date(value: &Value) -> CoercionResult<Option<DateTime<Utc>>> {
    let millis = match value {
        Value::Null => return Ok(None),
        Value::Date(dt) => return Ok(Some(*dt)),
        Value::Calendar(dt) => return Ok(Some(dt.with_timezone(&Utc))),
        Value::String(s) if s.is_empty() => return Ok(None),
        Value::String(s) if s.contains('-') => return parse_date_string(s).map(Some),
        Value::String(s) => s
            .parse::<i64>()
            .map_err(|_| CoercionError::invalid_format("Date", s))?,
        other => {
            number_as_i64(other).ok_or_else(|| CoercionError::unsupported("Date", other))?
        }
    };

    if millis < 0 {
        return Err(CoercionError::invalid_format("Date", value));
    }
    Utc.timestamp_millis_opt(millis)
        .single()
        .map(Some)
        .ok_or_else(|| CoercionError::invalid_format("Date", value))
}

fn parse_date_string(s: &str) -> CoercionResult<DateTime<Utc>> {
    let invalid = || CoercionError::invalid_format("Date", s);
    let naive = match s.len() {
        10 => NaiveDate::parse_from_str(s, DATE_PATTERN)
            .map_err(|_| invalid())?
            .and_hms_opt(0, 0, 0)
            .ok_or_else(invalid)?,
        DATETIME_LEN => NaiveDateTime::parse_from_str(s, DATETIME_PATTERN).map_err(|_| invalid())?,
        ISO_MILLIS_LEN => {
            NaiveDateTime::parse_from_str(s, ISO_MILLIS_PATTERN).map_err(|_| invalid())?
        }
        _ => NaiveDateTime::parse_from_str(s, DATETIME_MILLIS_PATTERN).map_err(|_| invalid())?,
    };
    Ok(naive.and_utc())
}
