//! Strict narrowing from `Value` into Rust field types
//!
//! Used by entity setters. No coercion happens here: a `Long` never becomes
//! an `i32`. Decoding routes coercible kinds through the coercion table
//! first, so setters only ever see the exact variant they ask for.

use crate::coercion::{CoercionError, CoercionResult};
use crate::value::{Value, ValueMap};
use chrono::{DateTime, FixedOffset, Utc};

/// Narrow a value into `Self`
pub trait FromValue: Sized {
    fn from_value(value: Value) -> CoercionResult<Self>;
}

macro_rules! impl_from_value {
    ($($ty:ty => $variant:ident as $target:literal),* $(,)?) => {
        $(
            impl FromValue for $ty {
                fn from_value(value: Value) -> CoercionResult<Self> {
                    match value {
                        Value::$variant(v) => Ok(v),
                        other => Err(CoercionError::unsupported($target, &other)),
                    }
                }
            }
        )*
    };
}

impl_from_value! {
    bool => Bool as "boolean",
    i8 => Byte as "byte",
    i16 => Short as "short",
    i32 => Int as "int",
    i64 => Long as "long",
    f32 => Float as "float",
    f64 => Double as "double",
    char => Char as "char",
    String => String as "String",
    ValueMap => Map as "Map",
}

impl FromValue for DateTime<Utc> {
    fn from_value(value: Value) -> CoercionResult<Self> {
        value
            .as_date()
            .ok_or_else(|| CoercionError::unsupported("Date", &value))
    }
}

impl FromValue for DateTime<FixedOffset> {
    fn from_value(value: Value) -> CoercionResult<Self> {
        match value {
            Value::Calendar(dt) => Ok(dt),
            Value::Date(dt) => Ok(dt.fixed_offset()),
            other => Err(CoercionError::unsupported("Calendar", &other)),
        }
    }
}

impl FromValue for Value {
    fn from_value(value: Value) -> CoercionResult<Self> {
        Ok(value)
    }
}

impl<T: FromValue> FromValue for Option<T> {
    fn from_value(value: Value) -> CoercionResult<Self> {
        match value {
            Value::Null => Ok(None),
            other => T::from_value(other).map(Some),
        }
    }
}

impl<T: FromValue> FromValue for Vec<T> {
    fn from_value(value: Value) -> CoercionResult<Self> {
        match value {
            Value::List(items) => items.into_iter().map(T::from_value).collect(),
            other => Err(CoercionError::unsupported("List", &other)),
        }
    }
}
