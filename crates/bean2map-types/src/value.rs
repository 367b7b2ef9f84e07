//! Dynamic values - the loosely-typed side of an entity/map conversion
//!
//! `Value` is a closed set of variants; map entries produced by `encode`
//! and consumed by `decode` are always one of these.

use chrono::{DateTime, FixedOffset, SecondsFormat, TimeZone, Utc};
use indexmap::IndexMap;
use std::fmt;

/// String-keyed map of dynamic values, in insertion order
pub type ValueMap = IndexMap<String, Value>;

/// A dynamically-typed value
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Absent / null reference
    Null,
    Bool(bool),
    Byte(i8),
    Short(i16),
    Int(i32),
    Long(i64),
    Float(f32),
    Double(f64),
    Char(char),
    String(String),
    /// An instant in time
    Date(DateTime<Utc>),
    /// A calendar value with its own offset; coerces to `Date`
    Calendar(DateTime<FixedOffset>),
    List(Vec<Value>),
    Map(ValueMap),
}

impl Value {
    /// Check if this value is null
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }


    /// Name of the variant, used in error messages
    pub const fn kind_name(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "Boolean",
            Self::Byte(_) => "Byte",
            Self::Short(_) => "Short",
            Self::Int(_) => "Integer",
            Self::Long(_) => "Long",
            Self::Float(_) => "Float",
            Self::Double(_) => "Double",
            Self::Char(_) => "Character",
            Self::String(_) => "String",
            Self::Date(_) => "Date",
            Self::Calendar(_) => "Calendar",
            Self::List(_) => "List",
            Self::Map(_) => "Map",
        }
    }

    /// Try to get as string slice
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// Try to get as an instant; calendar values are normalized to UTC
    pub fn as_date(&self) -> Option<DateTime<Utc>> {
        match self {
            Self::Date(dt) => Some(*dt),
            Self::Calendar(dt) => Some(dt.with_timezone(&Utc)),
            _ => None,
        }
    }

    /// Create a string value
    pub fn string(value: impl Into<String>) -> Self {
        Self::String(value.into())
    }

    /// Create a date value from epoch milliseconds
    pub fn date_millis(millis: i64) -> Option<Self> {
        Utc.timestamp_millis_opt(millis).single().map(Self::Date)
    }

    /// Convert from a JSON value
    ///
    /// Integers become `Long`, other numbers `Double`; objects keep their key order.
    pub fn from_json(json: &serde_json::Value) -> Self {
        match json {
            serde_json::Value::Null => Self::Null,
            serde_json::Value::Bool(b) => Self::Bool(*b),
            serde_json::Value::Number(n) => match n.as_i64() {
                Some(i) => Self::Long(i),
                None => Self::Double(n.as_f64().unwrap_or(f64::NAN)),
            },
            serde_json::Value::String(s) => Self::String(s.clone()),
            serde_json::Value::Array(items) => Self::List(items.iter().map(Self::from_json).collect()),
            serde_json::Value::Object(obj) => Self::Map(
                obj.iter()
                    .map(|(k, v)| (k.clone(), Self::from_json(v)))
                    .collect(),
            ),
        }
    }

    /// Convert to a JSON value
    ///
    /// Dates are rendered as RFC 3339 strings with millisecond precision;
    /// non-finite floats become `null`.
    pub fn to_json(&self) -> serde_json::Value {
        use serde_json::Value as Json;
        match self {
            Self::Null => Json::Null,
            Self::Bool(b) => Json::Bool(*b),
            Self::Byte(n) => Json::from(*n),
            Self::Short(n) => Json::from(*n),
            Self::Int(n) => Json::from(*n),
            Self::Long(n) => Json::from(*n),
            Self::Float(n) => serde_json::Number::from_f64(f64::from(*n))
                .map(Json::Number)
                .unwrap_or(Json::Null),
            Self::Double(n) => serde_json::Number::from_f64(*n)
                .map(Json::Number)
                .unwrap_or(Json::Null),
            Self::Char(c) => Json::String(c.to_string()),
            Self::String(s) => Json::String(s.clone()),
            Self::Date(dt) => Json::String(dt.to_rfc3339_opts(SecondsFormat::Millis, true)),
            Self::Calendar(dt) => Json::String(dt.to_rfc3339_opts(SecondsFormat::Millis, false)),
            Self::List(items) => Json::Array(items.iter().map(Self::to_json).collect()),
            Self::Map(map) => Json::Object(
                map.iter()
                    .map(|(k, v)| (k.clone(), v.to_json()))
                    .collect(),
            ),
        }
    }
}

/// Convert a JSON object into a `ValueMap`; `None` if `json` is not an object
pub fn map_from_json(json: &serde_json::Value) -> Option<ValueMap> {
    match Value::from_json(json) {
        Value::Map(map) => Some(map),
        _ => None,
    }
}

/// Convert a `ValueMap` into a JSON object
pub fn map_to_json(map: &ValueMap) -> serde_json::Value {
    serde_json::Value::Object(
        map.iter()
            .map(|(k, v)| (k.clone(), v.to_json()))
            .collect(),
    )
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => write!(f, "null"),
            Self::Bool(b) => write!(f, "{}", b),
            Self::Byte(n) => write!(f, "{}", n),
            Self::Short(n) => write!(f, "{}", n),
            Self::Int(n) => write!(f, "{}", n),
            Self::Long(n) => write!(f, "{}", n),
            Self::Float(n) => write!(f, "{}", n),
            Self::Double(n) => write!(f, "{}", n),
            Self::Char(c) => write!(f, "{}", c),
            Self::String(s) => write!(f, "{}", s),
            Self::Date(dt) => write!(f, "{}", dt.to_rfc3339_opts(SecondsFormat::Millis, true)),
            Self::Calendar(dt) => write!(f, "{}", dt.to_rfc3339_opts(SecondsFormat::Millis, false)),
            Self::List(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                write!(f, "]")
            }
            Self::Map(map) => {
                write!(f, "{{")?;
                for (i, (k, v)) in map.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}={}", k, v)?;
                }
                write!(f, "}}")
            }
        }
    }
}

// ============================================================================
// Conversions into Value
// ============================================================================

macro_rules! impl_from_scalar {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$ty> for Value {
                fn from(value: $ty) -> Self {
                    Self::$variant(value)
                }
            }
        )*
    };
}

impl_from_scalar! {
    bool => Bool,
    i8 => Byte,
    i16 => Short,
    i32 => Int,
    i64 => Long,
    f32 => Float,
    f64 => Double,
    char => Char,
    String => String,
    DateTime<Utc> => Date,
    DateTime<FixedOffset> => Calendar,
    ValueMap => Map,
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Self::List(items.into_iter().map(Into::into).collect())
    }
}
