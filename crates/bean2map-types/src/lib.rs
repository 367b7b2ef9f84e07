//! bean2map type layer
//!
//! This crate defines what flows between entities and maps:
//! - `Value` / `ValueMap` - the dynamic side of a conversion
//! - `ValueType` - declared property types (primitive, boxed, string, date, object)
//! - The fixed coercion table used when decoding
//! - Date format markers and their compiled patterns

pub mod coercion;
pub mod convert;
pub mod date_format;
pub mod value;
pub mod value_type;

pub use coercion::{CoercionError, CoercionResult, TypeCoercer};
pub use convert::FromValue;
pub use date_format::{DateFormat, DatePattern, PatternError};
pub use value::{Value, ValueMap, map_from_json, map_to_json};
pub use value_type::{CoercionTarget, Scalar, ValueType};
