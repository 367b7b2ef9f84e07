//! Declared property types
//!
//! A `ValueType` is the semantic tag attached to an accessor's return or
//! parameter type. It decides null handling on encode (primitive vs.
//! reference) and which coercion, if any, applies on decode.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Scalar kinds shared by the primitive and boxed forms
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Scalar {
    Byte,
    Short,
    Int,
    Long,
    Float,
    Double,
    Boolean,
    Char,
}

impl Scalar {
    /// Name of the primitive form (`int`, `boolean`, ...)
    pub const fn primitive_name(&self) -> &'static str {
        match self {
            Self::Byte => "byte",
            Self::Short => "short",
            Self::Int => "int",
            Self::Long => "long",
            Self::Float => "float",
            Self::Double => "double",
            Self::Boolean => "boolean",
            Self::Char => "char",
        }
    }

    /// Name of the boxed form (`Integer`, `Boolean`, ...)
    pub const fn boxed_name(&self) -> &'static str {
        match self {
            Self::Byte => "Byte",
            Self::Short => "Short",
            Self::Int => "Integer",
            Self::Long => "Long",
            Self::Float => "Float",
            Self::Double => "Double",
            Self::Boolean => "Boolean",
            Self::Char => "Character",
        }
    }

    fn from_primitive_name(name: &str) -> Option<Self> {
        Some(match name {
            "byte" => Self::Byte,
            "short" => Self::Short,
            "int" => Self::Int,
            "long" => Self::Long,
            "float" => Self::Float,
            "double" => Self::Double,
            "boolean" => Self::Boolean,
            "char" => Self::Char,
            _ => return None,
        })
    }

    fn from_boxed_name(name: &str) -> Option<Self> {
        Some(match name {
            "Byte" => Self::Byte,
            "Short" => Self::Short,
            "Integer" => Self::Int,
            "Long" => Self::Long,
            "Float" => Self::Float,
            "Double" => Self::Double,
            "Boolean" => Self::Boolean,
            "Character" => Self::Char,
            _ => return None,
        })
    }
}

/// Target kinds of the fixed coercion table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CoercionTarget {
    Byte,
    Short,
    Int,
    Long,
    Float,
    Double,
    Boolean,
    Char,
    Date,
}

impl CoercionTarget {
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Byte => "byte",
            Self::Short => "short",
            Self::Int => "int",
            Self::Long => "long",
            Self::Float => "float",
            Self::Double => "double",
            Self::Boolean => "boolean",
            Self::Char => "char",
            Self::Date => "Date",
        }
    }

    /// Parse a target name; accepts both primitive and boxed spellings
    pub fn parse(name: &str) -> Option<Self> {
        if name == "Date" || name == "date" {
            return Some(Self::Date);
        }
        Scalar::from_primitive_name(name)
            .or_else(|| Scalar::from_boxed_name(name))
            .map(Self::from)
    }
}

impl From<Scalar> for CoercionTarget {
    fn from(scalar: Scalar) -> Self {
        match scalar {
            Scalar::Byte => Self::Byte,
            Scalar::Short => Self::Short,
            Scalar::Int => Self::Int,
            Scalar::Long => Self::Long,
            Scalar::Float => Self::Float,
            Scalar::Double => Self::Double,
            Scalar::Boolean => Self::Boolean,
            Scalar::Char => Self::Char,
        }
    }
}

impl fmt::Display for CoercionTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Semantic type of a property
///
/// Parsed from (and rendered back to) a plain type name:
/// lower-case primitive names, boxed wrapper names, `String`, `Date`,
/// and any other name as an opaque object type.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ValueType {
    /// Non-nullable primitive
    Primitive(Scalar),
    /// Nullable wrapper of a primitive
    Boxed(Scalar),
    String,
    Date,
    /// Any other reference type, by name (`List<String>`, `Map<String,Object>`, ...)
    Object(String),
}

impl ValueType {
    /// Parse a type name
    pub fn parse(name: &str) -> Self {
        let name = name.trim();
        if let Some(scalar) = Scalar::from_primitive_name(name) {
            return Self::Primitive(scalar);
        }
        if let Some(scalar) = Scalar::from_boxed_name(name) {
            return Self::Boxed(scalar);
        }
        match name {
            "String" => Self::String,
            "Date" => Self::Date,
            other => Self::Object(other.to_string()),
        }
    }

    pub fn object(name: impl Into<String>) -> Self {
        Self::Object(name.into())
    }

    /// Primitive values can never be null
    pub const fn is_primitive(&self) -> bool {
        matches!(self, Self::Primitive(_))
    }

    /// `boolean` or `Boolean`; required for `is`-prefixed getters
    pub const fn is_boolean_like(&self) -> bool {
        matches!(
            self,
            Self::Primitive(Scalar::Boolean) | Self::Boxed(Scalar::Boolean)
        )
    }

    pub const fn is_date(&self) -> bool {
        matches!(self, Self::Date)
    }

    /// Coercion applied on decode, `None` for direct assignment
    pub fn coercion_target(&self) -> Option<CoercionTarget> {
        match self {
            Self::Primitive(scalar) | Self::Boxed(scalar) => Some(CoercionTarget::from(*scalar)),
            Self::Date => Some(CoercionTarget::Date),
            Self::String | Self::Object(_) => None,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Self::Primitive(scalar) => scalar.primitive_name(),
            Self::Boxed(scalar) => scalar.boxed_name(),
            Self::String => "String",
            Self::Date => "Date",
            Self::Object(name) => name,
        }
    }
}

impl From<String> for ValueType {
    fn from(name: String) -> Self {
        Self::parse(&name)
    }
}

impl From<&str> for ValueType {
    fn from(name: &str) -> Self {
        Self::parse(name)
    }
}

impl From<ValueType> for String {
    fn from(value_type: ValueType) -> Self {
        value_type.name().to_string()
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
