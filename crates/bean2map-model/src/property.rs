//! Resolved properties

use bean2map_types::{DateFormat, ValueType};
use serde::Serialize;

/// A getter or setter backing a property
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Accessor {
    /// Method name, e.g. `getId`
    pub method: String,
    /// Type declaring the method
    pub declared_in: String,
    /// Getter return type or setter parameter type
    pub value_type: ValueType,
}

/// One resolved bean-style property
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyDescriptor {
    pub name: String,
    pub read: Option<Accessor>,
    pub write: Option<Accessor>,
    pub value_type: ValueType,
    /// Omitted from encode, decode and filter
    pub excluded: bool,
    pub date_format: Option<DateFormat>,
}

impl PropertyDescriptor {
    pub fn is_readable(&self) -> bool {
        self.read.is_some()
    }

    pub fn is_writable(&self) -> bool {
        self.write.is_some()
    }

    /// Null values of reference types are skipped on encode
    pub fn is_nullable(&self) -> bool {
        !self.value_type.is_primitive()
    }

    /// Date format to apply, falling back to the default marker
    pub fn effective_date_format(&self) -> DateFormat {
        self.date_format.clone().unwrap_or_default()
    }
}

/// The flattened, override-resolved property list of one type
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedType {
    type_name: String,
    properties: Vec<PropertyDescriptor>,
}

impl ResolvedType {
    pub fn new(type_name: impl Into<String>, properties: Vec<PropertyDescriptor>) -> Self {
        Self {
            type_name: type_name.into(),
            properties,
        }
    }

    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    pub fn get(&self, name: &str) -> Option<&PropertyDescriptor> {
        self.properties.iter().find(|p| p.name == name)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, PropertyDescriptor> {
        self.properties.iter()
    }

    pub fn len(&self) -> usize {
        self.properties.len()
    }

    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.properties.iter().map(|p| p.name.as_str())
    }

    /// Non-excluded properties with a read accessor
    pub fn readable(&self) -> impl Iterator<Item = &PropertyDescriptor> {
        self.properties
            .iter()
            .filter(|p| !p.excluded && p.is_readable())
    }

    /// Non-excluded properties with a write accessor
    pub fn writable(&self) -> impl Iterator<Item = &PropertyDescriptor> {
        self.properties
            .iter()
            .filter(|p| !p.excluded && p.is_writable())
    }
}

impl<'a> IntoIterator for &'a ResolvedType {
    type Item = &'a PropertyDescriptor;
    type IntoIter = std::slice::Iter<'a, PropertyDescriptor>;

    fn into_iter(self) -> Self::IntoIter {
        self.properties.iter()
    }
}
