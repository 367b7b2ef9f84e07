//! Type model: the declarative input of property resolution
//!
//! A `TypeModel` describes classes and interfaces (superclass, implemented
//! interfaces, methods, fields and their markers). It can be assembled in
//! code with the `TypeDef` builders or loaded from JSON.

mod parser;
mod types;

pub use parser::parse_json;
pub use types::*;

use indexmap::IndexMap;
use std::path::Path;
use thiserror::Error;

/// Names of the universal root type; the superclass walk stops there
pub const ROOT_OBJECT_NAMES: &[&str] = &["Object", "java.lang.Object"];

pub fn is_root_object(name: &str) -> bool {
    ROOT_OBJECT_NAMES.contains(&name)
}

/// Model loading errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("IO error: {0}")]
    IoError(String),

    #[error("Duplicate type definition: {0}")]
    DuplicateType(String),

    #[error("Unsupported model format: {0}")]
    UnsupportedFormat(String),
}

/// A set of type definitions, keyed by name in declaration order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TypeModel {
    pub name: String,
    types: IndexMap<String, TypeDef>,
}

impl TypeModel {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            types: IndexMap::new(),
        }
    }

    /// Add a type; names must be unique
    pub fn add_type(&mut self, def: TypeDef) -> Result<(), ModelError> {
        if self.types.contains_key(&def.name) {
            return Err(ModelError::DuplicateType(def.name));
        }
        self.types.insert(def.name.clone(), def);
        Ok(())
    }

    /// Builder form of [`TypeModel::add_type`]
    pub fn with_type(mut self, def: TypeDef) -> Result<Self, ModelError> {
        self.add_type(def)?;
        Ok(self)
    }

    pub fn get_type(&self, name: &str) -> Option<&TypeDef> {
        self.types.get(name)
    }

    pub fn has_type(&self, name: &str) -> bool {
        self.types.contains_key(name)
    }

    pub fn types(&self) -> impl Iterator<Item = &TypeDef> {
        self.types.values()
    }

    pub fn type_names(&self) -> impl Iterator<Item = &str> {
        self.types.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// Check whether `sub` is `sup` or inherits from it, through superclasses or interfaces
    ///
    /// Unknown names and cycles simply end the search.
    pub fn is_subtype(&self, sub: &str, sup: &str) -> bool {
        let mut pending = vec![sub];
        let mut seen = Vec::new();
        while let Some(name) = pending.pop() {
            if name == sup {
                return true;
            }
            if seen.contains(&name) {
                continue;
            }
            seen.push(name);
            if let Some(def) = self.get_type(name) {
                pending.extend(def.effective_superclass());
                pending.extend(def.interfaces.iter().map(String::as_str));
            }
        }
        false
    }

    /// Load a model from a JSON string
    pub fn from_json(json: &str) -> Result<Self, ModelError> {
        parse_json(json)
    }

    /// Load a model from a JSON file
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ModelError> {
        let json =
            std::fs::read_to_string(path).map_err(|e| ModelError::IoError(e.to_string()))?;
        Self::from_json(&json)
    }

    /// Load a model from a file, picking the format from its extension
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ModelError> {
        let path = path.as_ref();
        match path.extension().and_then(|e| e.to_str()) {
            Some("json") => Self::from_json_file(path),
            Some(ext) => Err(ModelError::UnsupportedFormat(format!(
                "Unsupported file extension: .{}. Expected .json",
                ext
            ))),
            None => Err(ModelError::UnsupportedFormat(
                "No file extension found. Expected .json".to_string(),
            )),
        }
    }
}
