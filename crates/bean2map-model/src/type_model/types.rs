//! Type definitions making up a `TypeModel`

use bean2map_types::{DateFormat, ValueType};
use serde::{Deserialize, Serialize};

/// Class or interface
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TypeKind {
    #[default]
    Class,
    Interface,
}

/// Member visibility; only public members take part in resolution
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    #[default]
    Public,
    Protected,
    Package,
    Private,
}

/// A declared method
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MethodDef {
    pub name: String,
    #[serde(default)]
    pub params: Vec<ValueType>,
    /// Return type, `None` for void
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub returns: Option<ValueType>,
    #[serde(default)]
    pub visibility: Visibility,
    #[serde(default, rename = "static")]
    pub is_static: bool,
    /// Exclusion marker
    #[serde(default)]
    pub ignore: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_format: Option<DateFormat>,
}

impl MethodDef {
    /// A public method with the given signature
    pub fn new(
        name: impl Into<String>,
        params: Vec<ValueType>,
        returns: Option<ValueType>,
    ) -> Self {
        Self {
            name: name.into(),
            params,
            returns,
            visibility: Visibility::Public,
            is_static: false,
            ignore: false,
            date_format: None,
        }
    }

    /// A zero-argument method returning `returns`
    pub fn getter(name: impl Into<String>, returns: impl Into<ValueType>) -> Self {
        Self::new(name, Vec::new(), Some(returns.into()))
    }

    /// A void method taking one `param`
    pub fn setter(name: impl Into<String>, param: impl Into<ValueType>) -> Self {
        Self::new(name, vec![param.into()], None)
    }

    pub fn with_visibility(mut self, visibility: Visibility) -> Self {
        self.visibility = visibility;
        self
    }

    pub fn with_static(mut self) -> Self {
        self.is_static = true;
        self
    }

    pub fn ignored(mut self) -> Self {
        self.ignore = true;
        self
    }

    pub fn with_date_format(mut self, format: DateFormat) -> Self {
        self.date_format = Some(format);
        self
    }

    pub fn is_public(&self) -> bool {
        self.visibility == Visibility::Public
    }

    pub fn arity(&self) -> usize {
        self.params.len()
    }

    /// Same name and parameter types
    pub fn same_signature(&self, other: &MethodDef) -> bool {
        self.name == other.name && self.params == other.params
    }
}

/// A declared field; only its markers matter to resolution
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldDef {
    pub name: String,
    #[serde(rename = "type")]
    pub value_type: ValueType,
    #[serde(default)]
    pub ignore: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_format: Option<DateFormat>,
}

impl FieldDef {
    pub fn new(name: impl Into<String>, value_type: impl Into<ValueType>) -> Self {
        Self {
            name: name.into(),
            value_type: value_type.into(),
            ignore: false,
            date_format: None,
        }
    }

    pub fn ignored(mut self) -> Self {
        self.ignore = true;
        self
    }

    pub fn with_date_format(mut self, format: DateFormat) -> Self {
        self.date_format = Some(format);
        self
    }
}

/// A class or interface definition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeDef {
    pub name: String,
    #[serde(default)]
    pub kind: TypeKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub superclass: Option<String>,
    #[serde(default)]
    pub interfaces: Vec<String>,
    #[serde(default)]
    pub methods: Vec<MethodDef>,
    #[serde(default)]
    pub fields: Vec<FieldDef>,
}

impl TypeDef {
    fn new(name: impl Into<String>, kind: TypeKind) -> Self {
        Self {
            name: name.into(),
            kind,
            superclass: None,
            interfaces: Vec::new(),
            methods: Vec::new(),
            fields: Vec::new(),
        }
    }

    pub fn class(name: impl Into<String>) -> Self {
        Self::new(name, TypeKind::Class)
    }

    pub fn interface(name: impl Into<String>) -> Self {
        Self::new(name, TypeKind::Interface)
    }

    pub fn extends(mut self, superclass: impl Into<String>) -> Self {
        self.superclass = Some(superclass.into());
        self
    }

    pub fn implements(mut self, interface: impl Into<String>) -> Self {
        self.interfaces.push(interface.into());
        self
    }

    pub fn method(mut self, method: MethodDef) -> Self {
        self.methods.push(method);
        self
    }

    pub fn field(mut self, field: FieldDef) -> Self {
        self.fields.push(field);
        self
    }

    /// Getter and setter pair for a property, with a backing field
    pub fn property(self, name: &str, value_type: impl Into<ValueType>) -> Self {
        let value_type = value_type.into();
        let suffix = capitalize(name);
        let getter = if value_type == ValueType::parse("boolean") {
            format!("is{suffix}")
        } else {
            format!("get{suffix}")
        };
        self.field(FieldDef::new(name, value_type.clone()))
            .method(MethodDef::getter(getter, value_type.clone()))
            .method(MethodDef::setter(format!("set{suffix}"), value_type))
    }

    pub fn is_interface(&self) -> bool {
        self.kind == TypeKind::Interface
    }

    /// Superclass to walk into, skipping the universal root
    pub fn effective_superclass(&self) -> Option<&str> {
        self.superclass
            .as_deref()
            .filter(|name| !super::is_root_object(name))
    }

    pub fn find_field(&self, name: &str) -> Option<&FieldDef> {
        self.fields.iter().find(|f| f.name == name)
    }
}

fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
