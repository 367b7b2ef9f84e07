//! bean2map type model and property resolution
//!
//! This crate provides:
//! - `TypeModel`: classes, interfaces, methods and fields, built in code or loaded from JSON
//! - Accessor naming rules (`get`/`is`/`set` prefixes, decapitalization)
//! - `PropertyResolver`: the override-aware hierarchy walk producing a `ResolvedType`

pub mod naming;
pub mod property;
pub mod resolver;
pub mod type_model;

pub use naming::{AccessorKind, classify, decapitalize};
pub use property::{Accessor, PropertyDescriptor, ResolvedType};
pub use resolver::{PropertyResolver, ResolutionError, ResolutionResult};
pub use type_model::{
    FieldDef, MethodDef, ModelError, TypeDef, TypeKind, TypeModel, Visibility, parse_json,
};
