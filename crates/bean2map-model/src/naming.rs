//! Accessor naming conventions
//!
//! `getX()` / `isX()` read a property, `setX(v)` writes it. Property names
//! are derived by stripping the prefix and decapitalizing the rest.

use crate::type_model::MethodDef;

/// Read or write side of a property
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AccessorKind {
    Getter,
    Setter,
}

/// Classify a method as a getter or setter, returning the property name
pub fn classify(method: &MethodDef) -> Option<(AccessorKind, String)> {
    let name = method.name.as_str();

    if let Some(rest) = name.strip_prefix("get").filter(|r| !r.is_empty()) {
        if method.params.is_empty() && method.returns.is_some() {
            return Some((AccessorKind::Getter, decapitalize(rest)));
        }
    } else if let Some(rest) = name.strip_prefix("is").filter(|r| !r.is_empty()) {
        let boolean = method.returns.as_ref().is_some_and(|r| r.is_boolean_like());
        if method.params.is_empty() && boolean {
            return Some((AccessorKind::Getter, decapitalize(rest)));
        }
    }

    if let Some(rest) = name.strip_prefix("set").filter(|r| !r.is_empty()) {
        if method.params.len() == 1 {
            return Some((AccessorKind::Setter, decapitalize(rest)));
        }
    }

    None
}

/// Lower-case the first character, unless the first two are both upper-case
///
/// `"FooBah"` becomes `"fooBah"`, `"X"` becomes `"x"`, `"URL"` stays `"URL"`.
pub fn decapitalize(name: &str) -> String {
    let mut chars = name.chars();
    let Some(first) = chars.next() else {
        return String::new();
    };
    if first.is_uppercase() && chars.next().is_some_and(char::is_uppercase) {
        return name.to_string();
    }
    first.to_lowercase().chain(name.chars().skip(1)).collect()
}
