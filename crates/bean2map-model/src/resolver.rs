//! Property resolution
//!
//! Walks a type's hierarchy depth-first (the type itself, then its
//! superclass chain, then implemented interfaces) and keeps an accumulator
//! of accessor candidates, most-derived first. A candidate overridden by an
//! accumulated method is dropped; accumulated methods overridden by the
//! candidate are removed before it is admitted. The surviving methods are
//! then paired into getter/setter properties.
//!
//! Any unresolved reference in the hierarchy fails the whole request, since
//! a missing ancestor could hide an override.

use crate::naming::{self, AccessorKind};
use crate::property::{Accessor, PropertyDescriptor, ResolvedType};
use crate::type_model::{FieldDef, MethodDef, TypeDef, TypeModel};
use bean2map_types::ValueType;
use indexmap::IndexMap;
use log::{debug, trace};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;

/// Resolution errors, fatal for the requested type
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolutionError {
    #[error("Type not found: {0}")]
    UnknownType(String),

    #[error("Unresolved type '{name}' referenced from '{referenced_from}'")]
    UnresolvedType {
        name: String,
        referenced_from: String,
    },

    #[error("Cyclic hierarchy while resolving '{type_name}': {}", .cycle.join(" -> "))]
    CyclicHierarchy {
        type_name: String,
        cycle: Vec<String>,
    },
}

pub type ResolutionResult<T> = Result<T, ResolutionError>;

#[derive(Debug, Clone, Copy)]
struct Candidate<'m> {
    owner: &'m TypeDef,
    method: &'m MethodDef,
}

impl Candidate<'_> {
    fn is_same(&self, other: &Candidate<'_>) -> bool {
        self.owner.name == other.owner.name && self.method.same_signature(other.method)
    }
}

#[derive(Default)]
struct AccessorPair<'m> {
    read: Option<Candidate<'m>>,
    write: Option<Candidate<'m>>,
}

/// Resolves types of one model, memoizing each result
pub struct PropertyResolver {
    model: Arc<TypeModel>,
    cache: RwLock<HashMap<String, Arc<ResolvedType>>>,
}

impl PropertyResolver {
    pub fn new(model: impl Into<Arc<TypeModel>>) -> Self {
        Self {
            model: model.into(),
            cache: RwLock::new(HashMap::new()),
        }
    }

    pub fn model(&self) -> &TypeModel {
        &self.model
    }

    /// Resolve a type, reusing an earlier result when available
    pub fn resolve(&self, type_name: &str) -> ResolutionResult<Arc<ResolvedType>> {
        if let Some(resolved) = self.cache.read().get(type_name) {
            return Ok(Arc::clone(resolved));
        }

        let resolved = Arc::new(self.resolve_uncached(type_name)?);
        debug!(
            "Resolved {} properties for {}",
            resolved.len(),
            resolved.type_name()
        );

        let mut cache = self.cache.write();
        Ok(Arc::clone(
            cache.entry(type_name.to_string()).or_insert(resolved),
        ))
    }

    /// Number of memoized types
    pub fn cached_types(&self) -> usize {
        self.cache.read().len()
    }

    fn resolve_uncached(&self, type_name: &str) -> ResolutionResult<ResolvedType> {
        let leaf = self
            .model
            .get_type(type_name)
            .ok_or_else(|| ResolutionError::UnknownType(type_name.to_string()))?;

        let mut accumulator = Vec::new();
        let mut path = Vec::new();
        self.collect(leaf, leaf, &mut accumulator, &mut path)?;

        let fields = self.collect_fields(leaf);
        Ok(ResolvedType::new(
            leaf.name.clone(),
            pair_accessors(&accumulator, &fields),
        ))
    }

    fn collect<'m>(
        &'m self,
        leaf: &'m TypeDef,
        current: &'m TypeDef,
        accumulator: &mut Vec<Candidate<'m>>,
        path: &mut Vec<&'m str>,
    ) -> ResolutionResult<()> {
        if path.contains(&current.name.as_str()) {
            let mut cycle: Vec<String> = path.iter().map(|name| name.to_string()).collect();
            cycle.push(current.name.clone());
            return Err(ResolutionError::CyclicHierarchy {
                type_name: leaf.name.clone(),
                cycle,
            });
        }
        path.push(&current.name);

        for method in current.methods.iter().filter(|m| is_eligible(m)) {
            self.admit(
                leaf,
                Candidate {
                    owner: current,
                    method,
                },
                accumulator,
            );
        }

        let parents = current
            .effective_superclass()
            .into_iter()
            .chain(current.interfaces.iter().map(String::as_str));
        for parent in parents {
            let def = self.model.get_type(parent).ok_or_else(|| {
                ResolutionError::UnresolvedType {
                    name: parent.to_string(),
                    referenced_from: current.name.clone(),
                }
            })?;
            self.collect(leaf, def, accumulator, path)?;
        }

        path.pop();
        Ok(())
    }

    fn admit<'m>(
        &self,
        leaf: &TypeDef,
        candidate: Candidate<'m>,
        accumulator: &mut Vec<Candidate<'m>>,
    ) {
        let shadowed = accumulator
            .iter()
            .any(|existing| existing.is_same(&candidate) || self.overrides(leaf, existing, &candidate));
        if shadowed {
            trace!(
                "{}.{} is overridden, dropped",
                candidate.owner.name, candidate.method.name
            );
            return;
        }

        accumulator.retain(|existing| {
            let overridden = self.overrides(leaf, &candidate, existing);
            if overridden {
                trace!(
                    "{}.{} overrides {}.{}",
                    candidate.owner.name,
                    candidate.method.name,
                    existing.owner.name,
                    existing.method.name
                );
            }
            !overridden
        });
        accumulator.push(candidate);
    }

    /// Does `overrider` override `overridden` as seen from `leaf`?
    ///
    /// Compatibility is name and arity; parameter and return types may differ.
    /// A class method also implements a same-named interface method when
    /// `leaf` inherits both.
    fn overrides(&self, leaf: &TypeDef, overrider: &Candidate<'_>, overridden: &Candidate<'_>) -> bool {
        if overrider.owner.name == overridden.owner.name
            || overrider.method.name != overridden.method.name
            || overrider.method.arity() != overridden.method.arity()
        {
            return false;
        }

        let (sub, sup) = (overrider.owner.name.as_str(), overridden.owner.name.as_str());
        if self.model.is_subtype(sub, sup) {
            return true;
        }
        !overrider.owner.is_interface()
            && overridden.owner.is_interface()
            && self.model.is_subtype(&leaf.name, sub)
            && self.model.is_subtype(&leaf.name, sup)
    }

    // Fields along the superclass chain; a subclass field shadows an ancestor's.
    fn collect_fields<'m>(&'m self, leaf: &'m TypeDef) -> IndexMap<&'m str, &'m FieldDef> {
        let mut fields = IndexMap::new();
        let mut current = Some(leaf);
        while let Some(def) = current {
            for field in &def.fields {
                fields.entry(field.name.as_str()).or_insert(field);
            }
            current = def
                .effective_superclass()
                .and_then(|name| self.model.get_type(name));
        }
        fields
    }
}

fn is_eligible(method: &MethodDef) -> bool {
    if !method.is_public() || method.is_static {
        return false;
    }
    // identity comparison
    if method.name == "equals" && method.arity() == 1 {
        return false;
    }
    (method.arity() == 0 && method.returns.is_some()) || method.arity() == 1
}

fn pair_accessors(
    accumulator: &[Candidate<'_>],
    fields: &IndexMap<&str, &FieldDef>,
) -> Vec<PropertyDescriptor> {
    let mut pairs: IndexMap<String, AccessorPair<'_>> = IndexMap::new();
    for candidate in accumulator {
        let Some((kind, name)) = naming::classify(candidate.method) else {
            continue;
        };
        let pair = pairs.entry(name).or_default();
        let slot = match kind {
            AccessorKind::Getter => &mut pair.read,
            AccessorKind::Setter => &mut pair.write,
        };
        if slot.is_none() {
            *slot = Some(*candidate);
        }
    }

    pairs
        .into_iter()
        .map(|(name, pair)| {
            let field = fields.get(name.as_str()).copied();
            descriptor(name, pair, field)
        })
        .collect()
}

fn descriptor(name: String, pair: AccessorPair<'_>, field: Option<&FieldDef>) -> PropertyDescriptor {
    let read = pair.read.map(|c| accessor(c, c.method.returns.clone()));
    let write = pair.write.map(|c| accessor(c, c.method.params.first().cloned()));
    let value_type = read
        .as_ref()
        .or(write.as_ref())
        .map(|a| a.value_type.clone())
        .unwrap_or_else(|| ValueType::object("Object"));

    let methods = || pair.read.iter().chain(pair.write.iter()).map(|c| c.method);
    let excluded = methods().any(|m| m.ignore) || field.is_some_and(|f| f.ignore);
    let date_format = methods()
        .find_map(|m| m.date_format.clone())
        .or_else(|| field.and_then(|f| f.date_format.clone()));

    PropertyDescriptor {
        name,
        read,
        write,
        value_type,
        excluded,
        date_format,
    }
}

fn accessor(candidate: Candidate<'_>, value_type: Option<ValueType>) -> Accessor {
    Accessor {
        method: candidate.method.name.clone(),
        declared_in: candidate.owner.name.clone(),
        value_type: value_type.unwrap_or_else(|| ValueType::object("Object")),
    }
}
