//! The codec contract and its resolver-driven implementation
//!
//! `BeanCodec` derives all three operations from a `ResolvedType` and the
//! coercion table; it holds no per-type logic, so two codecs built from the
//! same resolved type behave identically.

use crate::entity::{Entity, WriteError};
use crate::error::{CodecError, CodecResult};
use bean2map_model::{PropertyDescriptor, PropertyResolver, ResolvedType};
use bean2map_types::{TypeCoercer, Value, ValueMap};
use std::marker::PhantomData;
use std::sync::Arc;

/// Converts one entity type to and from string-keyed maps
pub trait MapCodec<T>: Send + Sync {
    /// Entity to map; null references are left out
    fn encode(&self, entity: &T) -> ValueMap;

    /// Map to a fresh entity; fails without returning a partial entity
    fn decode(&self, map: &ValueMap) -> CodecResult<T>;

    /// Keep only non-null entries naming readable, non-excluded properties
    fn filter(&self, map: &ValueMap) -> ValueMap;
}

/// Filter a map against a resolved type
pub fn filter_map(resolved: &ResolvedType, map: &ValueMap) -> ValueMap {
    resolved
        .readable()
        .filter_map(|property| {
            map.get(&property.name)
                .filter(|value| !value.is_null())
                .map(|value| (property.name.clone(), value.clone()))
        })
        .collect()
}

/// Codec built purely from a `ResolvedType`
pub struct BeanCodec<T> {
    resolved: Arc<ResolvedType>,
    coercer: TypeCoercer,
    _entity: PhantomData<fn() -> T>,
}

impl<T: Entity> BeanCodec<T> {
    /// Build a codec, checking once that the entity answers every accessor
    pub fn new(resolved: Arc<ResolvedType>) -> CodecResult<Self> {
        if resolved.type_name() != T::TYPE_NAME {
            return Err(CodecError::TypeMismatch {
                resolved: resolved.type_name().to_string(),
                entity: T::TYPE_NAME.to_string(),
            });
        }

        let probe = T::default();
        for property in resolved.iter().filter(|p| !p.excluded) {
            if let Some(read) = &property.read {
                if probe.read(&read.method).is_none() {
                    return Err(missing::<T>(&read.method));
                }
            }
            if let Some(write) = &property.write {
                // Null is rejected by non-optional setters; only an unknown name is fatal.
                let mut scratch = T::default();
                if let Err(WriteError::UnknownAccessor) = scratch.write(&write.method, Value::Null) {
                    return Err(missing::<T>(&write.method));
                }
            }
        }

        Ok(Self {
            resolved,
            coercer: TypeCoercer::new(),
            _entity: PhantomData,
        })
    }

    /// Resolve `T::TYPE_NAME` and build a codec for it
    pub fn from_resolver(resolver: &PropertyResolver) -> CodecResult<Self> {
        Self::new(resolver.resolve(T::TYPE_NAME)?)
    }

    pub fn resolved(&self) -> &ResolvedType {
        &self.resolved
    }

    fn encode_value(&self, property: &PropertyDescriptor, value: Value) -> Value {
        if !property.value_type.is_date() {
            return value;
        }
        match value.as_date() {
            Some(instant) => property.effective_date_format().render(&instant),
            None => value,
        }
    }

    fn decode_into(&self, entity: &mut T, property: &PropertyDescriptor, raw: &Value) -> CodecResult<()> {
        let Some(write) = &property.write else {
            return Ok(());
        };

        let value = match write.value_type.coercion_target() {
            Some(target) => match self
                .coercer
                .coerce(raw, target)
                .map_err(|e| CodecError::coercion(&property.name, e))?
            {
                Some(value) => value,
                None => return Ok(()),
            },
            None => raw.clone(),
        };

        entity
            .write(&write.method, value)
            .map_err(|e| match e {
                WriteError::UnknownAccessor => CodecError::UnknownAccessor {
                    type_name: T::TYPE_NAME.to_string(),
                    accessor: write.method.clone(),
                },
                WriteError::Mismatch(source) => CodecError::coercion(&property.name, source),
            })
    }
}

fn missing<T: Entity>(accessor: &str) -> CodecError {
    CodecError::MissingAccessor {
        type_name: T::TYPE_NAME.to_string(),
        accessor: accessor.to_string(),
    }
}

impl<T: Entity> MapCodec<T> for BeanCodec<T> {
    fn encode(&self, entity: &T) -> ValueMap {
        let mut map = ValueMap::new();
        for property in self.resolved.readable() {
            let Some(read) = &property.read else {
                continue;
            };
            let value = entity.read(&read.method).unwrap_or(Value::Null);
            if value.is_null() && property.is_nullable() {
                continue;
            }
            map.insert(property.name.clone(), self.encode_value(property, value));
        }
        map
    }

    fn decode(&self, map: &ValueMap) -> CodecResult<T> {
        let mut entity = T::default();
        for property in self.resolved.writable() {
            match map.get(&property.name) {
                Some(raw) if !raw.is_null() => self.decode_into(&mut entity, property, raw)?,
                _ => {}
            }
        }
        Ok(entity)
    }

    fn filter(&self, map: &ValueMap) -> ValueMap {
        filter_map(&self.resolved, map)
    }
}
