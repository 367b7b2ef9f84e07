//! Codec registry
//!
//! Maps an entity type to its codec. Registration and lookup are safe from
//! any number of threads; the last registration for a type wins.

use crate::catalog::CodecCatalog;
use crate::codec::MapCodec;
use crate::entity::Entity;
use crate::error::{CodecError, CodecResult};
use crate::manifest::{LoadReport, ManifestSource, bulk_load};
use bean2map_model::PropertyResolver;
use bean2map_types::ValueMap;
use log::debug;
use parking_lot::RwLock;
use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

type FilterFn = dyn Fn(&ValueMap) -> ValueMap + Send + Sync;

/// A codec with its entity type erased
///
/// Keeps the typed `Arc<dyn MapCodec<T>>` for downcasting and a type-free
/// `filter` for callers that only hold a type name.
#[derive(Clone)]
pub struct ErasedCodec {
    type_id: TypeId,
    type_name: &'static str,
    typed: Arc<dyn Any + Send + Sync>,
    filter: Arc<FilterFn>,
}

impl ErasedCodec {
    pub fn new<T: Entity>(codec: Arc<dyn MapCodec<T>>) -> Self {
        let filter_codec = Arc::clone(&codec);
        Self {
            type_id: TypeId::of::<T>(),
            type_name: T::TYPE_NAME,
            typed: Arc::new(codec),
            filter: Arc::new(move |map: &ValueMap| filter_codec.filter(map)),
        }
    }

    pub fn type_id(&self) -> TypeId {
        self.type_id
    }

    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Recover the typed codec; `None` if `T` is not the erased entity type
    pub fn downcast<T: Entity>(&self) -> Option<Arc<dyn MapCodec<T>>> {
        self.typed.downcast_ref::<Arc<dyn MapCodec<T>>>().cloned()
    }

    pub fn filter(&self, map: &ValueMap) -> ValueMap {
        (self.filter)(map)
    }
}

impl fmt::Debug for ErasedCodec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ErasedCodec")
            .field("type_name", &self.type_name)
            .finish_non_exhaustive()
    }
}

/// Type-to-codec lookup table
#[derive(Default)]
pub struct CodecRegistry {
    entries: RwLock<HashMap<TypeId, ErasedCodec>>,
}

impl CodecRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a registry from discovery manifests
    ///
    /// Entries that fail are reported in the returned `LoadReport` and never
    /// stop the load.
    pub fn initialize(
        catalog: &CodecCatalog,
        resolver: &PropertyResolver,
        sources: &[ManifestSource],
    ) -> (Self, LoadReport) {
        let registry = Self::new();
        let report = bulk_load(&registry, catalog, resolver, sources);
        (registry, report)
    }

    /// Register a codec for `T`, returning the one it replaces
    pub fn register<T: Entity>(&self, codec: Arc<dyn MapCodec<T>>) -> Option<ErasedCodec> {
        self.register_erased(ErasedCodec::new(codec))
    }

    pub fn register_erased(&self, codec: ErasedCodec) -> Option<ErasedCodec> {
        debug!("Registering codec for {}", codec.type_name());
        self.entries.write().insert(codec.type_id(), codec)
    }

    /// Codec for `T`, or `None` if nothing is registered
    pub fn lookup<T: Entity>(&self) -> Option<Arc<dyn MapCodec<T>>> {
        self.entries
            .read()
            .get(&TypeId::of::<T>())
            .and_then(ErasedCodec::downcast::<T>)
    }

    /// Like [`CodecRegistry::lookup`], for callers that treat absence as an error
    pub fn require<T: Entity>(&self) -> CodecResult<Arc<dyn MapCodec<T>>> {
        self.lookup::<T>()
            .ok_or_else(|| CodecError::ConverterNotFound(T::TYPE_NAME.to_string()))
    }

    pub fn lookup_by_name(&self, type_name: &str) -> Option<ErasedCodec> {
        self.entries
            .read()
            .values()
            .find(|codec| codec.type_name() == type_name)
            .cloned()
    }

    pub fn contains<T: Entity>(&self) -> bool {
        self.entries.read().contains_key(&TypeId::of::<T>())
    }

    /// Registered entity type names, sorted
    pub fn type_names(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.entries.read().values().map(ErasedCodec::type_name).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}

impl fmt::Debug for CodecRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CodecRegistry")
            .field("types", &self.type_names())
            .finish()
    }
}
