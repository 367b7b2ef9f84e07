//! Codec factories addressable by identifier
//!
//! Discovery manifests name codecs by identifier; the catalog is how an
//! identifier becomes a codec instance.

use crate::codec::{BeanCodec, MapCodec};
use crate::entity::Entity;
use crate::error::CodecResult;
use crate::registry::ErasedCodec;
use bean2map_model::PropertyResolver;
use std::collections::HashMap;
use std::sync::Arc;

type Factory = Box<dyn Fn(&PropertyResolver) -> CodecResult<ErasedCodec> + Send + Sync>;

#[derive(Default)]
pub struct CodecCatalog {
    factories: HashMap<String, Factory>,
}

impl CodecCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a factory under `identifier`, replacing any previous one
    pub fn add<F>(&mut self, identifier: impl Into<String>, factory: F) -> &mut Self
    where
        F: Fn(&PropertyResolver) -> CodecResult<ErasedCodec> + Send + Sync + 'static,
    {
        self.factories.insert(identifier.into(), Box::new(factory));
        self
    }

    /// Register a resolver-driven `BeanCodec<T>` under `identifier`
    pub fn add_entity<T: Entity>(&mut self, identifier: impl Into<String>) -> &mut Self {
        self.add(identifier, |resolver| {
            let codec: Arc<dyn MapCodec<T>> = Arc::new(BeanCodec::<T>::from_resolver(resolver)?);
            Ok(ErasedCodec::new(codec))
        })
    }

    pub fn contains(&self, identifier: &str) -> bool {
        self.factories.contains_key(identifier)
    }

    /// Instantiate a codec; `None` for an unknown identifier
    pub fn instantiate(
        &self,
        identifier: &str,
        resolver: &PropertyResolver,
    ) -> Option<CodecResult<ErasedCodec>> {
        self.factories
            .get(identifier)
            .map(|factory| factory(resolver))
    }

    /// Known identifiers, sorted
    pub fn identifiers(&self) -> Vec<&str> {
        let mut ids: Vec<_> = self.factories.keys().map(String::as_str).collect();
        ids.sort_unstable();
        ids
    }

    pub fn len(&self) -> usize {
        self.factories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.factories.is_empty()
    }
}
