//! Typed entity to map conversion for Rust
//!
//! This crate ties the bean2map layers together:
//! - `types`: dynamic values, type tags, the coercion table and date formats
//! - `model`: the type model and override-aware property resolution
//! - `codec`: the `encode`/`decode`/`filter` contract, the codec registry and manifest loading
//!
//! # Example
//!
//! ```ignore
//! use bean2map::{BeanCodec, CodecRegistry, MapCodec, PropertyResolver, TypeModel};
//!
//! let resolver = PropertyResolver::new(TypeModel::from_file("model.json")?);
//! let registry = CodecRegistry::new();
//! registry.register::<Simple>(Arc::new(BeanCodec::from_resolver(&resolver)?));
//!
//! let map = registry.require::<Simple>()?.encode(&simple);
//! ```

// Re-export all public APIs from internal crates
pub use bean2map_codec as codec;
pub use bean2map_model as model;
pub use bean2map_types as types;

// Convenience re-exports
pub use bean2map_codec::{
    BeanCodec, CodecCatalog, CodecError, CodecRegistry, Entity, LoadReport, ManifestSource,
    MapCodec, WriteError,
};
pub use bean2map_model::{PropertyDescriptor, PropertyResolver, ResolvedType, TypeModel};
pub use bean2map_types::{FromValue, Value, ValueMap};

// CLI module (only available with cli feature)
#[cfg(feature = "cli")]
pub mod cli;
