//! bean2map codecs
//!
//! This crate provides:
//! - The `Entity` trait: accessor dispatch by name for typed records
//! - The `MapCodec` contract (`encode`, `decode`, `filter`) and `BeanCodec`,
//!   its implementation derived from a `ResolvedType`
//! - `CodecRegistry`: thread-safe type-to-codec lookup
//! - `CodecCatalog` and manifest bulk loading

pub mod catalog;
pub mod codec;
pub mod entity;
pub mod error;
pub mod manifest;
pub mod registry;

pub use catalog::CodecCatalog;
pub use codec::{BeanCodec, MapCodec, filter_map};
pub use entity::{Entity, WriteError};
pub use error::{CodecError, CodecResult};
pub use manifest::{LoadReport, ManifestSource, ManifestWarning, bulk_load, parse_manifest};
pub use registry::{CodecRegistry, ErasedCodec};
