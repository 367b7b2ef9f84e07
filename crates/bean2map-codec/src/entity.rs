//! Entities: typed records exposing accessors by name
//!
//! An entity answers the getters and setters its `TypeModel` entry declares,
//! including inherited ones. Ancestor accessors are usually delegated to an
//! embedded parent struct:
//!
//! ```ignore
//! impl Entity for Simple {
//!     const TYPE_NAME: &'static str = "Simple";
//!
//!     fn read(&self, accessor: &str) -> Option<Value> {
//!         match accessor {
//!             "getName" => Some(self.name.clone().into()),
//!             _ => self.parent.read(accessor),
//!         }
//!     }
//!
//!     fn write(&mut self, accessor: &str, value: Value) -> Result<(), WriteError> {
//!         match accessor {
//!             "setName" => self.name = FromValue::from_value(value)?,
//!             _ => return self.parent.write(accessor, value),
//!         }
//!         Ok(())
//!     }
//! }
//! ```

use bean2map_types::{CoercionError, Value};
use thiserror::Error;

/// Setter failures
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WriteError {
    #[error("unknown accessor")]
    UnknownAccessor,

    #[error(transparent)]
    Mismatch(#[from] CoercionError),
}

/// A typed record convertible to and from a `ValueMap`
pub trait Entity: Default + Send + Sync + 'static {
    /// Name of this type in the `TypeModel`
    const TYPE_NAME: &'static str;

    /// Invoke a getter; `None` when no such accessor exists
    fn read(&self, accessor: &str) -> Option<Value>;

    /// Invoke a setter with an already narrowed value
    fn write(&mut self, accessor: &str, value: Value) -> Result<(), WriteError>;
}
