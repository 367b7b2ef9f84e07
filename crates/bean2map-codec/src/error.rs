//! Codec errors

use bean2map_model::ResolutionError;
use bean2map_types::CoercionError;
use thiserror::Error;

/// Errors from building codecs and decoding maps
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodecError {
    #[error(transparent)]
    Resolution(#[from] ResolutionError),

    /// A map value could not be converted for a property; no entity is returned
    #[error("Cannot decode property '{property}': {source}")]
    Coercion {
        property: String,
        #[source]
        source: CoercionError,
    },

    #[error("Codec for '{resolved}' cannot serve entity type '{entity}'")]
    TypeMismatch { resolved: String, entity: String },

    /// The entity does not answer an accessor its resolved type lists
    #[error("Entity '{type_name}' does not implement accessor '{accessor}'")]
    MissingAccessor { type_name: String, accessor: String },

    #[error("Entity '{type_name}' rejected unknown accessor '{accessor}'")]
    UnknownAccessor { type_name: String, accessor: String },

    #[error("No converter registered for {0}")]
    ConverterNotFound(String),
}

impl CodecError {
    pub fn coercion(property: impl Into<String>, source: CoercionError) -> Self {
        Self::Coercion {
            property: property.into(),
            source,
        }
    }

    /// The coercion failure behind this error, if any
    pub fn coercion_error(&self) -> Option<&CoercionError> {
        match self {
            Self::Coercion { source, .. } => Some(source),
            _ => None,
        }
    }
}

pub type CodecResult<T> = Result<T, CodecError>;
