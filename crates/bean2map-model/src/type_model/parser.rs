//! JSON parsing for type models
//!
//! ```json
//! {
//!   "name": "example",
//!   "types": [
//!     {"name": "Parent", "methods": [{"name": "getId", "returns": "String"}]},
//!     {"name": "Simple", "superclass": "Parent", "interfaces": ["Named"]}
//!   ]
//! }
//! ```

use super::{ModelError, TypeDef, TypeModel};
use serde::Deserialize;

#[derive(Deserialize)]
struct RawModel {
    #[serde(default)]
    name: String,
    #[serde(default)]
    types: Vec<TypeDef>,
}

/// Parse a JSON type model; duplicate type names are rejected
pub fn parse_json(json: &str) -> Result<TypeModel, ModelError> {
    let raw: RawModel =
        serde_json::from_str(json).map_err(|e| ModelError::ParseError(e.to_string()))?;

    let mut model = TypeModel::new(raw.name);
    for def in raw.types {
        model.add_type(def)?;
    }
    Ok(model)
}
