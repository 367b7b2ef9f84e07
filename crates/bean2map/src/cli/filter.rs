//! Filter command implementation

use super::output::{self, OutputFormat};
use anyhow::{Context, Result};
use bean2map_codec::filter_map;
use bean2map_model::{PropertyResolver, TypeModel};
use bean2map_types::{map_from_json, map_to_json};
use log::info;
use std::fs;
use std::path::PathBuf;

/// Configuration for filter command
pub struct FilterConfig {
    pub model: PathBuf,
    pub type_name: String,
    /// JSON object to sanitize
    pub input: PathBuf,
    pub verbose: bool,
    pub output_format: Option<String>,
    pub output_file: Option<PathBuf>,
}

/// Reduce a JSON object to the entries a type recognizes
pub fn filter(config: FilterConfig) -> Result<()> {
    let model = TypeModel::from_file(&config.model)
        .with_context(|| format!("Failed to load type model: {}", config.model.display()))?;
    let resolver = PropertyResolver::new(model);
    let resolved = resolver
        .resolve(&config.type_name)
        .with_context(|| format!("Failed to resolve type {}", config.type_name))?;

    let text = fs::read_to_string(&config.input)
        .with_context(|| format!("Failed to read input: {}", config.input.display()))?;
    let json: serde_json::Value = serde_json::from_str(&text)
        .with_context(|| format!("Invalid JSON in {}", config.input.display()))?;
    let Some(input) = map_from_json(&json) else {
        anyhow::bail!("Input must be a JSON object: {}", config.input.display());
    };

    let filtered = filter_map(&resolved, &input);
    info!(
        "Kept {} of {} entries for {}",
        filtered.len(),
        input.len(),
        resolved.type_name()
    );

    if config.verbose {
        for key in input.keys().filter(|k| !filtered.contains_key(*k)) {
            eprintln!("{}", output::format_warning(&format!("dropped key '{}'", key)));
        }
    }

    let format = config
        .output_format
        .as_deref()
        .map(OutputFormat::from_name)
        .unwrap_or_default();
    output::print_output(&map_to_json(&filtered), format, config.output_file.as_deref())
}
