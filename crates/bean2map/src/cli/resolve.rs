//! Resolve command implementation

use super::output::{self, OutputFormat};
use anyhow::{Context, Result};
use bean2map_model::{Accessor, PropertyResolver, ResolvedType, TypeModel};
use log::info;
use std::path::PathBuf;
use tabled::{Table, Tabled, settings::Style};

/// Configuration for resolve command
pub struct ResolveConfig {
    pub model: PathBuf,
    pub type_name: String,
    pub verbose: bool,
    pub output_format: Option<String>,
    pub output_file: Option<PathBuf>,
}

#[derive(Tabled)]
struct PropertyRow {
    #[tabled(rename = "Property")]
    name: String,
    #[tabled(rename = "Type")]
    value_type: String,
    #[tabled(rename = "Read")]
    read: String,
    #[tabled(rename = "Write")]
    write: String,
    #[tabled(rename = "Excluded")]
    excluded: bool,
    #[tabled(rename = "Date format")]
    date_format: String,
}

fn accessor_cell(accessor: Option<&Accessor>) -> String {
    accessor
        .map(|a| format!("{}.{}", a.declared_in, a.method))
        .unwrap_or_else(|| "-".to_string())
}

/// Render resolved properties as a table
pub fn format_properties(resolved: &ResolvedType) -> String {
    let rows: Vec<PropertyRow> = resolved
        .iter()
        .map(|p| PropertyRow {
            name: p.name.clone(),
            value_type: p.value_type.to_string(),
            read: accessor_cell(p.read.as_ref()),
            write: accessor_cell(p.write.as_ref()),
            excluded: p.excluded,
            date_format: match &p.date_format {
                Some(f) if f.as_epoch_millis => "epoch millis".to_string(),
                Some(f) => f.pattern.to_string(),
                None => "-".to_string(),
            },
        })
        .collect();

    Table::new(rows).with(Style::modern()).to_string()
}

/// Load a type model and print the resolved properties of one type
pub fn resolve(config: ResolveConfig) -> Result<()> {
    let model = TypeModel::from_file(&config.model)
        .with_context(|| format!("Failed to load type model: {}", config.model.display()))?;
    info!("Loaded {} types from {}", model.len(), config.model.display());

    let resolver = PropertyResolver::new(model);
    let resolved = resolver
        .resolve(&config.type_name)
        .with_context(|| format!("Failed to resolve type {}", config.type_name))?;

    if config.verbose {
        let excluded = resolved.iter().filter(|p| p.excluded).count();
        eprintln!(
            "{} properties resolved for {} ({} excluded)",
            resolved.len(),
            resolved.type_name(),
            excluded
        );
    }

    let format = config
        .output_format
        .as_deref()
        .map(OutputFormat::from_name)
        .unwrap_or_default();

    if format == OutputFormat::Table {
        return output::write_output(&format_properties(&resolved), config.output_file.as_deref());
    }

    let value = serde_json::to_value(&*resolved).context("Failed to serialize resolved type")?;
    output::print_output(&value, format, config.output_file.as_deref())
}
