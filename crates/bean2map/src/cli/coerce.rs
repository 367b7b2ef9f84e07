//! Coerce command implementation

use super::output::{self, OutputFormat};
use anyhow::{Context, Result};
use bean2map_types::{CoercionTarget, TypeCoercer, Value};
use std::path::PathBuf;

/// Configuration for coerce command
pub struct CoerceConfig {
    pub target: String,
    /// JSON literal; anything that is not valid JSON is taken as a plain string
    pub value: String,
    pub output_format: Option<String>,
    pub output_file: Option<PathBuf>,
}

/// Parse a command-line value
pub fn parse_input(raw: &str) -> Value {
    serde_json::from_str::<serde_json::Value>(raw)
        .map(|json| Value::from_json(&json))
        .unwrap_or_else(|_| Value::string(raw))
}

/// Run one coercion and return its JSON report
pub fn coerce_value(target: &str, raw: &str) -> Result<serde_json::Value> {
    let Some(target) = CoercionTarget::parse(target) else {
        anyhow::bail!("Unknown coercion target: {}", target);
    };

    let input = parse_input(raw);
    let result = TypeCoercer::new()
        .coerce(&input, target)
        .with_context(|| format!("Cannot coerce {} to {}", raw, target))?;

    Ok(serde_json::json!({
        "target": target.name(),
        "input": input.to_json(),
        "inputKind": input.kind_name(),
        "result": result.as_ref().map_or(serde_json::Value::Null, Value::to_json),
        "resultKind": result.as_ref().map(Value::kind_name),
    }))
}

/// Coerce a single value and print the outcome
pub fn coerce(config: CoerceConfig) -> Result<()> {
    let report = coerce_value(&config.target, &config.value)?;
    let format = config
        .output_format
        .as_deref()
        .map(OutputFormat::from_name)
        .unwrap_or_default();
    output::print_output(&report, format, config.output_file.as_deref())
}
