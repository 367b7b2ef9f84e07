//! Output formatting utilities

use anyhow::{Context, Result};
use colored::Colorize;
use serde_json::Value;
use std::fs::File;
use std::io::{IsTerminal, Write};
use std::path::Path;

#[cfg(feature = "cli")]
use tabled::{Table, Tabled, settings::Style};

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    Json,
    #[default]
    JsonPretty,
    Table,
}

impl OutputFormat {
    /// Parse a format name; unknown names fall back to pretty JSON
    pub fn from_name(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "json" => Self::Json,
            "pretty" | "json-pretty" => Self::JsonPretty,
            "table" => Self::Table,
            _ => Self::JsonPretty,
        }
    }
}

/// Set up color output based on user preference
pub fn setup_colors(mode: &str) {
    match mode.to_lowercase().as_str() {
        "always" => colored::control::set_override(true),
        "never" => colored::control::set_override(false),
        _ => colored::control::set_override(std::io::stdout().is_terminal()),
    }
}

/// Format an error for display
pub fn format_error(error: &anyhow::Error) -> String {
    format!("{} {:#}", "Error:".red().bold(), error)
}

/// Format a warning for display
pub fn format_warning(warning: &str) -> String {
    format!("{} {}", "Warning:".yellow().bold(), warning)
}

/// Format a success message for display
pub fn format_success(message: &str) -> String {
    format!("{} {}", "Success:".green().bold(), message)
}

/// Write output to a file or stdout
pub fn write_output(content: &str, output_file: Option<&Path>) -> Result<()> {
    if let Some(path) = output_file {
        let mut file = File::create(path)
            .with_context(|| format!("Failed to create output file: {}", path.display()))?;
        file.write_all(content.as_bytes())
            .with_context(|| format!("Failed to write to output file: {}", path.display()))?;
        eprintln!(
            "{}",
            format_success(&format!("Output written to {}", path.display()))
        );
    } else {
        println!("{}", content);
    }
    Ok(())
}

/// Format JSON value for output
pub fn format_json(value: &Value, pretty: bool) -> Result<String> {
    if pretty {
        serde_json::to_string_pretty(value).context("Failed to serialize JSON")
    } else {
        serde_json::to_string(value).context("Failed to serialize JSON")
    }
}

/// Format a JSON object as a key/value table
#[cfg(feature = "cli")]
pub fn format_as_table(value: &Value) -> Option<String> {
    let Value::Object(obj) = value else {
        return None;
    };

    #[derive(Tabled)]
    struct KeyValue {
        #[tabled(rename = "Key")]
        key: String,
        #[tabled(rename = "Value")]
        value: String,
    }

    let rows: Vec<KeyValue> = obj
        .iter()
        .map(|(k, v)| KeyValue {
            key: k.clone(),
            value: format_value(v),
        })
        .collect();

    Some(Table::new(rows).with(Style::modern()).to_string())
}

/// Format a simple value for display
pub fn format_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => "null".to_string(),
        Value::Array(_) | Value::Object(_) => value.to_string(),
    }
}

/// Print output in the specified format
pub fn print_output(value: &Value, format: OutputFormat, output_file: Option<&Path>) -> Result<()> {
    let content = match format {
        OutputFormat::Json => format_json(value, false)?,
        OutputFormat::JsonPretty => format_json(value, true)?,
        #[cfg(feature = "cli")]
        OutputFormat::Table => match format_as_table(value) {
            Some(table) => table,
            None => format_json(value, true)?,
        },
        #[cfg(not(feature = "cli"))]
        OutputFormat::Table => format_json(value, true)?,
    };

    write_output(&content, output_file)
}
