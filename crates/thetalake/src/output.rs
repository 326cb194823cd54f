//! Output formatting: JSON, YAML, table.
//!
//! Renders records in the format selected by `--output`. Structured formats
//! go straight through serde; tables are built from the JSON form so every
//! record type renders without a per-type row struct.

use std::io::{self, IsTerminal, Write};

use owo_colors::OwoColorize;
use serde::Serialize;
use serde_json::Value;
use tabled::{builder::Builder, settings::Style};

use thetalake_core::Warning;

use crate::cli::{ColorMode, OutputFormat};
use crate::error::CliError;

// ── Color helpers ────────────────────────────────────────────────────

/// Determine whether color output should be enabled on stderr.
pub fn should_color(mode: ColorMode) -> bool {
    match mode {
        ColorMode::Always => true,
        ColorMode::Never => false,
        ColorMode::Auto => io::stderr().is_terminal() && std::env::var_os("NO_COLOR").is_none(),
    }
}

// ── Render dispatcher ────────────────────────────────────────────────

/// Render any serializable record or list in the chosen format.
pub fn render<T: Serialize + ?Sized>(format: OutputFormat, data: &T) -> Result<String, CliError> {
    match format {
        OutputFormat::Json => serde_json::to_string_pretty(data).map_err(render_err),
        OutputFormat::JsonCompact => serde_json::to_string(data).map_err(render_err),
        OutputFormat::Yaml => serde_yaml::to_string(data).map_err(render_err),
        OutputFormat::Table => {
            let value = serde_json::to_value(data).map_err(render_err)?;
            Ok(render_table(&value))
        }
    }
}

/// Print the rendered output to stdout, respecting quiet mode.
pub fn print_output(output: &str, quiet: bool) {
    if quiet || output.is_empty() {
        return;
    }
    let mut stdout = io::stdout().lock();
    let _ = writeln!(stdout, "{output}");
}

/// Print operation warnings to stderr. Shown even in quiet mode.
pub fn print_warnings(warnings: &[Warning], color: ColorMode) {
    let color = should_color(color);
    let mut stderr = io::stderr().lock();
    for warning in warnings {
        if color {
            let _ = writeln!(stderr, "{} {warning}", "warning:".yellow().bold());
        } else {
            let _ = writeln!(stderr, "warning: {warning}");
        }
    }
}

fn render_err(e: impl std::fmt::Display) -> CliError {
    CliError::Render(e.to_string())
}

// ── Tables ───────────────────────────────────────────────────────────

fn render_table(value: &Value) -> String {
    match value {
        Value::Array(items) => list_table(items),
        Value::Object(map) => {
            let mut builder = Builder::default();
            builder.push_record(["Field", "Value"]);
            for (key, val) in map {
                builder.push_record([key.clone(), cell(val)]);
            }
            builder.build().with(Style::rounded()).to_string()
        }
        other => cell(other),
    }
}

/// One row per item; columns are the union of keys in first-seen order.
fn list_table(items: &[Value]) -> String {
    let mut columns: Vec<&str> = Vec::new();
    for key in items.iter().filter_map(Value::as_object).flat_map(|m| m.keys()) {
        if !columns.contains(&key.as_str()) {
            columns.push(key);
        }
    }

    if columns.is_empty() {
        return items.iter().map(cell).collect::<Vec<_>>().join("\n");
    }

    let mut builder = Builder::default();
    builder.push_record(columns.iter().map(|c| (*c).to_owned()));
    for item in items {
        builder.push_record(
            columns
                .iter()
                .map(|c| item.get(*c).map(cell).unwrap_or_default()),
        );
    }
    builder.build().with(Style::rounded()).to_string()
}

fn cell(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Array(items) if items.iter().all(Value::is_string) => items
            .iter()
            .filter_map(Value::as_str)
            .collect::<Vec<_>>()
            .join(", "),
        other => other.to_string(),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn json_compact_is_single_line() {
        let out = render(OutputFormat::JsonCompact, &json!({"id": "1", "name": "a"})).unwrap();
        assert_eq!(out, r#"{"id":"1","name":"a"}"#);
    }

    #[test]
    fn table_lists_union_of_columns() {
        let data = json!([
            {"id": "1", "name": "alpha"},
            {"id": "2", "status": "OPEN"},
        ]);
        let out = render(OutputFormat::Table, &data).unwrap();
        assert!(out.contains("name"));
        assert!(out.contains("status"));
        assert!(out.contains("alpha"));
        assert!(out.contains("OPEN"));
    }

    #[test]
    fn table_detail_joins_string_lists() {
        let data = json!({"participants": ["a@example.com", "b@example.com"]});
        let out = render(OutputFormat::Table, &data).unwrap();
        assert!(out.contains("a@example.com, b@example.com"));
    }

    #[test]
    fn yaml_renders_fields() {
        let out = render(OutputFormat::Yaml, &json!({"status": "CLOSED"})).unwrap();
        assert!(out.contains("status: CLOSED"));
    }
}
