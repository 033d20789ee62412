//! Output formatting: table, JSON, YAML, plain.
//!
//! Renders fetched JSON in the format selected by `--output`. Table
//! output builds its columns dynamically from the union of object keys
//! since payload shapes are only known at runtime.

use std::io::{self, Write};

use serde_json::Value;
use tabled::builder::Builder;
use tabled::settings::Style;

use crate::cli::OutputFormat;

/// Render a fetched JSON value in the chosen format.
pub fn render_value(format: &OutputFormat, data: &Value) -> String {
    match format {
        OutputFormat::Table => render_table(data),
        OutputFormat::Json => render_json_pretty(data),
        OutputFormat::JsonCompact => render_json_compact(data),
        OutputFormat::Yaml => render_yaml(data),
        OutputFormat::Plain => render_plain(data),
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

// ── Format-specific renderers ────────────────────────────────────────

fn render_json_pretty(data: &Value) -> String {
    serde_json::to_string_pretty(data).expect("serialization should not fail")
}

fn render_json_compact(data: &Value) -> String {
    serde_json::to_string(data).expect("serialization should not fail")
}

fn render_yaml(data: &Value) -> String {
    serde_yaml::to_string(data).expect("serialization should not fail")
}

/// One value per line: object `id`s where present, compact JSON otherwise.
fn render_plain(data: &Value) -> String {
    match data {
        Value::Array(items) => items
            .iter()
            .map(|item| match item.get("id") {
                Some(id) => cell_text(id),
                None => render_json_compact(item),
            })
            .collect::<Vec<_>>()
            .join("\n"),
        other => render_json_compact(other),
    }
}

/// Arrays of objects become a table with one column per key (union,
/// first-seen order). Anything else falls back to pretty JSON.
fn render_table(data: &Value) -> String {
    let Value::Array(items) = data else {
        return render_json_pretty(data);
    };
    if items.is_empty() {
        return String::new();
    }
    if !items.iter().all(Value::is_object) {
        return render_json_pretty(data);
    }

    let mut columns: Vec<String> = Vec::new();
    for item in items {
        if let Value::Object(map) = item {
            for key in map.keys() {
                if !columns.iter().any(|c| c == key) {
                    columns.push(key.clone());
                }
            }
        }
    }

    let mut builder = Builder::default();
    builder.push_record(columns.iter().cloned());
    for item in items {
        builder.push_record(
            columns
                .iter()
                .map(|col| item.get(col).map(cell_text).unwrap_or_default()),
        );
    }

    let mut table = builder.build();
    table.with(Style::rounded());
    table.to_string()
}

/// Strings render bare; everything else as compact JSON.
fn cell_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => render_json_compact(other),
    }
}
