//! Output formatting utilities

use miette::{IntoDiagnostic, Result};
use serde::Serialize;
use tabled::{settings::Style, Table, Tabled};

use crate::cli::OutputFormat;
use crate::core::Config;

/// Determine the effective output format from the flag and configuration
pub fn effective_format(format: Option<OutputFormat>, config: &Config) -> OutputFormat {
    let chosen = format
        .or_else(|| {
            config
                .default_format
                .as_deref()
                .and_then(|f| f.parse::<OutputFormat>().ok())
        })
        .unwrap_or_default();

    match chosen {
        OutputFormat::Auto => OutputFormat::Table,
        other => other,
    }
}

/// Render rows in the requested format
///
/// `T` serializes for json/yaml/csv/tsv and derives `Tabled` for tables.
pub fn render_rows<T>(rows: &[T], format: OutputFormat) -> Result<String>
where
    T: Serialize + Tabled,
{
    match format {
        OutputFormat::Json => serde_json::to_string_pretty(rows).into_diagnostic(),
        OutputFormat::Yaml => serde_yml::to_string(rows).into_diagnostic(),
        OutputFormat::Csv => delimited(rows, b','),
        OutputFormat::Tsv => delimited(rows, b'\t'),
        OutputFormat::Auto | OutputFormat::Table => {
            let mut table = Table::new(rows);
            table.with(Style::rounded());
            Ok(table.to_string())
        }
    }
}

/// Render a single serializable value; tables fall back to YAML
pub fn render_value<T: Serialize>(value: &T, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => serde_json::to_string_pretty(value).into_diagnostic(),
        _ => serde_yml::to_string(value).into_diagnostic(),
    }
}

fn delimited<T: Serialize>(rows: &[T], delimiter: u8) -> Result<String> {
    let mut writer = csv::WriterBuilder::new()
        .delimiter(delimiter)
        .from_writer(Vec::new());
    for row in rows {
        writer.serialize(row).into_diagnostic()?;
    }
    let bytes = writer.into_inner().into_diagnostic()?;
    String::from_utf8(bytes).into_diagnostic()
}
