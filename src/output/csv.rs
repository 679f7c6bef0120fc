//! CSV export of result rows
//!
//! Minimal RFC 4180 quoting: a field is quoted only when it contains a comma,
//! a double quote or a line break, and embedded quotes are doubled.

use crate::output::traits::{OutputError, OutputResult, ResultRow, RESULT_COLUMNS};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Default export file name
pub const CSV_FILE_NAME: &str = "audit_results.csv";

/// MIME type of the export
pub const CSV_MIME: &str = "text/csv";

/// Writes rows as CSV (header first) to any writer
pub fn write_csv<W: Write>(rows: &[ResultRow], mut writer: W) -> OutputResult<()> {
    write_record(&mut writer, RESULT_COLUMNS)?;
    for row in rows {
        write_record(&mut writer, row.fields())?;
    }
    writer.flush()?;
    Ok(())
}

/// Renders rows as a UTF-8 CSV document
pub fn to_csv_string(rows: &[ResultRow]) -> OutputResult<String> {
    let mut buffer = Vec::new();
    write_csv(rows, &mut buffer)?;
    String::from_utf8(buffer).map_err(|e| OutputError::Format(e.to_string()))
}

/// Writes rows to a CSV file, creating parent directories as needed
pub fn export_csv(rows: &[ResultRow], path: &Path) -> OutputResult<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let file = File::create(path)?;
    write_csv(rows, BufWriter::new(file))?;

    tracing::info!("Exported {} rows to {}", rows.len(), path.display());
    Ok(())
}

fn write_record<W: Write>(writer: &mut W, fields: [&str; 7]) -> OutputResult<()> {
    let line = fields
        .iter()
        .map(|field| escape_field(field))
        .collect::<Vec<_>>()
        .join(",");
    writeln!(writer, "{}", line)?;
    Ok(())
}

fn escape_field(field: &str) -> String {
    if field.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}
