//! Output module for presenting and exporting audit results
//!
//! This module handles:
//! - The result row shared by every output
//! - Incremental terminal table rendering
//! - CSV export
//! - Run statistics

mod csv;
pub mod stats;
mod table;
mod traits;

pub use csv::{export_csv, to_csv_string, write_csv, CSV_FILE_NAME, CSV_MIME};
pub use stats::{format_summary, RunSummary};
pub use table::{format_table, TerminalOutput};
pub use traits::{OutputError, OutputHandler, OutputResult, ResultRow, RESULT_COLUMNS};
