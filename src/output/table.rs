//! Terminal table output
//!
//! Renders the result rows as a pipe-delimited table. The whole table is
//! re-rendered after every audited site so the latest state is always the
//! last thing on screen.

use crate::discovery::SiteCandidate;
use crate::output::stats::{format_summary, RunSummary};
use crate::output::traits::{OutputHandler, OutputResult, ResultRow, RESULT_COLUMNS};
use std::io::Write;

/// Longest cell rendered before truncation
const MAX_CELL_WIDTH: usize = 48;

/// Formats rows as a pipe-delimited table with a header separator
///
/// Cells are padded to the widest value in their column and truncated to a
/// fixed maximum; line breaks inside cells are flattened to spaces.
pub fn format_table(rows: &[ResultRow]) -> String {
    let cells: Vec<Vec<String>> = rows
        .iter()
        .map(|row| row.fields().iter().map(|f| clean_cell(f)).collect())
        .collect();

    let mut widths: Vec<usize> = RESULT_COLUMNS.iter().map(|h| h.chars().count()).collect();
    for row in &cells {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut table = String::new();
    push_line(&mut table, RESULT_COLUMNS.iter().copied(), &widths);

    table.push('|');
    for width in &widths {
        table.push_str(&"-".repeat(width + 2));
        table.push('|');
    }
    table.push('\n');

    for row in &cells {
        push_line(&mut table, row.iter().map(String::as_str), &widths);
    }

    table
}

fn push_line<'a>(out: &mut String, cells: impl Iterator<Item = &'a str>, widths: &[usize]) {
    out.push('|');
    for (cell, width) in cells.zip(widths) {
        let pad = width - cell.chars().count();
        out.push(' ');
        out.push_str(cell);
        out.push_str(&" ".repeat(pad + 1));
        out.push('|');
    }
    out.push('\n');
}

fn clean_cell(value: &str) -> String {
    let flat: String = value
        .chars()
        .map(|c| if c.is_control() { ' ' } else { c })
        .collect();

    if flat.chars().count() > MAX_CELL_WIDTH {
        let mut truncated: String = flat.chars().take(MAX_CELL_WIDTH - 3).collect();
        truncated.push_str("...");
        truncated
    } else {
        flat
    }
}

/// Output handler that writes progress and the result table to a terminal
pub struct TerminalOutput<W: Write> {
    out: W,
}

impl<W: Write> TerminalOutput<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    /// Consumes the handler and returns the underlying writer
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl TerminalOutput<std::io::Stdout> {
    /// Handler writing to standard output
    pub fn stdout() -> Self {
        Self::new(std::io::stdout())
    }
}

impl<W: Write> OutputHandler for TerminalOutput<W> {
    fn on_discovery(
        &mut self,
        query: &str,
        candidates: &[SiteCandidate],
        used_fallback: bool,
    ) -> OutputResult<()> {
        writeln!(self.out, "Searching for: {}...", query)?;
        if used_fallback {
            writeln!(
                self.out,
                "Search returned no results. This might be due to rate limiting or no results found. Using placeholder data for demonstration."
            )?;
        }
        writeln!(
            self.out,
            "Found {} websites. Starting audit...\n",
            candidates.len()
        )?;
        self.out.flush()?;
        Ok(())
    }

    fn on_progress(&mut self, index: usize, total: usize, url: &str) -> OutputResult<()> {
        writeln!(self.out, "Auditing ({}/{}): {}", index, total, url)?;
        self.out.flush()?;
        Ok(())
    }

    fn record_rows(&mut self, rows: &[ResultRow]) -> OutputResult<()> {
        write!(self.out, "\n{}\n", format_table(rows))?;
        self.out.flush()?;
        Ok(())
    }

    fn finalize(&mut self, summary: &RunSummary) -> OutputResult<()> {
        writeln!(self.out, "Audit Complete!\n")?;
        write!(self.out, "{}", format_summary(summary))?;
        self.out.flush()?;
        Ok(())
    }
}
