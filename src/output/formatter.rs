//! Core formatting traits and implementations
//!
//! This module defines the `OutputFormatter` trait and provides
//! a plain text implementation with table formatting capabilities.

use crate::{
    error::{AppError, Result},
    models::{ProbeReport, ReportBlock},
};
use std::fmt::Write as _;

/// Main trait for output formatting
pub trait OutputFormatter: Send + Sync {
    /// Boxed panel with a bold title and optional subtitle
    fn format_banner(&self, title: &str, subtitle: Option<&str>) -> Result<String>;

    /// Heading printed above a probe's report
    fn format_section_header(&self, title: &str) -> Result<String>;

    /// Bordered table; cells may span several lines
    fn format_table(&self, headers: &[String], rows: &[RowData]) -> Result<String>;

    /// Probe-level warning
    fn format_warning(&self, warning: &str) -> Result<String>;

    /// Fatal error shown before exiting
    fn format_error(&self, error: &str) -> Result<String>;

    /// Whole probe report: section header followed by each block
    fn format_report(&self, report: &ProbeReport) -> Result<String> {
        let mut output = String::new();
        let header = self.format_section_header(report.title())?;
        writeln!(output, "\n{}", header)
            .map_err(|e| AppError::io(format!("Failed to format report: {}", e)))?;

        for block in &report.blocks {
            let rendered = match block {
                ReportBlock::Table { headers, rows } => self.format_table(headers, rows)?,
                ReportBlock::Line(text) | ReportBlock::Raw(text) => text.clone(),
                ReportBlock::Warning(text) => self.format_warning(text)?,
            };
            writeln!(output, "{}", rendered.trim_end_matches('\n'))
                .map_err(|e| AppError::io(format!("Failed to format report: {}", e)))?;
        }

        Ok(output)
    }
}

/// Configuration options for formatting
#[derive(Debug, Clone)]
pub struct FormattingOptions {
    /// Enable colored output
    pub enable_color: bool,
    /// Show table borders
    pub table_borders: bool,
    /// Widest a single table column may grow before its cells wrap
    pub max_column_width: usize,
}

impl Default for FormattingOptions {
    fn default() -> Self {
        Self {
            enable_color: true,
            table_borders: true,
            max_column_width: 100,
        }
    }
}

/// Row data for table formatting
pub type RowData = Vec<String>;

/// Column widths plus every cell split into the physical lines it occupies
#[derive(Debug, Clone)]
pub(crate) struct TableLayout {
    widths: Vec<usize>,
    header: Vec<Vec<String>>,
    rows: Vec<Vec<Vec<String>>>,
    borders: bool,
}

impl TableLayout {
    pub(crate) fn new(headers: &[String], rows: &[RowData], options: &FormattingOptions) -> Self {
        let columns = headers
            .len()
            .max(rows.iter().map(|row| row.len()).max().unwrap_or(0));
        let max = options.max_column_width.max(1);

        let mut widths = vec![0usize; columns];
        for cells in std::iter::once(headers).chain(rows.iter().map(|row| row.as_slice())) {
            for (idx, cell) in cells.iter().enumerate() {
                let longest = cell.split('\n').map(|line| line.chars().count()).max().unwrap_or(0);
                widths[idx] = widths[idx].max(longest.min(max));
            }
        }

        let split = |cells: &[String]| -> Vec<Vec<String>> {
            (0..columns)
                .map(|idx| wrap_cell(cells.get(idx).map(String::as_str).unwrap_or(""), widths[idx]))
                .collect()
        };

        Self {
            header: split(headers),
            rows: rows.iter().map(|row| split(row)).collect(),
            widths,
            borders: options.table_borders,
        }
    }

    /// Render with caller-supplied painting for borders and header text
    pub(crate) fn render<B, H>(&self, paint_border: B, paint_header: H) -> String
    where
        B: Fn(&str) -> String,
        H: Fn(&str) -> String,
    {
        let mut output = String::new();
        let rule = paint_border(&self.horizontal_border());

        if self.borders {
            output.push_str(&rule);
            output.push('\n');
        }
        self.push_row(&mut output, &self.header, &paint_border, &paint_header);
        if self.borders {
            output.push_str(&rule);
            output.push('\n');
        }
        for row in &self.rows {
            self.push_row(&mut output, row, &paint_border, &|text: &str| text.to_string());
        }
        if self.borders {
            output.push_str(&rule);
        }

        output
    }

    fn push_row<B, C>(&self, output: &mut String, cells: &[Vec<String>], paint_border: &B, paint_cell: &C)
    where
        B: Fn(&str) -> String,
        C: Fn(&str) -> String,
    {
        let height = cells.iter().map(Vec::len).max().unwrap_or(1);
        let separator = if self.borders { paint_border("|") } else { String::new() };

        for line_idx in 0..height {
            let mut line = String::new();
            line.push_str(&separator);
            for (cell, &width) in cells.iter().zip(self.widths.iter()) {
                let text = cell.get(line_idx).map(String::as_str).unwrap_or("");
                let padded = pad_right(text, width);
                if self.borders {
                    line.push(' ');
                    line.push_str(&paint_cell(&padded));
                    line.push(' ');
                    line.push_str(&separator);
                } else {
                    line.push_str(&paint_cell(&padded));
                    line.push_str("  ");
                }
            }
            output.push_str(line.trim_end());
            output.push('\n');
        }
    }

    fn horizontal_border(&self) -> String {
        let mut border = String::new();
        if !self.widths.is_empty() {
            border.push('+');
            for &width in &self.widths {
                border.push_str(&"-".repeat(width + 2));
                border.push('+');
            }
        }
        border
    }
}

/// Split a cell on newlines, then hard-wrap anything wider than `width`
fn wrap_cell(cell: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    for line in cell.split('\n') {
        let chars: Vec<char> = line.chars().collect();
        if chars.is_empty() || width == 0 {
            lines.push(line.to_string());
            continue;
        }
        for chunk in chars.chunks(width) {
            lines.push(chunk.iter().collect());
        }
    }
    lines
}

fn pad_right(text: &str, width: usize) -> String {
    let len = text.chars().count();
    if len >= width {
        text.to_string()
    } else {
        format!("{}{}", text, " ".repeat(width - len))
    }
}

/// Plain text formatter implementation
pub struct PlainFormatter {
    options: FormattingOptions,
}

impl PlainFormatter {
    /// Create a new plain formatter with options
    pub fn new(options: FormattingOptions) -> Self {
        Self { options }
    }
}

impl OutputFormatter for PlainFormatter {
    fn format_banner(&self, title: &str, subtitle: Option<&str>) -> Result<String> {
        let lines: Vec<&str> = std::iter::once(title)
            .chain(subtitle.filter(|s| !s.is_empty()))
            .collect();
        let width = lines.iter().map(|l| l.chars().count()).max().unwrap_or(0);
        let border = format!("+{}+", "-".repeat(width + 2));

        let mut output = String::new();
        writeln!(output, "{}", border)
            .map_err(|e| AppError::io(format!("Failed to format banner: {}", e)))?;
        for line in lines {
            writeln!(output, "| {} |", pad_right(line, width))
                .map_err(|e| AppError::io(format!("Failed to format banner: {}", e)))?;
        }
        write!(output, "{}", border)
            .map_err(|e| AppError::io(format!("Failed to format banner: {}", e)))?;

        Ok(output)
    }

    fn format_section_header(&self, title: &str) -> Result<String> {
        Ok(title.to_string())
    }

    fn format_table(&self, headers: &[String], rows: &[RowData]) -> Result<String> {
        if headers.is_empty() && rows.is_empty() {
            return Ok(String::new());
        }
        let layout = TableLayout::new(headers, rows, &self.options);
        Ok(layout.render(|s| s.to_string(), |s| s.to_string()))
    }

    fn format_warning(&self, warning: &str) -> Result<String> {
        Ok(warning.to_string())
    }

    fn format_error(&self, error: &str) -> Result<String> {
        Ok(format!("ERROR: {}", error))
    }
}
