//! Colored formatter implementation with terminal color support
//!
//! Same layout as the plain formatter, painted with ANSI colors: cyan bold
//! table headers and section titles, gray borders, yellow warnings.

use super::formatter::{FormattingOptions, OutputFormatter, RowData, TableLayout};
use crate::error::{AppError, Result};
use colored::*;
use std::fmt::Write as _;

/// Color scheme configuration
#[derive(Debug, Clone)]
pub struct ColorScheme {
    pub header: Color,
    pub warning: Color,
    pub error: Color,
    pub border: Color,
}

impl Default for ColorScheme {
    fn default() -> Self {
        Self {
            header: Color::Cyan,
            warning: Color::Yellow,
            error: Color::Red,
            border: Color::BrightBlack,
        }
    }
}

/// Colored formatter implementation
pub struct ColoredFormatter {
    options: FormattingOptions,
    color_scheme: ColorScheme,
}

impl ColoredFormatter {
    /// Create a new colored formatter with options
    pub fn new(options: FormattingOptions) -> Self {
        Self {
            options,
            color_scheme: ColorScheme::default(),
        }
    }

    /// Apply color to text if colors are enabled
    fn colorize(&self, text: &str, color: Color) -> ColoredString {
        if self.options.enable_color {
            text.color(color)
        } else {
            text.normal()
        }
    }

    /// Apply bold formatting if colors are enabled
    fn bold(&self, text: &str) -> ColoredString {
        if self.options.enable_color {
            text.bold()
        } else {
            text.normal()
        }
    }

    /// Bold and colored if colors are enabled
    fn emphasize(&self, text: &str, color: Color) -> ColoredString {
        if self.options.enable_color {
            text.bold().color(color)
        } else {
            text.normal()
        }
    }

    /// Check if terminal supports colors
    pub fn supports_color() -> bool {
        if std::env::var("FORCE_COLOR").map(|v| !v.is_empty() && v != "0").unwrap_or(false) {
            return true;
        }
        std::env::var("NO_COLOR").is_err()
            && std::env::var("TERM").map(|term| term != "dumb").unwrap_or(true)
    }
}

impl OutputFormatter for ColoredFormatter {
    fn format_banner(&self, title: &str, subtitle: Option<&str>) -> Result<String> {
        let lines: Vec<&str> = std::iter::once(title)
            .chain(subtitle.filter(|s| !s.is_empty()))
            .collect();
        let width = lines.iter().map(|l| l.chars().count()).max().unwrap_or(0);
        let rule = "─".repeat(width + 2);
        let side = self.colorize("│", self.color_scheme.border);

        let mut output = String::new();
        writeln!(output, "{}", self.colorize(&format!("┌{}┐", rule), self.color_scheme.border))
            .map_err(|e| AppError::io(format!("Failed to format banner: {}", e)))?;
        for (idx, line) in lines.iter().enumerate() {
            let padding = " ".repeat(width - line.chars().count());
            let text = if idx == 0 { self.bold(line) } else { line.normal() };
            writeln!(output, "{} {}{} {}", side, text, padding, side)
                .map_err(|e| AppError::io(format!("Failed to format banner: {}", e)))?;
        }
        write!(output, "{}", self.colorize(&format!("└{}┘", rule), self.color_scheme.border))
            .map_err(|e| AppError::io(format!("Failed to format banner: {}", e)))?;

        Ok(output)
    }

    fn format_section_header(&self, title: &str) -> Result<String> {
        Ok(self.emphasize(title, self.color_scheme.header).to_string())
    }

    fn format_table(&self, headers: &[String], rows: &[RowData]) -> Result<String> {
        if headers.is_empty() && rows.is_empty() {
            return Ok(String::new());
        }
        let layout = TableLayout::new(headers, rows, &self.options);
        Ok(layout.render(
            |border| self.colorize(border, self.color_scheme.border).to_string(),
            |header| self.emphasize(header, self.color_scheme.header).to_string(),
        ))
    }

    fn format_warning(&self, warning: &str) -> Result<String> {
        Ok(self.colorize(warning, self.color_scheme.warning).to_string())
    }

    fn format_error(&self, error: &str) -> Result<String> {
        Ok(format!("{} {}", self.emphasize("ERROR:", self.color_scheme.error), error))
    }
}
