//! Output formatting and display system
//!
//! Probe reports are rendered by an `OutputFormatter` (plain or colored) and
//! delivered through a `ReportSink`. The console sink writes to stdout; log
//! lines never go there.

mod colored;
mod formatter;
mod sink;

pub use colored::{ColorScheme, ColoredFormatter};
pub use formatter::{FormattingOptions, OutputFormatter, PlainFormatter, RowData};
pub use sink::{ConsoleSink, MemorySink, ReportSink, SinkEvent};

/// Output formatting factory for creating appropriate formatters
pub struct OutputFormatterFactory;

impl OutputFormatterFactory {
    /// Create a formatter based on color support and preferences
    pub fn create_formatter(enable_color: bool) -> Box<dyn OutputFormatter> {
        let options = FormattingOptions {
            enable_color,
            ..Default::default()
        };

        if enable_color {
            Box::new(ColoredFormatter::new(options))
        } else {
            Box::new(PlainFormatter::new(options))
        }
    }

    /// Console sink on stdout using the matching formatter
    pub fn create_console_sink(enable_color: bool) -> ConsoleSink {
        ConsoleSink::new(Self::create_formatter(enable_color))
    }
}
