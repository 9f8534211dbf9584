//! Destinations for banners and probe reports

use super::formatter::OutputFormatter;
use crate::error::{AppError, Result};
use crate::models::ProbeReport;
use std::io::Write;

/// Receives banners and probe reports as a diagnostic run progresses
pub trait ReportSink: Send {
    fn banner(&mut self, title: &str, subtitle: Option<&str>) -> Result<()>;

    fn report(&mut self, report: &ProbeReport) -> Result<()>;
}

/// Renders through a formatter and writes to a stream (stdout by default)
pub struct ConsoleSink {
    formatter: Box<dyn OutputFormatter>,
    writer: Box<dyn Write + Send>,
}

impl ConsoleSink {
    pub fn new(formatter: Box<dyn OutputFormatter>) -> Self {
        Self::with_writer(formatter, Box::new(std::io::stdout()))
    }

    pub fn with_writer(formatter: Box<dyn OutputFormatter>, writer: Box<dyn Write + Send>) -> Self {
        Self { formatter, writer }
    }

    fn emit(&mut self, text: &str) -> Result<()> {
        writeln!(self.writer, "{}", text.trim_end_matches('\n'))
            .and_then(|_| self.writer.flush())
            .map_err(|e| AppError::io(format!("Failed to write output: {}", e)))
    }
}

impl ReportSink for ConsoleSink {
    fn banner(&mut self, title: &str, subtitle: Option<&str>) -> Result<()> {
        let rendered = self.formatter.format_banner(title, subtitle)?;
        self.emit(&rendered)
    }

    fn report(&mut self, report: &ProbeReport) -> Result<()> {
        let rendered = self.formatter.format_report(report)?;
        self.emit(&rendered)
    }
}

/// One event captured by [`MemorySink`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SinkEvent {
    Banner { title: String, subtitle: Option<String> },
    Report(ProbeReport),
}

/// Keeps everything in memory, for embedding and tests
#[derive(Debug, Default)]
pub struct MemorySink {
    pub events: Vec<SinkEvent>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reports(&self) -> Vec<&ProbeReport> {
        self.events
            .iter()
            .filter_map(|event| match event {
                SinkEvent::Report(report) => Some(report),
                SinkEvent::Banner { .. } => None,
            })
            .collect()
    }

    pub fn banners(&self) -> Vec<&str> {
        self.events
            .iter()
            .filter_map(|event| match event {
                SinkEvent::Banner { title, .. } => Some(title.as_str()),
                SinkEvent::Report(_) => None,
            })
            .collect()
    }
}

impl ReportSink for MemorySink {
    fn banner(&mut self, title: &str, subtitle: Option<&str>) -> Result<()> {
        self.events.push(SinkEvent::Banner {
            title: title.to_string(),
            subtitle: subtitle.map(str::to_string),
        });
        Ok(())
    }

    fn report(&mut self, report: &ProbeReport) -> Result<()> {
        self.events.push(SinkEvent::Report(report.clone()));
        Ok(())
    }
}
