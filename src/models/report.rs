//! Probe reports handed to the reporting sink

use crate::types::{ProbeKind, ProbeStatus};

/// One renderable piece of a probe report
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportBlock {
    /// Column headers plus rows; cells may contain newlines
    Table {
        headers: Vec<String>,
        rows: Vec<Vec<String>>,
    },
    /// Informational line
    Line(String),
    /// Probe-level failure or degraded result
    Warning(String),
    /// External tool output printed verbatim
    Raw(String),
}

/// Everything one probe wants printed, plus its outcome tag
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeReport {
    pub kind: ProbeKind,
    /// Section heading, the probe's own title unless overridden
    pub title: &'static str,
    pub status: ProbeStatus,
    pub blocks: Vec<ReportBlock>,
}

impl ProbeReport {
    /// Start an empty, successful report
    pub fn new(kind: ProbeKind) -> Self {
        Self {
            kind,
            title: kind.title(),
            status: ProbeStatus::Succeeded,
            blocks: Vec::new(),
        }
    }

    /// A report holding a single warning, tagged as failed
    pub fn failed<S: Into<String>>(kind: ProbeKind, message: S) -> Self {
        let mut report = Self::new(kind);
        report.warn(message);
        report
    }

    /// Start an empty report under a custom heading
    pub fn titled(kind: ProbeKind, title: &'static str) -> Self {
        Self {
            title,
            ..Self::new(kind)
        }
    }

    pub fn title(&self) -> &'static str {
        self.title
    }

    pub fn table<H, S>(&mut self, headers: &[H], rows: Vec<Vec<S>>)
    where
        H: AsRef<str>,
        S: Into<String>,
    {
        self.blocks.push(ReportBlock::Table {
            headers: headers.iter().map(|h| h.as_ref().to_string()).collect(),
            rows: rows
                .into_iter()
                .map(|row| row.into_iter().map(Into::into).collect())
                .collect(),
        });
    }

    pub fn line<S: Into<String>>(&mut self, text: S) {
        self.blocks.push(ReportBlock::Line(text.into()));
    }

    /// Add a warning and mark the probe as failed
    pub fn warn<S: Into<String>>(&mut self, text: S) {
        self.status = ProbeStatus::Failed;
        self.blocks.push(ReportBlock::Warning(text.into()));
    }

    pub fn raw<S: Into<String>>(&mut self, text: S) {
        self.blocks.push(ReportBlock::Raw(text.into()));
    }

    /// Rows of every table in the report, flattened
    pub fn table_rows(&self) -> Vec<&Vec<String>> {
        self.blocks
            .iter()
            .filter_map(|block| match block {
                ReportBlock::Table { rows, .. } => Some(rows),
                _ => None,
            })
            .flatten()
            .collect()
    }

    /// Plain-text lines of the report, for logs and tests
    pub fn text_lines(&self) -> Vec<&str> {
        self.blocks
            .iter()
            .filter_map(|block| match block {
                ReportBlock::Line(text) | ReportBlock::Warning(text) | ReportBlock::Raw(text) => {
                    Some(text.as_str())
                }
                ReportBlock::Table { .. } => None,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_warning_marks_failure() {
        let mut report = ProbeReport::new(ProbeKind::Dns);
        assert!(report.status.is_success());

        report.line("resolving");
        report.warn("DNS lookup failed: timeout");

        assert_eq!(report.status, ProbeStatus::Failed);
        assert_eq!(report.text_lines(), vec!["resolving", "DNS lookup failed: timeout"]);
    }

    #[test]
    fn test_table_rows_flatten_across_tables() {
        let mut report = ProbeReport::new(ProbeKind::Dns);
        report.table(&["Record", "Value"], vec![vec!["A", "93.184.216.34"]]);
        report.table(&["Record", "Value"], vec![vec!["NS", "a.iana-servers.net"]]);

        let rows = report.table_rows();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1][0], "NS");
    }

    #[test]
    fn test_failed_constructor() {
        let report = ProbeReport::failed(ProbeKind::Ping, "Ping failed: missing binary");
        assert_eq!(report.title(), "PING");
        assert!(!report.status.is_success());
    }

    #[test]
    fn test_custom_title() {
        let report = ProbeReport::titled(ProbeKind::Latency, "Latency Information");
        assert_eq!(report.title(), "Latency Information");
        assert_eq!(ProbeReport::new(ProbeKind::Latency).title(), "LATENCY");
    }
}
