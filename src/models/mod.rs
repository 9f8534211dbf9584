//! Data models and structures for sysinformer

pub mod config;
pub mod report;
pub mod request;
pub mod target;

// Re-export main model types
pub use config::Config;
pub use report::{ProbeReport, ReportBlock};
pub use request::{CheckSelection, DiagnosticRequest};
pub use target::ResolvedTarget;
