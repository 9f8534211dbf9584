//! End-to-end diagnostic runs through the public library API
//!
//! Network-facing probes hit a local wiremock server; name resolution,
//! DNS records and external commands go through in-test collaborators so
//! the runs are deterministic and offline.

use async_trait::async_trait;
use std::net::{IpAddr, Ipv4Addr};
use std::sync::Arc;
use std::time::Duration;
use sysinformer::{
    dns::{MxRecord, RecordSource},
    logging::Logger,
    output::{ConsoleSink, OutputFormatterFactory, SinkEvent},
    process::{CommandOutput, CommandRunner},
    validator::HostResolver,
    AppError, CheckSelection, DiagnosticRequest, MemorySink, ProbeKind, ProbeStatus, ReportBlock, Result,
    WebDiagnostics,
};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

struct Loopback;

#[async_trait]
impl HostResolver for Loopback {
    async fn lookup_host(&self, _host: &str) -> std::io::Result<Vec<IpAddr>> {
        Ok(vec![IpAddr::V4(Ipv4Addr::LOCALHOST)])
    }
}

struct Unresolvable;

#[async_trait]
impl HostResolver for Unresolvable {
    async fn lookup_host(&self, host: &str) -> std::io::Result<Vec<IpAddr>> {
        Err(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            format!("no addresses for {}", host),
        ))
    }
}

struct PanickingResolver;

#[async_trait]
impl HostResolver for PanickingResolver {
    async fn lookup_host(&self, host: &str) -> std::io::Result<Vec<IpAddr>> {
        panic!("resolver must not be called for {:?}", host);
    }
}

struct StaticRecords;

#[async_trait]
impl RecordSource for StaticRecords {
    async fn lookup_ip(&self, _host: &str) -> Result<Vec<IpAddr>> {
        Ok(vec![IpAddr::V4(Ipv4Addr::new(93, 184, 216, 34))])
    }
    async fn lookup_mx(&self, _host: &str) -> Result<Vec<MxRecord>> {
        Ok(Vec::new())
    }
    async fn lookup_ns(&self, _host: &str) -> Result<Vec<String>> {
        Ok(vec!["a.iana-servers.net".to_string()])
    }
    async fn lookup_txt(&self, _host: &str) -> Result<Vec<String>> {
        Err(AppError::network("TXT lookup refused"))
    }
}

/// Fails the test if any external command is started
struct NoCommands;

#[async_trait]
impl CommandRunner for NoCommands {
    fn locate(&self, _program: &str) -> Option<std::path::PathBuf> {
        None
    }

    async fn run(&self, program: &str, _args: &[String], _timeout: Duration) -> Result<CommandOutput> {
        panic!("unexpected command: {}", program);
    }
}

fn diagnostics(resolver: Arc<dyn HostResolver>) -> WebDiagnostics {
    WebDiagnostics::with_collaborators(
        resolver,
        Arc::new(NoCommands),
        Arc::new(StaticRecords),
        Logger::silent("E2E"),
    )
}

#[tokio::test]
async fn test_http_only_run_yields_one_sorted_report() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("x-zeta", "last")
                .insert_header("x-alpha", "first")
                .set_body_string("ok"),
        )
        .mount(&server)
        .await;

    let request = DiagnosticRequest::new(server.uri(), CheckSelection::only(ProbeKind::Http))
        .with_timeout_secs(5);
    let mut sink = MemorySink::new();
    diagnostics(Arc::new(Loopback)).run(&request, &mut sink).await.unwrap();

    let reports = sink.reports();
    assert_eq!(reports.len(), 1);
    let report = reports[0];
    assert_eq!(report.kind, ProbeKind::Http);
    assert_eq!(report.status, ProbeStatus::Succeeded);
    assert_eq!(report.text_lines(), vec!["Status: 200 OK"]);

    let names: Vec<&str> = report.table_rows().iter().map(|row| row[0].as_str()).collect();
    let mut sorted = names.clone();
    sorted.sort();
    assert_eq!(names, sorted);
    assert!(names.contains(&"X-Alpha"));
    assert!(names.contains(&"X-Zeta"));
}

#[tokio::test]
async fn test_dns_section_omits_missing_records() {
    let request = DiagnosticRequest::new("example.com", CheckSelection::only(ProbeKind::Dns));
    let mut sink = MemorySink::new();
    diagnostics(Arc::new(Loopback)).run(&request, &mut sink).await.unwrap();

    let reports = sink.reports();
    assert_eq!(reports.len(), 1);
    assert_eq!(reports[0].status, ProbeStatus::Succeeded);
    let kinds: Vec<&str> = reports[0].table_rows().iter().map(|row| row[0].as_str()).collect();
    assert!(kinds.contains(&"A"));
    assert!(kinds.contains(&"NS"));
    assert!(!kinds.contains(&"MX"));
    assert!(!kinds.contains(&"TXT"));
}

#[tokio::test]
async fn test_empty_target_is_rejected_before_any_probe() {
    let request = DiagnosticRequest::new("   ", CheckSelection::full());
    let mut sink = MemorySink::new();

    let err = diagnostics(Arc::new(PanickingResolver))
        .run(&request, &mut sink)
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::InvalidInput(_)));
    assert_eq!(err.exit_code(), 1);
    assert!(sink.events.is_empty());
}

#[tokio::test]
async fn test_unresolvable_target_is_a_resolution_error() {
    let request = DiagnosticRequest::new("no-such-host.invalid", CheckSelection::full());
    let mut sink = MemorySink::new();

    let err = diagnostics(Arc::new(Unresolvable))
        .run(&request, &mut sink)
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::Resolution { .. }));
    assert_eq!(err.exit_code(), 2);
    assert!(std::error::Error::source(&err).is_some());
    assert!(sink.events.is_empty());
}

#[tokio::test]
async fn test_latency_with_every_attempt_failing() {
    // Nothing listens on port 1
    let request = DiagnosticRequest::new("127.0.0.1:1", CheckSelection::only(ProbeKind::Latency))
        .with_timeout_secs(2);
    let mut sink = MemorySink::new();
    diagnostics(Arc::new(Loopback)).run(&request, &mut sink).await.unwrap();

    let reports = sink.reports();
    assert_eq!(reports.len(), 1);
    let report = reports[0];
    assert_eq!(report.status, ProbeStatus::Failed);
    assert_eq!(report.table_rows().len(), 3);
    assert!(report
        .blocks
        .iter()
        .any(|block| matches!(block, ReportBlock::Warning(text) if text.contains("all requests failed"))));
}

#[tokio::test]
async fn test_missing_traceroute_reports_install_hint() {
    let request = DiagnosticRequest::new("example.com", CheckSelection::only(ProbeKind::Traceroute));
    let mut sink = MemorySink::new();
    diagnostics(Arc::new(Loopback)).run(&request, &mut sink).await.unwrap();

    assert!(matches!(sink.events.first(), Some(SinkEvent::Banner { .. })));
    assert!(matches!(sink.events.last(), Some(SinkEvent::Banner { .. })));
    let reports = sink.reports();
    assert_eq!(reports.len(), 1);
    assert!(reports[0].text_lines()[0].contains("not found on PATH"));
}

#[tokio::test]
async fn test_console_sink_renders_plain_sections() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let buffer = SharedBuffer::default();
    let mut sink = ConsoleSink::with_writer(
        OutputFormatterFactory::create_formatter(false),
        Box::new(buffer.clone()),
    );
    let request = DiagnosticRequest::new(server.uri(), CheckSelection::only(ProbeKind::Http));
    diagnostics(Arc::new(Loopback)).run(&request, &mut sink).await.unwrap();

    let output = buffer.contents();
    assert!(output.contains("Website Diagnostic"));
    assert!(output.contains("HTTP STATUS & HEADERS"));
    assert!(output.contains("Status: 404 Not Found"));
    assert!(output.contains("Diagnostic complete"));
    assert!(!output.contains('\x1b'));
}

#[derive(Clone, Default)]
struct SharedBuffer(Arc<std::sync::Mutex<Vec<u8>>>);

impl SharedBuffer {
    fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

impl std::io::Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}
