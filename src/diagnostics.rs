//! Website diagnostics orchestration
//!
//! Validates the target once, then runs the selected probes strictly in
//! order, streaming each report to the sink as soon as it is ready.

use crate::{
    dns::{RecordSource, TrustDnsRecordSource},
    error::Result,
    logging::Logger,
    models::{DiagnosticRequest, ProbeReport, ResolvedTarget},
    output::ReportSink,
    probes,
    process::{CommandRunner, SystemCommandRunner},
    types::ProbeKind,
    validator::{self, HostResolver, SystemHostResolver},
};
use std::sync::Arc;
use std::time::Instant;

pub const START_BANNER: &str = "Website Diagnostic";
pub const END_BANNER: &str = "Diagnostic complete";

/// Runs website probes against one target
pub struct WebDiagnostics {
    resolver: Arc<dyn HostResolver>,
    runner: Arc<dyn CommandRunner>,
    records: Arc<dyn RecordSource>,
    logger: Logger,
}

impl WebDiagnostics {
    /// Orchestrator wired to the operating system
    pub fn new(logger: Logger) -> Self {
        Self::with_collaborators(
            Arc::new(SystemHostResolver),
            Arc::new(SystemCommandRunner),
            Arc::new(TrustDnsRecordSource::new()),
            logger,
        )
    }

    pub fn with_collaborators(
        resolver: Arc<dyn HostResolver>,
        runner: Arc<dyn CommandRunner>,
        records: Arc<dyn RecordSource>,
        logger: Logger,
    ) -> Self {
        Self {
            resolver,
            runner,
            records,
            logger,
        }
    }

    /// Validate the target and run every selected probe.
    ///
    /// Only validation errors are returned; probe failures end up in their
    /// reports and never stop the run.
    pub async fn run(&self, request: &DiagnosticRequest, sink: &mut dyn ReportSink) -> Result<()> {
        let target = match validator::validate(request.target(), self.resolver.as_ref()).await {
            Ok(target) => target,
            Err(e) => {
                self.logger
                    .debug("Target validation failed")
                    .field("target", request.target())
                    .error_info(&e)
                    .log()
                    .await;
                return Err(e);
            }
        };

        let checks = request.checks().effective(target.is_secure());
        self.logger
            .info("Starting website diagnostics")
            .field("url", target.normalized_url())
            .field("host", target.hostname())
            .field("probes", checks.iter().map(|kind| kind.flag()).collect::<Vec<_>>())
            .log()
            .await;

        let opened = sink.banner(START_BANNER, Some(target.normalized_url()));
        self.note_sink_failure("banner", opened).await;

        for kind in checks {
            let operation = format!("probe:{}", kind.flag());
            let correlation_id = self.logger.start_operation(&operation).await;
            let started = Instant::now();

            let report = self.run_probe(kind, &target, request).await;

            self.logger
                .debug("Probe finished")
                .correlation_id(&correlation_id)
                .probe(&report)
                .field("duration_ms", started.elapsed().as_millis() as u64)
                .log()
                .await;
            self.logger
                .end_operation(&correlation_id, &operation, report.status.is_success())
                .await;

            let written = sink.report(&report);
            self.note_sink_failure(kind.flag(), written).await;
        }

        let closed = sink.banner(END_BANNER, None);
        self.note_sink_failure("banner", closed).await;
        Ok(())
    }

    /// Output failures are logged; the remaining probes still run
    async fn note_sink_failure(&self, event: &str, result: Result<()>) {
        if let Err(e) = result {
            self.logger
                .warn("Could not write diagnostic output")
                .field("event", event)
                .error_info(&e)
                .log()
                .await;
        }
    }

    async fn run_probe(&self, kind: ProbeKind, target: &ResolvedTarget, request: &DiagnosticRequest) -> ProbeReport {
        let timeout = request.timeout();
        let host = target.hostname();
        let url = target.normalized_url();

        match kind {
            ProbeKind::Ping => probes::ping::run(self.runner.as_ref(), host, request.ping_count(), timeout).await,
            ProbeKind::Latency => probes::latency::run(url, request.latency_samples(), timeout).await,
            ProbeKind::Dns => probes::dns::run(self.records.as_ref(), host, timeout).await,
            ProbeKind::Http => probes::http::run(url, timeout).await,
            ProbeKind::Ssl => probes::ssl::run(host, timeout).await,
            ProbeKind::Whois => probes::whois::run(self.runner.as_ref(), host, timeout).await,
            ProbeKind::Traceroute => probes::traceroute::run(self.runner.as_ref(), host, timeout).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dns::MxRecord;
    use crate::error::AppError;
    use crate::models::CheckSelection;
    use crate::output::MemorySink;
    use crate::probes::testing::{PanickingRunner, ScriptedRunner};
    use crate::types::ProbeStatus;
    use async_trait::async_trait;
    use std::net::{IpAddr, Ipv4Addr};

    struct LocalResolver;

    #[async_trait]
    impl HostResolver for LocalResolver {
        async fn lookup_host(&self, _host: &str) -> std::io::Result<Vec<IpAddr>> {
            Ok(vec![IpAddr::V4(Ipv4Addr::LOCALHOST)])
        }
    }

    struct NoRecords;

    #[async_trait]
    impl RecordSource for NoRecords {
        async fn lookup_ip(&self, _host: &str) -> Result<Vec<IpAddr>> {
            Err(AppError::network("no records"))
        }
        async fn lookup_mx(&self, _host: &str) -> Result<Vec<MxRecord>> {
            Err(AppError::network("no records"))
        }
        async fn lookup_ns(&self, _host: &str) -> Result<Vec<String>> {
            Err(AppError::network("no records"))
        }
        async fn lookup_txt(&self, _host: &str) -> Result<Vec<String>> {
            Err(AppError::network("no records"))
        }
    }

    /// Sink whose writes always fail, as with a closed stdout
    #[derive(Default)]
    struct ClosedPipeSink {
        attempts: usize,
    }

    impl ReportSink for ClosedPipeSink {
        fn banner(&mut self, _title: &str, _subtitle: Option<&str>) -> Result<()> {
            self.attempts += 1;
            Err(AppError::io("Broken pipe"))
        }

        fn report(&mut self, _report: &ProbeReport) -> Result<()> {
            self.attempts += 1;
            Err(AppError::io("Broken pipe"))
        }
    }

    fn diagnostics(runner: Arc<dyn CommandRunner>) -> WebDiagnostics {
        WebDiagnostics::with_collaborators(
            Arc::new(LocalResolver),
            runner,
            Arc::new(NoRecords),
            Logger::silent("TEST"),
        )
    }

    #[tokio::test]
    async fn test_failures_do_not_stop_later_probes() {
        let mut checks = CheckSelection::default();
        checks.set(ProbeKind::Dns, true);
        checks.set(ProbeKind::Whois, true);
        let request = DiagnosticRequest::new("localhost", checks);

        let runner = Arc::new(ScriptedRunner::failing(AppError::missing_binary("whois")));
        let mut sink = MemorySink::new();
        diagnostics(runner).run(&request, &mut sink).await.unwrap();

        let reports = sink.reports();
        assert_eq!(reports.len(), 2);
        assert_eq!(reports[0].kind, ProbeKind::Dns);
        assert_eq!(reports[0].status, ProbeStatus::Failed);
        assert_eq!(reports[1].kind, ProbeKind::Whois);
        assert_eq!(reports[1].status, ProbeStatus::Failed);
        assert_eq!(sink.banners(), vec![START_BANNER, END_BANNER]);
    }

    #[tokio::test]
    async fn test_output_failure_does_not_stop_the_run() {
        let mut checks = CheckSelection::default();
        checks.set(ProbeKind::Dns, true);
        checks.set(ProbeKind::Whois, true);
        let request = DiagnosticRequest::new("localhost", checks);

        let runner = Arc::new(ScriptedRunner::succeeding("Domain Name: LOCALHOST\n"));
        let mut sink = ClosedPipeSink::default();
        diagnostics(runner.clone()).run(&request, &mut sink).await.unwrap();

        // whois still ran after the DNS report failed to write
        assert_eq!(runner.calls().len(), 1);
        assert_eq!(runner.calls()[0].program, "whois");
        assert_eq!(sink.attempts, 4);
    }

    #[tokio::test]
    async fn test_banner_carries_normalized_url() {
        let request = DiagnosticRequest::new("localhost", CheckSelection::only(ProbeKind::Traceroute));
        let runner = Arc::new(PanickingRunner { installed: false });
        let mut sink = MemorySink::new();
        diagnostics(runner).run(&request, &mut sink).await.unwrap();

        match &sink.events[0] {
            crate::output::SinkEvent::Banner { title, subtitle } => {
                assert_eq!(title, START_BANNER);
                assert_eq!(subtitle.as_deref(), Some("http://localhost/"));
            }
            other => panic!("expected banner, got {:?}", other),
        }
        assert_eq!(sink.reports().len(), 1);
    }

    #[tokio::test]
    async fn test_invalid_target_emits_nothing() {
        let request = DiagnosticRequest::new("", CheckSelection::full());
        let runner = Arc::new(PanickingRunner { installed: true });
        let mut sink = MemorySink::new();

        let err = diagnostics(runner).run(&request, &mut sink).await.unwrap_err();
        assert!(matches!(err, AppError::InvalidInput(_)));
        assert!(sink.events.is_empty());
    }

    #[tokio::test]
    async fn test_ping_uses_request_count_and_timeout() {
        let request = DiagnosticRequest::new("localhost", CheckSelection::only(ProbeKind::Ping))
            .with_ping_count(2)
            .with_timeout_secs(7);
        let runner = Arc::new(ScriptedRunner::succeeding(
            "2 packets transmitted, 2 received, 0% packet loss",
        ));
        let mut sink = MemorySink::new();
        diagnostics(runner.clone()).run(&request, &mut sink).await.unwrap();

        let calls = runner.calls();
        assert_eq!(calls.len(), 1);
        assert!(calls[0].args.contains(&"2".to_string()));
        assert_eq!(calls[0].timeout, std::time::Duration::from_secs(7));
        assert_eq!(sink.reports()[0].text_lines().len(), 1);
    }
}
