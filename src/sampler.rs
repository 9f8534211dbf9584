//! Host latency sampler
//!
//! Quick connection health check against a handful of well-known hosts.
//! Each host gets its own task (bounded by a semaphore) that times an HTTPS
//! GET, falling back to a single ping; results are fanned in over a channel.

use crate::{
    client::build_client,
    defaults::SAMPLER_CONCURRENCY,
    models::ProbeReport,
    process::CommandRunner,
    types::{Platform, ProbeKind},
};
use futures::future::join_all;
use std::collections::HashSet;
use regex::Regex;
use std::sync::{Arc, LazyLock};
use std::time::Duration;
use tokio::sync::{mpsc, Semaphore};
use tokio::time::{timeout_at, Instant};

static PING_TIME: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"time[=<]\s*(\d+(?:\.\d+)?)\s*ms").ok());

pub const REPORT_TITLE: &str = "Latency Information";
pub const HEADERS: [&str; 2] = ["Host", "Latency (ms)"];

/// Result for one host
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SampleOutcome {
    /// Round trip in milliseconds
    Measured(f64),
    Timeout,
}

#[derive(Debug, Clone, PartialEq)]
pub struct HostSample {
    pub host: String,
    pub outcome: SampleOutcome,
}

impl HostSample {
    pub fn new<S: Into<String>>(host: S, outcome: SampleOutcome) -> Self {
        Self {
            host: host.into(),
            outcome,
        }
    }

    pub fn millis(&self) -> Option<f64> {
        match self.outcome {
            SampleOutcome::Measured(ms) => Some(ms),
            SampleOutcome::Timeout => None,
        }
    }
}

/// Arguments for a single ping with a two second wait
pub fn ping_args(platform: Platform, host: &str) -> Vec<String> {
    let args: [&str; 4] = if platform.is_windows() {
        ["-n", "1", "-w", "2000"]
    } else {
        ["-c", "1", "-W", "2"]
    };
    args.iter()
        .map(|arg| arg.to_string())
        .chain(std::iter::once(host.to_string()))
        .collect()
}

/// Round-trip time from the first `time=` (or Windows `time<`) token in ping output
pub fn parse_ping_time(output: &str) -> Option<f64> {
    let captures = PING_TIME.as_ref()?.captures(output)?;
    captures[1].parse::<f64>().ok()
}

async fn measure(
    host: &str,
    client: &reqwest::Client,
    runner: &dyn CommandRunner,
    timeout: Duration,
) -> SampleOutcome {
    // None when the timeout is too large to represent as an instant
    let deadline = Instant::now().checked_add(timeout);

    let started = std::time::Instant::now();
    let https = async {
        let response = client.get(format!("https://{}", host)).send().await?;
        response.bytes().await.map(|_| ())
    };
    let fetched = match deadline {
        Some(deadline) => timeout_at(deadline, https).await,
        None => tokio::time::timeout(timeout, https).await,
    };
    if let Ok(Ok(_)) = fetched {
        return SampleOutcome::Measured(started.elapsed().as_secs_f64() * 1000.0);
    }

    let remaining = match deadline {
        Some(deadline) => deadline.saturating_duration_since(Instant::now()),
        None => timeout,
    };
    if remaining.is_zero() {
        return SampleOutcome::Timeout;
    }
    match runner.run("ping", &ping_args(Platform::current(), host), remaining).await {
        Ok(output) => parse_ping_time(&output.combined())
            .map(SampleOutcome::Measured)
            .unwrap_or(SampleOutcome::Timeout),
        Err(_) => SampleOutcome::Timeout,
    }
}

/// Sample every host concurrently; the result has one entry per host
pub async fn sample_hosts(hosts: &[String], timeout: Duration, runner: Arc<dyn CommandRunner>) -> Vec<HostSample> {
    let client = match build_client(timeout) {
        Ok(client) => client,
        Err(_) => {
            return hosts
                .iter()
                .map(|host| HostSample::new(host.clone(), SampleOutcome::Timeout))
                .collect()
        }
    };

    let semaphore = Arc::new(Semaphore::new(SAMPLER_CONCURRENCY));
    let (sender, mut receiver) = mpsc::channel(hosts.len().max(1));

    let mut tasks = Vec::with_capacity(hosts.len());
    for host in hosts {
        let host = host.clone();
        let client = client.clone();
        let runner = runner.clone();
        let semaphore = semaphore.clone();
        let sender = sender.clone();

        tasks.push(tokio::spawn(async move {
            let outcome = match semaphore.acquire().await {
                Ok(_permit) => measure(&host, &client, runner.as_ref(), timeout).await,
                Err(_) => SampleOutcome::Timeout,
            };
            let _ = sender.send(HostSample::new(host, outcome)).await;
        }));
    }
    drop(sender);

    let mut samples = Vec::with_capacity(hosts.len());
    while let Some(sample) = receiver.recv().await {
        samples.push(sample);
    }
    let _ = join_all(tasks).await;

    // A task that panicked never reported; count its host as timed out.
    let seen: HashSet<String> = samples.iter().map(|s| s.host.clone()).collect();
    for host in hosts {
        if !seen.contains(host) {
            samples.push(HostSample::new(host.clone(), SampleOutcome::Timeout));
        }
    }

    samples
}

/// Mean over measured hosts
pub fn average_millis(samples: &[HostSample]) -> Option<f64> {
    let measured: Vec<f64> = samples.iter().filter_map(HostSample::millis).collect();
    if measured.is_empty() {
        None
    } else {
        Some(measured.iter().sum::<f64>() / measured.len() as f64)
    }
}

pub fn build_report(samples: &[HostSample]) -> ProbeReport {
    let mut report = ProbeReport::titled(ProbeKind::Latency, REPORT_TITLE);

    let mut measured: Vec<(&str, f64)> = samples
        .iter()
        .filter_map(|s| s.millis().map(|ms| (s.host.as_str(), ms)))
        .collect();
    measured.sort_by(|a, b| a.0.cmp(b.0));

    let Some(average) = average_millis(samples) else {
        report.warn("No latency information available (all hosts timed out)");
        return report;
    };

    let rows = measured
        .into_iter()
        .map(|(host, ms)| vec![host.to_string(), format!("{:.2} ms", ms)])
        .collect();
    report.table(&HEADERS, rows);
    report.line(format!("Average Round-Trip Delay: {:.2} ms", average));
    report
}

pub async fn run(hosts: &[String], timeout: Duration, runner: Arc<dyn CommandRunner>) -> ProbeReport {
    let samples = sample_hosts(hosts, timeout, runner).await;
    build_report(&samples)
}
