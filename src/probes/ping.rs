//! ICMP reachability through the system `ping`

use crate::models::ProbeReport;
use crate::process::CommandRunner;
use crate::types::{Platform, ProbeKind};
use std::time::Duration;

/// Substrings that mark a summary line across ping flavours
const SUMMARY_MARKERS: [&str; 4] = ["packets transmitted", "Packets:", "packet loss", "loss"];

/// Arguments for `ping` sending `count` echo requests
pub fn ping_args(platform: Platform, hostname: &str, count: u32) -> Vec<String> {
    let count_flag = if platform.is_windows() { "-n" } else { "-c" };
    vec![count_flag.to_string(), count.to_string(), hostname.to_string()]
}

/// Trimmed, non-empty lines that look like a ping summary
pub fn summarize(output: &str) -> Vec<String> {
    output
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .filter(|line| SUMMARY_MARKERS.iter().any(|marker| line.contains(marker)))
        .map(str::to_string)
        .collect()
}

pub async fn run(runner: &dyn CommandRunner, hostname: &str, count: u32, timeout: Duration) -> ProbeReport {
    run_on(Platform::current(), runner, hostname, count, timeout).await
}

pub(crate) async fn run_on(
    platform: Platform,
    runner: &dyn CommandRunner,
    hostname: &str,
    count: u32,
    timeout: Duration,
) -> ProbeReport {
    let args = ping_args(platform, hostname, count);
    match runner.run("ping", &args, timeout).await {
        Ok(output) => {
            let mut report = ProbeReport::new(ProbeKind::Ping);
            for line in summarize(&output.combined()) {
                report.line(line);
            }
            report
        }
        Err(e) => ProbeReport::failed(ProbeKind::Ping, format!("Ping failed: {}", e)),
    }
}
