//! Network path through the system `traceroute` (`tracert` on Windows)

use crate::defaults::TRACEROUTE_MIN_TIMEOUT;
use crate::error::AppError;
use crate::models::ProbeReport;
use crate::process::CommandRunner;
use crate::types::{Platform, ProbeKind};
use std::time::Duration;

pub fn command_name(platform: Platform) -> &'static str {
    if platform.is_windows() {
        "tracert"
    } else {
        "traceroute"
    }
}

/// What to tell the user when the binary is not installed
pub fn install_hint(platform: Platform) -> String {
    let program = command_name(platform);
    let how = match platform {
        Platform::MacOs => "Install it with 'brew install traceroute'",
        Platform::Linux => "Install it with your package manager (e.g. 'sudo apt install traceroute')",
        Platform::Windows => "It ships with Windows; check that System32 is on PATH",
        Platform::Other => "Install it",
    };
    format!("{} not found on PATH. {} or omit --trace.", program, how)
}

/// Traceroute gets at least `TRACEROUTE_MIN_TIMEOUT`
pub fn effective_timeout(timeout: Duration) -> Duration {
    timeout.max(TRACEROUTE_MIN_TIMEOUT)
}

pub async fn run(runner: &dyn CommandRunner, hostname: &str, timeout: Duration) -> ProbeReport {
    run_on(Platform::current(), runner, hostname, timeout).await
}

pub(crate) async fn run_on(
    platform: Platform,
    runner: &dyn CommandRunner,
    hostname: &str,
    timeout: Duration,
) -> ProbeReport {
    let program = command_name(platform);
    if runner.locate(program).is_none() {
        return ProbeReport::failed(ProbeKind::Traceroute, install_hint(platform));
    }

    let deadline = effective_timeout(timeout);
    match runner.run(program, &[hostname.to_string()], deadline).await {
        Ok(output) => {
            let text = output.combined();
            let text = text.trim();
            if text.is_empty() {
                ProbeReport::failed(ProbeKind::Traceroute, "No traceroute output")
            } else {
                let mut report = ProbeReport::new(ProbeKind::Traceroute);
                report.raw(text);
                report
            }
        }
        Err(AppError::Timeout(_)) => ProbeReport::failed(
            ProbeKind::Traceroute,
            format!("Traceroute timed out after {:?}", deadline),
        ),
        Err(e) => ProbeReport::failed(ProbeKind::Traceroute, format!("Traceroute failed: {}", e)),
    }
}
