//! DNS records for the target hostname

use crate::dns::{trim_root, MxRecord, RecordSource};
use crate::error::{AppError, Result};
use crate::models::ProbeReport;
use crate::types::ProbeKind;
use std::future::Future;
use std::net::IpAddr;
use std::time::Duration;
use tokio::time::{timeout_at, Instant};

pub const HEADERS: [&str; 2] = ["Record", "Value"];

/// Address rows sorted by their string form, tagged by family
pub fn address_rows(mut ips: Vec<IpAddr>) -> Vec<Vec<String>> {
    ips.sort_by_key(|ip| ip.to_string());
    ips.into_iter()
        .map(|ip| {
            let kind = if ip.is_ipv4() { "A" } else { "AAAA" };
            vec![kind.to_string(), ip.to_string()]
        })
        .collect()
}

/// MX rows ordered by preference, `"<pref> <host>"`
pub fn mx_rows(mut records: Vec<MxRecord>) -> Vec<Vec<String>> {
    records.sort_by_key(|mx| mx.preference);
    records
        .into_iter()
        .map(|mx| {
            vec![
                "MX".to_string(),
                format!("{} {}", mx.preference, trim_root(&mx.exchange)),
            ]
        })
        .collect()
}

pub fn ns_rows(names: Vec<String>) -> Vec<Vec<String>> {
    names
        .into_iter()
        .map(|name| vec!["NS".to_string(), trim_root(&name).to_string()])
        .collect()
}

pub fn txt_rows(records: Vec<String>) -> Vec<Vec<String>> {
    records
        .into_iter()
        .map(|txt| vec!["TXT".to_string(), txt])
        .collect()
}

/// Run one lookup against the shared deadline. A deadline too far out to
/// represent falls back to a plain per-lookup timeout.
async fn bounded<T, F>(deadline: Option<Instant>, timeout: Duration, lookup: F) -> Result<T>
where
    F: Future<Output = Result<T>>,
{
    let outcome = match deadline {
        Some(deadline) => {
            if Instant::now() >= deadline {
                return Err(AppError::timeout("DNS lookup deadline exceeded"));
            }
            timeout_at(deadline, lookup).await
        }
        None => tokio::time::timeout(timeout, lookup).await,
    };
    match outcome {
        Ok(result) => result,
        Err(_) => Err(AppError::timeout("DNS lookup deadline exceeded")),
    }
}

/// Query A/AAAA, MX, NS and TXT under one shared deadline
pub async fn run(records: &dyn RecordSource, hostname: &str, timeout: Duration) -> ProbeReport {
    let deadline = Instant::now().checked_add(timeout);
    let mut report = ProbeReport::new(ProbeKind::Dns);

    match bounded(deadline, timeout, records.lookup_ip(hostname)).await {
        Ok(ips) => report.table(&HEADERS, address_rows(ips)),
        Err(e) => report.warn(format!("DNS lookup failed: {}", e)),
    }

    // The remaining record types are optional; failures and empty answers
    // leave their section out.
    if let Ok(mx) = bounded(deadline, timeout, records.lookup_mx(hostname)).await {
        push_section(&mut report, mx_rows(mx));
    }
    if let Ok(ns) = bounded(deadline, timeout, records.lookup_ns(hostname)).await {
        push_section(&mut report, ns_rows(ns));
    }
    if let Ok(txt) = bounded(deadline, timeout, records.lookup_txt(hostname)).await {
        push_section(&mut report, txt_rows(txt));
    }

    report
}

fn push_section(report: &mut ProbeReport, rows: Vec<Vec<String>>) {
    if !rows.is_empty() {
        report.table(&HEADERS, rows);
    }
}
