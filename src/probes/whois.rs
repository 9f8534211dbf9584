//! Registration data through the system `whois`

use crate::defaults::WHOIS_MAX_ROWS;
use crate::models::ProbeReport;
use crate::probes::FIELD_VALUE_HEADERS;
use crate::process::CommandRunner;
use crate::types::ProbeKind;
use std::time::Duration;

/// Line prefixes worth keeping, checked in order; the label drops the colon
pub const WHOIS_FIELDS: [(&str, &str); 9] = [
    ("Domain Name:", "Domain Name"),
    ("Registrar:", "Registrar"),
    ("Registry Expiry Date:", "Registry Expiry Date"),
    ("Expiration Date:", "Expiration Date"),
    ("Creation Date:", "Creation Date"),
    ("Updated Date:", "Updated Date"),
    ("Name Server:", "Name Server"),
    ("DNSSEC:", "DNSSEC"),
    ("Registrar WHOIS Server:", "Registrar WHOIS Server"),
];

/// Known fields from raw WHOIS text, in output order, at most `WHOIS_MAX_ROWS`
pub fn extract_fields(text: &str) -> Vec<Vec<String>> {
    let mut rows = Vec::new();
    for line in text.lines().map(str::trim) {
        if let Some((prefix, label)) = WHOIS_FIELDS.iter().find(|(prefix, _)| line.starts_with(prefix)) {
            let value = line[prefix.len()..].trim();
            rows.push(vec![label.to_string(), value.to_string()]);
            if rows.len() >= WHOIS_MAX_ROWS {
                break;
            }
        }
    }
    rows
}

/// Field table, or the raw text when no known field was found
pub fn build_report(text: &str) -> ProbeReport {
    let mut report = ProbeReport::new(ProbeKind::Whois);
    let rows = extract_fields(text);
    if rows.is_empty() {
        report.line("WHOIS output (raw):");
        report.raw(text);
    } else {
        report.table(&FIELD_VALUE_HEADERS, rows);
    }
    report
}

pub async fn run(runner: &dyn CommandRunner, hostname: &str, timeout: Duration) -> ProbeReport {
    match runner.run("whois", &[hostname.to_string()], timeout).await {
        Ok(output) => build_report(&output.combined()),
        Err(e) => ProbeReport::failed(ProbeKind::Whois, format!("WHOIS failed: {}", e)),
    }
}
