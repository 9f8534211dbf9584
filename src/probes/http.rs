//! HTTP status line and response headers

use crate::client::{build_client, describe_error, status_text};
use crate::defaults::HEADER_DISPLAY_WIDTH;
use crate::models::ProbeReport;
use crate::types::ProbeKind;
use reqwest::header::HeaderMap;
use std::collections::BTreeMap;
use std::time::Duration;

pub const HEADERS: [&str; 2] = ["Header", "Value"];

/// `content-type` -> `Content-Type`
pub fn canonical_header_name(name: &str) -> String {
    let mut canonical = String::with_capacity(name.len());
    let mut upper = true;
    for c in name.chars() {
        if upper {
            canonical.extend(c.to_uppercase());
        } else {
            canonical.extend(c.to_lowercase());
        }
        upper = c == '-';
    }
    canonical
}

/// Collapse runs of whitespace to single spaces
pub fn normalize_whitespace(value: &str) -> String {
    value.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Cut to `max` characters, ending in `...` when shortened
pub fn truncate_for_display(value: &str, max: usize) -> String {
    if max == 0 {
        return String::new();
    }
    let count = value.chars().count();
    if count <= max {
        return value.to_string();
    }
    if max <= 3 {
        return "...".to_string();
    }
    let mut cut: String = value.chars().take(max - 3).collect();
    cut.push_str("...");
    cut
}

/// Display rows: canonical names in sorted order, repeated headers joined
pub fn header_rows(headers: &HeaderMap) -> Vec<Vec<String>> {
    let mut grouped: BTreeMap<String, Vec<String>> = BTreeMap::new();
    for (name, value) in headers {
        grouped
            .entry(canonical_header_name(name.as_str()))
            .or_default()
            .push(String::from_utf8_lossy(value.as_bytes()).to_string());
    }

    grouped
        .into_iter()
        .map(|(name, values)| {
            let joined = normalize_whitespace(&values.join(", "));
            vec![name, truncate_for_display(&joined, HEADER_DISPLAY_WIDTH)]
        })
        .collect()
}

pub async fn run(url: &str, timeout: Duration) -> ProbeReport {
    let client = match build_client(timeout) {
        Ok(client) => client,
        Err(e) => return ProbeReport::failed(ProbeKind::Http, format!("HTTP request failed: {}", e)),
    };

    let response = match client.get(url).send().await {
        Ok(response) => response,
        Err(e) => {
            return ProbeReport::failed(
                ProbeKind::Http,
                format!("HTTP request failed: {}", describe_error(&e)),
            )
        }
    };

    let status = status_text(response.status());
    let rows = header_rows(response.headers());
    let _ = response.bytes().await;

    let mut report = ProbeReport::new(ProbeKind::Http);
    report.line(format!("Status: {}", status));
    report.table(&HEADERS, rows);
    report
}
