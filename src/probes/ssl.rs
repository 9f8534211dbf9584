//! TLS handshake and leaf certificate summary

use crate::defaults::SAN_DISPLAY_LIMIT;
use crate::error::{AppError, Result};
use crate::models::ProbeReport;
use crate::probes::FIELD_VALUE_HEADERS;
use crate::types::ProbeKind;
use chrono::{DateTime, Utc};
use rustls::pki_types::ServerName;
use rustls::{ClientConfig, RootCertStore};
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpStream;
use tokio_rustls::TlsConnector;
use x509_parser::extensions::GeneralName;

const DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// The parts of a leaf certificate worth showing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CertificateSummary {
    pub common_name: String,
    pub issuer: String,
    pub not_before: DateTime<Utc>,
    pub not_after: DateTime<Utc>,
    /// DNS names from the subjectAltName extension, sorted
    pub sans: Vec<String>,
}

impl CertificateSummary {
    /// Decode a DER certificate
    pub fn from_der(der: &[u8]) -> Result<Self> {
        let (_, cert) = x509_parser::parse_x509_certificate(der)
            .map_err(|e| AppError::certificate(format!("failed to parse certificate: {}", e)))?;

        let common_name = cert
            .subject()
            .iter_common_name()
            .next()
            .and_then(|cn| cn.as_str().ok())
            .unwrap_or_default()
            .to_string();

        let issuer = cert
            .issuer()
            .iter_organization()
            .next()
            .and_then(|org| org.as_str().ok())
            .or_else(|| {
                cert.issuer()
                    .iter_common_name()
                    .next()
                    .and_then(|cn| cn.as_str().ok())
            })
            .unwrap_or_default()
            .to_string();

        let validity = cert.validity();
        let not_before = timestamp(validity.not_before.timestamp())?;
        let not_after = timestamp(validity.not_after.timestamp())?;

        let mut sans: Vec<String> = match cert.subject_alternative_name() {
            Ok(Some(extension)) => extension
                .value
                .general_names
                .iter()
                .filter_map(|name| match name {
                    GeneralName::DNSName(dns) => Some(dns.to_string()),
                    _ => None,
                })
                .collect(),
            _ => Vec::new(),
        };
        sans.sort();

        Ok(Self {
            common_name,
            issuer,
            not_before,
            not_after,
            sans,
        })
    }

    /// Strictly inside the validity window; either boundary counts as invalid
    pub fn is_valid_at(&self, now: DateTime<Utc>) -> bool {
        self.not_before < now && now < self.not_after
    }

    /// SANs one per line, capped with a `+N more` trailer
    pub fn san_display(&self) -> String {
        let mut shown: Vec<String> = self.sans.iter().take(SAN_DISPLAY_LIMIT).cloned().collect();
        if self.sans.len() > SAN_DISPLAY_LIMIT {
            shown.push(format!("+{} more", self.sans.len() - SAN_DISPLAY_LIMIT));
        }
        shown.join("\n")
    }

    pub fn rows(&self, now: DateTime<Utc>) -> Vec<Vec<String>> {
        let status = if self.is_valid_at(now) { "Valid" } else { "Invalid" };
        let mut rows = vec![
            vec!["Common Name".to_string(), self.common_name.clone()],
            vec!["Issuer".to_string(), self.issuer.clone()],
            vec!["Valid From".to_string(), self.not_before.format(DATE_FORMAT).to_string()],
            vec!["Valid Until".to_string(), self.not_after.format(DATE_FORMAT).to_string()],
            vec!["Status".to_string(), status.to_string()],
        ];
        if !self.sans.is_empty() {
            rows.push(vec!["Subject Alternative Names".to_string(), self.san_display()]);
        }
        rows
    }
}

fn timestamp(seconds: i64) -> Result<DateTime<Utc>> {
    DateTime::<Utc>::from_timestamp(seconds, 0)
        .ok_or_else(|| AppError::certificate(format!("certificate time out of range: {}", seconds)))
}

fn tls_connector() -> Result<TlsConnector> {
    let mut roots = RootCertStore::empty();
    roots.extend(webpki_roots::TLS_SERVER_ROOTS.iter().cloned());

    let config = ClientConfig::builder_with_provider(Arc::new(rustls::crypto::ring::default_provider()))
        .with_safe_default_protocol_versions()
        .map_err(|e| AppError::tls(format!("unsupported protocol configuration: {}", e)))?
        .with_root_certificates(roots)
        .with_no_client_auth();

    Ok(TlsConnector::from(Arc::new(config)))
}

/// Handshake with `hostname:443` and return the leaf certificate in DER form
pub async fn fetch_leaf_certificate(hostname: &str, port: u16) -> Result<Vec<u8>> {
    let connector = tls_connector()?;
    let server_name = ServerName::try_from(hostname.to_string())
        .map_err(|e| AppError::tls(format!("invalid server name {}: {}", hostname, e)))?;

    let stream = TcpStream::connect((hostname, port))
        .await
        .map_err(|e| AppError::network(format!("connect to {}:{} failed: {}", hostname, port, e)))?;
    let tls = connector
        .connect(server_name, stream)
        .await
        .map_err(|e| AppError::tls(format!("handshake with {} failed: {}", hostname, e)))?;

    let (_, session) = tls.get_ref();
    session
        .peer_certificates()
        .and_then(|certs| certs.first())
        .map(|leaf| leaf.as_ref().to_vec())
        .ok_or_else(|| AppError::certificate("No peer certificate presented"))
}

/// Build the report for an already decoded certificate
pub fn build_report(summary: &CertificateSummary, now: DateTime<Utc>) -> ProbeReport {
    let mut report = ProbeReport::new(ProbeKind::Ssl);
    report.table(&FIELD_VALUE_HEADERS, summary.rows(now));
    report
}

pub async fn run(hostname: &str, timeout: Duration) -> ProbeReport {
    let der = match tokio::time::timeout(timeout, fetch_leaf_certificate(hostname, 443)).await {
        Ok(Ok(der)) => der,
        Ok(Err(AppError::Certificate(message))) => return ProbeReport::failed(ProbeKind::Ssl, message),
        Ok(Err(e)) => return ProbeReport::failed(ProbeKind::Ssl, format!("SSL check failed: {}", e)),
        Err(_) => {
            return ProbeReport::failed(
                ProbeKind::Ssl,
                format!("SSL check failed: no handshake within {:?}", timeout),
            )
        }
    };

    match CertificateSummary::from_der(&der) {
        Ok(summary) => build_report(&summary, Utc::now()),
        Err(e) => ProbeReport::failed(ProbeKind::Ssl, format!("SSL check failed: {}", e)),
    }
}
