//! Target validation: raw user input to a resolved target

use crate::{
    error::{AppError, Result},
    models::ResolvedTarget,
};
use async_trait::async_trait;
use std::net::IpAddr;
use url::{Host, Url};

/// Host lookup used to confirm a target resolves before any probe runs
#[async_trait]
pub trait HostResolver: Send + Sync {
    async fn lookup_host(&self, host: &str) -> std::io::Result<Vec<IpAddr>>;
}

/// Resolver backed by the operating system (`getaddrinfo`)
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemHostResolver;

#[async_trait]
impl HostResolver for SystemHostResolver {
    async fn lookup_host(&self, host: &str) -> std::io::Result<Vec<IpAddr>> {
        let addrs = tokio::net::lookup_host((host, 0)).await?;
        let ips: Vec<IpAddr> = addrs.map(|addr| addr.ip()).collect();
        if ips.is_empty() {
            return Err(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("no addresses found for {}", host),
            ));
        }
        Ok(ips)
    }
}

/// Add `http://` unless the input already carries an http(s) scheme
pub fn normalize_scheme(raw: &str) -> String {
    let lower = raw.to_ascii_lowercase();
    if lower.starts_with("http://") || lower.starts_with("https://") {
        raw.to_string()
    } else {
        format!("http://{}", raw)
    }
}

/// Parse a target into its normalized URL and bare hostname, without any lookup
pub fn parse_target(raw: &str) -> Result<ResolvedTarget> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(AppError::invalid_input("Target cannot be empty"));
    }

    let candidate = normalize_scheme(trimmed);
    let url = Url::parse(&candidate)
        .map_err(|e| AppError::invalid_input(format!("Invalid URL '{}': {}", trimmed, e)))?;

    let hostname = match url.host() {
        Some(Host::Domain(domain)) => domain.to_string(),
        Some(Host::Ipv4(addr)) => addr.to_string(),
        Some(Host::Ipv6(addr)) => addr.to_string(),
        None => String::new(),
    };

    if hostname.is_empty() {
        return Err(AppError::invalid_input(format!(
            "Invalid URL '{}': missing hostname",
            trimmed
        )));
    }

    Ok(ResolvedTarget::new(url.to_string(), hostname))
}

/// Validate a target and confirm its hostname resolves
pub async fn validate(raw: &str, resolver: &dyn HostResolver) -> Result<ResolvedTarget> {
    let target = parse_target(raw)?;

    resolver
        .lookup_host(target.hostname())
        .await
        .map_err(|e| AppError::resolution(target.hostname(), e))?;

    Ok(target)
}
