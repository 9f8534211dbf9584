//! Website probes
//!
//! Each probe is an async function taking the resolved target pieces and a
//! timeout, and returning a [`ProbeReport`](crate::models::ProbeReport).
//! Probes never return errors: failures become warning blocks and a
//! `Failed` status so later probes still run.

pub mod dns;
pub mod http;
pub mod latency;
pub mod ping;
pub mod ssl;
pub mod traceroute;
pub mod whois;

#[cfg(test)]
pub(crate) mod testing;

/// Headers used by the record/value style tables
pub const FIELD_VALUE_HEADERS: [&str; 2] = ["Field", "Value"];
