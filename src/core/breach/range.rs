//! Range index access.
//!
//! The index is queried with `GET {endpoint}/{PREFIX}` and answers with
//! `SUFFIX:COUNT` lines separated by CRLF.

use std::net::IpAddr;
use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::tls;
use reqwest::Url;
use tracing::{debug, trace};

use crate::error::{BreachError, Result};

/// One `SUFFIX:COUNT` line of a range response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RangeEntry {
    pub suffix: String,
    pub count: u64,
}

/// Source of range responses.
pub trait RangeSource {
    /// Fetch the raw response body for a five-character hash prefix.
    ///
    /// # Errors
    ///
    /// Returns `BreachError::TransportUnavailable` if the index cannot be
    /// reached or answers with a non-success status.
    fn fetch(&self, prefix: &str) -> Result<String>;
}

impl<S: RangeSource + ?Sized> RangeSource for &S {
    fn fetch(&self, prefix: &str) -> Result<String> {
        (**self).fetch(prefix)
    }
}

/// Parse a range response body.
///
/// Blank lines (including a trailing newline) are skipped. Bare `\n`
/// separators are accepted as well as `\r\n`.
///
/// # Errors
///
/// Returns `BreachError::MalformedIndexResponse` with the 1-based line
/// number of the first line that is not `HEX:COUNT`.
pub fn parse_range(body: &str) -> Result<Vec<RangeEntry>> {
    let mut entries = Vec::new();

    for (i, raw) in body.split('\n').enumerate() {
        let line = raw.trim();
        if line.is_empty() {
            continue;
        }

        let malformed = |reason: &str| BreachError::MalformedIndexResponse {
            line: i + 1,
            reason: reason.to_string(),
        };

        let (suffix, count) = line
            .split_once(':')
            .ok_or_else(|| malformed("missing ':' separator"))?;

        let suffix = suffix.trim();
        if suffix.is_empty() || !suffix.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(malformed("suffix is not hex").into());
        }

        let count: u64 = count
            .trim()
            .parse()
            .map_err(|_| malformed("count is not a non-negative integer"))?;

        entries.push(RangeEntry {
            suffix: suffix.to_string(),
            count,
        });
    }

    trace!(entries = entries.len(), "range parsed");
    Ok(entries)
}

/// Check that an endpoint never carries a hash prefix in cleartext.
///
/// `https` is always accepted. Plain `http` is accepted only for loopback
/// hosts, so local mirrors and test servers keep working.
pub fn check_endpoint(endpoint: &str) -> std::result::Result<Url, String> {
    let url =
        Url::parse(endpoint).map_err(|e| format!("invalid endpoint {}: {}", endpoint, e))?;

    match url.scheme() {
        "https" => Ok(url),
        "http" if is_loopback(&url) => Ok(url),
        "http" => Err(format!(
            "plaintext http is only allowed for loopback hosts: {}",
            endpoint
        )),
        other => Err(format!("unsupported scheme '{}': {}", other, endpoint)),
    }
}

/// Range source backed by an HTTPS endpoint.
///
/// TLS 1.2 is the minimum protocol version, and remote endpoints must use
/// `https`. Requests ask the server for
/// response padding so the body size does not leak the range's contents.
#[derive(Debug, Clone)]
pub struct HttpRangeSource {
    client: Client,
    endpoint: String,
}

impl HttpRangeSource {
    /// Build a source for an endpoint such as
    /// `https://api.pwnedpasswords.com/range`.
    ///
    /// # Errors
    ///
    /// Returns `BreachError::TransportUnavailable` if the endpoint is not
    /// an allowed URL or the TLS client cannot be initialized.
    pub fn new(endpoint: &str) -> Result<Self> {
        let url = check_endpoint(endpoint).map_err(BreachError::TransportUnavailable)?;
        let loopback = is_loopback(&url);

        let mut builder = Client::builder()
            .https_only(!loopback)
            .min_tls_version(tls::Version::TLS_1_2)
            .user_agent(concat!("lockbox/", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(30));

        // Local mirrors are reached directly even when a proxy is configured.
        if loopback {
            builder = builder.no_proxy();
        }

        let client = builder
            .build()
            .map_err(|e| BreachError::TransportUnavailable(format!("{}", e)))?;

        Ok(Self {
            client,
            endpoint: endpoint.trim_end_matches('/').to_string(),
        })
    }

}

fn is_loopback(url: &Url) -> bool {
    match url.host_str() {
        Some(host) if host.eq_ignore_ascii_case("localhost") => true,
        Some(host) => host
            .trim_start_matches('[')
            .trim_end_matches(']')
            .parse::<IpAddr>()
            .map(|ip| ip.is_loopback())
            .unwrap_or(false),
        None => false,
    }
}

impl RangeSource for HttpRangeSource {
    fn fetch(&self, prefix: &str) -> Result<String> {
        let url = format!("{}/{}", self.endpoint, prefix);
        debug!(url = %url, "fetching range");

        let response = self
            .client
            .get(&url)
            .header("Add-Padding", "true")
            .send()
            .map_err(|e| BreachError::TransportUnavailable(format!("{}", e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(BreachError::TransportUnavailable(format!(
                "range request returned {}",
                status
            ))
            .into());
        }

        let body = response
            .text()
            .map_err(|e| BreachError::TransportUnavailable(format!("{}", e)))?;

        trace!(bytes = body.len(), "range body received");
        Ok(body)
    }
}
