//! Synchronous client for the public **package download-statistics API**.
//!
//! Only the `packages/{name}/recent` endpoint is used. The call is made once per page
//! load; there is no retry, no pagination and no authentication.
//!
//! ### Notes
//! - Network timeouts use a sane default (30s); a hang beyond that surfaces as a
//!   network error for the download table only.
//! - Decoding is split from transport (`decode_recent`) so HTTP status and body
//!   handling can be checked without a live service.
//!
//! Typical usage:
//! ```no_run
//! # use dash_charts::api::Client;
//! let client = Client::default();
//! let body = client.recent_downloads("napari")?;
//! println!("{} days", body.data.len());
//! # Ok::<(), dash_charts::error::LoadError>(())
//! ```
use crate::error::LoadError;
use crate::models::RecentDownloads;
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC};
use reqwest::blocking::Client as HttpClient;
use reqwest::redirect::Policy;
use std::time::Duration;

/// Default public endpoint root.
pub const DEFAULT_BASE_URL: &str = "https://pypistats.org/api";

#[derive(Debug, Clone)]
pub struct Client {
    pub base_url: String,
    http: HttpClient,
}

impl Default for Client {
    fn default() -> Self {
        Self::with_base_url(DEFAULT_BASE_URL)
    }
}

// Package names keep -, _ and . unescaped
const SAFE: &AsciiSet = &NON_ALPHANUMERIC.remove(b'-').remove(b'_').remove(b'.');

impl Client {
    /// Build a client against a different endpoint root (mirrors, local proxies).
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        let http = HttpClient::builder()
            .timeout(Duration::from_secs(30)) // total request timeout
            .connect_timeout(Duration::from_secs(10)) // connect timeout
            .redirect(Policy::limited(5)) // cap redirects
            .user_agent(concat!("dash-charts/", env!("CARGO_PKG_VERSION")))
            .build()
            // Only fails if the TLS backend cannot initialise; fall back to reqwest's defaults.
            .unwrap_or_else(|_| HttpClient::new());
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http,
        }
    }

    /// URL of the recent-downloads endpoint for `package`.
    pub fn recent_url(&self, package: &str) -> String {
        let name = percent_encoding::utf8_percent_encode(package.trim(), SAFE);
        format!("{}/packages/{}/recent", self.base_url, name)
    }

    /// Fetch recent daily download counts for `package` with a single GET.
    ///
    /// ### Errors
    /// - `LoadError::Network` for transport failures
    /// - `LoadError::Status` for non-2xx answers
    /// - `LoadError::Decode` for bodies that are not `{ "data": [ {date, downloads}, ... ] }`
    pub fn recent_downloads(&self, package: &str) -> Result<RecentDownloads, LoadError> {
        let url = self.recent_url(package);
        log::debug!("GET {}", url);
        let resp = self
            .http
            .get(&url)
            .send()
            .map_err(|e| LoadError::Network(format!("GET {}: {}", url, e)))?;
        let status = resp.status().as_u16();
        let body = resp
            .text()
            .map_err(|e| LoadError::Network(format!("read body of {}: {}", url, e)))?;
        decode_recent(status, &body)
    }
}

/// Decode an HTTP answer of the recent-downloads endpoint.
pub fn decode_recent(status: u16, body: &str) -> Result<RecentDownloads, LoadError> {
    if !(200..300).contains(&status) {
        return Err(LoadError::Status { status });
    }
    serde_json::from_str(body).map_err(|e| LoadError::Decode(e.to_string()))
}
