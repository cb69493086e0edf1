//! Minimal HTTP client helpers for requesting metrics from the monitoring backend.

use std::{fmt, fs, time::Duration};

use serde::de::DeserializeOwned;
use tracing::{debug, trace};
use url::Url;

use crate::error::FetchError;

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Read-only JSON endpoints the dashboard consumes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    Cpu,
    Memory,
    Disk,
    Details,
    MemoryTrend,
    DiskTrend,
    Processes,
    ServerIp,
}

impl Endpoint {
    pub const ALL: [Endpoint; 8] = [
        Endpoint::Cpu,
        Endpoint::Memory,
        Endpoint::Disk,
        Endpoint::Details,
        Endpoint::MemoryTrend,
        Endpoint::DiskTrend,
        Endpoint::Processes,
        Endpoint::ServerIp,
    ];

    pub fn path(self) -> &'static str {
        match self {
            Endpoint::Cpu => "/api/system/cpu",
            Endpoint::Memory => "/api/system/memory",
            Endpoint::Disk => "/api/system/disk",
            Endpoint::Details => "/api/system/details",
            Endpoint::MemoryTrend => "/api/trend/memory",
            Endpoint::DiskTrend => "/api/trend/disk",
            Endpoint::Processes => "/api/system/processes",
            Endpoint::ServerIp => "/api/server-ip",
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base: Url,
}

impl ApiClient {
    // Build a client for `base` (http:// or https://), optionally trusting an extra CA
    pub fn new(base: &str, tls_ca: Option<&str>, timeout: Duration) -> Result<Self, FetchError> {
        let base = normalize_base(base)?;
        let mut builder = reqwest::Client::builder().timeout(timeout);
        if let Some(path) = tls_ca {
            let pem = fs::read(path).map_err(|e| FetchError::TlsCa {
                path: path.to_string(),
                reason: e.to_string(),
            })?;
            let cert = reqwest::Certificate::from_pem(&pem).map_err(|e| FetchError::TlsCa {
                path: path.to_string(),
                reason: e.to_string(),
            })?;
            builder = builder.add_root_certificate(cert);
        }
        let http = builder.build().map_err(FetchError::Client)?;
        Ok(Self { http, base })
    }

    pub fn base(&self) -> &Url {
        &self.base
    }

    pub fn url_for(&self, endpoint: Endpoint) -> Result<Url, FetchError> {
        // Relative join keeps any path prefix on the base (e.g. behind a reverse proxy)
        self.base
            .join(endpoint.path().trim_start_matches('/'))
            .map_err(|e| FetchError::InvalidUrl {
                url: format!("{}{}", self.base, endpoint.path()),
                reason: e.to_string(),
            })
    }

    // GET the endpoint and decode its JSON body
    pub async fn get<T: DeserializeOwned>(&self, endpoint: Endpoint) -> Result<T, FetchError> {
        let url = self.url_for(endpoint)?;
        let resp = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|source| FetchError::Request { endpoint, source })?;

        let status = resp.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                endpoint,
                status: status.as_u16(),
            });
        }

        let body = resp
            .text()
            .await
            .map_err(|source| FetchError::Request { endpoint, source })?;
        debug!(%endpoint, status = status.as_u16(), bytes = body.len(), "response received");
        trace!(%endpoint, body = %body, "response body");

        serde_json::from_str::<T>(&body).map_err(|source| FetchError::Parse { endpoint, source })
    }
}

fn normalize_base(base: &str) -> Result<Url, FetchError> {
    let invalid = |reason: String| FetchError::InvalidUrl {
        url: base.to_string(),
        reason,
    };
    let mut url = Url::parse(base.trim()).map_err(|e| invalid(e.to_string()))?;
    match url.scheme() {
        "http" | "https" => {}
        other => return Err(invalid(format!("unsupported scheme '{other}'"))),
    }
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_urls_keep_base_prefix() {
        let c = ApiClient::new("http://mon.local:5000/monitor", None, DEFAULT_TIMEOUT).unwrap();
        assert_eq!(
            c.url_for(Endpoint::Cpu).unwrap().as_str(),
            "http://mon.local:5000/monitor/api/system/cpu"
        );
        let c = ApiClient::new("http://mon.local:5000/", None, DEFAULT_TIMEOUT).unwrap();
        assert_eq!(
            c.url_for(Endpoint::ServerIp).unwrap().as_str(),
            "http://mon.local:5000/api/server-ip"
        );
    }

    #[test]
    fn rejects_non_http_schemes() {
        let err = ApiClient::new("ws://127.0.0.1:3000/ws", None, DEFAULT_TIMEOUT).unwrap_err();
        assert!(matches!(err, FetchError::InvalidUrl { .. }), "{err}");
        assert!(ApiClient::new("not a url", None, DEFAULT_TIMEOUT).is_err());
    }

    #[test]
    fn missing_ca_file_is_reported() {
        let err = ApiClient::new(
            "https://127.0.0.1:8443",
            Some("/nonexistent/dashtop-ca.pem"),
            DEFAULT_TIMEOUT,
        )
        .unwrap_err();
        assert!(matches!(err, FetchError::TlsCa { .. }), "{err}");
    }

    #[test]
    fn every_endpoint_lives_under_api() {
        for ep in Endpoint::ALL {
            assert!(ep.path().starts_with("/api/"), "{ep}");
        }
    }
}
