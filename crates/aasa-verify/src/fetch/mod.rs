//! Manifest fetcher.
//!
//! Public API: no status code knowledge. All HTTP/status mapping in http.rs.

use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};
use tracing::debug;

use crate::error::{CheckError, CheckResult};
use crate::types::{CheckConfig, FetchedManifest};

mod helpers;
mod http;

pub use helpers::{ENVELOPE_MIME, JSON_MIMES};
use http::HttpBackend;

pub const CHECKER_USER_AGENT: &str = concat!("aasa-verify/", env!("CARGO_PKG_VERSION"));

/// Fetches `apple-app-site-association` from a domain.
#[derive(Debug, Clone)]
pub struct ManifestFetcher {
    http: HttpBackend,
}

impl ManifestFetcher {
    pub fn new(config: &CheckConfig) -> CheckResult<Self> {
        let mut default_headers = HeaderMap::new();
        default_headers.insert(USER_AGENT, HeaderValue::from_static(CHECKER_USER_AGENT));

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .redirect(reqwest::redirect::Policy::none())
            .default_headers(default_headers)
            .build()
            .map_err(|e| CheckError::Config {
                message: format!("failed to create HTTP client: {}", e),
            })?;

        Ok(Self {
            http: HttpBackend {
                client,
                scheme: config.scheme.clone(),
            },
        })
    }

    /// Fetch and classify the manifest of an already-normalized domain.
    pub async fn fetch(
        &self,
        domain: &str,
        allow_unencrypted: bool,
    ) -> CheckResult<FetchedManifest> {
        debug!(domain = %domain, allow_unencrypted, "fetching association manifest");
        let fetched = self.http.get_manifest(domain, allow_unencrypted).await?;
        debug!(
            domain = %domain,
            kind = ?fetched.kind,
            bytes = fetched.body.len(),
            "manifest fetched"
        );
        Ok(fetched)
    }
}
