//! HTTP layer: request, status mapping and content-type classification.
//!
//! This is the ONLY place for status code handling. fetch/mod.rs never
//! interprets status codes.

use reqwest::header::{CONTENT_TYPE, LOCATION};
use tracing::debug;

use crate::domain::manifest_url;
use crate::error::{CheckError, CheckResult};
use crate::types::FetchedManifest;

use super::helpers::{classify_content_type, classify_transport};

/// HTTP backend (holds the reqwest client and URL scheme).
#[derive(Debug, Clone)]
pub(crate) struct HttpBackend {
    pub(crate) client: reqwest::Client,
    pub(crate) scheme: String,
}

impl HttpBackend {
    /// Single GET of the manifest. No retries, no redirects.
    pub(crate) async fn get_manifest(
        &self,
        domain: &str,
        allow_unencrypted: bool,
    ) -> CheckResult<FetchedManifest> {
        let url = manifest_url(&self.scheme, domain);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| classify_transport(&e, domain))?;

        let status = response.status().as_u16();
        debug!(url = %url, status, "manifest response");

        match status {
            400..=u16::MAX => return Err(CheckError::ServerError { status }),
            300..=399 => {
                let location = response
                    .headers()
                    .get(LOCATION)
                    .and_then(|v| v.to_str().ok())
                    .map(String::from);
                return Err(CheckError::Redirect { status, location });
            }
            _ => {}
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(String::from);

        let kind = classify_content_type(content_type.as_deref(), allow_unencrypted)
            .ok_or_else(|| CheckError::BadContentType {
                content_type: content_type.clone(),
            })?;

        // Raw bytes: the body may be DER and must not be decoded as text.
        let body = response
            .bytes()
            .await
            .map_err(|e| classify_transport(&e, domain))?;

        Ok(FetchedManifest {
            body: body.to_vec(),
            kind,
            content_type: content_type.unwrap_or_default(),
            status,
        })
    }
}
