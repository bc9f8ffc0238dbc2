//! Verification pipeline for one domain.
//!
//! Fetching -> Classifying -> {Decoding-Plain | Verifying-Signature ->
//! Decoding-Verified} -> Done | Failed.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info, warn};

use crate::domain::normalize_domain;
use crate::envelope::{EnvelopeVerifier, SmimeCommandVerifier};
use crate::error::{CheckError, CheckResult};
use crate::fetch::ManifestFetcher;
use crate::manifest::decode_manifest;
use crate::types::{CheckConfig, CheckRequest, ContentKind, VerificationResult, VerifierBackend};

/// Checks whether a domain publishes a valid association manifest.
///
/// Cheap to clone; clones share the HTTP client and verifier, so many checks
/// can run concurrently.
#[derive(Debug, Clone)]
pub struct DomainChecker {
    fetcher: ManifestFetcher,
    verifier: Arc<dyn EnvelopeVerifier>,
}

impl DomainChecker {
    pub fn new(config: CheckConfig) -> CheckResult<Self> {
        let verifier = verifier_for(&config)?;
        Self::with_verifier(config, verifier)
    }

    pub fn with_verifier(
        config: CheckConfig,
        verifier: Arc<dyn EnvelopeVerifier>,
    ) -> CheckResult<Self> {
        Ok(Self {
            fetcher: ManifestFetcher::new(&config)?,
            verifier,
        })
    }

    pub fn from_env() -> CheckResult<Self> {
        Self::new(CheckConfig::from_env())
    }

    /// Run the pipeline for one request.
    pub async fn check(&self, request: &CheckRequest) -> CheckResult<VerificationResult> {
        let domain = normalize_domain(&request.domain)?;
        let bundle = request.bundle_identifier.as_deref();
        let team = request.team_identifier.as_deref();

        let fetched = self
            .fetcher
            .fetch(&domain, request.allow_unencrypted)
            .await?;

        let result = match fetched.kind {
            ContentKind::Json => match decode_manifest(&fetched.body, bundle, team, false) {
                Ok(result) => result,
                Err(e) => {
                    // Content-type headers are not always accurate.
                    warn!(
                        domain = %domain,
                        error = %e,
                        "json content-type but body does not parse, trying envelope"
                    );
                    self.verify_and_decode(&fetched.body, bundle, team).await?
                }
            },
            ContentKind::Envelope => self.verify_and_decode(&fetched.body, bundle, team).await?,
        };

        info!(
            domain = %domain,
            encrypted = result.encrypted,
            structurally_valid = result.structurally_valid,
            identifier_found = ?result.identifier_found,
            "domain check complete"
        );
        Ok(result)
    }

    /// Convenience wrapper around [`DomainChecker::check`].
    pub async fn check_domain(
        &self,
        domain: &str,
        bundle_identifier: Option<&str>,
        team_identifier: Option<&str>,
        allow_unencrypted: bool,
    ) -> CheckResult<VerificationResult> {
        let request = CheckRequest {
            domain: domain.to_string(),
            bundle_identifier: bundle_identifier.map(String::from),
            team_identifier: team_identifier.map(String::from),
            allow_unencrypted,
        };
        self.check(&request).await
    }

    async fn verify_and_decode(
        &self,
        body: &[u8],
        bundle: Option<&str>,
        team: Option<&str>,
    ) -> CheckResult<VerificationResult> {
        verify_and_decode(self.verifier.as_ref(), body, bundle, team).await
    }
}

/// Strip the envelope with `verifier`, then decode the payload.
///
/// Verification failures and undecodable payloads stay distinct.
pub async fn verify_and_decode(
    verifier: &dyn EnvelopeVerifier,
    envelope: &[u8],
    bundle_identifier: Option<&str>,
    team_identifier: Option<&str>,
) -> CheckResult<VerificationResult> {
    let payload = verifier.verify_envelope(envelope).await?;
    debug!(bytes = payload.len(), "envelope verified");

    decode_manifest(&payload, bundle_identifier, team_identifier, true).map_err(|e| {
        CheckError::InvalidJson {
            reason: e.to_string(),
        }
    })
}

/// Envelope verifier selected by `config.verifier`.
pub fn verifier_for(config: &CheckConfig) -> CheckResult<Arc<dyn EnvelopeVerifier>> {
    match config.verifier {
        VerifierBackend::Command => Ok(Arc::new(SmimeCommandVerifier::new(
            config.openssl_program.clone(),
            Duration::from_secs(config.verifier_timeout_secs),
        ))),
        #[cfg(feature = "openssl")]
        VerifierBackend::Native => Ok(Arc::new(crate::envelope::NativeEnvelopeVerifier::new())),
        #[cfg(not(feature = "openssl"))]
        VerifierBackend::Native => Err(CheckError::Config {
            message: "native verifier requires the `openssl` feature".to_string(),
        }),
    }
}
