//! Apple App Site Association (AASA) checker.
//!
//! Validates that a domain publishes `apple-app-site-association` correctly:
//!
//! - HTTPS fetch with no redirects and a strict content-type policy
//! - PKCS#7 envelope verification (integrity only, no signer trust)
//! - Structural validation of `applinks.details`
//! - Bundle / team identifier matching
//!
//! # Quick Start
//!
//! ```no_run
//! use aasa_verify::{CheckConfig, CheckRequest, DomainChecker};
//!
//! # async fn example() -> Result<(), aasa_verify::CheckError> {
//! let checker = DomainChecker::new(CheckConfig::default())?;
//!
//! let request = CheckRequest::new("example.com")
//!     .with_bundle_identifier("com.example.App")
//!     .with_team_identifier("ABCDE12345")
//!     .with_allow_unencrypted(true);
//!
//! match checker.check(&request).await {
//!     Ok(result) => println!("found: {:?}", result.identifier_found),
//!     Err(e) => println!("failed: {:?}", e.flags()),
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Errors
//!
//! Every failure is a [`CheckError`]; [`CheckError::flags`] gives the
//! flag-set view (`badDns`, `httpsFailure`, `serverError`, `redirects`,
//! `badContentType`, `signatureVerificationFailed`, `invalidJson`, `timeout`)
//! with exactly one flag set.
//!
//! # Configuration
//!
//! | Environment Variable | Description |
//! |---------------------|-------------|
//! | `AASA_TIMEOUT` | Request timeout in seconds (default: 30) |
//! | `AASA_VERIFIER_TIMEOUT` | External verifier timeout in seconds (default: 30) |
//! | `AASA_VERIFIER` | `native` (default with the `openssl` feature) or `command` |
//! | `AASA_OPENSSL` | Program for the `command` verifier (default: `openssl`) |

pub mod checker;
pub mod domain;
pub mod envelope;
pub mod error;
pub mod fetch;
pub mod manifest;
pub mod types;

// Re-export main types
pub use checker::{verifier_for, verify_and_decode, DomainChecker};
pub use domain::{manifest_url, normalize_domain, MANIFEST_PATH};
#[cfg(feature = "openssl")]
pub use envelope::NativeEnvelopeVerifier;
pub use envelope::{EnvelopeError, EnvelopeVerifier, SmimeCommandVerifier};
pub use error::{CheckError, CheckResult, ErrorFlags, Stage};
pub use fetch::{ManifestFetcher, CHECKER_USER_AGENT, ENVELOPE_MIME, JSON_MIMES};
pub use manifest::{decode_manifest, AppIdPattern, AssociationDocument, Details};
pub use types::{
    CheckConfig, CheckRequest, ContentKind, FetchedManifest, VerificationResult, VerifierBackend,
};
