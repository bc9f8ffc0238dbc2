//! Signed-envelope verification.
//!
//! A signed manifest is a DER-encoded PKCS#7 `SignedData` structure. Both
//! backends check the signature against the signer certificate carried in
//! the envelope and return the inner content. Neither validates the signer's
//! certificate chain (the `-noverify` mode of `openssl smime`).

use async_trait::async_trait;

use crate::error::{CheckError, Stage};

pub mod command;
#[cfg(feature = "openssl")]
pub mod native;

pub use command::SmimeCommandVerifier;
#[cfg(feature = "openssl")]
pub use native::NativeEnvelopeVerifier;

/// Envelope verification failures.
#[derive(Debug, thiserror::Error)]
pub enum EnvelopeError {
    /// Malformed envelope or signature mismatch.
    #[error("{0}")]
    Verification(String),

    /// Temp file or process I/O failed.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Verifier did not finish in time.
    #[error("verifier timed out")]
    Timeout,
}

impl From<EnvelopeError> for CheckError {
    fn from(err: EnvelopeError) -> Self {
        match err {
            EnvelopeError::Timeout => Self::Timeout {
                stage: Stage::Verify,
            },
            other => Self::SignatureVerificationFailed {
                reason: other.to_string(),
            },
        }
    }
}

/// Strips a signature envelope and returns the verified payload.
#[async_trait]
pub trait EnvelopeVerifier: Send + Sync + std::fmt::Debug {
    async fn verify_envelope(&self, envelope: &[u8]) -> Result<Vec<u8>, EnvelopeError>;
}
