//! In-memory PKCS#7 verification backed by the `openssl` crate.

use async_trait::async_trait;
use openssl::pkcs7::{Pkcs7, Pkcs7Flags};
use openssl::stack::Stack;
use openssl::x509::store::X509StoreBuilder;
use openssl::x509::X509;

use super::{EnvelopeError, EnvelopeVerifier};

/// Verifies envelopes without touching the filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct NativeEnvelopeVerifier;

impl NativeEnvelopeVerifier {
    pub fn new() -> Self {
        Self
    }

    /// Verify a DER envelope and return its content.
    ///
    /// `NOVERIFY` skips signer certificate chain validation; the signature
    /// over the content is still checked.
    pub fn verify_der(envelope: &[u8]) -> Result<Vec<u8>, EnvelopeError> {
        let pkcs7 = Pkcs7::from_der(envelope)
            .map_err(|e| EnvelopeError::Verification(format!("invalid PKCS#7 envelope: {}", e)))?;

        let certs = Stack::<X509>::new().map_err(openssl_error)?;
        let store = X509StoreBuilder::new().map_err(openssl_error)?.build();

        let mut payload = Vec::new();
        pkcs7
            .verify(
                &certs,
                &store,
                None,
                Some(&mut payload),
                Pkcs7Flags::NOVERIFY,
            )
            .map_err(|e| EnvelopeError::Verification(format!("signature check failed: {}", e)))?;

        Ok(payload)
    }
}

fn openssl_error(err: openssl::error::ErrorStack) -> EnvelopeError {
    EnvelopeError::Verification(err.to_string())
}

#[async_trait]
impl EnvelopeVerifier for NativeEnvelopeVerifier {
    async fn verify_envelope(&self, envelope: &[u8]) -> Result<Vec<u8>, EnvelopeError> {
        Self::verify_der(envelope)
    }
}
